use log::{debug, info};

use crate::config::*;
use crate::profile::PreferenceProfile;
use crate::tiebreak;

/// The points given to the alternatives, by rank position.
///
/// The scores are positional weights: whatever the order in which they are
/// provided, they are sorted in decreasing order at construction. The
/// highest score always goes to the most preferred alternative of each agent,
/// the lowest to the least preferred one. For example, `[1, 2, 3]` and
/// `[3, 2, 1]` define the same rule.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoreVector(Vec<f64>);

impl ScoreVector {
    pub fn new(scores: &[f64]) -> ScoreVector {
        let mut v = scores.to_vec();
        v.sort_by(|a, b| b.total_cmp(a));
        ScoreVector(v)
    }

    /// `[1, 0, ..., 0]`
    pub fn plurality(num_alternatives: usize) -> ScoreVector {
        ScoreVector(
            (0..num_alternatives)
                .map(|j| if j == 0 { 1.0 } else { 0.0 })
                .collect(),
        )
    }

    /// `[1, ..., 1, 0]`
    pub fn veto(num_alternatives: usize) -> ScoreVector {
        ScoreVector(
            (0..num_alternatives)
                .map(|j| if j + 1 == num_alternatives { 0.0 } else { 1.0 })
                .collect(),
        )
    }

    /// `[m-1, m-2, ..., 1, 0]`
    pub fn borda(num_alternatives: usize) -> ScoreVector {
        ScoreVector(
            (0..num_alternatives)
                .map(|j| (num_alternatives - 1 - j) as f64)
                .collect(),
        )
    }

    /// `[1, 1/2, ..., 1/m]`
    pub fn harmonic(num_alternatives: usize) -> ScoreVector {
        ScoreVector(
            (0..num_alternatives)
                .map(|j| 1.0 / ((j + 1) as f64))
                .collect(),
        )
    }

    pub fn scores(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The total score of every alternative, in increasing alternative order.
///
/// Fails if the score vector does not have one score per alternative.
pub fn scoring_totals(
    profile: &PreferenceProfile,
    scores: &ScoreVector,
) -> Result<Vec<(AlternativeId, f64)>, VotingErrors> {
    let num_alternatives = profile.num_alternatives();
    if scores.len() != num_alternatives {
        return Err(VotingErrors::InvalidScoreVector {
            expected: num_alternatives,
            actual: scores.len(),
        });
    }
    let mut totals: Vec<(AlternativeId, f64)> = profile
        .alternatives()
        .into_iter()
        .map(|alt| (alt, 0.0))
        .collect();
    for (_, ranking) in profile.iter() {
        for (pos, alt) in ranking.iter().enumerate() {
            // Alternatives are numbered from 1.
            if let Some(e) = totals.get_mut((alt.0 - 1) as usize) {
                e.1 += scores.0[pos];
            }
        }
    }
    debug!("scoring_totals: {:?}", totals);
    Ok(totals)
}

/// The alternatives with the highest total.
pub(crate) fn best_alternatives(totals: &[(AlternativeId, f64)]) -> Vec<AlternativeId> {
    let best = totals
        .iter()
        .map(|(_, s)| *s)
        .fold(f64::NEG_INFINITY, f64::max);
    totals
        .iter()
        .filter(|(_, s)| *s == best)
        .map(|(alt, _)| *alt)
        .collect()
}

pub(crate) fn run_scoring(
    profile: &PreferenceProfile,
    scores: &ScoreVector,
    tie_break: TieBreak,
) -> Result<VotingResult, VotingErrors> {
    if profile.num_agents() == 0 || profile.num_alternatives() == 0 {
        return Err(VotingErrors::EmptyElection);
    }
    let tally = scoring_totals(profile, scores)?;
    let possible_winners = best_alternatives(&tally);
    let (winner, tiebreak_applied) = tiebreak::resolve(&possible_winners, tie_break, profile)?;
    info!(
        "run_scoring: score vector {:?}: possible winners {:?} -> winner {}",
        scores.scores(),
        possible_winners,
        winner
    );
    Ok(VotingResult {
        winner,
        tally,
        round_stats: Vec::new(),
        tiebreak_applied,
    })
}

/// Positional scoring rule with an arbitrary score vector.
///
/// The score vector must have exactly one entry per alternative. It is sorted
/// in decreasing order before use (see [ScoreVector]).
pub fn scoring_rule(
    profile: &PreferenceProfile,
    score_vector: &[f64],
    tie_break: TieBreak,
) -> Result<AlternativeId, VotingErrors> {
    run_scoring(profile, &ScoreVector::new(score_vector), tie_break).map(|r| r.winner)
}

/// The alternative ranked first by the most agents.
pub fn plurality(
    profile: &PreferenceProfile,
    tie_break: TieBreak,
) -> Result<AlternativeId, VotingErrors> {
    let sv = ScoreVector::plurality(profile.num_alternatives());
    run_scoring(profile, &sv, tie_break).map(|r| r.winner)
}

/// The alternative ranked last by the fewest agents.
pub fn veto(
    profile: &PreferenceProfile,
    tie_break: TieBreak,
) -> Result<AlternativeId, VotingErrors> {
    let sv = ScoreVector::veto(profile.num_alternatives());
    run_scoring(profile, &sv, tie_break).map(|r| r.winner)
}

pub fn borda(
    profile: &PreferenceProfile,
    tie_break: TieBreak,
) -> Result<AlternativeId, VotingErrors> {
    let sv = ScoreVector::borda(profile.num_alternatives());
    run_scoring(profile, &sv, tie_break).map(|r| r.winner)
}

pub fn harmonic(
    profile: &PreferenceProfile,
    tie_break: TieBreak,
) -> Result<AlternativeId, VotingErrors> {
    let sv = ScoreVector::harmonic(profile.num_alternatives());
    run_scoring(profile, &sv, tie_break).map(|r| r.winner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_profile() -> PreferenceProfile {
        let m = ValuationMatrix::new(vec![
            vec![3.0, 1.0, 2.0],
            vec![1.0, 3.0, 2.0],
            vec![2.0, 2.0, 3.0],
        ])
        .unwrap();
        PreferenceProfile::from_valuations(&m)
    }

    // A few profiles of various shapes, used to compare rules.
    fn profiles() -> Vec<PreferenceProfile> {
        vec![
            example_profile(),
            PreferenceProfile::from_rankings(&[
                vec![1, 2, 3, 4],
                vec![2, 3, 4, 1],
                vec![2, 1, 4, 3],
                vec![4, 3, 1, 2],
                vec![1, 4, 2, 3],
            ])
            .unwrap(),
            PreferenceProfile::from_rankings(&[vec![2, 1], vec![1, 2], vec![2, 1]]).unwrap(),
            PreferenceProfile::from_rankings(&[
                vec![5, 4, 3, 2, 1],
                vec![1, 2, 3, 4, 5],
                vec![3, 5, 1, 4, 2],
            ])
            .unwrap(),
        ]
    }

    #[test]
    fn score_vector_is_sorted() {
        assert_eq!(ScoreVector::new(&[1.0, 2.0, 3.0]).scores(), &[3.0, 2.0, 1.0]);
        assert_eq!(ScoreVector::new(&[0.5, 4.0, 0.0, 1.0]).scores(), &[4.0, 1.0, 0.5, 0.0]);
        assert_eq!(ScoreVector::borda(4).scores(), &[3.0, 2.0, 1.0, 0.0]);
        assert_eq!(ScoreVector::veto(3).scores(), &[1.0, 1.0, 0.0]);
        assert_eq!(ScoreVector::plurality(3).scores(), &[1.0, 0.0, 0.0]);
        assert_eq!(ScoreVector::harmonic(4).scores(), &[1.0, 0.5, 1.0 / 3.0, 0.25]);
    }

    #[test]
    fn plurality_full_tie() {
        let p = example_profile();
        let totals = scoring_totals(&p, &ScoreVector::plurality(3)).unwrap();
        assert_eq!(
            totals,
            vec![
                (AlternativeId(1), 1.0),
                (AlternativeId(2), 1.0),
                (AlternativeId(3), 1.0)
            ]
        );
        assert_eq!(plurality(&p, TieBreak::Max), Ok(AlternativeId(3)));
        assert_eq!(plurality(&p, TieBreak::Min), Ok(AlternativeId(1)));
        // Agent 2 ranks 2 first.
        assert_eq!(plurality(&p, TieBreak::Agent(AgentId(2))), Ok(AlternativeId(2)));
        assert_eq!(
            plurality(&p, TieBreak::Agent(AgentId(4))),
            Err(VotingErrors::InvalidAgent(AgentId(4)))
        );
    }

    #[test]
    fn unsorted_score_vector() {
        let p = example_profile();
        let totals = scoring_totals(&p, &ScoreVector::new(&[1.0, 2.0, 3.0])).unwrap();
        assert_eq!(
            totals,
            vec![
                (AlternativeId(1), 5.0),
                (AlternativeId(2), 6.0),
                (AlternativeId(3), 7.0)
            ]
        );
        assert_eq!(
            scoring_rule(&p, &[1.0, 2.0, 3.0], TieBreak::Min),
            Ok(AlternativeId(3))
        );
        assert_eq!(
            scoring_rule(&p, &[3.0, 2.0, 1.0], TieBreak::Min),
            Ok(AlternativeId(3))
        );
    }

    #[test]
    fn wrong_score_vector_length() {
        let p = example_profile();
        assert_eq!(
            scoring_rule(&p, &[1.0, 0.0], TieBreak::Max),
            Err(VotingErrors::InvalidScoreVector {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            scoring_rule(&p, &[1.0, 0.0, 0.0, 0.0], TieBreak::Max),
            Err(VotingErrors::InvalidScoreVector {
                expected: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn plurality_and_veto_match_the_generic_rule() {
        for p in profiles() {
            let m = p.num_alternatives();
            let mut first = vec![0.0; m];
            first[0] = 1.0;
            let mut all_but_last = vec![1.0; m];
            all_but_last[m - 1] = 0.0;
            for tb in [TieBreak::Min, TieBreak::Max, TieBreak::Agent(AgentId(1))] {
                assert_eq!(plurality(&p, tb), scoring_rule(&p, &first, tb));
                assert_eq!(veto(&p, tb), scoring_rule(&p, &all_but_last, tb));
            }
        }
    }

    #[test]
    fn borda_totals_sum() {
        for p in profiles() {
            let n = p.num_agents();
            let m = p.num_alternatives();
            let totals = scoring_totals(&p, &ScoreVector::borda(m)).unwrap();
            let sum: f64 = totals.iter().map(|(_, s)| *s).sum();
            assert_eq!(sum, (n * m * (m - 1) / 2) as f64);
        }
    }

    #[test]
    fn borda_and_harmonic() {
        let p = PreferenceProfile::from_rankings(&[
            vec![1, 2, 3, 4],
            vec![2, 3, 4, 1],
            vec![2, 1, 4, 3],
            vec![4, 3, 1, 2],
            vec![1, 4, 2, 3],
        ])
        .unwrap();
        // Borda: 1 -> 3+0+2+1+3 = 9, 2 -> 2+3+3+0+1 = 9, 3 -> 1+2+0+2+0 = 5, 4 -> 0+1+1+3+2 = 7
        assert_eq!(borda(&p, TieBreak::Max), Ok(AlternativeId(2)));
        assert_eq!(borda(&p, TieBreak::Min), Ok(AlternativeId(1)));
        // Agent 4 prefers 1 over 2.
        assert_eq!(borda(&p, TieBreak::Agent(AgentId(4))), Ok(AlternativeId(1)));
        // Harmonic: 1 -> 1 + 1/4 + 1/2 + 1/3 + 1, 2 -> 1/2 + 1 + 1 + 1/4 + 1/3
        // Both sum to the same terms, but in a different order.
        let totals = scoring_totals(&p, &ScoreVector::harmonic(4)).unwrap();
        assert!((totals[0].1 - totals[1].1).abs() < 1e-12);
        assert!(totals[2].1 < totals[0].1);
        assert!(totals[3].1 < totals[0].1);
    }

    #[test]
    fn harmonic_winner() {
        let p = PreferenceProfile::from_rankings(&[vec![1, 2, 3], vec![1, 3, 2], vec![2, 3, 1]])
            .unwrap();
        // 1 -> 1 + 1 + 1/3, 2 -> 1/2 + 1/3 + 1, 3 -> 1/3 + 1/2 + 1/2
        let totals = scoring_totals(&p, &ScoreVector::harmonic(3)).unwrap();
        assert!(totals[0].1 > totals[1].1 && totals[1].1 > totals[2].1);
        assert_eq!(harmonic(&p, TieBreak::Min), Ok(AlternativeId(1)));
        assert_eq!(harmonic(&p, TieBreak::Max), Ok(AlternativeId(1)));
        assert_eq!(
            run_scoring(&p, &ScoreVector::harmonic(3), TieBreak::Max).map(|r| r.tiebreak_applied),
            Ok(false)
        );

        // 2 -> 1, 3 -> 1/2, 1 -> 1/3
        let p = PreferenceProfile::from_rankings(&[vec![2, 3, 1]]).unwrap();
        assert_eq!(harmonic(&p, TieBreak::Min), Ok(AlternativeId(2)));
    }

    #[test]
    fn veto_winner() {
        // 3 is never last
        let p = PreferenceProfile::from_rankings(&[vec![1, 3, 2], vec![2, 3, 1], vec![3, 1, 2]])
            .unwrap();
        assert_eq!(veto(&p, TieBreak::Min), Ok(AlternativeId(3)));
    }

    #[test]
    fn empty_profile() {
        let p = PreferenceProfile::from_rankings(&[]).unwrap();
        assert_eq!(borda(&p, TieBreak::Max), Err(VotingErrors::EmptyElection));
        assert_eq!(scoring_rule(&p, &[], TieBreak::Max), Err(VotingErrors::EmptyElection));
    }
}

mod config;
mod profile;
mod range;
mod scoring;
mod stv;
mod tiebreak;

pub mod builder;
pub mod manual;

use log::info;

pub use crate::config::*;
pub use crate::profile::PreferenceProfile;
pub use crate::range::{range_totals, range_voting};
pub use crate::scoring::{
    borda, harmonic, plurality, scoring_rule, scoring_totals, veto, ScoreVector,
};
pub use crate::stv::stv;
pub use crate::tiebreak::break_tie;

/// The winner is the alternative ranked first by the given agent.
pub fn dictatorship(
    profile: &PreferenceProfile,
    agent: AgentId,
) -> Result<AlternativeId, VotingErrors> {
    let ranking = profile
        .ranking(agent)
        .ok_or(VotingErrors::InvalidAgent(agent))?;
    ranking.first().cloned().ok_or(VotingErrors::EmptyElection)
}

/// Runs a voting rule over the valuations and returns the winner along with
/// the statistics of the count.
///
/// Arguments:
/// * `matrix` the valuations of the agents
/// * `rule` the rule to apply
/// * `tie_break` how to choose between alternatives tied for the win
pub fn run_voting_stats(
    matrix: &ValuationMatrix,
    rule: &VotingRule,
    tie_break: TieBreak,
) -> Result<VotingResult, VotingErrors> {
    info!(
        "Processing {} agents, {} alternatives, rule: {:?}, tie-break: {}",
        matrix.num_agents(),
        matrix.num_alternatives(),
        rule,
        tie_break
    );

    // Range voting works on the valuations directly.
    if *rule == VotingRule::RangeVoting {
        return range::run_range_voting(matrix, tie_break);
    }

    let profile = PreferenceProfile::from_valuations(matrix);
    let m = profile.num_alternatives();
    let res = match rule {
        VotingRule::Dictatorship(aid) => VotingResult {
            winner: dictatorship(&profile, *aid)?,
            tally: Vec::new(),
            round_stats: Vec::new(),
            tiebreak_applied: false,
        },
        VotingRule::Plurality => {
            scoring::run_scoring(&profile, &ScoreVector::plurality(m), tie_break)?
        }
        VotingRule::Veto => scoring::run_scoring(&profile, &ScoreVector::veto(m), tie_break)?,
        VotingRule::Borda => scoring::run_scoring(&profile, &ScoreVector::borda(m), tie_break)?,
        VotingRule::Harmonic => {
            scoring::run_scoring(&profile, &ScoreVector::harmonic(m), tie_break)?
        }
        VotingRule::Scoring(scores) => {
            scoring::run_scoring(&profile, &ScoreVector::new(scores), tie_break)?
        }
        VotingRule::Stv => stv::run_stv(&profile, tie_break)?,
        VotingRule::RangeVoting => unreachable!("range voting does not use the profile"),
    };
    info!("Winner ({}): {}", rule.name(), res.winner);
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_matrix() -> ValuationMatrix {
        ValuationMatrix::new(vec![
            vec![3.0, 1.0, 2.0],
            vec![1.0, 3.0, 2.0],
            vec![2.0, 2.0, 3.0],
        ])
        .unwrap()
    }

    #[test]
    fn dictator() {
        let p = PreferenceProfile::from_valuations(&example_matrix());
        assert_eq!(dictatorship(&p, AgentId(2)), Ok(AlternativeId(2)));
        assert_eq!(dictatorship(&p, AgentId(3)), Ok(AlternativeId(3)));
        assert_eq!(
            dictatorship(&p, AgentId(4)),
            Err(VotingErrors::InvalidAgent(AgentId(4)))
        );
        assert_eq!(
            dictatorship(&p, AgentId(0)),
            Err(VotingErrors::InvalidAgent(AgentId(0)))
        );
    }

    #[test]
    fn dictator_without_alternatives() {
        let p = PreferenceProfile::from_rankings(&[vec![]]).unwrap();
        assert_eq!(dictatorship(&p, AgentId(1)), Err(VotingErrors::EmptyElection));
    }

    #[test]
    fn all_rules_on_the_example() {
        let _ = env_logger::builder().is_test(true).try_init();
        let m = example_matrix();
        let cases: Vec<(VotingRule, TieBreak, u32)> = vec![
            (VotingRule::Dictatorship(AgentId(2)), TieBreak::Min, 2),
            (VotingRule::Plurality, TieBreak::Max, 3),
            (VotingRule::Plurality, TieBreak::Min, 1),
            // 1 -> 1, 2 -> 2, 3 -> 3
            (VotingRule::Veto, TieBreak::Min, 3),
            // 1 -> 2 + 0 + 0, 2 -> 0 + 2 + 1, 3 -> 1 + 1 + 2
            (VotingRule::Borda, TieBreak::Min, 3),
            (VotingRule::Harmonic, TieBreak::Min, 3),
            (VotingRule::Scoring(vec![1.0, 2.0, 3.0]), TieBreak::Min, 3),
            (VotingRule::Stv, TieBreak::Max, 3),
            (VotingRule::RangeVoting, TieBreak::Min, 3),
        ];
        for (rule, tb, expected) in cases {
            let res = run_voting_stats(&m, &rule, tb).unwrap();
            assert_eq!(res.winner, AlternativeId(expected), "rule {:?}", rule);
        }
    }

    #[test]
    fn stats_of_the_dispatcher() {
        let m = example_matrix();
        let res = run_voting_stats(&m, &VotingRule::Plurality, TieBreak::Max).unwrap();
        assert!(res.tiebreak_applied);
        assert_eq!(res.tally.len(), 3);
        assert!(res.round_stats.is_empty());

        let res = run_voting_stats(&m, &VotingRule::Stv, TieBreak::Max).unwrap();
        assert_eq!(res.round_stats.len(), 1);

        assert_eq!(
            run_voting_stats(&m, &VotingRule::Scoring(vec![1.0]), TieBreak::Max),
            Err(VotingErrors::InvalidScoreVector {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn rule_names() {
        for name in VotingRule::RULE_NAMES {
            let rule =
                VotingRule::from_name(name, Some(AgentId(1)), Some(&[1.0, 0.0][..])).unwrap();
            assert_eq!(rule.name(), name);
        }
        assert_eq!(
            VotingRule::from_name("Borda", None, None),
            Ok(VotingRule::Borda)
        );
        assert_eq!(
            VotingRule::from_name("dictatorship", None, None),
            Err(VotingErrors::MissingParameter("dictator agent"))
        );
        assert_eq!(
            VotingRule::from_name("condorcet", None, None),
            Err(VotingErrors::UnknownRule("condorcet".to_string()))
        );
    }
}

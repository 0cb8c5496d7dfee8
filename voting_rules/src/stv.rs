use log::{debug, info};

use std::collections::BTreeMap;
use std::ops::AddAssign;

use crate::config::*;
use crate::profile::PreferenceProfile;
use crate::tiebreak;

// **** Private structures ****

type RoundId = u32;

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
struct VoteCount(u64);

impl VoteCount {
    const EMPTY: VoteCount = VoteCount(0);
    const ONE: VoteCount = VoteCount(1);
}

impl std::iter::Sum for VoteCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        VoteCount(iter.map(|vc| vc.0).sum())
    }
}

impl AddAssign for VoteCount {
    fn add_assign(&mut self, rhs: VoteCount) {
        self.0 += rhs.0;
    }
}

// The first-place counts of the alternatives still in the running.
// Ordered by alternative, which keeps the statistics stable.
type Tally = BTreeMap<AlternativeId, VoteCount>;

fn initial_tally(rankings: &[Vec<AlternativeId>]) -> Tally {
    // Every alternative that appears somewhere takes part, even with no first place.
    let mut tally: Tally = rankings
        .iter()
        .flatten()
        .map(|alt| (*alt, VoteCount::EMPTY))
        .collect();
    for ranking in rankings.iter() {
        if let Some(vc) = ranking.first().and_then(|first| tally.get_mut(first)) {
            *vc += VoteCount::ONE;
        }
    }
    tally
}

/// Removes all the least popular alternatives of the tally, and transfers
/// the support of the agents who ranked them.
///
/// Returns the eliminated alternatives, or None if all the remaining
/// alternatives have the same count.
fn run_one_round(
    rankings: &mut [Vec<AlternativeId>],
    tally: &mut Tally,
) -> Option<Vec<AlternativeId>> {
    let least: VoteCount = *tally.values().min()?;
    let most: VoteCount = *tally.values().max()?;
    if least == most {
        return None;
    }
    let eliminated: Vec<AlternativeId> = tally
        .iter()
        .filter_map(|(alt, vc)| if *vc == least { Some(*alt) } else { None })
        .collect();
    debug!(
        "run_one_round: least count {:?}, eliminating {:?}",
        least, eliminated
    );

    for ranking in rankings.iter_mut() {
        if !ranking.iter().any(|alt| eliminated.contains(alt)) {
            continue;
        }
        ranking.retain(|alt| !eliminated.contains(alt));
        // The support is added to what the new first choice already has.
        if let Some(vc) = ranking.first().and_then(|first| tally.get_mut(first)) {
            *vc += VoteCount::ONE;
        }
    }
    for alt in eliminated.iter() {
        tally.remove(alt);
    }
    Some(eliminated)
}

fn tally_to_stats(tally: &Tally, round: RoundId, eliminated: Vec<AlternativeId>) -> RoundStats {
    RoundStats {
        round,
        tally: tally.iter().map(|(alt, vc)| (*alt, vc.0)).collect(),
        eliminated,
    }
}

/// Runs the single transferable vote and collects statistics about every round.
///
/// The profile itself is not modified: the rounds work on a copy of the
/// rankings. When the last alternatives are tied, the tie-break consults the
/// rankings of the original profile.
pub(crate) fn run_stv(
    profile: &PreferenceProfile,
    tie_break: TieBreak,
) -> Result<VotingResult, VotingErrors> {
    let mut rankings = profile.to_rankings();
    let mut tally = initial_tally(&rankings);
    if tally.is_empty() {
        return Err(VotingErrors::EmptyElection);
    }
    let initial_count: VoteCount = tally.values().cloned().sum();
    info!(
        "run_stv: {} agents, {} alternatives, {:?} first places",
        profile.num_agents(),
        tally.len(),
        initial_count.0
    );

    let mut round_stats: Vec<RoundStats> = Vec::new();
    loop {
        let round_id = (round_stats.len() + 1) as RoundId;
        let before = tally_to_stats(&tally, round_id, Vec::new());
        let num_remaining = tally.len();
        match run_one_round(&mut rankings, &mut tally) {
            Some(eliminated) => {
                info!(
                    "Round {}: tally {:?} -> eliminated {:?}",
                    round_id, before.tally, eliminated
                );
                // Invariant: the number of alternatives decreases at each round.
                assert!(
                    !tally.is_empty() && tally.len() < num_remaining,
                    "The number of alternatives did not decrease: {} -> {}",
                    num_remaining,
                    tally.len()
                );
                round_stats.push(RoundStats {
                    eliminated,
                    ..before
                });
            }
            None => {
                info!("Round {}: tally {:?} -> final", round_id, before.tally);
                round_stats.push(before);
                break;
            }
        }
    }

    let possible_winners: Vec<AlternativeId> = tally.keys().cloned().collect();
    let (winner, tiebreak_applied) = tiebreak::resolve(&possible_winners, tie_break, profile)?;
    info!(
        "run_stv: possible winners {:?} -> winner {}",
        possible_winners, winner
    );
    Ok(VotingResult {
        winner,
        tally: tally.iter().map(|(alt, vc)| (*alt, vc.0 as f64)).collect(),
        round_stats,
        tiebreak_applied,
    })
}

/// Single transferable vote.
///
/// At each round, all the alternatives with the fewest first places are
/// eliminated together. Every agent who ranked one of them gives one more
/// point to its next remaining choice. The counting stops when all the
/// remaining alternatives have the same count; the tie-break picks the winner
/// if more than one is left.
pub fn stv(
    profile: &PreferenceProfile,
    tie_break: TieBreak,
) -> Result<AlternativeId, VotingErrors> {
    run_stv(profile, tie_break).map(|r| r.winner)
}

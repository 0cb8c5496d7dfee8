use log::debug;

use crate::config::*;
use crate::profile::PreferenceProfile;

/// Picks a single winner among the possible winners.
///
/// A single possible winner is returned as is, without looking at the
/// tie-break. Otherwise:
/// - `Max` and `Min` pick the highest (resp. lowest) numbered alternative
/// - `Agent(a)` picks the possible winner that agent `a` ranks the highest.
///
/// Returns the winner and whether the tie-break was needed.
pub(crate) fn resolve(
    possible_winners: &[AlternativeId],
    tie_break: TieBreak,
    profile: &PreferenceProfile,
) -> Result<(AlternativeId, bool), VotingErrors> {
    match possible_winners {
        [] => Err(VotingErrors::EmptyElection),
        [winner] => Ok((*winner, false)),
        _ => {
            debug!(
                "resolve: tie between {:?}, applying tie-break {}",
                possible_winners, tie_break
            );
            let winner = break_tie(possible_winners, tie_break, profile)?;
            Ok((winner, true))
        }
    }
}

/// Applies the tie-break policy to a set of (at least two) tied alternatives.
pub fn break_tie(
    tied: &[AlternativeId],
    tie_break: TieBreak,
    profile: &PreferenceProfile,
) -> Result<AlternativeId, VotingErrors> {
    let res = match tie_break {
        TieBreak::Max => tied.iter().max().cloned(),
        TieBreak::Min => tied.iter().min().cloned(),
        TieBreak::Agent(aid) => {
            let ranking = profile
                .ranking(aid)
                .ok_or(VotingErrors::InvalidAgent(aid))?;
            ranking.iter().find(|alt| tied.contains(*alt)).cloned()
        }
    };
    res.ok_or(VotingErrors::EmptyElection)
}

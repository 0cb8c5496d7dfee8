use log::{debug, info};

use crate::config::*;
use crate::profile::PreferenceProfile;
use crate::scoring::best_alternatives;
use crate::tiebreak;

/// The sum of the valuations of every alternative, in alternative order.
pub fn range_totals(matrix: &ValuationMatrix) -> Vec<(AlternativeId, f64)> {
    let mut totals: Vec<(AlternativeId, f64)> = matrix
        .alternatives()
        .into_iter()
        .map(|alt| (alt, 0.0))
        .collect();
    for row in matrix.rows() {
        for (e, v) in totals.iter_mut().zip(row.iter()) {
            e.1 += *v;
        }
    }
    debug!("range_totals: {:?}", totals);
    totals
}

pub(crate) fn run_range_voting(
    matrix: &ValuationMatrix,
    tie_break: TieBreak,
) -> Result<VotingResult, VotingErrors> {
    if matrix.num_agents() == 0 || matrix.num_alternatives() == 0 {
        return Err(VotingErrors::EmptyElection);
    }
    let tally = range_totals(matrix);
    let possible_winners = best_alternatives(&tally);
    // The rankings are only needed to break a tie with the preferences of an agent.
    let (winner, tiebreak_applied) = match possible_winners.as_slice() {
        [single] => (*single, false),
        _ => {
            let profile = PreferenceProfile::from_valuations(matrix);
            tiebreak::resolve(&possible_winners, tie_break, &profile)?
        }
    };
    info!(
        "run_range_voting: possible winners {:?} -> winner {}",
        possible_winners, winner
    );
    Ok(VotingResult {
        winner,
        tally,
        round_stats: Vec::new(),
        tiebreak_applied,
    })
}

/// Range voting: the winner is the alternative with the highest sum of
/// valuations over all the agents.
pub fn range_voting(
    matrix: &ValuationMatrix,
    tie_break: TieBreak,
) -> Result<AlternativeId, VotingErrors> {
    run_range_voting(matrix, tie_break).map(|r| r.winner)
}

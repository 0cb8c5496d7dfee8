use log::debug;
use std::collections::HashSet;

use crate::config::*;

/// The ranking of all the alternatives by every agent, most preferred first.
///
/// Invariant: every ranking is a permutation of the same set of alternatives.
/// The profile is never modified after construction.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PreferenceProfile {
    // The agents, in row order.
    agents: Vec<AgentId>,
    // rankings[i] is the ranking of agents[i]
    rankings: Vec<Vec<AlternativeId>>,
}

impl PreferenceProfile {
    /// Ranks the alternatives of every agent by decreasing valuation.
    ///
    /// Two alternatives with exactly the same valuation are ranked by
    /// decreasing number: the higher-numbered alternative comes first.
    pub fn from_valuations(matrix: &ValuationMatrix) -> PreferenceProfile {
        let mut agents: Vec<AgentId> = Vec::new();
        let mut rankings: Vec<Vec<AlternativeId>> = Vec::new();
        for (aid, row) in matrix.agents().into_iter().zip(matrix.rows()) {
            let mut valued: Vec<(AlternativeId, f64)> = row
                .iter()
                .enumerate()
                .map(|(idx, v)| (AlternativeId((idx + 1) as u32), *v))
                .collect();
            valued.sort_by(|(alt1, v1), (alt2, v2)| v2.total_cmp(v1).then(alt2.cmp(alt1)));
            let ranking: Vec<AlternativeId> = valued.into_iter().map(|(alt, _)| alt).collect();
            debug!("from_valuations: agent {}: {:?}", aid, ranking);
            agents.push(aid);
            rankings.push(ranking);
        }
        PreferenceProfile { agents, rankings }
    }

    /// Builds a profile from explicit rankings. The agents are numbered from 1.
    ///
    /// Every ranking must be a permutation of 1..=m, with m the length of the
    /// first ranking.
    pub fn from_rankings(rankings: &[Vec<u32>]) -> Result<PreferenceProfile, VotingErrors> {
        let num_alternatives = rankings.first().map(|r| r.len()).unwrap_or(0);
        let mut res = PreferenceProfile {
            agents: Vec::new(),
            rankings: Vec::new(),
        };
        for (idx, r) in rankings.iter().enumerate() {
            let aid = AgentId((idx + 1) as u32);
            let distinct: HashSet<u32> = r.iter().cloned().collect();
            let is_permutation = r.len() == num_alternatives
                && distinct.len() == num_alternatives
                && r.iter().all(|x| *x >= 1 && *x as usize <= num_alternatives);
            if !is_permutation {
                return Err(VotingErrors::InvalidRanking(aid));
            }
            res.agents.push(aid);
            res.rankings
                .push(r.iter().map(|x| AlternativeId(*x)).collect());
        }
        Ok(res)
    }

    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    /// The number of alternatives, as seen from the ranking of the first agent.
    pub fn num_alternatives(&self) -> usize {
        self.rankings.first().map(|r| r.len()).unwrap_or(0)
    }

    /// The alternatives in increasing order.
    pub fn alternatives(&self) -> Vec<AlternativeId> {
        (1..=self.num_alternatives() as u32)
            .map(AlternativeId)
            .collect()
    }

    /// The ranking of this agent, if the agent is part of the profile.
    pub fn ranking(&self, agent: AgentId) -> Option<&[AlternativeId]> {
        self.agents
            .iter()
            .position(|a| *a == agent)
            .map(|idx| self.rankings[idx].as_slice())
    }

    /// All the rankings, in agent order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &[AlternativeId])> {
        self.agents
            .iter()
            .cloned()
            .zip(self.rankings.iter().map(|r| r.as_slice()))
    }

    /// A copy of the rankings, for the rules that need to work on them.
    pub(crate) fn to_rankings(&self) -> Vec<Vec<AlternativeId>> {
        self.rankings.clone()
    }
}

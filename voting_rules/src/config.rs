// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// An agent (a voter). Agents are numbered from 1, in the row order of the
/// valuation table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct AgentId(pub u32);

/// An alternative (a candidate outcome). Alternatives are numbered from 1, in
/// the column order of the valuation table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct AlternativeId(pub u32);

impl Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for AlternativeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The numeric valuations of every agent for every alternative.
///
/// Row `i` holds the valuations of agent `i + 1`, column `j` the valuations
/// for alternative `j + 1`. All the rows have the same length.
#[derive(PartialEq, Debug, Clone)]
pub struct ValuationMatrix {
    rows: Vec<Vec<f64>>,
}

impl ValuationMatrix {
    /// Builds a matrix out of rows of valuations.
    ///
    /// Fails if the rows do not all have the same length. An empty list of
    /// rows is accepted: the rules will report it as an empty election.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<ValuationMatrix, VotingErrors> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            for (idx, row) in rows.iter().enumerate() {
                if row.len() != expected {
                    return Err(VotingErrors::RaggedMatrix {
                        agent: AgentId((idx + 1) as u32),
                        expected,
                        actual: row.len(),
                    });
                }
            }
        }
        Ok(ValuationMatrix { rows })
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn num_agents(&self) -> usize {
        self.rows.len()
    }

    pub fn num_alternatives(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// The agents, in row order.
    pub fn agents(&self) -> Vec<AgentId> {
        (1..=self.rows.len() as u32).map(AgentId).collect()
    }

    /// The alternatives, in column order.
    pub fn alternatives(&self) -> Vec<AlternativeId> {
        (1..=self.num_alternatives() as u32)
            .map(AlternativeId)
            .collect()
    }
}

// ********* Configuration **********

/// The policy used to pick a single winner among the alternatives tied for
/// the best score.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TieBreak {
    /// The alternative with the highest number.
    Max,
    /// The alternative with the lowest number.
    Min,
    /// The alternative that this agent ranks the highest.
    Agent(AgentId),
}

impl FromStr for TieBreak {
    type Err = VotingErrors;

    /// Accepts `min`, `max` or a positive agent number.
    fn from_str(s: &str) -> Result<TieBreak, VotingErrors> {
        match s.trim() {
            "min" => Ok(TieBreak::Min),
            "max" => Ok(TieBreak::Max),
            x => match x.parse::<u32>() {
                Ok(aid) if aid > 0 => Ok(TieBreak::Agent(AgentId(aid))),
                _ => Err(VotingErrors::InvalidTieBreak(s.to_string())),
            },
        }
    }
}

impl Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreak::Max => write!(f, "max"),
            TieBreak::Min => write!(f, "min"),
            TieBreak::Agent(aid) => write!(f, "{}", aid),
        }
    }
}

/// The voting rule to apply, with its parameters.
#[derive(PartialEq, Debug, Clone)]
pub enum VotingRule {
    /// The winner is the top choice of this agent.
    Dictatorship(AgentId),
    Plurality,
    Veto,
    Borda,
    Harmonic,
    /// A positional scoring rule with a caller-supplied score vector.
    /// The order of the scores does not matter, see [crate::ScoreVector].
    Scoring(Vec<f64>),
    /// Single transferable vote, with batch elimination of the least popular
    /// alternatives.
    Stv,
    /// Sum of the raw valuations.
    RangeVoting,
}

impl VotingRule {
    pub const RULE_NAMES: [&'static str; 8] = [
        "dictatorship",
        "plurality",
        "veto",
        "borda",
        "harmonic",
        "scoring",
        "stv",
        "range",
    ];

    /// Parses the name of a rule.
    ///
    /// The rules that take a parameter (dictatorship, scoring) need it to be
    /// provided separately.
    pub fn from_name(
        name: &str,
        dictator: Option<AgentId>,
        score_vector: Option<&[f64]>,
    ) -> Result<VotingRule, VotingErrors> {
        match name.trim().to_lowercase().as_str() {
            "dictatorship" => dictator
                .map(VotingRule::Dictatorship)
                .ok_or(VotingErrors::MissingParameter("dictator agent")),
            "plurality" => Ok(VotingRule::Plurality),
            "veto" => Ok(VotingRule::Veto),
            "borda" => Ok(VotingRule::Borda),
            "harmonic" => Ok(VotingRule::Harmonic),
            "scoring" => score_vector
                .map(|v| VotingRule::Scoring(v.to_vec()))
                .ok_or(VotingErrors::MissingParameter("score vector")),
            "stv" => Ok(VotingRule::Stv),
            "range" | "range_voting" => Ok(VotingRule::RangeVoting),
            x => Err(VotingErrors::UnknownRule(x.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VotingRule::Dictatorship(_) => "dictatorship",
            VotingRule::Plurality => "plurality",
            VotingRule::Veto => "veto",
            VotingRule::Borda => "borda",
            VotingRule::Harmonic => "harmonic",
            VotingRule::Scoring(_) => "scoring",
            VotingRule::Stv => "stv",
            VotingRule::RangeVoting => "range",
        }
    }
}

// ******** Output data structures *********

/// Statistics for one round of the elimination rule.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    /// The first-place counts at the start of the round, in alternative order.
    pub tally: Vec<(AlternativeId, u64)>,
    /// The alternatives removed at the end of this round. Empty for the last round.
    pub eliminated: Vec<AlternativeId>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct VotingResult {
    pub winner: AlternativeId,
    /// The final score of every alternative still in the running, in
    /// alternative order. Empty for the dictatorship.
    pub tally: Vec<(AlternativeId, f64)>,
    /// Only filled by the elimination rule.
    pub round_stats: Vec<RoundStats>,
    /// True if several alternatives were tied and the tie-break decided.
    pub tiebreak_applied: bool,
}

/// Errors that prevent a rule from completing successfully.
#[derive(PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// There is no agent or no alternative to work with.
    EmptyElection,
    /// The agent is not part of the preference profile.
    InvalidAgent(AgentId),
    /// The score vector does not have one entry per alternative.
    InvalidScoreVector { expected: usize, actual: usize },
    /// The tie-break is neither `min`, `max` nor an agent number.
    InvalidTieBreak(String),
    /// A row of valuations does not have the same length as the first one.
    RaggedMatrix {
        agent: AgentId,
        expected: usize,
        actual: usize,
    },
    /// The ranking of this agent is not a permutation of the alternatives.
    InvalidRanking(AgentId),
    UnknownRule(String),
    /// The rule needs a parameter that was not provided.
    MissingParameter(&'static str),
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::EmptyElection => write!(f, "no agent or no alternative to vote on"),
            VotingErrors::InvalidAgent(aid) => {
                write!(f, "agent {} is not in the preference profile", aid)
            }
            VotingErrors::InvalidScoreVector { expected, actual } => write!(
                f,
                "score vector has {} entries but there are {} alternatives",
                actual, expected
            ),
            VotingErrors::InvalidTieBreak(s) => write!(
                f,
                "invalid tie-break {:?}: expected min, max or an agent number",
                s
            ),
            VotingErrors::RaggedMatrix {
                agent,
                expected,
                actual,
            } => write!(
                f,
                "agent {} has {} valuations, expected {}",
                agent, actual, expected
            ),
            VotingErrors::InvalidRanking(aid) => write!(
                f,
                "the ranking of agent {} is not a permutation of the alternatives",
                aid
            ),
            VotingErrors::UnknownRule(s) => write!(f, "unknown voting rule: {}", s),
            VotingErrors::MissingParameter(p) => write!(f, "missing rule parameter: {}", p),
        }
    }
}

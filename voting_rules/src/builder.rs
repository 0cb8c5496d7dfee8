pub use crate::config::*;

/// A builder for adding the valuations of the agents, one agent at a time.
///
/// ```
/// pub use voting_rules::builder::Builder;
/// # use voting_rules::VotingErrors;
///
/// let mut builder = Builder::new();
///
/// builder.add_agent(&[3.0, 1.0, 2.0])?;
/// builder.add_agent(&[1.0, 3.0, 2.0])?;
///
/// let matrix = builder.build()?;
/// assert_eq!(matrix.num_agents(), 2);
///
/// # Ok::<(), VotingErrors>(())
/// ```
#[derive(Default)]
pub struct Builder {
    pub(crate) _rows: Vec<Vec<f64>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { _rows: Vec::new() }
    }

    /// Adds the valuations of the next agent.
    ///
    /// All the agents must provide a valuation for the same number of
    /// alternatives as the first one.
    pub fn add_agent(&mut self, valuations: &[f64]) -> Result<AgentId, VotingErrors> {
        let aid = AgentId((self._rows.len() + 1) as u32);
        if let Some(first) = self._rows.first() {
            if first.len() != valuations.len() {
                return Err(VotingErrors::RaggedMatrix {
                    agent: aid,
                    expected: first.len(),
                    actual: valuations.len(),
                });
            }
        }
        self._rows.push(valuations.to_vec());
        Ok(aid)
    }

    /// Adds several agents, in order.
    pub fn add_agents(&mut self, rows: &[Vec<f64>]) -> Result<(), VotingErrors> {
        for row in rows {
            self.add_agent(row)?;
        }
        Ok(())
    }

    pub fn build(self) -> Result<ValuationMatrix, VotingErrors> {
        if self._rows.is_empty() {
            return Err(VotingErrors::EmptyElection);
        }
        ValuationMatrix::new(self._rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_rows() {
        let mut b = Builder::new();
        assert_eq!(b.add_agent(&[1.0, 2.0]), Ok(AgentId(1)));
        assert_eq!(b.add_agent(&[2.0, 1.0]), Ok(AgentId(2)));
        assert_eq!(
            b.add_agent(&[2.0]),
            Err(VotingErrors::RaggedMatrix {
                agent: AgentId(3),
                expected: 2,
                actual: 1
            })
        );
        let m = b.build().unwrap();
        assert_eq!(m.num_agents(), 2);
        assert_eq!(m.num_alternatives(), 2);
    }

    #[test]
    fn empty_builder() {
        assert_eq!(Builder::new().build(), Err(VotingErrors::EmptyElection));
    }

    #[test]
    fn matrix_new_checks_rows() {
        assert_eq!(
            ValuationMatrix::new(vec![vec![1.0], vec![1.0, 2.0]]),
            Err(VotingErrors::RaggedMatrix {
                agent: AgentId(2),
                expected: 1,
                actual: 2
            })
        );
    }
}

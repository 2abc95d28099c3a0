//! Error type shared by the objective model and every search strategy.

/// Failure raised by model construction or a search run.
///
/// Every variant aborts the run; no strategy retries internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// A parameter definition or strategy configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A runtime argument contradicts the configuration (e.g. more parents
    /// than population members).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The strategy was started without an initial candidate to search from.
    #[error("no initial candidate configured: the candidate holds no parameters")]
    MissingCandidate,

    /// Crossover between candidates with different parameter layouts.
    #[error("candidates are not structurally compatible for crossover")]
    IncompatibleCandidates,

    /// An objective evaluation produced NaN or infinity.
    #[error("objective evaluation produced a non-finite value {value} at iteration {iteration}")]
    NonFiniteObjective {
        /// The offending value.
        value: f64,
        /// Iteration (or generation) at which it was observed.
        iteration: usize,
    },
}

impl SearchError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SearchError::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SearchError::config("min must be less than max");
        assert_eq!(
            err.to_string(),
            "invalid configuration: min must be less than max"
        );

        let err = SearchError::NonFiniteObjective {
            value: f64::NAN,
            iteration: 3,
        };
        assert!(err.to_string().contains("iteration 3"));
    }
}

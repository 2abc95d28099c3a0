//! Tabu Search configuration.

use crate::error::SearchError;

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_paramopt::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_tabu_capacity(7);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.tabu_capacity, 7);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Number of iterations.
    pub max_iterations: usize,
    /// How many accepted fitness values the tabu list remembers.
    pub tabu_capacity: usize,
    /// Neighbor step as a fraction of each parameter's range.
    pub neighborhood: f64,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tabu_capacity: 10,
            neighborhood: 0.1,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_capacity(mut self, capacity: usize) -> Self {
        self.tabu_capacity = capacity;
        self
    }

    /// Sets the neighbor step.
    pub fn with_neighborhood(mut self, step: f64) -> Self {
        self.neighborhood = step;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.tabu_capacity == 0 {
            return Err(SearchError::config("tabu_capacity must be at least 1"));
        }
        if !self.neighborhood.is_finite() || self.neighborhood <= 0.0 {
            return Err(SearchError::config(format!(
                "neighborhood must be positive, got {}",
                self.neighborhood
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabu_config_defaults() {
        let config = TabuConfig::default();
        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.tabu_capacity, 10);
        assert!((config.neighborhood - 0.1).abs() < 1e-15);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_tabu_config_builder() {
        let config = TabuConfig::default()
            .with_max_iterations(1000)
            .with_tabu_capacity(3)
            .with_neighborhood(0.05)
            .with_seed(123);

        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.tabu_capacity, 3);
        assert_eq!(config.seed, Some(123));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(TabuConfig::default().with_tabu_capacity(0).validate().is_err());
    }
}

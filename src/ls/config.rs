//! Local Search configuration.

use crate::error::SearchError;

/// Configuration for [`LocalSearchRunner`](super::LocalSearchRunner).
///
/// # Examples
///
/// ```
/// use u_paramopt::ls::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default()
///     .with_max_iterations(500)
///     .with_neighborhood(0.05)
///     .with_seed(42);
/// assert_eq!(config.max_iterations, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// Number of neighbor draws.
    pub max_iterations: usize,
    /// Neighbor step as a fraction of each parameter's range.
    pub neighborhood: f64,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            neighborhood: 0.1,
            seed: None,
        }
    }
}

impl LocalSearchConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_neighborhood(mut self, step: f64) -> Self {
        self.neighborhood = step;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
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
    fn test_default_config() {
        let config = LocalSearchConfig::default();
        assert_eq!(config.max_iterations, 100);
        assert!((config.neighborhood - 0.1).abs() < 1e-12);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_bad_neighborhood() {
        assert!(LocalSearchConfig::default().with_neighborhood(0.0).validate().is_err());
        assert!(LocalSearchConfig::default()
            .with_neighborhood(f64::NAN)
            .validate()
            .is_err());
    }
}

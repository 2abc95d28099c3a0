//! Iterated Local Search configuration.

use crate::error::SearchError;

/// Configuration for [`IlsRunner`](super::IlsRunner).
///
/// # Examples
///
/// ```
/// use u_paramopt::ils::IlsConfig;
///
/// let config = IlsConfig::default()
///     .with_max_iterations(20)
///     .with_max_descent_iterations(50)
///     .with_neighborhood(0.1)
///     .with_perturbation_strength(0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IlsConfig {
    /// Number of perturb-then-descend rounds.
    pub max_iterations: usize,
    /// Safety cap on neighbor draws within one descent.
    pub max_descent_iterations: usize,
    /// Descent neighbor step as a fraction of each parameter's range.
    pub neighborhood: f64,
    /// Perturbation step as a fraction of range. Must be at least
    /// `neighborhood`.
    pub perturbation_strength: f64,
    /// Chance that a given parameter is perturbed.
    pub perturbation_probability: f64,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            max_descent_iterations: 50,
            neighborhood: 0.1,
            perturbation_strength: 0.5,
            perturbation_probability: 0.5,
            seed: None,
        }
    }
}

impl IlsConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_max_descent_iterations(mut self, n: usize) -> Self {
        self.max_descent_iterations = n;
        self
    }

    pub fn with_neighborhood(mut self, step: f64) -> Self {
        self.neighborhood = step;
        self
    }

    pub fn with_perturbation_strength(mut self, strength: f64) -> Self {
        self.perturbation_strength = strength;
        self
    }

    pub fn with_perturbation_probability(mut self, p: f64) -> Self {
        self.perturbation_probability = p;
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
        if !self.perturbation_strength.is_finite()
            || self.perturbation_strength < self.neighborhood
        {
            return Err(SearchError::config(format!(
                "perturbation_strength ({}) must be at least the neighborhood ({})",
                self.perturbation_strength, self.neighborhood
            )));
        }
        if !(0.0..=1.0).contains(&self.perturbation_probability) {
            return Err(SearchError::config(format!(
                "perturbation_probability must be in [0, 1], got {}",
                self.perturbation_probability
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
        let config = IlsConfig::default();
        assert_eq!(config.max_iterations, 20);
        assert_eq!(config.max_descent_iterations, 50);
        assert!((config.perturbation_probability - 0.5).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_weak_perturbation() {
        let config = IlsConfig::default()
            .with_neighborhood(0.3)
            .with_perturbation_strength(0.2);
        assert!(matches!(config.validate(), Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_bad_probability() {
        let config = IlsConfig::default().with_perturbation_probability(1.5);
        assert!(config.validate().is_err());
    }
}

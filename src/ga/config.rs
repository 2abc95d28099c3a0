//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::SearchError;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_paramopt::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_paramopt::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_parent_count(40)
///     .with_mutation_rate(0.2)
///     .with_mutation_strength(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of generations.
    pub max_generations: usize,

    /// How many of the best individuals are kept as parents.
    ///
    /// Must be at least 2 and at most `population_size`.
    pub parent_count: usize,

    /// Probability of recombining a parent pair (0.0–1.0).
    ///
    /// When crossover is not applied, both parents are cloned unchanged.
    pub crossover_rate: f64,

    /// Probability of replacing an offspring by a neighbor (0.0–1.0).
    pub mutation_rate: f64,

    /// Neighbor step used by mutation, as a fraction of each range.
    pub mutation_strength: f64,

    /// Neighbor step used to spread the initial population around the seed.
    ///
    /// `None` draws a fresh step uniformly from `[0, 1)` for every member.
    pub initial_spread: Option<f64>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            parent_count: 10,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            mutation_strength: 0.1,
            initial_spread: None,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the number of parents kept by selection.
    pub fn with_parent_count(mut self, k: usize) -> Self {
        self.parent_count = k;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation step.
    pub fn with_mutation_strength(mut self, step: f64) -> Self {
        self.mutation_strength = step;
        self
    }

    /// Fixes the step used to build the initial population.
    pub fn with_initial_spread(mut self, step: f64) -> Self {
        self.initial_spread = Some(step);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`SearchError::InvalidArgument`] when `parent_count` exceeds the
    /// population or is below 2; [`SearchError::InvalidConfig`] for every
    /// other inconsistency.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.population_size == 0 {
            return Err(SearchError::config("population_size must be at least 1"));
        }
        if self.parent_count > self.population_size {
            return Err(SearchError::InvalidArgument(format!(
                "parent_count ({}) cannot exceed population_size ({})",
                self.parent_count, self.population_size
            )));
        }
        if self.parent_count < 2 {
            return Err(SearchError::InvalidArgument(format!(
                "parent_count must be at least 2 to draw distinct parents, got {}",
                self.parent_count
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(SearchError::config(format!(
                "crossover_rate must be in [0, 1], got {}",
                self.crossover_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SearchError::config(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !self.mutation_strength.is_finite() || self.mutation_strength < 0.0 {
            return Err(SearchError::config(format!(
                "mutation_strength must be non-negative, got {}",
                self.mutation_strength
            )));
        }
        if let Some(spread) = self.initial_spread {
            if !spread.is_finite() || spread < 0.0 {
                return Err(SearchError::config(format!(
                    "initial_spread must be non-negative, got {spread}"
                )));
            }
        }
        Ok(())
    }
}

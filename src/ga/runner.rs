//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rand::Rng;

use super::config::GaConfig;
use super::selection::{distinct_pair, truncation};
use crate::error::SearchError;
use crate::model::{ensure_seeded, evaluate, Solution};
use crate::random::create_rng;
use crate::trajectory::{TrajectoryRecord, TrajectorySink, GENETIC};

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<S: Clone> {
    /// The best individual evaluated during the entire run.
    ///
    /// The seed candidate if no generation was evaluated.
    pub best: S,

    /// Objective of the best individual.
    pub best_value: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Size of the population left when the run ended.
    pub final_population_size: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_paramopt::ga::{GaConfig, GaRunner};
/// use u_paramopt::model::{Candidate, Direction, Parameter};
/// use u_paramopt::trajectory::Trajectory;
///
/// let seed = Candidate::new(vec![
///     Parameter::new("speed", 0.0, 10.0, 2.0, 1.0, 1.0, Direction::Maximize).unwrap(),
///     Parameter::new("noise", 0.0, 80.0, 60.0, 0.5, 1.0, Direction::Minimize).unwrap(),
/// ])
/// .unwrap();
/// let config = GaConfig::default().with_max_generations(30).with_seed(42);
/// let mut trajectory = Trajectory::new();
/// let result = GaRunner::run(&seed, &config, &mut trajectory).unwrap();
/// assert_eq!(trajectory.len(), 30);
/// assert_eq!(result.final_population_size, config.population_size);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA from `seed`, seeding the random source from the config.
    pub fn run<S, T>(seed: &S, config: &GaConfig, sink: &mut T) -> Result<GaResult<S>, SearchError>
    where
        S: Solution,
        T: TrajectorySink + ?Sized,
    {
        Self::run_with_cancel(seed, config, sink, None)
    }

    /// Runs the GA with an optional cancellation token, seeding the random
    /// source from the config.
    pub fn run_with_cancel<S, T>(
        seed: &S,
        config: &GaConfig,
        sink: &mut T,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<S>, SearchError>
    where
        S: Solution,
        T: TrajectorySink + ?Sized,
    {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(seed, config, &mut rng, sink, cancel)
    }

    /// Runs the GA with an injected random source and an optional
    /// cancellation flag, checked at the start of each generation.
    ///
    /// Writes one record per generation:
    /// `(best of generation, best ever, generation)`.
    pub fn run_with_rng<S, R, T>(
        seed: &S,
        config: &GaConfig,
        rng: &mut R,
        sink: &mut T,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<S>, SearchError>
    where
        S: Solution,
        R: Rng,
        T: TrajectorySink + ?Sized,
    {
        config.validate()?;
        ensure_seeded(seed)?;

        // 1. Initialize population around the seed
        let mut population: Vec<S> = (0..config.population_size)
            .map(|_| {
                let spread = config
                    .initial_spread
                    .unwrap_or_else(|| rng.random_range(0.0..1.0));
                seed.neighbor(spread, rng)
            })
            .collect();

        let mut best: Option<(S, f64)> = None;
        let mut generations = 0usize;
        let mut cancelled = false;

        // 2. Evolutionary loop
        for generation in 0..config.max_generations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!("genetic algorithm cancelled at generation {generation}");
                cancelled = true;
                break;
            }

            let scored = evaluate_population(population, generation)?;

            let (gen_best_idx, gen_best_value) = find_best(&scored);
            if best.as_ref().is_none_or(|(_, v)| gen_best_value > *v) {
                best = Some((scored[gen_best_idx].0.clone(), gen_best_value));
                debug!("ga: new best {gen_best_value} at generation {generation}");
            }
            let best_value = best.as_ref().map_or(gen_best_value, |(_, v)| *v);

            sink.record(TrajectoryRecord::new(
                gen_best_value,
                best_value,
                generation,
                GENETIC,
            ));

            let parents = truncation(scored, config.parent_count);
            let offspring = breed(&parents, config.population_size, config.crossover_rate, rng)?;
            population = mutate(
                offspring,
                config.mutation_rate,
                config.mutation_strength,
                rng,
            );

            generations += 1;
        }

        let (best, best_value) = match best {
            Some(found) => found,
            None => (seed.clone(), evaluate(seed, 0)?),
        };

        info!("genetic algorithm finished: best {best_value} after {generations} generations");

        Ok(GaResult {
            best,
            best_value,
            generations,
            final_population_size: population.len(),
            cancelled,
        })
    }
}

/// Pairs every individual with its objective.
fn evaluate_population<S: Solution>(
    population: Vec<S>,
    generation: usize,
) -> Result<Vec<(S, f64)>, SearchError> {
    population
        .into_iter()
        .map(|individual| {
            let value = evaluate(&individual, generation)?;
            Ok((individual, value))
        })
        .collect()
}

/// Index and objective of the highest-scoring individual (first on ties).
fn find_best<S>(scored: &[(S, f64)]) -> (usize, f64) {
    scored
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |acc, (i, (_, v))| {
            if *v > acc.1 {
                (i, *v)
            } else {
                acc
            }
        })
}

/// Refills a generation of exactly `size` members from distinct parent pairs.
///
/// With probability `crossover_rate` a pair yields two crossover children
/// (`a × b` and `b × a`); otherwise both parents are cloned. The second
/// child is dropped when only one slot remains.
pub(crate) fn breed<S: Solution, R: Rng>(
    parents: &[S],
    size: usize,
    crossover_rate: f64,
    rng: &mut R,
) -> Result<Vec<S>, SearchError> {
    let mut next = Vec::with_capacity(size);

    while next.len() < size {
        let (i, j) = distinct_pair(parents.len(), rng);
        let (a, b) = (&parents[i], &parents[j]);

        if rng.random_range(0.0..1.0) < crossover_rate {
            next.push(a.crossover(b, rng)?);
            if next.len() < size {
                next.push(b.crossover(a, rng)?);
            }
        } else {
            next.push(a.clone());
            if next.len() < size {
                next.push(b.clone());
            }
        }
    }

    Ok(next)
}

/// Replaces each individual by a neighbor with probability `rate`.
pub(crate) fn mutate<S: Solution, R: Rng>(
    population: Vec<S>,
    rate: f64,
    strength: f64,
    rng: &mut R,
) -> Vec<S> {
    population
        .into_iter()
        .map(|individual| {
            if rng.random_range(0.0..1.0) < rate {
                individual.neighbor(strength, rng)
            } else {
                individual
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{climate, Poisoned};
    use crate::model::Candidate;
    use crate::trajectory::Trajectory;

    #[test]
    fn test_breed_exact_size() {
        let seed = climate();
        let mut rng = create_rng(Some(42));
        for k in 2..=6 {
            let parents: Vec<Candidate> = (0..k).map(|_| seed.neighbor(0.5, &mut rng)).collect();
            for n in [k, k + 1, 7, 10, 11] {
                for rate in [0.0, 0.5, 1.0] {
                    let next = breed(&parents, n, rate, &mut rng).unwrap();
                    assert_eq!(next.len(), n, "k={k} n={n} rate={rate}");
                }
            }
        }
    }

    #[test]
    fn test_breed_without_crossover_clones_parents() {
        let seed = climate();
        let mut rng = create_rng(Some(1));
        let parents: Vec<Candidate> = (0..3).map(|_| seed.neighbor(0.5, &mut rng)).collect();
        let next = breed(&parents, 9, 0.0, &mut rng).unwrap();
        for child in &next {
            assert!(parents.iter().any(|p| p.values() == child.values()));
        }
    }

    #[test]
    fn test_mutate_rate_bounds() {
        let seed = climate();
        let mut rng = create_rng(Some(2));
        let population: Vec<Candidate> = (0..20).map(|_| seed.clone()).collect();

        let untouched = mutate(population.clone(), 0.0, 0.3, &mut rng);
        assert!(untouched.iter().all(|c| c.values() == seed.values()));

        let mutated = mutate(population, 1.0, 0.3, &mut rng);
        assert!(mutated.iter().all(|c| c.values() != seed.values()));
    }

    #[test]
    fn test_find_best_first_on_ties() {
        let scored = vec![("a", 0.1), ("b", 0.4), ("c", 0.4)];
        assert_eq!(find_best(&scored), (1, 0.4));
    }

    #[test]
    fn test_one_record_per_generation() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_parent_count(6)
            .with_max_generations(15)
            .with_seed(42);
        let mut trajectory = Trajectory::new();
        let result = GaRunner::run(&climate(), &config, &mut trajectory).unwrap();

        assert_eq!(result.generations, 15);
        assert_eq!(result.final_population_size, 20);
        assert_eq!(trajectory.len(), 15);
        for (i, r) in trajectory.iter().enumerate() {
            assert_eq!(r.iteration, i);
            assert_eq!(r.label, "genetic");
            assert!(r.best_value >= r.current_value);
        }
    }

    #[test]
    fn test_best_ever_non_decreasing() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(40)
            .with_mutation_rate(0.5)
            .with_seed(7);
        let mut trajectory = Trajectory::new();
        let result = GaRunner::run(&climate(), &config, &mut trajectory).unwrap();

        for window in trajectory.best_values().windows(2) {
            assert!(window[1] >= window[0]);
        }
        assert_eq!(trajectory.last().unwrap().best_value, result.best_value);
        assert!((result.best.objective() - result.best_value).abs() < 1e-12);
    }

    #[test]
    fn test_converges_on_climate_set() {
        // Optimum: temperature 0, humidity 0, pressure 1100 -> objective 1.0
        let config = GaConfig::default()
            .with_population_size(60)
            .with_parent_count(12)
            .with_max_generations(150)
            .with_mutation_rate(0.3)
            .with_mutation_strength(0.05)
            .with_seed(42);
        let mut trajectory = Trajectory::new();
        let result = GaRunner::run(&climate(), &config, &mut trajectory).unwrap();
        assert!(
            result.best_value > 0.8,
            "expected near-optimal objective, got {}",
            result.best_value
        );
    }

    #[test]
    fn test_parent_count_above_population_fails_before_any_generation() {
        let config = GaConfig::default()
            .with_population_size(5)
            .with_parent_count(6);
        let mut trajectory = Trajectory::new();
        let err = GaRunner::run(&climate(), &config, &mut trajectory).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
        assert!(trajectory.is_empty());
    }

    #[test]
    fn test_oversized_mutation_stays_in_bounds() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(10)
            .with_mutation_rate(1.0)
            .with_mutation_strength(1e307)
            .with_seed(3);
        assert!(config.validate().is_ok());
        let mut trajectory = Trajectory::new();
        let result = GaRunner::run(&climate(), &config, &mut trajectory).unwrap();
        assert_eq!(trajectory.len(), 10);
        for p in result.best.parameters() {
            assert!(p.is_in_range(p.value()));
        }
    }

    #[test]
    fn test_zero_generations_returns_seed() {
        let seed = climate();
        let config = GaConfig::default().with_max_generations(0).with_seed(1);
        let mut trajectory = Trajectory::new();
        let result = GaRunner::run(&seed, &config, &mut trajectory).unwrap();
        assert_eq!(result.best.values(), seed.values());
        assert_eq!(result.generations, 0);
        assert!(trajectory.is_empty());
    }

    #[test]
    fn test_errors() {
        let mut trajectory = Trajectory::new();
        let empty = Candidate::new(Vec::new()).unwrap();
        assert_eq!(
            GaRunner::run(&empty, &GaConfig::default(), &mut trajectory).unwrap_err(),
            SearchError::MissingCandidate
        );
        let err = GaRunner::run(&Poisoned, &GaConfig::default(), &mut trajectory).unwrap_err();
        assert!(matches!(
            err,
            SearchError::NonFiniteObjective { iteration: 0, .. }
        ));
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let config = GaConfig::default().with_max_generations(10).with_seed(99);
        let mut t1 = Trajectory::new();
        let mut t2 = Trajectory::new();
        GaRunner::run(&climate(), &config, &mut t1).unwrap();
        GaRunner::run(&climate(), &config, &mut t2).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn test_cancellation() {
        let cancel = Arc::new(AtomicBool::new(true));
        let mut trajectory = Trajectory::new();
        let result = GaRunner::run_with_cancel(
            &climate(),
            &GaConfig::default(),
            &mut trajectory,
            Some(cancel),
        )
        .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
    }
}

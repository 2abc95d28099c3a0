//! SA execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rand::Rng;

use super::config::SaConfig;
use crate::error::SearchError;
use crate::model::{ensure_seeded, evaluate, Solution};
use crate::random::create_rng;
use crate::trajectory::{TrajectoryRecord, TrajectorySink, ANNEALING};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Objective of the best solution.
    pub best_value: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization, seeding the random source from the config.
    pub fn run<S, T>(initial: &S, config: &SaConfig, sink: &mut T) -> Result<SaResult<S>, SearchError>
    where
        S: Solution,
        T: TrajectorySink + ?Sized,
    {
        Self::run_with_cancel(initial, config, sink, None)
    }

    /// Runs SA with an optional cancellation token, seeding the random
    /// source from the config.
    pub fn run_with_cancel<S, T>(
        initial: &S,
        config: &SaConfig,
        sink: &mut T,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<S>, SearchError>
    where
        S: Solution,
        T: TrajectorySink + ?Sized,
    {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(initial, config, &mut rng, sink, cancel)
    }

    /// Runs SA with an injected random source and an optional cancellation
    /// flag.
    ///
    /// Writes one record per iteration:
    /// `(objective of current before the step, best after the step, iteration)`.
    pub fn run_with_rng<S, R, T>(
        initial: &S,
        config: &SaConfig,
        rng: &mut R,
        sink: &mut T,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<S>, SearchError>
    where
        S: Solution,
        R: Rng,
        T: TrajectorySink + ?Sized,
    {
        config.validate()?;
        ensure_seeded(initial)?;

        let mut current = initial.clone();
        let mut current_value = evaluate(&current, 0)?;
        let mut best = current.clone();
        let mut best_value = current_value;

        let mut temperature = config.initial_temperature;
        let mut iteration = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;

        while temperature >= config.min_temperature && iteration < config.max_iterations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!("annealing cancelled at iteration {iteration}, temperature {temperature}");
                cancelled = true;
                break;
            }

            let neighbor = current.neighbor(config.neighborhood, rng);
            let neighbor_value = evaluate(&neighbor, iteration)?;
            let previous_value = current_value;
            let delta = neighbor_value - current_value;

            // Metropolis criterion for maximization
            let accept = if delta >= 0.0 {
                if delta > 0.0 {
                    improving_moves += 1;
                }
                true
            } else {
                let probability = (delta / temperature).exp();
                rng.random_range(0.0..1.0) < probability
            };

            if accept {
                current = neighbor;
                current_value = neighbor_value;
                accepted_moves += 1;
            }

            if current_value > best_value {
                best = current.clone();
                best_value = current_value;
                debug!("annealing: new best {best_value} at iteration {iteration}");
            }

            temperature *= config.cooling_rate;

            sink.record(TrajectoryRecord::new(
                previous_value,
                best_value,
                iteration,
                ANNEALING,
            ));
            iteration += 1;
        }

        info!(
            "annealing finished: best {best_value} after {iteration} iterations, \
             final temperature {temperature}, {accepted_moves} accepted"
        );

        Ok(SaResult {
            best,
            best_value,
            iterations: iteration,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{climate, Poisoned};
    use crate::model::Candidate;
    use crate::trajectory::Trajectory;

    #[test]
    fn test_best_history_non_decreasing() {
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(1e-4)
            .with_cooling_rate(0.99)
            .with_seed(42);
        let mut trajectory = Trajectory::new();
        let result = SaRunner::run(&climate(), &config, &mut trajectory).unwrap();

        for window in trajectory.best_values().windows(2) {
            assert!(
                window[1] >= window[0],
                "best value history should be non-decreasing: {} < {}",
                window[1],
                window[0]
            );
        }
        assert!(result.best_value >= climate().objective());
        assert_eq!(trajectory.last().unwrap().best_value, result.best_value);
    }

    #[test]
    fn test_stops_on_temperature() {
        // 1.0 and 0.5 are admissible, 0.25 is below the floor.
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(0.5)
            .with_cooling_rate(0.5)
            .with_max_iterations(1000)
            .with_seed(1);
        let mut trajectory = Trajectory::new();
        let result = SaRunner::run(&climate(), &config, &mut trajectory).unwrap();
        assert_eq!(result.iterations, 2);
        assert_eq!(trajectory.len(), 2);
        assert!((result.final_temperature - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_stops_on_iteration_budget() {
        let config = SaConfig::default()
            .with_initial_temperature(1e10)
            .with_min_temperature(1e-15)
            .with_cooling_rate(0.999)
            .with_max_iterations(100)
            .with_seed(42);
        let mut trajectory = Trajectory::new();
        let result = SaRunner::run(&climate(), &config, &mut trajectory).unwrap();
        assert_eq!(result.iterations, 100);
        assert_eq!(trajectory.len(), 100);
    }

    #[test]
    fn test_high_temperature_accepts_uphill() {
        let config = SaConfig::default()
            .with_initial_temperature(1e8)
            .with_min_temperature(1e7)
            .with_cooling_rate(0.9999)
            .with_max_iterations(1000)
            .with_seed(42);
        let mut trajectory = Trajectory::new();
        let result = SaRunner::run(&climate(), &config, &mut trajectory).unwrap();
        let acceptance_ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(
            acceptance_ratio > 0.95,
            "expected high acceptance at high temp, got {acceptance_ratio}"
        );
        assert!(result.accepted_moves > result.improving_moves);
    }

    #[test]
    fn test_record_holds_pre_step_value() {
        let initial = climate();
        let config = SaConfig::default().with_max_iterations(5).with_seed(3);
        let mut trajectory = Trajectory::new();
        SaRunner::run(&initial, &config, &mut trajectory).unwrap();
        let first = &trajectory.records()[0];
        assert!((first.current_value - initial.objective()).abs() < 1e-12);
        assert_eq!(first.label, "annealing");
    }

    #[test]
    fn test_errors() {
        let mut trajectory = Trajectory::new();
        let empty = Candidate::new(Vec::new()).unwrap();
        assert_eq!(
            SaRunner::run(&empty, &SaConfig::default(), &mut trajectory).unwrap_err(),
            SearchError::MissingCandidate
        );
        let err = SaRunner::run(&Poisoned, &SaConfig::default(), &mut trajectory).unwrap_err();
        assert!(matches!(err, SearchError::NonFiniteObjective { .. }));
    }

    #[test]
    fn test_cancellation() {
        let cancel = Arc::new(AtomicBool::new(true));
        let mut trajectory = Trajectory::new();
        let result = SaRunner::run_with_cancel(
            &climate(),
            &SaConfig::default(),
            &mut trajectory,
            Some(cancel),
        )
        .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
    }
}

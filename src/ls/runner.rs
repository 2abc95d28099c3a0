//! Local Search execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rand::Rng;

use super::config::LocalSearchConfig;
use crate::error::SearchError;
use crate::model::{ensure_seeded, evaluate, Solution};
use crate::random::create_rng;
use crate::trajectory::{TrajectoryRecord, TrajectorySink, LOCAL_SEARCH};

/// Result of a Local Search run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Objective of the best solution.
    pub best_value: f64,
    /// Iterations executed.
    pub iterations: usize,
    /// Number of accepted (strictly improving) moves.
    pub improving_moves: usize,
    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Executes greedy Local Search.
pub struct LocalSearchRunner;

impl LocalSearchRunner {
    /// Runs Local Search from `initial`, seeding the random source from the
    /// config.
    pub fn run<S, T>(
        initial: &S,
        config: &LocalSearchConfig,
        sink: &mut T,
    ) -> Result<LocalSearchResult<S>, SearchError>
    where
        S: Solution,
        T: TrajectorySink + ?Sized,
    {
        Self::run_with_cancel(initial, config, sink, None)
    }

    /// Runs local search with an optional cancellation token, seeding the random
    /// source from the config.
    pub fn run_with_cancel<S, T>(
        initial: &S,
        config: &LocalSearchConfig,
        sink: &mut T,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<LocalSearchResult<S>, SearchError>
    where
        S: Solution,
        T: TrajectorySink + ?Sized,
    {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(initial, config, &mut rng, sink, cancel)
    }

    /// Runs Local Search with an injected random source and an optional
    /// cancellation flag, checked before every iteration.
    ///
    /// Writes one record per iteration:
    /// `(objective of current before the move, best so far, iteration)`.
    pub fn run_with_rng<S, R, T>(
        initial: &S,
        config: &LocalSearchConfig,
        rng: &mut R,
        sink: &mut T,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<LocalSearchResult<S>, SearchError>
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

        let mut iterations = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;

        for iteration in 0..config.max_iterations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!("local search cancelled at iteration {iteration}");
                cancelled = true;
                break;
            }

            let neighbor = current.neighbor(config.neighborhood, rng);
            let neighbor_value = evaluate(&neighbor, iteration)?;

            sink.record(TrajectoryRecord::new(
                current_value,
                best_value,
                iteration,
                LOCAL_SEARCH,
            ));

            if neighbor_value > current_value {
                current = neighbor;
                current_value = neighbor_value;
                improving_moves += 1;

                if current_value > best_value {
                    best = current.clone();
                    best_value = current_value;
                    debug!("local search: new best {best_value} at iteration {iteration}");
                }
            }

            iterations += 1;
        }

        info!(
            "local search finished: best {best_value} after {iterations} iterations \
             ({improving_moves} improving moves)"
        );

        Ok(LocalSearchResult {
            best,
            best_value,
            iterations,
            improving_moves,
            cancelled,
        })
    }
}

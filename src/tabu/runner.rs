//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the initial candidate with an empty tabu list
//! 2. At each iteration:
//!    a. Draw one neighbor of the current point and evaluate it
//!    b. Update the global best from the neighbor, whether or not it is
//!    accepted
//!    c. If the neighbor's fitness is in the tabu list, stay; otherwise move
//!    to it (improving or sideways) and push its fitness onto the list
//! 3. Terminate after `max_iterations`; there is no aspiration override
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rand::Rng;

use super::config::TabuConfig;
use super::types::TabuList;
use crate::error::SearchError;
use crate::model::{ensure_seeded, evaluate, Solution};
use crate::random::create_rng;
use crate::trajectory::{TrajectoryRecord, TrajectorySink, TABU};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult<S: Clone> {
    /// Best solution evaluated.
    pub best: S,
    /// Objective of the best solution.
    pub best_value: f64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best solution was found (`None` if the initial
    /// candidate was never beaten).
    pub best_iteration: Option<usize>,
    /// Moves to a strictly better neighbor.
    pub improving_moves: usize,
    /// Moves to a non-improving, non-tabu neighbor.
    pub sideways_moves: usize,
    /// Neighbors refused because their fitness was tabu.
    pub tabu_rejections: usize,
    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search, seeding the random source from the config.
    pub fn run<S, T>(
        initial: &S,
        config: &TabuConfig,
        sink: &mut T,
    ) -> Result<TabuResult<S>, SearchError>
    where
        S: Solution,
        T: TrajectorySink + ?Sized,
    {
        Self::run_with_cancel(initial, config, sink, None)
    }

    /// Runs tabu search with an optional cancellation token, seeding the random
    /// source from the config.
    pub fn run_with_cancel<S, T>(
        initial: &S,
        config: &TabuConfig,
        sink: &mut T,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult<S>, SearchError>
    where
        S: Solution,
        T: TrajectorySink + ?Sized,
    {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(initial, config, &mut rng, sink, cancel)
    }

    /// Executes Tabu Search with an injected random source and an optional
    /// cancellation flag.
    ///
    /// Writes one record per iteration:
    /// `(objective of current before the step, best after the step, iteration)`.
    pub fn run_with_rng<S, R, T>(
        initial: &S,
        config: &TabuConfig,
        rng: &mut R,
        sink: &mut T,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult<S>, SearchError>
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
        let mut best_iteration = None;

        let mut tabu = TabuList::new(config.tabu_capacity);

        let mut iterations = 0usize;
        let mut improving_moves = 0usize;
        let mut sideways_moves = 0usize;
        let mut tabu_rejections = 0usize;
        let mut cancelled = false;

        for iteration in 0..config.max_iterations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!("tabu search cancelled at iteration {iteration}");
                cancelled = true;
                break;
            }

            let neighbor = current.neighbor(config.neighborhood, rng);
            let neighbor_value = evaluate(&neighbor, iteration)?;
            let previous_value = current_value;

            if neighbor_value > best_value {
                best = neighbor.clone();
                best_value = neighbor_value;
                best_iteration = Some(iteration);
                debug!("tabu: new best {best_value} at iteration {iteration}");
            }

            let improves = neighbor_value > current_value;
            if tabu.contains(neighbor_value) {
                tabu_rejections += 1;
            } else {
                if improves {
                    improving_moves += 1;
                } else {
                    sideways_moves += 1;
                }
                current = neighbor;
                current_value = neighbor_value;
                tabu.push(neighbor_value);
            }

            sink.record(TrajectoryRecord::new(
                previous_value,
                best_value,
                iteration,
                TABU,
            ));
            iterations += 1;
        }

        info!(
            "tabu search finished: best {best_value} after {iterations} iterations \
             ({tabu_rejections} tabu rejections)"
        );

        Ok(TabuResult {
            best,
            best_value,
            iterations,
            best_iteration,
            improving_moves,
            sideways_moves,
            tabu_rejections,
            cancelled,
        })
    }
}

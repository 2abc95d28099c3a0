//! Iterated Local Search execution engine.
//!
//! # Algorithm
//!
//! 1. Descend from the initial candidate; the result is the incumbent
//! 2. Record `(initial objective, incumbent objective, 0)`
//! 3. For each outer iteration `i = 1..=max_iterations`:
//!    a. **Perturb**: each parameter of the incumbent is re-drawn with
//!    probability `perturbation_probability` at `perturbation_strength`
//!    b. **Descend** from the perturbed point
//!    c. Record `(descent objective, incumbent objective, i)`
//!    d. **Accept** the descent result only if it strictly beats the incumbent

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rand::Rng;

use super::config::IlsConfig;
use crate::error::SearchError;
use crate::model::{ensure_seeded, evaluate, Solution};
use crate::random::create_rng;
use crate::trajectory::{TrajectoryRecord, TrajectorySink, ITERATED_LOCAL_SEARCH};

/// Outcome of one descent phase.
#[derive(Debug, Clone)]
pub struct Descent<S: Clone> {
    /// Local optimum reached (by the first-failure rule).
    pub best: S,
    pub best_value: f64,
    /// Number of improving moves taken.
    pub steps: usize,
}

/// Greedy descent that stops at the first non-improving neighbor.
///
/// At most `max_iterations` neighbors are drawn. `iteration` is only used to
/// label a non-finite objective error.
pub fn descend<S: Solution, R: Rng>(
    start: &S,
    neighborhood: f64,
    max_iterations: usize,
    rng: &mut R,
    iteration: usize,
) -> Result<Descent<S>, SearchError> {
    let mut current = start.clone();
    let mut current_value = evaluate(&current, iteration)?;
    let mut best = current.clone();
    let mut best_value = current_value;
    let mut steps = 0usize;

    for _ in 0..max_iterations {
        let neighbor = current.neighbor(neighborhood, rng);
        let neighbor_value = evaluate(&neighbor, iteration)?;

        if neighbor_value > current_value {
            current = neighbor;
            current_value = neighbor_value;
            steps += 1;

            if current_value > best_value {
                best = current.clone();
                best_value = current_value;
            }
        } else {
            break;
        }
    }

    Ok(Descent {
        best,
        best_value,
        steps,
    })
}

/// Result of an Iterated Local Search run.
#[derive(Debug, Clone)]
pub struct IlsResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Objective of the best solution.
    pub best_value: f64,
    /// Outer iterations executed.
    pub iterations: usize,
    /// Outer iterations whose descent replaced the incumbent.
    pub improvements: usize,
    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Iterated Local Search runner.
pub struct IlsRunner;

impl IlsRunner {
    /// Runs ILS from `initial`, seeding the random source from the config.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_paramopt::ils::{IlsConfig, IlsRunner};
    /// use u_paramopt::model::{Candidate, Direction, Parameter};
    /// use u_paramopt::trajectory::Trajectory;
    ///
    /// let initial = Candidate::new(vec![
    ///     Parameter::new("load", 0.0, 10.0, 5.0, 1.0, 2.0, Direction::Minimize).unwrap(),
    /// ])
    /// .unwrap();
    /// let config = IlsConfig::default().with_seed(42);
    /// let mut trajectory = Trajectory::new();
    /// let result = IlsRunner::run(&initial, &config, &mut trajectory).unwrap();
    /// assert_eq!(trajectory.len(), config.max_iterations + 1);
    /// assert!(result.best_value >= initial.objective());
    /// ```
    pub fn run<S, T>(
        initial: &S,
        config: &IlsConfig,
        sink: &mut T,
    ) -> Result<IlsResult<S>, SearchError>
    where
        S: Solution,
        T: TrajectorySink + ?Sized,
    {
        Self::run_with_cancel(initial, config, sink, None)
    }

    /// Runs ILS with an optional cancellation token, seeding the random
    /// source from the config.
    pub fn run_with_cancel<S, T>(
        initial: &S,
        config: &IlsConfig,
        sink: &mut T,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<IlsResult<S>, SearchError>
    where
        S: Solution,
        T: TrajectorySink + ?Sized,
    {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(initial, config, &mut rng, sink, cancel)
    }

    /// Runs ILS with an injected random source and an optional cancellation
    /// flag, checked before every outer iteration.
    pub fn run_with_rng<S, R, T>(
        initial: &S,
        config: &IlsConfig,
        rng: &mut R,
        sink: &mut T,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<IlsResult<S>, SearchError>
    where
        S: Solution,
        R: Rng,
        T: TrajectorySink + ?Sized,
    {
        config.validate()?;
        ensure_seeded(initial)?;

        let initial_value = evaluate(initial, 0)?;
        let Descent {
            best: mut incumbent,
            best_value: mut incumbent_value,
            ..
        } = descend(
            initial,
            config.neighborhood,
            config.max_descent_iterations,
            rng,
            0,
        )?;

        sink.record(TrajectoryRecord::new(
            initial_value,
            incumbent_value,
            0,
            ITERATED_LOCAL_SEARCH,
        ));

        let mut iterations = 0usize;
        let mut improvements = 0usize;
        let mut cancelled = false;

        for iteration in 1..=config.max_iterations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!("iterated local search cancelled at iteration {iteration}");
                cancelled = true;
                break;
            }

            let perturbed = incumbent.perturb(
                config.perturbation_strength,
                config.perturbation_probability,
                rng,
            );
            let candidate = descend(
                &perturbed,
                config.neighborhood,
                config.max_descent_iterations,
                rng,
                iteration,
            )?;

            sink.record(TrajectoryRecord::new(
                candidate.best_value,
                incumbent_value,
                iteration,
                ITERATED_LOCAL_SEARCH,
            ));

            if candidate.best_value > incumbent_value {
                incumbent = candidate.best;
                incumbent_value = candidate.best_value;
                improvements += 1;
                debug!("ils: new best {incumbent_value} at iteration {iteration}");
            }

            iterations += 1;
        }

        info!(
            "iterated local search finished: best {incumbent_value} after {iterations} \
             iterations ({improvements} improvements)"
        );

        Ok(IlsResult {
            best: incumbent,
            best_value: incumbent_value,
            iterations,
            improvements,
            cancelled,
        })
    }
}

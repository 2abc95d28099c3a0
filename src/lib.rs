//! Weighted bounded-parameter optimization.
//!
//! A [`model::Candidate`] is an ordered set of bounded, weighted parameters,
//! each preferring its maximum or its minimum. Its objective is the weighted
//! sum of normalized satisfaction minus a quadratic penalty for values that
//! leave their range. Five competing metaheuristics maximize it:
//!
//! - **Local Search (LS)**: greedy hill climbing over a fixed budget.
//! - **Iterated Local Search (ILS)**: strong perturbation followed by a
//!   first-failure descent, with elitist acceptance.
//! - **Simulated Annealing (SA)**: Metropolis acceptance under geometric
//!   cooling.
//! - **Tabu Search (TS)**: bounded FIFO memory of accepted fitness values.
//! - **Genetic Algorithm (GA)**: truncation selection, uniform crossover and
//!   neighbor mutation.
//!
//! Every strategy works through the [`model::Solution`] trait, draws all
//! randomness from one injectable generator, and appends one
//! [`trajectory::TrajectoryRecord`] per iteration to a caller-owned sink.
//!
//! # Example
//!
//! ```
//! use u_paramopt::model::{Candidate, Direction, Parameter};
//! use u_paramopt::sa::{SaConfig, SaRunner};
//! use u_paramopt::trajectory::Trajectory;
//!
//! let initial = Candidate::new(vec![
//!     Parameter::new("temperature", 0.0, 40.0, 30.0, 0.4, 12.0, Direction::Minimize)?,
//!     Parameter::new("pressure", 900.0, 1100.0, 1000.0, 0.2, 5.0, Direction::Maximize)?,
//! ])?;
//!
//! let mut trajectory = Trajectory::new();
//! let result = SaRunner::run(&initial, &SaConfig::default().with_seed(7), &mut trajectory)?;
//! assert!(result.best_value >= initial.objective());
//! # Ok::<(), u_paramopt::SearchError>(())
//! ```

pub mod error;
pub mod ga;
pub mod ils;
pub mod ls;
pub mod model;
pub mod random;
pub mod sa;
pub mod tabu;
pub mod trajectory;

pub use error::SearchError;

//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic with a bounded FIFO memory of
//! recently accepted fitness values. A neighbor whose fitness is in that
//! memory is refused; any other neighbor is accepted, improving or not.
//! The global best is tracked from every evaluated neighbor, accepted or
//! not.
//!
//! Tabu membership is keyed on the raw fitness value, so two different
//! candidates with identical fitness are treated as the same state.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod runner;
mod types;

pub use config::TabuConfig;
pub use runner::{TabuResult, TabuRunner};
pub use types::TabuList;

//! Local Search (greedy hill climbing).
//!
//! Runs a fixed iteration budget. Each iteration draws one neighbor of the
//! current point and moves to it only if it is strictly better. A
//! non-improving neighbor does not end the run; the next iteration simply
//! draws again.

mod config;
mod runner;

pub use config::LocalSearchConfig;
pub use runner::{LocalSearchResult, LocalSearchRunner};

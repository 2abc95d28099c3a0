//! Genetic Algorithm.
//!
//! Generational GA over a fixed-size population seeded from neighbors of a
//! single candidate. Each generation:
//!
//! 1. evaluates every member,
//! 2. keeps the top `parent_count` members (truncation selection),
//! 3. refills the population from random distinct parent pairs, by uniform
//!    crossover or plain cloning,
//! 4. replaces each member by a neighbor with probability `mutation_rate`.
//!
//! The best member ever evaluated is tracked on the side. It is not
//! re-inserted into the population, so the population itself can regress
//! between generations.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, parent count)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod selection;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::truncation;

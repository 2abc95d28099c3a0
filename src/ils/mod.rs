//! Iterated Local Search (ILS).
//!
//! Alternates a strong random perturbation of the incumbent with a short
//! greedy descent from the perturbed point. The descent stops at the first
//! non-improving neighbor (capped by an inner iteration limit). The outer
//! step is accepted only if it strictly beats the incumbent.
//!
//! # References
//!
//! - Lourenço, Martin & Stützle (2003), "Iterated Local Search",
//!   *Handbook of Metaheuristics*, 320-353.

mod config;
mod runner;

pub use config::IlsConfig;
pub use runner::{descend, Descent, IlsResult, IlsRunner};

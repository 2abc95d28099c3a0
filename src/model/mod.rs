//! Objective model.
//!
//! A [`Candidate`] is an ordered list of bounded, weighted [`Parameter`]s.
//! Its fitness is the weighted sum of per-parameter satisfaction minus a
//! quadratic penalty for values outside their range:
//!
//! ```text
//! satisfaction(p) = (value - min) / (max - min)   maximize
//!                 = (max - value) / (max - min)   minimize
//! penalty(p)      = change_cost * (distance_outside / (max - min))^2
//! objective       = Σ weight * satisfaction - Σ penalty
//! ```
//!
//! The [`Solution`] trait is the contract the search strategies rely on;
//! [`Candidate`] is its implementation for this model.

mod candidate;
mod parameter;
mod types;

pub use candidate::{Candidate, ObjectiveBreakdown, ParameterContribution};
pub use parameter::{Direction, Parameter};
pub use types::Solution;

pub(crate) use types::{ensure_seeded, evaluate};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Candidate, Direction, Parameter};

    /// Temperature / humidity / pressure set used across the strategy tests.
    pub(crate) fn climate() -> Candidate {
        Candidate::new(vec![
            Parameter::new("temperature", 0.0, 40.0, 30.0, 0.4, 12.0, Direction::Minimize).unwrap(),
            Parameter::new("humidity", 0.0, 100.0, 30.0, 0.4, 12.0, Direction::Minimize).unwrap(),
            Parameter::new("pressure", 900.0, 1100.0, 1000.0, 0.2, 5.0, Direction::Maximize)
                .unwrap(),
        ])
        .unwrap()
    }

    /// Objective is NaN for every candidate; exercises the fail-fast path.
    #[derive(Debug, Clone)]
    pub(crate) struct Poisoned;

    impl super::Solution for Poisoned {
        fn dimension(&self) -> usize {
            1
        }
        fn objective(&self) -> f64 {
            f64::NAN
        }
        fn neighbor<R: rand::Rng>(&self, _step: f64, _rng: &mut R) -> Self {
            Poisoned
        }
        fn perturb<R: rand::Rng>(&self, _s: f64, _p: f64, _rng: &mut R) -> Self {
            Poisoned
        }
        fn crossover<R: rand::Rng>(
            &self,
            _other: &Self,
            _rng: &mut R,
        ) -> Result<Self, crate::SearchError> {
            Ok(Poisoned)
        }
    }
}

//! Core trait every search strategy operates on.

use rand::Rng;

use crate::error::SearchError;

/// A mutable-by-copy candidate solution.
///
/// Strategies never mutate a solution in place: every operation returns an
/// independently owned value, so a "best" snapshot, a neighbor and a
/// population member can never alias each other.
///
/// # Maximization
///
/// All strategies in this crate maximize [`objective`](Solution::objective).
pub trait Solution: Clone {
    /// Number of decision variables. A solution with zero dimensions cannot
    /// seed a search.
    fn dimension(&self) -> usize;

    /// Scalar fitness. Must be a pure function of the solution's values.
    fn objective(&self) -> f64;

    /// Perturbs every variable by at most `step` of its range.
    fn neighbor<R: Rng>(&self, step: f64, rng: &mut R) -> Self;

    /// Perturbs each variable independently with probability `probability`,
    /// by at most `strength` of its range; unselected variables are kept.
    fn perturb<R: Rng>(&self, strength: f64, probability: f64, rng: &mut R) -> Self;

    /// Uniform crossover: each variable is taken from `self` or `other` with
    /// equal probability.
    ///
    /// # Errors
    /// [`SearchError::IncompatibleCandidates`] when the layouts differ.
    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Result<Self, SearchError>;
}

/// Evaluates `solution`, failing fast on NaN or infinite fitness.
pub(crate) fn evaluate<S: Solution>(solution: &S, iteration: usize) -> Result<f64, SearchError> {
    let value = solution.objective();
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SearchError::NonFiniteObjective { value, iteration })
    }
}

/// Rejects an empty starting point before any loop begins.
pub(crate) fn ensure_seeded<S: Solution>(initial: &S) -> Result<(), SearchError> {
    if initial.dimension() == 0 {
        Err(SearchError::MissingCandidate)
    } else {
        Ok(())
    }
}

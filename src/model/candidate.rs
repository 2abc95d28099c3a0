//! The objective model: an ordered set of parameters and its fitness.

use std::fmt;

use rand::Rng;

use super::parameter::Parameter;
use super::types::Solution;
use crate::error::SearchError;

/// Contribution of one parameter to the objective.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterContribution {
    pub name: String,
    pub satisfaction: f64,
    pub weight: f64,
    pub weighted_satisfaction: f64,
    pub penalty: f64,
    /// `weighted_satisfaction - penalty`.
    pub fitness: f64,
}

/// Per-parameter view of [`Candidate::objective`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveBreakdown {
    /// Same value as [`Candidate::objective`].
    pub total: f64,
    pub components: Vec<ParameterContribution>,
}

/// A fixed-length, ordered assignment of values to parameters.
///
/// Cloning is a deep copy; the search strategies rely on that for branch
/// independence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Parameter>", into = "Vec<Parameter>")
)]
pub struct Candidate {
    parameters: Vec<Parameter>,
}

impl TryFrom<Vec<Parameter>> for Candidate {
    type Error = SearchError;

    fn try_from(parameters: Vec<Parameter>) -> Result<Self, Self::Error> {
        Candidate::new(parameters)
    }
}

impl From<Candidate> for Vec<Parameter> {
    fn from(candidate: Candidate) -> Self {
        candidate.parameters
    }
}

impl Candidate {
    /// Wraps a parameter list, validating every definition.
    ///
    /// An empty list is accepted here; strategies refuse to start from it.
    pub fn new(parameters: Vec<Parameter>) -> Result<Self, SearchError> {
        for p in &parameters {
            p.validate()?;
        }
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Looks a parameter up by name.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Current values in parameter order.
    pub fn values(&self) -> Vec<f64> {
        self.parameters.iter().map(Parameter::value).collect()
    }

    /// Weighted satisfaction minus out-of-range penalty, summed over all
    /// parameters.
    pub fn objective(&self) -> f64 {
        self.parameters
            .iter()
            .map(|p| p.weight() * p.satisfaction() - p.penalty())
            .sum()
    }

    /// Same computation as [`objective`](Candidate::objective), itemized.
    pub fn objective_detailed(&self) -> ObjectiveBreakdown {
        let components: Vec<ParameterContribution> = self
            .parameters
            .iter()
            .map(|p| {
                let satisfaction = p.satisfaction();
                let weighted_satisfaction = satisfaction * p.weight();
                let penalty = p.penalty();
                ParameterContribution {
                    name: p.name().to_string(),
                    satisfaction,
                    weight: p.weight(),
                    weighted_satisfaction,
                    penalty,
                    fitness: weighted_satisfaction - penalty,
                }
            })
            .collect();
        let total = components.iter().map(|c| c.fitness).sum();
        ObjectiveBreakdown { total, components }
    }

    /// Same length and same parameter names in the same order.
    pub fn is_compatible(&self, other: &Candidate) -> bool {
        self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.name() == b.name())
    }
}

impl Solution for Candidate {
    fn dimension(&self) -> usize {
        self.parameters.len()
    }

    fn objective(&self) -> f64 {
        Candidate::objective(self)
    }

    fn neighbor<R: Rng>(&self, step: f64, rng: &mut R) -> Self {
        let mut next = self.clone();
        for p in &mut next.parameters {
            let v = p.neighbor_value(step, rng);
            p.set_value(v);
        }
        next
    }

    fn perturb<R: Rng>(&self, strength: f64, probability: f64, rng: &mut R) -> Self {
        let mut next = self.clone();
        for p in &mut next.parameters {
            if rng.random_range(0.0..1.0) < probability {
                let v = p.neighbor_value(strength, rng);
                p.set_value(v);
            }
        }
        next
    }

    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Result<Self, SearchError> {
        if !self.is_compatible(other) {
            return Err(SearchError::IncompatibleCandidates);
        }
        let mut child = self.clone();
        for (p, donor) in child.parameters.iter_mut().zip(&other.parameters) {
            if rng.random_bool(0.5) {
                p.set_value(donor.value());
            }
        }
        Ok(child)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.parameters {
            writeln!(f, "{p}")?;
        }
        Ok(())
    }
}

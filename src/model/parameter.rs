//! A single bounded, weighted scalar under optimization.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::SearchError;

/// Whether a parameter scores higher near its maximum or its minimum.
///
/// Deserialization goes through [`FromStr`], so it accepts the same
/// spellings and reports the same [`SearchError::InvalidConfig`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase", try_from = "String")
)]
pub enum Direction {
    /// Satisfaction is 1 at `max`, 0 at `min`.
    Maximize,
    /// Satisfaction is 1 at `min`, 0 at `max`.
    Minimize,
}

impl TryFrom<String> for Direction {
    type Error = SearchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Direction {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "maximize" => Ok(Direction::Maximize),
            "min" | "minimize" => Ok(Direction::Minimize),
            other => Err(SearchError::config(format!(
                "unknown optimization direction '{other}', expected 'max' or 'min'"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Maximize => f.write_str("max"),
            Direction::Minimize => f.write_str("min"),
        }
    }
}

/// A bounded, weighted scalar.
///
/// `value` may sit outside `[min, max]` (it is then penalized), but every
/// value produced by [`neighbor_value`](Parameter::neighbor_value) is clamped
/// back into range.
///
/// Deserialized parameters are validated like [`Parameter::new`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawParameter")
)]
pub struct Parameter {
    name: String,
    min: f64,
    max: f64,
    value: f64,
    weight: f64,
    change_cost: f64,
    direction: Direction,
}

/// Unchecked wire form of [`Parameter`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawParameter {
    name: String,
    min: f64,
    max: f64,
    value: f64,
    weight: f64,
    change_cost: f64,
    direction: Direction,
}

#[cfg(feature = "serde")]
impl TryFrom<RawParameter> for Parameter {
    type Error = SearchError;

    fn try_from(raw: RawParameter) -> Result<Self, Self::Error> {
        Parameter::new(
            raw.name,
            raw.min,
            raw.max,
            raw.value,
            raw.weight,
            raw.change_cost,
            raw.direction,
        )
    }
}

impl Parameter {
    /// Creates a parameter, rejecting inconsistent definitions.
    ///
    /// # Errors
    /// [`SearchError::InvalidConfig`] if `min >= max`, `weight` or
    /// `change_cost` is negative, or any number is not finite.
    pub fn new(
        name: impl Into<String>,
        min: f64,
        max: f64,
        value: f64,
        weight: f64,
        change_cost: f64,
        direction: Direction,
    ) -> Result<Self, SearchError> {
        let param = Self {
            name: name.into(),
            min,
            max,
            value,
            weight,
            change_cost,
            direction,
        };
        param.validate()?;
        Ok(param)
    }

    /// Checks the definition invariants.
    pub fn validate(&self) -> Result<(), SearchError> {
        let fields = [
            ("min", self.min),
            ("max", self.max),
            ("value", self.value),
            ("weight", self.weight),
            ("change_cost", self.change_cost),
        ];
        for (field, v) in fields {
            if !v.is_finite() {
                return Err(SearchError::config(format!(
                    "parameter '{}': {field} must be finite, got {v}",
                    self.name
                )));
            }
        }
        if self.min >= self.max {
            return Err(SearchError::config(format!(
                "parameter '{}': min ({}) must be less than max ({})",
                self.name, self.min, self.max
            )));
        }
        if !self.range().is_finite() {
            return Err(SearchError::config(format!(
                "parameter '{}': range [{}, {}] is too wide",
                self.name, self.min, self.max
            )));
        }
        if self.weight < 0.0 {
            return Err(SearchError::config(format!(
                "parameter '{}': weight must be non-negative, got {}",
                self.name, self.weight
            )));
        }
        if self.change_cost < 0.0 {
            return Err(SearchError::config(format!(
                "parameter '{}': change_cost must be non-negative, got {}",
                self.name, self.change_cost
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn change_cost(&self) -> f64 {
        self.change_cost
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Width of the admissible interval, `max - min` (always positive).
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Overwrites the current value. Out-of-range values are allowed.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Whether `value` lies in `[min, max]`.
    pub fn is_in_range(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Normalized satisfaction of the current value.
    ///
    /// 1 at the preferred bound, 0 at the other; outside the range the
    /// linear formula keeps extrapolating.
    pub fn satisfaction(&self) -> f64 {
        match self.direction {
            Direction::Maximize => (self.value - self.min) / self.range(),
            Direction::Minimize => (self.max - self.value) / self.range(),
        }
    }

    /// Quadratic out-of-range penalty: `change_cost * (distance / range)^2`.
    pub fn penalty(&self) -> f64 {
        let distance = if self.value < self.min {
            self.min - self.value
        } else if self.value > self.max {
            self.value - self.max
        } else {
            return 0.0;
        };
        let normalized = distance / self.range();
        self.change_cost * normalized * normalized
    }

    /// Draws a value near the current one.
    ///
    /// The offset has a random sign and a magnitude uniform in
    /// `[0, step_percentage * range)`; the result is clamped to `[min, max]`.
    /// Negative or NaN steps behave as zero. Steps large enough to overflow
    /// land on a bound.
    pub fn neighbor_value<R: Rng>(&self, step_percentage: f64, rng: &mut R) -> f64 {
        let step_size = self.range() * step_percentage.max(0.0);
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let magnitude = rng.random::<f64>() * step_size;
        let moved = self.value + sign * magnitude;
        // 0 * inf
        if moved.is_nan() {
            return self.value.clamp(self.min, self.max);
        }
        moved.clamp(self.min, self.max)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} in [{}, {}] (weight {}, change cost {}, {})",
            self.name, self.value, self.min, self.max, self.weight, self.change_cost, self.direction
        )
    }
}

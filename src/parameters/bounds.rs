//! Parameter bounds
//!
//! A parameter may be limited to a closed interval `[min, max]`. Either side may
//! be infinite, which is also the default: an unbounded parameter has
//! `min = -∞` and `max = +∞`.

use serde::{Deserialize, Serialize};
use std::f64::{INFINITY, NEG_INFINITY};
use thiserror::Error;

/// Errors that can occur when working with parameter bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    #[error("Invalid bounds: min ({min}) must not be greater than max ({max})")]
    InvalidBounds { min: f64, max: f64 },

    #[error("Bounds must not be NaN")]
    NanBound,

    #[error("Parameter value {value} is outside bounds: [{min}, {max}]")]
    ValueOutsideBounds { value: f64, min: f64, max: f64 },

    #[error("Parameter value must not be NaN")]
    NanValue,
}

/// The closed interval a parameter value is allowed to take
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum allowed value for the parameter
    pub min: f64,

    /// Maximum allowed value for the parameter
    pub max: f64,
}

// JSON has no representation for infinities, so an open side is written as `null`.
impl Serialize for Bounds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let min = if self.has_lower_bound() {
            Some(self.min)
        } else {
            None
        };
        let max = if self.has_upper_bound() {
            Some(self.max)
        } else {
            None
        };

        let mut state = serializer.serialize_struct("Bounds", 2)?;
        state.serialize_field("min", &min)?;
        state.serialize_field("max", &max)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Bounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BoundsHelper {
            #[serde(default)]
            min: Option<f64>,

            #[serde(default)]
            max: Option<f64>,
        }

        let helper = BoundsHelper::deserialize(deserializer)?;

        Bounds::new(
            helper.min.unwrap_or(NEG_INFINITY),
            helper.max.unwrap_or(INFINITY),
        )
        .map_err(serde::de::Error::custom)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: NEG_INFINITY,
            max: INFINITY,
        }
    }
}

impl Bounds {
    /// Create bounds from a min and max value
    ///
    /// Returns an error if either side is NaN or if `min > max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lmfit_table::parameters::bounds::Bounds;
    ///
    /// let bounds = Bounds::new(0.0, 10.0).unwrap();
    /// assert_eq!(bounds.min, 0.0);
    /// assert_eq!(bounds.max, 10.0);
    ///
    /// assert!(Bounds::new(10.0, 0.0).is_err());
    /// ```
    pub fn new(min: f64, max: f64) -> Result<Self, BoundsError> {
        if min.is_nan() || max.is_nan() {
            return Err(BoundsError::NanBound);
        }

        if min > max {
            return Err(BoundsError::InvalidBounds { min, max });
        }

        Ok(Self { min, max })
    }

    /// Bounds spanning the whole real line
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Copy of these bounds with a new lower side
    pub fn with_min(self, min: f64) -> Result<Self, BoundsError> {
        Self::new(min, self.max)
    }

    /// Copy of these bounds with a new upper side
    pub fn with_max(self, max: f64) -> Result<Self, BoundsError> {
        Self::new(self.min, max)
    }

    /// Check if a value lies within the bounds (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check that a value is acceptable for a parameter with these bounds
    pub fn check(&self, value: f64) -> Result<(), BoundsError> {
        if value.is_nan() {
            return Err(BoundsError::NanValue);
        }

        if !self.contains(value) {
            return Err(BoundsError::ValueOutsideBounds {
                value,
                min: self.min,
                max: self.max,
            });
        }

        Ok(())
    }

    /// `true` if min is finite
    pub fn has_lower_bound(&self) -> bool {
        self.min.is_finite()
    }

    /// `true` if max is finite
    pub fn has_upper_bound(&self) -> bool {
        self.max.is_finite()
    }

    /// Clamp a value into the bounds
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

//! Numeric ranges as they appear in catalogue and recipe records.
//!
//! Three read variants exist, each with an update twin:
//!
//! | read                      | bounds                       | update twin                     |
//! |---------------------------|------------------------------|---------------------------------|
//! | [`Range`]                 | `min` and `max` required     | [`RangeUpdate`]                 |
//! | [`RangeWithOptionalMax`]  | `min` required, open top     | [`RangeWithOptionalMaxUpdate`]  |
//! | [`OptionalRange`]         | both optional                | [`OptionalRangeUpdate`]         |
//!
//! Every constructor and decoder rejects `min > max` when both are present.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::field::Field;
use crate::marshal::RANGE_TAG;

/// Scalar types usable as range bounds.
pub trait RangeBound: Copy + PartialOrd + Debug + Serialize + DeserializeOwned {}

impl RangeBound for f32 {}
impl RangeBound for u16 {}
impl RangeBound for u32 {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("min {min} exceeds max {max}")]
    Inverted { min: String, max: String },

    #[error("missing required bound `{0}`")]
    MissingBound(&'static str),

    #[error("bound `{0}` cannot be cleared")]
    RequiredBoundCleared(&'static str),
}

fn check_order<T: RangeBound>(min: Option<T>, max: Option<T>) -> Result<(), RangeError> {
    match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => Err(RangeError::Inverted {
            min: format!("{lo:?}"),
            max: format!("{hi:?}"),
        }),
        _ => Ok(()),
    }
}

fn tagged<E: serde::de::Error>(err: RangeError) -> E {
    E::custom(format!("{RANGE_TAG}{err}"))
}

#[derive(Deserialize)]
struct RawBounds<T> {
    min: Option<T>,
    max: Option<T>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RawUpdate<T> {
    #[serde(default)]
    min: Field<T>,
    #[serde(default)]
    max: Field<T>,
}

// ---------------------------------------------------------------------------
// Closed range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range<T> {
    min: T,
    max: T,
}

impl<T: RangeBound> Range<T> {
    pub fn new(min: T, max: T) -> Result<Self, RangeError> {
        check_order(Some(min), Some(max))?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

impl<'de, T: RangeBound> Deserialize<'de> for Range<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBounds::<T>::deserialize(deserializer)?;
        let min = raw.min.ok_or(RangeError::MissingBound("min")).map_err(tagged)?;
        let max = raw.max.ok_or(RangeError::MissingBound("max")).map_err(tagged)?;
        Range::new(min, max).map_err(tagged)
    }
}

// ---------------------------------------------------------------------------
// Open-top range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeWithOptionalMax<T> {
    min: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<T>,
}

impl<T: RangeBound> RangeWithOptionalMax<T> {
    pub fn new(min: T, max: Option<T>) -> Result<Self, RangeError> {
        check_order(Some(min), max)?;
        Ok(Self { min, max })
    }

    /// Range with no upper bound.
    pub fn at_least(min: T) -> Self {
        Self { min, max: None }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> Option<T> {
        self.max
    }

    pub fn is_unbounded_above(&self) -> bool {
        self.max.is_none()
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && self.max.map_or(true, |hi| value <= hi)
    }
}

impl<T: RangeBound> From<Range<T>> for RangeWithOptionalMax<T> {
    fn from(range: Range<T>) -> Self {
        Self {
            min: range.min,
            max: Some(range.max),
        }
    }
}

impl<'de, T: RangeBound> Deserialize<'de> for RangeWithOptionalMax<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBounds::<T>::deserialize(deserializer)?;
        let min = raw.min.ok_or(RangeError::MissingBound("min")).map_err(tagged)?;
        RangeWithOptionalMax::new(min, raw.max).map_err(tagged)
    }
}

// ---------------------------------------------------------------------------
// Fully optional range
// ---------------------------------------------------------------------------

/// A range whose bounds may both be absent, meaning the quantity is unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionalRange<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<T>,
}

impl<T> Default for OptionalRange<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: RangeBound> OptionalRange<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Result<Self, RangeError> {
        check_order(min, max)?;
        Ok(Self { min, max })
    }

    pub fn unspecified() -> Self {
        Self::default()
    }

    pub fn min(&self) -> Option<T> {
        self.min
    }

    pub fn max(&self) -> Option<T> {
        self.max
    }

    pub fn is_unspecified(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Missing bounds do not constrain; an unspecified range contains everything.
    pub fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |lo| lo <= value) && self.max.map_or(true, |hi| value <= hi)
    }
}

impl<T: RangeBound> From<RangeWithOptionalMax<T>> for OptionalRange<T> {
    fn from(range: RangeWithOptionalMax<T>) -> Self {
        Self {
            min: Some(range.min),
            max: range.max,
        }
    }
}

impl<'de, T: RangeBound> Deserialize<'de> for OptionalRange<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBounds::<T>::deserialize(deserializer)?;
        OptionalRange::new(raw.min, raw.max).map_err(tagged)
    }
}

// ---------------------------------------------------------------------------
// Update twins
// ---------------------------------------------------------------------------

/// Partial update of a [`Range`]. Either bound may be replaced; neither can be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeUpdate<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<T>,
}

impl<T: RangeBound> RangeUpdate<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Result<Self, RangeError> {
        check_order(min, max)?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Option<T> {
        self.min
    }

    pub fn max(&self) -> Option<T> {
        self.max
    }

    pub fn apply_to(&self, range: &Range<T>) -> Result<Range<T>, RangeError> {
        Range::new(self.min.unwrap_or(range.min), self.max.unwrap_or(range.max))
    }
}

impl<'de, T: RangeBound> Deserialize<'de> for RangeUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawUpdate::<T>::deserialize(deserializer)?;
        let min = required_update(raw.min, "min").map_err(tagged)?;
        let max = required_update(raw.max, "max").map_err(tagged)?;
        RangeUpdate::new(min, max).map_err(tagged)
    }
}

fn required_update<T>(field: Field<T>, name: &'static str) -> Result<Option<T>, RangeError> {
    match field {
        Field::Absent => Ok(None),
        Field::Null => Err(RangeError::RequiredBoundCleared(name)),
        Field::Value(v) => Ok(Some(v)),
    }
}

/// Partial update of a [`RangeWithOptionalMax`]. `max` may be cleared to reopen the top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeWithOptionalMaxUpdate<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<T>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    max: Field<T>,
}

impl<T: RangeBound> RangeWithOptionalMaxUpdate<T> {
    pub fn new(min: Option<T>, max: Field<T>) -> Result<Self, RangeError> {
        check_order(min, max.value().copied())?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Option<T> {
        self.min
    }

    pub fn max(&self) -> &Field<T> {
        &self.max
    }

    pub fn apply_to(
        &self,
        range: &RangeWithOptionalMax<T>,
    ) -> Result<RangeWithOptionalMax<T>, RangeError> {
        let mut max = range.max;
        self.max.clone().apply_to(&mut max);
        RangeWithOptionalMax::new(self.min.unwrap_or(range.min), max)
    }
}

impl<'de, T: RangeBound> Deserialize<'de> for RangeWithOptionalMaxUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawUpdate::<T>::deserialize(deserializer)?;
        let min = required_update(raw.min, "min").map_err(tagged)?;
        RangeWithOptionalMaxUpdate::new(min, raw.max).map_err(tagged)
    }
}

/// Partial update of an [`OptionalRange`]. Both bounds may be replaced or cleared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionalRangeUpdate<T> {
    #[serde(skip_serializing_if = "Field::is_absent")]
    min: Field<T>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    max: Field<T>,
}

impl<T: RangeBound> OptionalRangeUpdate<T> {
    pub fn new(min: Field<T>, max: Field<T>) -> Result<Self, RangeError> {
        check_order(min.value().copied(), max.value().copied())?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> &Field<T> {
        &self.min
    }

    pub fn max(&self) -> &Field<T> {
        &self.max
    }

    pub fn apply_to(&self, range: &OptionalRange<T>) -> Result<OptionalRange<T>, RangeError> {
        let (mut min, mut max) = (range.min, range.max);
        self.min.clone().apply_to(&mut min);
        self.max.clone().apply_to(&mut max);
        OptionalRange::new(min, max)
    }
}

impl<'de, T: RangeBound> Deserialize<'de> for OptionalRangeUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawUpdate::<T>::deserialize(deserializer)?;
        OptionalRangeUpdate::new(raw.min, raw.max).map_err(tagged)
    }
}

// ---------------------------------------------------------------------------
// Concrete aliases used by the record catalogue
// ---------------------------------------------------------------------------

pub type Float32Range = Range<f32>;
pub type Float32RangeWithOptionalMax = RangeWithOptionalMax<f32>;
pub type OptionalFloat32Range = OptionalRange<f32>;
pub type Float32RangeUpdate = RangeUpdate<f32>;
pub type Float32RangeWithOptionalMaxUpdate = RangeWithOptionalMaxUpdate<f32>;
pub type OptionalFloat32RangeUpdate = OptionalRangeUpdate<f32>;

pub type Uint16Range = Range<u16>;
pub type Uint16RangeWithOptionalMax = RangeWithOptionalMax<u16>;
pub type OptionalUint16Range = OptionalRange<u16>;
pub type Uint16RangeUpdate = RangeUpdate<u16>;
pub type Uint16RangeWithOptionalMaxUpdate = RangeWithOptionalMaxUpdate<u16>;
pub type OptionalUint16RangeUpdate = OptionalRangeUpdate<u16>;

pub type Uint32Range = Range<u32>;
pub type Uint32RangeWithOptionalMax = RangeWithOptionalMax<u32>;
pub type OptionalUint32Range = OptionalRange<u32>;
pub type Uint32RangeUpdate = RangeUpdate<u32>;
pub type Uint32RangeWithOptionalMaxUpdate = RangeWithOptionalMaxUpdate<u32>;
pub type OptionalUint32RangeUpdate = OptionalRangeUpdate<u32>;

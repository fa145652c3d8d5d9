use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::calendar::date_sequence;

/// Stable identifier of a location row, as assigned by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One row of the board: a field, bed or other place where work is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

impl Location {
    #[must_use]
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The entire domain available for display: dates along x, locations along y.
///
/// Dates are expected in increasing order and locations without duplicates;
/// the board does not sort or deduplicate either axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueRange {
    pub x: Vec<NaiveDate>,
    pub y: Vec<Location>,
}

impl ValueRange {
    #[must_use]
    pub fn new(x: Vec<NaiveDate>, y: Vec<Location>) -> Self {
        Self { x, y }
    }

    /// Range covering every day from `start` through `end`.
    #[must_use]
    pub fn from_season(start: NaiveDate, end: NaiveDate, locations: Vec<Location>) -> Self {
        Self::new(date_sequence(start, end), locations)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }
}

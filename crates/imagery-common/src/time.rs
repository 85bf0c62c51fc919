//! Observation date handling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ViewerError, ViewerResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date of the requested imagery (ISO 8601, no time component).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObservationDate(pub NaiveDate);

impl ObservationDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> ViewerResult<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| ViewerError::InvalidDate(s.to_string()))
    }

    /// Value used on the wire.
    pub fn as_param(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for ObservationDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl std::str::FromStr for ObservationDate {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

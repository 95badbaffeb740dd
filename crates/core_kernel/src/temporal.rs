//! Benefit validity windows
//!
//! Formulary overrides and similar plan rules are effective over a half-open
//! calendar-date interval `[effective, termination)`: the effective date is
//! covered, the termination date is not. An absent termination date means the
//! window is open-ended.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to validity windows
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid window: effective {effective} must be before termination {termination}")]
    InvalidWindow {
        effective: NaiveDate,
        termination: NaiveDate,
    },
}

/// A half-open validity window over calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageWindow {
    /// First covered date (inclusive)
    pub effective: NaiveDate,
    /// First uncovered date (exclusive); None means open-ended
    pub termination: Option<NaiveDate>,
}

impl CoverageWindow {
    /// Creates a new window, validating the bounds
    pub fn new(effective: NaiveDate, termination: Option<NaiveDate>) -> Result<Self, TemporalError> {
        if let Some(termination) = termination {
            if effective >= termination {
                return Err(TemporalError::InvalidWindow {
                    effective,
                    termination,
                });
            }
        }
        Ok(Self {
            effective,
            termination,
        })
    }

    /// Creates an open-ended window starting at the given date
    pub fn from(effective: NaiveDate) -> Self {
        Self {
            effective,
            termination: None,
        }
    }

    /// Creates a bounded window
    pub fn bounded(effective: NaiveDate, termination: NaiveDate) -> Result<Self, TemporalError> {
        Self::new(effective, Some(termination))
    }

    /// Returns true if this window contains the given date
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.effective && self.termination.map_or(true, |t| date < t)
    }

    /// Returns true if this window overlaps with another
    pub fn overlaps(&self, other: &CoverageWindow) -> bool {
        let self_end = self.termination.unwrap_or(NaiveDate::MAX);
        let other_end = other.termination.unwrap_or(NaiveDate::MAX);

        self.effective < other_end && other.effective < self_end
    }

    /// Returns true if the window has no termination date
    pub fn is_open_ended(&self) -> bool {
        self.termination.is_none()
    }
}

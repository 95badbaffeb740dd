//! Industry code value objects
//!
//! NPI and NDC codes arrive as strings on external feeds and are parsed once
//! at the edge; the rest of the system only ever sees validated values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing industry codes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("Invalid NPI: {0}")]
    InvalidNpi(String),

    #[error("Invalid NDC: {0}")]
    InvalidNdc(String),
}

/// National Provider Identifier: exactly 10 ASCII digits
///
/// Identifies both prescribers and pharmacies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Npi(String);

impl Npi {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Npi {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(CodeError::InvalidNpi(s.to_string()))
        }
    }
}

impl fmt::Display for Npi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Npi {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Npi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// National Drug Code in one of the dash-separated layouts 5-3-2, 5-4-1, 4-4-2
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ndc(String);

// Accepted (labeler, product, package) segment lengths.
const NDC_LAYOUTS: [(usize, usize, usize); 3] = [(5, 3, 2), (5, 4, 1), (4, 4, 2)];

impl Ndc {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ndc {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('-').collect();
        if segments.len() != 3 {
            return Err(CodeError::InvalidNdc(s.to_string()));
        }
        let all_digits = segments
            .iter()
            .all(|seg| !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit()));
        let layout = (segments[0].len(), segments[1].len(), segments[2].len());
        if all_digits && NDC_LAYOUTS.contains(&layout) {
            Ok(Self(s.to_string()))
        } else {
            Err(CodeError::InvalidNdc(s.to_string()))
        }
    }
}

impl fmt::Display for Ndc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Ndc {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Ndc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

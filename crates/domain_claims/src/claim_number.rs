//! Human-facing claim numbers
//!
//! Format: `CLM-<year>-<6 digits>`, the digits drawn uniformly from
//! `100000..=999999`. A claim number is a display identifier; the store
//! enforces uniqueness and the service regenerates on conflict.

use chrono::{Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClaimError;

const PREFIX: &str = "CLM";
const SUFFIX_MIN: u32 = 100_000;
const SUFFIX_MAX: u32 = 999_999;

/// A validated claim number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClaimNumber(String);

impl ClaimNumber {
    /// Draws a new claim number for the given year
    pub fn generate<R: Rng + ?Sized>(year: i32, rng: &mut R) -> Self {
        let suffix = rng.random_range(SUFFIX_MIN..=SUFFIX_MAX);
        Self(format!("{}-{:04}-{}", PREFIX, year, suffix))
    }

    /// Draws a new claim number for the current UTC year
    pub fn generate_now() -> Self {
        Self::generate(Utc::now().year(), &mut rand::rng())
    }

    /// Checks the `CLM-dddd-dddddd` shape
    pub fn is_well_formed(value: &str) -> bool {
        let mut parts = value.split('-');
        let (Some(prefix), Some(year), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        prefix == PREFIX
            && year.len() == 4
            && year.bytes().all(|b| b.is_ascii_digit())
            && suffix.len() == 6
            && suffix.bytes().all(|b| b.is_ascii_digit())
    }

    /// Year component
    pub fn year(&self) -> i32 {
        self.0[4..8].parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClaimNumber {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ClaimError::MalformedClaimNumber(s.to_string()))
        }
    }
}

impl TryFrom<String> for ClaimNumber {
    type Error = ClaimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_well_formed(&value) {
            Ok(Self(value))
        } else {
            Err(ClaimError::MalformedClaimNumber(value))
        }
    }
}

impl From<ClaimNumber> for String {
    fn from(number: ClaimNumber) -> String {
        number.0
    }
}

impl fmt::Display for ClaimNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_format() {
        let mut rng = StdRng::seed_from_u64(7);
        let number = ClaimNumber::generate(2026, &mut rng);
        assert!(number.as_str().starts_with("CLM-2026-"));
        assert!(ClaimNumber::is_well_formed(number.as_str()));
        assert_eq!(number.year(), 2026);
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["CLM-2026-12345", "CLM-26-123456", "CLM-2026-1234567", "ABC-2026-123456", "CLM-2026-12a456", "CLM-2026-123456-1", ""] {
            assert!(bad.parse::<ClaimNumber>().is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<ClaimNumber>("\"CLM-2026-100000\"").is_ok());
        assert!(serde_json::from_str::<ClaimNumber>("\"CLM-2026-99999\"").is_err());
    }
}

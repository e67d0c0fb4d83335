//! Basic types for the core report module

use serde::{Deserialize, Serialize};

use finsight_parser::INACTIVE_STATUS;

/// Record status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Record participates in the report
    Active,
    /// Record is excluded from the report
    Inactive,
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Active
    }
}

impl RecordStatus {
    /// Classify a raw status field. Only the exact sentinel marks a row
    /// inactive; any other value (codes, blanks) means active.
    pub fn from_field(s: &str) -> Self {
        if s == INACTIVE_STATUS {
            RecordStatus::Inactive
        } else {
            RecordStatus::Active
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStatus::Active => write!(f, "active"),
            RecordStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Contribution polarity of a line toward its parent aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    /// Adds to the parent aggregate (+1)
    Positive,
    /// Subtracts from the parent aggregate (-1)
    Negative,
}

impl Default for Weight {
    fn default() -> Self {
        Weight::Positive
    }
}

impl Weight {
    /// Classify a raw weight field; anything other than "-1" is positive
    pub fn from_field(s: &str) -> Self {
        match s.trim() {
            "-1" => Weight::Negative,
            _ => Weight::Positive,
        }
    }

    /// Get the sign multiplier
    pub fn sign(&self) -> i8 {
        match self {
            Weight::Positive => 1,
            Weight::Negative => -1,
        }
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weight::Positive => write!(f, "1"),
            Weight::Negative => write!(f, "-1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_sentinel_is_case_sensitive() {
        assert_eq!(RecordStatus::from_field("Inactive"), RecordStatus::Inactive);
        assert_eq!(RecordStatus::from_field("inactive"), RecordStatus::Active);
        assert_eq!(RecordStatus::from_field("INACTIVE"), RecordStatus::Active);
        assert_eq!(RecordStatus::from_field("0100"), RecordStatus::Active);
        assert_eq!(RecordStatus::from_field(""), RecordStatus::Active);
    }

    #[test]
    fn test_weight_fallback() {
        assert_eq!(Weight::from_field("-1").sign(), -1);
        assert_eq!(Weight::from_field("1").sign(), 1);
        assert_eq!(Weight::from_field("").sign(), 1);
        assert_eq!(Weight::from_field("2").sign(), 1);
    }
}

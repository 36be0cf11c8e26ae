//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Review status of a dealer application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted, awaiting review.
    #[default]
    Pending,
    /// Accepted as a dealer.
    Approved,
    /// Declined.
    Rejected,
}

impl ApplicationStatus {
    /// Whether the application still awaits a decision.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the lowercase label used in URLs and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid application status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
        assert!(ApplicationStatus::Pending.is_open());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&ApplicationStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        assert_eq!(
            "rejected".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Rejected
        );
        assert!("shipped".parse::<ApplicationStatus>().is_err());
    }
}

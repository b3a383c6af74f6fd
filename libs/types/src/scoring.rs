//! Severity and risk derivation functions
//!
//! These are the pure mapping functions behind every severity label and risk
//! figure the tracker surfaces. Severity and risk score are never stored as
//! independent truth: they are re-derived on every write that touches their
//! inputs, so a stale cached label can never disagree with the current score.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categorical severity of a finding, derived from its CVSS score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Informational,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Informational,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Informational => "Informational",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Informational" => Ok(Severity::Informational),
            "Low" => Ok(Severity::Low),
            "Medium" => Ok(Severity::Medium),
            "High" => Ok(Severity::High),
            "Critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Categorical risk level, derived from a risk rating or severity posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            "Critical" => Ok(RiskLevel::Critical),
            other => Err(format!("unknown risk level: {other}")),
        }
    }
}

/// Map a CVSS score to its severity band.
///
/// Evaluated high to low, first match wins; boundary values (0.1, 4.0, 7.0,
/// 9.0) land in the higher band. Total over all of `f64`: callers validate the
/// [0, 10] range before storing, but the mapping itself never fails.
pub fn severity_of(score: f64) -> Severity {
    if score >= 9.0 {
        Severity::Critical
    } else if score >= 7.0 {
        Severity::High
    } else if score >= 4.0 {
        Severity::Medium
    } else if score >= 0.1 {
        Severity::Low
    } else {
        Severity::Informational
    }
}

/// Numeric risk score of a finding: CVSS score scaled to [0, 100].
///
/// No rounding; display layers round for presentation only.
pub fn risk_score_of(score: f64) -> f64 {
    score * 10.0
}

/// Risk rating on the 5x5 matrix: likelihood x impact, range [1, 25].
///
/// Both inputs are captured fields validated to 1..=5 by the caller.
pub fn risk_rating_of(likelihood: u8, impact: u8) -> u8 {
    likelihood.saturating_mul(impact)
}

/// Map a risk rating to its categorical level.
pub fn risk_level_of(rating: u8) -> RiskLevel {
    if rating >= 20 {
        RiskLevel::Critical
    } else if rating >= 12 {
        RiskLevel::High
    } else if rating >= 6 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_severity_bands() {
        assert_eq!(severity_of(0.0), Severity::Informational);
        assert_eq!(severity_of(0.09), Severity::Informational);
        assert_eq!(severity_of(0.1), Severity::Low);
        assert_eq!(severity_of(3.9), Severity::Low);
        assert_eq!(severity_of(4.0), Severity::Medium);
        assert_eq!(severity_of(6.9), Severity::Medium);
        assert_eq!(severity_of(7.0), Severity::High);
        assert_eq!(severity_of(8.9), Severity::High);
        assert_eq!(severity_of(9.0), Severity::Critical);
        assert_eq!(severity_of(10.0), Severity::Critical);
    }

    #[test]
    fn test_risk_score_endpoints() {
        assert_eq!(risk_score_of(0.0), 0.0);
        assert_eq!(risk_score_of(10.0), 100.0);
        assert_eq!(risk_score_of(9.8), 98.0);
    }

    #[test]
    fn test_risk_level_breakpoints() {
        assert_eq!(risk_level_of(5), RiskLevel::Low);
        assert_eq!(risk_level_of(6), RiskLevel::Medium);
        assert_eq!(risk_level_of(11), RiskLevel::Medium);
        assert_eq!(risk_level_of(12), RiskLevel::High);
        assert_eq!(risk_level_of(19), RiskLevel::High);
        assert_eq!(risk_level_of(20), RiskLevel::Critical);
        assert_eq!(risk_level_of(25), RiskLevel::Critical);
    }

    #[test]
    fn test_risk_rating_matrix_corners() {
        assert_eq!(risk_rating_of(1, 1), 1);
        assert_eq!(risk_rating_of(5, 5), 25);
        assert_eq!(risk_rating_of(4, 4), 16);
    }

    #[test]
    fn test_severity_string_roundtrip() {
        for sev in Severity::ALL {
            assert_eq!(sev.as_str().parse::<Severity>().unwrap(), sev);
        }
    }

    proptest! {
        #[test]
        fn prop_severity_total_and_monotonic(a in 0.0f64..=10.0, b in 0.0f64..=10.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(severity_of(lo) <= severity_of(hi));
        }

        #[test]
        fn prop_risk_score_linear(s in 0.0f64..=10.0) {
            prop_assert_eq!(risk_score_of(s), s * 10.0);
        }

        #[test]
        fn prop_rating_in_matrix_range(l in 1u8..=5, i in 1u8..=5) {
            let rating = risk_rating_of(l, i);
            prop_assert!((1..=25).contains(&rating));
        }
    }
}

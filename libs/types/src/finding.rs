//! Vulnerability findings and lifecycle status

use crate::ids::{FindingId, UserId};
use crate::scoring::{risk_score_of, severity_of, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a finding or risk entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
    #[serde(rename = "Accepted Risk")]
    AcceptedRisk,
}

impl FindingStatus {
    pub const ALL: [FindingStatus; 4] = [
        FindingStatus::Open,
        FindingStatus::InProgress,
        FindingStatus::Closed,
        FindingStatus::AcceptedRisk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FindingStatus::Open => "Open",
            FindingStatus::InProgress => "In Progress",
            FindingStatus::Closed => "Closed",
            FindingStatus::AcceptedRisk => "Accepted Risk",
        }
    }
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FindingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(FindingStatus::Open),
            "In Progress" => Ok(FindingStatus::InProgress),
            "Closed" => Ok(FindingStatus::Closed),
            "Accepted Risk" => Ok(FindingStatus::AcceptedRisk),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A single recorded vulnerability instance, tied to one application.
///
/// `severity` and `risk_score` are derived from `cvss_score` on every write;
/// they are stored only as a read cache and are never accepted from callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: FindingId,
    /// External identifier, e.g. `FND-001`; unique across the tracker
    pub finding_id: String,
    /// External identifier of the owning application, e.g. `APP-001`
    pub app_id: String,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub cvss_score: f64,
    pub severity: Severity,
    pub owasp_category: String,
    pub mitre_attack: Option<String>,
    pub status: FindingStatus,
    pub assigned_to: Option<UserId>,
    /// ISO dates (`YYYY-MM-DD`)
    pub reported_date: Option<String>,
    pub due_date: Option<String>,
    pub remediation_steps: String,
    pub risk_score: f64,
}

impl Finding {
    /// Re-derive severity and risk score from the current CVSS score.
    ///
    /// Called on every score-affecting write so the cached columns can never
    /// go stale relative to the score.
    pub fn rescore(&mut self) {
        self.severity = severity_of(self.cvss_score);
        self.risk_score = risk_score_of(self.cvss_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(cvss: f64) -> Finding {
        let mut f = Finding {
            id: FindingId::new(),
            finding_id: "FND-100".into(),
            app_id: "APP-001".into(),
            title: "SQL Injection in Login".into(),
            description: "Login form allows SQLi".into(),
            impact: "Full DB access".into(),
            cvss_score: cvss,
            severity: Severity::Informational,
            owasp_category: "A03:2021-Injection".into(),
            mitre_attack: None,
            status: FindingStatus::Open,
            assigned_to: None,
            reported_date: None,
            due_date: Some("2024-12-31".into()),
            remediation_steps: "Use parameterized queries".into(),
            risk_score: 0.0,
        };
        f.rescore();
        f
    }

    #[test]
    fn test_rescore_derives_both_fields() {
        let f = sample(9.8);
        assert_eq!(f.severity, Severity::Critical);
        assert_eq!(f.risk_score, 98.0);
    }

    #[test]
    fn test_rescore_overwrites_stale_cache() {
        let mut f = sample(8.0);
        assert_eq!(f.severity, Severity::High);
        f.cvss_score = 3.0;
        f.rescore();
        assert_eq!(f.severity, Severity::Low);
        assert_eq!(f.risk_score, 30.0);
    }

    #[test]
    fn test_status_wire_strings() {
        let json = serde_json::to_string(&FindingStatus::AcceptedRisk).unwrap();
        assert_eq!(json, "\"Accepted Risk\"");
        assert_eq!("In Progress".parse::<FindingStatus>().unwrap(), FindingStatus::InProgress);
    }

    #[test]
    fn test_finding_serializes_camel_case() {
        let json = serde_json::to_value(sample(5.0)).unwrap();
        assert!(json.get("cvssScore").is_some());
        assert!(json.get("findingId").is_some());
        assert!(json.get("riskScore").is_some());
    }
}

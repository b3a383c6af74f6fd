//! Applications under assessment and their derived risk posture

use crate::finding::{Finding, FindingStatus};
use crate::ids::ApplicationId;
use crate::scoring::{RiskLevel, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployment environment of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    Prod,
    #[serde(rename = "UAT")]
    Uat,
    Dev,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Prod => "Prod",
            Environment::Uat => "UAT",
            Environment::Dev => "Dev",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Prod" => Ok(Environment::Prod),
            "UAT" => Ok(Environment::Uat),
            "Dev" => Ok(Environment::Dev),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// An asset under assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    /// External identifier, e.g. `APP-001`; unique across the tracker
    pub app_id: String,
    pub name: String,
    pub owner: String,
    pub environment: Environment,
    pub description: String,
}

/// Risk posture of an application, derived from its finding set.
///
/// Never stored: the finding set is the source of truth, and these figures
/// are recomputed on every read so they cannot drift from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPosture {
    pub critical_count: u32,
    pub high_count: u32,
    pub medium_count: u32,
    pub low_count: u32,
    pub risk_score: f64,
    pub overall_risk_level: RiskLevel,
}

impl ApplicationPosture {
    /// Derive the posture from the application's findings.
    ///
    /// Closed findings do not count against the posture. Informational
    /// findings carry no counter. The overall level follows the worst open
    /// severity and the risk score is the worst open finding's risk score.
    pub fn derive<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut posture = ApplicationPosture {
            critical_count: 0,
            high_count: 0,
            medium_count: 0,
            low_count: 0,
            risk_score: 0.0,
            overall_risk_level: RiskLevel::Low,
        };
        let mut worst = None;

        for finding in findings {
            if finding.status == FindingStatus::Closed {
                continue;
            }
            match finding.severity {
                Severity::Critical => posture.critical_count += 1,
                Severity::High => posture.high_count += 1,
                Severity::Medium => posture.medium_count += 1,
                Severity::Low => posture.low_count += 1,
                Severity::Informational => {}
            }
            if finding.risk_score > posture.risk_score {
                posture.risk_score = finding.risk_score;
            }
            if worst.map_or(true, |w| finding.severity > w) {
                worst = Some(finding.severity);
            }
        }

        posture.overall_risk_level = match worst {
            Some(Severity::Critical) => RiskLevel::Critical,
            Some(Severity::High) => RiskLevel::High,
            Some(Severity::Medium) => RiskLevel::Medium,
            _ => RiskLevel::Low,
        };
        posture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::FindingId;
    use crate::scoring::{risk_score_of, severity_of};

    fn finding(cvss: f64, status: FindingStatus) -> Finding {
        Finding {
            id: FindingId::new(),
            finding_id: format!("FND-{}", FindingId::new()),
            app_id: "APP-001".into(),
            title: "t".into(),
            description: String::new(),
            impact: String::new(),
            cvss_score: cvss,
            severity: severity_of(cvss),
            owasp_category: String::new(),
            mitre_attack: None,
            status,
            assigned_to: None,
            reported_date: None,
            due_date: None,
            remediation_steps: String::new(),
            risk_score: risk_score_of(cvss),
        }
    }

    #[test]
    fn test_posture_counts_open_findings() {
        let findings = [
            finding(9.8, FindingStatus::Open),
            finding(7.5, FindingStatus::InProgress),
            finding(5.0, FindingStatus::Open),
            finding(2.0, FindingStatus::AcceptedRisk),
        ];
        let posture = ApplicationPosture::derive(&findings);
        assert_eq!(posture.critical_count, 1);
        assert_eq!(posture.high_count, 1);
        assert_eq!(posture.medium_count, 1);
        assert_eq!(posture.low_count, 1);
        assert_eq!(posture.risk_score, 98.0);
        assert_eq!(posture.overall_risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_closed_findings_drop_out() {
        let findings = [
            finding(9.8, FindingStatus::Closed),
            finding(5.0, FindingStatus::Open),
        ];
        let posture = ApplicationPosture::derive(&findings);
        assert_eq!(posture.critical_count, 0);
        assert_eq!(posture.medium_count, 1);
        assert_eq!(posture.overall_risk_level, RiskLevel::Medium);
        assert_eq!(posture.risk_score, 50.0);
    }

    #[test]
    fn test_empty_finding_set_is_low() {
        let posture = ApplicationPosture::derive([]);
        assert_eq!(posture.overall_risk_level, RiskLevel::Low);
        assert_eq!(posture.risk_score, 0.0);
    }
}

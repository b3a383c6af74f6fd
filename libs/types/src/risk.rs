//! Risk register entries
//!
//! Strategic, business-facing risk assessments, optionally tied to a
//! finding. Rating and level are derived from the captured likelihood and
//! impact on every write, never accepted from the caller.

use crate::finding::FindingStatus;
use crate::ids::RiskId;
use crate::scoring::{risk_level_of, risk_rating_of, RiskLevel};
use serde::{Deserialize, Serialize};

/// A risk register entry on the 5x5 likelihood/impact matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEntry {
    pub id: RiskId,
    /// External identifier, e.g. `RSK-001`; unique across the tracker
    pub risk_id: String,
    /// External identifier of the related finding, if any
    pub related_finding_id: Option<String>,
    pub business_impact: String,
    /// Likelihood of occurrence, 1..=5
    pub likelihood: u8,
    /// Business impact magnitude, 1..=5
    pub impact: u8,
    /// Derived: likelihood x impact
    pub risk_rating: u8,
    /// Derived from the rating breakpoints
    pub risk_level: RiskLevel,
    pub risk_owner: String,
    pub mitigation_plan: String,
    pub status: FindingStatus,
    /// ISO date (`YYYY-MM-DD`)
    pub target_closure_date: Option<String>,
}

impl RiskEntry {
    /// Re-derive rating and level from the current likelihood and impact
    pub fn rescore(&mut self) {
        self.risk_rating = risk_rating_of(self.likelihood, self.impact);
        self.risk_level = risk_level_of(self.risk_rating);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescore_uses_product_form() {
        let mut entry = RiskEntry {
            id: RiskId::new(),
            risk_id: "RSK-001".into(),
            related_finding_id: Some("FND-001".into()),
            business_impact: "Potential data breach".into(),
            likelihood: 4,
            impact: 4,
            risk_rating: 0,
            risk_level: RiskLevel::Low,
            risk_owner: "CTO".into(),
            mitigation_plan: "WAF and parameterized queries".into(),
            status: FindingStatus::Open,
            target_closure_date: Some("2024-12-31".into()),
        };
        entry.rescore();
        assert_eq!(entry.risk_rating, 16);
        assert_eq!(entry.risk_level, RiskLevel::High);

        entry.likelihood = 5;
        entry.impact = 5;
        entry.rescore();
        assert_eq!(entry.risk_rating, 25);
        assert_eq!(entry.risk_level, RiskLevel::Critical);
    }
}

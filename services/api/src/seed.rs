//! First-run sample data
//!
//! Seeds the default admin plus a small demo data set when the user table is
//! empty, so a fresh install is immediately explorable. Severity, risk score,
//! rating, and level are all derived through the scoring functions, never
//! hard-coded.

use crate::auth::hash_password;
use crate::store::Store;
use types::application::{Application, Environment};
use types::finding::{Finding, FindingStatus};
use types::ids::{ApplicationId, FindingId, RiskId, UserId};
use types::risk::RiskEntry;
use types::role::Role;
use types::scoring::{RiskLevel, Severity};
use types::user::User;

pub async fn seed_if_empty(store: &dyn Store) -> Result<(), anyhow::Error> {
    if store.count_users().await? > 0 {
        return Ok(());
    }
    tracing::info!("empty user table; seeding sample data");

    let accounts = [
        ("System Admin", "admin@sentinel.com", "admin123", Role::Admin),
        (
            "Security Analyst",
            "analyst@sentinel.com",
            "analyst123",
            Role::SecurityAnalyst,
        ),
        ("App Developer", "dev@sentinel.com", "dev123", Role::Developer),
        ("App Owner", "owner@sentinel.com", "owner123", Role::AppOwner),
    ];
    for (name, email, password, role) in accounts {
        store
            .create_user(&User {
                id: UserId::new(),
                name: name.into(),
                email: email.into(),
                password_hash: hash_password(password)?,
                role,
            })
            .await?;
    }

    let applications = [
        ("APP-001", "Banking Portal", "John Doe", Environment::Prod, "Main customer facing banking application"),
        ("APP-002", "HRMS", "Jane Smith", Environment::Uat, "Human Resource Management System"),
        ("APP-003", "ERP System", "Robert Brown", Environment::Prod, "Enterprise Resource Planning"),
        ("APP-004", "Mobile Banking API", "Alice White", Environment::Prod, "REST API for mobile banking app"),
        ("APP-005", "E-commerce Portal", "Charlie Green", Environment::Dev, "Customer shopping portal"),
    ];
    for (app_id, name, owner, environment, description) in applications {
        store
            .create_application(&Application {
                id: ApplicationId::new(),
                app_id: app_id.into(),
                name: name.into(),
                owner: owner.into(),
                environment,
                description: description.into(),
            })
            .await?;
    }

    let findings = [
        ("FND-001", "APP-001", "SQL Injection in Login", "Vulnerability in login form allows SQLi", "Full DB access", 9.8, "A03:2021-Injection", FindingStatus::Open, "2024-12-31", "Use parameterized queries"),
        ("FND-002", "APP-001", "Broken Authentication", "Session tokens are predictable", "Account takeover", 8.1, "A01:2021-Broken Access Control", FindingStatus::InProgress, "2024-12-15", "Use cryptographically secure random tokens"),
        ("FND-003", "APP-004", "Insecure API Endpoint", "Sensitive data exposed in API", "Data leak", 7.5, "A02:2021-Cryptographic Failures", FindingStatus::Open, "2024-12-20", "Implement proper authorization checks"),
        ("FND-004", "APP-002", "Cross-Site Scripting (XSS)", "Reflected XSS in search bar", "Session hijacking", 6.1, "A03:2021-Injection", FindingStatus::Closed, "2024-11-30", "Sanitize user input"),
        ("FND-005", "APP-005", "Insecure Direct Object Reference", "Access other user profiles", "Unauthorized access", 5.3, "A01:2021-Broken Access Control", FindingStatus::Open, "2025-01-10", "Validate user ownership of objects"),
    ];
    for (finding_id, app_id, title, description, impact, cvss, owasp, status, due, remediation) in
        findings
    {
        let mut finding = Finding {
            id: FindingId::new(),
            finding_id: finding_id.into(),
            app_id: app_id.into(),
            title: title.into(),
            description: description.into(),
            impact: impact.into(),
            cvss_score: cvss,
            severity: Severity::Informational,
            owasp_category: owasp.into(),
            mitre_attack: None,
            status,
            assigned_to: None,
            reported_date: None,
            due_date: Some(due.into()),
            remediation_steps: remediation.into(),
            risk_score: 0.0,
        };
        finding.rescore();
        store.create_finding(&finding).await?;
    }

    let risks = [
        ("RSK-001", "FND-001", "High business impact due to potential data breach", 4, 4, "CTO", "Implement WAF and parameterized queries", FindingStatus::Open, "2024-12-31"),
        ("RSK-002", "FND-003", "Exposure of customer PII via API", 3, 4, "Security Lead", "Apply OAuth2 and rate limiting", FindingStatus::InProgress, "2024-12-20"),
        ("RSK-003", "FND-005", "Unauthorized access to user profiles", 2, 3, "App Owner", "Implement object-level authorization", FindingStatus::Open, "2025-01-10"),
    ];
    for (risk_id, related, business_impact, likelihood, impact, owner, plan, status, target) in
        risks
    {
        let mut risk = RiskEntry {
            id: RiskId::new(),
            risk_id: risk_id.into(),
            related_finding_id: Some(related.into()),
            business_impact: business_impact.into(),
            likelihood,
            impact,
            risk_rating: 0,
            risk_level: RiskLevel::Low,
            risk_owner: owner.into(),
            mitigation_plan: plan.into(),
            status,
            target_closure_date: Some(target.into()),
        };
        risk.rescore();
        store.create_risk(&risk).await?;
    }

    tracing::info!("seeded 4 users, 5 applications, 5 findings, 3 risks");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_seed_populates_and_is_idempotent() {
        let store = MemoryStore::new();
        seed_if_empty(&store).await.unwrap();

        assert_eq!(store.count_users().await.unwrap(), 4);
        assert_eq!(store.list_applications().await.unwrap().len(), 5);
        assert_eq!(store.list_findings().await.unwrap().len(), 5);
        assert_eq!(store.list_risks().await.unwrap().len(), 3);

        // Second run is a no-op
        seed_if_empty(&store).await.unwrap();
        assert_eq!(store.count_users().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_seeded_findings_carry_derived_scores() {
        let store = MemoryStore::new();
        seed_if_empty(&store).await.unwrap();

        let records = store.list_findings().await.unwrap();
        let sqli = records
            .iter()
            .find(|r| r.finding.finding_id == "FND-001")
            .unwrap();
        assert_eq!(sqli.finding.severity, Severity::Critical);
        assert_eq!(sqli.finding.risk_score, 98.0);
    }
}

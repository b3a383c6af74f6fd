//! In-memory store over concurrent maps
//!
//! Mirrors the SQLite implementation's contracts exactly, so handler tests
//! exercise the same conflict, not-found, and cascade behavior without a
//! database file.

use super::{FindingRecord, Store};
use async_trait::async_trait;
use dashmap::DashMap;
use types::application::Application;
use types::errors::DomainError;
use types::evidence::{Comment, Evidence};
use types::finding::Finding;
use types::ids::{ApplicationId, CommentId, EvidenceId, FindingId, RiskId, UserId};
use types::risk::RiskEntry;
use types::user::User;

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<UserId, User>,
    applications: DashMap<ApplicationId, Application>,
    findings: DashMap<FindingId, Finding>,
    risks: DashMap<RiskId, RiskEntry>,
    evidence: DashMap<EvidenceId, Evidence>,
    comments: DashMap<CommentId, Comment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn application_exists(&self, app_id: &str) -> bool {
        self.applications.iter().any(|a| a.app_id == app_id)
    }

    fn finding_by_ext(&self, finding_id: &str) -> bool {
        self.findings.iter().any(|f| f.finding_id == finding_id)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<(), DomainError> {
        if self.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("user", &user.email));
        }
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by_key(|u| *u.id.as_uuid());
        Ok(users)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn count_users(&self) -> Result<u64, DomainError> {
        Ok(self.users.len() as u64)
    }

    async fn create_application(&self, app: &Application) -> Result<(), DomainError> {
        if self.application_exists(&app.app_id) {
            return Err(DomainError::conflict("application", &app.app_id));
        }
        self.applications.insert(app.id, app.clone());
        Ok(())
    }

    async fn list_applications(&self) -> Result<Vec<Application>, DomainError> {
        let mut apps: Vec<Application> = self.applications.iter().map(|a| a.value().clone()).collect();
        apps.sort_by(|a, b| a.app_id.cmp(&b.app_id));
        Ok(apps)
    }

    async fn get_application(&self, id: ApplicationId) -> Result<Option<Application>, DomainError> {
        Ok(self.applications.get(&id).map(|a| a.value().clone()))
    }

    async fn update_application(&self, app: &Application) -> Result<(), DomainError> {
        match self.applications.get_mut(&app.id) {
            Some(mut existing) => {
                *existing = app.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("application", app.id)),
        }
    }

    async fn delete_application(&self, id: ApplicationId) -> Result<(), DomainError> {
        let app_id = match self.applications.get(&id) {
            Some(app) => app.app_id.clone(),
            None => return Err(DomainError::not_found("application", id)),
        };
        if self.findings.iter().any(|f| f.app_id == app_id) {
            return Err(DomainError::Referenced {
                entity: "application",
                referenced_by: "findings",
            });
        }
        self.applications.remove(&id);
        Ok(())
    }

    async fn create_finding(&self, finding: &Finding) -> Result<(), DomainError> {
        if self.finding_by_ext(&finding.finding_id) {
            return Err(DomainError::conflict("finding", &finding.finding_id));
        }
        if !self.application_exists(&finding.app_id) {
            return Err(DomainError::not_found("application", &finding.app_id));
        }
        self.findings.insert(finding.id, finding.clone());
        Ok(())
    }

    async fn list_findings(&self) -> Result<Vec<FindingRecord>, DomainError> {
        let mut records: Vec<FindingRecord> = self
            .findings
            .iter()
            .map(|f| {
                let app_name = self
                    .applications
                    .iter()
                    .find(|a| a.app_id == f.app_id)
                    .map(|a| a.name.clone())
                    .unwrap_or_default();
                FindingRecord {
                    finding: f.clone(),
                    app_name,
                }
            })
            .collect();
        records.sort_by_key(|r| *r.finding.id.as_uuid());
        Ok(records)
    }

    async fn get_finding(&self, id: FindingId) -> Result<Option<Finding>, DomainError> {
        Ok(self.findings.get(&id).map(|f| f.value().clone()))
    }

    async fn update_finding(&self, finding: &Finding) -> Result<(), DomainError> {
        match self.findings.get_mut(&finding.id) {
            Some(mut existing) => {
                *existing = finding.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("finding", finding.id)),
        }
    }

    async fn delete_finding(&self, id: FindingId) -> Result<Vec<String>, DomainError> {
        if self.findings.remove(&id).is_none() {
            return Err(DomainError::not_found("finding", id));
        }
        let orphaned: Vec<EvidenceId> = self
            .evidence
            .iter()
            .filter(|e| e.finding_id == id)
            .map(|e| e.id)
            .collect();
        let mut paths = Vec::new();
        for evidence_id in orphaned {
            if let Some((_, e)) = self.evidence.remove(&evidence_id) {
                paths.push(e.file_path);
            }
        }
        self.comments.retain(|_, c| c.finding_id != id);
        Ok(paths)
    }

    async fn create_risk(&self, risk: &RiskEntry) -> Result<(), DomainError> {
        if self.risks.iter().any(|r| r.risk_id == risk.risk_id) {
            return Err(DomainError::conflict("risk", &risk.risk_id));
        }
        if let Some(related) = &risk.related_finding_id {
            if !self.finding_by_ext(related) {
                return Err(DomainError::not_found("finding", related));
            }
        }
        self.risks.insert(risk.id, risk.clone());
        Ok(())
    }

    async fn list_risks(&self) -> Result<Vec<RiskEntry>, DomainError> {
        let mut risks: Vec<RiskEntry> = self.risks.iter().map(|r| r.value().clone()).collect();
        risks.sort_by(|a, b| a.risk_id.cmp(&b.risk_id));
        Ok(risks)
    }

    async fn get_risk(&self, id: RiskId) -> Result<Option<RiskEntry>, DomainError> {
        Ok(self.risks.get(&id).map(|r| r.value().clone()))
    }

    async fn update_risk(&self, risk: &RiskEntry) -> Result<(), DomainError> {
        match self.risks.get_mut(&risk.id) {
            Some(mut existing) => {
                *existing = risk.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("risk", risk.id)),
        }
    }

    async fn delete_risk(&self, id: RiskId) -> Result<(), DomainError> {
        match self.risks.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("risk", id)),
        }
    }

    async fn add_evidence(&self, evidence: &Evidence) -> Result<(), DomainError> {
        if !self.findings.contains_key(&evidence.finding_id) {
            return Err(DomainError::not_found("finding", evidence.finding_id));
        }
        self.evidence.insert(evidence.id, evidence.clone());
        Ok(())
    }

    async fn evidence_for_finding(
        &self,
        finding: FindingId,
    ) -> Result<Vec<Evidence>, DomainError> {
        let mut items: Vec<Evidence> = self
            .evidence
            .iter()
            .filter(|e| e.finding_id == finding)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by_key(|e| e.uploaded_at);
        Ok(items)
    }

    async fn get_evidence(&self, id: EvidenceId) -> Result<Option<Evidence>, DomainError> {
        Ok(self.evidence.get(&id).map(|e| e.value().clone()))
    }

    async fn delete_evidence(&self, id: EvidenceId) -> Result<(), DomainError> {
        match self.evidence.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("evidence", id)),
        }
    }

    async fn add_comment(&self, comment: &Comment) -> Result<(), DomainError> {
        if !self.findings.contains_key(&comment.finding_id) {
            return Err(DomainError::not_found("finding", comment.finding_id));
        }
        self.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn comments_for_finding(
        &self,
        finding: FindingId,
    ) -> Result<Vec<Comment>, DomainError> {
        let mut items: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.finding_id == finding)
            .map(|c| c.value().clone())
            .collect();
        items.sort_by_key(|c| c.created_at);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::application::Environment;
    use types::finding::FindingStatus;
    use types::role::Role;
    use types::scoring::{risk_score_of, severity_of};

    fn app(app_id: &str) -> Application {
        Application {
            id: ApplicationId::new(),
            app_id: app_id.into(),
            name: "Banking Portal".into(),
            owner: "John Doe".into(),
            environment: Environment::Prod,
            description: String::new(),
        }
    }

    fn finding(finding_id: &str, app_id: &str, cvss: f64) -> Finding {
        Finding {
            id: FindingId::new(),
            finding_id: finding_id.into(),
            app_id: app_id.into(),
            title: "t".into(),
            description: String::new(),
            impact: String::new(),
            cvss_score: cvss,
            severity: severity_of(cvss),
            owasp_category: String::new(),
            mitre_attack: None,
            status: FindingStatus::Open,
            assigned_to: None,
            reported_date: None,
            due_date: None,
            remediation_steps: String::new(),
            risk_score: risk_score_of(cvss),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let mut user = User {
            id: UserId::new(),
            name: "A".into(),
            email: "a@sentinel.com".into(),
            password_hash: "h".into(),
            role: Role::Viewer,
        };
        store.create_user(&user).await.unwrap();
        user.id = UserId::new();
        assert!(matches!(
            store.create_user(&user).await,
            Err(DomainError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_application_rejected_while_referenced() {
        let store = MemoryStore::new();
        let a = app("APP-001");
        store.create_application(&a).await.unwrap();
        store
            .create_finding(&finding("FND-001", "APP-001", 5.0))
            .await
            .unwrap();

        assert!(matches!(
            store.delete_application(a.id).await,
            Err(DomainError::Referenced { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_finding_cascades_and_returns_paths() {
        let store = MemoryStore::new();
        store.create_application(&app("APP-001")).await.unwrap();
        let f = finding("FND-001", "APP-001", 7.0);
        store.create_finding(&f).await.unwrap();
        store
            .add_evidence(&Evidence {
                id: EvidenceId::new(),
                finding_id: f.id,
                file_name: "poc.txt".into(),
                file_path: "/uploads/1-poc.txt".into(),
                uploaded_at: chrono::Utc::now(),
            })
            .await
            .unwrap();

        let paths = store.delete_finding(f.id).await.unwrap();
        assert_eq!(paths, vec!["/uploads/1-poc.txt".to_string()]);
        assert!(store.evidence_for_finding(f.id).await.unwrap().is_empty());
    }
}

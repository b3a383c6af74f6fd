//! Evidence upload flow, driven through the full router.
//!
//! Upload is the one path where the file store and the record store must act
//! as a unit: a stored file without a record (or the reverse) is an orphan.
//! These tests cover the happy path and the rollback when the record insert
//! fails after the file has been written.

use api::auth::AuthKeys;
use api::files::FileStore;
use api::router::create_router;
use api::state::AppState;
use api::store::{FindingRecord, MemoryStore, Store};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use types::application::{Application, Environment};
use types::errors::DomainError;
use types::evidence::{Comment, Evidence};
use types::finding::{Finding, FindingStatus};
use types::ids::{ApplicationId, EvidenceId, FindingId, RiskId, UserId};
use types::risk::RiskEntry;
use types::role::Role;
use types::scoring::{risk_score_of, severity_of};
use types::user::User;

const BOUNDARY: &str = "evidence-test-boundary";

/// Delegates to the inner store but fails every evidence insert, standing in
/// for a database error that hits after the file has been written
struct EvidenceInsertFailure {
    inner: MemoryStore,
}

#[async_trait]
impl Store for EvidenceInsertFailure {
    async fn add_evidence(&self, _evidence: &Evidence) -> Result<(), DomainError> {
        Err(DomainError::Storage("evidence insert failed".into()))
    }

    async fn create_user(&self, user: &User) -> Result<(), DomainError> {
        self.inner.create_user(user).await
    }
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.inner.list_users().await
    }
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.inner.find_user_by_email(email).await
    }
    async fn count_users(&self) -> Result<u64, DomainError> {
        self.inner.count_users().await
    }
    async fn create_application(&self, app: &Application) -> Result<(), DomainError> {
        self.inner.create_application(app).await
    }
    async fn list_applications(&self) -> Result<Vec<Application>, DomainError> {
        self.inner.list_applications().await
    }
    async fn get_application(&self, id: ApplicationId) -> Result<Option<Application>, DomainError> {
        self.inner.get_application(id).await
    }
    async fn update_application(&self, app: &Application) -> Result<(), DomainError> {
        self.inner.update_application(app).await
    }
    async fn delete_application(&self, id: ApplicationId) -> Result<(), DomainError> {
        self.inner.delete_application(id).await
    }
    async fn create_finding(&self, finding: &Finding) -> Result<(), DomainError> {
        self.inner.create_finding(finding).await
    }
    async fn list_findings(&self) -> Result<Vec<FindingRecord>, DomainError> {
        self.inner.list_findings().await
    }
    async fn get_finding(&self, id: FindingId) -> Result<Option<Finding>, DomainError> {
        self.inner.get_finding(id).await
    }
    async fn update_finding(&self, finding: &Finding) -> Result<(), DomainError> {
        self.inner.update_finding(finding).await
    }
    async fn delete_finding(&self, id: FindingId) -> Result<Vec<String>, DomainError> {
        self.inner.delete_finding(id).await
    }
    async fn create_risk(&self, risk: &RiskEntry) -> Result<(), DomainError> {
        self.inner.create_risk(risk).await
    }
    async fn list_risks(&self) -> Result<Vec<RiskEntry>, DomainError> {
        self.inner.list_risks().await
    }
    async fn get_risk(&self, id: RiskId) -> Result<Option<RiskEntry>, DomainError> {
        self.inner.get_risk(id).await
    }
    async fn update_risk(&self, risk: &RiskEntry) -> Result<(), DomainError> {
        self.inner.update_risk(risk).await
    }
    async fn delete_risk(&self, id: RiskId) -> Result<(), DomainError> {
        self.inner.delete_risk(id).await
    }
    async fn evidence_for_finding(
        &self,
        finding: FindingId,
    ) -> Result<Vec<Evidence>, DomainError> {
        self.inner.evidence_for_finding(finding).await
    }
    async fn get_evidence(&self, id: EvidenceId) -> Result<Option<Evidence>, DomainError> {
        self.inner.get_evidence(id).await
    }
    async fn delete_evidence(&self, id: EvidenceId) -> Result<(), DomainError> {
        self.inner.delete_evidence(id).await
    }
    async fn add_comment(&self, comment: &Comment) -> Result<(), DomainError> {
        self.inner.add_comment(comment).await
    }
    async fn comments_for_finding(
        &self,
        finding: FindingId,
    ) -> Result<Vec<Comment>, DomainError> {
        self.inner.comments_for_finding(finding).await
    }
}

async fn upload_state(store: Arc<dyn Store>) -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let files = FileStore::new(dir.path());
    files.ensure_root().await.unwrap();
    let state = AppState::new(store, files, AuthKeys::new("test-secret"));
    (state, dir)
}

async fn fixture_finding(store: &dyn Store) -> Finding {
    store
        .create_application(&Application {
            id: ApplicationId::new(),
            app_id: "APP-001".into(),
            name: "Banking Portal".into(),
            owner: "John Doe".into(),
            environment: Environment::Prod,
            description: String::new(),
        })
        .await
        .unwrap();
    let finding = Finding {
        id: FindingId::new(),
        finding_id: "FND-001".into(),
        app_id: "APP-001".into(),
        title: "SQL Injection in Login".into(),
        description: String::new(),
        impact: String::new(),
        cvss_score: 9.8,
        severity: severity_of(9.8),
        owasp_category: String::new(),
        mitre_attack: None,
        status: FindingStatus::Open,
        assigned_to: None,
        reported_date: None,
        due_date: None,
        remediation_steps: String::new(),
        risk_score: risk_score_of(9.8),
    };
    store.create_finding(&finding).await.unwrap();
    finding
}

fn token_for(state: &AppState, role: Role) -> String {
    let account = User {
        id: UserId::new(),
        name: role.as_str().into(),
        email: "uploader@sentinel.com".into(),
        password_hash: String::new(),
        role,
    };
    state.keys.issue(&account).unwrap()
}

fn upload_request(finding: FindingId, token: &str) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"evidence\"; \
             filename=\"poc.txt\"\r\nContent-Type: text/plain\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"proof of concept");
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(format!("/api/findings/{finding}/upload"))
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn files_on_disk(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

#[tokio::test]
async fn test_upload_stores_file_and_record_together() {
    let store = Arc::new(MemoryStore::new());
    let finding = fixture_finding(store.as_ref()).await;
    let (state, dir) = upload_state(store.clone()).await;
    let token = token_for(&state, Role::SecurityAnalyst);

    let response = create_router(state.clone())
        .oneshot(upload_request(finding.id, &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["fileName"], "poc.txt");
    let public_path = json["filePath"].as_str().unwrap();
    assert!(public_path.starts_with("/uploads/"));

    assert_eq!(files_on_disk(&dir), 1);
    assert!(state.files.exists(public_path).await);
    let records = store.evidence_for_finding(finding.id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file_path, public_path);
}

#[tokio::test]
async fn test_failed_record_insert_rolls_back_the_file() {
    let inner = MemoryStore::new();
    let finding = fixture_finding(&inner).await;
    let store = Arc::new(EvidenceInsertFailure { inner });
    let (state, dir) = upload_state(store.clone()).await;
    let token = token_for(&state, Role::SecurityAnalyst);

    let response = create_router(state)
        .oneshot(upload_request(finding.id, &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // No orphan artifact and no record
    assert_eq!(files_on_disk(&dir), 0);
    assert!(store
        .evidence_for_finding(finding.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_upload_denied_without_privilege_writes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let finding = fixture_finding(store.as_ref()).await;
    let (state, dir) = upload_state(store).await;
    let token = token_for(&state, Role::Developer);

    let response = create_router(state)
        .oneshot(upload_request(finding.id, &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(files_on_disk(&dir), 0);
}

#[tokio::test]
async fn test_upload_to_unknown_finding_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let (state, dir) = upload_state(store).await;
    let token = token_for(&state, Role::Admin);

    let response = create_router(state)
        .oneshot(upload_request(FindingId::new(), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(files_on_disk(&dir), 0);
}

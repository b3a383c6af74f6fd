//! SQLite-backed store
//!
//! Single connection behind a mutex; every trait method is one statement or
//! one transaction, so a failed call leaves no partial state. External
//! identifier uniqueness is checked up front under the same lock, which
//! turns constraint violations into precise `Conflict` messages instead of
//! raw database errors.

use super::{FindingRecord, Store};
use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use types::application::Application;
use types::errors::DomainError;
use types::evidence::{Comment, Evidence};
use types::finding::Finding;
use types::ids::{ApplicationId, EvidenceId, FindingId, RiskId};
use types::risk::RiskEntry;
use types::user::User;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'Viewer'
);

CREATE TABLE IF NOT EXISTS applications (
    id TEXT PRIMARY KEY,
    app_id TEXT UNIQUE NOT NULL,
    name TEXT NOT NULL,
    owner TEXT NOT NULL,
    environment TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS findings (
    id TEXT PRIMARY KEY,
    finding_id TEXT UNIQUE NOT NULL,
    app_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    impact TEXT NOT NULL DEFAULT '',
    cvss_score REAL NOT NULL,
    severity TEXT NOT NULL,
    owasp_category TEXT NOT NULL DEFAULT '',
    mitre_attack TEXT,
    status TEXT NOT NULL DEFAULT 'Open',
    assigned_to TEXT,
    reported_date TEXT,
    due_date TEXT,
    remediation_steps TEXT NOT NULL DEFAULT '',
    risk_score REAL NOT NULL,
    FOREIGN KEY (app_id) REFERENCES applications(app_id)
);

CREATE TABLE IF NOT EXISTS risk_register (
    id TEXT PRIMARY KEY,
    risk_id TEXT UNIQUE NOT NULL,
    related_finding_id TEXT,
    business_impact TEXT NOT NULL DEFAULT '',
    likelihood INTEGER NOT NULL,
    impact INTEGER NOT NULL,
    risk_rating INTEGER NOT NULL,
    risk_level TEXT NOT NULL,
    risk_owner TEXT NOT NULL DEFAULT '',
    mitigation_plan TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL,
    target_closure_date TEXT
);

CREATE TABLE IF NOT EXISTS evidence (
    id TEXT PRIMARY KEY,
    finding_id TEXT NOT NULL,
    file_name TEXT NOT NULL,
    file_path TEXT NOT NULL,
    uploaded_at TEXT NOT NULL,
    FOREIGN KEY (finding_id) REFERENCES findings(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS comments (
    id TEXT PRIMARY KEY,
    finding_id TEXT NOT NULL,
    author_id TEXT NOT NULL,
    author_name TEXT NOT NULL,
    body TEXT NOT NULL,
    attachment_path TEXT,
    attachment_type TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (finding_id) REFERENCES findings(id) ON DELETE CASCADE
);
";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::from_connection(Connection::open(path).map_err(storage)?)
    }

    /// Private throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self, DomainError> {
        Self::from_connection(Connection::open_in_memory().map_err(storage)?)
    }

    fn from_connection(conn: Connection) -> Result<Self, DomainError> {
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(storage)?;
        conn.execute_batch(SCHEMA).map_err(storage)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|_| DomainError::Storage("connection mutex poisoned".into()))
    }
}

fn storage(e: rusqlite::Error) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Parse a TEXT column through `FromStr`, reporting the column on failure
fn parse_col<T>(idx: usize, value: String) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.to_string().into())
    })
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: parse_col(0, row.get::<_, String>(0)?)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        role: parse_col(4, row.get::<_, String>(4)?)?,
    })
}

fn application_from_row(row: &Row<'_>) -> rusqlite::Result<Application> {
    Ok(Application {
        id: parse_col(0, row.get::<_, String>(0)?)?,
        app_id: row.get(1)?,
        name: row.get(2)?,
        owner: row.get(3)?,
        environment: parse_col(4, row.get::<_, String>(4)?)?,
        description: row.get(5)?,
    })
}

fn finding_from_row(row: &Row<'_>) -> rusqlite::Result<Finding> {
    let assigned_to = match row.get::<_, Option<String>>(11)? {
        Some(raw) => Some(parse_col(11, raw)?),
        None => None,
    };
    Ok(Finding {
        id: parse_col(0, row.get::<_, String>(0)?)?,
        finding_id: row.get(1)?,
        app_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        impact: row.get(5)?,
        cvss_score: row.get(6)?,
        severity: parse_col(7, row.get::<_, String>(7)?)?,
        owasp_category: row.get(8)?,
        mitre_attack: row.get(9)?,
        status: parse_col(10, row.get::<_, String>(10)?)?,
        assigned_to,
        reported_date: row.get(12)?,
        due_date: row.get(13)?,
        remediation_steps: row.get(14)?,
        risk_score: row.get(15)?,
    })
}

fn risk_from_row(row: &Row<'_>) -> rusqlite::Result<RiskEntry> {
    Ok(RiskEntry {
        id: parse_col(0, row.get::<_, String>(0)?)?,
        risk_id: row.get(1)?,
        related_finding_id: row.get(2)?,
        business_impact: row.get(3)?,
        likelihood: row.get(4)?,
        impact: row.get(5)?,
        risk_rating: row.get(6)?,
        risk_level: parse_col(7, row.get::<_, String>(7)?)?,
        risk_owner: row.get(8)?,
        mitigation_plan: row.get(9)?,
        status: parse_col(10, row.get::<_, String>(10)?)?,
        target_closure_date: row.get(11)?,
    })
}

fn evidence_from_row(row: &Row<'_>) -> rusqlite::Result<Evidence> {
    Ok(Evidence {
        id: parse_col(0, row.get::<_, String>(0)?)?,
        finding_id: parse_col(1, row.get::<_, String>(1)?)?,
        file_name: row.get(2)?,
        file_path: row.get(3)?,
        uploaded_at: parse_col(4, row.get::<_, String>(4)?)?,
    })
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: parse_col(0, row.get::<_, String>(0)?)?,
        finding_id: parse_col(1, row.get::<_, String>(1)?)?,
        author_id: parse_col(2, row.get::<_, String>(2)?)?,
        author_name: row.get(3)?,
        body: row.get(4)?,
        attachment_path: row.get(5)?,
        attachment_type: row.get(6)?,
        created_at: parse_col(7, row.get::<_, String>(7)?)?,
    })
}

const FINDING_COLS: &str = "id, finding_id, app_id, title, description, impact, cvss_score, \
     severity, owasp_category, mitre_attack, status, assigned_to, reported_date, due_date, \
     remediation_steps, risk_score";

fn exists(conn: &Connection, sql: &str, key: &str) -> Result<bool, DomainError> {
    conn.query_row(sql, [key], |_| Ok(()))
        .optional()
        .map_err(storage)
        .map(|found| found.is_some())
}

#[async_trait]
impl Store for SqliteStore {
    async fn create_user(&self, user: &User) -> Result<(), DomainError> {
        let conn = self.conn()?;
        if exists(&conn, "SELECT 1 FROM users WHERE email = ?1", &user.email)? {
            return Err(DomainError::conflict("user", &user.email));
        }
        conn.execute(
            "INSERT INTO users (id, name, email, password_hash, role) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.to_string(),
                user.name,
                user.email,
                user.password_hash,
                user.role.as_str()
            ],
        )
        .map_err(storage)?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT id, name, email, password_hash, role FROM users ORDER BY id")
            .map_err(storage)?;
        let rows = stmt.query_map([], user_from_row).map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, name, email, password_hash, role FROM users WHERE email = ?1",
            [email],
            user_from_row,
        )
        .optional()
        .map_err(storage)
    }

    async fn count_users(&self) -> Result<u64, DomainError> {
        let conn = self.conn()?;
        conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get::<_, i64>(0))
            .map(|n| n as u64)
            .map_err(storage)
    }

    async fn create_application(&self, app: &Application) -> Result<(), DomainError> {
        let conn = self.conn()?;
        if exists(
            &conn,
            "SELECT 1 FROM applications WHERE app_id = ?1",
            &app.app_id,
        )? {
            return Err(DomainError::conflict("application", &app.app_id));
        }
        conn.execute(
            "INSERT INTO applications (id, app_id, name, owner, environment, description) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                app.id.to_string(),
                app.app_id,
                app.name,
                app.owner,
                app.environment.as_str(),
                app.description
            ],
        )
        .map_err(storage)?;
        Ok(())
    }

    async fn list_applications(&self) -> Result<Vec<Application>, DomainError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, app_id, name, owner, environment, description \
                 FROM applications ORDER BY app_id",
            )
            .map_err(storage)?;
        let rows = stmt.query_map([], application_from_row).map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }

    async fn get_application(&self, id: ApplicationId) -> Result<Option<Application>, DomainError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, app_id, name, owner, environment, description \
             FROM applications WHERE id = ?1",
            [id.to_string()],
            application_from_row,
        )
        .optional()
        .map_err(storage)
    }

    async fn update_application(&self, app: &Application) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE applications SET name = ?2, owner = ?3, environment = ?4, \
                 description = ?5 WHERE id = ?1",
                params![
                    app.id.to_string(),
                    app.name,
                    app.owner,
                    app.environment.as_str(),
                    app.description
                ],
            )
            .map_err(storage)?;
        if changed == 0 {
            return Err(DomainError::not_found("application", app.id));
        }
        Ok(())
    }

    async fn delete_application(&self, id: ApplicationId) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let app_id: Option<String> = conn
            .query_row(
                "SELECT app_id FROM applications WHERE id = ?1",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(storage)?;
        let Some(app_id) = app_id else {
            return Err(DomainError::not_found("application", id));
        };
        if exists(&conn, "SELECT 1 FROM findings WHERE app_id = ?1", &app_id)? {
            return Err(DomainError::Referenced {
                entity: "application",
                referenced_by: "findings",
            });
        }
        conn.execute("DELETE FROM applications WHERE id = ?1", [id.to_string()])
            .map_err(storage)?;
        Ok(())
    }

    async fn create_finding(&self, finding: &Finding) -> Result<(), DomainError> {
        let conn = self.conn()?;
        if exists(
            &conn,
            "SELECT 1 FROM findings WHERE finding_id = ?1",
            &finding.finding_id,
        )? {
            return Err(DomainError::conflict("finding", &finding.finding_id));
        }
        if !exists(
            &conn,
            "SELECT 1 FROM applications WHERE app_id = ?1",
            &finding.app_id,
        )? {
            return Err(DomainError::not_found("application", &finding.app_id));
        }
        conn.execute(
            "INSERT INTO findings (id, finding_id, app_id, title, description, impact, \
             cvss_score, severity, owasp_category, mitre_attack, status, assigned_to, \
             reported_date, due_date, remediation_steps, risk_score) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                finding.id.to_string(),
                finding.finding_id,
                finding.app_id,
                finding.title,
                finding.description,
                finding.impact,
                finding.cvss_score,
                finding.severity.as_str(),
                finding.owasp_category,
                finding.mitre_attack,
                finding.status.as_str(),
                finding.assigned_to.map(|u| u.to_string()),
                finding.reported_date,
                finding.due_date,
                finding.remediation_steps,
                finding.risk_score
            ],
        )
        .map_err(storage)?;
        Ok(())
    }

    async fn list_findings(&self) -> Result<Vec<FindingRecord>, DomainError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {}, a.name FROM findings f JOIN applications a ON f.app_id = a.app_id \
             ORDER BY f.id",
            FINDING_COLS
                .split(", ")
                .map(|c| format!("f.{c}"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let mut stmt = conn.prepare(&sql).map_err(storage)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(FindingRecord {
                    finding: finding_from_row(row)?,
                    app_name: row.get(16)?,
                })
            })
            .map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }

    async fn get_finding(&self, id: FindingId) -> Result<Option<Finding>, DomainError> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {FINDING_COLS} FROM findings WHERE id = ?1"),
            [id.to_string()],
            finding_from_row,
        )
        .optional()
        .map_err(storage)
    }

    async fn update_finding(&self, finding: &Finding) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE findings SET title = ?2, description = ?3, impact = ?4, \
                 cvss_score = ?5, severity = ?6, owasp_category = ?7, mitre_attack = ?8, \
                 status = ?9, assigned_to = ?10, reported_date = ?11, due_date = ?12, \
                 remediation_steps = ?13, risk_score = ?14 WHERE id = ?1",
                params![
                    finding.id.to_string(),
                    finding.title,
                    finding.description,
                    finding.impact,
                    finding.cvss_score,
                    finding.severity.as_str(),
                    finding.owasp_category,
                    finding.mitre_attack,
                    finding.status.as_str(),
                    finding.assigned_to.map(|u| u.to_string()),
                    finding.reported_date,
                    finding.due_date,
                    finding.remediation_steps,
                    finding.risk_score
                ],
            )
            .map_err(storage)?;
        if changed == 0 {
            return Err(DomainError::not_found("finding", finding.id));
        }
        Ok(())
    }

    async fn delete_finding(&self, id: FindingId) -> Result<Vec<String>, DomainError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(storage)?;
        let key = id.to_string();

        if !exists(&tx, "SELECT 1 FROM findings WHERE id = ?1", &key)? {
            return Err(DomainError::not_found("finding", id));
        }

        let paths = {
            let mut stmt = tx
                .prepare("SELECT file_path FROM evidence WHERE finding_id = ?1")
                .map_err(storage)?;
            let rows = stmt
                .query_map([&key], |row| row.get::<_, String>(0))
                .map_err(storage)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)?
        };

        tx.execute("DELETE FROM evidence WHERE finding_id = ?1", [&key])
            .map_err(storage)?;
        tx.execute("DELETE FROM comments WHERE finding_id = ?1", [&key])
            .map_err(storage)?;
        tx.execute("DELETE FROM findings WHERE id = ?1", [&key])
            .map_err(storage)?;
        tx.commit().map_err(storage)?;
        Ok(paths)
    }

    async fn create_risk(&self, risk: &RiskEntry) -> Result<(), DomainError> {
        let conn = self.conn()?;
        if exists(
            &conn,
            "SELECT 1 FROM risk_register WHERE risk_id = ?1",
            &risk.risk_id,
        )? {
            return Err(DomainError::conflict("risk", &risk.risk_id));
        }
        if let Some(related) = &risk.related_finding_id {
            if !exists(&conn, "SELECT 1 FROM findings WHERE finding_id = ?1", related)? {
                return Err(DomainError::not_found("finding", related));
            }
        }
        conn.execute(
            "INSERT INTO risk_register (id, risk_id, related_finding_id, business_impact, \
             likelihood, impact, risk_rating, risk_level, risk_owner, mitigation_plan, \
             status, target_closure_date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                risk.id.to_string(),
                risk.risk_id,
                risk.related_finding_id,
                risk.business_impact,
                risk.likelihood,
                risk.impact,
                risk.risk_rating,
                risk.risk_level.as_str(),
                risk.risk_owner,
                risk.mitigation_plan,
                risk.status.as_str(),
                risk.target_closure_date
            ],
        )
        .map_err(storage)?;
        Ok(())
    }

    async fn list_risks(&self) -> Result<Vec<RiskEntry>, DomainError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, risk_id, related_finding_id, business_impact, likelihood, impact, \
                 risk_rating, risk_level, risk_owner, mitigation_plan, status, \
                 target_closure_date FROM risk_register ORDER BY risk_id",
            )
            .map_err(storage)?;
        let rows = stmt.query_map([], risk_from_row).map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }

    async fn get_risk(&self, id: RiskId) -> Result<Option<RiskEntry>, DomainError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, risk_id, related_finding_id, business_impact, likelihood, impact, \
             risk_rating, risk_level, risk_owner, mitigation_plan, status, \
             target_closure_date FROM risk_register WHERE id = ?1",
            [id.to_string()],
            risk_from_row,
        )
        .optional()
        .map_err(storage)
    }

    async fn update_risk(&self, risk: &RiskEntry) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE risk_register SET related_finding_id = ?2, business_impact = ?3, \
                 likelihood = ?4, impact = ?5, risk_rating = ?6, risk_level = ?7, \
                 risk_owner = ?8, mitigation_plan = ?9, status = ?10, \
                 target_closure_date = ?11 WHERE id = ?1",
                params![
                    risk.id.to_string(),
                    risk.related_finding_id,
                    risk.business_impact,
                    risk.likelihood,
                    risk.impact,
                    risk.risk_rating,
                    risk.risk_level.as_str(),
                    risk.risk_owner,
                    risk.mitigation_plan,
                    risk.status.as_str(),
                    risk.target_closure_date
                ],
            )
            .map_err(storage)?;
        if changed == 0 {
            return Err(DomainError::not_found("risk", risk.id));
        }
        Ok(())
    }

    async fn delete_risk(&self, id: RiskId) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let changed = conn
            .execute("DELETE FROM risk_register WHERE id = ?1", [id.to_string()])
            .map_err(storage)?;
        if changed == 0 {
            return Err(DomainError::not_found("risk", id));
        }
        Ok(())
    }

    async fn add_evidence(&self, evidence: &Evidence) -> Result<(), DomainError> {
        let conn = self.conn()?;
        if !exists(
            &conn,
            "SELECT 1 FROM findings WHERE id = ?1",
            &evidence.finding_id.to_string(),
        )? {
            return Err(DomainError::not_found("finding", evidence.finding_id));
        }
        conn.execute(
            "INSERT INTO evidence (id, finding_id, file_name, file_path, uploaded_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                evidence.id.to_string(),
                evidence.finding_id.to_string(),
                evidence.file_name,
                evidence.file_path,
                evidence.uploaded_at.to_rfc3339()
            ],
        )
        .map_err(storage)?;
        Ok(())
    }

    async fn evidence_for_finding(
        &self,
        finding: FindingId,
    ) -> Result<Vec<Evidence>, DomainError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, finding_id, file_name, file_path, uploaded_at FROM evidence \
                 WHERE finding_id = ?1 ORDER BY uploaded_at",
            )
            .map_err(storage)?;
        let rows = stmt
            .query_map([finding.to_string()], evidence_from_row)
            .map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }

    async fn get_evidence(&self, id: EvidenceId) -> Result<Option<Evidence>, DomainError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, finding_id, file_name, file_path, uploaded_at FROM evidence \
             WHERE id = ?1",
            [id.to_string()],
            evidence_from_row,
        )
        .optional()
        .map_err(storage)
    }

    async fn delete_evidence(&self, id: EvidenceId) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let changed = conn
            .execute("DELETE FROM evidence WHERE id = ?1", [id.to_string()])
            .map_err(storage)?;
        if changed == 0 {
            return Err(DomainError::not_found("evidence", id));
        }
        Ok(())
    }

    async fn add_comment(&self, comment: &Comment) -> Result<(), DomainError> {
        let conn = self.conn()?;
        if !exists(
            &conn,
            "SELECT 1 FROM findings WHERE id = ?1",
            &comment.finding_id.to_string(),
        )? {
            return Err(DomainError::not_found("finding", comment.finding_id));
        }
        conn.execute(
            "INSERT INTO comments (id, finding_id, author_id, author_name, body, \
             attachment_path, attachment_type, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                comment.id.to_string(),
                comment.finding_id.to_string(),
                comment.author_id.to_string(),
                comment.author_name,
                comment.body,
                comment.attachment_path,
                comment.attachment_type,
                comment.created_at.to_rfc3339()
            ],
        )
        .map_err(storage)?;
        Ok(())
    }

    async fn comments_for_finding(
        &self,
        finding: FindingId,
    ) -> Result<Vec<Comment>, DomainError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, finding_id, author_id, author_name, body, attachment_path, \
                 attachment_type, created_at FROM comments \
                 WHERE finding_id = ?1 ORDER BY created_at",
            )
            .map_err(storage)?;
        let rows = stmt
            .query_map([finding.to_string()], comment_from_row)
            .map_err(storage)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage)
    }
}

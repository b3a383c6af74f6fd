use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{DashboardStats, SeverityCount, StatusCount};
use crate::state::AppState;
use axum::{extract::State, Json};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use types::finding::FindingStatus;
use types::policy::Action;
use types::scoring::Severity;

pub async fn stats(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<DashboardStats>, ApiError> {
    user.require(Action::ReadAny)?;

    let records = state.store.list_findings().await?;
    let today = chrono::Utc::now().date_naive();

    let mut by_severity: BTreeMap<Severity, u64> = BTreeMap::new();
    let mut by_status: BTreeMap<&'static str, (FindingStatus, u64)> = BTreeMap::new();
    let mut open = 0;
    let mut overdue = 0;

    for record in &records {
        let finding = &record.finding;
        *by_severity.entry(finding.severity).or_default() += 1;
        by_status
            .entry(finding.status.as_str())
            .or_insert((finding.status, 0))
            .1 += 1;

        if finding.status == FindingStatus::Open {
            open += 1;
        }
        if finding.status != FindingStatus::Closed && is_past_due(finding.due_date.as_deref(), today)
        {
            overdue += 1;
        }
    }

    Ok(Json(DashboardStats {
        total: records.len() as u64,
        open,
        overdue,
        severity_stats: by_severity
            .into_iter()
            .map(|(severity, count)| SeverityCount { severity, count })
            .collect(),
        status_stats: by_status
            .into_values()
            .map(|(status, count)| StatusCount { status, count })
            .collect(),
    }))
}

/// Unparseable or missing due dates never count as overdue
fn is_past_due(due_date: Option<&str>, today: NaiveDate) -> bool {
    due_date
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .map(|due| due < today)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_past_due_comparison() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert!(is_past_due(Some("2025-01-14"), today));
        assert!(!is_past_due(Some("2025-01-15"), today));
        assert!(!is_past_due(Some("2025-02-01"), today));
        assert!(!is_past_due(Some("soon"), today));
        assert!(!is_past_due(None, today));
    }
}

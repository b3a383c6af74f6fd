//! Evidence attachments and discussion comments

use crate::ids::{CommentId, EvidenceId, FindingId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded artifact attached to a finding.
///
/// The record and the stored file live and die together: deleting the record
/// removes the artifact, and a failed record insert rolls the file back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: EvidenceId,
    pub finding_id: FindingId,
    /// Name the file was uploaded under
    pub file_name: String,
    /// Public retrieval path, e.g. `/uploads/1710000000000-report.pdf`
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A discussion entry on a finding, optionally carrying an attachment.
///
/// Append-only; ordered by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub finding_id: FindingId,
    pub author_id: UserId,
    pub author_name: String,
    pub body: String,
    pub attachment_path: Option<String>,
    pub attachment_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_wire_shape() {
        let comment = Comment {
            id: CommentId::new(),
            finding_id: FindingId::new(),
            author_id: UserId::new(),
            author_name: "System Admin".into(),
            body: "Retest scheduled".into(),
            attachment_path: None,
            attachment_type: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&comment).unwrap();
        assert!(json.get("authorName").is_some());
        assert!(json.get("createdAt").is_some());
    }
}

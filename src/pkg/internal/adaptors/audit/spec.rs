use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The state-affecting actions the trail records.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Creation,
    Edit,
    #[serde(rename = "Status Change")]
    StatusChange,
    Deletion,
    Duplication,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuditAction::Creation => "Creation",
            AuditAction::Edit => "Edit",
            AuditAction::StatusChange => "Status Change",
            AuditAction::Deletion => "Deletion",
            AuditAction::Duplication => "Duplication",
        };
        write!(f, "{}", s)
    }
}

/// One immutable entry in the trail. `job_id` is a reference, not ownership:
/// entries outlive the posting they describe.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub job_id: String,
    pub action: AuditAction,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub recruiter: String,
}

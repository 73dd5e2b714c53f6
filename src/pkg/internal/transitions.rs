//! Pure transition decisions. Both the scheduler and the request-driven
//! mutation path go through here so the two triggers stay consistent.

use chrono::{DateTime, Utc};

use crate::pkg::internal::adaptors::postings::spec::{JobPosting, Status};
use crate::prelude::Result;

pub const DEADLINE_CLOSED_DESCRIPTION: &str =
    "Job posting status automatically changed to closed due to deadline";

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub status: Status,
    pub description: String,
}

/// Deadline-driven closure. Applies only to active postings whose deadline has
/// passed; the status guard (not the timestamp alone) is what makes repeated
/// sweeps a no-op on already-closed postings.
pub fn evaluate_automatic(posting: &JobPosting, now: DateTime<Utc>) -> Option<Transition> {
    if posting.status != Status::Active {
        return None;
    }
    if now <= posting.application_deadline {
        return None;
    }
    Some(Transition {
        status: Status::Closed,
        description: DEADLINE_CLOSED_DESCRIPTION.to_string(),
    })
}

/// User-requested status change. Rejects values outside the enum; any
/// transition between valid statuses is currently permitted, including
/// reopening a closed posting.
pub fn apply_requested(requested: &str) -> Result<Transition> {
    let status: Status = requested.parse()?;
    Ok(Transition {
        status,
        description: format!("Status changed to {}", status),
    })
}

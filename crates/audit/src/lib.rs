// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status-history ledger types.
//!
//! Every status-changing operation appends exactly one entry to the
//! request status history. Entries are immutable once created and are
//! never deleted; ordering entries by timestamp reconstructs the full
//! transition history of a request.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use procure_domain::RequestStatus;
use serde::{Deserialize, Serialize};

/// Who initiated a status change.
///
/// System-initiated changes (auto-assignment) carry no operator and are
/// persisted with a NULL `changed_by` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangedBy {
    /// The change was made by the system itself.
    System,
    /// The change was made by the identified user.
    Operator(i64),
}

impl ChangedBy {
    /// Maps the actor to the nullable `changed_by` column value.
    #[must_use]
    pub const fn to_column(self) -> Option<i64> {
        match self {
            Self::System => None,
            Self::Operator(user_id) => Some(user_id),
        }
    }

    /// Maps a nullable `changed_by` column value back to the actor.
    #[must_use]
    pub const fn from_column(value: Option<i64>) -> Self {
        match value {
            None => Self::System,
            Some(user_id) => Self::Operator(user_id),
        }
    }

    /// Returns true for system-initiated changes.
    #[must_use]
    pub const fn is_system(self) -> bool {
        matches!(self, Self::System)
    }
}

/// One append-only status-history entry.
///
/// Captures the status a request transitioned *to*, who caused the
/// transition, and an optional free-form comment (e.g. the strategy a
/// system auto-assignment used).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// The request the entry belongs to.
    pub request_id: i64,
    /// The status transitioned to.
    pub status: RequestStatus,
    /// Who initiated the change.
    pub changed_by: ChangedBy,
    /// Optional context for the change.
    pub comment: Option<String>,
    /// When the change occurred (RFC 3339 UTC).
    pub occurred_at: String,
}

impl StatusChange {
    /// Creates a new status-change entry.
    ///
    /// Once created, an entry is immutable.
    #[must_use]
    pub const fn new(
        request_id: i64,
        status: RequestStatus,
        changed_by: ChangedBy,
        comment: Option<String>,
        occurred_at: String,
    ) -> Self {
        Self {
            request_id,
            status,
            changed_by,
            comment,
            occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_by_column_round_trip() {
        assert_eq!(ChangedBy::System.to_column(), None);
        assert_eq!(ChangedBy::Operator(42).to_column(), Some(42));
        assert_eq!(ChangedBy::from_column(None), ChangedBy::System);
        assert_eq!(ChangedBy::from_column(Some(42)), ChangedBy::Operator(42));
    }

    #[test]
    fn test_system_actor_detection() {
        assert!(ChangedBy::System.is_system());
        assert!(!ChangedBy::Operator(7).is_system());
    }

    #[test]
    fn test_status_change_creation_requires_all_fields() {
        let change = StatusChange::new(
            11,
            RequestStatus::ProcurementReview,
            ChangedBy::System,
            Some(String::from("Auto-assigned via LEAST_LOADED")),
            String::from("2026-08-06T12:00:00Z"),
        );

        assert_eq!(change.request_id, 11);
        assert_eq!(change.status, RequestStatus::ProcurementReview);
        assert_eq!(change.changed_by, ChangedBy::System);
        assert_eq!(
            change.comment,
            Some(String::from("Auto-assigned via LEAST_LOADED"))
        );
        assert_eq!(change.occurred_at, "2026-08-06T12:00:00Z");
    }

    #[test]
    fn test_status_change_equality() {
        let a = StatusChange::new(
            1,
            RequestStatus::Submitted,
            ChangedBy::Operator(5),
            None,
            String::from("2026-08-06T12:00:00Z"),
        );
        let b = a.clone();
        assert_eq!(a, b);

        let c = StatusChange::new(
            1,
            RequestStatus::Rejected,
            ChangedBy::Operator(5),
            None,
            String::from("2026-08-06T12:00:00Z"),
        );
        assert_ne!(a, c);
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::tests::{create_test_persistence, now_utc_string, seed_directory, seed_request};
use procure_audit::ChangedBy;
use procure_domain::RequestStatus;

#[test]
fn test_history_round_trip_with_operator_and_system_actors() {
    let mut persistence: Persistence = create_test_persistence();
    let directory = seed_directory(&mut persistence, 0);
    let now = now_utc_string();

    let request_id = seed_request(&mut persistence, &directory, "PR-1", Some("DRAFT"), 100, &now);

    persistence
        .append_status_history(
            request_id,
            RequestStatus::Submitted.as_str(),
            Some(directory.requester_id),
            Some("initial submission"),
            "2026-08-06T09:00:00Z",
        )
        .unwrap();
    persistence
        .append_status_history(
            request_id,
            RequestStatus::ProcurementReview.as_str(),
            None,
            Some("Auto-assigned via LEAST_LOADED"),
            "2026-08-06T10:00:00Z",
        )
        .unwrap();

    let history = persistence.get_status_history(request_id).unwrap();
    assert_eq!(history.len(), 2);

    assert_eq!(history[0].status, RequestStatus::Submitted);
    assert_eq!(history[0].changed_by, ChangedBy::Operator(directory.requester_id));
    assert_eq!(history[0].comment.as_deref(), Some("initial submission"));

    assert_eq!(history[1].status, RequestStatus::ProcurementReview);
    assert_eq!(history[1].changed_by, ChangedBy::System);
    assert!(history[1].changed_by.is_system());
}

#[test]
fn test_history_orders_by_timestamp() {
    let mut persistence: Persistence = create_test_persistence();
    let directory = seed_directory(&mut persistence, 0);
    let now = now_utc_string();

    let request_id = seed_request(&mut persistence, &directory, "PR-1", Some("DRAFT"), 100, &now);

    // Appended out of chronological order; reads reconstruct order.
    persistence
        .append_status_history(
            request_id,
            RequestStatus::DepartmentReview.as_str(),
            None,
            None,
            "2026-08-06T11:00:00Z",
        )
        .unwrap();
    persistence
        .append_status_history(
            request_id,
            RequestStatus::Submitted.as_str(),
            None,
            None,
            "2026-08-06T09:00:00Z",
        )
        .unwrap();

    let history = persistence.get_status_history(request_id).unwrap();
    assert_eq!(history[0].status, RequestStatus::Submitted);
    assert_eq!(history[1].status, RequestStatus::DepartmentReview);
}

#[test]
fn test_history_is_scoped_per_request() {
    let mut persistence: Persistence = create_test_persistence();
    let directory = seed_directory(&mut persistence, 0);
    let now = now_utc_string();

    let first = seed_request(&mut persistence, &directory, "PR-1", Some("DRAFT"), 100, &now);
    let second = seed_request(&mut persistence, &directory, "PR-2", Some("DRAFT"), 100, &now);

    persistence
        .append_status_history(first, RequestStatus::Submitted.as_str(), None, None, &now)
        .unwrap();

    assert_eq!(persistence.get_status_history(first).unwrap().len(), 1);
    assert!(persistence.get_status_history(second).unwrap().is_empty());
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::setup;
use crate::{
    ApiError, SplinterConfig, TransitionParams, get_request, get_request_history,
    transition_request,
};
use procure_audit::ChangedBy;
use procure_domain::{DomainError, LoadBalancingStrategy, Money, RequestStatus};
use procure_engine::SplinterPolicy;

fn transition(
    world: &mut crate::tests::TestWorld,
    request_id: i64,
    new_status: RequestStatus,
    config: &SplinterConfig,
) -> Result<crate::TransitionOutcome, ApiError> {
    transition_request(
        &mut world.persistence,
        &TransitionParams {
            request_id,
            new_status,
            actor_id: Some(world.requester_id),
            comment: None,
            supervisor_override: false,
        },
        config,
    )
}

#[test]
fn test_transition_writes_status_and_history() {
    let mut world = setup(0);
    let config = SplinterConfig::default();
    let request = world.create_draft("PR-1", 1_000);

    let outcome = transition(&mut world, request.request_id, RequestStatus::Submitted, &config)
        .unwrap();
    assert_eq!(outcome.previous_status, RequestStatus::Draft);
    assert_eq!(outcome.new_status, RequestStatus::Submitted);

    let reloaded = get_request(&mut world.persistence, request.request_id).unwrap();
    assert_eq!(reloaded.status, RequestStatus::Submitted);

    let history = get_request_history(&mut world.persistence, request.request_id).unwrap();
    // Creation entry plus the transition entry.
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].status, RequestStatus::Draft);
    assert_eq!(history[1].status, RequestStatus::Submitted);
    assert_eq!(history[1].changed_by, ChangedBy::Operator(world.requester_id));
}

#[test]
fn test_transition_rejects_invalid_edges() {
    let mut world = setup(0);
    let config = SplinterConfig::default();
    let request = world.create_draft("PR-1", 1_000);

    let err = transition(
        &mut world,
        request.request_id,
        RequestStatus::ProcurementReview,
        &config,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(DomainError::InvalidStatusTransition { .. })
    ));

    // The failed transition left no trace.
    let reloaded = get_request(&mut world.persistence, request.request_id).unwrap();
    assert_eq!(reloaded.status, RequestStatus::Draft);
    assert_eq!(
        get_request_history(&mut world.persistence, request.request_id)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_transition_unknown_request() {
    let mut world = setup(0);
    let err = transition(&mut world, 404, RequestStatus::Submitted, &SplinterConfig::default())
        .unwrap_err();
    assert_eq!(err, ApiError::RequestNotFound(404));
}

#[test]
fn test_read_heals_legacy_status_reactively() {
    let mut world = setup(0);

    // A row written by a retired portal version.
    let request_id = world.seed_raw_request("PR-LEGACY", Some("PENDING"), 1_000);

    // The read trips on the legacy value, repairs, and retries once.
    let request = get_request(&mut world.persistence, request_id).unwrap();
    assert_eq!(request.status, RequestStatus::Submitted);
}

#[test]
fn test_transition_heals_legacy_status_then_proceeds() {
    let mut world = setup(0);
    let config = SplinterConfig::default();
    let request_id = world.seed_raw_request("PR-LEGACY", Some("DEPT_REVIEW"), 1_000);

    // DEPT_REVIEW heals to DEPARTMENT_REVIEW, from which approval is a
    // valid edge.
    let outcome = transition(
        &mut world,
        request_id,
        RequestStatus::DepartmentApproved,
        &config,
    )
    .unwrap();
    assert_eq!(outcome.previous_status, RequestStatus::DepartmentReview);
}

#[test]
fn test_splinter_gate_skipped_without_settings_row() {
    let mut world = setup(0);
    let request = world.create_draft("PR-1", 300_000);

    let outcome = transition(
        &mut world,
        request.request_id,
        RequestStatus::Submitted,
        &SplinterConfig::default(),
    )
    .unwrap();
    assert!(outcome.splinter.is_none());
}

#[test]
fn test_splinter_gate_runs_only_on_spend_commit() {
    let mut world = setup(0);
    world.enable_load_balancing(LoadBalancingStrategy::LeastLoaded);
    let config = SplinterConfig::default();
    let request = world.create_draft("PR-1", 300_000);

    let submitted = transition(&mut world, request.request_id, RequestStatus::Submitted, &config)
        .unwrap();
    assert!(submitted.splinter.is_some(), "submission commits spend");

    // An intra-pipeline hop does not re-run the detector.
    let in_review = transition(
        &mut world,
        request.request_id,
        RequestStatus::DepartmentReview,
        &config,
    )
    .unwrap();
    assert!(in_review.splinter.is_none());
}

#[test]
fn test_block_policy_refuses_flagged_submission() {
    let mut world = setup(0);
    world.enable_load_balancing(LoadBalancingStrategy::LeastLoaded);
    let config = SplinterConfig {
        policy: SplinterPolicy::Block,
        ..SplinterConfig::default()
    };

    world.seed_raw_request("PR-PRIOR", Some("SUBMITTED"), 220_000);
    let request = world.create_draft("PR-NEW", 50_000);

    let err = transition(&mut world, request.request_id, RequestStatus::Submitted, &config)
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::SplinteringBlocked { combined, threshold }
            if combined == Money::from_major(270_000) && threshold == Money::from_major(250_000)
    ));

    // Blocked transitions leave the request untouched.
    let reloaded = get_request(&mut world.persistence, request.request_id).unwrap();
    assert_eq!(reloaded.status, RequestStatus::Draft);
}

#[test]
fn test_supervisor_override_bypasses_block() {
    let mut world = setup(0);
    world.enable_load_balancing(LoadBalancingStrategy::LeastLoaded);
    let config = SplinterConfig {
        policy: SplinterPolicy::Block,
        ..SplinterConfig::default()
    };

    world.seed_raw_request("PR-PRIOR", Some("SUBMITTED"), 220_000);
    let request = world.create_draft("PR-NEW", 50_000);

    let outcome = transition_request(
        &mut world.persistence,
        &TransitionParams {
            request_id: request.request_id,
            new_status: RequestStatus::Submitted,
            actor_id: Some(world.requester_id),
            comment: Some(String::from("supervisor approved the combined spend")),
            supervisor_override: true,
        },
        &config,
    )
    .unwrap();

    // The flag is still reported even though the transition proceeded.
    let splinter = outcome.splinter.expect("splinter result");
    assert!(splinter.flagged);
    let reloaded = get_request(&mut world.persistence, request.request_id).unwrap();
    assert_eq!(reloaded.status, RequestStatus::Submitted);
}

#[test]
fn test_end_to_end_submission_to_assignment() {
    // The full scenario: a 300,000 JMD request with no prior history is
    // flagged on submission (300,000 >= 250,000), then assigned to the
    // only idle officer on entering procurement review.
    let mut world = setup(1);
    world.enable_load_balancing(LoadBalancingStrategy::LeastLoaded);
    let config = SplinterConfig::default();
    let officer_id = world.officer_ids[0];

    let request = world.create_draft("PR-2026-00001", 300_000);

    let submitted = transition(&mut world, request.request_id, RequestStatus::Submitted, &config)
        .unwrap();
    let splinter = submitted.splinter.expect("splinter result");
    assert!(splinter.flagged);
    assert_eq!(splinter.sum_prior, Money::ZERO);
    assert_eq!(splinter.combined, Money::from_major(300_000));

    for status in [
        RequestStatus::DepartmentReview,
        RequestStatus::DepartmentApproved,
    ] {
        transition(&mut world, request.request_id, status, &config).unwrap();
    }

    let reviewed = transition(
        &mut world,
        request.request_id,
        RequestStatus::ProcurementReview,
        &config,
    )
    .unwrap();
    assert_eq!(reviewed.assigned_officer, Some(officer_id));

    let reloaded = get_request(&mut world.persistence, request.request_id).unwrap();
    assert_eq!(reloaded.status, RequestStatus::ProcurementReview);
    assert_eq!(reloaded.current_assignee_id, Some(officer_id));

    // The ledger ends with the operator transition followed by the
    // system-initiated assignment entry naming the strategy.
    let history = get_request_history(&mut world.persistence, request.request_id).unwrap();
    let last = history.last().expect("history entries");
    assert_eq!(last.status, RequestStatus::ProcurementReview);
    assert_eq!(last.changed_by, ChangedBy::System);
    assert_eq!(last.comment.as_deref(), Some("Auto-assigned via LEAST_LOADED"));
}

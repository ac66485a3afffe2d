// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::setup;
use crate::{
    UpdateSettingsParams, auto_assign_request, get_request, get_request_history,
    should_auto_assign, update_load_balancing_settings,
};
use procure_domain::{LoadBalancingSettings, LoadBalancingStrategy, RequestStatus};

#[test]
fn test_auto_assign_without_settings_row_is_inactive() {
    let mut world = setup(2);
    let request_id = world.seed_raw_request("PR-1", Some("PROCUREMENT_REVIEW"), 1_000);

    assert_eq!(auto_assign_request(&mut world.persistence, request_id), None);
}

#[test]
fn test_auto_assign_disabled_returns_none_without_writes() {
    let mut world = setup(2);
    update_load_balancing_settings(
        &mut world.persistence,
        &UpdateSettingsParams {
            enabled: false,
            strategy: LoadBalancingStrategy::RoundRobin,
            auto_assign_on_approval: true,
            splintering_enabled: true,
            updated_by: None,
        },
    )
    .unwrap();
    let request_id = world.seed_raw_request("PR-1", Some("PROCUREMENT_REVIEW"), 1_000);

    assert_eq!(auto_assign_request(&mut world.persistence, request_id), None);

    // No side effects at all: no assignee, no log, no history, counter
    // untouched.
    let request = get_request(&mut world.persistence, request_id).unwrap();
    assert_eq!(request.current_assignee_id, None);
    assert!(world.persistence.get_assignment_log(request_id).unwrap().is_empty());
    assert!(get_request_history(&mut world.persistence, request_id).unwrap().is_empty());
    let settings = world.persistence.get_load_balancing_settings().unwrap().unwrap();
    assert_eq!(settings.round_robin_counter, 0);
}

#[test]
fn test_auto_assign_empty_pool_returns_none() {
    let mut world = setup(0);
    world.enable_load_balancing(LoadBalancingStrategy::LeastLoaded);
    let request_id = world.seed_raw_request("PR-1", Some("PROCUREMENT_REVIEW"), 1_000);

    assert_eq!(auto_assign_request(&mut world.persistence, request_id), None);
    let request = get_request(&mut world.persistence, request_id).unwrap();
    assert_eq!(request.current_assignee_id, None);
}

#[test]
fn test_round_robin_rotates_through_id_sorted_pool() {
    let mut world = setup(3);
    world.enable_load_balancing(LoadBalancingStrategy::RoundRobin);
    let mut sorted_officers = world.officer_ids.clone();
    sorted_officers.sort_unstable();

    // Four assignments: the rotation wraps after the third.
    let mut assigned = Vec::new();
    for i in 0..4 {
        let request_id =
            world.seed_raw_request(&format!("PR-{i}"), Some("PROCUREMENT_REVIEW"), 1_000);
        assigned.push(auto_assign_request(&mut world.persistence, request_id).unwrap());
    }

    assert_eq!(assigned[0], sorted_officers[0]);
    assert_eq!(assigned[1], sorted_officers[1]);
    assert_eq!(assigned[2], sorted_officers[2]);
    assert_eq!(assigned[3], sorted_officers[0]);

    // One counter advance per assignment.
    let settings = world.persistence.get_load_balancing_settings().unwrap().unwrap();
    assert_eq!(settings.round_robin_counter, 4);
}

#[test]
fn test_least_loaded_prefers_idle_officer() {
    let mut world = setup(2);
    world.enable_load_balancing(LoadBalancingStrategy::LeastLoaded);
    let busy_officer = world.officer_ids[0];
    let idle_officer = world.officer_ids[1];

    // Two open reviews for the busy officer.
    for i in 0..2 {
        let prior = world.seed_raw_request(
            &format!("PR-BUSY-{i}"),
            Some("PROCUREMENT_REVIEW"),
            1_000,
        );
        world
            .persistence
            .assign_request(prior, busy_officer, "2026-08-06T08:00:00Z")
            .unwrap();
    }

    let request_id = world.seed_raw_request("PR-NEW", Some("PROCUREMENT_REVIEW"), 1_000);
    assert_eq!(
        auto_assign_request(&mut world.persistence, request_id),
        Some(idle_officer)
    );
}

#[test]
fn test_random_selects_member_of_pool() {
    let mut world = setup(3);
    world.enable_load_balancing(LoadBalancingStrategy::Random);

    for i in 0..10 {
        let request_id =
            world.seed_raw_request(&format!("PR-{i}"), Some("PROCUREMENT_REVIEW"), 1_000);
        let officer = auto_assign_request(&mut world.persistence, request_id).unwrap();
        assert!(world.officer_ids.contains(&officer));
    }

    // RANDOM never touches the rotation counter.
    let settings = world.persistence.get_load_balancing_settings().unwrap().unwrap();
    assert_eq!(settings.round_robin_counter, 0);
}

#[test]
fn test_auto_assign_records_bookkeeping_and_system_history() {
    let mut world = setup(1);
    world.enable_load_balancing(LoadBalancingStrategy::RoundRobin);
    let officer_id = world.officer_ids[0];
    let request_id = world.seed_raw_request("PR-1", Some("PROCUREMENT_REVIEW"), 1_000);

    assert_eq!(
        auto_assign_request(&mut world.persistence, request_id),
        Some(officer_id)
    );

    let log = world.persistence.get_assignment_log(request_id).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].officer_id, officer_id);
    assert_eq!(log[0].strategy, "ROUND_ROBIN");

    let counters = world
        .persistence
        .get_officer_performance(officer_id)
        .unwrap()
        .expect("counters row");
    assert_eq!(counters.active_assignments, 1);
    assert_eq!(counters.total_assignments, 1);
    assert!(counters.last_assigned_at.is_some());

    let history = get_request_history(&mut world.persistence, request_id).unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0].changed_by.is_system());
    assert_eq!(history[0].status, RequestStatus::ProcurementReview);
    assert_eq!(history[0].comment.as_deref(), Some("Auto-assigned via ROUND_ROBIN"));
}

fn settings_fixture(enabled: bool, auto_assign_on_approval: bool) -> LoadBalancingSettings {
    LoadBalancingSettings {
        settings_id: 1,
        enabled,
        strategy: LoadBalancingStrategy::LeastLoaded,
        auto_assign_on_approval,
        round_robin_counter: 0,
        splintering_enabled: true,
        updated_by: None,
        updated_at: String::from("2026-08-06T12:00:00Z"),
    }
}

#[test]
fn test_should_auto_assign_truth_table() {
    let on = settings_fixture(true, true);
    assert!(should_auto_assign(RequestStatus::ProcurementReview, Some(&on)));

    // Every other combination is false.
    assert!(!should_auto_assign(RequestStatus::ProcurementReview, None));
    assert!(!should_auto_assign(
        RequestStatus::ProcurementReview,
        Some(&settings_fixture(false, true))
    ));
    assert!(!should_auto_assign(
        RequestStatus::ProcurementReview,
        Some(&settings_fixture(true, false))
    ));
    for status in procure_domain::ALL_STATUSES {
        if status != RequestStatus::ProcurementReview {
            assert!(!should_auto_assign(status, Some(&on)));
        }
    }
}

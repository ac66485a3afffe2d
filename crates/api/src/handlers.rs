// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Boundary operations for the request lifecycle engine.
//!
//! `transition_request` is the lifecycle coordinator: the single call
//! site that sequences status validation, the splintering detector, the
//! load balancer, and the history ledger around a status change. It is
//! the only writer of `Request.status`.

use tracing::{error, info, warn};

use procure_audit::{ChangedBy, StatusChange};
use procure_domain::{
    LoadBalancingSettings, LoadBalancingStrategy, ReferenceCode, Request, RequestStatus,
    SplinteringCheckResult,
};
use procure_engine::{
    OfficerLoad, SplinterPolicy, commits_new_spend, select_officer, should_auto_assign,
};
use procure_persistence::{
    NewRequestRow, Persistence, PersistenceError, RepairSummary, SettingsUpdate,
};

use crate::best_effort::best_effort;
use crate::clock::{now_timestamp, window_start};
use crate::config::SplinterConfig;
use crate::error::ApiError;
use crate::request_response::{
    CreateRequestParams, SplinterCheckParams, TransitionOutcome, TransitionParams,
    UpdateSettingsParams,
};

/// Runs a read, healing unrecognized statuses once.
///
/// On `UnknownStatus` the status repair runs and the read is retried
/// exactly once; a second failure surfaces to the caller. This bounds
/// the reactive repair so a row the repair cannot heal (which the
/// catch-all makes impossible in practice) can never loop.
fn with_status_repair<T>(
    persistence: &mut Persistence,
    mut read: impl FnMut(&mut Persistence) -> Result<T, PersistenceError>,
) -> Result<T, ApiError> {
    match read(persistence) {
        Err(PersistenceError::UnknownStatus { request_id, value }) => {
            warn!(
                "read hit unrecognized status '{value}' on request {request_id}; running status repair"
            );
            persistence.repair_statuses()?;
            read(persistence).map_err(ApiError::from)
        }
        other => other.map_err(ApiError::from),
    }
}

/// Creates a draft request and its first history entry.
///
/// # Errors
///
/// Returns an error if validation or persistence fails.
pub fn create_request(
    persistence: &mut Persistence,
    params: &CreateRequestParams,
) -> Result<Request, ApiError> {
    let reference_code = ReferenceCode::new(&params.reference_code)?;
    params.total_estimated.require_non_negative()?;

    let now = now_timestamp();
    let request_id = persistence.insert_request(&NewRequestRow {
        reference_code: reference_code.value().to_string(),
        requester_id: params.requester_id,
        department_id: params.department_id,
        total_estimated: params.total_estimated.minor(),
        currency: params
            .currency
            .clone()
            .unwrap_or_else(|| String::from("JMD")),
        status: Some(RequestStatus::Draft.as_str().to_string()),
        created_at: now.clone(),
        updated_at: now.clone(),
    })?;
    persistence.append_status_history(
        request_id,
        RequestStatus::Draft.as_str(),
        Some(params.requester_id),
        None,
        &now,
    )?;

    info!(
        "Created request {} ({}) for requester {}",
        request_id, reference_code, params.requester_id
    );
    persistence.get_request(request_id).map_err(ApiError::from)
}

/// Retrieves a request, healing legacy statuses reactively.
///
/// # Errors
///
/// Returns an error if the request does not exist or its status cannot
/// be healed.
pub fn get_request(persistence: &mut Persistence, request_id: i64) -> Result<Request, ApiError> {
    with_status_repair(persistence, |p| p.get_request(request_id))
}

/// Retrieves a request's status history in transition order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_request_history(
    persistence: &mut Persistence,
    request_id: i64,
) -> Result<Vec<StatusChange>, ApiError> {
    persistence
        .get_status_history(request_id)
        .map_err(ApiError::from)
}

/// Repairs invalid and legacy status values in storage.
///
/// # Errors
///
/// Returns an error if the repair fails.
pub fn repair_statuses(persistence: &mut Persistence) -> Result<RepairSummary, ApiError> {
    let summary = persistence.repair_statuses()?;
    if summary.catch_all_rows() > 0 {
        // The catch-all forgets pipeline progress; make that loss loud.
        warn!(
            "status repair demoted {} unrecognized row(s) to DRAFT",
            summary.catch_all_rows()
        );
    }
    Ok(summary)
}

/// Evaluates a candidate amount against recent related spend.
///
/// A pure query: nothing is blocked or mutated here. Window and
/// threshold default from configuration and may be overridden per call.
///
/// # Errors
///
/// Returns an error if the window query fails.
pub fn check_splintering(
    persistence: &mut Persistence,
    params: &SplinterCheckParams,
    config: &SplinterConfig,
) -> Result<SplinteringCheckResult, ApiError> {
    let window_days = params.window_days.unwrap_or(config.window_days);
    let threshold = params.threshold.unwrap_or(config.threshold);

    let matches = persistence.find_splinter_matches(
        params.requester_id,
        params.department_id,
        &window_start(window_days),
    )?;
    Ok(procure_engine::evaluate(
        params.total,
        matches,
        window_days,
        threshold,
    ))
}

/// Auto-assigns a request entering procurement review to an officer.
///
/// Returns the selected officer id, or `None` when load balancing is
/// disabled, unconfigured, or the officer pool is empty. Any internal
/// failure is caught, logged, and converted to `None`: auto-assignment
/// must never block or fail the status transition that triggered it.
pub fn auto_assign_request(persistence: &mut Persistence, request_id: i64) -> Option<i64> {
    match try_auto_assign(persistence, request_id) {
        Ok(result) => result,
        Err(err) => {
            error!("auto-assignment for request {request_id} failed: {err}");
            None
        }
    }
}

fn try_auto_assign(
    persistence: &mut Persistence,
    request_id: i64,
) -> Result<Option<i64>, ApiError> {
    let Some(settings) = persistence.get_load_balancing_settings()? else {
        return Ok(None);
    };
    if !settings.enabled {
        return Ok(None);
    }

    let officers = persistence.list_officers()?;
    if officers.is_empty() {
        info!("no procurement officers available; leaving request {request_id} unassigned");
        return Ok(None);
    }

    // LEAST_LOADED is the only strategy that needs per-officer counts.
    let loads: Vec<OfficerLoad> = match settings.strategy {
        LoadBalancingStrategy::LeastLoaded => officers
            .iter()
            .map(|officer| {
                Ok(OfficerLoad {
                    officer_id: officer.user_id,
                    active_reviews: persistence.count_active_reviews(officer.user_id)?,
                })
            })
            .collect::<Result<_, PersistenceError>>()?,
        LoadBalancingStrategy::RoundRobin | LoadBalancingStrategy::Random => officers
            .iter()
            .map(|officer| OfficerLoad {
                officer_id: officer.user_id,
                active_reviews: 0,
            })
            .collect(),
    };

    // The counter advance is atomic in storage; the pre-increment value
    // drives this selection against the pool size at selection time.
    let counter = match settings.strategy {
        LoadBalancingStrategy::RoundRobin => {
            persistence.advance_round_robin_counter(settings.settings_id)?
        }
        LoadBalancingStrategy::LeastLoaded | LoadBalancingStrategy::Random => {
            settings.round_robin_counter
        }
    };

    let Some(selection) = select_officer(settings.strategy, &loads, counter) else {
        return Ok(None);
    };

    let now = now_timestamp();
    persistence.assign_request(request_id, selection.officer_id, &now)?;

    // Non-fatal bookkeeping: failures are logged and swallowed.
    best_effort(
        "assignment log insert",
        persistence.insert_assignment_log(
            request_id,
            selection.officer_id,
            selection.strategy.as_str(),
            &now,
        ),
    );
    best_effort(
        "officer performance upsert",
        persistence.record_officer_assignment(selection.officer_id, &now),
    );

    persistence.append_status_history(
        request_id,
        RequestStatus::ProcurementReview.as_str(),
        ChangedBy::System.to_column(),
        Some(&format!("Auto-assigned via {}", selection.strategy)),
        &now,
    )?;

    info!(
        "Auto-assigned request {} to officer {} via {}",
        request_id, selection.officer_id, selection.strategy
    );
    Ok(Some(selection.officer_id))
}

/// Transitions a request to a new status.
///
/// The coordinator sequence: read (healing legacy statuses once),
/// validate the transition, run the splintering detector when the
/// target commits new spend, apply the configured splinter policy,
/// write the status, append the history entry, and auto-assign when the
/// target is procurement review.
///
/// # Errors
///
/// Returns an error for unknown requests, invalid transitions,
/// persistence failures, or a splinter flag under the blocking policy
/// without a supervisor override.
pub fn transition_request(
    persistence: &mut Persistence,
    params: &TransitionParams,
    config: &SplinterConfig,
) -> Result<TransitionOutcome, ApiError> {
    let request = with_status_repair(persistence, |p| p.get_request(params.request_id))?;
    request.status.validate_transition(params.new_status)?;

    let settings = persistence.get_load_balancing_settings()?;
    let splinter = evaluate_splinter_gate(persistence, &request, params, settings.as_ref(), config)?;

    let now = now_timestamp();
    persistence.update_request_status(params.request_id, params.new_status.as_str(), &now)?;
    persistence.append_status_history(
        params.request_id,
        params.new_status.as_str(),
        params.actor_id,
        params.comment.as_deref(),
        &now,
    )?;

    let assigned_officer = if should_auto_assign(params.new_status, settings.as_ref()) {
        auto_assign_request(persistence, params.request_id)
    } else {
        None
    };

    info!(
        "Request {} transitioned {} -> {}",
        params.request_id, request.status, params.new_status
    );
    Ok(TransitionOutcome {
        request_id: params.request_id,
        previous_status: request.status,
        new_status: params.new_status,
        splinter,
        assigned_officer,
    })
}

/// Runs the splintering detector for a transition when it applies, and
/// enforces the configured policy on a flag.
fn evaluate_splinter_gate(
    persistence: &mut Persistence,
    request: &Request,
    params: &TransitionParams,
    settings: Option<&LoadBalancingSettings>,
    config: &SplinterConfig,
) -> Result<Option<SplinteringCheckResult>, ApiError> {
    // An absent settings row means the feature has never been
    // configured and is inactive.
    let enabled = settings.is_some_and(|s| s.splintering_enabled);
    if !enabled || !commits_new_spend(request.status, params.new_status) {
        return Ok(None);
    }

    let result = check_splintering(
        persistence,
        &SplinterCheckParams {
            requester_id: Some(request.requester_id),
            department_id: Some(request.department_id),
            total: request.total_estimated,
            window_days: None,
            threshold: None,
        },
        config,
    )?;

    if result.flagged {
        warn!(
            "splintering flag on request {}: prior {} + candidate {} = {} >= threshold {} ({} match(es) in {} days)",
            params.request_id,
            result.sum_prior,
            request.total_estimated,
            result.combined,
            result.threshold,
            result.matches.len(),
            result.window_days
        );
        if config.policy == SplinterPolicy::Block && !params.supervisor_override {
            return Err(ApiError::SplinteringBlocked {
                combined: result.combined,
                threshold: result.threshold,
            });
        }
    }

    Ok(Some(result))
}

/// Retrieves the load-balancing settings, if configured.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn get_load_balancing_settings(
    persistence: &mut Persistence,
) -> Result<Option<LoadBalancingSettings>, ApiError> {
    persistence
        .get_load_balancing_settings()
        .map_err(ApiError::from)
}

/// Creates or updates the load-balancing settings (lazy creation on
/// first write).
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn update_load_balancing_settings(
    persistence: &mut Persistence,
    params: &UpdateSettingsParams,
) -> Result<LoadBalancingSettings, ApiError> {
    persistence.upsert_load_balancing_settings(
        &SettingsUpdate {
            enabled: params.enabled,
            strategy: params.strategy.as_str(),
            auto_assign_on_approval: params.auto_assign_on_approval,
            splintering_enabled: params.splintering_enabled,
        },
        params.updated_by,
        &now_timestamp(),
    )?;
    persistence
        .get_load_balancing_settings()?
        .ok_or(ApiError::SettingsNotConfigured)
}

/// Resets the round-robin counter (explicit admin action).
///
/// # Errors
///
/// Returns `SettingsNotConfigured` if no settings row exists.
pub fn reset_round_robin_counter(
    persistence: &mut Persistence,
    updated_by: Option<i64>,
) -> Result<(), ApiError> {
    let settings = persistence
        .get_load_balancing_settings()?
        .ok_or(ApiError::SettingsNotConfigured)?;
    persistence
        .reset_round_robin_counter(settings.settings_id, updated_by, &now_timestamp())
        .map_err(ApiError::from)
}

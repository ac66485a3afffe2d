// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.

use procure_domain::{
    LoadBalancingStrategy, Money, RequestStatus, SplinteringCheckResult,
};
use serde::{Deserialize, Serialize};

/// Input for creating a draft request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateRequestParams {
    /// Human-readable reference code (normalized to uppercase).
    pub reference_code: String,
    /// The submitting user.
    pub requester_id: i64,
    /// The owning department.
    pub department_id: i64,
    /// Estimated total value in minor units.
    pub total_estimated: Money,
    /// ISO 4217 currency code; defaults to "JMD".
    pub currency: Option<String>,
}

/// Input for a status transition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransitionParams {
    /// The request to transition.
    pub request_id: i64,
    /// The target status.
    pub new_status: RequestStatus,
    /// The operator making the change; `None` for system-initiated
    /// transitions.
    pub actor_id: Option<i64>,
    /// Optional free-form comment for the history ledger.
    pub comment: Option<String>,
    /// Supervisor override: permits a splinter-flagged transition under
    /// the blocking policy.
    #[serde(default)]
    pub supervisor_override: bool,
}

/// The outcome of a completed transition.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionOutcome {
    pub request_id: i64,
    pub previous_status: RequestStatus,
    pub new_status: RequestStatus,
    /// The splintering evaluation, when one ran.
    pub splinter: Option<SplinteringCheckResult>,
    /// The officer auto-assignment selected, when one ran.
    pub assigned_officer: Option<i64>,
}

/// Input for a standalone splintering check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SplinterCheckParams {
    /// Candidate's requester; either dimension may be absent.
    pub requester_id: Option<i64>,
    /// Candidate's department.
    pub department_id: Option<i64>,
    /// Candidate total in minor units.
    pub total: Money,
    /// Override of the configured lookback window.
    pub window_days: Option<u32>,
    /// Override of the configured threshold (minor units).
    pub threshold: Option<Money>,
}

/// Admin input for the load-balancing settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateSettingsParams {
    pub enabled: bool,
    pub strategy: LoadBalancingStrategy,
    pub auto_assign_on_approval: bool,
    pub splintering_enabled: bool,
    /// The admin making the change.
    pub updated_by: Option<i64>,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging the Diesel schema and the domain types.

use crate::diesel_schema::{
    assignment_log, load_balancing_settings, officer_performance, request_status_history, requests,
    users,
};
use crate::error::PersistenceError;
use diesel::prelude::*;
use procure_audit::{ChangedBy, StatusChange};
use procure_domain::{
    LoadBalancingSettings, Money, Officer, ReferenceCode, Request, RequestStatus,
};
use std::str::FromStr;

/// Queryable struct for request rows.
///
/// `status` is nullable at the storage layer so rows written by retired
/// portal versions survive until the status repair heals them; conversion
/// to the domain type is where an unrecognized value becomes an error.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = requests)]
pub struct RequestRow {
    pub request_id: i64,
    pub reference_code: String,
    pub requester_id: i64,
    pub department_id: i64,
    pub total_estimated: i64,
    pub currency: String,
    pub status: Option<String>,
    pub current_assignee_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl RequestRow {
    /// Converts the row into the domain `Request`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UnknownStatus` if the stored status is
    /// NULL or outside the canonical set, and `InvalidStoredValue` if the
    /// reference code fails domain validation.
    pub fn into_domain(self) -> Result<Request, PersistenceError> {
        let raw_status = self.status.unwrap_or_default();
        let status = RequestStatus::from_str(&raw_status).map_err(|_| {
            PersistenceError::UnknownStatus {
                request_id: self.request_id,
                value: raw_status.clone(),
            }
        })?;
        let reference_code = ReferenceCode::new(&self.reference_code).map_err(|_| {
            PersistenceError::InvalidStoredValue {
                column: "requests.reference_code",
                value: self.reference_code.clone(),
            }
        })?;
        Ok(Request {
            request_id: self.request_id,
            reference_code,
            requester_id: self.requester_id,
            department_id: self.department_id,
            total_estimated: Money::from_minor(self.total_estimated),
            currency: self.currency,
            status,
            current_assignee_id: self.current_assignee_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable struct for new request rows.
///
/// `status` is the raw storage string; the boundary layer passes
/// canonical values, while tests seed legacy or NULL statuses through the
/// same path to exercise the repair.
#[derive(Debug, Insertable)]
#[diesel(table_name = requests)]
pub struct NewRequestRow {
    pub reference_code: String,
    pub requester_id: i64,
    pub department_id: i64,
    pub total_estimated: i64,
    pub currency: String,
    pub status: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Queryable struct for status-history rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = request_status_history)]
pub struct HistoryRow {
    pub history_id: i64,
    pub request_id: i64,
    pub status: String,
    pub changed_by: Option<i64>,
    pub comment: Option<String>,
    pub changed_at: String,
}

impl HistoryRow {
    /// Converts the row into the ledger value object.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UnknownStatus` if the stored status is
    /// outside the canonical set. History rows are written exclusively
    /// through the canonical enum, so this indicates external tampering.
    pub fn into_domain(self) -> Result<StatusChange, PersistenceError> {
        let status = RequestStatus::from_str(&self.status).map_err(|_| {
            PersistenceError::UnknownStatus {
                request_id: self.request_id,
                value: self.status.clone(),
            }
        })?;
        Ok(StatusChange {
            request_id: self.request_id,
            status,
            changed_by: ChangedBy::from_column(self.changed_by),
            comment: self.comment,
            occurred_at: self.changed_at,
        })
    }
}

/// Insertable struct for status-history rows.
///
/// The history is append-only: this is the only writable path, and no
/// update or delete mutation exists anywhere in this crate.
#[derive(Debug, Insertable)]
#[diesel(table_name = request_status_history)]
pub struct NewHistoryRow {
    pub request_id: i64,
    pub status: String,
    pub changed_by: Option<i64>,
    pub comment: Option<String>,
    pub changed_at: String,
}

/// Queryable struct for the settings row.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = load_balancing_settings)]
pub struct SettingsRow {
    pub settings_id: i64,
    pub enabled: i32,
    pub strategy: String,
    pub auto_assign_on_approval: i32,
    pub round_robin_counter: i64,
    pub splintering_enabled: i32,
    pub updated_by: Option<i64>,
    pub updated_at: String,
}

impl SettingsRow {
    /// Converts the row into the domain settings object.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidStoredValue` if the stored
    /// strategy string is unrecognized.
    pub fn into_domain(self) -> Result<LoadBalancingSettings, PersistenceError> {
        let strategy = self.strategy.parse().map_err(|_| {
            PersistenceError::InvalidStoredValue {
                column: "load_balancing_settings.strategy",
                value: self.strategy.clone(),
            }
        })?;
        Ok(LoadBalancingSettings {
            settings_id: self.settings_id,
            enabled: self.enabled != 0,
            strategy,
            auto_assign_on_approval: self.auto_assign_on_approval != 0,
            round_robin_counter: self.round_robin_counter,
            splintering_enabled: self.splintering_enabled != 0,
            updated_by: self.updated_by,
            updated_at: self.updated_at,
        })
    }
}

/// Queryable struct for user rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub user_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub role: String,
    pub department_id: Option<i64>,
    pub is_disabled: i32,
    pub created_at: String,
}

impl UserRow {
    /// Converts an officer-role row into the domain `Officer`.
    #[must_use]
    pub fn into_officer(self) -> Officer {
        Officer {
            user_id: self.user_id,
            display_name: self.display_name,
        }
    }
}

/// Queryable struct for assignment-log rows.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assignment_log)]
pub struct AssignmentLogRow {
    pub assignment_id: i64,
    pub request_id: i64,
    pub officer_id: i64,
    pub strategy: String,
    pub assigned_at: String,
}

/// Queryable struct for officer-performance counters.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = officer_performance)]
pub struct OfficerPerformanceRow {
    pub officer_id: i64,
    pub active_assignments: i32,
    pub total_assignments: i64,
    pub last_assigned_at: Option<String>,
}

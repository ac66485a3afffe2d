// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment bookkeeping mutations.
//!
//! These are the best-effort side effects of an auto-assignment: the
//! assignment log and the officer performance counters. Callers wrap
//! them so a failure here never fails the assignment itself.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::diesel_schema::{assignment_log, officer_performance};
use crate::error::PersistenceError;

backend_fn! {
/// Records one auto-assignment in the assignment log.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_assignment_log(
    conn: &mut _,
    request_id: i64,
    officer_id: i64,
    strategy: &str,
    assigned_at: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(assignment_log::table)
        .values((
            assignment_log::request_id.eq(request_id),
            assignment_log::officer_id.eq(officer_id),
            assignment_log::strategy.eq(strategy),
            assignment_log::assigned_at.eq(assigned_at),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Upserts the performance counters for an officer receiving an
/// assignment: bumps both counters and stamps the assignment time.
///
/// Update-then-insert keeps this backend-agnostic; `MySQL` has no
/// `ON CONFLICT` clause Diesel can target here.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn record_officer_assignment(
    conn: &mut _,
    officer_id: i64,
    assigned_at: &str,
) -> Result<(), PersistenceError> {
    let affected = diesel::update(
        officer_performance::table.filter(officer_performance::officer_id.eq(officer_id)),
    )
    .set((
        officer_performance::active_assignments
            .eq(officer_performance::active_assignments + 1),
        officer_performance::total_assignments
            .eq(officer_performance::total_assignments + 1),
        officer_performance::last_assigned_at.eq(Some(assigned_at)),
    ))
    .execute(conn)?;

    if affected == 0 {
        debug!("Creating performance counters for officer {}", officer_id);
        diesel::insert_into(officer_performance::table)
            .values((
                officer_performance::officer_id.eq(officer_id),
                officer_performance::active_assignments.eq(1),
                officer_performance::total_assignments.eq(1_i64),
                officer_performance::last_assigned_at.eq(Some(assigned_at)),
            ))
            .execute(conn)?;
    }
    Ok(())
}
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment bookkeeping queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{AssignmentLogRow, OfficerPerformanceRow};
use crate::diesel_schema::{assignment_log, officer_performance};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves the assignment log for a request, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_assignment_log(
    conn: &mut _,
    request_id: i64,
) -> Result<Vec<AssignmentLogRow>, PersistenceError> {
    assignment_log::table
        .filter(assignment_log::request_id.eq(request_id))
        .order(assignment_log::assignment_id.asc())
        .select(AssignmentLogRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_assignment_log: {e}")))
}
}

backend_fn! {
/// Retrieves an officer's performance counters, if any exist.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_officer_performance(
    conn: &mut _,
    officer_id: i64,
) -> Result<Option<OfficerPerformanceRow>, PersistenceError> {
    officer_performance::table
        .filter(officer_performance::officer_id.eq(officer_id))
        .select(OfficerPerformanceRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_officer_performance: {e}")))
}
}

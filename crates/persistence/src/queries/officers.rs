// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Officer pool queries.
//!
//! Officers are enabled users holding the procurement-reviewer role.
//! The pool is read in whatever order the store returns it; the
//! LEAST_LOADED strategy's tie-break keeps that arrival order, so no
//! ORDER BY is imposed here.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::UserRow;
use crate::diesel_schema::{requests, users};
use crate::error::PersistenceError;
use procure_domain::{Officer, RequestStatus, Role};

backend_fn! {
/// Lists all enabled users holding the procurement-reviewer role.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_officers(conn: &mut _) -> Result<Vec<Officer>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::role.eq(Role::ProcurementOfficer.as_str()))
        .filter(users::is_disabled.eq(0))
        .select(UserRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_officers: {e}")))?;

    Ok(rows.into_iter().map(UserRow::into_officer).collect())
}
}

backend_fn! {
/// Counts the requests currently assigned to an officer in
/// procurement review.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_active_reviews(conn: &mut _, officer_id: i64) -> Result<i64, PersistenceError> {
    requests::table
        .filter(requests::current_assignee_id.eq(officer_id))
        .filter(requests::status.eq(RequestStatus::ProcurementReview.as_str()))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_active_reviews: {e}")))
}
}

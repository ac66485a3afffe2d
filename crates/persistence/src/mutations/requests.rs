// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request mutations.
//!
//! The status column is only ever written here; the boundary layer's
//! lifecycle coordinator is the sole caller of `update_request_status`
//! and `assign_request` and sequences validation, splinter checks, and
//! history appends around them.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::NewRequestRow;
use crate::diesel_schema::requests;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a new request row and returns its id.
///
/// `status` is the raw storage string; pass a canonical value for live
/// requests. Tests seed legacy or NULL statuses through the same path to
/// exercise the status repair.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g. duplicate reference code
/// or missing requester/department).
pub fn insert_request(conn: &mut _, row: &NewRequestRow) -> Result<i64, PersistenceError> {
    debug!(
        "Inserting request {} for requester {}",
        row.reference_code, row.requester_id
    );

    diesel::insert_into(requests::table)
        .values(row)
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Writes a new status for a request and bumps `updated_at`.
///
/// # Errors
///
/// Returns `RequestNotFound` if no row was updated.
pub fn update_request_status(
    conn: &mut _,
    request_id: i64,
    new_status: &str,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    let affected = diesel::update(requests::table.filter(requests::request_id.eq(request_id)))
        .set((
            requests::status.eq(new_status),
            requests::updated_at.eq(updated_at),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::RequestNotFound(request_id));
    }
    Ok(())
}
}

backend_fn! {
/// Records the officer currently responsible for a request.
///
/// # Errors
///
/// Returns `RequestNotFound` if no row was updated.
pub fn assign_request(
    conn: &mut _,
    request_id: i64,
    officer_id: i64,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    debug!("Assigning request {} to officer {}", request_id, officer_id);

    let affected = diesel::update(requests::table.filter(requests::request_id.eq(request_id)))
        .set((
            requests::current_assignee_id.eq(Some(officer_id)),
            requests::updated_at.eq(updated_at),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::RequestNotFound(request_id));
    }
    Ok(())
}
}

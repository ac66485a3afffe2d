// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request queries.
//!
//! Reads convert rows to domain `Request` values, which is where an
//! unrecognized or NULL status surfaces as
//! `PersistenceError::UnknownStatus`. The boundary layer reacts to that
//! error by running the status repair once and retrying the read once.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::RequestRow;
use crate::diesel_schema::requests;
use crate::error::PersistenceError;
use procure_domain::Request;

backend_fn! {
/// Retrieves a request by id.
///
/// # Errors
///
/// Returns `RequestNotFound` if the row does not exist and
/// `UnknownStatus` if its stored status is outside the canonical set.
pub fn get_request(conn: &mut _, request_id: i64) -> Result<Request, PersistenceError> {
    let row: RequestRow = requests::table
        .filter(requests::request_id.eq(request_id))
        .select(RequestRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::RequestNotFound(request_id))?;

    row.into_domain()
}
}

backend_fn! {
/// Lists a requester's requests, most recent first.
///
/// # Errors
///
/// Returns `UnknownStatus` on the first row whose stored status is
/// outside the canonical set.
pub fn list_requests_for_requester(
    conn: &mut _,
    requester_id: i64,
) -> Result<Vec<Request>, PersistenceError> {
    let rows: Vec<RequestRow> = requests::table
        .filter(requests::requester_id.eq(requester_id))
        .order(requests::created_at.desc())
        .select(RequestRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_requests_for_requester: {e}")))?;

    rows.into_iter().map(RequestRow::into_domain).collect()
}
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status-history queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::HistoryRow;
use crate::diesel_schema::request_status_history;
use crate::error::PersistenceError;
use procure_audit::StatusChange;

backend_fn! {
/// Retrieves a request's status history in transition order.
///
/// Ordering by timestamp (history id breaks exact ties) reconstructs
/// the full transition history of the request.
///
/// # Errors
///
/// Returns an error if the query fails or a stored status is outside
/// the canonical set.
pub fn get_status_history(
    conn: &mut _,
    request_id: i64,
) -> Result<Vec<StatusChange>, PersistenceError> {
    let rows: Vec<HistoryRow> = request_status_history::table
        .filter(request_status_history::request_id.eq(request_id))
        .order((
            request_status_history::changed_at.asc(),
            request_status_history::history_id.asc(),
        ))
        .select(HistoryRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_status_history: {e}")))?;

    rows.into_iter().map(HistoryRow::into_domain).collect()
}
}

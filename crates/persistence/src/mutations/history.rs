// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status-history mutations.
//!
//! The history is an append-only ledger: insertion is the only mutation
//! defined here, and no update or delete exists anywhere in this crate.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::NewHistoryRow;
use crate::diesel_schema::request_status_history;
use crate::error::PersistenceError;

backend_fn! {
/// Appends one status-history entry.
///
/// `changed_by` is NULL for system-initiated changes (auto-assignment).
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_status_history(
    conn: &mut _,
    request_id: i64,
    status: &str,
    changed_by: Option<i64>,
    comment: Option<&str>,
    changed_at: &str,
) -> Result<(), PersistenceError> {
    let record = NewHistoryRow {
        request_id,
        status: status.to_string(),
        changed_by,
        comment: comment.map(ToString::to_string),
        changed_at: changed_at.to_string(),
    };

    diesel::insert_into(request_status_history::table)
        .values(&record)
        .execute(conn)?;
    Ok(())
}
}

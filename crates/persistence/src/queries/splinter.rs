// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Splintering window queries.
//!
//! Finds the committed rows that count toward a candidate's recent
//! spend: created inside the lookback window, in an active-or-approved
//! spend status, and matching the candidate's requester OR department.
//! The OR widens recall over precision: a request matches via either
//! dimension.
//!
//! Timestamps are RFC 3339 UTC text, so the window comparison is a
//! lexicographic `>=` on the column.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::RequestRow;
use crate::diesel_schema::requests;
use crate::error::PersistenceError;
use procure_domain::{ALL_STATUSES, Money, RequestStatus, SplinterMatch};

/// Storage strings for the active-or-approved spend statuses.
fn active_spend_statuses() -> Vec<&'static str> {
    ALL_STATUSES
        .iter()
        .filter(|status| status.is_active_spend())
        .map(RequestStatus::as_str)
        .collect()
}

backend_fn! {
/// Finds prior requests contributing to a splintering sum.
///
/// Either dimension may be absent; with both absent there is nothing to
/// match on and the result is empty. Reads committed rows without
/// locking; concurrent submissions can each see the same prior sum,
/// which is accepted in the current design.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_splinter_matches(
    conn: &mut _,
    requester_id: Option<i64>,
    department_id: Option<i64>,
    window_start: &str,
) -> Result<Vec<SplinterMatch>, PersistenceError> {
    let mut query = requests::table
        .filter(requests::created_at.ge(window_start))
        .filter(requests::status.eq_any(active_spend_statuses()))
        .select(RequestRow::as_select())
        .into_boxed();

    query = match (requester_id, department_id) {
        (Some(requester), Some(department)) => query.filter(
            requests::requester_id
                .eq(requester)
                .or(requests::department_id.eq(department)),
        ),
        (Some(requester), None) => query.filter(requests::requester_id.eq(requester)),
        (None, Some(department)) => query.filter(requests::department_id.eq(department)),
        (None, None) => return Ok(Vec::new()),
    };

    let rows: Vec<RequestRow> = query
        .order(requests::created_at.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("find_splinter_matches: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|row| SplinterMatch {
            request_id: row.request_id,
            reference_code: row.reference_code,
            amount: Money::from_minor(row.total_estimated),
            requester_id: row.requester_id,
            department_id: row.department_id,
            created_at: row.created_at,
        })
        .collect())
}
}

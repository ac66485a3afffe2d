// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Load-balancing settings queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::SettingsRow;
use crate::diesel_schema::load_balancing_settings;
use crate::error::PersistenceError;
use procure_domain::LoadBalancingSettings;

backend_fn! {
/// Retrieves the authoritative load-balancing settings row, if any.
///
/// At most one row should exist; if duplicates ever do, the
/// most-recently-updated row wins (settings id breaks exact timestamp
/// ties). A missing row means the feature has never been configured and
/// is treated as inactive by callers, never as an error.
///
/// # Errors
///
/// Returns an error if the query fails or the stored strategy string is
/// unrecognized.
pub fn get_load_balancing_settings(
    conn: &mut _,
) -> Result<Option<LoadBalancingSettings>, PersistenceError> {
    let row: Option<SettingsRow> = load_balancing_settings::table
        .order((
            load_balancing_settings::updated_at.desc(),
            load_balancing_settings::settings_id.desc(),
        ))
        .select(SettingsRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_load_balancing_settings: {e}")))?;

    row.map(SettingsRow::into_domain).transpose()
}
}

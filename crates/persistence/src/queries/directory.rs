// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::diesel_schema::departments;
use crate::error::PersistenceError;
use procure_domain::Department;

backend_fn! {
/// Lists all departments, alphabetically.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_departments(conn: &mut _) -> Result<Vec<Department>, PersistenceError> {
    let rows: Vec<(i64, String)> = departments::table
        .order(departments::name.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_departments: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|(department_id, name)| Department {
            department_id,
            name,
        })
        .collect())
}
}

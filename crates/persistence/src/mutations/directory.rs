// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and department directory mutations.
//!
//! The engine treats the directory as read-only input; these mutations
//! exist so the system (and its tests) can stand up a working directory
//! without the out-of-scope LDAP synchronization layer.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{departments, users};
use crate::error::PersistenceError;

backend_fn! {
/// Creates a department and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g. duplicate name).
pub fn create_department(conn: &mut _, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(departments::table)
        .values(departments::name.eq(name))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Creates a user and returns their id.
///
/// The login name is normalized to lowercase for case-insensitive
/// uniqueness.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g. duplicate login name).
pub fn create_user(
    conn: &mut _,
    login_name: &str,
    display_name: &str,
    role: &str,
    department_id: Option<i64>,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let normalized_login: String = login_name.to_lowercase();

    info!(
        "Creating user {} with role {}",
        normalized_login, role
    );

    diesel::insert_into(users::table)
        .values((
            users::login_name.eq(&normalized_login),
            users::display_name.eq(display_name),
            users::role.eq(role),
            users::department_id.eq(department_id),
            users::is_disabled.eq(0),
            users::created_at.eq(created_at),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Disables a user.
///
/// Disabled officers drop out of the auto-assignment pool; existing
/// assignments are left in place.
///
/// # Errors
///
/// Returns `NotFound` if no row was updated.
pub fn disable_user(conn: &mut _, user_id: i64) -> Result<(), PersistenceError> {
    let affected = diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set(users::is_disabled.eq(1))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("user {user_id}")));
    }
    Ok(())
}
}

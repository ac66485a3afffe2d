// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Load-balancing settings mutations.
//!
//! The settings row is created lazily on the first configuration write.
//! The round-robin counter is the one piece of shared mutable state
//! touched by concurrent assignments; it is advanced only through
//! `advance_round_robin_counter`, which performs the read-modify-write
//! inside a transaction.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::load_balancing_settings;
use crate::error::PersistenceError;

/// Admin-supplied settings values for an upsert.
///
/// Configuration writes never touch the round-robin counter; resetting
/// it is its own explicit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsUpdate<'a> {
    pub enabled: bool,
    pub strategy: &'a str,
    pub auto_assign_on_approval: bool,
    pub splintering_enabled: bool,
}

backend_fn! {
/// Creates or updates the authoritative settings row.
///
/// If a row exists, the most-recently-updated one is updated in place;
/// otherwise a row is created with a zero round-robin counter. Returns
/// the settings row id.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_load_balancing_settings(
    conn: &mut _,
    update: &SettingsUpdate<'_>,
    updated_by: Option<i64>,
    updated_at: &str,
) -> Result<i64, PersistenceError> {
    let existing: Option<i64> = load_balancing_settings::table
        .select(load_balancing_settings::settings_id)
        .order((
            load_balancing_settings::updated_at.desc(),
            load_balancing_settings::settings_id.desc(),
        ))
        .first(conn)
        .optional()?;

    if let Some(settings_id) = existing {
        debug!("Updating load-balancing settings row {}", settings_id);
        diesel::update(
            load_balancing_settings::table
                .filter(load_balancing_settings::settings_id.eq(settings_id)),
        )
        .set((
            load_balancing_settings::enabled.eq(i32::from(update.enabled)),
            load_balancing_settings::strategy.eq(update.strategy),
            load_balancing_settings::auto_assign_on_approval
                .eq(i32::from(update.auto_assign_on_approval)),
            load_balancing_settings::splintering_enabled
                .eq(i32::from(update.splintering_enabled)),
            load_balancing_settings::updated_by.eq(updated_by),
            load_balancing_settings::updated_at.eq(updated_at),
        ))
        .execute(conn)?;
        return Ok(settings_id);
    }

    info!("Creating load-balancing settings row");
    diesel::insert_into(load_balancing_settings::table)
        .values((
            load_balancing_settings::enabled.eq(i32::from(update.enabled)),
            load_balancing_settings::strategy.eq(update.strategy),
            load_balancing_settings::auto_assign_on_approval
                .eq(i32::from(update.auto_assign_on_approval)),
            load_balancing_settings::round_robin_counter.eq(0_i64),
            load_balancing_settings::splintering_enabled
                .eq(i32::from(update.splintering_enabled)),
            load_balancing_settings::updated_by.eq(updated_by),
            load_balancing_settings::updated_at.eq(updated_at),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Atomically advances the round-robin counter by 1 and returns the
/// pre-increment value.
///
/// The increment and the read-back run inside one transaction so two
/// concurrent assignments cannot observe the same counter value; the
/// row lock (`MySQL`) or database write lock (`SQLite`) serializes them.
///
/// # Errors
///
/// Returns `NotFound` if the settings row does not exist.
pub fn advance_round_robin_counter(
    conn: &mut _,
    settings_id: i64,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        let affected = diesel::update(
            load_balancing_settings::table
                .filter(load_balancing_settings::settings_id.eq(settings_id)),
        )
        .set(
            load_balancing_settings::round_robin_counter
                .eq(load_balancing_settings::round_robin_counter + 1),
        )
        .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "load_balancing_settings row {settings_id}"
            )));
        }

        let after: i64 = load_balancing_settings::table
            .filter(load_balancing_settings::settings_id.eq(settings_id))
            .select(load_balancing_settings::round_robin_counter)
            .first(conn)?;

        Ok(after - 1)
    })
}
}

backend_fn! {
/// Resets the round-robin counter to zero.
///
/// This is the only permitted reset and exists for explicit admin
/// action; assignments never reset the counter.
///
/// # Errors
///
/// Returns `NotFound` if the settings row does not exist.
pub fn reset_round_robin_counter(
    conn: &mut _,
    settings_id: i64,
    updated_by: Option<i64>,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    info!("Resetting round-robin counter on settings row {}", settings_id);

    let affected = diesel::update(
        load_balancing_settings::table
            .filter(load_balancing_settings::settings_id.eq(settings_id)),
    )
    .set((
        load_balancing_settings::round_robin_counter.eq(0_i64),
        load_balancing_settings::updated_by.eq(updated_by),
        load_balancing_settings::updated_at.eq(updated_at),
    ))
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "load_balancing_settings row {settings_id}"
        )));
    }
    Ok(())
}
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod backend_validation_tests;
mod history_tests;

use crate::{NewRequestRow, Persistence, SettingsUpdate};
use time::OffsetDateTime;
use time::macros::format_description;

/// Fixed-precision timestamp format.
///
/// Every timestamp in the system is written with whole-second precision
/// so lexicographic order on the text columns equals chronological
/// order; mixing fractional-second precision would break that.
pub fn format_timestamp(moment: OffsetDateTime) -> String {
    moment
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
        ))
        .expect("timestamp formatting")
}

pub fn now_utc_string() -> String {
    format_timestamp(OffsetDateTime::now_utc())
}

pub fn days_ago_string(days: i64) -> String {
    format_timestamp(OffsetDateTime::now_utc() - time::Duration::days(days))
}

/// The seeded directory rows shared by most tests.
pub struct TestDirectory {
    pub department_id: i64,
    pub requester_id: i64,
    pub officer_ids: Vec<i64>,
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// Seeds a department, one requester, and `officer_count` officers.
pub fn seed_directory(persistence: &mut Persistence, officer_count: usize) -> TestDirectory {
    let now = now_utc_string();
    let department_id = persistence
        .create_department("Facilities")
        .expect("department");
    let requester_id = persistence
        .create_user("mbrown", "Marcia Brown", "requester", Some(department_id), &now)
        .expect("requester");
    let officer_ids = (0..officer_count)
        .map(|i| {
            persistence
                .create_user(
                    &format!("officer{i}"),
                    &format!("Officer {i}"),
                    "procurement_officer",
                    Some(department_id),
                    &now,
                )
                .expect("officer")
        })
        .collect();
    TestDirectory {
        department_id,
        requester_id,
        officer_ids,
    }
}

/// Inserts a request with a raw status string (or NULL) and a given
/// creation time. Amounts are major JMD units.
pub fn seed_request(
    persistence: &mut Persistence,
    directory: &TestDirectory,
    reference_code: &str,
    status: Option<&str>,
    total_major: i64,
    created_at: &str,
) -> i64 {
    persistence
        .insert_request(&NewRequestRow {
            reference_code: reference_code.to_string(),
            requester_id: directory.requester_id,
            department_id: directory.department_id,
            total_estimated: total_major * 100,
            currency: String::from("JMD"),
            status: status.map(String::from),
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
        })
        .expect("request insert")
}

/// Writes an enabled settings row with the given strategy.
pub fn enable_load_balancing(persistence: &mut Persistence, strategy: &str) -> i64 {
    persistence
        .upsert_load_balancing_settings(
            &SettingsUpdate {
                enabled: true,
                strategy,
                auto_assign_on_approval: true,
                splintering_enabled: true,
            },
            None,
            &now_utc_string(),
        )
        .expect("settings upsert")
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod assignment_tests;
mod coordinator_tests;

use crate::clock::now_timestamp;
use crate::{CreateRequestParams, UpdateSettingsParams, update_load_balancing_settings};
use procure_domain::{LoadBalancingStrategy, Money, Request};
use procure_persistence::{NewRequestRow, Persistence};

/// The seeded directory rows shared by most tests.
pub struct TestWorld {
    pub persistence: Persistence,
    pub department_id: i64,
    pub requester_id: i64,
    pub officer_ids: Vec<i64>,
}

/// Stands up an in-memory store with a department, a requester, and
/// `officer_count` procurement officers.
pub fn setup(officer_count: usize) -> TestWorld {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let now = now_timestamp();
    let department_id = persistence.create_department("Facilities").unwrap();
    let requester_id = persistence
        .create_user("mbrown", "Marcia Brown", "requester", Some(department_id), &now)
        .unwrap();
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
                .unwrap()
        })
        .collect();
    TestWorld {
        persistence,
        department_id,
        requester_id,
        officer_ids,
    }
}

impl TestWorld {
    /// Writes an enabled settings row with auto-assignment and
    /// splintering on.
    pub fn enable_load_balancing(&mut self, strategy: LoadBalancingStrategy) {
        update_load_balancing_settings(
            &mut self.persistence,
            &UpdateSettingsParams {
                enabled: true,
                strategy,
                auto_assign_on_approval: true,
                splintering_enabled: true,
                updated_by: None,
            },
        )
        .unwrap();
    }

    /// Creates a draft request through the boundary operation.
    pub fn create_draft(&mut self, reference_code: &str, total_major: i64) -> Request {
        crate::create_request(
            &mut self.persistence,
            &CreateRequestParams {
                reference_code: reference_code.to_string(),
                requester_id: self.requester_id,
                department_id: self.department_id,
                total_estimated: Money::from_major(total_major),
                currency: None,
            },
        )
        .unwrap()
    }

    /// Seeds a request row with a raw status and the current timestamp,
    /// bypassing the boundary (prior-spend rows, legacy rows).
    pub fn seed_raw_request(
        &mut self,
        reference_code: &str,
        status: Option<&str>,
        total_major: i64,
    ) -> i64 {
        let now = now_timestamp();
        self.persistence
            .insert_request(&NewRequestRow {
                reference_code: reference_code.to_string(),
                requester_id: self.requester_id,
                department_id: self.department_id,
                total_estimated: Money::from_major(total_major).minor(),
                currency: String::from("JMD"),
                status: status.map(String::from),
                created_at: now.clone(),
                updated_at: now,
            })
            .unwrap()
    }
}

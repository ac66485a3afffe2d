// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status repair.
//!
//! Heals request rows whose status was written under retired status
//! names (or never written at all) so downstream reads never hit an
//! unrecognized value. Every invocation runs exactly eight passes,
//! unconditionally and in order:
//!
//! 1. NULL or empty status becomes `DRAFT`
//! 2..7. the six legacy remap groups from
//!    `procure_domain::LEGACY_STATUS_REMAPS`
//! 8. a catch-all that demotes anything still outside the canonical set
//!    to `DRAFT`
//!
//! The catch-all is a lossy repair: it forgets how far a request had
//! progressed. Callers log the per-pass counts so the loss is visible.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::diesel_schema::requests;
use crate::error::PersistenceError;
use procure_domain::{ALL_STATUSES, LEGACY_STATUS_REMAPS, RequestStatus};

/// The number of update passes one repair invocation always runs.
pub const REPAIR_PASS_COUNT: usize = 2 + LEGACY_STATUS_REMAPS.len();

/// One repair pass and the number of rows it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairPass {
    /// What the pass rewrote, e.g. `PENDING|UNDER_REVIEW -> SUBMITTED`.
    pub description: String,
    /// Rows rewritten by this pass.
    pub rows_affected: usize,
}

/// The outcome of one repair invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairSummary {
    /// All passes in execution order; always `REPAIR_PASS_COUNT` long.
    pub passes: Vec<RepairPass>,
    /// Total rows rewritten across all passes.
    pub total_rows: usize,
}

impl RepairSummary {
    /// Rows the final catch-all pass demoted to `DRAFT`.
    ///
    /// Non-zero counts here mean progress information was lost and are
    /// worth surfacing louder than the remap passes.
    #[must_use]
    pub fn catch_all_rows(&self) -> usize {
        self.passes.last().map_or(0, |pass| pass.rows_affected)
    }
}

backend_fn! {
/// Repairs invalid and legacy status values in storage.
///
/// Each pass is independent and unconditional; a zero-row pass still
/// runs and still appears in the summary. Running the repair twice in
/// succession is idempotent: the second invocation touches zero rows.
///
/// # Errors
///
/// Returns an error if any update fails. Passes before the failure may
/// already be committed; the repair is safe to re-run.
pub fn repair_statuses(conn: &mut _) -> Result<RepairSummary, PersistenceError> {
    let draft = RequestStatus::Draft.as_str();
    let mut passes: Vec<RepairPass> = Vec::with_capacity(REPAIR_PASS_COUNT);

    // Pass 1: rows that never had a status.
    let rows_affected = diesel::update(
        requests::table.filter(requests::status.is_null().or(requests::status.eq(""))),
    )
    .set(requests::status.eq(draft))
    .execute(conn)?;
    passes.push(RepairPass {
        description: format!("NULL|empty -> {draft}"),
        rows_affected,
    });

    // Passes 2..7: fixed legacy-to-canonical remaps.
    for (legacy_values, target) in LEGACY_STATUS_REMAPS {
        let rows_affected = diesel::update(
            requests::table.filter(requests::status.eq_any(legacy_values.iter().copied())),
        )
        .set(requests::status.eq(target.as_str()))
        .execute(conn)?;
        passes.push(RepairPass {
            description: format!("{} -> {}", legacy_values.join("|"), target.as_str()),
            rows_affected,
        });
    }

    // Pass 8: catch-all. Anything still outside the canonical set is
    // demoted to DRAFT.
    let canonical: Vec<&'static str> =
        ALL_STATUSES.iter().map(RequestStatus::as_str).collect();
    let rows_affected = diesel::update(
        requests::table.filter(
            requests::status
                .is_not_null()
                .and(requests::status.ne_all(canonical)),
        ),
    )
    .set(requests::status.eq(draft))
    .execute(conn)?;
    passes.push(RepairPass {
        description: format!("catch-all -> {draft}"),
        rows_affected,
    });

    let total_rows: usize = passes.iter().map(|pass| pass.rows_affected).sum();
    if total_rows > 0 {
        info!("Status repair rewrote {} row(s)", total_rows);
        for pass in &passes {
            if pass.rows_affected > 0 {
                debug!(
                    "repair pass '{}' touched {} row(s)",
                    pass.description, pass.rows_affected
                );
            }
        }
    }

    Ok(RepairSummary { passes, total_rows })
}
}

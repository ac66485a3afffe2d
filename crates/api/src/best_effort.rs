// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort side-effect wrapper.
//!
//! Assignment bookkeeping (the assignment log, officer performance
//! counters) must never fail the assignment that triggered it. Routing
//! every such write through this one wrapper makes the
//! log-and-discard policy visible and testable in one place instead of
//! scattered try/catch at each call site.

use procure_persistence::PersistenceError;
use tracing::warn;

/// Runs a non-critical persistence result: failures are logged and
/// discarded, successes pass through.
pub fn best_effort<T>(context: &'static str, result: Result<T, PersistenceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("best-effort {context} failed: {err}");
            None
        }
    }
}

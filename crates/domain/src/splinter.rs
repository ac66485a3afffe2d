// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Splintering detection value objects.
//!
//! Splintering is the fragmentation of one large purchase into several
//! smaller requests so that each stays below an approval threshold a
//! combined request would trigger. The detector computes these values;
//! it never persists them.

use crate::types::Money;
use serde::{Deserialize, Serialize};

/// A prior request that contributed to a splintering sum.
///
/// Carried in full so a reviewer can be shown the evidence behind a
/// flag, not just the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplinterMatch {
    /// The prior request's identity.
    pub request_id: i64,
    /// The prior request's reference code.
    pub reference_code: String,
    /// The prior request's estimated total.
    pub amount: Money,
    /// The user who submitted the prior request.
    pub requester_id: i64,
    /// The department that owns the prior request.
    pub department_id: i64,
    /// When the prior request was created (RFC 3339 UTC).
    pub created_at: String,
}

/// The computed result of a splintering check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplinteringCheckResult {
    /// Whether the combined spend crosses the threshold.
    pub flagged: bool,
    /// The threshold the check ran against.
    pub threshold: Money,
    /// The lookback window in calendar days.
    pub window_days: u32,
    /// Sum of matching prior requests' estimates.
    pub sum_prior: Money,
    /// `sum_prior` plus the candidate's total.
    pub combined: Money,
    /// The prior requests contributing to `sum_prior`.
    pub matches: Vec<SplinterMatch>,
}

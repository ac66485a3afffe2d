// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Splintering evaluation.
//!
//! The detector is a pure query: given a candidate amount and the prior
//! requests the persistence layer found inside the lookback window, it
//! computes the combined spend and compares it to the threshold. It
//! never blocks or mutates a request; what a caller does with a flag is
//! policy, decided in the coordinator.
//!
//! Because the window query reads committed rows without locking, two
//! requests submitted concurrently by the same requester can each be
//! evaluated against the same prior sum and both pass individually.
//! That race is accepted in the current design.

use procure_domain::{Money, SplinterMatch, SplinteringCheckResult};

/// Evaluates a candidate amount against prior spend inside the window.
///
/// `matches` is the set of prior requests the persistence layer found:
/// created inside the window, in an active-or-approved-spend status, and
/// owned by the candidate's requester or department. The sum saturates
/// rather than wraps if stored amounts are pathological.
#[must_use]
pub fn evaluate(
    candidate_total: Money,
    matches: Vec<SplinterMatch>,
    window_days: u32,
    threshold: Money,
) -> SplinteringCheckResult {
    let sum_prior = matches
        .iter()
        .fold(Money::ZERO, |acc, m| acc.saturating_add(m.amount));
    let combined = sum_prior.saturating_add(candidate_total);
    SplinteringCheckResult {
        flagged: combined >= threshold,
        threshold,
        window_days,
        sum_prior,
        combined,
        matches,
    }
}

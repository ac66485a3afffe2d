// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Officer selection strategies.
//!
//! Each strategy is a pure function over the officer pool supplied by the
//! caller; persistence of the resulting assignment (and of the round-robin
//! counter advance) happens elsewhere. An empty pool yields no selection
//! from every strategy; it is never an error.

use procure_domain::LoadBalancingStrategy;

/// An officer together with their current open procurement-review load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfficerLoad {
    /// The officer's user id.
    pub officer_id: i64,
    /// Count of requests currently assigned to the officer in
    /// procurement review.
    pub active_reviews: i64,
}

/// The outcome of a strategy dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// The selected officer's user id.
    pub officer_id: i64,
    /// The strategy that produced the selection.
    pub strategy: LoadBalancingStrategy,
}

/// Selects the officer with the fewest open procurement reviews.
///
/// Ties keep the pool's arrival order: a stable sort by load means the
/// first officer the caller listed wins among equals. The tie-break is
/// not keyed on id; callers that need deterministic ties must order the
/// pool themselves.
#[must_use]
pub fn select_least_loaded(loads: &[OfficerLoad]) -> Option<i64> {
    let mut ranked: Vec<OfficerLoad> = loads.to_vec();
    ranked.sort_by_key(|officer| officer.active_reviews);
    ranked.first().map(|officer| officer.officer_id)
}

/// Selects the officer at `counter mod pool size`, with the pool sorted
/// ascending by id.
///
/// The modulo uses the officer count at selection time, so growing or
/// shrinking the pool changes future rotation without a counter reset.
/// The caller is responsible for advancing the persisted counter
/// atomically.
#[must_use]
pub fn select_round_robin(officer_ids: &[i64], counter: i64) -> Option<i64> {
    if officer_ids.is_empty() {
        return None;
    }
    let mut sorted: Vec<i64> = officer_ids.to_vec();
    sorted.sort_unstable();
    let len = i64::try_from(sorted.len()).ok()?;
    let index = usize::try_from(counter.rem_euclid(len)).ok()?;
    sorted.get(index).copied()
}

/// Selects an officer uniformly at random.
///
/// No state is consulted or mutated beyond the assignment the caller
/// performs with the result.
#[must_use]
pub fn select_random(officer_ids: &[i64]) -> Option<i64> {
    if officer_ids.is_empty() {
        return None;
    }
    let index = rand::random_range(0..officer_ids.len());
    officer_ids.get(index).copied()
}

/// Dispatches to the configured strategy.
///
/// `loads` carries the pool in arrival order together with per-officer
/// review counts; strategies that do not need the counts ignore them.
#[must_use]
pub fn select_officer(
    strategy: LoadBalancingStrategy,
    loads: &[OfficerLoad],
    round_robin_counter: i64,
) -> Option<Selection> {
    let officer_ids: Vec<i64> = loads.iter().map(|officer| officer.officer_id).collect();
    let officer_id = match strategy {
        LoadBalancingStrategy::LeastLoaded => select_least_loaded(loads),
        LoadBalancingStrategy::RoundRobin => select_round_robin(&officer_ids, round_robin_counter),
        LoadBalancingStrategy::Random => select_random(&officer_ids),
    }?;
    Some(Selection {
        officer_id,
        strategy,
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decision core for the request lifecycle and assignment engine.
//!
//! Everything in this crate is a pure function of its arguments: officer
//! selection, splintering evaluation, and the lifecycle predicates the
//! coordinator sequences around a status transition. Persistence and
//! policy application live in the boundary crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod balancer;
mod lifecycle;
mod splinter;

pub use balancer::{
    OfficerLoad, Selection, select_least_loaded, select_officer, select_random,
    select_round_robin,
};
pub use lifecycle::{SplinterPolicy, commits_new_spend, should_auto_assign};
pub use splinter::evaluate;

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Procure request portal.
//!
//! The route layer talks to the engine exclusively through the
//! operations in this crate: status transitions (with reactive legacy
//! healing), splintering checks, auto-assignment, the status repair,
//! and the load-balancing settings. Everything takes the persistence
//! adapter and configuration as explicit arguments; there is no ambient
//! state.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod best_effort;
mod clock;
mod config;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use best_effort::best_effort;
pub use clock::now_timestamp;
pub use config::{
    DEFAULT_SPLINTER_THRESHOLD_JMD, DEFAULT_SPLINTER_WINDOW_DAYS, SplinterConfig,
};
pub use error::ApiError;
pub use handlers::{
    auto_assign_request, check_splintering, create_request, get_load_balancing_settings,
    get_request, get_request_history, repair_statuses, reset_round_robin_counter,
    transition_request, update_load_balancing_settings,
};
pub use request_response::{
    CreateRequestParams, SplinterCheckParams, TransitionOutcome, TransitionParams,
    UpdateSettingsParams,
};

// The trigger predicate is part of the external contract; re-export it
// so the route layer can consult it without depending on the engine
// crate directly.
pub use procure_engine::should_auto_assign;

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Load-balancing configuration.
//!
//! A single settings row governs auto-assignment behavior. The row is
//! created lazily on the first configuration write and is never deleted;
//! if duplicates ever exist, the most-recently-updated row is
//! authoritative.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Officer-selection strategies for auto-assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadBalancingStrategy {
    /// Select the officer with the fewest open procurement reviews.
    LeastLoaded,
    /// Rotate through officers in ascending id order.
    RoundRobin,
    /// Select uniformly at random.
    Random,
}

impl LoadBalancingStrategy {
    /// Returns the string representation of the strategy.
    ///
    /// This is used for persistence and for the history comment written
    /// when an auto-assignment is recorded.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LeastLoaded => "LEAST_LOADED",
            Self::RoundRobin => "ROUND_ROBIN",
            Self::Random => "RANDOM",
        }
    }
}

impl FromStr for LoadBalancingStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEAST_LOADED" => Ok(Self::LeastLoaded),
            "ROUND_ROBIN" => Ok(Self::RoundRobin),
            "RANDOM" => Ok(Self::Random),
            _ => Err(DomainError::InvalidStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for LoadBalancingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The load-balancing settings row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancingSettings {
    /// Database identity of the settings row.
    pub settings_id: i64,
    /// Master switch for the load balancer.
    pub enabled: bool,
    /// The configured selection strategy.
    pub strategy: LoadBalancingStrategy,
    /// Whether entering procurement review triggers auto-assignment.
    pub auto_assign_on_approval: bool,
    /// Monotonic rotation index for `ROUND_ROBIN`.
    ///
    /// Advanced by exactly 1 per round-robin assignment; reset only by
    /// explicit admin action.
    pub round_robin_counter: i64,
    /// Whether the splintering detector runs on spend-committing
    /// transitions.
    pub splintering_enabled: bool,
    /// The admin who last updated the row, if any.
    pub updated_by: Option<i64>,
    /// Last-update timestamp (RFC 3339 UTC).
    pub updated_at: String,
}

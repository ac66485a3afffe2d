// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Splintering configuration.
//!
//! Defaults come from the environment so deployments can tune the
//! window and threshold without a rebuild; both remain overridable per
//! check call. Engine operations take this object as an argument rather
//! than reading ambient state, which keeps them testable.

use procure_domain::Money;
use procure_engine::SplinterPolicy;
use tracing::warn;

/// Default lookback window in calendar days.
pub const DEFAULT_SPLINTER_WINDOW_DAYS: u32 = 30;

/// Default threshold in major JMD units.
pub const DEFAULT_SPLINTER_THRESHOLD_JMD: i64 = 250_000;

/// Deployment-level splintering configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplinterConfig {
    /// Lookback window in calendar days.
    pub window_days: u32,
    /// Combined-spend threshold.
    pub threshold: Money,
    /// What a flag does to the transition that raised it.
    pub policy: SplinterPolicy,
}

impl Default for SplinterConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_SPLINTER_WINDOW_DAYS,
            threshold: Money::from_major(DEFAULT_SPLINTER_THRESHOLD_JMD),
            policy: SplinterPolicy::LogOnly,
        }
    }
}

impl SplinterConfig {
    /// Builds the configuration from the environment.
    ///
    /// Reads `SPLINTER_WINDOW_DAYS`, `SPLINTER_THRESHOLD_JMD` (major
    /// units), and `SPLINTER_POLICY` (`LOG_ONLY` | `BLOCK`). Unset or
    /// unparseable values fall back to the defaults with a warning;
    /// a misconfigured deployment must not start blocking submissions.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let window_days = match std::env::var("SPLINTER_WINDOW_DAYS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("SPLINTER_WINDOW_DAYS '{raw}' is not a number; using default");
                defaults.window_days
            }),
            Err(_) => defaults.window_days,
        };

        let threshold = match std::env::var("SPLINTER_THRESHOLD_JMD") {
            Ok(raw) => raw.parse().map(Money::from_major).unwrap_or_else(|_| {
                warn!("SPLINTER_THRESHOLD_JMD '{raw}' is not a number; using default");
                defaults.threshold
            }),
            Err(_) => defaults.threshold,
        };

        let policy = match std::env::var("SPLINTER_POLICY") {
            Ok(raw) => SplinterPolicy::from_config(&raw),
            Err(_) => defaults.policy,
        };

        Self {
            window_days,
            threshold,
            policy,
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use procure_domain::{DomainError, Money};
use procure_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// These represent the boundary contract; HTTP status mapping is the
/// server's concern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request does not exist.
    #[error("Request not found: {0}")]
    RequestNotFound(i64),

    /// A domain rule was violated (invalid transition, bad input).
    #[error("{0}")]
    Validation(#[from] DomainError),

    /// The splintering policy refused the transition.
    ///
    /// Raised only under the blocking policy, and only without a
    /// supervisor override.
    #[error(
        "Submission blocked: combined recent spend {combined} meets the splintering threshold {threshold}"
    )]
    SplinteringBlocked {
        /// Prior spend plus the candidate total.
        combined: Money,
        /// The threshold the check ran against.
        threshold: Money,
    },

    /// Load balancing has never been configured.
    #[error("Load balancing has not been configured")]
    SettingsNotConfigured,

    /// The persistence layer failed.
    #[error("Persistence failure: {0}")]
    Persistence(PersistenceError),
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::RequestNotFound(id) => Self::RequestNotFound(id),
            other => Self::Persistence(other),
        }
    }
}

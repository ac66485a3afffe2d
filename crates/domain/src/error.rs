// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A status string is not a member of the canonical status set.
    InvalidRequestStatus {
        /// The unrecognized status value.
        status: String,
    },
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// A load-balancing strategy string is not recognized.
    InvalidStrategy(String),
    /// A user role string is not recognized.
    InvalidRole(String),
    /// A request reference code is empty or malformed.
    InvalidReferenceCode(String),
    /// A monetary amount is negative where a non-negative amount is required.
    NegativeAmount {
        /// The offending amount in minor units.
        minor: i64,
    },
    /// A currency code is empty or malformed.
    InvalidCurrency(String),
    /// The splintering window must cover at least one day.
    InvalidWindowDays {
        /// The invalid window length.
        days: u32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestStatus { status } => {
                write!(f, "Invalid request status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition {from} -> {to}: {reason}")
            }
            Self::InvalidStrategy(value) => {
                write!(f, "Invalid load-balancing strategy: '{value}'")
            }
            Self::InvalidRole(value) => write!(f, "Invalid user role: '{value}'"),
            Self::InvalidReferenceCode(msg) => write!(f, "Invalid reference code: {msg}"),
            Self::NegativeAmount { minor } => {
                write!(f, "Amount must not be negative: {minor} minor units")
            }
            Self::InvalidCurrency(msg) => write!(f, "Invalid currency: {msg}"),
            Self::InvalidWindowDays { days } => {
                write!(f, "Splintering window must be at least one day, got {days}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

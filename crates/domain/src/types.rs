// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::status::RequestStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A monetary amount stored as an integer count of minor units (cents).
///
/// All arithmetic on amounts is integer arithmetic; the engine never
/// touches floating point for money. Configuration and API input supply
/// major units (whole dollars) and are converted on construction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units (cents).
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from major units (whole currency units).
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Adds two amounts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_add(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Validates that the amount is non-negative.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeAmount` for negative amounts.
    pub const fn require_non_negative(&self) -> Result<(), DomainError> {
        if self.0 < 0 {
            return Err(DomainError::NegativeAmount { minor: self.0 });
        }
        Ok(())
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let major = self.0 / 100;
        let minor = (self.0 % 100).abs();
        write!(f, "{major}.{minor:02}")
    }
}

/// A human-readable request reference code (e.g. "PR-2026-00042").
///
/// Codes are normalized to uppercase so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceCode {
    value: String,
}

impl ReferenceCode {
    /// Creates a new reference code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReferenceCode` if the code is empty,
    /// longer than 32 characters, or contains characters other than
    /// alphanumerics and dashes.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidReferenceCode(
                "reference code must not be empty".to_string(),
            ));
        }
        if trimmed.len() > 32 {
            return Err(DomainError::InvalidReferenceCode(format!(
                "reference code exceeds 32 characters: '{trimmed}'"
            )));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomainError::InvalidReferenceCode(format!(
                "reference code contains invalid characters: '{trimmed}'"
            )));
        }
        Ok(Self {
            value: trimmed.to_uppercase(),
        })
    }

    /// Returns the reference code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Roles a portal user may hold.
///
/// The engine only distinguishes procurement officers (auto-assignment
/// candidates) from everyone else; the remaining roles exist so the user
/// directory is a conventional role-typed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Submits procurement requests.
    Requester,
    /// Reviews requests in the procurement stage; auto-assignment target.
    ProcurementOfficer,
    /// Administers system configuration.
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requester => "requester",
            Self::ProcurementOfficer => "procurement_officer",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requester" => Ok(Self::Requester),
            "procurement_officer" => Ok(Self::ProcurementOfficer),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

/// A user holding the procurement-reviewer role.
///
/// Officers are a role-filtered view of the user directory; the engine
/// reads them and never writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    /// The user id of the officer.
    pub user_id: i64,
    /// The officer's display name.
    pub display_name: String,
}

/// A department that owns procurement requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub department_id: i64,
    pub name: String,
}

/// A procurement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Database identity.
    pub request_id: i64,
    /// Human-readable reference code.
    pub reference_code: ReferenceCode,
    /// The submitting user.
    pub requester_id: i64,
    /// The owning department.
    pub department_id: i64,
    /// Estimated total value of the purchase.
    pub total_estimated: Money,
    /// ISO 4217 currency code (e.g. "JMD").
    pub currency: String,
    /// Current pipeline status.
    pub status: RequestStatus,
    /// Officer currently responsible, if any.
    pub current_assignee_id: Option<i64>,
    /// Creation timestamp (RFC 3339 UTC).
    pub created_at: String,
    /// Last-modification timestamp (RFC 3339 UTC).
    pub updated_at: String,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request status tracking and transition logic.
//!
//! This module defines the canonical request status set, the approval
//! pipeline transitions, and the remap table used to heal legacy status
//! values found in storage. Status transitions are operator-initiated;
//! the system never advances a request based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Canonical request statuses for the approval pipeline.
///
/// The pipeline is ordered but not strictly linear; some paths skip
/// stages (e.g. department approval may route directly to procurement
/// review for small requests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Request is being drafted and has not entered the pipeline
    Draft,
    /// Request submitted by the requester
    Submitted,
    /// Under review by the requester's department head
    DepartmentReview,
    /// Returned to the requester by the department for rework
    DepartmentReturned,
    /// Approved by the department
    DepartmentApproved,
    /// Under executive review (high-value requests)
    ExecutiveReview,
    /// Under head-of-department review
    HodReview,
    /// Under review by a procurement officer
    ProcurementReview,
    /// Under finance review
    FinanceReview,
    /// Returned to the requester by finance for rework
    FinanceReturned,
    /// Under budget manager review
    BudgetManagerReview,
    /// Approved by finance
    FinanceApproved,
    /// Purchase order sent to the vendor
    SentToVendor,
    /// Request fulfilled and closed
    Closed,
    /// Request rejected
    Rejected,
}

/// All canonical statuses, in pipeline order.
///
/// The repair catch-all treats any stored value outside this set as
/// unrecognized.
pub const ALL_STATUSES: [RequestStatus; 15] = [
    RequestStatus::Draft,
    RequestStatus::Submitted,
    RequestStatus::DepartmentReview,
    RequestStatus::DepartmentReturned,
    RequestStatus::DepartmentApproved,
    RequestStatus::ExecutiveReview,
    RequestStatus::HodReview,
    RequestStatus::ProcurementReview,
    RequestStatus::FinanceReview,
    RequestStatus::FinanceReturned,
    RequestStatus::BudgetManagerReview,
    RequestStatus::FinanceApproved,
    RequestStatus::SentToVendor,
    RequestStatus::Closed,
    RequestStatus::Rejected,
];

/// Legacy status values and the canonical status each group repairs to.
///
/// These names were written by retired versions of the portal and still
/// occur in long-lived databases. The status repair runs one update per
/// group, in this order, followed by a catch-all that demotes anything
/// still unrecognized to `DRAFT`.
pub const LEGACY_STATUS_REMAPS: [(&[&str], RequestStatus); 6] = [
    (&["PENDING", "UNDER_REVIEW"], RequestStatus::Submitted),
    (
        &["DEPT_REVIEW", "DEPARTMENT_APPROVAL", "DEPARTMENT_REVIEWING"],
        RequestStatus::DepartmentReview,
    ),
    (
        &["BUDGET_REVIEW", "BUDGET_OFFICER_REVIEW"],
        RequestStatus::BudgetManagerReview,
    ),
    (
        &["EXECUTIVE_APPROVED", "EXECUTIVE_APPROVAL"],
        RequestStatus::ExecutiveReview,
    ),
    (&["APPROVED"], RequestStatus::FinanceApproved),
    (
        &["PROCUREMENT", "PROCUREMENT_APPROVED", "PROCUREMENT_APPROVAL"],
        RequestStatus::ProcurementReview,
    ),
];

impl RequestStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::DepartmentReview => "DEPARTMENT_REVIEW",
            Self::DepartmentReturned => "DEPARTMENT_RETURNED",
            Self::DepartmentApproved => "DEPARTMENT_APPROVED",
            Self::ExecutiveReview => "EXECUTIVE_REVIEW",
            Self::HodReview => "HOD_REVIEW",
            Self::ProcurementReview => "PROCUREMENT_REVIEW",
            Self::FinanceReview => "FINANCE_REVIEW",
            Self::FinanceReturned => "FINANCE_RETURNED",
            Self::BudgetManagerReview => "BUDGET_MANAGER_REVIEW",
            Self::FinanceApproved => "FINANCE_APPROVED",
            Self::SentToVendor => "SENT_TO_VENDOR",
            Self::Closed => "CLOSED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRequestStatus` if the string is not a
    /// canonical status. Legacy values are not accepted here; they are
    /// healed in storage by the status repair.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "SUBMITTED" => Ok(Self::Submitted),
            "DEPARTMENT_REVIEW" => Ok(Self::DepartmentReview),
            "DEPARTMENT_RETURNED" => Ok(Self::DepartmentReturned),
            "DEPARTMENT_APPROVED" => Ok(Self::DepartmentApproved),
            "EXECUTIVE_REVIEW" => Ok(Self::ExecutiveReview),
            "HOD_REVIEW" => Ok(Self::HodReview),
            "PROCUREMENT_REVIEW" => Ok(Self::ProcurementReview),
            "FINANCE_REVIEW" => Ok(Self::FinanceReview),
            "FINANCE_RETURNED" => Ok(Self::FinanceReturned),
            "BUDGET_MANAGER_REVIEW" => Ok(Self::BudgetManagerReview),
            "FINANCE_APPROVED" => Ok(Self::FinanceApproved),
            "SENT_TO_VENDOR" => Ok(Self::SentToVendor),
            "CLOSED" => Ok(Self::Closed),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidRequestStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Rejected)
    }

    /// Returns true if this status represents active or approved spend.
    ///
    /// Requests in these statuses count toward a requester's or
    /// department's recent spend when the splintering detector evaluates a
    /// candidate. Drafts, rejected work, closed work, and requests returned
    /// for rework are excluded to reduce false positives.
    #[must_use]
    pub const fn is_active_spend(&self) -> bool {
        matches!(
            self,
            Self::Submitted
                | Self::DepartmentReview
                | Self::DepartmentApproved
                | Self::ExecutiveReview
                | Self::HodReview
                | Self::FinanceReview
                | Self::BudgetManagerReview
                | Self::ProcurementReview
                | Self::FinanceApproved
                | Self::SentToVendor
        )
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        // Cannot transition from terminal states
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        // Rejection is reachable from every non-terminal state
        if new_status == Self::Rejected {
            return Ok(());
        }

        // Valid forward transitions based on current state
        let valid = match self {
            Self::Draft => matches!(new_status, Self::Submitted),
            Self::Submitted => matches!(new_status, Self::DepartmentReview),
            Self::DepartmentReview => {
                matches!(new_status, Self::DepartmentApproved | Self::DepartmentReturned)
            }
            Self::DepartmentReturned | Self::FinanceReturned => {
                matches!(new_status, Self::Submitted)
            }
            Self::DepartmentApproved => matches!(
                new_status,
                Self::ExecutiveReview | Self::HodReview | Self::ProcurementReview
            ),
            Self::ExecutiveReview => {
                matches!(new_status, Self::HodReview | Self::ProcurementReview)
            }
            Self::HodReview => matches!(new_status, Self::ProcurementReview),
            Self::ProcurementReview => {
                matches!(new_status, Self::FinanceReview | Self::BudgetManagerReview)
            }
            Self::FinanceReview => matches!(
                new_status,
                Self::FinanceApproved | Self::FinanceReturned | Self::BudgetManagerReview
            ),
            Self::BudgetManagerReview => {
                matches!(new_status, Self::FinanceApproved | Self::FinanceReturned)
            }
            Self::FinanceApproved => matches!(new_status, Self::SentToVendor),
            Self::SentToVendor => matches!(new_status, Self::Closed),
            Self::Closed | Self::Rejected => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by request lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

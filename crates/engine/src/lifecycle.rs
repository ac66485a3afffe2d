// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle predicates used by the coordinator.

use procure_domain::{LoadBalancingSettings, RequestStatus};

/// What the coordinator does when the splintering detector flags a
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplinterPolicy {
    /// Record the flag in logs and proceed with the transition.
    #[default]
    LogOnly,
    /// Refuse the transition unless a supervisor override accompanies it.
    Block,
}

impl SplinterPolicy {
    /// Parses a policy from its configuration string.
    ///
    /// Unrecognized values fall back to `LogOnly`, matching the
    /// prefer-degradation error policy: a typo in deployment
    /// configuration must not start blocking submissions.
    #[must_use]
    pub fn from_config(value: &str) -> Self {
        match value {
            "BLOCK" => Self::Block,
            _ => Self::LogOnly,
        }
    }
}

/// Returns true when a transition into `new_status` must trigger
/// auto-assignment.
///
/// Only entering procurement review qualifies, and only when the load
/// balancer is enabled and configured to assign on approval. A missing
/// settings row means the feature is inactive.
#[must_use]
pub fn should_auto_assign(
    new_status: RequestStatus,
    settings: Option<&LoadBalancingSettings>,
) -> bool {
    settings.is_some_and(|s| {
        s.enabled && s.auto_assign_on_approval && new_status == RequestStatus::ProcurementReview
    })
}

/// Returns true when a transition commits new spend to the pipeline.
///
/// The splintering detector runs on these transitions: the target status
/// counts as active spend while the current status does not. This covers
/// first submission and resubmission after a return, without re-checking
/// every hop inside the pipeline.
#[must_use]
pub const fn commits_new_spend(current: RequestStatus, new_status: RequestStatus) -> bool {
    new_status.is_active_spend() && !current.is_active_spend()
}

#[cfg(test)]
mod tests {
    use super::*;
    use procure_domain::LoadBalancingStrategy;

    fn settings(enabled: bool, auto_assign_on_approval: bool) -> LoadBalancingSettings {
        LoadBalancingSettings {
            settings_id: 1,
            enabled,
            strategy: LoadBalancingStrategy::LeastLoaded,
            auto_assign_on_approval,
            round_robin_counter: 0,
            splintering_enabled: true,
            updated_by: None,
            updated_at: String::from("2026-08-06T12:00:00Z"),
        }
    }

    #[test]
    fn test_should_auto_assign_requires_all_three_conditions() {
        let s = settings(true, true);
        assert!(should_auto_assign(RequestStatus::ProcurementReview, Some(&s)));

        // Wrong status
        assert!(!should_auto_assign(RequestStatus::FinanceReview, Some(&s)));
        assert!(!should_auto_assign(RequestStatus::Submitted, Some(&s)));

        // Disabled balancer
        let disabled = settings(false, true);
        assert!(!should_auto_assign(
            RequestStatus::ProcurementReview,
            Some(&disabled)
        ));

        // Assignment-on-approval off
        let no_auto = settings(true, false);
        assert!(!should_auto_assign(
            RequestStatus::ProcurementReview,
            Some(&no_auto)
        ));
    }

    #[test]
    fn test_should_auto_assign_without_settings_row() {
        assert!(!should_auto_assign(RequestStatus::ProcurementReview, None));
    }

    #[test]
    fn test_commits_new_spend_on_submission() {
        assert!(commits_new_spend(
            RequestStatus::Draft,
            RequestStatus::Submitted
        ));
        assert!(commits_new_spend(
            RequestStatus::DepartmentReturned,
            RequestStatus::Submitted
        ));
        assert!(commits_new_spend(
            RequestStatus::FinanceReturned,
            RequestStatus::Submitted
        ));
    }

    #[test]
    fn test_intra_pipeline_hops_do_not_commit_new_spend() {
        assert!(!commits_new_spend(
            RequestStatus::Submitted,
            RequestStatus::DepartmentReview
        ));
        assert!(!commits_new_spend(
            RequestStatus::ProcurementReview,
            RequestStatus::FinanceReview
        ));
    }

    #[test]
    fn test_leaving_pipeline_does_not_commit_spend() {
        assert!(!commits_new_spend(
            RequestStatus::Submitted,
            RequestStatus::Rejected
        ));
        assert!(!commits_new_spend(
            RequestStatus::SentToVendor,
            RequestStatus::Closed
        ));
    }

    #[test]
    fn test_policy_from_config() {
        assert_eq!(SplinterPolicy::from_config("BLOCK"), SplinterPolicy::Block);
        assert_eq!(
            SplinterPolicy::from_config("LOG_ONLY"),
            SplinterPolicy::LogOnly
        );
        assert_eq!(
            SplinterPolicy::from_config("definitely-a-typo"),
            SplinterPolicy::LogOnly
        );
    }
}

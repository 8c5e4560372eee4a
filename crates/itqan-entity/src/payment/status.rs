//! Payment request status enumeration and transition graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a payment request.
///
/// Allowed transitions: `Pending → Approved`, `Pending → Rejected`, and
/// `Approved → Pending` (explicit cancellation of an approval). Rejection
/// is one-way; hard deletion removes the row entirely and is not a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Submitted, awaiting admin verification.
    Pending,
    /// Verified and approved; a matching enrollment must exist.
    Approved,
    /// Rejected by an admin; terminal for this flow.
    Rejected,
}

impl PaymentStatus {
    /// Whether the status machine permits moving from `self` to `next`.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
                | (Self::Approved, Self::Pending)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = itqan_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(itqan_core::AppError::validation(format!(
                "Invalid payment status: '{s}'. Expected one of: pending, approved, rejected"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Approved));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Rejected));
        assert!(PaymentStatus::Approved.can_transition_to(PaymentStatus::Pending));
    }

    #[test]
    fn test_rejection_is_one_way() {
        assert!(!PaymentStatus::Rejected.can_transition_to(PaymentStatus::Pending));
        assert!(!PaymentStatus::Rejected.can_transition_to(PaymentStatus::Approved));
    }

    #[test]
    fn test_no_self_or_skip_transitions() {
        assert!(!PaymentStatus::Pending.can_transition_to(PaymentStatus::Pending));
        assert!(!PaymentStatus::Approved.can_transition_to(PaymentStatus::Rejected));
        assert!(!PaymentStatus::Approved.can_transition_to(PaymentStatus::Approved));
    }
}

use chrono::{DateTime, Utc};

use crate::error::EncodingError;
use crate::marshal::wire_enum;
use crate::time::Timestamp;

wire_enum! {
    /// Lifecycle state of a household invitation.
    pub enum InvitationStatus as "invitation status" {
        Pending => "pending",
        Accepted => "accepted",
        Rejected => "rejected",
        Cancelled => "cancelled",
        Expired => "expired",
    }
}

impl InvitationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InvitationStatus::Pending)
    }

    /// Status the server reports at `now`: a pending invitation past its expiry is expired.
    pub fn effective(self, expires_at: &Timestamp, now: DateTime<Utc>) -> Self {
        if self == InvitationStatus::Pending && expires_at.is_before(now) {
            InvitationStatus::Expired
        } else {
            self
        }
    }

    /// Apply an action, returning the resulting status or `IllegalTransition`.
    ///
    /// Only pending invitations move; every other state is terminal.
    pub fn transition(self, action: InvitationAction) -> Result<Self, EncodingError> {
        if self.is_terminal() {
            return Err(EncodingError::IllegalTransition {
                entity: "household invitation",
                from: self.as_str().to_string(),
                action: action.as_str().to_string(),
            });
        }
        Ok(action.target())
    }
}

/// A recipient or sender decision on a pending invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvitationAction {
    Accept,
    Reject,
    Cancel,
}

impl InvitationAction {
    /// Path segment of the action endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationAction::Accept => "accept",
            InvitationAction::Reject => "reject",
            InvitationAction::Cancel => "cancel",
        }
    }

    pub fn target(&self) -> InvitationStatus {
        match self {
            InvitationAction::Accept => InvitationStatus::Accepted,
            InvitationAction::Reject => InvitationStatus::Rejected,
            InvitationAction::Cancel => InvitationStatus::Cancelled,
        }
    }
}

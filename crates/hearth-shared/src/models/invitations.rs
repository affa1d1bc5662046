use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EncodingError;
use crate::invite::{InvitationAction, InvitationStatus};
use crate::marshal::impl_record;
use crate::models::households::Household;
use crate::models::users::User;
use crate::time::Timestamp;

/// An invitation for someone to join a household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdInvitation {
    pub id: String,
    pub from_user: User,
    pub destination_household: Household,
    pub to_email: String,
    pub to_name: String,
    /// Set once the recipient has an account
    pub to_user: Option<String>,
    pub status: InvitationStatus,
    pub note: String,
    pub status_note: String,
    pub token: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(HouseholdInvitation, "household invitation");

impl HouseholdInvitation {
    pub fn effective_status(&self, now: DateTime<Utc>) -> InvitationStatus {
        self.status.effective(&self.expires_at, now)
    }

    /// Check that `action` is allowed at `now` and return the status it leads to.
    pub fn check(
        &self,
        action: InvitationAction,
        now: DateTime<Utc>,
    ) -> Result<InvitationStatus, EncodingError> {
        self.effective_status(now).transition(action)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdInvitationCreationRequestInput {
    pub to_email: String,
    pub to_name: String,
    pub note: String,
    /// Sent as `null` to take the server's default lifetime
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

/// Body of the accept, reject and cancel actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdInvitationUpdateRequestInput {
    pub token: String,
    pub note: String,
}

use serde::{Deserialize, Serialize};

use crate::field::{non_null, Field};
use crate::marshal::impl_record;
use crate::time::Timestamp;

/// An account holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email_address: String,
    pub email_address_verified_at: Option<Timestamp>,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<Timestamp>,
    #[serde(rename = "avatar")]
    pub avatar_src: Option<String>,
    pub account_status: String,
    pub account_status_explanation: String,
    /// Comma-separated service-level role names
    pub service_roles: String,
    pub requires_password_change: bool,
    pub password_last_changed_at: Option<Timestamp>,
    pub two_factor_secret_verified_at: Option<Timestamp>,
    #[serde(rename = "lastAcceptedTOS")]
    pub last_accepted_terms_of_service: Option<Timestamp>,
    pub last_accepted_privacy_policy: Option<Timestamp>,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(User, "user");

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Sign-up request. An invitation token joins an existing household instead of creating one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistrationInput {
    pub username: String,
    pub password: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<Timestamp>,
    pub household_name: String,
    pub invitation_token: String,
    #[serde(rename = "invitationID")]
    pub invitation_id: String,
    #[serde(rename = "acceptedTOS")]
    pub accepted_terms_of_service: bool,
    pub accepted_privacy_policy: bool,
}

/// Profile update for the authenticated user. Requires the current password.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub birthday: Field<Timestamp>,
    pub current_password: String,
    pub totp_token: String,
}

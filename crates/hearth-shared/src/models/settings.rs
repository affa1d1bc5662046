use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::non_null;
use crate::marshal::{impl_record, null_as_default, Model, Record};
use crate::models::households::Household;
use crate::models::invitations::HouseholdInvitation;
use crate::models::meal_plans::MealPlan;
use crate::models::meals::Meal;
use crate::models::preferences::UserIngredientPreference;
use crate::models::recipes::Recipe;
use crate::models::users::User;
use crate::models::webhooks::Webhook;
use crate::time::Timestamp;

// ---------------------------------------------------------------------------
// Service settings
// ---------------------------------------------------------------------------

/// A configurable option defined by the service (theme, units, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSetting {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub setting_type: String,
    pub description: String,
    pub default_value: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enumeration: Vec<String>,
    pub admins_only: bool,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(ServiceSetting, "service setting");

impl ServiceSetting {
    /// Whether `value` is acceptable. Settings without an enumeration accept anything.
    pub fn accepts(&self, value: &str) -> bool {
        self.enumeration.is_empty() || self.enumeration.iter().any(|v| v == value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSettingCreationRequestInput {
    pub name: String,
    #[serde(rename = "type")]
    pub setting_type: String,
    pub description: String,
    pub default_value: Option<String>,
    pub enumeration: Vec<String>,
    pub admins_only: bool,
}

/// A user's or household's chosen value for a [`ServiceSetting`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSettingConfiguration {
    pub id: String,
    pub value: String,
    pub notes: String,
    pub service_setting: ServiceSetting,
    pub belongs_to_user: String,
    pub belongs_to_household: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(ServiceSettingConfiguration, "service setting configuration");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSettingConfigurationCreationRequestInput {
    pub value: String,
    pub notes: String,
    #[serde(rename = "serviceSettingID")]
    pub service_setting_id: String,
    pub belongs_to_user: String,
    pub belongs_to_household: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSettingConfigurationUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(
        default,
        rename = "serviceSettingID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_setting_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Audit log and data export
// ---------------------------------------------------------------------------

/// An append-only record of a change. Never archived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub resource_type: String,
    #[serde(rename = "relevantID")]
    pub relevant_id: String,
    pub event_type: String,
    /// Field-level diff, shape depends on `resource_type`
    #[serde(default, deserialize_with = "null_as_default")]
    pub changes: Map<String, Value>,
    pub belongs_to_user: Option<String>,
    pub belongs_to_household: Option<String>,
    pub created_at: Timestamp,
}

impl Model for AuditLogEntry {
    const KIND: &'static str = "audit log entry";
}

impl Record for AuditLogEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn archived_at(&self) -> Option<&Timestamp> {
        None
    }
}

/// Everything the service holds about a user, as produced by a data-privacy report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreUserDataCollection {
    #[serde(rename = "reportID")]
    pub report_id: String,
    pub user: User,
    #[serde(default, deserialize_with = "null_as_default")]
    pub households: Vec<Household>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sent_invites: Vec<HouseholdInvitation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub received_invites: Vec<HouseholdInvitation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipes: Vec<Recipe>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meals: Vec<Meal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meal_plans: Vec<MealPlan>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_ingredient_preferences: Vec<UserIngredientPreference>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub webhooks: Vec<Webhook>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_setting_configurations: Vec<ServiceSettingConfiguration>,
    /// Entries keyed by resource; kept opaque
    #[serde(default, deserialize_with = "null_as_default")]
    pub audit_log_entries: Map<String, Value>,
}

impl Model for CoreUserDataCollection {
    const KIND: &'static str = "core user data collection";
}

use serde::{Deserialize, Serialize};

use crate::field::{non_null, Field};
use crate::marshal::{impl_record, null_as_default, LinkMismatch};
use crate::models::catalogue::ValidInstrument;
use crate::models::users::User;
use crate::time::Timestamp;

/// A group of users sharing recipes, meal plans and instruments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub id: String,
    pub name: String,
    pub billing_status: String,
    pub contact_phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "paymentProcessorCustomerID")]
    pub payment_processor_customer_id: String,
    #[serde(rename = "subscriptionPlanID")]
    pub subscription_plan_id: Option<String>,
    pub belongs_to_user: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<HouseholdUserMembershipWithUser>,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(Household, "household", links = member_links);

impl Household {
    fn member_links(&self) -> Vec<LinkMismatch> {
        LinkMismatch::check(
            "members",
            &self.id,
            self.members.iter().map(|m| m.belongs_to_household.as_str()),
        )
    }

    /// Membership of the given user, if any.
    pub fn membership(&self, user_id: &str) -> Option<&HouseholdUserMembershipWithUser> {
        self.members
            .iter()
            .find(|m| m.belongs_to_user.as_ref().map(|u| u.id.as_str()) == Some(user_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdUserMembershipWithUser {
    pub id: String,
    pub belongs_to_user: Option<User>,
    pub belongs_to_household: String,
    pub household_role: String,
    pub default_household: bool,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(HouseholdUserMembershipWithUser, "household membership");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdCreationRequestInput {
    pub name: String,
    pub contact_phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub latitude: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub longitude: Field<f64>,
}

// ---------------------------------------------------------------------------
// Household instrument ownership
// ---------------------------------------------------------------------------

/// An instrument a household owns, with how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdInstrumentOwnership {
    pub id: String,
    pub notes: String,
    pub quantity: u16,
    pub instrument: ValidInstrument,
    pub belongs_to_household: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(HouseholdInstrumentOwnership, "household instrument ownership");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdInstrumentOwnershipCreationRequestInput {
    pub notes: String,
    pub quantity: u16,
    #[serde(rename = "validInstrumentID")]
    pub valid_instrument_id: String,
    pub belongs_to_household: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdInstrumentOwnershipUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u16>,
    #[serde(
        default,
        rename = "validInstrumentID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_instrument_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{DecodeEvent, RecordingObserver};
    use crate::fixtures;
    use crate::marshal::{decode_value, DecodeOptions};
    use serde_json::json;

    #[test]
    fn test_member_pointing_elsewhere_is_reported() {
        let mut json = fixtures::household("hh_1");
        json["members"][0]["belongsToHousehold"] = "hh_other".into();

        let observer = RecordingObserver::default();
        let household: Household =
            decode_value(json, "data", DecodeOptions::default(), &observer).unwrap();

        assert_eq!(household.members[0].belongs_to_household, "hh_other");
        assert_eq!(
            observer.events(),
            vec![DecodeEvent::ForeignKeyMismatch {
                record: "household",
                path: "data.members[0]".into(),
                expected: "hh_1".into(),
                found: "hh_other".into(),
            }]
        );
    }

    #[test]
    fn test_membership_lookup() {
        let household: Household = serde_json::from_value(fixtures::household("hh_1")).unwrap();
        assert!(household.membership("usr_1").is_some());
        assert!(household.membership("usr_9").is_none());
    }

    #[test]
    fn test_household_and_update_round_trip() {
        fixtures::assert_round_trip::<Household>(fixtures::household("hh_1"));

        let input = HouseholdUpdateRequestInput {
            city: Some("Bergen".into()),
            latitude: Field::Null,
            longitude: Field::Value(5.32),
            ..Default::default()
        };
        assert_eq!(
            fixtures::assert_update_round_trip(&input),
            json!({"city": "Bergen", "latitude": null, "longitude": 5.32})
        );
        assert!(
            serde_json::from_value::<HouseholdUpdateRequestInput>(json!({"name": null})).is_err()
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::field::non_null;
use crate::marshal::impl_record;
use crate::models::catalogue::ValidIngredient;
use crate::time::Timestamp;

/// How much a user likes an ingredient, or that they must avoid it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIngredientPreference {
    pub id: String,
    pub notes: String,
    pub ingredient: ValidIngredient,
    /// -10 (hate) to 10 (love)
    pub rating: i8,
    pub allergy: bool,
    pub belongs_to_user: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(UserIngredientPreference, "user ingredient preference");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIngredientPreferenceCreationRequestInput {
    #[serde(rename = "validIngredientID")]
    pub valid_ingredient_id: String,
    pub notes: String,
    pub rating: i8,
    pub allergy: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIngredientPreferenceUpdateRequestInput {
    #[serde(
        default,
        rename = "ingredientID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub ingredient_id: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub rating: Option<i8>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub allergy: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use serde_json::json;

    #[test]
    fn test_preference_and_update_round_trip() {
        let preference: UserIngredientPreference = fixtures::assert_round_trip(json!({
            "id": "uip_1",
            "notes": "",
            "ingredient": fixtures::valid_ingredient("vi_1"),
            "rating": -3,
            "allergy": true,
            "belongsToUser": "usr_1",
            "createdAt": "2025-01-01T00:00:00Z",
            "lastUpdatedAt": null,
            "archivedAt": null
        }));
        assert!(preference.allergy);

        let input = UserIngredientPreferenceUpdateRequestInput {
            rating: Some(4),
            ..Default::default()
        };
        assert_eq!(fixtures::assert_update_round_trip(&input), json!({"rating": 4}));
        assert!(serde_json::from_value::<UserIngredientPreferenceUpdateRequestInput>(
            json!({"allergy": null})
        )
        .is_err());
    }
}

use serde::{Deserialize, Serialize};

use crate::field::non_null;
use crate::marshal::{impl_record, null_as_default};
use crate::models::recipes::Recipe;
use crate::range::{Float32RangeWithOptionalMax, Float32RangeWithOptionalMaxUpdate};
use crate::time::Timestamp;

/// A set of recipes served together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub description: String,
    pub estimated_portions: Float32RangeWithOptionalMax,
    pub eligible_for_meal_plans: bool,
    pub created_by_user: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<MealComponent>,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(Meal, "meal");

impl Meal {
    /// Ids of every recipe in the meal, in component order.
    pub fn recipe_ids(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.recipe.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealComponent {
    pub recipe: Recipe,
    /// Multiplier applied to the recipe's quantities
    pub recipe_scale: f32,
    /// "main", "side", "dessert", ...
    pub component_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealCreationRequestInput {
    pub name: String,
    pub description: String,
    pub estimated_portions: Float32RangeWithOptionalMax,
    pub eligible_for_meal_plans: bool,
    pub recipes: Vec<MealComponentCreationRequestInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealComponentCreationRequestInput {
    #[serde(rename = "recipeID")]
    pub recipe_id: String,
    pub recipe_scale: f32,
    pub component_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_portions: Option<Float32RangeWithOptionalMaxUpdate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub eligible_for_meal_plans: Option<bool>,
    /// Replaces the whole component list when present
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<MealComponentCreationRequestInput>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::fixtures;

    #[test]
    fn test_meal_recipe_ids() {
        let meal: Meal = serde_json::from_value(fixtures::meal("ml_1", "rcp_1")).unwrap();
        assert_eq!(meal.recipe_ids(), vec!["rcp_1"]);
        assert_eq!(meal.components[0].recipe_scale, 1.0);
    }

    #[test]
    fn test_meal_and_update_round_trip() {
        fixtures::assert_round_trip::<Meal>(fixtures::meal("ml_1", "rcp_1"));

        let input = MealUpdateRequestInput {
            eligible_for_meal_plans: Some(false),
            estimated_portions: Some(
                Float32RangeWithOptionalMaxUpdate::new(Some(4.0), Field::Null).unwrap(),
            ),
            ..Default::default()
        };
        assert_eq!(
            fixtures::assert_update_round_trip(&input),
            serde_json::json!({
                "estimatedPortions": {"min": 4.0, "max": null},
                "eligibleForMealPlans": false
            })
        );
    }
}

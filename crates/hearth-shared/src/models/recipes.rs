use serde::{Deserialize, Serialize};

use crate::field::{non_null, Field};
use crate::marshal::{impl_record, null_as_default, LinkMismatch};
use crate::models::recipe_steps::{RecipeStep, RecipeStepCreationRequestInput};
use crate::range::{
    Float32RangeWithOptionalMax, Float32RangeWithOptionalMaxUpdate, OptionalFloat32Range,
    OptionalFloat32RangeUpdate, Uint32RangeWithOptionalMax, Uint32RangeWithOptionalMaxUpdate,
};
use crate::time::Timestamp;

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub source: String,
    pub description: String,
    #[serde(rename = "inspiredByRecipeID")]
    pub inspired_by_recipe_id: Option<String>,
    pub estimated_portions: Float32RangeWithOptionalMax,
    pub portion_name: String,
    pub plural_portion_name: String,
    pub seal_of_approval: bool,
    pub eligible_for_meals: bool,
    pub yields_component_type: String,
    pub created_by_user: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<RecipeStep>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prep_tasks: Vec<RecipePrepTask>,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(Recipe, "recipe", links = child_links);

impl Recipe {
    fn child_links(&self) -> Vec<LinkMismatch> {
        let mut found = LinkMismatch::check(
            "steps",
            &self.id,
            self.steps.iter().map(|s| s.belongs_to_recipe.as_str()),
        );
        found.extend(LinkMismatch::check(
            "prepTasks",
            &self.id,
            self.prep_tasks.iter().map(|t| t.belongs_to_recipe.as_str()),
        ));
        for (i, step) in self.steps.iter().enumerate() {
            found.extend(LinkMismatch::nested(&format!("steps[{i}]"), step.child_links()));
        }
        for (i, task) in self.prep_tasks.iter().enumerate() {
            found.extend(LinkMismatch::nested(&format!("prepTasks[{i}]"), task.child_links()));
        }
        found
    }

    /// Steps sorted by their position in the recipe.
    pub fn ordered_steps(&self) -> Vec<&RecipeStep> {
        let mut steps: Vec<_> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.index);
        steps
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreationRequestInput {
    pub name: String,
    pub slug: String,
    pub source: String,
    pub description: String,
    #[serde(rename = "inspiredByRecipeID")]
    pub inspired_by_recipe_id: Option<String>,
    pub estimated_portions: Float32RangeWithOptionalMax,
    pub portion_name: String,
    pub plural_portion_name: String,
    pub seal_of_approval: bool,
    pub eligible_for_meals: bool,
    /// Also create a single-component meal wrapping this recipe
    pub also_create_meal: bool,
    pub yields_component_type: String,
    pub steps: Vec<RecipeStepCreationRequestInput>,
    pub prep_tasks: Vec<RecipePrepTaskWithinRecipeCreationRequestInput>,
}

impl RecipeCreationRequestInput {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            source: String::new(),
            description: String::new(),
            inspired_by_recipe_id: None,
            estimated_portions: Float32RangeWithOptionalMax::at_least(1.0),
            portion_name: String::new(),
            plural_portion_name: String::new(),
            seal_of_approval: false,
            eligible_for_meals: true,
            also_create_meal: false,
            yields_component_type: String::new(),
            steps: Vec::new(),
            prep_tasks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        rename = "inspiredByRecipeID",
        skip_serializing_if = "Field::is_absent"
    )]
    pub inspired_by_recipe_id: Field<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_portions: Option<Float32RangeWithOptionalMaxUpdate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub portion_name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub plural_portion_name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub seal_of_approval: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub eligible_for_meals: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub yields_component_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Prep tasks
// ---------------------------------------------------------------------------

/// Work that can be done ahead of time (marinating, soaking, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePrepTask {
    pub id: String,
    pub name: String,
    pub description: String,
    pub notes: String,
    pub optional: bool,
    pub explicit_storage_instructions: String,
    pub storage_type: String,
    pub time_buffer_before_recipe_in_seconds: Uint32RangeWithOptionalMax,
    pub storage_temperature_in_celsius: OptionalFloat32Range,
    pub belongs_to_recipe: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipe_steps: Vec<RecipePrepTaskStep>,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(RecipePrepTask, "recipe prep task", links = child_links);

impl RecipePrepTask {
    fn child_links(&self) -> Vec<LinkMismatch> {
        LinkMismatch::check(
            "recipeSteps",
            &self.id,
            self.recipe_steps
                .iter()
                .map(|s| s.belongs_to_recipe_prep_task.as_str()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePrepTaskStep {
    pub id: String,
    pub belongs_to_recipe_step: String,
    pub belongs_to_recipe_prep_task: String,
    pub satisfies_recipe_step: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePrepTaskCreationRequestInput {
    pub name: String,
    pub description: String,
    pub notes: String,
    pub optional: bool,
    pub explicit_storage_instructions: String,
    pub storage_type: String,
    pub time_buffer_before_recipe_in_seconds: Uint32RangeWithOptionalMax,
    pub storage_temperature_in_celsius: OptionalFloat32Range,
    pub belongs_to_recipe: String,
    pub recipe_steps: Vec<RecipePrepTaskStepCreationRequestInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePrepTaskStepCreationRequestInput {
    pub belongs_to_recipe_step: String,
    pub satisfies_recipe_step: bool,
}

/// Prep task submitted together with its recipe. Steps are referenced by
/// index because they have no ids yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePrepTaskWithinRecipeCreationRequestInput {
    pub name: String,
    pub description: String,
    pub notes: String,
    pub optional: bool,
    pub explicit_storage_instructions: String,
    pub storage_type: String,
    pub time_buffer_before_recipe_in_seconds: Uint32RangeWithOptionalMax,
    pub storage_temperature_in_celsius: OptionalFloat32Range,
    pub recipe_steps: Vec<RecipePrepTaskStepWithinRecipeCreationRequestInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePrepTaskStepWithinRecipeCreationRequestInput {
    pub belongs_to_recipe_step_index: u32,
    pub satisfies_recipe_step: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePrepTaskUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub explicit_storage_instructions: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_buffer_before_recipe_in_seconds: Option<Uint32RangeWithOptionalMaxUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_temperature_in_celsius: Option<OptionalFloat32RangeUpdate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{DecodeEvent, RecordingObserver};
    use crate::fixtures;
    use crate::marshal::{decode_value, encode, DecodeOptions};
    use crate::range::Float32RangeWithOptionalMax;
    use serde_json::json;

    #[test]
    fn test_creation_input_wire_form() {
        let mut input = RecipeCreationRequestInput::new("A", "a");
        input.estimated_portions = Float32RangeWithOptionalMax::new(1.0, Some(2.0)).unwrap();
        let body: serde_json::Value = serde_json::from_slice(&encode(&input).unwrap()).unwrap();
        assert_eq!(body["estimatedPortions"], json!({"min": 1.0, "max": 2.0}));
        assert_eq!(body["steps"], json!([]));
        assert_eq!(body["prepTasks"], json!([]));
        assert_eq!(body["alsoCreateMeal"], json!(false));
        assert_eq!(body["inspiredByRecipeID"], json!(null));
    }

    #[test]
    fn test_recipe_reports_nested_step_mismatch() {
        let mut json = fixtures::recipe("rcp_1");
        json["steps"][0]["ingredients"][0]["belongsToRecipeStep"] = "st_other".into();

        let observer = RecordingObserver::default();
        let recipe: Recipe = decode_value(json, "data", DecodeOptions::default(), &observer)
            .unwrap();
        assert_eq!(recipe.ordered_steps().len(), 1);
        assert_eq!(
            observer.events(),
            vec![DecodeEvent::ForeignKeyMismatch {
                record: "recipe",
                path: "data.steps[0].ingredients[0]".into(),
                expected: "st_1".into(),
                found: "st_other".into(),
            }]
        );
    }

    #[test]
    fn test_null_children_decode_empty() {
        let mut json = fixtures::recipe("rcp_1");
        json["steps"] = json!(null);
        json["prepTasks"] = json!(null);
        let recipe: Recipe = decode_value(
            json,
            "data",
            DecodeOptions::strict(),
            &RecordingObserver::default(),
        )
        .unwrap();
        assert!(recipe.steps.is_empty());
        assert!(recipe.prep_tasks.is_empty());
    }

    #[test]
    fn test_recipe_and_update_round_trip() {
        fixtures::assert_round_trip::<Recipe>(fixtures::recipe("rcp_1"));

        let input = RecipeUpdateRequestInput {
            name: Some("Stew".into()),
            inspired_by_recipe_id: Field::Null,
            estimated_portions: Some(
                Float32RangeWithOptionalMaxUpdate::new(None, Field::Value(6.0)).unwrap(),
            ),
            ..Default::default()
        };
        assert_eq!(
            fixtures::assert_update_round_trip(&input),
            json!({
                "name": "Stew",
                "inspiredByRecipeID": null,
                "estimatedPortions": {"max": 6.0}
            })
        );
    }

    #[test]
    fn test_update_cannot_clear_required_fields() {
        for body in [json!({"name": null}), json!({"sealOfApproval": null})] {
            assert!(serde_json::from_value::<RecipeUpdateRequestInput>(body).is_err());
        }
        let input: RecipeUpdateRequestInput =
            serde_json::from_value(json!({"sealOfApproval": true, "inspiredByRecipeID": null}))
                .unwrap();
        assert_eq!(input.seal_of_approval, Some(true));
        assert!(input.name.is_none());
        assert!(input.inspired_by_recipe_id.is_null());
    }
}

//! A recipe step and everything hanging off it: ingredients, instruments,
//! vessels, products and completion conditions.

use serde::{Deserialize, Serialize};

use crate::field::{non_null, Field};
use crate::marshal::{impl_record, null_as_default, wire_enum, LinkMismatch};
use crate::models::catalogue::{
    ValidIngredient, ValidIngredientState, ValidInstrument, ValidMeasurementUnit,
    ValidPreparation, ValidVessel,
};
use crate::range::{
    Float32RangeWithOptionalMax, Float32RangeWithOptionalMaxUpdate, OptionalFloat32Range,
    OptionalFloat32RangeUpdate, OptionalUint32Range, OptionalUint32RangeUpdate,
    Uint16RangeWithOptionalMax, Uint16RangeWithOptionalMaxUpdate, Uint32RangeWithOptionalMax,
    Uint32RangeWithOptionalMaxUpdate,
};
use crate::time::Timestamp;

wire_enum! {
    /// What a step produces.
    pub enum RecipeStepProductType as "recipe step product type" {
        Ingredient => "ingredient",
        Instrument => "instrument",
        Vessel => "vessel",
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    pub id: String,
    pub index: u32,
    pub preparation: ValidPreparation,
    pub estimated_time_in_seconds: OptionalUint32Range,
    pub temperature_in_celsius: OptionalFloat32Range,
    pub notes: String,
    pub explicit_instructions: String,
    pub condition_expression: String,
    pub optional: bool,
    pub start_timer_automatically: bool,
    pub belongs_to_recipe: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<RecipeStepIngredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instruments: Vec<RecipeStepInstrument>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vessels: Vec<RecipeStepVessel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<RecipeStepProduct>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completion_conditions: Vec<RecipeStepCompletionCondition>,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(RecipeStep, "recipe step", links = child_links);

impl RecipeStep {
    pub(crate) fn child_links(&self) -> Vec<LinkMismatch> {
        let id = self.id.as_str();
        let mut found = LinkMismatch::check(
            "ingredients",
            id,
            self.ingredients.iter().map(|c| c.belongs_to_recipe_step.as_str()),
        );
        found.extend(LinkMismatch::check(
            "instruments",
            id,
            self.instruments.iter().map(|c| c.belongs_to_recipe_step.as_str()),
        ));
        found.extend(LinkMismatch::check(
            "vessels",
            id,
            self.vessels.iter().map(|c| c.belongs_to_recipe_step.as_str()),
        ));
        found.extend(LinkMismatch::check(
            "products",
            id,
            self.products.iter().map(|c| c.belongs_to_recipe_step.as_str()),
        ));
        found.extend(LinkMismatch::check(
            "completionConditions",
            id,
            self.completion_conditions
                .iter()
                .map(|c| c.belongs_to_recipe_step.as_str()),
        ));
        for (i, condition) in self.completion_conditions.iter().enumerate() {
            let prefix = format!("completionConditions[{i}]");
            found.extend(LinkMismatch::nested(&prefix, condition.child_links()));
        }
        found
    }

    /// Products this step yields, in index order.
    pub fn products_by_index(&self) -> Vec<&RecipeStepProduct> {
        let mut products: Vec<_> = self.products.iter().collect();
        products.sort_by_key(|p| p.index);
        products
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepCreationRequestInput {
    pub index: u32,
    #[serde(rename = "preparationID")]
    pub preparation_id: String,
    pub estimated_time_in_seconds: OptionalUint32Range,
    pub temperature_in_celsius: OptionalFloat32Range,
    pub notes: String,
    pub explicit_instructions: String,
    pub condition_expression: String,
    pub optional: bool,
    pub start_timer_automatically: bool,
    pub belongs_to_recipe: String,
    pub ingredients: Vec<RecipeStepIngredientCreationRequestInput>,
    pub instruments: Vec<RecipeStepInstrumentCreationRequestInput>,
    pub vessels: Vec<RecipeStepVesselCreationRequestInput>,
    pub products: Vec<RecipeStepProductCreationRequestInput>,
    pub completion_conditions: Vec<RecipeStepCompletionConditionCreationRequestInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(
        default,
        rename = "preparationID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub preparation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_in_seconds: Option<OptionalUint32RangeUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_in_celsius: Option<OptionalFloat32RangeUpdate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub explicit_instructions: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub start_timer_automatically: Option<bool>,
}

// ---------------------------------------------------------------------------
// Ingredients
// ---------------------------------------------------------------------------

/// An ingredient used by a step. Either a catalogue ingredient or the product
/// of an earlier step (`recipe_step_product_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepIngredient {
    pub id: String,
    pub name: String,
    pub ingredient: Option<ValidIngredient>,
    pub measurement_unit: ValidMeasurementUnit,
    pub quantity: Float32RangeWithOptionalMax,
    pub quantity_notes: String,
    pub ingredient_notes: String,
    pub option_index: u16,
    pub optional: bool,
    pub to_taste: bool,
    pub product_percentage_to_use: Option<f32>,
    pub vessel_index: Option<u16>,
    #[serde(rename = "recipeStepProductID")]
    pub recipe_step_product_id: Option<String>,
    pub belongs_to_recipe_step: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(RecipeStepIngredient, "recipe step ingredient");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepIngredientCreationRequestInput {
    pub name: String,
    #[serde(rename = "ingredientID")]
    pub ingredient_id: Option<String>,
    #[serde(rename = "measurementUnitID")]
    pub measurement_unit_id: String,
    pub quantity: Float32RangeWithOptionalMax,
    pub quantity_notes: String,
    pub ingredient_notes: String,
    pub option_index: u16,
    pub optional: bool,
    pub to_taste: bool,
    pub product_percentage_to_use: Option<f32>,
    pub vessel_index: Option<u16>,
    /// Index of the earlier step whose product is consumed here
    pub product_of_recipe_step_index: Option<u32>,
    pub product_of_recipe_step_product_index: Option<u32>,
    pub belongs_to_recipe_step: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepIngredientUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "ingredientID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub ingredient_id: Option<String>,
    #[serde(
        default,
        rename = "measurementUnitID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub measurement_unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Float32RangeWithOptionalMaxUpdate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub quantity_notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub ingredient_notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub option_index: Option<u16>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub to_taste: Option<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub product_percentage_to_use: Field<f32>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub vessel_index: Field<u16>,
    #[serde(default, rename = "recipeStepProductID", skip_serializing_if = "Field::is_absent")]
    pub recipe_step_product_id: Field<String>,
}

// ---------------------------------------------------------------------------
// Instruments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepInstrument {
    pub id: String,
    pub name: String,
    pub instrument: Option<ValidInstrument>,
    #[serde(rename = "recipeStepProductID")]
    pub recipe_step_product_id: Option<String>,
    pub notes: String,
    pub quantity: Uint32RangeWithOptionalMax,
    pub option_index: u16,
    pub optional: bool,
    /// Lower ranks are preferred
    pub preference_rank: u8,
    pub belongs_to_recipe_step: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(RecipeStepInstrument, "recipe step instrument");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepInstrumentCreationRequestInput {
    pub name: String,
    #[serde(rename = "instrumentID")]
    pub instrument_id: Option<String>,
    #[serde(rename = "recipeStepProductID")]
    pub recipe_step_product_id: Option<String>,
    pub notes: String,
    pub quantity: Uint32RangeWithOptionalMax,
    pub option_index: u16,
    pub optional: bool,
    pub preference_rank: u8,
    pub belongs_to_recipe_step: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepInstrumentUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "instrumentID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub instrument_id: Option<String>,
    #[serde(default, rename = "recipeStepProductID", skip_serializing_if = "Field::is_absent")]
    pub recipe_step_product_id: Field<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Uint32RangeWithOptionalMaxUpdate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub option_index: Option<u16>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub preference_rank: Option<u8>,
}

// ---------------------------------------------------------------------------
// Vessels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepVessel {
    pub id: String,
    pub name: String,
    pub vessel: Option<ValidVessel>,
    #[serde(rename = "recipeStepProductID")]
    pub recipe_step_product_id: Option<String>,
    pub notes: String,
    /// "in", "on", "under", ...
    pub vessel_preposition: String,
    pub quantity: Uint16RangeWithOptionalMax,
    pub unavailable_after_step: bool,
    pub belongs_to_recipe_step: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(RecipeStepVessel, "recipe step vessel");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepVesselCreationRequestInput {
    pub name: String,
    #[serde(rename = "vesselID")]
    pub vessel_id: Option<String>,
    #[serde(rename = "recipeStepProductID")]
    pub recipe_step_product_id: Option<String>,
    pub notes: String,
    pub vessel_preposition: String,
    pub quantity: Uint16RangeWithOptionalMax,
    pub unavailable_after_step: bool,
    pub belongs_to_recipe_step: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepVesselUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "vesselID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub vessel_id: Option<String>,
    #[serde(default, rename = "recipeStepProductID", skip_serializing_if = "Field::is_absent")]
    pub recipe_step_product_id: Field<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub vessel_preposition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Uint16RangeWithOptionalMaxUpdate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub unavailable_after_step: Option<bool>,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepProduct {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: RecipeStepProductType,
    pub measurement_unit: Option<ValidMeasurementUnit>,
    pub quantity: OptionalFloat32Range,
    pub quantity_notes: String,
    pub compostable: bool,
    pub storage_duration_in_seconds: OptionalUint32Range,
    pub storage_temperature_in_celsius: OptionalFloat32Range,
    pub storage_instructions: String,
    pub is_liquid: bool,
    pub is_waste: bool,
    pub index: u16,
    pub contained_in_vessel_index: Option<u16>,
    pub belongs_to_recipe_step: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(RecipeStepProduct, "recipe step product");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepProductCreationRequestInput {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: RecipeStepProductType,
    #[serde(rename = "measurementUnitID")]
    pub measurement_unit_id: Option<String>,
    pub quantity: OptionalFloat32Range,
    pub quantity_notes: String,
    pub compostable: bool,
    pub storage_duration_in_seconds: OptionalUint32Range,
    pub storage_temperature_in_celsius: OptionalFloat32Range,
    pub storage_instructions: String,
    pub is_liquid: bool,
    pub is_waste: bool,
    pub index: u16,
    pub contained_in_vessel_index: Option<u16>,
    pub belongs_to_recipe_step: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepProductUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_type: Option<RecipeStepProductType>,
    #[serde(
        default,
        rename = "measurementUnitID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub measurement_unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<OptionalFloat32RangeUpdate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub quantity_notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub compostable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_duration_in_seconds: Option<OptionalUint32RangeUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_temperature_in_celsius: Option<OptionalFloat32RangeUpdate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub storage_instructions: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_liquid: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_waste: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub index: Option<u16>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub contained_in_vessel_index: Field<u16>,
}

// ---------------------------------------------------------------------------
// Completion conditions
// ---------------------------------------------------------------------------

/// "Cook until the onions are translucent": the step is done when the listed
/// ingredients reach `ingredient_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepCompletionCondition {
    pub id: String,
    pub ingredient_state: ValidIngredientState,
    pub notes: String,
    pub optional: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<RecipeStepCompletionConditionIngredient>,
    pub belongs_to_recipe_step: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(
    RecipeStepCompletionCondition,
    "recipe step completion condition",
    links = child_links
);

impl RecipeStepCompletionCondition {
    fn child_links(&self) -> Vec<LinkMismatch> {
        LinkMismatch::check(
            "ingredients",
            &self.id,
            self.ingredients
                .iter()
                .map(|i| i.belongs_to_recipe_step_completion_condition.as_str()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepCompletionConditionIngredient {
    pub id: String,
    pub recipe_step_ingredient: String,
    pub belongs_to_recipe_step_completion_condition: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepCompletionConditionCreationRequestInput {
    /// Id of the target ingredient state
    pub ingredient_state: String,
    pub notes: String,
    pub optional: bool,
    /// Indices into the step's ingredient list
    pub ingredients: Vec<u32>,
    pub belongs_to_recipe_step: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepCompletionConditionUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub ingredient_state: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodingError;
    use crate::events::{DecodeEvent, RecordingObserver};
    use crate::fixtures;
    use crate::marshal::{decode_value, DecodeOptions};
    use serde_json::json;

    #[test]
    fn test_step_ranges_and_children_decode() {
        let step: RecipeStep = serde_json::from_value(fixtures::recipe_step("st_1", "rcp_1"))
            .unwrap();
        assert_eq!(step.estimated_time_in_seconds.max(), Some(600));
        assert!(step.temperature_in_celsius.is_unspecified());
        assert_eq!(step.ingredients[0].quantity.min(), 1.5);
        assert_eq!(step.products_by_index()[0].product_type, RecipeStepProductType::Ingredient);
    }

    #[test]
    fn test_nested_condition_mismatch_path() {
        let mut json = fixtures::recipe_step("st_1", "rcp_1");
        json["completionConditions"][0]["ingredients"][0]
            ["belongsToRecipeStepCompletionCondition"] = "cc_other".into();

        let observer = RecordingObserver::default();
        let _: RecipeStep = decode_value(json, "data", DecodeOptions::default(), &observer)
            .unwrap();
        let paths: Vec<String> = observer
            .events()
            .into_iter()
            .filter_map(|e| match e {
                DecodeEvent::ForeignKeyMismatch { path, .. } => Some(path),
                _ => None,
            })
            .collect();
        assert_eq!(paths, vec!["data.completionConditions[0].ingredients[0]"]);
    }

    #[test]
    fn test_unknown_product_type() {
        let mut json = fixtures::recipe_step("st_1", "rcp_1");
        json["products"][0]["type"] = json!("gas");
        let err = decode_value::<RecipeStep>(
            json,
            "data",
            DecodeOptions::default(),
            &RecordingObserver::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EncodingError::UnknownDiscriminator { ref kind, ref value }
                if kind == "recipe step product type" && value == "gas"
        ));
    }

    #[test]
    fn test_step_and_ingredient_update_round_trip() {
        fixtures::assert_round_trip::<RecipeStep>(fixtures::recipe_step("st_1", "rcp_1"));

        let input = RecipeStepIngredientUpdateRequestInput {
            quantity_notes: Some("heaped".into()),
            quantity: Some(
                Float32RangeWithOptionalMaxUpdate::new(Some(2.0), Field::Absent).unwrap(),
            ),
            vessel_index: Field::Null,
            product_percentage_to_use: Field::Value(0.5),
            ..Default::default()
        };
        assert_eq!(
            fixtures::assert_update_round_trip(&input),
            json!({
                "quantity": {"min": 2.0},
                "quantityNotes": "heaped",
                "productPercentageToUse": 0.5,
                "vesselIndex": null
            })
        );
    }
}

//! Service-wide reference data: ingredients, units, preparations, instruments,
//! vessels and the links between them. Read-mostly; see the client's catalogue cache.

use serde::{Deserialize, Serialize};

use crate::field::non_null;
use crate::marshal::impl_record;
use crate::range::{
    Float32RangeWithOptionalMax, Float32RangeWithOptionalMaxUpdate, OptionalFloat32Range,
    OptionalFloat32RangeUpdate, Uint16RangeWithOptionalMax, Uint16RangeWithOptionalMaxUpdate,
};
use crate::time::Timestamp;

// ---------------------------------------------------------------------------
// Ingredients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredient {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub warning: String,
    pub icon_path: String,
    pub slug: String,
    pub shopping_suggestions: String,
    pub storage_instructions: String,
    pub storage_temperature_in_celsius: OptionalFloat32Range,
    pub contains_dairy: bool,
    pub contains_peanut: bool,
    pub contains_tree_nut: bool,
    pub contains_egg: bool,
    pub contains_wheat: bool,
    pub contains_shellfish: bool,
    pub contains_sesame: bool,
    pub contains_fish: bool,
    pub contains_gluten: bool,
    pub contains_soy: bool,
    pub contains_alcohol: bool,
    pub animal_flesh: bool,
    pub animal_derived: bool,
    pub is_measured_volumetrically: bool,
    pub is_liquid: bool,
    pub restrict_to_preparations: bool,
    pub is_starch: bool,
    pub is_protein: bool,
    pub is_grain: bool,
    pub is_fruit: bool,
    pub is_salt: bool,
    pub is_fat: bool,
    pub is_acid: bool,
    pub is_heat: bool,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(ValidIngredient, "valid ingredient");

impl ValidIngredient {
    /// True when any of the tracked allergen flags is set.
    pub fn has_common_allergen(&self) -> bool {
        self.contains_dairy
            || self.contains_peanut
            || self.contains_tree_nut
            || self.contains_egg
            || self.contains_wheat
            || self.contains_shellfish
            || self.contains_sesame
            || self.contains_fish
            || self.contains_gluten
            || self.contains_soy
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientCreationRequestInput {
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub warning: String,
    pub icon_path: String,
    pub slug: String,
    pub shopping_suggestions: String,
    pub storage_instructions: String,
    pub storage_temperature_in_celsius: OptionalFloat32Range,
    pub contains_dairy: bool,
    pub contains_peanut: bool,
    pub contains_tree_nut: bool,
    pub contains_egg: bool,
    pub contains_wheat: bool,
    pub contains_shellfish: bool,
    pub contains_sesame: bool,
    pub contains_fish: bool,
    pub contains_gluten: bool,
    pub contains_soy: bool,
    pub contains_alcohol: bool,
    pub animal_flesh: bool,
    pub animal_derived: bool,
    pub is_measured_volumetrically: bool,
    pub is_liquid: bool,
    pub restrict_to_preparations: bool,
    pub is_starch: bool,
    pub is_protein: bool,
    pub is_grain: bool,
    pub is_fruit: bool,
    pub is_salt: bool,
    pub is_fat: bool,
    pub is_acid: bool,
    pub is_heat: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub shopping_suggestions: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub storage_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_temperature_in_celsius: Option<OptionalFloat32RangeUpdate>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_dairy: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_peanut: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_tree_nut: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_egg: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_wheat: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_shellfish: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_sesame: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_fish: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_gluten: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_soy: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub contains_alcohol: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub animal_flesh: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub animal_derived: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_measured_volumetrically: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_liquid: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub restrict_to_preparations: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_starch: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_protein: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_grain: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_fruit: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_salt: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_fat: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_acid: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_heat: Option<bool>,
}

// ---------------------------------------------------------------------------
// Measurement units
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMeasurementUnit {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub volumetric: bool,
    pub universal: bool,
    pub metric: bool,
    pub imperial: bool,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(ValidMeasurementUnit, "valid measurement unit");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMeasurementUnitCreationRequestInput {
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub volumetric: bool,
    pub universal: bool,
    pub metric: bool,
    pub imperial: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMeasurementUnitUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub volumetric: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub universal: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub metric: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub imperial: Option<bool>,
}

// ---------------------------------------------------------------------------
// Preparations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidPreparation {
    pub id: String,
    pub name: String,
    pub past_tense: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub yields_nothing: bool,
    pub restrict_to_ingredients: bool,
    pub temperature_required: bool,
    pub time_estimate_required: bool,
    pub consumes_vessel: bool,
    pub only_for_vessels: bool,
    pub ingredient_count: Uint16RangeWithOptionalMax,
    pub instrument_count: Uint16RangeWithOptionalMax,
    pub vessel_count: Uint16RangeWithOptionalMax,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(ValidPreparation, "valid preparation");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidPreparationCreationRequestInput {
    pub name: String,
    pub past_tense: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub yields_nothing: bool,
    pub restrict_to_ingredients: bool,
    pub temperature_required: bool,
    pub time_estimate_required: bool,
    pub consumes_vessel: bool,
    pub only_for_vessels: bool,
    pub ingredient_count: Uint16RangeWithOptionalMax,
    pub instrument_count: Uint16RangeWithOptionalMax,
    pub vessel_count: Uint16RangeWithOptionalMax,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidPreparationUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub past_tense: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub yields_nothing: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub restrict_to_ingredients: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub temperature_required: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub time_estimate_required: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub consumes_vessel: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub only_for_vessels: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_count: Option<Uint16RangeWithOptionalMaxUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_count: Option<Uint16RangeWithOptionalMaxUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_count: Option<Uint16RangeWithOptionalMaxUpdate>,
}

// ---------------------------------------------------------------------------
// Instruments and vessels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidInstrument {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub usable_for_storage: bool,
    pub display_in_summary_lists: bool,
    pub include_in_generated_instructions: bool,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(ValidInstrument, "valid instrument");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidInstrumentCreationRequestInput {
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub usable_for_storage: bool,
    pub display_in_summary_lists: bool,
    pub include_in_generated_instructions: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidInstrumentUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub usable_for_storage: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub display_in_summary_lists: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub include_in_generated_instructions: Option<bool>,
}

/// A container food is cooked or stored in. Dimensions are in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidVessel {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub shape: String,
    pub capacity: f32,
    pub capacity_unit: Option<ValidMeasurementUnit>,
    pub width_in_millimeters: f32,
    pub length_in_millimeters: f32,
    pub height_in_millimeters: f32,
    pub usable_for_storage: bool,
    pub display_in_summary_lists: bool,
    pub include_in_generated_instructions: bool,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(ValidVessel, "valid vessel");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidVesselCreationRequestInput {
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub shape: String,
    pub capacity: f32,
    #[serde(rename = "capacityUnitID")]
    pub capacity_unit_id: Option<String>,
    pub width_in_millimeters: f32,
    pub length_in_millimeters: f32,
    pub height_in_millimeters: f32,
    pub usable_for_storage: bool,
    pub display_in_summary_lists: bool,
    pub include_in_generated_instructions: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidVesselUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f32>,
    #[serde(
        default,
        rename = "capacityUnitID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity_unit_id: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub width_in_millimeters: Option<f32>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub length_in_millimeters: Option<f32>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub height_in_millimeters: Option<f32>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub usable_for_storage: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub display_in_summary_lists: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub include_in_generated_instructions: Option<bool>,
}

// ---------------------------------------------------------------------------
// Ingredient links
// ---------------------------------------------------------------------------

/// A unit an ingredient may be measured in, with the sensible quantity range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientMeasurementUnit {
    pub id: String,
    pub notes: String,
    pub measurement_unit: ValidMeasurementUnit,
    pub ingredient: ValidIngredient,
    pub allowable_quantity: Float32RangeWithOptionalMax,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(ValidIngredientMeasurementUnit, "valid ingredient measurement unit");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientMeasurementUnitCreationRequestInput {
    pub notes: String,
    #[serde(rename = "validMeasurementUnitID")]
    pub valid_measurement_unit_id: String,
    #[serde(rename = "validIngredientID")]
    pub valid_ingredient_id: String,
    pub allowable_quantity: Float32RangeWithOptionalMax,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientMeasurementUnitUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(
        default,
        rename = "validMeasurementUnitID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_measurement_unit_id: Option<String>,
    #[serde(
        default,
        rename = "validIngredientID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_ingredient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowable_quantity: Option<Float32RangeWithOptionalMaxUpdate>,
}

/// A physical state an ingredient can be in (diced, melted, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientState {
    pub id: String,
    pub name: String,
    pub past_tense: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub attribute_type: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(ValidIngredientState, "valid ingredient state");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientStateCreationRequestInput {
    pub name: String,
    pub past_tense: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub attribute_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientStateUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub past_tense: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodingError;
    use crate::events::RecordingObserver;
    use crate::field::Field;
    use crate::fixtures;
    use crate::marshal::{decode_value, DecodeOptions};
    use serde_json::json;

    #[test]
    fn test_preparation_counts_decode_open_top() {
        let prep: ValidPreparation =
            serde_json::from_value(fixtures::valid_preparation("vp_1")).unwrap();
        assert_eq!(prep.ingredient_count.min(), 1);
        assert!(prep.ingredient_count.is_unbounded_above());
        assert_eq!(prep.instrument_count.max(), Some(2));
    }

    #[test]
    fn test_inverted_storage_temperature_is_malformed_range() {
        let mut json = fixtures::valid_ingredient("vi_1");
        json["storageTemperatureInCelsius"] = json!({"min": 8.0, "max": 2.0});
        let err = decode_value::<ValidIngredient>(
            json,
            "data",
            DecodeOptions::default(),
            &RecordingObserver::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EncodingError::MalformedRange(_)));
    }

    #[test]
    fn test_ingredient_update_clears_storage_range() {
        let input = ValidIngredientUpdateRequestInput {
            storage_temperature_in_celsius: Some(
                OptionalFloat32RangeUpdate::new(Field::Null, Field::Null).unwrap(),
            ),
            contains_dairy: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "storageTemperatureInCelsius": {"min": null, "max": null},
                "containsDairy": true
            })
        );
    }

    #[test]
    fn test_catalogue_records_round_trip() {
        fixtures::assert_round_trip::<ValidIngredient>(fixtures::valid_ingredient("vi_1"));
        fixtures::assert_round_trip::<ValidMeasurementUnit>(fixtures::valid_measurement_unit(
            "vmu_1",
        ));
        fixtures::assert_round_trip::<ValidPreparation>(fixtures::valid_preparation("vp_1"));
        fixtures::assert_round_trip::<ValidInstrument>(fixtures::valid_instrument("vin_1"));
        fixtures::assert_round_trip::<ValidIngredientState>(fixtures::valid_ingredient_state(
            "vis_1",
        ));
    }

    #[test]
    fn test_preparation_update_round_trip() {
        let input = ValidPreparationUpdateRequestInput {
            past_tense: Some("minced".into()),
            ingredient_count: Some(
                Uint16RangeWithOptionalMaxUpdate::new(None, Field::Null).unwrap(),
            ),
            instrument_count: Some(
                Uint16RangeWithOptionalMaxUpdate::new(Some(1), Field::Value(3)).unwrap(),
            ),
            ..Default::default()
        };
        assert_eq!(
            fixtures::assert_update_round_trip(&input),
            json!({
                "pastTense": "minced",
                "ingredientCount": {"max": null},
                "instrumentCount": {"min": 1, "max": 3}
            })
        );
    }
}

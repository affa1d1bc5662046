//! Meal plans: a household's schedule of meal events, the options proposed for
//! each event and the votes cast on them, plus the derived grocery list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::field::{non_null, Field};
use crate::marshal::{impl_record, null_as_default, wire_enum, LinkMismatch};
use crate::models::catalogue::{ValidIngredient, ValidMeasurementUnit};
use crate::models::meals::Meal;
use crate::range::{Float32RangeWithOptionalMax, OptionalFloat32RangeUpdate};
use crate::time::Timestamp;

wire_enum! {
    pub enum MealPlanStatus as "meal plan status" {
        AwaitingVotes => "awaiting_votes",
        Finalized => "finalized",
    }
}

wire_enum! {
    pub enum GroceryListItemStatus as "grocery list item status" {
        Unknown => "unknown",
        AlreadyOwned => "already owned",
        Needs => "needs",
        Unavailable => "unavailable",
        Acquired => "acquired",
    }
}

/// How a meal plan should be presented, derived from its status and options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealPlanState {
    AwaitingVotes,
    Finalised,
    /// Finalised, but some contested event has no chosen option
    FinalisedWithUnresolvedTies,
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub notes: String,
    pub status: MealPlanStatus,
    pub voting_deadline: Timestamp,
    pub election_method: String,
    pub grocery_list_initialized: bool,
    pub tasks_created: bool,
    pub belongs_to_household: String,
    pub created_by_user: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<MealPlanEvent>,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(MealPlan, "meal plan", links = child_links);

impl MealPlan {
    fn child_links(&self) -> Vec<LinkMismatch> {
        let mut found = LinkMismatch::check(
            "events",
            &self.id,
            self.events.iter().map(|e| e.belongs_to_meal_plan.as_str()),
        );
        for (i, event) in self.events.iter().enumerate() {
            found.extend(LinkMismatch::nested(&format!("events[{i}]"), event.child_links()));
        }
        found
    }

    pub fn state(&self) -> MealPlanState {
        match self.status {
            MealPlanStatus::AwaitingVotes => MealPlanState::AwaitingVotes,
            MealPlanStatus::Finalized if self.events.iter().any(|e| e.has_unresolved_tie()) => {
                MealPlanState::FinalisedWithUnresolvedTies
            }
            MealPlanStatus::Finalized => MealPlanState::Finalised,
        }
    }

    /// Votes are accepted while the plan awaits votes and the deadline is ahead.
    pub fn voting_open(&self, now: DateTime<Utc>) -> bool {
        self.status == MealPlanStatus::AwaitingVotes
            && self
                .voting_deadline
                .to_utc()
                .map_or(false, |deadline| deadline > now)
    }

    pub fn unresolved_events(&self) -> Vec<&MealPlanEvent> {
        self.events.iter().filter(|e| e.has_unresolved_tie()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanCreationRequestInput {
    pub notes: String,
    pub voting_deadline: Timestamp,
    pub election_method: String,
    pub events: Vec<MealPlanEventCreationRequestInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub voting_deadline: Option<Timestamp>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub election_method: Option<String>,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A single meal slot (e.g. Tuesday dinner) within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEvent {
    pub id: String,
    pub notes: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub meal_name: String,
    pub belongs_to_meal_plan: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<MealPlanOption>,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(MealPlanEvent, "meal plan event", links = child_links);

impl MealPlanEvent {
    fn child_links(&self) -> Vec<LinkMismatch> {
        let mut found = LinkMismatch::check(
            "options",
            &self.id,
            self.options
                .iter()
                .map(|o| o.belongs_to_meal_plan_event.as_str()),
        );
        for (i, option) in self.options.iter().enumerate() {
            found.extend(LinkMismatch::nested(&format!("options[{i}]"), option.child_links()));
        }
        found
    }

    pub fn chosen_option(&self) -> Option<&MealPlanOption> {
        self.options.iter().find(|o| o.chosen)
    }

    /// More than one option was proposed and none was chosen.
    pub fn has_unresolved_tie(&self) -> bool {
        self.options.len() > 1 && self.chosen_option().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEventCreationRequestInput {
    pub notes: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub meal_name: String,
    pub options: Vec<MealPlanOptionCreationRequestInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEventUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub meal_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Options and votes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanOption {
    pub id: String,
    pub meal: Meal,
    pub notes: String,
    pub meal_scale: f32,
    pub chosen: bool,
    pub tie_broken: bool,
    pub assigned_cook: Option<String>,
    pub assigned_dishwasher: Option<String>,
    pub belongs_to_meal_plan_event: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub votes: Vec<MealPlanOptionVote>,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(MealPlanOption, "meal plan option", links = child_links);

impl MealPlanOption {
    fn child_links(&self) -> Vec<LinkMismatch> {
        LinkMismatch::check(
            "votes",
            &self.id,
            self.votes
                .iter()
                .map(|v| v.belongs_to_meal_plan_option.as_str()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanOptionCreationRequestInput {
    #[serde(rename = "mealID")]
    pub meal_id: String,
    pub notes: String,
    pub meal_scale: f32,
    pub assigned_cook: Option<String>,
    pub assigned_dishwasher: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanOptionUpdateRequestInput {
    #[serde(
        default,
        rename = "mealID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub meal_id: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub meal_scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub assigned_cook: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub assigned_dishwasher: Field<String>,
}

/// A ranked ballot entry. Rank 0 is the voter's first choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanOptionVote {
    pub id: String,
    pub rank: u8,
    pub abstain: bool,
    pub notes: String,
    pub by_user: String,
    pub belongs_to_meal_plan_option: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(MealPlanOptionVote, "meal plan option vote");

/// A full ballot for one event, submitted in one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanOptionVoteCreationRequestInput {
    pub votes: Vec<MealPlanOptionVoteCreationInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanOptionVoteCreationInput {
    pub belongs_to_meal_plan_option: String,
    pub rank: u8,
    pub abstain: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanOptionVoteUpdateRequestInput {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub rank: Option<u8>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub abstain: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Grocery list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanGroceryListItem {
    pub id: String,
    pub belongs_to_meal_plan: String,
    pub ingredient: ValidIngredient,
    pub measurement_unit: ValidMeasurementUnit,
    pub quantity_needed: Float32RangeWithOptionalMax,
    pub quantity_purchased: Option<f32>,
    pub purchased_measurement_unit: Option<ValidMeasurementUnit>,
    #[serde(rename = "purchasedUPC")]
    pub purchased_upc: Option<String>,
    pub purchase_price: Option<f32>,
    pub status_explanation: String,
    pub status: GroceryListItemStatus,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(MealPlanGroceryListItem, "meal plan grocery list item");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanGroceryListItemCreationRequestInput {
    #[serde(rename = "validIngredientID")]
    pub valid_ingredient_id: String,
    #[serde(rename = "validMeasurementUnitID")]
    pub valid_measurement_unit_id: String,
    pub quantity_needed: Float32RangeWithOptionalMax,
    pub quantity_purchased: Option<f32>,
    #[serde(rename = "purchasedMeasurementUnitID")]
    pub purchased_measurement_unit_id: Option<String>,
    #[serde(rename = "purchasedUPC")]
    pub purchased_upc: Option<String>,
    pub purchase_price: Option<f32>,
    pub status_explanation: String,
    pub status: GroceryListItemStatus,
    pub belongs_to_meal_plan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanGroceryListItemUpdateRequestInput {
    #[serde(
        default,
        rename = "validIngredientID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_ingredient_id: Option<String>,
    #[serde(
        default,
        rename = "validMeasurementUnitID",
        deserialize_with = "non_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_measurement_unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_needed: Option<OptionalFloat32RangeUpdate>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub quantity_purchased: Field<f32>,
    #[serde(
        default,
        rename = "purchasedMeasurementUnitID",
        skip_serializing_if = "Field::is_absent"
    )]
    pub purchased_measurement_unit_id: Field<String>,
    #[serde(default, rename = "purchasedUPC", skip_serializing_if = "Field::is_absent")]
    pub purchased_upc: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub purchase_price: Field<f32>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub status_explanation: Option<String>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub status: Option<GroceryListItemStatus>,
}

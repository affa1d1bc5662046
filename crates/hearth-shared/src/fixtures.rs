//! Canned server payloads shaped exactly like the service's responses.

use serde_json::{json, Value};

const CREATED_AT: &str = "2025-01-01T00:00:00Z";

/// `{"data": ...}`
pub fn ok(data: Value) -> Value {
    json!({ "data": data })
}

/// `{"data": [...], "pagination": {...}}` for a single full page.
pub fn page(items: Vec<Value>) -> Value {
    let count = items.len();
    json!({
        "data": items,
        "pagination": {
            "page": 1,
            "limit": 50,
            "filteredCount": count,
            "totalCount": count
        }
    })
}

/// `{"error": {...}}`
pub fn error(code: &str, message: &str, field: Option<&str>) -> Value {
    json!({ "error": { "code": code, "message": message, "field": field } })
}

pub fn user(id: &str) -> Value {
    json!({
        "id": id,
        "username": "ada",
        "emailAddress": "ada@example.com",
        "emailAddressVerifiedAt": null,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "birthday": null,
        "avatar": null,
        "accountStatus": "good",
        "accountStatusExplanation": "",
        "serviceRoles": "service_user",
        "requiresPasswordChange": false,
        "passwordLastChangedAt": null,
        "twoFactorSecretVerifiedAt": CREATED_AT,
        "lastAcceptedTOS": CREATED_AT,
        "lastAcceptedPrivacyPolicy": null,
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn household(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Home",
        "billingStatus": "unpaid",
        "contactPhone": "",
        "addressLine1": "",
        "addressLine2": "",
        "city": "",
        "state": "",
        "zipCode": "",
        "country": "",
        "latitude": null,
        "longitude": null,
        "paymentProcessorCustomerID": "",
        "subscriptionPlanID": null,
        "belongsToUser": "usr_1",
        "members": [{
            "id": "hum_1",
            "belongsToUser": user("usr_1"),
            "belongsToHousehold": id,
            "householdRole": "household_admin",
            "defaultHousehold": true,
            "createdAt": CREATED_AT,
            "lastUpdatedAt": null,
            "archivedAt": null
        }],
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn invitation(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "fromUser": user("usr_1"),
        "destinationHousehold": household("hh_1"),
        "toEmail": "grace@example.com",
        "toName": "Grace",
        "toUser": null,
        "status": status,
        "note": "",
        "statusNote": "",
        "token": "tok_1",
        "expiresAt": "2025-06-01T00:00:00Z",
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn valid_ingredient(id: &str) -> Value {
    json!({
        "id": id,
        "name": "onion",
        "pluralName": "onions",
        "description": "",
        "warning": "",
        "iconPath": "",
        "slug": "onion",
        "shoppingSuggestions": "",
        "storageInstructions": "",
        "storageTemperatureInCelsius": {"min": 4.0, "max": 10.0},
        "containsDairy": false,
        "containsPeanut": false,
        "containsTreeNut": false,
        "containsEgg": false,
        "containsWheat": false,
        "containsShellfish": false,
        "containsSesame": false,
        "containsFish": false,
        "containsGluten": false,
        "containsSoy": false,
        "containsAlcohol": false,
        "animalFlesh": false,
        "animalDerived": false,
        "isMeasuredVolumetrically": false,
        "isLiquid": false,
        "restrictToPreparations": false,
        "isStarch": false,
        "isProtein": false,
        "isGrain": false,
        "isFruit": false,
        "isSalt": false,
        "isFat": false,
        "isAcid": false,
        "isHeat": false,
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn valid_measurement_unit(id: &str) -> Value {
    json!({
        "id": id,
        "name": "gram",
        "pluralName": "grams",
        "description": "",
        "iconPath": "",
        "slug": "gram",
        "volumetric": false,
        "universal": false,
        "metric": true,
        "imperial": false,
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn valid_preparation(id: &str) -> Value {
    json!({
        "id": id,
        "name": "dice",
        "pastTense": "diced",
        "description": "",
        "iconPath": "",
        "slug": "dice",
        "yieldsNothing": false,
        "restrictToIngredients": false,
        "temperatureRequired": false,
        "timeEstimateRequired": false,
        "consumesVessel": false,
        "onlyForVessels": false,
        "ingredientCount": {"min": 1},
        "instrumentCount": {"min": 1, "max": 2},
        "vesselCount": {"min": 0},
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn valid_instrument(id: &str) -> Value {
    json!({
        "id": id,
        "name": "knife",
        "pluralName": "knives",
        "description": "",
        "iconPath": "",
        "slug": "knife",
        "usableForStorage": false,
        "displayInSummaryLists": true,
        "includeInGeneratedInstructions": true,
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn valid_ingredient_state(id: &str) -> Value {
    json!({
        "id": id,
        "name": "translucent",
        "pastTense": "made translucent",
        "description": "",
        "iconPath": "",
        "slug": "translucent",
        "attributeType": "color",
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn recipe_step(id: &str, recipe_id: &str) -> Value {
    json!({
        "id": id,
        "index": 0,
        "preparation": valid_preparation("vp_1"),
        "estimatedTimeInSeconds": {"max": 600},
        "temperatureInCelsius": {},
        "notes": "",
        "explicitInstructions": "",
        "conditionExpression": "",
        "optional": false,
        "startTimerAutomatically": false,
        "belongsToRecipe": recipe_id,
        "ingredients": [{
            "id": "rsi_1",
            "name": "onion",
            "ingredient": valid_ingredient("vi_1"),
            "measurementUnit": valid_measurement_unit("vmu_1"),
            "quantity": {"min": 1.5},
            "quantityNotes": "",
            "ingredientNotes": "",
            "optionIndex": 0,
            "optional": false,
            "toTaste": false,
            "productPercentageToUse": null,
            "vesselIndex": null,
            "recipeStepProductID": null,
            "belongsToRecipeStep": id,
            "createdAt": CREATED_AT,
            "lastUpdatedAt": null,
            "archivedAt": null
        }],
        "instruments": [],
        "vessels": [],
        "products": [{
            "id": "rsp_1",
            "name": "diced onion",
            "type": "ingredient",
            "measurementUnit": null,
            "quantity": {},
            "quantityNotes": "",
            "compostable": false,
            "storageDurationInSeconds": {},
            "storageTemperatureInCelsius": {},
            "storageInstructions": "",
            "isLiquid": false,
            "isWaste": false,
            "index": 0,
            "containedInVesselIndex": null,
            "belongsToRecipeStep": id,
            "createdAt": CREATED_AT,
            "lastUpdatedAt": null,
            "archivedAt": null
        }],
        "completionConditions": [{
            "id": "cc_1",
            "ingredientState": valid_ingredient_state("vis_1"),
            "notes": "",
            "optional": false,
            "ingredients": [{
                "id": "cci_1",
                "recipeStepIngredient": "rsi_1",
                "belongsToRecipeStepCompletionCondition": "cc_1",
                "createdAt": CREATED_AT,
                "lastUpdatedAt": null,
                "archivedAt": null
            }],
            "belongsToRecipeStep": id,
            "createdAt": CREATED_AT,
            "lastUpdatedAt": null,
            "archivedAt": null
        }],
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn recipe(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Soup",
        "slug": "soup",
        "source": "",
        "description": "",
        "inspiredByRecipeID": null,
        "estimatedPortions": {"min": 2.0, "max": 4.0},
        "portionName": "bowl",
        "pluralPortionName": "bowls",
        "sealOfApproval": false,
        "eligibleForMeals": true,
        "yieldsComponentType": "main",
        "createdByUser": "usr_1",
        "steps": [recipe_step("st_1", id)],
        "prepTasks": [],
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn meal(id: &str, recipe_id: &str) -> Value {
    json!({
        "id": id,
        "name": "Supper",
        "description": "",
        "estimatedPortions": {"min": 2.0},
        "eligibleForMealPlans": true,
        "createdByUser": "usr_1",
        "components": [{
            "recipe": recipe(recipe_id),
            "recipeScale": 1.0,
            "componentType": "main"
        }],
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn meal_plan_option(id: &str, event_id: &str) -> Value {
    json!({
        "id": id,
        "meal": meal("ml_1", "rcp_1"),
        "notes": "",
        "mealScale": 1.0,
        "chosen": false,
        "tieBroken": false,
        "assignedCook": null,
        "assignedDishwasher": null,
        "belongsToMealPlanEvent": event_id,
        "votes": [],
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn meal_plan_vote(id: &str, option_id: &str, rank: u8) -> Value {
    json!({
        "id": id,
        "rank": rank,
        "abstain": false,
        "notes": "",
        "byUser": "usr_1",
        "belongsToMealPlanOption": option_id,
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn meal_plan(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "notes": "",
        "status": status,
        "votingDeadline": "2025-03-15T00:00:00Z",
        "electionMethod": "schulze",
        "groceryListInitialized": false,
        "tasksCreated": false,
        "belongsToHousehold": "hh_1",
        "createdByUser": "usr_1",
        "events": [{
            "id": "ev_1",
            "notes": "",
            "startsAt": "2025-03-20T18:00:00Z",
            "endsAt": "2025-03-20T19:00:00Z",
            "mealName": "dinner",
            "belongsToMealPlan": id,
            "options": [],
            "createdAt": CREATED_AT,
            "lastUpdatedAt": null,
            "archivedAt": null
        }],
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

pub fn webhook(id: &str) -> Value {
    let trigger = |event_id: &str, name: &str| {
        json!({
            "id": event_id,
            "triggerEvent": name,
            "belongsToWebhook": id,
            "createdAt": CREATED_AT,
            "archivedAt": null
        })
    };
    json!({
        "id": id,
        "name": "notify",
        "contentType": "application/json",
        "url": "https://example.com/hook",
        "method": "POST",
        "events": [
            trigger("wte_1", "meal_plan_created"),
            trigger("wte_2", "recipe_created")
        ],
        "belongsToHousehold": "hh_1",
        "createdAt": CREATED_AT,
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

/// Decode `json` strictly, encode the record and decode the encoding again.
/// Both decodes must agree and no decode event may fire.
#[cfg(test)]
pub(crate) fn assert_round_trip<T>(json: Value) -> T
where
    T: crate::marshal::Model + PartialEq + std::fmt::Debug,
{
    use crate::events::RecordingObserver;
    use crate::marshal::{decode, decode_value, encode, DecodeOptions};

    let observer = RecordingObserver::default();
    let first: T = decode_value(json, "data", DecodeOptions::strict(), &observer)
        .unwrap_or_else(|e| panic!("{} fixture does not decode: {e}", T::KIND));
    let bytes = encode(&first).unwrap();
    let second: T = decode(&bytes, DecodeOptions::strict(), &observer).unwrap();
    assert_eq!(first, second);
    assert!(observer.events().is_empty());
    second
}

/// Encode an update input and decode it back, keeping absent, null and set fields apart.
#[cfg(test)]
pub(crate) fn assert_update_round_trip<U>(input: &U) -> Value
where
    U: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let bytes = crate::marshal::encode(input).unwrap();
    let decoded: U = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(&decoded, input);
    serde_json::from_slice(&bytes).unwrap()
}

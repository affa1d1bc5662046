//! Meal plans with their events, options, votes and grocery lists.

use hearth_shared::models::{
    MealPlan, MealPlanCreationRequestInput, MealPlanEvent, MealPlanEventCreationRequestInput,
    MealPlanEventUpdateRequestInput, MealPlanGroceryListItem,
    MealPlanGroceryListItemCreationRequestInput, MealPlanGroceryListItemUpdateRequestInput,
    MealPlanOption, MealPlanOptionCreationRequestInput, MealPlanOptionUpdateRequestInput,
    MealPlanOptionVote, MealPlanOptionVoteCreationRequestInput,
    MealPlanOptionVoteUpdateRequestInput, MealPlanUpdateRequestInput,
};
use hearth_shared::{ListQuery, Page, Result};

use crate::client::HearthClient;
use crate::dispatcher::{ApiRequest, Dispatcher, Method, RequestBody, RequestContext};

const PLAN: &str = "meal_plans/{mealPlanID}";
const EVENTS: &str = "meal_plans/{mealPlanID}/events";
const EVENT: &str = "meal_plans/{mealPlanID}/events/{mealPlanEventID}";
const OPTIONS: &str = "meal_plans/{mealPlanID}/events/{mealPlanEventID}/options";
const OPTION: &str = "meal_plans/{mealPlanID}/events/{mealPlanEventID}/options/{mealPlanOptionID}";
const VOTES: &str =
    "meal_plans/{mealPlanID}/events/{mealPlanEventID}/options/{mealPlanOptionID}/votes";
const VOTE: &str =
    "meal_plans/{mealPlanID}/events/{mealPlanEventID}/options/{mealPlanOptionID}/votes/{mealPlanOptionVoteID}";
const GROCERIES: &str = "meal_plans/{mealPlanID}/grocery_list_items";
const GROCERY: &str = "meal_plans/{mealPlanID}/grocery_list_items/{mealPlanGroceryListItemID}";

/// Path variables down to an option.
#[derive(Debug, Clone, Copy)]
pub struct OptionPath<'a> {
    pub meal_plan_id: &'a str,
    pub event_id: &'a str,
    pub option_id: &'a str,
}

impl OptionPath<'_> {
    fn bind(&self, request: ApiRequest) -> ApiRequest {
        request
            .var("mealPlanID", self.meal_plan_id)
            .var("mealPlanEventID", self.event_id)
            .var("mealPlanOptionID", self.option_id)
    }
}

impl<D: Dispatcher> HearthClient<D> {
    // -- Plans --

    pub async fn list_meal_plans(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<MealPlan>> {
        self.fetch_page(ctx, ApiRequest::list("meal_plans", query), query.include_archived)
            .await
    }

    pub async fn get_meal_plan(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
    ) -> Result<MealPlan> {
        self.fetch_one(ctx, ApiRequest::read(PLAN).var("mealPlanID", meal_plan_id))
            .await
    }

    pub async fn create_meal_plan(
        &self,
        ctx: &RequestContext,
        input: &MealPlanCreationRequestInput,
    ) -> Result<MealPlan> {
        self.fetch_one(ctx, ApiRequest::create("meal_plans", input)?).await
    }

    pub async fn update_meal_plan(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        input: &MealPlanUpdateRequestInput,
    ) -> Result<MealPlan> {
        let request = ApiRequest::update(PLAN, input)?.var("mealPlanID", meal_plan_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_meal_plan(&self, ctx: &RequestContext, meal_plan_id: &str) -> Result<()> {
        self.acknowledge(ctx, ApiRequest::archive(PLAN).var("mealPlanID", meal_plan_id))
            .await
    }

    /// Ask the server to tally votes now instead of waiting for the deadline.
    pub async fn finalize_meal_plan(&self, ctx: &RequestContext, meal_plan_id: &str) -> Result<()> {
        let request = ApiRequest::action(Method::Post, "meal_plans/{mealPlanID}/finalize")
            .var("mealPlanID", meal_plan_id)
            .expecting(hearth_shared::ResponseShape::Any);
        self.acknowledge(ctx, request).await
    }

    // -- Events --

    pub async fn list_meal_plan_events(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        query: &ListQuery,
    ) -> Result<Page<MealPlanEvent>> {
        let request = ApiRequest::list(EVENTS, query).var("mealPlanID", meal_plan_id);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn get_meal_plan_event(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        event_id: &str,
    ) -> Result<MealPlanEvent> {
        let request = ApiRequest::read(EVENT)
            .var("mealPlanID", meal_plan_id)
            .var("mealPlanEventID", event_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn create_meal_plan_event(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        input: &MealPlanEventCreationRequestInput,
    ) -> Result<MealPlanEvent> {
        let request = ApiRequest::create(EVENTS, input)?.var("mealPlanID", meal_plan_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn update_meal_plan_event(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        event_id: &str,
        input: &MealPlanEventUpdateRequestInput,
    ) -> Result<MealPlanEvent> {
        let request = ApiRequest::update(EVENT, input)?
            .var("mealPlanID", meal_plan_id)
            .var("mealPlanEventID", event_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_meal_plan_event(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        event_id: &str,
    ) -> Result<()> {
        let request = ApiRequest::archive(EVENT)
            .var("mealPlanID", meal_plan_id)
            .var("mealPlanEventID", event_id);
        self.acknowledge(ctx, request).await
    }

    // -- Options --

    pub async fn list_meal_plan_options(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        event_id: &str,
        query: &ListQuery,
    ) -> Result<Page<MealPlanOption>> {
        let request = ApiRequest::list(OPTIONS, query)
            .var("mealPlanID", meal_plan_id)
            .var("mealPlanEventID", event_id);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn get_meal_plan_option(
        &self,
        ctx: &RequestContext,
        path: OptionPath<'_>,
    ) -> Result<MealPlanOption> {
        self.fetch_one(ctx, path.bind(ApiRequest::read(OPTION))).await
    }

    pub async fn create_meal_plan_option(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        event_id: &str,
        input: &MealPlanOptionCreationRequestInput,
    ) -> Result<MealPlanOption> {
        let request = ApiRequest::create(OPTIONS, input)?
            .var("mealPlanID", meal_plan_id)
            .var("mealPlanEventID", event_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn update_meal_plan_option(
        &self,
        ctx: &RequestContext,
        path: OptionPath<'_>,
        input: &MealPlanOptionUpdateRequestInput,
    ) -> Result<MealPlanOption> {
        self.fetch_one(ctx, path.bind(ApiRequest::update(OPTION, input)?))
            .await
    }

    pub async fn archive_meal_plan_option(
        &self,
        ctx: &RequestContext,
        path: OptionPath<'_>,
    ) -> Result<()> {
        self.acknowledge(ctx, path.bind(ApiRequest::archive(OPTION))).await
    }

    // -- Votes --

    /// Submit a ballot for every option of one event. Returns the stored votes.
    pub async fn cast_meal_plan_votes(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        event_id: &str,
        input: &MealPlanOptionVoteCreationRequestInput,
    ) -> Result<Vec<MealPlanOptionVote>> {
        let request = ApiRequest::action(
            Method::Post,
            "meal_plans/{mealPlanID}/events/{mealPlanEventID}/vote",
        )
        .var("mealPlanID", meal_plan_id)
        .var("mealPlanEventID", event_id)
        .body(RequestBody::action(input)?)
        .expecting(hearth_shared::ResponseShape::List);
        let page = self.fetch_page(ctx, request, true).await?;
        Ok(page.items)
    }

    pub async fn list_meal_plan_votes(
        &self,
        ctx: &RequestContext,
        path: OptionPath<'_>,
        query: &ListQuery,
    ) -> Result<Page<MealPlanOptionVote>> {
        self.fetch_page(ctx, path.bind(ApiRequest::list(VOTES, query)), query.include_archived)
            .await
    }

    pub async fn get_meal_plan_vote(
        &self,
        ctx: &RequestContext,
        path: OptionPath<'_>,
        vote_id: &str,
    ) -> Result<MealPlanOptionVote> {
        let request = path.bind(ApiRequest::read(VOTE)).var("mealPlanOptionVoteID", vote_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn update_meal_plan_vote(
        &self,
        ctx: &RequestContext,
        path: OptionPath<'_>,
        vote_id: &str,
        input: &MealPlanOptionVoteUpdateRequestInput,
    ) -> Result<MealPlanOptionVote> {
        let request = path
            .bind(ApiRequest::update(VOTE, input)?)
            .var("mealPlanOptionVoteID", vote_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_meal_plan_vote(
        &self,
        ctx: &RequestContext,
        path: OptionPath<'_>,
        vote_id: &str,
    ) -> Result<()> {
        let request = path.bind(ApiRequest::archive(VOTE)).var("mealPlanOptionVoteID", vote_id);
        self.acknowledge(ctx, request).await
    }

    // -- Grocery list --

    pub async fn list_grocery_list_items(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        query: &ListQuery,
    ) -> Result<Page<MealPlanGroceryListItem>> {
        let request = ApiRequest::list(GROCERIES, query).var("mealPlanID", meal_plan_id);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn get_grocery_list_item(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        item_id: &str,
    ) -> Result<MealPlanGroceryListItem> {
        let request = ApiRequest::read(GROCERY)
            .var("mealPlanID", meal_plan_id)
            .var("mealPlanGroceryListItemID", item_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn create_grocery_list_item(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        input: &MealPlanGroceryListItemCreationRequestInput,
    ) -> Result<MealPlanGroceryListItem> {
        let request = ApiRequest::create(GROCERIES, input)?.var("mealPlanID", meal_plan_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn update_grocery_list_item(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        item_id: &str,
        input: &MealPlanGroceryListItemUpdateRequestInput,
    ) -> Result<MealPlanGroceryListItem> {
        let request = ApiRequest::update(GROCERY, input)?
            .var("mealPlanID", meal_plan_id)
            .var("mealPlanGroceryListItemID", item_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_grocery_list_item(
        &self,
        ctx: &RequestContext,
        meal_plan_id: &str,
        item_id: &str,
    ) -> Result<()> {
        let request = ApiRequest::archive(GROCERY)
            .var("mealPlanID", meal_plan_id)
            .var("mealPlanGroceryListItemID", item_id);
        self.acknowledge(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDispatcher;
    use hearth_shared::models::{MealPlanOptionVoteCreationInput, MealPlanState};
    use hearth_shared::range::OptionalFloat32RangeUpdate;
    use hearth_shared::{fixtures, Field};
    use serde_json::{json, Value};

    fn grocery_item(quantity_needed: Value) -> Value {
        json!({
            "id": "gli_1",
            "belongsToMealPlan": "mp_1",
            "ingredient": fixtures::valid_ingredient("vi_1"),
            "measurementUnit": fixtures::valid_measurement_unit("vmu_1"),
            "quantityNeeded": quantity_needed,
            "quantityPurchased": null,
            "purchasedMeasurementUnit": null,
            "purchasedUPC": null,
            "purchasePrice": null,
            "statusExplanation": "",
            "status": "needs",
            "createdAt": "2025-01-01T00:00:00Z",
            "lastUpdatedAt": null,
            "archivedAt": null
        })
    }

    #[tokio::test]
    async fn test_open_top_update_leaves_max_untouched() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(grocery_item(json!({"min": 0.25}))));
        let client = HearthClient::new(mock);
        let input = MealPlanGroceryListItemUpdateRequestInput {
            quantity_needed: Some(
                OptionalFloat32RangeUpdate::new(Field::Value(0.25), Field::Absent).unwrap(),
            ),
            ..MealPlanGroceryListItemUpdateRequestInput::default()
        };

        let item = client
            .update_grocery_list_item(&RequestContext::default(), "mp_1", "gli_1", &input)
            .await
            .unwrap();

        let sent = client.dispatcher().last_request();
        assert_eq!(sent.target, "/api/v1/meal_plans/mp_1/grocery_list_items/gli_1");
        assert_eq!(sent.body, Some(json!({"quantityNeeded": {"min": 0.25}})));
        assert_eq!(item.quantity_needed.min(), 0.25);
        assert_eq!(item.quantity_needed.max(), None);
        assert!(item.quantity_needed.is_unbounded_above());
    }

    #[tokio::test]
    async fn test_cast_votes_posts_ballot() {
        let mock = MockDispatcher::new();
        mock.respond(
            201,
            fixtures::page(vec![
                fixtures::meal_plan_vote("v_1", "opt_1", 0),
                fixtures::meal_plan_vote("v_2", "opt_2", 1),
            ]),
        );
        let client = HearthClient::new(mock);
        let ballot = MealPlanOptionVoteCreationRequestInput {
            votes: vec![
                MealPlanOptionVoteCreationInput {
                    belongs_to_meal_plan_option: "opt_1".into(),
                    rank: 0,
                    ..MealPlanOptionVoteCreationInput::default()
                },
                MealPlanOptionVoteCreationInput {
                    belongs_to_meal_plan_option: "opt_2".into(),
                    rank: 1,
                    ..MealPlanOptionVoteCreationInput::default()
                },
            ],
        };

        let votes = client
            .cast_meal_plan_votes(&RequestContext::default(), "mp_1", "ev_1", &ballot)
            .await
            .unwrap();

        assert_eq!(votes.len(), 2);
        let sent = client.dispatcher().last_request();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.target, "/api/v1/meal_plans/mp_1/events/ev_1/vote");
        assert_eq!(sent.body.unwrap()["votes"][1]["belongsToMealPlanOption"], "opt_2");
    }

    #[tokio::test]
    async fn test_finalized_plan_renders_state() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(fixtures::meal_plan("mp_1", "finalized")));
        let client = HearthClient::new(mock);

        let plan = client.get_meal_plan(&RequestContext::default(), "mp_1").await.unwrap();
        assert_eq!(plan.state(), MealPlanState::Finalised);
    }

    #[tokio::test]
    async fn test_unknown_plan_status_is_rejected() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(fixtures::meal_plan("mp_1", "abandoned")));
        let client = HearthClient::new(mock);

        let err = client
            .get_meal_plan(&RequestContext::default(), "mp_1")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            hearth_shared::HearthError::Encoding(
                hearth_shared::EncodingError::UnknownDiscriminator { ref value, .. }
            ) if value == "abandoned"
        ));
    }

    #[tokio::test]
    async fn test_option_path_binding() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(fixtures::meal_plan_vote("v_1", "opt_1", 0)));
        let client = HearthClient::new(mock);
        let path = OptionPath {
            meal_plan_id: "mp_1",
            event_id: "ev_1",
            option_id: "opt_1",
        };

        client
            .get_meal_plan_vote(&RequestContext::default(), path, "v_1")
            .await
            .unwrap();
        assert_eq!(
            client.dispatcher().last_request().target,
            "/api/v1/meal_plans/mp_1/events/ev_1/options/opt_1/votes/v_1"
        );
    }
}

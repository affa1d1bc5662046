//! Recipes, their steps, the components of each step and prep tasks.

use serde::Serialize;

use hearth_shared::models::{
    Recipe, RecipeCreationRequestInput, RecipePrepTask, RecipePrepTaskCreationRequestInput,
    RecipePrepTaskUpdateRequestInput, RecipeStep, RecipeStepCompletionCondition,
    RecipeStepCompletionConditionCreationRequestInput,
    RecipeStepCompletionConditionUpdateRequestInput, RecipeStepCreationRequestInput,
    RecipeStepIngredient, RecipeStepIngredientCreationRequestInput,
    RecipeStepIngredientUpdateRequestInput, RecipeStepInstrument,
    RecipeStepInstrumentCreationRequestInput, RecipeStepInstrumentUpdateRequestInput,
    RecipeStepProduct, RecipeStepProductCreationRequestInput, RecipeStepProductUpdateRequestInput,
    RecipeStepUpdateRequestInput, RecipeStepVessel, RecipeStepVesselCreationRequestInput,
    RecipeStepVesselUpdateRequestInput, RecipeUpdateRequestInput,
};
use hearth_shared::{ListQuery, Page, Record, Result};

use crate::client::HearthClient;
use crate::dispatcher::{ApiRequest, Dispatcher, Method, RequestContext};

const STEP: &str = "recipes/{recipeID}/steps/{recipeStepID}";

/// A record nested under a recipe step.
pub trait StepComponent: Record {
    const COLLECTION: &'static str;
    const ITEM: &'static str;
    const ID_VAR: &'static str;

    type Creation: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;
}

macro_rules! step_component {
    ($ty:ty, $segment:literal, $id_var:literal, $creation:ty, $update:ty) => {
        impl StepComponent for $ty {
            const COLLECTION: &'static str =
                concat!("recipes/{recipeID}/steps/{recipeStepID}/", $segment);
            const ITEM: &'static str =
                concat!("recipes/{recipeID}/steps/{recipeStepID}/", $segment, "/{", $id_var, "}");
            const ID_VAR: &'static str = $id_var;

            type Creation = $creation;
            type Update = $update;
        }
    };
}

step_component!(
    RecipeStepIngredient,
    "ingredients",
    "recipeStepIngredientID",
    RecipeStepIngredientCreationRequestInput,
    RecipeStepIngredientUpdateRequestInput
);
step_component!(
    RecipeStepInstrument,
    "instruments",
    "recipeStepInstrumentID",
    RecipeStepInstrumentCreationRequestInput,
    RecipeStepInstrumentUpdateRequestInput
);
step_component!(
    RecipeStepVessel,
    "vessels",
    "recipeStepVesselID",
    RecipeStepVesselCreationRequestInput,
    RecipeStepVesselUpdateRequestInput
);
step_component!(
    RecipeStepProduct,
    "products",
    "recipeStepProductID",
    RecipeStepProductCreationRequestInput,
    RecipeStepProductUpdateRequestInput
);
step_component!(
    RecipeStepCompletionCondition,
    "completion_conditions",
    "recipeStepCompletionConditionID",
    RecipeStepCompletionConditionCreationRequestInput,
    RecipeStepCompletionConditionUpdateRequestInput
);

impl<D: Dispatcher> HearthClient<D> {
    // -- Recipes --

    pub async fn list_recipes(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<Recipe>> {
        self.fetch_page(ctx, ApiRequest::list("recipes", query), query.include_archived)
            .await
    }

    pub async fn search_recipes(
        &self,
        ctx: &RequestContext,
        text: &str,
        query: &ListQuery,
    ) -> Result<Page<Recipe>> {
        let request = ApiRequest::list("recipes/search", query).param("q", text);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn get_recipe(&self, ctx: &RequestContext, recipe_id: &str) -> Result<Recipe> {
        self.fetch_one(ctx, ApiRequest::read("recipes/{recipeID}").var("recipeID", recipe_id))
            .await
    }

    pub async fn create_recipe(
        &self,
        ctx: &RequestContext,
        input: &RecipeCreationRequestInput,
    ) -> Result<Recipe> {
        self.fetch_one(ctx, ApiRequest::create("recipes", input)?).await
    }

    pub async fn update_recipe(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        input: &RecipeUpdateRequestInput,
    ) -> Result<Recipe> {
        let request = ApiRequest::update("recipes/{recipeID}", input)?.var("recipeID", recipe_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_recipe(&self, ctx: &RequestContext, recipe_id: &str) -> Result<()> {
        self.acknowledge(ctx, ApiRequest::archive("recipes/{recipeID}").var("recipeID", recipe_id))
            .await
    }

    /// Copy a recipe into the caller's account.
    pub async fn clone_recipe(&self, ctx: &RequestContext, recipe_id: &str) -> Result<Recipe> {
        let request = ApiRequest::action(Method::Post, "recipes/{recipeID}/clone")
            .var("recipeID", recipe_id);
        self.fetch_one(ctx, request).await
    }

    // -- Steps --

    pub async fn list_recipe_steps(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        query: &ListQuery,
    ) -> Result<Page<RecipeStep>> {
        let request = ApiRequest::list("recipes/{recipeID}/steps", query)
            .var("recipeID", recipe_id);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn get_recipe_step(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        step_id: &str,
    ) -> Result<RecipeStep> {
        let request = ApiRequest::read(STEP)
            .var("recipeID", recipe_id)
            .var("recipeStepID", step_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn create_recipe_step(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        input: &RecipeStepCreationRequestInput,
    ) -> Result<RecipeStep> {
        let request = ApiRequest::create("recipes/{recipeID}/steps", input)?
            .var("recipeID", recipe_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn update_recipe_step(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        step_id: &str,
        input: &RecipeStepUpdateRequestInput,
    ) -> Result<RecipeStep> {
        let request = ApiRequest::update(STEP, input)?
            .var("recipeID", recipe_id)
            .var("recipeStepID", step_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_recipe_step(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        step_id: &str,
    ) -> Result<()> {
        let request = ApiRequest::archive(STEP)
            .var("recipeID", recipe_id)
            .var("recipeStepID", step_id);
        self.acknowledge(ctx, request).await
    }

    // -- Step components --

    pub async fn list_step_components<T: StepComponent>(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        step_id: &str,
        query: &ListQuery,
    ) -> Result<Page<T>> {
        let request = ApiRequest::list(T::COLLECTION, query)
            .var("recipeID", recipe_id)
            .var("recipeStepID", step_id);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn get_step_component<T: StepComponent>(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        step_id: &str,
        id: &str,
    ) -> Result<T> {
        let request = ApiRequest::read(T::ITEM)
            .var("recipeID", recipe_id)
            .var("recipeStepID", step_id)
            .var(T::ID_VAR, id);
        self.fetch_one(ctx, request).await
    }

    pub async fn create_step_component<T: StepComponent>(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        step_id: &str,
        input: &T::Creation,
    ) -> Result<T> {
        let request = ApiRequest::create(T::COLLECTION, input)?
            .var("recipeID", recipe_id)
            .var("recipeStepID", step_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn update_step_component<T: StepComponent>(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        step_id: &str,
        id: &str,
        input: &T::Update,
    ) -> Result<T> {
        let request = ApiRequest::update(T::ITEM, input)?
            .var("recipeID", recipe_id)
            .var("recipeStepID", step_id)
            .var(T::ID_VAR, id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_step_component<T: StepComponent>(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        step_id: &str,
        id: &str,
    ) -> Result<()> {
        let request = ApiRequest::archive(T::ITEM)
            .var("recipeID", recipe_id)
            .var("recipeStepID", step_id)
            .var(T::ID_VAR, id);
        self.acknowledge(ctx, request).await
    }

    // -- Prep tasks --

    pub async fn list_recipe_prep_tasks(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        query: &ListQuery,
    ) -> Result<Page<RecipePrepTask>> {
        let request = ApiRequest::list("recipes/{recipeID}/prep_tasks", query)
            .var("recipeID", recipe_id);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn get_recipe_prep_task(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        task_id: &str,
    ) -> Result<RecipePrepTask> {
        let request = ApiRequest::read("recipes/{recipeID}/prep_tasks/{recipePrepTaskID}")
            .var("recipeID", recipe_id)
            .var("recipePrepTaskID", task_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn create_recipe_prep_task(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        input: &RecipePrepTaskCreationRequestInput,
    ) -> Result<RecipePrepTask> {
        let request = ApiRequest::create("recipes/{recipeID}/prep_tasks", input)?
            .var("recipeID", recipe_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn update_recipe_prep_task(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        task_id: &str,
        input: &RecipePrepTaskUpdateRequestInput,
    ) -> Result<RecipePrepTask> {
        let request = ApiRequest::update("recipes/{recipeID}/prep_tasks/{recipePrepTaskID}", input)?
            .var("recipeID", recipe_id)
            .var("recipePrepTaskID", task_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_recipe_prep_task(
        &self,
        ctx: &RequestContext,
        recipe_id: &str,
        task_id: &str,
    ) -> Result<()> {
        let request = ApiRequest::archive("recipes/{recipeID}/prep_tasks/{recipePrepTaskID}")
            .var("recipeID", recipe_id)
            .var("recipePrepTaskID", task_id);
        self.acknowledge(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::BodyKind;
    use crate::testing::MockDispatcher;
    use hearth_shared::range::Float32RangeWithOptionalMax;
    use hearth_shared::{fixtures, DecodeEvent, RecordingObserver, ServerErrorKind, Timestamp};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_recipe_echoes_input_plus_server_fields() {
        let input = RecipeCreationRequestInput {
            estimated_portions: Float32RangeWithOptionalMax::new(1.0, Some(2.0)).unwrap(),
            ..RecipeCreationRequestInput::new("A", "a")
        };
        let mut created = fixtures::recipe("rcp_1");
        created["name"] = json!("A");
        created["slug"] = json!("a");
        created["estimatedPortions"] = json!({"min": 1.0, "max": 2.0});
        created["createdAt"] = json!("2025-01-02T03:04:05Z");
        created["steps"] = json!([]);

        let mock = MockDispatcher::new();
        mock.respond(201, fixtures::ok(created));
        let client = HearthClient::new(mock);

        let recipe = client
            .create_recipe(&RequestContext::default(), &input)
            .await
            .unwrap();

        assert_eq!(recipe.id, "rcp_1");
        assert_eq!(recipe.created_at, Timestamp::new("2025-01-02T03:04:05Z"));
        assert_eq!(recipe.name, input.name);
        assert_eq!(recipe.slug, input.slug);
        assert_eq!(recipe.estimated_portions, input.estimated_portions);
        assert_eq!(recipe.eligible_for_meals, input.eligible_for_meals);
        assert_eq!(recipe.seal_of_approval, input.seal_of_approval);
        assert!(recipe.steps.is_empty());

        let sent = client.dispatcher().last_request();
        assert_eq!(sent.target, "/api/v1/recipes");
        assert_eq!(sent.body_kind, Some(BodyKind::Creation));
        let body = sent.body.unwrap();
        assert_eq!(body["estimatedPortions"], json!({"min": 1.0, "max": 2.0}));
        assert_eq!(body["steps"], json!([]));
        assert_eq!(body["prepTasks"], json!([]));
        assert_eq!(body["alsoCreateMeal"], json!(false));
    }

    #[tokio::test]
    async fn test_validation_failure_keeps_field_path() {
        let mock = MockDispatcher::new();
        mock.respond(
            400,
            json!({
                "data": null,
                "error": {"code": "validation_failed", "message": "name required", "field": "name"}
            }),
        );
        let client = HearthClient::new(mock);

        let err = client
            .create_recipe(&RequestContext::default(), &RecipeCreationRequestInput::new("", "a"))
            .await
            .unwrap_err();

        match err {
            hearth_shared::HearthError::Server(server) => {
                assert_eq!(server.kind, ServerErrorKind::ValidationFailed);
                assert_eq!(server.code, "validation_failed");
                assert_eq!(server.field.as_deref(), Some("name"));
                assert_eq!(server.message, "name required");
            }
            other => panic!("expected a server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_step_component_paths() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(json!({})));
        let client = HearthClient::new(mock);

        client
            .archive_step_component::<RecipeStepVessel>(
                &RequestContext::default(),
                "rcp_1",
                "st_1",
                "rsv_1",
            )
            .await
            .unwrap();

        assert_eq!(
            client.dispatcher().last_request().target,
            "/api/v1/recipes/rcp_1/steps/st_1/vessels/rsv_1"
        );
    }

    #[tokio::test]
    async fn test_mismatched_step_parent_is_flagged() {
        let mut recipe = fixtures::recipe("rcp_1");
        recipe["steps"][0]["belongsToRecipe"] = json!("rcp_other");
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(recipe));
        let observer = Arc::new(RecordingObserver::default());
        let client = HearthClient::new(mock).with_observer(observer.clone());

        let recipe = client.get_recipe(&RequestContext::default(), "rcp_1").await.unwrap();

        assert_eq!(recipe.steps[0].belongs_to_recipe, "rcp_other");
        assert!(observer.events().iter().any(|event| matches!(
            event,
            DecodeEvent::ForeignKeyMismatch { expected, found, .. }
                if expected == "rcp_1" && found == "rcp_other"
        )));
    }

    #[tokio::test]
    async fn test_clone_recipe() {
        let mock = MockDispatcher::new();
        mock.respond(201, fixtures::ok(fixtures::recipe("rcp_2")));
        let client = HearthClient::new(mock);

        let copy = client.clone_recipe(&RequestContext::default(), "rcp_1").await.unwrap();

        assert_eq!(copy.id, "rcp_2");
        let sent = client.dispatcher().last_request();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.target, "/api/v1/recipes/rcp_1/clone");
        assert!(sent.body.is_none());
    }
}

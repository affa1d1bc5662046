use hearth_shared::models::{Meal, MealCreationRequestInput, MealUpdateRequestInput};
use hearth_shared::{ListQuery, Page, Result};

use crate::client::HearthClient;
use crate::dispatcher::{ApiRequest, Dispatcher, RequestContext};

impl<D: Dispatcher> HearthClient<D> {
    pub async fn list_meals(&self, ctx: &RequestContext, query: &ListQuery) -> Result<Page<Meal>> {
        self.fetch_page(ctx, ApiRequest::list("meals", query), query.include_archived)
            .await
    }

    pub async fn search_meals(
        &self,
        ctx: &RequestContext,
        text: &str,
        query: &ListQuery,
    ) -> Result<Page<Meal>> {
        let request = ApiRequest::list("meals/search", query).param("q", text);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn get_meal(&self, ctx: &RequestContext, meal_id: &str) -> Result<Meal> {
        self.fetch_one(ctx, ApiRequest::read("meals/{mealID}").var("mealID", meal_id))
            .await
    }

    pub async fn create_meal(
        &self,
        ctx: &RequestContext,
        input: &MealCreationRequestInput,
    ) -> Result<Meal> {
        self.fetch_one(ctx, ApiRequest::create("meals", input)?).await
    }

    pub async fn update_meal(
        &self,
        ctx: &RequestContext,
        meal_id: &str,
        input: &MealUpdateRequestInput,
    ) -> Result<Meal> {
        let request = ApiRequest::update("meals/{mealID}", input)?.var("mealID", meal_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_meal(&self, ctx: &RequestContext, meal_id: &str) -> Result<()> {
        self.acknowledge(ctx, ApiRequest::archive("meals/{mealID}").var("mealID", meal_id))
            .await
    }
}

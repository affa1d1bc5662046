use hearth_shared::models::{
    UserIngredientPreference, UserIngredientPreferenceCreationRequestInput,
    UserIngredientPreferenceUpdateRequestInput,
};
use hearth_shared::{ListQuery, Page, Result};

use crate::client::HearthClient;
use crate::dispatcher::{ApiRequest, Dispatcher, RequestContext};

const PREFERENCE: &str = "user_ingredient_preferences/{userIngredientPreferenceID}";

impl<D: Dispatcher> HearthClient<D> {
    pub async fn list_ingredient_preferences(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<UserIngredientPreference>> {
        self.fetch_page(
            ctx,
            ApiRequest::list("user_ingredient_preferences", query),
            query.include_archived,
        )
        .await
    }

    /// The server may create one preference per ingredient in a single call.
    pub async fn create_ingredient_preference(
        &self,
        ctx: &RequestContext,
        input: &UserIngredientPreferenceCreationRequestInput,
    ) -> Result<Vec<UserIngredientPreference>> {
        let request = ApiRequest::create("user_ingredient_preferences", input)?
            .expecting(hearth_shared::ResponseShape::List);
        Ok(self.fetch_page(ctx, request, true).await?.items)
    }

    pub async fn update_ingredient_preference(
        &self,
        ctx: &RequestContext,
        preference_id: &str,
        input: &UserIngredientPreferenceUpdateRequestInput,
    ) -> Result<UserIngredientPreference> {
        let request = ApiRequest::update(PREFERENCE, input)?
            .var("userIngredientPreferenceID", preference_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_ingredient_preference(
        &self,
        ctx: &RequestContext,
        preference_id: &str,
    ) -> Result<()> {
        let request = ApiRequest::archive(PREFERENCE)
            .var("userIngredientPreferenceID", preference_id);
        self.acknowledge(ctx, request).await
    }
}

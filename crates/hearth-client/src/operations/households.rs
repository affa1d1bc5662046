use hearth_shared::models::{
    Household, HouseholdCreationRequestInput, HouseholdInstrumentOwnership,
    HouseholdInstrumentOwnershipCreationRequestInput,
    HouseholdInstrumentOwnershipUpdateRequestInput, HouseholdUpdateRequestInput,
};
use hearth_shared::{ListQuery, Page, Result};

use crate::client::HearthClient;
use crate::dispatcher::{ApiRequest, Dispatcher, Method, RequestContext};

impl<D: Dispatcher> HearthClient<D> {
    pub async fn list_households(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<Household>> {
        self.fetch_page(ctx, ApiRequest::list("households", query), query.include_archived)
            .await
    }

    pub async fn get_household(
        &self,
        ctx: &RequestContext,
        household_id: &str,
    ) -> Result<Household> {
        let request = ApiRequest::read("households/{householdID}").var("householdID", household_id);
        self.fetch_one(ctx, request).await
    }

    /// The household the session is currently acting in.
    pub async fn current_household(&self, ctx: &RequestContext) -> Result<Household> {
        self.fetch_one(ctx, ApiRequest::read("households/current")).await
    }

    pub async fn create_household(
        &self,
        ctx: &RequestContext,
        input: &HouseholdCreationRequestInput,
    ) -> Result<Household> {
        self.fetch_one(ctx, ApiRequest::create("households", input)?).await
    }

    pub async fn update_household(
        &self,
        ctx: &RequestContext,
        household_id: &str,
        input: &HouseholdUpdateRequestInput,
    ) -> Result<Household> {
        let request = ApiRequest::update("households/{householdID}", input)?
            .var("householdID", household_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_household(&self, ctx: &RequestContext, household_id: &str) -> Result<()> {
        let request = ApiRequest::archive("households/{householdID}")
            .var("householdID", household_id);
        self.acknowledge(ctx, request).await
    }

    pub async fn set_default_household(
        &self,
        ctx: &RequestContext,
        household_id: &str,
    ) -> Result<()> {
        let request = ApiRequest::action(Method::Post, "households/{householdID}/default")
            .var("householdID", household_id);
        self.acknowledge(ctx, request).await
    }

    // -- Instruments the household owns --

    pub async fn list_household_instruments(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<HouseholdInstrumentOwnership>> {
        self.fetch_page(
            ctx,
            ApiRequest::list("households/instruments", query),
            query.include_archived,
        )
        .await
    }

    pub async fn get_household_instrument(
        &self,
        ctx: &RequestContext,
        ownership_id: &str,
    ) -> Result<HouseholdInstrumentOwnership> {
        let request = ApiRequest::read("households/instruments/{householdInstrumentOwnershipID}")
            .var("householdInstrumentOwnershipID", ownership_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn create_household_instrument(
        &self,
        ctx: &RequestContext,
        input: &HouseholdInstrumentOwnershipCreationRequestInput,
    ) -> Result<HouseholdInstrumentOwnership> {
        self.fetch_one(ctx, ApiRequest::create("households/instruments", input)?)
            .await
    }

    pub async fn update_household_instrument(
        &self,
        ctx: &RequestContext,
        ownership_id: &str,
        input: &HouseholdInstrumentOwnershipUpdateRequestInput,
    ) -> Result<HouseholdInstrumentOwnership> {
        let request = ApiRequest::update(
            "households/instruments/{householdInstrumentOwnershipID}",
            input,
        )?
        .var("householdInstrumentOwnershipID", ownership_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_household_instrument(
        &self,
        ctx: &RequestContext,
        ownership_id: &str,
    ) -> Result<()> {
        let request = ApiRequest::archive("households/instruments/{householdInstrumentOwnershipID}")
            .var("householdInstrumentOwnershipID", ownership_id);
        self.acknowledge(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::dispatcher::{BodyKind, IdempotencyKey, Method};
    use crate::testing::MockDispatcher;
    use crate::{HearthClient, RequestContext};
    use hearth_shared::models::HouseholdUpdateRequestInput;
    use hearth_shared::{fixtures, Field, ListQuery, Pagination};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_households_returns_items_and_pagination() {
        let mock = MockDispatcher::new();
        mock.respond(
            200,
            fixtures::page(vec![fixtures::household("hh_1"), fixtures::household("hh_2")]),
        );
        let client = HearthClient::new(mock);

        let page = client
            .list_households(&RequestContext::default(), &ListQuery::default())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].id, "hh_2");
        assert_eq!(
            page.pagination,
            Pagination {
                page: 1,
                limit: 50,
                filtered_count: 2,
                total_count: 2
            }
        );
        assert!(!page.has_more());
        assert_eq!(
            client.dispatcher().last_request().target,
            "/api/v1/households?page=1&limit=50&includeArchived=false&sortBy=asc"
        );
    }

    #[tokio::test]
    async fn test_update_sends_only_touched_fields() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(fixtures::household("hh_1")));
        let client = HearthClient::new(mock);
        let input = HouseholdUpdateRequestInput {
            name: Some("Cabin".into()),
            latitude: Field::Null,
            ..HouseholdUpdateRequestInput::default()
        };
        let ctx = RequestContext::default().with_idempotency_key(IdempotencyKey::new("key-1"));

        client.update_household(&ctx, "hh_1", &input).await.unwrap();

        let sent = client.dispatcher().last_request();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.body_kind, Some(BodyKind::Update));
        assert_eq!(sent.body, Some(json!({"name": "Cabin", "latitude": null})));
        assert_eq!(sent.idempotency_key.as_deref(), Some("key-1"));
    }

    #[tokio::test]
    async fn test_reads_never_carry_idempotency_key() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(fixtures::household("hh_1")));
        let client = HearthClient::new(mock);
        let ctx = RequestContext::default().with_idempotency_key(IdempotencyKey::new("key-1"));

        client.current_household(&ctx).await.unwrap();
        assert_eq!(client.dispatcher().last_request().idempotency_key, None);
    }

    #[tokio::test]
    async fn test_archive_household() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(json!({})));
        let client = HearthClient::new(mock);

        client.archive_household(&RequestContext::default(), "hh_1").await.unwrap();

        let sent = client.dispatcher().last_request();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.target, "/api/v1/households/hh_1");
    }

    #[tokio::test]
    async fn test_each_mutation_gets_its_own_key() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(json!({})));
        mock.respond(200, fixtures::ok(json!({})));
        let client = HearthClient::new(mock);
        let first = RequestContext::default().with_idempotency_key(IdempotencyKey::new("key-1"));
        let second = first.with_new_idempotency_key();

        client.archive_household(&first, "hh_1").await.unwrap();
        client.archive_household(&second, "hh_2").await.unwrap();

        let keys: Vec<_> = client
            .dispatcher()
            .requests()
            .into_iter()
            .map(|r| r.idempotency_key)
            .collect();
        assert_eq!(keys[0].as_deref(), Some("key-1"));
        assert!(keys[1].is_some());
        assert_ne!(keys[0], keys[1]);

        first.cancel.cancel();
        assert!(second.cancel.is_cancelled());
    }
}

use hearth_shared::models::{
    Webhook, WebhookCreationRequestInput, WebhookTriggerEvent,
    WebhookTriggerEventCreationRequestInput,
};
use hearth_shared::{ListQuery, Page, Result};

use crate::client::HearthClient;
use crate::dispatcher::{ApiRequest, Dispatcher, RequestContext};

impl<D: Dispatcher> HearthClient<D> {
    pub async fn list_webhooks(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<Webhook>> {
        self.fetch_page(ctx, ApiRequest::list("webhooks", query), query.include_archived)
            .await
    }

    pub async fn get_webhook(&self, ctx: &RequestContext, webhook_id: &str) -> Result<Webhook> {
        self.fetch_one(ctx, ApiRequest::read("webhooks/{webhookID}").var("webhookID", webhook_id))
            .await
    }

    pub async fn create_webhook(
        &self,
        ctx: &RequestContext,
        input: &WebhookCreationRequestInput,
    ) -> Result<Webhook> {
        self.fetch_one(ctx, ApiRequest::create("webhooks", input)?).await
    }

    pub async fn archive_webhook(&self, ctx: &RequestContext, webhook_id: &str) -> Result<()> {
        let request = ApiRequest::archive("webhooks/{webhookID}").var("webhookID", webhook_id);
        self.acknowledge(ctx, request).await
    }

    pub async fn add_webhook_trigger_event(
        &self,
        ctx: &RequestContext,
        webhook_id: &str,
        input: &WebhookTriggerEventCreationRequestInput,
    ) -> Result<WebhookTriggerEvent> {
        let request = ApiRequest::create("webhooks/{webhookID}/trigger_events", input)?
            .var("webhookID", webhook_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_webhook_trigger_event(
        &self,
        ctx: &RequestContext,
        webhook_id: &str,
        trigger_event_id: &str,
    ) -> Result<()> {
        let request =
            ApiRequest::archive("webhooks/{webhookID}/trigger_events/{webhookTriggerEventID}")
                .var("webhookID", webhook_id)
            .var("webhookTriggerEventID", trigger_event_id);
        self.acknowledge(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::MockDispatcher;
    use crate::{HearthClient, RequestContext};
    use hearth_shared::models::WebhookCreationRequestInput;
    use hearth_shared::fixtures;

    #[tokio::test]
    async fn test_create_webhook() {
        let mock = MockDispatcher::new();
        mock.respond(201, fixtures::ok(fixtures::webhook("wh_1")));
        let client = HearthClient::new(mock);
        let input = WebhookCreationRequestInput {
            name: "notify".into(),
            content_type: "application/json".into(),
            url: "https://example.com/hook".into(),
            method: "POST".into(),
            events: vec!["meal_plan_created".into()],
        };

        let webhook = client
            .create_webhook(&RequestContext::default(), &input)
            .await
            .unwrap();

        assert!(webhook.fires_on("recipe_created"));
        let sent = client.dispatcher().last_request();
        assert_eq!(sent.target, "/api/v1/webhooks");
        assert_eq!(sent.body.unwrap()["events"][0], "meal_plan_created");
    }

    #[tokio::test]
    async fn test_archive_trigger_event() {
        let mock = MockDispatcher::new();
        mock.respond_raw(204, "");
        let client = HearthClient::new(mock);

        client
            .archive_webhook_trigger_event(&RequestContext::default(), "wh_1", "wte_1")
            .await
            .unwrap();
        assert_eq!(
            client.dispatcher().last_request().target,
            "/api/v1/webhooks/wh_1/trigger_events/wte_1"
        );
    }
}

use hearth_shared::models::{
    AuditLogEntry, CoreUserDataCollection, User, UserDetailsUpdateRequestInput,
    UserRegistrationInput,
};
use hearth_shared::{ListQuery, Page, Result};

use crate::client::HearthClient;
use crate::dispatcher::{ApiRequest, Dispatcher, RequestContext};

impl<D: Dispatcher> HearthClient<D> {
    /// The user the configured credentials belong to.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User> {
        self.fetch_one(ctx, ApiRequest::read("users/self")).await
    }

    pub async fn get_user(&self, ctx: &RequestContext, user_id: &str) -> Result<User> {
        self.fetch_one(ctx, ApiRequest::read("users/{userID}").var("userID", user_id))
            .await
    }

    pub async fn list_users(&self, ctx: &RequestContext, query: &ListQuery) -> Result<Page<User>> {
        self.fetch_page(ctx, ApiRequest::list("users", query), query.include_archived)
            .await
    }

    pub async fn search_users(
        &self,
        ctx: &RequestContext,
        username: &str,
        query: &ListQuery,
    ) -> Result<Page<User>> {
        let request = ApiRequest::list("users/search", query).param("q", username);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn register_user(
        &self,
        ctx: &RequestContext,
        input: &UserRegistrationInput,
    ) -> Result<User> {
        self.fetch_one(ctx, ApiRequest::create("users", input)?).await
    }

    pub async fn update_user_details(
        &self,
        ctx: &RequestContext,
        input: &UserDetailsUpdateRequestInput,
    ) -> Result<User> {
        self.fetch_one(ctx, ApiRequest::update("users/details", input)?)
            .await
    }

    pub async fn archive_user(&self, ctx: &RequestContext, user_id: &str) -> Result<()> {
        self.acknowledge(ctx, ApiRequest::archive("users/{userID}").var("userID", user_id))
            .await
    }

    /// Fetch a finished data-privacy report.
    pub async fn get_user_data_report(
        &self,
        ctx: &RequestContext,
        report_id: &str,
    ) -> Result<CoreUserDataCollection> {
        let request = ApiRequest::read("data_privacy/reports/{reportID}")
            .var("reportID", report_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn get_audit_log_entry(
        &self,
        ctx: &RequestContext,
        entry_id: &str,
    ) -> Result<AuditLogEntry> {
        let request = ApiRequest::read("audit_log_entries/{auditLogEntryID}")
            .var("auditLogEntryID", entry_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn list_audit_log_entries_for_user(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<AuditLogEntry>> {
        self.fetch_page(ctx, ApiRequest::list("audit_log_entries/for_user", query), true)
            .await
    }

    pub async fn list_audit_log_entries_for_household(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<AuditLogEntry>> {
        self.fetch_page(ctx, ApiRequest::list("audit_log_entries/for_household", query), true)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::MockDispatcher;
    use crate::{HearthClient, RequestContext};
    use hearth_shared::models::UserRegistrationInput;
    use hearth_shared::{
        fixtures, DecodeEvent, DecodeOptions, EncodingError, HearthError, RecordingObserver,
    };
    use serde_json::json;
    use std::sync::Arc;

    fn with_extra_field() -> serde_json::Value {
        let mut user = fixtures::user("usr_1");
        user["colorTheme"] = json!("oak");
        fixtures::ok(user)
    }

    #[tokio::test]
    async fn test_unknown_field_is_reported_not_fatal() {
        let mock = MockDispatcher::new();
        mock.respond(200, with_extra_field());
        let observer = Arc::new(RecordingObserver::default());
        let client = HearthClient::new(mock).with_observer(observer.clone());

        let user = client.current_user(&RequestContext::default()).await.unwrap();

        assert_eq!(user.id, "usr_1");
        assert_eq!(
            observer.events(),
            vec![DecodeEvent::UnknownField {
                record: "user",
                path: "data.colorTheme".into()
            }]
        );
        assert_eq!(client.dispatcher().last_request().target, "/api/v1/users/self");
    }

    #[tokio::test]
    async fn test_unknown_field_rejected_in_strict_mode() {
        let mock = MockDispatcher::new();
        mock.respond(200, with_extra_field());
        let client = HearthClient::new(mock).with_decode_options(DecodeOptions::strict());

        let err = client.current_user(&RequestContext::default()).await.unwrap_err();
        assert!(matches!(
            err,
            HearthError::Encoding(EncodingError::UnknownField { ref path })
                if path == "data.colorTheme"
        ));
    }

    #[tokio::test]
    async fn test_register_posts_creation_body() {
        let mock = MockDispatcher::new();
        mock.respond(201, fixtures::ok(fixtures::user("usr_1")));
        let client = HearthClient::new(mock);
        let input = UserRegistrationInput {
            username: "ada".into(),
            email_address: "ada@example.com".into(),
            password: "hunter22".into(),
            ..UserRegistrationInput::default()
        };

        client.register_user(&RequestContext::default(), &input).await.unwrap();

        let sent = client.dispatcher().last_request();
        assert_eq!(sent.target, "/api/v1/users");
        assert_eq!(sent.body.unwrap()["emailAddress"], "ada@example.com");
    }
}

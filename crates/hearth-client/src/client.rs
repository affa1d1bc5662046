//! The operation surface and the shared request/decode path behind it.
//!
//! `HearthClient` is a cheap handle: clones share the dispatcher, observer
//! and catalogue cache. Operations live in [`crate::operations`], one module
//! per resource family.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use hearth_shared::{
    decode_envelope, DecodeObserver, DecodeOptions, EncodingError, Envelope, Model, Page, Record,
    Result, ServerError, TracingObserver, TransportError,
};

use crate::cache::CatalogueCache;
use crate::dispatcher::{ApiRequest, Dispatcher, Method, RawResponse, RequestContext};

pub struct HearthClient<D> {
    dispatcher: Arc<D>,
    options: DecodeOptions,
    observer: Arc<dyn DecodeObserver>,
    cache: CatalogueCache,
}

impl<D> Clone for HearthClient<D> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            options: self.options,
            observer: Arc::clone(&self.observer),
            cache: self.cache.clone(),
        }
    }
}

impl<D: Dispatcher> HearthClient<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            options: DecodeOptions::default(),
            observer: Arc::new(TracingObserver),
            cache: CatalogueCache::new(),
        }
    }

    pub fn with_decode_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the sink for unknown-field and foreign-key warnings.
    pub fn with_observer(mut self, observer: Arc<dyn DecodeObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn cache(&self) -> &CatalogueCache {
        &self.cache
    }

    async fn round_trip(
        &self,
        ctx: &RequestContext,
        mut request: ApiRequest,
    ) -> Result<(ApiRequest, RawResponse)> {
        if ctx.cancel.is_cancelled() {
            return Err(TransportError::Cancelled.into());
        }
        if request.method != Method::Get && request.idempotency_key.is_none() {
            request.idempotency_key = ctx.idempotency_key.clone();
        }

        let target = request.render_target()?;
        debug!(method = %request.method, path = %target, "Dispatching request");

        let response = self.dispatcher.dispatch(&request, &target, &ctx.cancel).await?;

        // A response that raced a cancellation is dropped undecoded.
        if ctx.cancel.is_cancelled() {
            return Err(TransportError::Cancelled.into());
        }
        Ok((request, response))
    }

    fn open<T: Model>(&self, request: &ApiRequest, response: &RawResponse) -> Result<Envelope<T>> {
        let envelope = decode_envelope::<T>(
            &response.body,
            request.expect,
            self.options,
            self.observer.as_ref(),
        )?;
        match envelope {
            Envelope::Error(error) => {
                let error: ServerError = error.into_server_error(response.status);
                debug!(
                    status = error.status,
                    code = %error.code,
                    field = ?error.field,
                    "Server reported an error"
                );
                Err(error.into())
            }
            envelope => Ok(envelope),
        }
    }

    pub(crate) async fn fetch_one<T: Model>(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
    ) -> Result<T> {
        let (request, response) = self.round_trip(ctx, request).await?;
        match self.open::<T>(&request, &response)? {
            Envelope::One(record) => Ok(record),
            _ => {
                let detail = format!("expected a single {}", T::KIND);
                Err(EncodingError::MalformedEnvelope(detail).into())
            }
        }
    }

    /// Fetch one page. Archived rows are dropped unless the query asked for them.
    pub(crate) async fn fetch_page<T: Record>(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
        include_archived: bool,
    ) -> Result<Page<T>> {
        let (request, response) = self.round_trip(ctx, request).await?;
        let mut page = match self.open::<T>(&request, &response)? {
            Envelope::Page(page) => page,
            _ => {
                let detail = format!("expected a list of {}", T::KIND);
                return Err(EncodingError::MalformedEnvelope(detail).into());
            }
        };

        if !include_archived {
            let before = page.items.len();
            page.items.retain(|record| !record.is_archived());
            let dropped = before - page.items.len();
            if dropped > 0 {
                debug!(kind = T::KIND, dropped, "Dropped archived rows from active list");
            }
        }
        Ok(page)
    }

    /// Run a verb whose payload is not needed (archive, default-household, finalize).
    pub(crate) async fn acknowledge(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
    ) -> Result<()> {
        let (request, response) = self.round_trip(ctx, request).await?;
        if response.status == 204 {
            return Ok(());
        }
        self.open::<Value>(&request, &response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::CancelToken;
    use crate::testing::MockDispatcher;
    use hearth_shared::fixtures;
    use hearth_shared::models::User;
    use hearth_shared::{DecodeEvent, ListQuery, RecordingObserver, ServerErrorKind};
    use serde_json::json;

    #[tokio::test]
    async fn test_refuses_cancelled_context() {
        let client = HearthClient::new(MockDispatcher::new());
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = client
            .fetch_one::<User>(&RequestContext::new(cancel), ApiRequest::read("users/self"))
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert!(client.dispatcher().requests().is_empty());
    }

    #[tokio::test]
    async fn test_error_envelope_becomes_server_error() {
        let mock = MockDispatcher::new();
        mock.respond(404, fixtures::error("not_found", "no such user", None));
        let client = HearthClient::new(mock);

        let err = client
            .fetch_one::<User>(
                &RequestContext::default(),
                ApiRequest::read("users/{userID}").var("userID", "usr_9"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.server_kind(), Some(ServerErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_empty_body_is_malformed() {
        let mock = MockDispatcher::new();
        mock.respond_raw(200, "");
        let client = HearthClient::new(mock);

        let err = client
            .fetch_one::<User>(&RequestContext::default(), ApiRequest::read("users/self"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            hearth_shared::HearthError::Encoding(EncodingError::MalformedEnvelope(_))
        ));
    }

    #[tokio::test]
    async fn test_archived_rows_filtered_from_active_lists() {
        let mut archived = fixtures::user("usr_2");
        archived["archivedAt"] = json!("2025-02-01T00:00:00Z");
        let body = fixtures::page(vec![fixtures::user("usr_1"), archived]);

        let mock = MockDispatcher::new();
        mock.respond(200, body.clone());
        mock.respond(200, body);
        let client = HearthClient::new(mock);
        let ctx = RequestContext::default();

        let active: Page<User> = client
            .fetch_page(&ctx, ApiRequest::list("users", &ListQuery::default()), false)
            .await
            .unwrap();
        assert_eq!(active.items.len(), 1);

        let all: Page<User> = client
            .fetch_page(&ctx, ApiRequest::list("users", &ListQuery::default()), true)
            .await
            .unwrap();
        assert_eq!(all.items.len(), 2);
    }

    #[tokio::test]
    async fn test_observer_receives_unknown_fields() {
        let mut user = fixtures::user("usr_1");
        user["favouriteColour"] = json!("green");
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(user));

        let observer = Arc::new(RecordingObserver::default());
        let client = HearthClient::new(mock).with_observer(observer.clone());

        client
            .fetch_one::<User>(&RequestContext::default(), ApiRequest::read("users/self"))
            .await
            .unwrap();
        assert!(matches!(
            observer.events().as_slice(),
            [DecodeEvent::UnknownField { path, .. }] if path == "data.favouriteColour"
        ));
    }

    #[tokio::test]
    async fn test_cancel_during_flight_skips_decode() {
        let mock = MockDispatcher::new();
        mock.hang();
        let client = HearthClient::new(mock);
        let ctx = RequestContext::default();

        let (result, _) = tokio::join!(
            client.fetch_one::<User>(&ctx, ApiRequest::read("users/self")),
            async {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                ctx.cancel.cancel();
            }
        );

        assert!(result.unwrap_err().is_cancelled());
        assert_eq!(client.dispatcher().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_errors_surface_unchanged() {
        let mock = MockDispatcher::new();
        mock.fail(TransportError::Timeout);
        let client = HearthClient::new(mock);

        let err = client
            .fetch_one::<User>(&RequestContext::default(), ApiRequest::read("users/self"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            hearth_shared::HearthError::Transport(TransportError::Timeout)
        ));
        assert_eq!(client.dispatcher().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_client() {
        let mock = MockDispatcher::new();
        for _ in 0..3 {
            mock.respond(200, fixtures::ok(fixtures::user("usr_1")));
        }
        let client = HearthClient::new(mock);
        let ctx = RequestContext::default();

        let results = futures::future::join_all((0..3).map(|_| {
            let client = client.clone();
            let ctx = ctx.clone();
            async move {
                client
                    .fetch_one::<User>(&ctx, ApiRequest::read("users/self"))
                    .await
            }
        }))
        .await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(client.dispatcher().requests().len(), 3);
    }

    #[tokio::test]
    async fn test_no_content_acknowledged() {
        let mock = MockDispatcher::new();
        mock.respond_raw(204, "");
        let client = HearthClient::new(mock);

        client
            .acknowledge(
                &RequestContext::default(),
                ApiRequest::archive("users/{userID}").var("userID", "usr_1"),
            )
            .await
            .unwrap();
    }
}

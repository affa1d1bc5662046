//! The I/O seam: request description, raw response and the `Dispatcher` trait.
//!
//! The client builds an [`ApiRequest`] per operation and hands it to an
//! injected [`Dispatcher`]. The dispatcher performs the exchange and returns
//! the raw status and body; it never looks at what the body means.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use tokio::sync::watch;

use hearth_shared::constants::API_PREFIX;
use hearth_shared::{encode, EncodingError, ListQuery, ResponseShape, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Only reads are safe to repeat after a transport failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which input shape a request body was encoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Creation,
    Update,
    /// Bodies of entity-specific verbs (invitation actions, votes)
    Action,
}

/// An encoded JSON request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    pub kind: BodyKind,
    pub json: Bytes,
}

impl RequestBody {
    fn encode<T: Serialize>(kind: BodyKind, input: &T) -> Result<Self, EncodingError> {
        Ok(Self {
            kind,
            json: Bytes::from(encode(input)?),
        })
    }

    pub fn creation<T: Serialize>(input: &T) -> Result<Self, EncodingError> {
        Self::encode(BodyKind::Creation, input)
    }

    pub fn update<T: Serialize>(input: &T) -> Result<Self, EncodingError> {
        Self::encode(BodyKind::Update, input)
    }

    pub fn action<T: Serialize>(input: &T) -> Result<Self, EncodingError> {
        Self::encode(BodyKind::Action, input)
    }
}

/// Value of the `Idempotency-Key` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// A fresh random (v4 UUID) key.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything a dispatcher needs to perform one exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API prefix with `{name}` placeholders, e.g. `recipes/{recipeID}`
    pub path_template: &'static str,
    pub path_vars: Vec<(&'static str, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub expect: ResponseShape,
    pub idempotency_key: Option<IdempotencyKey>,
}

impl ApiRequest {
    fn new(method: Method, path_template: &'static str, expect: ResponseShape) -> Self {
        Self {
            method,
            path_template,
            path_vars: Vec::new(),
            query: Vec::new(),
            body: None,
            expect,
            idempotency_key: None,
        }
    }

    pub fn read(path_template: &'static str) -> Self {
        Self::new(Method::Get, path_template, ResponseShape::Single)
    }

    pub fn list(path_template: &'static str, query: &ListQuery) -> Self {
        let mut request = Self::new(Method::Get, path_template, ResponseShape::List);
        request.query = query.to_query_pairs();
        request
    }

    pub fn create<T: Serialize>(
        path_template: &'static str,
        input: &T,
    ) -> Result<Self, EncodingError> {
        Ok(Self::new(Method::Post, path_template, ResponseShape::Single)
            .body(RequestBody::creation(input)?))
    }

    pub fn update<T: Serialize>(
        path_template: &'static str,
        input: &T,
    ) -> Result<Self, EncodingError> {
        Ok(Self::new(Method::Put, path_template, ResponseShape::Single)
            .body(RequestBody::update(input)?))
    }

    pub fn archive(path_template: &'static str) -> Self {
        Self::new(Method::Delete, path_template, ResponseShape::Any)
    }

    /// An entity-specific verb. Expects a single record unless told otherwise.
    pub fn action(method: Method, path_template: &'static str) -> Self {
        Self::new(method, path_template, ResponseShape::Single)
    }

    pub fn var(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_vars.push((name, value.into()));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn expecting(mut self, shape: ResponseShape) -> Self {
        self.expect = shape;
        self
    }

    pub fn idempotent(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }

    /// Render `/api/v1/<path>?<query>` with every placeholder substituted and escaped.
    pub fn render_target(&self) -> Result<String, EncodingError> {
        let mut path = String::with_capacity(API_PREFIX.len() + self.path_template.len() + 16);
        path.push_str(API_PREFIX);
        path.push('/');

        let mut rest = self.path_template;
        while let Some(open) = rest.find('{') {
            let close = rest[open..].find('}').map(|i| open + i).ok_or_else(|| {
                EncodingError::InvalidRequest(format!(
                    "unterminated placeholder in {}",
                    self.path_template
                ))
            })?;
            let name = &rest[open + 1..close];
            let value = self
                .path_vars
                .iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| value)
                .ok_or_else(|| {
                    EncodingError::InvalidRequest(format!("path variable {name} is not bound"))
                })?;
            if value.is_empty() {
                return Err(EncodingError::InvalidRequest(format!("path variable {name} is empty")));
            }
            path.push_str(&rest[..open]);
            path.push_str(&urlencoding::encode(value));
            rest = &rest[close + 1..];
        }
        path.push_str(rest);

        if !self.query.is_empty() {
            let query = serde_urlencoded::to_string(&self.query)
                .map_err(|e| EncodingError::InvalidRequest(format!("query: {e}")))?;
            path.push('?');
            path.push_str(&query);
        }
        Ok(path)
    }
}

/// What came back over the wire, undecoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Cooperative cancellation shared between a caller and in-flight requests.
///
/// Clones observe the same state. Cancelling is permanent.
#[derive(Debug, Clone)]
pub struct CancelToken {
    state: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called on any clone.
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            // The sender lives as long as `self`, so this never resolves.
            std::future::pending::<()>().await;
        }
    }
}

/// Per-call options every operation accepts.
///
/// An idempotency key names one mutation. Every non-GET request made with
/// the context carries it, so reuse a keyed context only to retry the same
/// mutation and derive a new one with [`RequestContext::with_new_idempotency_key`]
/// for the next.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub cancel: CancelToken,
    /// Sent on mutating requests when set
    pub idempotency_key: Option<IdempotencyKey>,
}

impl RequestContext {
    pub fn new(cancel: CancelToken) -> Self {
        Self {
            cancel,
            idempotency_key: None,
        }
    }

    pub fn with_idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }

    /// Same cancellation, freshly generated idempotency key.
    pub fn with_new_idempotency_key(&self) -> Self {
        Self {
            cancel: self.cancel.clone(),
            idempotency_key: Some(IdempotencyKey::generate()),
        }
    }
}

/// Performs HTTP exchanges on behalf of the client.
///
/// Implementations are shared across concurrent callers. `target` is the
/// rendered path and query (see [`ApiRequest::render_target`]). When `cancel`
/// fires the dispatcher returns [`TransportError::Cancelled`].
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(
        &self,
        request: &ApiRequest,
        target: &str,
        cancel: &CancelToken,
    ) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<D: Dispatcher + ?Sized> Dispatcher for Arc<D> {
    async fn dispatch(
        &self,
        request: &ApiRequest,
        target: &str,
        cancel: &CancelToken,
    ) -> Result<RawResponse, TransportError> {
        (**self).dispatch(request, target, cancel).await
    }
}

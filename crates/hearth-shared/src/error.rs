use thiserror::Error;

/// Any failure surfaced by a Hearth API operation.
#[derive(Error, Debug)]
pub enum HearthError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

impl HearthError {
    /// Classified server failure kind, if the server answered with an error.
    pub fn server_kind(&self) -> Option<ServerErrorKind> {
        match self {
            HearthError::Server(err) => Some(err.kind),
            _ => None,
        }
    }

    /// True when the request never reached a decodable answer because it was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HearthError::Transport(TransportError::Cancelled))
    }
}

pub type Result<T> = std::result::Result<T, HearthError>;

/// Local failures while turning typed values into wire bytes or back.
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Malformed range: {0}")]
    MalformedRange(String),

    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Unknown {kind} discriminator: {value:?}")]
    UnknownDiscriminator { kind: String, value: String },

    #[error("Illegal transition: cannot {action} a {entity} that is {from}")]
    IllegalTransition {
        entity: &'static str,
        from: String,
        action: String,
    },

    #[error("Unknown field in strict mode: {path}")]
    UnknownField { path: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Failures below the HTTP layer. The request may or may not have been applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request cancelled")]
    Cancelled,

    #[error("Request timed out")]
    Timeout,

    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("TLS failure: {0}")]
    TlsFailure(String),
}

impl TransportError {
    /// Timeouts and connection failures are worth another attempt; cancellation and TLS are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TransportError::Timeout | TransportError::NetworkUnreachable(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerErrorKind {
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    ValidationFailed,
    RateLimited,
    ServerUnavailable,
    ServerInternal,
}

impl ServerErrorKind {
    /// Classify a machine-readable error code. Returns `None` for codes this client does not know.
    pub fn from_code(code: &str) -> Option<Self> {
        let kind = match code.trim().to_ascii_lowercase().as_str() {
            "not_found" | "notfound" => Self::NotFound,
            "unauthorized" | "unauthenticated" => Self::Unauthorized,
            "forbidden" | "permission_denied" => Self::Forbidden,
            "conflict" | "already_exists" => Self::Conflict,
            "validation_failed" | "invalid_input" | "invalid_argument" => Self::ValidationFailed,
            "rate_limited" | "too_many_requests" => Self::RateLimited,
            "service_unavailable" | "server_unavailable" | "unavailable" => {
                Self::ServerUnavailable
            }
            "internal" | "internal_error" | "server_internal" => Self::ServerInternal,
            _ => return None,
        };
        Some(kind)
    }

    /// Fallback classification from the HTTP status when the code is unknown.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::ValidationFailed,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            429 => Self::RateLimited,
            502..=504 => Self::ServerUnavailable,
            _ => Self::ServerInternal,
        }
    }
}

/// A structured error returned by the server inside the response envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind:?} ({status} {code}): {message}")]
pub struct ServerError {
    pub kind: ServerErrorKind,
    pub code: String,
    pub message: String,
    /// Offending input field, reported for validation failures
    pub field: Option<String>,
    pub status: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_takes_precedence_over_status() {
        assert_eq!(
            ServerErrorKind::from_code("CONFLICT"),
            Some(ServerErrorKind::Conflict)
        );
        assert_eq!(ServerErrorKind::from_code("teapot"), None);
        assert_eq!(ServerErrorKind::from_status(404), ServerErrorKind::NotFound);
        assert_eq!(ServerErrorKind::from_status(503), ServerErrorKind::ServerUnavailable);
        assert_eq!(ServerErrorKind::from_status(500), ServerErrorKind::ServerInternal);
    }

    #[test]
    fn test_transient_transport_errors() {
        assert!(TransportError::Timeout.is_transient());
        assert!(TransportError::NetworkUnreachable("reset".into()).is_transient());
        assert!(!TransportError::Cancelled.is_transient());
        assert!(!TransportError::TlsFailure("bad cert".into()).is_transient());
    }
}

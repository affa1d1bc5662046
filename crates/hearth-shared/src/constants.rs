/// Path prefix shared by every REST endpoint
pub const API_PREFIX: &str = "/api/v1";

/// Application name
pub const APP_NAME: &str = "Hearth";

/// Content type sent with every JSON request body
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Header carrying a caller-supplied idempotency key on mutating requests
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Default API base URL (local development server)
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for idempotent reads on transient transport failures
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Base delay between retries in milliseconds (multiplied by the attempt number)
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;

/// First page index of a list query (pages are 1-based)
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Largest page size the server accepts
pub const MAX_PAGE_LIMIT: u32 = 250;

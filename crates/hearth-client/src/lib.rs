//! Async client for the Hearth household API.
//!
//! ```no_run
//! # async fn demo() -> hearth_shared::Result<()> {
//! use hearth_client::{connect, ClientConfig, RequestContext};
//!
//! let client = connect(&ClientConfig::from_env()).expect("valid configuration");
//! let me = client.current_user(&RequestContext::default()).await?;
//! println!("signed in as {}", me.username);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod http;
pub mod operations;

#[cfg(test)]
mod testing;

use tracing_subscriber::{fmt, EnvFilter};

pub use cache::CatalogueCache;
pub use client::HearthClient;
pub use config::{ClientConfig, ConfigError};
pub use dispatcher::{
    ApiRequest, BodyKind, CancelToken, Dispatcher, IdempotencyKey, Method, RawResponse, RequestBody,
    RequestContext,
};
pub use http::HttpDispatcher;
pub use operations::meal_plans::OptionPath;
pub use operations::recipes::StepComponent;
pub use operations::CatalogueRecord;

/// Install a fmt subscriber filtered by `RUST_LOG`. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hearth_client=info,hearth_shared=info,warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Build a client that talks HTTP according to `config`.
pub fn connect(config: &ClientConfig) -> Result<HearthClient<HttpDispatcher>, ConfigError> {
    let dispatcher = HttpDispatcher::new(config)?;
    tracing::info!(
        api_url = %config.api_url,
        strict = config.strict_decoding,
        "Hearth client ready"
    );
    Ok(HearthClient::new(dispatcher).with_decode_options(config.decode_options()))
}

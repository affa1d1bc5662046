//! Wire types and the marshalling layer of the Hearth household API.
//!
//! Everything in this crate is synchronous and free of I/O; the async client
//! lives in `hearth-client`.

pub mod constants;
pub mod envelope;
pub mod error;
pub mod events;
pub mod field;
pub mod invite;
pub mod marshal;
pub mod models;
pub mod range;
pub mod time;
pub mod types;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use envelope::{decode_envelope, ApiError, Envelope, Page, Pagination, ResponseShape};
pub use error::{EncodingError, HearthError, Result, ServerError, ServerErrorKind, TransportError};
pub use events::{DecodeEvent, DecodeObserver, RecordingObserver, TracingObserver};
pub use field::{non_null, Field};
pub use marshal::{decode, encode, DecodeOptions, LinkMismatch, Model, Record};
pub use time::Timestamp;
pub use types::{ListQuery, SortOrder};

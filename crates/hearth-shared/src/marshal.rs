//! Typed encode/decode of request bodies and response payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::EncodingError;
use crate::events::{DecodeEvent, DecodeObserver};
use crate::time::Timestamp;

/// Prefix of serde error messages raised by range validation.
pub(crate) const RANGE_TAG: &str = "malformed range: ";

/// Prefix of serde error messages raised for unrecognised enum values.
pub(crate) const DISCRIMINATOR_TAG: &str = "unknown discriminator: ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject payloads carrying fields this client does not know instead of ignoring them.
    pub strict: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// A value that travels as a JSON object in request or response bodies.
pub trait Model: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Short name used in logs, observer events and cache keys.
    const KIND: &'static str;

    /// Children whose back-reference disagrees with the id of the enclosing record.
    fn link_mismatches(&self) -> Vec<LinkMismatch> {
        Vec::new()
    }
}

/// A persistent, server-owned record.
pub trait Record: Model {
    fn id(&self) -> &str;

    fn archived_at(&self) -> Option<&Timestamp>;

    fn is_archived(&self) -> bool {
        self.archived_at().is_some()
    }
}

impl Model for Value {
    const KIND: &'static str = "json";
}

/// A child whose parent id does not match the record it is embedded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMismatch {
    pub path: String,
    pub expected: String,
    pub found: String,
}

impl LinkMismatch {
    /// Compare each child's back-reference against the parent id.
    pub fn check<'a>(
        path: &str,
        parent_id: &str,
        children: impl IntoIterator<Item = &'a str>,
    ) -> Vec<LinkMismatch> {
        children
            .into_iter()
            .enumerate()
            .filter(|(_, found)| *found != parent_id)
            .map(|(i, found)| LinkMismatch {
                path: format!("{path}[{i}]"),
                expected: parent_id.to_string(),
                found: found.to_string(),
            })
            .collect()
    }

    /// Re-root mismatches reported by a nested record.
    pub fn nested(
        prefix: &str,
        mismatches: Vec<LinkMismatch>,
    ) -> impl Iterator<Item = LinkMismatch> + '_ {
        mismatches.into_iter().map(move |m| LinkMismatch {
            path: format!("{prefix}.{}", m.path),
            ..m
        })
    }
}

/// Encode a request body. Absent update fields are omitted, nulls are written.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodingError> {
    serde_json::to_vec(value).map_err(EncodingError::Serialize)
}

/// Decode a standalone JSON document into `T`.
pub fn decode<T: Model>(
    bytes: &[u8],
    options: DecodeOptions,
    observer: &dyn DecodeObserver,
) -> Result<T, EncodingError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| EncodingError::MalformedEnvelope(format!("invalid JSON: {e}")))?;
    decode_value(value, "", options, observer)
}

/// Decode an already-parsed JSON value into `T`.
///
/// `root` prefixes the paths reported for unknown fields and link mismatches.
pub fn decode_value<T: Model>(
    value: Value,
    root: &str,
    options: DecodeOptions,
    observer: &dyn DecodeObserver,
) -> Result<T, EncodingError> {
    let record = T::deserialize(&value).map_err(classify_json_error)?;
    let canonical = serde_json::to_value(&record).map_err(EncodingError::Serialize)?;

    let mut unknown = Vec::new();
    collect_unknown(&value, &canonical, root, &mut unknown);
    for path in unknown {
        if options.strict {
            return Err(EncodingError::UnknownField { path });
        }
        observer.observe(DecodeEvent::UnknownField {
            record: T::KIND,
            path,
        });
    }

    for mismatch in record.link_mismatches() {
        observer.observe(DecodeEvent::ForeignKeyMismatch {
            record: T::KIND,
            path: join_path(root, &mismatch.path),
            expected: mismatch.expected,
            found: mismatch.found,
        });
    }

    Ok(record)
}

/// Map a serde failure onto the taxonomy: range and discriminator errors keep
/// their own kind, everything else means the payload does not fit the schema.
pub(crate) fn classify_json_error(err: serde_json::Error) -> EncodingError {
    let message = err.to_string();
    if let Some(detail) = tagged_detail(&message, RANGE_TAG) {
        return EncodingError::MalformedRange(detail);
    }
    if let Some(detail) = tagged_detail(&message, DISCRIMINATOR_TAG) {
        let (kind, value) = detail.split_once('=').unwrap_or(("value", detail.as_str()));
        return EncodingError::UnknownDiscriminator {
            kind: kind.to_string(),
            value: value.to_string(),
        };
    }
    EncodingError::MalformedEnvelope(format!("payload does not match schema: {message}"))
}

fn tagged_detail(message: &str, tag: &str) -> Option<String> {
    let start = message.find(tag)? + tag.len();
    let rest = &message[start..];
    let end = rest.rfind(" at line ").unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else if key.starts_with('[') {
        format!("{prefix}{key}")
    } else {
        format!("{prefix}.{key}")
    }
}

/// Keys present in the received payload that did not survive a decode/encode
/// pass are unknown to this client. Keys carrying `null` are not reported.
fn collect_unknown(received_value: &Value, canonical: &Value, prefix: &str, out: &mut Vec<String>) {
    match (received_value, canonical) {
        (Value::Object(received), Value::Object(known)) => {
            for (key, value) in received {
                let path = join_path(prefix, key);
                match known.get(key) {
                    Some(known_value) => collect_unknown(value, known_value, &path, out),
                    None if value.is_null() => {}
                    None => out.push(path),
                }
            }
        }
        (Value::Array(received), Value::Array(known)) => {
            for (i, (value, known_value)) in received.iter().zip(known).enumerate() {
                collect_unknown(value, known_value, &join_path(prefix, &format!("[{i}]")), out);
            }
        }
        _ => {}
    }
}

/// Treat an explicit `null` like a missing value. Used for server collections
/// that may be serialized as `null` when empty.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Declare a closed string enum whose unknown values decode to
/// [`EncodingError::UnknownDiscriminator`].
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const KIND: &'static str = $kind;

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::EncodingError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err($crate::error::EncodingError::UnknownDiscriminator {
                        kind: $kind.to_string(),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(|_| {
                    <D::Error as ::serde::de::Error>::custom(format!(
                        "{}{}={}",
                        $crate::marshal::DISCRIMINATOR_TAG,
                        $kind,
                        raw
                    ))
                })
            }
        }
    };
}
pub(crate) use wire_enum;

/// Implement [`Model`] and [`Record`] for structs with `id` and `archived_at` fields.
/// `links = method` routes [`Model::link_mismatches`] to an inherent method.
macro_rules! impl_record {
    (@model $ty:ty, $kind:literal, { $($body:tt)* }) => {
        impl $crate::marshal::Model for $ty {
            const KIND: &'static str = $kind;
            $($body)*
        }
    };
    (@record $ty:ty) => {
        impl $crate::marshal::Record for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn archived_at(&self) -> Option<&$crate::time::Timestamp> {
                self.archived_at.as_ref()
            }
        }
    };
    ($ty:ty, $kind:literal, links = $links:ident) => {
        impl_record!(@model $ty, $kind, {
            fn link_mismatches(&self) -> Vec<$crate::marshal::LinkMismatch> {
                self.$links()
            }
        });
        impl_record!(@record $ty);
    };
    ($ty:ty, $kind:literal) => {
        impl_record!(@model $ty, $kind, {});
        impl_record!(@record $ty);
    };
}
pub(crate) use impl_record;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EncodingError, ServerError, ServerErrorKind};
use crate::events::DecodeObserver;
use crate::marshal::{decode_value, DecodeOptions, Model};

/// Paging metadata attached to every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    /// Rows matching the filter
    pub filtered_count: u64,
    /// Rows in the collection regardless of filter
    pub total_count: u64,
}

/// Error object carried in the envelope's `error` member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    /// Classify by code first, HTTP status second.
    pub fn into_server_error(self, status: u16) -> ServerError {
        let kind = ServerErrorKind::from_code(&self.code)
            .unwrap_or_else(|| ServerErrorKind::from_status(status));
        ServerError {
            kind,
            code: self.code,
            message: self.message,
            field: self.field,
            status,
        }
    }
}

/// What the caller expects in the `data` member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// A single object
    Single,
    /// An array accompanied by pagination
    List,
    /// Whatever the server sends; used by verbs whose payload is discarded
    Any,
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// True when later pages exist according to the server's filtered count.
    pub fn has_more(&self) -> bool {
        u64::from(self.pagination.page) * u64::from(self.pagination.limit)
            < self.pagination.filtered_count
    }
}

/// A validated response envelope: exactly one of payload or error.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    One(T),
    Page(Page<T>),
    Error(ApiError),
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default)]
    error: Option<ApiError>,
}

/// Decode and validate a response envelope.
///
/// Structural violations (both or neither of `data`/`error`, pagination not
/// matching the payload kind, payload kind not matching `shape`) are
/// [`EncodingError::MalformedEnvelope`].
pub fn decode_envelope<T: Model>(
    body: &[u8],
    shape: ResponseShape,
    options: DecodeOptions,
    observer: &dyn DecodeObserver,
) -> Result<Envelope<T>, EncodingError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(EncodingError::MalformedEnvelope("empty body".into()));
    }
    let raw: RawEnvelope = serde_json::from_slice(body)
        .map_err(|e| EncodingError::MalformedEnvelope(format!("invalid envelope: {e}")))?;

    let data = match (raw.data, raw.error) {
        (Some(_), Some(_)) => {
            return Err(EncodingError::MalformedEnvelope(
                "both data and error are present".into(),
            ))
        }
        (None, None) => {
            return Err(EncodingError::MalformedEnvelope(
                "neither data nor error is present".into(),
            ))
        }
        (None, Some(error)) => return Ok(Envelope::Error(error)),
        (Some(data), None) => data,
    };

    match (data, raw.pagination) {
        (Value::Array(_), None) => Err(EncodingError::MalformedEnvelope(
            "list payload without pagination".into(),
        )),
        (Value::Array(items), Some(pagination)) => {
            if shape == ResponseShape::Single {
                return Err(EncodingError::MalformedEnvelope(
                    "expected a single record, got a list".into(),
                ));
            }
            let items = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| decode_value(item, &format!("data[{i}]"), options, observer))
                .collect::<Result<Vec<T>, _>>()?;
            Ok(Envelope::Page(Page { items, pagination }))
        }
        (_, Some(_)) => Err(EncodingError::MalformedEnvelope(
            "pagination present on a non-list payload".into(),
        )),
        (data, None) => {
            if shape == ResponseShape::List {
                return Err(EncodingError::MalformedEnvelope(
                    "expected a list, got a single record".into(),
                ));
            }
            decode_value(data, "data", options, observer).map(Envelope::One)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{DecodeEvent, RecordingObserver};
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
    }

    impl Model for Item {
        const KIND: &'static str = "item";
    }

    fn decode(body: Value, shape: ResponseShape) -> Result<Envelope<Item>, EncodingError> {
        let bytes = serde_json::to_vec(&body).unwrap();
        decode_envelope(&bytes, shape, DecodeOptions::default(), &RecordingObserver::default())
    }

    fn pagination() -> Value {
        json!({"page": 1, "limit": 2, "filteredCount": 3, "totalCount": 3})
    }

    #[test]
    fn test_single_and_list_payloads() {
        let one = decode(json!({"data": {"id": "a"}}), ResponseShape::Single).unwrap();
        assert_eq!(one, Envelope::One(Item { id: "a".into() }));

        let page = decode(
            json!({"data": [{"id": "a"}, {"id": "b"}], "pagination": pagination()}),
            ResponseShape::List,
        )
        .unwrap();
        match page {
            Envelope::Page(page) => {
                assert_eq!(page.items.len(), 2);
                assert_eq!(page.pagination.filtered_count, 3);
                assert!(page.has_more());
            }
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn test_structural_violations() {
        let cases = [
            json!({"data": {"id": "a"}, "error": {"code": "x", "message": "y"}}),
            json!({}),
            json!({"data": [{"id": "a"}]}),
            json!({"data": {"id": "a"}, "pagination": pagination()}),
        ];
        for body in cases {
            let err = decode(body.clone(), ResponseShape::Any).unwrap_err();
            assert!(
                matches!(err, EncodingError::MalformedEnvelope(_)),
                "{body} gave {err:?}"
            );
        }

        let empty = decode_envelope::<Item>(
            b"  ",
            ResponseShape::Single,
            DecodeOptions::default(),
            &RecordingObserver::default(),
        );
        assert!(matches!(empty, Err(EncodingError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = decode(json!({"data": {"id": "a"}}), ResponseShape::List).unwrap_err();
        assert!(matches!(err, EncodingError::MalformedEnvelope(_)));
        let err = decode(
            json!({"data": [], "pagination": pagination()}),
            ResponseShape::Single,
        )
        .unwrap_err();
        assert!(matches!(err, EncodingError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_error_envelope_classification() {
        let envelope = decode(
            json!({
                "error": {"code": "validation_failed", "message": "name required", "field": "name"}
            }),
            ResponseShape::Single,
        )
        .unwrap();
        let Envelope::Error(error) = envelope else {
            panic!("expected error envelope");
        };
        let err = error.into_server_error(400);
        assert_eq!(err.kind, ServerErrorKind::ValidationFailed);
        assert_eq!(err.field.as_deref(), Some("name"));

        let unknown = ApiError {
            code: "E_WEIRD".into(),
            message: "nope".into(),
            field: None,
        };
        assert_eq!(unknown.into_server_error(404).kind, ServerErrorKind::NotFound);
    }

    #[test]
    fn test_list_items_report_indexed_paths() {
        let observer = RecordingObserver::default();
        let body = serde_json::to_vec(&json!({
            "data": [{"id": "a"}, {"id": "b", "extra": true}],
            "pagination": pagination()
        }))
        .unwrap();
        decode_envelope::<Item>(&body, ResponseShape::List, DecodeOptions::default(), &observer)
            .unwrap();
        assert_eq!(
            observer.events(),
            vec![DecodeEvent::UnknownField {
                record: "item",
                path: "data[1].extra".into()
            }]
        );
    }
}

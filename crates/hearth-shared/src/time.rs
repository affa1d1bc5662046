use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// An RFC 3339 instant exactly as the server sent it.
///
/// The raw text is kept so that re-encoding a decoded record is byte-stable;
/// call [`Timestamp::parse`] for calendar arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.0)
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.parse().ok().map(|t| t.with_timezone(&Utc))
    }

    /// False when the text is not a valid RFC 3339 instant.
    pub fn is_before(&self, instant: DateTime<Utc>) -> bool {
        self.to_utc().map_or(false, |t| t < instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::from_datetime(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_keeps_raw_text() {
        let ts: Timestamp = serde_json::from_str("\"2025-01-02T03:04:05Z\"").unwrap();
        assert_eq!(ts.as_str(), "2025-01-02T03:04:05Z");
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2025-01-02T03:04:05Z\"");

        let parsed = ts.to_utc().unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
    }

    #[test]
    fn test_is_before() {
        let ts = Timestamp::new("2025-01-02T03:04:05.123456789Z");
        assert!(ts.is_before(Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap()));
        assert!(!ts.is_before(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()));
        assert!(!Timestamp::new("yesterday").is_before(Utc::now()));
    }
}

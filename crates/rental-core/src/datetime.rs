//! # Stored Timestamps
//!
//! One serializer for every date the document store persists. Dates are kept
//! as fixed-width RFC 3339 UTC strings (`2025-06-04T00:00:00.000Z`); with a
//! constant width and a constant zone suffix, the store's bytewise string
//! comparison matches chronological order, which the availability query
//! relies on. Reading accepts any RFC 3339 offset.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Render a timestamp exactly as the store persists it.
///
/// Filter bounds compared against stored dates must use this rendering;
/// mixing it with another RFC 3339 variant breaks range queries, because
/// `Z` and `+00:00` suffixes do not compare equal bytewise.
pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(dt))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

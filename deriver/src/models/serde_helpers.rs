use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

/// Ids arrive as strings from most endpoints and as integers from a few.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

pub(crate) fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// `null` becomes `T::default()`; pair with `#[serde(default)]` to cover absence too
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber<T> {
    Number(T),
    Text(String),
    Other(IgnoredAny),
}

/// Numbers may arrive as JSON numbers or as numeric strings (`NUMERIC`
/// columns). Anything unreadable is dropped to `None` with a warning.
pub(crate) fn opt_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    let parsed = match Option::<RawNumber<T>>::deserialize(deserializer)? {
        None => None,
        Some(RawNumber::Number(n)) => Some(n),
        Some(RawNumber::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            let parsed = trimmed.parse().ok();
            if parsed.is_none() {
                tracing::warn!(value = trimmed, "unreadable number, treating as absent");
            }
            parsed
        }
        Some(RawNumber::Other(_)) => {
            tracing::warn!("non-numeric value in numeric field, treating as absent");
            None
        }
    };
    Ok(parsed)
}

/// Like [`opt_number`], falling back to `T::default()`
pub(crate) fn number_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de> + FromStr,
{
    Ok(opt_number(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS` (read as UTC) and bare dates
/// (midnight UTC). Anything else is dropped to `None` with a warning.
pub(crate) fn flexible_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = parse_timestamp(trimmed);
    if parsed.is_none() {
        tracing::warn!(value = trimmed, "unrecognised timestamp, treating as absent");
    }
    Ok(parsed)
}

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub fn from_epoch_seconds(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }
    let secs = value.floor();
    let nanos = ((value - secs) * 1_000_000_000.0).round() as u32;
    DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
}

pub fn to_epoch_seconds(value: &DateTime<Utc>) -> f64 {
    value.timestamp() as f64 + f64::from(value.timestamp_subsec_nanos()) / 1_000_000_000.0
}

pub fn from_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Encodes an optional payload the way the service stores it: a JSON string.
pub fn encode_payload(value: Option<&Value>) -> Option<String> {
    value.map(Value::to_string)
}

/// Decodes an optional JSON payload, keeping the raw string when it is not JSON.
/// An empty string counts as no payload.
pub fn decode_payload(value: Option<&str>) -> Option<Value> {
    let raw = value.filter(|raw| !raw.is_empty())?;
    Some(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}

pub fn decode_enum<T: DeserializeOwned>(value: &str) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::String(value.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Epoch(f64),
    Text(String),
}

pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match WireTimestamp::deserialize(deserializer)? {
        WireTimestamp::Epoch(secs) => from_epoch_seconds(secs),
        WireTimestamp::Text(text) => from_rfc3339(&text),
    };
    parsed.ok_or_else(|| serde::de::Error::custom("invalid event timestamp"))
}

pub(crate) fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    to_epoch_seconds(value).serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_epoch_seconds_keep_fraction() {
        let at = from_epoch_seconds(1_400_000_000.25).unwrap();
        assert_eq!(at.timestamp(), 1_400_000_000);
        assert_eq!(at.timestamp_subsec_millis(), 250);
        assert!((to_epoch_seconds(&at) - 1_400_000_000.25).abs() < 1e-6);
    }

    #[test]
    fn test_decode_payload_falls_back_to_raw_string() {
        assert_eq!(decode_payload(Some("{\"a\":1}")), Some(json!({"a": 1})));
        assert_eq!(decode_payload(Some("not json")), Some(json!("not json")));
        assert_eq!(decode_payload(None), None);
        assert_eq!(decode_payload(Some("")), None);
    }
}

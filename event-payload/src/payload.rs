use crate::{payload_error::PayloadError, sealed::SealedPayload, value::FieldValue};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::{collections::BTreeMap, fmt, str::FromStr};
use tracing::{debug, warn};

#[derive(Debug, Default, PartialEq, Clone)]
pub struct EventPayload(BTreeMap<String, FieldValue>);

impl EventPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Option<BTreeMap<String, FieldValue>>) -> Self {
        Self(data.unwrap_or_default())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key)?.coerce_int()
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.int(key).unwrap_or(default)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.get(key)?.as_text()
    }

    pub fn get_string(&self, key: &str, default: impl Into<String>) -> String {
        self.string(key).unwrap_or_else(|| default.into())
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.coerce_bool()
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.bool(key).unwrap_or(default)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.0.insert(key.into(), value.into())
    }

    /// True even when the stored value is `null`.
    pub fn has_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Non-finite floats are written as `null`.
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Decodes a json object. Malformed text and any other top-level json
    /// value are errors, never an empty payload.
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(json).map_err(|err| {
            warn!(error = %err, "rejected malformed payload json");
            PayloadError::from(err)
        })?;

        let payload = Self::try_from(value)?;
        debug!(keys = payload.len(), "decoded payload");

        Ok(payload)
    }

    pub fn seal(self) -> SealedPayload {
        SealedPayload::new(self)
    }

    fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.clone().into()))
                .collect(),
        )
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<K, V> FromIterator<(K, V)> for EventPayload
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, FieldValue>> for EventPayload {
    fn from(data: BTreeMap<String, FieldValue>) -> Self {
        Self(data)
    }
}

impl TryFrom<Value> for EventPayload {
    type Error = PayloadError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => {
                let kind = json_kind(&other);
                warn!(kind, "payload json is not an object");
                Err(PayloadError::NotAnObject(kind))
            }
        }
    }
}

impl TryFrom<&str> for EventPayload {
    type Error = PayloadError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl FromStr for EventPayload {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl From<EventPayload> for Value {
    fn from(payload: EventPayload) -> Self {
        Value::Object(
            payload
                .0
                .into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        )
    }
}

impl fmt::Display for EventPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl Serialize for EventPayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EventPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(de::Error::custom)
    }
}

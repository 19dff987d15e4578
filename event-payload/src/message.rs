use crate::{event_name::EventName, payload::EventPayload, payload_error::PayloadError};
use derive_builder::Builder;
use serde_json::{json, Value};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct LocalToNetworkMsg {
    #[builder(setter(into))]
    pub event_name: EventName,
    #[builder(setter(into), default)]
    pub payload: EventPayload,
}

impl LocalToNetworkMsg {
    pub fn new(event_name: impl Into<EventName>, payload: EventPayload) -> Self {
        Self {
            event_name: event_name.into(),
            payload,
        }
    }

    pub fn builder() -> LocalToNetworkMsgBuilder {
        LocalToNetworkMsgBuilder::default()
    }

    pub fn into_parts(self) -> (EventName, EventPayload) {
        (self.event_name, self.payload)
    }
}

impl<N> From<(N, EventPayload)> for LocalToNetworkMsg
where
    N: Into<EventName>,
{
    fn from((event_name, payload): (N, EventPayload)) -> Self {
        Self::new(event_name, payload)
    }
}

impl TryFrom<&str> for LocalToNetworkMsg {
    type Error = PayloadError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let message: Value = serde_json::from_str(value)?;

        let Value::Object(mut fields) = message else {
            return Err(Self::Error::InvalidMessage(value.to_string()));
        };

        let event_name = match fields.remove("event") {
            Some(Value::String(name)) if !name.is_empty() => EventName::from(name),
            _ => {
                return Err(Self::Error::InvalidMessage(
                    "event is required".to_string(),
                ))
            }
        };

        let payload = match fields.remove("payload") {
            None | Some(Value::Null) => EventPayload::new(),
            Some(payload @ Value::Object(_)) => EventPayload::try_from(payload)?,
            Some(_) => {
                return Err(Self::Error::InvalidMessage(
                    "payload must be an object".to_string(),
                ))
            }
        };

        debug!(event = %event_name, keys = payload.len(), "decoded message");

        Ok(Self {
            event_name,
            payload,
        })
    }
}

impl TryFrom<String> for LocalToNetworkMsg {
    type Error = PayloadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for LocalToNetworkMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event: Value = self.event_name.clone().into();
        let payload: Value = self.payload.clone().into();

        let message = json!({ "event": event, "payload": payload });

        write!(f, "{}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hp_payload(hp: i64) -> EventPayload {
        let mut payload = EventPayload::new();
        payload.set("hp", hp);
        payload
    }

    #[test]
    fn message_builder_should_work() {
        let message = LocalToNetworkMsg::builder()
            .event_name("hp_changed")
            .payload(hp_payload(42))
            .build()
            .unwrap();

        assert_eq!(&*message.event_name, "hp_changed");
        assert_eq!(message.payload.get_int("hp", -1), 42);
    }

    #[test]
    fn message_builder_should_default_payload() {
        let message = LocalToNetworkMsg::builder()
            .event_name("heartbeat")
            .build()
            .unwrap();

        assert!(message.payload.is_empty());
    }

    #[test]
    fn message_builder_should_require_event_name() {
        assert!(LocalToNetworkMsg::builder()
            .payload(hp_payload(1))
            .build()
            .is_err());
    }

    #[test]
    fn message_display_should_work() {
        let message: LocalToNetworkMsg = ("hp_changed", hp_payload(42)).into();

        assert_eq!(
            message.to_string(),
            r#"{"event":"hp_changed","payload":{"hp":42}}"#
        );
    }

    #[test]
    fn message_parse_should_work() {
        let message =
            LocalToNetworkMsg::try_from(r#"{"event":"hp_changed","payload":{"hp":42}}"#).unwrap();
        assert_eq!(message, LocalToNetworkMsg::new("hp_changed", hp_payload(42)));

        let message = LocalToNetworkMsg::try_from(message.to_string()).unwrap();
        let (name, payload) = message.into_parts();
        assert_eq!(name, EventName::from("hp_changed"));
        assert_eq!(payload.get_int("hp", -1), 42);
    }

    #[test]
    fn message_without_payload_should_be_empty() {
        for text in [r#"{"event":"ping"}"#, r#"{"event":"ping","payload":null}"#] {
            let message = LocalToNetworkMsg::try_from(text).unwrap();
            assert!(message.payload.is_empty());
        }
    }

    #[test]
    fn invalid_message_should_fail() {
        let cases = [
            r#"["ping", {}]"#,
            r#"{"payload":{}}"#,
            r#"{"event":"","payload":{}}"#,
            r#"{"event":7,"payload":{}}"#,
            r#"{"event":"ping","payload":[1]}"#,
        ];

        for text in cases {
            assert!(
                matches!(
                    LocalToNetworkMsg::try_from(text),
                    Err(PayloadError::InvalidMessage(_))
                ),
                "{text}"
            );
        }

        assert!(matches!(
            LocalToNetworkMsg::try_from("{oops"),
            Err(PayloadError::Parse(_))
        ));
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("json error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expected a json object at the top level, found {0}")]
    NotAnObject(&'static str),

    #[error("invalid message: {0}")]
    InvalidMessage(String),

    #[error("sink closed before `{0}` was delivered")]
    SinkClosed(String),

    #[error("sink error: {0}")]
    AnyhowError(#[from] anyhow::Error),
}

impl PayloadError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::NotAnObject(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_classification_should_work() {
        let err: PayloadError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_parse_error());
        assert!(PayloadError::NotAnObject("array").is_parse_error());
        assert!(!PayloadError::SinkClosed("hp_changed".into()).is_parse_error());
        assert!(!PayloadError::InvalidMessage("event is required".into()).is_parse_error());
    }

    #[test]
    fn not_an_object_message_should_work() {
        assert_eq!(
            PayloadError::NotAnObject("array").to_string(),
            "expected a json object at the top level, found array"
        );
    }
}

use serde_json::Value;
use std::{borrow::Borrow, fmt, ops::Deref};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventName(String);

impl EventName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EventName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<EventName> for Value {
    fn from(name: EventName) -> Self {
        name.0.into()
    }
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for EventName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[test]
fn event_name_should_work() {
    use std::collections::HashSet;

    let mut names = HashSet::new();
    names.insert(EventName::from("hp_changed"));
    names.insert(EventName::from("player_died".to_string()));

    assert!(names.contains("hp_changed"));
    assert!(!names.contains("HP_CHANGED"));
    assert_eq!(EventName::from("player_died").to_string(), "player_died");
    assert!(EventName::from("player_died").starts_with("player"));
    assert_eq!(Value::from(EventName::from("x")), Value::String("x".into()));
}

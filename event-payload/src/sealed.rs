use crate::payload::EventPayload;
use std::{ops::Deref, sync::Arc};

#[derive(Debug, Clone, PartialEq)]
pub struct SealedPayload(Arc<EventPayload>);

impl SealedPayload {
    pub(crate) fn new(payload: EventPayload) -> Self {
        Self(Arc::new(payload))
    }

    pub fn unseal(self) -> EventPayload {
        Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl Deref for SealedPayload {
    type Target = EventPayload;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<EventPayload> for SealedPayload {
    fn from(payload: EventPayload) -> Self {
        Self::new(payload)
    }
}

mod event_name;
mod message;
mod payload;
mod payload_error;
mod sealed;
mod sink;
mod value;

pub use event_name::EventName;
pub use message::{LocalToNetworkMsg, LocalToNetworkMsgBuilder, LocalToNetworkMsgBuilderError};
pub use payload::EventPayload;
pub use payload_error::PayloadError;
pub use sealed::SealedPayload;
pub use sink::{sink_fn, ChannelSink, NetworkSink, SinkWrapper, DEFAULT_BUFFER_SIZE};
pub use value::FieldValue;

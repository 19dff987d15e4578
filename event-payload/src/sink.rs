use crate::{message::LocalToNetworkMsg, payload_error::PayloadError};
use futures::{future::BoxFuture, Future};
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub const DEFAULT_BUFFER_SIZE: usize = 1024;

pub trait NetworkSink: Send + Sync {
    fn send(&self, message: LocalToNetworkMsg) -> BoxFuture<'static, Result<(), PayloadError>>;
}

pub struct SinkWrapper<F> {
    handler: F,
}

impl<F> NetworkSink for SinkWrapper<F>
where
    F: Fn(LocalToNetworkMsg) -> BoxFuture<'static, Result<(), PayloadError>> + Send + Sync + 'static,
{
    fn send(&self, message: LocalToNetworkMsg) -> BoxFuture<'static, Result<(), PayloadError>> {
        (self.handler)(message)
    }
}

impl<F> SinkWrapper<F>
where
    F: Fn(LocalToNetworkMsg) -> BoxFuture<'static, Result<(), PayloadError>> + Send + Sync + 'static,
{
    pub fn new(handler: F) -> Self {
        SinkWrapper { handler }
    }
}

pub fn sink_fn<F, Fut, E>(handler: F) -> Box<dyn NetworkSink>
where
    F: Fn(LocalToNetworkMsg) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Into<PayloadError>,
{
    Box::new(SinkWrapper::new(move |message| {
        let fut = handler(message);
        Box::pin(async move { fut.await.map_err(Into::into) })
            as BoxFuture<'static, Result<(), PayloadError>>
    }))
}

#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::Sender<LocalToNetworkMsg>,
}

impl ChannelSink {
    pub fn new(sender: mpsc::Sender<LocalToNetworkMsg>) -> Self {
        Self { sender }
    }

    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<LocalToNetworkMsg>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self::new(tx), rx)
    }
}

impl NetworkSink for ChannelSink {
    fn send(&self, message: LocalToNetworkMsg) -> BoxFuture<'static, Result<(), PayloadError>> {
        let sender = self.sender.clone();

        Box::pin(async move {
            let event = message.event_name.to_string();
            let keys = message.payload.len();

            match sender.send(message).await {
                Ok(()) => {
                    debug!(event = %event, keys, "message handed to transport");
                    Ok(())
                }
                Err(_) => {
                    warn!(event = %event, "transport receiver closed");
                    Err(PayloadError::SinkClosed(event))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::EventPayload;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn hp_changed(hp: i64) -> LocalToNetworkMsg {
        let mut payload = EventPayload::new();
        payload.set("hp", hp);
        LocalToNetworkMsg::new("hp_changed", payload)
    }

    #[tokio::test]
    async fn channel_sink_should_work() {
        let (sink, mut rx) = ChannelSink::channel(DEFAULT_BUFFER_SIZE);

        sink.send(hp_changed(7)).await.unwrap();
        sink.send(hp_changed(99)).await.unwrap();

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.payload.get_int("hp", -1), 7);
        assert_eq!(second.payload.get_int("hp", -1), 99);
    }

    #[tokio::test]
    async fn channel_sink_with_zero_buffer_should_work() {
        let (sink, mut rx) = ChannelSink::channel(0);

        sink.send(hp_changed(1)).await.unwrap();
        assert_eq!(&*rx.recv().await.unwrap().event_name, "hp_changed");
    }

    #[tokio::test]
    async fn closed_channel_sink_should_fail() {
        let (sink, rx) = ChannelSink::channel(1);
        drop(rx);

        match sink.send(hp_changed(1)).await {
            Err(PayloadError::SinkClosed(event)) => assert_eq!(event, "hp_changed"),
            other => panic!("expected SinkClosed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sink_fn_should_work() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();

        let sink = sink_fn(move |message: LocalToNetworkMsg| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(message.payload.get_int("hp", 0) as usize, Ordering::SeqCst);
                Ok::<_, PayloadError>(())
            }
        });

        sink.send(hp_changed(2)).await.unwrap();
        sink.send(hp_changed(3)).await.unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn sink_fn_error_should_propagate() {
        let sink = sink_fn(|message: LocalToNetworkMsg| async move {
            Err::<(), _>(anyhow::anyhow!("transport down for {}", message.event_name))
        });

        let err = sink.send(hp_changed(1)).await.unwrap_err();
        assert!(matches!(err, PayloadError::AnyhowError(_)));
        assert_eq!(err.to_string(), "sink error: transport down for hp_changed");
    }
}

use event_payload::{ChannelSink, EventPayload, LocalToNetworkMsg, NetworkSink, DEFAULT_BUFFER_SIZE};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let (sink, mut rx) = ChannelSink::channel(DEFAULT_BUFFER_SIZE);

    let transport = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            tracing::info!(wire = %message, "sending to network");

            let echoed = LocalToNetworkMsg::try_from(message.to_string())?;
            tracing::info!(
                event = %echoed.event_name,
                hp = echoed.payload.get_int("hp", -1),
                alive = echoed.payload.get_bool("alive", false),
                "decoded on the far side"
            );
        }

        Ok::<_, anyhow::Error>(())
    });

    let mut payload = EventPayload::try_from(json!({"hp": 42, "name": "Drake", "alive": true}))?;
    payload.set("hp", 99);
    sink.send(LocalToNetworkMsg::new("hp_changed", payload)).await?;

    let payload = EventPayload::from_json(r#"{"reason": "fell", "alive": "FALSE"}"#)?;
    let message = LocalToNetworkMsg::builder()
        .event_name("player_died")
        .payload(payload)
        .build()?;
    sink.send(message).await?;

    if let Err(err) = EventPayload::from_json("{not valid json") {
        tracing::warn!(error = %err, "bad payload rejected");
    }

    drop(sink);
    transport.await??;

    Ok(())
}

use std::sync::Arc;

use tokio::sync::mpsc;

use aquatag_core::notifier::{FlagLines, NotificationEvent};

use crate::net::UdpSink;

/// Drain flag samples from the trigger channel, classify them, and emit
/// the matched payloads.
///
/// This is the interrupt handler's stand-in: the stimulus source plays
/// the rising-edge line and the channel decouples it from the engine
/// loop, so the two never touch shared state.
pub async fn run(mut rx: mpsc::Receiver<FlagLines>, sink: Option<Arc<UdpSink>>) {
    while let Some(flags) = rx.recv().await {
        // All lines low means no signal was present at trigger time.
        if flags.is_clear() {
            continue;
        }
        // Out-of-protocol patterns fall through without a trace, matching
        // the original firmware.
        let Some(event) = NotificationEvent::classify(flags) else {
            continue;
        };
        tracing::info!(%event, "Radio trigger");
        if let Some(sink) = &sink {
            sink.send(event.payload()).await;
        }
    }
}

//! WebSocket client for the live loot event stream

use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tracing::{debug, error, info, instrument, warn};

use super::messages::{HistoryPayload, StatusPayload, StreamMessage};
use crate::common::errors::{ClientError, Result};
use crate::common::types::{LootEvent, StatsUpdate, StreamEvent};

/// WebSocket client for the dashboard event stream
///
/// Owns the connection lifecycle: connects, forwards every inbound frame as
/// a parsed [`StreamEvent`] and reports connection transitions on the same
/// channel. The stream is read-only apart from keepalive pings.
pub struct DashboardWebSocketClient {
    /// WebSocket URL
    url: String,
    /// Keepalive ping interval in seconds
    ping_interval: u64,
    /// Connected state flag
    is_connected: Arc<AtomicBool>,
}

impl DashboardWebSocketClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ping_interval: 10,
            is_connected: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the keepalive ping interval
    pub fn with_ping_interval(mut self, seconds: u64) -> Self {
        self.ping_interval = seconds;
        self
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.is_connected.load(Ordering::SeqCst)
    }

    /// Connect and start receiving messages
    ///
    /// Establishes the connection, emits `Connected`, and spawns a task that
    /// parses and forwards incoming frames until the stream ends. The final
    /// event on the channel is always a `Disconnected`.
    #[instrument(skip(self, event_sender))]
    pub async fn connect(&mut self, event_sender: mpsc::Sender<StreamEvent>) -> Result<()> {
        info!("Connecting to dashboard stream: {}", self.url);

        let (ws_stream, _response) = connect_async(&self.url)
            .await
            .map_err(|e| ClientError::WebSocketConnection(e.to_string()))?;

        info!("WebSocket connection established");
        self.is_connected.store(true, Ordering::SeqCst);

        let _ = event_sender.send(StreamEvent::Connected).await;

        let (mut write, mut read) = ws_stream.split();
        let is_connected = self.is_connected.clone();
        let ping_interval = self.ping_interval;

        tokio::spawn(async move {
            let mut ping_ticker = interval(Duration::from_secs(ping_interval));

            loop {
                tokio::select! {
                    msg = read.next() => {
                        match msg {
                            Some(Ok(Message::Text(text))) => {
                                match Self::parse_message(&text) {
                                    Ok(event) => {
                                        if let Err(e) = event_sender.send(event).await {
                                            error!("Failed to forward event: {}", e);
                                            break;
                                        }
                                    }
                                    Err(e) => {
                                        warn!("Failed to parse message: {} - {}", e, text);
                                        let _ = event_sender
                                            .send(StreamEvent::Raw(text))
                                            .await;
                                    }
                                }
                            }
                            Some(Ok(Message::Ping(_))) => {
                                debug!("Received Ping");
                            }
                            Some(Ok(Message::Pong(_))) => {
                                debug!("Received Pong");
                            }
                            Some(Ok(Message::Close(frame))) => {
                                info!("WebSocket closed: {:?}", frame);
                                is_connected.store(false, Ordering::SeqCst);
                                let _ = event_sender
                                    .send(StreamEvent::Disconnected {
                                        reason: frame.map(|f| f.reason.to_string()),
                                    })
                                    .await;
                                break;
                            }
                            Some(Err(e)) => {
                                error!("WebSocket error: {}", e);
                                is_connected.store(false, Ordering::SeqCst);
                                let _ = event_sender
                                    .send(StreamEvent::Disconnected {
                                        reason: Some(e.to_string()),
                                    })
                                    .await;
                                break;
                            }
                            None => {
                                info!("WebSocket stream ended");
                                is_connected.store(false, Ordering::SeqCst);
                                let _ = event_sender
                                    .send(StreamEvent::Disconnected { reason: None })
                                    .await;
                                break;
                            }
                            _ => {}
                        }
                    }
                    _ = ping_ticker.tick() => {
                        if write.send(Message::Ping(Vec::new())).await.is_err() {
                            debug!("Keepalive ping failed, stream closing");
                        }
                    }
                }
            }
        });

        Ok(())
    }

    /// Parse an incoming frame into a StreamEvent
    fn parse_message(text: &str) -> Result<StreamEvent> {
        let message: StreamMessage = serde_json::from_str(text)?;

        match message.event.as_str() {
            "new_loot" => {
                let loot: LootEvent = serde_json::from_value(message.data)?;
                Ok(StreamEvent::NewLoot(loot))
            }
            "stats" => {
                let stats: StatsUpdate = serde_json::from_value(message.data)?;
                Ok(StreamEvent::Stats(stats))
            }
            "status" => {
                let payload: StatusPayload = serde_json::from_value(message.data)?;
                Ok(StreamEvent::Status(payload.status))
            }
            "history" => {
                let payload: HistoryPayload = serde_json::from_value(message.data)?;
                Ok(StreamEvent::History(payload.loots))
            }
            "clear" => Ok(StreamEvent::Clear),
            _ => Ok(StreamEvent::Raw(text.to_string())),
        }
    }
}

// WebSocket transport: owns the connection and reconnects on its own.

use crate::interface_adapters::protocol::{ClientMessage, ServerMessage};
use crate::use_cases::{OutboundCommand, RendererEvent};
use futures_util::{SinkExt, StreamExt};
use std::fmt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

// How a single connection ended.
enum SessionEnd {
    Closed,
    Failed(TransportError),
    Shutdown,
}

#[derive(Debug)]
pub enum TransportError {
    Ws(tokio_tungstenite::tungstenite::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Ws(err) => write!(f, "websocket error: {err}"),
            TransportError::Serialization(err) => write!(f, "serialization error: {err}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Connects, pumps frames both ways, and retries after `reconnect_delay` until the
/// renderer or the outbound queue goes away.
pub async fn run_transport(
    url: String,
    events_tx: mpsc::Sender<RendererEvent>,
    mut outbound_rx: mpsc::Receiver<OutboundCommand>,
    reconnect_delay: Duration,
) {
    loop {
        let end_event = match connect_async(url.as_str()).await {
            Ok((socket, _response)) => {
                info!(%url, "websocket connected");

                // Nothing queued against an earlier connection is replayed.
                let mut dropped = 0;
                while outbound_rx.try_recv().is_ok() {
                    dropped += 1;
                }
                if dropped > 0 {
                    warn!(dropped, "discarded commands queued while disconnected");
                    if events_tx
                        .send(RendererEvent::CommandsDropped { count: dropped })
                        .await
                        .is_err()
                    {
                        break;
                    }
                }

                if events_tx.send(RendererEvent::Connected).await.is_err() {
                    break;
                }

                match pump(socket, &events_tx, &mut outbound_rx).await {
                    SessionEnd::Closed => {
                        info!("websocket closed by server");
                        RendererEvent::Disconnected
                    }
                    SessionEnd::Failed(err) => RendererEvent::ConnectionError {
                        message: err.to_string(),
                    },
                    SessionEnd::Shutdown => break,
                }
            }
            Err(err) => RendererEvent::ConnectionError {
                message: TransportError::Ws(err).to_string(),
            },
        };

        if events_tx.send(end_event).await.is_err() {
            break;
        }
        tokio::time::sleep(reconnect_delay).await;
    }
    debug!("transport exiting");
}

async fn pump(
    socket: Socket,
    events_tx: &mpsc::Sender<RendererEvent>,
    outbound_rx: &mut mpsc::Receiver<OutboundCommand>,
) -> SessionEnd {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let message = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(message) => message,
                        Err(err) => {
                            let err = TransportError::Serialization(err);
                            warn!(error = %err, "invalid server message");
                            continue;
                        }
                    };
                    let Some(event) = message.into_event() else {
                        continue;
                    };
                    if events_tx.send(RendererEvent::Server(event)).await.is_err() {
                        return SessionEnd::Shutdown;
                    }
                }
                Some(Ok(Message::Close(_))) | None => return SessionEnd::Closed,
                // Pings are answered by tungstenite; binary frames carry nothing for us.
                Some(Ok(_)) => {}
                Some(Err(err)) => return SessionEnd::Failed(TransportError::Ws(err)),
            },
            command = outbound_rx.recv() => {
                let Some(command) = command else {
                    let _ = sink.close().await;
                    return SessionEnd::Shutdown;
                };
                let payload = match serde_json::to_string(&ClientMessage::from(command)) {
                    Ok(payload) => payload,
                    Err(err) => {
                        let err = TransportError::Serialization(err);
                        warn!(error = %err, ?command, "failed to encode command");
                        continue;
                    }
                };
                if let Err(err) = sink.send(Message::text(payload)).await {
                    return SessionEnd::Failed(TransportError::Ws(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Appliance, ApplianceStatus};
    use crate::use_cases::ServerEvent;
    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio::time::timeout;
    use tokio_tungstenite::accept_async;

    const WAIT: Duration = Duration::from_secs(2);

    async fn next_event(events_rx: &mut mpsc::Receiver<RendererEvent>) -> RendererEvent {
        timeout(WAIT, events_rx.recv())
            .await
            .expect("event should arrive in time")
            .expect("transport should be alive")
    }

    #[tokio::test]
    async fn forwards_frames_and_reconnects_after_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept two sessions: the first sends one update and closes, the second stays idle.
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            let update = json!({
                "type": "applianceUpdate",
                "data": {"appliance": "oven", "data": {"power": 900, "status": "on"}}
            });
            ws.send(Message::text(update.to_string())).await.unwrap();
            ws.close(None).await.unwrap();

            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.next().await
        });

        let (events_tx, mut events_rx) = mpsc::channel(16);
        let (outbound_tx, outbound_rx) = mpsc::channel(16);
        let transport = tokio::spawn(run_transport(
            format!("ws://{addr}"),
            events_tx,
            outbound_rx,
            Duration::from_millis(20),
        ));

        assert!(matches!(next_event(&mut events_rx).await, RendererEvent::Connected));
        match next_event(&mut events_rx).await {
            RendererEvent::Server(ServerEvent::ApplianceUpdate { appliance, reading }) => {
                assert_eq!(appliance, Appliance::Oven);
                assert_eq!(reading.power, 900);
                assert_eq!(reading.status, ApplianceStatus::On);
            }
            other => panic!("expected appliance update, got {other:?}"),
        }
        assert!(matches!(next_event(&mut events_rx).await, RendererEvent::Disconnected));
        assert!(matches!(next_event(&mut events_rx).await, RendererEvent::Connected));

        outbound_tx
            .send(OutboundCommand::RequestInitialData)
            .await
            .unwrap();
        let frame = timeout(WAIT, server)
            .await
            .unwrap()
            .unwrap()
            .expect("server should receive a frame")
            .unwrap();
        assert_eq!(frame.to_text().unwrap(), r#"{"type":"requestInitialData"}"#);

        transport.abort();
    }

    #[tokio::test]
    async fn commands_queued_while_disconnected_are_reported_on_reconnect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.close(None).await.unwrap();

            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.next().await
        });

        let (events_tx, mut events_rx) = mpsc::channel(16);
        let (outbound_tx, outbound_rx) = mpsc::channel(16);
        let transport = tokio::spawn(run_transport(
            format!("ws://{addr}"),
            events_tx,
            outbound_rx,
            Duration::from_millis(300),
        ));

        assert!(matches!(next_event(&mut events_rx).await, RendererEvent::Connected));
        assert!(matches!(next_event(&mut events_rx).await, RendererEvent::Disconnected));

        outbound_tx
            .send(OutboundCommand::ToggleAppliance {
                appliance: Appliance::Oven,
                status: ApplianceStatus::On,
            })
            .await
            .unwrap();

        assert!(matches!(
            next_event(&mut events_rx).await,
            RendererEvent::CommandsDropped { count: 1 }
        ));
        assert!(matches!(next_event(&mut events_rx).await, RendererEvent::Connected));

        transport.abort();
        server.abort();
    }

    #[tokio::test]
    async fn unreachable_server_reports_connection_error() {
        // Bind then drop to get a port nobody listens on.
        let addr = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();

        let (events_tx, mut events_rx) = mpsc::channel(16);
        let (_outbound_tx, outbound_rx) = mpsc::channel(16);
        let transport = tokio::spawn(run_transport(
            format!("ws://{addr}"),
            events_tx,
            outbound_rx,
            Duration::from_millis(20),
        ));

        assert!(matches!(
            next_event(&mut events_rx).await,
            RendererEvent::ConnectionError { .. }
        ));
        assert!(matches!(
            next_event(&mut events_rx).await,
            RendererEvent::ConnectionError { .. }
        ));

        transport.abort();
    }
}

use crate::domain::{ApplianceStatus, Snapshot};
use crate::interface_adapters::protocol::{ClientMessage, ServerMessage, SnapshotDto};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::utils::ids::next_conn_id;
use crate::use_cases::{TelemetryCommand, TelemetryUpdate};

use axum::{
    Error,
    extract::{
        State,
        ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{Instrument, debug, error, info, info_span, warn};

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    CommandsClosed,
    UpdatesClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);
const MAX_INVALID_JSON: u32 = 10;

pub async fn update_serializer(
    mut update_rx: broadcast::Receiver<TelemetryUpdate>,
    update_bytes_tx: broadcast::Sender<Utf8Bytes>,
) {
    // Serialize each update once and broadcast the shared bytes.
    loop {
        match update_rx.recv().await {
            Ok(update) => {
                let msg = ServerMessage::from(update);
                let txt = match serde_json::to_string(&msg) {
                    Ok(txt) => txt,
                    Err(e) => {
                        error!(error = ?e, "failed to serialize telemetry update");
                        continue;
                    }
                };
                let _ = update_bytes_tx.send(Utf8Bytes::from(txt));
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "update serializer lagged; skipping to latest update");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!("telemetry updates channel closed; serializer exiting");
                break;
            }
        }
    }
}

pub fn spawn_update_serializer(state: &AppState) {
    tokio::spawn(update_serializer(
        state.telemetry.subscribe_updates(),
        state.update_bytes_tx.clone(),
    ));
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Connection id for correlating logs across the socket lifetime.
    let conn_id = next_conn_id();
    serve_connection(socket, state)
        .instrument(info_span!("conn", conn_id))
        .await;
}

async fn serve_connection(mut socket: WebSocket, state: Arc<AppState>) {
    let mut ctx = match bootstrap_connection(&mut socket, &state).await {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!(error = ?e, "failed to send initial data");
            let _ = socket.close().await;
            return;
        }
    };
    info!("client connected");

    if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
        warn!(error = ?e, "client loop exited with error");
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    Ok(bytes)
}

struct ConnCtx {
    pub command_tx: mpsc::Sender<TelemetryCommand>,
    pub update_bytes_rx: broadcast::Receiver<Utf8Bytes>,
    // Latest snapshot, used for requestInitialData and lag recovery.
    pub snapshot_rx: watch::Receiver<Snapshot>,
    pub lag_recovery_count: u64,

    pub msgs_in: u64,
    pub msgs_out: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,

    pub invalid_json: u32,

    pub last_command_full_log: Instant,
    pub last_update_lag_log: Instant,
    pub last_invalid_message_log: Instant,

    pub close_frame: Option<CloseFrame>,
}

async fn bootstrap_connection(
    socket: &mut WebSocket,
    state: &AppState,
) -> Result<ConnCtx, NetError> {
    // Subscribe to updates *before* reading the snapshot so nothing published in between is lost.
    let update_bytes_rx = state.update_bytes_tx.subscribe();
    let snapshot_rx = state.telemetry.snapshot_tx.subscribe();

    // Send Initial Data
    // Clone as soon as we borrow to avoid holding the lock across the await.
    let snapshot = snapshot_rx.borrow().clone();
    let initial = ServerMessage::InitialData(SnapshotDto::from(&snapshot));
    let bytes_out = send_message(socket, &initial).await?;

    let now = Instant::now() - LOG_THROTTLE;
    Ok(ConnCtx {
        command_tx: state.telemetry.command_tx.clone(),
        update_bytes_rx,
        snapshot_rx,
        lag_recovery_count: 0,

        msgs_in: 0,
        msgs_out: 1,
        bytes_in: 0,
        bytes_out: bytes_out as u64,

        invalid_json: 0,

        last_command_full_log: now,
        last_update_lag_log: now,
        last_invalid_message_log: now,

        close_frame: None,
    })
}

enum LoopControl {
    Continue,
    Disconnect,
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    let mut fatal: Option<NetError> = None;

    loop {
        // disconnect becomes true on error
        let disconnect: bool = tokio::select! {
            // Incoming Message from Client
            incoming = socket.recv() => {
                match handle_incoming_ws(socket, incoming, ctx).await {
                    Ok(LoopControl::Continue) => false,
                    Ok(LoopControl::Disconnect) => true,
                    Err(e) => {
                        fatal = Some(e);
                        true
                    }
                }
            }

            // Outgoing Telemetry Update
            update = ctx.update_bytes_rx.recv() => {
                match update {
                    Ok(bytes) => match forward_bytes(bytes, socket, ctx).await {
                        LoopControl::Continue => false,
                        LoopControl::Disconnect => true,
                    },
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        if should_log(&mut ctx.last_update_lag_log) {
                            warn!(missed = n, "updates lagged; sending snapshot");
                        }

                        // Resync strategy: every update is an overwrite, so the latest snapshot
                        // supersedes whatever was skipped.
                        ctx.lag_recovery_count += 1;
                        match send_snapshot(socket, ctx).await {
                            LoopControl::Continue => false,
                            LoopControl::Disconnect => true,
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        fatal = Some(NetError::UpdatesClosed);
                        true
                    }
                }
            }
        };

        if disconnect {
            if let Some(frame) = ctx.close_frame.take() {
                let _ = socket.send(Message::Close(Some(frame))).await;
            }
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            break;
        }
    }

    debug!(
        msgs_in = ctx.msgs_in,
        msgs_out = ctx.msgs_out,
        bytes_in = ctx.bytes_in,
        bytes_out = ctx.bytes_out,
        invalid_json = ctx.invalid_json,
        lag_recovery_count = ctx.lag_recovery_count,
        "connection stats"
    );
    info!("client disconnected");

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

async fn handle_incoming_ws(
    socket: &mut WebSocket,
    incoming: Option<Result<Message, Error>>,
    ctx: &mut ConnCtx,
) -> Result<LoopControl, NetError> {
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                ctx.msgs_in += 1;
                ctx.bytes_in += text.len() as u64;

                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::RequestInitialData) => Ok(send_snapshot(socket, ctx).await),
                    Ok(ClientMessage::ToggleAppliance(payload)) => {
                        let command = TelemetryCommand::SetApplianceStatus {
                            appliance: payload.appliance,
                            status: ApplianceStatus::from(payload.status),
                        };
                        forward_command(command, ctx)
                    }
                    Err(parse_err) => {
                        ctx.invalid_json += 1;
                        if should_log(&mut ctx.last_invalid_message_log) {
                            warn!(
                                bytes = text.len(),
                                error = %parse_err,
                                "failed to parse client message"
                            );
                        }

                        if ctx.invalid_json > MAX_INVALID_JSON {
                            ctx.close_frame = Some(CloseFrame {
                                code: close_code::POLICY,
                                reason: "too many invalid messages".into(),
                            });
                            return Ok(LoopControl::Disconnect);
                        }

                        Ok(LoopControl::Continue)
                    }
                }
            }
            Message::Binary(_) => {
                ctx.close_frame = Some(CloseFrame {
                    code: close_code::UNSUPPORTED,
                    reason: "binary messages not supported".into(),
                });
                Ok(LoopControl::Disconnect)
            }
            Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
            Message::Close(_) => Ok(LoopControl::Disconnect),
        },
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            Ok(LoopControl::Disconnect)
        }
        None => {
            info!("websocket closed");
            Ok(LoopControl::Disconnect)
        }
    }
}

fn forward_command(command: TelemetryCommand, ctx: &mut ConnCtx) -> Result<LoopControl, NetError> {
    match ctx.command_tx.try_send(command) {
        Ok(()) => Ok(LoopControl::Continue),
        Err(mpsc::error::TrySendError::Full(_command)) => {
            if should_log(&mut ctx.last_command_full_log) {
                warn!("command channel full; dropping command");
            }
            Ok(LoopControl::Continue)
        }
        Err(mpsc::error::TrySendError::Closed(_command)) => Err(NetError::CommandsClosed),
    }
}

// Full snapshot to this connection only, as a dataUpdate.
async fn send_snapshot(socket: &mut WebSocket, ctx: &mut ConnCtx) -> LoopControl {
    let snapshot = ctx.snapshot_rx.borrow().clone();
    let msg = ServerMessage::DataUpdate(SnapshotDto::from(&snapshot));
    match send_message(socket, &msg).await {
        Ok(bytes) => {
            ctx.msgs_out += 1;
            ctx.bytes_out += bytes as u64;
            LoopControl::Continue
        }
        Err(err) => {
            warn!(error = ?err, "failed to send snapshot");
            LoopControl::Disconnect
        }
    }
}

async fn forward_bytes(msg: Utf8Bytes, socket: &mut WebSocket, ctx: &mut ConnCtx) -> LoopControl {
    let bytes_len = msg.len();
    match socket.send(Message::Text(msg)).await.map_err(NetError::Ws) {
        Ok(()) => {
            ctx.msgs_out += 1;
            ctx.bytes_out += bytes_len as u64;
            LoopControl::Continue
        }
        Err(err) => {
            // Log unexpected send failures; disconnect will follow immediately.
            warn!(error = ?err, "failed to send telemetry update");
            LoopControl::Disconnect
        }
    }
}

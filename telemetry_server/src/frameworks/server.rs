// Framework bootstrap for the telemetry server runtime.

use crate::domain::tuning::SimulationTuning;
use crate::frameworks::config;
use crate::interface_adapters::clients::{NestStub, SenseStub};
use crate::interface_adapters::net::spawn_update_serializer;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use crate::use_cases::{TelemetryHandle, TelemetrySettings};

use axum::extract::ws::Utf8Bytes;
use std::future::Future;
use std::net::SocketAddr;
use std::{io::Result, sync::Arc, time::Duration};
use tokio::sync::broadcast;

/// Everything needed to start a server besides the listener.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub tick_interval: Duration,
    pub seed: Option<u64>,
    pub nest_api_key: String,
    pub sense_api_key: String,
}

impl ServerSettings {
    pub fn from_env() -> Self {
        Self {
            tick_interval: config::tick_interval(),
            seed: config::sim_seed(),
            nest_api_key: config::nest_api_key(),
            sense_api_key: config::sense_api_key(),
        }
    }
}

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Serve on `listener` until the process exits.
pub async fn run_with_settings(
    listener: tokio::net::TcpListener,
    settings: ServerSettings,
) -> Result<()> {
    serve(listener, settings, std::future::pending()).await
}

async fn serve(
    listener: tokio::net::TcpListener,
    settings: ServerSettings,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&settings);
    let app = routes::app(state.clone());

    tracing::info!(
        %address,
        tick_interval_ms = settings.tick_interval.as_millis(),
        "listening"
    );

    // Serve app and report errors rather than panicking
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        });

    // Stop the simulation so the runtime can wind down.
    state.telemetry.shutdown();
    served
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    tracing::info!("open http://localhost:{} in your browser", address.port());
    serve(listener, ServerSettings::from_env(), shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

fn build_state(settings: &ServerSettings) -> Arc<AppState> {
    // Spawn the telemetry task: the single writer for the simulated home.
    let (telemetry, _task) = TelemetryHandle::spawn(TelemetrySettings {
        command_channel_capacity: config::COMMAND_CHANNEL_CAPACITY,
        update_broadcast_capacity: config::UPDATE_BROADCAST_CAPACITY,
        tick_interval: settings.tick_interval,
        seed: settings.seed,
        tuning: SimulationTuning::default(),
    });

    let (update_bytes_tx, _update_bytes_rx) =
        broadcast::channel::<Utf8Bytes>(config::UPDATE_BROADCAST_CAPACITY);

    let state = Arc::new(AppState {
        telemetry,
        update_bytes_tx,
        thermostat: Arc::new(NestStub::new(settings.nest_api_key.clone())),
        energy_monitor: Arc::new(SenseStub::new(settings.sense_api_key.clone())),
    });

    // Serialize each update once for every connection.
    spawn_update_serializer(&state);
    state
}

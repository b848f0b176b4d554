// Framework bootstrap for the dashboard client runtime.

use crate::domain::{Appliance, ClientError, Notification};
use crate::frameworks::config;
use crate::interface_adapters::clients::HttpTelemetryApi;
use crate::interface_adapters::render::{render, render_notification};
use crate::interface_adapters::transport::run_transport;
use crate::use_cases::{OutboundCommand, RendererHandle, RendererSettings, spawn_poller};

use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Everything needed to start a client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub server_url: String,
    pub poll_interval: Duration,
    pub http_timeout: Duration,
    pub reconnect_delay: Duration,
    pub pulse_duration: Duration,
}

impl ClientSettings {
    pub fn from_env() -> Self {
        Self {
            server_url: config::server_url(),
            poll_interval: config::poll_interval(),
            http_timeout: config::http_timeout(),
            reconnect_delay: config::RECONNECT_DELAY,
            pulse_duration: config::PULSE_DURATION,
        }
    }
}

/// A running renderer, transport, and poller. Dropping it stops all three.
pub struct DashboardClient {
    pub renderer: RendererHandle,
    pub notifications: mpsc::Receiver<Notification>,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardClient {
    pub fn start(settings: ClientSettings) -> Result<Self, ClientError> {
        let api = HttpTelemetryApi::new(settings.server_url.clone(), settings.http_timeout)?;

        let (outbound_tx, outbound_rx) =
            mpsc::channel::<OutboundCommand>(config::OUTBOUND_CHANNEL_CAPACITY);
        let (renderer, notifications, renderer_task) = RendererHandle::spawn(
            RendererSettings {
                event_channel_capacity: config::EVENT_CHANNEL_CAPACITY,
                notification_channel_capacity: config::NOTIFICATION_CHANNEL_CAPACITY,
                pulse_duration: settings.pulse_duration,
            },
            outbound_tx,
        );

        let transport_task = tokio::spawn(run_transport(
            config::websocket_url(&settings.server_url),
            renderer.events_tx.clone(),
            outbound_rx,
            settings.reconnect_delay,
        ));

        let poller_task = spawn_poller(
            Arc::new(api),
            renderer.events_tx.clone(),
            renderer.view_rx.clone(),
            settings.poll_interval,
        );

        Ok(Self {
            renderer,
            notifications,
            tasks: vec![renderer_task, transport_task, poller_task],
        })
    }
}

impl Drop for DashboardClient {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Stdout belongs to the dashboard; logs go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

enum Input {
    Continue,
    Quit,
}

const HELP: &str = "commands: toggle <appliance> | refresh | help | quit";

async fn handle_input(client: &DashboardClient, line: &str) -> Input {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (None, _) => {}
        (Some("toggle"), Some(id)) => {
            let result = match id.parse::<Appliance>() {
                Ok(appliance) => client.renderer.toggle(appliance).await.map(|_| ()),
                Err(err) => Err(err),
            };
            match result {
                // Already surfaced through the notification channel.
                Err(ClientError::NotConnected) => {}
                Err(err) => {
                    println!("{}", render_notification(&Notification::error(err.to_string())));
                }
                Ok(()) => {}
            }
        }
        (Some("refresh"), None) => {
            if let Err(err) = client.renderer.refresh().await {
                warn!(error = %err, "refresh failed");
            }
        }
        (Some("quit" | "exit"), None) => return Input::Quit,
        (Some("help"), None) => println!("{}", render_notification(&Notification::info(HELP))),
        _ => println!(
            "{}",
            render_notification(&Notification::error(format!("unknown command: {line}")))
        ),
    }
    Input::Continue
}

pub async fn run_with_config() -> Result<(), ClientError> {
    init_runtime();

    let settings = ClientSettings::from_env();
    info!(
        server_url = %settings.server_url,
        poll_interval_ms = settings.poll_interval.as_millis(),
        "starting dashboard"
    );
    let mut client = DashboardClient::start(settings)?;

    let mut view_rx = client.renderer.view_rx.clone();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = tokio::time::interval(config::REDRAW_INTERVAL);

    println!("{}", render(&view_rx.borrow_and_update()));
    println!("{}", render_notification(&Notification::info(HELP)));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested");
                break;
            }
            _ = redraw.tick() => {
                if view_rx.has_changed().unwrap_or(false) {
                    println!("{}", render(&view_rx.borrow_and_update()));
                }
            }
            Some(notification) = client.notifications.recv() => {
                println!("{}", render_notification(&notification));
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if let Input::Quit = handle_input(&client, &line).await {
                        break;
                    }
                }
                Ok(None) => {
                    info!("stdin closed");
                    break;
                }
                Err(err) => {
                    warn!(error = %err, "failed to read stdin");
                    break;
                }
            },
        }
    }

    Ok(())
}

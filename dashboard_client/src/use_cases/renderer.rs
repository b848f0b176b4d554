// The renderer task owns the dashboard view: it is the single writer for every displayed field.

use crate::domain::{
    Appliance, ApplianceStatus, ClientError, ConnectionState, Dashboard, Notification, Pulse,
};
use crate::use_cases::types::{OutboundCommand, RendererEvent, ServerEvent};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shown once when the renderer starts.
pub const WELCOME_MESSAGE: &str = "Home dashboard loaded successfully!";

/// Settings for spawning the renderer task.
#[derive(Debug, Clone)]
pub struct RendererSettings {
    /// Capacity for inbound renderer events.
    pub event_channel_capacity: usize,
    /// Capacity for outbound user notifications.
    pub notification_channel_capacity: usize,
    /// How long an appliance stays highlighted after an update.
    pub pulse_duration: Duration,
}

/// Channels into and out of a running renderer task.
#[derive(Clone)]
pub struct RendererHandle {
    pub events_tx: mpsc::Sender<RendererEvent>,
    /// Latest view, republished after every event.
    pub view_rx: watch::Receiver<Dashboard>,
}

impl RendererHandle {
    /// Creates the channels and spawns the renderer task.
    pub fn spawn(
        settings: RendererSettings,
        outbound_tx: mpsc::Sender<OutboundCommand>,
    ) -> (Self, mpsc::Receiver<Notification>, JoinHandle<()>) {
        let (events_tx, events_rx) =
            mpsc::channel::<RendererEvent>(settings.event_channel_capacity);
        let (notifications_tx, notifications_rx) =
            mpsc::channel::<Notification>(settings.notification_channel_capacity);
        let (view_tx, view_rx) = watch::channel(Dashboard::default());
        let _ = notifications_tx.try_send(Notification::success(WELCOME_MESSAGE));

        let renderer = Renderer {
            view: Dashboard::default(),
            view_tx,
            outbound_tx,
            notifications_tx,
            failed_attempts: 0,
        };
        let task = tokio::spawn(renderer_task(
            events_rx,
            renderer,
            events_tx.downgrade(),
            settings.pulse_duration,
        ));

        (Self { events_tx, view_rx }, notifications_rx, task)
    }

    /// Clone of the current view.
    pub fn view(&self) -> Dashboard {
        self.view_rx.borrow().clone()
    }

    /// Asks the server to flip the displayed status of `appliance`.
    pub async fn toggle(&self, appliance: Appliance) -> Result<ApplianceStatus, ClientError> {
        let (reply, reply_rx) = oneshot::channel();
        self.events_tx
            .send(RendererEvent::Toggle { appliance, reply })
            .await
            .map_err(|_| renderer_gone())?;
        reply_rx.await.map_err(|_| renderer_gone())?
    }

    pub async fn refresh(&self) -> Result<(), ClientError> {
        self.events_tx
            .send(RendererEvent::Refresh)
            .await
            .map_err(|_| renderer_gone())
    }
}

fn renderer_gone() -> ClientError {
    ClientError::Transport {
        message: "renderer task stopped".to_string(),
    }
}

struct Renderer {
    view: Dashboard,
    view_tx: watch::Sender<Dashboard>,
    outbound_tx: mpsc::Sender<OutboundCommand>,
    notifications_tx: mpsc::Sender<Notification>,
    // Reconnect failures since the last successful connect.
    failed_attempts: u32,
}

async fn renderer_task(
    mut events_rx: mpsc::Receiver<RendererEvent>,
    mut renderer: Renderer,
    events_tx: mpsc::WeakSender<RendererEvent>,
    pulse_duration: Duration,
) {
    while let Some(event) = events_rx.recv().await {
        let pulses = renderer.handle(event);
        renderer.view_tx.send_replace(renderer.view.clone());

        for pulse in pulses {
            // Timers only hold a sender while they sleep.
            let Some(events_tx) = events_tx.upgrade() else {
                break;
            };
            tokio::spawn(async move {
                tokio::time::sleep(pulse_duration).await;
                let _ = events_tx.send(RendererEvent::PulseElapsed(pulse)).await;
            });
        }
    }
    debug!("renderer event channel closed; renderer exiting");
}

impl Renderer {
    /// Applies one event and returns the highlight timers to schedule.
    fn handle(&mut self, event: RendererEvent) -> Vec<Pulse> {
        match event {
            RendererEvent::Connected => {
                info!("connected to server");
                self.view.connection = ConnectionState::Connected;
                self.failed_attempts = 0;
                self.send_outbound(OutboundCommand::RequestInitialData);
                Vec::new()
            }
            RendererEvent::Disconnected => {
                if self.view.connection.is_connected() {
                    info!("disconnected from server");
                }
                self.view.connection = ConnectionState::Disconnected;
                Vec::new()
            }
            RendererEvent::ConnectionError { message } => {
                self.failed_attempts += 1;
                if self.failed_attempts == 1 {
                    warn!(error = %message, "connection error");
                } else {
                    debug!(error = %message, attempts = self.failed_attempts, "connection error");
                }
                self.view.connection = ConnectionState::Disconnected;
                Vec::new()
            }
            RendererEvent::Server(ServerEvent::InitialData(snapshot))
            | RendererEvent::Server(ServerEvent::DataUpdate(snapshot)) => {
                self.view.apply_snapshot(&snapshot)
            }
            RendererEvent::Server(ServerEvent::ApplianceUpdate { appliance, reading }) => {
                vec![self.view.apply_appliance(appliance, reading)]
            }
            RendererEvent::CommandsDropped { count } => {
                self.notify(Notification::error(format!(
                    "{count} command(s) not delivered: connection lost"
                )));
                Vec::new()
            }
            RendererEvent::Refresh => {
                if self.view.connection.is_connected() {
                    self.send_outbound(OutboundCommand::RequestInitialData);
                }
                Vec::new()
            }
            RendererEvent::Toggle { appliance, reply } => {
                let _ = reply.send(self.toggle(appliance));
                Vec::new()
            }
            RendererEvent::PulseElapsed(pulse) => {
                self.view.clear_pulse(pulse);
                Vec::new()
            }
            RendererEvent::Thermostat(reading) => {
                self.view.set_thermostat_target(reading.target);
                Vec::new()
            }
            RendererEvent::EnergyEstimate(estimate) => {
                self.view.set_daily_usage(estimate.daily_usage);
                Vec::new()
            }
        }
    }

    fn toggle(&mut self, appliance: Appliance) -> Result<ApplianceStatus, ClientError> {
        if !self.view.connection.is_connected() {
            let err = ClientError::NotConnected;
            self.notify(Notification::error(err.to_string()));
            return Err(err);
        }

        // The display only changes once the server echoes the update.
        let status = self.view.toggle_target(appliance);
        self.outbound_tx
            .try_send(OutboundCommand::ToggleAppliance { appliance, status })
            .map_err(|err| ClientError::Transport {
                message: err.to_string(),
            })?;

        let action = match status {
            ApplianceStatus::On => "turned on",
            ApplianceStatus::Off => "turned off",
        };
        self.notify(Notification::success(format!(
            "{} {action}",
            appliance.label()
        )));
        info!(%appliance, ?status, "toggle sent");
        Ok(status)
    }

    fn send_outbound(&self, command: OutboundCommand) {
        if let Err(err) = self.outbound_tx.try_send(command) {
            warn!(error = %err, ?command, "failed to queue outbound command");
        }
    }

    fn notify(&self, notification: Notification) {
        if let Err(err) = self.notifications_tx.try_send(notification) {
            debug!(error = %err, "notification dropped");
        }
    }
}

// The telemetry task owns the state store: it is the single writer for ticks and commands.

use crate::domain::tuning::SimulationTuning;
use crate::domain::{Appliance, ApplianceUpdate, Snapshot, StateStore};
use crate::use_cases::types::{TelemetryCommand, TelemetryUpdate};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Settings for spawning the telemetry task.
#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    /// Capacity for inbound commands.
    pub command_channel_capacity: usize,
    /// Capacity for broadcast updates.
    pub update_broadcast_capacity: usize,
    /// Period of the simulation tick.
    pub tick_interval: Duration,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub tuning: SimulationTuning,
}

/// Channels into and out of a running telemetry task.
#[derive(Clone)]
pub struct TelemetryHandle {
    /// Sender for commands into the telemetry task.
    pub command_tx: mpsc::Sender<TelemetryCommand>,
    /// Broadcast sender for full and narrow updates.
    pub update_tx: broadcast::Sender<TelemetryUpdate>,
    /// Latest snapshot, published before the matching broadcast.
    pub snapshot_tx: watch::Sender<Snapshot>,
    shutdown: Arc<Notify>,
}

impl TelemetryHandle {
    /// Creates the channels and spawns the telemetry task.
    pub fn spawn(settings: TelemetrySettings) -> (Self, JoinHandle<()>) {
        let (command_tx, command_rx) =
            mpsc::channel::<TelemetryCommand>(settings.command_channel_capacity);
        let (update_tx, _update_rx) =
            broadcast::channel::<TelemetryUpdate>(settings.update_broadcast_capacity);
        let store = StateStore::new(settings.tuning);
        let (snapshot_tx, _snapshot_rx) = watch::channel(store.snapshot().clone());
        let shutdown = Arc::new(Notify::new());

        let seed = settings.seed.unwrap_or_else(rand::random);
        debug!(seed, "telemetry rng seeded");

        let task = tokio::spawn(telemetry_task(
            command_rx,
            store,
            Pcg64Mcg::seed_from_u64(seed),
            snapshot_tx.clone(),
            update_tx.clone(),
            settings.tick_interval,
            shutdown.clone(),
        ));

        let handle = Self {
            command_tx,
            update_tx,
            snapshot_tx,
            shutdown,
        };
        (handle, task)
    }

    /// Clone of the current snapshot.
    pub fn latest_snapshot(&self) -> Snapshot {
        self.snapshot_tx.borrow().clone()
    }

    pub fn subscribe_updates(&self) -> broadcast::Receiver<TelemetryUpdate> {
        self.update_tx.subscribe()
    }

    /// Stops the telemetry task after its current step.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

pub async fn telemetry_task(
    mut command_rx: mpsc::Receiver<TelemetryCommand>,
    mut store: StateStore,
    mut rng: Pcg64Mcg,
    snapshot_tx: watch::Sender<Snapshot>,
    update_tx: broadcast::Sender<TelemetryUpdate>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) {
    let mut tick: u64 = 0;

    // First tick lands one period after start; the initial snapshot is already published.
    let mut interval = tokio::time::interval_at(Instant::now() + tick_interval, tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!(tick, "telemetry task stopping");
                break;
            }
            _ = interval.tick() => {
                store.advance(&mut rng);
                tick += 1;

                let snapshot = store.snapshot().clone();
                snapshot_tx.send_replace(snapshot.clone());
                let _ = update_tx.send(TelemetryUpdate::Snapshot(snapshot));
            }
            command = command_rx.recv() => {
                let Some(command) = command else {
                    debug!("command channel closed; telemetry task exiting");
                    break;
                };

                if let Some(update) = apply_command(&mut store, &mut rng, command) {
                    snapshot_tx.send_replace(store.snapshot().clone());
                    let _ = update_tx.send(TelemetryUpdate::Appliance(update));
                }
            }
        }
    }
}

fn apply_command(
    store: &mut StateStore,
    rng: &mut Pcg64Mcg,
    command: TelemetryCommand,
) -> Option<ApplianceUpdate> {
    match command {
        TelemetryCommand::SetApplianceStatus { appliance, status } => {
            // Unknown appliances are dropped without a reply to the sender.
            let appliance = match appliance.parse::<Appliance>() {
                Ok(appliance) => appliance,
                Err(e) => {
                    debug!(error = %e, "ignoring command for unknown appliance");
                    return None;
                }
            };

            let update = store.set_appliance_status(appliance, status, rng);
            info!(
                appliance = %update.appliance,
                status = ?update.reading.status,
                power = update.reading.power,
                "appliance switched"
            );
            Some(update)
        }
    }
}

// Periodic refresh of the auxiliary thermostat and energy-estimate endpoints.

use crate::domain::{Dashboard, TelemetryApi};
use crate::use_cases::types::RendererEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

pub fn spawn_poller(
    api: Arc<dyn TelemetryApi>,
    events_tx: mpsc::Sender<RendererEvent>,
    view_rx: watch::Receiver<Dashboard>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(poller_task(api, events_tx, view_rx, period))
}

async fn poller_task(
    api: Arc<dyn TelemetryApi>,
    events_tx: mpsc::Sender<RendererEvent>,
    view_rx: watch::Receiver<Dashboard>,
    period: Duration,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if events_tx.is_closed() {
            debug!("renderer gone; poller exiting");
            break;
        }
        if !view_rx.borrow().connection.is_connected() {
            continue;
        }
        poll_once(api.as_ref(), &events_tx).await;
    }
}

/// Fetches both endpoints; a failure on one does not affect the other.
pub async fn poll_once(api: &dyn TelemetryApi, events_tx: &mpsc::Sender<RendererEvent>) {
    let (thermostat, estimate) = tokio::join!(api.thermostat(), api.energy_estimate());

    match thermostat {
        Ok(reading) => {
            let _ = events_tx.send(RendererEvent::Thermostat(reading)).await;
        }
        Err(err) => warn!(error = %err, "failed to fetch thermostat data"),
    }

    match estimate {
        Ok(estimate) => {
            let _ = events_tx.send(RendererEvent::EnergyEstimate(estimate)).await;
        }
        Err(err) => warn!(error = %err, "failed to fetch energy estimate"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientError, EnergyEstimate, ThermostatReading};
    use crate::use_cases::{RendererHandle, RendererSettings};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
        fail_thermostat: bool,
    }

    #[async_trait]
    impl TelemetryApi for FakeApi {
        async fn thermostat(&self) -> Result<ThermostatReading, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_thermostat {
                return Err(ClientError::UpstreamStub {
                    endpoint: "/api/nest/thermostat",
                    message: "500".to_string(),
                });
            }
            Ok(ThermostatReading {
                temperature: 22.0,
                humidity: 45.0,
                mode: "heat".to_string(),
                target: 21.5,
            })
        }

        async fn energy_estimate(&self) -> Result<EnergyEstimate, ClientError> {
            Ok(EnergyEstimate {
                current_power: 1000,
                daily_usage: 24_000,
                monthly_usage: 720_000,
            })
        }
    }

    #[tokio::test]
    async fn failed_poll_does_not_block_the_other() {
        let api = FakeApi {
            fail_thermostat: true,
            ..FakeApi::default()
        };
        let (events_tx, mut events_rx) = mpsc::channel(4);

        poll_once(&api, &events_tx).await;

        assert!(matches!(
            events_rx.try_recv(),
            Ok(RendererEvent::EnergyEstimate(EnergyEstimate {
                daily_usage: 24_000,
                ..
            }))
        ));
        assert!(events_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn polls_only_while_connected() {
        let (outbound_tx, _outbound_rx) = mpsc::channel(8);
        let (mut handle, _notifications, _task) = RendererHandle::spawn(
            RendererSettings {
                event_channel_capacity: 16,
                notification_channel_capacity: 16,
                pulse_duration: Duration::from_millis(300),
            },
            outbound_tx,
        );
        let api = Arc::new(FakeApi::default());
        let _poller = spawn_poller(
            api.clone(),
            handle.events_tx.clone(),
            handle.view_rx.clone(),
            Duration::from_millis(10),
        );

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);

        handle.events_tx.send(RendererEvent::Connected).await.unwrap();
        let view = tokio::time::timeout(
            Duration::from_secs(2),
            handle
                .view_rx
                .wait_for(|view| {
                    view.thermostat_target == "21.5" && view.daily_estimate == "24.00"
                }),
        )
        .await
        .expect("poll should land in time")
        .expect("renderer should be alive")
        .clone();

        assert!(view.connection.is_connected());
        assert!(api.calls.load(Ordering::SeqCst) > 0);
    }
}

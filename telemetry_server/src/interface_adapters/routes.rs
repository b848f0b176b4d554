use crate::interface_adapters::http::{
    appliances_handler, energy_current_handler, nest_thermostat_handler, sense_energy_handler,
    status_handler, water_current_handler,
};
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use axum::{Router, routing::get};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/api/status", get(status_handler))
        .route("/api/appliances", get(appliances_handler))
        .route("/api/energy/current", get(energy_current_handler))
        .route("/api/water/current", get(water_current_handler))
        .route("/api/nest/thermostat", get(nest_thermostat_handler))
        .route("/api/sense/energy", get(sense_energy_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        EnergyEstimate, EnergyMonitorProvider, ThermostatProvider, ThermostatReading,
        UpstreamStubError,
    };
    use crate::domain::tuning::{SimulationTuning, WaterTuning};
    use crate::domain::{Appliance, ApplianceStatus, Snapshot, StateStore};
    use crate::interface_adapters::clients::{NestStub, SenseStub};
    use crate::use_cases::{TelemetryCommand, TelemetryHandle, TelemetrySettings};
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use serde_json::Value;
    use std::time::Duration;
    use tokio::sync::broadcast;
    use tower::ServiceExt;

    struct FailingIntegration;

    #[async_trait]
    impl ThermostatProvider for FailingIntegration {
        async fn thermostat(
            &self,
            _snapshot: &Snapshot,
        ) -> Result<ThermostatReading, UpstreamStubError> {
            Err(UpstreamStubError {
                provider: "nest",
                message: "unreachable".to_string(),
            })
        }
    }

    #[async_trait]
    impl EnergyMonitorProvider for FailingIntegration {
        async fn energy(&self, _snapshot: &Snapshot) -> Result<EnergyEstimate, UpstreamStubError> {
            Err(UpstreamStubError {
                provider: "sense",
                message: "unreachable".to_string(),
            })
        }
    }

    fn spawn_telemetry() -> TelemetryHandle {
        // Ticks are effectively disabled so responses reflect only explicit commands.
        let (handle, _task) = TelemetryHandle::spawn(TelemetrySettings {
            command_channel_capacity: 8,
            update_broadcast_capacity: 8,
            tick_interval: Duration::from_secs(3600),
            seed: Some(1),
            tuning: SimulationTuning::default(),
        });
        handle
    }

    fn build_test_app_with(telemetry: TelemetryHandle, failing: bool) -> Router {
        let (update_bytes_tx, _) = broadcast::channel(8);
        let state = if failing {
            AppState {
                telemetry,
                update_bytes_tx,
                thermostat: Arc::new(FailingIntegration),
                energy_monitor: Arc::new(FailingIntegration),
            }
        } else {
            AppState {
                telemetry,
                update_bytes_tx,
                thermostat: Arc::new(NestStub::new("demo_key")),
                energy_monitor: Arc::new(SenseStub::new("demo_key")),
            }
        };
        app(Arc::new(state))
    }

    fn build_test_app() -> Router {
        build_test_app_with(spawn_telemetry(), false)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("expected request to build");

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("expected response body");
        let payload: Value = serde_json::from_slice(&body).expect("expected json body");
        (status, payload)
    }

    #[tokio::test]
    async fn when_status_is_requested_then_returns_full_initial_snapshot() {
        let (status, payload) = get_json(build_test_app(), "/api/status").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["energy"]["total"], 0);
        assert_eq!(
            payload["energy"]["appliances"]["refrigerator"]["status"],
            "off"
        );
        assert_eq!(payload["water"]["temperature"], 20.0);
        assert_eq!(payload["environment"]["humidity"], 45.0);
    }

    #[tokio::test]
    async fn when_appliances_are_requested_then_returns_only_the_appliance_map() {
        let (status, payload) = get_json(build_test_app(), "/api/appliances").await;

        assert_eq!(status, StatusCode::OK);
        let map = payload.as_object().expect("expected object");
        assert_eq!(map.len(), 5);
        assert_eq!(map["tv"]["power"], 0);
    }

    #[tokio::test]
    async fn when_appliance_is_on_then_energy_endpoints_reflect_its_power() {
        let telemetry = spawn_telemetry();
        let mut updates = telemetry.subscribe_updates();
        telemetry
            .command_tx
            .send(TelemetryCommand::SetApplianceStatus {
                appliance: "oven".to_string(),
                status: ApplianceStatus::On,
            })
            .await
            .unwrap();
        updates.recv().await.unwrap();
        let power = u64::from(telemetry.latest_snapshot().energy.total);

        let app = build_test_app_with(telemetry, false);
        let (status, current) = get_json(app.clone(), "/api/energy/current").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(current["total"], power);
        assert!(current["timestamp"].as_str().unwrap().ends_with('Z'));

        let (_, sense) = get_json(app, "/api/sense/energy").await;
        assert_eq!(sense["current_power"], power);
        assert_eq!(sense["daily_usage"], power * 24);
        assert_eq!(sense["monthly_usage"], power * 24 * 30);
    }

    #[tokio::test]
    async fn when_water_is_requested_then_reports_water_totals() {
        let (status, payload) = get_json(build_test_app(), "/api/water/current").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["total"], 0);
        assert_eq!(payload["flow"], 0);
        assert_eq!(payload["temperature"], 20.0);
        assert!(payload["timestamp"].is_string());
    }

    #[tokio::test]
    async fn when_water_and_energy_differ_then_water_endpoint_reports_water_total() {
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let mut store = StateStore::new(SimulationTuning {
            water: WaterTuning {
                flow_chance: 1.0,
                ..WaterTuning::default()
            },
            ..SimulationTuning::default()
        });
        store.set_appliance_status(Appliance::Oven, ApplianceStatus::On, &mut rng);
        while store.snapshot().water.total == 0 {
            store.advance(&mut rng);
        }
        let snapshot = store.snapshot().clone();
        assert_ne!(snapshot.water.total, u64::from(snapshot.energy.total));

        let telemetry = spawn_telemetry();
        telemetry.snapshot_tx.send_replace(snapshot.clone());
        let (status, payload) =
            get_json(build_test_app_with(telemetry, false), "/api/water/current").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["total"], snapshot.water.total);
        assert_ne!(payload["total"], u64::from(snapshot.energy.total));
        assert_eq!(payload["flow"], snapshot.water.flow);
    }

    #[tokio::test]
    async fn when_thermostat_is_requested_then_returns_stub_shape() {
        let (status, payload) = get_json(build_test_app(), "/api/nest/thermostat").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["mode"], "heat");
        assert_eq!(payload["target"], 22.0);
        assert_eq!(payload["temperature"], 22.0);
    }

    #[tokio::test]
    async fn when_integrations_fail_then_returns_500_with_error_message() {
        let app = build_test_app_with(spawn_telemetry(), true);

        let (status, payload) = get_json(app.clone(), "/api/nest/thermostat").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload["error"], "Failed to fetch Nest data");

        let (status, payload) = get_json(app, "/api/sense/energy").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload["error"], "Failed to fetch Sense data");
    }

    #[tokio::test]
    async fn when_status_route_is_called_with_post_then_returns_405() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/status")
            .body(Body::empty())
            .expect("expected request to build");

        let response = build_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}

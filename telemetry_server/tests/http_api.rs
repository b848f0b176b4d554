mod support;

use serde_json::Value;

async fn get_json(path: &str) -> (reqwest::StatusCode, Value) {
    let base_url = support::ensure_server();
    let res = reqwest::get(format!("{base_url}{path}"))
        .await
        .expect("request should succeed");
    let status = res.status();
    let body = res.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn test_status_returns_consistent_snapshot() {
    let (status, body) = get_json("/api/status").await;

    assert_eq!(status, reqwest::StatusCode::OK);
    let appliances = body["energy"]["appliances"]
        .as_object()
        .expect("appliance map");
    let sum: u64 = appliances
        .values()
        .map(|reading| reading["power"].as_u64().expect("power"))
        .sum();
    assert_eq!(body["energy"]["total"].as_u64(), Some(sum));

    let temperature = body["environment"]["temperature"].as_f64().unwrap();
    let humidity = body["environment"]["humidity"].as_f64().unwrap();
    assert!((18.0..=28.0).contains(&temperature));
    assert!((30.0..=70.0).contains(&humidity));
}

#[tokio::test]
async fn test_auxiliary_endpoints_return_stub_shapes() {
    let (status, nest) = get_json("/api/nest/thermostat").await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(nest["mode"], "heat");
    assert_eq!(nest["target"], 22.0);

    let (status, sense) = get_json("/api/sense/energy").await;
    assert_eq!(status, reqwest::StatusCode::OK);
    let current = sense["current_power"].as_u64().unwrap();
    assert_eq!(sense["daily_usage"].as_u64(), Some(current * 24));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let base_url = support::ensure_server();
    let res = reqwest::get(format!("{base_url}/api/unknown"))
        .await
        .expect("request should succeed");

    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
}

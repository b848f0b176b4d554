#[tokio::main]
async fn main() {
    if let Err(e) = telemetry_server::frameworks::server::run_with_config().await {
        eprintln!("telemetry server failed: {e}");
        std::process::exit(1);
    }
}

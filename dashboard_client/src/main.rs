#[tokio::main]
async fn main() {
    if let Err(e) = dashboard_client::frameworks::runtime::run_with_config().await {
        eprintln!("dashboard client failed: {e}");
        std::process::exit(1);
    }
}

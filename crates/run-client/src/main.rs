//! Run client entry point.
//!
//! Usage:
//! ```
//! cargo run -p run-client --bin run [config.json]
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use run_client::config::ClientConfig;
use run_client::wake::NoopWakeLock;
use run_client::workflow;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = ClientConfig::load(&config_path)?;
    tracing::info!("Loaded configuration from {config_path}");

    let mut rng = StdRng::from_entropy();
    workflow::run(&config, &NoopWakeLock, &mut rng).await
}

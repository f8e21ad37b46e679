use anyhow::Result;
use job_board::environment::EnvironmentConfig;
use job_board::start_web_server;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("job_board=info,jobberwocky=info,rocket=warn")),
        )
        .init();

    let config = EnvironmentConfig::load()?;
    start_web_server(config).await
}

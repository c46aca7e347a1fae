mod cli;

use crate::cli::Args;
use crate::cli::app::App;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use userdeck::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = args.apply(AppConfig::from_env().context("failed to load configuration")?);

    let orchestrator = userdeck::open(&config).context("failed to open user store")?;
    info!(
        data_dir = %config.data_dir.display(),
        source = %config.source_url,
        page_size = config.page_size,
        "userdeck session started"
    );

    let mut app = App::new(orchestrator);
    for _ in 0..args.prefetch {
        app.execute("fetch").await;
    }
    app.run().await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("userdeck=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

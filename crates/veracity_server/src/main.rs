use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use veracity_server::{
    AppState, ObservabilityConfig, ServiceConfig, init_observability, router,
    shutdown_observability,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Veracity synthetic media detection relay", long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Directory for staged media (overrides UPLOAD_DIR)
    #[arg(short, long)]
    upload_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs (overrides JSON_LOGS)
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn observability(&self) -> ObservabilityConfig {
        let mut config = ObservabilityConfig::from_env();
        if self.verbose {
            config = config.with_log_level("debug");
        }
        if self.json_logs {
            config = config.with_json_logs(true);
        }
        config
    }

    fn apply(self, config: &mut ServiceConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(upload_dir) = self.upload_dir {
            config.server.upload_dir = upload_dir;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_observability(&args.observability())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let mut config = ServiceConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;
    args.apply(&mut config);

    let state = AppState::from_config(&config)?;
    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        address = %address,
        upload_dir = %config.server.upload_dir.display(),
        max_body_bytes = config.server.max_body_bytes,
        "Veracity listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    shutdown_observability();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

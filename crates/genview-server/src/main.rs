//! Genview dashboard server

use anyhow::Result;
use genview_common::logging::{init_logging, LogConfig};
use genview_ingest::Project;
use std::{net::SocketAddr, time::Duration};
use tracing::info;

use genview_server::{
    api::{self, AppState},
    config::Config,
    shutdown,
};

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::builder()
        .log_file_prefix("genview-server")
        .filter_directives("genview_server=debug,genview_ingest=debug,tower_http=debug")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting Genview Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let project = Project::open(&config.data.data_dir, config.data.manifest.as_deref())?;
    info!(
        data_dir = %project.data_dir().display(),
        title = %project.title(),
        "Project opened"
    );

    let app = api::create_router(AppState::new(project), &config);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    shutdown::serve(
        listener,
        app,
        shutdown::shutdown_signal(),
        Duration::from_secs(config.server.shutdown_timeout_secs),
    )
    .await?;

    info!("Server shut down gracefully");

    Ok(())
}

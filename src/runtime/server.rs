//! Server mode
//!
//! Builds the actix-web application and runs it until a shutdown signal.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::api::{self, SessionGuard};
use crate::config::StaticConfig;
use crate::runtime::startup;
use crate::system::shutdown::listen_for_shutdown;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = startup::prepare_server_startup(config)
        .await
        .inspect_err(|e| error!("Server startup failed: {:#}", e))?;

    let state = startup.state.clone();
    let workers = config.server.workers.clamp(1, 32);
    warn!("Using {} workers for the server", workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(SessionGuard)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(state.clone())
            .app_data(web::FormConfig::default().limit(16 * 1024))
            .configure(api::configure)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    info!("Starting server at http://{}", bind_address);

    tokio::select! {
        res = server => {
            res.context("HTTP server error")?;
        }
        _ = listen_for_shutdown() => {
            warn!("Graceful shutdown requested");
        }
    }

    if let Err(e) = startup.storage.get_db().clone().close().await {
        warn!("Failed to close database connection: {}", e);
    }
    info!("Server stopped");

    Ok(())
}

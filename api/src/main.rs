use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;

use pw_api::{app, telemetry};
use pw_core::services::RefreshExchange;
use pw_infra::HttpTokenRefresher;
use pw_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    telemetry::init_tracing(&config.logging);
    info!("Starting PersonalWebSite API Server");

    let state = web::Data::new(
        app::AppState::from_config(&config)
            .await
            .context("failed to initialize the token manager")?,
    );
    let refresher: Arc<dyn RefreshExchange> = Arc::new(
        HttpTokenRefresher::new(&config.gateway).context("failed to build the refresh client")?,
    );
    info!(refresh_url = %config.gateway.refresh_url(), "refresh exchange configured");

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        let state = state.clone();
        let refresher = Arc::clone(&refresher);
        App::new()
            .wrap(TracingLogger::default())
            .configure(move |cfg| app::configure(cfg, state, refresher))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}

use actix_web::{middleware, web, App, HttpServer};
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn};

use performance_predictor::api;
use performance_predictor::config::{AppConfig, API_KEY_VAR};
use performance_predictor::logging::init_logging;
use performance_predictor::oracle::{ChatOracle, GatewayClient};

async fn start_api(config: AppConfig) -> std::io::Result<()> {
    let oracle: Arc<dyn ChatOracle> = Arc::new(GatewayClient::from_config(&config));
    let oracle = web::Data::from(oracle);

    HttpServer::new(move || {
        App::new()
            .app_data(oracle.clone())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    let _log_guard = init_logging(&config);

    if config.api_key.is_none() {
        warn!("{} is not set; predictions will fail until it is", API_KEY_VAR);
    }

    info!(model = %config.model, gateway = %config.gateway_url, "using AI gateway");
    info!("Starting Student Performance Predictor on http://{}:{}", config.host, config.port);

    start_api(config).await?;

    Ok(())
}

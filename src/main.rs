use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tripvalidator::llm::OpenAiGateway;
use tripvalidator::routes::configure_routes;
use tripvalidator::{AppConfig, ValidationService};

const DEFAULT_LOG_FILTER: &str = "tripvalidator=info,warp=info";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let gateway = match OpenAiGateway::new(
        config.api_key.clone(),
        config.api_url.clone(),
        config.model.clone(),
    ) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!(error = %e, "failed to create LLM gateway");
            std::process::exit(1);
        }
    };

    let service = ValidationService::new(Arc::new(gateway), config.validation_config());
    let routes = configure_routes(Arc::new(service));

    tracing::info!(
        bind = %config.bind_addr,
        model = %config.model,
        endpoint = %config.api_url,
        "starting server"
    );
    warp::serve(routes).run(config.bind_addr).await;
}

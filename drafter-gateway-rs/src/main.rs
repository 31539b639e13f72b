// drafter-gateway-rs/src/main.rs
// Incident update drafter - HTTP entry point
//
// Configuration comes from the environment (and an optional .env file);
// see config-rs for the variables. Without OPENAI_API_KEY every draft is
// produced from templates.

use std::sync::Arc;

use config_rs::DrafterConfig;
use drafter_gateway::DrafterGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config_rs::load_dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DrafterConfig::from_env();
    log::debug!("Loaded configuration: {:?}", config);

    let gateway = Arc::new(DrafterGateway::from_config(&config));
    let app = gateway.create_router();

    let listener = tokio::net::TcpListener::bind(config.gateway.bind_addr).await?;
    log::info!("Drafter gateway listening on http://{}", config.gateway.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

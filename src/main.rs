use std::env;

use clap::Parser;
use config::Config;
use dotenvy::dotenv;

use tfc_booking::api::http::HttpApi;
use tfc_booking::domain::types::AuthToken;
use tfc_booking::models::config::ClientConfig;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let client_config = match settings.try_deserialize::<ClientConfig>() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    let api = match HttpApi::new(&client_config) {
        Ok(api) => api,
        Err(err) => {
            log::error!("Failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };

    let api = match client_config.token.as_deref().map(AuthToken::new) {
        Some(Ok(token)) => api.with_token(token),
        Some(Err(err)) => {
            log::warn!("Ignoring configured token: {err}");
            api
        }
        None => api,
    };

    if let Err(err) = cli.run(&api, &client_config).await {
        log::error!("{err}");
        std::process::exit(1);
    }
}

//! Interactions Server - Main Entry Point

use anyhow::{Context, Result};
use ix_common::{CommandScope, Snowflake};
use ix_crypto::SignatureVerifier;
use tracing::{error, info};

use ix_server::{api, commands, config, interactions, rest};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ix_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();
    config.warn_missing();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Interactions Server"
    );

    let verifier = SignatureVerifier::from_hex(config.require_public_key()?)
        .context("DISCORD_PUBLIC_KEY is not a valid Ed25519 public key")?;
    let rest = rest::RestClient::from_config(&config).context("Failed to build REST client")?;

    if config.sync_commands_on_start {
        config.require_bot_token()?;
        let service =
            commands::RegistrationService::new(rest.clone(), config.require_application_id()?);
        let scope = config
            .dev_guild_id
            .clone()
            .map_or(CommandScope::Global, |id| CommandScope::Guild(Snowflake::from(id)));
        let synced = service
            .overwrite_commands(&scope, &commands::builtin::definitions())
            .await
            .context("Failed to sync command catalog")?;
        info!(count = synced.len(), guild_id = ?scope.guild_id(), "Command catalog synced");
    }

    let registry = commands::builtin::registry()?;
    info!(
        commands = registry.command_count(),
        components = registry.component_count(),
        "Command registry built"
    );

    // Build application state
    let dispatcher = interactions::Dispatcher::new(verifier, registry, rest);
    let state = api::AppState::new(dispatcher, config.clone());

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Received shutdown signal, draining in-flight requests...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

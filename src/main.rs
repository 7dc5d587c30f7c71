//! Sauna Slots Server
//!
//! Serves the public booking API and runs the administrator's Telegram bot
//! over one shared in-memory schedule.

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sauna_slots::{api, bot::AdminBot, config::AppConfig, telegram, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("sauna_slots={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Sauna Slots Server v{}", env!("CARGO_PKG_VERSION"));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let bot_token = config.bot.token.clone();
    if config.bot.admin_chat_id.is_none() {
        tracing::warn!("ADMIN_CHAT_ID not set, every chat may administer the schedule");
    }

    let state = AppState::new(config);

    // Start the admin bot alongside the HTTP server
    let bot_task = match bot_token {
        Some(token) => Some(tokio::spawn(telegram::run(token, AdminBot::from_state(&state)))),
        None => {
            tracing::warn!("BOT_TOKEN not set, skipping bot init");
            None
        }
    };

    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(task) = bot_task {
        task.abort();
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

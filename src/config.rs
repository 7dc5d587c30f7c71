//! Configuration management for the sauna booking server

use chrono::Weekday;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Chat bot settings
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BotConfig {
    /// Telegram bot token; the bot is not started without one
    pub token: Option<String>,
    /// The only chat allowed to administer the schedule (all chats when unset)
    pub admin_chat_id: Option<i64>,
}

/// Scheduling defaults used by the administration commands
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Number of upcoming days listed by "show schedule"
    pub show_days: usize,
    /// Hours added by the "standard hours" button
    pub standard_hours: Vec<u32>,
    /// Note written on slots booked from the chat
    pub booking_note: String,
    /// Weekday skipped when building a week
    pub off_day: Weekday,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. SAUNA_SERVER__PORT)
            .add_source(
                Environment::with_prefix("SAUNA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Short variable names used by deployments
            .set_override_option("server.port", non_empty_var("PORT"))?
            .set_override_option("bot.token", non_empty_var("BOT_TOKEN"))?
            .set_override_option("bot.admin_chat_id", non_empty_var("ADMIN_CHAT_ID"))?
            .build()?;

        config.try_deserialize()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            show_days: 7,
            standard_hours: (10..22).collect(),
            booking_note: "Бронь".to_string(),
            off_day: Weekday::Sun,
        }
    }
}

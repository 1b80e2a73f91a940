use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment prefix for config keys, e.g. `CHAT_API__BASE_URL`.
pub const ENV_PREFIX: &str = "CHAT";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the query backend
    #[arg(long, env = "API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub attachments: AttachmentsConfig,
    pub ui: UiConfig,
    pub conversations: ConversationsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub static_dir: String,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub query_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AttachmentsConfig {
    /// Defaults to `api.base_url` when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    pub upload_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub title: String,
    /// Shows the microphone button when set.
    #[serde(default)]
    pub voice_input_url: Option<String>,
}

/// Idle conversations are dropped after `ttl_secs`, checked every
/// `cleanup_interval_secs`.
#[derive(Debug, Deserialize, Clone)]
pub struct ConversationsConfig {
    pub ttl_secs: u64,
    pub cleanup_interval_secs: u64,
}

impl ConversationsConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub json: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Priority: CLI flag > CLI env var > `CHAT_*` env > config file > defaults.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.static_dir", "static")?
            .set_default("server.body_limit_bytes", 10 * 1024 * 1024)?
            .set_default("api.base_url", "http://127.0.0.1:8000")?
            .set_default("api.query_path", "/query")?
            .set_default("attachments.upload_path", "/api/attachment/upload")?
            .set_default("ui.title", "Chat")?
            .set_default("conversations.ttl_secs", 30 * 60)?
            .set_default("conversations.cleanup_interval_secs", 60)?
            .set_default("log.json", false)?;

        // Explicit file wins; otherwise pick up ./config.yaml if it exists.
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else if Path::new("config.yaml").exists() {
            builder = builder.add_source(File::with_name("config.yaml"));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(url) = cli.api_base_url {
            builder = builder.set_override("api.base_url", url)?;
        }
        if let Some(json) = cli.log_json {
            builder = builder.set_override("log.json", json)?;
        }

        let cfg = builder.build()?;
        let config: Self = cfg.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Base URL used for attachment uploads.
    pub fn attachments_base_url(&self) -> &str {
        self.attachments
            .base_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.api.base_url)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "api.base_url cannot be empty".to_string(),
            ));
        }
        if self.conversations.cleanup_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "conversations.cleanup_interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

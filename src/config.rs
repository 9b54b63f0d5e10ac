use clap::{Parser, ValueEnum};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Prefix of environment variables read by [`AppConfig::load`].
pub const ENV_PREFIX: &str = "STRESSBOT";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// How photos are analyzed
    #[arg(long, env = "ANALYSIS_MODE", value_enum)]
    pub analysis_mode: Option<AnalysisMode>,

    /// Base URL of the prediction backend (remote mode)
    #[arg(long, env = "ANALYSIS_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub analysis: AnalysisConfig,
    pub chat: ChatConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
    pub static_dir: String,
    /// Origins allowed to call the JSON API. `*` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 30,
            body_limit_bytes: 10 * 1024 * 1024,
            static_dir: "static".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Where photo analysis happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Wait, then return a random score.
    #[default]
    Simulated,
    /// POST the capture to an external `/predict/image` backend.
    Remote,
}

impl AnalysisMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Remote => "remote",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    pub mode: AnalysisMode,
    pub backend_url: String,
    pub simulated_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Simulated,
            backend_url: "http://localhost:8000".to_string(),
            simulated_delay_ms: 2000,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ChatConfig {
    pub reply_delay_ms: u64,
    pub reply_jitter_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1500,
            reply_jitter_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub idle_timeout_secs: u64,
    pub cleanup_interval_secs: u64,
    pub sign_in_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "stressbot_session".to_string(),
            idle_timeout_secs: 30 * 60,
            cleanup_interval_secs: 60,
            sign_in_delay_ms: 1500,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Script URL for htmx. Pages still work as plain forms without it.
    pub htmx_src: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            htmx_src: "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        // Priority: CLI flag > CLI env var > STRESSBOT_* env > config file > defaults.
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. STRESSBOT_SERVER__PORT=8000
        // Lists are comma separated: STRESSBOT_SERVER__CORS_ALLOWED_ORIGINS=http://a,http://b
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_allowed_origins")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(mode) = cli.analysis_mode {
            builder = builder.set_override("analysis.mode", mode.as_str())?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("analysis.backend_url", url)?;
        }
        if let Some(json) = cli.log_json {
            builder = builder.set_override("logging.json", json)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }

    /// Socket address string for the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.analysis.mode, AnalysisMode::Simulated);
        assert_eq!(config.session.cookie_name, "stressbot_session");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_cli_flags_override() {
        let config = AppConfig::load_from_args([
            "stressbot",
            "--port",
            "4100",
            "--analysis-mode",
            "remote",
            "--backend-url",
            "http://model:9000",
        ])
        .unwrap();
        assert_eq!(config.server.port, 4100);
        assert_eq!(config.analysis.mode, AnalysisMode::Remote);
        assert_eq!(config.analysis.backend_url, "http://model:9000");
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let err = AppConfig::load_from_args(["stressbot", "--nope"]).unwrap_err();
        assert!(matches!(err, config::ConfigError::Message(_)));
    }
}

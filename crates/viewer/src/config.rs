use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tailer::TailerConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewerConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tailer: TailerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Applies to one-shot routes only; streams are open-ended.
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    /// Frames buffered per stream before the push loop waits on the client.
    pub stream_buffer: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    File { path: String },
}

impl ViewerConfig {
    /// Load configuration from viewer.toml and environment variables
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        // Compile-time defaults first so missing keys fall back to them
        let defaults = config::Config::try_from(&ViewerConfig::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = config::Config::builder()
            .add_source(defaults);

        let config_paths = [
            "/etc/viewer/viewer",
            "config/viewer",
            "crates/viewer/config/viewer",
        ];

        for path in config_paths {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Nested keys use a double underscore: VIEWER_TAILER__LOG_FILE
        builder = builder.add_source(
            config::Environment::with_prefix("VIEWER")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn validate(&self) -> Result<()> {
        self.server.bind_address.parse::<std::net::SocketAddr>()
            .context("Invalid bind_address")?;

        if self.server.stream_buffer == 0 {
            anyhow::bail!("server.stream_buffer must be > 0");
        }

        self.tailer.validate()
            .context("Invalid tailer configuration")?;

        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "0.0.0.0:8080".to_string(),
                request_timeout_secs: 30,
                enable_cors: false,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                ],
                stream_buffer: 16,
            },
            logging: LoggingConfig {
                level: "info,viewer=debug,tailer=debug".to_string(),
                format: LogFormat::Pretty,
                output: LogOutput::Stdout,
            },
            tailer: TailerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ViewerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_bind_address() {
        let mut config = ViewerConfig::default();
        config.server.bind_address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_tailer_section() {
        let mut config = ViewerConfig::default();
        config.tailer.watch.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_survive_config_round_trip() {
        let config: ViewerConfig = config::Config::builder()
            .add_source(config::Config::try_from(&ViewerConfig::default()).unwrap())
            .set_override("tailer.watch.interval_secs", 7)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.tailer.watch.interval_secs, 7);
        assert_eq!(config.tailer.watch.initial_lines, 10);
        assert_eq!(config.server.stream_buffer, 16);
    }
}

use anyhow::Result;
use classeviva_client::client::{ClientConfig, DEFAULT_API_KEY, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub cors: CorsConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub diagnostics: bool,
}

impl Settings {
    /// Defaults, then `config/settings.{toml,yaml,..}` if present, then
    /// `APP__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("session.ttl_seconds", 1800)?
            .set_default(
                "cors.allowed_origins",
                vec![
                    "http://localhost:5500",
                    "http://127.0.0.1:5500",
                    "https://classefiga.federicoscutariu.it",
                ],
            )?
            .set_default("upstream.base_url", DEFAULT_BASE_URL)?
            .set_default("upstream.api_key", DEFAULT_API_KEY)?
            .set_default("upstream.user_agent", DEFAULT_USER_AGENT)?
            .set_default("upstream.timeout_seconds", 20)?
            .set_default("upstream.connect_timeout_seconds", 10)?
            .set_default("upstream.diagnostics", true)?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session.ttl_seconds)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_seconds)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.upstream.base_url.clone(),
            api_key: self.upstream.api_key.clone(),
            user_agent: self.upstream.user_agent.clone(),
            timeout: self.upstream_timeout(),
            connect_timeout: Duration::from_secs(self.upstream.connect_timeout_seconds),
            diagnostics: self.upstream.diagnostics,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            session: SessionConfig { ttl_seconds: 1800 },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:5500".to_string()],
            },
            upstream: UpstreamConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                api_key: DEFAULT_API_KEY.to_string(),
                user_agent: DEFAULT_USER_AGENT.to_string(),
                timeout_seconds: 20,
                connect_timeout_seconds: 10,
                diagnostics: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_mapping() {
        let mut settings = Settings::default();
        settings.upstream.timeout_seconds = 7;
        settings.upstream.diagnostics = false;

        let client = settings.client_config();
        assert_eq!(client.timeout, Duration::from_secs(7));
        assert!(!client.diagnostics);
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.session_ttl(), Duration::from_secs(1800));
    }
}

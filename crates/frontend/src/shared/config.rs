use gloo_net::http::Request;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Full origin such as "https://farm.example.com"; empty means the page
    /// host with `port`
    #[serde(default)]
    pub origin: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NotificationConfig {
    #[serde(default = "default_toast_timeout")]
    pub toast_timeout_ms: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_timeout_ms: default_toast_timeout(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_toast_timeout() -> u32 {
    3000
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
origin = ""
port = 8080

[notifications]
toast_timeout_ms = 3000
"#;

/// Served next to index.html
const CONFIG_URL: &str = "/config.toml";

impl Default for Config {
    fn default() -> Self {
        // DEFAULT_CONFIG is covered by test_default_config_loads
        parse_config(DEFAULT_CONFIG).unwrap_or(Self {
            api: ApiConfig {
                origin: String::new(),
                port: default_port(),
            },
            notifications: NotificationConfig::default(),
        })
    }
}

pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

/// Load configuration from /config.toml
///
/// Search order:
/// 1. `/config.toml` served with the app
/// 2. Falls back to embedded default config
pub async fn load_config() -> anyhow::Result<Config> {
    match fetch_config_text().await {
        Ok(contents) => {
            log::info!("Loading config from: {}", CONFIG_URL);
            let config = parse_config(&contents)?;
            return Ok(config);
        }
        Err(e) => log::warn!("config.toml not available: {}", e),
    }

    log::info!("Using default embedded configuration");
    let config = parse_config(DEFAULT_CONFIG)?;
    Ok(config)
}

async fn fetch_config_text() -> anyhow::Result<String> {
    let response = Request::get(CONFIG_URL).send().await?;
    if !response.ok() {
        anyhow::bail!("HTTP {}", response.status());
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.port, 8080);
        assert!(config.api.origin.is_empty());
        assert_eq!(config.notifications.toast_timeout_ms, 3000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("[api]\norigin = \"https://farm.example.com\"\n").unwrap();
        assert_eq!(config.api.origin, "https://farm.example.com");
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.notifications.toast_timeout_ms, 3000);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(parse_config("[api]\nport = \"eighty\"\n").is_err());
    }
}

// src/config.rs
use std::env;

use log::warn;
use thiserror::Error;
use url::Url;

const DEFAULT_PORT: u16 = 3030;
const DEFAULT_ORIGINS: &str = "http://localhost:3000,https://graham-frontend.vercel.app";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a number, got {0:?}")]
    InvalidPort(String),

    #[error("Allowed origin {0:?} must be an http(s) scheme and host with no path")]
    InvalidOrigin(String),

    #[error("ALLOWED_ORIGINS contains no origins")]
    NoOrigins,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Reads `PORT` and `ALLOWED_ORIGINS`; call `dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT").ok();
        let origins = env::var("ALLOWED_ORIGINS").ok();
        Self::from_values(port.as_deref(), origins.as_deref())
    }

    pub fn from_values(port: Option<&str>, origins: Option<&str>) -> Result<Self, ConfigError> {
        let port = match port {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let allowed_origins = parse_origins(origins.unwrap_or(DEFAULT_ORIGINS))?;
        Ok(Config {
            port,
            allowed_origins,
        })
    }
}

/// `https://Example.com:8443` -> `https://example.com:8443`; CORS origins carry no path.
fn parse_origin(raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidOrigin(raw.to_string());
    let url = Url::parse(raw).map_err(|_| invalid())?;

    let bare = matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && url.username().is_empty()
        && url.password().is_none();
    if !bare {
        return Err(invalid());
    }
    Ok(url.origin().ascii_serialization())
}

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(parse_origin)
        .collect::<Result<_, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::NoOrigins);
    }
    Ok(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_values(None, None).unwrap();
        assert_eq!(config.port, 3030);
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "https://graham-frontend.vercel.app"]
        );
    }

    #[test]
    fn test_custom_values() {
        let config = Config::from_values(Some("8080"), Some(" https://a.example/ , ,http://b.example")).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.allowed_origins, vec!["https://a.example", "http://b.example"]);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::from_values(Some("http"), None).unwrap_err(),
            ConfigError::InvalidPort("http".to_string())
        );
        assert_eq!(
            Config::from_values(None, Some("example.com")).unwrap_err(),
            ConfigError::InvalidOrigin("example.com".to_string())
        );
        assert_eq!(Config::from_values(None, Some(" , ")).unwrap_err(), ConfigError::NoOrigins);
    }

    #[test]
    fn test_origins_must_be_bare_scheme_and_host() {
        for bad in [
            "https://app.example/dashboard",
            "https://app.example?x=1",
            "https://user@app.example",
            "ftp://app.example",
            "https://app.example#top",
        ] {
            assert_eq!(
                Config::from_values(None, Some(bad)).unwrap_err(),
                ConfigError::InvalidOrigin(bad.to_string()),
                "{}",
                bad
            );
        }

        let config = Config::from_values(None, Some("https://App.Example:8443,http://localhost:3000")).unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["https://app.example:8443", "http://localhost:3000"]
        );
    }
}

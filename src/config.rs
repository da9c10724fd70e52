use std::path::PathBuf;

use tracing::warn;

use crate::errors::AppError;

const DEFAULT_PORT: u16 = 8080;

/// Server settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Where chat payloads are forwarded.
    pub webhook_url: String,
    pub port: u16,
    /// Built widget bundle to serve at `/`, if any.
    pub widget_dist_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let webhook_url = get("WEBHOOK_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::MissingConfig { name: "WEBHOOK_URL".to_string() })?;
        reqwest::Url::parse(&webhook_url).map_err(|_| AppError::InvalidConfig {
            name: "WEBHOOK_URL".to_string(),
            value: webhook_url.clone(),
        })?;

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid PORT '{raw}', using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let widget_dist_dir = get("WIDGET_DIST_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { webhook_url, port, widget_dist_dir })
    }
}

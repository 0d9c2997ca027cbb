//! Server configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_THEME: &str = "#6366f1";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    Port(String),
    #[error("LAYOUT_DEFAULT_THEME must be a #rgb or #rrggbb color, got {0:?}")]
    Theme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Theme for new drafts and for AI replies that omit one.
    pub default_theme: String,
}

impl AppConfig {
    /// Build server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `LAYOUT_DEFAULT_THEME`: hex color, default `#6366f1`
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number or the theme is
    /// not a hex color.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Port(raw))?,
            Err(_) => DEFAULT_PORT,
        };
        let default_theme = std::env::var("LAYOUT_DEFAULT_THEME").unwrap_or_else(|_| DEFAULT_THEME.to_string());
        if !is_hex_color(&default_theme) {
            return Err(ConfigError::Theme(default_theme));
        }
        Ok(Self { port, default_theme })
    }
}

/// `#rgb` or `#rrggbb`.
#[must_use]
pub fn is_hex_color(raw: &str) -> bool {
    raw.strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

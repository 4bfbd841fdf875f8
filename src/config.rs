//! Site configuration embedded at compile time from `config/site.toml`.

use log::warn;
use serde::Deserialize;
use thiserror::Error;

const SITE_CONFIG: &str = include_str!("../config/site.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
    pub theme: ThemeConfig,
    pub widgets: Vec<WidgetCard>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Newsdesk".to_string(),
            tagline: String::new(),
            theme: ThemeConfig::default(),
            widgets: Vec::new(),
        }
    }
}

/// Names shared with stylesheets and scripts outside the app.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// `localStorage` key holding `"light"` or `"dark"`.
    pub storage_key: String,
    /// Class present on `<html>` while dark.
    pub dark_class: String,
    /// Attribute on `<html>` mirroring the theme name.
    pub attribute: String,
    /// Name of the `CustomEvent` dispatched on `window` after each toggle.
    pub event_name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            dark_class: "dark".to_string(),
            attribute: "data-theme".to_string(),
            event_name: "themechange".to_string(),
        }
    }
}

/// A card on the home page linking to one widget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WidgetCard {
    pub title: String,
    pub description: String,
    pub href: String,
    #[serde(default = "default_action")]
    pub action: String,
}

fn default_action() -> String {
    "Open".to_string()
}

pub fn parse(source: &str) -> Result<SiteConfig, ConfigError> {
    Ok(toml::from_str(source)?)
}

/// Load the embedded config, falling back to defaults if it does not parse.
pub fn load() -> SiteConfig {
    parse(SITE_CONFIG).unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        SiteConfig::default()
    })
}

//! Site configuration module.
//!
//! Handles loading, validating, and merging the site's `config.toml`. The file
//! lives in the content root and is optional: stock defaults are used for any
//! key it leaves out.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! name = "My Site"                  # Shown in the nav bar and page titles
//! url = "http://localhost:3000"     # Canonical site URL (fallback base origin)
//! og_image = "/og.jpg"              # Open Graph image, absolute or site-relative
//! description = ""                  # Default meta description
//!
//! [links]
//! github = ""                       # Footer / rel="me" link; empty disables it
//! ```
//!
//! The resolved [`SiteConfig`] is an immutable value. It is handed to every
//! renderer explicitly; nothing reads it from global state.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::urls;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name, rendered in the nav bar and appended to page titles.
    pub name: String,
    /// Canonical URL of the deployed site.
    pub url: String,
    /// Open Graph preview image. Site-relative paths are made absolute.
    pub og_image: String,
    /// Default description for meta tags.
    pub description: String,
    /// Social links.
    pub links: Links,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "My Site".to_string(),
            url: "http://localhost:3000".to_string(),
            og_image: "/og.jpg".to_string(),
            description: String::new(),
            links: Links::default(),
        }
    }
}

/// Social links shown in the footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Links {
    /// GitHub profile or organisation URL. Empty disables the link.
    pub github: String,
}

impl SiteConfig {
    /// Validate config values. Called once at start; a config that passes is
    /// never re-checked at render time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation("name must not be empty".into()));
        }
        if !urls::is_absolute_http_url(&self.url) {
            return Err(ConfigError::Validation(format!(
                "url must be an absolute http(s) URL, got {:?}",
                self.url
            )));
        }
        if !urls::is_absolute_http_url(&self.og_image) && !urls::is_site_path(&self.og_image) {
            return Err(ConfigError::Validation(format!(
                "og_image must be an absolute http(s) URL or a path starting with '/', got {:?}",
                self.og_image
            )));
        }
        if !self.links.github.is_empty() && !urls::is_absolute_http_url(&self.links.github) {
            return Err(ConfigError::Validation(format!(
                "links.github must be an absolute http(s) URL, got {:?}",
                self.links.github
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Configuration
# ==================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Site name. Rendered in the navigation bar and appended to page titles.
name = "My Site"

# Canonical URL of the deployed site. Also the base origin for absolute
# links when the SITE_APP_URL environment variable is not set.
url = "http://localhost:3000"

# Open Graph preview image. Site-relative paths are prefixed with the base origin.
og_image = "/og.jpg"

# Default meta description.
description = ""

# ---------------------------------------------------------------------------
# Social links
# ---------------------------------------------------------------------------
[links]
# GitHub URL shown in the footer. Leave empty to hide it.
github = ""
"##
}

//! Base origin handling and absolute URL construction.
//!
//! The base origin comes from the `SITE_APP_URL` environment variable, falling
//! back to the configured site `url`. It is validated once, when the site is
//! assembled, so a malformed value stops the build instead of leaking into
//! rendered pages.
//!
//! [`absolute_url`] itself performs no normalization: the origin and path are
//! concatenated as-is. An origin with a trailing slash combined with a path
//! with a leading slash produces `//`.

use crate::config::SiteConfig;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Environment variable holding the deployed base origin.
pub const APP_URL_ENV: &str = "SITE_APP_URL";

#[derive(Error, Debug, PartialEq)]
pub enum UrlError {
    #[error("malformed base origin {0:?}: expected an absolute http(s) URL")]
    Malformed(String),
}

/// A validated absolute origin such as `https://example.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseOrigin(String);

impl BaseOrigin {
    /// Validate and wrap an origin. The string is stored verbatim.
    pub fn parse(value: &str) -> Result<Self, UrlError> {
        if is_absolute_http_url(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(UrlError::Malformed(value.to_string()))
        }
    }

    /// Pick the environment value when present and non-empty, else `config.url`.
    pub fn resolve(env_value: Option<String>, config: &SiteConfig) -> Result<Self, UrlError> {
        match env_value {
            Some(v) if !v.trim().is_empty() => Self::parse(&v),
            _ => Self::parse(&config.url),
        }
    }

    /// Resolve from the process environment.
    pub fn from_env(config: &SiteConfig) -> Result<Self, UrlError> {
        Self::resolve(std::env::var(APP_URL_ENV).ok(), config)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `origin + path`, unnormalized.
    pub fn absolute(&self, path: &str) -> String {
        absolute_url(&self.0, path)
    }

    /// Leave absolute URLs untouched; prefix anything else with the origin.
    /// Expects a validated value: absolute, or a site path (`/og.jpg`).
    pub fn absolutize(&self, url: &str) -> String {
        if is_absolute_http_url(url) {
            url.to_string()
        } else {
            self.absolute(url)
        }
    }
}

impl fmt::Display for BaseOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Concatenate a base origin and a path.
pub fn absolute_url(origin: &str, path: &str) -> String {
    format!("{origin}{path}")
}

/// Parse `value` as an absolute `http`/`https` URL with a host.
///
/// Stricter than [`Url::parse`] alone, because callers keep the original text
/// and concatenate onto it: whitespace is rejected rather than stripped, and
/// the authority must follow `scheme://` directly (`http:host` and
/// `https:///host` parse leniently but would render wrong).
pub fn parse_http_url(value: &str) -> Option<Url> {
    if value.chars().any(char::is_whitespace) {
        return None;
    }
    let url = Url::parse(value).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let authority = value.get(url.scheme().len()..)?.strip_prefix("://")?;
    if authority.starts_with('/') {
        return None;
    }
    if url.host_str().is_none_or(str::is_empty) {
        return None;
    }
    Some(url)
}

/// True when [`parse_http_url`] accepts `value`.
pub fn is_absolute_http_url(value: &str) -> bool {
    parse_http_url(value).is_some()
}

/// True for a path rooted at the site origin: `/og.jpg`, but not `og.jpg` or
/// the protocol-relative `//cdn.example.com/og.jpg`.
pub fn is_site_path(value: &str) -> bool {
    value.starts_with('/') && !value.starts_with("//") && !value.chars().any(char::is_whitespace)
}

//! Page metadata: `<title>`, description, canonical URL, Open Graph and
//! Twitter card tags.
//!
//! Site-level defaults come from [`SiteConfig`]; each page contributes its
//! own title, description and path through [`PageMeta`]. All URLs emitted
//! here are absolute, built from the validated [`BaseOrigin`].

use maud::{Markup, html};

use crate::config::SiteConfig;
use crate::urls::BaseOrigin;

/// Per-page metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    /// Page title; `None` uses the bare site name.
    pub title: Option<String>,
    /// Page description; `None` falls back to the site description.
    pub description: Option<String>,
    /// Route path, e.g. `/blog/hello`.
    pub path: String,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
            path: path.into(),
        }
    }

    /// Full document title: `"<page> | <site>"`, or the site name alone.
    pub fn document_title(&self, config: &SiteConfig) -> String {
        match &self.title {
            Some(title) if title != &config.name => format!("{title} | {}", config.name),
            _ => config.name.clone(),
        }
    }

    fn description<'a>(&'a self, config: &'a SiteConfig) -> &'a str {
        self.description
            .as_deref()
            .unwrap_or(config.description.as_str())
    }
}

/// Render the metadata tags for a page's `<head>`.
pub fn render_head_meta(config: &SiteConfig, origin: &BaseOrigin, meta: &PageMeta) -> Markup {
    let title = meta.document_title(config);
    let description = meta.description(config);
    let canonical = origin.absolute(&meta.path);
    let og_image = origin.absolutize(&config.og_image);

    html! {
        title { (title) }
        @if !description.is_empty() {
            meta name="description" content=(description);
        }
        link rel="canonical" href=(canonical);
        meta property="og:type" content="website";
        meta property="og:site_name" content=(config.name);
        meta property="og:title" content=(title);
        @if !description.is_empty() {
            meta property="og:description" content=(description);
        }
        meta property="og:url" content=(canonical);
        meta property="og:image" content=(og_image);
        meta name="twitter:card" content="summary_large_image";
        meta name="twitter:title" content=(title);
        meta name="twitter:image" content=(og_image);
        @if !config.links.github.is_empty() {
            link rel="me" href=(config.links.github);
        }
    }
}

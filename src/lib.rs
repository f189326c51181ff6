//! # Siteshell
//!
//! The page shell of a small marketing website: site configuration, a
//! navigation bar with active-link highlighting, font registration, a
//! not-found view, and the formatting helpers every page leans on. Pages are
//! rendered to HTML with Maud, either one request at a time or exported as a
//! static site.
//!
//! # Architecture: Scan, Then Render
//!
//! ```text
//! 1. Scan      content/  →  Content        (config.toml + markdown → data)
//! 2. Resolve   env/config → BaseOrigin     (SITE_APP_URL, else config url)
//! 3. Render    Site      →  HTML           (per request, or all routes → dist/)
//! ```
//!
//! Everything the renderer needs is gathered into an immutable
//! [`generate::Site`] at startup. Validation happens there, so a bad config,
//! a malformed origin, or a broken font asset stops the process before the
//! first page is produced.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`urls`] | Base origin resolution and `absolute_url` |
//! | [`classes`] | `cn!` / [`classes::merge_class_names`]: conflict-aware class merging |
//! | [`dates`] | `format_date`: long US-style dates with an `Invalid Date` sentinel |
//! | [`fonts`] | Sans (remote variable) and heading (bundled) font registration |
//! | [`nav`] | Navigation links, exact/prefix active matching, nav bar markup |
//! | [`not_found`] | The 404 view |
//! | [`metadata`] | `<head>` title, canonical, Open Graph and Twitter tags |
//! | [`naming`] | `YYYY-MM-DD-slug` post file name parser |
//! | [`scan`] | Walks the content directory into [`types::Content`] |
//! | [`generate`] | Page shell, routing, and static export |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No Global Configuration
//!
//! Components receive the [`config::SiteConfig`] they need as an argument.
//! Nothing reads configuration from a global, which keeps every renderer a
//! plain function of its inputs and trivially testable.
//!
//! ## Class Merging Without a CSS Framework
//!
//! Nav links combine a base class list with a state-dependent one. The
//! [`cn!`] macro resolves conflicts between utilities of the same group so
//! the later class wins, the same way a hand-edited class attribute would be
//! expected to read.

pub mod classes;
pub mod config;
pub mod dates;
pub mod fonts;
pub mod generate;
pub mod metadata;
pub mod naming;
pub mod nav;
pub mod not_found;
pub mod output;
pub mod scan;
pub mod types;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;

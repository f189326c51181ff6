//! Top navigation bar.
//!
//! The bar has no state of its own: which link is highlighted is a pure
//! function of the current route, computed by [`is_active`]. A route of
//! `None` (prerendering a page with no known path, the 404 fallback) leaves
//! every link inactive.

use maud::{Markup, html};

use crate::cn;
use crate::config::SiteConfig;
use crate::fonts::Fonts;

/// How a link's path is compared with the current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Active only on exactly this path.
    Exact,
    /// Active on any path starting with this one (raw string prefix).
    Prefix,
}

/// Whether a link for `link_path` is active on `current`.
pub fn is_active(current: Option<&str>, link_path: &str, mode: MatchMode) -> bool {
    match (current, mode) {
        (None, _) => false,
        (Some(path), MatchMode::Exact) => path == link_path,
        (Some(path), MatchMode::Prefix) => path.starts_with(link_path),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub title: &'static str,
    pub href: &'static str,
    pub mode: MatchMode,
}

impl NavLink {
    pub fn is_active(&self, current: Option<&str>) -> bool {
        is_active(current, self.href, self.mode)
    }
}

/// Links rendered after the site name, in order.
pub const SITE_LINKS: [NavLink; 3] = [
    NavLink {
        title: "Projects",
        href: "/projects",
        mode: MatchMode::Exact,
    },
    NavLink {
        title: "Organisation",
        href: "/org",
        mode: MatchMode::Prefix,
    },
    NavLink {
        title: "Blog",
        href: "/blog",
        mode: MatchMode::Prefix,
    },
];

/// Class list for a nav link in the given state.
pub fn link_class(active: bool) -> String {
    cn!(
        "transition-colors hover:text-foreground/80",
        if active {
            "text-foreground"
        } else {
            "text-foreground/60"
        }
    )
}

/// Render the navigation bar for `current`.
pub fn render_nav(config: &SiteConfig, fonts: &Fonts, current: Option<&str>) -> Markup {
    let brand_class = cn!("font-bold", fonts.heading.class_name());
    html! {
        nav class="main-nav flex items-center" {
            a class="mr-6 flex items-center space-x-2" href="/" {
                span class=(brand_class) { (config.name) }
            }
            div class="flex items-center gap-6 text-sm" {
                @for link in &SITE_LINKS {
                    @let active = link.is_active(current);
                    a href=(link.href)
                        class=(link_class(active))
                        aria-current=[active.then_some("page")] {
                        (link.title)
                    }
                }
            }
        }
    }
}

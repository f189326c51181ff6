//! HTML page rendering and static export.
//!
//! A [`Site`] bundles everything a render needs: the immutable [`SiteConfig`]
//! (inside [`Content`]), the validated [`BaseOrigin`], and the registered
//! [`Fonts`]. It is built once at startup and never mutated, so a `&Site` can
//! serve any number of renders, concurrently or not.
//!
//! ## Routes
//!
//! | Path | Page |
//! |------|------|
//! | `/` | Home: site description and `index.md` intro |
//! | `/projects` | `projects.md` |
//! | `/org` | `org.md` |
//! | `/blog` | Post list with formatted dates |
//! | `/blog/<slug>` | A single post |
//! | anything else | Not-found view |
//!
//! Route lookup ignores a query string, a fragment, and a trailing slash. The
//! navigation bar, by contrast, sees the raw path.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── projects/index.html
//! ├── org/index.html
//! ├── blog/
//! │   ├── index.html
//! │   └── hello-world/index.html
//! └── fonts/
//!     └── OpenSans-Regular.<hash>.woff2
//! ```
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and inlined into every page
//! together with the font CSS.

use crate::config::SiteConfig;
use crate::dates::format_date;
use crate::fonts::{FontSource, Fonts};
use crate::metadata::{PageMeta, render_head_meta};
use crate::nav::render_nav;
use crate::not_found::{NOT_FOUND_CODE, NOT_FOUND_MESSAGE, render_not_found};
use crate::types::{Content, Page, Post};
use crate::urls::BaseOrigin;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Whether a render matched a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Found,
    NotFound,
}

/// Result of rendering one route.
#[derive(Debug)]
pub struct RenderedPage {
    pub status: RouteStatus,
    pub markup: Markup,
}

impl RenderedPage {
    pub fn into_string(self) -> String {
        self.markup.into_string()
    }
}

/// A resolved route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Home,
    Projects,
    Org,
    Blog,
    Post(&'a str),
}

impl Route<'_> {
    /// Output file for this route, relative to the output directory.
    pub fn output_file(&self) -> PathBuf {
        match self {
            Route::Home => PathBuf::from("index.html"),
            Route::Projects => PathBuf::from("projects/index.html"),
            Route::Org => PathBuf::from("org/index.html"),
            Route::Blog => PathBuf::from("blog/index.html"),
            Route::Post(slug) => Path::new("blog").join(slug).join("index.html"),
        }
    }
}

/// Strip query, fragment and trailing slash from a request path.
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.trim_end_matches('/') {
        "" if path.starts_with('/') => "/",
        trimmed => trimmed,
    }
}

/// Everything needed to render pages, assembled once.
#[derive(Debug)]
pub struct Site {
    content: Content,
    origin: BaseOrigin,
    fonts: Fonts,
    css: String,
}

impl Site {
    pub fn new(content: Content, origin: BaseOrigin, fonts: Fonts) -> Self {
        let css = format!("{}\n{}", fonts.css(), CSS_STATIC);
        Self {
            content,
            origin,
            fonts,
            css,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.content.config
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn origin(&self) -> &BaseOrigin {
        &self.origin
    }

    pub fn fonts(&self) -> &Fonts {
        &self.fonts
    }

    /// Resolve a request path to a route, if any.
    pub fn resolve<'a>(&'a self, path: &str) -> Option<Route<'a>> {
        match normalize_path(path) {
            "/" => Some(Route::Home),
            "/projects" => Some(Route::Projects),
            "/org" => Some(Route::Org),
            "/blog" => Some(Route::Blog),
            other => {
                let slug = other.strip_prefix("/blog/")?;
                self.content
                    .find_post(slug)
                    .map(|post| Route::Post(post.slug.as_str()))
            }
        }
    }

    /// All routes that [`generate`] writes, in output order.
    pub fn routes(&self) -> Vec<Route<'_>> {
        let mut routes = vec![Route::Home, Route::Projects, Route::Org, Route::Blog];
        routes.extend(self.content.posts.iter().map(|p| Route::Post(p.slug.as_str())));
        routes
    }

    /// Render the page for `path`. `None` (no known route) renders the
    /// not-found page with every nav link inactive.
    pub fn page(&self, path: Option<&str>) -> RenderedPage {
        match path.and_then(|p| self.resolve(p)) {
            Some(route) => RenderedPage {
                status: RouteStatus::Found,
                markup: self.render_route(route, path),
            },
            None => RenderedPage {
                status: RouteStatus::NotFound,
                markup: self.render_not_found_page(),
            },
        }
    }

    /// Render a resolved route. `current` is what the nav bar highlights.
    pub fn render_route(&self, route: Route<'_>, current: Option<&str>) -> Markup {
        match route {
            Route::Home => self.render_home(current),
            Route::Projects => self.render_section(
                self.content.projects.as_ref(),
                "Projects",
                "/projects",
                current,
            ),
            Route::Org => {
                self.render_section(self.content.org.as_ref(), "Organisation", "/org", current)
            }
            Route::Blog => self.render_blog_index(current),
            Route::Post(slug) => match self.content.find_post(slug) {
                Some(post) => self.render_post(post, current),
                None => self.render_not_found_page(),
            },
        }
    }

    // ========================================================================
    // Shell
    // ========================================================================

    /// Renders the base HTML document around `content`.
    fn base_document(&self, meta: &PageMeta, current: Option<&str>, content: Markup) -> Markup {
        let config = self.config();
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    (render_head_meta(config, &self.origin, meta))
                    (self.fonts.head_links())
                    style { (PreEscaped(&self.css)) }
                }
                body class=(self.fonts.sans.class_name()) {
                    header class="site-header" {
                        (render_nav(config, &self.fonts, current))
                    }
                    (content)
                    (self.site_footer())
                }
            }
        }
    }

    fn site_footer(&self) -> Markup {
        let config = self.config();
        html! {
            footer class="site-footer text-sm text-foreground/60" {
                span { (config.name) }
                @if !config.links.github.is_empty() {
                    " · "
                    a href=(config.links.github) target="_blank" rel="noopener" { "GitHub" }
                }
            }
        }
    }

    // ========================================================================
    // Page renderers
    // ========================================================================

    fn render_home(&self, current: Option<&str>) -> Markup {
        let config = self.config();
        let meta = PageMeta {
            title: None,
            description: None,
            path: "/".to_string(),
        };
        let content = html! {
            main class="home-page" {
                section class="hero" {
                    h1 class=(self.fonts.heading.class_name()) { (config.name) }
                    @if !config.description.is_empty() {
                        p class="hero-description text-foreground/60" { (config.description) }
                    }
                }
                @if let Some(home) = &self.content.home {
                    article class="prose" { (markdown(&home.body)) }
                }
                @if let Some(post) = self.content.posts.first() {
                    section class="latest-post" {
                        h2 { "Latest from the blog" }
                        (post_summary(post))
                    }
                }
            }
        };
        self.base_document(&meta, current, content)
    }

    fn render_section(
        &self,
        page: Option<&Page>,
        title: &str,
        path: &str,
        current: Option<&str>,
    ) -> Markup {
        let heading = page.map_or(title, |p| p.title.as_str());
        let meta = PageMeta::new(heading, path);
        let content = html! {
            main class="section-page" {
                h1 class=(self.fonts.heading.class_name()) { (heading) }
                @if let Some(page) = page {
                    article class="prose" { (markdown(&strip_title(&page.body, &page.title))) }
                }
            }
        };
        self.base_document(&meta, current, content)
    }

    fn render_blog_index(&self, current: Option<&str>) -> Markup {
        let meta = PageMeta::new("Blog", "/blog");
        let content = html! {
            main class="blog-page" {
                h1 class=(self.fonts.heading.class_name()) { "Blog" }
                @if self.content.posts.is_empty() {
                    p class="text-foreground/60" { "No posts yet." }
                } @else {
                    ul class="post-list" {
                        @for post in &self.content.posts {
                            li { (post_summary(post)) }
                        }
                    }
                }
            }
        };
        self.base_document(&meta, current, content)
    }

    fn render_post(&self, post: &Post, current: Option<&str>) -> Markup {
        let meta = PageMeta::new(post.title.as_str(), post.path());
        let content = html! {
            main class="post-page" {
                article class="prose" {
                    h1 class=(self.fonts.heading.class_name()) { (post.title) }
                    @if let Some(date) = &post.date {
                        time class="post-date text-sm text-foreground/60" datetime=(date) {
                            (format_date(date.as_str()))
                        }
                    }
                    (markdown(&strip_title(&post.body, &post.title)))
                }
            }
        };
        self.base_document(&meta, current, content)
    }

    /// The fallback page never highlights a nav link.
    fn render_not_found_page(&self) -> Markup {
        let meta = PageMeta {
            title: Some(NOT_FOUND_CODE.to_string()),
            description: None,
            path: "/404".to_string(),
        };
        self.base_document(&meta, None, render_not_found())
    }
}

/// Title link, date and nothing else: used by the blog list and home page.
fn post_summary(post: &Post) -> Markup {
    html! {
        a class="post-link" href=(post.path()) { (post.title) }
        @if let Some(date) = &post.date {
            " "
            time class="post-date text-sm text-foreground/60" datetime=(date) {
                (format_date(date.as_str()))
            }
        }
    }
}

/// Drop the leading `# <title>` line that was already rendered as the page heading.
fn strip_title(body: &str, title: &str) -> String {
    let mut lines = body.lines().skip_while(|l| l.trim().is_empty()).peekable();
    let is_title = |line: &str| {
        line.trim()
            .strip_prefix("# ")
            .is_some_and(|heading| heading.trim() == title)
    };
    if lines.peek().is_some_and(|l| is_title(l)) {
        lines.next();
    }
    lines.collect::<Vec<_>>().join("\n")
}

fn markdown(body: &str) -> Markup {
    let parser = Parser::new(body);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

// ============================================================================
// Static export
// ============================================================================

/// One written page.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    /// Route path, e.g. `/blog/hello-world`.
    pub path: String,
    /// Output file relative to the output directory.
    pub file: PathBuf,
}

/// Summary of a static export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    pub not_found_file: PathBuf,
    pub assets: Vec<PathBuf>,
}

/// Render every route plus `404.html` into `output_dir`.
pub fn generate(site: &Site, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let mut report = GenerateReport::default();

    for route in site.routes() {
        let path = route_path(route);
        let file = route.output_file();
        let html = site.render_route(route, Some(path.as_str()));
        write_file(&output_dir.join(&file), html.into_string().as_bytes())?;
        report.pages.push(GeneratedPage { path, file });
    }

    let not_found = PathBuf::from("404.html");
    let html = site.page(None).into_string();
    write_file(&output_dir.join(&not_found), html.as_bytes())?;
    report.not_found_file = not_found;

    for font in site.fonts().iter() {
        if let (FontSource::Local { bytes, .. }, Some(asset)) = (font.source(), font.asset_path()) {
            write_file(&output_dir.join(&asset), bytes)?;
            report.assets.push(PathBuf::from(asset));
        }
    }

    Ok(report)
}

/// Canonical request path of a route.
pub fn route_path(route: Route<'_>) -> String {
    match route {
        Route::Home => "/".to_string(),
        Route::Projects => "/projects".to_string(),
        Route::Org => "/org".to_string(),
        Route::Blog => "/blog".to_string(),
        Route::Post(slug) => format!("/blog/{slug}"),
    }
}

fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

// ============================================================================
// Tests
// ============================================================================

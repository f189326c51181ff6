//! CLI output formatting for the scan, check, and build commands.
//!
//! Output is **information-centric**: each entity leads with its positional
//! index and title, with source files shown as indented context lines.
//!
//! # Output Format
//!
//! ## Scan / Check
//!
//! ```text
//! Site
//!     Name: Acme Labs
//!     Origin: https://acme.dev
//!
//! Pages
//! 001 Home
//!     Source: index.md
//! 002 Projects
//!     Source: projects.md
//!
//! Posts
//! 001 Shipping v2 (March 5, 2024)
//!     Source: blog/2024-03-05-shipping-v2.md
//! 002 release notes (undated)
//!     Source: blog/release-notes.md
//! ```
//!
//! ## Build
//!
//! ```text
//! / → index.html
//! /blog → blog/index.html
//! 404 → 404.html
//! Asset → fonts/OpenSans-Regular.1a2b3c4d.woff2
//!
//! Generated 7 pages, 1 asset
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::dates::{INVALID_DATE, format_date};
use crate::generate::{GenerateReport, Site};
use crate::types::{Content, Page};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Entity header: positional index + title, with optional detail in parens.
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

// ============================================================================
// Scan
// ============================================================================

/// Format the discovered content: pages and posts.
pub fn format_scan_output(content: &Content) -> Vec<String> {
    let mut lines = Vec::new();

    let pages: Vec<(&str, &Page)> = [
        ("Home", content.home.as_ref()),
        ("Projects", content.projects.as_ref()),
        ("Organisation", content.org.as_ref()),
    ]
    .into_iter()
    .filter_map(|(label, page)| page.map(|p| (label, p)))
    .collect();

    lines.push("Pages".to_string());
    if pages.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, (label, page)) in pages.iter().enumerate() {
        let detail = (page.title != *label).then_some(page.title.as_str());
        lines.push(entity_header(i + 1, label, detail));
        lines.push(format!("{}Source: {}", indent(1), page.source));
    }

    lines.push(String::new());
    lines.push("Posts".to_string());
    if content.posts.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, post) in content.posts.iter().enumerate() {
        let date = post
            .date
            .as_deref()
            .map_or_else(|| "undated".to_string(), |d| format_date(d));
        lines.push(entity_header(i + 1, &post.title, Some(&date)));
        lines.push(format!("{}Source: {}", indent(1), post.source));
    }

    lines
}

pub fn print_scan_output(content: &Content) {
    for line in format_scan_output(content) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Problems that don't stop a build but will show on the rendered site.
pub fn collect_warnings(content: &Content) -> Vec<String> {
    let mut warnings = Vec::new();
    for post in &content.posts {
        let Some(date) = &post.date else {
            continue;
        };
        if format_date(date.as_str()) == INVALID_DATE {
            warnings.push(format!(
                "{}: date {:?} is not a calendar date and will render as \"{}\"",
                post.source, date, INVALID_DATE
            ));
        }
    }
    if content.config.description.is_empty() {
        warnings.push("config: description is empty; pages will have no meta description".into());
    }
    warnings
}

/// Format the check result: resolved site settings, content, and warnings.
pub fn format_check_output(site: &Site) -> Vec<String> {
    let config = site.config();
    let mut lines = vec![
        "Site".to_string(),
        format!("{}Name: {}", indent(1), config.name),
        format!("{}Origin: {}", indent(1), site.origin()),
        format!(
            "{}Fonts: {}",
            indent(1),
            site.fonts()
                .iter()
                .map(|f| f.family())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        String::new(),
    ];
    lines.extend(format_scan_output(site.content()));

    let warnings = collect_warnings(site.content());
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        lines.extend(warnings.into_iter().map(|w| format!("{}{}", indent(1), w)));
    }
    lines
}

pub fn print_check_output(site: &Site) {
    for line in format_check_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the build result: route → file for every page, then assets.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .map(|page| format!("{} → {}", page.path, page.file.display()))
        .collect();
    lines.push(format!("404 → {}", report.not_found_file.display()));
    for asset in &report.assets {
        lines.push(format!("Asset → {}", asset.display()));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.pages.len(), "page", "pages"),
        plural(report.assets.len(), "asset", "assets"),
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

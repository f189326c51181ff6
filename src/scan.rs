//! Content directory scanning.
//!
//! Reads the content root into a [`Content`] value that the renderer
//! consumes. Everything except the directory itself is optional:
//!
//! ```text
//! content/
//! ├── config.toml                  # Site configuration (optional)
//! ├── index.md                     # Home page intro
//! ├── projects.md                  # Body of /projects
//! ├── org.md                       # Body of /org
//! └── blog/
//!     ├── 2023-11-14-hello-world.md   # Dated post → /blog/hello-world
//!     └── release-notes.md            # Undated post → /blog/release-notes
//! ```
//!
//! ## Titles
//!
//! A page or post takes its title from the first `# heading` in the file.
//! Without one, pages use their section name and posts their slug with
//! dashes turned into spaces.
//!
//! ## Ordering
//!
//! Posts are sorted newest first by their `YYYY-MM-DD` prefix. Undated posts
//! follow, sorted by slug.
//!
//! ## Validation
//!
//! - The content root must exist and be a directory
//! - Two posts may not share a slug (`2023-01-01-x.md` and `x.md` collide)

use crate::config::{self, SiteConfig};
use crate::naming::parse_post_name;
use crate::types::{Content, Page, Post};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content directory not found: {0}")]
    MissingContent(PathBuf),
    #[error("Duplicate post slug {0:?} in {1} and {2}")]
    DuplicateSlug(String, String, String),
}

/// Scan a content root.
pub fn scan(root: &Path) -> Result<Content, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingContent(root.to_path_buf()));
    }
    let config = config::load_config(root)?;
    scan_with_config(root, config)
}

/// Scan a content root using an already-resolved config.
pub fn scan_with_config(root: &Path, config: SiteConfig) -> Result<Content, ScanError> {
    let home = read_page(root, "index.md", &config.name)?;
    let projects = read_page(root, "projects.md", "Projects")?;
    let org = read_page(root, "org.md", "Organisation")?;
    let posts = scan_posts(root)?;

    Ok(Content {
        config,
        home,
        projects,
        org,
        posts,
    })
}

fn read_page(root: &Path, file: &str, fallback_title: &str) -> Result<Option<Page>, ScanError> {
    let path = root.join(file);
    if !path.is_file() {
        return Ok(None);
    }
    let body = fs::read_to_string(&path)?;
    let title = extract_title(&body).unwrap_or_else(|| fallback_title.to_string());
    Ok(Some(Page {
        title,
        body,
        source: file.to_string(),
    }))
}

fn scan_posts(root: &Path) -> Result<Vec<Post>, ScanError> {
    let blog_dir = root.join("blog");
    if !blog_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut posts: Vec<Post> = Vec::new();
    for entry in WalkDir::new(&blog_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|e| e != "md") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let parsed = parse_post_name(stem);
        let source = format!("blog/{}", entry.file_name().to_string_lossy());

        if let Some(existing) = posts.iter().find(|p| p.slug == parsed.slug) {
            return Err(ScanError::DuplicateSlug(
                parsed.slug,
                existing.source.clone(),
                source,
            ));
        }

        let body = fs::read_to_string(path)?;
        let title = extract_title(&body).unwrap_or(parsed.display_title);
        posts.push(Post {
            slug: parsed.slug,
            title,
            date: parsed.date,
            body,
            source,
        });
    }

    posts.sort_by(compare_posts);
    Ok(posts)
}

/// Newest first; undated after dated; ties broken by slug.
fn compare_posts(a: &Post, b: &Post) -> Ordering {
    match (&a.date, &b.date) {
        (Some(da), Some(db)) => db.cmp(da).then_with(|| a.slug.cmp(&b.slug)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.slug.cmp(&b.slug),
    }
}

/// Text of the first level-one `# heading`, if any.
fn extract_title(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(matches!(scan(&missing), Err(ScanError::MissingContent(_))));
    }

    #[test]
    fn empty_root_scans_to_empty_content() {
        let tmp = TempDir::new().unwrap();
        let content = scan(tmp.path()).unwrap();
        assert!(content.home.is_none());
        assert!(content.projects.is_none());
        assert!(content.org.is_none());
        assert!(content.posts.is_empty());
        assert_eq!(content.config, SiteConfig::default());
    }

    #[test]
    fn fixtures_load_config_and_pages() {
        let tmp = setup_fixtures();
        let content = scan(tmp.path()).unwrap();
        assert_eq!(content.config.name, "Acme Labs");
        assert_eq!(content.home.as_ref().unwrap().title, "Build with Acme");
        assert_eq!(content.projects.as_ref().unwrap().title, "Projects");
        assert_eq!(content.org.as_ref().unwrap().source, "org.md");
    }

    #[test]
    fn posts_sorted_newest_first_then_undated() {
        let tmp = setup_fixtures();
        let content = scan(tmp.path()).unwrap();
        assert_eq!(
            post_slugs(&content),
            ["shipping-v2", "hello-world", "release-notes"]
        );
    }

    #[test]
    fn post_title_from_heading_or_slug() {
        let tmp = setup_fixtures();
        let content = scan(tmp.path()).unwrap();
        assert_eq!(find_post(&content, "hello-world").title, "Hello, World");
        assert_eq!(find_post(&content, "release-notes").title, "release notes");
    }

    #[test]
    fn post_date_kept_raw() {
        let tmp = setup_fixtures();
        let content = scan(tmp.path()).unwrap();
        let post = find_post(&content, "hello-world");
        assert_eq!(post.date.as_deref(), Some("2023-11-14"));
        assert_eq!(post.source, "blog/2023-11-14-hello-world.md");
        assert_eq!(find_post(&content, "release-notes").date, None);
    }

    #[test]
    fn non_markdown_files_in_blog_are_ignored() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("blog/notes.txt"), "scratch").unwrap();
        let content = scan(tmp.path()).unwrap();
        assert_eq!(content.posts.len(), 3);
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("blog/hello-world.md"), "# Again").unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::DuplicateSlug(slug, _, _)) if slug == "hello-world"
        ));
    }

    #[test]
    fn invalid_config_fails_scan() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("config.toml"), r#"url = "acme.dev""#).unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Config(_))));
    }

    #[test]
    fn extract_title_finds_first_h1() {
        assert_eq!(
            extract_title("intro\n\n# Title Here\n\n# Second"),
            Some("Title Here".to_string())
        );
        assert_eq!(extract_title("## Not h1\ntext"), None);
        assert_eq!(extract_title("#   \n"), None);
    }
}

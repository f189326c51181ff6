//! Shared test utilities for the siteshell test suite.
//!
//! Provides fixture setup, content lookups, and a ready-made [`Site`] so
//! renderer tests don't each rebuild the config/origin/fonts stack.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let content = scan(tmp.path()).unwrap();
//! let post = find_post(&content, "hello-world");
//! assert_eq!(post.title, "Hello, World");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::fonts::Fonts;
use crate::generate::Site;
use crate::scan::scan;
use crate::types::{Content, Post};
use crate::urls::BaseOrigin;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Scan the fixtures into a [`Site`] with origin `https://example.com`.
pub fn fixture_site() -> Site {
    let tmp = setup_fixtures();
    let content = scan(tmp.path()).unwrap();
    site_from(content)
}

/// Build a [`Site`] around arbitrary content with origin `https://example.com`.
pub fn site_from(content: Content) -> Site {
    Site::new(
        content,
        BaseOrigin::parse("https://example.com").unwrap(),
        Fonts::register().unwrap(),
    )
}

// =========================================================================
// Content lookups: panic with a clear message on miss
// =========================================================================

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(content: &'a Content, slug: &str) -> &'a Post {
    content.find_post(slug).unwrap_or_else(|| {
        let slugs = post_slugs(content);
        panic!("post '{slug}' not found. Available: {slugs:?}")
    })
}

/// All post slugs in order.
pub fn post_slugs(content: &Content) -> Vec<&str> {
    content.posts.iter().map(|p| p.slug.as_str()).collect()
}

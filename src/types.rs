//! Content types shared by the scan and generate stages.
//!
//! These are serialized to JSON by the `scan` command, so the field names are
//! part of the manifest format.

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

/// Everything the renderer needs from the content directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    pub config: SiteConfig,
    /// Intro shown on the home page (`index.md`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<Page>,
    /// Body of `/projects` (`projects.md`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Page>,
    /// Body of `/org` (`org.md`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<Page>,
    /// Blog posts, newest first; undated posts last.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<Post>,
}

impl Content {
    /// Content with no markdown files, only configuration.
    pub fn empty(config: SiteConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn find_post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }
}

/// A markdown page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Title from the first `# heading`, or the fallback for the file.
    pub title: String,
    /// Raw markdown body.
    pub body: String,
    /// Path of the source file relative to the content root.
    pub source: String,
}

/// A blog post from `blog/YYYY-MM-DD-slug.md`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// URL slug (file stem without the date prefix).
    pub slug: String,
    /// Title from the first `# heading`, or the slug with dashes as spaces.
    pub title: String,
    /// Raw `YYYY-MM-DD` date from the file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Raw markdown body.
    pub body: String,
    /// Path of the source file relative to the content root.
    pub source: String,
}

impl Post {
    /// Route path of this post.
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

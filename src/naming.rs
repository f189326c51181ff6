//! Filename parsing for blog posts.
//!
//! Posts live in `content/blog/` and are named `YYYY-MM-DD-slug.md`. The date
//! prefix is optional; a file without one is an undated post.
//!
//! ## Display Titles
//!
//! Dashes in the slug are converted to spaces for display, used when the post
//! body has no `# heading`:
//! - `2023-11-14-hello-world` → "hello world"
//! - `release-notes` → "release notes"

/// Result of parsing a post file stem like `2023-11-14-hello-world`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPostName {
    /// Raw `YYYY-MM-DD` prefix, if present. Shape-checked only; the calendar
    /// validity is decided when the date is formatted.
    pub date: Option<String>,
    /// URL slug: the stem without the date prefix.
    pub slug: String,
    /// Display title: slug with dashes converted to spaces.
    pub display_title: String,
}

/// Parse a post file stem.
///
/// - `"2023-11-14-hello-world"` → date=Some("2023-11-14"), slug="hello-world"
/// - `"2023-11-14"` → date=Some("2023-11-14"), slug="2023-11-14"
/// - `"hello-world"` → date=None, slug="hello-world"
/// - `"2023-1-4-short"` → date=None (prefix not `YYYY-MM-DD`)
pub fn parse_post_name(stem: &str) -> ParsedPostName {
    if stem.len() >= 10 && stem.is_char_boundary(10) && looks_like_date(&stem[..10]) {
        let date = stem[..10].to_string();
        let rest = &stem[10..];
        if let Some(slug) = rest.strip_prefix('-').filter(|s| !s.is_empty()) {
            return ParsedPostName {
                date: Some(date),
                slug: slug.to_string(),
                display_title: slug.replace('-', " "),
            };
        }
        if rest.is_empty() {
            return ParsedPostName {
                slug: date.clone(),
                display_title: date.clone(),
                date: Some(date),
            };
        }
    }
    ParsedPostName {
        date: None,
        slug: stem.to_string(),
        display_title: stem.replace('-', " "),
    }
}

fn looks_like_date(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dated_post_with_multi_word_slug() {
        let p = parse_post_name("2023-11-14-hello-world");
        assert_eq!(p.date.as_deref(), Some("2023-11-14"));
        assert_eq!(p.slug, "hello-world");
        assert_eq!(p.display_title, "hello world");
    }

    #[test]
    fn date_only_stem_uses_date_as_slug() {
        let p = parse_post_name("2023-11-14");
        assert_eq!(p.date.as_deref(), Some("2023-11-14"));
        assert_eq!(p.slug, "2023-11-14");
    }

    #[test]
    fn trailing_dash_after_date_is_undated() {
        let p = parse_post_name("2023-11-14-");
        assert_eq!(p.date, None);
        assert_eq!(p.slug, "2023-11-14-");
    }

    #[test]
    fn undated_post() {
        let p = parse_post_name("release-notes");
        assert_eq!(p.date, None);
        assert_eq!(p.slug, "release-notes");
        assert_eq!(p.display_title, "release notes");
    }

    #[test]
    fn short_date_prefix_is_not_a_date() {
        let p = parse_post_name("2023-1-4-short");
        assert_eq!(p.date, None);
        assert_eq!(p.slug, "2023-1-4-short");
    }

    #[test]
    fn impossible_calendar_date_keeps_shape() {
        // Shape matches; the formatter reports it as invalid later.
        let p = parse_post_name("2023-13-45-oops");
        assert_eq!(p.date.as_deref(), Some("2023-13-45"));
        assert_eq!(p.slug, "oops");
    }

    #[test]
    fn non_ascii_stem_does_not_panic() {
        let p = parse_post_name("日本語の記事-notes");
        assert_eq!(p.date, None);
    }
}

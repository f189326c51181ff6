//! Font registration.
//!
//! Two typefaces are registered once at startup:
//!
//! - **Inter**: a remote variable font (weights 100–900) served from Google
//!   Fonts, exposed as `--font-sans` / `.font-sans`.
//! - **Open Sans Regular**: a static WOFF2 font bundled with the binary from
//!   `assets/fonts/` (weight 400), exposed as `--font-heading` /
//!   `.font-heading`.
//!
//! The bundled file is embedded with `include_bytes!`, and `build.rs` checks
//! it exists, so a missing asset fails the build. [`Fonts::register`] then
//! checks the WOFF2 header (signature, table count, declared length), so a
//! truncated or mislabelled file fails at start instead of producing pages
//! that silently fall back to a system font.
//!
//! Renderers never touch font files directly. They receive a [`FontHandle`]
//! and apply its class name or inline style.

use maud::{Markup, html};
use sha2::{Digest, Sha256};
use thiserror::Error;

static OPEN_SANS_REGULAR: &[u8] = include_bytes!("../assets/fonts/OpenSans-Regular.woff2");

const WOFF2_SIGNATURE: &[u8] = b"wOF2";
/// Fixed size of the WOFF2 table directory header.
const WOFF2_HEADER_LEN: usize = 48;

#[derive(Error, Debug, PartialEq)]
pub enum FontError {
    #[error("bundled font asset {0} is empty")]
    EmptyAsset(&'static str),
    #[error("bundled font asset {0} is not a WOFF2 file")]
    NotWoff2(&'static str),
    #[error("bundled font asset {file} declares {declared} bytes but is {actual} bytes long")]
    LengthMismatch {
        file: &'static str,
        declared: u32,
        actual: usize,
    },
}

/// Check the WOFF2 header of a bundled font.
fn check_woff2(file: &'static str, bytes: &[u8]) -> Result<(), FontError> {
    if bytes.is_empty() {
        return Err(FontError::EmptyAsset(file));
    }
    if bytes.len() < WOFF2_HEADER_LEN || !bytes.starts_with(WOFF2_SIGNATURE) {
        return Err(FontError::NotWoff2(file));
    }
    let num_tables = u16::from_be_bytes([bytes[12], bytes[13]]);
    if num_tables == 0 {
        return Err(FontError::NotWoff2(file));
    }
    let declared = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    if usize::try_from(declared).ok() != Some(bytes.len()) {
        return Err(FontError::LengthMismatch {
            file,
            declared,
            actual: bytes.len(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }
}

/// Where a font's glyphs come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    /// Hosted variable font loaded through a remote stylesheet.
    Remote {
        stylesheet: &'static str,
        origin: &'static str,
    },
    /// Static font file bundled at build time and written next to the pages.
    Local {
        file_name: &'static str,
        bytes: &'static [u8],
        weight: u16,
        style: FontStyle,
    },
}

/// Opaque handle other components use to style text.
#[derive(Debug, Clone, PartialEq)]
pub struct FontHandle {
    family: &'static str,
    variable: &'static str,
    fallback: &'static str,
    source: FontSource,
}

impl FontHandle {
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// CSS custom property carrying the font stack, e.g. `--font-heading`.
    pub fn variable(&self) -> &'static str {
        self.variable
    }

    /// Utility class applying this font, e.g. `font-heading`.
    pub fn class_name(&self) -> &'static str {
        self.variable.trim_start_matches('-')
    }

    /// Inline style declaration for elements that cannot take a class.
    pub fn style(&self) -> String {
        format!("font-family: var({});", self.variable)
    }

    /// Full font stack: the registered family followed by its fallback.
    pub fn stack(&self) -> String {
        format!("\"{}\", {}", self.family, self.fallback)
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Output path of a bundled font, content-hashed for cache busting.
    /// `None` for remote fonts.
    pub fn asset_path(&self) -> Option<String> {
        match &self.source {
            FontSource::Local {
                file_name, bytes, ..
            } => {
                let hash = Sha256::digest(bytes);
                let short: String = hash[..4].iter().map(|b| format!("{b:02x}")).collect();
                let (stem, ext) = file_name.rsplit_once('.').unwrap_or((*file_name, "woff2"));
                Some(format!("fonts/{stem}.{short}.{ext}"))
            }
            FontSource::Remote { .. } => None,
        }
    }
}

/// The site's registered fonts.
#[derive(Debug, Clone, PartialEq)]
pub struct Fonts {
    pub sans: FontHandle,
    pub heading: FontHandle,
}

impl Fonts {
    /// Register the site fonts. Fails if the bundled asset is unusable.
    pub fn register() -> Result<Self, FontError> {
        Self::with_heading_bytes(OPEN_SANS_REGULAR)
    }

    fn with_heading_bytes(bytes: &'static [u8]) -> Result<Self, FontError> {
        const FILE_NAME: &str = "OpenSans-Regular.woff2";
        check_woff2(FILE_NAME, bytes)?;
        Ok(Self {
            sans: FontHandle {
                family: "Inter",
                variable: "--font-sans",
                fallback: "ui-sans-serif, system-ui, sans-serif",
                source: FontSource::Remote {
                    stylesheet: "https://fonts.googleapis.com/css2?family=Inter:wght@100..900&display=swap",
                    origin: "https://fonts.gstatic.com",
                },
            },
            heading: FontHandle {
                family: "Open Sans",
                variable: "--font-heading",
                fallback: "ui-sans-serif, system-ui, sans-serif",
                source: FontSource::Local {
                    file_name: FILE_NAME,
                    bytes,
                    weight: 400,
                    style: FontStyle::Normal,
                },
            },
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontHandle> {
        [&self.sans, &self.heading].into_iter()
    }

    /// `@font-face` rules, custom properties, and utility classes.
    pub fn css(&self) -> String {
        let mut css = String::new();
        for font in self.iter() {
            if let (
                FontSource::Local { weight, style, .. },
                Some(path),
            ) = (&font.source, font.asset_path())
            {
                css.push_str(&format!(
                    "@font-face {{\n    font-family: \"{}\";\n    src: url(\"/{}\") format(\"woff2\");\n    font-weight: {};\n    font-style: {};\n    font-display: swap;\n}}\n",
                    font.family,
                    path,
                    weight,
                    style.as_css(),
                ));
            }
        }
        css.push_str(":root {\n");
        for font in self.iter() {
            css.push_str(&format!("    {}: {};\n", font.variable, font.stack()));
        }
        css.push_str("}\n");
        for font in self.iter() {
            css.push_str(&format!(
                ".{} {{ font-family: var({}); }}\n",
                font.class_name(),
                font.variable
            ));
        }
        css
    }

    /// `<link>` tags loading remote fonts and preloading bundled ones.
    pub fn head_links(&self) -> Markup {
        html! {
            @for font in self.iter() {
                @match &font.source {
                    FontSource::Remote { stylesheet, origin } => {
                        link rel="preconnect" href=(origin) crossorigin;
                        link rel="stylesheet" href=(stylesheet);
                    }
                    FontSource::Local { .. } => {
                        @if let Some(path) = font.asset_path() {
                            link rel="preload" href={ "/" (path) } as="font" type="font/woff2" crossorigin;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_succeeds_with_bundled_asset() {
        let fonts = Fonts::register().unwrap();
        assert_eq!(fonts.sans.family(), "Inter");
        assert_eq!(fonts.heading.family(), "Open Sans");
    }

    /// A 48-byte WOFF2 header declaring `length` bytes and one table.
    fn woff2_header(length: u32) -> Vec<u8> {
        let mut bytes = vec![0u8; WOFF2_HEADER_LEN];
        bytes[..4].copy_from_slice(b"wOF2");
        bytes[8..12].copy_from_slice(&length.to_be_bytes());
        bytes[12..14].copy_from_slice(&1u16.to_be_bytes());
        bytes
    }

    fn leak(bytes: Vec<u8>) -> &'static [u8] {
        Box::leak(bytes.into_boxed_slice())
    }

    #[test]
    fn bundled_asset_has_valid_woff2_header() {
        assert_eq!(check_woff2("OpenSans-Regular.woff2", OPEN_SANS_REGULAR), Ok(()));
    }

    #[test]
    fn empty_asset_fails_registration() {
        assert_eq!(
            Fonts::with_heading_bytes(&[]),
            Err(FontError::EmptyAsset("OpenSans-Regular.woff2"))
        );
    }

    #[test]
    fn non_font_bytes_fail_registration() {
        assert_eq!(
            Fonts::with_heading_bytes(b"not a font at all"),
            Err(FontError::NotWoff2("OpenSans-Regular.woff2"))
        );
        let mut ttf = woff2_header(48);
        ttf[..4].copy_from_slice(&[0, 1, 0, 0]);
        assert_eq!(
            Fonts::with_heading_bytes(leak(ttf)),
            Err(FontError::NotWoff2("OpenSans-Regular.woff2"))
        );
    }

    #[test]
    fn header_without_tables_fails_registration() {
        let mut bytes = woff2_header(48);
        bytes[12..14].copy_from_slice(&0u16.to_be_bytes());
        assert_eq!(
            Fonts::with_heading_bytes(leak(bytes)),
            Err(FontError::NotWoff2("OpenSans-Regular.woff2"))
        );
    }

    #[test]
    fn declared_length_must_match_asset_size() {
        assert_eq!(
            Fonts::with_heading_bytes(leak(woff2_header(1_585_086_548))),
            Err(FontError::LengthMismatch {
                file: "OpenSans-Regular.woff2",
                declared: 1_585_086_548,
                actual: 48,
            })
        );
        assert!(Fonts::with_heading_bytes(leak(woff2_header(48))).is_ok());
    }

    #[test]
    fn handles_expose_class_and_variable() {
        let fonts = Fonts::register().unwrap();
        assert_eq!(fonts.heading.class_name(), "font-heading");
        assert_eq!(fonts.heading.variable(), "--font-heading");
        assert_eq!(fonts.sans.class_name(), "font-sans");
        assert_eq!(fonts.heading.style(), "font-family: var(--font-heading);");
    }

    #[test]
    fn local_font_keeps_weight_and_style() {
        let fonts = Fonts::register().unwrap();
        match fonts.heading.source() {
            FontSource::Local { weight, style, .. } => {
                assert_eq!(*weight, 400);
                assert_eq!(*style, FontStyle::Normal);
            }
            other => panic!("expected local font, got {other:?}"),
        }
    }

    #[test]
    fn asset_path_is_content_hashed() {
        let fonts = Fonts::register().unwrap();
        let path = fonts.heading.asset_path().unwrap();
        assert!(path.starts_with("fonts/OpenSans-Regular."));
        assert!(path.ends_with(".woff2"));
        // stem + 8 hex chars + extension
        let hash = path
            .trim_start_matches("fonts/OpenSans-Regular.")
            .trim_end_matches(".woff2");
        assert_eq!(hash.len(), 8);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fonts.sans.asset_path(), None);
    }

    #[test]
    fn css_declares_font_face_and_classes() {
        let fonts = Fonts::register().unwrap();
        let css = fonts.css();
        assert!(css.contains("@font-face"));
        assert!(css.contains("font-weight: 400;"));
        assert!(css.contains("--font-sans: \"Inter\""));
        assert!(css.contains(".font-heading { font-family: var(--font-heading); }"));
        // Remote fonts get no @font-face; their stylesheet provides it.
        assert_eq!(css.matches("@font-face").count(), 1);
    }

    #[test]
    fn head_links_load_both_fonts() {
        let fonts = Fonts::register().unwrap();
        let html = head_links_string(&fonts);
        assert!(html.contains("fonts.googleapis.com"));
        assert!(html.contains(r#"rel="preconnect""#));
        assert!(html.contains(r#"rel="preload""#));
        assert!(html.contains("/fonts/OpenSans-Regular."));
    }

    fn head_links_string(fonts: &Fonts) -> String {
        fonts.head_links().into_string()
    }
}

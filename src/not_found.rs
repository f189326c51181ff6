//! Fallback view for routes that match nothing.

use maud::{Markup, html};

pub const NOT_FOUND_CODE: &str = "404";
pub const NOT_FOUND_MESSAGE: &str = "The page you were looking for was not found :(";

/// Render the not-found body. Takes no input; the output never varies.
pub fn render_not_found() -> Markup {
    html! {
        main class="not-found flex items-center" {
            h1 class="not-found-code font-heading" { (NOT_FOUND_CODE) }
            div class="not-found-divider" role="separator" {}
            h2 class="not-found-message text-sm" { (NOT_FOUND_MESSAGE) }
        }
    }
}

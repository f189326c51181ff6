//! Utility class-list merging.
//!
//! Renderers compose `class` attributes from a fixed base plus conditional
//! fragments. When two fragments set the same CSS property (say
//! `text-foreground` and `text-foreground/60`), the later one wins and the
//! earlier one is dropped, so the emitted attribute never carries conflicting
//! utilities.
//!
//! ## Resolution
//!
//! Every class is split into three parts:
//!
//! ```text
//! md:hover:!px-4
//! └───┬───┘│└─┬┘
//!  variants │ base utility
//!       important
//! ```
//!
//! The base utility is mapped to a conflict group through [`class_group`]. Two
//! classes conflict when they share variants, important flag and group. Some
//! groups are shorthands that also cover narrower groups (`p` covers `px`,
//! `pt`, ...); a later shorthand removes earlier narrower classes, but a later
//! narrow class leaves an earlier shorthand alone.
//!
//! Classes the table does not recognise never conflict with anything except
//! an exact duplicate of themselves.
//!
//! Merging is idempotent: `merge(merge(x)) == merge(x)`.

use std::collections::HashSet;

/// A fragment accepted by [`merge_class_names`] / [`cn!`](crate::cn).
///
/// `None` and empty strings are falsy and contribute nothing.
pub trait ClassValue {
    fn fragment(&self) -> Option<&str>;
}

impl ClassValue for &str {
    fn fragment(&self) -> Option<&str> {
        Some(*self)
    }
}

impl ClassValue for String {
    fn fragment(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: ClassValue> ClassValue for Option<T> {
    fn fragment(&self) -> Option<&str> {
        self.as_ref().and_then(ClassValue::fragment)
    }
}

/// Merge class fragments into a single space-separated attribute value.
///
/// ```
/// use siteshell::cn;
///
/// let active = false;
/// let class = cn!(
///     "transition-colors text-foreground",
///     (!active).then_some("text-foreground/60"),
/// );
/// assert_eq!(class, "transition-colors text-foreground/60");
/// ```
#[macro_export]
macro_rules! cn {
    ($($value:expr),* $(,)?) => {
        $crate::classes::merge_class_names(&[$(&$value as &dyn $crate::classes::ClassValue),*])
    };
}

/// Merge class fragments, later conflicting utilities overriding earlier ones.
pub fn merge_class_names(values: &[&dyn ClassValue]) -> String {
    let classes: Vec<&str> = values
        .iter()
        .filter_map(|v| v.fragment())
        .flat_map(str::split_whitespace)
        .collect();

    let mut claimed: HashSet<String> = HashSet::new();
    let mut kept: Vec<&str> = Vec::with_capacity(classes.len());

    for &class in classes.iter().rev() {
        let parsed = ParsedClass::parse(class);
        let Some(group) = class_group(parsed.base) else {
            if claimed.insert(format!("raw:{class}")) {
                kept.push(class);
            }
            continue;
        };
        let key = parsed.key(group);
        if claimed.contains(&key) {
            continue;
        }
        claimed.insert(key);
        for covered in covered_groups(group) {
            claimed.insert(parsed.key(covered));
        }
        kept.push(class);
    }

    kept.reverse();
    kept.join(" ")
}

struct ParsedClass<'a> {
    variants: &'a str,
    important: bool,
    base: &'a str,
}

impl<'a> ParsedClass<'a> {
    fn parse(class: &'a str) -> Self {
        let split = last_variant_separator(class);
        let (variants, rest) = match split {
            Some(idx) => (&class[..=idx], &class[idx + 1..]),
            None => ("", class),
        };
        let (important, rest) = match rest.strip_prefix('!') {
            Some(r) => (true, r),
            None => match rest.strip_suffix('!') {
                Some(r) => (true, r),
                None => (false, rest),
            },
        };
        // Negative values (`-mt-2`) share a group with their positive form.
        let base = rest.strip_prefix('-').unwrap_or(rest);
        Self {
            variants,
            important,
            base,
        }
    }

    fn key(&self, group: &str) -> String {
        format!(
            "{}{}{}",
            self.variants,
            if self.important { "!" } else { "" },
            group
        )
    }
}

/// Index of the last `:` outside arbitrary-value brackets.
fn last_variant_separator(class: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut last = None;
    for (idx, ch) in class.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => last = Some(idx),
            _ => {}
        }
    }
    last
}

// ============================================================================
// Precedence table
// ============================================================================

const DISPLAY: &[&str] = &[
    "block",
    "inline-block",
    "inline",
    "flex",
    "inline-flex",
    "grid",
    "inline-grid",
    "table",
    "flow-root",
    "contents",
    "list-item",
    "hidden",
];
const POSITION: &[&str] = &["static", "fixed", "absolute", "relative", "sticky"];
const VISIBILITY: &[&str] = &["visible", "invisible", "collapse"];
const TEXT_TRANSFORM: &[&str] = &["uppercase", "lowercase", "capitalize", "normal-case"];
const TEXT_DECORATION: &[&str] = &["underline", "overline", "line-through", "no-underline"];
const FONT_STYLE: &[&str] = &["italic", "not-italic"];
const FONT_WEIGHTS: &[&str] = &[
    "thin",
    "extralight",
    "light",
    "normal",
    "medium",
    "semibold",
    "bold",
    "extrabold",
    "black",
];
const TEXT_SIZES: &[&str] = &[
    "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
];
const TEXT_ALIGN: &[&str] = &["left", "center", "right", "justify", "start", "end"];
const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "hidden", "none"];
const BG_POSITIONS: &[&str] = &[
    "bottom",
    "center",
    "left",
    "left-bottom",
    "left-top",
    "right",
    "right-bottom",
    "right-top",
    "top",
];

/// Prefixed utility families, longest prefix first so `px-` wins over `p-`.
const PREFIXED: &[(&str, &str)] = &[
    ("min-w-", "min-w"),
    ("min-h-", "min-h"),
    ("max-w-", "max-w"),
    ("max-h-", "max-h"),
    ("space-x-", "space-x"),
    ("space-y-", "space-y"),
    ("gap-x-", "gap-x"),
    ("gap-y-", "gap-y"),
    ("gap-", "gap"),
    ("inset-x-", "inset-x"),
    ("inset-y-", "inset-y"),
    ("inset-", "inset"),
    ("top-", "top"),
    ("right-", "right"),
    ("bottom-", "bottom"),
    ("left-", "left"),
    ("px-", "px"),
    ("py-", "py"),
    ("pt-", "pt"),
    ("pr-", "pr"),
    ("pb-", "pb"),
    ("pl-", "pl"),
    ("ps-", "ps"),
    ("pe-", "pe"),
    ("p-", "p"),
    ("mx-", "mx"),
    ("my-", "my"),
    ("mt-", "mt"),
    ("mr-", "mr"),
    ("mb-", "mb"),
    ("ml-", "ml"),
    ("ms-", "ms"),
    ("me-", "me"),
    ("m-", "m"),
    ("size-", "size"),
    ("w-", "w"),
    ("h-", "h"),
    ("z-", "z"),
    ("opacity-", "opacity"),
    ("leading-", "leading"),
    ("tracking-", "tracking"),
    ("whitespace-", "whitespace"),
    ("items-", "align-items"),
    ("justify-items-", "justify-items"),
    ("justify-self-", "justify-self"),
    ("justify-", "justify-content"),
    ("self-", "align-self"),
    ("content-", "align-content"),
    ("cursor-", "cursor"),
    ("overflow-x-", "overflow-x"),
    ("overflow-y-", "overflow-y"),
    ("overflow-", "overflow"),
    ("duration-", "duration"),
    ("ease-", "ease"),
    ("delay-", "delay"),
    ("underline-offset-", "underline-offset"),
    ("decoration-", "decoration-color"),
    ("outline-", "outline"),
    ("grid-cols-", "grid-cols"),
    ("grid-rows-", "grid-rows"),
    ("col-span-", "col-span"),
    ("order-", "order"),
    ("basis-", "basis"),
    ("grow", "grow"),
    ("shrink", "shrink"),
    ("fill-", "fill"),
    ("stroke-", "stroke"),
];

/// Map a base utility (variants and important marker already removed) to its
/// conflict group. `None` means the class is not in the table.
pub fn class_group(base: &str) -> Option<&'static str> {
    if let Some(&group) = [
        (DISPLAY, "display"),
        (POSITION, "position"),
        (VISIBILITY, "visibility"),
        (TEXT_TRANSFORM, "text-transform"),
        (TEXT_DECORATION, "text-decoration"),
        (FONT_STYLE, "font-style"),
    ]
    .iter()
    .find_map(|(words, group)| words.contains(&base).then_some(group))
    {
        return Some(group);
    }

    match base {
        "truncate" => return Some("text-overflow"),
        "transition" => return Some("transition"),
        "shadow" => return Some("shadow"),
        "rounded" => return Some("rounded"),
        "border" => return Some("border-w"),
        "ring" => return Some("ring-w"),
        "flex-row" | "flex-row-reverse" | "flex-col" | "flex-col-reverse" => {
            return Some("flex-direction");
        }
        "flex-wrap" | "flex-wrap-reverse" | "flex-nowrap" => return Some("flex-wrap"),
        "flex-1" | "flex-auto" | "flex-initial" | "flex-none" => return Some("flex"),
        _ => {}
    }

    if let Some(value) = base.strip_prefix("text-") {
        return Some(text_group(value));
    }
    if let Some(value) = base.strip_prefix("font-") {
        return Some(if FONT_WEIGHTS.contains(&value) {
            "font-weight"
        } else {
            "font-family"
        });
    }
    if let Some(value) = base.strip_prefix("bg-") {
        return Some(match value {
            "fixed" | "local" | "scroll" => "bg-attachment",
            "auto" | "cover" | "contain" => "bg-size",
            "repeat" | "no-repeat" | "repeat-x" | "repeat-y" | "repeat-round" | "repeat-space" => {
                "bg-repeat"
            }
            "none" => "bg-image",
            _ if BG_POSITIONS.contains(&value) => "bg-position",
            _ if value.starts_with("gradient-") => "bg-image",
            _ if value.starts_with("clip-") => "bg-clip",
            _ if value.starts_with("origin-") => "bg-origin",
            _ if value.starts_with("blend-") => "bg-blend",
            _ => "bg-color",
        });
    }
    if let Some(value) = base.strip_prefix("border-") {
        return Some(border_group(value));
    }
    if let Some(value) = base.strip_prefix("rounded-") {
        return Some(match value.split('-').next().unwrap_or("") {
            "t" => "rounded-t",
            "r" => "rounded-r",
            "b" => "rounded-b",
            "l" => "rounded-l",
            "tl" => "rounded-tl",
            "tr" => "rounded-tr",
            "br" => "rounded-br",
            "bl" => "rounded-bl",
            _ => "rounded",
        });
    }
    if let Some(value) = base.strip_prefix("shadow-") {
        return Some(if is_size_word(value) || value == "none" || value == "inner" {
            "shadow"
        } else {
            "shadow-color"
        });
    }
    if let Some(value) = base.strip_prefix("ring-offset-") {
        return Some(if value.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            "ring-offset-w"
        } else {
            "ring-offset-color"
        });
    }
    if let Some(value) = base.strip_prefix("ring-") {
        return Some(if value.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            "ring-w"
        } else {
            "ring-color"
        });
    }
    if base.starts_with("transition-") {
        return Some("transition");
    }

    PREFIXED
        .iter()
        .find(|(prefix, _)| base.starts_with(prefix))
        .map(|&(_, group)| group)
}

fn text_group(value: &str) -> &'static str {
    if TEXT_SIZES.contains(&value) {
        return "font-size";
    }
    if TEXT_ALIGN.contains(&value) {
        return "text-align";
    }
    match value {
        "wrap" | "nowrap" | "balance" | "pretty" => return "text-wrap",
        "ellipsis" | "clip" => return "text-overflow",
        _ => {}
    }
    if let Some(arbitrary) = value.strip_prefix('[') {
        // `text-[14px]` is a size, `text-[#333]` a color.
        if arbitrary.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            || arbitrary.starts_with("length:")
        {
            return "font-size";
        }
    }
    "text-color"
}

fn border_group(value: &str) -> &'static str {
    if BORDER_STYLES.contains(&value) {
        return "border-style";
    }
    match value {
        "collapse" | "separate" => return "border-collapse",
        _ if value.starts_with("spacing") => return "border-spacing",
        _ => {}
    }
    let side = value.split('-').next().unwrap_or("");
    let width_group = match side {
        "x" => Some("border-w-x"),
        "y" => Some("border-w-y"),
        "t" => Some("border-w-t"),
        "r" => Some("border-w-r"),
        "b" => Some("border-w-b"),
        "l" => Some("border-w-l"),
        _ => None,
    };
    match width_group {
        Some(group) => {
            let rest = &value[side.len()..];
            let rest = rest.strip_prefix('-').unwrap_or(rest);
            if rest.is_empty() || rest.chars().all(|c| c.is_ascii_digit()) {
                group
            } else {
                "border-color"
            }
        }
        None if value.chars().all(|c| c.is_ascii_digit()) => "border-w",
        None => "border-color",
    }
}

fn is_size_word(value: &str) -> bool {
    matches!(value, "xs" | "sm" | "md" | "lg" | "xl" | "2xl")
}

/// Narrower groups that a shorthand group overrides.
fn covered_groups(group: &str) -> &'static [&'static str] {
    match group {
        "p" => &["px", "py", "pt", "pr", "pb", "pl", "ps", "pe"],
        "px" => &["pr", "pl", "ps", "pe"],
        "py" => &["pt", "pb"],
        "m" => &["mx", "my", "mt", "mr", "mb", "ml", "ms", "me"],
        "mx" => &["mr", "ml", "ms", "me"],
        "my" => &["mt", "mb"],
        "inset" => &["inset-x", "inset-y", "top", "right", "bottom", "left"],
        "inset-x" => &["right", "left"],
        "inset-y" => &["top", "bottom"],
        "size" => &["w", "h"],
        "gap" => &["gap-x", "gap-y"],
        "overflow" => &["overflow-x", "overflow-y"],
        "rounded" => &[
            "rounded-t",
            "rounded-r",
            "rounded-b",
            "rounded-l",
            "rounded-tl",
            "rounded-tr",
            "rounded-br",
            "rounded-bl",
        ],
        "rounded-t" => &["rounded-tl", "rounded-tr"],
        "rounded-r" => &["rounded-tr", "rounded-br"],
        "rounded-b" => &["rounded-br", "rounded-bl"],
        "rounded-l" => &["rounded-tl", "rounded-bl"],
        "border-w" => &[
            "border-w-x",
            "border-w-y",
            "border-w-t",
            "border-w-r",
            "border-w-b",
            "border-w-l",
        ],
        "border-w-x" => &["border-w-r", "border-w-l"],
        "border-w-y" => &["border-w-t", "border-w-b"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_text_color_wins() {
        assert_eq!(
            cn!("text-foreground", "text-foreground/60"),
            "text-foreground/60"
        );
    }

    #[test]
    fn falsy_fragments_are_ignored() {
        let none: Option<&str> = None;
        assert_eq!(cn!("flex", none, "", Some("items-center")), "flex items-center");
    }

    #[test]
    fn fragments_may_hold_several_classes() {
        assert_eq!(
            cn!("px-2 py-1 bg-muted", "p-3 bg-primary"),
            "p-3 bg-primary"
        );
    }

    #[test]
    fn non_conflicting_classes_keep_order() {
        assert_eq!(
            cn!("transition-colors hover:text-foreground/80", "text-foreground/60"),
            "transition-colors hover:text-foreground/80 text-foreground/60"
        );
    }

    #[test]
    fn variants_scope_conflicts() {
        assert_eq!(
            cn!("hover:text-red-500 text-blue-500", "hover:text-green-500"),
            "text-blue-500 hover:text-green-500"
        );
        assert_eq!(cn!("md:flex", "hidden"), "md:flex hidden");
    }

    #[test]
    fn narrow_class_does_not_remove_earlier_shorthand() {
        assert_eq!(cn!("p-4", "px-2"), "p-4 px-2");
        assert_eq!(cn!("px-2", "p-4"), "p-4");
    }

    #[test]
    fn font_size_and_color_do_not_conflict() {
        assert_eq!(cn!("text-sm", "text-muted"), "text-sm text-muted");
        assert_eq!(cn!("text-sm", "text-lg"), "text-lg");
        assert_eq!(cn!("text-[14px]", "text-[#333]"), "text-[14px] text-[#333]");
    }

    #[test]
    fn font_weight_and_family_are_separate() {
        assert_eq!(
            cn!("font-bold font-heading", "font-semibold"),
            "font-heading font-semibold"
        );
        assert_eq!(cn!("font-sans", "font-heading"), "font-heading");
    }

    #[test]
    fn border_width_and_color() {
        assert_eq!(cn!("border border-input", "border-2"), "border-input border-2");
        assert_eq!(cn!("border-t-2", "border-t-red-500"), "border-t-2 border-t-red-500");
    }

    #[test]
    fn ring_offset_is_separate_from_ring_color() {
        assert_eq!(
            cn!("ring-red-500", "ring-offset-2"),
            "ring-red-500 ring-offset-2"
        );
        assert_eq!(cn!("ring-2", "ring-offset-4"), "ring-2 ring-offset-4");
        assert_eq!(cn!("ring-offset-2", "ring-offset-4"), "ring-offset-4");
        assert_eq!(
            cn!("ring-offset-2", "ring-offset-white"),
            "ring-offset-2 ring-offset-white"
        );
    }

    #[test]
    fn background_position_and_clip_are_not_colors() {
        assert_eq!(cn!("bg-red-500", "bg-center"), "bg-red-500 bg-center");
        assert_eq!(cn!("bg-red-500", "bg-clip-text"), "bg-red-500 bg-clip-text");
        assert_eq!(cn!("bg-left-top", "bg-center"), "bg-center");
        assert_eq!(cn!("bg-clip-text", "bg-clip-padding"), "bg-clip-padding");
        assert_eq!(cn!("bg-red-500", "bg-blue-500"), "bg-blue-500");
    }

    #[test]
    fn justify_items_and_self_are_separate_groups() {
        assert_eq!(
            cn!("justify-between", "justify-items-center"),
            "justify-between justify-items-center"
        );
        assert_eq!(
            cn!("justify-between", "justify-self-end"),
            "justify-between justify-self-end"
        );
        assert_eq!(cn!("justify-items-start", "justify-items-center"), "justify-items-center");
        assert_eq!(cn!("justify-start", "justify-between"), "justify-between");
    }

    #[test]
    fn rounded_corners_are_narrower_than_sides() {
        assert_eq!(
            cn!("rounded-lg", "rounded-tl-none"),
            "rounded-lg rounded-tl-none"
        );
        assert_eq!(cn!("rounded-tl-none", "rounded-lg"), "rounded-lg");
        assert_eq!(cn!("rounded-tl-none", "rounded-t-md"), "rounded-t-md");
        assert_eq!(
            cn!("rounded-tl-none", "rounded-b-md"),
            "rounded-tl-none rounded-b-md"
        );
    }

    #[test]
    fn border_collapse_is_not_a_border_color() {
        assert_eq!(
            cn!("border-red-500", "border-collapse"),
            "border-red-500 border-collapse"
        );
        assert_eq!(cn!("border-collapse", "border-separate"), "border-separate");
        assert_eq!(
            cn!("border-red-500", "border-spacing-2"),
            "border-red-500 border-spacing-2"
        );
    }

    #[test]
    fn important_marker_scopes_conflicts() {
        assert_eq!(cn!("!p-2", "p-4"), "!p-2 p-4");
        assert_eq!(cn!("!p-2", "!p-4"), "!p-4");
    }

    #[test]
    fn negative_values_share_group() {
        assert_eq!(cn!("mt-2", "-mt-1"), "-mt-1");
    }

    #[test]
    fn unknown_classes_dedupe_exact_duplicates() {
        assert_eq!(cn!("site-header foo", "foo"), "site-header foo");
    }

    #[test]
    fn arbitrary_variant_colons_are_not_separators() {
        let parsed = ParsedClass::parse("[&:hover]:underline");
        assert_eq!(parsed.variants, "[&:hover]:");
        assert_eq!(parsed.base, "underline");
    }

    #[test]
    fn merge_is_idempotent() {
        let inputs = [
            cn!("text-foreground", "text-foreground/60"),
            cn!("px-2 py-1 p-3 hover:p-1", "mx-auto m-2 mt-4"),
            cn!("flex hidden md:block md:flex", "border border-2 border-t-4 rounded rounded-t-lg"),
            cn!("a b a c", "b"),
        ];
        for merged in inputs {
            assert_eq!(cn!(merged.as_str()), merged);
        }
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(merge_class_names(&[]), "");
    }

    #[test]
    fn class_group_lookup() {
        assert_eq!(class_group("text-foreground/60"), Some("text-color"));
        assert_eq!(class_group("text-center"), Some("text-align"));
        assert_eq!(class_group("px-4"), Some("px"));
        assert_eq!(class_group("transition-colors"), Some("transition"));
        assert_eq!(class_group("site-nav"), None);
        assert_eq!(class_group("ring-offset-2"), Some("ring-offset-w"));
        assert_eq!(class_group("bg-center"), Some("bg-position"));
        assert_eq!(class_group("justify-self-end"), Some("justify-self"));
        assert_eq!(class_group("rounded-tl-none"), Some("rounded-tl"));
        assert_eq!(class_group("border-collapse"), Some("border-collapse"));
    }
}

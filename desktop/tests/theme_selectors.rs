#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Every class emitted by the sheet and overlay components must exist in the shared
theme (ui/assets/theme/main.css). A substring check is enough to catch a renamed
or dropped selector before it reaches a packaged build.

When renaming a class, update the component markup and REQUIRED_SELECTORS together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--ghost",
    // Sheet form
    ".sheet {",
    ".sheet__form",
    ".sheet__field",
    ".sheet__field--stat",
    ".sheet__field--axis-color",
    ".sheet__label",
    ".sheet__portrait-img",
    ".sheet__axis-colors",
    ".sheet__chart",
    ".sheet__summary",
    ".sheet__error",
    // Export status banner
    ".sheet__meta",
    ".sheet__meta--success",
    ".sheet__meta--error",
    // Overlay card
    ".overlay {",
    ".overlay__card",
    ".overlay__portrait",
    ".overlay__chart",
    ".overlay__controls",
    ".overlay__controls--hidden",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    assert!(
        missing.is_empty(),
        "Missing {} required CSS selectors/tokens in unified theme:\n{}",
        missing.len(),
        missing.join("\n")
    );
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn overlay_controls_can_be_hidden() {
    // Export hides the controls through this modifier; it must not collapse layout.
    let start = THEME_CSS
        .find(".overlay__controls--hidden")
        .expect("hidden modifier present");
    let block = &THEME_CSS[start..];
    let end = block.find('}').expect("block closes");
    assert!(block[..end].contains("visibility: hidden"));
}

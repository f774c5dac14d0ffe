use dioxus::prelude::*;

use ui::views::Home;

// Shared theme, inlined so the web bundle carries no separate stylesheet asset.
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Statcard" }
        document::Style { "{MAIN_CSS_INLINE}" }
        Home {}
    }
}

use dioxus::prelude::*;

use crate::sheet::StatSheet;

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "page page-home",
            h1 { "Character Stat Sheet" }
            p { "Enter five stats, pick an ability color and open the chart card to download it as a PNG." }
            StatSheet {}
        }
    }
}

//! Character portrait handling: uploaded bytes become `data:` URLs, and a
//! missing portrait becomes an inline SVG placeholder showing the name.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::chart::surface::escape_xml;
use crate::core::format::or_placeholder;

pub const PLACEHOLDER_TEXT: &str = "Upload Image";
const PLACEHOLDER_SIZE: u32 = 250;

/// Mime type guessed from the file extension. Unknown extensions read as PNG.
pub fn mime_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "image/png",
    }
}

pub fn data_url(filename: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_for(filename), STANDARD.encode(bytes))
}

/// Grey square with the character name (or "Upload Image") centred on it.
pub fn placeholder_svg(name: &str) -> String {
    let label = escape_xml(or_placeholder(name, PLACEHOLDER_TEXT));
    let size = PLACEHOLDER_SIZE;
    let half = size / 2;
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{size}' height='{size}' viewBox='0 0 {size} {size}'><rect width='{size}' height='{size}' fill='#cccccc'/><text x='{half}' y='{half}' fill='#333333' font-family='sans-serif' font-size='22' text-anchor='middle' dominant-baseline='central'>{label}</text></svg>"
    )
}

pub fn placeholder_data_url(name: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(placeholder_svg(name))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for("hero.JPG"), "image/jpeg");
        assert_eq!(mime_for("hero.webp"), "image/webp");
        assert_eq!(mime_for("noext"), "image/png");
    }

    #[test]
    fn data_url_is_base64() {
        assert_eq!(data_url("a.png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn placeholder_uses_name_or_default() {
        assert!(placeholder_svg("Ada & Co").contains(">Ada &amp; Co<"));
        assert!(placeholder_svg("").contains(PLACEHOLDER_TEXT));
        assert!(placeholder_data_url("x").starts_with("data:image/svg+xml;base64,"));
    }
}

//! SVG → PNG. The web build draws through an `<img>` onto a `<canvas>`; the
//! desktop build renders with resvg.

use crate::core::error::ExportError;

use super::{Capture, ExportRegion};

/// Default capture collaborator for both platforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRasterizer;

impl Capture for SvgRasterizer {
    async fn capture(&self, region: &ExportRegion) -> Result<Vec<u8>, ExportError> {
        rasterize(region).await
    }
}

pub async fn rasterize(region: &ExportRegion) -> Result<Vec<u8>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        rasterize_web(region).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        rasterize_desktop(region)
    }
}

#[cfg(target_arch = "wasm32")]
async fn rasterize_web(region: &ExportRegion) -> Result<Vec<u8>, ExportError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url};

    use super::dom;

    let capture = |msg: &str| ExportError::Capture(msg.to_string());

    let svg_url = dom::object_url(&JsValue::from_str(&region.svg), "image/svg+xml")
        .map_err(capture)?;
    let image = HtmlImageElement::new().map_err(|_| capture("Unable to create image"))?;
    image.set_src(&svg_url);
    let loaded = JsFuture::from(image.decode()).await;
    Url::revoke_object_url(&svg_url).ok();
    loaded.map_err(|_| capture("SVG did not load as an image"))?;

    let canvas: HtmlCanvasElement = dom::create(&dom::document().map_err(capture)?, "canvas")
        .map_err(capture)?;
    canvas.set_width(region.size.width.round() as u32);
    canvas.set_height(region.size.height.round() as u32);
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or_else(|| capture("2d context unavailable"))?
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| capture("Unable to draw image"))?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| ExportError::Encode("Canvas refused to serialise".into()))?;
    decode_data_url(&data_url)
}

/// Payload bytes of a base64 `data:` URL.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn decode_data_url(data_url: &str) -> Result<Vec<u8>, ExportError> {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| ExportError::Encode("Malformed data URL".into()))?;
    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(ExportError::Encode(format!("Unexpected data URL header `{header}`")));
    }
    STANDARD
        .decode(payload)
        .map_err(|err| ExportError::Encode(err.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn rasterize_desktop(region: &ExportRegion) -> Result<Vec<u8>, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(&region.svg, &options)
        .map_err(|err| ExportError::Capture(err.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ExportError::Capture("export region has zero size".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    encode_png(&pixmap)
}

#[cfg(not(target_arch = "wasm32"))]
fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, ExportError> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| ExportError::Encode(err.to_string()))?
            .write_image_data(&rgba)
            .map_err(|err| ExportError::Encode(err.to_string()))?;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Size;

    #[test]
    fn data_url_payload_is_decoded() {
        assert_eq!(decode_data_url("data:image/png;base64,iVBORw==").unwrap(), b"\x89PNG");
    }

    #[test]
    fn data_url_without_base64_header_is_rejected() {
        assert!(matches!(
            decode_data_url("data:image/png,raw"),
            Err(ExportError::Encode(_))
        ));
        assert!(matches!(decode_data_url("nope"), Err(ExportError::Encode(_))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn desktop_rasterizer_produces_png() {
        let region = ExportRegion {
            svg: "<svg xmlns='http://www.w3.org/2000/svg' width='20' height='10'><rect width='20' height='10' fill='#ff0000'/></svg>".into(),
            size: Size::new(20.0, 10.0),
            character_name: "x".into(),
        };
        let bytes = futures::executor::block_on(rasterize(&region)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn malformed_svg_is_a_capture_error() {
        let region = ExportRegion {
            svg: "<not-svg".into(),
            size: Size::new(1.0, 1.0),
            character_name: String::new(),
        };
        let err = futures::executor::block_on(rasterize(&region)).unwrap_err();
        assert!(matches!(err, ExportError::Capture(_)));
    }
}

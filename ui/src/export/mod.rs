//! PNG export of the overlay: compose the region, hide the interactive
//! controls while it is captured, then hand the bytes to the platform.
//!
//! The capture rasterizes the composed SVG, not the live page, so hiding the
//! controls only affects what is on screen during the export.

mod compose;
#[cfg(target_arch = "wasm32")]
mod dom;
mod download;
mod raster;

pub use compose::compose_region;
pub use download::download_bytes;
pub use raster::{rasterize, SvgRasterizer};

use crate::core::error::ExportError;
use crate::core::layout::Size;

pub const FILENAME_SUFFIX: &str = "_characterChart.png";
pub const FILENAME_FALLBACK: &str = "Unknown";

/// Composed export region: a standalone SVG document plus what the filename needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRegion {
    pub svg: String,
    pub size: Size,
    pub character_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// `"Sir Lancelot"` → `Sir_Lancelot_characterChart.png`; blank names use the fallback.
pub fn export_filename(character_name: &str) -> String {
    let cleaned: String = character_name
        .trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    let stem = if cleaned.is_empty() {
        FILENAME_FALLBACK
    } else {
        cleaned.as_str()
    };
    format!("{stem}{FILENAME_SUFFIX}")
}

/// Anything that can show or hide the download/close controls.
pub trait ControlVisibility {
    fn set_controls_hidden(&mut self, hidden: bool);
}

/// Hides the controls for as long as it lives; dropping it always restores them.
pub struct HiddenControls<'a, V: ControlVisibility + ?Sized> {
    controls: &'a mut V,
}

impl<'a, V: ControlVisibility + ?Sized> HiddenControls<'a, V> {
    pub fn new(controls: &'a mut V) -> Self {
        controls.set_controls_hidden(true);
        Self { controls }
    }
}

impl<V: ControlVisibility + ?Sized> Drop for HiddenControls<'_, V> {
    fn drop(&mut self) {
        self.controls.set_controls_hidden(false);
    }
}

/// Rasterizes a composed region to PNG bytes.
#[allow(async_fn_in_trait)]
pub trait Capture {
    async fn capture(&self, region: &ExportRegion) -> Result<Vec<u8>, ExportError>;
}

/// Capture `region` with the controls hidden. Visibility is restored on every
/// exit path, including a failed capture.
pub async fn export_png<C, V>(
    capture: &C,
    controls: &mut V,
    region: &ExportRegion,
) -> Result<ExportedImage, ExportError>
where
    C: Capture + ?Sized,
    V: ControlVisibility + ?Sized,
{
    let filename = export_filename(&region.character_name);
    let _hidden = HiddenControls::new(controls);
    tracing::info!(file = %filename, "capturing export region");

    match capture.capture(region).await {
        Ok(bytes) => Ok(ExportedImage { filename, bytes }),
        Err(err) => {
            tracing::warn!(%err, "export capture failed");
            Err(err)
        }
    }
}

/// Full flow behind the download button: capture, then deliver.
pub async fn perform_png_export<V>(region: ExportRegion, controls: &mut V) -> Result<String, String>
where
    V: ControlVisibility + ?Sized,
{
    let image = export_png(&SvgRasterizer, controls, &region)
        .await
        .map_err(|err| err.to_string())?;
    let delivery = download_bytes(&image.filename, "image/png", image.bytes)
        .await
        .map_err(|err| err.to_string())?;
    Ok(match delivery {
        Some(path) => format!("PNG saved to {path}"),
        None => format!("{} download started", image.filename),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Sir Lancelot", "Sir_Lancelot_characterChart.png")]
    #[case("  ", "Unknown_characterChart.png")]
    #[case("", "Unknown_characterChart.png")]
    #[case("a/b c", "ab_c_characterChart.png")]
    fn filenames(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(export_filename(name), expected);
    }
}

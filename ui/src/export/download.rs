//! Deliver exported bytes: a browser download on the web, a file under the
//! app data directory on desktop.

use crate::core::error::ExportError;

/// Returns the saved path on desktop, `None` when the browser took over.
pub async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use web_sys::{HtmlAnchorElement, Url};

        use super::dom;

        let fail = |msg: &str| ExportError::Download(msg.to_string());

        let buffer = js_sys::Uint8Array::from(bytes.as_slice()).buffer();
        let url = dom::object_url(&buffer, mime).map_err(fail)?;
        let document = dom::document().map_err(fail)?;
        let body = document.body().ok_or_else(|| fail("Missing body"))?;

        // Hidden anchor, removed right after the click.
        let anchor: HtmlAnchorElement = dom::create(&document, "a").map_err(fail)?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();
        let clicked = body.append_child(&anchor).map(|_| anchor.click());
        anchor.remove();
        Url::revoke_object_url(&url).ok();
        clicked.map_err(|_| fail("Unable to attach download link"))?;

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let fail = |err: std::io::Error| ExportError::Download(err.to_string());
        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(fail)?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(fail)?;
        file.write_all(&bytes).map_err(fail)?;
        tracing::info!(path = %path.display(), "export written");
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "Statcard", "Statcard")
        .ok_or_else(|| ExportError::Download("Unable to determine export directory".into()))?;
    Ok(dirs.data_dir().join("exports"))
}

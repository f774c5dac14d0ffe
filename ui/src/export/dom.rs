//! Browser plumbing shared by the web rasterizer and the web download.
//! Errors are short static messages; callers pick the `ExportError` variant.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Document, Url};

pub(super) type DomResult<T> = Result<T, &'static str>;

pub(super) fn document() -> DomResult<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")
}

/// `document.createElement(tag)` cast to the concrete element type.
pub(super) fn create<T: JsCast>(document: &Document, tag: &str) -> DomResult<T> {
    document
        .create_element(tag)
        .map_err(|_| "Unable to create element")?
        .dyn_into::<T>()
        .map_err(|_| "Element cast failed")
}

/// Object URL for a blob built from one part (an `ArrayBuffer` or a string).
/// Revoke it with [`Url::revoke_object_url`] once consumed.
pub(super) fn object_url(part: &JsValue, mime: &str) -> DomResult<String> {
    let parts = js_sys::Array::of1(part);
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_blob_sequence_and_options(&parts, &options)
        .map_err(|_| "Unable to build blob")?;
    Url::create_object_url_with_blob(&blob).map_err(|_| "Unable to create object URL")
}

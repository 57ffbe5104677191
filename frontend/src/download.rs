//! Browser file downloads via a temporary anchor element.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Offers `content` as a downloadable attachment with the given MIME type.
pub fn download_text(content: &str, filename: &str, mime: &str) {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(mime);

    let Ok(blob) = Blob::new_with_str_sequence_and_options(&parts, &options) else {
        return;
    };
    let Ok(url) = Url::create_object_url_with_blob(&blob) else {
        return;
    };
    click_anchor(&url, filename);
    Url::revoke_object_url(&url).ok();
}

/// Offers a prebuilt URI (e.g. a base64 `data:` URI) as a download.
pub fn download_uri(uri: &str, filename: &str) {
    click_anchor(uri, filename);
}

fn click_anchor(href: &str, filename: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(anchor) = document
        .create_element("a")
        .ok()
        .and_then(|e| e.dyn_into::<HtmlAnchorElement>().ok())
    else {
        return;
    };

    anchor.set_href(href);
    anchor.set_download(filename);
    anchor.style().set_property("display", "none").ok();

    if let Some(body) = document.body() {
        if body.append_child(&anchor).is_ok() {
            anchor.click();
            body.remove_child(&anchor).ok();
        }
    }
}

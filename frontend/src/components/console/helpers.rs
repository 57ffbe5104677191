//! HTTP plumbing for the console: form posts and JSON GETs against the
//! backend, with the transport-failure rules applied in one place.
//!
//! A transport failure is a network error, a non-2xx status, or a response
//! whose content type is not JSON. Each helper makes exactly one attempt;
//! the destination endpoints are not guaranteed idempotent, so nothing here
//! retries.

use gloo_net::http::{Request, Response};
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::FormData;

/// POSTs `fields` as multipart form data and decodes the JSON response.
pub async fn post_form(url: &str, fields: &[(&str, String)]) -> Result<Value, String> {
    let form = FormData::new().map_err(js_error)?;
    for (name, value) in fields {
        form.append_with_str(name, value).map_err(js_error)?;
    }
    let request = Request::post(url)
        .body(form)
        .map_err(|err| err.to_string())?;
    let response = request.send().await.map_err(|err| err.to_string())?;
    decode_json(response).await
}

/// GETs `url` and decodes the JSON response.
pub async fn get_json(url: &str) -> Result<Value, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    decode_json(response).await
}

async fn decode_json(response: Response) -> Result<Value, String> {
    if !response.ok() {
        return Err(format!(
            "Request failed with status {} {}",
            response.status(),
            response.status_text()
        ));
    }

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap_or_default()
        .to_lowercase();
    if !content_type.contains("application/json") {
        return Err(format!(
            "Unexpected response content type: {}",
            if content_type.is_empty() {
                "none"
            } else {
                &content_type
            }
        ));
    }

    response
        .json::<Value>()
        .await
        .map_err(|err| err.to_string())
}

/// Reads the `message` field of an admin-endpoint response, falling back to
/// `default` when the backend sent none.
pub fn response_message(value: &Value, default: &str) -> String {
    value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

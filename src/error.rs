use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("{0}")]
    Js(String),

    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("missing element #{0}")]
    MissingElement(String),

    #[error("CMS not configured")]
    NotConfigured,
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(js_value_to_string(&value))
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub fn js_value_to_string(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

//! Contact form validation and submission.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response, Window};

use crate::error::SiteError;

pub const SUBMIT_FAILED: &str = "Failed to submit form. Please try again.";
pub const SUCCESS_TOAST_MS: i32 = 5000;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Element id of the input and the `name` key in the JSON body.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors {
    entries: Vec<(Field, String)>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.clear(field);
        self.entries.push((field, message.into()));
    }

    pub fn clear(&mut self, field: Field) {
        self.entries.retain(|(f, _)| *f != field);
    }
}

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"));

/// Loose shape check, as the form has always accepted.
pub fn looks_like_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn validate(form: &ContactForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if form.name.trim().is_empty() {
        errors.set(Field::Name, "Name is required");
    }

    if form.email.trim().is_empty() {
        errors.set(Field::Email, "Email is required");
    } else if !looks_like_email(&form.email) {
        errors.set(Field::Email, "Email is invalid");
    }

    if form.message.trim().is_empty() {
        errors.set(Field::Message, "Message is required");
    }

    errors
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Interprets the endpoint's reply. Returns the created submission id, which
/// may be empty if the endpoint does not report one.
pub fn interpret_response(status: u16, ok: bool, body: &str) -> Result<String, SiteError> {
    let parsed: ContactResponse = serde_json::from_str(body).unwrap_or_default();
    if ok {
        return Ok(parsed.id.unwrap_or_default());
    }
    match parsed.error {
        Some(message) => Err(SiteError::Rejected(message)),
        None => Err(SiteError::Rejected(format!("status {}", status))),
    }
}

pub async fn submit(window: &Window, endpoint: &str, form: &ContactForm) -> Result<String, SiteError> {
    let body = serde_json::to_string(form)?;

    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(endpoint, &init)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;
    let text = JsFuture::from(resp.text()?).await?;
    let text = text.as_string().unwrap_or_default();

    interpret_response(resp.status(), resp.ok(), &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b.c"));
        assert!(looks_like_email("first.last@mail.example.org"));
        assert!(looks_like_email("say hi to a@b.co"));
        assert!(looks_like_email("a@b.c."));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.c"));
        assert!(!looks_like_email("a@.c"));
        assert!(!looks_like_email("a@b."));
        assert!(!looks_like_email("a @b.c"));
    }

    #[test]
    fn every_field_required() {
        let errors = validate(&form(" ", "", "\n"));
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Message), Some("Message is required"));
    }

    #[test]
    fn malformed_email_flagged() {
        let errors = validate(&form("Ada", "ada.example.com", "Hello"));
        assert_eq!(errors.get(Field::Email), Some("Email is invalid"));
        assert_eq!(errors.get(Field::Name), None);
    }

    #[test]
    fn valid_form_passes() {
        assert!(validate(&form("Ada", "ada@example.com", "Hello")).is_empty());
    }

    #[test]
    fn clearing_one_field_keeps_others() {
        let mut errors = validate(&form("", "", ""));
        errors.clear(Field::Email);
        assert_eq!(errors.get(Field::Email), None);
        assert!(errors.get(Field::Name).is_some());
    }

    #[test]
    fn body_uses_plain_field_names() {
        let json = serde_json::to_string(&form("Ada", "ada@example.com", "Hi")).expect("json");
        assert_eq!(json, r#"{"name":"Ada","email":"ada@example.com","message":"Hi"}"#);
    }

    #[test]
    fn response_outcomes() {
        assert_eq!(
            interpret_response(200, true, r#"{"success":true,"id":"doc-1"}"#).expect("ok"),
            "doc-1"
        );
        let err = interpret_response(400, false, r#"{"error":"All fields are required"}"#)
            .expect_err("rejected");
        assert_eq!(err.to_string(), "request rejected: All fields are required");
        let err = interpret_response(502, false, "<html>").expect_err("rejected");
        assert_eq!(err.to_string(), "request rejected: status 502");
    }
}

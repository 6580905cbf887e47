//! Request validation
//!
//! Field checks run before the service is invoked. Every failing check
//! contributes one [`FieldError`]; a field can fail several checks at once.

use pinpoint_core::{CreateUser, UpdateUser, UserId};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;

/// One rejected field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    pub msg: String,
    pub path: String,
    pub location: &'static str,
}

impl FieldError {
    fn field(location: &'static str, path: &str, value: &str, msg: &str) -> Self {
        Self {
            kind: "field",
            value: Some(value.to_string()),
            msg: msg.to_string(),
            path: path.to_string(),
            location,
        }
    }

    /// Request body could not be read as JSON
    pub fn body(msg: impl Into<String>) -> Self {
        Self {
            kind: "field",
            value: None,
            msg: msg.into(),
            path: String::new(),
            location: "body",
        }
    }
}

const NAME_PATTERN: &str = r"^[a-zA-Z\s]+$";
const ZIP_PATTERN: &str = r"^\d{5}(-\d{4})?$";

type Compiled = OnceLock<Result<Regex, regex::Error>>;

static NAME_REGEX: Compiled = OnceLock::new();
static ZIP_REGEX: Compiled = OnceLock::new();

/// Match `text` against a lazily compiled pattern; a pattern that fails to
/// compile matches nothing, so the check rejects
fn matches(cell: &'static Compiled, pattern: &str, text: &str) -> bool {
    match cell.get_or_init(|| Regex::new(pattern)) {
        Ok(regex) => regex.is_match(text),
        Err(e) => {
            tracing::error!(pattern, error = %e, "Validation pattern failed to compile");
            false
        }
    }
}

/// Text of a body field, trimmed; `None` when absent or null
fn text(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        errors.push(FieldError::field(
            "body",
            "name",
            name,
            "Name must be between 2 and 50 characters",
        ));
    }
    if !matches(&NAME_REGEX, NAME_PATTERN, name) {
        errors.push(FieldError::field(
            "body",
            "name",
            name,
            "Name can only contain letters and spaces",
        ));
    }
}

fn check_zip_code(zip_code: &str, errors: &mut Vec<FieldError>) {
    if zip_code.is_empty() {
        errors.push(FieldError::field(
            "body",
            "zipCode",
            zip_code,
            "Zip code is required",
        ));
    }
    if !matches(&ZIP_REGEX, ZIP_PATTERN, zip_code) {
        errors.push(FieldError::field(
            "body",
            "zipCode",
            zip_code,
            "Zip code must be in format 12345 or 12345-6789",
        ));
    }
}

/// Validate a path id
pub fn user_id(raw: &str) -> Result<UserId, Vec<FieldError>> {
    UserId::parse(raw).ok_or_else(|| {
        vec![FieldError::field(
            "params",
            "id",
            raw,
            "Invalid user ID format",
        )]
    })
}

/// Validate a create body; both fields are required
pub fn create_user(body: &Value) -> Result<CreateUser, Vec<FieldError>> {
    let name = text(body, "name").unwrap_or_default();
    let zip_code = text(body, "zipCode").unwrap_or_default();

    let mut errors = Vec::new();
    check_name(&name, &mut errors);
    check_zip_code(&zip_code, &mut errors);

    if errors.is_empty() {
        Ok(CreateUser::new(name, zip_code))
    } else {
        Err(errors)
    }
}

/// Validate an update body; absent fields are left unchanged
pub fn update_user(body: &Value) -> Result<UpdateUser, Vec<FieldError>> {
    let name = text(body, "name");
    let zip_code = text(body, "zipCode");

    let mut errors = Vec::new();
    if let Some(name) = &name {
        check_name(name, &mut errors);
    }
    if let Some(zip_code) = &zip_code {
        check_zip_code(zip_code, &mut errors);
    }

    if errors.is_empty() {
        Ok(UpdateUser { name, zip_code })
    } else {
        Err(errors)
    }
}

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::parse_optional_date;

// One message per failing form field, carried back into the re-rendered form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

// Decoded urlencoded body as a field multimap. Keeping every (name, value)
// pair preserves checkbox groups that repeat the same field name; an absent
// field reads as an empty sequence and a scalar as a one-element sequence.
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, Vec<String>>,
}

impl FormFields {
    pub fn parse(body: &[u8]) -> LibraryResult<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|err| LibraryError::validation(
                format!("malformed form body {:?}", err).as_str(), None))?;
        let mut fields: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in pairs {
            fields.entry(name).or_default().push(value);
        }
        Ok(Self { fields })
    }

    // first submitted value, empty string when absent
    pub fn value(&self, name: &str) -> &str {
        self.fields.get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn values(&self, name: &str) -> Vec<String> {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

// Trim and HTML-escape untrusted input before use or storage.
pub fn sanitize(raw: &str) -> String {
    escape(raw.trim())
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// Optional ISO-8601 date field, validated only when present.
pub fn optional_date(field: &str, raw: &str, message: &str) -> Result<Option<NaiveDate>, FieldError> {
    parse_optional_date(raw).map_err(|_| FieldError::new(field, message))
}

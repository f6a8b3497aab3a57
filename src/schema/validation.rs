//! Field-by-field payload validation.
//!
//! A [`Payload`] walks a JSON object against an allowlist. Every accessor
//! records the field as allowed and, when the value is missing or has the
//! wrong shape, a [`FieldError`]. Nothing short-circuits: [`Payload::finish`]
//! reports every violation at once, plus any key the caller was not allowed
//! to send.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// A single rejected field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Every field that failed validation for one payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid payload: {}", summarize(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Names of the rejected fields, in report order.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reader over a raw creation payload.
pub struct Payload<'a> {
    object: Option<&'a Map<String, Value>>,
    allowed: BTreeSet<&'static str>,
    errors: Vec<FieldError>,
}

impl<'a> Payload<'a> {
    pub fn new(value: &'a Value) -> Self {
        let mut errors = Vec::new();
        let object = match value {
            Value::Object(map) => Some(map),
            other => {
                errors.push(FieldError::new(
                    "",
                    format!("expected an object, received {}", json_kind(other)),
                ));
                None
            }
        };

        Self {
            object,
            allowed: BTreeSet::new(),
            errors,
        }
    }

    /// Marks `field` as allowed and returns its value, treating `null` as absent.
    fn lookup(&mut self, field: &'static str) -> Option<&'a Value> {
        self.allowed.insert(field);
        self.object
            .and_then(|map| map.get(field))
            .filter(|v| !v.is_null())
    }

    fn reject(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn missing(&mut self, field: &'static str) {
        // A non-object payload is already reported once as a whole.
        if self.object.is_some() {
            self.reject(field, "required");
        }
    }

    fn as_string(&mut self, field: &'static str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.reject(
                    field,
                    format!("expected a string, received {}", json_kind(other)),
                );
                None
            }
        }
    }

    fn as_integer(&mut self, field: &'static str, value: &Value) -> Option<i64> {
        match value.as_i64() {
            Some(n) => Some(n),
            None if value.is_number() => {
                self.reject(field, "expected an integer");
                None
            }
            None => {
                self.reject(
                    field,
                    format!("expected an integer, received {}", json_kind(value)),
                );
                None
            }
        }
    }

    /// Required string. Returns an empty string when rejected; the caller
    /// only sees it if [`Payload::finish`] succeeds, which it will not.
    pub fn required_str(&mut self, field: &'static str) -> String {
        match self.lookup(field) {
            Some(value) => self.as_string(field, value).unwrap_or_default(),
            None => {
                self.missing(field);
                String::new()
            }
        }
    }

    pub fn optional_str(&mut self, field: &'static str) -> Option<String> {
        let value = self.lookup(field)?;
        self.as_string(field, value)
    }

    pub fn required_int(&mut self, field: &'static str) -> i64 {
        match self.lookup(field) {
            Some(value) => self.as_integer(field, value).unwrap_or_default(),
            None => {
                self.missing(field);
                0
            }
        }
    }

    pub fn optional_int(&mut self, field: &'static str) -> Option<i64> {
        let value = self.lookup(field)?;
        self.as_integer(field, value)
    }

    /// Optional list of strings. Absent and `null` yield `None`; `[]` yields
    /// `Some(vec![])`. Each non-string element is reported as `field[i]`.
    pub fn optional_list(&mut self, field: &'static str) -> Option<Vec<String>> {
        let value = self.lookup(field)?;
        let Value::Array(items) = value else {
            self.reject(
                field,
                format!("expected an array, received {}", json_kind(value)),
            );
            return None;
        };

        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => {
                    ok = false;
                    self.reject(
                        format!("{}[{}]", field, i),
                        format!("expected a string, received {}", json_kind(other)),
                    );
                }
            }
        }

        ok.then_some(out)
    }

    /// Required string field run through `parse`.
    pub fn required_parsed<T>(
        &mut self,
        field: &'static str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        match self.lookup(field) {
            Some(value) => self.parsed(field, value, parse),
            None => {
                self.missing(field);
                None
            }
        }
    }

    pub fn optional_parsed<T>(
        &mut self,
        field: &'static str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let value = self.lookup(field)?;
        self.parsed(field, value, parse)
    }

    fn parsed<T>(
        &mut self,
        field: &'static str,
        value: &Value,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let raw = self.as_string(field, value)?;
        match parse(&raw) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                self.reject(field, message);
                None
            }
        }
    }

    /// Rejects keys outside the allowlist and returns every collected error.
    pub fn finish(mut self) -> Result<(), ValidationError> {
        if let Some(map) = self.object {
            // serde_json's Map iterates in sorted key order.
            for key in map.keys() {
                if !self.allowed.contains(key.as_str()) {
                    self.errors.push(FieldError::new(key.clone(), "unrecognized field"));
                }
            }
        }

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

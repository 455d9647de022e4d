//! Payload Validation
//!
//! Turns a loosely-typed JSON body into a typed `NewProduct` or
//! `ProductPatch`, or a field-keyed error map suitable for a 422 body.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{NewProduct, ProductPatch};

// == Constants ==
/// Maximum length in characters for `name` and `description`.
pub const MAX_STRING_LENGTH: usize = 255;

// == Validation Errors ==
/// Field name to list of messages, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for `field`, empty if none.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

// == Rules ==
/// Whether a field must be present or is only checked when supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Sometimes,
}

/// Collects per-field outcomes so every failing field is reported at once.
struct Validator<'a> {
    payload: &'a Map<String, Value>,
    presence: Presence,
    errors: ValidationErrors,
}

impl<'a> Validator<'a> {
    fn new(payload: &'a Map<String, Value>, presence: Presence) -> Self {
        Self {
            payload,
            presence,
            errors: ValidationErrors::new(),
        }
    }

    /// Applies `required`, returning the value only when there is
    /// something further to check.
    fn present(&mut self, field: &str) -> Option<&'a Value> {
        let payload: &'a Map<String, Value> = self.payload;
        match payload.get(field) {
            None if self.presence == Presence::Sometimes => None,
            Some(value) if !is_blank(value) => Some(value),
            _ => {
                self.errors
                    .add(field, format!("The {field} field is required."));
                None
            }
        }
    }

    fn string(&mut self, field: &str) -> Option<String> {
        let value = self.present(field)?;
        let Some(s) = value.as_str() else {
            self.errors
                .add(field, format!("The {field} field must be a string."));
            return None;
        };
        if s.chars().count() > MAX_STRING_LENGTH {
            self.errors.add(
                field,
                format!(
                    "The {field} field must not be greater than {MAX_STRING_LENGTH} characters."
                ),
            );
            return None;
        }
        Some(s.to_string())
    }

    fn numeric(&mut self, field: &str) -> Option<f64> {
        let value = self.present(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed.filter(|n| n.is_finite()) {
            Some(n) => Some(n),
            None => {
                self.errors
                    .add(field, format!("The {field} field must be a number."));
                None
            }
        }
    }

    fn integer(&mut self, field: &str) -> Option<i64> {
        let value = self.present(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    // i64::MAX as f64 rounds up to 2^63, which is out of range
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors
                .add(field, format!("The {field} field must be an integer."));
        }
        parsed
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

/// Null, blank strings and empty arrays all count as "not supplied".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn as_object(payload: &Value) -> Map<String, Value> {
    match payload {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    }
}

// == Entry Points ==
/// Validates a creation payload. Every field is required.
pub fn validate_new_product(payload: &Value) -> Result<NewProduct, ValidationErrors> {
    let map = as_object(payload);
    let mut v = Validator::new(&map, Presence::Required);

    let name = v.string("name");
    let price = v.numeric("price");
    let description = v.string("description");
    let stock = v.integer("stock");

    match (name, description, price, stock) {
        (Some(name), Some(description), Some(price), Some(stock)) => v.finish(NewProduct {
            name,
            description,
            price,
            stock,
        }),
        _ => Err(v.errors),
    }
}

/// Validates a partial update. Omitted fields pass; supplied fields
/// must satisfy the same rules as on creation, including non-null.
pub fn validate_product_patch(payload: &Value) -> Result<ProductPatch, ValidationErrors> {
    let map = as_object(payload);
    let mut v = Validator::new(&map, Presence::Sometimes);

    let patch = ProductPatch {
        name: v.string("name"),
        price: v.numeric("price"),
        description: v.string("description"),
        stock: v.integer("stock"),
    };
    v.finish(patch)
}

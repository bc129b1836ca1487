//! Payload validation for listing and review forms.
//!
//! Payloads arrive untyped (a JSON tree built from the submitted form). Each
//! validator either returns the typed input or every field error it found,
//! phrased the way the form library reports them, e.g.
//! `"listing.price" must be greater than or equal to 0`.

use super::{ListingInput, ReviewInput};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    fn push(&mut self, message: String) {
        self.0.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl std::error::Error for ValidationErrors {}

const LISTING_FIELDS: &[&str] = &["title", "description", "price", "location", "country"];
const REVIEW_FIELDS: &[&str] = &["rating", "comment"];

/// Validates `{ "listing": { title, description, price, location, country } }`.
pub fn validate_listing(payload: &JsonValue) -> Result<ListingInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let fields = nested_object(payload, "listing", LISTING_FIELDS, &mut errors);

    let parsed = fields.map(|obj| {
        (
            required_string(obj, "listing", "title", &mut errors),
            required_string(obj, "listing", "description", &mut errors),
            required_number(obj, "listing", "price", &mut errors)
                .and_then(|p| at_least(p, 0.0, "listing", "price", &mut errors)),
            required_string(obj, "listing", "location", &mut errors),
            required_string(obj, "listing", "country", &mut errors),
        )
    });
    reject_unknown(payload, "listing", &mut errors);

    match parsed {
        Some((Some(title), Some(description), Some(price), Some(location), Some(country)))
            if errors.is_empty() =>
        {
            Ok(ListingInput {
                title,
                description,
                price,
                location,
                country,
            })
        }
        _ => Err(errors),
    }
}

/// Validates `{ "review": { rating, comment } }` with an integer rating in 1..=5.
pub fn validate_review(payload: &JsonValue) -> Result<ReviewInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let fields = nested_object(payload, "review", REVIEW_FIELDS, &mut errors);

    let parsed = fields.map(|obj| {
        let rating = required_number(obj, "review", "rating", &mut errors)
            .and_then(|r| at_least(r, 1.0, "review", "rating", &mut errors))
            .and_then(|r| at_most(r, 5.0, "review", "rating", &mut errors))
            .and_then(|r| {
                if r.fract() == 0.0 {
                    Some(r as u8)
                } else {
                    errors.push("\"review.rating\" must be an integer".to_string());
                    None
                }
            });
        let comment = required_string(obj, "review", "comment", &mut errors);
        (rating, comment)
    });
    reject_unknown(payload, "review", &mut errors);

    match parsed {
        Some((Some(rating), Some(comment))) if errors.is_empty() => Ok(ReviewInput { rating, comment }),
        _ => Err(errors),
    }
}

fn nested_object<'a>(
    payload: &'a JsonValue,
    key: &str,
    allowed: &[&str],
    errors: &mut ValidationErrors,
) -> Option<&'a Map<String, JsonValue>> {
    let Some(root) = payload.as_object() else {
        errors.push("\"value\" must be of type object".to_string());
        return None;
    };
    match root.get(key) {
        None | Some(JsonValue::Null) => {
            errors.push(format!("\"{key}\" is required"));
            None
        }
        Some(JsonValue::Object(obj)) => {
            for field in obj.keys().filter(|k| !allowed.contains(&k.as_str())) {
                errors.push(format!("\"{key}.{field}\" is not allowed"));
            }
            Some(obj)
        }
        Some(_) => {
            errors.push(format!("\"{key}\" must be of type object"));
            None
        }
    }
}

/// Only the named object may appear at the top level.
fn reject_unknown(payload: &JsonValue, key: &str, errors: &mut ValidationErrors) {
    if let Some(root) = payload.as_object() {
        for extra in root.keys().filter(|k| k.as_str() != key) {
            errors.push(format!("\"{extra}\" is not allowed"));
        }
    }
}

fn required_string(
    obj: &Map<String, JsonValue>,
    parent: &str,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match obj.get(field) {
        None | Some(JsonValue::Null) => {
            errors.push(format!("\"{parent}.{field}\" is required"));
            None
        }
        Some(JsonValue::String(s)) if s.is_empty() => {
            errors.push(format!("\"{parent}.{field}\" is not allowed to be empty"));
            None
        }
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("\"{parent}.{field}\" must be a string"));
            None
        }
    }
}

/// Numbers may arrive as JSON numbers or, from forms, as numeric strings.
fn required_number(
    obj: &Map<String, JsonValue>,
    parent: &str,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let value = match obj.get(field) {
        None | Some(JsonValue::Null) => {
            errors.push(format!("\"{parent}.{field}\" is required"));
            return None;
        }
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match value.filter(|v| v.is_finite()) {
        Some(v) => Some(v),
        None => {
            errors.push(format!("\"{parent}.{field}\" must be a number"));
            None
        }
    }
}

fn at_least(value: f64, min: f64, parent: &str, field: &str, errors: &mut ValidationErrors) -> Option<f64> {
    if value < min {
        errors.push(format!("\"{parent}.{field}\" must be greater than or equal to {min}"));
        return None;
    }
    Some(value)
}

fn at_most(value: f64, max: f64, parent: &str, field: &str, errors: &mut ValidationErrors) -> Option<f64> {
    if value > max {
        errors.push(format!("\"{parent}.{field}\" must be less than or equal to {max}"));
        return None;
    }
    Some(value)
}

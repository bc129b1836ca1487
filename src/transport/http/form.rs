//! Form bodies with bracketed keys.
//!
//! `listing[title]=Cabin&listing[price]=100` decodes into
//! `{"listing": {"title": "Cabin", "price": "100"}}`, which is the shape the
//! validators expect. Repeated keys keep the last value.

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Form;
use serde_json::{Map, Value as JsonValue};
use std::convert::Infallible;
use tracing::debug;

/// The untyped, nested form payload of a request.
///
/// A body that is missing or not form-encoded yields an empty object, so the
/// validator reports the missing fields instead of the request failing early.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPayload(pub JsonValue);

#[async_trait]
impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Form::<Vec<(String, String)>>::from_request(req, state).await {
            Ok(Form(pairs)) => pairs,
            Err(rejection) => {
                debug!(%rejection, "form body not decoded, treating as empty");
                Vec::new()
            }
        };
        Ok(FormPayload(nest_pairs(pairs)))
    }
}

pub fn nest_pairs(pairs: Vec<(String, String)>) -> JsonValue {
    let mut root = Map::new();
    for (key, value) in pairs {
        insert_path(&mut root, &key_path(&key), value);
    }
    JsonValue::Object(root)
}

/// `a[b][c]` -> `["a", "b", "c"]`. Anything malformed is kept as one plain key.
fn key_path(key: &str) -> Vec<&str> {
    let Some(open) = key.find('[') else {
        return vec![key];
    };
    let (head, mut rest) = key.split_at(open);
    if head.is_empty() {
        return vec![key];
    }
    let mut path = vec![head];
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            return vec![key];
        };
        path.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    if !rest.is_empty() {
        return vec![key];
    }
    path
}

fn insert_path(target: &mut Map<String, JsonValue>, path: &[&str], value: String) {
    match path {
        [] => {}
        [last] => {
            target.insert(last.to_string(), JsonValue::String(value));
        }
        [first, rest @ ..] => {
            let entry = target
                .entry(first.to_string())
                .or_insert_with(|| JsonValue::Object(Map::new()));
            if !entry.is_object() {
                *entry = JsonValue::Object(Map::new());
            }
            if let JsonValue::Object(child) = entry {
                insert_path(child, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn bracketed_keys_become_nested_objects() {
        let nested = nest_pairs(pairs(&[
            ("listing[title]", "Cabin"),
            ("listing[price]", "100"),
            ("plain", "x"),
        ]));
        assert_eq!(
            nested,
            json!({ "listing": { "title": "Cabin", "price": "100" }, "plain": "x" })
        );
    }

    #[test]
    fn deeper_nesting_and_last_value_wins() {
        let nested = nest_pairs(pairs(&[("a[b][c]", "1"), ("a[b][c]", "2"), ("a[d]", "3")]));
        assert_eq!(nested, json!({ "a": { "b": { "c": "2" }, "d": "3" } }));
    }

    #[test]
    fn malformed_keys_stay_flat() {
        assert_eq!(key_path("listing[title"), vec!["listing[title"]);
        assert_eq!(key_path("[title]"), vec!["[title]"]);
        assert_eq!(key_path("listing[title]x"), vec!["listing[title]x"]);
    }

    #[test]
    fn scalar_is_replaced_by_object_when_nested_later() {
        let nested = nest_pairs(pairs(&[("review", "x"), ("review[comment]", "Great")]));
        assert_eq!(nested, json!({ "review": { "comment": "Great" } }));
    }
}

//! Typed models mapped from `wp/v2` JSON.
//!
//! # Design
//! Each model has named fields for the keys WordPress documents and an
//! `extra` map for everything else. `FromJson` walks the JSON object once
//! and dispatches per key: the four date fields go through `date::parse`,
//! a post's `categories`/`tags` id lists are expanded into full terms by
//! calling back into the client (one request per id, in order), and all
//! remaining keys are decoded into their field or kept verbatim.
//!
//! Every model keeps the payload it was parsed from (`raw()`) and a weak
//! `ClientHandle` used by instance operations such as `Post::update`. The
//! handle and the payload are excluded from serialization.

mod post;
mod revision;
mod term;

use std::fmt;
use std::ops::Deref;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::WordPress;
use crate::date;
use crate::error::WpError;

pub use post::Post;
pub use revision::PostRevision;
pub use term::{Category, Tag};

/// The resource a model was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Post,
    PostRevision,
    Category,
    Tag,
}

impl ModelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Post => "post",
            ModelKind::PostRevision => "revision",
            ModelKind::Category => "category",
            ModelKind::Tag => "tag",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavior shared by every parsed model.
pub trait Model: fmt::Debug {
    fn kind(&self) -> ModelKind;

    fn id(&self) -> i64;

    /// The JSON object this instance was parsed from.
    fn raw(&self) -> &Value;
}

/// Compare two models of any kind.
///
/// Models of the same kind are equal iff their ids match. Comparing across
/// kinds is an error, not `false`.
pub fn try_eq(left: &dyn Model, right: &dyn Model) -> Result<bool, WpError> {
    if left.kind() != right.kind() {
        return Err(WpError::KindMismatch {
            left: left.kind().as_str(),
            right: right.kind().as_str(),
        });
    }
    Ok(left.id() == right.id())
}

/// Construction of a model from one JSON object.
pub trait FromJson: Sized {
    /// `client` becomes the instance's back-reference; `None` yields a
    /// detached model whose client-backed operations fail.
    fn from_json(client: Option<&WordPress>, json: &Value) -> Result<Self, WpError>;
}

/// Parse a JSON array into a `ResultSet`, preserving order.
///
/// Falsy entries (`null`, `false`, `0`, `""`, `[]`, `{}`) are skipped. The
/// first entry that fails to parse fails the whole list.
pub fn parse_list<T: FromJson>(
    client: Option<&WordPress>,
    json: &Value,
) -> Result<ResultSet<T>, WpError> {
    let entries = json.as_array().ok_or_else(|| {
        WpError::Deserialization(format!("expected a JSON array, got {}", type_name(json)))
    })?;
    entries
        .iter()
        .filter(|entry| !is_falsy(entry))
        .map(|entry| T::from_json(client, entry))
        .collect()
}

/// Ordered models returned by a list operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet<T>(Vec<T>);

impl<T> ResultSet<T> {
    pub fn new() -> Self {
        ResultSet(Vec::new())
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub(crate) fn push(&mut self, item: T) {
        self.0.push(item);
    }
}

impl<T: Model> ResultSet<T> {
    /// The `id` of every element, in order.
    pub fn ids(&self) -> Vec<i64> {
        self.0.iter().map(Model::id).collect()
    }
}

impl<T> Default for ResultSet<T> {
    fn default() -> Self {
        ResultSet::new()
    }
}

impl<T> Deref for ResultSet<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> FromIterator<T> for ResultSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ResultSet(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for ResultSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResultSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// Per-key decoding helpers shared by the model parsers.

fn object<'a>(json: &'a Value, kind: ModelKind) -> Result<&'a Map<String, Value>, WpError> {
    json.as_object().ok_or_else(|| {
        WpError::Deserialization(format!("expected a {kind} object, got {}", type_name(json)))
    })
}

fn require_id(object: &Map<String, Value>, kind: ModelKind) -> Result<i64, WpError> {
    object
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| WpError::Deserialization(format!("{kind} has no integer id")))
}

/// `null` maps to `None`; anything other than a string in the fixed format
/// is an `InvalidDate`.
fn date_field(key: &str, value: &Value) -> Result<Option<NaiveDateTime>, WpError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => date::parse(key, s).map(Some),
        other => Err(WpError::InvalidDate {
            field: key.to_string(),
            value: other.to_string(),
        }),
    }
}

fn typed_field<T: DeserializeOwned>(key: &str, value: &Value) -> Result<Option<T>, WpError> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value.clone())
        .map(Some)
        .map_err(|e| WpError::Deserialization(format!("{key}: {e}")))
}

fn id_list(key: &str, value: &Value) -> Result<Vec<i64>, WpError> {
    Ok(typed_field::<Vec<i64>>(key, value)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_list_skips_falsy_entries_and_keeps_order() {
        let json = json!([
            null,
            {"id": 3, "name": "Three"},
            {},
            {"id": 1, "name": "One"},
            false,
        ]);
        let categories: ResultSet<Category> = parse_list(None, &json).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories.ids(), vec![3, 1]);
    }

    #[test]
    fn parse_list_rejects_non_arrays() {
        let err = parse_list::<Tag>(None, &json!({"id": 1})).unwrap_err();
        assert!(matches!(err, WpError::Deserialization(ref msg) if msg.contains("an object")));
    }

    #[test]
    fn one_bad_entry_fails_the_whole_list() {
        let json = json!([
            {"id": 1, "date": "2020-01-02T03:04:05"},
            {"id": 2, "date": "yesterday"},
        ]);
        let err = parse_list::<PostRevision>(None, &json).unwrap_err();
        assert!(matches!(err, WpError::InvalidDate { .. }));
    }

    #[test]
    fn ids_follow_input_order() {
        let json = json!([{"id": 1, "name": "a"}, {"id": 3, "name": "b"}]);
        let categories: ResultSet<Category> = parse_list(None, &json).unwrap();
        assert_eq!(categories.ids(), vec![1, 3]);
    }

    #[test]
    fn try_eq_compares_ids_within_a_kind() {
        let a = Category::from_json(None, &json!({"id": 1, "name": "a"})).unwrap();
        let b = Category::from_json(None, &json!({"id": 1, "name": "b"})).unwrap();
        let c = Category::from_json(None, &json!({"id": 2, "name": "a"})).unwrap();
        assert!(try_eq(&a, &b).unwrap());
        assert!(!try_eq(&a, &c).unwrap());
    }

    #[test]
    fn try_eq_across_kinds_is_an_error() {
        let post = Post::from_json(None, &json!({"id": 1})).unwrap();
        let category = Category::from_json(None, &json!({"id": 1})).unwrap();
        let err = try_eq(&post, &category).unwrap_err();
        assert!(matches!(
            err,
            WpError::KindMismatch {
                left: "post",
                right: "category"
            }
        ));
    }

    #[test]
    fn missing_id_is_rejected() {
        let err = Tag::from_json(None, &json!({"name": "untitled"})).unwrap_err();
        assert!(matches!(err, WpError::Deserialization(_)));
    }
}

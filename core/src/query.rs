//! Query-string encoding for request parameters.
//!
//! # Design
//! `Query` is a `BTreeMap`, so pairs are always emitted in sorted key order
//! regardless of how the caller inserted them. Values form a small tagged
//! union: scalars, lists of scalars, explicit nulls, and arbitrary JSON.
//! Anything that is not a scalar or a flat list (objects, nested arrays) is
//! encoded as compact JSON text rather than rejected, so encoding never fails.
//!
//! Values are percent-encoded with `application/x-www-form-urlencoded` rules
//! (space becomes `+`), matching what `url::form_urlencoded::parse` decodes.

use std::collections::BTreeMap;

use serde_json::Value;
use url::form_urlencoded;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Dropped from the encoded output.
    Null,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Expands to one pair per element, in order.
    List(Vec<QueryValue>),
    /// Encoded as compact JSON text.
    Json(Value),
}

impl QueryValue {
    /// Textual form of a single element, or `None` if it should be skipped.
    fn render(&self) -> Option<String> {
        match self {
            QueryValue::Null => None,
            QueryValue::Str(s) if s.is_empty() => None,
            QueryValue::Str(s) => Some(s.clone()),
            QueryValue::Int(n) => Some(n.to_string()),
            QueryValue::Float(f) => Some(f.to_string()),
            QueryValue::Bool(b) => Some(b.to_string()),
            // A list nested inside a list has no flat representation.
            QueryValue::List(items) => {
                let json: Vec<Value> = items.iter().map(QueryValue::to_json).collect();
                Some(Value::Array(json).to_string())
            }
            QueryValue::Json(v) => render_json(v),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            QueryValue::Null => Value::Null,
            QueryValue::Str(s) => Value::String(s.clone()),
            QueryValue::Int(n) => Value::from(*n),
            QueryValue::Float(f) => Value::from(*f),
            QueryValue::Bool(b) => Value::Bool(*b),
            QueryValue::List(items) => Value::Array(items.iter().map(QueryValue::to_json).collect()),
            QueryValue::Json(v) => v.clone(),
        }
    }
}

/// Render a JSON value appearing in scalar position.
fn render_json(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(render_number(n)),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

fn render_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Str(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Str(s)
    }
}

impl From<&String> for QueryValue {
    fn from(s: &String) -> Self {
        QueryValue::Str(s.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Bool(b)
    }
}

impl From<f64> for QueryValue {
    fn from(f: f64) -> Self {
        QueryValue::Float(f)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for QueryValue {
            fn from(n: $t) -> Self {
                QueryValue::Int(i64::from(n))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(QueryValue::Null)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(items: Vec<T>) -> Self {
        QueryValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for QueryValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => QueryValue::Null,
            Value::Bool(b) => QueryValue::Bool(b),
            Value::String(s) => QueryValue::Str(s),
            Value::Array(items) => QueryValue::List(items.into_iter().map(QueryValue::from).collect()),
            other => QueryValue::Json(other),
        }
    }
}

/// Query parameters for a request, keyed and iterated in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    params: BTreeMap<String, QueryValue>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. A later value for the same key replaces the earlier one.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Build a query from a JSON object. Returns `None` for any other JSON shape.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let params = object
            .iter()
            .map(|(k, v)| (k.clone(), QueryValue::from(v.clone())))
            .collect();
        Some(Self { params })
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    /// Encode to a query string without a leading `?`.
    pub fn encode(&self) -> String {
        generate_query(self)
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (k, v) in iter {
            query.insert(k, v);
        }
        query
    }
}

/// Flatten `query` into a URL query string (no leading `?`).
///
/// Null and empty-string values are dropped, lists expand to repeated keys in
/// element order, and an empty query yields an empty string.
pub fn generate_query(query: &Query) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &query.params {
        match value {
            QueryValue::List(items) => {
                for item in items {
                    if let Some(text) = item.render() {
                        serializer.append_pair(key, &text);
                    }
                }
            }
            QueryValue::Json(Value::Array(items)) => {
                for item in items {
                    if let Some(text) = render_json(item) {
                        serializer.append_pair(key, &text);
                    }
                }
            }
            scalar => {
                if let Some(text) = scalar.render() {
                    serializer.append_pair(key, &text);
                }
            }
        }
    }
    serializer.finish()
}

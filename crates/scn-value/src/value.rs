// SPDX-License-Identifier: Apache-2.0
//! The closed set of value variants scene documents are built from.

/// An immutable tagged tree node.
///
/// A `Value` tree is built fresh per export and never mutated after being
/// attached to a parent. Struct and map entries are ordered vectors rather
/// than hash maps: insertion order is semantically significant and must
/// survive into the rendered document.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Double-quoted, escaped string scalar.
    String(String),
    /// Bare decimal integer scalar.
    Int(i64),
    /// Decimal float scalar. Must be finite; the encoder rejects NaN and
    /// infinity as a programming error rather than emitting them.
    Float(f64),
    /// Lowercase `true`/`false`.
    Bool(bool),
    /// Positional sequence rendered parenthesized.
    Tuple(Vec<Value>),
    /// Sequence rendered bracketed; empty renders as `[]`.
    List(Vec<Value>),
    /// Ordered named fields, rendered parenthesized with unquoted keys.
    Struct(Vec<(String, Value)>),
    /// Ordered key/value entries, rendered curly-braced with encoded keys.
    Map(Vec<(Value, Value)>),
    /// Tagged enum variant: bare `variant`, or `variant` concatenated with
    /// its payload's rendering (payload is conventionally a tuple or struct).
    Enum {
        /// Variant name, rendered verbatim.
        variant: String,
        /// Optional payload; `None` renders the bare variant name.
        payload: Option<Box<Value>>,
    },
}

impl Value {
    /// Build a tuple from an ordered sequence of values.
    pub fn tuple<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Value::Tuple(values.into_iter().collect())
    }

    /// Build a list from an ordered sequence of values.
    pub fn list<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Value::List(values.into_iter().collect())
    }

    /// Build a struct from ordered `(name, value)` fields.
    pub fn structure<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a map from ordered `(key, value)` entries.
    pub fn map<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    /// A payload-less enum variant, e.g. `None` or `Opaque`.
    pub fn variant(name: impl Into<String>) -> Self {
        Value::Enum {
            variant: name.into(),
            payload: None,
        }
    }

    /// An enum variant carrying a payload, e.g. `Some("x")` or `Click(1,2)`.
    ///
    /// Callers choose a [`Value::Tuple`] payload for positional variants or a
    /// [`Value::Struct`] payload for named-field variants to match the target
    /// schema.
    pub fn variant_with(name: impl Into<String>, payload: Value) -> Self {
        Value::Enum {
            variant: name.into(),
            payload: Some(Box::new(payload)),
        }
    }

    /// Tag `value` with a fully-qualified engine type path.
    ///
    /// This is the mechanism by which the runtime's reflection-based
    /// deserializer recovers concrete types from a dynamically-typed
    /// document. It is pure sugar for — and renders byte-identically to —
    /// the explicit map `{"type": type_path, "value": value}`.
    pub fn reflected(type_path: impl Into<String>, value: Value) -> Self {
        Value::Map(vec![
            (Value::String("type".into()), Value::String(type_path.into())),
            (Value::String("value".into()), value),
        ])
    }

    /// Widen an `f32` to the canonical `f64` that renders with the same
    /// shortest decimal form as the original single-precision value.
    ///
    /// A plain `f64::from` widening of e.g. `0.1_f32` would render as
    /// `0.10000000149011612`; re-reading the shortest decimal keeps the
    /// document human-readable without losing the f32 value.
    pub fn float32(value: f32) -> Self {
        let shortest = format!("{value}");
        Value::Float(shortest.parse::<f64>().unwrap_or_else(|_| f64::from(value)))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::float32(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

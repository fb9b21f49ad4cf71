//! Records: named fixed-field structured values
//!
//! A record couples a namespace-qualified type name with an ordered
//! field map. Encoding a record yields a tagged literal whose payload
//! is a keyword-keyed map; a record constructor registered for the
//! tag validates the field set on the way back in.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::DecodeError;
use crate::symbol::{Keyword, Symbol};
use crate::tag::TagHandler;
use crate::value::Value;

/// A named, fixed-field structured value.
///
/// Fields keep declaration order for display; equality is field-set
/// based, so two records with the same fields in different order are
/// equal.
///
/// # Example
///
/// ```
/// use mallorn::{Record, Value};
///
/// let rec = Record::new("user", "SimpleRecord").with_field("a", Value::Int(42));
/// assert_eq!(rec.to_value().to_string(), "#user/SimpleRecord {:a 42}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    tag: Symbol,
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Create an empty record of the given namespaced type.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: Symbol::namespaced(namespace, name),
            fields: IndexMap::new(),
        }
    }

    /// Add a field (builder pattern).
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a field, replacing any existing value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The record's tag (namespace-qualified type name).
    pub fn tag(&self) -> &Symbol {
        &self.tag
    }

    /// The fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode as a tagged value: the tag plus a keyword-keyed map of
    /// the fields in declaration order.
    pub fn to_value(&self) -> Value {
        let payload = Value::map(
            self.fields
                .iter()
                .map(|(k, v)| (Value::Keyword(Keyword::new(k.clone())), v.clone())),
        );
        Value::tagged(self.tag.clone(), payload)
    }

    /// Rebuild a record from a decoded tag payload.
    ///
    /// The payload must be a map with bare keyword keys; anything
    /// else is a constructor failure.
    pub fn from_value(tag: Symbol, payload: Value) -> Result<Self, DecodeError> {
        let Some(map) = payload.as_map() else {
            return Err(DecodeError::Constructor {
                tag,
                reason: format!("payload must be a map, got {}", payload),
            });
        };
        let mut fields = IndexMap::with_capacity(map.len());
        for (k, v) in map.iter() {
            match k.as_keyword() {
                Some(kw) if kw.namespace().is_none() => {
                    fields.insert(kw.name().to_string(), v.clone());
                }
                _ => {
                    return Err(DecodeError::Constructor {
                        tag,
                        reason: format!("field key must be a bare keyword, got {}", k),
                    });
                }
            }
        }
        Ok(Self { tag, fields })
    }

    /// Build a tag handler that reconstructs records of this type.
    ///
    /// The handler rejects payloads whose field set differs from
    /// `declared` — a missing or unexpected field is a constructor
    /// failure — and yields the record normalized to declared field
    /// order.
    pub fn constructor(tag: Symbol, declared: Vec<String>) -> TagHandler {
        Arc::new(move |payload| {
            let record = Record::from_value(tag.clone(), payload)?;
            for name in &declared {
                if !record.fields.contains_key(name) {
                    return Err(DecodeError::Constructor {
                        tag: tag.clone(),
                        reason: format!("missing field :{}", name),
                    });
                }
            }
            for name in record.fields.keys() {
                if !declared.contains(name) {
                    return Err(DecodeError::Constructor {
                        tag: tag.clone(),
                        reason: format!("unexpected field :{}", name),
                    });
                }
            }
            let mut normalized = Record {
                tag: tag.clone(),
                fields: IndexMap::with_capacity(declared.len()),
            };
            for name in &declared {
                normalized.fields.insert(name.clone(), record.fields[name].clone());
            }
            Ok(normalized.to_value())
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_access() {
        let rec = Record::new("user", "Point")
            .with_field("x", Value::Int(1))
            .with_field("y", Value::Int(2));
        assert_eq!(rec.tag(), &Symbol::namespaced("user", "Point"));
        assert_eq!(rec.get("x"), Some(&Value::Int(1)));
        assert_eq!(rec.get("z"), None);
        assert_eq!(rec.len(), 2);
    }

    #[test]
    fn test_field_set_equality() {
        let a = Record::new("user", "Point")
            .with_field("x", Value::Int(1))
            .with_field("y", Value::Int(2));
        let b = Record::new("user", "Point")
            .with_field("y", Value::Int(2))
            .with_field("x", Value::Int(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_value_display() {
        let rec = Record::new("user", "SimpleRecord").with_field("a", Value::Int(42));
        assert_eq!(rec.to_string(), "#user/SimpleRecord {:a 42}");
    }

    #[test]
    fn test_from_value_rejects_non_map() {
        let err = Record::from_value(Symbol::namespaced("user", "Point"), Value::Int(1))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Constructor { .. }));
    }

    #[test]
    fn test_from_value_rejects_non_keyword_keys() {
        let payload = Value::map([(Value::string("x"), Value::Int(1))]);
        let err =
            Record::from_value(Symbol::namespaced("user", "Point"), payload).unwrap_err();
        assert!(matches!(err, DecodeError::Constructor { .. }));
    }

    #[test]
    fn test_constructor_validates_field_set() {
        let tag = Symbol::namespaced("user", "Point");
        let ctor = Record::constructor(tag, vec!["x".into(), "y".into()]);

        let missing = Value::map([(Value::keyword("x"), Value::Int(1))]);
        let err = ctor(missing).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Constructor { ref reason, .. } if reason.contains("missing field :y")
        ));

        let extra = Value::map([
            (Value::keyword("x"), Value::Int(1)),
            (Value::keyword("y"), Value::Int(2)),
            (Value::keyword("z"), Value::Int(3)),
        ]);
        let err = ctor(extra).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Constructor { ref reason, .. } if reason.contains("unexpected field :z")
        ));
    }

    #[test]
    fn test_constructor_normalizes_field_order() {
        let tag = Symbol::namespaced("user", "Point");
        let ctor = Record::constructor(tag.clone(), vec!["x".into(), "y".into()]);

        let shuffled = Value::map([
            (Value::keyword("y"), Value::Int(2)),
            (Value::keyword("x"), Value::Int(1)),
        ]);
        let v = ctor(shuffled).unwrap();
        assert_eq!(v.to_string(), "#user/Point {:x 1, :y 2}");
    }
}

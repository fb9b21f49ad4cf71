//! Tag registry and depth-first resolution
//!
//! Decoding is two passes: the reader produces unresolved
//! [`Value::Tagged`] nodes, then a [`TagRegistry`] walks the value and
//! replaces each tagged node with whatever its registered constructor
//! returns. Inner tags resolve before the outer constructor runs.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{DecodeError, Error};
use crate::reader::read_str;
use crate::symbol::Symbol;
use crate::value::Value;

/// A constructor invoked with the (already resolved) payload of a tag.
pub type TagHandler = Arc<dyn Fn(Value) -> Result<Value, DecodeError> + Send + Sync>;

/// A fallback invoked for tags with no registered constructor.
pub type FallbackHandler = Arc<dyn Fn(&Symbol, Value) -> Result<Value, DecodeError> + Send + Sync>;

/// A mapping from tag to constructor, consulted during decode.
///
/// # Example
///
/// ```
/// use mallorn::{Symbol, TagRegistry, Value};
///
/// let mut registry = TagRegistry::new();
/// registry.register(Symbol::namespaced("my", "negated"), |payload| {
///     Ok(Value::Int(-payload.as_int().unwrap_or(0)))
/// });
///
/// let v = registry.decode_str("#my/negated 42").unwrap();
/// assert_eq!(v, Value::Int(-42));
/// ```
#[derive(Clone, Default)]
pub struct TagRegistry {
    handlers: IndexMap<Symbol, TagHandler>,
    fallback: Option<FallbackHandler>,
}

impl TagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for `tag`, replacing any previous one.
    pub fn register(
        &mut self,
        tag: Symbol,
        handler: impl Fn(Value) -> Result<Value, DecodeError> + Send + Sync + 'static,
    ) {
        self.handlers.insert(tag, Arc::new(handler));
    }

    /// Register a record constructor for `tag` with the given declared
    /// field names. See [`Record::constructor`](crate::Record::constructor).
    pub fn register_record<I, S>(&mut self, tag: Symbol, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let handler = crate::record::Record::constructor(
            tag.clone(),
            fields.into_iter().map(Into::into).collect(),
        );
        self.handlers.insert(tag, handler);
    }

    /// Install a fallback for tags with no registered constructor.
    ///
    /// The fallback receives the tag and the resolved payload.
    pub fn set_fallback(
        &mut self,
        fallback: impl Fn(&Symbol, Value) -> Result<Value, DecodeError> + Send + Sync + 'static,
    ) {
        self.fallback = Some(Arc::new(fallback));
    }

    /// Check whether a constructor is registered for `tag`.
    pub fn contains(&self, tag: &Symbol) -> bool {
        self.handlers.contains_key(tag)
    }

    /// The registered tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &Symbol> {
        self.handlers.keys()
    }

    /// The number of registered constructors.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check whether no constructors are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Resolve every tagged node in `value`, depth-first.
    ///
    /// Inner tags resolve before the outer constructor is invoked, so
    /// a constructor always sees a fully resolved payload. An
    /// unregistered tag with no fallback fails with
    /// [`DecodeError::UnknownTag`] and produces no partial value.
    pub fn resolve(&self, value: &Value) -> Result<Value, DecodeError> {
        match value {
            Value::List(items) => {
                let resolved = items
                    .iter()
                    .map(|v| self.resolve(v))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(resolved))
            }
            Value::Vector(items) => {
                let resolved = items
                    .iter()
                    .map(|v| self.resolve(v))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::vector(resolved))
            }
            Value::Map(map) => {
                let mut resolved = IndexMap::with_capacity(map.len());
                for (k, v) in map.iter() {
                    resolved.insert(self.resolve(k)?, self.resolve(v)?);
                }
                Ok(Value::Map(resolved.into()))
            }
            Value::Set(set) => {
                let resolved = set
                    .iter()
                    .map(|v| self.resolve(v))
                    .collect::<Result<indexmap::IndexSet<_>, _>>()?;
                Ok(Value::Set(resolved.into()))
            }
            Value::Tagged(t) => {
                let payload = self.resolve(&t.value)?;
                match self.handlers.get(&t.tag) {
                    Some(handler) => handler(payload),
                    None => match &self.fallback {
                        Some(fallback) => fallback(&t.tag, payload),
                        None => Err(DecodeError::UnknownTag { tag: t.tag.clone() }),
                    },
                }
            }
            scalar => Ok(scalar.clone()),
        }
    }

    /// Read one form from `input` and resolve its tags.
    ///
    /// This is the decode operation: parse failures surface as
    /// [`Error::Read`], resolution failures as [`Error::Decode`].
    pub fn decode_str(&self, input: &str) -> Result<Value, Error> {
        let value = read_str(input)?;
        Ok(self.resolve(&value)?)
    }
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.handlers.keys().collect::<Vec<_>>())
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negate_registry() -> TagRegistry {
        let mut registry = TagRegistry::new();
        registry.register(Symbol::namespaced("my", "neg"), |payload| {
            payload
                .as_int()
                .map(|n| Value::Int(-n))
                .ok_or_else(|| DecodeError::Constructor {
                    tag: Symbol::namespaced("my", "neg"),
                    reason: "payload must be an integer".into(),
                })
        });
        registry
    }

    #[test]
    fn test_resolve_passthrough_for_untagged() {
        let registry = TagRegistry::new();
        let v = read_str("[1 {:a 2} #{3}]").unwrap();
        assert_eq!(registry.resolve(&v).unwrap(), v);
    }

    #[test]
    fn test_resolve_invokes_handler() {
        let registry = negate_registry();
        assert_eq!(
            registry.decode_str("#my/neg 42").unwrap(),
            Value::Int(-42)
        );
    }

    #[test]
    fn test_resolve_depth_first() {
        let registry = negate_registry();
        // Inner tag resolves before the outer handler runs
        assert_eq!(
            registry.decode_str("#my/neg #my/neg 42").unwrap(),
            Value::Int(42)
        );
    }

    #[test]
    fn test_unknown_tag_errors() {
        let registry = TagRegistry::new();
        let err = registry.decode_str("#no/such 1").unwrap_err();
        assert_eq!(
            err,
            Error::Decode(DecodeError::UnknownTag {
                tag: Symbol::namespaced("no", "such"),
            })
        );
    }

    #[test]
    fn test_fallback_receives_tag_and_payload() {
        let mut registry = TagRegistry::new();
        registry.set_fallback(|tag, payload| {
            Ok(Value::vector(vec![
                Value::Symbol(tag.clone()),
                payload,
            ]))
        });
        let v = registry.decode_str("#no/such 1").unwrap();
        assert_eq!(
            v,
            Value::vector(vec![
                Value::Symbol(Symbol::namespaced("no", "such")),
                Value::Int(1),
            ])
        );
    }

    #[test]
    fn test_constructor_failure_surfaces() {
        let registry = negate_registry();
        let err = registry.decode_str("#my/neg \"oops\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Decode(DecodeError::Constructor { .. })
        ));
    }

    #[test]
    fn test_registry_inspection() {
        let registry = negate_registry();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert!(registry.contains(&Symbol::namespaced("my", "neg")));
        assert!(!registry.contains(&Symbol::namespaced("my", "pos")));
    }
}

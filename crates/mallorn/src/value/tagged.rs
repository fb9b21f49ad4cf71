//! Tagged values: a tag symbol paired with a payload form

use crate::symbol::Symbol;

use super::Value;

/// A tagged value as produced by the reader.
///
/// The tag names a constructor; the payload is the form that follows
/// the tag in the text. Resolution through a registry happens as a
/// separate pass, so a `TaggedValue` is always the unresolved form.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedValue {
    /// The tag naming the constructor
    pub tag: Symbol,

    /// The payload form following the tag
    pub value: Value,
}

impl TaggedValue {
    /// Pair a tag with its payload.
    pub fn new(tag: Symbol, value: Value) -> Self {
        Self { tag, value }
    }
}

//! Value representation for data-notation forms

mod display;
mod impls;
mod tagged;

pub use tagged::TaggedValue;

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::symbol::{Keyword, Symbol};

/// An in-memory form of the data notation.
///
/// Values are organized into three tiers:
/// - Scalars (no allocation beyond the enum itself)
/// - Names (symbols and keywords)
/// - Compound forms (Arc-wrapped collections and tagged values)
///
/// Collections use [`IndexMap`]/[`IndexSet`] so insertion order is
/// preserved for display while equality stays order-independent.
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Scalars
    // ═══════════════════════════════════════════════════════════════════
    /// The absent value `nil`
    Nil,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// 64-bit signed integer (the only integer width)
    Int(i64),

    /// 64-bit float (the only float width)
    Float(f64),

    /// Unicode scalar value, written `\c` or by name (`\newline`)
    Char(char),

    /// Heap-allocated string
    String(Arc<String>),

    // ═══════════════════════════════════════════════════════════════════
    // Names
    // ═══════════════════════════════════════════════════════════════════
    /// A symbol, optionally namespaced
    Symbol(Symbol),

    /// A keyword, written with a leading `:`
    Keyword(Keyword),

    // ═══════════════════════════════════════════════════════════════════
    // Compound Forms
    // ═══════════════════════════════════════════════════════════════════
    /// A list `(a b c)`
    List(Arc<Vec<Value>>),

    /// A vector `[a b c]`
    Vector(Arc<Vec<Value>>),

    /// A map `{k v, ...}`; insertion-ordered, set-equal
    Map(Arc<IndexMap<Value, Value>>),

    /// A set `#{a b c}`; insertion-ordered, set-equal
    Set(Arc<IndexSet<Value>>),

    /// A tagged value `#ns/Name payload`, unresolved by the reader
    Tagged(Arc<TaggedValue>),
}

//! # Mallorn
//!
//! An extensible tagged data-notation reader and printer.
//!
//! Mallorn reads and prints a small textual data notation — nil,
//! booleans, numbers, characters, strings, symbols, `:keywords`,
//! lists, vectors, maps, and sets — extended with tagged literals of
//! the form `#namespace/Name payload`. Tags name constructors held in
//! a [`TagRegistry`]; decoding resolves tags depth-first through the
//! registry, and unregistered tags fail loudly instead of dropping
//! data.
//!
//! ## Round trip
//!
//! ```
//! use mallorn::{encode, Record, Symbol, TagRegistry, Value};
//!
//! let rec = Record::new("user", "SimpleRecord").with_field("a", Value::Int(42));
//! let text = encode(&rec.to_value());
//! assert_eq!(text, "#user/SimpleRecord {:a 42}");
//!
//! let mut registry = TagRegistry::new();
//! registry.register_record(Symbol::namespaced("user", "SimpleRecord"), ["a"]);
//! let decoded = registry.decode_str(&text).unwrap();
//! assert_eq!(decoded, rec.to_value());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod print;
pub mod reader;
pub mod record;
pub mod symbol;
pub mod tag;
pub mod value;

// Re-export main types
pub use error::{DecodeError, Error, Position, ReadError, Result};
pub use reader::{read_all_str, read_str};
pub use record::Record;
pub use symbol::{Keyword, Symbol};
pub use tag::{FallbackHandler, TagHandler, TagRegistry};
pub use value::{TaggedValue, Value};

/// Encode a value as canonical notation text.
///
/// Equivalent to `value.to_string()`; the result re-reads to an equal
/// value.
pub fn encode(value: &Value) -> String {
    value.to_string()
}

/// Read one form from `input` and resolve its tags through `registry`.
pub fn decode(input: &str, registry: &TagRegistry) -> Result<Value> {
    registry.decode_str(input)
}

/// Mallorn version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

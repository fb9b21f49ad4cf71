//! Namespaced identifiers: symbols and keywords

use std::fmt;

/// A symbol: an identifier with an optional namespace.
///
/// Symbols name things — tags, record types, bindings. The textual
/// form is `name` or `namespace/name`.
///
/// # Example
///
/// ```
/// use mallorn::Symbol;
///
/// let tag = Symbol::namespaced("user", "SimpleRecord");
/// assert_eq!(tag.to_string(), "user/SimpleRecord");
/// assert_eq!(Symbol::parse("user/SimpleRecord"), Some(tag));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    /// The namespace segment, if any
    pub namespace: Option<String>,

    /// The name segment
    pub name: String,
}

impl Symbol {
    /// Create a bare (unnamespaced) symbol.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// Create a namespaced symbol.
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Parse a symbol from text, splitting on the single `/`.
    ///
    /// Returns `None` when the text violates the lexical rules.
    /// The bare text `/` is accepted as the symbol named `/`.
    pub fn parse(text: &str) -> Option<Self> {
        if text == "/" {
            return Some(Self::new("/"));
        }
        match text.split_once('/') {
            Some((ns, name)) => {
                if is_valid_segment(ns) && is_valid_segment(name) && !name.contains('/') {
                    Some(Self::namespaced(ns, name))
                } else {
                    None
                }
            }
            None => {
                if is_valid_segment(text) {
                    Some(Self::new(text))
                } else {
                    None
                }
            }
        }
    }

    /// Whether this symbol carries a namespace.
    pub fn has_namespace(&self) -> bool {
        self.namespace.is_some()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A keyword: a symbol with a leading `:` sigil.
///
/// Keywords evaluate to themselves and are the conventional keys of
/// record field maps.
///
/// # Example
///
/// ```
/// use mallorn::Keyword;
///
/// let k = Keyword::new("a");
/// assert_eq!(k.to_string(), ":a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword(pub Symbol);

impl Keyword {
    /// Create a bare keyword.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Symbol::new(name))
    }

    /// Create a namespaced keyword.
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self(Symbol::namespaced(namespace, name))
    }

    /// Parse a keyword, accepting an optional leading `:`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.strip_prefix(':').unwrap_or(text);
        Symbol::parse(text).map(Self)
    }

    /// The keyword's name segment.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The keyword's namespace segment, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.0.namespace.as_deref()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// Check whether text is a valid symbol segment.
///
/// A segment starts with an alphabetic character or one of
/// `. * + ! - _ ? $ % & = < >` and continues with those, digits,
/// `:`, or `#`.
pub fn is_valid_segment(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !is_segment_start(first) {
        return false;
    }
    chars.all(is_segment_continue)
}

pub(crate) fn is_segment_start(ch: char) -> bool {
    ch.is_alphabetic() || matches!(ch, '.' | '*' | '+' | '!' | '-' | '_' | '?' | '$' | '%' | '&' | '=' | '<' | '>')
}

fn is_segment_continue(ch: char) -> bool {
    is_segment_start(ch) || ch.is_ascii_digit() || matches!(ch, ':' | '#')
}

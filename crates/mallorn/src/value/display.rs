//! Display and Debug implementations for Value
//!
//! `Display` emits the canonical text form, re-readable by the
//! reader. Encoding a value is exactly `value.to_string()`.

use std::fmt;

use super::*;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write_float(f, *x),
            Value::Char(c) => write_char(f, *c),
            Value::String(s) => write_string(f, s),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Keyword(k) => write!(f, "{}", k),

            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }

            Value::Vector(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }

            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                write!(f, "}}")
            }

            Value::Set(set) => {
                write!(f, "#{{")?;
                for (i, item) in set.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "}}")
            }

            Value::Tagged(t) => write!(f, "#{} {}", t.tag, t.value),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The canonical form is already unambiguous
        fmt::Display::fmt(self, f)
    }
}

/// Floats must re-read as floats, so finite values without a
/// fractional part or exponent get a `.0` suffix. Non-finite values
/// use the symbolic forms.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        write!(f, "##NaN")
    } else if x == f64::INFINITY {
        write!(f, "##Inf")
    } else if x == f64::NEG_INFINITY {
        write!(f, "##-Inf")
    } else {
        let s = x.to_string();
        if s.contains('.') || s.contains('e') || s.contains('E') {
            f.write_str(&s)
        } else {
            write!(f, "{}.0", s)
        }
    }
}

fn write_char(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '\n' => write!(f, "\\newline"),
        ' ' => write!(f, "\\space"),
        '\t' => write!(f, "\\tab"),
        '\r' => write!(f, "\\return"),
        _ => write!(f, "\\{}", c),
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            _ => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

#[cfg(test)]
mod tests {
    use crate::symbol::Symbol;

    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "##Inf");
        assert_eq!(Value::Float(f64::NAN).to_string(), "##NaN");
    }

    #[test]
    fn test_display_chars() {
        assert_eq!(Value::Char('a').to_string(), "\\a");
        assert_eq!(Value::Char('\n').to_string(), "\\newline");
        assert_eq!(Value::Char(' ').to_string(), "\\space");
    }

    #[test]
    fn test_display_string_escapes() {
        assert_eq!(Value::string("hi").to_string(), "\"hi\"");
        assert_eq!(Value::string("a\"b").to_string(), "\"a\\\"b\"");
        assert_eq!(Value::string("a\nb").to_string(), "\"a\\nb\"");
        assert_eq!(Value::string("a\\b").to_string(), "\"a\\\\b\"");
    }

    #[test]
    fn test_display_collections() {
        let l = Value::list(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(l.to_string(), "(1 2)");

        let v = Value::vector(vec![Value::keyword("a"), Value::Int(1)]);
        assert_eq!(v.to_string(), "[:a 1]");

        let m = Value::map([
            (Value::keyword("a"), Value::Int(1)),
            (Value::keyword("b"), Value::Int(2)),
        ]);
        assert_eq!(m.to_string(), "{:a 1, :b 2}");

        let s = Value::set([Value::Int(1), Value::Int(2)]);
        assert_eq!(s.to_string(), "#{1 2}");
    }

    #[test]
    fn test_display_tagged() {
        let t = Value::tagged(
            Symbol::namespaced("user", "SimpleRecord"),
            Value::map([(Value::keyword("a"), Value::Int(42))]),
        );
        assert_eq!(t.to_string(), "#user/SimpleRecord {:a 42}");
    }
}

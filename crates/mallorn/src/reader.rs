//! Reader: parse notation text into values
//!
//! The reader is a recursive-descent parser over a char cursor with
//! line/column tracking. Tagged literals parse to [`Value::Tagged`]
//! without consulting any registry; resolution is a separate pass
//! (see [`crate::tag::TagRegistry::resolve`]).

use indexmap::{IndexMap, IndexSet};

use crate::error::{Position, ReadError};
use crate::symbol::{self, Keyword, Symbol};
use crate::value::Value;

/// Parse exactly one form from `input`.
///
/// Trailing non-whitespace input is an error.
///
/// # Example
///
/// ```
/// use mallorn::{read_str, Value};
///
/// let v = read_str("[1 2 3]").unwrap();
/// assert_eq!(v, Value::vector(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
/// ```
pub fn read_str(input: &str) -> Result<Value, ReadError> {
    let mut reader = Reader::new(input);
    let value = reader.read_form()?;
    reader.skip_ws();
    if !reader.at_eof() {
        return Err(ReadError::TrailingInput { pos: reader.pos() });
    }
    Ok(value)
}

/// Parse a whitespace-separated sequence of forms from `input`.
pub fn read_all_str(input: &str) -> Result<Vec<Value>, ReadError> {
    let mut reader = Reader::new(input);
    let mut forms = Vec::new();
    loop {
        reader.skip_ws();
        if reader.at_eof() {
            return Ok(forms);
        }
        forms.push(reader.read_form()?);
    }
}

struct Reader {
    chars: Vec<char>,
    idx: usize,
    line: usize,
    column: usize,
}

impl Reader {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            idx: 0,
            line: 1,
            column: 1,
        }
    }

    fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn at_eof(&self) -> bool {
        self.idx >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.idx).copied()
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.get(self.idx + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.idx += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Skip whitespace, commas, and `;` line comments.
    fn skip_ws(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() || ch == ',' => {
                    self.bump();
                }
                Some(';') => {
                    while let Some(ch) = self.bump() {
                        if ch == '\n' {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    /// Characters that terminate a token.
    fn is_delimiter(ch: char) -> bool {
        ch.is_whitespace() || matches!(ch, ',' | ';' | '(' | ')' | '[' | ']' | '{' | '}' | '"')
    }

    /// Collect a token up to the next delimiter.
    fn read_token(&mut self) -> String {
        let mut token = String::new();
        while let Some(ch) = self.peek() {
            if Self::is_delimiter(ch) {
                break;
            }
            token.push(ch);
            self.bump();
        }
        token
    }

    fn read_form(&mut self) -> Result<Value, ReadError> {
        self.skip_ws();
        let Some(ch) = self.peek() else {
            return Err(ReadError::UnexpectedEof { pos: self.pos() });
        };

        match ch {
            '(' => self.read_seq(')').map(Value::list),
            '[' => self.read_seq(']').map(Value::vector),
            '{' => self.read_map(),
            ')' | ']' | '}' => Err(ReadError::UnmatchedDelimiter {
                delim: ch,
                pos: self.pos(),
            }),
            '"' => self.read_string(),
            '\\' => self.read_char(),
            ':' => self.read_keyword(),
            '#' => self.read_dispatch(),
            c if c.is_ascii_digit() => self.read_number(),
            '+' | '-' if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()
            }
            c if symbol::is_segment_start(c) => self.read_symbol_or_literal(),
            ch => Err(ReadError::UnexpectedChar {
                ch,
                pos: self.pos(),
            }),
        }
    }

    fn read_seq(&mut self, close: char) -> Result<Vec<Value>, ReadError> {
        self.bump(); // opener
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(ReadError::UnexpectedEof { pos: self.pos() }),
                Some(ch) if ch == close => {
                    self.bump();
                    return Ok(items);
                }
                Some(_) => items.push(self.read_form()?),
            }
        }
    }

    fn read_map(&mut self) -> Result<Value, ReadError> {
        self.bump(); // '{'
        let mut map = IndexMap::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(ReadError::UnexpectedEof { pos: self.pos() }),
                Some('}') => {
                    self.bump();
                    return Ok(Value::Map(map.into()));
                }
                Some(_) => {
                    let key_pos = self.pos();
                    let key = self.read_form()?;
                    self.skip_ws();
                    match self.peek() {
                        None => return Err(ReadError::UnexpectedEof { pos: self.pos() }),
                        Some('}') => return Err(ReadError::DanglingKey { pos: self.pos() }),
                        Some(_) => {
                            let value = self.read_form()?;
                            if map.insert(key, value).is_some() {
                                return Err(ReadError::DuplicateKey { pos: key_pos });
                            }
                        }
                    }
                }
            }
        }
    }

    fn read_set(&mut self) -> Result<Value, ReadError> {
        self.bump(); // '{'
        let mut set = IndexSet::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(ReadError::UnexpectedEof { pos: self.pos() }),
                Some('}') => {
                    self.bump();
                    return Ok(Value::Set(set.into()));
                }
                Some(_) => {
                    let item_pos = self.pos();
                    let item = self.read_form()?;
                    if !set.insert(item) {
                        return Err(ReadError::DuplicateKey { pos: item_pos });
                    }
                }
            }
        }
    }

    fn read_string(&mut self) -> Result<Value, ReadError> {
        self.bump(); // '"'
        let mut out = String::new();
        loop {
            let pos = self.pos();
            match self.bump() {
                None => return Err(ReadError::UnexpectedEof { pos }),
                Some('"') => return Ok(Value::string(out)),
                Some('\\') => match self.bump() {
                    None => return Err(ReadError::UnexpectedEof { pos }),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some(ch) => return Err(ReadError::BadEscape { ch, pos }),
                },
                Some(ch) => out.push(ch),
            }
        }
    }

    fn read_char(&mut self) -> Result<Value, ReadError> {
        let pos = self.pos();
        self.bump(); // '\'
        let Some(first) = self.bump() else {
            return Err(ReadError::UnexpectedEof { pos });
        };
        if !first.is_alphabetic() {
            // Punctuation, digits, and backslash are themselves
            return Ok(Value::Char(first));
        }
        let mut token = String::from(first);
        while let Some(ch) = self.peek() {
            if !ch.is_alphanumeric() {
                break;
            }
            token.push(ch);
            self.bump();
        }
        if token.chars().count() == 1 {
            return Ok(Value::Char(first));
        }
        match token.as_str() {
            "newline" => Ok(Value::Char('\n')),
            "space" => Ok(Value::Char(' ')),
            "tab" => Ok(Value::Char('\t')),
            "return" => Ok(Value::Char('\r')),
            _ => {
                // \uNNNN unicode escape
                if let Some(hex) = token.strip_prefix('u') {
                    if hex.len() == 4 {
                        if let Ok(code) = u32::from_str_radix(hex, 16) {
                            if let Some(ch) = char::from_u32(code) {
                                return Ok(Value::Char(ch));
                            }
                        }
                    }
                }
                Err(ReadError::BadChar { text: token, pos })
            }
        }
    }

    fn read_keyword(&mut self) -> Result<Value, ReadError> {
        let pos = self.pos();
        self.bump(); // ':'
        let token = self.read_token();
        match Symbol::parse(&token) {
            Some(sym) => Ok(Value::Keyword(Keyword(sym))),
            None => Err(ReadError::BadSymbol {
                text: format!(":{}", token),
                pos,
            }),
        }
    }

    fn read_number(&mut self) -> Result<Value, ReadError> {
        let pos = self.pos();
        let token = self.read_token();
        let result = if token.contains(&['.', 'e', 'E'][..]) {
            token.parse::<f64>().map(Value::Float).ok()
        } else {
            token.parse::<i64>().map(Value::Int).ok()
        };
        result.ok_or(ReadError::BadNumber { text: token, pos })
    }

    /// Dispatch for `#`: sets, symbolic floats, and tagged literals.
    fn read_dispatch(&mut self) -> Result<Value, ReadError> {
        let pos = self.pos();
        self.bump(); // '#'
        match self.peek() {
            None => Err(ReadError::UnexpectedEof { pos }),
            Some('{') => self.read_set(),
            Some('#') => {
                self.bump();
                let token = self.read_token();
                match token.as_str() {
                    "Inf" => Ok(Value::Float(f64::INFINITY)),
                    "-Inf" => Ok(Value::Float(f64::NEG_INFINITY)),
                    "NaN" => Ok(Value::Float(f64::NAN)),
                    _ => Err(ReadError::BadSymbol {
                        text: format!("##{}", token),
                        pos,
                    }),
                }
            }
            Some(_) => self.read_tagged(pos),
        }
    }

    fn read_tagged(&mut self, pos: Position) -> Result<Value, ReadError> {
        let token = self.read_token();
        let Some(tag) = Symbol::parse(&token) else {
            return Err(ReadError::BadSymbol { text: token, pos });
        };
        self.skip_ws();
        if self.at_eof() {
            return Err(ReadError::UnexpectedEof { pos: self.pos() });
        }
        let payload = self.read_form()?;
        Ok(Value::tagged(tag, payload))
    }

    fn read_symbol_or_literal(&mut self) -> Result<Value, ReadError> {
        let pos = self.pos();
        let token = self.read_token();
        match token.as_str() {
            "nil" => Ok(Value::Nil),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => match Symbol::parse(&token) {
                Some(sym) => Ok(Value::Symbol(sym)),
                None => Err(ReadError::BadSymbol { text: token, pos }),
            },
        }
    }
}

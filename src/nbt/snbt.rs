//! Canonical-text (SNBT) reading and writing for NBT values.
//!
//! The text form is round-trippable: [`Value::from_snbt`] accepts everything
//! [`Value::to_snbt`] produces. The reader is a small recursive-descent
//! parser over the character stream.

use itertools::Itertools;

use crate::util::{escape_str, is_bare_key};

use super::value::Value;

/// An error that occurred while parsing canonical text.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input ended in the middle of a value.
    #[error("unexpected end of input at position {0}")]
    UnexpectedEnd(usize),
    /// A character that no value can start with or continue at this point.
    #[error("unexpected character `{found}` at position {position}")]
    UnexpectedChar {
        /// The offending character.
        found: char,
        /// The character offset it was found at.
        position: usize,
    },
    /// An array element that is not a valid number for the array's kind.
    #[error("invalid array element `{literal}` at position {position}")]
    InvalidArrayElement {
        /// The literal that failed to parse.
        literal: String,
        /// The character offset it started at.
        position: usize,
    },
    /// Input remained after a complete value was read.
    #[error("trailing characters after value at position {0}")]
    TrailingCharacters(usize),
}

impl Value {
    /// Writes the value as canonical text.
    #[must_use]
    pub fn to_snbt(&self) -> String {
        match self {
            Self::Byte(v) => format!("{v}b"),
            Self::Short(v) => format!("{v}s"),
            Self::Int(v) => v.to_string(),
            Self::Long(v) => format!("{v}L"),
            Self::Float(v) => format!("{v}f"),
            Self::Double(v) => format!("{v}d"),
            Self::ByteArray(items) => {
                format!("[B;{}]", items.iter().map(|v| format!("{v}b")).join(","))
            }
            Self::String(s) => format!("\"{}\"", escape_str(s)),
            Self::List(items) => format!("[{}]", items.iter().map(Self::to_snbt).join(",")),
            Self::Compound(entries) => format!(
                "{{{}}}",
                entries
                    .iter()
                    .map(|(key, value)| format!("{}:{}", write_key(key), value.to_snbt()))
                    .join(",")
            ),
            Self::IntArray(items) => format!("[I;{}]", items.iter().join(",")),
            Self::LongArray(items) => {
                format!("[L;{}]", items.iter().map(|v| format!("{v}L")).join(","))
            }
        }
    }

    /// Parses a value from canonical text.
    ///
    /// # Errors
    /// - If the text is not a single, complete SNBT value.
    pub fn from_snbt(source: &str) -> Result<Self, Error> {
        let mut parser = Parser::new(source);
        parser.skip_whitespace();
        let value = parser.parse_value()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(value),
            Some(_) => Err(Error::TrailingCharacters(parser.position)),
        }
    }
}

fn write_key(key: &str) -> String {
    if is_bare_key(key) {
        key.to_string()
    } else {
        format!("\"{}\"", escape_str(key))
    }
}

struct Parser {
    chars: Vec<char>,
    position: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), Error> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(found) => Err(Error::UnexpectedChar {
                found,
                position: self.position - 1,
            }),
            None => Err(Error::UnexpectedEnd(self.position)),
        }
    }

    fn parse_value(&mut self) -> Result<Value, Error> {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => self.parse_compound(),
            Some('[') => self.parse_list_or_array(),
            Some(quote @ ('"' | '\'')) => {
                self.position += 1;
                Ok(Value::String(self.parse_quoted(quote)?))
            }
            Some(_) => {
                let start = self.position;
                let token = self.bare_token();
                if token.is_empty() {
                    return Err(Error::UnexpectedChar {
                        found: self.peek().ok_or(Error::UnexpectedEnd(self.position))?,
                        position: start,
                    });
                }
                Ok(classify_token(&token))
            }
            None => Err(Error::UnexpectedEnd(self.position)),
        }
    }

    fn parse_compound(&mut self) -> Result<Value, Error> {
        self.expect('{')?;
        let mut entries = std::collections::BTreeMap::new();
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.position += 1;
            return Ok(Value::Compound(entries));
        }
        loop {
            self.skip_whitespace();
            let key = match self.peek() {
                Some(quote @ ('"' | '\'')) => {
                    self.position += 1;
                    self.parse_quoted(quote)?
                }
                Some(_) => {
                    let start = self.position;
                    let token = self.bare_token();
                    if token.is_empty() {
                        return Err(Error::UnexpectedChar {
                            found: self.peek().ok_or(Error::UnexpectedEnd(self.position))?,
                            position: start,
                        });
                    }
                    token
                }
                None => return Err(Error::UnexpectedEnd(self.position)),
            };
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.parse_value()?;
            entries.insert(key, value);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some('}') => return Ok(Value::Compound(entries)),
                Some(found) => {
                    return Err(Error::UnexpectedChar {
                        found,
                        position: self.position - 1,
                    })
                }
                None => return Err(Error::UnexpectedEnd(self.position)),
            }
        }
    }

    fn parse_list_or_array(&mut self) -> Result<Value, Error> {
        self.expect('[')?;
        if self.peek_at(1) == Some(';') {
            match self.peek() {
                Some('B') => return self.parse_array('B'),
                Some('I') => return self.parse_array('I'),
                Some('L') => return self.parse_array('L'),
                _ => {}
            }
        }
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.position += 1;
            return Ok(Value::List(items));
        }
        loop {
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some(']') => return Ok(Value::List(items)),
                Some(found) => {
                    return Err(Error::UnexpectedChar {
                        found,
                        position: self.position - 1,
                    })
                }
                None => return Err(Error::UnexpectedEnd(self.position)),
            }
        }
    }

    fn parse_array(&mut self, marker: char) -> Result<Value, Error> {
        // consume the marker and the `;`
        self.position += 2;
        let mut elements = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.position += 1;
            return Ok(finish_array(marker, &elements));
        }
        loop {
            self.skip_whitespace();
            let start = self.position;
            let token = self.bare_token();
            let element = integer_token(&token).ok_or_else(|| Error::InvalidArrayElement {
                literal: token.clone(),
                position: start,
            })?;
            elements.push(element);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some(']') => return Ok(finish_array(marker, &elements)),
                Some(found) => {
                    return Err(Error::UnexpectedChar {
                        found,
                        position: self.position - 1,
                    })
                }
                None => return Err(Error::UnexpectedEnd(self.position)),
            }
        }
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, Error> {
        let mut content = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(escaped) => content.push(escaped),
                    None => return Err(Error::UnexpectedEnd(self.position)),
                },
                Some(c) if c == quote => return Ok(content),
                Some(c) => content.push(c),
                None => return Err(Error::UnexpectedEnd(self.position)),
            }
        }
    }

    /// Reads characters until a structural delimiter or whitespace.
    fn bare_token(&mut self) -> String {
        let mut token = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ',' | ':' | ']' | '}' | '[' | '{') {
                break;
            }
            token.push(c);
            self.position += 1;
        }
        token
    }
}

/// Turns a bare token into the scalar it denotes.
///
/// Suffixed numerics (`1b`, `2s`, `3L`, `4.5f`, `6.7d`), plain integers,
/// plain decimals and the boolean words map to their kinds; everything else
/// is an unquoted string.
fn classify_token(token: &str) -> Value {
    match token {
        "true" => return Value::Byte(1),
        "false" => return Value::Byte(0),
        _ => {}
    }
    if let Some(prefix) = token.strip_suffix(['b', 'B']) {
        if let Ok(v) = prefix.parse::<i8>() {
            return Value::Byte(v);
        }
    }
    if let Some(prefix) = token.strip_suffix(['s', 'S']) {
        if let Ok(v) = prefix.parse::<i16>() {
            return Value::Short(v);
        }
    }
    if let Some(prefix) = token.strip_suffix(['l', 'L']) {
        if let Ok(v) = prefix.parse::<i64>() {
            return Value::Long(v);
        }
    }
    if let Some(prefix) = token.strip_suffix(['f', 'F']) {
        if let Ok(v) = prefix.parse::<f32>() {
            return Value::Float(v);
        }
    }
    if let Some(prefix) = token.strip_suffix(['d', 'D']) {
        if let Ok(v) = prefix.parse::<f64>() {
            return Value::Double(v);
        }
    }
    if let Ok(v) = token.parse::<i32>() {
        return Value::Int(v);
    }
    if token.contains(['.', 'e', 'E']) {
        if let Ok(v) = token.parse::<f64>() {
            return Value::Double(v);
        }
    }
    Value::String(token.to_string())
}

fn integer_token(token: &str) -> Option<i64> {
    let trimmed = token
        .strip_suffix(['b', 'B', 'l', 'L', 's', 'S'])
        .unwrap_or(token);
    trimmed.parse::<i64>().ok()
}

#[allow(clippy::cast_possible_truncation)]
fn finish_array(marker: char, elements: &[i64]) -> Value {
    match marker {
        'B' => Value::ByteArray(elements.iter().map(|v| *v as i8).collect()),
        'I' => Value::IntArray(elements.iter().map(|v| *v as i32).collect()),
        _ => Value::LongArray(elements.to_vec()),
    }
}

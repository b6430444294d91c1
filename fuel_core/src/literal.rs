//! Safe decoding of embedded-record cells.
//!
//! The WHOOP export stores the `cycle_score` and `recovery_score` columns as
//! serialized literal structures (nested key/value data written with Python
//! repr conventions: single-quoted strings, `True`/`False`/`None`). This
//! module parses those cells with a literal-only recursive-descent parser.
//! Identifiers, calls and operators are rejected outright, so externally
//! supplied cells can never evaluate as code.

use crate::{Error, Result};
use std::collections::HashMap;

/// A decoded literal value from an embedded-record cell
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Dict(HashMap<String, Literal>),
}

impl Literal {
    /// Numeric view of this value; integers widen to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(n) => Some(*n as f64),
            Literal::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Dict field lookup (None for non-dicts)
    pub fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Literal::Dict(map) => map.get(key),
            _ => None,
        }
    }
}

/// Parse a single literal expression, requiring the whole input is consumed
pub fn parse(input: &str) -> Result<Literal> {
    let mut parser = Parser {
        chars: input.chars().collect(),
        pos: 0,
    };
    parser.skip_ws();
    let value = parser.parse_value()?;
    parser.skip_ws();
    if let Some(c) = parser.peek() {
        return Err(Error::Decode(format!(
            "trailing input at offset {}: '{}'",
            parser.pos, c
        )));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(Error::Decode(format!(
                "expected '{}' at offset {}, found '{}'",
                expected,
                self.pos - 1,
                c
            ))),
            None => Err(Error::Decode(format!(
                "expected '{}', found end of input",
                expected
            ))),
        }
    }

    fn parse_value(&mut self) -> Result<Literal> {
        self.skip_ws();
        match self.peek() {
            Some('{') => self.parse_dict(),
            Some('[') => self.parse_seq('[', ']'),
            Some('(') => self.parse_seq('(', ')'),
            Some('\'') | Some('"') => Ok(Literal::Str(self.parse_string()?)),
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_alphabetic() => self.parse_keyword(),
            Some(c) => Err(Error::Decode(format!(
                "unexpected character '{}' at offset {}",
                c, self.pos
            ))),
            None => Err(Error::Decode("unexpected end of input".into())),
        }
    }

    /// Only the three literal keywords are valid words. Anything else is an
    /// identifier and therefore a decode error, never evaluated.
    fn parse_keyword(&mut self) -> Result<Literal> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "None" => Ok(Literal::None),
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            _ => Err(Error::Decode(format!(
                "identifier '{}' is not a literal",
                word
            ))),
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = self.bump().ok_or_else(|| {
            Error::Decode("expected string, found end of input".into())
        })?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('\\') => out.push('\\'),
                    Some('\'') => out.push('\''),
                    Some('"') => out.push('"'),
                    Some(c) => {
                        return Err(Error::Decode(format!(
                            "unsupported escape '\\{}'",
                            c
                        )))
                    }
                    None => {
                        return Err(Error::Decode(
                            "unterminated escape in string".into(),
                        ))
                    }
                },
                Some(c) => out.push(c),
                None => return Err(Error::Decode("unterminated string".into())),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Literal> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => self.pos += 1,
                '.' => {
                    is_float = true;
                    self.pos += 1;
                }
                'e' | 'E' => {
                    is_float = true;
                    self.pos += 1;
                    if matches!(self.peek(), Some('-') | Some('+')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        if is_float {
            let f = text
                .parse::<f64>()
                .map_err(|e| Error::Decode(format!("bad float '{}': {}", text, e)))?;
            Ok(Literal::Float(f))
        } else {
            match text.parse::<i64>() {
                Ok(n) => Ok(Literal::Int(n)),
                // Fall back for magnitudes past i64
                Err(_) => text
                    .parse::<f64>()
                    .map(Literal::Float)
                    .map_err(|e| Error::Decode(format!("bad number '{}': {}", text, e))),
            }
        }
    }

    fn parse_seq(&mut self, open: char, close: char) -> Result<Literal> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(Literal::List(items));
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some(c) if c == close => {}
                _ => {
                    return Err(Error::Decode(format!(
                        "expected ',' or '{}' at offset {}",
                        close, self.pos
                    )))
                }
            }
        }
    }

    fn parse_dict(&mut self) -> Result<Literal> {
        self.expect('{')?;
        let mut map = HashMap::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Literal::Dict(map));
            }
            // Record keys are always string literals in the export
            match self.peek() {
                Some('\'') | Some('"') => {}
                Some(c) => {
                    return Err(Error::Decode(format!(
                        "expected string key at offset {}, found '{}'",
                        self.pos, c
                    )))
                }
                None => {
                    return Err(Error::Decode("unterminated dict".into()));
                }
            }
            let key = self.parse_string()?;
            self.skip_ws();
            self.expect(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some('}') => {}
                _ => {
                    return Err(Error::Decode(format!(
                        "expected ',' or '}}' at offset {}",
                        self.pos
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse("42").unwrap(), Literal::Int(42));
        assert_eq!(parse("-7").unwrap(), Literal::Int(-7));
        assert_eq!(parse("13.8096").unwrap(), Literal::Float(13.8096));
        assert_eq!(parse("1e3").unwrap(), Literal::Float(1000.0));
        assert_eq!(parse("True").unwrap(), Literal::Bool(true));
        assert_eq!(parse("False").unwrap(), Literal::Bool(false));
        assert_eq!(parse("None").unwrap(), Literal::None);
    }

    #[test]
    fn test_parse_strings_both_quotes() {
        assert_eq!(parse("'hello'").unwrap(), Literal::Str("hello".into()));
        assert_eq!(parse("\"hello\"").unwrap(), Literal::Str("hello".into()));
        assert_eq!(
            parse(r"'it\'s'").unwrap(),
            Literal::Str("it's".into())
        );
    }

    #[test]
    fn test_parse_nested_record() {
        let cell = "{'strain': 13.8, 'kilojoule': 8288.3, 'zones': [1, 2, 3], 'valid': True}";
        let value = parse(cell).unwrap();
        assert_eq!(value.get("strain").unwrap().as_f64(), Some(13.8));
        assert_eq!(value.get("kilojoule").unwrap().as_f64(), Some(8288.3));
        assert_eq!(
            value.get("zones").unwrap(),
            &Literal::List(vec![Literal::Int(1), Literal::Int(2), Literal::Int(3)])
        );
        assert_eq!(value.get("valid").unwrap(), &Literal::Bool(true));
    }

    #[test]
    fn test_int_widens_to_f64() {
        let value = parse("{'recovery_score': 67}").unwrap();
        assert_eq!(value.get("recovery_score").unwrap().as_f64(), Some(67.0));
    }

    #[test]
    fn test_tuple_decodes_as_list() {
        assert_eq!(
            parse("(1, 2)").unwrap(),
            Literal::List(vec![Literal::Int(1), Literal::Int(2)])
        );
    }

    #[test]
    fn test_rejects_function_calls() {
        // A call must be a decode error, never evaluated
        assert!(parse("__import__('os')").is_err());
        assert!(parse("{'strain': exec('x')}").is_err());
        assert!(parse("open('/etc/passwd')").is_err());
    }

    #[test]
    fn test_rejects_identifiers_and_operators() {
        assert!(parse("strain").is_err());
        assert!(parse("1 + 2").is_err());
        assert!(parse("{'a': b}").is_err());
    }

    #[test]
    fn test_rejects_trailing_input() {
        assert!(parse("{'a': 1} extra").is_err());
    }

    #[test]
    fn test_rejects_non_string_keys() {
        assert!(parse("{1: 'a'}").is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse("{'a': }").is_err());
        assert!(parse("[1, 2").is_err());
        assert!(parse("'unterminated").is_err());
        assert!(parse("").is_err());
    }
}

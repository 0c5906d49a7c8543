//! A decoder for the Python literal syntax used by the `Cast` and `Actor_Set`
//! columns of the exported table, e.g. `[{'name': 'A', 'profile_path': None}]`
//! or `{'A', "O'Hara"}`.
//!
//! Only data literals are accepted: strings, numbers, booleans, `None`,
//! lists, tuples, sets (including `set()`) and dicts.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    Set(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The elements of a list, tuple or set.
    pub fn as_sequence(&self) -> Option<&[Literal]> {
        match self {
            Literal::List(items) | Literal::Tuple(items) | Literal::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a string key in a dict literal.
    pub fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Literal::Dict(pairs) => pairs
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::None => "None",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Str(_) => "str",
            Literal::List(_) => "list",
            Literal::Tuple(_) => "tuple",
            Literal::Set(_) => "set",
            Literal::Dict(_) => "dict",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at byte {offset}")]
pub struct LiteralError {
    pub offset: usize,
    pub message: String,
}

/// Parses a complete literal; trailing input other than whitespace is an error.
pub fn parse_literal(input: &str) -> Result<Literal, LiteralError> {
    let mut parser = Parser {
        input,
        pos: 0,
        depth: 0,
    };
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.pos != input.len() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(value)
}

/// Nesting limit for containers. Cast cells nest two levels deep.
const MAX_DEPTH: usize = 64;

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == wanted => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{wanted}', found '{c}'"))),
            None => Err(self.error(format!("expected '{wanted}', found end of input"))),
        }
    }

    fn value(&mut self) -> Result<Literal, LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(open @ ('[' | '(' | '{')) => {
                if self.depth >= MAX_DEPTH {
                    let message = format!("containers nested deeper than {MAX_DEPTH} levels");
                    return Err(self.error(message));
                }
                self.pos += 1;
                self.depth += 1;
                let container = self.container(open);
                self.depth -= 1;
                container
            }
            Some(q @ ('\'' | '"')) => {
                self.pos += 1;
                self.string(q).map(Literal::Str)
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => self.number(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.word(),
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
        }
    }

    fn container(&mut self, open: char) -> Result<Literal, LiteralError> {
        match open {
            '[' => Ok(Literal::List(self.items(']')?.0)),
            '(' => {
                let (mut items, trailing_comma) = self.items(')')?;
                // `(x)` is a parenthesized value, `(x,)` a one-element tuple.
                if items.len() == 1 && !trailing_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Literal::Tuple(items))
                }
            }
            _ => self.brace(),
        }
    }

    /// Comma-separated values up to `close`; reports whether a trailing comma was seen.
    fn items(&mut self, close: char) -> Result<(Vec<Literal>, bool), LiteralError> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok((items, trailing_comma));
            }
            items.push(self.value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => trailing_comma = true,
                Some(c) if c == close => return Ok((items, false)),
                Some(c) => {
                    return Err(self.error(format!("expected ',' or '{close}', found '{c}'")));
                }
                None => return Err(self.error(format!("unclosed container, expected '{close}'"))),
            }
        }
    }

    /// A dict or a set, both opened by `{`.
    fn brace(&mut self) -> Result<Literal, LiteralError> {
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(Literal::Dict(Vec::new()));
        }

        let first = self.value()?;
        self.skip_whitespace();
        if self.peek() != Some(':') {
            // Not a dict: parse the remaining set members.
            let mut members = vec![first];
            match self.bump() {
                Some(',') => members.extend(self.items('}')?.0),
                Some('}') => {}
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{c}'"))),
                None => return Err(self.error("unclosed set, expected '}'")),
            }
            return Ok(Literal::Set(members));
        }

        let mut pairs = Vec::new();
        let mut key = first;
        loop {
            self.expect(':')?;
            let value = self.value()?;
            pairs.push((key, value));
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {
                    self.skip_whitespace();
                    if self.peek() == Some('}') {
                        self.pos += 1;
                        return Ok(Literal::Dict(pairs));
                    }
                    key = self.value()?;
                }
                Some('}') => return Ok(Literal::Dict(pairs)),
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{c}'"))),
                None => return Err(self.error("unclosed dict, expected '}'")),
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<String, LiteralError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        match self.bump() {
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('x') => out.push(self.code_point(2)?),
            Some('u') => out.push(self.code_point(4)?),
            Some('U') => out.push(self.code_point(8)?),
            // A backslash-newline continues the string.
            Some('\n') => {}
            // Unknown escapes are kept verbatim, as Python does.
            Some(c) => {
                out.push('\\');
                out.push(c);
            }
            None => return Err(self.error("unterminated escape sequence")),
        }
        Ok(())
    }

    fn code_point(&mut self, digits: usize) -> Result<char, LiteralError> {
        let hex = self
            .input
            .get(self.pos..self.pos + digits)
            .ok_or_else(|| self.error("truncated escape sequence"))?;
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| self.error(format!("invalid hex escape '{hex}'")))?;
        let c = char::from_u32(value)
            .ok_or_else(|| self.error(format!("invalid code point U+{value:X}")))?;
        self.pos += digits;
        Ok(c)
    }

    fn number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '_' => {}
                '.' | 'e' | 'E' => is_float = true,
                '-' | '+' if matches!(self.input[..self.pos].chars().last(), Some('e' | 'E')) => {}
                _ => break,
            }
            self.pos += 1;
        }

        let text: String = self.input[start..self.pos].chars().filter(|c| *c != '_').collect();
        if is_float {
            text.parse::<f64>()
                .map(Literal::Float)
                .map_err(|_| self.error(format!("invalid float '{text}'")))
        } else {
            text.parse::<i64>()
                .map(Literal::Int)
                .map_err(|_| self.error(format!("invalid integer '{text}'")))
        }
    }

    fn word(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        match &self.input[start..self.pos] {
            "None" => Ok(Literal::None),
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            "nan" => Ok(Literal::Float(f64::NAN)),
            "inf" => Ok(Literal::Float(f64::INFINITY)),
            "set" => {
                self.expect('(')?;
                self.expect(')')?;
                Ok(Literal::Set(Vec::new()))
            }
            other => {
                self.pos = start;
                Err(self.error(format!("unsupported name '{other}'")))
            }
        }
    }
}

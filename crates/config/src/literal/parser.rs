//! Recursive-descent parser over the literal token stream.
//!
//! Responsibilities:
//! - Build `ConfigValue`s from numbers, strings, constants and containers.
//! - Parse top-level `NAME = literal` statements for configuration files.
//!
//! Does NOT handle:
//! - Evaluating names, calls or operators; any such construct is an error.
//!
//! Invariants:
//! - Only a single unary sign is accepted, and only in front of a number.
//! - Nesting deeper than `MAX_DEPTH` is rejected instead of recursing further.

use serde_json::{Map, Number, Value};

use super::LiteralError;
use super::lexer::{Token, TokenKind};
use crate::types::ConfigValue;

const MAX_DEPTH: usize = 128;

pub(crate) struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            src,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> &Token {
        // The lexer always terminates the stream with `Eof`.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> LiteralError {
        LiteralError::at(self.src, offset, message)
    }

    fn at_punct(&self, c: char) -> bool {
        self.peek().kind == TokenKind::Punct(c)
    }

    fn expect_punct(&mut self, c: char) -> Result<(), LiteralError> {
        if self.at_punct(c) {
            self.advance();
            Ok(())
        } else {
            let token = self.peek();
            Err(self.error(token.offset, format!("expected '{c}'")))
        }
    }

    fn skip_newlines(&mut self) {
        while self.peek().kind == TokenKind::Newline {
            self.advance();
        }
    }

    /// Parse exactly one literal, allowing blank lines around it.
    pub fn parse_single(mut self) -> Result<ConfigValue, LiteralError> {
        self.skip_newlines();
        let value = self.parse_value(0)?;
        self.skip_newlines();
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            return Err(self.error(token.offset, "unexpected trailing input"));
        }
        Ok(value)
    }

    /// Parse a sequence of `NAME = literal` statements.
    pub fn parse_statements(mut self) -> Result<Vec<(String, ConfigValue)>, LiteralError> {
        let mut assignments = Vec::new();
        loop {
            while matches!(
                self.peek().kind,
                TokenKind::Newline | TokenKind::Punct(';')
            ) {
                self.advance();
            }

            let token = self.advance();
            let name = match token.kind {
                TokenKind::Eof => return Ok(assignments),
                TokenKind::Name(name) => name,
                _ => {
                    return Err(self.error(token.offset, "expected an assignment statement"));
                }
            };

            self.expect_punct('=')?;
            let value = self.parse_value(0)?;
            assignments.push((name, value));

            let token = self.peek();
            match token.kind {
                TokenKind::Newline | TokenKind::Punct(';') | TokenKind::Eof => {}
                _ => return Err(self.error(token.offset, "expected end of statement")),
            }
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<ConfigValue, LiteralError> {
        if depth > MAX_DEPTH {
            let offset = self.peek().offset;
            return Err(self.error(offset, "literal is nested too deeply"));
        }

        let token = self.advance();
        match token.kind {
            TokenKind::Str(first) => {
                let mut text = first;
                while let TokenKind::Str(next) = &self.peek().kind {
                    text.push_str(next);
                    self.advance();
                }
                Ok(Value::String(text))
            }
            TokenKind::Int(text) => self.integer(token.offset, false, &text),
            TokenKind::Float(text) => self.float(token.offset, false, &text),
            TokenKind::Punct(sign @ ('+' | '-')) => {
                self.signed_number(token.offset, sign == '-', depth)
            }
            TokenKind::Name(name) => match name.as_str() {
                "True" => Ok(Value::Bool(true)),
                "False" => Ok(Value::Bool(false)),
                "None" => Ok(Value::Null),
                _ => Err(self.error(token.offset, format!("'{name}' is not a literal"))),
            },
            TokenKind::Punct('[') => {
                let items = self.parse_items(']', depth)?;
                Ok(Value::Array(items))
            }
            TokenKind::Punct('(') => self.parse_parenthesized(depth),
            TokenKind::Punct('{') => self.parse_braced(depth),
            TokenKind::Newline | TokenKind::Eof => {
                Err(self.error(token.offset, "expected a literal value"))
            }
            TokenKind::Punct(c) => Err(self.error(token.offset, format!("unexpected '{c}'"))),
        }
    }

    /// The operand of a unary sign: a number, optionally wrapped in
    /// parentheses (`-1`, `-(1)`, `-((1.5))`).
    fn signed_number(
        &mut self,
        offset: usize,
        negative: bool,
        depth: usize,
    ) -> Result<ConfigValue, LiteralError> {
        let mut parens = 0;
        while self.at_punct('(') {
            if depth + parens > MAX_DEPTH {
                let offset = self.peek().offset;
                return Err(self.error(offset, "literal is nested too deeply"));
            }
            self.advance();
            parens += 1;
        }

        let operand = self.advance();
        let value = match operand.kind {
            TokenKind::Int(text) => self.integer(offset, negative, &text)?,
            TokenKind::Float(text) => self.float(offset, negative, &text)?,
            _ => return Err(self.error(offset, "unary sign requires a number")),
        };
        for _ in 0..parens {
            self.expect_punct(')')?;
        }
        Ok(value)
    }

    /// Comma separated values up to `close`, trailing comma allowed.
    fn parse_items(&mut self, close: char, depth: usize) -> Result<Vec<ConfigValue>, LiteralError> {
        let mut items = Vec::new();
        loop {
            if self.at_punct(close) {
                self.advance();
                return Ok(items);
            }
            items.push(self.parse_value(depth + 1)?);
            if self.at_punct(',') {
                self.advance();
            } else {
                self.expect_punct(close)?;
                return Ok(items);
            }
        }
    }

    fn parse_parenthesized(&mut self, depth: usize) -> Result<ConfigValue, LiteralError> {
        if self.at_punct(')') {
            self.advance();
            return Ok(Value::Array(Vec::new()));
        }

        let first = self.parse_value(depth + 1)?;
        if self.at_punct(')') {
            self.advance();
            return Ok(first);
        }

        self.expect_punct(',')?;
        let mut items = vec![first];
        items.extend(self.parse_items(')', depth)?);
        Ok(Value::Array(items))
    }

    fn parse_braced(&mut self, depth: usize) -> Result<ConfigValue, LiteralError> {
        if self.at_punct('}') {
            self.advance();
            return Ok(Value::Object(Map::new()));
        }

        let key_offset = self.peek().offset;
        let start = self.pos;
        let first = self.parse_value(depth + 1)?;
        if !self.at_punct(':') {
            self.ensure_hashable(start)?;
            return self.parse_set(first, depth);
        }

        let mut map = Map::new();
        let mut key = self.dict_key(key_offset, first)?;
        loop {
            self.expect_punct(':')?;
            let value = self.parse_value(depth + 1)?;
            map.insert(key, value);

            if self.at_punct(',') {
                self.advance();
            } else {
                self.expect_punct('}')?;
                return Ok(Value::Object(map));
            }
            if self.at_punct('}') {
                self.advance();
                return Ok(Value::Object(map));
            }

            let key_offset = self.peek().offset;
            let raw_key = self.parse_value(depth + 1)?;
            key = self.dict_key(key_offset, raw_key)?;
        }
    }

    /// Remaining members of a set whose first member is already parsed.
    /// Members are deduplicated in first-seen order.
    fn parse_set(&mut self, first: ConfigValue, depth: usize) -> Result<ConfigValue, LiteralError> {
        let mut unique = vec![first];
        while self.at_punct(',') {
            self.advance();
            if self.at_punct('}') {
                break;
            }
            let start = self.pos;
            let item = self.parse_value(depth + 1)?;
            self.ensure_hashable(start)?;
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        self.expect_punct('}')?;
        Ok(Value::Array(unique))
    }

    /// Reject a set member that contains a list, mapping or set. Tuples of
    /// scalars are fine; their tokens are only `(`, `,`, `)` and scalars.
    fn ensure_hashable(&self, start: usize) -> Result<(), LiteralError> {
        let unhashable = self.tokens[start..self.pos]
            .iter()
            .find(|t| matches!(t.kind, TokenKind::Punct('[' | '{')));
        match unhashable {
            Some(token) => Err(self.error(token.offset, "set members must be hashable")),
            None => Ok(()),
        }
    }

    fn dict_key(&self, offset: usize, key: ConfigValue) -> Result<String, LiteralError> {
        match key {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(true) => Ok("True".to_string()),
            Value::Bool(false) => Ok("False".to_string()),
            Value::Null => Ok("None".to_string()),
            Value::Array(_) | Value::Object(_) => {
                Err(self.error(offset, "mapping keys must be hashable"))
            }
        }
    }

    fn integer(&self, offset: usize, negative: bool, text: &str) -> Result<ConfigValue, LiteralError> {
        if text.ends_with('_') || text.contains("__") {
            return Err(self.error(offset, "invalid underscore in numeric literal"));
        }
        let digits: String = text.chars().filter(|c| *c != '_').collect();
        let lower = digits.to_ascii_lowercase();

        let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
            (16, rest)
        } else if let Some(rest) = lower.strip_prefix("0o") {
            (8, rest)
        } else if let Some(rest) = lower.strip_prefix("0b") {
            (2, rest)
        } else {
            if body_has_leading_zero(&lower) {
                return Err(self.error(offset, "leading zeros in decimal integers are not permitted"));
            }
            (10, lower.as_str())
        };

        let out_of_range = || self.error(offset, "integer literal out of range");
        let magnitude = u64::from_str_radix(body, radix).map_err(|_| out_of_range())?;

        if negative {
            if magnitude == 1u64 << 63 {
                return Ok(Value::Number(Number::from(i64::MIN)));
            }
            let signed = i64::try_from(magnitude).map_err(|_| out_of_range())?;
            Ok(Value::Number(Number::from(-signed)))
        } else {
            Ok(Value::Number(Number::from(magnitude)))
        }
    }

    fn float(&self, offset: usize, negative: bool, text: &str) -> Result<ConfigValue, LiteralError> {
        if text.ends_with('_') || text.contains("__") {
            return Err(self.error(offset, "invalid underscore in numeric literal"));
        }
        let digits: String = text.chars().filter(|c| *c != '_').collect();
        let parsed: f64 = digits
            .parse()
            .map_err(|_| self.error(offset, "invalid float literal"))?;
        let value = if negative { -parsed } else { parsed };
        Number::from_f64(value)
            .map(Value::Number)
            .ok_or_else(|| self.error(offset, "float literal out of range"))
    }
}

/// `0` and `000` are fine, `0123` is not.
fn body_has_leading_zero(digits: &str) -> bool {
    digits.len() > 1 && digits.starts_with('0') && digits.chars().any(|c| c != '0')
}

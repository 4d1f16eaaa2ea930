//! Tokenizer for the literal subset.
//!
//! Responsibilities:
//! - Split source text into names, numbers, decoded strings and punctuation.
//! - Decode string escapes and string prefixes (`r`, `u`).
//! - Track bracket depth so that line breaks are only significant at depth zero.
//!
//! Does NOT handle:
//! - Grammar rules or value construction (see `parser.rs`).
//!
//! Invariants:
//! - Every token carries the byte offset of its first character.
//! - Comments and explicit line continuations never produce tokens.
//! - Byte strings and f-strings are rejected here, not in the parser.

use super::LiteralError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Name(String),
    Int(String),
    Float(String),
    Str(String),
    Punct(char),
    Newline,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    /// Tokenize the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LiteralError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> LiteralError {
        LiteralError::at(self.src, offset, message)
    }

    fn next_token(&mut self) -> Result<Token, LiteralError> {
        loop {
            let start = self.pos;
            let Some(c) = self.peek() else {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    offset: self.pos,
                });
            };

            match c {
                ' ' | '\t' | '\x0c' | '\r' => {
                    self.bump();
                }
                '#' => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                '\\' => {
                    self.bump();
                    if self.peek() == Some('\r') {
                        self.bump();
                    }
                    if self.bump() != Some('\n') {
                        return Err(self.error(start, "unexpected character after line continuation"));
                    }
                }
                '\n' => {
                    self.bump();
                    if self.depth == 0 {
                        return Ok(Token {
                            kind: TokenKind::Newline,
                            offset: start,
                        });
                    }
                }
                '[' | '(' | '{' => {
                    self.bump();
                    self.depth += 1;
                    return Ok(Token {
                        kind: TokenKind::Punct(c),
                        offset: start,
                    });
                }
                ']' | ')' | '}' => {
                    self.bump();
                    self.depth = self.depth.saturating_sub(1);
                    return Ok(Token {
                        kind: TokenKind::Punct(c),
                        offset: start,
                    });
                }
                ',' | ':' | '=' | ';' | '+' | '-' => {
                    self.bump();
                    return Ok(Token {
                        kind: TokenKind::Punct(c),
                        offset: start,
                    });
                }
                '\'' | '"' => {
                    let value = self.lex_string(start, false)?;
                    return Ok(Token {
                        kind: TokenKind::Str(value),
                        offset: start,
                    });
                }
                c if c.is_ascii_digit() => return self.lex_number(start),
                '.' if self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) => {
                    return self.lex_number(start);
                }
                c if c == '_' || c.is_alphabetic() => return self.lex_name_or_prefixed(start),
                other => {
                    return Err(self.error(start, format!("unexpected character {other:?}")));
                }
            }
        }
    }

    fn lex_name_or_prefixed(&mut self, start: usize) -> Result<Token, LiteralError> {
        while let Some(c) = self.peek() {
            if c == '_' || c.is_alphanumeric() {
                self.bump();
            } else {
                break;
            }
        }
        let name = &self.src[start..self.pos];

        if matches!(self.peek(), Some('\'') | Some('"')) {
            let prefix = name.to_ascii_lowercase();
            match prefix.as_str() {
                "r" => {
                    let value = self.lex_string(start, true)?;
                    return Ok(Token {
                        kind: TokenKind::Str(value),
                        offset: start,
                    });
                }
                "u" => {
                    let value = self.lex_string(start, false)?;
                    return Ok(Token {
                        kind: TokenKind::Str(value),
                        offset: start,
                    });
                }
                "b" | "br" | "rb" => {
                    return Err(self.error(start, "byte strings are not supported"));
                }
                "f" | "fr" | "rf" => {
                    return Err(self.error(start, "formatted strings are not literals"));
                }
                _ => {}
            }
        }

        Ok(Token {
            kind: TokenKind::Name(name.to_string()),
            offset: start,
        })
    }

    fn lex_number(&mut self, start: usize) -> Result<Token, LiteralError> {
        let radix_prefix = match (self.peek(), self.peek_at(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        if let Some(radix) = radix_prefix {
            self.bump();
            self.bump();
            let digits_start = self.pos;
            while let Some(c) = self.peek() {
                if c == '_' || c.is_digit(radix) {
                    self.bump();
                } else {
                    break;
                }
            }
            if self.pos == digits_start {
                return Err(self.error(start, "missing digits after integer prefix"));
            }
            self.reject_trailing_identifier(start)?;
            return Ok(Token {
                kind: TokenKind::Int(self.src[start..self.pos].to_string()),
                offset: start,
            });
        }

        let mut is_float = false;
        self.eat_digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.bump();
            self.eat_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let sign_offset = usize::from(matches!(self.peek_at(1), Some('+' | '-')));
            if self
                .peek_at(1 + sign_offset)
                .is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                self.bump();
                if sign_offset == 1 {
                    self.bump();
                }
                self.eat_digits();
            }
        }
        if matches!(self.peek(), Some('j' | 'J')) {
            return Err(self.error(start, "complex numbers are not supported"));
        }
        self.reject_trailing_identifier(start)?;

        let text = self.src[start..self.pos].to_string();
        let kind = if is_float {
            TokenKind::Float(text)
        } else {
            TokenKind::Int(text)
        };
        Ok(Token {
            kind,
            offset: start,
        })
    }

    fn eat_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c == '_' || c.is_ascii_digit() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn reject_trailing_identifier(&self, start: usize) -> Result<(), LiteralError> {
        match self.peek() {
            Some(c) if c == '_' || c.is_alphanumeric() => {
                Err(self.error(start, "invalid numeric literal"))
            }
            _ => Ok(()),
        }
    }

    /// Lex a quoted string whose opening quote is at `self.pos`.
    fn lex_string(&mut self, start: usize, raw: bool) -> Result<String, LiteralError> {
        let quote = self.bump().ok_or_else(|| self.error(start, "expected quote"))?;
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.bump();
            self.bump();
        }

        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(self.error(start, "unterminated string literal"));
            };

            if c == quote {
                if !triple {
                    return Ok(out);
                }
                if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                    self.bump();
                    self.bump();
                    return Ok(out);
                }
                out.push(c);
                continue;
            }

            match c {
                '\n' if !triple => {
                    return Err(self.error(start, "unterminated string literal"));
                }
                '\\' if raw => {
                    out.push('\\');
                    if let Some(next) = self.bump() {
                        out.push(next);
                    }
                }
                '\\' => self.lex_escape(&mut out)?,
                other => out.push(other),
            }
        }
    }

    fn lex_escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let escape_start = self.pos - 1;
        let Some(c) = self.bump() else {
            return Err(self.error(escape_start, "unterminated string literal"));
        };

        match c {
            '\n' => {}
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            '\\' | '\'' | '"' => out.push(c),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                out.push(self.code_point(escape_start, code)?);
            }
            'x' => out.push(self.hex_escape(escape_start, 2)?),
            'u' => out.push(self.hex_escape(escape_start, 4)?),
            'U' => out.push(self.hex_escape(escape_start, 8)?),
            'N' => return Err(self.error(escape_start, "named unicode escapes are not supported")),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex_escape(&mut self, escape_start: usize, width: usize) -> Result<char, LiteralError> {
        let mut code = 0u32;
        for _ in 0..width {
            let digit = self
                .peek()
                .and_then(|d| d.to_digit(16))
                .ok_or_else(|| self.error(escape_start, "truncated escape sequence"))?;
            code = code * 16 + digit;
            self.bump();
        }
        self.code_point(escape_start, code)
    }

    fn code_point(&self, escape_start: usize, code: u32) -> Result<char, LiteralError> {
        char::from_u32(code)
            .ok_or_else(|| self.error(escape_start, format!("invalid code point {code:#x}")))
    }
}

//! Source text -> linear token stream.

use crate::char_util::{is_ident_cont, is_ident_start, parse_leading_integer};
use crate::error::LexError;
use crate::token::{Token, TokenKind, KEYWORDS, PUNCT1, PUNCT2};

/// Tokenizes `src` into a flat `Vec<Token>` terminated by exactly one
/// `Eof` token. Applies, at each position, the first matching rule:
/// whitespace, two-char punctuation, single-char punctuation, a number,
/// an identifier/keyword. Anything else is a [`LexError`].
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let rest: String = chars[i..].iter().collect();

        if let Some(op) = PUNCT2.iter().find(|op| rest.starts_with(*op)) {
            tokens.push(Token::new(TokenKind::Punct, *op));
            i += 2;
            continue;
        }

        if PUNCT1.contains(&c) {
            tokens.push(Token::new(TokenKind::Punct, c.to_string()));
            i += 1;
            continue;
        }

        if c.is_ascii_digit() {
            let (value, len) = parse_leading_integer(&rest);
            let lexeme: String = chars[i..i + len].iter().collect();
            tokens.push(Token::number(lexeme, value));
            i += len;
            continue;
        }

        if is_ident_start(c) {
            let mut len = 0;
            for &ch in &chars[i..] {
                if is_ident_cont(ch) {
                    len += 1;
                } else {
                    break;
                }
            }
            let lexeme: String = chars[i..i + len].iter().collect();
            let kind = if KEYWORDS.contains(&lexeme.as_str()) {
                TokenKind::Keyword
            } else {
                TokenKind::Ident
            };
            tokens.push(Token::new(kind, lexeme));
            i += len;
            continue;
        }

        return Err(LexError::Unrecognized { rest });
    }

    tokens.push(Token::eof());
    Ok(tokens)
}

/// A cursor over an already-tokenized source, exposing the small API the
/// parser drives: `consume`, `consume_ident`, `expect`, `expect_number`,
/// `at_eof`. Implemented as an index into an immutable `Vec<Token>` rather
/// than head-popping a list, to avoid O(n) shifts on large inputs.
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// If the head token is `Punct`/`Keyword` with lexeme `op`, advances
    /// past it and returns `true`; otherwise leaves the cursor unmoved.
    pub fn consume(&mut self, op: &str) -> bool {
        if self.peek().is_op(op) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// If the head token is an identifier, advances past it and returns it.
    pub fn consume_ident(&mut self) -> Option<Token> {
        if self.peek().kind == TokenKind::Ident {
            let tok = self.tokens[self.pos].clone();
            self.pos += 1;
            Some(tok)
        } else {
            None
        }
    }

    /// Like [`consume`](Self::consume), but fatal on mismatch.
    pub fn expect(&mut self, op: &str) -> Result<(), crate::error::ParseError> {
        if self.consume(op) {
            Ok(())
        } else {
            Err(crate::error::ParseError::Expected {
                expected: op.to_string(),
                found: self.peek().lexeme.clone(),
            })
        }
    }

    /// Pops a `Number` token and returns its value; fatal on mismatch.
    pub fn expect_number(&mut self) -> Result<i64, crate::error::ParseError> {
        let tok = self.peek();
        if tok.kind != TokenKind::Number {
            return Err(crate::error::ParseError::ExpectedNumber {
                found: tok.lexeme.clone(),
            });
        }
        let value = tok.value.expect("Number token always carries a value");
        self.pos += 1;
        Ok(value)
    }

    pub fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }
}

//! Lexer for Slate
//!
//! Converts source code into a stream of tokens. Whitespace and both
//! comment forms are skipped; every other character must belong to a
//! token or lexing fails.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{LexError, Span};

/// The lexer state
pub struct Lexer {
    /// Source code as characters
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            start: 0,
        }
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Get the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    /// Advance to the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    /// Check if we've reached the end of input
    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Create a span from start to current position
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Create a token with the current span
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    /// Skip whitespace and comments
    fn skip_whitespace(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.peek() {
            match c {
                // Whitespace
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                // Line comment
                '/' if self.peek_next() == Some('/') => {
                    // Skip until end of line
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                // Block comment (non-nesting)
                '/' if self.peek_next() == Some('*') => {
                    let open = Span::new(self.pos, self.pos + 2);
                    self.advance(); // skip /
                    self.advance(); // skip *
                    loop {
                        if self.is_at_end() {
                            return Err(LexError::UnterminatedComment { span: open });
                        }
                        if self.peek() == Some('*') && self.peek_next() == Some('/') {
                            self.advance();
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[self.start..self.pos].iter().collect();

        // Check if it's a keyword
        let kind = TokenKind::keyword_from_str(&text)
            .unwrap_or(TokenKind::Ident(text));

        self.make_token(kind)
    }

    /// Read an integer literal
    fn read_number(&mut self) -> Result<Token, LexError> {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        // A digit run that continues into an identifier is one malformed
        // token, not two; consume the tail so the error names all of it.
        if self.peek().map_or(false, |c| c.is_ascii_alphabetic() || c == '_') {
            while let Some(c) = self.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    self.advance();
                } else {
                    break;
                }
            }
            let text: String = self.source[self.start..self.pos].iter().collect();
            return Err(LexError::InvalidNumber {
                text,
                span: self.make_span(),
            });
        }

        let text: String = self.source[self.start..self.pos].iter().collect();
        let value = text.parse::<i64>().map_err(|_| LexError::InvalidNumber {
            text: text.clone(),
            span: self.make_span(),
        })?;

        Ok(self.make_token(TokenKind::IntLit(value)))
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace()?;
        self.start = self.pos;

        if self.is_at_end() {
            return Ok(Token::eof(self.make_span()));
        }

        let c = self.advance().unwrap();

        // Identifiers and keywords
        if c.is_ascii_alphabetic() || c == '_' {
            self.pos -= 1; // back up
            return Ok(self.read_identifier());
        }

        // Numbers
        if c.is_ascii_digit() {
            self.pos -= 1; // back up
            return self.read_number();
        }

        // Operators and delimiters
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                // '!' only exists as part of '!='
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Ne
                } else {
                    return Err(LexError::UnexpectedChar {
                        found: c,
                        span: self.make_span(),
                    });
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            _ => {
                return Err(LexError::UnexpectedChar {
                    found: c,
                    span: self.make_span(),
                })
            }
        };

        Ok(self.make_token(kind))
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

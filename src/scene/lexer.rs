// Scene lexer: splits scene text into tokens with their byte offset and line

use super::error::LoadError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String), // Record or attribute name; the trailing ':' is consumed
    Number(f64),
    OptStart, // {
    OptEnd,   // }
    PosStart, // [
    PosEnd,   // ]
    X,        // Width/height separator
    Comma,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "'{}:'", name),
            Token::Number(n) => write!(f, "number {}", n),
            Token::OptStart => write!(f, "'{{'"),
            Token::OptEnd => write!(f, "'}}'"),
            Token::PosStart => write!(f, "'['"),
            Token::PosEnd => write!(f, "']'"),
            Token::X => write!(f, "'x'"),
            Token::Comma => write!(f, "','"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A token and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
    pub line: usize,
}

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src, pos: 0, line: 1 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Returns the next token. Once the input is exhausted every call
    /// yields `Token::Eof`.
    pub fn next_token(&mut self) -> Result<Spanned, LoadError> {
        self.skip_whitespace();
        let offset = self.pos;
        let line = self.line;
        let Some(c) = self.peek() else {
            return Ok(Spanned { token: Token::Eof, offset, line });
        };

        let token = match c {
            '{' => Token::OptStart,
            '}' => Token::OptEnd,
            '[' => Token::PosStart,
            ']' => Token::PosEnd,
            ',' => Token::Comma,
            'x' => Token::X,
            c if c.is_ascii_digit() || c == '-' => {
                return Ok(Spanned { token: self.number(offset, line)?, offset, line });
            }
            c if c.is_alphabetic() => {
                let token = self.ident();
                self.expect_colon()?;
                return Ok(Spanned { token, offset, line });
            }
            ch => return Err(LoadError::UnexpectedChar { ch, offset, line }),
        };
        self.bump();
        Ok(Spanned { token, offset, line })
    }

    // Optional '-', digits, then at most one '.' followed by more digits
    fn number(&mut self, offset: usize, line: usize) -> Result<Token, LoadError> {
        if self.peek() == Some('-') {
            self.bump();
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(LoadError::InvalidNumber {
                    text: "-".to_string(),
                    offset,
                    line,
                });
            }
        }
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c == '.' && !seen_dot {
                seen_dot = true;
            } else if !c.is_ascii_digit() {
                break;
            }
            self.bump();
        }

        let text = &self.src[offset..self.pos];
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| LoadError::InvalidNumber {
                text: text.to_string(),
                offset,
                line,
            })
    }

    fn ident(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
            self.bump();
        }
        Token::Ident(self.src[start..self.pos].to_string())
    }

    fn expect_colon(&mut self) -> Result<(), LoadError> {
        self.skip_whitespace();
        if self.peek() == Some(':') {
            self.bump();
            Ok(())
        } else {
            Err(LoadError::MissingSeparator {
                separator: ':',
                offset: self.pos,
                line: self.line,
            })
        }
    }
}

//! Lexical checker used by the local session.
//!
//! It only splits a statement into tokens. Grammar is left to whatever engine
//! sits behind the session.

use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// Bare word: keyword or unquoted identifier, as written.
    Word(String),
    /// `` `name` `` identifier with the backticks removed.
    QuotedIdentifier(String),
    StringLiteral(String),
    NumericLiteral(String),
    Operator(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Asterisk,
    Semicolon,
    EOF,
}

impl Token {
    /// True if the token is the bare word `keyword`, ignoring case.
    pub fn is_word(&self, keyword: &str) -> bool {
        matches!(self, Self::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    /// Identifier text for bare or backtick-quoted names.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Word(w) | Self::QuotedIdentifier(w) => Some(w),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum LexError {
    UnterminatedString(usize),
    UnterminatedIdentifier(usize),
    UnterminatedComment(usize),
    InvalidCharacter(char, usize),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString(pos) => {
                write!(f, "Unterminated string literal starting at position {}", pos)
            }
            Self::UnterminatedIdentifier(pos) => {
                write!(f, "Unterminated quoted identifier starting at position {}", pos)
            }
            Self::UnterminatedComment(pos) => {
                write!(f, "Unterminated block comment starting at position {}", pos)
            }
            Self::InvalidCharacter(ch, pos) => {
                write!(f, "Invalid character '{}' at position {}", ch, pos)
            }
        }
    }
}

impl std::error::Error for LexError {}

const TWO_CHAR_OPERATORS: [&str; 7] = ["!=", "<>", "<=", ">=", "||", "::", "=>"];
const SINGLE_CHAR_OPERATORS: &str = "=<>!+-/%|&^~:?{}";

pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, chars: input.char_indices().peekable() }
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.clone().nth(1).map(|(_, ch)| ch)
    }

    /// Skips whitespace, `-- line` comments and `/* block */` comments.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        while let Some(&(idx, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else if ch == '-' && self.peek_second() == Some('-') {
                for (_, c) in self.chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            } else if ch == '/' && self.peek_second() == Some('*') {
                self.chars.next();
                self.chars.next();
                let mut closed = false;
                while let Some((_, c)) = self.chars.next() {
                    if c == '*' && self.chars.peek().is_some_and(|&(_, n)| n == '/') {
                        self.chars.next();
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(LexError::UnterminatedComment(idx));
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn read_word(&mut self, start_idx: usize) -> Token {
        let mut end_idx = start_idx;
        while let Some(&(idx, ch)) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                end_idx = idx + ch.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        Token::Word(self.input[start_idx..end_idx].to_string())
    }

    /// Reads a quoted run. A backslash escapes the next character and a
    /// doubled quote stands for one quote.
    fn read_quoted(&mut self, quote_char: char) -> Option<String> {
        let mut value = String::new();
        let mut escaped = false;
        self.chars.next();

        while let Some((_, ch)) = self.chars.next() {
            if escaped {
                value.push(ch);
                escaped = false;
            } else if ch == '\\' && quote_char != '`' {
                escaped = true;
            } else if ch == quote_char {
                if self.chars.peek().is_some_and(|&(_, n)| n == quote_char) {
                    self.chars.next();
                    value.push(ch);
                } else {
                    return Some(value);
                }
            } else {
                value.push(ch);
            }
        }
        None
    }

    fn read_numeric_literal(&mut self, start_idx: usize) -> Token {
        let mut end_idx = start_idx;
        let mut has_decimal = false;

        while let Some(&(idx, ch)) = self.chars.peek() {
            if ch.is_ascii_digit() {
                end_idx = idx + 1;
                self.chars.next();
            } else if ch == '.' && !has_decimal {
                // a '.' only belongs to the number when a digit follows it
                if self.peek_second().is_some_and(|n| n.is_ascii_digit()) {
                    has_decimal = true;
                    end_idx = idx + 1;
                    self.chars.next();
                } else {
                    break;
                }
            } else {
                break;
            }
        }

        Token::NumericLiteral(self.input[start_idx..end_idx].to_string())
    }

    fn read_operator(&mut self, ch: char) -> Token {
        self.chars.next();
        if let Some(&(_, next)) = self.chars.peek() {
            let pair: String = [ch, next].iter().collect();
            if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                self.chars.next();
                return Token::Operator(pair);
            }
        }
        Token::Operator(ch.to_string())
    }

    fn single(&mut self, token: Token) -> Token {
        self.chars.next();
        token
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia()?;

            let Some(&(idx, ch)) = self.chars.peek() else {
                tokens.push(Token::EOF);
                break;
            };

            let token = match ch {
                '(' => self.single(Token::LParen),
                ')' => self.single(Token::RParen),
                '[' => self.single(Token::LBracket),
                ']' => self.single(Token::RBracket),
                ',' => self.single(Token::Comma),
                '*' => self.single(Token::Asterisk),
                ';' => self.single(Token::Semicolon),
                '\'' | '"' => self
                    .read_quoted(ch)
                    .map(Token::StringLiteral)
                    .ok_or(LexError::UnterminatedString(idx))?,
                '`' => self
                    .read_quoted(ch)
                    .map(Token::QuotedIdentifier)
                    .ok_or(LexError::UnterminatedIdentifier(idx))?,
                '.' if self.peek_second().is_some_and(|n| n.is_ascii_digit()) => {
                    self.read_numeric_literal(idx)
                }
                '.' => self.single(Token::Dot),
                c if c.is_alphabetic() || c == '_' => self.read_word(idx),
                c if c.is_ascii_digit() => self.read_numeric_literal(idx),
                c if SINGLE_CHAR_OPERATORS.contains(c) => self.read_operator(c),
                _ => return Err(LexError::InvalidCharacter(ch, idx)),
            };
            tokens.push(token);
        }
        Ok(tokens)
    }
}

use colored::*;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LexerError {
    #[error("{0}")]
    GlobLexerError(String),

    #[error("{} while tokenizing number -{0}-, found two '.' to construct a decimal.", "Error".bold().red())]
    DoubleDotNumber(String),

    #[error("{} while tokenizing number, only digits and one '.' are supported to declare a number.", "Error".bold().red())]
    AlphaCharInNumberToken,

    #[error("{} while tokenizing string, missing closing quote.", "Error".bold().red())]
    UnterminatedString,

    #[error("{} while tokenizing code, unsupported character: -{0}-.", "Error".bold().red())]
    UnrecognizedToken(String),

    #[error("{} while tokenizing code, dedent does not match any outer indentation level.", "Error".bold().red())]
    InconsistentDedent,
}

impl LexerError {
    pub fn context(self, line: u64) -> LexerError {
        Self::GlobLexerError(format!("Line {}: {}", line, self))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literal types
    Number,
    Str,
    FStr,
    Identifier,

    // Operators
    Equals,
    BinaryOperator,
    CompoundAssign,
    Comparison,

    // Grouping
    OpenParen,  // (
    CloseParen, // )
    Comma,      // ,
    Colon,      // :

    // Keywords
    If,
    Elif,
    Else,
    While,
    Def,
    Return,
    Break,
    Continue,
    Or,
    And,
    Not,
    NoneKw,
    TrueKw,
    FalseKw,

    // Layout
    Newline,
    Indent,
    Dedent,
    EOF,
}

// We use a struct instead of an enum to be able to loop only on value
// without having to extract it from the enum each time with if let syntax
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u64,
}

impl Token {
    pub fn new(kind: TokenKind, value: String, line: u64) -> Self {
        Self { kind, value, line }
    }
}

fn keyword_kind(word: &str) -> Option<TokenKind> {
    match word {
        "if" => Some(TokenKind::If),
        "elif" => Some(TokenKind::Elif),
        "else" => Some(TokenKind::Else),
        "while" => Some(TokenKind::While),
        "def" => Some(TokenKind::Def),
        "return" => Some(TokenKind::Return),
        "break" => Some(TokenKind::Break),
        "continue" => Some(TokenKind::Continue),
        "or" => Some(TokenKind::Or),
        "and" => Some(TokenKind::And),
        "not" => Some(TokenKind::Not),
        "None" => Some(TokenKind::NoneKw),
        "True" => Some(TokenKind::TrueKw),
        "False" => Some(TokenKind::FalseKw),
        _ => None,
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Default)]
pub struct Lexer {
    pub tokens: VecDeque<Token>,
    // Open indentation levels, outermost first. Always starts at 0
    indent_stack: Vec<usize>,
}

impl Lexer {
    pub fn tokenize(&mut self, source_code: String) -> Result<(), LexerError> {
        self.tokens.clear();
        self.indent_stack = vec![0];

        let mut line_no: u64 = 0;

        for raw_line in source_code.lines() {
            line_no += 1;
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            let chars = line.chars().collect::<Vec<char>>();

            // Leading whitespace gives the indentation level
            let mut start = 0;
            while start < chars.len() && (chars[start] == ' ' || chars[start] == '\t') {
                start += 1;
            }

            // Blank and comment-only lines play no part in indentation
            if start == chars.len() || chars[start] == '#' {
                continue;
            }

            self.handle_indentation(start, line_no)
                .map_err(|e| e.context(line_no))?;

            self.scan_line(&chars, start, line_no)
                .map_err(|e| e.context(line_no))?;

            self.tokens
                .push_back(Token::new(TokenKind::Newline, "\n".into(), line_no));
        }

        // Close every block still open at end of file
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens
                .push_back(Token::new(TokenKind::Dedent, String::new(), line_no));
        }

        self.tokens
            .push_back(Token::new(TokenKind::EOF, String::new(), line_no));

        Ok(())
    }

    fn handle_indentation(&mut self, indent: usize, line: u64) -> Result<(), LexerError> {
        let current = *self.indent_stack.last().unwrap();

        if indent > current {
            self.indent_stack.push(indent);
            self.tokens
                .push_back(Token::new(TokenKind::Indent, String::new(), line));
            return Ok(());
        }

        while indent < *self.indent_stack.last().unwrap() {
            self.indent_stack.pop();
            self.tokens
                .push_back(Token::new(TokenKind::Dedent, String::new(), line));
        }

        // The new level must land exactly on an enclosing one
        if indent != *self.indent_stack.last().unwrap() {
            return Err(LexerError::InconsistentDedent);
        }

        Ok(())
    }

    fn scan_line(&mut self, chars: &[char], start: usize, line: u64) -> Result<(), LexerError> {
        let mut i = start;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            match c {
                ' ' | '\t' => i += 1,
                // Rest of the line is a comment
                '#' => break,
                '(' => {
                    self.tokens
                        .push_back(Token::new(TokenKind::OpenParen, c.to_string(), line));
                    i += 1;
                }
                ')' => {
                    self.tokens
                        .push_back(Token::new(TokenKind::CloseParen, c.to_string(), line));
                    i += 1;
                }
                ',' => {
                    self.tokens
                        .push_back(Token::new(TokenKind::Comma, c.to_string(), line));
                    i += 1;
                }
                ':' => {
                    self.tokens
                        .push_back(Token::new(TokenKind::Colon, c.to_string(), line));
                    i += 1;
                }
                '+' | '-' | '*' | '%' => {
                    if next == Some('=') {
                        self.tokens.push_back(Token::new(
                            TokenKind::CompoundAssign,
                            c.to_string(),
                            line,
                        ));
                        i += 2;
                    } else {
                        self.tokens.push_back(Token::new(
                            TokenKind::BinaryOperator,
                            c.to_string(),
                            line,
                        ));
                        i += 1;
                    }
                }
                '/' => {
                    // One of: /  /=  //  //=
                    if next == Some('/') {
                        if chars.get(i + 2) == Some(&'=') {
                            self.tokens.push_back(Token::new(
                                TokenKind::CompoundAssign,
                                "//".into(),
                                line,
                            ));
                            i += 3;
                        } else {
                            self.tokens.push_back(Token::new(
                                TokenKind::BinaryOperator,
                                "//".into(),
                                line,
                            ));
                            i += 2;
                        }
                    } else if next == Some('=') {
                        self.tokens.push_back(Token::new(
                            TokenKind::CompoundAssign,
                            "/".into(),
                            line,
                        ));
                        i += 2;
                    } else {
                        self.tokens.push_back(Token::new(
                            TokenKind::BinaryOperator,
                            "/".into(),
                            line,
                        ));
                        i += 1;
                    }
                }
                '=' => {
                    if next == Some('=') {
                        self.tokens
                            .push_back(Token::new(TokenKind::Comparison, "==".into(), line));
                        i += 2;
                    } else {
                        self.tokens
                            .push_back(Token::new(TokenKind::Equals, "=".into(), line));
                        i += 1;
                    }
                }
                '!' => {
                    if next == Some('=') {
                        self.tokens
                            .push_back(Token::new(TokenKind::Comparison, "!=".into(), line));
                        i += 2;
                    } else {
                        return Err(LexerError::UnrecognizedToken(c.to_string()));
                    }
                }
                '<' | '>' => {
                    if next == Some('=') {
                        self.tokens.push_back(Token::new(
                            TokenKind::Comparison,
                            format!("{c}="),
                            line,
                        ));
                        i += 2;
                    } else {
                        self.tokens.push_back(Token::new(
                            TokenKind::Comparison,
                            c.to_string(),
                            line,
                        ));
                        i += 1;
                    }
                }
                '\'' | '"' => {
                    let (value, end) = scan_string(chars, i + 1, c)?;
                    self.tokens
                        .push_back(Token::new(TokenKind::Str, value, line));
                    i = end;
                }
                _ if c.is_ascii_digit() => {
                    let (value, end) = scan_number(chars, i)?;
                    self.tokens
                        .push_back(Token::new(TokenKind::Number, value, line));
                    i = end;
                }
                _ if is_ident_start(c) => {
                    let mut end = i;
                    while end < chars.len() && is_ident_char(chars[end]) {
                        end += 1;
                    }
                    let word = chars[i..end].iter().collect::<String>();

                    // f"..." is a formatted string, not an identifier
                    if word == "f" && matches!(chars.get(end), Some('\'') | Some('"')) {
                        let quote = chars[end];
                        let (value, after) = scan_string(chars, end + 1, quote)?;
                        self.tokens
                            .push_back(Token::new(TokenKind::FStr, value, line));
                        i = after;
                        continue;
                    }

                    match keyword_kind(&word) {
                        Some(kind) => self.tokens.push_back(Token::new(kind, word, line)),
                        None => self
                            .tokens
                            .push_back(Token::new(TokenKind::Identifier, word, line)),
                    }
                    i = end;
                }
                _ => return Err(LexerError::UnrecognizedToken(c.to_string())),
            }
        }

        Ok(())
    }
}

// Scans up to the closing quote, returns the content and the index just
// after it. Quotes are stripped here, escape sequences are not a thing.
fn scan_string(chars: &[char], from: usize, quote: char) -> Result<(String, usize), LexerError> {
    let mut i = from;
    let mut value = String::new();

    while i < chars.len() {
        if chars[i] == quote {
            return Ok((value, i + 1));
        }
        value.push(chars[i]);
        i += 1;
    }

    Err(LexerError::UnterminatedString)
}

fn scan_number(chars: &[char], from: usize) -> Result<(String, usize), LexerError> {
    let mut i = from;
    let mut value = String::new();
    let mut seen_dot = false;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_digit() {
            value.push(c);
        } else if c == '.' {
            if seen_dot {
                return Err(LexerError::DoubleDotNumber(value));
            }
            seen_dot = true;
            value.push(c);
        } else if is_ident_start(c) {
            return Err(LexerError::AlphaCharInNumberToken);
        } else {
            break;
        }

        i += 1;
    }

    Ok((value, i))
}

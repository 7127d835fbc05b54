//! Lexical analysis (tokenizer)
//!
//! The lexer is a character-driven state machine. It materializes the whole
//! token sequence up front; the parser never looks at the text again.
use super::token::{Keyword, Token, TokenKind, SYMBOLS};
use super::token_stream::TokenStream;
use crate::compiler::error::{Error, Result};
use crate::compiler::source::{Location, SourceId, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Space,
    /// A `/` was read, it may open a comment.
    Slash,
    /// A `*` was read inside a block comment, it may close it.
    Star,
    LineComment,
    BlockComment,
    AlnumToken,
    /// A symbol was just emitted.
    CharToken,
    IntToken,
    String,
}

pub struct Lexer<'a> {
    source_id: SourceId,
    text: &'a str,
    state: State,
    buffer: String,
    token_start: usize,
    token_line: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source_id: SourceId, text: &'a str) -> Self {
        Self {
            source_id,
            text,
            state: State::Space,
            buffer: String::new(),
            token_start: 0,
            token_line: 1,
            line: 1,
            tokens: vec![],
        }
    }

    pub fn tokenize(mut self) -> Result<TokenStream> {
        for (pos, c) in self.text.char_indices() {
            self.step(pos, c)?;

            // Lines advance in every state, comments included.
            if c == '\n' {
                self.line += 1;
            }
        }
        self.finish()?;

        let end = self.text.len();
        let end_location = Location::new(self.source_id, self.line, end..end);
        Ok(TokenStream::new(self.tokens, end_location))
    }

    fn step(&mut self, pos: usize, c: char) -> Result<()> {
        match self.state {
            State::LineComment => {
                if c == '\n' {
                    self.state = State::Space;
                }
                Ok(())
            }
            State::BlockComment => {
                if c == '*' {
                    self.state = State::Star;
                }
                Ok(())
            }
            State::Star => {
                self.state = match c {
                    '/' => State::Space,
                    '*' => State::Star,
                    _ => State::BlockComment,
                };
                Ok(())
            }
            State::String => match c {
                '"' => {
                    self.flush(TokenKind::StringConstant, pos + 1);
                    Ok(())
                }
                '\n' => Err(self.unterminated_string(pos)),
                _ => {
                    self.buffer.push(c);
                    Ok(())
                }
            },
            State::Slash => match c {
                '/' => {
                    self.state = State::LineComment;
                    Ok(())
                }
                '*' => {
                    self.state = State::BlockComment;
                    Ok(())
                }
                _ => {
                    self.emit_symbol('/', self.token_start, self.token_line);
                    self.start(pos, c)
                }
            },
            State::AlnumToken if continues_identifier(c) => {
                self.buffer.push(c);
                Ok(())
            }
            State::AlnumToken => {
                self.flush_word(pos);
                self.start(pos, c)
            }
            State::IntToken if c.is_ascii_digit() => {
                self.buffer.push(c);
                Ok(())
            }
            State::IntToken if continues_identifier(c) => Err(Error::lex_error(
                format!("malformed integer constant '{}{}'", self.buffer, c),
                self.location(self.token_start..pos + c.len_utf8()),
            )),
            State::IntToken => {
                self.flush(TokenKind::IntegerConstant, pos);
                self.start(pos, c)
            }
            State::Space | State::CharToken => self.start(pos, c),
        }
    }

    /// Classify the first character of a new token.
    fn start(&mut self, pos: usize, c: char) -> Result<()> {
        self.token_start = pos;
        self.token_line = self.line;
        self.buffer.clear();

        match c {
            '/' => self.state = State::Slash,
            '"' => self.state = State::String,
            c if c.is_whitespace() => self.state = State::Space,
            c if starts_identifier(c) => {
                self.buffer.push(c);
                self.state = State::AlnumToken;
            }
            c if c.is_ascii_digit() => {
                self.buffer.push(c);
                self.state = State::IntToken;
            }
            c if SYMBOLS.contains(c) => self.emit_symbol(c, pos, self.line),
            c => {
                return Err(Error::lex_error(
                    format!("unexpected character '{}'", c),
                    self.location(pos..pos + c.len_utf8()),
                ))
            }
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let end = self.text.len();

        match self.state {
            State::AlnumToken => self.flush_word(end),
            State::IntToken => self.flush(TokenKind::IntegerConstant, end),
            State::Slash => self.emit_symbol('/', self.token_start, self.token_line),
            State::String => return Err(self.unterminated_string(end)),
            State::BlockComment | State::Star => {
                return Err(Error::lex_error(
                    "unterminated block comment",
                    self.location(self.token_start..self.token_start + 2),
                ))
            }
            State::Space | State::CharToken | State::LineComment => (),
        }

        Ok(())
    }

    fn flush_word(&mut self, end: usize) {
        let kind = match self.buffer.parse::<Keyword>() {
            Ok(keyword) => TokenKind::Keyword(keyword),
            Err(_) => TokenKind::Identifier,
        };
        self.flush(kind, end)
    }

    fn flush(&mut self, kind: TokenKind, end: usize) {
        let lexeme = std::mem::take(&mut self.buffer);
        self.tokens
            .push(Token::new(lexeme, kind, self.token_line, self.token_start..end));
        self.state = State::Space;
    }

    fn emit_symbol(&mut self, c: char, pos: usize, line: usize) {
        self.tokens.push(Token::new(
            c.to_string(),
            TokenKind::Symbol,
            line,
            pos..pos + c.len_utf8(),
        ));
        self.state = State::CharToken;
    }

    fn unterminated_string(&self, end: usize) -> Error {
        Error::lex_error(
            "unterminated string constant",
            self.location(self.token_start..end),
        )
    }

    fn location(&self, span: Span) -> Location {
        Location::new(self.source_id, self.token_line, span)
    }
}

#[inline]
fn starts_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn continues_identifier(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

//! Materialized stream of tokens with a movable cursor.
use super::token::Token;
use crate::compiler::source::Location;

/// Token sequence produced by the lexer.
///
/// The parser reads it through a cursor. Saving `position()` and later
/// calling `rewind` gives it arbitrary backtracking without ever re-scanning
/// the source text.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
    /// Where the input ends, used to report truncated programs.
    end: Location,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>, end: Location) -> Self {
        Self {
            tokens,
            cursor: 0,
            end,
        }
    }

    /// The token under the cursor, `None` once the input is exhausted.
    #[inline]
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// One token of look ahead past the current one.
    #[inline]
    pub fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.cursor + 1)
    }

    /// Consume the current token.
    pub fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Move the cursor back to a position obtained from `position()`.
    pub fn rewind(&mut self, position: usize) {
        debug_assert!(position <= self.tokens.len());
        self.cursor = position;
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    pub fn end_location(&self) -> &Location {
        &self.end
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::frontend::lexer::Lexer;
    use crate::compiler::source::SourceId;

    fn stream(input: &str) -> TokenStream {
        Lexer::new(SourceId::synthetic(), input).tokenize().unwrap()
    }

    #[test]
    fn advance_walks_the_sequence() {
        let mut tokens = stream("do x();");

        assert_eq!(tokens.current().unwrap().lexeme, "do");
        assert_eq!(tokens.peek_next().unwrap().lexeme, "x");
        assert_eq!(tokens.advance().unwrap().lexeme, "do");
        assert_eq!(tokens.current().unwrap().lexeme, "x");
        assert_eq!(tokens.peek_next().unwrap().lexeme, "(");
    }

    #[test]
    fn rewind_restores_the_cursor() {
        let mut tokens = stream("a b c");
        let saved = tokens.position();

        tokens.advance();
        tokens.advance();
        assert_eq!(tokens.current().unwrap().lexeme, "c");

        tokens.rewind(saved);
        assert_eq!(tokens.current().unwrap().lexeme, "a");
    }

    #[test]
    fn exhausted_stream_yields_nothing() {
        let mut tokens = stream("x\n");

        tokens.advance();

        assert!(tokens.is_at_end());
        assert!(tokens.current().is_none());
        assert!(tokens.advance().is_none());
        assert_eq!(tokens.end_location().line, 2);
        assert_eq!(tokens.end_location().span, 2..2);
    }
}

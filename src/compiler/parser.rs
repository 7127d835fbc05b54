////////////////////////////////////////////////////////////////////////////////////////////////////
// Single pass parser and code generator
//
// Every production has its own method on `Parser`. A production consumes its tokens, writes its
// part of the parse-tree trace, updates the symbol table and emits VM code as soon as the operands
// of a construct are known. There is no syntax tree.
//
// Optional and repeated productions are tried with `attempt`. A failed attempt restores the
// cursor, trace, code, label counter and symbol table to where they were before, so an absent
// production leaves no trace behind. Only syntax errors are recovered from that way; lexical and
// semantic errors abort the unit.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

pub mod call;
pub mod class;
pub mod expression;
pub mod statement;
pub mod subroutine;

use crate::compiler::compilation_unit::CompilationUnit;
use crate::compiler::error::{Detail, Error, Result};
use crate::compiler::frontend::{Keyword, Token, TokenStream};
use crate::compiler::source::{Location, SourceId};
use crate::compiler::symbol_table::{Kind, SymbolEntry, SymbolMark, SymbolTable};
use crate::compiler::trace::{TraceMark, TraceWriter};
use crate::vm::{Segment, VmWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

/// Whether `pointer 0` holds the current object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Bound,
    Unbound,
}

#[derive(Debug, Clone)]
struct Checkpoint {
    position: usize,
    trace: TraceMark,
    code_len: usize,
    labels: usize,
    symbols: SymbolMark,
    subroutine: SubroutineKind,
    receiver: Receiver,
}

pub struct Parser {
    source_id: SourceId,
    tokens: TokenStream,
    symbols: SymbolTable,
    trace: TraceWriter,
    code: VmWriter,
    class_name: String,
    subroutine: SubroutineKind,
    receiver: Receiver,
    /// Per class counter for control-flow labels.
    labels: usize,
    /// Deepest syntax failure seen by an abandoned attempt.
    furthest: Option<(usize, Detail)>,
}

impl Parser {
    pub fn new(source_id: SourceId, tokens: TokenStream) -> Self {
        Self {
            source_id,
            tokens,
            symbols: SymbolTable::new(),
            trace: TraceWriter::new(),
            code: VmWriter::new(),
            class_name: String::new(),
            subroutine: SubroutineKind::Function,
            receiver: Receiver::Unbound,
            labels: 0,
            furthest: None,
        }
    }

    /// Compile the whole token stream, which must hold exactly one class.
    pub fn parse(mut self) -> Result<CompilationUnit> {
        match self.class() {
            Ok(()) => (),
            Err(Error::SyntaxError(detail)) => {
                return Err(Error::SyntaxError(self.furthest_failure(detail)))
            }
            Err(e) => return Err(e),
        }

        if let Some(token) = self.tokens.current() {
            return Err(Error::syntax_error(
                format!("'{}': end of input expected", token.lexeme),
                self.location(token),
            ));
        }

        log::debug!(
            "compiled class {}: {} trace lines, {} instructions",
            self.class_name,
            self.trace.lines().len(),
            self.code.len()
        );

        Ok(CompilationUnit::new(
            self.class_name,
            self.trace.into_lines(),
            self.code.into_code(),
        ))
    }

    /// Try an optional production.
    ///
    /// Returns `Ok(None)` and restores the parser state if the production
    /// failed with a syntax error. Any other error is passed through.
    pub(crate) fn attempt<T, F>(&mut self, production: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let checkpoint = self.checkpoint();

        match production(self) {
            Ok(value) => Ok(Some(value)),
            Err(Error::SyntaxError(detail)) => {
                log::trace!("backtracking: {}", detail.content);
                self.record_failure(detail);
                self.restore(checkpoint);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Consume the current token if `accept` holds for it and trace it as a terminal.
    pub(crate) fn expect<F>(&mut self, expected: &str, accept: F) -> Result<Token>
    where
        F: Fn(&Token) -> bool,
    {
        let token = match self.tokens.current() {
            Some(token) => token,
            None => {
                return Err(Error::syntax_error(
                    format!("expected {} but input ended", expected),
                    self.tokens.end_location().clone(),
                ))
            }
        };

        if !accept(token) {
            return Err(Error::syntax_error(
                format!("'{}': {} expected", token.lexeme, expected),
                self.location(token),
            ));
        }

        let token = token.clone();
        self.trace.terminal(token.kind.tag(), &token.lexeme);
        self.tokens.advance();
        Ok(token)
    }

    pub(crate) fn expect_symbol(&mut self, symbol: char) -> Result<Token> {
        self.expect(&format!("'{}'", symbol), |t| t.is_symbol(symbol))
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token> {
        self.expect(&format!("'{}'", keyword), |t| t.is_keyword(keyword))
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Token> {
        self.expect("identifier", Token::is_identifier)
    }

    pub(crate) fn expect_type(&mut self) -> Result<Token> {
        self.expect("type", Token::is_type)
    }

    #[inline]
    pub(crate) fn at_symbol(&self, symbol: char) -> bool {
        self.tokens.current().map_or(false, |t| t.is_symbol(symbol))
    }

    pub(crate) fn next_label(&mut self) -> usize {
        let label = self.labels;
        self.labels += 1;
        label
    }

    pub(crate) fn declare(&mut self, name: &Token, ty: &str, kind: Kind) -> Result<()> {
        let location = self.location(name);

        self.symbols
            .declare(&name.lexeme, ty, kind)
            .map(|_| ())
            .map_err(|e| Error::semantic_error(e.to_string(), location))
    }

    /// Look a name up, rejecting fields where no receiver is bound.
    pub(crate) fn variable(&self, name: &Token) -> Result<Option<SymbolEntry>> {
        match self.symbols.lookup(&name.lexeme) {
            Some(entry) if entry.kind == Kind::Field && self.receiver == Receiver::Unbound => {
                Err(Error::semantic_error(
                    format!("field '{}' cannot be used in a function", name.lexeme),
                    self.location(name),
                ))
            }
            entry => Ok(entry.cloned()),
        }
    }

    pub(crate) fn resolve(&self, name: &Token) -> Result<SymbolEntry> {
        match self.variable(name)? {
            Some(entry) => Ok(entry),
            None => Err(Error::semantic_error(
                format!("undefined variable '{}'", name.lexeme),
                self.location(name),
            )),
        }
    }

    pub(crate) fn push_variable(&mut self, entry: &SymbolEntry) {
        self.code.write_push(entry.kind.segment(), entry.index)
    }

    pub(crate) fn pop_variable(&mut self, entry: &SymbolEntry) {
        self.code.write_pop(entry.kind.segment(), entry.index)
    }

    pub(crate) fn bind_receiver(&mut self) {
        self.code.write_pop(Segment::Pointer, 0);
        self.receiver = Receiver::Bound;
    }

    pub(crate) fn location(&self, token: &Token) -> Location {
        Location::new(self.source_id, token.line, token.span.clone())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.tokens.position(),
            trace: self.trace.mark(),
            code_len: self.code.len(),
            labels: self.labels,
            symbols: self.symbols.mark(),
            subroutine: self.subroutine,
            receiver: self.receiver,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.tokens.rewind(checkpoint.position);
        self.trace.rewind(checkpoint.trace);
        self.code.truncate(checkpoint.code_len);
        self.labels = checkpoint.labels;
        self.symbols.rewind(checkpoint.symbols);
        self.subroutine = checkpoint.subroutine;
        self.receiver = checkpoint.receiver;
    }

    fn record_failure(&mut self, detail: Detail) {
        let position = self.tokens.position();

        if self.furthest.as_ref().map_or(true, |(furthest, _)| *furthest < position) {
            self.furthest = Some((position, detail));
        }
    }

    /// The failure to report once the unit is known to be malformed.
    fn furthest_failure(&mut self, detail: Detail) -> Detail {
        let position = self.tokens.position();

        match self.furthest.take() {
            Some((furthest, deeper)) if furthest > position => deeper,
            _ => detail,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;
    use crate::compiler::frontend::Lexer;
    use crate::vm::Instruction;

    pub fn parser(input: &str) -> Parser {
        let tokens = Lexer::new(SourceId::synthetic(), input).tokenize().unwrap();
        Parser::new(SourceId::synthetic(), tokens)
    }

    /// Parser positioned inside `function void f()` of class `Main`, with
    /// the given variables declared.
    pub fn parser_in_function(input: &str, variables: &[(&str, &str, Kind)]) -> Parser {
        let mut parser = parser(input);
        parser.class_name = "Main".into();
        for (name, ty, kind) in variables {
            parser.symbols.declare(name, ty, *kind).unwrap();
        }
        parser
    }

    /// Same as `parser_in_function`, but inside a method with a bound receiver.
    pub fn parser_in_method(input: &str, variables: &[(&str, &str, Kind)]) -> Parser {
        let mut parser = parser_in_function(input, variables);
        parser.subroutine = SubroutineKind::Method;
        parser.receiver = Receiver::Bound;
        parser
    }

    pub fn code(parser: &Parser) -> Vec<String> {
        parser.code.code().iter().map(Instruction::to_string).collect()
    }

    pub fn trace(parser: &Parser) -> Vec<String> {
        parser.trace.lines().to_vec()
    }
}

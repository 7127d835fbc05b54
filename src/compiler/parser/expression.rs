use super::{Parser, Receiver, Result};
use crate::compiler::error::Error;
use crate::compiler::frontend::{Keyword, Token, TokenKind};
use crate::vm::{Command, Index, Segment};
use std::convert::TryFrom;

/// Largest integer constant the source language accepts.
pub const MAX_INTEGER: Index = 32767;

/// Infix operators. They all share one precedence and associate to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Lt,
    Gt,
    Eq,
}

impl BinaryOp {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            '&' => Some(BinaryOp::And),
            '|' => Some(BinaryOp::Or),
            '<' => Some(BinaryOp::Lt),
            '>' => Some(BinaryOp::Gt),
            '=' => Some(BinaryOp::Eq),
            _ => None,
        }
    }
}

impl Parser {
    /// Parse an expression
    ///
    /// ```grammar
    /// <expression> -> <term> (<op> <term>)*
    /// <op>         -> + | - | * | / | & | '|' | < | > | =
    /// ```
    pub fn expression(&mut self) -> Result<()> {
        self.trace.open("expression");
        self.term()?;

        while let Some(op) = self.current_op() {
            self.expect("operator", |t| t.symbol().and_then(BinaryOp::from_symbol).is_some())?;
            self.term()?;
            self.write_op(op);
        }

        self.trace.close("expression");
        Ok(())
    }

    /// Parse a term
    ///
    /// ```grammar
    /// <term> -> <integerConstant> | <stringConstant> | <keywordConstant> |
    ///           <varName> | <varName> [ <expression> ] | <subroutineCall> |
    ///           ( <expression> ) | <unaryOp> <term>
    /// <keywordConstant> -> true | false | null | this
    /// <unaryOp>         -> - | ~
    /// ```
    pub fn term(&mut self) -> Result<()> {
        self.trace.open("term");

        let token = match self.tokens.current() {
            Some(token) => token.clone(),
            None => {
                return Err(Error::syntax_error(
                    "expected term but input ended",
                    self.tokens.end_location().clone(),
                ))
            }
        };

        match token.kind {
            TokenKind::IntegerConstant => self.integer_constant(&token)?,
            TokenKind::StringConstant => self.string_constant(&token)?,
            TokenKind::Keyword(keyword) => self.keyword_constant(keyword, &token)?,
            TokenKind::Symbol if token.is_symbol('(') => {
                self.expect_symbol('(')?;
                self.expression()?;
                self.expect_symbol(')')?;
            }
            TokenKind::Symbol if token.is_symbol('-') || token.is_symbol('~') => {
                self.expect("unary operator", |t| t.is_symbol('-') || t.is_symbol('~'))?;
                self.term()?;
                let command = if token.is_symbol('-') {
                    Command::Neg
                } else {
                    Command::Not
                };
                self.code.write_arithmetic(command);
            }
            TokenKind::Identifier => self.identifier_term()?,
            TokenKind::Symbol => {
                return Err(Error::syntax_error(
                    format!("'{}': term expected", token.lexeme),
                    self.location(&token),
                ))
            }
        }

        self.trace.close("term");
        Ok(())
    }

    fn integer_constant(&mut self, token: &Token) -> Result<()> {
        let value = token
            .lexeme
            .parse::<Index>()
            .ok()
            .filter(|value| *value <= MAX_INTEGER)
            .ok_or_else(|| {
                Error::semantic_error(
                    format!("integer constant '{}' is out of range", token.lexeme),
                    self.location(token),
                )
            })?;

        self.expect("integer constant", |t| t.kind == TokenKind::IntegerConstant)?;
        self.code.write_push(Segment::Constant, value);
        Ok(())
    }

    fn string_constant(&mut self, token: &Token) -> Result<()> {
        let characters = token
            .lexeme
            .chars()
            .map(|c| Index::try_from(u32::from(c)))
            .collect::<std::result::Result<Vec<_>, _>>()
            .ok()
            .filter(|codes| codes.len() <= usize::from(MAX_INTEGER))
            .ok_or_else(|| {
                Error::semantic_error("string constant cannot be represented", self.location(token))
            })?;

        self.expect("string constant", |t| t.kind == TokenKind::StringConstant)?;

        // the length fits, it was checked against MAX_INTEGER above
        self.code
            .write_push(Segment::Constant, characters.len() as Index);
        self.code.write_call("String.new", 1);
        for code in characters {
            self.code.write_push(Segment::Constant, code);
            self.code.write_call("String.appendChar", 2);
        }
        Ok(())
    }

    fn keyword_constant(&mut self, keyword: Keyword, token: &Token) -> Result<()> {
        match keyword {
            Keyword::True => {
                self.code.write_push(Segment::Constant, 0);
                self.code.write_arithmetic(Command::Not);
            }
            Keyword::False | Keyword::Null => self.code.write_push(Segment::Constant, 0),
            Keyword::This if self.receiver == Receiver::Bound => {
                self.code.write_push(Segment::Pointer, 0)
            }
            Keyword::This => {
                return Err(Error::semantic_error(
                    "'this' cannot be used in a function",
                    self.location(token),
                ))
            }
            other => {
                return Err(Error::semantic_error(
                    format!("keyword '{}' cannot be used in an expression", other),
                    self.location(token),
                ))
            }
        }

        self.expect_keyword(keyword)?;
        Ok(())
    }

    /// Variable read, array element read or subroutine call, decided by the
    /// token after the identifier.
    fn identifier_term(&mut self) -> Result<()> {
        let next = self.tokens.peek_next().and_then(Token::symbol);

        match next {
            Some('(') | Some('.') => self.subroutine_call(),
            Some('[') => {
                let name = self.expect_identifier()?;
                let array = self.resolve(&name)?;

                self.expect_symbol('[')?;
                self.push_variable(&array);
                self.expression()?;
                self.expect_symbol(']')?;

                self.code.write_arithmetic(Command::Add);
                self.code.write_pop(Segment::Pointer, 1);
                self.code.write_push(Segment::That, 0);
                Ok(())
            }
            _ => {
                let name = self.expect_identifier()?;
                let variable = self.resolve(&name)?;
                self.push_variable(&variable);
                Ok(())
            }
        }
    }

    fn current_op(&self) -> Option<BinaryOp> {
        self.tokens
            .current()
            .and_then(Token::symbol)
            .and_then(BinaryOp::from_symbol)
    }

    fn write_op(&mut self, op: BinaryOp) {
        match op {
            BinaryOp::Add => self.code.write_arithmetic(Command::Add),
            BinaryOp::Sub => self.code.write_arithmetic(Command::Sub),
            BinaryOp::Mul => self.code.write_call("Math.multiply", 2),
            BinaryOp::Div => self.code.write_call("Math.divide", 2),
            BinaryOp::And => self.code.write_arithmetic(Command::And),
            BinaryOp::Or => self.code.write_arithmetic(Command::Or),
            BinaryOp::Lt => self.code.write_arithmetic(Command::Lt),
            BinaryOp::Gt => self.code.write_arithmetic(Command::Gt),
            BinaryOp::Eq => self.code.write_arithmetic(Command::Eq),
        }
    }
}

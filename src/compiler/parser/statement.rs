use super::{Parser, Result};
use crate::compiler::frontend::Keyword;
use crate::vm::{Command, Segment};

impl Parser {
    /// Parse a statement sequence
    ///
    /// ```grammar
    /// <statements> -> <statement>*
    /// <statement>  -> <letStatement> | <ifStatement> | <whileStatement> |
    ///                 <doStatement>  | <returnStatement>
    /// ```
    pub fn statements(&mut self) -> Result<()> {
        self.trace.open("statements");

        loop {
            match self.tokens.current().and_then(|t| t.keyword()) {
                Some(Keyword::Let) => self.let_statement()?,
                Some(Keyword::If) => self.if_statement()?,
                Some(Keyword::While) => self.while_statement()?,
                Some(Keyword::Do) => self.do_statement()?,
                Some(Keyword::Return) => self.return_statement()?,
                _ => break,
            }
        }

        self.trace.close("statements");
        Ok(())
    }

    /// ```grammar
    /// <letStatement> -> let <varName> ([ <expression> ])? = <expression> ;
    /// ```
    pub fn let_statement(&mut self) -> Result<()> {
        self.trace.open("letStatement");
        self.expect_keyword(Keyword::Let)?;

        let name = self.expect_identifier()?;
        let target = self.resolve(&name)?;

        // element address stays on the stack until the value is known
        let indexed = self
            .attempt(|p| {
                p.expect_symbol('[')?;
                p.push_variable(&target);
                p.expression()?;
                p.expect_symbol(']')?;
                p.code.write_arithmetic(Command::Add);
                Ok(())
            })?
            .is_some();

        self.expect_symbol('=')?;
        self.expression()?;
        self.expect_symbol(';')?;

        if indexed {
            self.code.write_pop(Segment::Temp, 0);
            self.code.write_pop(Segment::Pointer, 1);
            self.code.write_push(Segment::Temp, 0);
            self.code.write_pop(Segment::That, 0);
        } else {
            self.pop_variable(&target);
        }

        self.trace.close("letStatement");
        Ok(())
    }

    /// ```grammar
    /// <ifStatement> -> if ( <expression> ) { <statements> } (else { <statements> })?
    /// ```
    pub fn if_statement(&mut self) -> Result<()> {
        self.trace.open("ifStatement");
        self.expect_keyword(Keyword::If)?;

        let label = self.next_label();
        let else_label = format!("IF_ELSE{}", label);
        let end_label = format!("IF_END{}", label);

        self.expect_symbol('(')?;
        self.expression()?;
        self.expect_symbol(')')?;
        self.code.write_arithmetic(Command::Not);
        self.code.write_if_goto(else_label.as_str());

        self.block()?;
        self.code.write_goto(end_label.as_str());
        self.code.write_label(else_label);

        self.attempt(|p| {
            p.expect_keyword(Keyword::Else)?;
            p.block()
        })?;
        self.code.write_label(end_label);

        self.trace.close("ifStatement");
        Ok(())
    }

    /// ```grammar
    /// <whileStatement> -> while ( <expression> ) { <statements> }
    /// ```
    pub fn while_statement(&mut self) -> Result<()> {
        self.trace.open("whileStatement");
        self.expect_keyword(Keyword::While)?;

        let label = self.next_label();
        let top_label = format!("WHILE_EXP{}", label);
        let end_label = format!("WHILE_END{}", label);
        self.code.write_label(top_label.as_str());

        self.expect_symbol('(')?;
        self.expression()?;
        self.expect_symbol(')')?;
        self.code.write_arithmetic(Command::Not);
        self.code.write_if_goto(end_label.as_str());

        self.block()?;
        self.code.write_goto(top_label);
        self.code.write_label(end_label);

        self.trace.close("whileStatement");
        Ok(())
    }

    /// ```grammar
    /// <doStatement> -> do <subroutineCall> ;
    /// ```
    pub fn do_statement(&mut self) -> Result<()> {
        self.trace.open("doStatement");
        self.expect_keyword(Keyword::Do)?;

        self.subroutine_call()?;
        self.expect_symbol(';')?;
        self.code.write_pop(Segment::Temp, 0);

        self.trace.close("doStatement");
        Ok(())
    }

    /// ```grammar
    /// <returnStatement> -> return <expression>? ;
    /// ```
    pub fn return_statement(&mut self) -> Result<()> {
        self.trace.open("returnStatement");
        self.expect_keyword(Keyword::Return)?;

        if self.attempt(Self::expression)?.is_none() {
            self.code.write_push(Segment::Constant, 0);
        }
        self.expect_symbol(';')?;
        self.code.write_return();

        self.trace.close("returnStatement");
        Ok(())
    }

    /// `{ <statements> }`
    fn block(&mut self) -> Result<()> {
        self.expect_symbol('{')?;
        self.statements()?;
        self.expect_symbol('}')?;
        Ok(())
    }
}

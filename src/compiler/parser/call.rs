use super::{Parser, Result, SubroutineKind};
use crate::compiler::error::Error;
use crate::vm::{Index, Segment};

impl Parser {
    /// Parse a subroutine call and emit it
    ///
    /// An unqualified call targets the enclosing class. A qualified call is a
    /// method call when its head names a variable, and a function or
    /// constructor call on the class of that name otherwise.
    ///
    /// ```grammar
    /// <subroutineCall> -> <subroutineName> ( <expressionList> ) |
    ///                     (<className> | <varName>) . <subroutineName> ( <expressionList> )
    /// ```
    pub fn subroutine_call(&mut self) -> Result<()> {
        let head = self.expect_identifier()?;

        let (target, receivers) = if self.at_symbol('.') {
            self.expect_symbol('.')?;
            let name = self.expect_identifier()?;

            match self.variable(&head)? {
                Some(object) => {
                    self.push_variable(&object);
                    (format!("{}.{}", object.ty, name.lexeme), 1)
                }
                None => (format!("{}.{}", head.lexeme, name.lexeme), 0),
            }
        } else if self.subroutine == SubroutineKind::Method {
            self.code.write_push(Segment::Pointer, 0);
            (format!("{}.{}", self.class_name, head.lexeme), 1)
        } else {
            (format!("{}.{}", self.class_name, head.lexeme), 0)
        };

        self.expect_symbol('(')?;
        let arguments = self.expression_list()?;
        let close = self.expect_symbol(')')?;
        let arguments = arguments
            .checked_add(receivers)
            .ok_or_else(|| Error::semantic_error("too many arguments", self.location(&close)))?;

        self.code.write_call(target, arguments);
        Ok(())
    }

    /// Parse an argument list, returning how many expressions it holds
    ///
    /// ```grammar
    /// <expressionList> -> (<expression> (, <expression>)*)?
    /// ```
    pub fn expression_list(&mut self) -> Result<Index> {
        self.trace.open("expressionList");

        let mut count: Index = 0;
        if self.attempt(Self::expression)?.is_some() {
            count = 1;
            while self.at_symbol(',') {
                let comma = self.expect_symbol(',')?;
                self.expression()?;
                count = count
                    .checked_add(1)
                    .ok_or_else(|| Error::semantic_error("too many arguments", self.location(&comma)))?;
            }
        }

        self.trace.close("expressionList");
        Ok(count)
    }
}

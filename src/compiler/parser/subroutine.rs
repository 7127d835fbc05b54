use super::{Parser, Receiver, Result, SubroutineKind};
use crate::compiler::error::Error;
use crate::compiler::frontend::Keyword;
use crate::compiler::symbol_table::Kind;
use crate::vm::Segment;

impl Parser {
    /// Parse a subroutine declaration
    ///
    /// ```grammar
    /// <subroutineDec>  -> (constructor | function | method) (void | <type>) <subroutineName>
    ///                     ( <parameterList> ) <subroutineBody>
    /// <parameterList>  -> (<type> <varName> (, <type> <varName>)*)?
    /// ```
    pub fn subroutine_dec(&mut self) -> Result<()> {
        self.trace.open("subroutineDec");

        let kind = self.expect("subroutine declaration", |t| {
            matches!(
                t.keyword(),
                Some(Keyword::Constructor) | Some(Keyword::Function) | Some(Keyword::Method)
            )
        })?;
        self.subroutine = match kind.keyword() {
            Some(Keyword::Constructor) => SubroutineKind::Constructor,
            Some(Keyword::Method) => SubroutineKind::Method,
            _ => SubroutineKind::Function,
        };
        self.receiver = Receiver::Unbound;

        self.expect("'void' or type", |t| t.is_keyword(Keyword::Void) || t.is_type())?;
        let name = self.expect_identifier()?;

        self.symbols.reset_subroutine_scope();
        if self.subroutine == SubroutineKind::Method {
            let location = self.location(&name);
            let class_name = self.class_name.clone();
            self.symbols
                .declare("this", &class_name, Kind::Argument)
                .map_err(|e| Error::semantic_error(e.to_string(), location))?;
        }

        self.expect_symbol('(')?;
        self.parameter_list()?;
        self.expect_symbol(')')?;
        self.subroutine_body(&name.lexeme)?;

        self.trace.close("subroutineDec");
        Ok(())
    }

    pub fn parameter_list(&mut self) -> Result<()> {
        self.trace.open("parameterList");

        if self.attempt(Self::parameter)?.is_some() {
            while self.at_symbol(',') {
                self.expect_symbol(',')?;
                self.parameter()?;
            }
        }

        self.trace.close("parameterList");
        Ok(())
    }

    fn parameter(&mut self) -> Result<()> {
        let ty = self.expect_type()?;
        let name = self.expect_identifier()?;
        self.declare(&name, &ty.lexeme, Kind::Argument)
    }

    /// Parse a subroutine body and emit the function header and prologue
    ///
    /// ```grammar
    /// <subroutineBody> -> { <varDec>* <statements> }
    /// <varDec>         -> var <type> <varName> (, <varName>)* ;
    /// ```
    pub fn subroutine_body(&mut self, name: &str) -> Result<()> {
        self.trace.open("subroutineBody");
        self.expect_symbol('{')?;

        while self.attempt(Self::var_dec)?.is_some() {}

        let locals = self.symbols.count(Kind::Local);
        self.code
            .write_function(format!("{}.{}", self.class_name, name), locals);

        match self.subroutine {
            SubroutineKind::Constructor => {
                let fields = self.symbols.count(Kind::Field);
                self.code.write_push(Segment::Constant, fields);
                self.code.write_call("Memory.alloc", 1);
                self.bind_receiver();
            }
            SubroutineKind::Method => {
                self.code.write_push(Segment::Argument, 0);
                self.bind_receiver();
            }
            SubroutineKind::Function => (),
        }

        log::trace!(
            "{}.{}: {:?}",
            self.class_name,
            name,
            self.symbols.subroutine_scope().entries()
        );

        self.statements()?;
        self.expect_symbol('}')?;
        self.trace.close("subroutineBody");
        Ok(())
    }

    pub fn var_dec(&mut self) -> Result<()> {
        self.trace.open("varDec");
        self.expect_keyword(Keyword::Var)?;

        let ty = self.expect_type()?;
        let names = self.variable_names()?;
        self.expect_symbol(';')?;

        for name in &names {
            self.declare(name, &ty.lexeme, Kind::Local)?;
        }

        self.trace.close("varDec");
        Ok(())
    }
}

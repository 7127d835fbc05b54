use super::{Parser, Result};
use crate::compiler::frontend::{Keyword, Token};
use crate::compiler::symbol_table::Kind;

impl Parser {
    /// Parse a class declaration
    ///
    /// ```grammar
    /// <class>        -> class <className> { <classVarDec>* <subroutineDec>* }
    /// <classVarDec>  -> (static | field) <type> <varName> (, <varName>)* ;
    /// ```
    pub fn class(&mut self) -> Result<()> {
        self.trace.open("class");
        self.expect_keyword(Keyword::Class)?;

        let name = self.expect_identifier()?;
        log::debug!("compiling class {} (line {})", name.lexeme, name.line);
        self.class_name = name.lexeme;
        self.symbols.reset();
        self.labels = 0;

        self.expect_symbol('{')?;
        while self.attempt(Self::class_var_dec)?.is_some() {}
        while self.attempt(Self::subroutine_dec)?.is_some() {}
        self.expect_symbol('}')?;

        self.trace.close("class");
        Ok(())
    }

    pub fn class_var_dec(&mut self) -> Result<()> {
        self.trace.open("classVarDec");

        let kind = match self
            .expect("'static' or 'field'", |t| {
                t.is_keyword(Keyword::Static) || t.is_keyword(Keyword::Field)
            })?
            .keyword()
        {
            Some(Keyword::Static) => Kind::Static,
            _ => Kind::Field,
        };
        let ty = self.expect_type()?;
        let names = self.variable_names()?;
        self.expect_symbol(';')?;

        for name in &names {
            self.declare(name, &ty.lexeme, kind)?;
        }

        self.trace.close("classVarDec");
        Ok(())
    }

    /// `<varName> (, <varName>)*`
    pub(crate) fn variable_names(&mut self) -> Result<Vec<Token>> {
        let mut names = vec![self.expect_identifier()?];

        while self.at_symbol(',') {
            self.expect_symbol(',')?;
            names.push(self.expect_identifier()?);
        }

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use crate::compiler::error::Error;
    use matches::assert_matches;

    #[test]
    fn class_variables_get_per_kind_indices() {
        let mut p = parser("class Point { field int x, y; static int count; field Point next; }");

        p.class().unwrap();

        let next = p.symbols.lookup("next").unwrap();
        assert_eq!((next.kind, next.index, next.ty.as_str()), (Kind::Field, 2, "Point"));
        let count = p.symbols.lookup("count").unwrap();
        assert_eq!((count.kind, count.index), (Kind::Static, 0));
        assert_eq!(p.class_name, "Point");
        assert!(code(&p).is_empty());
    }

    #[test]
    fn class_trace_nests_variable_declarations() {
        let mut p = parser("class A { static boolean b; }");

        p.class().unwrap();

        assert_eq!(
            trace(&p),
            vec![
                "<class>",
                "  <keyword> class </keyword>",
                "  <identifier> A </identifier>",
                "  <symbol> { </symbol>",
                "  <classVarDec>",
                "    <keyword> static </keyword>",
                "    <keyword> boolean </keyword>",
                "    <identifier> b </identifier>",
                "    <symbol> ; </symbol>",
                "  </classVarDec>",
                "  <symbol> } </symbol>",
                "</class>",
            ]
        );
    }

    #[test]
    fn class_variables_may_not_be_redeclared() {
        let mut p = parser("class A { field int x; static char x; }");

        assert_matches!(
            p.class(),
            Err(Error::SemanticError(ref d)) if d.content == "'x' is already declared in this scope"
        );
    }

    #[test]
    fn unclosed_class_reports_the_end_of_input() {
        let p = parser("class A { field int x;");

        assert_matches!(
            p.parse(),
            Err(Error::SyntaxError(ref d)) if d.content == "expected '}' but input ended"
        );
    }
}

pub mod compilation_unit;
pub mod error;
pub mod frontend;
pub mod parser;
pub mod settings;
pub mod source;
pub mod symbol_table;
pub mod trace;

pub use compilation_unit::CompilationUnit;
use error::reporting::ErrorReporter;
pub use error::{Error, Result};
use frontend::Lexer;
use parser::Parser;
use settings::{Setting, Settings};
use source::{Registry, Source};

/// Compiles units one at a time.
///
/// All per-unit state (tokens, symbol table, label counter, trace depth)
/// lives in the parser created for that unit. The compiler itself only
/// keeps the sources it has seen, so errors can be rendered against them.
pub struct Compiler {
    registry: Registry,
    settings: Settings,
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Compiler {
            registry: Registry::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn compile<T: Source>(&mut self, source: &mut T) -> Result<CompilationUnit> {
        let origin = source.origin();
        let mut text = String::new();
        source.read_to_string(&mut text)?;

        log::debug!("compiling {} ({} bytes)", origin, text.len());
        let source_id = self.registry.add(origin, text);
        let text = self.registry.contents(source_id).unwrap_or_default();

        let tokens = Lexer::new(source_id, text).tokenize()?;
        log::debug!("lexed {} tokens", tokens.len());

        if self.settings.is_enabled(&Setting::Debug) {
            for token in tokens.tokens() {
                log::debug!(
                    "{:>4}: {:<16} {}",
                    token.line,
                    token.kind.tag(),
                    token.lexeme
                );
            }
        }

        Parser::new(source_id, tokens).parse()
    }

    pub fn print_error(&self, e: &Error) {
        ErrorReporter::new(&self.registry).report_error(e)
    }

    pub fn render_error(&self, e: &Error) -> String {
        ErrorReporter::new(&self.registry).render(e)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;
    use source::StringSource;

    #[test]
    fn compiles_a_class() {
        let mut compiler = Compiler::new();
        let mut source = StringSource::new("class Main { function void main() { return; } }");

        let unit = compiler.compile(&mut source).unwrap();

        assert_eq!(unit.class_name, "Main");
        assert_eq!(unit.code_text(), "function Main.main 0\npush constant 0\nreturn\n");
        assert_eq!(unit.trace.first().map(String::as_str), Some("<class>"));
    }

    #[test]
    fn lexical_errors_abort_the_unit() {
        let mut compiler = Compiler::new();
        let mut source = StringSource::new("class Main { # }");

        assert_matches!(compiler.compile(&mut source), Err(Error::LexError(_)));
    }

    #[test]
    fn errors_render_against_the_source() {
        let mut compiler = Compiler::new();
        let mut source = StringSource::named("class Main {\n  field int x y;\n}", "Main.jack");

        let error = compiler.compile(&mut source).unwrap_err();
        let rendered = compiler.render_error(&error);

        assert!(rendered.contains("error[E002]"), "{}", rendered);
        assert!(rendered.contains("<Main.jack>:2"), "{}", rendered);
    }

    #[test]
    fn units_do_not_share_state() {
        let mut compiler = Compiler::new();
        let class = "class A { function void f() { while (true) { } return; } }";

        let first = compiler.compile(&mut StringSource::new(class)).unwrap();
        let second = compiler.compile(&mut StringSource::new(class)).unwrap();

        assert_eq!(first, second);
        assert!(second.code_text().contains("label WHILE_EXP0"));
    }
}

use super::{Detail, Error};
use crate::compiler::source::{Registry, SourceId};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream};

/// Renders compiler errors against the sources they came from.
pub struct ErrorReporter<'a> {
    source_registry: &'a Registry,
}

impl<'a> ErrorReporter<'a> {
    pub fn new(source_registry: &'a Registry) -> Self {
        Self { source_registry }
    }

    pub fn report_error(&self, e: &Error) {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = term::Config::default();

        if let Err(err) = term::emit(
            &mut writer.lock(),
            &config,
            self.source_registry,
            &self.diagnostic(e),
        ) {
            log::error!("failed to render diagnostic: {}", err);
            eprintln!("{}", e);
        };
    }

    /// Render without colors, mostly useful to inspect diagnostics in tests.
    pub fn render(&self, e: &Error) -> String {
        let mut buffer = NoColor::new(Vec::new());
        let config = term::Config::default();

        match term::emit(&mut buffer, &config, self.source_registry, &self.diagnostic(e)) {
            Ok(()) => String::from_utf8_lossy(&buffer.into_inner()).into_owned(),
            Err(_) => e.to_string(),
        }
    }

    pub fn diagnostic(&self, e: &Error) -> Diagnostic<SourceId> {
        match e {
            Error::IoError(e) => Diagnostic::error()
                .with_code("E000")
                .with_message(format!("{}", e)),
            Error::LexError(detail) => self.located("E001", "failed to tokenize input", detail),
            Error::SyntaxError(detail) => self.located("E002", "failed to parse input", detail),
            Error::SemanticError(detail) => {
                self.located("E003", "invalid program", detail)
            }
        }
    }

    fn located(&self, code: &str, message: &str, detail: &Detail) -> Diagnostic<SourceId> {
        let diagnostic = Diagnostic::error().with_code(code).with_message(message);

        if self.source_registry.contents(detail.location.id).is_some() {
            diagnostic.with_labels(vec![Label::primary(
                detail.location.id,
                detail.location.span.clone(),
            )
            .with_message(detail.content.clone())])
        } else {
            diagnostic.with_notes(vec![format!(
                "line {}: {}",
                detail.location.line, detail.content
            )])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::source::{Location, Origin};

    #[test]
    fn syntax_errors_point_at_the_token() {
        let mut registry = Registry::new();
        let id = registry.add(Origin::Buffer("unit".into()), "class 1 {}".into());
        let error = Error::syntax_error("'1': identifier expected", Location::new(id, 1, 6..7));

        let rendered = ErrorReporter::new(&registry).render(&error);

        assert!(rendered.contains("error[E002]"), "{}", rendered);
        assert!(rendered.contains("'1': identifier expected"), "{}", rendered);
        assert!(rendered.contains("<unit>:1:7"), "{}", rendered);
    }

    #[test]
    fn errors_can_be_reported_to_stderr() {
        let mut registry = Registry::new();
        let id = registry.add(Origin::Buffer("unit".into()), "class A { }\n".into());
        let error = Error::lex_error("unexpected character '#'", Location::new(id, 1, 0..1));

        ErrorReporter::new(&registry).report_error(&error);
    }

    #[test]
    fn unregistered_sources_fall_back_to_notes() {
        let registry = Registry::new();
        let error = Error::semantic_error(
            "undefined variable 'z'",
            Location::new(SourceId::synthetic(), 3, 0..1),
        );

        let rendered = ErrorReporter::new(&registry).render(&error);

        assert!(rendered.contains("error[E003]"), "{}", rendered);
        assert!(rendered.contains("line 3: undefined variable 'z'"), "{}", rendered);
    }
}

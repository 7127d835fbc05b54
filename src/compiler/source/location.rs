use super::SourceId;

/// Byte range into the source text.
pub type Span = std::ops::Range<usize>;

#[derive(PartialEq, Debug, Clone)]
pub struct Location {
    pub id: SourceId,
    /// One-based line number.
    pub line: usize,
    pub span: Span,
}

impl Location {
    pub fn new<Id: Into<SourceId>>(id: Id, line: usize, span: Span) -> Self {
        Self {
            id: id.into(),
            line,
            span,
        }
    }
}

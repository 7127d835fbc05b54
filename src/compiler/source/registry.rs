use super::Origin;
use codespan_reporting::files::{self, Files as _, SimpleFiles};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(usize);

impl SourceId {
    /// Id for text that was never registered, e.g. in unit tests.
    pub fn synthetic() -> Self {
        SourceId(usize::MAX)
    }
}

impl From<usize> for SourceId {
    fn from(id: usize) -> Self {
        SourceId(id)
    }
}

/// Keeps the text of every compiled unit so diagnostics can quote it.
pub struct Registry {
    sources: SimpleFiles<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            sources: SimpleFiles::new(),
        }
    }

    pub fn add(&mut self, origin: Origin, contents: String) -> SourceId {
        SourceId(self.sources.add(origin.to_string(), contents))
    }

    pub fn contents(&self, id: SourceId) -> Option<&str> {
        self.sources.get(id.0).ok().map(|file| file.source().as_str())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> files::Files<'a> for Registry {
    type FileId = SourceId;
    type Name = String;
    type Source = &'a str;

    fn name(&'a self, id: Self::FileId) -> Result<Self::Name, files::Error> {
        self.sources.name(id.0)
    }

    fn source(&'a self, id: Self::FileId) -> Result<Self::Source, files::Error> {
        self.sources.source(id.0)
    }

    fn line_index(&'a self, id: Self::FileId, byte_index: usize) -> Result<usize, files::Error> {
        self.sources.line_index(id.0, byte_index)
    }

    fn line_range(
        &'a self,
        id: Self::FileId,
        line_index: usize,
    ) -> Result<Range<usize>, files::Error> {
        self.sources.line_range(id.0, line_index)
    }
}

use super::{Origin, Source};
use std::io::Read;
use std::path::PathBuf;

/// A compilation unit stored on disk. The file is opened when it is read.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    fn origin(&self) -> Origin {
        Origin::File(self.path.clone())
    }

    fn read_to_string(&mut self, buf: &mut String) -> std::io::Result<()> {
        std::fs::File::open(&self.path)?.read_to_string(buf)?;
        Ok(())
    }
}

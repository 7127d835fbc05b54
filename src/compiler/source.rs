//! Compilation unit inputs and the registry that keeps their text around
//! for diagnostics.
mod file;
mod location;
mod origin;
pub mod registry;
mod string;

pub use file::FileSource;
pub use location::{Location, Span};
pub use origin::Origin;
pub use registry::{Registry, SourceId};
pub use string::StringSource;

/// Anything the compiler can read a compilation unit from.
pub trait Source {
    fn origin(&self) -> Origin;
    fn read_to_string(&mut self, buf: &mut String) -> std::io::Result<()>;
}

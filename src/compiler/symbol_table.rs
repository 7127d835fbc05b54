////////////////////////////////////////////////////////////////////////////////////////////////////
// Symbols and symbol tracking
//
// The table has exactly two levels. The class scope holds `static` and `field` variables and
// lives as long as the class. The subroutine scope holds arguments and locals and is reset at
// the start of every subroutine declaration. Lookups try the subroutine scope first, so an
// argument or local shadows a class variable of the same name.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

pub mod scope;

use crate::vm::{Index, Segment};
use scope::Scope;
use std::fmt;
use thiserror::Error;

/// Declaration category of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Static,
    Field,
    Argument,
    Local,
}

impl Kind {
    /// Storage segment the VM uses for variables of this kind.
    pub fn segment(&self) -> Segment {
        match self {
            Kind::Static => Segment::Static,
            Kind::Field => Segment::This,
            Kind::Argument => Segment::Argument,
            Kind::Local => Segment::Local,
        }
    }

    pub fn is_class_level(&self) -> bool {
        matches!(self, Kind::Static | Kind::Field)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Static => "static",
            Kind::Field => "field",
            Kind::Argument => "argument",
            Kind::Local => "local",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    pub name: String,
    pub ty: String,
    pub kind: Kind,
    pub index: Index,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolError {
    #[error("'{0}' is already declared in this scope")]
    Redeclared(String),
    #[error("too many {0} variables")]
    TooMany(Kind),
}

/// Snapshot of the table taken before a speculative parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolMark {
    class_len: usize,
    subroutine_len: usize,
    generation: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    class: Scope,
    subroutine: Scope,
    /// Bumped on every subroutine scope reset.
    generation: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable in the scope its kind belongs to.
    pub fn declare(&mut self, name: &str, ty: &str, kind: Kind) -> Result<&SymbolEntry, SymbolError> {
        let entry = if kind.is_class_level() {
            self.class.declare(name, ty, kind)?
        } else {
            self.subroutine.declare(name, ty, kind)?
        };

        log::trace!(
            "declared {} {} {} as {} {}",
            entry.kind,
            entry.ty,
            entry.name,
            entry.kind.segment(),
            entry.index
        );
        Ok(entry)
    }

    /// Resolve a name, subroutine scope first.
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.subroutine
            .resolve(name)
            .or_else(|| self.class.resolve(name))
    }

    pub fn count(&self, kind: Kind) -> Index {
        if kind.is_class_level() {
            self.class.count(kind)
        } else {
            self.subroutine.count(kind)
        }
    }

    pub fn reset_subroutine_scope(&mut self) {
        self.subroutine.clear();
        self.generation += 1;
    }

    /// Start over for a new class.
    pub fn reset(&mut self) {
        self.class.clear();
        self.reset_subroutine_scope();
    }

    pub fn subroutine_scope(&self) -> &Scope {
        &self.subroutine
    }

    pub fn mark(&self) -> SymbolMark {
        SymbolMark {
            class_len: self.class.len(),
            subroutine_len: self.subroutine.len(),
            generation: self.generation,
        }
    }

    /// Drop every declaration made since `mark`.
    ///
    /// A subroutine scope that was reset after the mark stays empty: its old
    /// entries belonged to a subroutine that is already compiled.
    pub fn rewind(&mut self, mark: SymbolMark) {
        self.class.truncate(mark.class_len);

        if self.generation == mark.generation {
            self.subroutine.truncate(mark.subroutine_len);
        } else {
            self.subroutine.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_segments() {
        assert_eq!(Kind::Static.segment(), Segment::Static);
        assert_eq!(Kind::Field.segment(), Segment::This);
        assert_eq!(Kind::Argument.segment(), Segment::Argument);
        assert_eq!(Kind::Local.segment(), Segment::Local);
    }

    #[test]
    fn lookup_prefers_the_subroutine_scope() {
        let mut table = SymbolTable::new();
        table.declare("x", "int", Kind::Field).unwrap();
        table.declare("x", "boolean", Kind::Local).unwrap();

        let entry = table.lookup("x").unwrap();

        assert_eq!(entry.kind, Kind::Local);
        assert_eq!(entry.ty, "boolean");
    }

    #[test]
    fn lookup_falls_back_to_the_class_scope() {
        let mut table = SymbolTable::new();
        table.declare("count", "int", Kind::Static).unwrap();

        assert_eq!(table.lookup("count").unwrap().kind, Kind::Static);
        assert!(table.lookup("missing").is_none());
    }

    #[test]
    fn subroutine_reset_keeps_class_variables() {
        let mut table = SymbolTable::new();
        table.declare("x", "int", Kind::Field).unwrap();
        table.declare("a", "int", Kind::Argument).unwrap();

        table.reset_subroutine_scope();

        assert!(table.lookup("a").is_none());
        assert!(table.lookup("x").is_some());
        assert_eq!(table.count(Kind::Argument), 0);
        assert_eq!(table.count(Kind::Field), 1);
    }

    #[test]
    fn rewind_forgets_speculative_declarations() {
        let mut table = SymbolTable::new();
        table.declare("x", "int", Kind::Field).unwrap();
        let mark = table.mark();

        table.declare("y", "int", Kind::Field).unwrap();
        table.declare("i", "int", Kind::Local).unwrap();
        table.rewind(mark);

        assert!(table.lookup("y").is_none());
        assert!(table.lookup("i").is_none());
        assert_eq!(table.count(Kind::Field), 1);
    }

    #[test]
    fn rewind_across_a_reset_leaves_the_subroutine_scope_empty() {
        let mut table = SymbolTable::new();
        table.declare("a", "int", Kind::Argument).unwrap();
        let mark = table.mark();

        table.reset_subroutine_scope();
        table.declare("b", "int", Kind::Argument).unwrap();
        table.rewind(mark);

        assert!(table.subroutine_scope().is_empty());
    }
}

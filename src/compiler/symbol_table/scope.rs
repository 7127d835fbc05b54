use super::{Kind, SymbolEntry, SymbolError};
use crate::vm::Index;
use rustc_hash::FxHashMap;

/// One level of the symbol table.
///
/// Entries keep declaration order. Each kind has its own running counter,
/// so the index of an entry is its ordinal among entries of the same kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    entries: Vec<SymbolEntry>,
    counters: FxHashMap<Kind, Index>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry with the next index of its kind.
    ///
    /// Returns `SymbolError::Redeclared` if the name is already taken in this
    /// scope, and `SymbolError::TooMany` once the kind runs out of indices.
    pub fn declare(&mut self, name: &str, ty: &str, kind: Kind) -> Result<&SymbolEntry, SymbolError> {
        if self.resolve(name).is_some() {
            return Err(SymbolError::Redeclared(name.to_string()));
        }

        let counter = self.counters.entry(kind).or_insert(0);
        let index = *counter;
        *counter = index.checked_add(1).ok_or(SymbolError::TooMany(kind))?;

        self.entries.push(SymbolEntry {
            name: name.to_string(),
            ty: ty.to_string(),
            kind,
            index,
        });

        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn resolve(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Number of entries declared with this kind.
    pub fn count(&self, kind: Kind) -> Index {
        self.counters.get(&kind).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.counters.clear();
    }

    /// Forget every entry declared after the first `len` ones.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.entries.len() {
            return;
        }

        self.entries.truncate(len);
        self.counters.clear();
        for entry in &self.entries {
            *self.counters.entry(entry.kind).or_insert(0) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_count_per_kind() {
        let mut scope = Scope::new();

        scope.declare("x", "int", Kind::Field).unwrap();
        scope.declare("count", "int", Kind::Static).unwrap();
        let y = scope.declare("y", "int", Kind::Field).unwrap().clone();

        assert_eq!(y.index, 1);
        assert_eq!(scope.resolve("count").unwrap().index, 0);
        assert_eq!(scope.count(Kind::Field), 2);
        assert_eq!(scope.count(Kind::Static), 1);
        assert_eq!(scope.count(Kind::Local), 0);
    }

    #[test]
    fn redeclaration_is_rejected() {
        let mut scope = Scope::new();
        scope.declare("x", "int", Kind::Local).unwrap();

        assert_eq!(
            scope.declare("x", "boolean", Kind::Local),
            Err(SymbolError::Redeclared("x".into()))
        );
        assert_eq!(scope.count(Kind::Local), 1);
    }

    #[test]
    fn index_space_is_bounded() {
        let mut scope = Scope::new();
        scope.counters.insert(Kind::Local, Index::MAX);

        assert_eq!(
            scope.declare("x", "int", Kind::Local),
            Err(SymbolError::TooMany(Kind::Local))
        );
        assert!(scope.resolve("x").is_none());
        assert_eq!(scope.declare("y", "int", Kind::Argument).unwrap().index, 0);
    }

    #[test]
    fn truncate_recomputes_counters() {
        let mut scope = Scope::new();
        scope.declare("a", "int", Kind::Argument).unwrap();
        scope.declare("b", "int", Kind::Local).unwrap();
        scope.declare("c", "int", Kind::Local).unwrap();

        scope.truncate(2);

        assert_eq!(scope.len(), 2);
        assert!(scope.resolve("c").is_none());
        assert_eq!(scope.count(Kind::Local), 1);
        assert_eq!(scope.declare("d", "int", Kind::Local).unwrap().index, 1);
    }

    #[test]
    fn clear_resets_counters() {
        let mut scope = Scope::new();
        scope.declare("a", "int", Kind::Argument).unwrap();

        scope.clear();

        assert!(scope.is_empty());
        assert_eq!(scope.declare("b", "int", Kind::Argument).unwrap().index, 0);
    }
}

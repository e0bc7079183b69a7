//! Symbol table storage, lookup, and duplicate detection.

use std::collections::HashMap;

use crate::error::{AssemblyError, AssemblyResult, SourcePos};
use crate::symbols::{Symbol, SymbolKind};

/// Maps canonical symbol names to their [`Symbol`] record.
///
/// Enforces the uniqueness invariant: a name may not be bound twice to
/// different values across constants, defines, and labels.
#[derive(Debug, Default)]
pub struct SymbolTable {
	symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare a new symbol. If the name already exists with a different
	/// resolved value, returns `DuplicateSymbol`. Re-declaring an import (an
	/// idempotent `.import` line) is allowed.
	pub fn declare(&mut self, kind: SymbolKind, name: &str, value: Option<i32>, pos: SourcePos) -> AssemblyResult<()> {
		if let Some(existing) = self.symbols.get(name) {
			let same_value = match (existing.value, value) {
				(Some(a), Some(b)) => a == b,
				_ => true,
			};
			if !same_value || (existing.kind != kind && kind != SymbolKind::Import && existing.kind != SymbolKind::Import) {
				return Err(AssemblyError::DuplicateSymbol {
					pos,
					symbol: name.to_string(),
					previous_pos: existing.pos.clone(),
				});
			}
			return Ok(());
		}
		self.symbols.insert(name.to_string(), Symbol::new(kind, name, value, pos));
		Ok(())
	}

	/// Set (or overwrite) a previously declared symbol's value, used when a
	/// label's pass-1 offset becomes known, or the linker rewrites it to an
	/// absolute address.
	pub fn set_value(&mut self, name: &str, value: i32) {
		if let Some(symbol) = self.symbols.get_mut(name) {
			symbol.value = Some(value);
		}
	}

	/// Look up a symbol's current value, if resolved.
	pub fn value(&self, name: &str) -> Option<i32> {
		self.symbols.get(name).and_then(|s| s.value)
	}

	/// Look up the full symbol record.
	pub fn get(&self, name: &str) -> Option<&Symbol> {
		self.symbols.get(name)
	}

	/// True if a name is already bound to anything.
	pub fn contains(&self, name: &str) -> bool {
		self.symbols.contains_key(name)
	}

	/// Iterate over all declared symbols.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Symbol)> {
		self.symbols.iter()
	}

	/// Number of declared symbols.
	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	/// True if no symbols are declared.
	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn pos() -> SourcePos {
		SourcePos::file_only(PathBuf::from("test.s"))
	}

	#[test]
	fn declares_and_reads_back() {
		let mut table = SymbolTable::new();
		table.declare(SymbolKind::Constant, "FOO", Some(42), pos()).unwrap();
		assert_eq!(table.value("FOO"), Some(42));
	}

	#[test]
	fn redeclaring_same_value_is_fine() {
		let mut table = SymbolTable::new();
		table.declare(SymbolKind::Constant, "FOO", Some(1), pos()).unwrap();
		table.declare(SymbolKind::Constant, "FOO", Some(1), pos()).unwrap();
	}

	#[test]
	fn redeclaring_different_value_is_duplicate_error() {
		let mut table = SymbolTable::new();
		table.declare(SymbolKind::Constant, "FOO", Some(1), pos()).unwrap();
		let err = table.declare(SymbolKind::Constant, "FOO", Some(2), pos()).unwrap_err();
		assert!(matches!(err, AssemblyError::DuplicateSymbol { .. }));
	}

	#[test]
	fn forward_declared_label_can_later_be_resolved() {
		let mut table = SymbolTable::new();
		table.declare(SymbolKind::Label, "loop", None, pos()).unwrap();
		assert_eq!(table.value("loop"), None);
		table.set_value("loop", 10);
		assert_eq!(table.value("loop"), Some(10));
	}
}

//! Lookup glue between the symbol table and the expression evaluator /
//! linker, plus the runtime-library import map.

use std::collections::HashMap;

use crate::symbols::SymbolTable;

/// A closure-backed view the expression evaluator queries to resolve
/// identifiers to values (or `None` for "not yet known, try again later").
pub type SymbolLookup<'a> = dyn Fn(&str) -> Option<i32> + 'a;

/// Build a [`SymbolLookup`] backed directly by a symbol table, applying the
/// given scope canonicalization to every name before lookup.
pub fn table_lookup<'a>(table: &'a SymbolTable, canonicalize: impl Fn(&str) -> String + 'a) -> impl Fn(&str) -> Option<i32> + 'a {
	move |name: &str| table.value(&canonicalize(name))
}

/// The declared signature of one runtime-library method, supplied externally
/// (by the bytecode decoder's host) so the codegen adapter can validate
/// argument counts without knowing anything else about the method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSignature {
	/// Absolute PRG entry address of this method, once known. `None` until
	/// linking.
	pub address: Option<u16>,
	/// Declared parameter count.
	pub arg_count: usize,
	/// Whether calling this method leaves a value for the caller.
	pub returns_value: bool,
}

impl ImportSignature {
	/// Declare an import whose address is supplied up front (typical case:
	/// the runtime library's addresses are fixed and known before assembly).
	pub fn new(address: u16, arg_count: usize, returns_value: bool) -> Self {
		Self {
			address: Some(address),
			arg_count,
			returns_value,
		}
	}
}

/// The runtime-library import map: method name -> signature. Populated from
/// configuration and consulted by both `.import` resolution at link time and
/// the runtime-call codegen adapter (§4.6).
#[derive(Debug, Clone, Default)]
pub struct ImportMap {
	signatures: HashMap<String, ImportSignature>,
}

impl ImportMap {
	/// Create an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register (or overwrite) a method's signature.
	pub fn insert(&mut self, name: impl Into<String>, signature: ImportSignature) {
		self.signatures.insert(name.into(), signature);
	}

	/// Look up a method's signature by name.
	pub fn get(&self, name: &str) -> Option<&ImportSignature> {
		self.signatures.get(name)
	}

	/// Resolve an imported symbol's absolute address, if known.
	pub fn address(&self, name: &str) -> Option<u16> {
		self.signatures.get(name).and_then(|s| s.address)
	}

	/// True if this name is a registered import.
	pub fn contains(&self, name: &str) -> bool {
		self.signatures.contains_key(name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SourcePos;
	use crate::symbols::SymbolKind;
	use std::path::PathBuf;

	#[test]
	fn table_lookup_resolves_through_scope() {
		let mut table = SymbolTable::new();
		table
			.declare(SymbolKind::Label, "main:@loop", Some(5), SourcePos::file_only(PathBuf::from("a.s")))
			.unwrap();
		let lookup = table_lookup(&table, |name| format!("main:{name}"));
		assert_eq!(lookup("@loop"), Some(5));
	}

	#[test]
	fn import_map_resolves_address() {
		let mut imports = ImportMap::new();
		imports.insert("print_string", ImportSignature::new(0x8100, 1, false));
		assert_eq!(imports.address("print_string"), Some(0x8100));
		assert_eq!(imports.get("print_string").unwrap().arg_count, 1);
	}
}

//! Symbol-dump output (§1.1's "listing/symbol-dump option").
//!
//! Reuses the linker's own address resolution (`output::rom`) so the dump
//! always reflects exactly the addresses the written ROM was built from,
//! rather than a second, possibly-diverging calculation.

use std::collections::BTreeMap;

use crate::core::assembler::AssembledProgram;
use crate::error::AssemblyResult;
use crate::output::rom::{resolve_label_addresses, segment_bases};
use crate::symbols::SymbolKind;

/// Render every resolved symbol as `NAME = $ADDR` lines, sorted by name.
/// Covers labels (local and exported), constants, and defines; imports are
/// omitted since their address lives in the runtime-library configuration,
/// not in this build's own symbol space.
pub fn dump_symbols(program: &AssembledProgram) -> AssemblyResult<String> {
	let segment_base = segment_bases(program)?;
	let label_addresses = resolve_label_addresses(program, &segment_base);

	let mut entries: BTreeMap<String, i32> = BTreeMap::new();
	for (name, address) in &label_addresses {
		entries.insert(name.clone(), *address);
	}
	for (name, symbol) in program.symbols.iter() {
		if matches!(symbol.kind, SymbolKind::Constant | SymbolKind::Define) {
			if let Some(value) = symbol.value {
				entries.insert(name.clone(), value);
			}
		}
	}

	let mut out = String::new();
	for (name, value) in entries {
		out.push_str(&format!("{name} = ${value:04X}\n"));
	}
	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::core::assembler::Assembler;
	use std::io::Write as _;
	use std::path::PathBuf;

	#[test]
	fn dumps_labels_and_constants_sorted_by_name() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("game.s");
		std::fs::File::create(&path)
			.unwrap()
			.write_all(
				b"\
SCREEN_WIDTH = 32
.segment \"STARTUP\"
reset:  rts
",
			)
			.unwrap();
		let config = Config::new(vec![path], PathBuf::from("game.nes")).build();
		let program = Assembler::new(config).assemble().unwrap();
		let dump = dump_symbols(&program).unwrap();
		let lines: Vec<&str> = dump.lines().collect();
		assert_eq!(lines, vec!["SCREEN_WIDTH = $0020", "reset = $8000"]);
	}
}

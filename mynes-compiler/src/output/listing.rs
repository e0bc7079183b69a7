//! Listing output: one line per emitted block, showing its resolved
//! address, label, and bytes — a simplified relative of the teacher's
//! source-annotated listing, since this system's blocks don't retain the
//! originating source line once pass 2 has emitted them.

use std::fmt::Write as _;

use crate::core::assembler::AssembledProgram;
use crate::core::memory::SegmentKind;
use crate::error::AssemblyResult;
use crate::output::rom::segment_bases;

/// Render one line per block in layout order: `SEGMENT $ADDR LABEL: bytes…`.
pub fn render_listing(program: &AssembledProgram) -> AssemblyResult<String> {
	let segment_base = segment_bases(program)?;
	let mut out = String::new();
	for segment in SegmentKind::rom_layout_order() {
		let base = segment_base.get(segment).copied().unwrap_or(0);
		for block in program.memory.blocks(*segment) {
			let addr = base.wrapping_add(block.segment_offset as u16);
			let label = block.primary_label.as_deref().unwrap_or("");
			let hex: Vec<String> = block.bytes.iter().map(|b| format!("{b:02X}")).collect();
			writeln!(out, "{segment:<8} ${addr:04X} {label:<16} {}", hex.join(" ")).expect("writing to a String never fails");
		}
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
	fn one_line_per_block_with_resolved_address() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("game.s");
		std::fs::File::create(&path)
			.unwrap()
			.write_all(
				b"\
.segment \"STARTUP\"
reset:  lda #$00
        rts
",
			)
			.unwrap();
		let config = Config::new(vec![path], PathBuf::from("game.nes")).build();
		let program = Assembler::new(config).assemble().unwrap();
		let listing = render_listing(&program).unwrap();
		assert!(listing.contains("STARTUP"));
		assert!(listing.contains("$8000"));
		assert!(listing.contains("reset"));
		assert!(listing.contains("A9 00 60"));
	}
}

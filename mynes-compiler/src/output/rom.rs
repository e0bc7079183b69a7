//! Linker / ROM builder (§4.5).
//!
//! Takes an [`AssembledProgram`]'s ordered blocks per segment and an
//! externally supplied runtime-library address map, assigns every block an
//! absolute PRG address, resolves every relocation and branch fixup against
//! the merged symbol space (local labels, constants, runtime imports), and
//! writes a complete iNES ROM image.

use std::collections::HashMap;
use std::path::PathBuf;

use mynes_rom::INesHeader;

use crate::config::Mirroring;
use crate::core::assembler::AssembledProgram;
use crate::core::memory::SegmentKind;
use crate::error::{AssemblyError, AssemblyResult, SourcePos};
use crate::instructions::encoding::{RelocationSize, calculate_relative_offset};
use crate::symbols::SymbolKind;

/// PRG ROM starts here; `STARTUP`, `CODE`, and `RODATA` fill it in that
/// order. Two 16 KiB banks, per the fixed iNES header this linker writes.
const PRG_BASE: u16 = 0x8000;
/// The six interrupt vectors occupy the last six bytes of PRG ROM.
const VECTORS_BASE: u16 = 0xFFFA;
/// Total PRG ROM size (two 16 KiB banks).
const PRG_SIZE: usize = 32 * 1024;
/// Total CHR ROM size (one 8 KiB bank).
const CHR_SIZE: usize = 8 * 1024;

fn link_pos(context: &str) -> SourcePos {
	SourcePos::file_only(PathBuf::from(format!("<link:{context}>")))
}

/// Segment base addresses assigned by the fixed layout (§4.5), keyed by
/// segment. Exposed alongside [`resolve_label_addresses`] so the listing and
/// symbol-dump writers can lay out the same way the linker does without
/// duplicating its address assignment.
pub fn segment_bases(program: &AssembledProgram) -> AssemblyResult<HashMap<SegmentKind, u16>> {
	let memory = &program.memory;
	let mut base = PRG_BASE;
	let mut segment_base = HashMap::new();
	for segment in [SegmentKind::Startup, SegmentKind::Code, SegmentKind::Rodata] {
		segment_base.insert(segment, base);
		base = base.wrapping_add(memory.segment_len(segment) as u16);
	}
	segment_base.insert(SegmentKind::Vectors, VECTORS_BASE);

	let prg_used = (base as usize).saturating_sub(PRG_BASE as usize);
	if prg_used > (VECTORS_BASE - PRG_BASE) as usize {
		return Err(AssemblyError::RomOverflow {
			region: "PRG (STARTUP+CODE+RODATA)".to_string(),
			used: prg_used,
			limit: (VECTORS_BASE - PRG_BASE) as usize,
		});
	}
	let vectors_len = memory.segment_len(SegmentKind::Vectors);
	if vectors_len != 6 {
		return Err(AssemblyError::RomOverflow {
			region: "VECTORS".to_string(),
			used: vectors_len,
			limit: 6,
		});
	}
	let chr_len = memory.segment_len(SegmentKind::Chars);
	if chr_len > CHR_SIZE {
		return Err(AssemblyError::RomOverflow {
			region: "CHARS".to_string(),
			used: chr_len,
			limit: CHR_SIZE,
		});
	}
	Ok(segment_base)
}

/// Every label's absolute address, built by walking blocks at their layout
/// addresses. `CHARS` is excluded: nothing in PRG is CPU-addressable there,
/// so its labels never participate in relocations.
pub fn resolve_label_addresses(program: &AssembledProgram, segment_base: &HashMap<SegmentKind, u16>) -> HashMap<String, i32> {
	let memory = &program.memory;
	let mut addresses: HashMap<String, i32> = HashMap::new();
	for segment in [SegmentKind::Startup, SegmentKind::Code, SegmentKind::Rodata, SegmentKind::Vectors] {
		let base = segment_base[&segment];
		for block in memory.blocks(segment) {
			let block_addr = base.wrapping_add(block.segment_offset as u16);
			for label in block.labels() {
				addresses.insert(label.to_string(), i32::from(block_addr));
			}
			for (offset, label) in &block.interior_labels {
				addresses.insert(label.clone(), i32::from(block_addr.wrapping_add(*offset as u16)));
			}
		}
	}
	addresses
}

/// Resolve every relocation and branch fixup and lay out the final PRG and
/// CHR images, without prepending a header. Shared by [`link`] (which adds
/// the iNES header) and [`raw_image`] (headerless output for `--raw`).
fn build_images(program: &AssembledProgram) -> AssemblyResult<(Vec<u8>, Vec<u8>)> {
	let memory = &program.memory;
	let segment_base = segment_bases(program)?;
	let addresses = resolve_label_addresses(program, &segment_base);

	// `addresses` excludes CHARS-segment labels (they are not CPU-addressable,
	// see `resolve_label_addresses` above), so a stray reference to one must
	// not silently fall back to its pass-1 segment-relative offset. Only
	// `Constant`/`Define` symbols are safe to resolve through the table
	// directly; any other kind missing from `addresses` is unresolved.
	let resolve = |name: &str| -> Option<i32> {
		if let Some(addr) = addresses.get(name).copied() {
			return Some(addr);
		}
		let constant = match program.symbols.get(name) {
			Some(symbol) if matches!(symbol.kind, SymbolKind::Constant | SymbolKind::Define) => symbol.value,
			_ => None,
		};
		constant.or_else(|| program.imports.address(name).map(i32::from))
	};

	let mut prg = vec![0xFFu8; PRG_SIZE];
	for segment in [SegmentKind::Startup, SegmentKind::Code, SegmentKind::Rodata] {
		let base = segment_base[&segment];
		for block in memory.blocks(segment) {
			let mut bytes = block.bytes.clone();
			apply_fixups(&mut bytes, block, base, &resolve)?;
			let start = (base.wrapping_add(block.segment_offset as u16) - PRG_BASE) as usize;
			prg[start..start + bytes.len()].copy_from_slice(&bytes);
		}
	}
	for block in memory.blocks(SegmentKind::Vectors) {
		let mut bytes = block.bytes.clone();
		apply_fixups(&mut bytes, block, VECTORS_BASE, &resolve)?;
		let start = (VECTORS_BASE.wrapping_add(block.segment_offset as u16) - VECTORS_BASE) as usize + (PRG_SIZE - 6);
		prg[start..start + bytes.len()].copy_from_slice(&bytes);
	}

	let mut chr = vec![0x00u8; CHR_SIZE];
	let mut chr_cursor = 0usize;
	for block in memory.blocks(SegmentKind::Chars) {
		chr[chr_cursor..chr_cursor + block.bytes.len()].copy_from_slice(&block.bytes);
		chr_cursor += block.bytes.len();
	}

	Ok((prg, chr))
}

/// Link an assembled program into a complete iNES ROM image.
pub fn link(program: &AssembledProgram, mirroring: Mirroring) -> AssemblyResult<Vec<u8>> {
	let (prg, chr) = build_images(program)?;
	let header = INesHeader::new(2, 1, mirroring.to_rom_header());
	let mut rom = Vec::with_capacity(header.total_size());
	rom.extend_from_slice(&header.to_bytes());
	rom.extend_from_slice(&prg);
	rom.extend_from_slice(&chr);
	Ok(rom)
}

/// Link without prepending an iNES header: PRG (32 KiB) followed by CHR
/// (8 KiB), for tools that want the raw cartridge image.
pub fn raw_image(program: &AssembledProgram) -> AssemblyResult<Vec<u8>> {
	let (prg, chr) = build_images(program)?;
	let mut rom = Vec::with_capacity(prg.len() + chr.len());
	rom.extend_from_slice(&prg);
	rom.extend_from_slice(&chr);
	Ok(rom)
}

fn apply_fixups(bytes: &mut [u8], block: &crate::core::memory::Block, base: u16, resolve: &dyn Fn(&str) -> Option<i32>) -> AssemblyResult<()> {
	for reloc in &block.relocations {
		let value = resolve(&reloc.symbol).ok_or_else(|| AssemblyError::UnresolvedSymbol {
			pos: link_pos(&reloc.symbol),
			symbol: reloc.symbol.clone(),
		})?;
		match reloc.size {
			RelocationSize::ByteLow => bytes[reloc.offset] = (value & 0xFF) as u8,
			RelocationSize::ByteHigh => bytes[reloc.offset] = ((value >> 8) & 0xFF) as u8,
			RelocationSize::Word => {
				let word = value as u16;
				bytes[reloc.offset..reloc.offset + 2].copy_from_slice(&word.to_le_bytes());
			}
		}
	}
	for fixup in &block.branch_fixups {
		let target = resolve(&fixup.target).ok_or_else(|| AssemblyError::UnresolvedSymbol {
			pos: link_pos(&fixup.target),
			symbol: fixup.target.clone(),
		})?;
		// The displacement byte sits right after its instruction's opcode
		// byte, so the instruction's own address is one less than it.
		let own_addr = base.wrapping_add(block.segment_offset as u16).wrapping_add(fixup.offset as u16 - 1);
		let disp = calculate_relative_offset(own_addr, target as u16, &fixup.target, &link_pos(&fixup.target))?;
		bytes[fixup.offset] = disp as u8;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::core::assembler::Assembler;
	use std::io::Write as _;

	fn assemble(source: &str) -> AssembledProgram {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("game.s");
		std::fs::File::create(&path).unwrap().write_all(source.as_bytes()).unwrap();
		let config = Config::new(vec![path], PathBuf::from("game.nes")).build();
		Assembler::new(config).assemble().unwrap()
	}

	#[test]
	fn produces_a_40976_byte_rom_with_valid_header() {
		let program = assemble(
			"\
.segment \"STARTUP\"
reset:  lda #$00
        rts
.segment \"VECTORS\"
        .word reset
        .word reset
        .word reset
",
		);
		let rom = link(&program, Mirroring::Horizontal).unwrap();
		assert_eq!(rom.len(), 40_976);
		assert_eq!(&rom[0..4], b"NES\x1a");
		assert_eq!(rom[4], 2);
		assert_eq!(rom[5], 1);
	}

	#[test]
	fn startup_block_lands_at_8000_and_vectors_point_back_to_it() {
		let program = assemble(
			"\
.segment \"STARTUP\"
reset:  lda #$00
        rts
.segment \"VECTORS\"
        .word reset
        .word reset
        .word reset
",
		);
		let rom = link(&program, Mirroring::Horizontal).unwrap();
		let prg = &rom[16..16 + PRG_SIZE];
		assert_eq!(&prg[0..4], &[0xA9, 0x00, 0x60]);
		let nmi_lo = prg[PRG_SIZE - 6];
		let nmi_hi = prg[PRG_SIZE - 5];
		assert_eq!(u16::from_le_bytes([nmi_lo, nmi_hi]), 0x8000);
	}

	#[test]
	fn missing_vectors_is_a_rom_overflow_error() {
		let program = assemble(
			"\
.segment \"STARTUP\"
reset:  rts
",
		);
		let err = link(&program, Mirroring::Horizontal).unwrap_err();
		assert!(matches!(err, AssemblyError::RomOverflow { .. }));
	}

	#[test]
	fn unresolved_import_at_link_time_is_an_error() {
		let program = assemble(
			"\
.segment \"STARTUP\"
reset:  jsr print_string
        rts
.segment \"VECTORS\"
        .word reset
        .word reset
        .word reset
",
		);
		let err = link(&program, Mirroring::Horizontal).unwrap_err();
		assert!(matches!(err, AssemblyError::UnresolvedSymbol { .. }));
	}
}

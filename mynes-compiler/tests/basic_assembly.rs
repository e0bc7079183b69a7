//! Integration tests driving the assembler and linker through their public
//! `Config`/`Assembler`/`output` API, end to end from a source file on disk
//! to either an assembled program or a finished ROM image.

mod common;

use common::TestSnippets;
use nes_compiler::AssemblyError;
use nes_compiler::core::memory::SegmentKind;

#[test]
fn minimal_program_assembles_and_links() {
	let fixture = common::TestFixture::new(TestSnippets::minimal_program());
	let rom = fixture.assemble_and_link().expect("assembly and linking should succeed");
	assert_eq!(rom.len(), 40_976);
	assert_eq!(&rom[0..4], b"NES\x1a");
}

#[test]
fn basic_addressing_modes_assemble() {
	let fixture = common::TestFixture::new(TestSnippets::basic_instructions());
	let program = fixture.assemble().expect("assembly should succeed");
	let bytes: Vec<u8> = program.memory.blocks(SegmentKind::Startup).iter().flat_map(|b| b.bytes.clone()).collect();
	assert_eq!(
		bytes,
		vec![
			0xA9, 0x42, // lda #$42
			0x85, 0x00, // sta $00
			0xB5, 0x00, // lda $00,x
			0x8D, 0x00, 0x02, // sta $0200
			0xBD, 0x00, 0x02, // lda $0200,x
			0xB9, 0x00, 0x02, // lda $0200,y
			0x60, // rts
		]
	);
}

#[test]
fn local_labels_and_forward_branches_resolve() {
	let fixture = common::TestFixture::new(TestSnippets::with_labels());
	let rom = fixture.assemble_and_link().expect("assembly and linking should succeed");
	assert_eq!(rom.len(), 40_976);
}

#[test]
fn data_directives_land_in_their_segments() {
	let fixture = common::TestFixture::new(TestSnippets::with_data());
	let program = fixture.assemble().expect("assembly should succeed");
	let rodata: Vec<u8> = program.memory.blocks(SegmentKind::Rodata).iter().flat_map(|b| b.bytes.clone()).collect();
	assert!(rodata.starts_with(b"HELLO\0"));
	assert_eq!(program.symbols.value("counter"), Some(0));
}

#[test]
fn constant_expressions_fold_at_pass_one() {
	let fixture = common::TestFixture::new(TestSnippets::with_expressions());
	let program = fixture.assemble().expect("assembly should succeed");
	let bytes: Vec<u8> = program.memory.blocks(SegmentKind::Startup).iter().flat_map(|b| b.bytes.clone()).collect();
	// SCREEN_WIDTH + OFFSET == 48 == $0030
	assert_eq!(bytes[0..2], [0xA9, 0x30]);
	assert_eq!(bytes[4..6], [0xA9, 0x00]);
}

#[test]
fn undefined_symbol_is_an_assembly_error() {
	let fixture = common::TestFixture::new(TestSnippets::undefined_symbol());
	let err = fixture.assemble().unwrap_err();
	assert!(matches!(err, AssemblyError::UnresolvedSymbol { .. }));
}

#[test]
fn missing_input_file_is_rejected_before_parsing() {
	let dir = tempfile::tempdir().unwrap();
	let missing = dir.path().join("does_not_exist.s");
	let config = nes_compiler::Config::new(vec![missing], dir.path().join("out.nes")).build();
	let err = nes_compiler::Assembler::new(config).assemble().unwrap_err();
	assert!(matches!(err, AssemblyError::Io { .. }));
}

#[test]
fn raw_output_has_no_ines_header() {
	let fixture = common::TestFixture::new(TestSnippets::minimal_program());
	let program = fixture.assemble().expect("assembly should succeed");
	let raw = nes_compiler::output::raw_image(&program).expect("raw image should build");
	assert_eq!(raw.len(), 32 * 1024 + 8 * 1024);
	assert_ne!(&raw[0..4], b"NES\x1a");
}

#[test]
fn symbol_dump_lists_resolved_labels() {
	let fixture = common::TestFixture::new(TestSnippets::minimal_program());
	let program = fixture.assemble().expect("assembly should succeed");
	let dump = nes_compiler::output::dump_symbols(&program).expect("symbol dump should succeed");
	assert!(dump.contains("reset = $8000"));
}

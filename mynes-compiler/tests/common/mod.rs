//! Shared helpers for the integration tests in this directory: writing a
//! temporary source file and driving it through the real `Config`/`Assembler`
//! API end to end.

use std::io::Write;
use std::path::{Path, PathBuf};

use nes_compiler::config::Mirroring;
use nes_compiler::{AssembledProgram, Assembler, AssemblyResult, Config};
use tempfile::TempDir;

/// A temporary directory holding one assembly source file and the output
/// paths an assembled program would be written to.
pub struct TestFixture {
	pub temp_dir: TempDir,
	pub input_path: PathBuf,
	pub output_path: PathBuf,
}

impl TestFixture {
	/// Write `asm_content` to a fresh `game.s` inside a new temp directory.
	pub fn new(asm_content: &str) -> Self {
		let temp_dir = TempDir::new().expect("failed to create temp directory");
		let input_path = temp_dir.path().join("game.s");
		std::fs::File::create(&input_path).unwrap().write_all(asm_content.as_bytes()).unwrap();
		let output_path = temp_dir.path().join("game.nes");
		Self {
			temp_dir,
			input_path,
			output_path,
		}
	}

	pub fn input_path(&self) -> &Path {
		&self.input_path
	}

	/// Assemble this fixture's source with a default (horizontal-mirroring,
	/// no defines, no runtime imports) configuration.
	pub fn assemble(&self) -> AssemblyResult<AssembledProgram> {
		let config = Config::new(vec![self.input_path.clone()], self.output_path.clone()).build();
		Assembler::new(config).assemble()
	}

	/// Assemble and link into a complete iNES ROM image.
	pub fn assemble_and_link(&self) -> AssemblyResult<Vec<u8>> {
		let program = self.assemble()?;
		nes_compiler::output::link(&program, Mirroring::Horizontal)
	}
}

/// Assembly source snippets reused across multiple integration tests. Every
/// snippet uses the fixed `STARTUP`/`CODE`/`RODATA`/`VECTORS` segment names
/// this assembler recognizes, and ends with a full six-byte vector table.
pub struct TestSnippets;

impl TestSnippets {
	/// Minimal valid program: a reset handler that spins forever, and the
	/// full set of IRQ/NMI/reset vectors.
	pub fn minimal_program() -> &'static str {
		"\
.segment \"STARTUP\"
reset:  sei
        cld
        ldx #$ff
        txs
loop:   jmp loop

.segment \"VECTORS\"
        .word reset
        .word reset
        .word reset
"
	}

	/// A handful of instructions covering different addressing modes.
	pub fn basic_instructions() -> &'static str {
		"\
.segment \"STARTUP\"
start:  lda #$42
        sta $00
        lda $00,x
        sta $0200
        lda $0200,x
        lda $0200,y
        rts

.segment \"VECTORS\"
        .word start
        .word start
        .word start
"
	}

	/// Forward and backward label references, local labels, and a branch.
	pub fn with_labels() -> &'static str {
		"\
.segment \"STARTUP\"
start:
@loop:  lda #$00
        cmp #$42
        beq done
        dex
        bne @loop
done:   rts

.segment \"VECTORS\"
        .word start
        .word start
        .word start
"
	}

	/// Data directives across `RODATA` and `BSS`.
	pub fn with_data() -> &'static str {
		"\
.segment \"BSS\"
counter: .res 1

.segment \"RODATA\"
message: .byte \"HELLO\", 0
numbers: .byte $01, $02, $03, $04, $05

.segment \"STARTUP\"
start:  lda message
        rts

.segment \"VECTORS\"
        .word start
        .word start
        .word start
"
	}

	/// Constants and expression folding.
	pub fn with_expressions() -> &'static str {
		"\
SCREEN_WIDTH = 32
OFFSET = 16

.segment \"STARTUP\"
start:  lda #<(SCREEN_WIDTH + OFFSET)
        sta $00
        lda #>(SCREEN_WIDTH + OFFSET)
        sta $01
        rts

.segment \"VECTORS\"
        .word start
        .word start
        .word start
"
	}

	/// A program referencing an undefined symbol, for error-path tests.
	pub fn undefined_symbol() -> &'static str {
		"\
.segment \"STARTUP\"
start:  lda undefined_symbol
        rts
"
	}
}

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use nes_compiler::config::Mirroring;
use nes_compiler::{Assembler, Config};

use crate::err::Error;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(super) enum MirroringArg {
	Horizontal,
	Vertical,
}

impl From<MirroringArg> for Mirroring {
	fn from(value: MirroringArg) -> Self {
		match value {
			MirroringArg::Horizontal => Mirroring::Horizontal,
			MirroringArg::Vertical => Mirroring::Vertical,
		}
	}
}

#[derive(Args, Debug)]
pub(super) struct AssembleCommandArguments {
	#[arg(value_name = "INPUT", required = true, help = "assembly source files, assembled in order")]
	inputs: Vec<PathBuf>,

	#[arg(short, long, value_name = "FILE", help = "output ROM path")]
	output: PathBuf,

	#[arg(long = "define", value_name = "NAME=VALUE", help = "NAME=VALUE or bare NAME, repeatable")]
	defines: Vec<String>,

	#[arg(long, value_enum, default_value = "horizontal", help = "cartridge nametable mirroring")]
	mirroring: MirroringArg,

	#[arg(long, value_name = "FILE", help = "runtime-library import map")]
	runtime_config: Option<PathBuf>,

	#[arg(long, help = "write the raw 32 KiB PRG + 8 KiB CHR image, no iNES header")]
	raw: bool,

	#[arg(long, help = "also write a symbol-dump file (<output>.sym)")]
	dump_symbols: bool,

	#[arg(long, help = "also write a listing file (<output>.lst)")]
	dump_listing: bool,
}

pub(super) async fn exec(args: AssembleCommandArguments) -> Result<(), Error> {
	let mirroring: Mirroring = args.mirroring.into();
	let mut builder = Config::new(args.inputs.clone(), args.output.clone()).with_mirroring(mirroring);
	for define in &args.defines {
		builder = builder.with_define(define)?;
	}
	if let Some(path) = &args.runtime_config {
		builder = builder.with_runtime_config(path)?;
	}
	let config = builder.build();

	let program = Assembler::new(config).assemble()?;

	let rom = if args.raw { nes_compiler::output::raw_image(&program)? } else { nes_compiler::output::link(&program, mirroring)? };
	std::fs::write(&args.output, &rom)?;
	info!(bytes = rom.len(), path = %args.output.display(), "wrote ROM");

	if args.dump_symbols {
		let symbols_path = args.output.with_extension("sym");
		std::fs::write(&symbols_path, nes_compiler::output::dump_symbols(&program)?)?;
		info!(path = %symbols_path.display(), "wrote symbol dump");
	}
	if args.dump_listing {
		let listing_path = args.output.with_extension("lst");
		std::fs::write(&listing_path, nes_compiler::output::render_listing(&program)?)?;
		info!(path = %listing_path.display(), "wrote listing");
	}

	Ok(())
}

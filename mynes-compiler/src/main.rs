//! `nesasm`: the assembler/linker command-line front end.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nes_compiler::config::Mirroring;
use nes_compiler::{Assembler, Config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nesasm", version = nes_compiler::VERSION, about = "A two-pass 6502 assembler and NES ROM linker")]
struct Cli {
	/// Assembly source files, assembled in order into one ROM.
	#[arg(value_name = "INPUT", required = true)]
	inputs: Vec<PathBuf>,

	/// Output ROM path.
	#[arg(short, long, value_name = "FILE")]
	output: PathBuf,

	/// `NAME=VALUE` or bare `NAME` (defaults to 1), repeatable.
	#[arg(long = "define", value_name = "NAME=VALUE")]
	defines: Vec<String>,

	/// Cartridge nametable mirroring.
	#[arg(long, value_enum, default_value = "horizontal")]
	mirroring: MirroringArg,

	/// TOML/JSON file declaring the runtime-library import map.
	#[arg(long, value_name = "FILE")]
	runtime_config: Option<PathBuf>,

	/// Write the raw 32 KiB PRG + 8 KiB CHR image, no iNES header.
	#[arg(long)]
	raw: bool,

	/// Also write a symbol-dump file (`<output>.sym`) alongside the ROM.
	#[arg(long)]
	dump_symbols: bool,

	/// Also write a listing file (`<output>.lst`) alongside the ROM.
	#[arg(long)]
	dump_listing: bool,

	/// Increase log verbosity (repeatable: -v, -vv, -vvv).
	#[arg(short, action = clap::ArgAction::Count)]
	verbose: u8,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum MirroringArg {
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

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(&cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			tracing::error!("{err}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: u8) {
	let default_level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))).init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
	let mut builder = Config::new(cli.inputs.clone(), cli.output.clone()).with_mirroring(cli.mirroring.into());
	for define in &cli.defines {
		builder = builder.with_define(define)?;
	}
	if let Some(path) = &cli.runtime_config {
		builder = builder.with_runtime_config(path)?;
	}
	let config = builder.build();

	let program = Assembler::new(config).assemble()?;
	let mirroring: Mirroring = cli.mirroring.into();

	let rom = if cli.raw { nes_compiler::output::raw_image(&program)? } else { nes_compiler::output::link(&program, mirroring)? };
	std::fs::write(&cli.output, &rom)?;
	tracing::info!(bytes = rom.len(), path = %cli.output.display(), "wrote ROM");

	if cli.dump_symbols {
		let symbols_path = cli.output.with_extension("sym");
		std::fs::write(&symbols_path, nes_compiler::output::dump_symbols(&program)?)?;
		tracing::info!(path = %symbols_path.display(), "wrote symbol dump");
	}
	if cli.dump_listing {
		let listing_path = cli.output.with_extension("lst");
		std::fs::write(&listing_path, nes_compiler::output::render_listing(&program)?)?;
		tracing::info!(path = %listing_path.display(), "wrote listing");
	}

	Ok(())
}

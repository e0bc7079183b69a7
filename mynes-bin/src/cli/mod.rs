mod assemble;
mod dump;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mynes_common::{cst::LOGO, env};

use crate::logging::{Custom, CustomEnvFilterParser};

const INFO: &str = r"
MyNES toolkit command-line interface
";

#[derive(Parser, Debug)]
#[command(name = "MyNES command-line interface", bin_name = "mynes-cli")]
#[command(author, version, about = INFO, before_help = LOGO)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[arg(help = "The logging level")]
	#[arg(env = "MYNES_LOG", short = 'l', long = "log")]
	#[arg(default_value = "info")]
	#[arg(value_parser = CustomEnvFilterParser::new())]
	#[arg(global = true)]
	log: Custom,

	#[command(subcommand)]
	command: Option<Commands>,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Subcommand)]
enum Commands {
	#[command(about = "Assemble and link source files into an NES ROM")]
	Assemble(assemble::AssembleCommandArguments),
	#[command(about = "Dump chr/rom data for inspection")]
	Dump(dump::DumpCommandArguments),
}

pub(crate) fn prepare(log: Custom) -> Option<tracing_appender::non_blocking::WorkerGuard> {
	crate::logging::builder()
		.with_filter(log)
		.with_file_appender(std::path::PathBuf::from(".logs"))
		.build()
}

pub async fn init() -> ExitCode {
	env::init();

	let args = Cli::parse();
	let _guard = prepare(args.log);

	let output = match args.command {
		Some(Commands::Assemble(args)) => assemble::exec(args).await,
		Some(Commands::Dump(args)) => dump::init(args).await,
		None => Ok(()),
	};

	if let Err(e) = output {
		error!("{}", e);
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}

//! Assembler configuration: the fixed set of knobs this system actually
//! exposes — input files, output path, command-line `.define`s, the
//! cartridge's mirroring flag, and the runtime-library import map consumed
//! by linking and by the runtime-call codegen adapter (§4.6).
//!
//! There is no multi-platform target, no configurable pass count, and no
//! per-feature optimization switches: this assembler always runs exactly
//! two passes against one fixed NES layout (§4.5).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AssemblyError, AssemblyResult, SourcePos};
use crate::symbols::{ImportMap, ImportSignature};

/// Cartridge nametable mirroring. Only the two wired modes a fixed single-mapper
/// board can select between; four-screen mirroring needs extra VRAM this
/// toolkit's target hardware doesn't have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mirroring {
	Horizontal,
	Vertical,
}

impl Mirroring {
	/// Map to the shared ROM-header crate's richer enum (which also models
	/// four-screen mirroring for reading arbitrary ROMs back).
	pub fn to_rom_header(self) -> mynes_rom::Mirroring {
		match self {
			Self::Horizontal => mynes_rom::Mirroring::Horizontal,
			Self::Vertical => mynes_rom::Mirroring::Vertical,
		}
	}
}

/// One entry in a runtime-config file: a runtime-library method's declared
/// signature, by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportEntry {
	/// Absolute PRG entry address.
	pub address: u16,
	/// Declared parameter count.
	pub arg_count: usize,
	/// Whether the call leaves a return value for the caller.
	#[serde(default)]
	pub returns_value: bool,
}

/// On-disk shape of a `--runtime-config` file: a flat table of import names
/// to their signatures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfigFile {
	#[serde(default)]
	pub imports: HashMap<String, ImportEntry>,
}

/// Assembler configuration, built once per invocation from CLI flags and an
/// optional runtime-config file.
#[derive(Debug, Clone)]
pub struct Config {
	/// Source files, assembled in order into a single merged symbol table
	/// and memory model.
	pub inputs: Vec<PathBuf>,
	/// Output ROM path.
	pub output: PathBuf,
	/// `--define NAME=VALUE` symbols, visible to every input file as
	/// already-resolved constants.
	pub defines: HashMap<String, i32>,
	/// Cartridge mirroring flag, written into the iNES header.
	pub mirroring: Mirroring,
	/// Runtime-library import map, consulted by `.import` resolution and the
	/// runtime-call codegen adapter.
	pub imports: ImportMap,
}

impl Config {
	/// Start building a configuration for the given inputs and output path.
	pub fn new(inputs: Vec<PathBuf>, output: PathBuf) -> ConfigBuilder {
		ConfigBuilder {
			inputs,
			output,
			defines: HashMap::new(),
			mirroring: Mirroring::Horizontal,
			imports: ImportMap::new(),
		}
	}

	/// Every input file must exist and be readable, and the define map must
	/// not shadow a reserved name.
	pub fn validate(&self) -> AssemblyResult<()> {
		if self.inputs.is_empty() {
			return Err(AssemblyError::Syntax {
				pos: SourcePos::file_only(PathBuf::from("<config>")),
				message: "no input files given".to_string(),
			});
		}
		for input in &self.inputs {
			if !input.exists() {
				return Err(AssemblyError::Io {
					pos: Some(SourcePos::file_only(input.clone())),
					source: std::io::Error::new(std::io::ErrorKind::NotFound, "input file not found"),
				});
			}
		}
		Ok(())
	}
}

/// Incrementally assembled [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
	inputs: Vec<PathBuf>,
	output: PathBuf,
	defines: HashMap<String, i32>,
	mirroring: Mirroring,
	imports: ImportMap,
}

impl ConfigBuilder {
	/// Add a single `NAME=VALUE` or bare `NAME` (defaults to `1`) define,
	/// parsed the same way `.define` would evaluate a closed expression.
	pub fn with_define(mut self, raw: &str) -> AssemblyResult<Self> {
		let (name, value) = parse_define(raw)?;
		self.defines.insert(name, value);
		Ok(self)
	}

	/// Set the cartridge mirroring flag.
	pub fn with_mirroring(mut self, mirroring: Mirroring) -> Self {
		self.mirroring = mirroring;
		self
	}

	/// Merge a runtime-config file's import declarations into this build.
	pub fn with_runtime_config(mut self, path: &Path) -> AssemblyResult<Self> {
		let text = std::fs::read_to_string(path).map_err(|source| AssemblyError::Io {
			pos: Some(SourcePos::file_only(path.to_path_buf())),
			source,
		})?;
		let parsed: RuntimeConfigFile = toml::from_str(&text).map_err(|err| AssemblyError::Syntax {
			pos: SourcePos::file_only(path.to_path_buf()),
			message: format!("invalid runtime-config file: {err}"),
		})?;
		for (name, entry) in parsed.imports {
			self.imports.insert(name, ImportSignature::new(entry.address, entry.arg_count, entry.returns_value));
		}
		Ok(self)
	}

	/// Finish building the configuration.
	pub fn build(self) -> Config {
		Config {
			inputs: self.inputs,
			output: self.output,
			defines: self.defines,
			mirroring: self.mirroring,
			imports: self.imports,
		}
	}
}

/// Parse a `--define` command-line argument. `NAME` alone defines `1`;
/// `NAME=value` evaluates `value` as a closed numeric literal (hex `$..`,
/// binary `%..`, or decimal) — the same literal grammar the expression
/// evaluator accepts, but with no symbol references since no symbol table
/// exists yet at configuration time.
fn parse_define(raw: &str) -> AssemblyResult<(String, i32)> {
	let pos = SourcePos::file_only(PathBuf::from("<command line>"));
	let mut parts = raw.splitn(2, '=');
	let name = parts.next().unwrap_or_default().trim().to_string();
	if name.is_empty() {
		return Err(AssemblyError::Syntax {
			pos,
			message: format!("invalid --define '{raw}': missing name"),
		});
	}
	let value = match parts.next() {
		None => 1,
		Some(expr) => {
			let lookup = |_: &str| None;
			crate::parsing::expressions::try_eval(expr.trim(), &lookup, &pos)?.ok_or_else(|| AssemblyError::Syntax {
				pos: pos.clone(),
				message: format!("--define '{raw}' is not a closed expression"),
			})?
		}
	};
	Ok((name, value))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_bare_define_as_one() {
		assert_eq!(parse_define("DEBUG").unwrap(), ("DEBUG".to_string(), 1));
	}

	#[test]
	fn parses_define_with_hex_value() {
		assert_eq!(parse_define("BASE=$8000").unwrap(), ("BASE".to_string(), 0x8000));
	}

	#[test]
	fn rejects_empty_name() {
		assert!(parse_define("=1").is_err());
	}

	#[test]
	fn builder_produces_expected_config() {
		let config = Config::new(vec![PathBuf::from("a.s")], PathBuf::from("out.nes"))
			.with_define("DEBUG=1")
			.unwrap()
			.with_mirroring(Mirroring::Vertical)
			.build();
		assert_eq!(config.defines.get("DEBUG"), Some(&1));
		assert_eq!(config.mirroring, Mirroring::Vertical);
	}
}

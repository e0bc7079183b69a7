//! # mynes-compiler
//!
//! A two-pass ca65-compatible 6502 assembler and NES ROM linker. Consumes
//! hand-written assembly source (CHR data and supplemental routines) plus
//! code generated for runtime-library calls from an external bytecode
//! decoder, and produces a valid iNES ROM image.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use nes_compiler::{Assembler, Config};
//! use std::path::PathBuf;
//!
//! let config = Config::new(vec![PathBuf::from("game.s")], PathBuf::from("game.nes")).build();
//! let assembler = Assembler::new(config);
//! let program = assembler.assemble().expect("assembly failed");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod core;
pub mod error;
pub mod instructions;
pub mod output;
pub mod parsing;
pub mod runtime_calls;
pub mod symbols;

pub use crate::config::{Config, ConfigBuilder, Mirroring};
pub use crate::core::assembler::{AssembledProgram, Assembler};
pub use crate::core::memory::{Block, MemoryModel, SegmentKind};
pub use crate::error::{AssemblyError, AssemblyResult};
pub use crate::instructions::{AddressingMode, Mnemonic, Operand};
pub use crate::runtime_calls::{DecoderEvent, RuntimeCallAdapter};
pub use crate::symbols::{ImportMap, ImportSignature, Symbol, SymbolKind, SymbolTable};

/// Library version, forwarded from the crate's own manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_version_string() {
		assert!(!VERSION.is_empty());
	}
}

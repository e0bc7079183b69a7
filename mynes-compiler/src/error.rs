//! Error handling for the NES assembler.
//!
//! This module provides the fatal error kinds the assembler and linker can
//! raise, each carrying a [`SourcePos`] so diagnostics point at the offending
//! source location, plus an [`ErrorCollector`] for accumulating the errors
//! raised while a single pass runs.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// A position in source code: file, 1-based line, 1-based column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePos {
	/// File path, or a synthetic name for non-file origins (e.g. a bytecode method).
	pub file: PathBuf,
	/// Line number (1-based).
	pub line: usize,
	/// Column number (1-based).
	pub column: usize,
}

impl SourcePos {
	/// Create a new source position.
	pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
		Self {
			file,
			line,
			column,
		}
	}

	/// Create a source position naming only a file, pointing at line 1.
	pub fn file_only(file: PathBuf) -> Self {
		Self {
			file,
			line: 1,
			column: 1,
		}
	}

	/// Create a synthetic source position for a runtime-library method event,
	/// used by the codegen adapter which has no textual source lines.
	pub fn method(name: &str, event_index: usize) -> Self {
		Self {
			file: PathBuf::from(format!("<bytecode:{name}>")),
			line: event_index,
			column: 1,
		}
	}
}

impl fmt::Display for SourcePos {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
	}
}

/// The nine fatal error kinds this system's assembler/linker can raise, plus
/// the I/O and internal-invariant plumbing every real tool needs.
#[derive(Error, Debug)]
pub enum AssemblyError {
	/// Malformed directive, unterminated string, invalid numeric literal, or
	/// invalid addressing-mode operand syntax.
	#[error("syntax error at {pos}: {message}")]
	Syntax {
		pos: SourcePos,
		message: String,
	},

	/// Instruction mnemonic absent from the opcode table.
	#[error("unknown mnemonic '{mnemonic}' at {pos}")]
	UnknownMnemonic {
		pos: SourcePos,
		mnemonic: String,
	},

	/// `(mnemonic, mode)` combination is not present in the opcode table and
	/// no zero-page fallback applies.
	#[error("invalid addressing mode for '{mnemonic}' at {pos}: {message}")]
	InvalidMode {
		pos: SourcePos,
		mnemonic: String,
		message: String,
	},

	/// A relocation's symbol was not found at link time.
	#[error("unresolved symbol '{symbol}' at {pos}")]
	UnresolvedSymbol {
		pos: SourcePos,
		symbol: String,
	},

	/// A `Relative` instruction's displacement falls outside `[-128, 127]`.
	#[error("branch out of range at {pos}: displacement {displacement} to '{target}' exceeds [-128, 127]")]
	BranchOutOfRange {
		pos: SourcePos,
		target: String,
		displacement: i32,
	},

	/// The same name was bound twice with different values.
	#[error("duplicate symbol '{symbol}' at {pos} (previously defined at {previous_pos})")]
	DuplicateSymbol {
		pos: SourcePos,
		symbol: String,
		previous_pos: SourcePos,
	},

	/// Division by zero during expression evaluation.
	#[error("division by zero at {pos}")]
	DivisionByZero {
		pos: SourcePos,
	},

	/// PRG or CHR block accumulation exceeds the fixed region size.
	#[error("ROM overflow in {region}: {used} bytes used, {limit} bytes available")]
	RomOverflow {
		region: String,
		used: usize,
		limit: usize,
	},

	/// Sum of block sizes in pass 2 differs from the pass-1 estimate.
	#[error("layout inconsistency in block '{block}' at {pos}: pass 1 estimated {estimated} bytes, pass 2 emitted {actual}")]
	LayoutInconsistency {
		pos: SourcePos,
		block: String,
		estimated: usize,
		actual: usize,
	},

	/// I/O failure reading source or writing the ROM.
	#[error("I/O error{}: {source}", pos.as_ref().map(|p| format!(" at {p}")).unwrap_or_default())]
	Io {
		pos: Option<SourcePos>,
		#[source]
		source: std::io::Error,
	},

	/// An internal invariant was violated; indicates a bug in the assembler
	/// itself rather than bad input.
	#[error("internal error: {0}")]
	Internal(String),

	/// Several errors collected from a single pass, reported together.
	#[error("{} errors:\n{}", .0.len(), .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
	Multiple(Vec<AssemblyError>),
}

impl Clone for AssemblyError {
	fn clone(&self) -> Self {
		match self {
			Self::Syntax { pos, message } => Self::Syntax {
				pos: pos.clone(),
				message: message.clone(),
			},
			Self::UnknownMnemonic { pos, mnemonic } => Self::UnknownMnemonic {
				pos: pos.clone(),
				mnemonic: mnemonic.clone(),
			},
			Self::InvalidMode { pos, mnemonic, message } => Self::InvalidMode {
				pos: pos.clone(),
				mnemonic: mnemonic.clone(),
				message: message.clone(),
			},
			Self::UnresolvedSymbol { pos, symbol } => Self::UnresolvedSymbol {
				pos: pos.clone(),
				symbol: symbol.clone(),
			},
			Self::BranchOutOfRange { pos, target, displacement } => Self::BranchOutOfRange {
				pos: pos.clone(),
				target: target.clone(),
				displacement: *displacement,
			},
			Self::DuplicateSymbol { pos, symbol, previous_pos } => Self::DuplicateSymbol {
				pos: pos.clone(),
				symbol: symbol.clone(),
				previous_pos: previous_pos.clone(),
			},
			Self::DivisionByZero { pos } => Self::DivisionByZero { pos: pos.clone() },
			Self::RomOverflow { region, used, limit } => Self::RomOverflow {
				region: region.clone(),
				used: *used,
				limit: *limit,
			},
			Self::LayoutInconsistency { pos, block, estimated, actual } => Self::LayoutInconsistency {
				pos: pos.clone(),
				block: block.clone(),
				estimated: *estimated,
				actual: *actual,
			},
			Self::Io { pos, source } => Self::Io {
				pos: pos.clone(),
				source: std::io::Error::new(source.kind(), source.to_string()),
			},
			Self::Internal(message) => Self::Internal(message.clone()),
			Self::Multiple(errors) => Self::Multiple(errors.clone()),
		}
	}
}

impl From<std::io::Error> for AssemblyError {
	fn from(source: std::io::Error) -> Self {
		Self::Io { pos: None, source }
	}
}

impl From<ParseIntError> for AssemblyError {
	fn from(err: ParseIntError) -> Self {
		Self::Syntax {
			pos: SourcePos::file_only(PathBuf::from("<number>")),
			message: format!("invalid integer literal: {err}"),
		}
	}
}

impl From<ParseFloatError> for AssemblyError {
	fn from(err: ParseFloatError) -> Self {
		Self::Syntax {
			pos: SourcePos::file_only(PathBuf::from("<number>")),
			message: format!("invalid numeric literal: {err}"),
		}
	}
}

impl AssemblyError {
	/// The source position this error points at, if any (`Multiple` and
	/// sourceless `Io` carry none).
	pub fn pos(&self) -> Option<&SourcePos> {
		match self {
			Self::Syntax { pos, .. }
			| Self::UnknownMnemonic { pos, .. }
			| Self::InvalidMode { pos, .. }
			| Self::UnresolvedSymbol { pos, .. }
			| Self::BranchOutOfRange { pos, .. }
			| Self::DuplicateSymbol { pos, .. }
			| Self::DivisionByZero { pos }
			| Self::LayoutInconsistency { pos, .. } => Some(pos),
			Self::Io { pos, .. } => pos.as_ref(),
			Self::RomOverflow { .. } | Self::Internal(_) | Self::Multiple(_) => None,
		}
	}

	/// All errors are fatal to the current build per this system's error
	/// handling design; this exists for symmetry with callers that branch on
	/// severity (e.g. the CLI deciding whether to keep printing diagnostics).
	pub fn is_fatal(&self) -> bool {
		true
	}

	/// Combine a list of errors into a single reportable error, collapsing a
	/// single-element list to that element.
	pub fn multiple(mut errors: Vec<AssemblyError>) -> Self {
		if errors.len() == 1 {
			return errors.remove(0);
		}
		Self::Multiple(errors)
	}
}

/// Accumulates errors raised while a pass runs so a build can report several
/// problems instead of aborting at the first one.
#[derive(Debug, Default)]
pub struct ErrorCollector {
	errors: Vec<AssemblyError>,
}

impl ErrorCollector {
	/// Create an empty collector.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record an error.
	pub fn push(&mut self, error: AssemblyError) {
		tracing::error!(%error, "assembly error recorded");
		self.errors.push(error);
	}

	/// True if no errors were recorded.
	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	/// Number of errors recorded.
	pub fn len(&self) -> usize {
		self.errors.len()
	}

	/// Borrow the recorded errors.
	pub fn errors(&self) -> &[AssemblyError] {
		&self.errors
	}

	/// Turn the collected errors into a `Result`: `Ok(())` if empty, otherwise
	/// `Err` of a single combined error.
	pub fn into_result(self) -> AssemblyResult<()> {
		if self.errors.is_empty() {
			Ok(())
		} else {
			Err(AssemblyError::multiple(self.errors))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn source_pos_display() {
		let pos = SourcePos::new(PathBuf::from("main.s"), 3, 5);
		assert_eq!(pos.to_string(), "main.s:3:5");
	}

	#[test]
	fn collector_combines_multiple_errors() {
		let mut collector = ErrorCollector::new();
		collector.push(AssemblyError::UnknownMnemonic {
			pos: SourcePos::file_only(PathBuf::from("a.s")),
			mnemonic: "FOO".into(),
		});
		collector.push(AssemblyError::DivisionByZero {
			pos: SourcePos::file_only(PathBuf::from("a.s")),
		});
		let err = collector.into_result().unwrap_err();
		match err {
			AssemblyError::Multiple(errors) => assert_eq!(errors.len(), 2),
			other => panic!("expected Multiple, got {other:?}"),
		}
	}

	#[test]
	fn single_error_collapses() {
		let mut collector = ErrorCollector::new();
		collector.push(AssemblyError::DivisionByZero {
			pos: SourcePos::file_only(PathBuf::from("a.s")),
		});
		let err = collector.into_result().unwrap_err();
		assert!(matches!(err, AssemblyError::DivisionByZero { .. }));
	}

	#[test]
	fn clone_preserves_io_message() {
		let err = AssemblyError::Io {
			pos: None,
			source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
		};
		let cloned = err.clone();
		assert_eq!(err.to_string(), cloned.to_string());
	}
}

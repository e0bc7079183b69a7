//! Instruction validation against the opcode table.
//!
//! The opcode table built in [`super::opcodes`] is this system's single
//! source of truth for which `(mnemonic, mode)` combinations exist — pass-1
//! size estimation and pass-2 emission both consult it, so validation here
//! does the same rather than duplicating a second, parallel set of rules.

use crate::error::{AssemblyError, AssemblyResult, SourcePos};
use crate::instructions::addressing::AddressingMode;
use crate::instructions::opcodes::{Mnemonic, get_instruction};

/// Validate that `mnemonic` exists and supports `addressing_mode`.
pub fn validate_instruction(mnemonic: Mnemonic, addressing_mode: AddressingMode, pos: &SourcePos) -> AssemblyResult<()> {
	let instruction = get_instruction(mnemonic).ok_or_else(|| AssemblyError::UnknownMnemonic {
		pos: pos.clone(),
		mnemonic: mnemonic.to_string(),
	})?;

	if !instruction.supports_addressing_mode(addressing_mode) {
		return Err(AssemblyError::InvalidMode {
			pos: pos.clone(),
			mnemonic: mnemonic.to_string(),
			message: format!("{addressing_mode} addressing is not supported"),
		});
	}

	Ok(())
}

/// True if `mnemonic` has a zero-page encoding, used by pass-1 size
/// estimation and pass-2 zero-page folding.
pub fn supports_zero_page(mnemonic: Mnemonic) -> bool {
	supports_mode(mnemonic, AddressingMode::ZeroPage)
}

/// True if `mnemonic` has an encoding for `mode` at all, without raising an
/// error — used to decide between a zero-page and absolute fallback.
pub fn supports_mode(mnemonic: Mnemonic, mode: AddressingMode) -> bool {
	get_instruction(mnemonic).is_some_and(|instr| instr.supports_addressing_mode(mode))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn pos() -> SourcePos {
		SourcePos::new(PathBuf::from("test.s"), 1, 1)
	}

	#[test]
	fn known_combination_is_valid() {
		assert!(validate_instruction(Mnemonic::Lda, AddressingMode::Immediate, &pos()).is_ok());
	}

	#[test]
	fn unknown_mnemonic_errors() {
		// Mnemonic::Lda always exists; this test instead checks that an
		// unsupported mode on a real mnemonic reports InvalidMode.
		let err = validate_instruction(Mnemonic::Lda, AddressingMode::Relative, &pos()).unwrap_err();
		assert!(matches!(err, AssemblyError::InvalidMode { .. }));
	}

	#[test]
	fn lda_has_zero_page() {
		assert!(supports_zero_page(Mnemonic::Lda));
	}
}

//! Instruction encoding: turning a resolved (or partially resolved)
//! [`Operand`] into machine code bytes, plus the relocations needed for
//! anything that couldn't be folded yet.

use crate::error::{AssemblyError, AssemblyResult, SourcePos};
use crate::instructions::opcodes::{Mnemonic, get_opcode};
use crate::instructions::{Operand, OperandValue};

/// A relocation size, matching this system's data model exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationSize {
	/// Low 8 bits of a 16-bit value.
	ByteLow,
	/// High 8 bits of a 16-bit value.
	ByteHigh,
	/// Full 16-bit value, little-endian.
	Word,
}

/// A pending fixup: write the resolved value of `symbol` into `offset` (byte
/// offset into the emitted buffer this relocation belongs to).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRelocation {
	pub offset: usize,
	pub symbol: String,
	pub size: RelocationSize,
}

/// The bytes an instruction encodes to, plus any relocation needed because a
/// symbol could not be folded to a literal at encode time. `branch_target` is
/// set instead of a relocation for `Relative` operands, since displacement
/// depends on the instruction's own final address too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedInstruction {
	pub bytes: Vec<u8>,
	pub relocation: Option<PendingRelocation>,
	pub branch_target: Option<String>,
}

/// Encode one instruction, resolving its operand through `lookup` where
/// possible. Immediates of `#<sym`/`#>sym` form fold to a literal byte when
/// the symbol already resolves; otherwise a `byte_lo`/`byte_hi` relocation is
/// emitted in their place (§4.4). `Relative` operands are never folded here —
/// branch resolution is deferred to the linker.
pub fn encode_instruction(mnemonic: Mnemonic, operand: &Operand, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> AssemblyResult<EncodedInstruction> {
	let mode = operand.mode();
	let opcode_info = get_opcode(mnemonic, mode).ok_or_else(|| AssemblyError::InvalidMode {
		pos: pos.clone(),
		mnemonic: mnemonic.to_string(),
		message: format!("{mode} addressing is not valid for {mnemonic}"),
	})?;

	let mut bytes = vec![opcode_info.opcode];

	match operand {
		Operand::Implied | Operand::Accumulator => Ok(EncodedInstruction {
			bytes,
			relocation: None,
			branch_target: None,
		}),

		Operand::Relative(value) => {
			bytes.push(0);
			match value {
				OperandValue::Literal(v) => {
					mode.validate_operand(*v, pos)?;
					bytes[1] = *v as i8 as u8;
					Ok(EncodedInstruction {
						bytes,
						relocation: None,
						branch_target: None,
					})
				}
				OperandValue::Symbol(name) => Ok(EncodedInstruction {
					bytes,
					relocation: None,
					branch_target: Some(name.clone()),
				}),
			}
		}

		Operand::ImmediateLow(value) | Operand::ImmediateHigh(value) => {
			let is_low = matches!(operand, Operand::ImmediateLow(_));
			bytes.push(0);
			match value.resolve(lookup) {
				Some(v) => {
					bytes[1] = if is_low { (v & 0xFF) as u8 } else { ((v >> 8) & 0xFF) as u8 };
					Ok(EncodedInstruction {
						bytes,
						relocation: None,
						branch_target: None,
					})
				}
				None => {
					let symbol = value.symbol_name().expect("unresolved value must be symbolic").to_string();
					Ok(EncodedInstruction {
						bytes,
						relocation: Some(PendingRelocation {
							offset: 1,
							symbol,
							size: if is_low { RelocationSize::ByteLow } else { RelocationSize::ByteHigh },
						}),
						branch_target: None,
					})
				}
			}
		}

		Operand::Immediate(value) | Operand::ZeroPage(value) | Operand::ZeroPageX(value) | Operand::ZeroPageY(value) | Operand::IndexedIndirect(value) | Operand::IndirectIndexed(value) => {
			bytes.push(0);
			match value.resolve(lookup) {
				Some(v) => {
					mode.validate_operand(v, pos)?;
					bytes[1] = v as u8;
					Ok(EncodedInstruction {
						bytes,
						relocation: None,
						branch_target: None,
					})
				}
				None => {
					let symbol = value.symbol_name().expect("unresolved value must be symbolic").to_string();
					Ok(EncodedInstruction {
						bytes,
						relocation: Some(PendingRelocation {
							offset: 1,
							symbol,
							size: RelocationSize::ByteLow,
						}),
						branch_target: None,
					})
				}
			}
		}

		Operand::Absolute(value) | Operand::AbsoluteX(value) | Operand::AbsoluteY(value) | Operand::Indirect(value) => {
			bytes.extend_from_slice(&[0, 0]);
			match value.resolve(lookup) {
				Some(v) => {
					mode.validate_operand(v, pos)?;
					let word = v as u16;
					bytes[1..3].copy_from_slice(&word.to_le_bytes());
					Ok(EncodedInstruction {
						bytes,
						relocation: None,
						branch_target: None,
					})
				}
				None => {
					let symbol = value.symbol_name().expect("unresolved value must be symbolic").to_string();
					Ok(EncodedInstruction {
						bytes,
						relocation: Some(PendingRelocation {
							offset: 1,
							symbol,
							size: RelocationSize::Word,
						}),
						branch_target: None,
					})
				}
			}
		}
	}
}

/// Compute a branch displacement: `target - (pc + 2)`, erroring if it falls
/// outside `[-128, 127]`.
pub fn calculate_relative_offset(from_pc: u16, to: u16, target_name: &str, pos: &SourcePos) -> AssemblyResult<i8> {
	let next_pc = from_pc.wrapping_add(2);
	let offset = i32::from(to) - i32::from(next_pc);
	if !(-128..=127).contains(&offset) {
		return Err(AssemblyError::BranchOutOfRange {
			pos: pos.clone(),
			target: target_name.to_string(),
			displacement: offset,
		});
	}
	Ok(offset as i8)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn pos() -> SourcePos {
		SourcePos::new(PathBuf::from("test.s"), 1, 1)
	}

	fn no_lookup(_: &str) -> Option<i32> {
		None
	}

	#[test]
	fn encodes_implied() {
		let encoded = encode_instruction(Mnemonic::Rts, &Operand::Implied, &no_lookup, &pos()).unwrap();
		assert_eq!(encoded.bytes, vec![0x60]);
	}

	#[test]
	fn encodes_immediate_literal() {
		let encoded = encode_instruction(Mnemonic::Lda, &Operand::Immediate(OperandValue::Literal(0x42)), &no_lookup, &pos()).unwrap();
		assert_eq!(encoded.bytes, vec![0xA9, 0x42]);
		assert!(encoded.relocation.is_none());
	}

	#[test]
	fn encodes_absolute_literal_little_endian() {
		let encoded = encode_instruction(Mnemonic::Lda, &Operand::Absolute(OperandValue::Literal(0x1234)), &no_lookup, &pos()).unwrap();
		assert_eq!(encoded.bytes, vec![0xAD, 0x34, 0x12]);
	}

	#[test]
	fn immediate_low_folds_when_resolvable() {
		let lookup = |name: &str| if name == "target" { Some(0x1235) } else { None };
		let encoded = encode_instruction(Mnemonic::Lda, &Operand::ImmediateLow(OperandValue::Symbol("target".into())), &lookup, &pos()).unwrap();
		assert_eq!(encoded.bytes, vec![0xA9, 0x35]);
		assert!(encoded.relocation.is_none());
	}

	#[test]
	fn immediate_high_defers_to_relocation_when_unresolved() {
		let encoded = encode_instruction(Mnemonic::Lda, &Operand::ImmediateHigh(OperandValue::Symbol("target".into())), &no_lookup, &pos()).unwrap();
		assert_eq!(encoded.bytes, vec![0xA9, 0x00]);
		let reloc = encoded.relocation.unwrap();
		assert_eq!(reloc.symbol, "target");
		assert_eq!(reloc.size, RelocationSize::ByteHigh);
	}

	#[test]
	fn relative_defers_to_branch_target_when_symbolic() {
		let encoded = encode_instruction(Mnemonic::Bne, &Operand::Relative(OperandValue::Symbol("loop".into())), &no_lookup, &pos()).unwrap();
		assert_eq!(encoded.bytes, vec![0xD0, 0x00]);
		assert_eq!(encoded.branch_target.as_deref(), Some("loop"));
	}

	#[test]
	fn invalid_mode_combination_errors() {
		let err = encode_instruction(Mnemonic::Lda, &Operand::Relative(OperandValue::Literal(0)), &no_lookup, &pos()).unwrap_err();
		assert!(matches!(err, AssemblyError::InvalidMode { .. }));
	}

	#[test]
	fn branch_range_forward_and_backward() {
		assert_eq!(calculate_relative_offset(0x8000, 0x8010, "x", &pos()).unwrap(), 14);
		assert_eq!(calculate_relative_offset(0x8010, 0x8000, "x", &pos()).unwrap(), -18);
	}

	#[test]
	fn branch_range_out_of_bounds_errors() {
		let err = calculate_relative_offset(0x8000, 0x8200, "x", &pos()).unwrap_err();
		assert!(matches!(err, AssemblyError::BranchOutOfRange { .. }));
	}
}

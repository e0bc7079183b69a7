//! Runtime-call codegen adapter (§4.6).
//!
//! The external bytecode decoder presents an event stream describing a
//! user method body: push a constant, push a string address, call a
//! runtime-library method, return. This adapter turns that stream into a
//! single `STARTUP` code [`Block`], reusing the same instruction encoder
//! and relocation model the two-pass assembler itself uses (`JSR abs`
//! against an imported symbol is just another word relocation, resolved by
//! the linker exactly like a local label) so the linker needs no separate
//! fixup path for runtime calls.

use crate::core::memory::{Block, SegmentKind};
use crate::error::{AssemblyError, AssemblyResult, SourcePos};
use crate::instructions::encoding::encode_instruction;
use crate::instructions::opcodes::Mnemonic;
use crate::instructions::{Operand, OperandValue};
use crate::symbols::ImportMap;

/// First argument of a call always goes through the accumulator (and `X`
/// too, for a 16-bit value). Every argument after that lands in a pair of
/// fixed zero-page cells, two apart so a 16-bit value's low and high byte
/// are adjacent; a byte argument only uses the low cell of its pair.
const ARG_ZP_BASE: u8 = 0x10;

fn arg_zp_slot(index: usize) -> (u8, u8) {
	let lo = ARG_ZP_BASE + (index as u8) * 2;
	(lo, lo + 1)
}

/// One event in the bytecode decoder's output stream for a single method
/// body. `LoadConstant*`/`LoadString` are argument-pushing events; `Call`
/// consumes every argument pushed since the last `Call`/`Return`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderEvent {
	/// Push an 8-bit constant as the next argument.
	LoadConstantByte(u8),
	/// Push a 16-bit constant as the next argument.
	LoadConstantWord(u16),
	/// Push the address of a string/byte-array label (declared elsewhere,
	/// typically in `RODATA`) as the next argument.
	LoadString(String),
	/// Call a runtime-library method by name.
	Call(String),
	/// End of this method body.
	Return,
}

/// Drives [`DecoderEvent`]s into a single code block. Construct one per
/// method body, feed it every event in order, then take the finished
/// [`Block`].
#[derive(Debug)]
pub struct RuntimeCallAdapter {
	imports: ImportMap,
	method_name: String,
	event_index: usize,
	pending_args: usize,
	block: Block,
}

impl RuntimeCallAdapter {
	/// Start a new adapter for the method named `method_name`, targeting the
	/// given runtime-library import map.
	pub fn new(method_name: impl Into<String>, imports: ImportMap) -> Self {
		Self {
			imports,
			method_name: method_name.into(),
			event_index: 0,
			pending_args: 0,
			block: Block::new(SegmentKind::Startup),
		}
	}

	/// Feed one event from the decoder's stream.
	pub fn process(&mut self, event: DecoderEvent) -> AssemblyResult<()> {
		self.event_index += 1;
		let pos = SourcePos::method(&self.method_name, self.event_index);
		match event {
			DecoderEvent::LoadConstantByte(value) => self.push_byte_arg(OperandValue::Literal(i32::from(value)), &pos),
			DecoderEvent::LoadConstantWord(value) => {
				let lo = OperandValue::Literal(i32::from(value & 0xFF));
				let hi = OperandValue::Literal(i32::from(value >> 8));
				self.push_word_arg(lo, hi, &pos)
			}
			DecoderEvent::LoadString(label) => {
				let lo = OperandValue::Symbol(label.clone());
				let hi = OperandValue::Symbol(label);
				self.push_word_arg(lo, hi, &pos)
			}
			DecoderEvent::Call(name) => self.emit_call(&name, &pos),
			DecoderEvent::Return => self.emit_return(&pos),
		}
	}

	/// Finish this method body, returning the finished code block.
	pub fn finish(self) -> Block {
		self.block
	}

	fn no_lookup() -> impl Fn(&str) -> Option<i32> {
		|_: &str| None
	}

	fn push_byte_arg(&mut self, value: OperandValue, pos: &SourcePos) -> AssemblyResult<()> {
		let index = self.pending_args;
		let lookup = Self::no_lookup();
		if index == 0 {
			let encoded = encode_instruction(Mnemonic::Lda, &Operand::Immediate(value), &lookup, pos)?;
			self.block.push_encoded(encoded);
		} else {
			let (lo_slot, _) = arg_zp_slot(index - 1);
			let load = encode_instruction(Mnemonic::Lda, &Operand::Immediate(value), &lookup, pos)?;
			self.block.push_encoded(load);
			let store = encode_instruction(Mnemonic::Sta, &Operand::ZeroPage(OperandValue::Literal(i32::from(lo_slot))), &lookup, pos)?;
			self.block.push_encoded(store);
		}
		self.pending_args += 1;
		Ok(())
	}

	/// `lo`/`hi` are already the low/high byte values to load (for a literal
	/// constant) or a symbol whose address relocation is split the same way
	/// `#<sym`/`#>sym` immediates are elsewhere in this assembler: a string
	/// argument's low/high byte become deferred relocations against the same
	/// label name, resolved once the linker knows where that label landed.
	fn push_word_arg(&mut self, lo: OperandValue, hi: OperandValue, pos: &SourcePos) -> AssemblyResult<()> {
		let index = self.pending_args;
		let lookup = Self::no_lookup();
		if index == 0 {
			let load_lo = encode_instruction(Mnemonic::Lda, &Operand::Immediate(lo), &lookup, pos)?;
			self.block.push_encoded(load_lo);
			let load_hi = encode_instruction(Mnemonic::Ldx, &Operand::Immediate(hi), &lookup, pos)?;
			self.block.push_encoded(load_hi);
		} else {
			let (lo_slot, hi_slot) = arg_zp_slot(index - 1);
			let load_lo = encode_instruction(Mnemonic::Lda, &Operand::Immediate(lo), &lookup, pos)?;
			self.block.push_encoded(load_lo);
			let store_lo = encode_instruction(Mnemonic::Sta, &Operand::ZeroPage(OperandValue::Literal(i32::from(lo_slot))), &lookup, pos)?;
			self.block.push_encoded(store_lo);
			let load_hi = encode_instruction(Mnemonic::Lda, &Operand::Immediate(hi), &lookup, pos)?;
			self.block.push_encoded(load_hi);
			let store_hi = encode_instruction(Mnemonic::Sta, &Operand::ZeroPage(OperandValue::Literal(i32::from(hi_slot))), &lookup, pos)?;
			self.block.push_encoded(store_hi);
		}
		self.pending_args += 1;
		Ok(())
	}

	fn emit_call(&mut self, name: &str, pos: &SourcePos) -> AssemblyResult<()> {
		let signature = self.imports.get(name).ok_or_else(|| AssemblyError::UnresolvedSymbol {
			pos: pos.clone(),
			symbol: name.to_string(),
		})?;
		if signature.arg_count != self.pending_args {
			return Err(AssemblyError::Syntax {
				pos: pos.clone(),
				message: format!("call to '{name}' pushed {} argument(s), but it declares {}", self.pending_args, signature.arg_count),
			});
		}
		let lookup = Self::no_lookup();
		let encoded = encode_instruction(Mnemonic::Jsr, &Operand::Absolute(OperandValue::Symbol(name.to_string())), &lookup, pos)?;
		self.block.push_encoded(encoded);
		self.pending_args = 0;
		Ok(())
	}

	fn emit_return(&mut self, pos: &SourcePos) -> AssemblyResult<()> {
		let lookup = Self::no_lookup();
		let encoded = encode_instruction(Mnemonic::Rts, &Operand::Implied, &lookup, pos)?;
		self.block.push_encoded(encoded);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::symbols::ImportSignature;

	fn imports() -> ImportMap {
		let mut imports = ImportMap::new();
		imports.insert("print_byte", ImportSignature::new(0x8100, 1, false));
		imports.insert("print_string", ImportSignature::new(0x8120, 1, false));
		imports.insert("add", ImportSignature::new(0x8140, 2, true));
		imports
	}

	#[test]
	fn single_byte_argument_call_uses_accumulator_only() {
		let mut adapter = RuntimeCallAdapter::new("main", imports());
		adapter.process(DecoderEvent::LoadConstantByte(5)).unwrap();
		adapter.process(DecoderEvent::Call("print_byte".to_string())).unwrap();
		adapter.process(DecoderEvent::Return).unwrap();
		let block = adapter.finish();
		assert_eq!(block.bytes, vec![0xA9, 0x05, 0x20, 0x00, 0x00, 0x60]);
		assert_eq!(block.relocations.len(), 1);
		assert_eq!(block.relocations[0].symbol, "print_byte");
	}

	#[test]
	fn second_byte_argument_is_stored_to_zero_page() {
		let mut adapter = RuntimeCallAdapter::new("main", imports());
		adapter.process(DecoderEvent::LoadConstantByte(1)).unwrap();
		adapter.process(DecoderEvent::LoadConstantByte(2)).unwrap();
		adapter.process(DecoderEvent::Call("add".to_string())).unwrap();
		let block = adapter.finish();
		// LDA #1 ; LDA #2 ; STA $10 ; JSR add
		assert_eq!(block.bytes, vec![0xA9, 0x01, 0xA9, 0x02, 0x85, 0x10, 0x20, 0x00, 0x00]);
	}

	#[test]
	fn string_argument_defers_both_halves_to_relocation() {
		let mut adapter = RuntimeCallAdapter::new("main", imports());
		adapter.process(DecoderEvent::LoadString("greeting".to_string())).unwrap();
		adapter.process(DecoderEvent::Call("print_string".to_string())).unwrap();
		let block = adapter.finish();
		assert_eq!(block.bytes, vec![0xA9, 0x00, 0xA2, 0x00, 0x20, 0x00, 0x00]);
		assert_eq!(block.relocations.len(), 3);
		assert!(block.relocations.iter().all(|r| r.symbol == "greeting" || r.symbol == "print_string"));
	}

	#[test]
	fn wrong_argument_count_is_an_error() {
		let mut adapter = RuntimeCallAdapter::new("main", imports());
		adapter.process(DecoderEvent::LoadConstantByte(1)).unwrap();
		let err = adapter.process(DecoderEvent::Call("add".to_string())).unwrap_err();
		assert!(matches!(err, AssemblyError::Syntax { .. }));
	}

	#[test]
	fn unregistered_import_is_an_unresolved_symbol_error() {
		let mut adapter = RuntimeCallAdapter::new("main", imports());
		let err = adapter.process(DecoderEvent::Call("missing".to_string())).unwrap_err();
		assert!(matches!(err, AssemblyError::UnresolvedSymbol { .. }));
	}
}

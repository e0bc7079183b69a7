//! The two-pass assembler engine (§4.3/§4.4).
//!
//! Pass 1 walks every input line, resolves conditional assembly, computes
//! each label's offset within its segment, and folds every constant/define
//! expression that is closed at the point it is declared. Pass 2 re-walks
//! the same lines (already classified, so no re-parsing happens) and emits
//! instructions and data into [`Block`]s, deferring anything that still
//! needs a symbol to a relocation the linker resolves later. `ZEROPAGE` and
//! `BSS` never reach pass 2 at all: their labels resolve to a final address
//! the moment they are declared, since those segments are bump-allocated
//! cursors rather than relocatable blocks.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::memory::{Block, MemoryModel, ReservedCursor, SegmentKind};
use crate::core::passes::{Pass, PassStatistics};
use crate::error::{AssemblyError, AssemblyResult, ErrorCollector, SourcePos};
use crate::instructions::addressing::{AddressingMode, OperandSyntax, parse_operand_syntax};
use crate::instructions::encoding::{PendingRelocation, RelocationSize, encode_instruction};
use crate::instructions::validation::validate_instruction;
use crate::instructions::{Mnemonic, OperandPlan, OperandValue, build_operand, plan_operand};
use crate::parsing::directives::{ByteItem, Directive, parse_directive};
use crate::parsing::expressions::try_eval;
use crate::parsing::parser::{is_bare_identifier, operand_expr_text, try_split_assignment};
use crate::parsing::tokens::{split_label, split_mnemonic, strip_comment};
use crate::symbols::{ImportMap, ScopeTracker, Symbol, SymbolKind, SymbolTable, table_lookup};

/// The fully-assembled program, ready to hand to the linker: the populated
/// memory model, the merged symbol table, the runtime-library import map
/// (carried through from configuration), and the names named by `.export`
/// lines (informational, surfaced through the symbol-dump output).
#[derive(Debug)]
pub struct AssembledProgram {
	pub memory: MemoryModel,
	pub symbols: SymbolTable,
	pub imports: ImportMap,
	pub exports: Vec<String>,
}

/// Drives the fixed two-pass pipeline over a [`Config`]'s input files.
#[derive(Debug)]
pub struct Assembler {
	config: Config,
}

impl Assembler {
	pub fn new(config: Config) -> Self {
		Self {
			config,
		}
	}

	/// Assemble every configured input file into one merged [`AssembledProgram`].
	pub fn assemble(&self) -> AssemblyResult<AssembledProgram> {
		self.config.validate()?;

		let mut table = SymbolTable::new();
		let define_pos = SourcePos::file_only(PathBuf::from("<command line>"));
		for (name, value) in &self.config.defines {
			table.declare(SymbolKind::Define, name, Some(*value), define_pos.clone())?;
		}

		let mut pass1 = Pass1Ctx::new(table);
		for input in &self.config.inputs {
			let text = std::fs::read_to_string(input).map_err(|source| AssemblyError::Io {
				pos: Some(SourcePos::file_only(input.clone())),
				source,
			})?;
			pass1.run_file(&text, input);
		}
		pass1.finish_conditionals();

		tracing::info!(pass = %Pass::First, lines = pass1.stats.lines_processed, symbols = pass1.stats.symbols_defined, errors = pass1.errors.len(), "pass 1 complete");
		pass1.errors.clone().into_result()?;

		let Pass1Output {
			table,
			lines,
			zeropage,
			bss,
			exports,
		} = pass1.into_output();

		let mut pass2 = Pass2Ctx::new(table, zeropage, bss);
		pass2.run(lines);

		tracing::info!(pass = %Pass::Second, instructions = pass2.stats.instructions_processed, errors = pass2.errors.len(), "pass 2 complete");
		pass2.errors.clone().into_result()?;

		let Pass2Output {
			table,
			mut memory,
			aliases,
		} = pass2.into_output();

		resolve_aliases(&mut memory, aliases)?;

		Ok(AssembledProgram {
			memory,
			symbols: table,
			imports: self.config.imports.clone(),
			exports,
		})
	}
}

/// One line of source, already classified by pass 1, ready to be replayed
/// verbatim by pass 2. `Label` lines for `ZEROPAGE`/`BSS` never appear here —
/// those segments finish entirely within pass 1.
#[derive(Debug, Clone)]
enum ParsedLine {
	Label(String),
	Instruction {
		mnemonic: Mnemonic,
		syntax: OperandSyntax,
		plan: OperandPlan,
		pos: SourcePos,
	},
	Byte {
		items: Vec<ByteItem>,
		pos: SourcePos,
	},
	Word {
		items: Vec<String>,
		pos: SourcePos,
	},
	Res {
		count: u16,
		fill: u8,
	},
	/// `NAME = expr` where `expr` did not evaluate to a closed value in pass
	/// 1 — `expr` has already been canonicalized to the name it must match
	/// among the finished blocks' labels.
	Alias {
		name: String,
		target: String,
		pos: SourcePos,
	},
}

/// One frame of the `.if`/`.else`/`.endif` stack (§4.3 step 2).
#[derive(Debug, Clone, Copy)]
struct CondFrame {
	parent_active: bool,
	if_true: bool,
	in_else: bool,
}

impl CondFrame {
	fn active(&self) -> bool {
		self.parent_active && if self.in_else { !self.if_true } else { self.if_true }
	}
}

struct Pass1Output {
	table: SymbolTable,
	lines: Vec<(SegmentKind, ParsedLine)>,
	zeropage: ReservedCursor,
	bss: ReservedCursor,
	exports: Vec<String>,
}

/// Pass 1 state: symbol collection, conditional assembly, and per-segment
/// offset tracking.
struct Pass1Ctx {
	table: SymbolTable,
	scope: ScopeTracker,
	segment: SegmentKind,
	segment_offsets: HashMap<SegmentKind, usize>,
	zeropage: ReservedCursor,
	bss: ReservedCursor,
	cond_stack: Vec<CondFrame>,
	lines: Vec<(SegmentKind, ParsedLine)>,
	exports: Vec<String>,
	errors: ErrorCollector,
	stats: PassStatistics,
}

impl Pass1Ctx {
	fn new(table: SymbolTable) -> Self {
		Self {
			table,
			scope: ScopeTracker::new(),
			segment: SegmentKind::Code,
			segment_offsets: HashMap::new(),
			zeropage: ReservedCursor::new(0x0000),
			bss: ReservedCursor::new(crate::core::memory::DEFAULT_BSS_BASE),
			cond_stack: Vec::new(),
			lines: Vec::new(),
			exports: Vec::new(),
			errors: ErrorCollector::new(),
			stats: PassStatistics::for_pass(Pass::First),
		}
	}

	fn into_output(self) -> Pass1Output {
		Pass1Output {
			table: self.table,
			lines: self.lines,
			zeropage: self.zeropage,
			bss: self.bss,
			exports: self.exports,
		}
	}

	fn run_file(&mut self, text: &str, path: &Path) {
		for (line_no, raw_line) in text.lines().enumerate() {
			let pos = SourcePos::new(path.to_path_buf(), line_no + 1, 1);
			self.stats.lines_processed += 1;
			if let Err(error) = self.process_line(raw_line, &pos) {
				self.errors.push(error);
			}
		}
	}

	/// An unterminated `.if` at end of input is a syntax error.
	fn finish_conditionals(&mut self) {
		if !self.cond_stack.is_empty() {
			self.cond_stack.clear();
			self.errors.push(AssemblyError::Syntax {
				pos: SourcePos::file_only(PathBuf::from("<end of input>")),
				message: "unterminated .if".to_string(),
			});
		}
	}

	fn active(&self) -> bool {
		self.cond_stack.last().map(CondFrame::active).unwrap_or(true)
	}

	fn advance(&mut self, segment: SegmentKind, size: usize) {
		*self.segment_offsets.entry(segment).or_insert(0) += size;
	}

	fn current_address(&self, segment: SegmentKind) -> usize {
		*self.segment_offsets.get(&segment).unwrap_or(&0)
	}

	fn lookup(&self) -> impl Fn(&str) -> Option<i32> + '_ {
		table_lookup(&self.table, |name| self.scope.canonicalize(name))
	}

	fn eval_closed(&self, expr: &str, pos: &SourcePos) -> AssemblyResult<i32> {
		let lookup = self.lookup();
		try_eval(expr, &lookup, pos)?.ok_or_else(|| AssemblyError::Syntax {
			pos: pos.clone(),
			message: format!("'{expr}' is not a closed expression"),
		})
	}

	fn process_line(&mut self, raw_line: &str, pos: &SourcePos) -> AssemblyResult<()> {
		let stripped = strip_comment(raw_line);
		let trimmed = stripped.trim();
		if trimmed.is_empty() {
			return Ok(());
		}

		let (label, rest) = match split_label(trimmed) {
			Some((name, rest)) => (Some(name.to_string()), rest.trim()),
			None => (None, trimmed),
		};

		if rest.starts_with('.') {
			return match parse_directive(rest, pos)? {
				Some(Directive::If {
					expr, ..
				}) => self.handle_if(&expr, pos),
				Some(Directive::Else {
					..
				}) => self.handle_else(pos),
				Some(Directive::EndIf {
					..
				}) => self.handle_endif(pos),
				Some(other) => {
					if !self.active() {
						return Ok(());
					}
					if let Some(name) = label {
						self.declare_label(name, pos)?;
					}
					self.handle_directive(other, pos)
				}
				None => {
					if !self.active() {
						return Ok(());
					}
					if let Some(name) = label {
						self.declare_label(name, pos)?;
					}
					Ok(())
				}
			};
		}

		if !self.active() {
			return Ok(());
		}

		if let Some(name) = label {
			self.declare_label(name, pos)?;
		}

		if rest.is_empty() {
			return Ok(());
		}

		if let Some((name, expr)) = try_split_assignment(rest) {
			return self.handle_assignment(name, expr, pos);
		}

		self.handle_instruction(rest, pos)
	}

	fn handle_if(&mut self, expr: &str, pos: &SourcePos) -> AssemblyResult<()> {
		let parent_active = self.active();
		let value = {
			let lookup = self.lookup();
			try_eval(expr, &lookup, pos)?.map(|v| v != 0).unwrap_or(false)
		};
		self.cond_stack.push(CondFrame {
			parent_active,
			if_true: value,
			in_else: false,
		});
		Ok(())
	}

	fn handle_else(&mut self, pos: &SourcePos) -> AssemblyResult<()> {
		match self.cond_stack.last_mut() {
			Some(frame) => {
				frame.in_else = true;
				Ok(())
			}
			None => Err(AssemblyError::Syntax {
				pos: pos.clone(),
				message: ".else without matching .if".to_string(),
			}),
		}
	}

	fn handle_endif(&mut self, pos: &SourcePos) -> AssemblyResult<()> {
		if self.cond_stack.pop().is_none() {
			return Err(AssemblyError::Syntax {
				pos: pos.clone(),
				message: ".endif without matching .if".to_string(),
			});
		}
		Ok(())
	}

	fn declare_label(&mut self, name: String, pos: &SourcePos) -> AssemblyResult<()> {
		self.scope.enter(&name);
		let canonical = self.scope.canonicalize(&name);
		let value = match self.segment {
			SegmentKind::Zeropage => i32::from(self.zeropage.current()),
			SegmentKind::Bss => i32::from(self.bss.current()),
			segment => self.current_address(segment) as i32,
		};
		self.table.declare(SymbolKind::Label, &canonical, Some(value), pos.clone())?;
		self.stats.symbols_defined += 1;
		if !matches!(self.segment, SegmentKind::Zeropage | SegmentKind::Bss) {
			// Store the raw name, not `canonical`: pass 2 replays its own
			// `ScopeTracker` over these same Label lines in the same order,
			// so it must re-derive the canonical form through `enter` +
			// `canonicalize` itself rather than be handed an already-scoped
			// string that would no longer look local to `is_local`.
			self.lines.push((self.segment, ParsedLine::Label(name)));
		}
		Ok(())
	}

	fn handle_directive(&mut self, directive: Directive, pos: &SourcePos) -> AssemblyResult<()> {
		match directive {
			Directive::Segment {
				name, ..
			} => {
				self.segment = SegmentKind::parse(&name).ok_or_else(|| AssemblyError::Syntax {
					pos: pos.clone(),
					message: format!("unknown segment '{name}'"),
				})?;
			}
			Directive::Export {
				names, ..
			} => self.exports.extend(names),
			Directive::Import {
				names, ..
			} => {
				for name in names {
					self.table.declare(SymbolKind::Import, &name, None, pos.clone())?;
				}
			}
			Directive::Define {
				name, expr, ..
			} => {
				let value = match expr {
					None => 1,
					Some(e) => self.eval_closed(&e, pos)?,
				};
				self.table.declare(SymbolKind::Define, &name, Some(value), pos.clone())?;
			}
			Directive::Byte {
				items, ..
			} => {
				self.reject_in_reserved_segment(".byte", pos)?;
				let size: usize = items
					.iter()
					.map(|item| match item {
						ByteItem::StringLiteral(s) => s.len(),
						ByteItem::Expr(_) => 1,
					})
					.sum();
				self.advance(self.segment, size);
				self.lines.push((self.segment, ParsedLine::Byte {
					items,
					pos: pos.clone(),
				}));
			}
			Directive::Word {
				items, ..
			} => {
				self.reject_in_reserved_segment(".word", pos)?;
				self.advance(self.segment, items.len() * 2);
				self.lines.push((self.segment, ParsedLine::Word {
					items,
					pos: pos.clone(),
				}));
			}
			Directive::Res {
				count, fill, ..
			} => self.handle_res(&count, fill.as_deref(), pos)?,
			Directive::If {
				..
			}
			| Directive::Else {
				..
			}
			| Directive::EndIf {
				..
			} => unreachable!("conditional directives are routed before handle_directive"),
		}
		Ok(())
	}

	fn reject_in_reserved_segment(&self, directive: &str, pos: &SourcePos) -> AssemblyResult<()> {
		if matches!(self.segment, SegmentKind::Zeropage | SegmentKind::Bss) {
			return Err(AssemblyError::Syntax {
				pos: pos.clone(),
				message: format!("{directive} is not allowed in the {} segment", self.segment),
			});
		}
		Ok(())
	}

	fn handle_res(&mut self, count_expr: &str, fill_expr: Option<&str>, pos: &SourcePos) -> AssemblyResult<()> {
		let count = self.eval_closed(count_expr, pos)?;
		if count < 0 || count > i32::from(u16::MAX) {
			return Err(AssemblyError::Syntax {
				pos: pos.clone(),
				message: format!(".res count {count} out of range"),
			});
		}
		let count = count as u16;
		match self.segment {
			SegmentKind::Zeropage => {
				self.zeropage.reserve(count);
			}
			SegmentKind::Bss => {
				self.bss.reserve(count);
			}
			SegmentKind::Code => {
				return Err(AssemblyError::Syntax {
					pos: pos.clone(),
					message: "`.res` is not allowed in the CODE segment".to_string(),
				});
			}
			segment => {
				let fill = match fill_expr {
					Some(e) => self.eval_closed(e, pos)?,
					None => 0,
				};
				if !(0..=0xFF).contains(&fill) {
					return Err(AssemblyError::Syntax {
						pos: pos.clone(),
						message: format!(".res fill value ${fill:X} out of byte range"),
					});
				}
				self.advance(segment, count as usize);
				self.lines.push((segment, ParsedLine::Res {
					count,
					fill: fill as u8,
				}));
			}
		}
		Ok(())
	}

	fn handle_assignment(&mut self, name: &str, expr: &str, pos: &SourcePos) -> AssemblyResult<()> {
		let canonical = self.scope.canonicalize(name);
		let resolved = {
			let lookup = self.lookup();
			try_eval(expr, &lookup, pos)?
		};
		match resolved {
			Some(value) => {
				self.table.declare(SymbolKind::Constant, &canonical, Some(value), pos.clone())?;
			}
			None => {
				self.table.declare(SymbolKind::Constant, &canonical, None, pos.clone())?;
				let target = self.scope.canonicalize(expr.trim());
				self.lines.push((self.segment, ParsedLine::Alias {
					name: canonical,
					target,
					pos: pos.clone(),
				}));
			}
		}
		Ok(())
	}

	fn handle_instruction(&mut self, rest: &str, pos: &SourcePos) -> AssemblyResult<()> {
		let (mnemonic_str, operand_str) = split_mnemonic(rest);
		let mnemonic = Mnemonic::parse(mnemonic_str).ok_or_else(|| AssemblyError::UnknownMnemonic {
			pos: pos.clone(),
			mnemonic: mnemonic_str.to_string(),
		})?;
		let syntax = parse_operand_syntax(operand_str);
		let value = match operand_expr_text(&syntax) {
			Some(expr) => {
				let lookup = self.lookup();
				try_eval(expr, &lookup, pos)?
			}
			None => None,
		};
		let plan = plan_operand(mnemonic, &syntax, value);
		validate_instruction(mnemonic, plan.mode, pos)?;
		self.advance(self.segment, plan.size);
		self.stats.instructions_processed += 1;
		self.lines.push((self.segment, ParsedLine::Instruction {
			mnemonic,
			syntax,
			plan,
			pos: pos.clone(),
		}));
		Ok(())
	}
}

struct Pass2Output {
	table: SymbolTable,
	memory: MemoryModel,
	aliases: Vec<(String, String, SourcePos)>,
}

/// Which kind of content a currently-open block holds. A content-kind change
/// within `CODE`/`STARTUP` flushes the open block and starts a fresh one
/// (§4.4's "flush the current code block, then emit a data block"); segments
/// that only ever hold data never see a flavor change, so their one open
/// block simply grows until the next label splits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockFlavor {
	Code,
	Data,
}

enum ResolvedByte {
	Literal(u8),
	Symbol(String),
}

enum ResolvedWord {
	Literal(u16),
	Symbol(String),
}

/// Pass 2 state: replays the classified line list into blocks.
struct Pass2Ctx {
	table: SymbolTable,
	scope: ScopeTracker,
	memory: MemoryModel,
	open: HashMap<SegmentKind, (BlockFlavor, Block)>,
	pending_labels: HashMap<SegmentKind, Vec<String>>,
	aliases: Vec<(String, String, SourcePos)>,
	errors: ErrorCollector,
	stats: PassStatistics,
}

impl Pass2Ctx {
	fn new(table: SymbolTable, zeropage: ReservedCursor, bss: ReservedCursor) -> Self {
		let mut memory = MemoryModel::new();
		memory.zeropage = zeropage;
		memory.bss = bss;
		Self {
			table,
			scope: ScopeTracker::new(),
			memory,
			open: HashMap::new(),
			pending_labels: HashMap::new(),
			aliases: Vec::new(),
			errors: ErrorCollector::new(),
			stats: PassStatistics::for_pass(Pass::Second),
		}
	}

	fn into_output(self) -> Pass2Output {
		Pass2Output {
			table: self.table,
			memory: self.memory,
			aliases: self.aliases,
		}
	}

	fn run(&mut self, lines: Vec<(SegmentKind, ParsedLine)>) {
		for (segment, line) in lines {
			self.stats.lines_processed += 1;
			if let Err(error) = self.process_line(segment, line) {
				self.errors.push(error);
			}
		}
		self.flush_all();
	}

	fn flush_all(&mut self) {
		for segment in SegmentKind::rom_layout_order() {
			if let Some((_, block)) = self.open.remove(segment) {
				self.memory.push_block(block);
			}
		}
	}

	fn pass2_lookup(&self) -> impl Fn(&str) -> Option<i32> + '_ {
		move |name: &str| {
			let canonical = self.scope.canonicalize(name);
			match self.table.get(&canonical) {
				Some(Symbol {
					kind: SymbolKind::Constant | SymbolKind::Define,
					value,
					..
				}) => *value,
				_ => None,
			}
		}
	}

	/// Resolve an operand's bare expression text the way pass 2 must: fold a
	/// closed constant/define immediately, or defer to an
	/// [`OperandValue::Symbol`] for the linker — labels and imports are
	/// always deferred here even when a label's pass-1 value happens to look
	/// resolved, since that value is a segment-relative offset, never the
	/// final address `encode_instruction` would need to bake in.
	fn resolve_value(&self, expr: &str, pos: &SourcePos) -> AssemblyResult<OperandValue> {
		let lookup = self.pass2_lookup();
		let trimmed = expr.trim();
		match try_eval(trimmed, &lookup, pos)? {
			Some(v) => Ok(OperandValue::Literal(v)),
			None if is_bare_identifier(trimmed) => Ok(OperandValue::Symbol(self.scope.canonicalize(trimmed))),
			None => Err(AssemblyError::UnresolvedSymbol {
				pos: pos.clone(),
				symbol: trimmed.to_string(),
			}),
		}
	}

	fn open_block(&mut self, segment: SegmentKind, flavor: BlockFlavor) -> &mut Block {
		let needs_new = !matches!(self.open.get(&segment), Some((existing, _)) if *existing == flavor);
		if needs_new {
			if let Some((_, old)) = self.open.remove(&segment) {
				self.memory.push_block(old);
			}
			let mut block = Block::new(segment);
			if let Some(labels) = self.pending_labels.get_mut(&segment) {
				for name in labels.drain(..) {
					block.attach_label(name);
				}
			}
			self.open.insert(segment, (flavor, block));
		} else if let Some(labels) = self.pending_labels.get_mut(&segment) {
			if !labels.is_empty() {
				let (_, block) = self.open.get_mut(&segment).expect("just checked present");
				for name in labels.drain(..) {
					block.attach_label(name);
				}
			}
		}
		&mut self.open.get_mut(&segment).expect("inserted above").1
	}

	fn process_line(&mut self, segment: SegmentKind, line: ParsedLine) -> AssemblyResult<()> {
		match line {
			ParsedLine::Label(name) => {
				self.scope.enter(&name);
				let canonical = self.scope.canonicalize(&name);
				self.pending_labels.entry(segment).or_default().push(canonical);
				Ok(())
			}
			ParsedLine::Instruction {
				mnemonic,
				syntax,
				plan,
				pos,
			} => self.emit_instruction(segment, mnemonic, &syntax, plan, &pos),
			ParsedLine::Byte {
				items, pos,
			} => self.emit_byte(segment, &items, &pos),
			ParsedLine::Word {
				items, pos,
			} => self.emit_word(segment, &items, &pos),
			ParsedLine::Res {
				count, fill,
			} => {
				self.open_block(segment, BlockFlavor::Data).push_bytes(&vec![fill; count as usize]);
				Ok(())
			}
			ParsedLine::Alias {
				name, target, pos,
			} => {
				self.aliases.push((name, target, pos));
				Ok(())
			}
		}
	}

	fn emit_instruction(&mut self, segment: SegmentKind, mnemonic: Mnemonic, syntax: &OperandSyntax, plan: OperandPlan, pos: &SourcePos) -> AssemblyResult<()> {
		let value = match operand_expr_text(syntax) {
			Some(expr) => Some(self.resolve_value(expr, pos)?),
			None => None,
		};
		let operand = build_operand(syntax, plan, value);
		let lookup = self.pass2_lookup();
		let encoded = encode_instruction(mnemonic, &operand, &lookup, pos)?;
		if encoded.bytes.len() != plan.size {
			return Err(AssemblyError::LayoutInconsistency {
				pos: pos.clone(),
				block: mnemonic.to_string(),
				estimated: plan.size,
				actual: encoded.bytes.len(),
			});
		}
		self.open_block(segment, BlockFlavor::Code).push_encoded(encoded);
		self.stats.instructions_processed += 1;
		Ok(())
	}

	fn emit_byte(&mut self, segment: SegmentKind, items: &[ByteItem], pos: &SourcePos) -> AssemblyResult<()> {
		let mut resolved = Vec::with_capacity(items.len());
		for item in items {
			match item {
				ByteItem::StringLiteral(s) => resolved.extend(s.bytes().map(ResolvedByte::Literal)),
				ByteItem::Expr(expr) => match self.resolve_value(expr, pos)? {
					OperandValue::Literal(v) => {
						if !(0..=0xFF).contains(&v) {
							return Err(AssemblyError::Syntax {
								pos: pos.clone(),
								message: format!("byte value ${v:X} out of range"),
							});
						}
						resolved.push(ResolvedByte::Literal(v as u8));
					}
					OperandValue::Symbol(name) => resolved.push(ResolvedByte::Symbol(name)),
				},
			}
		}
		let block = self.open_block(segment, BlockFlavor::Data);
		for item in resolved {
			match item {
				ResolvedByte::Literal(b) => block.push_bytes(&[b]),
				ResolvedByte::Symbol(symbol) => {
					let offset = block.len();
					block.relocations.push(PendingRelocation {
						offset,
						symbol,
						size: RelocationSize::ByteLow,
					});
					block.push_bytes(&[0]);
				}
			}
		}
		Ok(())
	}

	fn emit_word(&mut self, segment: SegmentKind, items: &[String], pos: &SourcePos) -> AssemblyResult<()> {
		let mut resolved = Vec::with_capacity(items.len());
		for expr in items {
			match self.resolve_value(expr, pos)? {
				OperandValue::Literal(v) => {
					if !(0..=0xFFFF).contains(&v) {
						return Err(AssemblyError::Syntax {
							pos: pos.clone(),
							message: format!("word value ${v:X} out of range"),
						});
					}
					resolved.push(ResolvedWord::Literal(v as u16));
				}
				OperandValue::Symbol(name) => resolved.push(ResolvedWord::Symbol(name)),
			}
		}
		let block = self.open_block(segment, BlockFlavor::Data);
		for item in resolved {
			match item {
				ResolvedWord::Literal(v) => block.push_bytes(&v.to_le_bytes()),
				ResolvedWord::Symbol(symbol) => block.push_word_relocation(symbol),
			}
		}
		Ok(())
	}
}

/// Attach every deferred `NAME = OTHER_LABEL` alias to the block that owns
/// `OTHER_LABEL`, once every block in every segment has been built (§4.4,
/// §9). The target may be a forward reference, so this can only run after
/// pass 2 has finished emitting every segment.
fn resolve_aliases(memory: &mut MemoryModel, aliases: Vec<(String, String, SourcePos)>) -> AssemblyResult<()> {
	for (name, target, pos) in aliases {
		let mut found = false;
		for segment in SegmentKind::rom_layout_order() {
			for block in memory.blocks_mut(*segment) {
				if block.labels().any(|l| l == target) {
					block.aliases.push(name.clone());
					found = true;
					break;
				}
			}
			if found {
				break;
			}
		}
		if !found {
			return Err(AssemblyError::UnresolvedSymbol {
				pos,
				symbol: target,
			});
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn assemble_source(source: &str) -> AssembledProgram {
		let mut file = tempfile::Builder::new().suffix(".s").tempfile().unwrap();
		file.write_all(source.as_bytes()).unwrap();
		let config = Config::new(vec![file.path().to_path_buf()], PathBuf::from("out.nes")).build();
		Assembler::new(config).assemble().unwrap()
	}

	fn try_assemble(source: &str) -> AssemblyResult<AssembledProgram> {
		let mut file = tempfile::Builder::new().suffix(".s").tempfile().unwrap();
		file.write_all(source.as_bytes()).unwrap();
		let config = Config::new(vec![file.path().to_path_buf()], PathBuf::from("out.nes")).build();
		Assembler::new(config).assemble()
	}

	fn code_bytes(program: &AssembledProgram) -> Vec<u8> {
		program.memory.blocks(SegmentKind::Code).iter().flat_map(|b| b.bytes.clone()).collect()
	}

	#[test]
	fn s1_immediate_and_store() {
		let program = assemble_source(
			"\
.segment \"CODE\"
main:   lda #$42
        sta $0200
        rts
",
		);
		assert_eq!(code_bytes(&program), vec![0xA9, 0x42, 0x8D, 0x00, 0x02, 0x60]);
	}

	#[test]
	fn s3_forward_branch_and_zero_page_fold() {
		let program = assemble_source(
			"\
.segment \"CODE\"
start:  lda #$00
        beq done
        sta $05
done:   rts
",
		);
		assert_eq!(code_bytes(&program), vec![0xA9, 0x00, 0xF0, 0x02, 0x85, 0x05, 0x60]);
	}

	#[test]
	fn s5_expression_folding() {
		let program = assemble_source(
			"\
.segment \"CODE\"
        lda #<($1234 + 1)
        lda #>($1234 + 1)
",
		);
		assert_eq!(code_bytes(&program), vec![0xA9, 0x35, 0xA9, 0x12]);
	}

	#[test]
	fn s6_conditional_assembly_picks_else_branch() {
		let program = assemble_source(
			"\
.define DEBUG 0
.segment \"CODE\"
.if(DEBUG)
        lda #$FF
.else
        lda #$00
.endif
        rts
",
		);
		assert_eq!(code_bytes(&program), vec![0xA9, 0x00, 0x60]);
	}

	#[test]
	fn backward_branch_displacement() {
		let program = assemble_source(
			"\
.segment \"CODE\"
loop:   dex
        bne loop
        rts
",
		);
		assert_eq!(code_bytes(&program), vec![0xCA, 0xD0, 0xFD, 0x60]);
	}

	#[test]
	fn word_relocation_on_forward_label_deferred_to_linker() {
		let program = assemble_source(
			"\
.segment \"RODATA\"
table:  .word entry
.segment \"CODE\"
entry:  rts
",
		);
		let rodata = &program.memory.blocks(SegmentKind::Rodata)[0];
		assert_eq!(rodata.bytes, vec![0, 0]);
		assert_eq!(rodata.relocations[0].symbol, "entry");
		assert_eq!(rodata.relocations[0].size, RelocationSize::Word);
	}

	#[test]
	fn res_in_code_segment_is_a_hard_error() {
		let source = "\
.segment \"CODE\"
        .res 4
";
		let err = try_assemble(source).unwrap_err();
		assert!(err.to_string().contains("CODE"));
	}

	#[test]
	fn zeropage_label_resolves_immediately_and_res_advances_cursor() {
		let program = assemble_source(
			"\
.segment \"ZEROPAGE\"
player_x: .res 1
player_y: .res 1
",
		);
		assert_eq!(program.symbols.value("player_x"), Some(0x0000));
		assert_eq!(program.symbols.value("player_y"), Some(0x0001));
	}

	#[test]
	fn deferred_assignment_aliases_forward_label_block() {
		let program = assemble_source(
			"\
.segment \"CODE\"
ALIAS = main
main:   rts
",
		);
		let block = &program.memory.blocks(SegmentKind::Code)[0];
		assert_eq!(block.primary_label.as_deref(), Some("main"));
		assert_eq!(block.aliases, vec!["ALIAS".to_string()]);
	}

	#[test]
	fn local_label_branch_within_scope() {
		let program = assemble_source(
			"\
.segment \"CODE\"
main:
@loop:  dex
        bne @loop
        rts
",
		);
		assert_eq!(code_bytes(&program), vec![0xCA, 0xD0, 0xFD, 0x60]);
	}

	#[test]
	fn inline_data_in_code_segment_splits_into_its_own_block() {
		let program = assemble_source(
			"\
.segment \"CODE\"
start:  lda #$00
msg:    .byte \"A\"
        rts
",
		);
		let blocks = program.memory.blocks(SegmentKind::Code);
		assert_eq!(blocks.len(), 3);
		assert_eq!(blocks[0].primary_label.as_deref(), Some("start"));
		assert_eq!(blocks[0].bytes, vec![0xA9, 0x00]);
		assert_eq!(blocks[1].primary_label.as_deref(), Some("msg"));
		assert_eq!(blocks[1].bytes, b"A".to_vec());
		assert_eq!(blocks[2].bytes, vec![0x60]);
	}

	#[test]
	fn unknown_mnemonic_is_reported() {
		let source = "\
.segment \"CODE\"
        frobnicate #$01
";
		let err = try_assemble(source).unwrap_err();
		assert!(matches!(err, AssemblyError::UnknownMnemonic { .. }) || err.to_string().to_lowercase().contains("frobnicate"));
	}

	#[test]
	fn plan_and_emitted_size_stay_in_sync() {
		let program = assemble_source(
			"\
.segment \"CODE\"
        lda $05
        lda $0500
",
		);
		let block = &program.memory.blocks(SegmentKind::Code)[0];
		assert_eq!(block.bytes, vec![0xA5, 0x05, 0xAD, 0x00, 0x05]);
		let _ = AddressingMode::ZeroPage;
	}
}

//! Expression evaluation for the NES assembler.
//!
//! Recursive-descent evaluator over the grammar in §4.1: `||`, `&&`, `|`,
//! `^`, `&`, `<<`/`>>`, `+`/`-`, `*`/`/`, then the unary operators `<`
//! (low byte), `>` (high byte), `~`, unary `-`, `!`, then primaries.
//!
//! `try_eval` returns `Ok(None)` when an identifier can't be resolved yet —
//! that's a deferred expression, not an error — and only returns `Err` for
//! genuine syntax problems or division by zero.

use crate::error::{AssemblyError, AssemblyResult, SourcePos};

/// A cursor over an expression's characters, with the small amount of
/// lookahead precedence climbing needs.
struct Cursor {
	chars: Vec<char>,
	pos: usize,
}

impl Cursor {
	fn new(source: &str) -> Self {
		Self {
			chars: source.chars().collect(),
			pos: 0,
		}
	}

	fn peek(&self) -> Option<char> {
		self.chars.get(self.pos).copied()
	}

	fn peek2(&self) -> Option<char> {
		self.chars.get(self.pos + 1).copied()
	}

	fn advance(&mut self) -> Option<char> {
		let c = self.peek();
		if c.is_some() {
			self.pos += 1;
		}
		c
	}

	fn skip_ws(&mut self) {
		while matches!(self.peek(), Some(c) if c.is_whitespace()) {
			self.pos += 1;
		}
	}

	fn eof(&self) -> bool {
		self.pos >= self.chars.len()
	}

	fn remainder(&self) -> String {
		self.chars[self.pos..].iter().collect()
	}

	/// Consume an exact two-character operator, only if both characters
	/// match; otherwise leaves the cursor untouched.
	fn eat_pair(&mut self, a: char, b: char) -> bool {
		if self.peek() == Some(a) && self.peek2() == Some(b) {
			self.pos += 2;
			true
		} else {
			false
		}
	}

	/// Consume a single character operator, but only if the *next* char is
	/// not `not_followed_by` (used to keep `|`/`&` from eating half of
	/// `||`/`&&`, which belong to a looser precedence level).
	fn eat_single_unless(&mut self, c: char, not_followed_by: char) -> bool {
		if self.peek() == Some(c) && self.peek2() != Some(not_followed_by) {
			self.pos += 1;
			true
		} else {
			false
		}
	}

	fn eat_char(&mut self, c: char) -> bool {
		if self.peek() == Some(c) {
			self.pos += 1;
			true
		} else {
			false
		}
	}

	/// Case-insensitively consume a literal keyword (`.lobyte`, `.hibyte`).
	fn eat_keyword_ci(&mut self, keyword: &str) -> bool {
		let kw: Vec<char> = keyword.chars().collect();
		if self.pos + kw.len() > self.chars.len() {
			return false;
		}
		let matches = self.chars[self.pos..self.pos + kw.len()].iter().zip(kw.iter()).all(|(a, b)| a.eq_ignore_ascii_case(b));
		if matches {
			self.pos += kw.len();
		}
		matches
	}
}

type EvalResult = AssemblyResult<Option<i32>>;

fn combine(lhs: Option<i32>, rhs: Option<i32>, f: impl Fn(i32, i32) -> i32) -> Option<i32> {
	match (lhs, rhs) {
		(Some(a), Some(b)) => Some(f(a, b)),
		_ => None,
	}
}

/// Evaluate `source` against `lookup`, returning `None` if any referenced
/// identifier is unresolved. `pos` is attached to any syntax/division
/// errors raised.
pub fn try_eval(source: &str, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	let mut cur = Cursor::new(source);
	let value = parse_or(&mut cur, lookup, pos)?;
	cur.skip_ws();
	if !cur.eof() {
		return Err(AssemblyError::Syntax {
			pos: pos.clone(),
			message: format!("unexpected trailing input '{}'", cur.remainder()),
		});
	}
	Ok(value)
}

fn parse_or(cur: &mut Cursor, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	let mut lhs = parse_and(cur, lookup, pos)?;
	loop {
		cur.skip_ws();
		if cur.eat_pair('|', '|') {
			cur.skip_ws();
			let rhs = parse_and(cur, lookup, pos)?;
			lhs = combine(lhs, rhs, |a, b| i32::from(a != 0 || b != 0));
		} else {
			break;
		}
	}
	Ok(lhs)
}

fn parse_and(cur: &mut Cursor, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	let mut lhs = parse_bitor(cur, lookup, pos)?;
	loop {
		cur.skip_ws();
		if cur.eat_pair('&', '&') {
			cur.skip_ws();
			let rhs = parse_bitor(cur, lookup, pos)?;
			lhs = combine(lhs, rhs, |a, b| i32::from(a != 0 && b != 0));
		} else {
			break;
		}
	}
	Ok(lhs)
}

fn parse_bitor(cur: &mut Cursor, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	let mut lhs = parse_bitxor(cur, lookup, pos)?;
	loop {
		cur.skip_ws();
		if cur.eat_single_unless('|', '|') {
			cur.skip_ws();
			let rhs = parse_bitxor(cur, lookup, pos)?;
			lhs = combine(lhs, rhs, |a, b| a | b);
		} else {
			break;
		}
	}
	Ok(lhs)
}

fn parse_bitxor(cur: &mut Cursor, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	let mut lhs = parse_bitand(cur, lookup, pos)?;
	loop {
		cur.skip_ws();
		if cur.eat_char('^') {
			cur.skip_ws();
			let rhs = parse_bitand(cur, lookup, pos)?;
			lhs = combine(lhs, rhs, |a, b| a ^ b);
		} else {
			break;
		}
	}
	Ok(lhs)
}

fn parse_bitand(cur: &mut Cursor, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	let mut lhs = parse_shift(cur, lookup, pos)?;
	loop {
		cur.skip_ws();
		if cur.eat_single_unless('&', '&') {
			cur.skip_ws();
			let rhs = parse_shift(cur, lookup, pos)?;
			lhs = combine(lhs, rhs, |a, b| a & b);
		} else {
			break;
		}
	}
	Ok(lhs)
}

fn parse_shift(cur: &mut Cursor, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	let mut lhs = parse_add(cur, lookup, pos)?;
	loop {
		cur.skip_ws();
		if cur.eat_pair('<', '<') {
			cur.skip_ws();
			let rhs = parse_add(cur, lookup, pos)?;
			lhs = combine(lhs, rhs, |a, b| a.wrapping_shl(b as u32));
		} else if cur.eat_pair('>', '>') {
			cur.skip_ws();
			let rhs = parse_add(cur, lookup, pos)?;
			lhs = combine(lhs, rhs, |a, b| a.wrapping_shr(b as u32));
		} else {
			break;
		}
	}
	Ok(lhs)
}

fn parse_add(cur: &mut Cursor, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	let mut lhs = parse_mul(cur, lookup, pos)?;
	loop {
		cur.skip_ws();
		if cur.eat_char('+') {
			cur.skip_ws();
			let rhs = parse_mul(cur, lookup, pos)?;
			lhs = combine(lhs, rhs, |a, b| a.wrapping_add(b));
		} else if cur.eat_char('-') {
			cur.skip_ws();
			let rhs = parse_mul(cur, lookup, pos)?;
			lhs = combine(lhs, rhs, |a, b| a.wrapping_sub(b));
		} else {
			break;
		}
	}
	Ok(lhs)
}

fn parse_mul(cur: &mut Cursor, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	let mut lhs = parse_unary(cur, lookup, pos)?;
	loop {
		cur.skip_ws();
		if cur.eat_char('*') {
			cur.skip_ws();
			let rhs = parse_unary(cur, lookup, pos)?;
			lhs = combine(lhs, rhs, |a, b| a.wrapping_mul(b));
		} else if cur.eat_char('/') {
			cur.skip_ws();
			let rhs = parse_unary(cur, lookup, pos)?;
			if rhs == Some(0) {
				return Err(AssemblyError::DivisionByZero { pos: pos.clone() });
			}
			lhs = combine(lhs, rhs, |a, b| a.wrapping_div(b));
		} else {
			break;
		}
	}
	Ok(lhs)
}

/// Unary operators, tightest-binding before a primary. `>` (and `<`, for
/// symmetry) immediately followed by its own twin is not consumed here —
/// that two-character sequence belongs to the shift operator at a looser
/// precedence level, so a bare `>>`/`<<` can never start a primary.
fn parse_unary(cur: &mut Cursor, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	cur.skip_ws();
	if cur.peek() == Some('<') && cur.peek2() != Some('<') {
		cur.advance();
		cur.skip_ws();
		let v = parse_unary(cur, lookup, pos)?;
		return Ok(v.map(|v| v & 0xFF));
	}
	if cur.peek() == Some('>') && cur.peek2() != Some('>') {
		cur.advance();
		cur.skip_ws();
		let v = parse_unary(cur, lookup, pos)?;
		return Ok(v.map(|v| (v >> 8) & 0xFF));
	}
	if cur.eat_char('~') {
		cur.skip_ws();
		let v = parse_unary(cur, lookup, pos)?;
		return Ok(v.map(|v| !v));
	}
	if cur.eat_char('-') {
		cur.skip_ws();
		let v = parse_unary(cur, lookup, pos)?;
		return Ok(v.map(|v| v.wrapping_neg()));
	}
	if cur.eat_char('!') {
		cur.skip_ws();
		let v = parse_unary(cur, lookup, pos)?;
		return Ok(v.map(|v| i32::from(v == 0)));
	}
	parse_primary(cur, lookup, pos)
}

fn is_ident_start(c: char) -> bool {
	c.is_alphabetic() || c == '_' || c == '@'
}

fn is_ident_continue(c: char) -> bool {
	c.is_alphanumeric() || c == '_' || c == '@'
}

fn parse_primary(cur: &mut Cursor, lookup: &dyn Fn(&str) -> Option<i32>, pos: &SourcePos) -> EvalResult {
	cur.skip_ws();

	if cur.eat_keyword_ci(".lobyte") {
		cur.skip_ws();
		expect_char(cur, '(', pos)?;
		cur.skip_ws();
		let inner = parse_or(cur, lookup, pos)?;
		cur.skip_ws();
		expect_char(cur, ')', pos)?;
		return Ok(inner.map(|v| v & 0xFF));
	}
	if cur.eat_keyword_ci(".hibyte") {
		cur.skip_ws();
		expect_char(cur, '(', pos)?;
		cur.skip_ws();
		let inner = parse_or(cur, lookup, pos)?;
		cur.skip_ws();
		expect_char(cur, ')', pos)?;
		return Ok(inner.map(|v| (v >> 8) & 0xFF));
	}
	if cur.eat_char('(') {
		cur.skip_ws();
		let inner = parse_or(cur, lookup, pos)?;
		cur.skip_ws();
		expect_char(cur, ')', pos)?;
		return Ok(inner);
	}
	if cur.eat_char('$') {
		let digits = take_while(cur, |c| c.is_ascii_hexdigit());
		if digits.is_empty() {
			return Err(AssemblyError::Syntax {
				pos: pos.clone(),
				message: "empty hexadecimal literal".to_string(),
			});
		}
		let value = i32::from_str_radix(&digits, 16).map_err(|_| AssemblyError::Syntax {
			pos: pos.clone(),
			message: format!("invalid hexadecimal literal '${digits}'"),
		})?;
		return Ok(Some(value));
	}
	if cur.eat_char('%') {
		let digits = take_while(cur, |c| c == '0' || c == '1');
		if digits.is_empty() {
			return Err(AssemblyError::Syntax {
				pos: pos.clone(),
				message: "empty binary literal".to_string(),
			});
		}
		let value = i32::from_str_radix(&digits, 2).map_err(|_| AssemblyError::Syntax {
			pos: pos.clone(),
			message: format!("invalid binary literal '%{digits}'"),
		})?;
		return Ok(Some(value));
	}
	if matches!(cur.peek(), Some(c) if c.is_ascii_digit()) {
		let digits = take_while(cur, |c| c.is_ascii_digit());
		let value: i32 = digits.parse()?;
		return Ok(Some(value));
	}
	if matches!(cur.peek(), Some(c) if is_ident_start(c)) {
		let name = take_while(cur, is_ident_continue);
		return Ok(lookup(&name));
	}

	Err(AssemblyError::Syntax {
		pos: pos.clone(),
		message: match cur.peek() {
			Some(c) => format!("unexpected character '{c}' in expression"),
			None => "unexpected end of expression".to_string(),
		},
	})
}

fn take_while(cur: &mut Cursor, pred: impl Fn(char) -> bool) -> String {
	let mut out = String::new();
	while matches!(cur.peek(), Some(c) if pred(c)) {
		out.push(cur.advance().unwrap());
	}
	out
}

fn expect_char(cur: &mut Cursor, c: char, pos: &SourcePos) -> AssemblyResult<()> {
	if cur.eat_char(c) {
		Ok(())
	} else {
		Err(AssemblyError::Syntax {
			pos: pos.clone(),
			message: format!("expected '{c}'"),
		})
	}
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
	fn evaluates_literals() {
		assert_eq!(try_eval("42", &no_lookup, &pos()).unwrap(), Some(42));
		assert_eq!(try_eval("$2A", &no_lookup, &pos()).unwrap(), Some(42));
		assert_eq!(try_eval("%00101010", &no_lookup, &pos()).unwrap(), Some(42));
	}

	#[test]
	fn operator_precedence() {
		assert_eq!(try_eval("2 + 3 * 4", &no_lookup, &pos()).unwrap(), Some(14));
		assert_eq!(try_eval("(2 + 3) * 4", &no_lookup, &pos()).unwrap(), Some(20));
		assert_eq!(try_eval("1 | 2 & 3", &no_lookup, &pos()).unwrap(), Some(3));
	}

	#[test]
	fn s5_expression_folding() {
		assert_eq!(try_eval("<($1234 + 1)", &no_lookup, &pos()).unwrap(), Some(0x35));
		assert_eq!(try_eval(">($1234 + 1)", &no_lookup, &pos()).unwrap(), Some(0x12));
	}

	#[test]
	fn shift_operators_and_disambiguation() {
		assert_eq!(try_eval("$10 >> 2", &no_lookup, &pos()).unwrap(), Some(4));
		assert_eq!(try_eval("$10 << 2", &no_lookup, &pos()).unwrap(), Some(0x40));
		assert!(try_eval(">>5", &no_lookup, &pos()).is_err());
	}

	#[test]
	fn lobyte_hibyte_functions_case_insensitive() {
		assert_eq!(try_eval(".lobyte($1234)", &no_lookup, &pos()).unwrap(), Some(0x34));
		assert_eq!(try_eval(".HIBYTE($1234)", &no_lookup, &pos()).unwrap(), Some(0x12));
	}

	#[test]
	fn unresolved_identifier_defers() {
		assert_eq!(try_eval("unknown_symbol", &no_lookup, &pos()).unwrap(), None);
		assert_eq!(try_eval("unknown + 1", &no_lookup, &pos()).unwrap(), None);
	}

	#[test]
	fn resolved_identifier_folds() {
		let lookup = |n: &str| if n == "target" { Some(10) } else { None };
		assert_eq!(try_eval("target * 2", &lookup, &pos()).unwrap(), Some(20));
	}

	#[test]
	fn division_by_zero_errors() {
		let err = try_eval("1 / 0", &no_lookup, &pos()).unwrap_err();
		assert!(matches!(err, AssemblyError::DivisionByZero { .. }));
	}

	#[test]
	fn logical_and_not_operators() {
		assert_eq!(try_eval("1 && 0", &no_lookup, &pos()).unwrap(), Some(0));
		assert_eq!(try_eval("1 || 0", &no_lookup, &pos()).unwrap(), Some(1));
		assert_eq!(try_eval("!0", &no_lookup, &pos()).unwrap(), Some(1));
		assert_eq!(try_eval("~0", &no_lookup, &pos()).unwrap(), Some(-1));
	}

	#[test]
	fn local_label_identifier_syntax() {
		let lookup = |n: &str| if n == "@loop" { Some(5) } else { None };
		assert_eq!(try_eval("@loop", &lookup, &pos()).unwrap(), Some(5));
	}

	#[test]
	fn trailing_garbage_is_syntax_error() {
		assert!(try_eval("1 + 1)", &no_lookup, &pos()).is_err());
	}
}

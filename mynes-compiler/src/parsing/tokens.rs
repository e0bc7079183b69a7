//! Line-level lexical helpers shared by the statement reader and the CHR/raw
//! assembly reader: comment stripping and label/mnemonic splitting. This
//! system's grammar is simple enough that no token-stream type is needed —
//! every higher-level parser (expressions, directives, addressing) works
//! directly off string slices.

/// Strip a `;` comment from a line, honoring `"…"` strings so a `;` inside
/// a string literal doesn't truncate it (§4.3 step 1).
pub fn strip_comment(line: &str) -> &str {
	let mut in_string = false;
	for (i, c) in line.char_indices() {
		match c {
			'"' => in_string = !in_string,
			';' if !in_string => return &line[..i],
			_ => {}
		}
	}
	line
}

/// Split a line into `(label, remainder)` if it begins with a `name:`
/// label declaration.
pub fn split_label(line: &str) -> Option<(&str, &str)> {
	let trimmed = line.trim_start();
	let mut chars = trimmed.char_indices();
	let (_, first) = chars.next()?;
	if !(first.is_alphabetic() || first == '_' || first == '@') {
		return None;
	}
	for (i, c) in chars {
		if c == ':' {
			let name = &trimmed[..i];
			let rest = &trimmed[i + 1..];
			return Some((name, rest));
		}
		if !(c.is_alphanumeric() || c == '_' || c == '@') {
			return None;
		}
	}
	None
}

/// Split an instruction line into `(mnemonic, operand_text)`.
pub fn split_mnemonic(line: &str) -> (&str, &str) {
	let trimmed = line.trim();
	match trimmed.find(char::is_whitespace) {
		Some(i) => (&trimmed[..i], trimmed[i..].trim()),
		None => (trimmed, ""),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_trailing_comment() {
		assert_eq!(strip_comment("lda #$00 ; load zero"), "lda #$00 ");
	}

	#[test]
	fn keeps_semicolon_inside_string() {
		assert_eq!(strip_comment("\"a;b\" ; real comment"), "\"a;b\" ");
	}

	#[test]
	fn splits_label_and_remainder() {
		assert_eq!(split_label("main: lda #$00"), Some(("main", " lda #$00")));
		assert_eq!(split_label("@loop:"), Some(("@loop", "")));
		assert_eq!(split_label("lda #$00"), None);
	}

	#[test]
	fn splits_mnemonic_and_operand() {
		assert_eq!(split_mnemonic("lda #$42"), ("lda", "#$42"));
		assert_eq!(split_mnemonic("rts"), ("rts", ""));
	}
}

//! Directive parsing: the exact subset from §6, everything else silently
//! skipped (logged at `tracing::warn!`) so richer ca65 inputs don't hard-fail
//! on directives this system doesn't need.

use crate::error::{AssemblyError, AssemblyResult, SourcePos};

/// One item in a `.byte` list: either a quoted string (emits one byte per
/// character) or an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteItem {
	StringLiteral(String),
	Expr(String),
}

/// The directive subset this assembler understands (§6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
	Segment { name: String, pos: SourcePos },
	Export { names: Vec<String>, pos: SourcePos },
	Import { names: Vec<String>, pos: SourcePos },
	Define { name: String, expr: Option<String>, pos: SourcePos },
	Byte { items: Vec<ByteItem>, pos: SourcePos },
	/// `.word`/`.addr` share this variant; both emit one little-endian word
	/// per item.
	Word { items: Vec<String>, pos: SourcePos },
	Res { count: String, fill: Option<String>, pos: SourcePos },
	If { expr: String, pos: SourcePos },
	Else { pos: SourcePos },
	EndIf { pos: SourcePos },
}

impl Directive {
	pub fn pos(&self) -> &SourcePos {
		match self {
			Self::Segment { pos, .. }
			| Self::Export { pos, .. }
			| Self::Import { pos, .. }
			| Self::Define { pos, .. }
			| Self::Byte { pos, .. }
			| Self::Word { pos, .. }
			| Self::Res { pos, .. }
			| Self::If { pos, .. }
			| Self::Else { pos }
			| Self::EndIf { pos } => pos,
		}
	}
}

/// Parse a directive line (already known to start with `.`). Returns
/// `Ok(None)` for a directive keyword this system doesn't recognize —
/// skipped, not an error, per §4.3 step 5.
pub fn parse_directive(text: &str, pos: &SourcePos) -> AssemblyResult<Option<Directive>> {
	let trimmed = text.trim();
	let (keyword, rest) = split_keyword(trimmed);

	match keyword.to_ascii_lowercase().as_str() {
		".segment" => {
			let name = parse_quoted_string(rest.trim(), pos)?;
			Ok(Some(Directive::Segment { name, pos: pos.clone() }))
		}
		".export" => Ok(Some(Directive::Export {
			names: split_top_level(rest).into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
			pos: pos.clone(),
		})),
		".import" => Ok(Some(Directive::Import {
			names: split_top_level(rest).into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
			pos: pos.clone(),
		})),
		".define" => {
			let rest = rest.trim();
			if rest.is_empty() {
				return Err(AssemblyError::Syntax {
					pos: pos.clone(),
					message: ".define requires a name".to_string(),
				});
			}
			let mut parts = rest.splitn(2, char::is_whitespace);
			let name = parts.next().unwrap_or_default().to_string();
			let expr = parts.next().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
			Ok(Some(Directive::Define { name, expr, pos: pos.clone() }))
		}
		".byte" => Ok(Some(Directive::Byte {
			items: parse_byte_items(rest, pos)?,
			pos: pos.clone(),
		})),
		".word" | ".addr" => Ok(Some(Directive::Word {
			items: split_top_level(rest).into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect(),
			pos: pos.clone(),
		})),
		".res" => {
			let parts = split_top_level(rest);
			let count = parts.first().map(|s| s.trim().to_string()).ok_or_else(|| AssemblyError::Syntax {
				pos: pos.clone(),
				message: ".res requires a count".to_string(),
			})?;
			let fill = parts.get(1).map(|s| s.trim().to_string());
			Ok(Some(Directive::Res { count, fill, pos: pos.clone() }))
		}
		".if" => {
			let expr = rest.trim();
			let expr = expr.strip_prefix('(').and_then(|s| s.strip_suffix(')')).unwrap_or(expr);
			Ok(Some(Directive::If {
				expr: expr.trim().to_string(),
				pos: pos.clone(),
			}))
		}
		".else" => Ok(Some(Directive::Else { pos: pos.clone() })),
		".endif" => Ok(Some(Directive::EndIf { pos: pos.clone() })),
		_ => {
			tracing::warn!(directive = %keyword, %pos, "skipping unrecognized directive");
			Ok(None)
		}
	}
}

/// Split `.keyword` from the remainder of the line. The keyword is `.`
/// followed by ASCII letters; anything after (even with no separating
/// space, e.g. `.if(x)`) is the remainder.
fn split_keyword(text: &str) -> (&str, &str) {
	if !text.starts_with('.') {
		return (text, "");
	}
	let end = text.char_indices().skip(1).find(|(_, c)| !c.is_ascii_alphabetic()).map(|(i, _)| i).unwrap_or(text.len());
	text.split_at(end)
}

fn parse_quoted_string(text: &str, pos: &SourcePos) -> AssemblyResult<String> {
	let trimmed = text.trim();
	if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
		Ok(trimmed[1..trimmed.len() - 1].to_string())
	} else {
		Err(AssemblyError::Syntax {
			pos: pos.clone(),
			message: format!("expected a quoted string, found '{trimmed}'"),
		})
	}
}

fn parse_byte_items(rest: &str, pos: &SourcePos) -> AssemblyResult<Vec<ByteItem>> {
	split_top_level(rest)
		.into_iter()
		.map(|raw| {
			let item = raw.trim();
			if item.len() >= 2 && item.starts_with('"') && item.ends_with('"') {
				Ok(ByteItem::StringLiteral(item[1..item.len() - 1].to_string()))
			} else if item.is_empty() {
				Err(AssemblyError::Syntax {
					pos: pos.clone(),
					message: "empty .byte item".to_string(),
				})
			} else {
				Ok(ByteItem::Expr(item.to_string()))
			}
		})
		.collect()
}

/// Split on top-level commas: commas inside `"…"` or `(…)` don't split.
fn split_top_level(text: &str) -> Vec<String> {
	let mut items = Vec::new();
	let mut current = String::new();
	let mut depth = 0i32;
	let mut in_string = false;

	for c in text.chars() {
		match c {
			'"' => {
				in_string = !in_string;
				current.push(c);
			}
			'(' if !in_string => {
				depth += 1;
				current.push(c);
			}
			')' if !in_string => {
				depth -= 1;
				current.push(c);
			}
			',' if !in_string && depth == 0 => {
				items.push(current.trim().to_string());
				current.clear();
			}
			_ => current.push(c),
		}
	}
	if !current.trim().is_empty() {
		items.push(current.trim().to_string());
	}
	items
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn pos() -> SourcePos {
		SourcePos::new(PathBuf::from("test.s"), 1, 1)
	}

	#[test]
	fn parses_segment() {
		let d = parse_directive(".segment \"CODE\"", &pos()).unwrap().unwrap();
		assert_eq!(d, Directive::Segment { name: "CODE".into(), pos: pos() });
	}

	#[test]
	fn parses_byte_list_with_string_and_exprs() {
		let d = parse_directive(".byte $01, \"AB\", label+1", &pos()).unwrap().unwrap();
		match d {
			Directive::Byte { items, .. } => {
				assert_eq!(items, vec![ByteItem::Expr("$01".into()), ByteItem::StringLiteral("AB".into()), ByteItem::Expr("label+1".into()),]);
			}
			other => panic!("expected Byte, got {other:?}"),
		}
	}

	#[test]
	fn parses_word_and_addr_alike() {
		let a = parse_directive(".word entry, $1234", &pos()).unwrap().unwrap();
		let b = parse_directive(".addr entry, $1234", &pos()).unwrap().unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn parses_res_with_optional_fill() {
		let d = parse_directive(".res 4", &pos()).unwrap().unwrap();
		assert_eq!(
			d,
			Directive::Res {
				count: "4".into(),
				fill: None,
				pos: pos()
			}
		);
		let d = parse_directive(".res 4, $FF", &pos()).unwrap().unwrap();
		assert_eq!(
			d,
			Directive::Res {
				count: "4".into(),
				fill: Some("$FF".into()),
				pos: pos()
			}
		);
	}

	#[test]
	fn parses_if_with_and_without_parens() {
		let a = parse_directive(".if(DEBUG)", &pos()).unwrap().unwrap();
		let b = parse_directive(".if DEBUG", &pos()).unwrap().unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn unknown_directive_is_silently_skipped() {
		assert!(parse_directive(".proc foo", &pos()).unwrap().is_none());
	}

	#[test]
	fn define_without_expr_defaults_later_to_one() {
		let d = parse_directive(".define DEBUG", &pos()).unwrap().unwrap();
		assert_eq!(
			d,
			Directive::Define {
				name: "DEBUG".into(),
				expr: None,
				pos: pos()
			}
		);
	}

	#[test]
	fn segment_without_quotes_errors() {
		assert!(parse_directive(".segment CODE", &pos()).is_err());
	}
}

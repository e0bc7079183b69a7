//! Line-level parsing for the two-pass assembler (§4.3/§4.4): comment and
//! label stripping, directive recognition, and expression evaluation. There
//! is no separate statement/AST layer — [`crate::core::assembler`] drives
//! these pieces directly, one physical line at a time, since this system's
//! grammar has no nesting beyond `.if`/`.else`/`.endif`.
//!
//! CHR graphics and pre-assembled routines (§4.2) are ordinary input files:
//! `.segment "CHARS"` plus `label:`/`.byte` lines are just another case of
//! the same non-CODE-segment handling `Pass1Ctx`/`Pass2Ctx` already apply to
//! `RODATA`/`BSS`, so there is no separate reader grammar to maintain here.

pub mod directives;
pub mod expressions;
pub mod parser;
pub mod tokens;

pub use directives::{ByteItem, Directive, parse_directive};
pub use expressions::try_eval;
pub use parser::{is_bare_identifier, operand_expr_text, try_split_assignment};
pub use tokens::{split_label, split_mnemonic, strip_comment};

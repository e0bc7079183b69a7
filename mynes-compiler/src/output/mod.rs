//! Output generation: the linker/ROM builder (§4.5), plus the listing and
//! symbol-dump writers built on top of its address resolution.

pub mod listing;
pub mod rom;
pub mod symbols;

pub use listing::render_listing;
pub use rom::{link, raw_image};
pub use symbols::dump_symbols;

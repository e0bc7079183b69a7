pub mod ines1;

/// Nametable mirroring, as recorded in iNES header flags 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
	Horizontal,
	Vertical,
	FourScreen,
}

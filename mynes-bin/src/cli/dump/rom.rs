use clap::Args;
use mynes_rom::INesHeader;
use tokio::io::AsyncReadExt;

use crate::err::Error;

#[derive(Args, Debug)]
pub(super) struct RomCommandArguments {
	#[arg(short, long, help = "path to the rom file")]
	src: String,
}

pub(super) async fn exec(args: RomCommandArguments) -> Result<(), Error> {
	let mut f = tokio::fs::File::open(&args.src).await?;
	let mut buf = vec![0u8; 16];
	let _ = f.read(buf.as_mut_slice()).await?;
	let header = INesHeader::from_bytes(&buf)?;
	info!("header: {:?}", header);
	println!(
		"prg_rom: {} bytes, chr_rom: {} bytes, mirroring: {:?}, battery: {}, mapper: {}",
		header.prg_rom_size(),
		header.chr_rom_size(),
		header.mirroring,
		header.battery,
		header.mapper,
	);
	Ok(())
}

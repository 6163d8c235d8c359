use std::path::PathBuf;

use clap::ValueEnum;
use vpxdoc::vpx::{DecodeOptions, GameItem, Result, RubberData, TextureData, decode_item, encode_item};

use crate::cmd::util::read_input;

#[derive(Clone, Copy, ValueEnum)]
pub enum Kind {
	Rubber,
	Texture,
	Item,
}

#[derive(clap::Args)]
pub struct Args {
	#[arg(value_enum)]
	pub kind: Kind,
	pub input: PathBuf,
	pub output: PathBuf,
}

/// Decode `input` and write the re-encoded stream to `output`.
pub fn run(args: Args, options: &DecodeOptions) -> Result<()> {
	let Args { kind, input, output } = args;

	let bytes = read_input(&input)?;
	let encoded = match kind {
		Kind::Rubber => encode_item(&decode_item::<RubberData>(&bytes, options)?)?,
		Kind::Texture => encode_item(&decode_item::<TextureData>(&bytes, options)?)?,
		Kind::Item => GameItem::decode(&bytes, options)?.encode()?,
	};
	std::fs::write(&output, &encoded)?;

	println!("input: {} ({} bytes)", input.display(), bytes.len());
	println!("output: {} ({} bytes)", output.display(), encoded.len());
	println!("identical: {}", bytes == encoded);
	Ok(())
}

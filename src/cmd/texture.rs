use std::path::PathBuf;

use serde_json::json;
use vpxdoc::vpx::{Blob, DecodeOptions, Result, Texture, TextureBlob, TextureData, decode_item};

use crate::cmd::util::{or_dash, print_json, read_input};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	/// Write the standalone image file to this path.
	#[arg(long)]
	pub export: Option<PathBuf>,
	/// Stop sampling after this many non-opaque pixels.
	#[arg(long, default_value_t = 100)]
	pub threshold: usize,
}

/// Decode a texture, print metadata and alpha statistics, optionally export it.
pub fn run(args: Args, options: &DecodeOptions) -> Result<()> {
	let Args {
		path,
		json,
		export,
		threshold,
	} = args;

	let bytes = read_input(&path)?;
	let data: TextureData = decode_item(&bytes, options)?;
	let texture = Texture::new(data);
	let blob = texture.blob()?;
	let stats = texture.stats(threshold);

	if let Some(out) = &export {
		match &blob {
			Some(blob) => std::fs::write(out, blob.file_content()?)?,
			None => eprintln!("export: texture has no payload"),
		}
	}

	let payload = match &blob {
		Some(TextureBlob::Binary(_)) => "binary",
		Some(TextureBlob::Bitmap(_)) => "bitmap",
		None => "none",
	};

	if json {
		return print_json(&json!({
			"texture": texture.data,
			"payload": payload,
			"payload_len": blob.as_ref().map(|blob| blob.content().len()),
			"is_hdr": texture.is_hdr(),
			"stats": stats.map(|stats| json!({
				"opaque": stats.opaque,
				"translucent": stats.translucent,
				"transparent": stats.transparent,
				"translucent_ratio": stats.translucent_ratio(),
				"transparent_ratio": stats.transparent_ratio(),
				"is_opaque": stats.is_opaque(),
			})),
		}));
	}

	println!("path: {}", path.display());
	println!("name: {}", or_dash(&texture.data.name));
	println!("source_path: {}", or_dash(&texture.data.path));
	println!("size: {}x{}", texture.width(), texture.height());
	println!("is_hdr: {}", texture.is_hdr());
	println!("payload: {payload}");
	match stats {
		Some(stats) => println!(
			"stats: opaque={} translucent={} transparent={} is_opaque={}",
			stats.opaque,
			stats.translucent,
			stats.transparent,
			stats.is_opaque()
		),
		None => println!("stats: unavailable"),
	}

	Ok(())
}

use std::path::PathBuf;

use serde::Serialize;
use vpxdoc::vpx::{ChunkIter, Cursor, DecodeOptions, ItemType, Result, Tag, opens_nested_record};

use crate::cmd::util::{print_json, read_input};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Input starts with a `u32` item-type prefix.
	#[arg(long)]
	pub item: bool,
	/// Only list chunks with this four-character tag.
	#[arg(long)]
	pub tag: Option<String>,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct ChunkRow {
	offset: usize,
	depth: usize,
	tag: Tag,
	len: usize,
}

/// Print every chunk, indenting nested sub-record streams.
pub fn run(args: Args, options: &DecodeOptions) -> Result<()> {
	let Args { path, item, tag, json } = args;
	let only = tag.as_deref().map(Tag::parse).transpose()?;

	let bytes = read_input(&path)?;
	let (item_type, stream, base) = if item {
		let mut cursor = Cursor::new(&bytes);
		let item_type = ItemType::try_from(cursor.read_u32_le()?)?;
		(Some(item_type), &bytes[4..], 4)
	} else {
		(None, bytes.as_slice(), 0)
	};

	let mut rows = Vec::new();
	let mut depth = 0_usize;
	for chunk in ChunkIter::new(stream, options.max_chunk_len).through_terminators() {
		let chunk = chunk?;
		if only.is_none_or(|only| only == chunk.tag) {
			rows.push(ChunkRow {
				offset: base + chunk.offset,
				depth,
				tag: chunk.tag,
				len: chunk.payload.len(),
			});
		}

		if opens_nested_record(chunk.tag) {
			depth += 1;
		} else if chunk.tag.is_end() {
			depth = depth.saturating_sub(1);
		}
	}

	if json {
		return print_json(&rows);
	}

	println!("path: {}", path.display());
	if let Some(item_type) = item_type {
		println!("item_type: {item_type:?}");
	}
	println!("chunks: {}", rows.len());
	println!("offset\ttag\tlen");
	for row in rows {
		println!("{}\t{}{}\t{}", row.offset, "  ".repeat(row.depth), row.tag, row.len);
	}

	Ok(())
}

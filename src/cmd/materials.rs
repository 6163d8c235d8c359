use std::path::PathBuf;

use vpxdoc::vpx::{DecodeOptions, MaterialData, PhysicsMaterialData, Result, decode_fixed_table};

use crate::cmd::util::{print_json, read_input};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Number of records in the table.
	#[arg(long)]
	pub count: usize,
	/// Decode physics materials instead of render materials.
	#[arg(long)]
	pub physics: bool,
	#[arg(long)]
	pub json: bool,
}

/// Decode a back-to-back table of fixed-size material records.
pub fn run(args: Args, options: &DecodeOptions) -> Result<()> {
	let Args { path, count, physics, json } = args;

	let bytes = read_input(&path)?;

	if physics {
		let rows: Vec<PhysicsMaterialData> = decode_fixed_table(&bytes, count, options)?;
		if json {
			return print_json(&rows);
		}

		println!("name\telasticity\tfalloff\tfriction\tscatter");
		for row in rows {
			println!(
				"{}\t{}\t{}\t{}\t{}",
				row.name, row.elasticity, row.elasticity_falloff, row.friction, row.scatter_angle
			);
		}
		return Ok(());
	}

	let rows: Vec<MaterialData> = decode_fixed_table(&bytes, count, options)?;
	if json {
		return print_json(&rows);
	}

	println!("name\tbase\tmetal\troughness\topacity\topacity_active\tedge_alpha");
	for row in rows {
		println!(
			"{}\t0x{:06x}\t{}\t{}\t{}\t{}\t{:.3}",
			row.name,
			row.base_color,
			row.is_metal != 0,
			row.roughness,
			row.opacity,
			row.opacity_active(),
			row.edge_alpha()
		);
	}

	Ok(())
}

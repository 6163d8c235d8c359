#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use vpxdoc::vpx::DecodeOptions;

mod cmd;

#[derive(Parser)]
#[command(name = "vpxdoc", about = "Visual Pinball table record inspection tools")]
struct Cli {
	/// Accept non-zero padding bytes in fixed records.
	#[arg(long, global = true)]
	lenient: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List the chunks of an item stream.
	Chunks(cmd::chunks::Args),
	/// Decode a rubber item stream.
	Rubber(cmd::rubber::Args),
	/// Decode a texture item stream.
	Texture(cmd::texture::Args),
	/// Decode a fixed-size material table.
	Materials(cmd::materials::Args),
	/// Decode and re-encode an item stream.
	Roundtrip(cmd::roundtrip::Args),
}

fn main() {
	env_logger::init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> vpxdoc::vpx::Result<()> {
	let cli = Cli::parse();
	let options = if cli.lenient { DecodeOptions::lenient() } else { DecodeOptions::default() };

	match cli.command {
		Commands::Chunks(args) => cmd::chunks::run(args, &options),
		Commands::Rubber(args) => cmd::rubber::run(args, &options),
		Commands::Texture(args) => cmd::texture::run(args, &options),
		Commands::Materials(args) => cmd::materials::run(args, &options),
		Commands::Roundtrip(args) => cmd::roundtrip::run(args, &options),
	}
}

use std::path::Path;

use serde::Serialize;
use vpxdoc::vpx::Result;

/// Read a whole input file.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
	Ok(std::fs::read(path)?)
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
	println!("{text}");
	Ok(())
}

/// Render a string field, marking empty values.
pub(crate) fn or_dash(value: &str) -> &str {
	if value.is_empty() { "-" } else { value }
}

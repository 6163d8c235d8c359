#![allow(missing_docs)]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use vpxdoc_testkit::{StreamBuilder, rubber_fixture};

#[test]
fn rubber_json_output_is_valid_and_structured() {
	let dir = tempfile::tempdir().expect("temp dir");
	let input = dir.path().join("rubber.bin");
	std::fs::write(&input, rubber_fixture()).expect("write fixture");

	let json = run_json(&["rubber", path_arg(&input), "--json"]);
	assert_eq!(json["name"], "Rubber1");
	assert_eq!(json["material"], "Playfield");
	assert_eq!(json["thickness"], 12);
	assert!(json["drag_points"].as_array().is_some_and(|points| points.len() == 3));
}

#[test]
fn chunks_json_tracks_nesting_depth() {
	let dir = tempfile::tempdir().expect("temp dir");
	let input = dir.path().join("rubber.bin");
	std::fs::write(&input, rubber_fixture()).expect("write fixture");

	let json = run_json(&["chunks", path_arg(&input), "--json"]);
	let rows = json.as_array().expect("chunk rows");
	assert_eq!(rows[0]["tag"], "HTTP");
	assert_eq!(rows[0]["offset"], 0);

	let opener = rows.iter().position(|row| row["tag"] == "DPNT").expect("drag point opener");
	assert_eq!(rows[opener]["depth"], 0);
	assert_eq!(rows[opener + 1]["tag"], "VCEN");
	assert_eq!(rows[opener + 1]["depth"], 1);

	let last = rows.last().expect("terminator");
	assert_eq!(last["tag"], "ENDB");
	assert_eq!(last["depth"], 0);
}

#[test]
fn chunks_tag_filter_keeps_only_matching_rows() {
	let dir = tempfile::tempdir().expect("temp dir");
	let input = dir.path().join("rubber.bin");
	std::fs::write(&input, rubber_fixture()).expect("write fixture");

	let json = run_json(&["chunks", path_arg(&input), "--tag", "VCEN", "--json"]);
	let rows = json.as_array().expect("chunk rows");
	assert_eq!(rows.len(), 3);
	assert!(rows.iter().all(|row| row["tag"] == "VCEN" && row["depth"] == 1));

	let output = run(&["chunks", path_arg(&input), "--tag", "VCENTER"]);
	assert!(!output.status.success(), "five-character tag must fail");
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: invalid tag: VCENTER"));
}

#[test]
fn materials_json_decodes_fixed_table() {
	let mut table = Vec::new();
	for name in ["Playfield", "Rubber"] {
		let mut record = vec![0_u8; 48];
		record[..name.len()].copy_from_slice(name.as_bytes());
		record[32..36].copy_from_slice(&0.25_f32.to_le_bytes());
		table.extend_from_slice(&record);
	}

	let dir = tempfile::tempdir().expect("temp dir");
	let input = dir.path().join("physics.bin");
	std::fs::write(&input, &table).expect("write table");

	let json = run_json(&["materials", path_arg(&input), "--count", "2", "--physics", "--json"]);
	assert_eq!(json[1]["name"], "Rubber");
	assert_eq!(json[0]["elasticity"], 0.25);

	let output = run(&["materials", path_arg(&input), "--count", "3", "--physics"]);
	assert!(!output.status.success(), "short table must fail");
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: malformed fixed record"));
}

#[test]
fn roundtrip_writes_equivalent_stream() {
	let dir = tempfile::tempdir().expect("temp dir");
	let input = dir.path().join("in.bin");
	let output_path = dir.path().join("out.bin");
	let stream = StreamBuilder::new()
		.string(b"NAME", "tex")
		.i32(b"WDTH", 2)
		.i32(b"HGHT", 4)
		.end()
		.finish();
	std::fs::write(&input, &stream).expect("write input");

	let output = run(&["roundtrip", "texture", path_arg(&input), path_arg(&output_path)]);
	assert!(output.status.success(), "roundtrip should succeed");
	assert_eq!(std::fs::read(&output_path).expect("read output"), stream);
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_vpxdoc")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"command failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn path_arg(path: &Path) -> &str {
	path.to_str().expect("utf-8 temp path")
}

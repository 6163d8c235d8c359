use crate::vpx::{
	BiffItem, BiffWriter, DecodeOptions, NestedReader, Result, Tag, TagSpec, VpxError, decode_item, encode_item, opens_nested_record, write_item,
};

#[derive(Debug, Default, PartialEq)]
struct Knob {
	turn: f32,
	label: String,
}

type KnobSpec = TagSpec<Knob>;

const KNOB_FIELDS: &[KnobSpec] = &[
	KnobSpec::float(b"TURN", |knob| knob.turn, |knob, value| knob.turn = value),
	KnobSpec::string(b"LABL", |knob| knob.label.as_str(), |knob, value| knob.label = value),
];

impl BiffItem for Knob {
	const NAME: &'static str = "Knob";

	fn fields() -> &'static [TagSpec<Self>] {
		KNOB_FIELDS
	}
}

#[derive(Debug, PartialEq)]
struct Panel {
	width: f32,
	count: i32,
	lit: bool,
	origin: (f32, f32),
	title: String,
	knobs: Vec<Knob>,
}

impl Default for Panel {
	fn default() -> Self {
		Self {
			width: 0.0,
			count: 0,
			lit: true,
			origin: (0.0, 0.0),
			title: String::new(),
			knobs: Vec::new(),
		}
	}
}

type PanelSpec = TagSpec<Panel>;

const PANEL_FIELDS: &[PanelSpec] = &[
	PanelSpec::float(b"WDTH", |panel| panel.width, |panel, value| panel.width = value),
	PanelSpec::int(b"CONT", |panel| panel.count, |panel, value| panel.count = value),
	PanelSpec::boolean(b"LITE", |panel| panel.lit, |panel, value| panel.lit = value),
	PanelSpec::vec2(b"ORIG", |panel| panel.origin, |panel, x, y| panel.origin = (x, y)),
	PanelSpec::wide_string(b"NAME", |panel| panel.title.as_str(), |panel, value| panel.title = value),
	PanelSpec::marker(b"PNTS", |panel| !panel.knobs.is_empty()),
	PanelSpec::list(b"DPNT", decode_knob, encode_knobs),
];

impl BiffItem for Panel {
	const NAME: &'static str = "Panel";

	fn fields() -> &'static [TagSpec<Self>] {
		PANEL_FIELDS
	}
}

fn decode_knob(panel: &mut Panel, reader: &mut NestedReader<'_, '_>) -> Result<()> {
	panel.knobs.push(reader.decode()?);
	Ok(())
}

fn encode_knobs(panel: &Panel, writer: &mut BiffWriter) -> Result<()> {
	for knob in &panel.knobs {
		writer.write_tag(Tag(*b"DPNT"));
		write_item(knob, writer)?;
	}
	Ok(())
}

fn knob_stream(writer: &mut BiffWriter, turn: f32, label: &str) {
	writer.write_tag(Tag(*b"DPNT"));
	writer.write_f32(Tag(*b"TURN"), turn);
	writer.write_string(Tag(*b"LABL"), label).expect("label encodes");
	writer.write_end();
}

#[test]
fn unknown_tags_are_skipped_by_declared_length() {
	let mut writer = BiffWriter::new();
	writer.write_f32(Tag(*b"WDTH"), 3.5);
	writer.write_chunk(Tag(*b"ZZZZ"), &[0xaa; 13]);
	writer.write_i32(Tag(*b"CONT"), 7);
	writer.write_end();

	let panel: Panel = decode_item(&writer.into_bytes(), &DecodeOptions::default()).expect("panel decodes");
	assert_eq!(panel.width, 3.5);
	assert_eq!(panel.count, 7);
}

#[test]
fn duplicate_scalar_tag_keeps_later_value() {
	let mut writer = BiffWriter::new();
	writer.write_i32(Tag(*b"CONT"), 1);
	writer.write_i32(Tag(*b"CONT"), 2);
	writer.write_end();

	let panel: Panel = decode_item(&writer.into_bytes(), &DecodeOptions::default()).expect("panel decodes");
	assert_eq!(panel.count, 2);
}

#[test]
fn list_elements_keep_stream_order() {
	let mut writer = BiffWriter::new();
	writer.write_tag(Tag(*b"PNTS"));
	knob_stream(&mut writer, 1.0, "first");
	writer.write_f32(Tag(*b"WDTH"), 9.0);
	knob_stream(&mut writer, 2.0, "second");
	knob_stream(&mut writer, 3.0, "third");
	writer.write_end();

	let panel: Panel = decode_item(&writer.into_bytes(), &DecodeOptions::default()).expect("panel decodes");
	let labels: Vec<&str> = panel.knobs.iter().map(|knob| knob.label.as_str()).collect();
	assert_eq!(labels, ["first", "second", "third"]);
	assert_eq!(panel.knobs[2].turn, 3.0);
	assert_eq!(panel.width, 9.0);
}

#[test]
fn top_level_stream_may_end_without_terminator() {
	let mut writer = BiffWriter::new();
	writer.write_f32(Tag(*b"WDTH"), 1.25);

	let panel: Panel = decode_item(&writer.into_bytes(), &DecodeOptions::default()).expect("panel decodes");
	assert_eq!(panel.width, 1.25);
}

#[test]
fn nested_stream_without_terminator_is_an_error() {
	let mut writer = BiffWriter::new();
	writer.write_f32(Tag(*b"WDTH"), 1.0);
	writer.write_tag(Tag(*b"DPNT"));
	writer.write_f32(Tag(*b"TURN"), 0.5);

	let err = decode_item::<Panel>(&writer.into_bytes(), &DecodeOptions::default()).expect_err("missing ENDB");
	assert!(matches!(err, VpxError::UnterminatedRecord { item: "Knob", at: 20 }));
}

#[test]
fn nesting_limit_applies_to_sub_records() {
	let mut writer = BiffWriter::new();
	knob_stream(&mut writer, 1.0, "only");
	writer.write_end();

	let options = DecodeOptions {
		max_nesting: 0,
		..DecodeOptions::default()
	};
	let err = decode_item::<Panel>(&writer.into_bytes(), &options).expect_err("depth exceeded");
	assert!(matches!(err, VpxError::NestingTooDeep { item: "Knob", max: 0 }));
}

#[test]
fn single_byte_bool_is_accepted_and_rewritten_as_int() {
	let mut writer = BiffWriter::new();
	writer.write_chunk(Tag(*b"LITE"), &[0]);
	writer.write_end();

	let panel: Panel = decode_item(&writer.into_bytes(), &DecodeOptions::default()).expect("panel decodes");
	assert!(!panel.lit);

	let encoded = encode_item(&panel).expect("panel encodes");
	assert_eq!(&encoded[..4], &8_i32.to_le_bytes());
	assert_eq!(&encoded[4..8], b"LITE");
	assert_eq!(&encoded[8..12], &0_i32.to_le_bytes());
}

#[test]
fn default_valued_fields_are_not_emitted() {
	let encoded = encode_item(&Panel::default()).expect("panel encodes");
	assert_eq!(encoded.len(), 8);
	assert_eq!(&encoded[4..8], b"ENDB");
}

#[test]
fn encoding_follows_table_order() {
	let panel = Panel {
		width: 2.0,
		title: "Left".to_owned(),
		origin: (1.0, -1.0),
		knobs: vec![Knob {
			turn: 0.25,
			label: String::new(),
		}],
		..Panel::default()
	};

	let encoded = encode_item(&panel).expect("panel encodes");
	let tags: Vec<Tag> = crate::vpx::ChunkIter::new(&encoded, usize::MAX)
		.through_terminators()
		.map(|chunk| chunk.expect("chunk").tag)
		.collect();
	assert_eq!(
		tags,
		vec![
			Tag(*b"WDTH"),
			Tag(*b"ORIG"),
			Tag(*b"NAME"),
			Tag(*b"PNTS"),
			Tag(*b"DPNT"),
			Tag(*b"TURN"),
			Tag::ENDB,
			Tag::ENDB,
		]
	);

	let decoded: Panel = decode_item(&encoded, &DecodeOptions::default()).expect("panel decodes");
	assert_eq!(decoded, panel);
}

#[test]
fn short_scalar_payload_is_rejected() {
	let mut writer = BiffWriter::new();
	writer.write_chunk(Tag(*b"WDTH"), &[1, 2]);

	let err = decode_item::<Panel>(&writer.into_bytes(), &DecodeOptions::default()).expect_err("payload too small");
	assert!(matches!(err, VpxError::ChunkPayloadTooSmall { need: 4, have: 2, .. }));
}

#[test]
fn odd_wide_string_length_is_rejected() {
	let mut payload = 3_i32.to_le_bytes().to_vec();
	payload.extend_from_slice(&[b'a', 0, b'b']);
	let mut writer = BiffWriter::new();
	writer.write_chunk(Tag(*b"NAME"), &payload);

	let err = decode_item::<Panel>(&writer.into_bytes(), &DecodeOptions::default()).expect_err("odd length");
	assert!(matches!(err, VpxError::InvalidWideString { len: 3, .. }));
}

#[test]
fn nested_openers_are_known() {
	assert!(opens_nested_record(Tag(*b"DPNT")));
	assert!(opens_nested_record(Tag(*b"JPEG")));
	assert!(!opens_nested_record(Tag(*b"PNTS")));
}

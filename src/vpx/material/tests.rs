use crate::vpx::{
	Cursor, DecodeOptions, FixedRecord, MaterialData, PhysicsMaterialData, RecordFault, VpxError, Writer, decode_fixed, dequantize_unsigned, encode_fixed,
	quantize_unsigned,
};

fn sample_material() -> MaterialData {
	MaterialData {
		name: "Playfield".to_owned(),
		base_color: 0x00FF_8040,
		glossiness: 0x0020_2020,
		clear_coat: -1,
		wrap_lighting: 0.25,
		is_metal: 1,
		roughness: 0.5,
		glossy_image_lerp: 200,
		edge: 0.75,
		thickness: 48,
		opacity: 0.9,
		opacity_active_edge_alpha: 0b1010_1011,
	}
}

fn encode<R: FixedRecord>(record: &R) -> Vec<u8> {
	let mut writer = Writer::new();
	encode_fixed(record, &mut writer).expect("record encodes");
	writer.into_bytes()
}

#[test]
fn material_round_trips_at_declared_size() {
	let material = sample_material();
	let bytes = encode(&material);
	assert_eq!(bytes.len(), MaterialData::SIZE);
	assert_eq!(bytes.len(), 76);

	let mut cursor = Cursor::new(&bytes);
	let decoded: MaterialData = decode_fixed(&mut cursor, &DecodeOptions::default()).expect("decodes");
	assert_eq!(decoded, material);
	assert!(cursor.is_empty());
}

#[test]
fn material_layout_matches_legacy_offsets() {
	let bytes = encode(&sample_material());

	assert_eq!(&bytes[0..9], b"Playfield");
	assert!(bytes[9..32].iter().all(|byte| *byte == 0));
	assert_eq!(&bytes[32..36], &0x00FF_8040_i32.to_le_bytes());
	assert_eq!(&bytes[44..48], &0.25_f32.to_le_bytes());
	assert_eq!(bytes[48], 1);
	assert_eq!(&bytes[49..52], &[0, 0, 0]);
	assert_eq!(&bytes[52..56], &0.5_f32.to_le_bytes());
	assert_eq!(bytes[56], 200);
	assert_eq!(&bytes[57..60], &[0, 0, 0]);
	assert_eq!(&bytes[64..68], &48_i32.to_le_bytes());
	assert_eq!(bytes[72], 0b1010_1011);
	assert_eq!(&bytes[73..76], &[0, 0, 0]);
}

#[test]
fn material_short_by_one_byte_is_malformed() {
	let bytes = encode(&sample_material());
	let mut cursor = Cursor::new(&bytes[..75]);
	let err = decode_fixed::<MaterialData>(&mut cursor, &DecodeOptions::default()).expect_err("short buffer");
	assert!(matches!(
		err,
		VpxError::MalformedFixedRecord {
			record: "MaterialData",
			delta: -1,
			fault: RecordFault::Truncated,
			..
		}
	));
}

#[test]
fn material_with_dirty_trailing_padding_is_malformed() {
	let mut bytes = encode(&sample_material());
	bytes[75] = 0xCC;

	let err = decode_fixed::<MaterialData>(&mut Cursor::new(&bytes), &DecodeOptions::default()).expect_err("dirty padding");
	assert!(matches!(
		err,
		VpxError::MalformedFixedRecord {
			at: 73,
			delta: 1,
			fault: RecordFault::NonZeroPadding,
			..
		}
	));
}

#[test]
fn material_name_must_leave_room_for_terminator() {
	let material = MaterialData {
		name: "n".repeat(32),
		..MaterialData::default()
	};
	let mut writer = Writer::new();
	let err = encode_fixed(&material, &mut writer).expect_err("32-byte name rejected");
	assert!(matches!(err, VpxError::UnsupportedPayload { len: 32, capacity: 32, .. }));
	assert!(writer.is_empty());
}

#[test]
fn physics_material_round_trips_at_declared_size() {
	let material = PhysicsMaterialData {
		name: "Rubber".to_owned(),
		elasticity: 0.832,
		elasticity_falloff: 0.321,
		friction: 0.685,
		scatter_angle: 5.225,
	};
	let bytes = encode(&material);
	assert_eq!(bytes.len(), 48);

	let decoded: PhysicsMaterialData = decode_fixed(&mut Cursor::new(&bytes), &DecodeOptions::default()).expect("decodes");
	assert_eq!(decoded, material);
}

#[test]
fn quantization_is_stable_for_every_byte() {
	for value in 0..=255_u32 {
		assert_eq!(quantize_unsigned(8, dequantize_unsigned(8, value)), value, "value {value}");
	}
	for value in 0..=127_u32 {
		assert_eq!(quantize_unsigned(7, dequantize_unsigned(7, value)), value, "value {value}");
	}
}

#[test]
fn opacity_byte_packs_flag_and_edge_alpha() {
	let mut material = MaterialData::default();
	material.set_opacity_active_edge_alpha(true, 1.0);
	assert!(material.opacity_active());
	assert_eq!(material.edge_alpha(), 1.0);
	assert_eq!(material.opacity_active_edge_alpha, 0xFF);

	material.set_opacity_active_edge_alpha(false, 0.0);
	assert!(!material.opacity_active());
	assert_eq!(material.edge_alpha(), 0.0);
}

#[test]
fn material_name_with_high_bytes_survives_rewrite() {
	let mut bytes = encode(&sample_material());
	let name: Vec<u8> = (0..31).map(|index| if index % 2 == 0 { 0xE9 } else { b'a' }).collect();
	bytes[..31].copy_from_slice(&name);
	bytes[31] = 0;

	let decoded: MaterialData = decode_fixed(&mut Cursor::new(&bytes), &DecodeOptions::default()).expect("decodes");
	assert_eq!(decoded.name.chars().count(), 31);
	assert!(decoded.name.starts_with('\u{e9}'));

	assert_eq!(encode(&decoded), bytes);
}

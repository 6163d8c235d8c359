#![allow(missing_docs)]

use vpxdoc::vpx::{DecodeOptions, GameItem, ItemType, RubberData, decode_item, encode_item};
use vpxdoc_testkit::{StreamBuilder, drag_point, rubber_fixture};

fn assert_editor_rubber(data: &RubberData) {
	assert_eq!(data.drag_points.len(), 3);
	assert_eq!(data.elasticity, 0.832);
	assert_eq!(data.elasticity_falloff, 0.321);
	assert_eq!(data.friction, 0.685);
	assert_eq!(data.height, 25.556);
	assert!(!data.hit_event);
	assert_eq!(data.hit_height, 25.193);
	assert_eq!(data.image, "test_pattern");
	assert!(data.is_collidable);
	assert!(data.is_reflection_enabled);
	assert!(data.is_visible);
	assert_eq!(data.material, "Playfield");
	assert!(data.overwrite_physics);
	assert_eq!(data.physics_material, "");
	assert_eq!(data.rot_x, 65.23);
	assert_eq!(data.rot_y, 75.273);
	assert_eq!(data.rot_z, 70.962);
	assert_eq!(data.scatter, 5.225);
	assert!(!data.show_in_editor);
	assert!(data.static_rendering);
	assert_eq!(data.thickness, 12);
	assert_eq!(data.name, "Rubber1");
}

#[test]
fn editor_written_rubber_decodes() {
	let data: RubberData = decode_item(&rubber_fixture(), &DecodeOptions::default()).expect("fixture decodes");
	assert_editor_rubber(&data);

	let xs: Vec<f32> = data.drag_points.iter().map(|point| point.vertex.x).collect();
	assert_eq!(xs, [312.0, 402.25, 455.75]);
	assert!(data.drag_points.iter().all(|point| point.is_smooth));
	assert_eq!(data.drag_points[0].editor_layer_name, "Layer 1");
}

#[test]
fn rewritten_rubber_decodes_to_the_same_values() {
	let data: RubberData = decode_item(&rubber_fixture(), &DecodeOptions::default()).expect("fixture decodes");
	let written = encode_item(&data).expect("rubber encodes");
	let reread: RubberData = decode_item(&written, &DecodeOptions::default()).expect("rewrite decodes");

	assert_editor_rubber(&reread);
	assert_eq!(reread, data);
	assert_eq!(encode_item(&reread).expect("rubber encodes"), written);
}

#[test]
fn tags_from_newer_editors_are_dropped_on_rewrite() {
	let stream = StreamBuilder::new()
		.f32(b"ELAS", 0.5)
		.raw(b"NEWT", &[1, 2, 3, 4, 5, 6, 7])
		.tag_only(b"PNTS")
		.tag_only(b"DPNT")
		.nested(&drag_point(1.0, 2.0))
		.end()
		.finish();

	let data: RubberData = decode_item(&stream, &DecodeOptions::default()).expect("stream decodes");
	assert_eq!(data.elasticity, 0.5);
	assert_eq!(data.drag_points.len(), 1);

	let written = encode_item(&data).expect("rubber encodes");
	assert!(!written.windows(4).any(|window| window == b"NEWT"));
}

#[test]
fn prefixed_item_wraps_the_same_stream() {
	let mut bytes = u32::from(ItemType::Rubber).to_le_bytes().to_vec();
	bytes.extend_from_slice(&rubber_fixture());

	match GameItem::decode(&bytes, &DecodeOptions::default()).expect("item decodes") {
		GameItem::Rubber(data) => assert_editor_rubber(&data),
		other => panic!("unexpected item {:?}", other.item_type()),
	}
}

use serde::Serialize;

use crate::vpx::{FieldReader, FieldWriter, FixedRecord, Result};

const NAME_CAPACITY: usize = 32;

/// Render material as stored in the table's legacy material table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialData {
	/// Material name referenced by items.
	pub name: String,
	/// Base color; can be overridden by an item's texture.
	pub base_color: i32,
	/// Specular color of the glossy layer.
	pub glossiness: i32,
	/// Specular color of the clear coat layer.
	pub clear_coat: i32,
	/// Wrap/rim lighting factor, 0 (off) to 1 (full).
	pub wrap_lighting: f32,
	/// Non-zero for metal materials.
	pub is_metal: u8,
	/// Roughness of the glossy layer, 0 (diffuse) to 1 (specular).
	pub roughness: f32,
	/// Quantized glossy image lerp, see [`MaterialData::glossy_image_lerp_factor`].
	pub glossy_image_lerp: u8,
	/// Edge weight for glossy and clear coat, 0 (dark) to 1 (full fresnel).
	pub edge: f32,
	/// Quantized thickness for transparent materials.
	pub thickness: i32,
	/// Opacity, 0 to 1.
	pub opacity: f32,
	/// Bit 0: opacity active; bits 1..8: quantized edge alpha.
	pub opacity_active_edge_alpha: u8,
}

impl Default for MaterialData {
	fn default() -> Self {
		Self {
			name: String::new(),
			base_color: 0xB469FF,
			glossiness: 0,
			clear_coat: 0,
			wrap_lighting: 0.0,
			is_metal: 0,
			roughness: 0.0,
			glossy_image_lerp: 0,
			edge: 1.0,
			thickness: 0,
			opacity: 1.0,
			opacity_active_edge_alpha: 0,
		}
	}
}

impl MaterialData {
	/// Glossy image lerp as a 0..1 factor.
	pub fn glossy_image_lerp_factor(&self) -> f32 {
		dequantize_unsigned(8, u32::from(self.glossy_image_lerp))
	}

	/// Whether opacity is enabled for this material.
	pub fn opacity_active(&self) -> bool {
		self.opacity_active_edge_alpha & 1 != 0
	}

	/// Edge alpha as a 0..1 factor.
	pub fn edge_alpha(&self) -> f32 {
		dequantize_unsigned(7, u32::from(self.opacity_active_edge_alpha >> 1))
	}

	/// Pack the opacity flag and edge alpha into their shared byte.
	pub fn set_opacity_active_edge_alpha(&mut self, active: bool, edge_alpha: f32) {
		let alpha = quantize_unsigned(7, edge_alpha.clamp(0.0, 1.0)) as u8;
		self.opacity_active_edge_alpha = u8::from(active) | (alpha << 1);
	}
}

impl FixedRecord for MaterialData {
	const NAME: &'static str = "MaterialData";
	const SIZE: usize = 76;

	fn read_fields(reader: &mut FieldReader<'_, '_>) -> Result<Self> {
		let name = reader.read_string(NAME_CAPACITY)?;
		let base_color = reader.read_i32()?;
		let glossiness = reader.read_i32()?;
		let clear_coat = reader.read_i32()?;
		let wrap_lighting = reader.read_f32()?;
		let is_metal = reader.read_u8()?;
		reader.padding(3)?;
		let roughness = reader.read_f32()?;
		let glossy_image_lerp = reader.read_u8()?;
		reader.padding(3)?;
		let edge = reader.read_f32()?;
		let thickness = reader.read_i32()?;
		let opacity = reader.read_f32()?;
		let opacity_active_edge_alpha = reader.read_u8()?;
		reader.padding(3)?;

		Ok(Self {
			name,
			base_color,
			glossiness,
			clear_coat,
			wrap_lighting,
			is_metal,
			roughness,
			glossy_image_lerp,
			edge,
			thickness,
			opacity,
			opacity_active_edge_alpha,
		})
	}

	fn write_fields(&self, writer: &mut FieldWriter<'_>) -> Result<()> {
		writer.write_string("MaterialData.name", &self.name, NAME_CAPACITY)?;
		writer.write_i32(self.base_color);
		writer.write_i32(self.glossiness);
		writer.write_i32(self.clear_coat);
		writer.write_f32(self.wrap_lighting);
		writer.write_u8(self.is_metal);
		writer.padding(3);
		writer.write_f32(self.roughness);
		writer.write_u8(self.glossy_image_lerp);
		writer.padding(3);
		writer.write_f32(self.edge);
		writer.write_i32(self.thickness);
		writer.write_f32(self.opacity);
		writer.write_u8(self.opacity_active_edge_alpha);
		writer.padding(3);
		Ok(())
	}
}

/// Physics half of a legacy material.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhysicsMaterialData {
	/// Material name; matches the render material it belongs to.
	pub name: String,
	/// Bounciness.
	pub elasticity: f32,
	/// How fast elasticity falls off with impact speed.
	pub elasticity_falloff: f32,
	/// Surface friction.
	pub friction: f32,
	/// Random scatter angle applied on collision, in degrees.
	pub scatter_angle: f32,
}

impl FixedRecord for PhysicsMaterialData {
	const NAME: &'static str = "PhysicsMaterialData";
	const SIZE: usize = 48;

	fn read_fields(reader: &mut FieldReader<'_, '_>) -> Result<Self> {
		Ok(Self {
			name: reader.read_string(NAME_CAPACITY)?,
			elasticity: reader.read_f32()?,
			elasticity_falloff: reader.read_f32()?,
			friction: reader.read_f32()?,
			scatter_angle: reader.read_f32()?,
		})
	}

	fn write_fields(&self, writer: &mut FieldWriter<'_>) -> Result<()> {
		writer.write_string("PhysicsMaterialData.name", &self.name, NAME_CAPACITY)?;
		writer.write_f32(self.elasticity);
		writer.write_f32(self.elasticity_falloff);
		writer.write_f32(self.friction);
		writer.write_f32(self.scatter_angle);
		Ok(())
	}
}

/// Map a `bits`-wide unsigned integer onto `0..=1`.
pub fn dequantize_unsigned(bits: u32, value: u32) -> f32 {
	let max = (1_u32 << bits) - 1;
	(value as f32 / max as f32).min(1.0)
}

/// Map `0..=1` onto a `bits`-wide unsigned integer; inverse of [`dequantize_unsigned`].
pub fn quantize_unsigned(bits: u32, value: f32) -> u32 {
	let max = (1_u32 << bits) - 1;
	((value * (1_u32 << bits) as f32) as u32).min(max)
}

#[cfg(test)]
mod tests;

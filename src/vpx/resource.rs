use std::borrow::Cow;
use std::collections::HashMap;

/// Textures the player ships with instead of reading them from a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTexture {
	/// Bumper base ring.
	BumperBase,
	/// Bumper cap.
	BumperCap,
	/// Bumper moving ring.
	BumperRing,
	/// Bumper socket.
	BumperSocket,
}

impl BuiltinTexture {
	/// Every built-in texture.
	pub const ALL: [BuiltinTexture; 4] = [Self::BumperBase, Self::BumperCap, Self::BumperRing, Self::BumperSocket];

	/// Texture name as items reference it.
	pub fn name(self) -> &'static str {
		match self {
			Self::BumperBase => "BumperBase",
			Self::BumperCap => "BumperCap",
			Self::BumperRing => "BumperRing",
			Self::BumperSocket => "BumperSocket",
		}
	}

	/// Bundled PNG file name.
	pub fn file_name(self) -> String {
		format!("{}.png", self.name())
	}
}

/// Source of built-in texture bytes, supplied by the caller.
pub trait ResourceProvider {
	/// Return the PNG bytes for `texture`, or `None` when unavailable.
	fn load(&self, texture: BuiltinTexture) -> Option<Cow<'_, [u8]>>;
}

/// In-memory provider, typically filled from a resource directory or `include_bytes!`.
#[derive(Debug, Default, Clone)]
pub struct MemoryResources {
	files: HashMap<BuiltinTexture, Vec<u8>>,
}

impl MemoryResources {
	/// Create an empty provider.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register bytes for `texture`, replacing earlier ones.
	pub fn insert(&mut self, texture: BuiltinTexture, bytes: Vec<u8>) {
		self.files.insert(texture, bytes);
	}

	/// Load every built-in texture found as `<name>.png` under `dir`; missing files are skipped.
	pub fn from_dir(dir: &std::path::Path) -> crate::vpx::Result<Self> {
		let mut resources = Self::new();
		for texture in BuiltinTexture::ALL {
			let path = dir.join(texture.file_name());
			if path.is_file() {
				resources.insert(texture, std::fs::read(&path)?);
			}
		}
		Ok(resources)
	}
}

impl ResourceProvider for MemoryResources {
	fn load(&self, texture: BuiltinTexture) -> Option<Cow<'_, [u8]>> {
		self.files.get(&texture).map(|bytes| Cow::Borrowed(bytes.as_slice()))
	}
}

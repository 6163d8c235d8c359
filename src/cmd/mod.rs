/// Chunk listing command.
pub mod chunks;
/// Fixed-size material table command.
pub mod materials;
/// Rubber decode command.
pub mod rubber;
/// Decode/re-encode command.
pub mod roundtrip;
/// Texture decode and export command.
pub mod texture;

mod util;

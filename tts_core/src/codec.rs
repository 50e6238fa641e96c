use base64::{engine::general_purpose, Engine as _};

pub use hex::FromHexError as HexError;

/// Decode the hex string MiniMax returns in `data.audio` into raw bytes.
pub fn decode_hex(hex_audio: &str) -> Result<Vec<u8>, HexError> {
    hex::decode(hex_audio)
}

/// Encode raw audio bytes as standard padded Base64 for embedding in JSON.
pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(encoded)
}

/// Hex in, Base64 out. Both sides describe the same bytes.
pub fn hex_to_base64(hex_audio: &str) -> Result<String, HexError> {
    decode_hex(hex_audio).map(|bytes| encode_base64(&bytes))
}

//! Lowercase hex encoding for keys, seeds and signatures.

use crate::error::CryptoError;

/// Render bytes as a lowercase hex string.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string (either case, surrounding whitespace ignored).
pub fn decode(hex: &str) -> Result<Vec<u8>, CryptoError> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return Err(CryptoError::HexDecode(format!(
            "hex string has odd length: {}",
            hex.len()
        )));
    }
    if !hex.is_ascii() {
        return Err(CryptoError::HexDecode("hex string must be ASCII".to_string()));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| CryptoError::HexDecode(format!("invalid hex at position {i}: {e}")))
        })
        .collect()
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_array<const N: usize>(hex: &str) -> Result<[u8; N], CryptoError> {
    let bytes = decode(hex)?;
    bytes.try_into().map_err(|v: Vec<u8>| {
        CryptoError::HexDecode(format!("expected {N} bytes, got {}", v.len()))
    })
}

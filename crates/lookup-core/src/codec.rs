//! Hexadecimal key codec
//!
//! Secret keys and signatures travel as hex text; everything below the
//! codec works on raw bytes. Decoding accepts either case, encoding always
//! produces lowercase, so `bytes_to_hex(hex_to_bytes(h)?)` is `h` lowercased.

use crate::error::Result;

/// Decode a hex string into raw bytes
///
/// Fails with `InvalidEncoding` on odd length or any non-hex character.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(hex)?)
}

/// Encode raw bytes as lowercase hex
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_decode_known_bytes() {
        assert_eq!(hex_to_bytes("00ff10").unwrap(), vec![0x00, 0xff, 0x10]);
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_encode_is_lowercase() {
        assert_eq!(bytes_to_hex(&[0xAB, 0xCD, 0x01]), "abcd01");
    }

    #[test]
    fn test_uppercase_input_normalizes() {
        let bytes = hex_to_bytes("DEADBEEF").unwrap();
        assert_eq!(bytes_to_hex(&bytes), "deadbeef");
    }

    #[test]
    fn test_odd_length_rejected() {
        assert!(matches!(hex_to_bytes("abc"), Err(CoreError::InvalidEncoding(_))));
    }

    #[test]
    fn test_non_hex_rejected() {
        assert!(matches!(hex_to_bytes("zz"), Err(CoreError::InvalidEncoding(_))));
        assert!(matches!(hex_to_bytes("0g"), Err(CoreError::InvalidEncoding(_))));
        assert!(matches!(hex_to_bytes("00 1"), Err(CoreError::InvalidEncoding(_))));
    }
}

//! Inline audio payload decoding.
//!
//! The provider documents `data.audio` as hex, but some deployments return
//! base64. Hex is tried first; a payload that happens to be valid hex is
//! always read as hex. ASCII whitespace anywhere in the payload (wrapped
//! base64, space-separated hex) is ignored.

use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub fn decode_audio(payload: &str) -> Result<Vec<u8>> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    match hex::decode(&compact) {
        Ok(bytes) => Ok(bytes),
        Err(hex_err) => STANDARD.decode(&compact).map_err(|b64_err| {
            Error::decode(format!(
                "audio payload is neither hex ({}) nor base64 ({})",
                hex_err, b64_err
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_payload() {
        assert_eq!(decode_audio("48656c6c6f").unwrap(), b"Hello");
        assert_eq!(decode_audio("FFFB9064").unwrap(), vec![0xff, 0xfb, 0x90, 0x64]);
    }

    #[test]
    fn test_hex_round_trip() {
        let original: Vec<u8> = (0u8..=255).collect();
        assert_eq!(decode_audio(&hex::encode(&original)).unwrap(), original);
    }

    #[test]
    fn test_base64_fallback() {
        // "SUQz" is not hex; decodes to an ID3 tag header.
        assert_eq!(decode_audio("SUQzBAA=").unwrap(), b"ID3\x04\x00");
        let original = b"\x00\x01binary audio\xff".to_vec();
        assert_eq!(decode_audio(&STANDARD.encode(&original)).unwrap(), original);
    }

    #[test]
    fn test_interior_whitespace_is_ignored() {
        assert_eq!(decode_audio("48 65 6c").unwrap(), b"Hel");
        assert_eq!(decode_audio("SUQz\nBAA=").unwrap(), b"ID3\x04\x00");
        assert_eq!(decode_audio(" SUQz\r\n BAA=\n").unwrap(), b"ID3\x04\x00");
    }

    #[test]
    fn test_ambiguous_payload_reads_as_hex() {
        // Valid in both alphabets; hex wins.
        assert_eq!(decode_audio("abcd").unwrap(), vec![0xab, 0xcd]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = decode_audio("not audio at all!").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}

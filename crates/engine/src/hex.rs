//! crates/engine/src/hex.rs
//!
//! Hexadecimal encoding for test vector digests.

use ::hex::FromHexError;

use crate::HexError;

/// Decodes a string of hex digit pairs into bytes.
///
/// Upper- and lowercase digits are accepted. Decoding stops at the first
/// invalid pair, and odd-length input is rejected rather than truncated.
///
/// # Examples
///
/// ```
/// use engine::hex;
///
/// assert_eq!(hex::decode("00fFa5")?, vec![0x00, 0xff, 0xa5]);
/// assert!(hex::decode("abc").is_err());
/// # Ok::<(), engine::HexError>(())
/// ```
pub fn decode(text: &str) -> Result<Vec<u8>, HexError> {
    ::hex::decode(text).map_err(|error| match error {
        // Report the start of the pair holding the bad digit.
        FromHexError::InvalidHexCharacter { index, .. } => {
            HexError::InvalidDigit { index: index & !1 }
        }
        FromHexError::OddLength | FromHexError::InvalidStringLength => {
            HexError::OddLength { len: text.len() }
        }
    })
}

/// Encodes bytes as lowercase hex.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input_decodes_to_nothing() {
        assert_eq!(decode(""), Ok(Vec::new()));
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn odd_length_is_rejected() {
        assert_eq!(decode("a"), Err(HexError::OddLength { len: 1 }));
        assert_eq!(decode("abcde"), Err(HexError::OddLength { len: 5 }));
        assert_eq!(decode("zzz"), Err(HexError::OddLength { len: 3 }));
    }

    #[test]
    fn invalid_digit_reports_pair_start() {
        assert_eq!(decode("00g0"), Err(HexError::InvalidDigit { index: 2 }));
        assert_eq!(decode("000x"), Err(HexError::InvalidDigit { index: 2 }));
        assert_eq!(decode("  "), Err(HexError::InvalidDigit { index: 0 }));
    }

    #[test]
    fn non_ascii_input_is_rejected() {
        assert_eq!(decode("é"), Err(HexError::InvalidDigit { index: 0 }));
    }

    #[test]
    fn mixed_case_decodes() {
        assert_eq!(decode("DeadBEEF"), Ok(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
    }

    proptest! {
        #[test]
        fn decode_then_encode_normalizes_case(text in "([0-9a-fA-F]{2}){0,48}") {
            let bytes = decode(&text).expect("valid hex");
            prop_assert_eq!(bytes.len(), text.len() / 2);
            prop_assert_eq!(encode(&bytes), text.to_lowercase());
        }

        #[test]
        fn encode_then_decode_is_identity(bytes in prop::collection::vec(any::<u8>(), 0..96)) {
            let text = encode(&bytes);
            prop_assert_eq!(text.len(), bytes.len() * 2);
            prop_assert_eq!(decode(&text), Ok(bytes));
        }
    }
}

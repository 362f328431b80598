//! Parsing and serialisation of the `<nonce>:<tag>:<ciphertext>` envelope.

use std::fmt;
use std::str::FromStr;

use super::cipher::CipherError;
use super::{NONCE_LEN, TAG_LEN};

/// Separator between the three hex fields of an envelope.
pub const DELIMITER: char = ':';

/// A parsed, encrypted password value.
///
/// The string representation is `<hex(nonce)>:<hex(tag)>:<hex(ciphertext)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Detached GCM authentication tag.
    pub tag: [u8; TAG_LEN],
    /// Raw ciphertext bytes, same length as the plaintext.
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}",
            hex::encode(self.nonce),
            hex::encode(self.tag),
            hex::encode(&self.ciphertext),
        )
    }
}

impl FromStr for Envelope {
    type Err = CipherError;

    /// Parse an envelope string.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidEnvelopeFormat`] if the string does not have
    /// exactly three non-empty fields, if the nonce or tag field is the wrong
    /// length, or if any field is not valid hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(DELIMITER);
        let (Some(nonce_hex), Some(tag_hex), Some(ciphertext_hex), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CipherError::InvalidEnvelopeFormat);
        };
        if nonce_hex.is_empty() || tag_hex.is_empty() || ciphertext_hex.is_empty() {
            return Err(CipherError::InvalidEnvelopeFormat);
        }

        let nonce = decode_fixed::<NONCE_LEN>(nonce_hex)?;
        let tag = decode_fixed::<TAG_LEN>(tag_hex)?;
        let ciphertext =
            hex::decode(ciphertext_hex).map_err(|_| CipherError::InvalidEnvelopeFormat)?;

        Ok(Self {
            nonce,
            tag,
            ciphertext,
        })
    }
}

fn decode_fixed<const N: usize>(field: &str) -> Result<[u8; N], CipherError> {
    let mut out = [0u8; N];
    hex::decode_to_slice(field, &mut out).map_err(|_| CipherError::InvalidEnvelopeFormat)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONCE: &str = "000102030405060708090a0b";
    const TAG: &str = "f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff";

    fn parse(s: &str) -> Result<Envelope, CipherError> {
        s.parse()
    }

    #[test]
    fn parses_well_formed_envelope() {
        let env = parse(&format!("{NONCE}:{TAG}:deadbeef")).unwrap();
        assert_eq!(env.nonce[11], 0x0b);
        assert_eq!(env.tag[0], 0xf0);
        assert_eq!(env.ciphertext, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn display_is_lowercase_hex() {
        let env = Envelope {
            nonce: [0xAB; NONCE_LEN],
            tag: [0xCD; TAG_LEN],
            ciphertext: vec![0xEF],
        };
        let s = env.to_string();
        assert_eq!(s, format!("{}:{}:ef", "ab".repeat(12), "cd".repeat(16)));
    }

    #[test]
    fn accepts_uppercase_hex() {
        let upper = format!("{}:{}:DEADBEEF", NONCE.to_uppercase(), TAG.to_uppercase());
        assert_eq!(parse(&upper).unwrap().ciphertext.len(), 4);
    }

    #[test]
    fn rejects_empty_ciphertext_field() {
        assert!(matches!(
            parse(&format!("{NONCE}:{TAG}:")),
            Err(CipherError::InvalidEnvelopeFormat)
        ));
    }

    #[test]
    fn rejects_wrong_field_count() {
        let four_fields = format!("{NONCE}:{TAG}:00:00");
        for s in ["", "abc", "a:b", "::", ":::", four_fields.as_str()] {
            assert!(
                matches!(parse(s), Err(CipherError::InvalidEnvelopeFormat)),
                "expected format error for {s:?}"
            );
        }
    }

    #[test]
    fn rejects_empty_nonce_or_tag() {
        assert!(parse(&format!(":{TAG}:00")).is_err());
        assert!(parse(&format!("{NONCE}::00")).is_err());
    }

    #[test]
    fn rejects_wrong_nonce_length() {
        assert!(parse(&format!("0001:{TAG}:00")).is_err());
        assert!(parse(&format!("{NONCE}00:{TAG}:00")).is_err());
    }

    #[test]
    fn rejects_wrong_tag_length() {
        assert!(parse(&format!("{NONCE}:f0f1:00")).is_err());
    }

    #[test]
    fn rejects_odd_length_ciphertext() {
        assert!(parse(&format!("{NONCE}:{TAG}:abc")).is_err());
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert!(parse(&format!("{NONCE}:{TAG}:zz")).is_err());
        assert!(parse(&format!("00010203040506070809zz0b:{TAG}:00")).is_err());
    }
}

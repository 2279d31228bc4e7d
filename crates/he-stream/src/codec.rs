//! Base64 encoding of key and ciphertext material.

use base64::{engine::general_purpose, Engine as _};

use crate::{Error, Result};

/// Encodes bytes with the standard, padded base64 alphabet.
pub fn encode(bytes: &[u8]) -> String {
	general_purpose::STANDARD.encode(bytes)
}

/// Decodes standard base64; `field` names the decoded value in errors.
pub fn decode(field: &'static str, text: &str) -> Result<Vec<u8>> {
	general_purpose::STANDARD
		.decode(text.trim())
		.map_err(|source| Error::Base64 { field, source })
}

#[cfg(test)]
mod tests {
	use super::{decode, encode};
	use crate::Error;

	#[test]
	fn standard_alphabet() {
		assert_eq!(encode(&[0xfb, 0xff, 0x00]), "+/8A");
		assert_eq!(decode("public key", "+/8A\n").unwrap(), vec![0xfb, 0xff, 0x00]);
	}

	#[test]
	fn names_field() {
		let e = decode("secret key", "not base64!").unwrap_err();
		assert!(matches!(e, Error::Base64 { field: "secret key", .. }));
		assert!(e.to_string().starts_with("failed to decode secret key"));
	}
}

use std::path::PathBuf;

use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error)]
pub enum Error {
	/// Indicates an error raised by the homomorphic encryption library.
	#[error("{0}")]
	Fhe(#[from] fhe::Error),

	/// Indicates an I/O error on a keypair or ciphertext file.
	#[error("I/O error on {}: {source}", .path.display())]
	Io {
		/// The file being read or written.
		path: PathBuf,
		/// The underlying error.
		source: std::io::Error,
	},

	/// Indicates that a JSON document could not be parsed or produced.
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// Indicates that a base64 field could not be decoded.
	#[error("failed to decode {field}: {source}")]
	Base64 {
		/// The field being decoded.
		field: &'static str,
		/// The underlying error.
		source: base64::DecodeError,
	},

	/// Indicates that a keypair document lacks a required field.
	#[error("missing {0} in keypair file")]
	MissingField(&'static str),

	/// Indicates that the secret key material has the wrong length.
	#[error("invalid secret key: expected {expected} bytes, found {found}")]
	SecretKeyLength {
		/// The expected length.
		expected: usize,
		/// The length found.
		found: usize,
	},

	/// Indicates that a secret key does not decrypt under its public key.
	#[error("secret key and public key do not belong to the same keypair")]
	KeyMismatch,

	/// Indicates that a bearer token was not provided.
	#[error("a bearer token is required")]
	MissingToken,

	/// Indicates a transport-level HTTP failure.
	#[error("API request failed: {0}")]
	Http(#[from] ureq::Error),

	/// Indicates that the API answered with a status other than 200.
	#[error("API request failed with status code: {0}")]
	Status(u16),

	/// Indicates that the API did not validate the token.
	#[error("invalid token or unexpected API response (message: {})", .0.as_deref().unwrap_or("<none>"))]
	InvalidToken(Option<String>),

	/// Indicates that the API response carried no stream id.
	#[error("response did not include an ID")]
	MissingId,

	/// Indicates that more values were provided than there are slots.
	#[error("too many values: {found} exceeds the {slots} available slots")]
	TooManyValues {
		/// The number of values provided.
		found: usize,
		/// The number of slots.
		slots: usize,
	},

	/// Indicates that a value does not fit in the plaintext space.
	#[error("value {value} at index {index} is not below the plaintext modulus {modulus}")]
	ValueOutOfRange {
		/// Position of the value.
		index: usize,
		/// The offending value.
		value: u64,
		/// The plaintext modulus.
		modulus: u64,
	},
}

#[cfg(test)]
mod tests {
	use super::Error;

	#[test]
	fn error_strings() {
		assert_eq!(
			Error::MissingField("secret key").to_string(),
			"missing secret key in keypair file"
		);
		assert_eq!(
			Error::Status(401).to_string(),
			"API request failed with status code: 401"
		);
		assert_eq!(
			Error::InvalidToken(None).to_string(),
			"invalid token or unexpected API response (message: <none>)"
		);
		assert_eq!(
			Error::InvalidToken(Some("Token Expired".to_string())).to_string(),
			"invalid token or unexpected API response (message: Token Expired)"
		);
		assert_eq!(
			Error::TooManyValues {
				found: 5000,
				slots: 4096
			}
			.to_string(),
			"too many values: 5000 exceeds the 4096 available slots"
		);
	}
}

//! Scheme parameters shared by every keypair of a stream.

use std::sync::Arc;

use fhe::bfv::{BfvParameters, BfvParametersBuilder};

use crate::Result;

/// Literal description of the scheme parameters, from which the library
/// derives the actual moduli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParametersLiteral {
	/// Base-2 logarithm of the ring degree.
	pub log_degree: usize,
	/// Bit sizes of the primes in the ciphertext modulus chain.
	pub moduli_sizes: &'static [usize],
	/// The plaintext modulus.
	pub plaintext_modulus: u64,
}

/// Parameters every stream keypair is generated under: ring degree 4096, a
/// single 58-bit ciphertext modulus and plaintext modulus 65537.
///
/// 65537 is congruent to 1 modulo twice the degree, so plaintexts can be
/// packed slot-wise.
pub const STREAM_PARAMETERS: ParametersLiteral = ParametersLiteral {
	log_degree: 12,
	moduli_sizes: &[58],
	plaintext_modulus: 65537,
};

impl ParametersLiteral {
	/// Returns the ring degree.
	pub const fn degree(&self) -> usize {
		1 << self.log_degree
	}

	/// Returns the number of plaintext slots a single ciphertext holds.
	pub const fn slots(&self) -> usize {
		self.degree()
	}

	/// Builds the library parameters. The moduli are generated
	/// deterministically, so the same literal always builds the same
	/// parameters.
	pub fn build(&self) -> Result<Arc<BfvParameters>> {
		let params = BfvParametersBuilder::new()
			.set_degree(self.degree())
			.set_plaintext_modulus(self.plaintext_modulus)
			.set_moduli_sizes(self.moduli_sizes)
			.build_arc()?;
		log::debug!(
			"built parameters: degree {}, moduli {:?}, plaintext modulus {}",
			params.degree(),
			params.moduli(),
			params.plaintext()
		);
		Ok(params)
	}
}

/// Builds the parameters every stream keypair uses.
pub fn stream_parameters() -> Result<Arc<BfvParameters>> {
	STREAM_PARAMETERS.build()
}

#[cfg(test)]
mod tests {
	use super::{stream_parameters, ParametersLiteral, STREAM_PARAMETERS};

	#[test]
	fn literal() {
		assert_eq!(STREAM_PARAMETERS.degree(), 4096);
		assert_eq!(STREAM_PARAMETERS.slots(), 4096);
		assert_eq!(
			STREAM_PARAMETERS.plaintext_modulus % (2 * STREAM_PARAMETERS.degree() as u64),
			1
		);
	}

	#[test]
	fn build() -> Result<(), Box<dyn std::error::Error>> {
		let params = stream_parameters()?;
		assert_eq!(params.degree(), 4096);
		assert_eq!(params.plaintext(), 65537);
		assert_eq!(params.moduli().len(), 1);
		assert!(params.moduli()[0] < 1 << 58);
		assert!(params.moduli()[0] >= 1 << 57);

		// Building twice yields the same moduli.
		let again = stream_parameters()?;
		assert_eq!(params.moduli(), again.moduli());
		Ok(())
	}

	#[test]
	fn invalid_literal() {
		let literal = ParametersLiteral {
			log_degree: 12,
			moduli_sizes: &[58],
			plaintext_modulus: 1,
		};
		assert!(literal.build().is_err());
	}
}

//! Encryption of integer vectors into plaintext slots, and the way back.

use std::sync::Arc;

use fhe::bfv::{BfvParameters, Ciphertext, Encoding, Plaintext, PublicKey, SecretKey};
use fhe_traits::{
	DeserializeParametrized, FheDecoder, FheDecrypter, FheEncoder, FheEncrypter,
	Serialize as FheSerialize,
};
use rand::{CryptoRng, RngCore};

use crate::{Error, Result};

/// Packs integer vectors slot-wise into ciphertexts under a stream's
/// parameters.
#[derive(Debug, Clone)]
pub struct VectorCipher {
	par: Arc<BfvParameters>,
}

impl VectorCipher {
	/// Creates a cipher for the given parameters.
	pub fn new(par: &Arc<BfvParameters>) -> Self {
		Self { par: par.clone() }
	}

	/// Number of values a single ciphertext holds.
	pub fn slots(&self) -> usize {
		self.par.degree()
	}

	/// Every value must be strictly below this modulus.
	pub fn plaintext_modulus(&self) -> u64 {
		self.par.plaintext()
	}

	/// Encrypts `values` under `pk`, placing `values[i]` in slot `i` and zero
	/// in every remaining slot.
	pub fn encrypt<R: RngCore + CryptoRng>(
		&self,
		values: &[u64],
		pk: &PublicKey,
		rng: &mut R,
	) -> Result<Ciphertext> {
		let slots = self.slots();
		if values.len() > slots {
			return Err(Error::TooManyValues {
				found: values.len(),
				slots,
			});
		}
		let modulus = self.plaintext_modulus();
		if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| **v >= modulus) {
			return Err(Error::ValueOutOfRange {
				index,
				value,
				modulus,
			});
		}

		let mut input = vec![0u64; slots];
		input[..values.len()].copy_from_slice(values);

		let pt = Plaintext::try_encode(&input, Encoding::simd(), &self.par)?;
		let ct = pk.try_encrypt(&pt, rng)?;
		log::debug!("encrypted {} values into {} slots", values.len(), slots);
		Ok(ct)
	}

	/// Decrypts `ct` with `sk` and returns the content of every slot.
	pub fn decrypt(&self, sk: &SecretKey, ct: &Ciphertext) -> Result<Vec<u64>> {
		let pt = sk.try_decrypt(ct)?;
		let values = Vec::<u64>::try_decode(&pt, Encoding::simd())?;
		Ok(values)
	}

	/// Serializes a ciphertext with the library's own encoding.
	pub fn ciphertext_to_bytes(&self, ct: &Ciphertext) -> Vec<u8> {
		ct.to_bytes()
	}

	/// Reads back a ciphertext produced by [`VectorCipher::ciphertext_to_bytes`].
	pub fn ciphertext_from_bytes(&self, bytes: &[u8]) -> Result<Ciphertext> {
		Ok(Ciphertext::from_bytes(bytes, &self.par)?)
	}
}

#[cfg(test)]
mod tests {
	use std::error::Error as StdError;

	use proptest::prelude::*;
	use rand::{thread_rng, Rng};

	use super::VectorCipher;
	use crate::{stream_parameters, Error, Keypair};

	fn random_values<R: Rng>(size: usize, modulus: u64, rng: &mut R) -> Vec<u64> {
		(0..size).map(|_| rng.gen_range(0..modulus)).collect()
	}

	#[test]
	fn encrypt_decrypt() -> Result<(), Box<dyn StdError>> {
		let mut rng = thread_rng();
		let params = stream_parameters()?;
		let keypair = Keypair::generate(&params, &mut rng);
		let cipher = VectorCipher::new(&params);

		let input = [2, 2, 4, 5, 6, 7];
		let ct = cipher.encrypt(&input, keypair.public_key(), &mut rng)?;
		let output = cipher.decrypt(keypair.secret_key(), &ct)?;

		assert_eq!(output.len(), cipher.slots());
		assert_eq!(&output[..input.len()], &input);
		assert!(output[input.len()..].iter().all(|v| *v == 0));
		Ok(())
	}

	#[test]
	fn full_and_empty_vectors() -> Result<(), Box<dyn StdError>> {
		let mut rng = thread_rng();
		let params = stream_parameters()?;
		let keypair = Keypair::generate(&params, &mut rng);
		let cipher = VectorCipher::new(&params);

		let full = random_values(cipher.slots(), params.plaintext(), &mut rng);
		let ct = cipher.encrypt(&full, keypair.public_key(), &mut rng)?;
		assert_eq!(cipher.decrypt(keypair.secret_key(), &ct)?, full);

		let ct = cipher.encrypt(&[], keypair.public_key(), &mut rng)?;
		assert_eq!(
			cipher.decrypt(keypair.secret_key(), &ct)?,
			vec![0; cipher.slots()]
		);
		Ok(())
	}

	#[test]
	fn rejects_invalid_input() -> Result<(), Box<dyn StdError>> {
		let mut rng = thread_rng();
		let params = stream_parameters()?;
		let keypair = Keypair::generate(&params, &mut rng);
		let cipher = VectorCipher::new(&params);

		let too_many = vec![1; cipher.slots() + 1];
		assert!(matches!(
			cipher.encrypt(&too_many, keypair.public_key(), &mut rng),
			Err(Error::TooManyValues {
				found: 4097,
				slots: 4096
			})
		));

		assert!(matches!(
			cipher.encrypt(&[1, 65537, 3], keypair.public_key(), &mut rng),
			Err(Error::ValueOutOfRange {
				index: 1,
				value: 65537,
				modulus: 65537
			})
		));
		Ok(())
	}

	#[test]
	fn ciphertext_bytes() -> Result<(), Box<dyn StdError>> {
		let mut rng = thread_rng();
		let params = stream_parameters()?;
		let keypair = Keypair::generate(&params, &mut rng);
		let cipher = VectorCipher::new(&params);

		let ct = cipher.encrypt(&[10, 20, 30], keypair.public_key(), &mut rng)?;
		let bytes = cipher.ciphertext_to_bytes(&ct);
		let restored = cipher.ciphertext_from_bytes(&bytes)?;
		assert_eq!(restored, ct);
		assert_eq!(
			&cipher.decrypt(keypair.secret_key(), &restored)?[..3],
			&[10, 20, 30]
		);

		assert!(cipher.ciphertext_from_bytes(b"garbage").is_err());
		Ok(())
	}

	#[test]
	fn other_key_does_not_decrypt() -> Result<(), Box<dyn StdError>> {
		let mut rng = thread_rng();
		let params = stream_parameters()?;
		let keypair = Keypair::generate(&params, &mut rng);
		let other = Keypair::generate(&params, &mut rng);
		let cipher = VectorCipher::new(&params);

		let input = random_values(cipher.slots(), params.plaintext(), &mut rng);
		let ct = cipher.encrypt(&input, keypair.public_key(), &mut rng)?;
		assert_ne!(cipher.decrypt(other.secret_key(), &ct)?, input);
		Ok(())
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(8))]

		#[test]
		fn slots_are_preserved(input in prop::collection::vec(0u64..65537, 0..64)) {
			let mut rng = thread_rng();
			let params = stream_parameters().unwrap();
			let keypair = Keypair::generate(&params, &mut rng);
			let cipher = VectorCipher::new(&params);

			let ct = cipher.encrypt(&input, keypair.public_key(), &mut rng).unwrap();
			let output = cipher.decrypt(keypair.secret_key(), &ct).unwrap();
			prop_assert_eq!(&output[..input.len()], &input[..]);
			prop_assert!(output[input.len()..].iter().all(|v| *v == 0));
		}
	}
}

//! Stream keypairs.

use std::{fmt, sync::Arc};

use fhe::bfv::{BfvParameters, PublicKey, SecretKey};
use fhe_traits::{DeserializeParametrized, Serialize as FheSerialize};
use itertools::Itertools;
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::{Error, Result, VectorCipher};

/// Size in bytes of the seed a secret key is expanded from.
pub const SECRET_SEED_SIZE: usize = 32;

/// A secret key together with the public key derived from it.
///
/// The secret key is stored as the seed it is expanded from: the library
/// samples the key from a ChaCha20 stream keyed by that seed, so the same
/// seed always yields the same key under the same parameters.
pub struct Keypair {
	seed: Zeroizing<[u8; SECRET_SEED_SIZE]>,
	sk: SecretKey,
	pk: PublicKey,
	par: Arc<BfvParameters>,
}

impl Keypair {
	/// Generates a fresh keypair.
	pub fn generate<R: RngCore + CryptoRng>(par: &Arc<BfvParameters>, rng: &mut R) -> Self {
		let mut seed = Zeroizing::new([0u8; SECRET_SEED_SIZE]);
		rng.fill_bytes(&mut seed[..]);
		let sk = expand_secret_key(&seed, par);
		let pk = PublicKey::new(&sk, rng);

		let keypair = Self {
			seed,
			sk,
			pk,
			par: par.clone(),
		};
		log::debug!("generated keypair {}", keypair.fingerprint());
		keypair
	}

	/// Rebuilds a keypair from the bytes returned by
	/// [`Keypair::secret_key_bytes`] and [`Keypair::public_key_bytes`].
	///
	/// This does not check that the two halves belong together; see
	/// [`Keypair::check_consistency`].
	pub fn from_bytes(sk: &[u8], pk: &[u8], par: &Arc<BfvParameters>) -> Result<Self> {
		if sk.len() != SECRET_SEED_SIZE {
			return Err(Error::SecretKeyLength {
				expected: SECRET_SEED_SIZE,
				found: sk.len(),
			});
		}
		let mut seed = Zeroizing::new([0u8; SECRET_SEED_SIZE]);
		seed.copy_from_slice(sk);

		Ok(Self {
			sk: expand_secret_key(&seed, par),
			pk: PublicKey::from_bytes(pk, par)?,
			seed,
			par: par.clone(),
		})
	}

	/// Returns the secret key material.
	pub fn secret_key_bytes(&self) -> Zeroizing<Vec<u8>> {
		Zeroizing::new(self.seed.to_vec())
	}

	/// Returns the public key serialized by the library.
	pub fn public_key_bytes(&self) -> Vec<u8> {
		self.pk.to_bytes()
	}

	/// The secret key.
	pub fn secret_key(&self) -> &SecretKey {
		&self.sk
	}

	/// The public key.
	pub fn public_key(&self) -> &PublicKey {
		&self.pk
	}

	/// The parameters both keys live under.
	pub fn parameters(&self) -> &Arc<BfvParameters> {
		&self.par
	}

	/// Short hex digest of the public key, safe to log.
	pub fn fingerprint(&self) -> String {
		fingerprint(&self.public_key_bytes())
	}

	/// Checks that the secret key decrypts what the public key encrypts,
	/// using a random probe filling every slot.
	pub fn check_consistency<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<()> {
		let cipher = VectorCipher::new(&self.par);
		let modulus = cipher.plaintext_modulus();
		let probe = (0..cipher.slots())
			.map(|_| rng.gen_range(0..modulus))
			.collect_vec();

		let ct = cipher.encrypt(&probe, &self.pk, rng)?;
		if cipher.decrypt(&self.sk, &ct)? == probe {
			Ok(())
		} else {
			Err(Error::KeyMismatch)
		}
	}
}

impl fmt::Debug for Keypair {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Keypair")
			.field("fingerprint", &self.fingerprint())
			.finish_non_exhaustive()
	}
}

/// Short hex digest of serialized public key bytes.
pub fn fingerprint(public_key: &[u8]) -> String {
	Sha256::digest(public_key)[..8]
		.iter()
		.map(|b| format!("{b:02x}"))
		.join("")
}

fn expand_secret_key(seed: &[u8; SECRET_SEED_SIZE], par: &Arc<BfvParameters>) -> SecretKey {
	let mut rng = ChaCha20Rng::from_seed(*seed);
	SecretKey::random(par, &mut rng)
}

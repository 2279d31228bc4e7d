//! Keypair files.
//!
//! A keypair file is a JSON object with three string fields: the stream
//! `id`, and the base64-encoded secret (`sk`) and public (`pk`) key bytes.

use std::{
	fs::{self, OpenOptions},
	io::{Read, Write},
	path::Path,
	sync::Arc,
};

use fhe::bfv::BfvParameters;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::{codec, Error, Keypair, Result};

#[derive(Serialize)]
struct KeypairDocument<'a> {
	id: &'a str,
	sk: &'a str,
	pk: &'a str,
}

#[derive(Deserialize)]
struct PartialKeypairDocument {
	id: Option<String>,
	sk: Option<String>,
	pk: Option<String>,
}

/// A keypair read back from a keypair file.
#[derive(Debug)]
pub struct StoredKeypair {
	/// The stream id the public key was registered under.
	pub id: String,
	/// The keypair.
	pub keypair: Keypair,
}

/// Writes `id` and `keypair` as a pretty-printed JSON document.
pub fn write_keypair<W: Write>(writer: W, id: &str, keypair: &Keypair) -> Result<()> {
	let sk = Zeroizing::new(codec::encode(&keypair.secret_key_bytes()));
	let pk = codec::encode(&keypair.public_key_bytes());
	serde_json::to_writer_pretty(
		writer,
		&KeypairDocument {
			id,
			sk: &sk,
			pk: &pk,
		},
	)?;
	Ok(())
}

/// Reads a keypair document and rebuilds the keypair under `par`.
///
/// Fails if a field is missing or malformed, or if the secret key does not
/// decrypt under the public key.
pub fn read_keypair<R: Read>(reader: R, par: &Arc<BfvParameters>) -> Result<StoredKeypair> {
	let document: PartialKeypairDocument = serde_json::from_reader(reader)?;

	let id = document.id.ok_or(Error::MissingField("ID"))?;
	let sk = Zeroizing::new(document.sk.ok_or(Error::MissingField("secret key"))?);
	let sk = Zeroizing::new(codec::decode("secret key", &sk)?);
	let pk = document.pk.ok_or(Error::MissingField("public key"))?;
	let pk = codec::decode("public key", &pk)?;

	let keypair = Keypair::from_bytes(&sk, &pk, par)?;
	keypair.check_consistency(&mut rand::thread_rng())?;
	Ok(StoredKeypair { id, keypair })
}

/// Stores `id` and `keypair` in the file at `path`, replacing any previous
/// content.
///
/// On Unix the file is only readable by its owner.
pub fn store_keypair<P: AsRef<Path>>(path: P, id: &str, keypair: &Keypair) -> Result<()> {
	let path = path.as_ref();
	let io_error = |source| Error::Io {
		path: path.to_path_buf(),
		source,
	};

	let mut options = OpenOptions::new();
	options.write(true).create(true).truncate(true);
	#[cfg(unix)]
	{
		use std::os::unix::fs::OpenOptionsExt;
		options.mode(0o600);
	}
	let mut file = options.open(path).map_err(io_error)?;

	let mut buffer = Zeroizing::new(Vec::new());
	write_keypair(&mut *buffer, id, keypair)?;
	buffer.push(b'\n');
	file.write_all(&buffer).map_err(io_error)?;
	file.sync_all().map_err(io_error)?;

	log::info!(
		"stored keypair {} for stream {id} in {}",
		keypair.fingerprint(),
		path.display()
	);
	Ok(())
}

/// Loads the keypair file at `path`.
pub fn load_keypair<P: AsRef<Path>>(path: P, par: &Arc<BfvParameters>) -> Result<StoredKeypair> {
	let path = path.as_ref();
	let contents = Zeroizing::new(fs::read(path).map_err(|source| Error::Io {
		path: path.to_path_buf(),
		source,
	})?);
	let stored = read_keypair(contents.as_slice(), par)?;
	log::info!(
		"loaded keypair {} for stream {} from {}",
		stored.keypair.fingerprint(),
		stored.id,
		path.display()
	);
	Ok(stored)
}

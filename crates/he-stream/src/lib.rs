#![warn(missing_docs, unused_imports)]

//! Provisioning of homomorphic-encryption keys for encrypted streams.
//!
//! A stream is created by generating a keypair under [`STREAM_PARAMETERS`],
//! registering the public key with the stream API through a
//! [`StreamClient`], and storing the returned id together with the keypair
//! in a keypair file. Vectors of integers are then encrypted slot-wise under
//! the public key with a [`VectorCipher`].
//!
//! Key generation, encoding and encryption are provided by the `fhe` crate.

mod cipher;
mod client;
mod errors;
mod keys;
mod parameters;
mod store;

pub mod codec;

pub use cipher::VectorCipher;
pub use client::{StreamClient, TOKEN_VALID};
pub use errors::{Error, Result};
pub use keys::{fingerprint, Keypair, SECRET_SEED_SIZE};
pub use parameters::{stream_parameters, ParametersLiteral, STREAM_PARAMETERS};
pub use store::{load_keypair, read_keypair, store_keypair, write_keypair, StoredKeypair};

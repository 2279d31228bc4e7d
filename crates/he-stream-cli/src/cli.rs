use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "he-stream", version)]
#[command(about = "Create encrypted streams and exercise their homomorphic-encryption keys")]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// Generate a keypair, register its public key and store the keypair.
	CreateStream(CreateStreamArgs),
	/// Encrypt a vector under a stored keypair and decrypt it again.
	Demo(DemoArgs),
	/// Encrypt a vector under a stored keypair and write the ciphertext.
	Encrypt(EncryptArgs),
	/// Decrypt a ciphertext written by `encrypt`.
	Decrypt(DecryptArgs),
}

#[derive(Args)]
pub struct CreateStreamArgs {
	/// Bearer token for the stream API.
	#[arg(short, long, env = "HE_STREAM_TOKEN", hide_env_values = true)]
	pub token: String,

	/// Stream creation endpoint.
	#[arg(
		short,
		long,
		env = "HE_STREAM_URL",
		default_value = "http://localhost:8080/create-stream"
	)]
	pub url: String,

	/// File to store the stream id and keypair in.
	#[arg(short, long, default_value = "keypair.json")]
	pub output: PathBuf,

	/// Abort the request after this many seconds.
	#[arg(long, value_parser = parse_seconds)]
	pub timeout: Option<Duration>,
}

#[derive(Args)]
pub struct DemoArgs {
	/// Keypair file written by `create-stream`.
	#[arg(short, long, default_value = "keypair.json")]
	pub keypair: PathBuf,

	/// Values to encrypt (comma-separated).
	#[arg(long, value_delimiter = ',', default_values_t = [2u64, 2, 4, 5, 6, 7])]
	pub values: Vec<u64>,
}

#[derive(Args)]
pub struct EncryptArgs {
	/// Keypair file written by `create-stream`.
	#[arg(short, long, default_value = "keypair.json")]
	pub keypair: PathBuf,

	/// Values to encrypt (comma-separated).
	#[arg(long, value_delimiter = ',', required = true)]
	pub values: Vec<u64>,

	/// File to write the base64-encoded ciphertext to.
	#[arg(short, long)]
	pub output: PathBuf,
}

#[derive(Args)]
pub struct DecryptArgs {
	/// Keypair file written by `create-stream`.
	#[arg(short, long, default_value = "keypair.json")]
	pub keypair: PathBuf,

	/// File holding a base64-encoded ciphertext.
	#[arg(short, long)]
	pub input: PathBuf,

	/// Number of leading slots to print; all by default.
	#[arg(short, long)]
	pub count: Option<usize>,
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
	let seconds = s
		.parse::<u64>()
		.map_err(|e| format!("invalid number of seconds {s:?}: {e}"))?;
	if seconds == 0 {
		return Err("the timeout must be at least one second".to_string());
	}
	Ok(Duration::from_secs(seconds))
}

use std::{error::Error, fs};

use console::style;
use he_stream::{
	codec, load_keypair, store_keypair, stream_parameters, Keypair, StreamClient, VectorCipher,
};
use indicatif::HumanBytes;
use itertools::Itertools;
use rand::thread_rng;

use crate::{
	cli::{CreateStreamArgs, DecryptArgs, DemoArgs, EncryptArgs},
	util::timeit::timeit,
};

type CommandResult = Result<(), Box<dyn Error>>;

pub fn create_stream(args: CreateStreamArgs) -> CommandResult {
	let mut client = StreamClient::new(args.url, args.token)?;
	if let Some(timeout) = args.timeout {
		client = client.with_timeout(timeout);
	}

	let params = timeit!("Parameters generation", stream_parameters()?);
	let keypair = timeit!(
		"Keypair generation",
		Keypair::generate(&params, &mut thread_rng())
	);
	let pk = keypair.public_key_bytes();
	println!("{}", style("Keypair generated successfully.").green());
	println!(
		"  public key {} ({})",
		style(keypair.fingerprint()).cyan(),
		HumanBytes(pk.len() as u64)
	);

	let id = timeit!("Stream creation", client.create_stream(&pk)?);
	println!(
		"{} {}",
		style("Stream created successfully. ID:").green(),
		style(&id).bold()
	);

	store_keypair(&args.output, &id, &keypair)?;
	println!(
		"{} {}",
		style("Keypair stored successfully in").green(),
		args.output.display()
	);
	Ok(())
}

pub fn demo(args: DemoArgs) -> CommandResult {
	let params = stream_parameters()?;
	let stored = timeit!("Keypair loading", load_keypair(&args.keypair, &params)?);
	println!("Stream ID: {}", style(&stored.id).bold());

	let cipher = VectorCipher::new(&params);
	let ct = timeit!(
		"Encryption",
		cipher.encrypt(&args.values, stored.keypair.public_key(), &mut thread_rng())?
	);
	println!(
		"Encrypted {} values ({})",
		args.values.len(),
		HumanBytes(cipher.ciphertext_to_bytes(&ct).len() as u64)
	);

	let values = timeit!(
		"Decryption",
		cipher.decrypt(stored.keypair.secret_key(), &ct)?
	);
	print_slots(&values, args.values.len());
	Ok(())
}

pub fn encrypt(args: EncryptArgs) -> CommandResult {
	let params = stream_parameters()?;
	let stored = load_keypair(&args.keypair, &params)?;

	let cipher = VectorCipher::new(&params);
	let ct = timeit!(
		"Encryption",
		cipher.encrypt(&args.values, stored.keypair.public_key(), &mut thread_rng())?
	);
	let bytes = cipher.ciphertext_to_bytes(&ct);
	fs::write(&args.output, codec::encode(&bytes) + "\n")
		.map_err(|e| format!("failed to write {}: {e}", args.output.display()))?;

	println!(
		"Encrypted {} values for stream {} into {} ({})",
		args.values.len(),
		style(&stored.id).bold(),
		args.output.display(),
		HumanBytes(bytes.len() as u64)
	);
	Ok(())
}

pub fn decrypt(args: DecryptArgs) -> CommandResult {
	let params = stream_parameters()?;
	let stored = load_keypair(&args.keypair, &params)?;

	let text = fs::read_to_string(&args.input)
		.map_err(|e| format!("failed to read {}: {e}", args.input.display()))?;
	let cipher = VectorCipher::new(&params);
	let ct = cipher.ciphertext_from_bytes(&codec::decode("ciphertext", &text)?)?;

	let values = timeit!(
		"Decryption",
		cipher.decrypt(stored.keypair.secret_key(), &ct)?
	);
	print_slots(&values, args.count.unwrap_or(values.len()));
	Ok(())
}

/// Prints the first `shown` slots and summarizes the rest.
fn print_slots(values: &[u64], shown: usize) {
	let (head, tail) = values.split_at(shown.min(values.len()));
	println!("[{}]", head.iter().join(", "));
	if tail.is_empty() {
		return;
	}
	match tail.iter().filter(|v| **v != 0).count() {
		0 => println!("{}", style(format!("remaining {} slots are zero", tail.len())).dim()),
		n => println!(
			"{}",
			style(format!("{n} of the remaining {} slots are non-zero", tail.len())).yellow()
		),
	}
}

#![warn(unused_imports)]

//! Command-line tool to create encrypted streams.
//!
//! `he-stream create-stream --token <JWT>` generates a keypair, registers
//! its public key with the stream API and stores the returned id with the
//! keypair. `demo`, `encrypt` and `decrypt` exercise a stored keypair.
//!
//! Logging is controlled with `RUST_LOG` (default `info`).

mod cli;
mod commands;
mod util;

use std::process;

use clap::Parser;
use console::style;

use crate::cli::{Cli, Command};

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();
	let result = match cli.command {
		Command::CreateStream(args) => commands::create_stream(args),
		Command::Demo(args) => commands::demo(args),
		Command::Encrypt(args) => commands::encrypt(args),
		Command::Decrypt(args) => commands::decrypt(args),
	};

	if let Err(e) = result {
		eprintln!("{} {e}", style("error:").red().bold());
		process::exit(1);
	}
}

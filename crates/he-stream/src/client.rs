//! Registration of public keys with the stream API.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::{codec, keys, Error, Result};

/// The message the API answers with when it accepted the bearer token.
pub const TOKEN_VALID: &str = "Token Valid";

#[derive(Serialize)]
struct CreateStreamRequest<'a> {
	pk: &'a str,
}

#[derive(Deserialize)]
struct CreateStreamResponse {
	message: Option<String>,
	id: Option<String>,
}

/// Blocking client for the stream creation endpoint.
pub struct StreamClient {
	url: String,
	token: String,
	timeout: Option<Duration>,
	agent: Agent,
}

impl StreamClient {
	/// Creates a client posting to `url` with `token` as bearer token.
	///
	/// Returns [`Error::MissingToken`] if the token is blank.
	pub fn new<U: Into<String>, T: Into<String>>(url: U, token: T) -> Result<Self> {
		let token = token.into();
		if token.trim().is_empty() {
			return Err(Error::MissingToken);
		}
		Ok(Self {
			url: url.into(),
			token,
			timeout: None,
			agent: build_agent(None),
		})
	}

	/// Bounds the whole request, connection included, by `timeout`.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self.agent = build_agent(self.timeout);
		self
	}

	/// The endpoint this client posts to.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// Registers `public_key` and returns the id of the created stream.
	pub fn create_stream(&self, public_key: &[u8]) -> Result<String> {
		let pk = codec::encode(public_key);
		log::info!(
			"registering public key {} ({} bytes) with {}",
			keys::fingerprint(public_key),
			public_key.len(),
			self.url
		);

		let mut response = self
			.agent
			.post(&self.url)
			.header("Authorization", &format!("Bearer {}", self.token))
			.send_json(&CreateStreamRequest { pk: &pk })?;

		let status = response.status().as_u16();
		let body = response.body_mut().read_to_string()?;
		let id = parse_response(status, &body)?;
		log::info!("created stream {id}");
		Ok(id)
	}
}

impl fmt::Debug for StreamClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StreamClient")
			.field("url", &self.url)
			.field("token", &"<redacted>")
			.field("timeout", &self.timeout)
			.finish()
	}
}

fn build_agent(timeout: Option<Duration>) -> Agent {
	let config = Agent::config_builder()
		.http_status_as_error(false)
		.timeout_global(timeout)
		.build();
	Agent::new_with_config(config)
}

/// Extracts the stream id from a response to the stream creation endpoint.
fn parse_response(status: u16, body: &str) -> Result<String> {
	if status != 200 {
		log::debug!("stream creation answered {status}: {body}");
		return Err(Error::Status(status));
	}

	let response: CreateStreamResponse = serde_json::from_str(body)?;
	if response.message.as_deref() != Some(TOKEN_VALID) {
		return Err(Error::InvalidToken(response.message));
	}
	match response.id {
		Some(id) if !id.is_empty() => Ok(id),
		_ => Err(Error::MissingId),
	}
}

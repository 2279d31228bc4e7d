//! Utility functions for the command-line tool.

use std::{fmt, time::Duration};

/// Macros to time code and log a human-readable duration.
pub mod timeit {
	/// Runs `$code`, logs how long it took under `$name`, and returns its
	/// value.
	macro_rules! timeit {
		($name:expr, $code:expr) => {{
			use $crate::util::DisplayDuration;
			let start = std::time::Instant::now();
			let r = $code;
			log::info!("⏱  {}: {}", $name, DisplayDuration(start.elapsed()));
			r
		}};
	}

	pub(crate) use timeit;
}

/// Utility struct for displaying human-readable duration of the form "10.5 ms",
/// "350 μs", or "27 ns".
pub struct DisplayDuration(pub Duration);

impl fmt::Display for DisplayDuration {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let duration_ns = self.0.as_nanos();
		if duration_ns < 1_000_u128 {
			write!(f, "{duration_ns} ns")
		} else if duration_ns < 1_000_000_u128 {
			write!(f, "{} μs", (duration_ns + 500) / 1_000)
		} else if duration_ns < 10_000_000_000_u128 {
			let duration_ms_times_10 = (duration_ns + 50_000) / 100_000;
			write!(f, "{} ms", (duration_ms_times_10 as f64) / 10.0)
		} else {
			write!(f, "{:.1} s", self.0.as_secs_f64())
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::DisplayDuration;

	#[test]
	fn display_duration() {
		assert_eq!(DisplayDuration(Duration::from_nanos(27)).to_string(), "27 ns");
		assert_eq!(
			DisplayDuration(Duration::from_micros(350)).to_string(),
			"350 μs"
		);
		assert_eq!(
			DisplayDuration(Duration::from_micros(10_500)).to_string(),
			"10.5 ms"
		);
		assert_eq!(DisplayDuration(Duration::from_secs(12)).to_string(), "12.0 s");
	}
}

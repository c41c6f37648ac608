//! Support for command line argument parsing.
//!
//! See [crate] documentation for details on command line arguments and examples.

use std::num::NonZero;
use clap::{Parser, ValueEnum};
use signals::{Options, Standard, Toggle};
use time::{parse_timestamp, TimeSpec};

/// Known time signal types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SignalType {
	/// Germany's DCF77
	Dcf77,
	/// UK's MSF
	Msf,
	/// USA's WWVB
	Wwvb,
	/// Japan's JJY
	#[value(aliases = ["jjy40", "jjy60"])]
	Jjy,
	/// China's BPC
	Bpc
}

impl From<SignalType> for Standard {
	fn from(s: SignalType) -> Standard {
		match s {
			SignalType::Dcf77 => Standard::Dcf77,
			SignalType::Msf => Standard::Msf,
			SignalType::Wwvb => Standard::Wwvb,
			SignalType::Jjy => Standard::Jjy,
			SignalType::Bpc => Standard::Bpc
		}
	}
}

/// Parse a `--time` argument.
///
/// Accepts the same date time strings as [`parse_timestamp`].
fn parse_time(s: &str) -> Result<TimeSpec, String> {
	parse_timestamp(s).map_err(|e| e.to_string())
}

/// Generate longwave time signals for setting radio-controlled clocks with no extra hardware.
#[derive(Debug, Parser)]
#[command(version, about, after_help = "\
Examples:
  longwave -n 6 wwvb
  longwave --local-time bpc
  longwave -t \"2024-03-31 00:59:30Z\" --describe dcf77
  RUST_LOG=debug longwave --dry-run -n 2 msf")]
pub struct Arguments {
	/// The number of minutes to transmit
	#[arg(short = 'n', short_alias = 'c', long, default_value = "4")]
	pub count: NonZero<usize>,

	/// The starting time to use, defaults to now
	#[arg(short, long, value_parser = parse_time)]
	pub time: Option<TimeSpec>,

	/// Transmit the host's local time instead of the station's zone (JJY, BPC)
	#[arg(long)]
	pub local_time: bool,

	/// Set the DST bit (JJY)
	#[arg(long)]
	pub dst: bool,

	/// Log envelope events instead of playing audio
	#[arg(long)]
	pub dry_run: bool,

	/// Print the status line and the frame for the first minute, then exit
	#[arg(long)]
	pub describe: bool,

	/// The signal to generate
	#[arg(value_enum, ignore_case = true)]
	pub signal: SignalType
}

impl Arguments {
	pub fn standard(&self) -> Standard {
		self.signal.into()
	}

	pub fn options(&self) -> Options {
		Options::default()
			.with(Toggle::UseLocalTime, self.local_time)
			.with(Toggle::ForceDst, self.dst)
	}

	/// Toggles that are set but have no effect on the selected signal.
	pub fn ignored_toggles(&self) -> Vec<Toggle> {
		let options = self.options();
		let honoured = self.standard().toggles();
		[Toggle::UseLocalTime, Toggle::ForceDst]
			.into_iter()
			.filter(|&t| options.get(t) && !honoured.iter().any(|&(h, _)| h == t))
			.collect()
	}

	/// Labels of the toggles that are set and honoured by the selected signal.
	pub fn active_toggles(&self) -> Vec<&'static str> {
		let options = self.options();
		self.standard().toggles().iter().filter(|&&(t, _)| options.get(t)).map(|&(_, label)| label).collect()
	}
}

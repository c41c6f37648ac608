//! Generate longwave time signals using simple audio output.
//!
//! This crate can generate five public time signals ([DCF77], [MSF], [WWVB], [JJY] and [BPC]),
//! outputting them to the device's default audio output. This works by taking advantage of stray
//! RF signals created by audio hardware as a side effect of their operation: harmonics of the
//! audible carrier land on the station's longwave frequency. The audio output itself is not
//! useful as devices listening for these time signals use RF rather than audio.
//!
//! [DCF77]: signals::dcf77
//! [MSF]: signals::msf
//! [WWVB]: signals::wwvb
//! [JJY]: signals::jjy
//! [BPC]: signals::bpc
//!
//! # Command Line Arguments
//!
//! General form: `longwave [options...] signal`
//!
//! | Short form | Long form      | Argument           | Default      | Description                           |
//! | ---------- | -------------- | ------------------ | ------------ | ------------------------------------- |
//! | `-n`, `-c` | `--count`      | Integer > 0        | 4            | The number of minutes to transmit     |
//! | `-t`       | `--time`       | [Date time string] | Current time | The starting time to transmit         |
//! |            | `--local-time` |                    | Off          | Send host local time (JJY, BPC)       |
//! |            | `--dst`        |                    | Off          | Set the DST bit (JJY)                 |
//! |            | `--dry-run`    |                    | Off          | Log envelope events, no audio         |
//! |            | `--describe`   |                    | Off          | Print the status line and frame, exit |
//!
//! The last argument must be the signal to generate, one of `dcf77`, `msf`, `wwvb`, `jjy` (also
//! `jjy40` and `jjy60`) or `bpc`.
//!
//! Logging is configured through `RUST_LOG` and defaults to `info`.
//!
//! [date time string]: time::parse::parse_timestamp
//!
//! # Examples
//!
//! Transmit DCF77 for 8 minutes
//! ```sh
//! longwave -n 8 dcf77
//! ```
//!
//! Show what JJY would send on New Year's Eve, in the host's zone
//! ```sh
//! longwave --describe --local-time -t "2024-12-31 23:59:00+09:00" jjy
//! ```

use std::error::Error;
use std::fmt::Write;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use signals::{Frame, Instant, Role, SignalChannel, Simulator, Symbol};
use time::{Nanoseconds, Seconds, TimeSpec};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use args::Arguments;
use audio::AudioChannel;
use dryrun::DryRunChannel;

mod args;
mod audio;
mod dryrun;

/// Wall-clock source, optionally running from a fixed start time.
struct WallClock {
	/// The `--time` override and the moment it was taken.
	origin: Option<(TimeSpec, std::time::Instant)>
}

impl WallClock {
	fn new(start: Option<TimeSpec>) -> Self {
		WallClock { origin: start.map(|t| (t, std::time::Instant::now())) }
	}

	fn now(&self) -> Result<Instant, Box<dyn Error>> {
		let utc = match self.origin {
			Some((start, taken)) => start + Nanoseconds(taken.elapsed().as_nanos() as i64),
			None => time::now().ok_or("Failed to get current system time")?
		};
		Ok(Instant::new(utc, time::local_utc_offset(utc.sec).unwrap_or(0)))
	}

	/// Block until the clock reaches `target`.
	fn sleep_until(&self, target: TimeSpec) -> Result<(), Box<dyn Error>> {
		let remaining = target - self.now()?.utc;
		if remaining.0 > 0 {
			thread::sleep(Duration::from_nanos(remaining.0 as u64));
		}
		Ok(())
	}
}

/// Render a frame as one line per second.
fn render_text(frame: &Frame) -> String {
	let mut out = String::new();
	frame.render(&mut |slot: usize, s: &Symbol| {
		let role = match s.role {
			Role::Marker => "M".to_string(),
			Role::Data(v) => v.to_string(),
			Role::NoOp => "-".to_string()
		};
		// Writing to a String cannot fail
		let _ = writeln!(out, "{:>2}  {:<2} {:.1}", slot, role, s.duration);
	});
	out
}

/// Print the status line and the frame of the current minute.
fn describe(args: &Arguments, clock: &WallClock) -> Result<(), Box<dyn Error>> {
	let now = clock.now()?;
	let standard = args.standard();
	println!("{}", standard.describe(now, args.options()));
	print!("{}", render_text(&standard.resolve_and_encode(now, args.options())));
	Ok(())
}

/// Transmit `args.count` minutes on `channel`, blocking until complete.
///
/// # Errors
///
/// - [`signals::ChannelError`] if the channel cannot be opened.
/// - `&str` if the system time is unavailable.
fn run<C: SignalChannel>(args: &Arguments, clock: &WallClock, channel: C) -> Result<(), Box<dyn Error>> {
	let mut sim = Simulator::new(args.standard(), args.options()).with_local_offset(time::local_utc_offset);
	let now = clock.now()?;
	sim.start(channel, now)?;
	info!("{}", sim.describe(now));

	for _ in 1..args.count.get() {
		loop {
			if let Some(fire) = sim.next_fire() {
				clock.sleep_until(fire)?;
			}
			let now = clock.now()?;
			if sim.tick(now) {
				info!("{}", sim.describe(now));
				break;
			}
		}
	}

	// Let the last minute play out
	if let Some(target) = sim.target() {
		clock.sleep_until(target + Seconds(60))?;
	}
	if let Some(session) = sim.session() {
		debug!(corrections = session.corrections(), "finished");
	}
	sim.stop();
	Ok(())
}

/// Generate a time signal and play it, or log it with `--dry-run`.
fn play(args: Arguments) -> Result<ExitCode, Box<dyn Error>> {
	for toggle in args.ignored_toggles() {
		warn!("{:?} has no effect on {}", toggle, args.standard());
	}
	for label in args.active_toggles() {
		info!("{}", label);
	}

	let clock = WallClock::new(args.time);
	if args.describe {
		describe(&args, &clock)?;
	} else if args.dry_run {
		run(&args, &clock, DryRunChannel::new())?;
	} else {
		run(&args, &clock, AudioChannel::new())?;
	}
	Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	play(Arguments::parse())
		.inspect_err(|e| eprintln!("{}", e))
		.unwrap_or(ExitCode::FAILURE)
}

#[cfg(test)]
mod tests {
	use super::*;
	use signals::{Options, Standard};

	#[test]
	fn render_text_test() {
		let now = Instant::from_utc(TimeSpec::from_secs(1716742620));
		let text = render_text(&Standard::Dcf77.resolve_and_encode(now, Options::default()));
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines.len(), 60);
		assert_eq!(lines[20], "20  1  0.2");
		assert_eq!(lines[59], "59  -  0.0");

		let text = render_text(&Standard::Wwvb.resolve_and_encode(now, Options::default()));
		assert_eq!(text.lines().next(), Some(" 0  M  0.8"));
	}

	#[test]
	fn wall_clock_override_test() {
		let clock = WallClock::new(Some(TimeSpec::from_secs(1716742620)));
		let now = clock.now().unwrap();
		assert!(now.utc >= TimeSpec::from_secs(1716742620));
		assert!(now.utc < TimeSpec::from_secs(1716742680));
		// Already in the past
		clock.sleep_until(TimeSpec::from_secs(1716742600)).unwrap();
	}
}

//! Generate longwave time signals.
//!
//! This crate turns wall-clock time into the minute frames broadcast by five public time code
//! stations and schedules those frames as envelope changes on an audio carrier. Harmonics of the
//! audible carrier land on the station's longwave frequency, which is close enough for many radio
//! controlled clocks to synchronise.
//!
//! | Signal      | Carrier                | Harmonic             | Zone                 |
//! | ----------- | ---------------------- | -------------------- | -------------------- |
//! | [`dcf77`]   | 15500 Hz square        | 5th => 77.5 kHz      | CET/CEST             |
//! | [`msf`]     | 20000 Hz square        | 3rd => 60 kHz        | GMT/BST              |
//! | [`wwvb`]    | 20000 Hz square        | 3rd => 60 kHz        | UTC (US DST bits)    |
//! | [`jjy`]     | 13333 Hz square        | 3rd => 40 kHz        | JST or local         |
//! | [`bpc`]     | 17125 Hz sawtooth      | 4th => 68.5 kHz      | CST (UTC+8) or local |
//!
//! The work is split in three layers:
//! - **Resolve**: [`Standard::resolve`] converts an [`Instant`] into the station's
//!   [`CalendarFields`], applying its zone, DST rule and leap second table.
//! - **Encode**: [`Standard::encode`] packs those fields into a 60 slot [`Frame`].
//! - **Schedule**: [`planner::plan`] maps a frame onto the device clock of a
//!   [`SignalChannel`], anchored by a [`schedule::ScheduleAnchor`]. [`Simulator`] drives this
//!   once per minute.
//!
//! # Examples
//! ```
//! # use signals::{Instant, Options, Standard, Role};
//! # use time::TimeSpec;
//! // Sun, May 26, 2024. 16:57:00 UTC
//! let now = Instant::from_utc(TimeSpec::from_secs(1716742620));
//!
//! // DCF77 transmits the following minute: 18:58 CEST
//! let fields = Standard::Dcf77.resolve(now, Options::default());
//! assert_eq!((fields.hour, fields.minute, fields.dst), (18, 58, true));
//!
//! let frame = Standard::Dcf77.encode(&fields);
//! assert_eq!(frame.slots()[20].duration, 0.2); // start of time, always a one
//! assert_eq!(frame.slots()[59].role, Role::NoOp); // minute marker
//! ```

use core::fmt;

pub mod code;
pub mod fields;
pub mod frame;
pub mod channel;
pub mod schedule;
pub mod planner;
pub mod simulator;
pub mod dcf77;
pub mod msf;
pub mod wwvb;
pub mod jjy;
pub mod bpc;
#[cfg(test)]
pub(crate) mod testing;

pub use fields::{CalendarFields, Instant, Options, Toggle};
pub use frame::{Frame, Renderer, Role, Symbol};
pub use channel::{Carrier, ChannelError, SignalChannel, Waveform};
pub use schedule::Mode;
pub use planner::{EmissionEvent, Envelope, Style};
pub use simulator::Simulator;
pub use time::leap::LeapSecond;

/// Behaviour shared by every station.
///
/// Each station module provides a unit type implementing this trait. [`Standard`] dispatches to
/// them.
pub trait StandardEncoder {
	/// Which station this is.
	const STANDARD: Standard;
	/// Audible carrier played by the channel.
	const CARRIER: Carrier;
	/// Whether the carrier runs across minute boundaries.
	const MODE: Mode;
	/// How symbol durations map onto envelope changes.
	const STYLE: Style;
	/// Option toggles honoured by this station, with their labels.
	const TOGGLES: &'static [(Toggle, &'static str)] = &[];

	/// Resolve the calendar fields transmitted in the minute starting at `instant`.
	fn resolve(instant: Instant, options: Options) -> CalendarFields;

	/// Encode calendar fields into a frame. Never fails.
	fn encode(fields: &CalendarFields) -> Frame;

	/// Human readable status line for `instant`.
	fn describe(instant: Instant, options: Options) -> String;
}

/// A supported time signal station.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Standard {
	Bpc,
	Dcf77,
	Jjy,
	Msf,
	Wwvb
}

/// Forward a call to the station's [`StandardEncoder`] implementation.
macro_rules! dispatch {
	($standard:expr, $item:ident $(( $($arg:expr),* ))?) => {
		match $standard {
			Standard::Bpc => <bpc::Bpc as StandardEncoder>::$item $(( $($arg),* ))?,
			Standard::Dcf77 => <dcf77::Dcf77 as StandardEncoder>::$item $(( $($arg),* ))?,
			Standard::Jjy => <jjy::Jjy as StandardEncoder>::$item $(( $($arg),* ))?,
			Standard::Msf => <msf::Msf as StandardEncoder>::$item $(( $($arg),* ))?,
			Standard::Wwvb => <wwvb::Wwvb as StandardEncoder>::$item $(( $($arg),* ))?,
		}
	};
}

impl Standard {
	/// Every station, in display order.
	pub const ALL: [Standard; 5] = [Standard::Dcf77, Standard::Msf, Standard::Wwvb, Standard::Jjy, Standard::Bpc];

	/// Display name, including the country of the transmitter.
	pub fn name(self) -> &'static str {
		match self {
			Standard::Bpc => "BPC (China)",
			Standard::Dcf77 => "DCF77 (Germany)",
			Standard::Jjy => "JJY (Japan)",
			Standard::Msf => "MSF (United Kingdom)",
			Standard::Wwvb => "WWVB (United States)"
		}
	}

	pub fn carrier(self) -> Carrier {
		dispatch!(self, CARRIER)
	}

	pub fn mode(self) -> Mode {
		dispatch!(self, MODE)
	}

	pub fn style(self) -> Style {
		dispatch!(self, STYLE)
	}

	/// Option toggles this station honours. Others are ignored.
	pub fn toggles(self) -> &'static [(Toggle, &'static str)] {
		dispatch!(self, TOGGLES)
	}

	/// See [`StandardEncoder::resolve`].
	pub fn resolve(self, instant: Instant, options: Options) -> CalendarFields {
		dispatch!(self, resolve(instant, options))
	}

	/// See [`StandardEncoder::encode`].
	pub fn encode(self, fields: &CalendarFields) -> Frame {
		dispatch!(self, encode(fields))
	}

	/// Resolve and encode the frame transmitted in the minute starting at `instant`.
	///
	/// # Examples
	///
	/// ```
	/// # use signals::{Instant, Options, Standard};
	/// # use time::TimeSpec;
	/// let now = Instant::from_utc(TimeSpec::from_secs(1716742620));
	/// let a = Standard::Wwvb.resolve_and_encode(now, Options::default());
	/// let b = Standard::Wwvb.resolve_and_encode(now, Options::default());
	/// assert_eq!(a, b);
	/// ```
	pub fn resolve_and_encode(self, instant: Instant, options: Options) -> Frame {
		self.encode(&self.resolve(instant, options))
	}

	/// See [`StandardEncoder::describe`].
	pub fn describe(self, instant: Instant, options: Options) -> String {
		dispatch!(self, describe(instant, options))
	}
}

impl fmt::Display for Standard {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

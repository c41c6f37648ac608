//! Support for transmitting the DCF77 time signal.
//!
//! See [DCF77 documentation](https://en.wikipedia.org/wiki/DCF77#Time_code_details) for details.
//! Only the amplitude modulated time code is generated. The carrier drops to 15% at the start of
//! every second except the 59th, for 0.1 s (bit 0) or 0.2 s (bit 1). The minute transmitted is
//! always the one that is about to begin, in CET/CEST.
//!
//! # Examples
//!
//! ```
//! # use signals::{Instant, Options, Standard};
//! # use time::TimeSpec;
//! // Sunday, May 26, 2024. 16:57:30 UTC
//! let now = Instant::from_utc(TimeSpec::from_secs(1716742650));
//! let fields = Standard::Dcf77.resolve(now, Options::default());
//! assert_eq!((fields.hour, fields.minute, fields.wday), (18, 58, 7));
//!
//! let frame = Standard::Dcf77.encode(&fields);
//! let ones = frame.durations().filter(|&d| d == 0.2).count();
//! assert_eq!(ones, 18);
//! ```

use time::dst::DstRule;
use time::leap::{leap_second, LEAP_WARNING_WINDOW};
use time::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::code::{bcd, bits, parity};
use crate::fields::{stamp, utc_suffix, CalendarFields, Instant, Options};
use crate::frame::{Frame, FrameBuilder, Symbol};
use crate::{Carrier, Envelope, Mode, Standard, StandardEncoder, Style, Waveform};

/// Offset of CET from UTC.
const CET: i32 = 3600;
/// Offset of CEST from UTC.
const CEST: i32 = 7200;

/// The DCF77 station in Mainflingen, Germany.
pub struct Dcf77;

/// Pack calendar fields into the bit format used to transmit.
///
/// The LSB is the first bit to transmit; bits 59 and up are unused.
/// - Bits 0-15: weather and call bit, always zero.
/// - Bit 16: DST change at the end of the hour.
/// - Bits 17-18: CEST, CET.
/// - Bit 19: leap second announcement, always zero.
/// - Bit 20: start of encoded time, always one.
/// - Bits 21-58: minute, hour and date BCD, each followed by an even parity bit.
fn pack(f: &CalendarFields) -> u64 {
	let min = bcd(f.minute, 4, 3);
	let hour = bcd(f.hour, 4, 2);
	let date = bcd(f.day, 4, 2)
			 | (f.wday as u64 & 0x7) << 6
			 | bcd(f.month, 4, 1) << 9
			 | bcd(f.year, 4, 4) << 14;

	let mut r: u64 = 1 << 20;
	r |= (f.dst_change as u64) << 16;
	r |= (f.dst as u64) << 17;
	r |= (!f.dst as u64) << 18;
	r |= min << 21;
	r |= (parity(min) as u64) << 28;
	r |= hour << 29;
	r |= (parity(hour) as u64) << 35;
	r |= date << 36;
	r |= (parity(date) as u64) << 58;
	r
}

impl StandardEncoder for Dcf77 {
	const STANDARD: Standard = Standard::Dcf77;
	const CARRIER: Carrier = Carrier { frequency: 15500., waveform: Waveform::Square };
	const MODE: Mode = Mode::Persistent;
	const STYLE: Style = Style::HoldThenRestore { low: Envelope::AttenuateTo(0.15), gated: false };

	fn resolve(instant: Instant, _: Options) -> CalendarFields {
		let target = instant.minute() + SECONDS_PER_MINUTE;
		let dst = DstRule::Eu.is_active(target);

		let mut f = CalendarFields::at(target, if dst { CEST } else { CET });
		f.dst = dst;
		// Announced during the hour before the change, starting with the minute that precedes it
		f.dst_change = DstRule::Eu.is_active(target - SECONDS_PER_MINUTE)
			!= DstRule::Eu.is_active(target + SECONDS_PER_HOUR - SECONDS_PER_MINUTE);
		if f.wday == 0 {
			f.wday = 7;
		}
		f.leap = leap_second(target, LEAP_WARNING_WINDOW);
		f
	}

	fn encode(fields: &CalendarFields) -> Frame {
		let mut b = FrameBuilder::new(Self::STANDARD);
		for bit in bits(pack(fields), 59) {
			b.push(Symbol::data(if bit { 0.2 } else { 0.1 }, bit as u8));
		}
		b.push(Symbol::noop());
		b.finish()
	}

	fn describe(instant: Instant, _: Options) -> String {
		let dst = DstRule::Eu.is_active(instant.utc.sec);
		format!(
			"Germany Time (CET/CEST) {}: {} {}",
			if dst { "[CEST ON]" } else { "[CET (Winter)]" },
			stamp(instant.utc.sec, if dst { CEST } else { CET }),
			utc_suffix(&instant)
		)
	}
}

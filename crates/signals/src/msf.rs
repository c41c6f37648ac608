//! Support for transmitting the MSF time signal.
//!
//! See [MSF documentation](https://en.wikipedia.org/wiki/Time_from_NPL_(MSF)) for details. The
//! carrier is switched off at the start of every second. Seconds 1-52 carry the A bits (off for
//! 0.1 s for a zero, 0.2 s for a one) and seconds 53-58 also carry a B bit (off for 0.2 s, or
//! 0.3 s when B is set). The minute transmitted is the one about to begin, in GMT/BST. DUT1 is
//! always sent as zero.
//!
//! # Examples
//!
//! ```
//! # use signals::{Instant, Options, Standard, Role};
//! # use time::TimeSpec;
//! // Saturday, July 4, 2020. 10:55:58 UTC
//! let now = Instant::from_utc(TimeSpec::from_secs(1593860158));
//! let fields = Standard::Msf.resolve(now, Options::default());
//! assert_eq!((fields.hour, fields.minute, fields.dst), (11, 56, true));
//!
//! let frame = Standard::Msf.encode(&fields);
//! assert_eq!(frame.slots()[0].duration, 0.5);
//! assert_eq!(frame.slots()[58].role, Role::Data(1)); // BST in effect
//! ```

use time::dst::DstRule;
use time::leap::{leap_second, LEAP_WARNING_WINDOW};
use time::SECONDS_PER_MINUTE;
use crate::code::{Parity, Weighted};
use crate::fields::{stamp, utc_suffix, CalendarFields, Instant, Options};
use crate::frame::{Frame, FrameBuilder, Symbol};
use crate::{Carrier, Envelope, Mode, Standard, StandardEncoder, Style, Waveform};

/// Offset of BST from UTC.
const BST: i32 = 3600;

/// How far ahead a DST change is announced in bit 53B.
const DST_WARNING: i64 = 61 * SECONDS_PER_MINUTE;

const YEAR: [u16; 8] = [80, 40, 20, 10, 8, 4, 2, 1];
const MONTH: [u16; 5] = [10, 8, 4, 2, 1];
const DAY: [u16; 6] = [20, 10, 8, 4, 2, 1];
const WDAY: [u16; 3] = [4, 2, 1];
const HOUR: [u16; 6] = [20, 10, 8, 4, 2, 1];
const MINUTE: [u16; 7] = [40, 20, 10, 8, 4, 2, 1];

/// The MSF station in Anthorn, United Kingdom.
pub struct Msf;

/// An A bit.
fn a(bit: bool) -> Symbol {
	Symbol::data(if bit { 0.2 } else { 0.1 }, bit as u8)
}

/// A B bit, sent alongside an A bit that is always one.
fn b(bit: bool) -> Symbol {
	Symbol::data(if bit { 0.3 } else { 0.2 }, bit as u8)
}

/// Push `value` as weighted A bits, counting ones into `parity`.
fn push_weighted(frame: &mut FrameBuilder, parity: &mut Parity, value: u8, weights: &[u16]) {
	let mut w = Weighted::new(value as u16);
	for &weight in weights {
		frame.push(a(parity.record(w.take(weight))));
	}
}

impl StandardEncoder for Msf {
	const STANDARD: Standard = Standard::Msf;
	const CARRIER: Carrier = Carrier { frequency: 20000., waveform: Waveform::Square };
	const MODE: Mode = Mode::Persistent;
	const STYLE: Style = Style::HoldThenRestore { low: Envelope::HoldLow, gated: false };

	fn resolve(instant: Instant, _: Options) -> CalendarFields {
		let target = instant.minute() + SECONDS_PER_MINUTE;
		let dst = DstRule::Eu.is_active(target);

		let mut f = CalendarFields::at(target, if dst { BST } else { 0 });
		f.dst = dst;
		f.dst_change = dst != DstRule::Eu.is_active(target + DST_WARNING);
		f.leap = leap_second(target, LEAP_WARNING_WINDOW);
		f
	}

	fn encode(fields: &CalendarFields) -> Frame {
		let mut frame = FrameBuilder::new(Self::STANDARD);
		frame.push(Symbol::marker(0.5));
		for _ in 1..17 {
			frame.push(a(false));
		}

		let mut year = Parity::default();
		push_weighted(&mut frame, &mut year, fields.year, &YEAR);
		let mut date = Parity::default();
		push_weighted(&mut frame, &mut date, fields.month, &MONTH);
		push_weighted(&mut frame, &mut date, fields.day, &DAY);
		let mut wday = Parity::default();
		push_weighted(&mut frame, &mut wday, fields.wday, &WDAY);
		let mut time = Parity::default();
		push_weighted(&mut frame, &mut time, fields.hour, &HOUR);
		push_weighted(&mut frame, &mut time, fields.minute, &MINUTE);

		frame.push(Symbol::marker(0.1));
		for bit in [fields.dst_change, year.odd(), date.odd(), wday.odd(), time.odd(), fields.dst] {
			frame.push(b(bit));
		}
		frame.push(Symbol::marker(0.1));
		frame.finish()
	}

	fn describe(instant: Instant, _: Options) -> String {
		let dst = DstRule::Eu.is_active(instant.utc.sec);
		format!(
			"UK Time (GMT/BST) {}: {} {}",
			if dst { "[BST ON]" } else { "[BST OFF]" },
			stamp(instant.utc.sec, if dst { BST } else { 0 }),
			utc_suffix(&instant)
		)
	}
}

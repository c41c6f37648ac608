//! Support for transmitting the WWVB time signal.
//!
//! See [WWVB documentation](https://en.wikipedia.org/wiki/WWVB) for details. Only the amplitude
//! modulated time code is generated: the carrier is reduced at the start of every second and
//! restored after 0.2 s (zero), 0.5 s (one) or 0.8 s (marker). Time is always sent in UTC for the
//! minute in progress; US daylight saving time is announced through bits 57 and 58 only. Bit 58
//! holds DST at the start of the UTC day and bit 57 DST at its end, so both stay fixed for the
//! whole day, even on the day of a change.
//!
//! Unsupported features include:
//! - **DUT1**. Sign and magnitude are always sent as zero.
//! - **Phase modulation**. Receivers listening to the phase code are not served.
//!
//! # Examples
//!
//! ```
//! # use signals::{Instant, Options, Standard, Symbol};
//! # use time::TimeSpec;
//! // Wed, Jul 04 2012 17:30:18 UTC
//! let now = Instant::from_utc(TimeSpec::from_secs(1341423018));
//! let fields = Standard::Wwvb.resolve(now, Options::default());
//! assert_eq!((fields.hour, fields.minute, fields.yday), (17, 30, 186));
//!
//! let frame = Standard::Wwvb.encode(&fields);
//! assert_eq!(frame.slots()[9], Symbol::marker(0.8));
//! ```

use time::dst::DstRule;
use time::leap::{leap_second, LeapSecond, LEAP_WARNING_WINDOW};
use time::SECONDS_PER_DAY;
use crate::code::{Weighted, PAD};
use crate::fields::{stamp, utc_suffix, zone, CalendarFields, Instant, Options};
use crate::frame::{Frame, FrameBuilder, Symbol};
use crate::{Carrier, Mode, Standard, StandardEncoder, Style, Waveform};

/// The WWVB station near Fort Collins, Colorado, United States.
pub struct Wwvb;

const MARKER: Symbol = Symbol::marker(0.8);

fn bit(b: bool) -> Symbol {
	if b { Symbol::data(0.5, 1) } else { Symbol::data(0.2, 0) }
}

/// Push one bit per weight. Weights of [`PAD`] always send zero.
fn push_weighted(frame: &mut FrameBuilder, value: &mut Weighted, weights: &[u16]) {
	for &weight in weights {
		frame.push(bit(value.take(weight)));
	}
}

fn push_zeros(frame: &mut FrameBuilder, n: usize) {
	for _ in 0..n {
		frame.push(bit(false));
	}
}

impl StandardEncoder for Wwvb {
	const STANDARD: Standard = Standard::Wwvb;
	const CARRIER: Carrier = Carrier { frequency: 20000., waveform: Waveform::Square };
	const MODE: Mode = Mode::Transient;
	const STYLE: Style = Style::DeferredPulse;

	fn resolve(instant: Instant, _: Options) -> CalendarFields {
		let target = instant.minute();
		let day = target.div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY;

		let mut f = CalendarFields::at(target, 0);
		f.dst = DstRule::Us.is_active(target);
		f.dst_change = f.dst != DstRule::Us.is_active(day + SECONDS_PER_DAY);
		f.dst_day_start = DstRule::Us.is_active(day);
		f.leap = leap_second(target, LEAP_WARNING_WINDOW);
		f
	}

	fn encode(fields: &CalendarFields) -> Frame {
		let mut frame = FrameBuilder::new(Self::STANDARD);

		frame.push(MARKER);
		push_weighted(&mut frame, &mut Weighted::new(fields.minute as u16), &[40, 20, 10, PAD, 8, 4, 2, 1]);
		frame.push(MARKER);
		push_weighted(&mut frame, &mut Weighted::new(fields.hour as u16), &[PAD, PAD, 20, 10, PAD, 8, 4, 2, 1]);
		frame.push(MARKER);

		let mut yday = Weighted::new(fields.yday);
		push_weighted(&mut frame, &mut yday, &[PAD, PAD, 200, 100, PAD, 80, 40, 20, 10]);
		frame.push(MARKER);
		push_weighted(&mut frame, &mut yday, &[8, 4, 2, 1]);

		// DUT1 sign and magnitude
		push_zeros(&mut frame, 5);
		frame.push(MARKER);
		push_zeros(&mut frame, 5);

		let mut year = Weighted::new(fields.year as u16);
		push_weighted(&mut frame, &mut year, &[80, 40, 20, 10]);
		frame.push(MARKER);
		push_weighted(&mut frame, &mut year, &[8, 4, 2, 1]);

		frame.push(bit(false));
		frame.push(bit(fields.leap_year));
		frame.push(bit(fields.leap != LeapSecond::None));
		// DST at the end of the UTC day, then at its start
		frame.push(bit(fields.dst != fields.dst_change));
		frame.push(bit(fields.dst_day_start));
		frame.push(MARKER);
		frame.finish()
	}

	fn describe(instant: Instant, _: Options) -> String {
		format!(
			"Local ({}): {} {} | {}",
			zone(instant.local_offset),
			stamp(instant.utc.sec, instant.local_offset),
			utc_suffix(&instant),
			if DstRule::Us.is_active(instant.utc.sec) { "DST ON" } else { "DST OFF" }
		)
	}
}

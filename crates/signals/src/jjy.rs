//! Support for transmitting the JJY time signal.
//!
//! See [JJY documentation](https://en.wikipedia.org/wiki/JJY) for details. The tone is switched on
//! at the start of every second and off again after 0.8 s (zero), 0.5 s (one) or 0.2 s (marker).
//! Time is sent in JST for the minute in progress, or in the host's local time when
//! [`Toggle::UseLocalTime`] is set. JJY has no daylight saving time of its own; the DST bit is
//! only set by [`Toggle::ForceDst`].
//!
//! Unsupported features include:
//! - **Call sign announcements** at minutes 15 and 45. Regular time frames are sent instead.
//!
//! # Examples
//!
//! ```
//! # use signals::{Instant, Options, Standard, Toggle};
//! # use time::TimeSpec;
//! // Saturday, July 4, 2020. 02:36:58 UTC
//! let now = Instant::new(TimeSpec::from_secs(1593830218), -4 * 3600);
//!
//! let fields = Standard::Jjy.resolve(now, Options::default());
//! assert_eq!((fields.hour, fields.minute, fields.yday), (11, 36, 186));
//!
//! // The same minute in the host's zone
//! let options = Options::default().with(Toggle::UseLocalTime, true);
//! let fields = Standard::Jjy.resolve(now, options);
//! assert_eq!((fields.day, fields.hour, fields.minute), (3, 22, 36));
//! ```

use time::leap::{leap_second, LeapSecond, LEAP_WARNING_WINDOW};
use crate::code::{Parity, Weighted, PAD};
use crate::fields::{stamp, utc_suffix, CalendarFields, Instant, Options, Toggle};
use crate::frame::{Frame, FrameBuilder, Symbol};
use crate::{Carrier, Mode, Standard, StandardEncoder, Style, Waveform};

/// Offset of JST from UTC.
const JST: i32 = 9 * 3600;

/// The JJY stations at Mount Otakadoya and Mount Hagane, Japan.
pub struct Jjy;

const MARKER: Symbol = Symbol::marker(0.2);

fn bit(b: bool) -> Symbol {
	if b { Symbol::data(0.5, 1) } else { Symbol::data(0.8, 0) }
}

/// Push one bit per weight, counting ones into `parity`. Weights of [`PAD`] always send zero.
fn push_weighted(frame: &mut FrameBuilder, parity: &mut Parity, value: &mut Weighted, weights: &[u16]) {
	for &weight in weights {
		frame.push(bit(parity.record(value.take(weight))));
	}
}

impl StandardEncoder for Jjy {
	const STANDARD: Standard = Standard::Jjy;
	const CARRIER: Carrier = Carrier { frequency: 13333., waveform: Waveform::Square };
	const MODE: Mode = Mode::Transient;
	const STYLE: Style = Style::RestoreThenHold;
	const TOGGLES: &'static [(Toggle, &'static str)] = &[
		(Toggle::UseLocalTime, "Use Local Time instead of JST"),
		(Toggle::ForceDst, "Enable DST")
	];

	fn resolve(instant: Instant, options: Options) -> CalendarFields {
		let target = instant.minute();
		let offset = if options.use_local_time { instant.local_offset } else { JST };

		let mut f = CalendarFields::at(target, offset);
		f.dst = options.force_dst;
		f.leap = leap_second(target, LEAP_WARNING_WINDOW);
		f
	}

	fn encode(fields: &CalendarFields) -> Frame {
		let mut frame = FrameBuilder::new(Self::STANDARD);
		let mut unused = Parity::default();

		// PA2
		let mut minute = Parity::default();
		frame.push(MARKER);
		push_weighted(&mut frame, &mut minute, &mut Weighted::new(fields.minute as u16), &[40, 20, 10, PAD, 8, 4, 2, 1]);

		// PA1
		let mut hour = Parity::default();
		frame.push(MARKER);
		push_weighted(&mut frame, &mut hour, &mut Weighted::new(fields.hour as u16), &[PAD, PAD, 20, 10, PAD, 8, 4, 2, 1]);

		let mut yday = Weighted::new(fields.yday);
		frame.push(MARKER);
		push_weighted(&mut frame, &mut unused, &mut yday, &[PAD, PAD, 200, 100, PAD, 80, 40, 20, 10]);
		frame.push(MARKER);
		push_weighted(&mut frame, &mut unused, &mut yday, &[8, 4, 2, 1]);

		frame.push(bit(false));
		frame.push(bit(false));
		frame.push(bit(hour.even()));
		frame.push(bit(minute.even()));
		frame.push(bit(false));
		frame.push(MARKER);

		frame.push(bit(fields.dst));
		push_weighted(&mut frame, &mut unused, &mut Weighted::new(fields.year as u16), &[80, 40, 20, 10, 8, 4, 2, 1]);
		frame.push(MARKER);

		push_weighted(&mut frame, &mut unused, &mut Weighted::new(fields.wday as u16), &[4, 2, 1]);
		let (ls1, ls2) = match fields.leap {
			LeapSecond::Pending => (true, true),
			LeapSecond::Removal => (true, false),
			LeapSecond::None => (false, false)
		};
		frame.push(bit(ls1));
		frame.push(bit(ls2));
		for _ in 55..59 {
			frame.push(bit(false));
		}
		frame.push(MARKER);
		frame.finish()
	}

	fn describe(instant: Instant, options: Options) -> String {
		let dst = if options.force_dst { "[DST ON]" } else { "[DST OFF]" };
		if options.use_local_time {
			format!("Local Time {}: {} {}", dst, stamp(instant.utc.sec, instant.local_offset), utc_suffix(&instant))
		} else {
			format!("JST (UTC+9) {}: {} {}", dst, stamp(instant.utc.sec, JST), utc_suffix(&instant))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Role;
	use time::{TimeSpec, SECONDS_PER_DAY};

	const MARKERS: [usize; 7] = [0, 9, 19, 29, 39, 49, 59];

	fn resolve(sec: i64, options: Options) -> CalendarFields {
		Jjy::resolve(Instant::new(TimeSpec::from_secs(sec), -5 * 3600), options)
	}

	fn bits(frame: &Frame) -> Vec<bool> {
		frame.slots().iter().enumerate().map(|(i, s)| {
			assert_eq!(s.role == Role::Marker, MARKERS.contains(&i), "marker at {}", i);
			match (s.role, s.duration) {
				(Role::Marker, d) => { assert_eq!(d, 0.2); false },
				(Role::Data(1), d) => { assert_eq!(d, 0.5); true },
				(Role::Data(0), d) => { assert_eq!(d, 0.8); false },
				_ => panic!("bad symbol {:?} at {}", s, i)
			}
		}).collect()
	}

	/// Reference decoder. Checks PA1 and PA2.
	fn decode(frame: &Frame) -> CalendarFields {
		let b = bits(frame);
		let value = |slots: &[(usize, u16)]| slots.iter().filter(|&&(i, _)| b[i]).map(|&(_, w)| w).sum::<u16>();
		let ones = |range: core::ops::Range<usize>| b[range].iter().filter(|&&x| x).count();
		assert_eq!((ones(10..19) + b[36] as usize) % 2, 0, "PA1");
		assert_eq!((ones(1..9) + b[37] as usize) % 2, 0, "PA2");
		for zero in [4, 10, 11, 14, 20, 21, 24, 34, 35, 38, 55, 56, 57, 58] {
			assert!(!b[zero], "slot {} set", zero);
		}

		CalendarFields {
			minute: value(&[(1, 40), (2, 20), (3, 10), (5, 8), (6, 4), (7, 2), (8, 1)]) as u8,
			hour: value(&[(12, 20), (13, 10), (15, 8), (16, 4), (17, 2), (18, 1)]) as u8,
			yday: value(&[(22, 200), (23, 100), (25, 80), (26, 40), (27, 20), (28, 10), (30, 8), (31, 4), (32, 2), (33, 1)]),
			dst: b[40],
			year: value(&[(41, 80), (42, 40), (43, 20), (44, 10), (45, 8), (46, 4), (47, 2), (48, 1)]) as u8,
			wday: value(&[(50, 4), (51, 2), (52, 1)]) as u8,
			leap: match (b[53], b[54]) {
				(true, true) => LeapSecond::Pending,
				(true, false) => LeapSecond::Removal,
				_ => LeapSecond::None
			},
			..Default::default()
		}
	}

	#[test]
	fn resolve_test() {
		// Saturday, July 4, 2020. 11:36:58 JST
		let f = resolve(1593830218, Options::default());
		assert_eq!(f.minute, 36);
		assert_eq!(f.hour, 11);
		assert_eq!(f.yday, 186);
		assert_eq!(f.year, 20);
		assert_eq!(f.wday, 6);
		assert!(!f.dst);
		assert_eq!(f.leap, LeapSecond::None);

		// Friday, July 3, 2020. 21:36:58 in UTC-5
		let f = resolve(1593830218, Options { use_local_time: true, force_dst: true });
		assert_eq!((f.day, f.hour, f.minute, f.wday, f.yday), (3, 21, 36, 5, 185));
		assert!(f.dst);
	}

	#[test]
	fn frame_test() {
		// Monday, May 27, 2024. 01:57 JST
		let frame = Jjy::encode(&resolve(1716742650, Options::default()));
		let b = bits(&frame);
		// Minute 57: [40] 20 [10] 0 8 [4] [2] [1]
		assert_eq!(b[1..9], [true, false, true, false, false, true, true, true]);
		// Hour 1, then both parity bits set
		assert_eq!(b[10..19], [false, false, false, false, false, false, false, false, true]);
		assert_eq!(b[36..38], [true, true]);
		// Monday
		assert_eq!(b[50..53], [false, false, true]);
	}

	#[test]
	fn leap_second_test() {
		let epoch = 1483228800;
		let f = resolve(epoch - 30 * SECONDS_PER_DAY, Options::default());
		assert_eq!(f.leap, LeapSecond::Pending);
		assert_eq!(bits(&Jjy::encode(&f))[53..55], [true, true]);

		let f = resolve(epoch - 32 * SECONDS_PER_DAY, Options::default());
		assert_eq!(f.leap, LeapSecond::None);
		assert_eq!(bits(&Jjy::encode(&f))[53..55], [false, false]);

		let f = CalendarFields { leap: LeapSecond::Removal, ..f };
		assert_eq!(bits(&Jjy::encode(&f))[53..55], [true, false]);
	}

	#[test]
	fn round_trip_test() {
		let options = [Options::default(), Options { use_local_time: true, force_dst: true }];
		for sec in [1593830218, 1716742650, 1483228800 - 86400, 946684799, 4102444740, 0] {
			for o in options {
				let f = resolve(sec, o);
				let expected = CalendarFields { day: 0, month: 0, leap_year: false, dst_change: false, ..f };
				assert_eq!(decode(&Jjy::encode(&f)), expected, "{} {:?}", sec, o);
			}
		}
	}

	#[test]
	fn describe_test() {
		let now = Instant::new(TimeSpec::from_secs(1593830218), -5 * 3600);
		assert_eq!(
			Jjy::describe(now, Options::default()),
			"JST (UTC+9) [DST OFF]: 2020-07-04 11:36:58 | UTC: 2020-07-04 02:36:58"
		);
		assert_eq!(
			Jjy::describe(now, Options { use_local_time: true, force_dst: true }),
			"Local Time [DST ON]: 2020-07-03 21:36:58 | UTC: 2020-07-04 02:36:58"
		);
	}
}

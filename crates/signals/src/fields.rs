//! Calendar fields and the inputs used to resolve them.

use core::fmt::Write;
use time::{leap::LeapSecond, TimeSpec, Tm};

/// A wall-clock instant, together with the host's offset from UTC at that instant.
///
/// The offset is only used by stations that can transmit local time instead of their official
/// zone, and by status lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Instant {
	/// The instant itself, as Unix time.
	pub utc: TimeSpec,
	/// Seconds east of UTC on the host.
	pub local_offset: i32
}

impl Instant {
	pub fn new(utc: TimeSpec, local_offset: i32) -> Self {
		Instant { utc, local_offset }
	}

	/// An instant on a host running in UTC.
	pub fn from_utc(utc: TimeSpec) -> Self {
		Instant { utc, local_offset: 0 }
	}

	/// The same wall-clock reading at a different instant.
	pub fn at(self, utc: TimeSpec) -> Self {
		Instant { utc, ..self }
	}

	/// Unix time of the start of the minute containing `self`.
	pub fn minute(&self) -> i64 {
		self.utc.floor_minute().sec
	}
}

/// Named option toggles. Unspecified toggles default to off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Toggle {
	/// Transmit the host's local time instead of the station's official zone.
	UseLocalTime,
	/// Set the DST bit regardless of the calendar.
	ForceDst
}

/// A snapshot of option toggles.
///
/// # Examples
///
/// ```
/// # use signals::{Options, Toggle};
/// let o = Options::default().with(Toggle::ForceDst, true);
/// assert!(o.get(Toggle::ForceDst));
/// assert!(!o.get(Toggle::UseLocalTime));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
	pub use_local_time: bool,
	pub force_dst: bool
}

impl Options {
	pub fn get(&self, toggle: Toggle) -> bool {
		match toggle {
			Toggle::UseLocalTime => self.use_local_time,
			Toggle::ForceDst => self.force_dst
		}
	}

	pub fn with(mut self, toggle: Toggle, value: bool) -> Self {
		match toggle {
			Toggle::UseLocalTime => self.use_local_time = value,
			Toggle::ForceDst => self.force_dst = value
		}
		self
	}
}

/// The calendar values a station transmits for one minute.
///
/// Values are already in the station's zone and numbering (e.g. DCF77 counts weekdays from
/// Monday = 1, the others from Sunday = 0).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalendarFields {
	/// Minute, ranged [0, 59]
	pub minute: u8,
	/// Hour, ranged [0, 23]
	pub hour: u8,
	/// Day of the month, ranged [1, 31]
	pub day: u8,
	/// Month, ranged [1, 12]
	pub month: u8,
	/// Year of the century, ranged [0, 99]
	pub year: u8,
	/// Day of the week, in the station's numbering
	pub wday: u8,
	/// Day of the year, ranged [1, 366]
	pub yday: u16,
	/// Daylight saving time in effect
	pub dst: bool,
	/// Daylight saving time about to change (the window depends on the station)
	pub dst_change: bool,
	/// Daylight saving time in effect at 00:00 UTC of the transmitted day (WWVB only)
	pub dst_day_start: bool,
	pub leap: LeapSecond,
	pub leap_year: bool
}

impl CalendarFields {
	/// Calendar fields of Unix time `time` in a zone `offset` seconds east of UTC.
	///
	/// DST and leap second flags are left unset.
	///
	/// # Examples
	///
	/// ```
	/// # use signals::CalendarFields;
	/// // Sun, May 26, 2024. 16:58:00 UTC, seen from UTC+9
	/// let f = CalendarFields::at(1716742680, 9 * 3600);
	/// assert_eq!((f.day, f.hour, f.minute, f.wday), (27, 1, 58, 1));
	/// ```
	pub fn at(time: i64, offset: i32) -> Self {
		let tm = Tm::new(time + offset as i64);
		CalendarFields {
			minute: tm.min,
			hour: tm.hour,
			day: tm.day,
			month: tm.mon,
			year: tm.year_of_century(),
			wday: tm.wday,
			yday: tm.yday,
			dst: false,
			dst_change: false,
			dst_day_start: false,
			leap: LeapSecond::None,
			leap_year: tm.isleapyear()
		}
	}
}

/// Format Unix time `time`, shifted by `offset` seconds, as `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn stamp(time: i64, offset: i32) -> String {
	let tm = Tm::new(time + offset as i64);
	format!("{}-{:02}-{:02} {:02}:{:02}:{:02}", tm.year, tm.mon, tm.day, tm.hour, tm.min, tm.sec)
}

/// Format an offset east of UTC as `UTC+HH:MM`.
pub(crate) fn zone(offset: i32) -> String {
	let mut s = String::from(if offset < 0 { "UTC-" } else { "UTC+" });
	let offset = offset.unsigned_abs();
	let _ = write!(s, "{:02}:{:02}", offset / 3600, offset % 3600 / 60);
	s
}

/// The `| UTC: ...` suffix shared by every status line.
pub(crate) fn utc_suffix(instant: &Instant) -> String {
	format!("| UTC: {}", stamp(instant.utc.sec, 0))
}

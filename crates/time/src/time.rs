//! Utilities for dealing with time (UTC and Unix timestamps), unaware of timezone.
//!
//! This module provides utilities to get the current Unix time with nanosecond granularity
//! and various calendar utilities to convert to/from Unix time. Since the calendar functions
//! do not rely on libc's mktime and gmtime functions, they are completely thread safe.
//!
//! # Examples
//!
//! ```
//! # use time::time::Tm;
//! let date = Tm::new(1718617807);
//!	assert_eq!(date, Tm {
//!		sec: 7,
//!		min: 50,
//!		hour: 9,
//!		day: 17,
//!		mon: 6,
//!		year: 2024,
//!		wday: 1,
//!		yday: 169
//!	});
//! ```

use core::ops::{Add, AddAssign, Sub};
#[cfg(feature = "now")]
use core::mem::MaybeUninit;
#[cfg(feature = "now")]
use libc::{timespec, clock_gettime, CLOCK_REALTIME};

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: i64 = 60;
/// Seconds per hour.
pub const SECONDS_PER_HOUR: i64 = SECONDS_PER_MINUTE * 60;
/// Seconds per day.
pub const SECONDS_PER_DAY: i64 = SECONDS_PER_HOUR * 24;
/// Nanoseconds per second.
const NANOSECONDS_PER_SECOND: i64 = 1_000_000_000;
/// Days per non-leap year.
const DAYS_PER_NON_LEAP_YEAR: i64 = 365;
/// Leap years occur every 4 years...
const YEARS_PER_LEAP_YEAR_1: i64 = 4;
/// ... except every 100, unless it's the end of the era.
const YEARS_PER_LEAP_YEAR_2: i64 = 100;
/// Number of years per era.
const YEARS_PER_ERA: i64 = 400;
/// Number of days every 4 years.
const DAYS_PER_LEAP_YEAR_1: i64 = YEARS_PER_LEAP_YEAR_1 * DAYS_PER_NON_LEAP_YEAR;
/// Number of days every 100 years.
const DAYS_PER_LEAP_YEAR_2: i64 = YEARS_PER_LEAP_YEAR_2 * DAYS_PER_NON_LEAP_YEAR
                                + YEARS_PER_LEAP_YEAR_2 / YEARS_PER_LEAP_YEAR_1 - 1;
/// Number of days every era (400 years), excluding the last leap day.
const DAYS_PER_LEAP_YEAR_3: i64 = YEARS_PER_ERA * DAYS_PER_NON_LEAP_YEAR
                                + (YEARS_PER_ERA / YEARS_PER_LEAP_YEAR_2)
                                * (YEARS_PER_LEAP_YEAR_2 / YEARS_PER_LEAP_YEAR_1 - 1);
/// Number of days every era (400 years).
const DAYS_PER_ERA: i64 = DAYS_PER_LEAP_YEAR_3 + 1;
/// Days from January 1 to February 28, inclusive.
const DAYS_FROM_JAN_TO_FEB: i64 = 31 + 28;
/// Days per week.
const DAYS_PER_WEEK: i64 = 7;
/// Days from March 1, 0000 to January 1, 1970.
const DAYS_FROM_JAN_1970_TO_MARCH_0000: i64 = (1970 / YEARS_PER_ERA) * DAYS_PER_ERA
                                            + (1970 % YEARS_PER_ERA) * DAYS_PER_NON_LEAP_YEAR
                                            + (1970 % YEARS_PER_ERA) / YEARS_PER_LEAP_YEAR_1
                                            - (1970 % YEARS_PER_ERA) / YEARS_PER_LEAP_YEAR_2
                                            - DAYS_FROM_JAN_TO_FEB;

/// Helper type to support math on [`TimeSpec`]s. Represents seconds.
///
/// # Examples
///
/// ```
/// # use time::time::{Seconds, TimeSpec};
/// // Jan 1, 2025. 12:00:00.123456789 UTC.
/// let c = TimeSpec { sec: 1735732800, nsec: 123456789 };
/// assert_eq!(c + Seconds(10), TimeSpec { sec: c.sec + 10, nsec: c.nsec });
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(transparent)]
pub struct Seconds(pub i64);

/// Helper type to support math on [`TimeSpec`]s. Represents nanoseconds.
///
/// Adding nanoseconds to a [`TimeSpec`] will roll over seconds if needed, see the examples.
/// Subtracting two [`TimeSpec`]s yields the signed distance between them in nanoseconds.
///
/// # Examples
///
/// ```
/// # use time::time::{Nanoseconds, TimeSpec};
/// // Jan 1, 2025. 12:00:00.123456789 UTC.
/// let mut c = TimeSpec { sec: 1735732800, nsec: 123456789 };
/// assert_eq!(c + Nanoseconds(10), TimeSpec { sec: c.sec, nsec: 123456799});
/// c.nsec = 999999999;
/// assert_eq!(c + Nanoseconds(10), TimeSpec { sec: c.sec + 1, nsec: 9});
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Nanoseconds(pub i64);

impl Nanoseconds {
	/// The distance in (fractional) seconds.
	///
	/// ```
	/// # use time::time::Nanoseconds;
	/// assert_eq!(Nanoseconds(1_500_000_000).as_secs_f64(), 1.5);
	/// assert_eq!(Nanoseconds(-250_000_000).as_secs_f64(), -0.25);
	/// ```
	pub fn as_secs_f64(self) -> f64 {
		self.0 as f64 / NANOSECONDS_PER_SECOND as f64
	}
}

/// Unix time with nanosecond granularity.
///
/// Supports simple addition / addition-assignment with [`Seconds`] and [`Nanoseconds`].
/// Subtracting one [`TimeSpec`] from another gives [`Nanoseconds`].
///
/// # Examples
///
/// ```
/// # use time::time::{Seconds, Nanoseconds, TimeSpec};
/// // Jan 1, 2025. 12:00:00.999999999 UTC.
/// let c = TimeSpec { sec: 1735732800, nsec: 999999999 };
/// assert_eq!(c + Seconds(10) + Nanoseconds(10), TimeSpec { sec: c.sec + 11, nsec: 9});
/// assert_eq!(c + Seconds(2) - c, Nanoseconds(2_000_000_000));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpec {
	/// Seconds since the Unix epoch
	pub sec: i64,
	/// Nanoseconds since the beginning of `sec`, ranging [0-999999999]
	pub nsec: i64
}

impl TimeSpec {
	/// A whole-second timestamp.
	pub const fn from_secs(sec: i64) -> Self {
		TimeSpec { sec, nsec: 0 }
	}

	/// The start of the minute containing `self`.
	///
	/// ```
	/// # use time::time::TimeSpec;
	/// let t = TimeSpec { sec: 1735732845, nsec: 5 };
	/// assert_eq!(t.floor_minute(), TimeSpec::from_secs(1735732800));
	/// ```
	pub fn floor_minute(self) -> Self {
		TimeSpec::from_secs(self.sec - self.sec.rem_euclid(SECONDS_PER_MINUTE))
	}
}

#[cfg_attr(docsrs, doc(cfg(feature = "now")))]
#[cfg(feature = "now")]
impl From<timespec> for TimeSpec {
	/// Convert from `libc::timespec` to [`TimeSpec`] for better math ergonomics
	fn from(value: timespec) -> Self {
		TimeSpec {
			sec: value.tv_sec,
			nsec: value.tv_nsec
		}
	}
}

impl Add<Seconds> for TimeSpec {
	type Output = Self;

	/// Add `rhs` seconds to `self`.
	fn add(mut self, rhs: Seconds) -> Self::Output {
		self.sec += rhs.0;
		self
	}
}

impl AddAssign<Seconds> for TimeSpec {
	/// Add `rhs` seconds to `self`.
	fn add_assign(&mut self, rhs: Seconds) {
		*self = *self + rhs;
	}
}

impl Add<Nanoseconds> for TimeSpec {
	type Output = Self;

	/// Add `rhs` nanoseconds to `self`, rolling over seconds as needed to ensure `nsec` stays in
	/// the range of [0-999999999].
	fn add(mut self, rhs: Nanoseconds) -> Self::Output {
		self.nsec += rhs.0;
		self.sec += self.nsec.div_euclid(NANOSECONDS_PER_SECOND);
		self.nsec = self.nsec.rem_euclid(NANOSECONDS_PER_SECOND);
		self
	}
}

impl AddAssign<Nanoseconds> for TimeSpec {
	fn add_assign(&mut self, rhs: Nanoseconds) {
		*self = *self + rhs;
	}
}

impl Sub for TimeSpec {
	type Output = Nanoseconds;

	/// The signed distance from `rhs` to `self`.
	fn sub(self, rhs: TimeSpec) -> Self::Output {
		Nanoseconds((self.sec - rhs.sec) * NANOSECONDS_PER_SECOND + (self.nsec - rhs.nsec))
	}
}

/// Get the current time as a Unix timestamp with nanosecond granularity.
///
/// This function will return `None` if `libc::clock_gettime` fails.
///
/// This function is thread safe.
///
/// # Examples
///
/// ```
/// # use time::time::now;
/// let c = now().expect("Failed to get current time");
/// assert!(c.sec > 0);
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "now")))]
#[cfg(feature = "now")]
pub fn now() -> Option<TimeSpec> {
	let mut time = MaybeUninit::<timespec>::uninit();
	// Safety:
	// - clock_gettime does not read time, only writes
	// - if clock_gettime returns zero, time is successfully initialized
	unsafe {
		match clock_gettime(CLOCK_REALTIME, time.as_mut_ptr()) {
			0 => Some(time.assume_init().into()),
			_ => None
		}
	}
}

/// Get the host's offset from UTC, in seconds, in effect at Unix time `sec`.
///
/// The offset includes daylight saving time if the host's timezone observes it. Returns `None`
/// if `libc::localtime_r` fails.
///
/// # Examples
///
/// ```
/// # use time::time::local_utc_offset;
/// let offset = local_utc_offset(1735732800).expect("Failed to get local offset");
/// assert!(offset.abs() <= 14 * 3600);
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "now")))]
#[cfg(feature = "now")]
pub fn local_utc_offset(sec: i64) -> Option<i32> {
	let time: libc::time_t = sec;
	let mut local = MaybeUninit::<libc::tm>::uninit();
	// Safety:
	// - localtime_r only reads time and only writes local
	// - if localtime_r returns non-null, local is successfully initialized
	unsafe {
		if libc::localtime_r(&time, local.as_mut_ptr()).is_null() {
			None
		} else {
			Some(local.assume_init().tm_gmtoff as i32)
		}
	}
}

/// Check whether a given `year` is a leap year.
///
/// Year must be the absolute Gregorian calendar year (i.e. 2024).
///
/// # Examples
///
/// ```
/// # use time::time::isleapyear;
/// assert_eq!(isleapyear(1900), false);
/// assert_eq!(isleapyear(2000), true);
/// assert_eq!(isleapyear(2020), true);
/// assert_eq!(isleapyear(2023), false);
/// assert_eq!(isleapyear(2024), true);
/// ```
#[inline(always)]
pub fn isleapyear(year: i32) -> bool {
	let l = if year%100 != 0 { 3 } else { 15 };
	(year & l) == 0
}

/// Gregorian calendar date, equivalent to [`libc::tm`] with some small incompatibilities.
///
/// Key differences:
/// - `mon` is [0, 11] in [`libc::tm`] but [1, 12] in [`Tm`].
/// - `yday` is [0, 365] in [`libc::tm`] but [1, 366] in [`Tm`].
/// - `year` is the absolute Gregorian calendar year, not years since 1900.
///
/// # Examples
///
/// ```
/// # use time::time::Tm;
/// let date = Tm::new(1718617807);
/// assert_eq!(date, Tm {
/// 	sec: 7,
/// 	min: 50,
/// 	hour: 9,
/// 	day: 17,
/// 	mon: 6,
/// 	year: 2024,
/// 	wday: 1,
/// 	yday: 169
/// });
/// ```
#[derive(Clone, Copy)]
#[derive(Debug, PartialEq)]
pub struct Tm {
	/// Seconds, ranged [0, 59]
	pub sec: u8,
	/// Minutes, ranged [0, 59]
	pub min: u8,
	/// Hours, ranged [0, 23]
	pub hour: u8,
	/// Day of the month, ranged [1, 31]
	pub day: u8,
	/// Month of the year, ranged [1, 12]
	pub mon: u8,
	/// Absolute Gregorian calendar year
	pub year: i32,
	/// Day of the week, ranged [0, 6] => [Sunday, Saturday]
	pub wday: u8,
	/// Day of the year, ranged [1, 366]
	pub yday: u16
}

impl Tm {
	/// Convert a Unix timestamp into a calendar date.
	///
	/// Every timestamp maps to a date, including those before the Unix epoch. Years outside the
	/// range of `i32` wrap.
	pub fn new(unixtimestamp: i64) -> Tm {
		let days = unixtimestamp.div_euclid(SECONDS_PER_DAY);
		let rem = unixtimestamp.rem_euclid(SECONDS_PER_DAY);
		let (y, m, d) = civil_from_days(days);

		Tm {
			sec: (rem % SECONDS_PER_MINUTE) as u8,
			min: (rem % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
			hour: (rem / SECONDS_PER_HOUR) as u8,
			day: d,
			mon: m,
			year: y as i32,
			wday: (days + 4).rem_euclid(DAYS_PER_WEEK) as u8, // Jan 1, 1970 was a Thursday
			// Date-only arithmetic: days since midnight on January 1 of the same year
			yday: (days - days_from_civil(y, 1, 1) + 1) as u16
		}
	}

	/// Check whether `self` is a leap year.
	#[inline(always)]
	pub fn isleapyear(&self) -> bool {
		isleapyear(self.year)
	}

	/// The last two digits of the year, ranged [0, 99].
	#[inline(always)]
	pub fn year_of_century(&self) -> u8 {
		self.year.rem_euclid(100) as u8
	}
}

/// Convert days since the Unix epoch into a `(year, month, day)` triple.
///
/// The short explanation of this algorithm is that the Gregorian calendar repeats every 400
/// years, with internal repetition every 100 years and again every 4 years (this is how leap
/// years work). Since leap days get added at the end of February if it's a leap year, we rotate
/// the calendar to be Mar-Feb instead of Jan-Dec, which puts the leap day as the last day of the
/// rotated year. Finally, the year is "un-rotated" back to the real Jan-Dec year.
///
/// More details: http://howardhinnant.github.io/date_algorithms.html#civil_from_days
fn civil_from_days(days: i64) -> (i64, u8, u8) {
	let z = days + DAYS_FROM_JAN_1970_TO_MARCH_0000;
	let era = z.div_euclid(DAYS_PER_ERA);
	let doe = z.rem_euclid(DAYS_PER_ERA);
	let yoe = (doe
		       - doe / DAYS_PER_LEAP_YEAR_1
		       + doe / DAYS_PER_LEAP_YEAR_2
		       - doe / DAYS_PER_LEAP_YEAR_3
		      ) / DAYS_PER_NON_LEAP_YEAR;
	let doy = doe - (DAYS_PER_NON_LEAP_YEAR * yoe + yoe / YEARS_PER_LEAP_YEAR_1 - yoe / YEARS_PER_LEAP_YEAR_2);
	// Linear equation that calculates the month from a set day of year
	let mp = (5 * doy + 2) / 153;
	// Linear equation that calculates the day of month from a day of year and month number
	let d = doy - (153 * mp + 2) / 5 + 1;
	let m = if mp < 10 { mp + 3 } else { mp - 9 };
	let y = yoe + era * YEARS_PER_ERA + (m <= 2) as i64;
	(y, m as u8, d as u8)
}

/// Days since the Unix epoch for a given year, month, and day.
///
/// More details: http://howardhinnant.github.io/date_algorithms.html#days_from_civil
fn days_from_civil(y: i64, m: u8, d: u8) -> i64 {
	let y = if m < 3 { y - 1 } else { y };
	let era = y.div_euclid(YEARS_PER_ERA);
	let yoe = y - era * YEARS_PER_ERA;
	let m2 = (m as i64 + 9) % 12;
	let doy = (153 * m2 + 2) / 5 + d as i64 - 1;
	let doe = yoe * DAYS_PER_NON_LEAP_YEAR
			+ yoe / YEARS_PER_LEAP_YEAR_1
			- yoe / YEARS_PER_LEAP_YEAR_2
			+ doy;
	era * DAYS_PER_ERA + doe - DAYS_FROM_JAN_1970_TO_MARCH_0000
}

/// Get the Unix timestamp for 00:00:00 UTC on a given year, month, and day.
///
/// `y` must be the absolute Gregorian calendar year, `m` the 1-indexed month starting at January,
/// and `d` the day of the month.
///
/// # Examples
///
/// ```
/// # use time::time::timestamp_from_ymd;
/// assert_eq!(timestamp_from_ymd(2024, 2, 28), 1709078400);
/// assert_eq!(timestamp_from_ymd(2024, 2, 29), 1709164800);
/// assert_eq!(timestamp_from_ymd(2024, 3, 1), 1709251200);
/// ```
pub fn timestamp_from_ymd(y: i32, m: u8, d: u8) -> i64 {
	SECONDS_PER_DAY * days_from_civil(y as i64, m, d)
}

/// Get the weekday (0-6 => Sunday-Saturday) for a given year, month, and day.
///
/// `y` must be the absolute Gregorian calendar year, `m` the 1-indexed month starting at January,
/// and `d` the day of the month.
///
/// # Examples
///
/// ```
/// # use time::time::wday_from_ymd;
/// assert_eq!(wday_from_ymd(2024, 1, 1), 1);   // Monday
/// assert_eq!(wday_from_ymd(2024, 2, 29), 4);  // Thursday
/// assert_eq!(wday_from_ymd(2024, 10, 27), 0); // Sunday
/// ```
pub fn wday_from_ymd(y: i32, m: u8, d: u8) -> u8 {
	(days_from_civil(y as i64, m, d) + 4).rem_euclid(DAYS_PER_WEEK) as u8
}

/// The number of days in a given month.
///
/// `y` must be the absolute Gregorian calendar year, and `m` the 1-indexed month starting at
/// January.
pub fn days_per_month(y: i32, m: u8) -> u8 {
	// Details: https://www.youtube.com/watch?v=J9KijLyP-yg&t=1470s
	if m == 2 {
		if isleapyear(y) { 29 } else { 28 }
	} else {
		30 | (m ^ (m >> 3))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use core::mem::MaybeUninit;
	use libc::{time_t, tm};

	// Get the libc version of UTC calendar time
	fn utc_time(time: time_t) -> tm {
		unsafe {
			let mut utc = MaybeUninit::<tm>::uninit();
			libc::gmtime_r(&time, utc.as_mut_ptr());
			utc.assume_init()
		}
	}

	fn compare_dates(time: i64) {
		let d1 = utc_time(time);
		let d2 = Tm::new(time);
		assert_eq!(d1.tm_sec, d2.sec as i32, "time: {}, sec: {} vs. {}", time, d1.tm_sec, d2.sec);
		assert_eq!(d1.tm_min, d2.min as i32, "time: {}, min: {} vs. {}", time, d1.tm_min, d2.min);
		assert_eq!(d1.tm_hour, d2.hour as i32, "time: {}, hour: {} vs. {}", time, d1.tm_hour, d2.hour);
		assert_eq!(d1.tm_mday, d2.day as i32, "time: {}, mday: {} vs. {}", time, d1.tm_mday, d2.day);
		assert_eq!(d1.tm_mon + 1, d2.mon as i32, "time: {}, mon: {} vs. {}", time, d1.tm_mon + 1, d2.mon);
		assert_eq!(d1.tm_year + 1900, d2.year, "time: {}, year: {} vs. {}", time, d1.tm_year + 1900, d2.year);
		assert_eq!(d1.tm_wday, d2.wday as i32, "time: {}, wday: {} vs. {}", time, d1.tm_wday, d2.wday);
		assert_eq!(d1.tm_yday + 1, d2.yday as i32, "time: {}, yday: {} vs. {}", time, d1.tm_yday + 1, d2.yday);
	}

	#[test]
	fn date_test() {
		compare_dates(-94694400);
		compare_dates(-1);
		compare_dates(0);
		compare_dates(5097600);
		compare_dates(17185926);
		compare_dates(31449600);
		compare_dates(94694400);
		compare_dates(951782400);
		compare_dates(1718617807);
		compare_dates(1655459407);
		compare_dates(1844848207);
		compare_dates(961235407);
		compare_dates(929613007);
		compare_dates(4107542399);

		// Make sure extreme inputs cannot panic
		Tm::new(i64::MAX);
		Tm::new(i64::MIN);
	}

	#[test]
	fn yday_test() {
		// Dec 31 of a leap year is day 366, Jan 1 is always day 1
		assert_eq!(Tm::new(timestamp_from_ymd(2024, 12, 31) + 86399).yday, 366);
		assert_eq!(Tm::new(timestamp_from_ymd(2025, 1, 1)).yday, 1);
		assert_eq!(Tm::new(timestamp_from_ymd(2023, 12, 31)).yday, 365);
		assert_eq!(Tm::new(timestamp_from_ymd(2024, 3, 1)).yday, 61);
	}

	#[test]
	fn isleapyear_test() {
		assert_eq!(isleapyear(1900), false);
		assert_eq!(isleapyear(2000), true);
		assert_eq!(isleapyear(2020), true);
		assert_eq!(isleapyear(2023), false);
		assert_eq!(isleapyear(2024), true);
		assert_eq!(isleapyear(-400), true);
		assert_eq!(isleapyear(-100), false);

		// Make sure extreme inputs cannot panic
		isleapyear(i32::MIN);
		isleapyear(i32::MAX);
	}

	#[test]
	fn timestamp_from_ymd_test() {
		assert_eq!(timestamp_from_ymd(1970, 1, 1), 0);
		assert_eq!(timestamp_from_ymd(2024, 1, 1), 1704067200);
		assert_eq!(timestamp_from_ymd(2024, 2, 28), 1709078400);
		assert_eq!(timestamp_from_ymd(2024, 2, 29), 1709164800);
		assert_eq!(timestamp_from_ymd(2024, 3, 1), 1709251200);
		assert_eq!(timestamp_from_ymd(2024, 10, 27), 1729987200);
		assert_eq!(timestamp_from_ymd(1969, 1, 1), -31536000);

		// Make sure extreme inputs cannot panic
		timestamp_from_ymd(0, 0, 0);
		timestamp_from_ymd(i32::MAX, u8::MAX, u8::MAX);
		timestamp_from_ymd(i32::MIN, u8::MAX, u8::MAX);
	}

	#[test]
	fn wday_from_ymd_test() {
		assert_eq!(wday_from_ymd(2024, 1, 1), 1);
		assert_eq!(wday_from_ymd(2024, 2, 28), 3);
		assert_eq!(wday_from_ymd(2024, 2, 29), 4);
		assert_eq!(wday_from_ymd(2024, 3, 1), 5);
		assert_eq!(wday_from_ymd(2024, 10, 27), 0);
		assert_eq!(wday_from_ymd(1969, 12, 31), 3);

		// Make sure extreme inputs cannot panic
		let x = wday_from_ymd(0, 0, 0);
		assert!(x < 7);
		let x = wday_from_ymd(i32::MAX, u8::MAX, u8::MAX);
		assert!(x < 7);
	}

	#[test]
	fn days_per_month_test() {
		assert_eq!(days_per_month(2024, 1), 31);
		assert_eq!(days_per_month(2024, 2), 29);
		assert_eq!(days_per_month(2023, 2), 28);
		assert_eq!(days_per_month(2024, 3), 31);
		assert_eq!(days_per_month(2024, 4), 30);
		assert_eq!(days_per_month(2024, 5), 31);
		assert_eq!(days_per_month(2024, 6), 30);
		assert_eq!(days_per_month(2024, 7), 31);
		assert_eq!(days_per_month(2024, 8), 31);
		assert_eq!(days_per_month(2024, 9), 30);
		assert_eq!(days_per_month(2024, 10), 31);
		assert_eq!(days_per_month(2024, 11), 30);
		assert_eq!(days_per_month(2024, 12), 31);

		// Make sure extreme inputs cannot panic
		days_per_month(0, 0);
		days_per_month(i32::MAX, u8::MAX);
	}

	#[test]
	fn timespec_math_test() {
		let a = TimeSpec { sec: 100, nsec: 250_000_000 };
		let b = TimeSpec { sec: 98, nsec: 750_000_000 };
		assert_eq!(a - b, Nanoseconds(1_500_000_000));
		assert_eq!(b - a, Nanoseconds(-1_500_000_000));
		assert_eq!(b + (a - b), a);
		assert_eq!(a + Nanoseconds(-300_000_000), TimeSpec { sec: 99, nsec: 950_000_000 });
		assert!(b < a);
		assert_eq!(TimeSpec { sec: -61, nsec: 0 }.floor_minute(), TimeSpec::from_secs(-120));
	}
}

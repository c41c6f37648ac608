//! Daylight saving time rules.
//!
//! The stations only ever need two rule families, both fixed in UTC:
//! - [`DstRule::Eu`]: last Sunday of March 01:00 UTC until last Sunday of October 01:00 UTC.
//! - [`DstRule::Us`]: second Sunday of March 07:00 UTC (02:00 EST) until first Sunday of November
//!   06:00 UTC (02:00 EDT).
//!
//! # Examples
//!
//! ```
//! # use time::{dst::DstRule, time::timestamp_from_ymd};
//! let (start, end) = DstRule::Us.transitions(2024).unwrap();
//! assert_eq!(start, timestamp_from_ymd(2024, 3, 10) + 7 * 3600);
//! assert_eq!(end, timestamp_from_ymd(2024, 11, 3) + 6 * 3600);
//! ```

use crate::time::{timestamp_from_ymd, wday_from_ymd, Tm, SECONDS_PER_HOUR};

/// A daylight saving time rule family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DstRule {
	/// No daylight saving time.
	None,
	/// European Union rules, used by DCF77 and MSF.
	Eu,
	/// United States rules, used by WWVB.
	Us
}

/// Day of the month of the last Sunday in month `m`, which has 31 days.
fn last_sunday(y: i32, m: u8) -> u8 {
	31 - wday_from_ymd(y, m, 31)
}

/// Day of the month of the `n`th Sunday in month `m`.
fn nth_sunday(y: i32, m: u8, n: u8) -> u8 {
	1 + (7 - wday_from_ymd(y, m, 1)) % 7 + 7 * (n - 1)
}

impl DstRule {
	/// The UTC start and end of daylight saving time in `year`, or `None` if the rule never
	/// observes it.
	pub fn transitions(self, year: i32) -> Option<(i64, i64)> {
		match self {
			DstRule::None => None,
			DstRule::Eu => Some((
				timestamp_from_ymd(year, 3, last_sunday(year, 3)) + SECONDS_PER_HOUR,
				timestamp_from_ymd(year, 10, last_sunday(year, 10)) + SECONDS_PER_HOUR
			)),
			DstRule::Us => Some((
				timestamp_from_ymd(year, 3, nth_sunday(year, 3, 2)) + 7 * SECONDS_PER_HOUR,
				timestamp_from_ymd(year, 11, nth_sunday(year, 11, 1)) + 6 * SECONDS_PER_HOUR
			))
		}
	}

	/// Whether daylight saving time is in effect at Unix time `time`.
	///
	/// Both rule families start and end inside the same calendar year, so the year of `time` in
	/// UTC selects the transitions.
	pub fn is_active(self, time: i64) -> bool {
		match self.transitions(Tm::new(time).year) {
			Some((start, end)) => start <= time && time < end,
			None => false
		}
	}
}

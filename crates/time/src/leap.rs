//! Leap seconds.
//!
//! [`LEAP_SECONDS`] lists every leap second set by the IERS together with the cumulative offset
//! (TAI - UTC) in effect from that timestamp onwards. Whether a given entry inserts or removes a
//! second follows from the change in the cumulative offset.
//!
//! # Examples
//!
//! ```
//! # use time::leap::{leap_second, LeapSecond, LEAP_WARNING_WINDOW};
//! // Ten days before the leap second at the end of 2016
//! assert_eq!(leap_second(1483228800 - 10 * 86400, LEAP_WARNING_WINDOW), LeapSecond::Pending);
//! // Long after it
//! assert_eq!(leap_second(1483228800 + 86400, LEAP_WARNING_WINDOW), LeapSecond::None);
//! ```

use crate::time::SECONDS_PER_DAY;

/// A list of all leap seconds currently set and approved by IERS.
///
/// This list contains the timestamp at which the leap second occurs, and the number of cumulative
/// leap seconds in effect at that timestamp. Note that the leap second technically occurs in the
/// second **before** the value here. See [Wikipedia] for more details.
///
/// [Wikipedia]: https://en.wikipedia.org/wiki/Leap_second
pub const LEAP_SECONDS: [(i64, i16); 28] = [(63072000,   10), (78796800,   11), (94694400,   12), (126230400,  13),
											(157766400,  14), (189302400,  15), (220924800,  16), (252460800,  17),
											(283996800,  18), (315532800,  19), (362793600,  20), (394329600,  21),
											(425865600,  22), (489024000,  23), (567993600,  24), (631152000,  25),
											(662688000,  26), (709948800,  27), (741484800,  28), (773020800,  29),
											(820454400,  30), (867715200,  31), (915148800,  32), (1136073600, 33),
											(1230768000, 34), (1341100800, 35), (1435708800, 36), (1483228800, 37)];

/// How far ahead of a leap second the stations start announcing it, in seconds.
pub const LEAP_WARNING_WINDOW: i64 = 31 * SECONDS_PER_DAY;

/// Leap second status as broadcast by the stations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeapSecond {
	/// No leap second within the warning window.
	#[default]
	None,
	/// A second will be inserted.
	Pending,
	/// A second will be removed.
	Removal
}

/// Look up the leap second status at `time` in the IERS table.
///
/// See [`leap_second_in`].
pub fn leap_second(time: i64, window: i64) -> LeapSecond {
	leap_second_in(&LEAP_SECONDS, time, window)
}

/// Look up the leap second status at `time` in `table`.
///
/// Returns [`LeapSecond::Pending`] or [`LeapSecond::Removal`] if an entry lies strictly after
/// `time` and no more than `window` seconds away. `table` must be sorted by timestamp, in the same
/// format as [`LEAP_SECONDS`]. The first entry has no predecessor and is treated as an insertion.
///
/// # Examples
///
/// ```
/// # use time::leap::{leap_second_in, LeapSecond};
/// let table = [(1000, 37), (2000, 36)];
/// assert_eq!(leap_second_in(&table, 1500, 600), LeapSecond::Removal);
/// assert_eq!(leap_second_in(&table, 500, 600), LeapSecond::Pending);
/// assert_eq!(leap_second_in(&table, 1000, 600), LeapSecond::None);
/// ```
pub fn leap_second_in(table: &[(i64, i16)], time: i64, window: i64) -> LeapSecond {
	let next = table.iter().position(|&(t, _)| t > time);
	let Some(i) = next else { return LeapSecond::None };
	let (t, total) = table[i];
	if t - time > window {
		return LeapSecond::None;
	}
	match i.checked_sub(1).map(|p| table[p].1) {
		Some(previous) if total < previous => LeapSecond::Removal,
		_ => LeapSecond::Pending
	}
}

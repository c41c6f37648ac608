//! Parse date time strings like `YYYY-MM-DD HH:mm:ss.sss`.
//!
//! This module provides a single function, [`parse_timestamp`], which can be used to parse a date
//! time string into a Unix timestamp, represented by [`TimeSpec`].
//!
//! # Examples
//! ```
//! # use time::{parse::parse_timestamp, time::TimeSpec};
//! assert_eq!(
//! 	parse_timestamp("2025-02-18T12:30:45Z"),
//! 	Ok(TimeSpec { sec: 1739881845, nsec: 0 })
//! );
//! assert_eq!(
//! 	parse_timestamp("2025-02-18T12:30:45+01:00"),
//! 	Ok(TimeSpec { sec: 1739878245, nsec: 0 })
//! );
//! assert_eq!(
//! 	parse_timestamp("2025-02-18 12:30:45 -01:00"),
//! 	Ok(TimeSpec { sec: 1739885445, nsec: 0 })
//! );
//! ```

use thiserror::Error;
use crate::time::{days_per_month, timestamp_from_ymd, TimeSpec};

/// Error type for parsing date time strings.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
	#[error("Year missing or malformed")]
	MissingYear,
	#[error("Month missing or malformed")]
	MissingMonth,
	#[error("Month out of range")]
	MonthOutOfRange,
	#[error("Day missing or malformed")]
	MissingDay,
	#[error("Day out of range")]
	DayOutOfRange,
	#[error("Hours missing or malformed")]
	MissingHours,
	#[error("Hours out of range")]
	HoursOutOfRange,
	/// Hour was supplied but minutes were missing.
	#[error("Minutes missing or malformed")]
	MissingMinutes,
	#[error("Minutes out of range")]
	MinutesOutOfRange,
	#[error("Seconds missing or malformed")]
	MissingSeconds,
	#[error("Seconds out of range")]
	SecondsOutOfRange,
	#[error("Milliseconds missing or malformed")]
	MissingMilliseconds,
	/// Found unexpected bytes after a valid date time string.
	#[error("Unexpected input at end of date time string")]
	UnexpectedInput
}

/// Byte cursor over the remaining input.
struct Cursor<'a>(&'a [u8]);

impl<'a> Cursor<'a> {
	fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Consume `byte` if it is next.
	fn eat(&mut self, byte: u8) -> bool {
		match self.0.split_first() {
			Some((&b, rest)) if b == byte => {
				self.0 = rest;
				true
			},
			_ => false
		}
	}

	/// Consume and return the next byte if it is one of `bytes`.
	fn eat_any(&mut self, bytes: &[u8]) -> Option<u8> {
		let (&b, rest) = self.0.split_first()?;
		if bytes.contains(&b) {
			self.0 = rest;
			Some(b)
		} else {
			None
		}
	}

	/// Consume a fixed-length, unsigned integer of `N` digits.
	fn num<const N: usize>(&mut self, e: ParseError) -> Result<u16, ParseError> {
		// Only allow numbers that can safely fit in u16
		const { assert!(N < 5); }

		let digits = self.0.get(..N).ok_or(e)?;
		let r = digits.iter().try_fold(0u16, |r, &b| match b {
			b'0'..=b'9' => Ok(r * 10 + (b - b'0') as u16),
			_ => Err(e)
		})?;
		self.0 = &self.0[N..];
		Ok(r)
	}

	fn bounded<const N: usize>(&mut self, max: u16, missing: ParseError, range: ParseError) -> Result<i64, ParseError> {
		let v = self.num::<N>(missing)?;
		if v > max { Err(range) } else { Ok(v as i64) }
	}
}

/// Parse a date time string into a Unix timestamp.
///
/// When a timezone is omitted, all dates/times are assumed to be UTC. The literal `T` may be a
/// space, and a space is allowed between the time and timezone.
///
/// Examples of valid formats:
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `YYYY-MM-DDTHH:mm` or `YYYY-MM-DD HH:mm`
/// - `YYYY-MM-DDTHH:mm:ss` or `YYYY-MM-DDTHH:mm:ss.sss`
/// - Each of the prior bullets with a time, followed by `Z`, `+HH:mm` or `-HH:mm`
///
/// # Errors
///
/// Returns [`ParseError`] if the input was malformed or invalid in any way. This includes cases
/// where a valid timestamp was read but additional characters remain.
///
/// # Examples
/// ```
/// # use time::{parse::parse_timestamp, time::TimeSpec};
/// assert_eq!(parse_timestamp("2025"), Ok(TimeSpec { sec: 1735689600, nsec: 0 }));
/// assert_eq!(
/// 	parse_timestamp("2025-02-18T12:30:45.123"),
/// 	Ok(TimeSpec { sec: 1739881845, nsec: 123000000 })
/// );
/// ```
pub fn parse_timestamp(input: &str) -> Result<TimeSpec, ParseError> {
	let mut c = Cursor(input.as_bytes());

	let year = c.num::<4>(ParseError::MissingYear)? as i32;
	let mut month = 1;
	let mut day = 1;
	if !c.is_empty() {
		if !c.eat(b'-') {
			return Err(ParseError::UnexpectedInput);
		}
		month = c.num::<2>(ParseError::MissingMonth)? as u8;
		if month == 0 || month > 12 {
			return Err(ParseError::MonthOutOfRange);
		}
	}
	if !c.is_empty() {
		if !c.eat(b'-') {
			return Err(ParseError::UnexpectedInput);
		}
		day = c.num::<2>(ParseError::MissingDay)? as u8;
		if day == 0 || day > days_per_month(year, month) {
			return Err(ParseError::DayOutOfRange);
		}
	}
	let mut timestamp = TimeSpec::from_secs(timestamp_from_ymd(year, month, day));
	if c.is_empty() {
		return Ok(timestamp);
	}

	// Time of day: hours and minutes are required together
	if c.eat_any(b"T ").is_none() {
		return Err(ParseError::UnexpectedInput);
	}
	let hours = c.bounded::<2>(23, ParseError::MissingHours, ParseError::HoursOutOfRange)?;
	if !c.eat(b':') {
		return Err(ParseError::MissingMinutes);
	}
	let minutes = c.bounded::<2>(59, ParseError::MissingMinutes, ParseError::MinutesOutOfRange)?;
	timestamp.sec += hours * 3600 + minutes * 60;

	if c.eat(b':') {
		timestamp.sec += c.bounded::<2>(59, ParseError::MissingSeconds, ParseError::SecondsOutOfRange)?;
		if c.eat(b'.') {
			timestamp.nsec = c.num::<3>(ParseError::MissingMilliseconds)? as i64 * 1_000_000;
		}
	}
	if c.is_empty() {
		return Ok(timestamp);
	}

	// Optional timezone
	c.eat(b' ');
	let sign = match c.eat_any(b"Z+-") {
		Some(b'Z') => return if c.is_empty() { Ok(timestamp) } else { Err(ParseError::UnexpectedInput) },
		Some(b'+') => -1,
		Some(_) => 1,
		None => return Err(ParseError::UnexpectedInput)
	};
	let hours = c.bounded::<2>(23, ParseError::MissingHours, ParseError::HoursOutOfRange)?;
	if !c.eat(b':') {
		return Err(ParseError::MissingMinutes);
	}
	let minutes = c.bounded::<2>(59, ParseError::MissingMinutes, ParseError::MinutesOutOfRange)?;
	timestamp.sec += sign * (hours * 3600 + minutes * 60);

	if c.is_empty() {
		Ok(timestamp)
	} else {
		Err(ParseError::UnexpectedInput)
	}
}

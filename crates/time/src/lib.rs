//! Utilities for dealing with time.
//!
//! This crate covers what the longwave stations need from a calendar and nothing more:
//! - [`time`] converts between Unix timestamps and UTC calendar time, with no understanding of
//!   timezones.
//! - [`dst`] knows the two daylight saving rule families the stations follow (EU and US).
//! - [`leap`] holds the IERS leap second table and answers whether one is coming up.
//! - [`parse`] reads date time strings such as `2025-02-18T12:30:45+01:00`.
//!
//! If the `now` feature is enabled, the [`time`] module also enables helpers to get the current
//! time ([`time::now`]) and the host's UTC offset ([`time::local_utc_offset`]).
//!
//! # Examples
//!
//! Basic conversion from Unix time to UTC calendar time.
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
//!
//! Checking whether summer time is in effect in Europe.
//! ```
//! # use time::dst::DstRule;
//! // 2024-03-31 00:59:59 UTC and 01:00:00 UTC
//! assert!(!DstRule::Eu.is_active(1711846799));
//! assert!(DstRule::Eu.is_active(1711846800));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod time;
pub mod dst;
pub mod leap;
pub mod parse;

pub use time::*;
pub use parse::*;

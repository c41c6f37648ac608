//! Support for transmitting the BPC time signal.
//!
//! BPC sends the time three times per minute, in 20 second sub-frames. Every second except the
//! first of each sub-frame carries a 2-bit symbol: the carrier is switched off for 0.1, 0.2, 0.3
//! or 0.4 s for the values 0 to 3. The first second of a sub-frame keeps the carrier on throughout.
//! Hours are sent on a 12 hour clock with a PM flag.
//!
//! Each sub-frame is laid out as:
//!
//! | Second | Content                                  |
//! | ------ | ---------------------------------------- |
//! | 0      | Marker                                   |
//! | 1      | Sub-frame index, 0 to 2                  |
//! | 2      | Zero                                     |
//! | 3-4    | Hour (12 hour clock)                     |
//! | 5-7    | Minute                                   |
//! | 8-9    | Day of the week, Sunday = 0              |
//! | 10     | PM flag (high bit) and checksum of 1-9   |
//! | 11-13  | Day of the month                         |
//! | 14-15  | Month                                    |
//! | 16-18  | Low six bits of the year of the century  |
//! | 19     | Year bit 6 (high bit) and checksum 11-18 |
//!
//! # Examples
//!
//! ```
//! # use signals::{Instant, Options, Standard, Role};
//! # use time::TimeSpec;
//! // Sunday, May 26, 2024. 16:57:00 UTC, 00:57 CST on Monday
//! let now = Instant::from_utc(TimeSpec::from_secs(1716742620));
//! let frame = Standard::Bpc.resolve_and_encode(now, Options::default());
//!
//! assert_eq!(frame.slots()[20].role, Role::Marker);
//! assert_eq!(frame.slots()[21].role, Role::Data(1)); // second sub-frame
//! ```

use crate::code::Checksum;
use crate::fields::{stamp, utc_suffix, CalendarFields, Instant, Options, Toggle};
use crate::frame::{Frame, FrameBuilder, Symbol};
use crate::{Carrier, Envelope, Mode, Standard, StandardEncoder, Style, Waveform};

/// Offset of CST from UTC.
const CST: i32 = 8 * 3600;

/// Carrier-off duration for each symbol value.
const LEVELS: [f64; 4] = [0.1, 0.2, 0.3, 0.4];

/// Seconds per sub-frame.
const SUBFRAME: usize = 20;

/// The BPC station in Shangqiu, China.
pub struct Bpc;

fn symbol(value: u8) -> Symbol {
	let value = value & 0x3;
	Symbol::data(LEVELS[value as usize], value)
}

impl StandardEncoder for Bpc {
	const STANDARD: Standard = Standard::Bpc;
	const CARRIER: Carrier = Carrier { frequency: 17125., waveform: Waveform::Sawtooth };
	const MODE: Mode = Mode::Transient;
	const STYLE: Style = Style::HoldThenRestore { low: Envelope::HoldLow, gated: true };
	const TOGGLES: &'static [(Toggle, &'static str)] = &[
		(Toggle::UseLocalTime, "Use Local Time instead of CST (UTC+8)")
	];

	fn resolve(instant: Instant, options: Options) -> CalendarFields {
		let offset = if options.use_local_time { instant.local_offset } else { CST };
		CalendarFields::at(instant.minute(), offset)
	}

	fn encode(fields: &CalendarFields) -> Frame {
		let mut frame = FrameBuilder::new(Self::STANDARD);
		let hour = fields.hour % 12;
		let pm = (fields.hour >= 12) as u8;
		let (minute, wday, day, month, year) = (fields.minute, fields.wday, fields.day, fields.month, fields.year);

		for i in 0..(crate::frame::SLOTS / SUBFRAME) as u8 {
			let mut crc = Checksum::default();
			frame.push(Symbol::marker(0.0));
			for s in [i, 0, hour >> 2, hour & 3, minute >> 4, (minute >> 2) & 3, minute & 3, wday >> 2, wday & 3] {
				frame.push(symbol(crc.fold(s)));
			}
			frame.push(symbol(pm << 1 | crc.take()));

			for s in [day >> 4, (day >> 2) & 3, day & 3, month >> 2, month & 3, (year >> 4) & 3, (year >> 2) & 3, year & 3] {
				frame.push(symbol(crc.fold(s)));
			}
			frame.push(symbol(((year >> 6) & 1) << 1 | crc.take()));
		}
		frame.finish()
	}

	fn describe(instant: Instant, options: Options) -> String {
		if options.use_local_time {
			format!("Local Time: {} {}", stamp(instant.utc.sec, instant.local_offset), utc_suffix(&instant))
		} else {
			format!("CST (UTC+8): {} {}", stamp(instant.utc.sec, CST), utc_suffix(&instant))
		}
	}
}

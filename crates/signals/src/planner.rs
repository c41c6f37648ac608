//! Turn a frame into timed envelope changes.
//!
//! [`plan`] is pure: the same frame, anchor and device time always produce the same events.
//! Slot `n` of the frame starts at device time `anchor.device_zero + n`. What happens inside the
//! slot is decided by the station's [`Style`]:
//!
//! | Style               | Stations   | Within one second                                          |
//! | ------------------- | ---------- | ---------------------------------------------------------- |
//! | `HoldThenRestore`   | DCF77, MSF | low at `t`, full at `t + d`, full again at `t + 0.999`     |
//! | (gated)             | BPC        | as above, then carrier off at `t + 1.0`                    |
//! | `RestoreThenHold`   | JJY        | tone on at `t`, off at `t + d`                             |
//! | `DeferredPulse`     | WWVB       | pulse on at `t + d`, off at `t + 1.0`                      |
//!
//! Events that fall before the device clock are dropped for transient carriers and pulled
//! forward to "now" for persistent ones.

use crate::frame::Frame;
use crate::schedule::{Mode, ScheduleAnchor};

/// Offset into a slot at which gain-modulated styles reassert full carrier.
pub const RESTORE_GUARD: f64 = 0.999;

/// A change to the carrier's gain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Envelope {
	/// Carrier off.
	HoldLow,
	/// Carrier at full level.
	RestoreHigh,
	/// Carrier reduced to the given fraction of full level.
	AttenuateTo(f32)
}

impl Envelope {
	/// Linear gain in [0, 1].
	pub fn gain(self) -> f32 {
		match self {
			Envelope::HoldLow => 0.,
			Envelope::RestoreHigh => 1.,
			Envelope::AttenuateTo(level) => level
		}
	}
}

/// An envelope change at a device time (seconds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmissionEvent {
	pub time: f64,
	pub envelope: Envelope
}

/// How a symbol's duration maps onto envelope changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Style {
	/// Carrier goes to `low` for the symbol's duration, then back to full. With `gated` the carrier
	/// is also switched off at the end of every second.
	HoldThenRestore { low: Envelope, gated: bool },
	/// Tone on for the symbol's duration, then off.
	RestoreThenHold,
	/// Carrier off for the symbol's duration, then a pulse until the end of the second.
	DeferredPulse
}

/// Plan the envelope events for `frame`.
///
/// `device_now` is the channel's clock at planning time. Events are returned in non-decreasing
/// time order and none of them is earlier than `device_now`.
///
/// # Examples
///
/// ```
/// # use signals::{planner::plan, schedule::ScheduleAnchor, Instant, Mode, Options, Standard};
/// # use time::TimeSpec;
/// let target = TimeSpec::from_secs(1716742620);
/// let frame = Standard::Wwvb.resolve_and_encode(Instant::from_utc(target), Options::default());
///
/// // Plan one second ahead of the minute
/// let anchor = ScheduleAnchor::fresh(target, TimeSpec::from_secs(1716742619), 10.);
/// let events = plan(&frame, &anchor, Mode::Transient, Standard::Wwvb.style(), 10.);
/// assert_eq!(events.len(), 120);
/// // Marker: the pulse begins 0.8 s into the first second
/// assert!((events[0].time - 11.8).abs() < 1e-9);
/// ```
pub fn plan(frame: &Frame, anchor: &ScheduleAnchor, mode: Mode, style: Style, device_now: f64) -> Vec<EmissionEvent> {
	let mut events = Vec::with_capacity(frame.slots().len() * 4);
	let mut emit = |time: f64, envelope: Envelope| {
		match mode {
			Mode::Transient if time < device_now => {},
			Mode::Transient => events.push(EmissionEvent { time, envelope }),
			Mode::Persistent => events.push(EmissionEvent { time: time.max(device_now), envelope })
		}
	};

	for (slot, symbol) in frame.slots().iter().enumerate() {
		let t = anchor.device_zero + slot as f64;
		let d = symbol.duration;
		match style {
			Style::HoldThenRestore { low, gated } => {
				if d > 0. {
					emit(t, low);
				}
				emit(t + d, Envelope::RestoreHigh);
				emit(t + RESTORE_GUARD, Envelope::RestoreHigh);
				if gated {
					emit(t + 1., Envelope::HoldLow);
				}
			},
			Style::RestoreThenHold => {
				emit(t, Envelope::RestoreHigh);
				emit(t + d, Envelope::HoldLow);
			},
			Style::DeferredPulse => {
				emit(t + d, Envelope::RestoreHigh);
				emit(t + 1., Envelope::HoldLow);
			}
		}
	}

	events
}

//! Anchoring wall-clock minutes to the device clock.
//!
//! The simulator reasons in wall-clock time (which minute to transmit) while the channel plays in
//! device time. A [`ScheduleAnchor`] ties the two together for one target minute.
//!
//! Transient carriers (WWVB, JJY, BPC) are re-anchored every minute from both clocks. Persistent
//! carriers (DCF77, MSF) keep running across minute boundaries, so their anchor is advanced from
//! the previous one to keep the device timeline continuous. When the device clock runs fast, the
//! advanced anchor creeps towards "now"; the drift guard pushes it forward again and logs the
//! correction.

use time::TimeSpec;
use tracing::{debug, info, warn};
use crate::channel::{Carrier, ChannelError, SignalChannel};
use crate::frame::Frame;
use crate::planner::{plan, EmissionEvent, Envelope, Style};

/// Minimum lead, in seconds, a persistent anchor keeps ahead of the device clock.
pub const DRIFT_GUARD: f64 = 0.5;

/// Whether the carrier stays up between minutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
	/// Each minute is scheduled on its own; anything in the past is dropped.
	Transient,
	/// One carrier runs for the whole session; anything in the past is clamped to "now".
	Persistent
}

/// Device time of the start of a wall-clock target minute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleAnchor {
	/// Device time (seconds) at which slot 0 starts.
	pub device_zero: f64,
	/// Wall-clock start of the target minute.
	pub wall_zero: TimeSpec
}

impl ScheduleAnchor {
	/// Anchor `wall_target` by the current distance between both clocks.
	///
	/// ```
	/// # use signals::schedule::ScheduleAnchor;
	/// # use time::TimeSpec;
	/// let a = ScheduleAnchor::fresh(TimeSpec::from_secs(120), TimeSpec { sec: 119, nsec: 250_000_000 }, 3.);
	/// assert_eq!(a.device_zero, 3.75);
	/// ```
	pub fn fresh(wall_target: TimeSpec, wall_now: TimeSpec, device_now: f64) -> Self {
		ScheduleAnchor {
			device_zero: (wall_target - wall_now).as_secs_f64() + device_now,
			wall_zero: wall_target
		}
	}

	/// Move the anchor to `wall_target` along the same device timeline.
	///
	/// Returns the new anchor and whether the drift guard had to push it forward, in which case it
	/// is re-anchored to start [`DRIFT_GUARD`] seconds after `device_now`.
	pub fn advance(&self, wall_target: TimeSpec, device_now: f64) -> (Self, bool) {
		let device_zero = self.device_zero + (wall_target - self.wall_zero).as_secs_f64();
		if device_zero < device_now + DRIFT_GUARD {
			(ScheduleAnchor { device_zero: device_now + DRIFT_GUARD, wall_zero: wall_target }, true)
		} else {
			(ScheduleAnchor { device_zero, wall_zero: wall_target }, false)
		}
	}

	/// Whether the whole minute already lies in the past.
	pub fn expired(&self, device_now: f64) -> bool {
		self.device_zero + 60. <= device_now
	}
}

/// An open channel together with the anchor state carried between minutes.
///
/// Dropping a session does not close the channel; use [`ChannelSession::close`].
pub struct ChannelSession<C: SignalChannel> {
	channel: C,
	mode: Mode,
	style: Style,
	anchor: Option<ScheduleAnchor>,
	corrections: u32
}

impl<C: SignalChannel> ChannelSession<C> {
	/// Open `channel` for `carrier`.
	///
	/// # Errors
	///
	/// Returns the channel's [`ChannelError`] unchanged. The channel is dropped.
	pub fn open(mut channel: C, carrier: Carrier, mode: Mode, style: Style) -> Result<Self, ChannelError> {
		channel.open(&carrier)?;
		info!(frequency = carrier.frequency, waveform = ?carrier.waveform, ?mode, "opened signal channel");
		Ok(ChannelSession { channel, mode, style, anchor: None, corrections: 0 })
	}

	pub fn channel(&self) -> &C {
		&self.channel
	}

	/// The anchor of the most recently scheduled minute.
	pub fn anchor(&self) -> Option<ScheduleAnchor> {
		self.anchor
	}

	/// How many times the drift guard has re-anchored this session.
	pub fn corrections(&self) -> u32 {
		self.corrections
	}

	/// Drop the anchor so the next minute is anchored from both clocks again.
	///
	/// A persistent session gives up its continuous device timeline; the carrier stays up.
	pub fn resync(&mut self) {
		self.anchor = None;
	}

	/// Schedule `frame` for the minute starting at `wall_target`.
	///
	/// Returns the number of events handed to the channel.
	pub fn schedule(&mut self, frame: &Frame, wall_target: TimeSpec, wall_now: TimeSpec) -> usize {
		let device_now = self.channel.device_time();
		let anchor = match (self.mode, self.anchor) {
			(Mode::Persistent, Some(previous)) => {
				let (anchor, corrected) = previous.advance(wall_target, device_now);
				if corrected {
					self.corrections += 1;
					warn!(
						standard = %frame.standard(),
						expected = previous.device_zero + (wall_target - previous.wall_zero).as_secs_f64(),
						device_now,
						device_zero = anchor.device_zero,
						"carrier drifted behind the device clock, re-anchoring"
					);
				}
				anchor
			},
			(Mode::Persistent, None) => {
				let anchor = ScheduleAnchor::fresh(wall_target, wall_now, device_now);
				// The carrier comes up at the start of the first minute
				self.channel.schedule(EmissionEvent {
					time: anchor.device_zero.max(device_now),
					envelope: Envelope::RestoreHigh
				});
				anchor
			},
			(Mode::Transient, _) => ScheduleAnchor::fresh(wall_target, wall_now, device_now)
		};
		self.anchor = Some(anchor);

		if self.mode == Mode::Transient && anchor.expired(device_now) {
			debug!(standard = %frame.standard(), target = wall_target.sec, "minute already over, skipping");
			return 0;
		}

		let events = plan(frame, &anchor, self.mode, self.style, device_now);
		for event in &events {
			self.channel.schedule(*event);
		}
		debug!(
			standard = %frame.standard(),
			target = wall_target.sec,
			device_zero = anchor.device_zero,
			events = events.len(),
			"scheduled minute"
		);
		events.len()
	}

	/// Stop the carrier, close the channel and hand it back.
	pub fn close(mut self) -> C {
		self.channel.close();
		info!(corrections = self.corrections, "closed signal channel");
		self.channel
	}
}

//! Drive one station minute by minute.
//!
//! A [`Simulator`] owns the channel session and a per-minute timer. [`Simulator::start`]
//! schedules the current minute straight away and arms the timer one second before the next
//! boundary; every [`Simulator::tick`] at or after the timer schedules the following minute and
//! re-arms it 60 s later. A tick that arrives after the scheduled minute has already begun
//! re-synchronises to the minute in progress instead of catching up one minute at a time. The
//! simulator never sleeps: callers wait for [`Simulator::next_fire`] themselves.
//!
//! # Examples
//!
//! ```no_run
//! # use signals::{Instant, Options, SignalChannel, Simulator, Standard};
//! # fn run<C: SignalChannel>(channel: C, now: impl Fn() -> Instant) -> Result<(), signals::ChannelError> {
//! let mut sim = Simulator::new(Standard::Dcf77, Options::default());
//! sim.start(channel, now())?;
//! loop {
//! 	// ...wait until sim.next_fire()...
//! 	sim.tick(now());
//! }
//! # }
//! ```

use time::{Seconds, TimeSpec};
use tracing::{info, warn};
use crate::channel::{ChannelError, SignalChannel};
use crate::fields::{Instant, Options};
use crate::frame::Frame;
use crate::schedule::ChannelSession;
use crate::Standard;

/// How long before a minute boundary the timer fires.
pub const LEAD: Seconds = Seconds(1);

/// The host's offset from UTC at a Unix time, `None` when unknown.
pub type LocalOffset = Box<dyn Fn(i64) -> Option<i32>>;

struct Running<C: SignalChannel> {
	session: ChannelSession<C>,
	/// Wall-clock start of the most recently scheduled minute.
	target: TimeSpec,
	next_fire: TimeSpec,
	frame: Frame
}

/// Schedules one station's frames on a channel, once per minute.
pub struct Simulator<C: SignalChannel> {
	standard: Standard,
	options: Options,
	local_offset: Option<LocalOffset>,
	running: Option<Running<C>>
}

/// The first minute to schedule at `now`, and the timer firing for the minute after it.
fn first_minute(now: TimeSpec) -> (TimeSpec, TimeSpec) {
	let mut target = now.floor_minute();
	let mut next_fire = target + Seconds(60) + Seconds(-LEAD.0);
	if next_fire < now {
		target += Seconds(60);
		next_fire += Seconds(60);
	}
	(target, next_fire)
}

/// The instant resolved for `target`. Uses the host offset in effect at `target` when known,
/// else the one sampled with `now`.
fn target_instant(local_offset: Option<&LocalOffset>, now: Instant, target: TimeSpec) -> Instant {
	match local_offset.and_then(|f| f(target.sec)) {
		Some(offset) => Instant::new(target, offset),
		None => now.at(target)
	}
}

impl<C: SignalChannel> Simulator<C> {
	pub fn new(standard: Standard, options: Options) -> Self {
		Simulator { standard, options, local_offset: None, running: None }
	}

	/// Look up the host offset for every target minute with `offset`.
	///
	/// Without it, the offset sampled with the wall-clock reading is reused for the target minute,
	/// which is wrong for the first minute after a host DST change.
	pub fn with_local_offset(mut self, offset: impl Fn(i64) -> Option<i32> + 'static) -> Self {
		self.local_offset = Some(Box::new(offset));
		self
	}

	pub fn standard(&self) -> Standard {
		self.standard
	}

	pub fn options(&self) -> Options {
		self.options
	}

	pub fn is_running(&self) -> bool {
		self.running.is_some()
	}

	/// Open `channel` and schedule the minute in progress.
	///
	/// If the next boundary is less than a second away, the schedule starts with the following
	/// minute instead. A running simulator is stopped first and its channel dropped.
	///
	/// # Errors
	///
	/// Returns [`ChannelError`] if the channel cannot be opened. The simulator is left stopped.
	pub fn start(&mut self, channel: C, now: Instant) -> Result<(), ChannelError> {
		self.stop();
		let session = ChannelSession::open(channel, self.standard.carrier(), self.standard.mode(), self.standard.style())?;

		let (target, next_fire) = first_minute(now.utc);
		let instant = target_instant(self.local_offset.as_ref(), now, target);
		let frame = self.standard.resolve_and_encode(instant, self.options);
		let mut running = Running { session, target, next_fire, frame };
		running.session.schedule(&running.frame, target, now.utc);
		info!(standard = %self.standard, target = target.sec, next_fire = next_fire.sec, "started");
		self.running = Some(running);
		Ok(())
	}

	/// Wall-clock time of the next timer firing, `None` when stopped.
	pub fn next_fire(&self) -> Option<TimeSpec> {
		self.running.as_ref().map(|r| r.next_fire)
	}

	/// Wall-clock start of the most recently scheduled minute, `None` when stopped.
	pub fn target(&self) -> Option<TimeSpec> {
		self.running.as_ref().map(|r| r.target)
	}

	/// Fire the timer if it is due. Returns whether a minute was scheduled.
	///
	/// If the minute the timer was armed for has already begun, the schedule jumps to the minute
	/// in progress and the channel session is re-anchored from both clocks.
	pub fn tick(&mut self, now: Instant) -> bool {
		let Some(running) = self.running.as_mut() else { return false };
		if now.utc < running.next_fire {
			return false;
		}

		if now.utc > running.next_fire + LEAD {
			let (target, next_fire) = first_minute(now.utc);
			warn!(
				standard = %self.standard,
				late = (now.utc - running.next_fire).as_secs_f64(),
				target = target.sec,
				"timer fired late, resynchronising"
			);
			running.session.resync();
			running.target = target;
			running.next_fire = next_fire;
		} else {
			running.target += Seconds(60);
			running.next_fire += Seconds(60);
		}
		let instant = target_instant(self.local_offset.as_ref(), now, running.target);
		running.frame = self.standard.resolve_and_encode(instant, self.options);
		running.session.schedule(&running.frame, running.target, now.utc);
		true
	}

	/// Cancel the timer, close the channel and clear the frame.
	///
	/// Returns the closed channel so it can be reopened, or `None` if not running.
	pub fn stop(&mut self) -> Option<C> {
		let running = self.running.take()?;
		info!(standard = %self.standard, "stopped");
		Some(running.session.close())
	}

	/// Switch station or options.
	///
	/// A running simulator is torn down completely and restarted on the same channel. A stopped
	/// one just remembers the choice.
	///
	/// # Errors
	///
	/// Returns [`ChannelError`] if the channel cannot be reopened. The simulator is left stopped.
	pub fn select(&mut self, standard: Standard, options: Options, now: Instant) -> Result<(), ChannelError> {
		let channel = self.stop();
		self.standard = standard;
		self.options = options;
		match channel {
			Some(channel) => self.start(channel, now),
			None => Ok(())
		}
	}

	/// The frame of the most recently scheduled minute.
	pub fn frame(&self) -> Option<&Frame> {
		self.running.as_ref().map(|r| &r.frame)
	}

	/// The open channel session, `None` when stopped.
	pub fn session(&self) -> Option<&ChannelSession<C>> {
		self.running.as_ref().map(|r| &r.session)
	}

	/// Status line for the selected station at `now`.
	pub fn describe(&self, now: Instant) -> String {
		self.standard.describe(now, self.options)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{Call, MockChannel};
	use crate::planner::Envelope;
	use time::Nanoseconds;

	// Sun, May 26, 2024. 16:57:00 UTC
	const T0: i64 = 1716742620;

	fn at(sec: i64, nsec: i64) -> Instant {
		Instant::from_utc(TimeSpec { sec, nsec })
	}

	#[test]
	fn start_schedules_current_minute_test() {
		let channel = MockChannel::new(0.);
		let log = channel.log();
		let mut sim = Simulator::new(Standard::Wwvb, Options::default());
		sim.start(channel, at(T0 + 30, 0)).unwrap();

		assert!(sim.is_running());
		assert_eq!(sim.target(), Some(TimeSpec::from_secs(T0)));
		assert_eq!(sim.next_fire(), Some(TimeSpec::from_secs(T0 + 59)));
		// Seconds 30-59 are still ahead, and the end of second 29 falls exactly on "now"
		assert_eq!(log.borrow().len(), 61);
		assert!(log.borrow().iter().all(|(_, e)| e.time >= 0.));
		assert!(sim.frame().is_some());
	}

	#[test]
	fn start_near_boundary_test() {
		let channel = MockChannel::new(0.);
		let mut sim = Simulator::new(Standard::Jjy, Options::default());
		sim.start(channel, at(T0 + 59, 500_000_000)).unwrap();
		assert_eq!(sim.target(), Some(TimeSpec::from_secs(T0 + 60)));
		assert_eq!(sim.next_fire(), Some(TimeSpec::from_secs(T0 + 119)));
	}

	#[test]
	fn tick_test() {
		let channel = MockChannel::new(0.);
		let clock = channel.clock();
		let log = channel.log();
		let mut sim = Simulator::new(Standard::Jjy, Options::default());
		sim.start(channel, at(T0, 0)).unwrap();
		let first = log.borrow().len();
		assert_eq!(first, 120);

		// Not due yet
		clock.set(58.);
		assert!(!sim.tick(at(T0 + 58, 0)));
		assert_eq!(log.borrow().len(), first);

		clock.set(59.);
		assert!(sim.tick(at(T0 + 59, 0)));
		assert_eq!(sim.target(), Some(TimeSpec::from_secs(T0 + 60)));
		assert_eq!(sim.next_fire(), Some(TimeSpec::from_secs(T0 + 119)));
		let log = log.borrow();
		assert_eq!(log.len(), 2 * first);
		// Next minute starts one second after the firing
		assert_eq!(log[first].1.time, 60.);
		assert_eq!(log[first].1.envelope, Envelope::RestoreHigh);
	}

	#[test]
	fn stop_test() {
		let channel = MockChannel::new(0.);
		let mut sim = Simulator::new(Standard::Bpc, Options::default());
		sim.start(channel, at(T0, 0)).unwrap();

		let channel = sim.stop().unwrap();
		assert!(channel.is_closed());
		assert!(!sim.is_running());
		assert_eq!(sim.next_fire(), None);
		assert!(sim.frame().is_none());
		assert!(!sim.tick(at(T0 + 59, 0)));
		assert!(sim.stop().is_none());
	}

	#[test]
	fn open_failure_leaves_stopped_test() {
		let mut sim = Simulator::new(Standard::Dcf77, Options::default());
		assert!(matches!(sim.start(MockChannel::failing(), at(T0, 0)), Err(ChannelError::NoDevice)));
		assert!(!sim.is_running());
		assert_eq!(sim.next_fire(), None);
	}

	#[test]
	fn select_restarts_test() {
		let channel = MockChannel::new(0.);
		let state = channel.state();
		let log = channel.log();
		let mut sim = Simulator::new(Standard::Dcf77, Options::default());
		sim.start(channel, at(T0, 0)).unwrap();

		sim.select(Standard::Bpc, Options { use_local_time: true, force_dst: false }, at(T0 + 10, 0)).unwrap();
		assert!(sim.is_running());
		assert_eq!(sim.standard(), Standard::Bpc);
		assert!(sim.options().use_local_time);
		assert_eq!(sim.frame().map(|f| f.standard()), Some(Standard::Bpc));
		let state = state.borrow();
		assert_eq!(state.opens, 2);
		assert_eq!(state.closes, 1);
		assert_eq!(state.carrier, Some(Standard::Bpc.carrier()));
		assert!(!state.closed);
		// The old session is closed before the channel is reopened, with nothing in between
		let close = state.calls.iter().position(|&c| c == Call::Close).unwrap();
		assert_eq!(state.calls[0], Call::Open);
		assert!(state.calls[1..close].iter().all(|&c| c == Call::Schedule));
		assert_eq!(state.calls[close + 1], Call::Open);
		assert!(state.calls[close + 2..].iter().all(|&c| c == Call::Schedule));
		assert!(state.calls.len() > close + 2);
		drop(state);

		// Stopped simulators only remember the choice
		sim.stop();
		let before = log.borrow().len();
		sim.select(Standard::Msf, Options::default(), at(T0 + 20, 0)).unwrap();
		assert!(!sim.is_running());
		assert_eq!(sim.standard(), Standard::Msf);
		assert_eq!(log.borrow().len(), before);
	}

	#[test]
	fn persistent_drift_test() {
		// Device clock runs 10 ms per minute fast
		let rate = 60.01 / 60.;
		let start = TimeSpec { sec: T0 + 30, nsec: 0 };
		let channel = MockChannel::new(0.);
		let clock = channel.clock();
		let log = channel.log();
		let mut sim = Simulator::new(Standard::Dcf77, Options::default());
		sim.start(channel, Instant::from_utc(start)).unwrap();

		for _ in 0..100 {
			let fire = sim.next_fire().unwrap();
			clock.set((fire - start).as_secs_f64() * rate);
			let before = log.borrow().len();
			assert!(sim.tick(Instant::from_utc(fire + Nanoseconds(1000))));

			let log = log.borrow();
			let batch = &log[before..];
			assert!(batch.iter().all(|(now, e)| e.time >= *now));
			assert!(batch.windows(2).all(|w| w[0].1.time <= w[1].1.time));
			// Scheduled at least the guard ahead of the device clock
			assert!(batch[0].1.time >= batch[0].0 + crate::schedule::DRIFT_GUARD - 1e-9);
		}

		let corrections = sim.session().map(|s| s.corrections()).unwrap();
		assert!(corrections > 0);
		assert!(corrections < 100);
	}

	#[test]
	fn stalled_timer_test() {
		let channel = MockChannel::new(0.);
		let clock = channel.clock();
		let log = channel.log();
		let mut sim = Simulator::new(Standard::Dcf77, Options::default());
		sim.start(channel, at(T0, 0)).unwrap();
		let anchor = |sim: &Simulator<MockChannel>| sim.session().and_then(|s| s.anchor()).map(|a| a.device_zero);
		assert_eq!(anchor(&sim), Some(0.));

		// Both clocks jump five and a half minutes
		clock.set(330.);
		let before = log.borrow().len();
		assert!(sim.tick(at(T0 + 330, 0)));
		assert_eq!(sim.target(), Some(TimeSpec::from_secs(T0 + 300)));
		assert_eq!(sim.next_fire(), Some(TimeSpec::from_secs(T0 + 359)));
		assert_eq!(anchor(&sim), Some(300.));
		assert!(log.borrow()[before..].iter().all(|(now, e)| e.time >= *now));

		// Back on schedule, with no drift correction
		clock.set(359.);
		assert!(sim.tick(at(T0 + 359, 0)));
		assert_eq!(sim.target(), Some(TimeSpec::from_secs(T0 + 360)));
		assert_eq!(anchor(&sim), Some(360.));
		assert_eq!(sim.session().map(|s| s.corrections()), Some(0));
	}

	#[test]
	fn late_tick_test() {
		let channel = MockChannel::new(0.);
		let clock = channel.clock();
		let mut sim = Simulator::new(Standard::Msf, Options::default());
		sim.start(channel, at(T0, 0)).unwrap();

		// Fifteen seconds into the minute the timer was armed for
		clock.set(75.);
		assert!(sim.tick(at(T0 + 75, 0)));
		assert_eq!(sim.target(), Some(TimeSpec::from_secs(T0 + 60)));
		assert_eq!(sim.next_fire(), Some(TimeSpec::from_secs(T0 + 119)));
		assert_eq!(sim.session().and_then(|s| s.anchor()).map(|a| a.device_zero), Some(60.));

		// In the last second of a later minute the schedule starts with the next one
		clock.set(179.5);
		assert!(sim.tick(at(T0 + 179, 500_000_000)));
		assert_eq!(sim.target(), Some(TimeSpec::from_secs(T0 + 180)));
		assert_eq!(sim.next_fire(), Some(TimeSpec::from_secs(T0 + 239)));
	}

	#[test]
	fn local_offset_test() {
		let options = Options { use_local_time: true, force_dst: false };
		let frame = |sec: i64, offset: i32| Standard::Bpc.resolve_and_encode(Instant::new(TimeSpec::from_secs(sec), offset), options);
		assert_ne!(frame(T0 + 60, 3600), frame(T0 + 60, 7200));

		// The host moves from UTC+1 to UTC+2 at T0 + 60
		let mut sim = Simulator::new(Standard::Bpc, options)
			.with_local_offset(|sec| Some(if sec < T0 + 60 { 3600 } else { 7200 }));
		sim.start(MockChannel::new(0.), Instant::new(TimeSpec::from_secs(T0), 0)).unwrap();
		assert_eq!(sim.frame(), Some(&frame(T0, 3600)));
		// Fires a second before the change, with the old offset on the wall clock
		assert!(sim.tick(Instant::new(TimeSpec::from_secs(T0 + 59), 3600)));
		assert_eq!(sim.frame(), Some(&frame(T0 + 60, 7200)));

		// Without a lookup the sampled offset is used
		let mut sim = Simulator::new(Standard::Bpc, options);
		sim.start(MockChannel::new(0.), Instant::new(TimeSpec::from_secs(T0), 3600)).unwrap();
		assert_eq!(sim.frame(), Some(&frame(T0, 3600)));

		// An unknown offset falls back to the sampled one
		let mut sim = Simulator::new(Standard::Bpc, options).with_local_offset(|_| None);
		sim.start(MockChannel::new(0.), Instant::new(TimeSpec::from_secs(T0), 3600)).unwrap();
		assert_eq!(sim.frame(), Some(&frame(T0, 3600)));
	}

	#[test]
	fn describe_test() {
		let sim: Simulator<MockChannel> = Simulator::new(Standard::Msf, Options::default());
		assert!(sim.describe(at(T0, 0)).contains("2024-05-26 16:57:00"));
	}
}

//! Frames: one minute of per-second modulation symbols.

use crate::Standard;

/// Number of slots in every frame.
pub const SLOTS: usize = 60;

/// What a symbol means to a receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
	/// Fixed synchronisation symbol carrying no data.
	Marker,
	/// A data symbol. Binary stations use 0 and 1, BPC uses 0 to 3.
	Data(u8),
	/// No modulation at all (DCF77 second 59).
	NoOp
}

/// One second of a frame.
///
/// `duration` is the length of the station's modulated section in seconds. What "modulated"
/// means (carrier reduced, carrier off, tone on) depends on the station's
/// [`Style`](crate::Style).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Symbol {
	pub duration: f64,
	pub role: Role
}

impl Symbol {
	pub const fn marker(duration: f64) -> Self {
		Symbol { duration, role: Role::Marker }
	}

	pub const fn data(duration: f64, value: u8) -> Self {
		Symbol { duration, role: Role::Data(value) }
	}

	pub const fn noop() -> Self {
		Symbol { duration: 0.0, role: Role::NoOp }
	}
}

/// Receives a frame one second at a time.
///
/// Any `FnMut(usize, &Symbol)` closure is a renderer.
pub trait Renderer {
	/// Called once per slot, in order.
	fn second(&mut self, slot: usize, symbol: &Symbol);
}

impl<F: FnMut(usize, &Symbol)> Renderer for F {
	fn second(&mut self, slot: usize, symbol: &Symbol) {
		self(slot, symbol)
	}
}

/// An immutable, complete frame for one standard and one target minute.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
	standard: Standard,
	slots: [Symbol; SLOTS]
}

impl Frame {
	pub fn standard(&self) -> Standard {
		self.standard
	}

	pub fn slots(&self) -> &[Symbol; SLOTS] {
		&self.slots
	}

	/// The modulated duration of each second, in order.
	pub fn durations(&self) -> impl Iterator<Item = f64> + '_ {
		self.slots.iter().map(|s| s.duration)
	}

	/// Feed every slot to `renderer`.
	///
	/// # Examples
	///
	/// ```
	/// # use signals::{Instant, Options, Standard, Symbol};
	/// # use time::TimeSpec;
	/// let frame = Standard::Jjy.resolve_and_encode(Instant::default(), Options::default());
	/// let mut total = 0.;
	/// frame.render(&mut |_: usize, s: &Symbol| total += s.duration);
	/// assert!(total > 0.);
	/// ```
	pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
		for (slot, symbol) in self.slots.iter().enumerate() {
			renderer.second(slot, symbol);
		}
	}
}

/// Builds a frame one slot at a time.
pub(crate) struct FrameBuilder {
	standard: Standard,
	slots: [Symbol; SLOTS],
	len: usize
}

impl FrameBuilder {
	pub fn new(standard: Standard) -> Self {
		FrameBuilder { standard, slots: [Symbol::noop(); SLOTS], len: 0 }
	}

	/// Append `symbol` and return the index of the next slot.
	pub fn push(&mut self, symbol: Symbol) -> usize {
		debug_assert!(self.len < SLOTS, "{} frame overflow", self.standard);
		if let Some(slot) = self.slots.get_mut(self.len) {
			*slot = symbol;
		}
		self.len += 1;
		self.len
	}

	pub fn finish(self) -> Frame {
		debug_assert_eq!(self.len, SLOTS, "{} frame incomplete", self.standard);
		Frame { standard: self.standard, slots: self.slots }
	}
}

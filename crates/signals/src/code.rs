//! Shared field encodings.
//!
//! Stations build their frames from a handful of encodings:
//! - Fixed width BCD groups, packed LSB first ([`bcd`], [`bits`]), with even parity ([`parity`]).
//! - Weighted subtraction over descending place values ([`Weighted`]), with running parity
//!   ([`Parity`]).
//! - 2-bit symbols with an interleaved XOR checksum ([`Checksum`]).
//!
//! # Examples
//!
//! ```
//! # use signals::code::{bcd, bits, Weighted};
//! // Minute 45 as DCF77 sends it: 4 unit bits then 3 tens bits, each LSB first
//! let b: Vec<bool> = bits(bcd(45, 4, 3), 7).collect();
//! assert_eq!(b, [true, false, true, false, false, false, true]);
//!
//! // The same minute as MSF sends it
//! let mut m = Weighted::new(45);
//! let b: Vec<bool> = [40, 20, 10, 8, 4, 2, 1].iter().map(|&w| m.take(w)).collect();
//! assert_eq!(b, [true, false, false, false, true, false, true]);
//! assert_eq!(m.remainder(), 0);
//! ```

/// Weight that no field value reaches, for slots a station always sends as zero.
pub const PAD: u16 = u16::MAX;

/// Pack `value` as two BCD digits: the units digit in the low `units` bits, the tens digit in
/// the following `tens` bits.
///
/// Digits wider than their group are truncated.
pub fn bcd(value: u8, units: u32, tens: u32) -> u64 {
	let mask = |width: u32| (1u64 << width) - 1;
	(value % 10) as u64 & mask(units) | ((value / 10 % 10) as u64 & mask(tens)) << units
}

/// The low `len` bits of `packed`, LSB first.
pub fn bits(packed: u64, len: u32) -> impl Iterator<Item = bool> {
	(0..len).map(move |i| (packed >> i) & 1 == 1)
}

/// The bit that makes the number of ones in `packed` even.
pub fn parity(packed: u64) -> bool {
	packed.count_ones() & 1 == 1
}

/// Weighted subtraction: emit a one and subtract whenever the remainder reaches the weight.
#[derive(Clone, Copy, Debug)]
pub struct Weighted(u16);

impl Weighted {
	pub fn new(value: u16) -> Self {
		Weighted(value)
	}

	pub fn take(&mut self, weight: u16) -> bool {
		if self.0 >= weight {
			self.0 -= weight;
			true
		} else {
			false
		}
	}

	/// What is left after the weights taken so far. Zero once every place value has been taken.
	pub fn remainder(&self) -> u16 {
		self.0
	}
}

/// Counts ones as they are emitted.
#[derive(Clone, Copy, Debug, Default)]
pub struct Parity(u32);

impl Parity {
	/// Count `bit` and pass it through.
	pub fn record(&mut self, bit: bool) -> bool {
		self.0 += bit as u32;
		bit
	}

	/// The bit that makes the total even.
	pub fn even(&self) -> bool {
		self.0 & 1 == 1
	}

	/// The bit that makes the total odd.
	pub fn odd(&self) -> bool {
		!self.even()
	}
}

/// XOR of both bits of every 2-bit symbol folded so far.
#[derive(Clone, Copy, Debug, Default)]
pub struct Checksum(u8);

impl Checksum {
	/// Fold `symbol` and pass it through.
	pub fn fold(&mut self, symbol: u8) -> u8 {
		self.0 ^= (symbol & 1) ^ ((symbol >> 1) & 1);
		symbol
	}

	/// The checksum so far. Starts a new one.
	pub fn take(&mut self) -> u8 {
		core::mem::take(&mut self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	const MINUTE: [u16; 7] = [40, 20, 10, 8, 4, 2, 1];
	const YDAY: [u16; 10] = [200, 100, 80, 40, 20, 10, 8, 4, 2, 1];

	fn weighted(value: u16, weights: &[u16]) -> (Vec<bool>, u16) {
		let mut w = Weighted::new(value);
		let b = weights.iter().map(|&x| w.take(x)).collect();
		(b, w.remainder())
	}

	#[test]
	fn bcd_test() {
		assert_eq!(bcd(45, 4, 3), 0x45);
		assert_eq!(bits(bcd(45, 4, 3), 7).collect::<Vec<_>>(), [true, false, true, false, false, false, true]);
		assert_eq!(bcd(23, 4, 2), 0x23);
		assert_eq!(bcd(12, 4, 1), 0x12);
		assert_eq!(bcd(99, 4, 4), 0x99);
		// Tens digit truncated to its group
		assert_eq!(bcd(45, 4, 2), 0x05);
	}

	#[test]
	fn parity_test() {
		assert!(!parity(0));
		assert!(parity(0b1));
		assert!(!parity(0b11));
		assert!(parity(0x45));
		assert!(!parity(0x23 | 1 << 20));

		let mut p = Parity::default();
		assert!(!p.even() && p.odd());
		assert!(p.record(true));
		assert!(!p.record(false));
		assert!(p.even() && !p.odd());
	}

	#[test]
	fn weighted_test() {
		assert_eq!(weighted(45, &MINUTE), (vec![true, false, false, false, true, false, true], 0));
		assert_eq!(weighted(59, &MINUTE), (vec![true, false, true, true, false, false, true], 0));
		assert_eq!(weighted(366, &YDAY).1, 0);
		// Padding never fires
		assert_eq!(weighted(9, &[PAD, 8, 4, 2, 1]), (vec![false, true, false, false, true], 0));
	}

	#[test]
	fn weighted_exhaustive_test() {
		for v in 0..=59 {
			assert_eq!(weighted(v, &MINUTE).1, 0, "minute {}", v);
		}
		for v in 0..=99 {
			assert_eq!(weighted(v, &[80, 40, 20, 10, 8, 4, 2, 1]).1, 0, "year {}", v);
		}
		for v in 1..=366 {
			assert_eq!(weighted(v, &YDAY).1, 0, "yday {}", v);
		}
	}

	#[test]
	fn checksum_test() {
		let mut c = Checksum::default();
		assert_eq!(c.fold(3), 3);
		assert_eq!(c.take(), 0);
		c.fold(1);
		c.fold(2);
		c.fold(2);
		assert_eq!(c.take(), 1);
		assert_eq!(c.take(), 0);
	}

	proptest! {
		#[test]
		fn prop_weighted_is_bcd(v in 0u16..=99) {
			// Tens-first weights produce the same bits as a BCD pair, most significant first
			let (b, rem) = weighted(v, &[80, 40, 20, 10, 8, 4, 2, 1]);
			prop_assert_eq!(rem, 0);
			let packed = bcd(v as u8, 4, 4);
			let expected: Vec<bool> = (0..8).rev().map(|i| (packed >> i) & 1 == 1).collect();
			prop_assert_eq!(b, expected);
		}

		#[test]
		fn prop_checksum_matches_parity(symbols in proptest::collection::vec(0u8..4, 0..12)) {
			let mut c = Checksum::default();
			let mut ones = 0;
			for s in &symbols {
				c.fold(*s);
				ones += s.count_ones();
			}
			prop_assert_eq!(c.take() as u32, ones & 1);
		}
	}
}

//! The output a simulator plays through.
//!
//! A [`SignalChannel`] owns a device clock and a single carrier whose gain follows the
//! [`EmissionEvent`]s handed to it. The binary provides a sound card implementation; tests use a
//! recording mock.

use thiserror::Error;
use crate::planner::EmissionEvent;

/// Shape of the audible carrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
	Square,
	Sawtooth
}

/// Audible carrier frequency and waveform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Carrier {
	/// Frequency in Hz.
	pub frequency: f32,
	pub waveform: Waveform
}

/// The error type for opening a channel.
#[derive(Debug, Error)]
pub enum ChannelError {
	#[error("No output device available")]
	NoDevice,
	#[error("Output device does not support {0}")]
	Unsupported(String),
	#[error("Failed to open output stream: {0}")]
	Stream(String)
}

/// A device that can play one carrier with a scheduled gain envelope.
///
/// Device time is in seconds and only ever moves forward. It need not relate to wall-clock time;
/// the schedule layer anchors the two.
pub trait SignalChannel {
	/// The device clock, in seconds.
	fn device_time(&self) -> f64;

	/// Open the output and start `carrier` silent (gain 0).
	///
	/// # Errors
	///
	/// Returns [`ChannelError`] if the device cannot be opened. No events may be scheduled after a
	/// failed open.
	fn open(&mut self, carrier: &Carrier) -> Result<(), ChannelError>;

	/// Apply `event` when the device clock reaches `event.time`.
	///
	/// Events arrive in non-decreasing time order.
	fn schedule(&mut self, event: EmissionEvent);

	/// Stop the carrier and discard every event not yet applied.
	fn close(&mut self);
}

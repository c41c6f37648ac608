//! Play a carrier through the default audio output.
//!
//! The output runs at 48 kHz mono. The device clock counts samples written by the audio callback,
//! so it only advances while the stream is playing. Envelope events are sent to the callback over
//! a channel and applied at the first sample at or after their device time.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use signals::{Carrier, ChannelError, EmissionEvent, SignalChannel, Waveform};
use tracing::{debug, error, info, warn};

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 48000;

/// Peak output level at full gain.
const AMPLITUDE: f32 = 0.5;

/// Carrier state owned by the audio callback.
struct Voice {
	carrier: Carrier,
	rx: Receiver<EmissionEvent>,
	pending: VecDeque<EmissionEvent>,
	gain: f32,
	/// Position within the current carrier period, ranging [0, 1)
	phase: f32,
	samples: Arc<AtomicU64>
}

impl Voice {
	fn new(carrier: Carrier, rx: Receiver<EmissionEvent>, samples: Arc<AtomicU64>) -> Self {
		Voice { carrier, rx, pending: VecDeque::new(), gain: 0., phase: 0., samples }
	}

	fn wave(&self) -> f32 {
		match self.carrier.waveform {
			Waveform::Square => if self.phase < 0.5 { 1. } else { -1. },
			Waveform::Sawtooth => 2. * self.phase - 1.
		}
	}

	/// Write the next `data.len()` samples, applying every event that comes due.
	fn fill(&mut self, data: &mut [f32]) {
		self.pending.extend(self.rx.try_iter());

		let step = self.carrier.frequency / SAMPLE_RATE as f32;
		let mut n = self.samples.load(Ordering::Acquire);
		for v in data.iter_mut() {
			let t = n as f64 / SAMPLE_RATE as f64;
			while let Some(event) = self.pending.front() {
				if event.time > t {
					break;
				}
				self.gain = event.envelope.gain();
				self.pending.pop_front();
			}

			*v = AMPLITUDE * self.gain * self.wave();
			self.phase = (self.phase + step).fract();
			n += 1;
		}
		self.samples.store(n, Ordering::Release);
	}
}

/// A [`SignalChannel`] backed by the default cpal output device.
pub struct AudioChannel {
	samples: Arc<AtomicU64>,
	tx: Option<Sender<EmissionEvent>>,
	stream: Option<cpal::Stream>
}

impl AudioChannel {
	pub fn new() -> Self {
		AudioChannel { samples: Arc::default(), tx: None, stream: None }
	}
}

impl Default for AudioChannel {
	fn default() -> Self {
		Self::new()
	}
}

/// Error handler for audio streaming.
fn audio_error(e: cpal::StreamError) {
	error!("Error occured on the stream: {}", e);
}

impl SignalChannel for AudioChannel {
	fn device_time(&self) -> f64 {
		self.samples.load(Ordering::Acquire) as f64 / SAMPLE_RATE as f64
	}

	fn open(&mut self, carrier: &Carrier) -> Result<(), ChannelError> {
		self.close();

		let host = cpal::default_host();
		let device = host.default_output_device().ok_or(ChannelError::NoDevice)?;
		if carrier.frequency >= SAMPLE_RATE as f32 / 2. {
			return Err(ChannelError::Unsupported(format!("a {} Hz carrier at {} Hz", carrier.frequency, SAMPLE_RATE)));
		}
		let config = cpal::StreamConfig {
			channels: 1,
			sample_rate: cpal::SampleRate(SAMPLE_RATE),
			buffer_size: cpal::BufferSize::Fixed(1024)
		};

		let (tx, rx) = channel();
		let mut voice = Voice::new(*carrier, rx, self.samples.clone());
		let stream = device.build_output_stream(
				&config,
				move |data: &mut [f32], _: &cpal::OutputCallbackInfo| voice.fill(data),
				audio_error,
				None)
			.map_err(|e| ChannelError::Stream(e.to_string()))?;
		stream.play().map_err(|e| ChannelError::Stream(e.to_string()))?;

		info!(device = %device.name().unwrap_or_default(), frequency = carrier.frequency, waveform = ?carrier.waveform, "audio output open");
		self.tx = Some(tx);
		self.stream = Some(stream);
		Ok(())
	}

	fn schedule(&mut self, event: EmissionEvent) {
		match &self.tx {
			Some(tx) if tx.send(event).is_err() => warn!(time = event.time, "audio stream gone, event dropped"),
			Some(_) => {},
			None => debug!(time = event.time, "channel closed, event dropped")
		}
	}

	fn close(&mut self) {
		self.tx = None;
		if self.stream.take().is_some() {
			info!("audio output closed");
		}
	}
}

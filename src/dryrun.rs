//! A channel that logs envelope events instead of playing them.

use std::time::Instant;
use signals::{Carrier, ChannelError, EmissionEvent, SignalChannel};
use tracing::info;

/// A [`SignalChannel`] whose device clock is the time since it was created.
pub struct DryRunChannel {
	origin: Instant,
	carrier: Option<Carrier>
}

impl DryRunChannel {
	pub fn new() -> Self {
		DryRunChannel { origin: Instant::now(), carrier: None }
	}
}

impl Default for DryRunChannel {
	fn default() -> Self {
		Self::new()
	}
}

impl SignalChannel for DryRunChannel {
	fn device_time(&self) -> f64 {
		self.origin.elapsed().as_secs_f64()
	}

	fn open(&mut self, carrier: &Carrier) -> Result<(), ChannelError> {
		info!(frequency = carrier.frequency, waveform = ?carrier.waveform, "dry run open");
		self.carrier = Some(*carrier);
		Ok(())
	}

	fn schedule(&mut self, event: EmissionEvent) {
		if self.carrier.is_some() {
			info!(time = event.time, gain = event.envelope.gain(), "{:?}", event.envelope);
		}
	}

	fn close(&mut self) {
		if self.carrier.take().is_some() {
			info!("dry run closed");
		}
	}
}

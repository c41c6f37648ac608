//! Test doubles.

use std::{cell::{Cell, RefCell}, rc::Rc};
use crate::channel::{Carrier, ChannelError, SignalChannel};
use crate::planner::EmissionEvent;

/// Every event handed to a [`MockChannel`], with the device time at which it was scheduled.
pub(crate) type EventLog = Rc<RefCell<Vec<(f64, EmissionEvent)>>>;

/// A call made on a [`MockChannel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Call {
	Open,
	Schedule,
	Close
}

#[derive(Debug, Default)]
pub(crate) struct MockState {
	pub carrier: Option<Carrier>,
	pub opens: u32,
	pub closes: u32,
	pub closed: bool,
	/// Every successful call, in order.
	pub calls: Vec<Call>
}

/// A channel whose device clock is set by the test.
pub(crate) struct MockChannel {
	clock: Rc<Cell<f64>>,
	log: EventLog,
	state: Rc<RefCell<MockState>>,
	fail: bool
}

impl MockChannel {
	pub fn new(device_time: f64) -> Self {
		MockChannel {
			clock: Rc::new(Cell::new(device_time)),
			log: Rc::default(),
			state: Rc::default(),
			fail: false
		}
	}

	/// A channel that refuses to open.
	pub fn failing() -> Self {
		MockChannel { fail: true, ..MockChannel::new(0.) }
	}

	pub fn clock(&self) -> Rc<Cell<f64>> {
		self.clock.clone()
	}

	pub fn log(&self) -> EventLog {
		self.log.clone()
	}

	pub fn state(&self) -> Rc<RefCell<MockState>> {
		self.state.clone()
	}

	pub fn is_closed(&self) -> bool {
		self.state.borrow().closed
	}
}

impl SignalChannel for MockChannel {
	fn device_time(&self) -> f64 {
		self.clock.get()
	}

	fn open(&mut self, carrier: &Carrier) -> Result<(), ChannelError> {
		if self.fail {
			return Err(ChannelError::NoDevice);
		}
		let mut state = self.state.borrow_mut();
		state.carrier = Some(*carrier);
		state.opens += 1;
		state.closed = false;
		state.calls.push(Call::Open);
		Ok(())
	}

	fn schedule(&mut self, event: EmissionEvent) {
		let mut state = self.state.borrow_mut();
		assert!(!state.closed, "event scheduled on a closed channel");
		state.calls.push(Call::Schedule);
		self.log.borrow_mut().push((self.clock.get(), event));
	}

	fn close(&mut self) {
		let mut state = self.state.borrow_mut();
		state.closed = true;
		state.closes += 1;
		state.calls.push(Call::Close);
	}
}

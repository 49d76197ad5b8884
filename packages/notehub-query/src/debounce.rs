use std::{
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	time::Duration,
};

use tokio::task::JoinHandle;

/// Collapses a burst of values into one delivery of the last value, once input has been quiet
/// for `delay`.
///
/// Pushing again re-arms the timer and cancels the pending delivery. Dropping the debouncer
/// cancels it too, so nothing is delivered after the owner is gone. Must be used inside a
/// tokio runtime.
pub struct Debouncer<T> {
	delay: Duration,
	sink: Arc<dyn Fn(T) + Send + Sync>,
	armed: Arc<AtomicU64>,
	pending: Option<JoinHandle<()>>,
}
impl<T> Debouncer<T>
where
	T: Send + 'static,
{
	pub fn new<F>(delay: Duration, sink: F) -> Self
	where
		F: Fn(T) + Send + Sync + 'static,
	{
		Self { delay, sink: Arc::new(sink), armed: Arc::default(), pending: None }
	}

	pub fn push(&mut self, value: T) {
		self.cancel();

		let ticket = self.armed.fetch_add(1, Ordering::SeqCst) + 1;
		let armed = self.armed.clone();
		let sink = self.sink.clone();
		let delay = self.delay;

		self.pending = Some(tokio::spawn(async move {
			tokio::time::sleep(delay).await;

			if armed.load(Ordering::SeqCst) == ticket {
				sink(value);
			}
		}));
	}
}
impl<T> Debouncer<T> {
	pub fn cancel(&mut self) {
		if let Some(handle) = self.pending.take() {
			// Also invalidates a task that already woke up.
			self.armed.fetch_add(1, Ordering::SeqCst);
			handle.abort();
		}
	}

	pub fn is_pending(&self) -> bool {
		self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
	}
}
impl<T> Drop for Debouncer<T> {
	fn drop(&mut self) {
		self.cancel();
	}
}

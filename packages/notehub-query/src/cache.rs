use std::{
	collections::HashMap,
	future::Future,
	sync::{Arc, Mutex, MutexGuard},
	time::Duration,
};

use tokio::{sync::OnceCell, time::Instant};

use crate::key::QueryKey;
use notehub_client::Result;
use notehub_domain::NotePage;

type SharedFetch = Arc<OnceCell<Result<Arc<NotePage>>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
	Fresh(Arc<NotePage>),
	Stale(Arc<NotePage>),
	Missing,
}

struct Entry {
	page: Arc<NotePage>,
	fetched_at: Instant,
	/// Entity epoch when the fetch that produced this entry started.
	epoch: u64,
	stale: bool,
}

#[derive(Default)]
struct State {
	entries: HashMap<QueryKey, Entry>,
	in_flight: HashMap<QueryKey, SharedFetch>,
	epochs: HashMap<String, u64>,
}
impl State {
	fn epoch(&self, entity: &str) -> u64 {
		self.epochs.get(entity).copied().unwrap_or_default()
	}
}

/// Page results keyed by [`QueryKey`], shared by the fetch path and the invalidation path.
///
/// Each entry is replaced whole under the lock, so readers never observe a partial page.
/// Concurrent fetches of one key share a single request.
pub struct PageCache {
	state: Mutex<State>,
	stale_after: Option<Duration>,
}
impl PageCache {
	/// `stale_after` bounds how long a stored page counts as fresh. `None` keeps pages fresh
	/// until [`PageCache::invalidate`].
	pub fn new(stale_after: Option<Duration>) -> Self {
		Self { state: Mutex::new(State::default()), stale_after }
	}

	pub fn lookup(&self, key: &QueryKey) -> Lookup {
		let state = self.lock();

		match state.entries.get(key) {
			Some(entry) if self.is_fresh(entry) => Lookup::Fresh(entry.page.clone()),
			Some(entry) => Lookup::Stale(entry.page.clone()),
			None => Lookup::Missing,
		}
	}

	pub fn get_fresh(&self, key: &QueryKey) -> Option<Arc<NotePage>> {
		match self.lookup(key) {
			Lookup::Fresh(page) => Some(page),
			Lookup::Stale(_) | Lookup::Missing => None,
		}
	}

	/// Data to show while `key` loads: the key's own stale page, else the previous page under
	/// the same search term.
	pub fn placeholder_for(&self, key: &QueryKey) -> Option<Arc<NotePage>> {
		let state = self.lock();

		if let Some(entry) = state.entries.get(key) {
			return Some(entry.page.clone());
		}

		let previous = key.previous()?;
		let page = state.entries.get(&previous).map(|entry| entry.page.clone());

		if page.is_some() {
			tracing::debug!(%key, %previous, "Serving previous page as placeholder.");
		}

		page
	}

	pub fn is_fetching(&self, key: &QueryKey) -> bool {
		self.lock().in_flight.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.lock().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	#[cfg(test)]
	fn store(&self, key: QueryKey, page: NotePage) -> Arc<NotePage> {
		let page = Arc::new(page);
		let mut state = self.lock();
		let epoch = state.epoch(key.entity);

		state.entries.insert(
			key,
			Entry { page: page.clone(), fetched_at: Instant::now(), epoch, stale: false },
		);

		page
	}

	/// Marks every entry of `entity` stale and detaches its in-flight fetches, so the next read
	/// of any of its keys goes to the network. Returns how many entries were marked.
	pub fn invalidate(&self, entity: &str) -> usize {
		let mut state = self.lock();
		let mut marked = 0;

		for (_, entry) in state.entries.iter_mut().filter(|(key, _)| key.entity == entity) {
			entry.stale = true;
			marked += 1;
		}

		state.in_flight.retain(|key, _| key.entity != entity);

		*state.epochs.entry(entity.to_string()).or_default() += 1;

		tracing::debug!(entity, marked, "Invalidated cached pages.");

		marked
	}

	/// Returns the fresh page for `key`, or runs `fetch` to get one. A caller arriving while a
	/// fetch for the same key is outstanding awaits that fetch instead of issuing another.
	///
	/// Failures are handed to every waiter and never stored.
	pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetch: F) -> Result<Arc<NotePage>>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<NotePage>>,
	{
		if let Some(page) = self.get_fresh(key) {
			tracing::debug!(%key, "Cache hit.");

			return Ok(page);
		}

		let shared = {
			let mut state = self.lock();

			match state.in_flight.get(key) {
				Some(shared) => {
					tracing::debug!(%key, "Joining in-flight fetch.");

					shared.clone()
				},
				None => {
					let shared = SharedFetch::default();

					state.in_flight.insert(key.clone(), shared.clone());

					shared
				},
			}
		};
		let outcome = shared
			.get_or_init(|| async {
				let epoch = self.lock().epoch(key.entity);
				let outcome = fetch().await.map(Arc::new);

				self.complete(key, &shared, epoch, &outcome);

				outcome
			})
			.await;

		outcome.clone()
	}

	fn complete(
		&self,
		key: &QueryKey,
		shared: &SharedFetch,
		epoch: u64,
		outcome: &Result<Arc<NotePage>>,
	) {
		let mut state = self.lock();

		if state.in_flight.get(key).is_some_and(|current| Arc::ptr_eq(current, shared)) {
			state.in_flight.remove(key);
		}

		let Ok(page) = outcome else {
			return;
		};

		if state.entries.get(key).is_some_and(|existing| existing.epoch > epoch) {
			tracing::debug!(%key, "Discarding fetch result older than the cached page.");

			return;
		}

		let stale = epoch != state.epoch(key.entity);

		if stale {
			tracing::debug!(%key, "Fetch finished after invalidation; storing as stale.");
		}

		state.entries.insert(
			key.clone(),
			Entry { page: page.clone(), fetched_at: Instant::now(), epoch, stale },
		);
	}

	fn is_fresh(&self, entry: &Entry) -> bool {
		!entry.stale && self.stale_after.is_none_or(|ttl| entry.fetched_at.elapsed() < ttl)
	}

	fn lock(&self) -> MutexGuard<'_, State> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl Default for PageCache {
	fn default() -> Self {
		Self::new(None)
	}
}

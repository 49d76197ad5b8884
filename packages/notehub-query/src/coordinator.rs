use std::sync::{
	Arc,
	atomic::{AtomicU64, Ordering},
};

use crate::{
	cache::PageCache,
	key::{NOTES_ENTITY, QueryKey},
};
use notehub_client::{ListQuery, NotesApi, Result};
use notehub_domain::{NewNote, Note, NotePage};

/// What a read can show immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
	/// A fresh cached page; no fetch is needed.
	Ready(Arc<NotePage>),
	/// A fetch is needed. `placeholder` is older data worth showing meanwhile.
	Pending { placeholder: Option<Arc<NotePage>> },
}

/// One read issued by [`NotesQuery::read`]. Only the latest read may update visible state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Read {
	pub key: QueryKey,
	pub generation: u64,
	pub snapshot: Snapshot,
}
impl Read {
	pub fn needs_fetch(&self) -> bool {
		matches!(self.snapshot, Snapshot::Pending { .. })
	}
}

/// Maps (page, search) to cached pages, fetches through the API, and invalidates every notes
/// page after a successful create or delete.
pub struct NotesQuery {
	api: Arc<dyn NotesApi>,
	cache: Arc<PageCache>,
	per_page: u32,
	generation: AtomicU64,
}
impl NotesQuery {
	pub fn new(api: Arc<dyn NotesApi>, cache: Arc<PageCache>, per_page: u32) -> Self {
		Self { api, cache, per_page: per_page.max(1), generation: AtomicU64::new(0) }
	}

	/// Starts a read of (page, search) and supersedes every earlier read.
	pub fn read(&self, page: u32, search: &str) -> Read {
		let key = QueryKey::notes(page, search);
		let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
		let snapshot = match self.cache.get_fresh(&key) {
			Some(page) => Snapshot::Ready(page),
			None => Snapshot::Pending { placeholder: self.cache.placeholder_for(&key) },
		};

		Read { key, generation, snapshot }
	}

	pub fn is_latest(&self, generation: u64) -> bool {
		self.generation.load(Ordering::SeqCst) == generation
	}

	/// Resolves `key` through the cache, fetching at most once per key at a time.
	pub async fn fetch(&self, key: &QueryKey) -> Result<Arc<NotePage>> {
		let query =
			ListQuery { page: key.page, per_page: self.per_page, search: key.search.clone() };

		self.cache.fetch(key, || self.api.list_notes(&query)).await
	}

	/// Fetches for `read` and returns the outcome only if no newer read was issued meanwhile.
	pub async fn resolve(&self, read: &Read) -> Option<Result<Arc<NotePage>>> {
		let outcome = match &read.snapshot {
			Snapshot::Ready(page) => Ok(page.clone()),
			Snapshot::Pending { .. } => self.fetch(&read.key).await,
		};

		if self.is_latest(read.generation) {
			Some(outcome)
		} else {
			tracing::debug!(key = %read.key, generation = read.generation, "Dropping superseded read.");

			None
		}
	}

	pub async fn create(&self, note: &NewNote) -> Result<Note> {
		let created = self.api.create_note(note).await?;

		tracing::info!(note_id = %created.id, "Note created.");
		self.cache.invalidate(NOTES_ENTITY);

		Ok(created)
	}

	pub async fn delete(&self, id: &str) -> Result<Note> {
		let deleted = self.api.delete_note(id).await?;

		tracing::info!(note_id = %deleted.id, "Note deleted.");
		self.cache.invalidate(NOTES_ENTITY);

		Ok(deleted)
	}
}

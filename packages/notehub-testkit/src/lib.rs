//! In-memory stand-in for the remote notes service.

use std::{
	collections::VecDeque,
	sync::{Mutex, MutexGuard},
	time::Duration,
};

use time::OffsetDateTime;

use notehub_client::{BoxFuture, Error, ListQuery, NotesApi, Result};
use notehub_domain::{NewNote, Note, NotePage, NoteTag};

#[derive(Default)]
struct State {
	notes: Vec<Note>,
	next_id: u64,
	list_calls: Vec<ListQuery>,
	create_calls: usize,
	delete_calls: usize,
	list_failures: VecDeque<Error>,
	mutation_failures: VecDeque<Error>,
	latency: Option<Duration>,
}

/// Serves pages the way the remote service does: newest first, filtered by a case-insensitive
/// match on title or content, `totalPages` never below one.
#[derive(Default)]
pub struct FakeNotes {
	state: Mutex<State>,
}
impl FakeNotes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds `count` notes titled "Note 1".."Note N"; "Note N" lists first.
	pub fn with_notes(count: usize) -> Self {
		let fake = Self::new();

		for idx in 1..=count {
			fake.insert(&format!("Note {idx}"), "", NoteTag::Todo);
		}

		fake
	}

	pub fn insert(&self, title: &str, content: &str, tag: NoteTag) -> Note {
		let mut state = self.lock();

		state.next_id += 1;

		let now = OffsetDateTime::now_utc();
		let note = Note {
			id: format!("note-{}", state.next_id),
			title: title.to_string(),
			content: content.to_string(),
			tag,
			created_at: Some(now),
			updated_at: Some(now),
		};

		state.notes.insert(0, note.clone());

		note
	}

	pub fn set_latency(&self, latency: Duration) {
		self.lock().latency = Some(latency);
	}

	pub fn fail_next_list(&self, err: Error) {
		self.lock().list_failures.push_back(err);
	}

	pub fn fail_next_mutation(&self, err: Error) {
		self.lock().mutation_failures.push_back(err);
	}

	pub fn list_calls(&self) -> Vec<ListQuery> {
		self.lock().list_calls.clone()
	}

	pub fn list_call_count(&self) -> usize {
		self.lock().list_calls.len()
	}

	pub fn create_call_count(&self) -> usize {
		self.lock().create_calls
	}

	pub fn delete_call_count(&self) -> usize {
		self.lock().delete_calls
	}

	pub fn note_ids(&self) -> Vec<String> {
		self.lock().notes.iter().map(|note| note.id.clone()).collect()
	}

	fn page(&self, query: &ListQuery) -> Result<NotePage> {
		let mut state = self.lock();

		state.list_calls.push(query.clone());

		if let Some(err) = state.list_failures.pop_front() {
			return Err(err);
		}

		let needle = query.search.trim().to_lowercase();
		let matching: Vec<&Note> = state
			.notes
			.iter()
			.filter(|note| {
				needle.is_empty()
					|| note.title.to_lowercase().contains(&needle)
					|| note.content.to_lowercase().contains(&needle)
			})
			.collect();
		let per_page = query.per_page.max(1) as usize;
		let total_pages = matching.len().div_ceil(per_page).max(1) as u32;
		let start = (query.page.max(1) as usize - 1) * per_page;
		let notes = matching.into_iter().skip(start).take(per_page).cloned().collect();

		Ok(NotePage { notes, total_pages })
	}

	fn create(&self, note: &NewNote) -> Result<Note> {
		{
			let mut state = self.lock();

			state.create_calls += 1;

			if let Some(err) = state.mutation_failures.pop_front() {
				return Err(err);
			}
		}

		Ok(self.insert(&note.title, &note.content, note.tag))
	}

	fn delete(&self, id: &str) -> Result<Note> {
		let mut state = self.lock();

		state.delete_calls += 1;

		if let Some(err) = state.mutation_failures.pop_front() {
			return Err(err);
		}

		let idx = state
			.notes
			.iter()
			.position(|note| note.id == id)
			.ok_or_else(|| Error::NotFound { message: format!("Note {id} not found") })?;

		Ok(state.notes.remove(idx))
	}

	async fn delay(&self) {
		let latency = self.lock().latency;

		if let Some(latency) = latency {
			tokio::time::sleep(latency).await;
		}
	}

	fn lock(&self) -> MutexGuard<'_, State> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl NotesApi for FakeNotes {
	fn list_notes<'a>(&'a self, query: &'a ListQuery) -> BoxFuture<'a, Result<NotePage>> {
		Box::pin(async move {
			self.delay().await;

			self.page(query)
		})
	}

	fn create_note<'a>(&'a self, note: &'a NewNote) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			self.delay().await;

			self.create(note)
		})
	}

	fn delete_note<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			self.delay().await;

			self.delete(id)
		})
	}
}

use std::{collections::BTreeSet, sync::Arc};

use crate::{form::NoteForm, pagination::Pagination};
use notehub_client::Result;
use notehub_domain::{NewNote, Note, NoteField, NotePage};
use notehub_query::{NotesQuery, QueryKey, Read, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
	pub current_page: u32,
	pub search_term: String,
	pub is_create_modal_open: bool,
}
impl Default for UiState {
	fn default() -> Self {
		Self { current_page: 1, search_term: String::new(), is_create_modal_open: false }
	}
}

#[derive(Debug, Clone)]
pub enum Event {
	/// A debounced search term. Always resets to the first page.
	SearchChanged(String),
	PageRequested(u32),
	OpenCreate,
	CloseCreate,
	FormInput { field: NoteField, value: String },
	SubmitForm,
	Delete(String),
	Refresh,
	/// `outcome` is `None` when a newer read superseded this one.
	Fetched { key: QueryKey, outcome: Option<Result<Arc<NotePage>>> },
	Created(Result<Note>),
	Deleted { id: String, outcome: Result<Note> },
}
impl Event {
	/// Whether this event reports the end of an [`Effect`].
	pub fn completes_effect(&self) -> bool {
		matches!(self, Self::Fetched { .. } | Self::Created(_) | Self::Deleted { .. })
	}
}

/// Work the session asks its host to run. Each one answers with exactly one completion event.
#[derive(Debug, Clone)]
pub enum Effect {
	Fetch(Read),
	Create(NewNote),
	Delete(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
	/// Nothing to show yet.
	Blank,
	Empty,
	Notes(Vec<Note>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
	pub title: String,
	pub content: String,
	pub tag: String,
	pub errors: Vec<(NoteField, String)>,
	pub submit_label: &'static str,
	pub submit_disabled: bool,
	pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
	pub search_term: String,
	pub loading: bool,
	pub error: bool,
	pub body: Body,
	pub pagination: Option<Pagination>,
	pub deleting: Vec<String>,
	pub modal: Option<FormView>,
}

/// Presentation state of one notes screen: list, paginator, search, and create modal.
pub struct Session {
	query: Arc<NotesQuery>,
	ui: UiState,
	data: Option<Arc<NotePage>>,
	is_fetching: bool,
	is_error: bool,
	form: Option<NoteForm>,
	deleting: BTreeSet<String>,
}
impl Session {
	pub fn new(query: Arc<NotesQuery>) -> Self {
		Self {
			query,
			ui: UiState::default(),
			data: None,
			is_fetching: false,
			is_error: false,
			form: None,
			deleting: BTreeSet::new(),
		}
	}

	pub fn ui(&self) -> &UiState {
		&self.ui
	}

	pub fn form(&self) -> Option<&NoteForm> {
		self.form.as_ref()
	}

	pub fn pagination(&self) -> Option<Pagination> {
		self.data.as_ref().and_then(|page| Pagination::new(page.total_pages, self.ui.current_page))
	}

	/// Issues the initial read.
	pub fn start(&mut self) -> Vec<Effect> {
		self.reload()
	}

	pub fn handle(&mut self, event: Event) -> Vec<Effect> {
		match event {
			Event::SearchChanged(term) => {
				self.ui.current_page = 1;
				self.ui.search_term = term;

				self.reload()
			},
			Event::PageRequested(page) => {
				self.ui.current_page = page.max(1);

				self.reload()
			},
			Event::Refresh => self.reload(),
			Event::OpenCreate => {
				self.form = Some(NoteForm::new());
				self.ui.is_create_modal_open = true;

				Vec::new()
			},
			Event::CloseCreate => {
				self.close_form();

				Vec::new()
			},
			Event::FormInput { field, value } => {
				if let Some(form) = self.form.as_mut() {
					form.set(field, value);
				}

				Vec::new()
			},
			Event::SubmitForm => match self.form.as_mut().and_then(NoteForm::submit) {
				Some(note) => vec![Effect::Create(note)],
				None => Vec::new(),
			},
			Event::Delete(id) =>
				if self.deleting.insert(id.clone()) {
					vec![Effect::Delete(id)]
				} else {
					Vec::new()
				},
			Event::Fetched { key, outcome } => {
				self.apply_fetch(key, outcome);

				Vec::new()
			},
			Event::Created(outcome) => match outcome {
				Ok(_) => {
					self.close_form();

					self.reload()
				},
				Err(err) => {
					tracing::warn!(error = %err, "Note creation failed.");

					if let Some(form) = self.form.as_mut() {
						form.fail();
					}

					Vec::new()
				},
			},
			Event::Deleted { id, outcome } => {
				self.deleting.remove(&id);

				match outcome {
					Ok(_) => self.reload(),
					Err(err) => {
						tracing::warn!(error = %err, note_id = %id, "Note deletion failed.");

						self.is_error = true;

						Vec::new()
					},
				}
			},
		}
	}

	pub fn screen(&self) -> Screen {
		let body = match self.data.as_deref() {
			None => Body::Blank,
			Some(page) if page.is_empty() => Body::Empty,
			Some(page) => Body::Notes(page.notes.clone()),
		};
		let modal = self.form.as_ref().map(|form| FormView {
			title: form.value(NoteField::Title).to_string(),
			content: form.value(NoteField::Content).to_string(),
			tag: form.value(NoteField::Tag).to_string(),
			errors: form.visible_errors(),
			submit_label: form.submit_label(),
			submit_disabled: form.is_pending(),
			failed: form.has_failed(),
		});

		Screen {
			search_term: self.ui.search_term.clone(),
			loading: self.is_fetching,
			error: self.is_error,
			body,
			pagination: self.pagination(),
			deleting: self.deleting.iter().cloned().collect(),
			modal,
		}
	}

	fn reload(&mut self) -> Vec<Effect> {
		let read = self.query.read(self.ui.current_page, &self.ui.search_term);

		self.is_error = false;

		match &read.snapshot {
			Snapshot::Ready(page) => {
				self.data = Some(page.clone());
				self.is_fetching = false;

				Vec::new()
			},
			Snapshot::Pending { placeholder } => {
				self.data = placeholder.clone();
				self.is_fetching = true;

				vec![Effect::Fetch(read)]
			},
		}
	}

	fn apply_fetch(&mut self, key: QueryKey, outcome: Option<Result<Arc<NotePage>>>) {
		let current = QueryKey::notes(self.ui.current_page, self.ui.search_term.as_str());

		let Some(outcome) = outcome.filter(|_| key == current) else {
			tracing::debug!(%key, "Ignoring result for a key that is no longer shown.");

			return;
		};

		self.is_fetching = false;

		match outcome {
			Ok(page) => {
				let last_page = page.total_pages.max(1);

				// The empty page stays on screen; the next reload lands on the last real page.
				if page.is_empty() && self.ui.current_page > last_page {
					tracing::debug!(%key, last_page, "Current page is past the end; clamping.");

					self.ui.current_page = last_page;
				}

				self.data = Some(page);
				self.is_error = false;
			},
			Err(err) => {
				tracing::warn!(error = %err, %key, "Loading notes failed.");

				self.is_error = true;
			},
		}
	}

	fn close_form(&mut self) {
		self.form = None;
		self.ui.is_create_modal_open = false;
	}
}

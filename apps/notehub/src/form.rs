use std::collections::BTreeSet;

use notehub_domain::{FieldErrors, NewNote, NoteField, NoteTag, form};

/// State of the create-note form. Errors show only for touched fields; submitting touches all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteForm {
	title: String,
	content: String,
	tag: String,
	touched: BTreeSet<NoteField>,
	errors: FieldErrors,
	pending: bool,
	failed: bool,
}
impl NoteForm {
	pub fn new() -> Self {
		Self {
			title: String::new(),
			content: String::new(),
			tag: NoteTag::default().to_string(),
			touched: BTreeSet::new(),
			errors: FieldErrors::default(),
			pending: false,
			failed: false,
		}
	}

	pub fn value(&self, field: NoteField) -> &str {
		match field {
			NoteField::Title => &self.title,
			NoteField::Content => &self.content,
			NoteField::Tag => &self.tag,
		}
	}

	pub fn set(&mut self, field: NoteField, value: impl Into<String>) {
		let value = value.into();

		match field {
			NoteField::Title => self.title = value,
			NoteField::Content => self.content = value,
			NoteField::Tag => self.tag = value,
		}

		self.touched.insert(field);
		self.errors = self.check().err().unwrap_or_default();
	}

	/// Returns the request to send, or `None` when validation failed or a submission is already
	/// in flight.
	pub fn submit(&mut self) -> Option<NewNote> {
		if self.pending {
			return None;
		}

		self.touched.extend([NoteField::Title, NoteField::Content, NoteField::Tag]);

		match self.check() {
			Ok(note) => {
				self.errors = FieldErrors::default();
				self.pending = true;
				self.failed = false;

				Some(note)
			},
			Err(errors) => {
				self.errors = errors;

				None
			},
		}
	}

	/// The submission was rejected; the form stays open for another attempt.
	pub fn fail(&mut self) {
		self.pending = false;
		self.failed = true;
	}

	pub fn is_pending(&self) -> bool {
		self.pending
	}

	pub fn has_failed(&self) -> bool {
		self.failed
	}

	pub fn visible_errors(&self) -> Vec<(NoteField, String)> {
		self.errors
			.iter()
			.filter(|(field, _)| self.touched.contains(field))
			.map(|(field, message)| (field, message.to_string()))
			.collect()
	}

	pub fn submit_label(&self) -> &'static str {
		if self.pending { "Creating..." } else { "Create note" }
	}

	fn check(&self) -> Result<NewNote, FieldErrors> {
		form::validate(&self.title, &self.content, &self.tag)
	}
}
impl Default for NoteForm {
	fn default() -> Self {
		Self::new()
	}
}

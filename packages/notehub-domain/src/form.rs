use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

use crate::note::{NewNote, NoteTag};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 50;
pub const CONTENT_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteField {
	Title,
	Content,
	Tag,
}
impl fmt::Display for NoteField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			NoteField::Title => "title",
			NoteField::Content => "content",
			NoteField::Tag => "tag",
		})
	}
}

/// Per-field messages, at most one per field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
	errors: Vec<(NoteField, String)>,
}
impl FieldErrors {
	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn get(&self, field: NoteField) -> Option<&str> {
		self.errors.iter().find(|(f, _)| *f == field).map(|(_, message)| message.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (NoteField, &str)> {
		self.errors.iter().map(|(field, message)| (*field, message.as_str()))
	}

	fn push(&mut self, field: NoteField, message: impl Into<String>) {
		if self.get(field).is_none() {
			self.errors.push((field, message.into()));
			self.errors.sort_by_key(|(field, _)| *field);
		}
	}
}
impl fmt::Display for FieldErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (idx, (field, message)) in self.iter().enumerate() {
			if idx > 0 {
				f.write_str("; ")?;
			}

			write!(f, "{field}: {message}")?;
		}

		Ok(())
	}
}
impl std::error::Error for FieldErrors {}

pub fn validate_title(title: &str) -> Option<String> {
	let title = title.trim();
	let len = title.graphemes(true).count();

	if title.is_empty() {
		return Some("Title is required".to_string());
	}
	if len < TITLE_MIN_CHARS {
		return Some(format!("Title must be at least {TITLE_MIN_CHARS} characters"));
	}
	if len > TITLE_MAX_CHARS {
		return Some(format!("Title must be at most {TITLE_MAX_CHARS} characters"));
	}

	None
}

pub fn validate_content(content: &str) -> Option<String> {
	(content.graphemes(true).count() > CONTENT_MAX_CHARS).then(|| "Content too long".to_string())
}

pub fn validate_tag(raw: &str) -> Result<NoteTag, String> {
	if raw.trim().is_empty() {
		return Err("Tag is required".to_string());
	}

	raw.parse::<NoteTag>().map_err(|_| "Invalid tag".to_string())
}

/// Checks raw form input and builds the create request. The title is sent trimmed.
pub fn validate(title: &str, content: &str, tag: &str) -> Result<NewNote, FieldErrors> {
	let mut errors = FieldErrors::default();

	if let Some(message) = validate_title(title) {
		errors.push(NoteField::Title, message);
	}
	if let Some(message) = validate_content(content) {
		errors.push(NoteField::Content, message);
	}

	let tag = match validate_tag(tag) {
		Ok(tag) => Some(tag),
		Err(message) => {
			errors.push(NoteField::Tag, message);

			None
		},
	};

	match tag {
		Some(tag) if errors.is_empty() =>
			Ok(NewNote { title: title.trim().to_string(), content: content.to_string(), tag }),
		_ => Err(errors),
	}
}

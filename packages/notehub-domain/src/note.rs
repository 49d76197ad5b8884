use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoteTag {
	#[default]
	Todo,
	Work,
	Personal,
	Meeting,
	Shopping,
}
impl NoteTag {
	pub const ALL: [NoteTag; 5] =
		[NoteTag::Todo, NoteTag::Work, NoteTag::Personal, NoteTag::Meeting, NoteTag::Shopping];

	pub fn as_str(self) -> &'static str {
		match self {
			NoteTag::Todo => "Todo",
			NoteTag::Work => "Work",
			NoteTag::Personal => "Personal",
			NoteTag::Meeting => "Meeting",
			NoteTag::Shopping => "Shopping",
		}
	}
}
impl fmt::Display for NoteTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for NoteTag {
	type Err = UnknownTag;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let raw = raw.trim();

		Self::ALL
			.into_iter()
			.find(|tag| tag.as_str().eq_ignore_ascii_case(raw))
			.ok_or_else(|| UnknownTag(raw.to_string()))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);
impl fmt::Display for UnknownTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown tag {:?}", self.0)
	}
}
impl std::error::Error for UnknownTag {}

/// A note as owned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
	pub id: String,
	pub title: String,
	#[serde(default)]
	pub content: String,
	pub tag: NoteTag,
	#[serde(default, with = "crate::timestamp")]
	pub created_at: Option<OffsetDateTime>,
	#[serde(default, with = "crate::timestamp")]
	pub updated_at: Option<OffsetDateTime>,
}

/// One page of a listing, as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePage {
	#[serde(default)]
	pub notes: Vec<Note>,
	pub total_pages: u32,
}
impl NotePage {
	pub fn is_empty(&self) -> bool {
		self.notes.is_empty()
	}
}

/// Body of a create request. Build it through [`crate::form::validate`] to get the field checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
	pub title: String,
	pub content: String,
	pub tag: NoteTag,
}

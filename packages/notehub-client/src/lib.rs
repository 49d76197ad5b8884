pub mod error;
pub mod http;

pub use error::{Error, Result};
pub use http::HttpNotesApi;

use std::{future::Future, pin::Pin};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use notehub_domain::{NewNote, Note, NotePage};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Parameters of one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
	pub page: u32,
	pub per_page: u32,
	pub search: String,
}
impl ListQuery {
	/// Query string pairs. An empty search term is left out entirely.
	pub fn params(&self) -> Vec<(&'static str, String)> {
		let mut params =
			vec![("page", self.page.to_string()), ("perPage", self.per_page.to_string())];

		if !self.search.trim().is_empty() {
			params.push(("search", self.search.clone()));
		}

		params
	}
}

pub trait NotesApi
where
	Self: Send + Sync,
{
	fn list_notes<'a>(&'a self, query: &'a ListQuery) -> BoxFuture<'a, Result<NotePage>>;

	fn create_note<'a>(&'a self, note: &'a NewNote) -> BoxFuture<'a, Result<Note>>;

	/// Resolves to the deleted note. Deleting an id twice fails with [`Error::NotFound`].
	fn delete_note<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Note>>;
}

pub fn auth_headers(token: &str) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;

	value.set_sensitive(true);
	headers.insert(AUTHORIZATION, value);

	Ok(headers)
}

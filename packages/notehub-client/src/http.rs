use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{BoxFuture, Error, ListQuery, NotesApi, Result};
use notehub_domain::{NewNote, Note, NotePage};

/// [`NotesApi`] over HTTP. Every request carries the configured bearer token.
#[derive(Clone, Debug)]
pub struct HttpNotesApi {
	client: Client,
	notes_url: Url,
}
impl HttpNotesApi {
	pub fn new(cfg: &notehub_config::Api) -> Result<Self> {
		let client = Client::builder()
			.timeout(cfg.timeout())
			.default_headers(crate::auth_headers(&cfg.token)?)
			.build()
			.map_err(|err| Error::InvalidConfig { message: err.to_string() })?;

		Self::with_client(client, &cfg.base_url)
	}

	pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
		let raw = format!("{}/notes", base_url.trim_end_matches('/'));
		let notes_url = Url::parse(&raw).map_err(|err| Error::InvalidConfig {
			message: format!("api.base_url is not a valid URL: {err}"),
		})?;

		Ok(Self { client, notes_url })
	}

	fn note_url(&self, id: &str) -> Result<Url> {
		let mut url = self.notes_url.clone();

		url.path_segments_mut()
			.map_err(|_| Error::InvalidConfig {
				message: "api.base_url cannot carry path segments.".to_string(),
			})?
			.push(id);

		Ok(url)
	}

	async fn execute<T>(&self, method: Method, builder: RequestBuilder) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = builder.send().await.map_err(|err| {
			tracing::warn!(%method, error = %err, "Notes API request failed.");

			Error::from(err)
		})?;

		tracing::debug!(%method, url = %response.url(), status = %response.status(), "Notes API responded.");

		let response = check_status(response).await?;

		Ok(response.json::<T>().await?)
	}
}
impl NotesApi for HttpNotesApi {
	fn list_notes<'a>(&'a self, query: &'a ListQuery) -> BoxFuture<'a, Result<NotePage>> {
		Box::pin(async move {
			let builder = self.client.get(self.notes_url.clone()).query(&query.params());

			self.execute(Method::GET, builder).await
		})
	}

	fn create_note<'a>(&'a self, note: &'a NewNote) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			let builder = self.client.post(self.notes_url.clone()).json(note);

			self.execute(Method::POST, builder).await
		})
	}

	fn delete_note<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			let builder = self.client.delete(self.note_url(id)?);

			self.execute(Method::DELETE, builder).await
		})
	}
}

async fn check_status(response: Response) -> Result<Response> {
	let status = response.status();

	if status.is_success() {
		return Ok(response);
	}

	let body = response.text().await.unwrap_or_default();
	let message = error_message(&body).unwrap_or_else(|| {
		status.canonical_reason().unwrap_or("Request failed").to_string()
	});

	tracing::warn!(status = status.as_u16(), %message, "Notes API rejected request.");

	Err(match status {
		StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth { status: status.as_u16() },
		StatusCode::NOT_FOUND => Error::NotFound { message },
		StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Error::Validation { message },
		_ => Error::Server { status: status.as_u16(), message },
	})
}

fn error_message(body: &str) -> Option<String> {
	let trimmed = body.trim();

	if trimmed.is_empty() {
		return None;
	}

	match serde_json::from_str::<Value>(trimmed) {
		Ok(json) => json
			.get("message")
			.or_else(|| json.get("error"))
			.and_then(|v| v.as_str())
			.map(str::to_string),
		Err(_) => Some(trimmed.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn error_message_prefers_json_message() {
		assert_eq!(
			error_message(r#"{"message":"title too short","error":"Bad Request"}"#),
			Some("title too short".to_string())
		);
		assert_eq!(error_message(r#"{"error":"Bad Request"}"#), Some("Bad Request".to_string()));
		assert_eq!(error_message("plain text"), Some("plain text".to_string()));
		assert_eq!(error_message("  "), None);
	}

	#[test]
	fn note_ids_are_escaped_as_one_segment() {
		let api = HttpNotesApi::with_client(Client::new(), "https://example.test/api/")
			.expect("client");
		let url = api.note_url("a/b c").expect("url");

		assert_eq!(url.as_str(), "https://example.test/api/notes/a%2Fb%20c");
	}

	#[test]
	fn rejects_unparseable_base_url() {
		let err = HttpNotesApi::with_client(Client::new(), "not a url").expect_err("expected error");

		assert!(matches!(err, Error::InvalidConfig { .. }));
	}
}

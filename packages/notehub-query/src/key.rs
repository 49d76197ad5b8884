use std::fmt;

pub const NOTES_ENTITY: &str = "notes";

/// Names one cached page: (entity, page, search). Equal only when every part matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
	pub entity: &'static str,
	pub page: u32,
	pub search: String,
}
impl QueryKey {
	/// Pages are 1-indexed; zero is lifted to the first page. The search term is trimmed, so
	/// terms that send the same request share a key.
	pub fn notes(page: u32, search: impl AsRef<str>) -> Self {
		Self { entity: NOTES_ENTITY, page: page.max(1), search: search.as_ref().trim().to_string() }
	}

	/// The key of the page before this one under the same search term.
	pub fn previous(&self) -> Option<Self> {
		(self.page > 1).then(|| Self {
			entity: self.entity,
			page: self.page - 1,
			search: self.search.clone(),
		})
	}
}
impl fmt::Display for QueryKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}, {}, {:?}]", self.entity, self.page, self.search)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keys_differ_by_any_component() {
		assert_eq!(QueryKey::notes(1, "a"), QueryKey::notes(1, "a"));
		assert_ne!(QueryKey::notes(1, "a"), QueryKey::notes(2, "a"));
		assert_ne!(QueryKey::notes(1, "a"), QueryKey::notes(1, ""));
	}

	#[test]
	fn padded_search_shares_the_trimmed_key() {
		assert_eq!(QueryKey::notes(1, "   "), QueryKey::notes(1, ""));
		assert_eq!(QueryKey::notes(2, " abc "), QueryKey::notes(2, "abc"));
	}

	#[test]
	fn previous_stays_on_search_term() {
		assert_eq!(QueryKey::notes(3, "x").previous(), Some(QueryKey::notes(2, "x")));
		assert_eq!(QueryKey::notes(1, "x").previous(), None);
		assert_eq!(QueryKey::notes(0, "").page, 1);
	}
}

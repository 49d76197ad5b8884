use std::fmt::Write as _;

use crate::{
	pagination::PageItem,
	session::{Body, FormView, Screen},
};
use notehub_domain::NoteField;

pub fn render(screen: &Screen) -> String {
	let mut out = String::new();

	render_toolbar(&mut out, screen);

	if screen.loading {
		out.push_str("Loading...\n");
	}
	if screen.error {
		out.push_str("Something went wrong\n");
	}

	match &screen.body {
		Body::Blank => {},
		Body::Empty => out.push_str("No notes found\n"),
		Body::Notes(notes) =>
			for note in notes {
				let marker = if screen.deleting.contains(&note.id) { " (deleting)" } else { "" };
				let _ = writeln!(out, "- [{}] {} #{}{marker}", note.id, note.title, note.tag);

				if !note.content.is_empty() {
					let _ = writeln!(out, "    {}", note.content);
				}
			},
	}

	if let Some(modal) = &screen.modal {
		render_modal(&mut out, modal);
	}

	out
}

fn render_toolbar(out: &mut String, screen: &Screen) {
	let _ = write!(out, "Search: {:?}", screen.search_term);

	if let Some(pagination) = &screen.pagination {
		out.push_str("  Pages:");

		for item in pagination.items() {
			match item {
				PageItem::Page { number, active: true } => {
					let _ = write!(out, " [{number}]");
				},
				PageItem::Page { number, active: false } => {
					let _ = write!(out, " {number}");
				},
				PageItem::Gap => out.push_str(" ..."),
			}
		}
	}

	out.push_str("  [Create note +]\n");
}

fn render_modal(out: &mut String, modal: &FormView) {
	out.push_str("--- New note ---\n");

	let fields = [
		(NoteField::Title, &modal.title),
		(NoteField::Content, &modal.content),
		(NoteField::Tag, &modal.tag),
	];

	for (field, value) in fields {
		let _ = writeln!(out, "{field}: {value}");

		if let Some((_, message)) = modal.errors.iter().find(|(f, _)| *f == field) {
			let _ = writeln!(out, "  ! {message}");
		}
	}

	if modal.failed {
		out.push_str("Something went wrong\n");
	}

	let state = if modal.submit_disabled { " (disabled)" } else { "" };
	let _ = writeln!(out, "[Cancel] [{}]{state}", modal.submit_label);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pagination::Pagination;
	use notehub_domain::{Note, NoteTag};

	fn note(id: &str, title: &str) -> Note {
		Note {
			id: id.to_string(),
			title: title.to_string(),
			content: String::new(),
			tag: NoteTag::Work,
			created_at: None,
			updated_at: None,
		}
	}

	fn screen(body: Body) -> Screen {
		Screen {
			search_term: String::new(),
			loading: false,
			error: false,
			body,
			pagination: None,
			deleting: Vec::new(),
			modal: None,
		}
	}

	#[test]
	fn empty_page_says_no_notes() {
		let text = render(&screen(Body::Empty));

		assert!(text.contains("No notes found"));
		assert!(!text.contains("Pages:"));
	}

	#[test]
	fn lists_notes_with_paginator() {
		let mut screen = screen(Body::Notes(vec![note("a1", "Plan")]));

		screen.pagination = Pagination::new(3, 2);

		let text = render(&screen);

		assert!(text.contains("- [a1] Plan #Work"));
		assert!(text.contains("Pages: 1 [2] 3"));
	}

	#[test]
	fn loading_and_error_are_shown() {
		let mut screen = screen(Body::Blank);

		screen.loading = true;
		screen.error = true;

		let text = render(&screen);

		assert!(text.contains("Loading..."));
		assert!(text.contains("Something went wrong"));
	}
}

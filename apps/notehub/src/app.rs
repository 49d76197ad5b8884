use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::session::{Effect, Event, Screen, Session};
use notehub_query::{Debouncer, NotesQuery};

/// Hosts a [`Session`] on one event loop: runs its effects as tasks, feeds their completions
/// back in order, and debounces search keystrokes.
pub struct App {
	session: Session,
	query: Arc<NotesQuery>,
	tx: UnboundedSender<Event>,
	rx: UnboundedReceiver<Event>,
	search: Debouncer<String>,
	running: usize,
}
impl App {
	pub fn new(query: Arc<NotesQuery>, debounce: Duration) -> Self {
		let (tx, rx) = mpsc::unbounded_channel();
		let search_tx = tx.clone();
		let search = Debouncer::new(debounce, move |term: String| {
			// The receiver only closes when the app is gone.
			let _ = search_tx.send(Event::SearchChanged(term));
		});

		Self { session: Session::new(query.clone()), query, tx, rx, search, running: 0 }
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	pub fn screen(&self) -> Screen {
		self.session.screen()
	}

	/// Effects started and not yet reported back.
	pub fn running(&self) -> usize {
		self.running
	}

	pub fn start(&mut self) {
		let effects = self.session.start();

		self.dispatch(effects);
	}

	/// Feeds one raw search-box value. Only the last value of a burst reaches the session.
	pub fn type_search(&mut self, text: impl Into<String>) {
		self.search.push(text.into());
	}

	pub fn apply(&mut self, event: Event) {
		if event.completes_effect() {
			self.running = self.running.saturating_sub(1);
		}

		let effects = self.session.handle(event);

		self.dispatch(effects);
	}

	pub async fn next_event(&mut self) -> Option<Event> {
		self.rx.recv().await
	}

	/// Processes events until every started effect has reported back.
	pub async fn settle(&mut self) {
		while self.running > 0 {
			match self.rx.recv().await {
				Some(event) => self.apply(event),
				None => break,
			}
		}
	}

	fn dispatch(&mut self, effects: Vec<Effect>) {
		for effect in effects {
			let query = self.query.clone();
			let tx = self.tx.clone();

			self.running += 1;

			tokio::spawn(async move {
				let event = match effect {
					Effect::Fetch(read) => {
						let outcome = query.resolve(&read).await;

						Event::Fetched { key: read.key, outcome }
					},
					Effect::Create(note) => Event::Created(query.create(&note).await),
					Effect::Delete(id) => {
						let outcome = query.delete(&id).await;

						Event::Deleted { id, outcome }
					},
				};

				let _ = tx.send(event);
			});
		}
	}
}

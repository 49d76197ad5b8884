use color_eyre::Result;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::{app::App, render, session::Event};
use notehub_domain::NoteField;

const HELP: &str = "\
Commands:
  search <text>    type into the search box (debounced)
  page <n>         go to page n
  next | prev      move one page
  new              open the create form
  title <text>     set the form title
  content <text>   set the form content
  tag <name>       set the form tag (Todo, Work, Personal, Meeting, Shopping)
  submit | cancel  submit or close the form
  delete <id>      delete a note
  refresh          reload the current page
  help | quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Search(String),
	Page(u32),
	Next,
	Prev,
	New,
	Field(NoteField, String),
	Submit,
	Cancel,
	Delete(String),
	Refresh,
	Help,
	Quit,
}

pub fn parse(line: &str) -> Result<Option<Command>, String> {
	let line = line.trim_end_matches(['\r', '\n']);
	let (word, rest) = match line.trim_start().split_once(' ') {
		Some((word, rest)) => (word, rest),
		None => (line.trim(), ""),
	};
	let command = match word {
		"" => return Ok(None),
		"search" => Command::Search(rest.to_string()),
		"page" => Command::Page(
			rest.trim().parse().map_err(|_| format!("Not a page number: {:?}.", rest.trim()))?,
		),
		"next" => Command::Next,
		"prev" => Command::Prev,
		"new" => Command::New,
		"title" => Command::Field(NoteField::Title, rest.to_string()),
		"content" => Command::Field(NoteField::Content, rest.to_string()),
		"tag" => Command::Field(NoteField::Tag, rest.trim().to_string()),
		"submit" => Command::Submit,
		"cancel" => Command::Cancel,
		"delete" if !rest.trim().is_empty() => Command::Delete(rest.trim().to_string()),
		"delete" => return Err("delete needs a note id.".to_string()),
		"refresh" => Command::Refresh,
		"help" => Command::Help,
		"quit" | "exit" => Command::Quit,
		other => return Err(format!("Unknown command {other:?}. Type help.")),
	};

	Ok(Some(command))
}

/// Runs the session against stdin/stdout until `quit` or end of input.
pub async fn run(mut app: App) -> Result<()> {
	let mut lines = BufReader::new(io::stdin()).lines();
	let mut stdout = io::stdout();

	app.start();
	print(&mut stdout, &render::render(&app.screen())).await?;

	loop {
		tokio::select! {
			line = lines.next_line() => {
				let Some(line) = line? else {
					break;
				};

				match parse(&line) {
					Ok(Some(Command::Quit)) => break,
					Ok(Some(Command::Help)) => {
						print(&mut stdout, HELP).await?;

						continue;
					},
					Ok(Some(command)) => execute(&mut app, command),
					Ok(None) => continue,
					Err(message) => {
						print(&mut stdout, &format!("{message}\n")).await?;

						continue;
					},
				}
			},
			Some(event) = app.next_event() => app.apply(event),
		}

		print(&mut stdout, &render::render(&app.screen())).await?;
	}

	tracing::info!("Notes session closed.");

	Ok(())
}

pub fn execute(app: &mut App, command: Command) {
	let pagination = app.session().pagination();
	let event = match command {
		Command::Search(text) => {
			app.type_search(text);

			return;
		},
		Command::Page(page) => Event::PageRequested(page),
		Command::Next => match pagination.and_then(|p| p.next()) {
			Some(page) => Event::PageRequested(page),
			None => return,
		},
		Command::Prev => match pagination.and_then(|p| p.previous()) {
			Some(page) => Event::PageRequested(page),
			None => return,
		},
		Command::New => Event::OpenCreate,
		Command::Field(field, value) => Event::FormInput { field, value },
		Command::Submit => Event::SubmitForm,
		Command::Cancel => Event::CloseCreate,
		Command::Delete(id) => Event::Delete(id),
		Command::Refresh => Event::Refresh,
		Command::Help | Command::Quit => return,
	};

	app.apply(event);
}

async fn print(stdout: &mut io::Stdout, text: &str) -> Result<()> {
	stdout.write_all(text.as_bytes()).await?;
	stdout.write_all(b"\n").await?;
	stdout.flush().await?;

	Ok(())
}

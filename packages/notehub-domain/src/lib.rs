pub mod form;
pub mod note;
pub mod timestamp;

pub use form::{CONTENT_MAX_CHARS, FieldErrors, NoteField, TITLE_MAX_CHARS, TITLE_MIN_CHARS};
pub use note::{NewNote, Note, NotePage, NoteTag, UnknownTag};

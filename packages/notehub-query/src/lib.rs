//! Client-side query layer for the notes collection: a keyed page cache with in-flight
//! deduplication and coarse invalidation, the read coordinator on top of it, and a debouncer for
//! search input.

pub mod cache;
pub mod coordinator;
pub mod debounce;
pub mod key;

pub use cache::{Lookup, PageCache};
pub use coordinator::{NotesQuery, Read, Snapshot};
pub use debounce::Debouncer;
pub use key::{NOTES_ENTITY, QueryKey};

//! # qsheet-tree
//!
//! Pure operations over the Topic → Subtopic → Question tree.
//!
//! Every operation takes the current topic list by reference and returns a
//! `Cow<[Arc<Topic>]>`:
//! - `Cow::Borrowed`: nothing matched (missing id, `from == to`, blank
//!   query); the input slice is handed back untouched.
//! - `Cow::Owned`: a new list in which only the nodes on the touched path are
//!   re-allocated; every other `Arc` is shared with the input.
//!
//! Missing ids are never errors. Callers detect a no-op by matching on the
//! `Cow` variant.

pub mod filter;
pub mod mutate;
pub mod reorder;
pub mod undo;

pub use filter::{filter_topics, is_filter_active, normalize_text};
pub use mutate::Removal;
pub use reorder::{move_question, move_sub_topic, reorder, reorder_topics};
pub use undo::{DeletedItem, DeletedRecord, UndoBuffer};

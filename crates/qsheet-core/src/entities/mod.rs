//! Entity structs for the sheet hierarchy.
//!
//! A [`Sheet`] owns an ordered list of [`Topic`]s, each topic an ordered list of
//! [`SubTopic`]s, each subtopic an ordered list of [`Question`]s. Children sit
//! behind `Arc` so that a mutation re-allocates only the path it touches and
//! every other node is shared with the previous tree.
//!
//! All structs serialize to the canonical camelCase JSON shape:
//!
//! ```text
//! { slug, title, topics: [
//!     { id, title, subTopics: [
//!         { id, title, questions: [{ id, text, link }] } ] } ] }
//! ```

mod question;
mod sheet;
mod sub_topic;
mod topic;

pub use question::Question;
pub use sheet::{DEFAULT_SHEET_TITLE, DEFAULT_SLUG, Sheet};
pub use sub_topic::SubTopic;
pub use topic::Topic;

/// A node addressable by a stable string id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Topic {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for SubTopic {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Question {
    fn id(&self) -> &str {
        &self.id
    }
}

impl<T: Identified + ?Sized> Identified for std::sync::Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }
}

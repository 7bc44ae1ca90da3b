//! Topic actions.

use qsheet_core::{EntityKind, Topic};
use qsheet_tree::mutate;

use super::{edited, required};
use crate::error::StoreError;
use crate::service::{SheetService, owned};

impl SheetService {
    /// Append a new topic and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] with a validation error if `title` is blank.
    pub fn add_topic(&mut self, title: &str) -> Result<String, StoreError> {
        let topic = Topic::new(required(title, EntityKind::Topic, "title")?);
        let id = topic.id.clone();
        let next = owned(mutate::add_topic(self.topics(), topic));
        self.apply(next);
        Ok(id)
    }

    pub fn edit_topic(&mut self, topic_id: &str, title: &str) -> bool {
        let Some(title) = edited(title, EntityKind::Topic, topic_id) else {
            return false;
        };
        let next = owned(mutate::edit_topic(self.topics(), topic_id, &title));
        self.apply(next)
    }

    /// Delete a topic with all its subtopics. The topic becomes the undo record.
    pub fn delete_topic(&mut self, topic_id: &str) -> bool {
        let Some(removal) = mutate::remove_topic(self.topics(), topic_id) else {
            return false;
        };
        self.record_deletion(removal.record);
        self.commit(removal.topics);
        true
    }
}

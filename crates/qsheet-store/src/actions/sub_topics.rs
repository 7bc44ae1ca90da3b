//! Subtopic actions.

use qsheet_core::{CoreError, EntityKind, SubTopic};
use qsheet_tree::mutate;

use super::{edited, required};
use crate::error::StoreError;
use crate::service::{SheetService, owned};

impl SheetService {
    /// Append a new subtopic to `topic_id` and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] if `title` is blank or the topic does not exist.
    pub fn add_sub_topic(&mut self, topic_id: &str, title: &str) -> Result<String, StoreError> {
        let sub_topic = SubTopic::new(required(title, EntityKind::SubTopic, "title")?);
        let id = sub_topic.id.clone();
        let next = owned(mutate::add_sub_topic(self.topics(), topic_id, sub_topic));
        if !self.apply(next) {
            return Err(CoreError::not_found(EntityKind::Topic, topic_id).into());
        }
        Ok(id)
    }

    pub fn edit_sub_topic(&mut self, topic_id: &str, sub_id: &str, title: &str) -> bool {
        let Some(title) = edited(title, EntityKind::SubTopic, sub_id) else {
            return false;
        };
        let next = owned(mutate::edit_sub_topic(self.topics(), topic_id, sub_id, &title));
        self.apply(next)
    }

    pub fn delete_sub_topic(&mut self, topic_id: &str, sub_id: &str) -> bool {
        let Some(removal) = mutate::remove_sub_topic(self.topics(), topic_id, sub_id) else {
            return false;
        };
        self.record_deletion(removal.record);
        self.commit(removal.topics);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::seeded_service;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn add_sub_topic_appends_to_parent() {
        let mut svc = seeded_service();
        let topic_id = svc.topics()[1].id.clone();
        let untouched = Arc::clone(&svc.topics()[0]);

        let id = svc.add_sub_topic(&topic_id, "Medium").unwrap();
        assert!(id.starts_with("sub-"));
        let subs = &svc.topics()[1].sub_topics;
        assert_eq!(subs.last().map(|s| s.title.as_str()), Some("Medium"));
        assert!(subs.last().unwrap().questions.is_empty());
        assert!(Arc::ptr_eq(&svc.topics()[0], &untouched));
    }

    #[test]
    fn add_sub_topic_to_missing_topic_is_not_found() {
        let mut svc = seeded_service();
        let before = svc.topics().to_vec();
        let err = svc.add_sub_topic("top-missing", "Medium").unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::NotFound { .. })));
        assert_eq!(svc.topics(), before.as_slice());
    }

    #[test]
    fn edit_and_delete_sub_topic() {
        let mut svc = seeded_service();
        let topic_id = svc.topics()[0].id.clone();
        let sub_id = svc.topics()[0].sub_topics[1].id.clone();

        assert!(svc.edit_sub_topic(&topic_id, &sub_id, "Trees"));
        assert_eq!(svc.topics()[0].sub_topics[1].title, "Trees");
        assert!(!svc.edit_sub_topic(&topic_id, "sub-missing", "x"));

        let before = svc.topics().to_vec();
        assert!(svc.delete_sub_topic(&topic_id, &sub_id));
        assert_eq!(svc.topics()[0].sub_topics.len(), 1);
        assert_eq!(svc.last_deleted().unwrap().parent_path(), vec![topic_id.as_str()]);

        assert!(svc.undo_delete());
        assert_eq!(svc.topics(), before.as_slice());
    }

    #[test]
    fn undo_after_parent_deleted_is_dropped() {
        let mut svc = seeded_service();
        let topic_id = svc.topics()[0].id.clone();
        let sub_id = svc.topics()[0].sub_topics[0].id.clone();

        assert!(svc.delete_sub_topic(&topic_id, &sub_id));
        // Deleting the parent replaces the undo record anyway; set the tree
        // directly so the sub-topic record survives with no parent.
        let remaining = svc.topics()[1..].to_vec();
        svc.set_topics(remaining.clone());

        assert!(!svc.undo_delete());
        assert!(svc.last_deleted().is_none());
        assert_eq!(svc.topics(), remaining.as_slice());
    }
}

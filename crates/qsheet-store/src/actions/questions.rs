//! Question actions.

use qsheet_core::{CoreError, EntityKind, Question};
use qsheet_tree::mutate;

use super::{edited, required};
use crate::error::StoreError;
use crate::service::{SheetService, owned};

impl SheetService {
    /// Append a new question to a subtopic and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] if `text` is blank or the topic or
    /// subtopic does not exist.
    pub fn add_question(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        text: &str,
    ) -> Result<String, StoreError> {
        let question = Question::new(required(text, EntityKind::Question, "text")?);
        let id = question.id.clone();
        let next = owned(mutate::add_question(self.topics(), topic_id, sub_id, question));
        if !self.apply(next) {
            let missing = if self.topics().iter().any(|topic| topic.id == topic_id) {
                CoreError::not_found(EntityKind::SubTopic, sub_id)
            } else {
                CoreError::not_found(EntityKind::Topic, topic_id)
            };
            return Err(missing.into());
        }
        Ok(id)
    }

    pub fn edit_question(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        question_id: &str,
        text: &str,
    ) -> bool {
        let Some(text) = edited(text, EntityKind::Question, question_id) else {
            return false;
        };
        let next = owned(mutate::edit_question(
            self.topics(),
            topic_id,
            sub_id,
            question_id,
            &text,
        ));
        self.apply(next)
    }

    /// Set the problem link of a question. A blank link clears it.
    pub fn add_link_to_question(
        &mut self,
        topic_id: &str,
        sub_id: &str,
        question_id: &str,
        link: &str,
    ) -> bool {
        let next = owned(mutate::set_question_link(
            self.topics(),
            topic_id,
            sub_id,
            question_id,
            link.trim(),
        ));
        self.apply(next)
    }

    pub fn delete_question(&mut self, topic_id: &str, sub_id: &str, question_id: &str) -> bool {
        let Some(removal) = mutate::remove_question(self.topics(), topic_id, sub_id, question_id)
        else {
            return false;
        };
        self.record_deletion(removal.record);
        self.commit(removal.topics);
        true
    }
}

//! Reorder and move actions.
//!
//! Indices are positions in the unfiltered lists.

use qsheet_tree::reorder;

use crate::service::{SheetService, owned};

impl SheetService {
    pub fn reorder_topics(&mut self, from: usize, to: usize) -> bool {
        let next = owned(reorder::reorder_topics(self.topics(), from, to));
        self.apply(next)
    }

    /// Move a subtopic within or across topics.
    pub fn move_sub_topic(
        &mut self,
        from_topic: &str,
        to_topic: &str,
        from: usize,
        to: usize,
    ) -> bool {
        let next = owned(reorder::move_sub_topic(
            self.topics(),
            from_topic,
            to_topic,
            from,
            to,
        ));
        self.apply(next)
    }

    /// Move a question within or across subtopics.
    pub fn move_question(
        &mut self,
        (from_topic, from_sub): (&str, &str),
        (to_topic, to_sub): (&str, &str),
        from: usize,
        to: usize,
    ) -> bool {
        let next = owned(reorder::move_question(
            self.topics(),
            from_topic,
            from_sub,
            to_topic,
            to_sub,
            from,
            to,
        ));
        self.apply(next)
    }
}

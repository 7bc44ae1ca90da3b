//! One-slot undo for deletions.
//!
//! The buffer holds at most one [`DeletedRecord`]. Recording a new deletion
//! overwrites the previous one, which is then gone for good. Time-based expiry
//! belongs to the owner of the buffer; the buffer only offers [`UndoBuffer::clear`].

use std::borrow::Cow;
use std::sync::Arc;

use qsheet_core::{EntityKind, Question, SubTopic, Topic};
use serde::Serialize;

use crate::mutate::{insert_at, settle, update_sub_topic, update_topic};

/// The deleted node together with the ids of the ancestors that held it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeletedItem {
    Topic {
        item: Arc<Topic>,
    },
    SubTopic {
        topic_id: String,
        item: Arc<SubTopic>,
    },
    Question {
        topic_id: String,
        sub_topic_id: String,
        item: Arc<Question>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedRecord {
    #[serde(flatten)]
    pub item: DeletedItem,
    /// Position in the parent list at the time of deletion.
    pub original_index: usize,
}

impl DeletedRecord {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self.item {
            DeletedItem::Topic { .. } => EntityKind::Topic,
            DeletedItem::SubTopic { .. } => EntityKind::SubTopic,
            DeletedItem::Question { .. } => EntityKind::Question,
        }
    }

    /// Id of the deleted node.
    #[must_use]
    pub fn id(&self) -> &str {
        match &self.item {
            DeletedItem::Topic { item } => &item.id,
            DeletedItem::SubTopic { item, .. } => &item.id,
            DeletedItem::Question { item, .. } => &item.id,
        }
    }

    /// Title or question text of the deleted node.
    #[must_use]
    pub fn label(&self) -> &str {
        match &self.item {
            DeletedItem::Topic { item } => &item.title,
            DeletedItem::SubTopic { item, .. } => &item.title,
            DeletedItem::Question { item, .. } => &item.text,
        }
    }

    /// Ancestor ids, outermost first. Empty for a topic.
    #[must_use]
    pub fn parent_path(&self) -> Vec<&str> {
        match &self.item {
            DeletedItem::Topic { .. } => Vec::new(),
            DeletedItem::SubTopic { topic_id, .. } => vec![topic_id.as_str()],
            DeletedItem::Question {
                topic_id,
                sub_topic_id,
                ..
            } => vec![topic_id.as_str(), sub_topic_id.as_str()],
        }
    }

    /// Re-insert the node at `min(original_index, len)` of its parent list.
    ///
    /// Returns `None` when the parent no longer exists.
    #[must_use]
    pub fn restore_into(&self, topics: &[Arc<Topic>]) -> Option<Vec<Arc<Topic>>> {
        let index = self.original_index;
        match &self.item {
            DeletedItem::Topic { item } => Some(insert_at(topics, index, Arc::clone(item))),
            DeletedItem::SubTopic { topic_id, item } => update_topic(topics, topic_id, |topic| {
                Some(topic.with_sub_topics(insert_at(&topic.sub_topics, index, Arc::clone(item))))
            }),
            DeletedItem::Question {
                topic_id,
                sub_topic_id,
                item,
            } => update_sub_topic(topics, topic_id, sub_topic_id, |sub| {
                Some(sub.with_questions(insert_at(&sub.questions, index, Arc::clone(item))))
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UndoBuffer {
    last: Option<DeletedRecord>,
}

impl UndoBuffer {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Store `record`, returning the record it displaced (now unrecoverable).
    pub fn record_deletion(&mut self, record: DeletedRecord) -> Option<DeletedRecord> {
        self.last.replace(record)
    }

    #[must_use]
    pub const fn last_deleted(&self) -> Option<&DeletedRecord> {
        self.last.as_ref()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Empty the buffer unconditionally.
    pub fn clear(&mut self) -> Option<DeletedRecord> {
        self.last.take()
    }

    /// Restore the buffered node into `topics` and empty the buffer.
    ///
    /// An empty buffer returns the tree unchanged. If the parent has since been
    /// deleted the record is dropped and the tree is returned unchanged.
    pub fn restore<'a>(&mut self, topics: &'a [Arc<Topic>]) -> Cow<'a, [Arc<Topic>]> {
        let Some(record) = self.last.take() else {
            return Cow::Borrowed(topics);
        };
        let restored = record.restore_into(topics);
        if restored.is_none() {
            tracing::warn!(
                kind = %record.kind(),
                id = record.id(),
                "parent of deleted item no longer exists; undo dropped"
            );
        }
        settle(topics, restored)
    }
}

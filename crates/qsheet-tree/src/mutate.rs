//! Id-addressed edits, inserts, and deletes.
//!
//! Lookups go through the full ancestor path (topic id, then subtopic id, then
//! question id). Ids are globally unique, so the path is only used to find the
//! list, never to disambiguate.

use std::borrow::Cow;
use std::sync::Arc;

use qsheet_core::{Identified, Question, SubTopic, Topic};

use crate::undo::{DeletedItem, DeletedRecord};

/// Result of removing a node: the new tree plus what the undo buffer needs.
#[derive(Debug, Clone)]
pub struct Removal {
    pub topics: Vec<Arc<Topic>>,
    pub record: DeletedRecord,
}

// ── Generic list helpers ───────────────────────────────────────────

/// Position of the node with `id`, if any.
pub fn position_of<T: Identified>(items: &[Arc<T>], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Replace the node with `id` by `update(node)`.
///
/// Returns `None` when no node has that id or when `update` itself declines
/// (returns `None`). All other elements are shared with `items`.
pub fn update_by_id<T, F>(items: &[Arc<T>], id: &str, update: F) -> Option<Vec<Arc<T>>>
where
    T: Identified,
    F: FnOnce(&T) -> Option<T>,
{
    let index = position_of(items, id)?;
    let updated = update(&items[index])?;
    let mut next = items.to_vec();
    next[index] = Arc::new(updated);
    Some(next)
}

/// Drop the node with `id`, returning the new list, the node, and its index.
pub fn remove_by_id<T: Identified>(
    items: &[Arc<T>],
    id: &str,
) -> Option<(Vec<Arc<T>>, Arc<T>, usize)> {
    let index = position_of(items, id)?;
    let mut next = items.to_vec();
    let removed = next.remove(index);
    Some((next, removed, index))
}

/// Insert `item` at `index`, clamped to the list length.
pub fn insert_at<T>(items: &[Arc<T>], index: usize, item: Arc<T>) -> Vec<Arc<T>> {
    let mut next = items.to_vec();
    next.insert(index.min(items.len()), item);
    next
}

// ── Path helpers ───────────────────────────────────────────────────

pub(crate) fn update_topic<F>(
    topics: &[Arc<Topic>],
    topic_id: &str,
    update: F,
) -> Option<Vec<Arc<Topic>>>
where
    F: FnOnce(&Topic) -> Option<Topic>,
{
    update_by_id(topics, topic_id, update)
}

pub(crate) fn update_sub_topic<F>(
    topics: &[Arc<Topic>],
    topic_id: &str,
    sub_id: &str,
    update: F,
) -> Option<Vec<Arc<Topic>>>
where
    F: FnOnce(&SubTopic) -> Option<SubTopic>,
{
    update_topic(topics, topic_id, |topic| {
        let sub_topics = update_by_id(&topic.sub_topics, sub_id, update)?;
        Some(topic.with_sub_topics(sub_topics))
    })
}

pub(crate) fn update_question<F>(
    topics: &[Arc<Topic>],
    topic_id: &str,
    sub_id: &str,
    question_id: &str,
    update: F,
) -> Option<Vec<Arc<Topic>>>
where
    F: FnOnce(&Question) -> Option<Question>,
{
    update_sub_topic(topics, topic_id, sub_id, |sub| {
        let questions = update_by_id(&sub.questions, question_id, update)?;
        Some(sub.with_questions(questions))
    })
}

pub(crate) fn settle(
    topics: &[Arc<Topic>],
    next: Option<Vec<Arc<Topic>>>,
) -> Cow<'_, [Arc<Topic>]> {
    next.map_or(Cow::Borrowed(topics), Cow::Owned)
}

// ── Edits ──────────────────────────────────────────────────────────

pub fn edit_topic<'a>(
    topics: &'a [Arc<Topic>],
    topic_id: &str,
    title: &str,
) -> Cow<'a, [Arc<Topic>]> {
    settle(
        topics,
        update_topic(topics, topic_id, |topic| {
            Some(Topic {
                title: title.to_string(),
                ..topic.clone()
            })
        }),
    )
}

pub fn edit_sub_topic<'a>(
    topics: &'a [Arc<Topic>],
    topic_id: &str,
    sub_id: &str,
    title: &str,
) -> Cow<'a, [Arc<Topic>]> {
    settle(
        topics,
        update_sub_topic(topics, topic_id, sub_id, |sub| {
            Some(SubTopic {
                title: title.to_string(),
                ..sub.clone()
            })
        }),
    )
}

pub fn edit_question<'a>(
    topics: &'a [Arc<Topic>],
    topic_id: &str,
    sub_id: &str,
    question_id: &str,
    text: &str,
) -> Cow<'a, [Arc<Topic>]> {
    settle(
        topics,
        update_question(topics, topic_id, sub_id, question_id, |question| {
            Some(Question {
                text: text.to_string(),
                ..question.clone()
            })
        }),
    )
}

/// Attach (or replace) the problem link of a question.
pub fn set_question_link<'a>(
    topics: &'a [Arc<Topic>],
    topic_id: &str,
    sub_id: &str,
    question_id: &str,
    link: &str,
) -> Cow<'a, [Arc<Topic>]> {
    settle(
        topics,
        update_question(topics, topic_id, sub_id, question_id, |question| {
            Some(Question {
                link: link.to_string(),
                ..question.clone()
            })
        }),
    )
}

// ── Inserts ────────────────────────────────────────────────────────

/// Append a topic. Always produces a new list.
pub fn add_topic(topics: &[Arc<Topic>], topic: Topic) -> Cow<'_, [Arc<Topic>]> {
    Cow::Owned(insert_at(topics, topics.len(), Arc::new(topic)))
}

/// Append a subtopic to the end of its topic's list.
pub fn add_sub_topic<'a>(
    topics: &'a [Arc<Topic>],
    topic_id: &str,
    sub_topic: SubTopic,
) -> Cow<'a, [Arc<Topic>]> {
    settle(
        topics,
        update_topic(topics, topic_id, |topic| {
            let end = topic.sub_topics.len();
            let sub_topics = insert_at(&topic.sub_topics, end, Arc::new(sub_topic));
            Some(topic.with_sub_topics(sub_topics))
        }),
    )
}

/// Append a question to the end of its subtopic's list.
pub fn add_question<'a>(
    topics: &'a [Arc<Topic>],
    topic_id: &str,
    sub_id: &str,
    question: Question,
) -> Cow<'a, [Arc<Topic>]> {
    settle(
        topics,
        update_sub_topic(topics, topic_id, sub_id, |sub| {
            let questions = insert_at(&sub.questions, sub.questions.len(), Arc::new(question));
            Some(sub.with_questions(questions))
        }),
    )
}

// ── Deletes ────────────────────────────────────────────────────────

pub fn remove_topic(topics: &[Arc<Topic>], topic_id: &str) -> Option<Removal> {
    let (next, item, original_index) = remove_by_id(topics, topic_id)?;
    Some(Removal {
        topics: next,
        record: DeletedRecord {
            item: DeletedItem::Topic { item },
            original_index,
        },
    })
}

pub fn remove_sub_topic(topics: &[Arc<Topic>], topic_id: &str, sub_id: &str) -> Option<Removal> {
    let mut removed = None;
    let next = update_topic(topics, topic_id, |topic| {
        let (sub_topics, item, index) = remove_by_id(&topic.sub_topics, sub_id)?;
        removed = Some((item, index));
        Some(topic.with_sub_topics(sub_topics))
    })?;
    let (item, original_index) = removed?;
    Some(Removal {
        topics: next,
        record: DeletedRecord {
            item: DeletedItem::SubTopic {
                topic_id: topic_id.to_string(),
                item,
            },
            original_index,
        },
    })
}

pub fn remove_question(
    topics: &[Arc<Topic>],
    topic_id: &str,
    sub_id: &str,
    question_id: &str,
) -> Option<Removal> {
    let mut removed = None;
    let next = update_sub_topic(topics, topic_id, sub_id, |sub| {
        let (questions, item, index) = remove_by_id(&sub.questions, question_id)?;
        removed = Some((item, index));
        Some(sub.with_questions(questions))
    })?;
    let (item, original_index) = removed?;
    Some(Removal {
        topics: next,
        record: DeletedRecord {
            item: DeletedItem::Question {
                topic_id: topic_id.to_string(),
                sub_topic_id: sub_id.to_string(),
                item,
            },
            original_index,
        },
    })
}

pub fn delete_topic<'a>(topics: &'a [Arc<Topic>], topic_id: &str) -> Cow<'a, [Arc<Topic>]> {
    settle(topics, remove_topic(topics, topic_id).map(|r| r.topics))
}

pub fn delete_sub_topic<'a>(
    topics: &'a [Arc<Topic>],
    topic_id: &str,
    sub_id: &str,
) -> Cow<'a, [Arc<Topic>]> {
    settle(topics, remove_sub_topic(topics, topic_id, sub_id).map(|r| r.topics))
}

pub fn delete_question<'a>(
    topics: &'a [Arc<Topic>],
    topic_id: &str,
    sub_id: &str,
    question_id: &str,
) -> Cow<'a, [Arc<Topic>]> {
    settle(
        topics,
        remove_question(topics, topic_id, sub_id, question_id).map(|r| r.topics),
    )
}

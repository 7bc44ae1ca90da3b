//! Drag-and-drop reordering within a list and relocation across parents.
//!
//! Indices are positions in the unfiltered list. Callers derive them from the
//! live list, so an out-of-range index is a caller bug: it is logged and the
//! tree is returned unchanged instead of panicking.

use std::borrow::Cow;
use std::sync::Arc;

use qsheet_core::{Question, SubTopic, Topic};

use crate::mutate::{position_of, settle, update_sub_topic, update_topic};

/// Move the element at `from` to `to` within the same list.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Cow<'_, [T]> {
    if from == to {
        return Cow::Borrowed(items);
    }
    if from >= items.len() || to >= items.len() {
        tracing::warn!(from, to, len = items.len(), "reorder index out of range; ignoring");
        return Cow::Borrowed(items);
    }
    let mut next = items.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Cow::Owned(next)
}

pub fn reorder_topics(topics: &[Arc<Topic>], from: usize, to: usize) -> Cow<'_, [Arc<Topic>]> {
    reorder(topics, from, to)
}

/// Move a subtopic from one topic to another (or within one topic).
///
/// `to` may equal the destination length, which appends.
pub fn move_sub_topic<'a>(
    topics: &'a [Arc<Topic>],
    from_topic: &str,
    to_topic: &str,
    from: usize,
    to: usize,
) -> Cow<'a, [Arc<Topic>]> {
    if from_topic == to_topic {
        return settle(
            topics,
            update_topic(topics, from_topic, |topic| match reorder(&topic.sub_topics, from, to) {
                Cow::Owned(sub_topics) => Some(topic.with_sub_topics(sub_topics)),
                Cow::Borrowed(_) => None,
            }),
        );
    }
    settle(topics, relocate_sub_topic(topics, from_topic, to_topic, from, to))
}

fn relocate_sub_topic(
    topics: &[Arc<Topic>],
    from_topic: &str,
    to_topic: &str,
    from: usize,
    to: usize,
) -> Option<Vec<Arc<Topic>>> {
    let source_index = position_of(topics, from_topic)?;
    let dest_index = position_of(topics, to_topic)?;
    let source = &topics[source_index];
    let dest = &topics[dest_index];
    if from >= source.sub_topics.len() || to > dest.sub_topics.len() {
        tracing::warn!(
            from_topic,
            to_topic,
            from,
            to,
            "subtopic move index out of range; ignoring"
        );
        return None;
    }

    let mut source_list = source.sub_topics.clone();
    let moved = source_list.remove(from);
    let mut dest_list = dest.sub_topics.clone();
    dest_list.insert(to, moved);

    let mut next = topics.to_vec();
    next[source_index] = Arc::new(source.with_sub_topics(source_list));
    next[dest_index] = Arc::new(dest.with_sub_topics(dest_list));
    Some(next)
}

/// Move a question between subtopics, possibly across topics.
///
/// The same `(topic, subtopic)` pair on both ends degrades to [`reorder`].
pub fn move_question<'a>(
    topics: &'a [Arc<Topic>],
    from_topic: &str,
    from_sub: &str,
    to_topic: &str,
    to_sub: &str,
    from: usize,
    to: usize,
) -> Cow<'a, [Arc<Topic>]> {
    if from_topic == to_topic && from_sub == to_sub {
        return settle(
            topics,
            update_sub_topic(topics, from_topic, from_sub, |sub| {
                match reorder(&sub.questions, from, to) {
                    Cow::Owned(questions) => Some(sub.with_questions(questions)),
                    Cow::Borrowed(_) => None,
                }
            }),
        );
    }
    settle(
        topics,
        relocate_question(topics, (from_topic, from_sub), (to_topic, to_sub), from, to),
    )
}

/// Topic index and subtopic index for a `(topic id, subtopic id)` path.
fn locate_sub_topic(topics: &[Arc<Topic>], topic_id: &str, sub_id: &str) -> Option<(usize, usize)> {
    let topic_index = position_of(topics, topic_id)?;
    let sub_index = position_of(&topics[topic_index].sub_topics, sub_id)?;
    Some((topic_index, sub_index))
}

fn relocate_question(
    topics: &[Arc<Topic>],
    (from_topic, from_sub): (&str, &str),
    (to_topic, to_sub): (&str, &str),
    from: usize,
    to: usize,
) -> Option<Vec<Arc<Topic>>> {
    let (source_topic, source_sub) = locate_sub_topic(topics, from_topic, from_sub)?;
    let (dest_topic, dest_sub) = locate_sub_topic(topics, to_topic, to_sub)?;
    let source_questions = &topics[source_topic].sub_topics[source_sub].questions;
    let dest_questions = &topics[dest_topic].sub_topics[dest_sub].questions;
    if from >= source_questions.len() || to > dest_questions.len() {
        tracing::warn!(
            from_sub,
            to_sub,
            from,
            to,
            "question move index out of range; ignoring"
        );
        return None;
    }

    let mut source_list = source_questions.clone();
    let moved = source_list.remove(from);
    let mut dest_list = dest_questions.clone();
    dest_list.insert(to, moved);

    let mut next = topics.to_vec();
    next[source_topic] = Arc::new(replace_questions(&next[source_topic], source_sub, source_list));
    // When both subtopics share a topic this builds on the topic updated above.
    next[dest_topic] = Arc::new(replace_questions(&next[dest_topic], dest_sub, dest_list));
    Some(next)
}

fn replace_questions(topic: &Topic, sub_index: usize, questions: Vec<Arc<Question>>) -> Topic {
    let mut sub_topics: Vec<Arc<SubTopic>> = topic.sub_topics.clone();
    sub_topics[sub_index] = Arc::new(sub_topics[sub_index].with_questions(questions));
    topic.with_sub_topics(sub_topics)
}

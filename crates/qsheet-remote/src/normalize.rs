//! Tolerant decoding of remote sheet payloads into the canonical [`Sheet`].
//!
//! Remote payloads name the same things in many ways (`title`, `name`,
//! `topicName`, ...). Each field has a priority list of keys; the first key
//! holding a usable value wins. When nothing matches, titles fall back to a
//! positional label (`"Topic 3"`) and ids are freshly generated.
//!
//! Every id in the decoded sheet is unique across the whole sheet: a remote id
//! that was already seen (or is missing) is replaced by a generated one.

use std::collections::HashSet;
use std::sync::Arc;

use qsheet_core::entities::{DEFAULT_SHEET_TITLE, DEFAULT_SLUG};
use qsheet_core::{EntityKind, Question, Sheet, SubTopic, Topic, ids};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

const SHEET_SLUG_KEYS: &[&str] = &["slug", "sheetSlug"];
const SHEET_TITLE_KEYS: &[&str] = &["title", "name", "sheetName"];
const TOPIC_LIST_KEYS: &[&str] = &["topics", "topicList", "topic_list", "sections"];

const TOPIC_TITLE_KEYS: &[&str] = &["title", "name", "topicName", "topic_name", "topic", "label"];
const SUB_TOPIC_LIST_KEYS: &[&str] = &[
    "subTopics",
    "subtopics",
    "sub_topics",
    "subTopicList",
    "children",
];

const SUB_TOPIC_TITLE_KEYS: &[&str] = &[
    "title",
    "name",
    "subTopicName",
    "subtopicName",
    "sub_topic_name",
    "label",
];
const QUESTION_LIST_KEYS: &[&str] = &[
    "questions",
    "questionList",
    "question_list",
    "problems",
    "items",
];

const QUESTION_TEXT_KEYS: &[&str] = &[
    "text",
    "title",
    "name",
    "questionName",
    "questionTitle",
    "problemName",
    "question",
    "label",
];
const QUESTION_LINK_KEYS: &[&str] = &["link", "url", "problemUrl", "questionLink", "href"];
/// Objects some payloads nest question details under.
const QUESTION_DETAIL_KEYS: &[&str] = &["questionId", "question", "problem"];

const ID_KEYS: &[&str] = &["id", "_id", "uuid"];

/// Locate the sheet payload inside a response body.
///
/// Probes `data.sheet`, `data`, then `sheet`, taking the first that is a JSON
/// object; falls back to the body itself.
#[must_use]
pub fn unwrap_envelope(body: &Value) -> &Value {
    body.pointer("/data/sheet")
        .filter(|v| v.is_object())
        .or_else(|| body.get("data").filter(|v| v.is_object()))
        .or_else(|| body.get("sheet").filter(|v| v.is_object()))
        .unwrap_or(body)
}

/// Decode a sheet payload (already unwrapped from its envelope).
///
/// The slug comes from the payload, then `slug`, then [`DEFAULT_SLUG`]. A
/// payload that is not an object decodes to an empty sheet.
#[must_use]
pub fn normalize_sheet(payload: &Value, slug: Option<&str>) -> Sheet {
    let empty = Object::new();
    let obj = payload.as_object().unwrap_or(&empty);
    let mut ids = IdAllocator::default();

    let slug = first_text(&[obj], SHEET_SLUG_KEYS)
        .or_else(|| slug.filter(|s| !s.trim().is_empty()).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_SLUG.to_string());
    let title =
        first_text(&[obj], SHEET_TITLE_KEYS).unwrap_or_else(|| DEFAULT_SHEET_TITLE.to_string());

    let topics = first_array(obj, TOPIC_LIST_KEYS)
        .iter()
        .enumerate()
        .filter_map(|(i, value)| decode_topic(value, i + 1, &mut ids))
        .map(Arc::new)
        .collect();

    Sheet { slug, title, topics }
}

fn decode_topic(value: &Value, position: usize, ids: &mut IdAllocator) -> Option<Topic> {
    let (obj, title) = entry_parts(value, TOPIC_TITLE_KEYS)?;
    let id = ids.claim(obj.and_then(first_id), EntityKind::Topic);
    let sub_topics = obj
        .map(|o| first_array(o, SUB_TOPIC_LIST_KEYS))
        .unwrap_or_default()
        .iter()
        .enumerate()
        .filter_map(|(i, v)| decode_sub_topic(v, i + 1, ids))
        .map(Arc::new)
        .collect();
    Some(Topic {
        id,
        title: title.unwrap_or_else(|| format!("Topic {position}")),
        sub_topics,
    })
}

fn decode_sub_topic(value: &Value, position: usize, ids: &mut IdAllocator) -> Option<SubTopic> {
    let (obj, title) = entry_parts(value, SUB_TOPIC_TITLE_KEYS)?;
    let id = ids.claim(obj.and_then(first_id), EntityKind::SubTopic);
    let questions = obj
        .map(|o| first_array(o, QUESTION_LIST_KEYS))
        .unwrap_or_default()
        .iter()
        .enumerate()
        .filter_map(|(i, v)| decode_question(v, i + 1, ids))
        .map(Arc::new)
        .collect();
    Some(SubTopic {
        id,
        title: title.unwrap_or_else(|| format!("Subtopic {position}")),
        questions,
    })
}

fn decode_question(value: &Value, position: usize, ids: &mut IdAllocator) -> Option<Question> {
    if let Value::String(text) = value {
        return Some(Question {
            id: ids.claim(None, EntityKind::Question),
            text: non_blank(text).unwrap_or_else(|| format!("Question {position}")),
            link: String::new(),
        });
    }
    let obj = value.as_object()?;
    let mut sources = vec![obj];
    sources.extend(
        QUESTION_DETAIL_KEYS
            .iter()
            .filter_map(|key| obj.get(*key).and_then(Value::as_object)),
    );

    let id = sources.iter().copied().find_map(first_id);
    Some(Question {
        id: ids.claim(id, EntityKind::Question),
        text: first_text(&sources, QUESTION_TEXT_KEYS)
            .unwrap_or_else(|| format!("Question {position}")),
        link: first_text(&sources, QUESTION_LINK_KEYS).unwrap_or_default(),
    })
}

/// Split a topic/subtopic entry into its object (if any) and title (if any).
///
/// A bare string is a title with no children. Anything other than an object
/// or a string is skipped.
fn entry_parts<'a>(
    value: &'a Value,
    title_keys: &[&str],
) -> Option<(Option<&'a Object>, Option<String>)> {
    match value {
        Value::Object(obj) => Some((Some(obj), first_text(&[obj], title_keys))),
        Value::String(s) => Some((None, non_blank(s))),
        _ => None,
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// First non-blank string found under `keys`, searching each source in order.
fn first_text(sources: &[&Object], keys: &[&str]) -> Option<String> {
    sources.iter().find_map(|obj| {
        keys.iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_str).and_then(non_blank))
    })
}

fn first_id(obj: &Object) -> Option<String> {
    ID_KEYS.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) => non_blank(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn first_array<'a>(obj: &'a Object, keys: &[&str]) -> &'a [Value] {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Hands out ids, keeping every id in one sheet distinct.
#[derive(Default)]
struct IdAllocator {
    seen: HashSet<String>,
}

impl IdAllocator {
    fn claim(&mut self, candidate: Option<String>, kind: EntityKind) -> String {
        if let Some(id) = candidate
            && self.seen.insert(id.clone())
        {
            return id;
        }
        loop {
            let id = ids::generate_id(kind.id_prefix());
            if self.seen.insert(id.clone()) {
                return id;
            }
        }
    }
}

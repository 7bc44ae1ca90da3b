use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Topic;

/// Title used when neither the payload nor the caller names the sheet.
pub const DEFAULT_SHEET_TITLE: &str = "Question Sheet";

/// Slug used when neither the payload nor the caller supplies one.
pub const DEFAULT_SLUG: &str = "local-sheet";

/// Root aggregate: exactly one sheet is live at a time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Sheet {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub topics: Vec<Arc<Topic>>,
}

impl Sheet {
    /// An empty sheet scoped to `slug`.
    #[must_use]
    pub fn empty(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: DEFAULT_SHEET_TITLE.to_string(),
            topics: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Replace the topic list, keeping slug and title.
    #[must_use]
    pub fn with_topics(&self, topics: Vec<Arc<Topic>>) -> Self {
        Self {
            slug: self.slug.clone(),
            title: self.title.clone(),
            topics,
        }
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.topics.iter().map(|t| t.question_count()).sum()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::empty(DEFAULT_SLUG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Question, SubTopic};

    #[test]
    fn empty_sheet_has_default_title() {
        let sheet = Sheet::empty("sde-sheet");
        assert_eq!(sheet.slug, "sde-sheet");
        assert_eq!(sheet.title, DEFAULT_SHEET_TITLE);
        assert!(sheet.is_empty());
    }

    #[test]
    fn canonical_json_uses_camel_case() {
        let mut sub = SubTopic::new("Arrays");
        sub.questions.push(Arc::new(Question::new("Two Sum")));
        let mut topic = Topic::new("Basics");
        topic.sub_topics.push(Arc::new(sub));
        let sheet = Sheet::empty("s").with_topics(vec![Arc::new(topic)]);

        let value = serde_json::to_value(&sheet).unwrap();
        let question = &value["topics"][0]["subTopics"][0]["questions"][0];
        assert_eq!(question["text"], "Two Sum");
        assert_eq!(question["link"], "");
        assert_eq!(sheet.question_count(), 1);
    }

    #[test]
    fn missing_child_lists_deserialize_empty() {
        let json = r#"{"slug":"s","title":"t","topics":[{"id":"top-1","title":"A"}]}"#;
        let sheet: Sheet = serde_json::from_str(json).unwrap();
        assert!(sheet.topics[0].sub_topics.is_empty());
    }
}

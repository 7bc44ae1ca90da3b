use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::SubTopic;
use crate::ids;

/// A top-level section of the sheet.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sub_topics: Vec<Arc<SubTopic>>,
}

impl Topic {
    /// Create a topic with a fresh id and no subtopics.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ids::generate_id(ids::PREFIX_TOPIC),
            title: title.into(),
            sub_topics: Vec::new(),
        }
    }

    /// Same topic with a replaced subtopic list.
    #[must_use]
    pub fn with_sub_topics(&self, sub_topics: Vec<Arc<SubTopic>>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            sub_topics,
        }
    }

    /// Total number of questions across all subtopics.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.sub_topics.iter().map(|s| s.questions.len()).sum()
    }
}

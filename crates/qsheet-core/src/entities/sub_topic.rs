use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Question;
use crate::ids;

/// A group of questions inside a topic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubTopic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Arc<Question>>,
}

impl SubTopic {
    /// Create a subtopic with a fresh id and no questions.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ids::generate_id(ids::PREFIX_SUB_TOPIC),
            title: title.into(),
            questions: Vec::new(),
        }
    }

    /// Same subtopic with a replaced question list.
    #[must_use]
    pub fn with_questions(&self, questions: Vec<Arc<Question>>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            questions,
        }
    }
}

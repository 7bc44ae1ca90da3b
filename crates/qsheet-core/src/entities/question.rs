use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids;

/// A single study question, optionally linked to a problem page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Problem URL. Empty when no link has been attached.
    #[serde(default)]
    pub link: String,
}

impl Question {
    /// Create a question with a fresh id and no link.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ids::generate_id(ids::PREFIX_QUESTION),
            text: text.into(),
            link: String::new(),
        }
    }
}

//! Question search.
//!
//! Only question text is matched. A subtopic is kept when at least one of its
//! questions matches, a topic when at least one of its subtopics is kept. The
//! result is a projection: stored state is never touched.

use std::borrow::Cow;
use std::sync::Arc;

use qsheet_core::Topic;

/// Trim, lowercase, and collapse whitespace runs to a single space.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether `query` would filter anything. Reorder and move should be disabled
/// while this is true, since filtered positions differ from stored ones.
#[must_use]
pub fn is_filter_active(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Filter the tree down to questions matching `query`.
///
/// A blank query returns the input slice itself (`Cow::Borrowed`). With
/// `exact_match_only` the normalized text must equal the normalized query;
/// otherwise containment is enough.
pub fn filter_topics<'a>(
    topics: &'a [Arc<Topic>],
    query: &str,
    exact_match_only: bool,
) -> Cow<'a, [Arc<Topic>]> {
    let needle = normalize_text(query);
    if needle.is_empty() {
        return Cow::Borrowed(topics);
    }

    let matches = |text: &str| {
        let haystack = normalize_text(text);
        if exact_match_only {
            haystack == needle
        } else {
            haystack.contains(&needle)
        }
    };

    let filtered = topics
        .iter()
        .filter_map(|topic| {
            let sub_topics: Vec<_> = topic
                .sub_topics
                .iter()
                .filter_map(|sub| {
                    let questions: Vec<_> = sub
                        .questions
                        .iter()
                        .filter(|question| matches(&question.text))
                        .cloned()
                        .collect();
                    (!questions.is_empty()).then(|| Arc::new(sub.with_questions(questions)))
                })
                .collect();
            (!sub_topics.is_empty()).then(|| Arc::new(topic.with_sub_topics(sub_topics)))
        })
        .collect();

    Cow::Owned(filtered)
}

/// Number of questions in a (possibly filtered) tree.
#[must_use]
pub fn count_questions(topics: &[Arc<Topic>]) -> usize {
    topics.iter().map(|topic| topic.question_count()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture, ids};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("  Binary   Search ", "binary search")]
    #[case("TWO\tSUM", "two sum")]
    #[case("   ", "")]
    fn normalizes_whitespace_and_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_text(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn blank_query_returns_same_slice(#[case] query: &str) {
        let topics = fixture();
        let result = filter_topics(&topics, query, false);
        let Cow::Borrowed(slice) = result else {
            panic!("blank query should not allocate");
        };
        assert!(std::ptr::eq(slice, topics.as_slice()));
    }

    #[test]
    fn substring_match_keeps_ancestors_only_when_needed() {
        let topics = fixture();
        let result = filter_topics(&topics, "binary search", false);
        assert_eq!(ids(&result), vec!["t1"]);
        assert_eq!(ids(&result[0].sub_topics), vec!["s1", "s2"]);
        assert_eq!(ids(&result[0].sub_topics[0].questions), vec!["q2"]);
        assert_eq!(ids(&result[0].sub_topics[1].questions), vec!["q3"]);
    }

    #[test]
    fn exact_match_excludes_longer_titles() {
        let topics = fixture();
        let result = filter_topics(&topics, "  BINARY search", true);
        assert_eq!(ids(&result), vec!["t1"]);
        assert_eq!(ids(&result[0].sub_topics), vec!["s1"]);
        assert_eq!(ids(&result[0].sub_topics[0].questions), vec!["q2"]);
    }

    #[test]
    fn no_match_yields_empty_tree() {
        let topics = fixture();
        let result = filter_topics(&topics, "dijkstra", false);
        assert!(result.is_empty());
        assert_eq!(count_questions(&result), 0);
    }

    #[test]
    fn filtering_is_pure_and_repeatable() {
        let topics = fixture();
        let before = topics.clone();
        let first = filter_topics(&topics, "m", false).into_owned();
        let second = filter_topics(&topics, "m", false).into_owned();
        assert_eq!(first, second);
        assert_eq!(topics, before);
        // Matching questions are shared, not copied.
        assert!(Arc::ptr_eq(
            &first[1].sub_topics[0].questions[0],
            &topics[1].sub_topics[0].questions[0]
        ));
    }

    #[test]
    fn active_filter_detection() {
        assert!(!is_filter_active("  "));
        assert!(is_filter_active("sum"));
    }
}

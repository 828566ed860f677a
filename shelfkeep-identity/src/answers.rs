//! Security-question submissions: structural validation and positional verification.
//!
//! A submission is a JSON array of `{ "answer": <string> }` objects. It is checked for
//! shape before anything else looks at it, then compared index by index against the
//! user's stored questions. Question text plays no part in the comparison; reordering a
//! user's stored questions changes which submissions verify.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::user::SecurityQuestion;

/// The only field a submitted entry may carry.
const ANSWER_FIELD: &str = "answer";

/// One entry of a validated security-question submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityAnswer {
    pub answer: String,
}

impl SecurityAnswer {
    pub fn new(answer: impl Into<String>) -> Self {
        Self { answer: answer.into() }
    }
}

/// Returns `true` if `submission` is an array whose entries are all objects holding exactly
/// one field, `answer`, with a string value.
///
/// An empty array is valid.
pub fn validate_answer_shape(submission: &Value) -> bool {
    let Some(entries) = submission.as_array() else {
        return false;
    };

    entries.iter().all(|entry| {
        entry
            .as_object()
            .is_some_and(|fields| {
                fields.len() == 1
                    && fields
                        .get(ANSWER_FIELD)
                        .is_some_and(Value::is_string)
            })
    })
}

/// Validates `submission` and converts it into answers, or returns `None` if the shape is wrong.
pub fn parse_answers(submission: &Value) -> Option<Vec<SecurityAnswer>> {
    if !validate_answer_shape(submission) {
        return None;
    }

    submission.as_array().map(|entries| {
        entries
            .iter()
            .filter_map(|entry| entry.get(ANSWER_FIELD).and_then(Value::as_str))
            .map(SecurityAnswer::new)
            .collect()
    })
}

/// Returns `true` if every submitted answer equals the stored answer at the same position.
///
/// Comparison is exact and case-sensitive. A submitted entry past the end of `stored`
/// has nothing to match and fails the check. No minimum count is imposed: an empty
/// submission verifies.
pub fn verify_security_answers(stored: &[SecurityQuestion], submitted: &[SecurityAnswer]) -> bool {
    submitted
        .iter()
        .enumerate()
        .all(|(index, submitted)| {
            stored
                .get(index)
                .is_some_and(|expected| expected.answer == submitted.answer)
        })
}

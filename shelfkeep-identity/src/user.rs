//! The user record and its security questions.

use serde::{Deserialize, Serialize};
use std::fmt;

use shelfkeep_core::record::Record;

/// A stored user.
///
/// `email` is the lookup key in practice but nothing enforces its uniqueness. `password`
/// always holds a digest produced by [`CredentialHasher`](crate::credential::CredentialHasher),
/// never plaintext.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub password: String,
    /// Ordered; verification compares answers by position.
    #[serde(default)]
    pub security_questions: Vec<SecurityQuestion>,
}

impl Record for User {
    fn collection_name() -> &'static str {
        "users"
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("email", &self.email)
            .field("password", &"<digest>")
            .field("security_questions", &self.security_questions)
            .finish()
    }
}

/// A stored security question and its expected answer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityQuestion {
    pub question: String,
    pub answer: String,
}

impl SecurityQuestion {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into() }
    }
}

impl fmt::Debug for SecurityQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityQuestion")
            .field("question", &self.question)
            .field("answer", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shelfkeep_core::record::RecordExt;

    #[test]
    fn wire_shape_uses_camel_case_field_names() {
        let user = User {
            email: "test@example.com".into(),
            password: "$argon2id$...".into(),
            security_questions: vec![SecurityQuestion::new("color", "Blue")],
        };

        assert_eq!(
            user.to_json().unwrap(),
            json!({
                "email": "test@example.com",
                "password": "$argon2id$...",
                "securityQuestions": [{ "question": "color", "answer": "Blue" }],
            })
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let user = User {
            email: "a@b.c".into(),
            password: "digest-value".into(),
            security_questions: vec![SecurityQuestion::new("city", "Omaha")],
        };

        let rendered = format!("{user:?}");

        assert!(!rendered.contains("digest-value"));
        assert!(!rendered.contains("Omaha"));
        assert!(rendered.contains("city"));
    }
}

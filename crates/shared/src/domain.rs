use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(QuestionId);
id_newtype!(UserId);

const SESSION_SUFFIX_LEN: usize = 9;

/// Client-generated token correlating requests from one page load. Not a credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(SESSION_SUFFIX_LEN)
            .collect();
        Self(format!(
            "session_{}_{suffix}",
            Utc::now().timestamp_millis()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Home,
    Assessment,
    Results,
    Chat,
    Profile,
}

impl View {
    pub fn label(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Assessment => "assessment",
            View::Results => "results",
            View::Chat => "chat",
            View::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSender {
    User,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_has_prefix_timestamp_and_short_suffix() {
        let id = SessionId::generate();
        let mut parts = id.as_str().splitn(3, '_');
        assert_eq!(parts.next(), Some("session"));
        let millis = parts.next().expect("timestamp part");
        assert!(millis.parse::<i64>().is_ok());
        let suffix = parts.next().expect("suffix part");
        assert_eq!(suffix.len(), SESSION_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn session_ids_differ_between_loads() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }
}

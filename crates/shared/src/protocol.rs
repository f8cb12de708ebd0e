use serde::{Deserialize, Serialize};

use crate::domain::{QuestionId, SessionId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub question_id: QuestionId,
    pub option_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub session_id: SessionId,
    pub answers: Vec<AnswerPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_type: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characteristics: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub development_areas: Vec<String>,
    #[serde(default)]
    pub career_matches: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitAssessmentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<PersonalityResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitAssessmentResponse {
    /// The type id may arrive at the top level, inside `results`, or both.
    pub fn resolved_personality_type(&self) -> Option<&str> {
        self.personality_type.as_deref().or_else(|| {
            self.results
                .as_ref()
                .and_then(|results| results.personality_type.as_deref())
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: SessionId,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_type: Option<String>,
    #[serde(default)]
    pub resume_data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResumeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserRecord {
    /// First name when the account has one, otherwise the email.
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStatusResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub personality_type: Option<String>,
    #[serde(default)]
    pub results: Option<PersonalityResults>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_results: Option<PersonalityResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_assessment: Option<AssessmentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentHistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub assessments: Vec<AssessmentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub filename: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumesResponse {
    pub success: bool,
    #[serde(default)]
    pub resumes: Vec<ResumeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_batch_decodes_from_api_shape() {
        let raw = r#"[{"id":1,"question":"When working on a project, you prefer to:",
            "options":[{"text":"Work independently"},{"text":"Lead a team"}]}]"#;
        let questions: Vec<Question> = serde_json::from_str(raw).expect("decode");
        assert_eq!(questions[0].id, QuestionId(1));
        assert_eq!(questions[0].options[1].text, "Lead a team");
    }

    #[test]
    fn submit_response_prefers_top_level_personality_type() {
        let raw = r#"{"success":true,"personality_type":"Analyst",
            "results":{"name":"The Strategic Analyst","description":"d","strengths":["a"],
            "development_areas":[],"career_matches":["Data Scientist"]}}"#;
        let response: SubmitAssessmentResponse = serde_json::from_str(raw).expect("decode");
        assert_eq!(response.resolved_personality_type(), Some("Analyst"));

        let nested = r#"{"success":true,"results":{"personality_type":"Leader","name":"n"}}"#;
        let response: SubmitAssessmentResponse = serde_json::from_str(nested).expect("decode");
        assert_eq!(response.resolved_personality_type(), Some("Leader"));
    }

    #[test]
    fn chat_request_omits_unknown_personality_type() {
        let request = ChatRequest {
            session_id: SessionId::generate(),
            message: "hi".into(),
            personality_type: None,
            resume_data: String::new(),
        };
        let value = serde_json::to_value(&request).expect("encode");
        assert!(value.get("personality_type").is_none());
        assert_eq!(value["resume_data"], "");
    }
}

//! User-facing wording for failures, per initiating flow.

use crate::{error::ClientError, presenter::ProfileSectionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowContext {
    LoadAssessment,
    AnswerQuestion,
    SubmitAssessment,
    UploadResume,
    Login,
    Register,
    Logout,
    UpdateProfile,
    LoadProfile(ProfileSectionKind),
    Share,
}

impl FlowContext {
    fn prefix(self) -> String {
        match self {
            FlowContext::LoadAssessment => "Error loading assessment".into(),
            FlowContext::AnswerQuestion => "Could not record answer".into(),
            FlowContext::SubmitAssessment => "Error submitting assessment".into(),
            FlowContext::UploadResume => "Error uploading resume".into(),
            FlowContext::Login => "Login failed".into(),
            FlowContext::Register => "Registration failed".into(),
            FlowContext::Logout => "Logout failed".into(),
            FlowContext::UpdateProfile => "Failed to update profile".into(),
            FlowContext::LoadProfile(kind) => format!("Failed to load {}", kind.label()),
            FlowContext::Share => "Could not share results".into(),
        }
    }
}

/// Validation messages are already phrased for the user and pass through as-is.
pub fn user_message(context: FlowContext, err: &ClientError) -> String {
    match err {
        ClientError::Validation(validation) => validation.to_string(),
        other => format!("{}: {other}", context.prefix()),
    }
}

use shared::{
    domain::{SessionId, View},
    protocol::{PersonalityResults, UserRecord},
};

use crate::{assessment::AssessmentProgress, chat::ChatLog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentOutcome {
    pub personality_type: Option<String>,
    pub results: PersonalityResults,
}

/// Everything the controller remembers for one page load. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) session_id: SessionId,
    pub(crate) view: View,
    pub(crate) assessment: Option<AssessmentProgress>,
    pub(crate) outcome: Option<AssessmentOutcome>,
    pub(crate) chat: ChatLog,
    pub(crate) resume_text: Option<String>,
    pub(crate) user: Option<UserRecord>,
    pub(crate) authenticated: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session_id: SessionId::generate(),
            view: View::Home,
            assessment: None,
            outcome: None,
            chat: ChatLog::default(),
            resume_text: None,
            user: None,
            authenticated: false,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn assessment(&self) -> Option<&AssessmentProgress> {
        self.assessment.as_ref()
    }

    pub fn outcome(&self) -> Option<&AssessmentOutcome> {
        self.outcome.as_ref()
    }

    pub fn personality_type(&self) -> Option<&str> {
        let outcome = self.outcome.as_ref()?;
        outcome
            .personality_type
            .as_deref()
            .or(outcome.results.personality_type.as_deref())
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn resume_text(&self) -> Option<&str> {
        self.resume_text.as_deref()
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub(crate) fn sign_in(&mut self, user: UserRecord) {
        self.user = Some(user);
        self.authenticated = true;
    }

    pub(crate) fn sign_out(&mut self) {
        self.user = None;
        self.authenticated = false;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

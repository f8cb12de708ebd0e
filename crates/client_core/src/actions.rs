//! Declarative UI bindings. Front ends translate clicks and key presses into
//! a [`UiAction`] and hand it to [`SessionController::dispatch`]; option
//! buttons are keyed by index rather than carrying their own handlers.

use shared::domain::View;

use crate::{
    api::CareerApi, controller::SessionController, error::ClientError, presenter::Presenter,
    resume::ResumeFile, share::ShareTarget,
};

#[derive(Debug, Clone)]
pub enum UiAction {
    Navigate(View),
    StartAssessment,
    SelectOption(usize),
    NextQuestion,
    RetakeAssessment,
    StartChat,
    SendChat(String),
    UploadResume(ResumeFile),
    Login {
        email: String,
        password: String,
        remember: bool,
    },
    Register {
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    },
    Logout,
    LoadProfile,
    UpdateProfile {
        first_name: String,
        last_name: String,
    },
    Share(ShareTarget),
}

impl UiAction {
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::Navigate(_) => "navigate",
            UiAction::StartAssessment => "start_assessment",
            UiAction::SelectOption(_) => "select_option",
            UiAction::NextQuestion => "next_question",
            UiAction::RetakeAssessment => "retake_assessment",
            UiAction::StartChat => "start_chat",
            UiAction::SendChat(_) => "send_chat",
            UiAction::UploadResume(_) => "upload_resume",
            UiAction::Login { .. } => "login",
            UiAction::Register { .. } => "register",
            UiAction::Logout => "logout",
            UiAction::LoadProfile => "load_profile",
            UiAction::UpdateProfile { .. } => "update_profile",
            UiAction::Share(_) => "share",
        }
    }
}

impl<A: CareerApi, P: Presenter> SessionController<A, P> {
    /// Runs one action to completion. Failures have already been shown to the
    /// user by the time this returns; the error is passed back for logging.
    pub async fn dispatch(&mut self, action: UiAction) -> Result<(), ClientError> {
        tracing::debug!(action = action.name(), "dispatching ui action");
        match action {
            UiAction::Navigate(View::Chat) => self.start_chat(),
            UiAction::Navigate(View::Profile) => {
                self.load_profile().await;
            }
            UiAction::Navigate(view) => self.show_view(view),
            UiAction::StartAssessment => self.start_assessment().await?,
            UiAction::SelectOption(index) => self.select_option(index)?,
            UiAction::NextQuestion => self.advance().await?,
            UiAction::RetakeAssessment => {
                self.retake_assessment().await?;
            }
            UiAction::StartChat => self.start_chat(),
            UiAction::SendChat(message) => {
                self.send_chat(&message).await;
            }
            UiAction::UploadResume(file) => self.upload_resume(file).await?,
            UiAction::Login {
                email,
                password,
                remember,
            } => self.login(&email, &password, remember).await?,
            UiAction::Register {
                email,
                password,
                first_name,
                last_name,
            } => {
                self.register(&email, &password, &first_name, &last_name)
                    .await?
            }
            UiAction::Logout => self.logout().await?,
            UiAction::LoadProfile => {
                self.load_profile().await;
            }
            UiAction::UpdateProfile {
                first_name,
                last_name,
            } => self.update_profile(&first_name, &last_name).await?,
            UiAction::Share(target) => {
                self.share(target)?;
            }
        }
        Ok(())
    }
}

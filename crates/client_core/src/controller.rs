//! The session controller: turns user actions into API calls and API replies
//! into presenter updates. Every remote call handles its own failure and
//! leaves the UI ready for a manual retry.

use futures::{future::BoxFuture, stream::FuturesUnordered, FutureExt, StreamExt};
use shared::{
    domain::{ChatSender, View},
    protocol::{
        AssessmentHistoryResponse, ChatRequest, LoginRequest, ProfileResponse, RegisterRequest,
        ResumesResponse, SubmitAssessmentRequest, UpdateProfileRequest, UserRecord,
    },
};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{
    api::{CareerApi, Envelope},
    assessment::AssessmentProgress,
    chat::{ChatOutcome, CONNECTION_APOLOGY, REPLY_ERROR_APOLOGY},
    config::ClientSettings,
    error::{ClientError, ValidationError},
    feedback::{user_message, FlowContext},
    presenter::{Presenter, ProfileSection, ProfileSectionKind, QuestionView},
    resume::ResumeFile,
    share::{share_with, ShareOutcome, SharePayload, ShareTarget},
    state::{AssessmentOutcome, SessionState},
};

const RETAKE_PROMPT: &str =
    "Are you sure you want to retake the assessment? Your current results will be lost.";
const RESUME_UPLOADED: &str =
    "Resume uploaded successfully! I can now provide more personalized advice.";

/// Which profile containers rendered and which showed an inline error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileLoadReport {
    pub loaded: Vec<ProfileSectionKind>,
    pub failed: Vec<(ProfileSectionKind, String)>,
}

enum ProfileFetch {
    Profile(Result<ProfileResponse, ClientError>),
    LatestAssessment(Result<ProfileResponse, ClientError>),
    History(Result<AssessmentHistoryResponse, ClientError>),
    Resumes(Result<ResumesResponse, ClientError>),
}

pub struct SessionController<A: CareerApi, P: Presenter> {
    api: A,
    presenter: P,
    settings: ClientSettings,
    state: SessionState,
}

impl<A: CareerApi, P: Presenter> SessionController<A, P> {
    pub fn new(api: A, presenter: P, settings: ClientSettings) -> Self {
        Self {
            api,
            presenter,
            settings,
            state: SessionState::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Page-load entry point: home view, then the signed-in check.
    pub async fn initialize(&mut self) {
        info!(session_id = %self.state.session_id, "session: started");
        self.show_view(View::Home);
        self.presenter.set_auth_navigation(None);
        if let Err(err) = self.check_auth_status().await {
            debug!(error = %err, "session: continuing signed out");
        }
    }

    pub fn show_view(&mut self, view: View) {
        debug!(view = view.label(), "view: switching");
        self.state.view = view;
        self.presenter.show_view(view);
    }

    pub fn go_home(&mut self) {
        self.show_view(View::Home);
    }

    fn show_loading(&mut self, text: &str) {
        self.presenter.loading_modal().open(text);
    }

    fn hide_loading(&mut self) {
        let modal = self.presenter.loading_modal();
        if !modal.close() {
            debug!("loading modal had no live instance");
        }
        modal.force_close();
    }

    fn fail<T>(&mut self, context: FlowContext, err: ClientError) -> Result<T, ClientError> {
        let message = user_message(context, &err);
        warn!(?context, error = %err, "flow failed");
        self.presenter.alert(&message);
        Err(err)
    }

    // Assessment

    /// Fetches a fresh question batch. The wait is bounded by
    /// `question_timeout` on top of the HTTP client's own timeout.
    pub async fn start_assessment(&mut self) -> Result<(), ClientError> {
        self.show_loading("Loading assessment questions...");
        info!(session_id = %self.state.session_id, "assessment: fetching questions");

        let fetched = match timeout(self.settings.question_timeout, self.api.fetch_questions())
            .await
        {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout),
        };
        let run = fetched.and_then(|questions| {
            AssessmentProgress::begin(questions)
                .ok_or_else(|| ClientError::Api("No questions received from server".into()))
        });
        self.hide_loading();

        let run = match run {
            Ok(run) => run,
            Err(err) => return self.fail(FlowContext::LoadAssessment, err),
        };

        info!(questions = run.total(), "assessment: questions loaded");
        self.state.assessment = Some(run);
        self.state.outcome = None;
        self.show_view(View::Assessment);
        self.display_current().await
    }

    /// Renders the question at the current index, or submits once past the last one.
    pub async fn display_current(&mut self) -> Result<(), ClientError> {
        let Some(run) = self.state.assessment.as_ref() else {
            return Err(ValidationError::NoActiveQuestion.into());
        };
        if run.is_complete() {
            return self.submit().await;
        }

        if let Some(question) = run.current_question() {
            self.presenter.render_question(&QuestionView {
                prompt: &question.question,
                options: &question.options,
                progress: run.progress(),
            });
            match run.current_answer() {
                Some(answer) => {
                    self.presenter.mark_selected(answer.option_index);
                    self.presenter.set_next_enabled(true);
                }
                None => self.presenter.set_next_enabled(false),
            }
        }
        Ok(())
    }

    pub fn select_option(&mut self, option_index: usize) -> Result<(), ClientError> {
        let selected = match self.state.assessment.as_mut() {
            Some(run) => run.select(option_index),
            None => Err(ValidationError::NoActiveQuestion),
        };
        match selected {
            Ok(answer) => {
                debug!(
                    question_id = answer.question_id.0,
                    option_index, "assessment: option selected"
                );
                self.presenter.mark_selected(option_index);
                self.presenter.set_next_enabled(true);
                Ok(())
            }
            Err(err) => self.fail(FlowContext::AnswerQuestion, err.into()),
        }
    }

    /// Moves to the next question. Past the last question this retries the submission.
    pub async fn advance(&mut self) -> Result<(), ClientError> {
        let complete = self
            .state
            .assessment
            .as_ref()
            .is_some_and(AssessmentProgress::is_complete);
        if complete {
            return self.submit().await;
        }
        let advanced = match self.state.assessment.as_mut() {
            Some(run) => run.advance(),
            None => Err(ValidationError::NoActiveQuestion),
        };
        if let Err(err) = advanced {
            return self.fail(FlowContext::AnswerQuestion, err.into());
        }
        self.display_current().await
    }

    /// Posts every answer. On failure nothing about the run changes.
    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let answers = match self.state.assessment.as_ref() {
            Some(run) => run.submission(),
            None => Err(ValidationError::NoActiveQuestion),
        };
        let answers = match answers {
            Ok(answers) => answers,
            Err(err) => return self.fail(FlowContext::SubmitAssessment, err.into()),
        };

        let request = SubmitAssessmentRequest {
            session_id: self.state.session_id.clone(),
            answers,
        };
        self.show_loading("Analyzing your responses...");
        let submitted = self
            .api
            .submit_assessment(&request)
            .await
            .and_then(|response| response.require_success("Assessment failed"))
            .and_then(|response| {
                let personality_type = response.resolved_personality_type().map(str::to_string);
                response
                    .results
                    .map(|results| AssessmentOutcome {
                        personality_type,
                        results,
                    })
                    .ok_or_else(|| ClientError::Api("Assessment failed".into()))
            });
        self.hide_loading();

        let outcome = match submitted {
            Ok(outcome) => outcome,
            Err(err) => return self.fail(FlowContext::SubmitAssessment, err),
        };
        info!(
            personality_type = outcome.personality_type.as_deref().unwrap_or("unknown"),
            answers = request.answers.len(),
            "assessment: results received"
        );
        self.state.outcome = Some(outcome);
        self.show_results();
        Ok(())
    }

    fn show_results(&mut self) {
        if let Some(outcome) = self.state.outcome.as_ref() {
            self.presenter.render_results(&outcome.results);
        }
        self.show_view(View::Results);
        self.presenter.set_chat_link_visible(true);
    }

    /// Returns `Ok(false)` when the user declines the confirmation.
    pub async fn retake_assessment(&mut self) -> Result<bool, ClientError> {
        if !self.presenter.confirm(RETAKE_PROMPT) {
            return Ok(false);
        }
        self.start_assessment().await.map(|()| true)
    }

    // Chat

    pub fn start_chat(&mut self) {
        self.state.chat.clear();
        self.presenter.clear_chat();
        self.show_view(View::Chat);
    }

    /// Appends the user's line, then exactly one assistant line: the reply or an apology.
    pub async fn send_chat(&mut self, message: &str) -> ChatOutcome {
        let message = message.trim();
        if message.is_empty() {
            return ChatOutcome::Ignored;
        }

        let entry = self.state.chat.push(ChatSender::User, message);
        self.presenter.append_chat_entry(entry);
        self.state.chat.set_typing(true);
        self.presenter.set_typing_indicator(true);

        let request = ChatRequest {
            session_id: self.state.session_id.clone(),
            message: message.to_string(),
            personality_type: self.state.personality_type().map(str::to_string),
            resume_data: self.state.resume_text.clone().unwrap_or_default(),
        };
        let replied = self.api.chat(&request).await;

        self.state.chat.set_typing(false);
        self.presenter.set_typing_indicator(false);

        let (text, outcome) = match replied {
            Ok(response) => match response.require_success(REPLY_ERROR_APOLOGY) {
                Ok(response) => match response.response {
                    Some(reply) => (reply, ChatOutcome::Replied),
                    None => (REPLY_ERROR_APOLOGY.to_string(), ChatOutcome::Apologized),
                },
                Err(err) => {
                    warn!(error = %err, "chat: assistant reported failure");
                    (REPLY_ERROR_APOLOGY.to_string(), ChatOutcome::Apologized)
                }
            },
            Err(err) => {
                warn!(error = %err, "chat: request failed");
                (CONNECTION_APOLOGY.to_string(), ChatOutcome::Apologized)
            }
        };
        let entry = self.state.chat.push(ChatSender::Assistant, text);
        self.presenter.append_chat_entry(entry);
        outcome
    }

    // Resume

    /// Validates locally first; a rejected file never reaches the network.
    pub async fn upload_resume(&mut self, file: ResumeFile) -> Result<(), ClientError> {
        if let Err(err) = file.validate() {
            self.presenter.clear_resume_input();
            return self.fail(FlowContext::UploadResume, err.into());
        }

        self.show_loading("Uploading and analyzing resume...");
        let uploaded = self
            .api
            .upload_resume(&file)
            .await
            .and_then(|response| response.require_success("Upload failed"));
        self.hide_loading();

        match uploaded {
            Ok(response) => {
                info!(
                    filename = %file.filename,
                    size_bytes = file.bytes.len(),
                    "resume: uploaded"
                );
                self.state.resume_text = response.resume_text;
                self.presenter.alert(RESUME_UPLOADED);
                Ok(())
            }
            Err(err) => {
                self.presenter.clear_resume_input();
                self.fail(FlowContext::UploadResume, err)
            }
        }
    }

    // Authentication

    /// Refreshes the signed-in flag from the server. Failures count as signed out.
    pub async fn check_auth_status(&mut self) -> Result<bool, ClientError> {
        match self.api.user_status().await {
            Ok(status) => match (status.authenticated, status.user) {
                (true, Some(user)) => {
                    self.apply_sign_in(user);
                    Ok(true)
                }
                _ => {
                    self.apply_sign_out();
                    Ok(false)
                }
            },
            Err(err) => {
                warn!(error = %err, "auth: status check failed");
                self.apply_sign_out();
                Err(err)
            }
        }
    }

    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<(), ClientError> {
        let email = email.trim();
        if let Err(err) = require("Email", email).and_then(|()| require("Password", password)) {
            return self.fail(FlowContext::Login, err.into());
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            remember,
        };
        self.show_loading("Signing in...");
        let signed_in = self
            .api
            .login(&request)
            .await
            .and_then(|response| response.require_success("Invalid email or password"))
            .and_then(|response| {
                response
                    .user
                    .ok_or_else(|| ClientError::Api("server returned no account".into()))
            });
        self.hide_loading();

        match signed_in {
            Ok(user) => {
                info!(email = %user.email, "auth: signed in");
                self.apply_sign_in(user);
                Ok(())
            }
            Err(err) => self.fail(FlowContext::Login, err),
        }
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), ClientError> {
        let email = email.trim();
        if let Err(err) = require("Email", email).and_then(|()| require("Password", password)) {
            return self.fail(FlowContext::Register, err.into());
        }

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
        };
        self.show_loading("Creating your account...");
        let registered = self
            .api
            .register(&request)
            .await
            .and_then(|response| response.require_success("Registration was not accepted"))
            .and_then(|response| {
                response
                    .user
                    .ok_or_else(|| ClientError::Api("server returned no account".into()))
            });
        self.hide_loading();

        match registered {
            Ok(user) => {
                info!(email = %user.email, "auth: registered");
                self.apply_sign_in(user);
                Ok(())
            }
            Err(err) => self.fail(FlowContext::Register, err),
        }
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        match self.api.logout().await {
            Ok(()) => {
                info!("auth: signed out");
                self.apply_sign_out();
                self.show_view(View::Home);
                Ok(())
            }
            Err(err) => self.fail(FlowContext::Logout, err),
        }
    }

    fn apply_sign_in(&mut self, user: UserRecord) {
        self.presenter.set_auth_navigation(Some(&user));
        self.state.sign_in(user);
    }

    fn apply_sign_out(&mut self) {
        self.state.sign_out();
        self.presenter.set_auth_navigation(None);
    }

    // Profile

    /// Issues the four profile requests together and renders each container
    /// as its response lands. One failing container never blocks the others.
    pub async fn load_profile(&mut self) -> ProfileLoadReport {
        self.show_view(View::Profile);

        let api = &self.api;
        let mut pending: FuturesUnordered<BoxFuture<'_, ProfileFetch>> = FuturesUnordered::new();
        pending.push(async move { ProfileFetch::Profile(api.fetch_profile().await) }.boxed());
        pending.push(
            async move { ProfileFetch::LatestAssessment(api.fetch_profile().await) }.boxed(),
        );
        pending.push(async move { ProfileFetch::History(api.assessment_history().await) }.boxed());
        pending.push(async move { ProfileFetch::Resumes(api.resumes().await) }.boxed());

        let mut report = ProfileLoadReport::default();
        while let Some(fetch) = pending.next().await {
            match render_profile_fetch(&mut self.presenter, &mut self.state, fetch) {
                Ok(kind) => report.loaded.push(kind),
                Err((kind, err)) => {
                    let message = user_message(FlowContext::LoadProfile(kind), &err);
                    warn!(section = kind.label(), error = %err, "profile: section failed");
                    self.presenter.profile_section_failed(kind, &message);
                    report.failed.push((kind, message));
                }
            }
        }
        report
    }

    pub async fn update_profile(
        &mut self,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), ClientError> {
        let request = UpdateProfileRequest {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
        };
        let updated = self
            .api
            .update_profile(&request)
            .await
            .and_then(|response| response.require_success("Failed to update profile"))
            .and_then(|response| {
                response
                    .user
                    .ok_or_else(|| ClientError::Api("server returned no account".into()))
            });

        match updated {
            Ok(user) => {
                self.presenter
                    .render_profile_section(ProfileSection::Profile(&user));
                self.apply_sign_in(user);
                self.presenter.alert("Profile updated.");
                Ok(())
            }
            Err(err) => self.fail(FlowContext::UpdateProfile, err),
        }
    }

    // Sharing

    pub fn share(&mut self, target: ShareTarget) -> Result<ShareOutcome, ClientError> {
        let Some(results) = self.state.outcome.as_ref().map(|outcome| &outcome.results) else {
            return self.fail(FlowContext::Share, ValidationError::NoResultsToShare.into());
        };
        let payload = SharePayload::from_results(results, &self.settings.share_url);

        match share_with(self.presenter.share_platform(), target, &payload) {
            Ok(outcome) => {
                info!(%target, "share: done");
                if matches!(
                    outcome,
                    ShareOutcome::Copied | ShareOutcome::CopiedWithFallback
                ) {
                    self.presenter.alert("Results copied to clipboard!");
                }
                Ok(outcome)
            }
            Err(err) => self.fail(FlowContext::Share, ClientError::Platform(err)),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

fn render_profile_fetch<P: Presenter>(
    presenter: &mut P,
    state: &mut SessionState,
    fetch: ProfileFetch,
) -> Result<ProfileSectionKind, (ProfileSectionKind, ClientError)> {
    match fetch {
        ProfileFetch::Profile(result) => {
            let kind = ProfileSectionKind::Profile;
            let user = result
                .and_then(|response| response.require_success("Failed to load profile"))
                .and_then(|response| {
                    response
                        .user
                        .ok_or_else(|| ClientError::Api("server returned no account".into()))
                })
                .map_err(|err| (kind, err))?;
            presenter.render_profile_section(ProfileSection::Profile(&user));
            state.user = Some(user);
            Ok(kind)
        }
        ProfileFetch::LatestAssessment(result) => {
            let kind = ProfileSectionKind::LatestAssessment;
            let response = result
                .and_then(|response| response.require_success("Failed to load profile"))
                .map_err(|err| (kind, err))?;
            presenter.render_profile_section(ProfileSection::LatestAssessment {
                assessment: response.latest_assessment.as_ref(),
                results: response.personality_results.as_ref(),
            });
            Ok(kind)
        }
        ProfileFetch::History(result) => {
            let kind = ProfileSectionKind::History;
            let response = result
                .and_then(|response| response.require_success("Failed to load history"))
                .map_err(|err| (kind, err))?;
            presenter.render_profile_section(ProfileSection::History(&response.assessments));
            Ok(kind)
        }
        ProfileFetch::Resumes(result) => {
            let kind = ProfileSectionKind::Resumes;
            let response = result
                .and_then(|response| response.require_success("Failed to load resumes"))
                .map_err(|err| (kind, err))?;
            presenter.render_profile_section(ProfileSection::Resumes(&response.resumes));
            Ok(kind)
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

//! Seams to the presentation layer: views, dialogs, widgets.

use shared::{
    domain::View,
    protocol::{AssessmentRecord, PersonalityResults, QuestionOption, ResumeRecord, UserRecord},
};

use crate::{assessment::Progress, chat::ChatEntry, share::SharePlatform};

/// The blocking "loading" dialog. `close` asks the widget politely and reports
/// whether it had a live instance; `force_close` tears down whatever is left.
pub trait ModalController {
    fn open(&mut self, text: &str);
    fn close(&mut self) -> bool;
    fn force_close(&mut self);
}

#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    pub prompt: &'a str,
    pub options: &'a [QuestionOption],
    pub progress: Progress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileSectionKind {
    Profile,
    LatestAssessment,
    History,
    Resumes,
}

impl ProfileSectionKind {
    pub fn label(self) -> &'static str {
        match self {
            ProfileSectionKind::Profile => "profile",
            ProfileSectionKind::LatestAssessment => "latest assessment",
            ProfileSectionKind::History => "assessment history",
            ProfileSectionKind::Resumes => "resumes",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ProfileSection<'a> {
    Profile(&'a UserRecord),
    LatestAssessment {
        assessment: Option<&'a AssessmentRecord>,
        results: Option<&'a PersonalityResults>,
    },
    History(&'a [AssessmentRecord]),
    Resumes(&'a [ResumeRecord]),
}

impl ProfileSection<'_> {
    pub fn kind(&self) -> ProfileSectionKind {
        match self {
            ProfileSection::Profile(_) => ProfileSectionKind::Profile,
            ProfileSection::LatestAssessment { .. } => ProfileSectionKind::LatestAssessment,
            ProfileSection::History(_) => ProfileSectionKind::History,
            ProfileSection::Resumes(_) => ProfileSectionKind::Resumes,
        }
    }
}

pub trait Presenter {
    /// Hides every view, then reveals `view`.
    fn show_view(&mut self, view: View);
    fn loading_modal(&mut self) -> &mut dyn ModalController;
    fn share_platform(&mut self) -> &mut dyn SharePlatform;

    /// Blocking message dialog.
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;

    fn render_question(&mut self, question: &QuestionView<'_>);
    fn mark_selected(&mut self, option_index: usize);
    fn set_next_enabled(&mut self, enabled: bool);
    fn render_results(&mut self, results: &PersonalityResults);
    fn set_chat_link_visible(&mut self, visible: bool);

    fn clear_chat(&mut self);
    fn append_chat_entry(&mut self, entry: &ChatEntry);
    fn set_typing_indicator(&mut self, visible: bool);

    fn clear_resume_input(&mut self);

    /// `None` puts navigation in its signed-out configuration.
    fn set_auth_navigation(&mut self, user: Option<&UserRecord>);
    fn render_profile_section(&mut self, section: ProfileSection<'_>);
    fn profile_section_failed(&mut self, kind: ProfileSectionKind, message: &str);
}

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use arboard::Clipboard;
use client_core::{
    ChatEntry, ModalController, Presenter, ProfileSection, ProfileSectionKind, QuestionView,
    SharePayload, SharePlatform,
};
use shared::{
    domain::{ChatSender, View},
    protocol::{AssessmentRecord, PersonalityResults, UserRecord},
};

use crate::read_line;

#[derive(Default)]
pub struct TerminalModal {
    active: Option<String>,
}

impl ModalController for TerminalModal {
    fn open(&mut self, text: &str) {
        println!("... {text}");
        self.active = Some(text.to_string());
    }

    fn close(&mut self) -> bool {
        self.active.take().is_some()
    }

    fn force_close(&mut self) {
        self.active = None;
    }
}

/// Clipboard through arboard; links are printed for the user to open.
#[derive(Default)]
pub struct TerminalSharePlatform;

impl SharePlatform for TerminalSharePlatform {
    fn open_url(&mut self, url: &str) -> Result<()> {
        println!("Open this link to share your results:\n  {url}");
        Ok(())
    }

    fn supports_native_share(&self) -> bool {
        false
    }

    fn native_share(&mut self, _payload: &SharePayload) -> Result<()> {
        bail!("this terminal has no native share sheet")
    }

    fn write_clipboard(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("clipboard unavailable")?;
        clipboard
            .set_text(text.to_string())
            .context("clipboard write rejected")
    }

    fn legacy_copy(&mut self, text: &str) -> bool {
        println!("Copy the text below:\n{text}");
        true
    }
}

#[derive(Default)]
pub struct TerminalPresenter {
    modal: TerminalModal,
    platform: TerminalSharePlatform,
    signed_in_as: Option<String>,
    next_enabled: bool,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{title}:");
    for item in items {
        println!("  - {item}");
    }
}

fn print_assessment(record: &AssessmentRecord) {
    let when = record.completed_at.as_deref().unwrap_or("unknown date");
    let kind = record
        .results
        .as_ref()
        .map(|results| results.name.as_str())
        .filter(|name| !name.is_empty())
        .or(record.personality_type.as_deref())
        .unwrap_or("unknown type");
    println!("  {when}  {kind}");
}

impl Presenter for TerminalPresenter {
    fn show_view(&mut self, view: View) {
        println!("\n== {} ==", view.label());
    }

    fn loading_modal(&mut self) -> &mut dyn ModalController {
        &mut self.modal
    }

    fn share_platform(&mut self) -> &mut dyn SharePlatform {
        &mut self.platform
    }

    fn alert(&mut self, message: &str) {
        println!("! {message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        match tokio::task::block_in_place(read_line) {
            Ok(Some(answer)) => {
                matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
            }
            Ok(None) | Err(_) => false,
        }
    }

    fn render_question(&mut self, question: &QuestionView<'_>) {
        let progress = question.progress;
        println!(
            "Question {} of {} ({:.0}%)",
            progress.position,
            progress.total,
            progress.percent()
        );
        println!("{}", question.prompt);
        for (index, option) in question.options.iter().enumerate() {
            println!("  {}. {}", index + 1, option.text);
        }
    }

    fn mark_selected(&mut self, option_index: usize) {
        println!("Selected option {}.", option_index + 1);
    }

    fn set_next_enabled(&mut self, enabled: bool) {
        if enabled && !self.next_enabled {
            println!("Type `next` to continue.");
        }
        self.next_enabled = enabled;
    }

    fn render_results(&mut self, results: &PersonalityResults) {
        println!("{}", results.name);
        if !results.description.is_empty() {
            println!("{}", results.description);
        }
        print_list("Characteristics", &results.characteristics);
        print_list("Strengths", &results.strengths);
        print_list("Development areas", &results.development_areas);
        print_list("Career matches", &results.career_matches);
    }

    fn set_chat_link_visible(&mut self, visible: bool) {
        if visible {
            println!("Type `chat` to talk with the career advisor, or `share <target>`.");
        }
    }

    fn clear_chat(&mut self) {
        println!("Ask the advisor anything with `say <message>`.");
    }

    fn append_chat_entry(&mut self, entry: &ChatEntry) {
        let who = match entry.sender {
            ChatSender::User => "You",
            ChatSender::Assistant => "Advisor",
        };
        println!("[{}] {who}: {}", entry.timestamp.format("%H:%M"), entry.text);
    }

    fn set_typing_indicator(&mut self, visible: bool) {
        if visible {
            println!("Advisor is typing...");
        }
    }

    fn clear_resume_input(&mut self) {}

    fn set_auth_navigation(&mut self, user: Option<&UserRecord>) {
        let signed_in_as = user.map(|user| user.display_name().to_string());
        if signed_in_as == self.signed_in_as {
            return;
        }
        match &signed_in_as {
            Some(name) => println!("Signed in as {name}."),
            None => println!("Not signed in. Use `login` or `register` to save your results."),
        }
        self.signed_in_as = signed_in_as;
    }

    fn render_profile_section(&mut self, section: ProfileSection<'_>) {
        match section {
            ProfileSection::Profile(user) => {
                println!("Profile: {}", user.email);
                let first = user.first_name.as_deref().unwrap_or("");
                let last = user.last_name.as_deref().unwrap_or("");
                let name = format!("{first} {last}");
                if !name.trim().is_empty() {
                    println!("  Name: {}", name.trim());
                }
            }
            ProfileSection::LatestAssessment {
                assessment,
                results,
            } => match (assessment, results) {
                (Some(assessment), _) => {
                    println!("Latest assessment:");
                    print_assessment(assessment);
                }
                (None, Some(results)) => println!("Latest assessment: {}", results.name),
                (None, None) => println!("Latest assessment: none yet"),
            },
            ProfileSection::History(records) => {
                println!("Assessment history ({}):", records.len());
                records.iter().for_each(print_assessment);
            }
            ProfileSection::Resumes(resumes) => {
                println!("Resumes ({}):", resumes.len());
                for resume in resumes {
                    let marker = if resume.is_current { " (current)" } else { "" };
                    let when = resume.uploaded_at.as_deref().unwrap_or("unknown date");
                    println!("  {}  {when}{marker}", resume.filename);
                }
            }
        }
    }

    fn profile_section_failed(&mut self, kind: ProfileSectionKind, message: &str) {
        println!("[{}] {message}", kind.label());
    }
}

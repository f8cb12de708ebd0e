use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use client_core::{ShareTarget, UiAction};
use shared::domain::View;

pub const HELP: &str = "\
Commands:
  home                                  back to the landing view
  start                                 begin the assessment
  select <n>                            pick option n of the current question
  next                                  go to the next question (submits after the last)
  retake                                start over with fresh questions
  chat                                  open the career advisor chat
  say <text>                            send a chat message
  upload <path>                         upload a PDF, DOC or DOCX resume
  login <email> <password> [--no-remember]
  register <email> <password> <first> <last>
  logout
  profile                               load your profile, history and resumes
  rename <first> <last>                 update your profile name
  share <facebook|twitter|linkedin|whatsapp|email|native|clipboard>
  help
  quit";

#[derive(Debug)]
pub enum Command {
    Action(UiAction),
    Upload(PathBuf),
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "home" => Command::Action(UiAction::Navigate(View::Home)),
        "start" => Command::Action(UiAction::StartAssessment),
        "select" => {
            let [raw] = args.as_slice() else {
                bail!("usage: select <n>");
            };
            let position: usize = raw
                .parse()
                .map_err(|_| anyhow!("option must be a number, got {raw:?}"))?;
            if position == 0 {
                bail!("options are numbered from 1");
            }
            Command::Action(UiAction::SelectOption(position - 1))
        }
        "next" => Command::Action(UiAction::NextQuestion),
        "retake" => Command::Action(UiAction::RetakeAssessment),
        "chat" => Command::Action(UiAction::StartChat),
        "say" => Command::Action(UiAction::SendChat(rest.to_string())),
        "upload" => {
            if rest.is_empty() {
                bail!("usage: upload <path>");
            }
            Command::Upload(PathBuf::from(rest))
        }
        "login" => match args.as_slice() {
            [email, password] => Command::Action(UiAction::Login {
                email: email.to_string(),
                password: password.to_string(),
                remember: true,
            }),
            [email, password, "--no-remember"] => Command::Action(UiAction::Login {
                email: email.to_string(),
                password: password.to_string(),
                remember: false,
            }),
            _ => bail!("usage: login <email> <password> [--no-remember]"),
        },
        "register" => {
            let [email, password, first_name, last_name] = args.as_slice() else {
                bail!("usage: register <email> <password> <first> <last>");
            };
            Command::Action(UiAction::Register {
                email: email.to_string(),
                password: password.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })
        }
        "logout" => Command::Action(UiAction::Logout),
        "profile" => Command::Action(UiAction::LoadProfile),
        "rename" => {
            let [first_name, last_name] = args.as_slice() else {
                bail!("usage: rename <first> <last>");
            };
            Command::Action(UiAction::UpdateProfile {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })
        }
        "share" => {
            let [raw] = args.as_slice() else {
                bail!("usage: share <target>");
            };
            let target =
                ShareTarget::parse(raw).ok_or_else(|| anyhow!("unknown share target {raw:?}"))?;
            Command::Action(UiAction::Share(target))
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {other:?}; type `help` for the list"),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(line: &str) -> UiAction {
        match parse(line).expect("parse").expect("command") {
            Command::Action(action) => action,
            other => panic!("expected an action, got {other:?}"),
        }
    }

    #[test]
    fn select_is_one_based() {
        assert!(matches!(action("select 3"), UiAction::SelectOption(2)));
        assert!(parse("select 0").is_err());
        assert!(parse("select two").is_err());
        assert!(parse("select").is_err());
    }

    #[test]
    fn say_keeps_the_whole_message() {
        match action("say   what jobs suit an analyst?") {
            UiAction::SendChat(text) => assert_eq!(text, "what jobs suit an analyst?"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn login_defaults_to_remember() {
        assert!(matches!(
            action("login ada@example.com secret"),
            UiAction::Login { remember: true, .. }
        ));
        assert!(matches!(
            action("login ada@example.com secret --no-remember"),
            UiAction::Login { remember: false, .. }
        ));
        assert!(parse("login ada@example.com").is_err());
    }

    #[test]
    fn upload_accepts_paths_with_spaces() {
        match parse("upload /tmp/my resume.pdf").expect("parse") {
            Some(Command::Upload(path)) => assert_eq!(path, PathBuf::from("/tmp/my resume.pdf")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn share_targets_and_control_words() {
        assert!(matches!(
            action("share x"),
            UiAction::Share(ShareTarget::Twitter)
        ));
        assert!(parse("share myspace").is_err());
        assert!(matches!(parse("QUIT"), Ok(Some(Command::Quit))));
        assert!(matches!(parse("   "), Ok(None)));
        assert!(parse("dance").is_err());
    }
}

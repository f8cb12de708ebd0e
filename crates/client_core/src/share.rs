//! Share links and text for third-party platforms. Nothing here talks to the API.

use std::fmt;

use anyhow::Result;
use shared::protocol::PersonalityResults;
use url::form_urlencoded::byte_serialize;

const TOP_CAREER_MATCHES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareTarget {
    Facebook,
    Twitter,
    LinkedIn,
    WhatsApp,
    Email,
    Clipboard,
    Native,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 7] = [
        ShareTarget::Facebook,
        ShareTarget::Twitter,
        ShareTarget::LinkedIn,
        ShareTarget::WhatsApp,
        ShareTarget::Email,
        ShareTarget::Clipboard,
        ShareTarget::Native,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "facebook" | "fb" => Some(ShareTarget::Facebook),
            "twitter" | "x" => Some(ShareTarget::Twitter),
            "linkedin" => Some(ShareTarget::LinkedIn),
            "whatsapp" => Some(ShareTarget::WhatsApp),
            "email" | "mail" => Some(ShareTarget::Email),
            "clipboard" | "copy" => Some(ShareTarget::Clipboard),
            "native" => Some(ShareTarget::Native),
            _ => None,
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShareTarget::Facebook => "facebook",
            ShareTarget::Twitter => "twitter",
            ShareTarget::LinkedIn => "linkedin",
            ShareTarget::WhatsApp => "whatsapp",
            ShareTarget::Email => "email",
            ShareTarget::Clipboard => "clipboard",
            ShareTarget::Native => "native",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn from_results(results: &PersonalityResults, share_url: &str) -> Self {
        let mut text = format!("I just discovered my career personality: {}!", results.name);
        let matches: Vec<&str> = results
            .career_matches
            .iter()
            .take(TOP_CAREER_MATCHES)
            .map(String::as_str)
            .collect();
        if !matches.is_empty() {
            text.push_str(&format!(" Top career matches: {}.", matches.join(", ")));
        }
        text.push_str(" Find yours:");

        Self {
            title: format!("My Career Personality: {}", results.name),
            text,
            url: share_url.to_string(),
        }
    }

    /// Text placed on the clipboard: message and link together.
    pub fn clipboard_text(&self) -> String {
        format!("{} {}", self.text, self.url)
    }
}

fn encode(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect::<String>().replace('+', "%20")
}

/// Link for the URL-based targets; `None` for clipboard and native share.
pub fn share_link(target: ShareTarget, payload: &SharePayload) -> Option<String> {
    let url = encode(&payload.url);
    match target {
        ShareTarget::Facebook => Some(format!(
            "https://www.facebook.com/sharer/sharer.php?u={url}"
        )),
        ShareTarget::Twitter => Some(format!(
            "https://twitter.com/intent/tweet?text={}&url={url}",
            encode(&payload.text)
        )),
        ShareTarget::LinkedIn => Some(format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={url}"
        )),
        ShareTarget::WhatsApp => Some(format!(
            "https://wa.me/?text={}",
            encode(&payload.clipboard_text())
        )),
        ShareTarget::Email => Some(format!(
            "mailto:?subject={}&body={}",
            encode(&payload.title),
            encode(&format!("{}\n\n{}", payload.text, payload.url))
        )),
        ShareTarget::Clipboard | ShareTarget::Native => None,
    }
}

/// Platform capabilities the share flow needs from whatever hosts the UI.
pub trait SharePlatform {
    fn open_url(&mut self, url: &str) -> Result<()>;
    fn supports_native_share(&self) -> bool;
    fn native_share(&mut self, payload: &SharePayload) -> Result<()>;
    fn write_clipboard(&mut self, text: &str) -> Result<()>;
    /// Selection-based copy used when the clipboard API is unavailable.
    fn legacy_copy(&mut self, text: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Opened(String),
    NativeShared,
    Copied,
    CopiedWithFallback,
}

pub fn share_with(
    platform: &mut dyn SharePlatform,
    target: ShareTarget,
    payload: &SharePayload,
) -> Result<ShareOutcome> {
    if let Some(link) = share_link(target, payload) {
        platform.open_url(&link)?;
        return Ok(ShareOutcome::Opened(link));
    }

    if target == ShareTarget::Native && platform.supports_native_share() {
        platform.native_share(payload)?;
        return Ok(ShareOutcome::NativeShared);
    }

    let text = payload.clipboard_text();
    match platform.write_clipboard(&text) {
        Ok(()) => Ok(ShareOutcome::Copied),
        Err(err) => {
            tracing::warn!(error = %err, "clipboard write failed; falling back to legacy copy");
            if platform.legacy_copy(&text) {
                Ok(ShareOutcome::CopiedWithFallback)
            } else {
                Err(err.context("could not copy share text"))
            }
        }
    }
}

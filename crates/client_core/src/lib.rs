//! Client session controller for the career assessment service: assessment
//! flow, assistant chat, resume upload, accounts, profile and sharing, over
//! the service's JSON API.

pub mod actions;
pub mod api;
pub mod assessment;
pub mod chat;
pub mod config;
pub mod controller;
pub mod error;
pub mod feedback;
pub mod presenter;
pub mod resume;
pub mod share;
pub mod state;

pub use actions::UiAction;
pub use api::{CareerApi, Envelope, HttpApi};
pub use chat::{ChatEntry, ChatLog, ChatOutcome};
pub use config::{load_settings, ClientSettings};
pub use controller::{ProfileLoadReport, SessionController};
pub use error::{ClientError, ValidationError};
pub use presenter::{ModalController, Presenter, ProfileSection, ProfileSectionKind, QuestionView};
pub use resume::ResumeFile;
pub use share::{ShareOutcome, SharePayload, SharePlatform, ShareTarget};
pub use state::{AssessmentOutcome, SessionState};

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use serde::de::DeserializeOwned;
use shared::{
    error::ApiErrorBody,
    protocol::{
        AssessmentHistoryResponse, AuthResponse, ChatRequest, ChatResponse, LoginRequest,
        ProfileResponse, Question, RegisterRequest, ResumesResponse, SubmitAssessmentRequest,
        SubmitAssessmentResponse, UpdateProfileRequest, UploadResumeResponse, UserStatusResponse,
    },
};
use tracing::debug;

use crate::{config::ClientSettings, error::ClientError, resume::ResumeFile};

/// The remote assessment/chat service, one method per endpoint.
///
/// Implementations only report transport and HTTP failures; `success: false`
/// bodies come back as `Ok` and are judged by the caller through [`Envelope`].
#[async_trait]
pub trait CareerApi: Send + Sync {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ClientError>;
    async fn submit_assessment(
        &self,
        request: &SubmitAssessmentRequest,
    ) -> Result<SubmitAssessmentResponse, ClientError>;
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;
    async fn upload_resume(&self, file: &ResumeFile) -> Result<UploadResumeResponse, ClientError>;
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError>;
    async fn logout(&self) -> Result<(), ClientError>;
    async fn user_status(&self) -> Result<UserStatusResponse, ClientError>;
    async fn fetch_profile(&self) -> Result<ProfileResponse, ClientError>;
    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<ProfileResponse, ClientError>;
    async fn assessment_history(&self) -> Result<AssessmentHistoryResponse, ClientError>;
    async fn resumes(&self) -> Result<ResumesResponse, ClientError>;
}

/// Responses that carry an application-level `success` flag.
pub trait Envelope {
    fn succeeded(&self) -> bool;
    fn error_text(&self) -> Option<&str>;

    /// Turns a `success: false` body into [`ClientError::Api`].
    fn require_success(self, fallback: &str) -> Result<Self, ClientError>
    where
        Self: Sized,
    {
        if self.succeeded() {
            return Ok(self);
        }
        let message = self
            .error_text()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback)
            .to_string();
        Err(ClientError::Api(message))
    }
}

macro_rules! envelope {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Envelope for $ty {
                fn succeeded(&self) -> bool {
                    self.success
                }

                fn error_text(&self) -> Option<&str> {
                    self.error.as_deref()
                }
            }
        )+
    };
}

envelope!(
    SubmitAssessmentResponse,
    ChatResponse,
    UploadResumeResponse,
    AuthResponse,
    ProfileResponse,
    AssessmentHistoryResponse,
    ResumesResponse,
);

pub struct HttpApi {
    http: Client,
    base_url: String,
}

impl HttpApi {
    /// Cookies persist across calls so login state rides along like a browser session.
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let message = ApiErrorBody::parse(&body)
                .and_then(|parsed| parsed.message().map(str::to_string));
            debug!(status = status.as_u16(), ?message, "api: non-success status");
            return Err(ClientError::Http { status, message });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CareerApi for HttpApi {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ClientError> {
        let response = self.http.get(self.endpoint("questions")).send().await?;
        Self::decode(response).await
    }

    async fn submit_assessment(
        &self,
        request: &SubmitAssessmentRequest,
    ) -> Result<SubmitAssessmentResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint("submit-assessment"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint("chat"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn upload_resume(&self, file: &ResumeFile) -> Result<UploadResumeResponse, ClientError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.mime_type)?;
        let response = self
            .http
            .post(self.endpoint("upload-resume"))
            .multipart(Form::new().part("file", part))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint("login"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint("register"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.endpoint("logout")).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await?;
        let message =
            ApiErrorBody::parse(&body).and_then(|parsed| parsed.message().map(str::to_string));
        Err(ClientError::Http { status, message })
    }

    async fn user_status(&self) -> Result<UserStatusResponse, ClientError> {
        let response = self.http.get(self.endpoint("user/status")).send().await?;
        Self::decode(response).await
    }

    async fn fetch_profile(&self) -> Result<ProfileResponse, ClientError> {
        let response = self.http.get(self.endpoint("user/profile")).send().await?;
        Self::decode(response).await
    }

    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<ProfileResponse, ClientError> {
        let response = self
            .http
            .put(self.endpoint("user/profile"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn assessment_history(&self) -> Result<AssessmentHistoryResponse, ClientError> {
        let response = self
            .http
            .get(self.endpoint("user/assessment-history"))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn resumes(&self) -> Result<ResumesResponse, ClientError> {
        let response = self.http.get(self.endpoint("user/resumes")).send().await?;
        Self::decode(response).await
    }
}

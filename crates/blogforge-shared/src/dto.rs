//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "repeatPassword")]
    pub repeat_password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Account-flow outcome. Failures in these flows are deliberate HTTP-200
/// responses carrying an inline message, mirroring a re-rendered form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AccountResponse {
    pub fn ok(user: UserResponse) -> Self {
        Self {
            ok: true,
            user: Some(user),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            user: None,
            error: Some(message.into()),
        }
    }
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Request to generate a blog post. Either `transcript` or `link` must be
/// present; `title` is always optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateBlogRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// A freshly generated blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateBlogResponse {
    pub title: String,
    pub content: String,
}

/// A persisted blog post, as returned by list and detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostResponse {
    pub id: String,
    pub title: String,
    pub source_link: String,
    pub content: String,
    pub created_at: String,
}

/// Bootstrap payload for the compose view: which transcript strategy is
/// active and whether the upstream clients are configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeInfoResponse {
    pub transcript_strategy: String,
    pub generator_ready: bool,
    pub metadata_ready: bool,
}

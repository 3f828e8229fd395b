//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user. Registration never issues a session;
/// the client logs in separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub fullname: String,
    pub email: String,
    pub tel: String,
    pub password: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public profile of a user (the password hash never leaves the server).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub tel: String,
    pub role: String,
    pub profile_image: Option<String>,
    pub created_at: String,
}

/// Login response: the session token plus a denormalized profile snapshot
/// for client display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub tel: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Request to create a post. The owner is taken from the session, never
/// from the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Partial post update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Query parameters accepted by the post listing endpoint.
/// `order_by=post_date` sorts newest-first; anything else oldest-first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub order_by: Option<String>,
}

/// Request to append a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// Post owner (or comment author) snapshot embedded in post responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerResponse {
    pub id: String,
    pub fullname: String,
    pub role: String,
    pub profile_image: Option<String>,
}

/// A comment with its author snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub text: String,
    pub owner: OwnerResponse,
    pub created_at: String,
}

/// A post composed for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub tag: Option<String>,
    pub owner: OwnerResponse,
    pub comments: Vec<CommentResponse>,
    pub likes: Vec<String>,
    pub like_count: u64,
    pub created_at: String,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub like_count: u64,
}

/// Result of a media upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

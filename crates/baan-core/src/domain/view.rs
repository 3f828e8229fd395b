//! Read models - posts composed with their owner profile, comments and
//! liker set on the way out of storage.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Post, Role, User};

/// Public profile fields denormalized into post responses for display.
/// Never treated as the source of truth for the user.
#[derive(Debug, Clone)]
pub struct OwnerProfile {
    pub id: Uuid,
    pub fullname: String,
    pub role: Role,
    pub profile_image: Option<String>,
}

impl From<&User> for OwnerProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname.clone(),
            role: user.role,
            profile_image: user.profile_image.clone(),
        }
    }
}

/// A comment together with its author's profile.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub id: Uuid,
    pub text: String,
    pub owner: OwnerProfile,
    pub created_at: DateTime<Utc>,
}

/// A post composed with its owner profile, ordered comments and liker set.
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub owner: OwnerProfile,
    pub comments: Vec<CommentView>,
    pub likes: Vec<Uuid>,
}

impl PostView {
    /// The like count is always derived from the liker set at read time;
    /// no counter is stored anywhere else.
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn liked_by(&self, user_id: Uuid) -> bool {
        self.likes.contains(&user_id)
    }
}

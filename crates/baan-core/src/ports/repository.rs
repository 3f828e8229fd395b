use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, PostChanges, PostFilter, PostView, ProfileChanges, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Exact, case-sensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Apply a partial profile update and return the stored user.
    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> Result<User, RepoError>;
}

/// Post repository. Read methods return posts composed with their owner
/// profile, comments and liker set.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Compose a single post for display.
    async fn find_view(&self, id: Uuid) -> Result<Option<PostView>, RepoError>;

    /// Filtered, ordered listing.
    async fn search(&self, filter: PostFilter) -> Result<Vec<PostView>, RepoError>;

    /// Posts owned by `owner_id`, newest first.
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<PostView>, RepoError>;

    /// Posts whose liker set contains `user_id`, newest first.
    async fn find_liked_by(&self, user_id: Uuid) -> Result<Vec<PostView>, RepoError>;

    /// Posts carrying at least one comment by `user_id`, newest first.
    async fn find_commented_by(&self, user_id: Uuid) -> Result<Vec<PostView>, RepoError>;

    /// Apply a partial update and return the stored post.
    async fn update_post(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError>;

    /// Atomically flip `user_id`'s membership in the post's liker set and
    /// return the new like count.
    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<u64, RepoError>;

    /// Append a comment.
    async fn add_comment(&self, comment: Comment) -> Result<Comment, RepoError>;
}

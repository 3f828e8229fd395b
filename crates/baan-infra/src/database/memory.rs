//! In-memory repositories - the fallback when no database is configured,
//! and the storage backing handler-level tests. Data is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use baan_core::domain::{
    Comment, CommentView, OwnerProfile, Post, PostChanges, PostFilter, PostOrder, PostView,
    ProfileChanges, User,
};
use baan_core::error::RepoError;
use baan_core::ports::{BaseRepository, PostRepository, UserRepository};

/// In-memory user store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        // Mirrors the unique index on email.
        if users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(RepoError::NotFound)?;

        if let Some(fullname) = changes.fullname {
            user.fullname = fullname;
        }
        if let Some(tel) = changes.tel {
            user.tel = tel;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        if let Some(image) = changes.profile_image {
            user.profile_image = Some(image);
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}

/// In-memory post store. Comments and likes live in separate collections,
/// mirroring the child tables of the Postgres layout.
pub struct InMemoryPostRepository {
    users: Arc<InMemoryUserRepository>,
    posts: RwLock<HashMap<Uuid, Post>>,
    comments: RwLock<Vec<Comment>>,
    likes: RwLock<Vec<(Uuid, Uuid)>>,
}

impl InMemoryPostRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            users,
            posts: RwLock::new(HashMap::new()),
            comments: RwLock::new(Vec::new()),
            likes: RwLock::new(Vec::new()),
        }
    }

    async fn owner_profile(&self, id: Uuid) -> Result<OwnerProfile, RepoError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Query(format!("owner {id} missing")))?;
        Ok(OwnerProfile::from(&user))
    }

    async fn compose(&self, posts: Vec<Post>) -> Result<Vec<PostView>, RepoError> {
        let comments = self.comments.read().await;
        let likes = self.likes.read().await;

        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            let owner = self.owner_profile(post.owner_id).await?;

            let mut comment_views = Vec::new();
            for c in comments.iter().filter(|c| c.post_id == post.id) {
                let owner = self.owner_profile(c.owner_id).await?;
                comment_views.push(CommentView {
                    id: c.id,
                    text: c.text.clone(),
                    owner,
                    created_at: c.created_at,
                });
            }

            let post_likes = likes
                .iter()
                .filter(|(post_id, _)| *post_id == post.id)
                .map(|(_, user_id)| *user_id)
                .collect();

            views.push(PostView {
                post,
                owner,
                comments: comment_views,
                likes: post_likes,
            });
        }

        Ok(views)
    }

    async fn newest_first(&self, mut posts: Vec<Post>) -> Result<Vec<PostView>, RepoError> {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.compose(posts).await
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .ok_or(RepoError::NotFound)?;

        // Children cascade like the foreign keys do.
        self.comments.write().await.retain(|c| c.post_id != id);
        self.likes.write().await.retain(|(post_id, _)| *post_id != id);

        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_view(&self, id: Uuid) -> Result<Option<PostView>, RepoError> {
        let Some(post) = self.posts.read().await.get(&id).cloned() else {
            return Ok(None);
        };

        let mut views = self.compose(vec![post]).await?;
        Ok(views.pop())
    }

    async fn search(&self, filter: PostFilter) -> Result<Vec<PostView>, RepoError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();

        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            posts.retain(|p| p.title.to_lowercase().contains(&needle));
        }
        if let Some(tag) = &filter.tag {
            posts.retain(|p| p.has_tag(tag));
        }

        match filter.order {
            PostOrder::NewestFirst => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            PostOrder::OldestFirst => posts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }

        self.compose(posts).await
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<PostView>, RepoError> {
        let posts = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();

        self.newest_first(posts).await
    }

    async fn find_liked_by(&self, user_id: Uuid) -> Result<Vec<PostView>, RepoError> {
        let liked: Vec<Uuid> = self
            .likes
            .read()
            .await
            .iter()
            .filter(|(_, liker)| *liker == user_id)
            .map(|(post_id, _)| *post_id)
            .collect();

        let posts = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| liked.contains(&p.id))
            .cloned()
            .collect();

        self.newest_first(posts).await
    }

    async fn find_commented_by(&self, user_id: Uuid) -> Result<Vec<PostView>, RepoError> {
        let commented: Vec<Uuid> = self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.owner_id == user_id)
            .map(|c| c.post_id)
            .collect();

        let posts = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| commented.contains(&p.id))
            .cloned()
            .collect();

        self.newest_first(posts).await
    }

    async fn update_post(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(tag) = changes.tag {
            post.tag = Some(tag);
        }
        if let Some(image) = changes.image {
            post.image = Some(image);
        }
        post.updated_at = Utc::now();

        Ok(post.clone())
    }

    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<u64, RepoError> {
        let mut likes = self.likes.write().await;

        if let Some(pos) = likes
            .iter()
            .position(|(p, u)| *p == post_id && *u == user_id)
        {
            likes.remove(pos);
        } else {
            likes.push((post_id, user_id));
        }

        Ok(likes.iter().filter(|(p, _)| *p == post_id).count() as u64)
    }

    async fn add_comment(&self, new_comment: Comment) -> Result<Comment, RepoError> {
        self.comments.write().await.push(new_comment.clone());
        Ok(new_comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repos() -> (Arc<InMemoryUserRepository>, InMemoryPostRepository) {
        let users = Arc::new(InMemoryUserRepository::new());
        let posts = InMemoryPostRepository::new(users.clone());
        (users, posts)
    }

    async fn seed_user(users: &InMemoryUserRepository, email: &str) -> User {
        users
            .insert(User::new(
                "Somchai Jaidee".to_string(),
                email.to_string(),
                "0812345678".to_string(),
                "hash".to_string(),
                None,
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (users, _) = repos().await;
        seed_user(&users, "a@example.com").await;

        let result = users
            .insert(User::new(
                "Someone Else".to_string(),
                "a@example.com".to_string(),
                "0899999999".to_string(),
                "hash2".to_string(),
                None,
            ))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn update_profile_leaves_absent_fields_unchanged() {
        let (users, _) = repos().await;
        let user = seed_user(&users, "a@example.com").await;

        let updated = users
            .update_profile(
                user.id,
                ProfileChanges {
                    tel: Some("0800000000".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.tel, "0800000000");
        assert_eq!(updated.fullname, "Somchai Jaidee");
        assert_eq!(updated.email, "a@example.com");
    }

    #[tokio::test]
    async fn toggle_like_twice_restores_original_count() {
        let (users, posts) = repos().await;
        let owner = seed_user(&users, "owner@example.com").await;
        let liker = seed_user(&users, "liker@example.com").await;

        let post = posts
            .insert(Post::new(
                owner.id,
                "Sport News Today".to_string(),
                "content".to_string(),
                None,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(posts.toggle_like(post.id, liker.id).await.unwrap(), 1);
        assert_eq!(posts.toggle_like(post.id, liker.id).await.unwrap(), 0);

        let view = posts.find_view(post.id).await.unwrap().unwrap();
        assert_eq!(view.like_count(), 0);
        assert!(!view.liked_by(liker.id));
    }

    #[tokio::test]
    async fn comments_stay_in_append_order() {
        let (users, posts) = repos().await;
        let owner = seed_user(&users, "owner@example.com").await;

        let post = posts
            .insert(Post::new(
                owner.id,
                "title".to_string(),
                "content".to_string(),
                None,
                None,
            ))
            .await
            .unwrap();

        for text in ["first", "second", "third"] {
            posts
                .add_comment(Comment::new(post.id, owner.id, text.to_string()))
                .await
                .unwrap();
        }

        let view = posts.find_view(post.id).await.unwrap().unwrap();
        let texts: Vec<&str> = view.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn search_matches_title_case_insensitively() {
        let (users, posts) = repos().await;
        let owner = seed_user(&users, "owner@example.com").await;

        for title in ["Sport News Today", "Music Awards"] {
            posts
                .insert(Post::new(
                    owner.id,
                    title.to_string(),
                    "content".to_string(),
                    None,
                    None,
                ))
                .await
                .unwrap();
        }

        let views = posts
            .search(PostFilter {
                search: Some("sport".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].post.title, "Sport News Today");
    }

    #[tokio::test]
    async fn tag_filter_matches_comma_split_list_exactly() {
        let (users, posts) = repos().await;
        let owner = seed_user(&users, "owner@example.com").await;

        posts
            .insert(Post::new(
                owner.id,
                "title".to_string(),
                "content".to_string(),
                Some("news,sport".to_string()),
                None,
            ))
            .await
            .unwrap();

        let by_tag = |tag: &str| PostFilter {
            tag: Some(tag.to_string()),
            ..Default::default()
        };

        assert_eq!(posts.search(by_tag("sport")).await.unwrap().len(), 1);
        assert_eq!(posts.search(by_tag("spo")).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn delete_cascades_to_comments_and_likes() {
        let (users, posts) = repos().await;
        let owner = seed_user(&users, "owner@example.com").await;

        let post = posts
            .insert(Post::new(
                owner.id,
                "title".to_string(),
                "content".to_string(),
                None,
                None,
            ))
            .await
            .unwrap();

        posts
            .add_comment(Comment::new(post.id, owner.id, "hello".to_string()))
            .await
            .unwrap();
        posts.toggle_like(post.id, owner.id).await.unwrap();

        posts.delete(post.id).await.unwrap();

        assert!(posts.find_view(post.id).await.unwrap().is_none());
        assert!(posts.comments.read().await.is_empty());
        assert!(posts.likes.read().await.is_empty());
    }
}

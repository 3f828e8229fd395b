//! PostgreSQL repository implementations.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use baan_core::domain::{
    Comment, CommentView, OwnerProfile, Post, PostChanges, PostFilter, PostOrder, PostView,
    ProfileChanges, User,
};
use baan_core::error::RepoError;
use baan_core::ports::{PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_like::{self, Entity as LikeEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let masked_local = if local.len() > 1 {
            format!("{}***", &local[..1])
        } else {
            "***".to_string()
        };
        format!("{}{}", masked_local, domain)
    } else {
        "***".to_string()
    }
}

/// Escape LIKE metacharacters so a search needle matches literally.
fn like_escape(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> Result<User, RepoError> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.into_active_model();
        if let Some(fullname) = changes.fullname {
            active.fullname = Set(fullname);
        }
        if let Some(tel) = changes.tel {
            active.tel = Set(tel);
        }
        if let Some(hash) = changes.password_hash {
            active.password_hash = Set(hash);
        }
        if let Some(image) = changes.profile_image {
            active.profile_image = Set(Some(image));
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_view(&self, id: Uuid) -> Result<Option<PostView>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut views = self.compose_views(vec![model]).await?;
        Ok(views.pop())
    }

    async fn search(&self, filter: PostFilter) -> Result<Vec<PostView>, RepoError> {
        let mut query = PostEntity::find();

        if let Some(search) = &filter.search {
            query = query.filter(
                Expr::col(post::Column::Title).ilike(format!("%{}%", like_escape(search))),
            );
        }

        query = match filter.order {
            PostOrder::NewestFirst => query.order_by_desc(post::Column::CreatedAt),
            PostOrder::OldestFirst => query.order_by_asc(post::Column::CreatedAt),
        };

        let models = query
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut views = self.compose_views(models).await?;

        // Tag matching runs against the comma-split tag list, which a SQL
        // LIKE cannot express exactly; filter the candidates here instead.
        if let Some(tag) = &filter.tag {
            views.retain(|v| v.post.has_tag(tag));
        }

        Ok(views)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<PostView>, RepoError> {
        let models = PostEntity::find()
            .filter(post::Column::OwnerId.eq(owner_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        self.compose_views(models).await
    }

    async fn find_liked_by(&self, user_id: Uuid) -> Result<Vec<PostView>, RepoError> {
        let liked: Vec<Uuid> = LikeEntity::find()
            .filter(post_like::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .into_iter()
            .map(|like| like.post_id)
            .collect();

        if liked.is_empty() {
            return Ok(Vec::new());
        }

        let models = PostEntity::find()
            .filter(post::Column::Id.is_in(liked))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        self.compose_views(models).await
    }

    async fn find_commented_by(&self, user_id: Uuid) -> Result<Vec<PostView>, RepoError> {
        let commented: HashSet<Uuid> = CommentEntity::find()
            .filter(comment::Column::OwnerId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .into_iter()
            .map(|c| c.post_id)
            .collect();

        if commented.is_empty() {
            return Ok(Vec::new());
        }

        let models = PostEntity::find()
            .filter(post::Column::Id.is_in(commented))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        self.compose_views(models).await
    }

    async fn update_post(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }
        if let Some(tag) = changes.tag {
            active.tag = Set(Some(tag));
        }
        if let Some(image) = changes.image {
            active.image = Set(Some(image));
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<u64, RepoError> {
        let removed = LikeEntity::delete_many()
            .filter(post_like::Column::PostId.eq(post_id))
            .filter(post_like::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if removed.rows_affected == 0 {
            let like = post_like::ActiveModel {
                post_id: Set(post_id),
                user_id: Set(user_id),
                created_at: Set(Utc::now().into()),
            };

            // A concurrent toggle may insert the row between the delete and
            // this insert; the composite key turns that into a no-op.
            match LikeEntity::insert(like)
                .on_conflict(
                    OnConflict::columns([post_like::Column::PostId, post_like::Column::UserId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec(&self.db)
                .await
            {
                Ok(_) | Err(DbErr::RecordNotInserted) => {}
                Err(e) => return Err(RepoError::Query(e.to_string())),
            }
        }

        LikeEntity::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn add_comment(&self, new_comment: Comment) -> Result<Comment, RepoError> {
        let active: comment::ActiveModel = new_comment.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }
}

impl PostgresPostRepository {
    /// Compose posts with their owner profile, ordered comments and liker
    /// set, preserving the input order.
    async fn compose_views(&self, models: Vec<post::Model>) -> Result<Vec<PostView>, RepoError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

        let comments = CommentEntity::find()
            .filter(comment::Column::PostId.is_in(post_ids.clone()))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let likes = LikeEntity::find()
            .filter(post_like::Column::PostId.is_in(post_ids))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut user_ids: HashSet<Uuid> = models.iter().map(|m| m.owner_id).collect();
        user_ids.extend(comments.iter().map(|c| c.owner_id));

        let users: HashMap<Uuid, User> = UserEntity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .into_iter()
            .map(|u| (u.id, User::from(u)))
            .collect();

        let mut comments_by_post: HashMap<Uuid, Vec<comment::Model>> = HashMap::new();
        for c in comments {
            comments_by_post.entry(c.post_id).or_default().push(c);
        }

        let mut likes_by_post: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for like in likes {
            likes_by_post
                .entry(like.post_id)
                .or_default()
                .push(like.user_id);
        }

        let mut views = Vec::with_capacity(models.len());
        for model in models {
            let owner = users
                .get(&model.owner_id)
                .map(OwnerProfile::from)
                .ok_or_else(|| {
                    RepoError::Query(format!(
                        "owner {} missing for post {}",
                        model.owner_id, model.id
                    ))
                })?;

            let comment_views = comments_by_post
                .remove(&model.id)
                .unwrap_or_default()
                .into_iter()
                .map(|c| {
                    let owner = users
                        .get(&c.owner_id)
                        .map(OwnerProfile::from)
                        .ok_or_else(|| {
                            RepoError::Query(format!(
                                "owner {} missing for comment {}",
                                c.owner_id, c.id
                            ))
                        })?;
                    Ok(CommentView {
                        id: c.id,
                        text: c.text,
                        owner,
                        created_at: c.created_at.into(),
                    })
                })
                .collect::<Result<Vec<_>, RepoError>>()?;

            let likes = likes_by_post.remove(&model.id).unwrap_or_default();

            views.push(PostView {
                post: model.into(),
                owner,
                comments: comment_views,
                likes,
            });
        }

        Ok(views)
    }
}

//! Post handlers - creation, listing, ownership-gated mutation, likes and
//! comments.
//!
//! Every mutation follows the same order: resolve the session, check the
//! post exists, then apply the access rule. A missing id therefore always
//! answers not-found, even to callers who would have been forbidden.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use baan_core::domain::{
    Comment, CommentView, OwnerProfile, Post, PostChanges, PostFilter, PostOrder, PostView,
};
use baan_core::policy;
use baan_core::ports::{BaseRepository, PostRepository};
use baan_shared::dto::{
    CommentRequest, CommentResponse, CreatePostRequest, LikeResponse, ListPostsQuery,
    OwnerResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn owner_response(owner: &OwnerProfile) -> OwnerResponse {
    OwnerResponse {
        id: owner.id.to_string(),
        fullname: owner.fullname.clone(),
        role: owner.role.as_str().to_string(),
        profile_image: owner.profile_image.clone(),
    }
}

fn comment_response(comment: CommentView) -> CommentResponse {
    CommentResponse {
        id: comment.id.to_string(),
        text: comment.text,
        owner: owner_response(&comment.owner),
        created_at: comment.created_at.to_rfc3339(),
    }
}

fn post_response(view: PostView) -> PostResponse {
    let PostView {
        post,
        owner,
        comments,
        likes,
    } = view;

    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        content: post.content,
        image: post.image,
        tag: post.tag,
        owner: owner_response(&owner),
        comments: comments.into_iter().map(comment_response).collect(),
        likes: likes.iter().map(|id| id.to_string()).collect(),
        like_count: likes.len() as u64,
        created_at: post.created_at.to_rfc3339(),
    }
}

fn post_list_response(views: Vec<PostView>) -> Vec<PostResponse> {
    views.into_iter().map(post_response).collect()
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// Read endpoints take an optional session so a deployment can open them
/// to the public with `PUBLIC_READS=true`.
fn require_session(state: &AppState, identity: &OptionalIdentity) -> AppResult<()> {
    if state.public_reads || identity.0.is_some() {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() || req.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "title and content are required".to_string(),
        ));
    }

    // The owner always comes from the session claim, never from the payload.
    let post = Post::new(identity.user_id, req.title, req.content, req.tag, req.image);
    let saved = state.posts.insert(post).await?;

    let view = state
        .posts
        .find_view(saved.id)
        .await?
        .ok_or_else(|| AppError::Internal("stored post vanished".to_string()))?;

    Ok(HttpResponse::Created().json(post_response(view)))
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    require_session(&state, &identity)?;
    let query = query.into_inner();

    let filter = PostFilter {
        search: query.search,
        tag: query.tag,
        order: match query.order_by.as_deref() {
            Some("post_date") => PostOrder::NewestFirst,
            _ => PostOrder::OldestFirst,
        },
    };

    let views = state.posts.search(filter).await?;
    Ok(HttpResponse::Ok().json(post_list_response(views)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    require_session(&state, &identity)?;

    let view = state
        .posts
        .find_view(path.into_inner())
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(post_response(view)))
}

/// GET /api/posts/mine
pub async fn my_posts(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let views = state.posts.find_by_owner(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(post_list_response(views)))
}

/// GET /api/posts/liked
pub async fn liked_posts(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let views = state.posts.find_liked_by(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(post_list_response(views)))
}

/// GET /api/posts/commented
pub async fn commented_posts(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let views = state.posts.find_commented_by(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(post_list_response(views)))
}

/// GET /api/users/{id}/posts
pub async fn user_posts(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let views = state.posts.find_by_owner(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_list_response(views)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    // Existence before authorization.
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(post_not_found)?;
    policy::ensure_can_modify(&identity.claim(), &post)?;

    if matches!(&req.title, Some(t) if t.trim().is_empty()) {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }
    if matches!(&req.content, Some(c) if c.trim().is_empty()) {
        return Err(AppError::BadRequest("content must not be empty".to_string()));
    }

    let changes = PostChanges {
        title: req.title,
        content: req.content,
        tag: req.tag,
        image: req.image,
    };
    state.posts.update_post(id, changes).await?;

    let view = state
        .posts
        .find_view(id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(post_response(view)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    // Existence before authorization.
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(post_not_found)?;
    policy::ensure_can_modify(&identity.claim(), &post)?;

    state.posts.delete(id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/like
pub async fn toggle_like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    // Any session may like; existence is the only precondition.
    if state.posts.find_by_id(id).await?.is_none() {
        return Err(post_not_found());
    }

    let like_count = state.posts.toggle_like(id, identity.user_id).await?;

    Ok(HttpResponse::Ok().json(LikeResponse { like_count }))
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("text is required".to_string()));
    }
    if state.posts.find_by_id(id).await?.is_none() {
        return Err(post_not_found());
    }

    let comment = Comment::new(id, identity.user_id, req.text);
    state.posts.add_comment(comment).await?;

    let view = state
        .posts
        .find_view(id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Created().json(post_response(view)))
}

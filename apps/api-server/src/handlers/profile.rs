//! Profile handlers. A session only ever reads and edits its own profile;
//! no parameter can address another user's id.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use baan_core::domain::ProfileChanges;
use baan_core::ports::{BaseRepository, PasswordService, UserRepository};
use baan_shared::dto::UpdateProfileRequest;

use super::auth::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/profile
pub async fn get_profile(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// PUT /api/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if matches!(&req.fullname, Some(f) if f.trim().is_empty()) {
        return Err(AppError::BadRequest("fullname must not be empty".to_string()));
    }
    if matches!(&req.tel, Some(t) if t.trim().is_empty()) {
        return Err(AppError::BadRequest("tel must not be empty".to_string()));
    }

    // A supplied password is re-hashed; the plaintext never reaches storage.
    let password_hash = match req.password {
        Some(password) if password.len() < 8 => {
            return Err(AppError::BadRequest(
                "password must be at least 8 characters".to_string(),
            ));
        }
        Some(password) => Some(
            password_service
                .hash(&password)
                .map_err(|e| AppError::Internal(e.to_string()))?,
        ),
        None => None,
    };

    let changes = ProfileChanges {
        fullname: req.fullname,
        tel: req.tel,
        password_hash,
        profile_image: req.profile_image,
    };

    // The target id comes from the verified claim.
    let user = state.users.update_profile(identity.user_id, changes).await?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    use baan_core::domain::Role;
    use baan_shared::dto::UserResponse;

    use crate::handlers::testutil::{self, spawn_app};

    #[actix_web::test]
    async fn profile_requires_a_session() {
        let state = testutil::test_state();
        let token = testutil::token_service();
        let password = testutil::password_service();
        let app = spawn_app!(state, token, password);

        let resp = test::TestRequest::get()
            .uri("/api/profile")
            .send_request(&app)
            .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn update_leaves_absent_fields_unchanged() {
        let state = testutil::test_state();
        let token = testutil::token_service();
        let password = testutil::password_service();
        let user =
            testutil::seed_user(&state, "Somchai Jaidee", "somchai@example.com", Role::User).await;
        let app = spawn_app!(state, token, password);

        let resp = test::TestRequest::put()
            .uri("/api/profile")
            .insert_header(testutil::bearer(&token, &user))
            .set_json(json!({"tel": "0800000000"}))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: UserResponse = test::read_body_json(resp).await;
        assert_eq!(body.tel, "0800000000");
        assert_eq!(body.fullname, "Somchai Jaidee");
        assert_eq!(body.email, "somchai@example.com");
    }

    #[actix_web::test]
    async fn update_rejects_empty_fullname() {
        let state = testutil::test_state();
        let token = testutil::token_service();
        let password = testutil::password_service();
        let user =
            testutil::seed_user(&state, "Somchai Jaidee", "somchai@example.com", Role::User).await;
        let app = spawn_app!(state, token, password);

        let resp = test::TestRequest::put()
            .uri("/api/profile")
            .insert_header(testutil::bearer(&token, &user))
            .set_json(json!({"fullname": "  "}))
            .send_request(&app)
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

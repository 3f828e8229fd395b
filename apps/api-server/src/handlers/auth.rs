//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use baan_core::domain::User;
use baan_core::ports::{BaseRepository, PasswordService, TokenService, UserRepository};
use baan_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        fullname: user.fullname.clone(),
        email: user.email.clone(),
        tel: user.tel.clone(),
        role: user.role.as_str().to_string(),
        profile_image: user.profile_image.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}

fn invalid_credentials() -> AppError {
    // Never reveals whether the email or the password was wrong.
    AppError::Unauthorized("Invalid email or password".to_string())
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    let mut problems = Vec::new();
    if req.fullname.trim().is_empty() {
        problems.push("fullname must not be empty".to_string());
    }
    if req.email.is_empty() || !req.email.contains('@') {
        problems.push("a valid email is required".to_string());
    }
    if req.tel.trim().is_empty() {
        problems.push("tel must not be empty".to_string());
    }
    if req.password.len() < 8 {
        problems.push("password must be at least 8 characters".to_string());
    }
    if !problems.is_empty() {
        return Err(AppError::Validation(problems));
    }

    // Exact, case-sensitive duplicate check; the unique index backs this
    // up against concurrent registrations.
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create user; no session is issued here - the client logs in separately.
    let user = User::new(
        req.fullname,
        req.email,
        req.tel,
        password_hash,
        req.profile_image,
    );
    let saved = state.users.insert(user).await?;

    Ok(HttpResponse::Created().json(user_response(&saved)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // An unknown email and a wrong password produce the same answer.
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(invalid_credentials());
    }

    let token = token_service
        .issue_token(&user)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
        user: user_response(&user),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    use baan_core::domain::Role;
    use baan_core::ports::TokenService;
    use baan_shared::ErrorResponse;
    use baan_shared::dto::AuthResponse;

    use crate::handlers::testutil::{self, spawn_app};

    #[actix_web::test]
    async fn register_then_login_roundtrip_carries_role() {
        let state = testutil::test_state();
        let token = testutil::token_service();
        let password = testutil::password_service();
        let app = spawn_app!(state, token, password);

        let resp = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "fullname": "Somchai Jaidee",
                "email": "somchai@example.com",
                "tel": "0812345678",
                "password": "password123"
            }))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({
                "email": "somchai@example.com",
                "password": "password123"
            }))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: AuthResponse = test::read_body_json(resp).await;
        assert_eq!(body.user.email, "somchai@example.com");
        assert_eq!(body.token_type, "Bearer");

        let claims = token.validate_token(&body.access_token).unwrap();
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.email, "somchai@example.com");
    }

    #[actix_web::test]
    async fn duplicate_email_conflicts_regardless_of_other_fields() {
        let state = testutil::test_state();
        let token = testutil::token_service();
        let password = testutil::password_service();
        let app = spawn_app!(state, token, password);

        for (fullname, expected) in [
            ("Somchai Jaidee", StatusCode::CREATED),
            ("Someone Else", StatusCode::CONFLICT),
        ] {
            let resp = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({
                    "fullname": fullname,
                    "email": "somchai@example.com",
                    "tel": "0899999999",
                    "password": "another-password"
                }))
                .send_request(&app)
                .await;
            assert_eq!(resp.status(), expected);
        }
    }

    #[actix_web::test]
    async fn register_rejects_missing_fields() {
        let state = testutil::test_state();
        let token = testutil::token_service();
        let password = testutil::password_service();
        let app = spawn_app!(state, token, password);

        let resp = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "fullname": "",
                "email": "not-an-email",
                "tel": "",
                "password": "short"
            }))
            .send_request(&app)
            .await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn login_failure_is_generic_for_both_fields() {
        let state = testutil::test_state();
        let token = testutil::token_service();
        let password = testutil::password_service();
        testutil::seed_user(&state, "Somchai Jaidee", "somchai@example.com", Role::User).await;
        let app = spawn_app!(state, token, password);

        for body in [
            json!({"email": "somchai@example.com", "password": "wrong-password"}),
            json!({"email": "nobody@example.com", "password": "password123"}),
        ] {
            let resp = test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(body)
                .send_request(&app)
                .await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

            let error: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(error.detail.as_deref(), Some("Invalid email or password"));
        }
    }
}

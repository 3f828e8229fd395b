//! Media upload proxy - forwards binaries to the object-storage service
//! and echoes back the stored URL. The binary is never interpreted here.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use baan_core::ports::MediaStore;
use baan_shared::dto::UploadResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// POST /api/media?filename=
pub async fn upload(
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    if body.is_empty() {
        return Err(AppError::BadRequest("empty upload".to_string()));
    }

    let url = state.media.upload(&query.filename, body.to_vec()).await?;

    Ok(HttpResponse::Created().json(UploadResponse { url }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;

    use baan_core::domain::Role;
    use baan_shared::dto::UploadResponse;

    use crate::handlers::testutil::{self, spawn_app};

    #[actix_web::test]
    async fn upload_echoes_the_stored_url() {
        let state = testutil::test_state();
        let token = testutil::token_service();
        let password = testutil::password_service();
        let user = testutil::seed_user(&state, "Somchai Jaidee", "a@example.com", Role::User).await;
        let app = spawn_app!(state, token, password);

        let resp = test::TestRequest::post()
            .uri("/api/media?filename=photo.jpg")
            .insert_header(testutil::bearer(&token, &user))
            .set_payload(vec![1u8, 2, 3])
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: UploadResponse = test::read_body_json(resp).await;
        assert!(body.url.ends_with("/photo.jpg"));
    }

    #[actix_web::test]
    async fn upload_requires_a_session() {
        let state = testutil::test_state();
        let token = testutil::token_service();
        let password = testutil::password_service();
        let app = spawn_app!(state, token, password);

        let resp = test::TestRequest::post()
            .uri("/api/media?filename=photo.jpg")
            .set_payload(vec![1u8, 2, 3])
            .send_request(&app)
            .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

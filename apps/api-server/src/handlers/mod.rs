//! HTTP handlers and route configuration.

mod auth;
mod health;
mod media;
mod posts;
mod profile;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login)),
            )
            // Profile routes - a session only ever addresses its own profile
            .service(
                web::scope("/profile")
                    .route("", web::get().to(profile::get_profile))
                    .route("", web::put().to(profile::update_profile)),
            )
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::list_posts))
                    // literal segments must come before the id match
                    .route("/mine", web::get().to(posts::my_posts))
                    .route("/liked", web::get().to(posts::liked_posts))
                    .route("/commented", web::get().to(posts::commented_posts))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/like", web::post().to(posts::toggle_like))
                    .route("/{id}/comments", web::post().to(posts::add_comment)),
            )
            .route("/users/{id}/posts", web::get().to(posts::user_posts))
            // Media upload proxy
            .route("/media", web::post().to(media::upload)),
    );
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::sync::Arc;

    use baan_core::domain::{Role, User};
    use baan_core::ports::{BaseRepository, PasswordService, TokenService};
    use baan_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
    use baan_infra::database::{InMemoryPostRepository, InMemoryUserRepository};
    use baan_infra::media::InMemoryMediaStore;

    use crate::state::AppState;

    pub fn test_state() -> AppState {
        let users = Arc::new(InMemoryUserRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
        AppState {
            users,
            posts,
            media: Arc::new(InMemoryMediaStore::new()),
            public_reads: false,
        }
    }

    pub fn token_service() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 2,
            issuer: "test".to_string(),
        }))
    }

    pub fn password_service() -> Arc<dyn PasswordService> {
        Arc::new(Argon2PasswordService::new())
    }

    pub async fn seed_user(state: &AppState, fullname: &str, email: &str, role: Role) -> User {
        let hash = password_service().hash("password123").unwrap();
        let mut user = User::new(
            fullname.to_string(),
            email.to_string(),
            "0812345678".to_string(),
            hash,
            None,
        );
        user.role = role;
        state.users.insert(user).await.unwrap()
    }

    pub fn bearer(token_service: &Arc<dyn TokenService>, user: &User) -> (&'static str, String) {
        let token = token_service.issue_token(user).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    macro_rules! spawn_app {
        ($state:expr, $token:expr, $password:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .app_data(actix_web::web::Data::new($state.clone()))
                    .app_data(actix_web::web::Data::new($token.clone()))
                    .app_data(actix_web::web::Data::new($password.clone()))
                    .configure(crate::handlers::configure_routes),
            )
            .await
        };
    }
    pub(crate) use spawn_app;
}

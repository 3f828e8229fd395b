#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use baan_core::domain::{Post, Role, User};
    use baan_core::error::RepoError;
    use baan_core::ports::{BaseRepository, UserRepository};

    use crate::database::entity::{post, user};
    use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = Uuid::new_v4();
        let owner_id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                owner_id,
                title: "Sport News Today".to_owned(),
                content: "Content".to_owned(),
                image: None,
                tag: Some("news,sport".to_owned()),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let found = result.unwrap();
        assert_eq!(found.id, post_id);
        assert_eq!(found.owner_id, owner_id);
        assert!(found.has_tag("sport"));
    }

    #[tokio::test]
    async fn test_find_user_by_email_parses_role() {
        let user_id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                fullname: "Somchai Jaidee".to_owned(),
                email: "somchai@example.com".to_owned(),
                tel: "0812345678".to_owned(),
                password_hash: "hash".to_owned(),
                profile_image: None,
                role: "admin".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let result: Option<User> = repo.find_by_email("somchai@example.com").await.unwrap();

        let found = result.unwrap();
        assert_eq!(found.id, user_id);
        assert_eq!(found.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Result<(), RepoError> =
            BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}

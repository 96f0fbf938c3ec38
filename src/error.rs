use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    // Duplicate username or email. Responds 400, not 409.
    #[error("{0}")]
    Conflict(String),
}

impl ApiError {
    pub fn user_not_found() -> Self {
        ApiError::NotFound("User not found".into())
    }

    pub fn username_taken() -> Self {
        ApiError::Conflict("Username already registered".into())
    }

    pub fn email_taken() -> Self {
        ApiError::Conflict("Email already registered".into())
    }

    /// Maps a failed insert/update to a conflict when the database rejected
    /// it on a unique column. The handlers pre-check both columns, but a
    /// concurrent writer can slip between the check and the write; the
    /// UNIQUE constraints are the backstop and the caller still sees the
    /// same conflict response.
    pub fn from_write_error(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                let msg = db_err.message();
                if msg.contains("users.username") {
                    return ApiError::username_taken();
                }
                if msg.contains("users.email") {
                    return ApiError::email_taken();
                }
            }
        }
        ApiError::Database(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo_types::User;
    use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

    async fn test_pool() -> SqlitePool {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn unique_username_violation_becomes_conflict() {
        let db = test_pool().await;
        User::create(&db, "alice", "a@x.com", "pw").await.unwrap();

        let err = User::create(&db, "alice", "other@x.com", "pw")
            .await
            .unwrap_err();
        match ApiError::from_write_error(err) {
            ApiError::Conflict(msg) => assert_eq!(msg, "Username already registered"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unique_email_violation_becomes_conflict() {
        let db = test_pool().await;
        User::create(&db, "alice", "a@x.com", "pw").await.unwrap();

        let err = User::create(&db, "bob", "a@x.com", "pw").await.unwrap_err();
        let api_err = ApiError::from_write_error(err);
        match &api_err {
            ApiError::Conflict(msg) => assert_eq!(msg, "Email already registered"),
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(api_err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_unique_write_error_stays_internal() {
        let db = test_pool().await;
        db.close().await;

        let err = User::create(&db, "alice", "a@x.com", "pw")
            .await
            .unwrap_err();
        let api_err = ApiError::from_write_error(err);
        assert!(matches!(api_err, ApiError::Database(_)));
        assert_eq!(
            api_err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn conflict_maps_to_bad_request() {
        let response = ApiError::username_taken().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::user_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

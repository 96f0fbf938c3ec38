use sqlx::SqlitePool;

use crate::users::repo_types::User;

impl User {
    /// Find a user by id.
    pub async fn find_by_id(db: &SqlitePool, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, hashed_password
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Find a user by username.
    pub async fn find_by_username(db: &SqlitePool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, hashed_password
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Find a user by email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, hashed_password
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// List users in id order, `limit` rows after skipping `offset` rows.
    pub async fn list(db: &SqlitePool, limit: i64, offset: i64) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, hashed_password
            FROM users
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    /// Insert a new user and return the stored row, generated id included.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        email: &str,
        hashed_password: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, hashed_password)
            VALUES (?, ?, ?)
            RETURNING id, username, email, hashed_password
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(db)
        .await
    }

    /// Overwrite username and email on an existing row. The password column
    /// is untouched.
    pub async fn update_profile(
        db: &SqlitePool,
        id: i64,
        username: &str,
        email: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = ?, email = ?
            WHERE id = ?
            RETURNING id, username, email, hashed_password
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(id)
        .fetch_one(db)
        .await
    }

    /// Delete a row by id. Returns whether a row was deleted.
    pub async fn delete(db: &SqlitePool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

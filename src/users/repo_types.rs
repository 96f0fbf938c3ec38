use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                   // assigned by the database, never reused
    pub username: String,          // unique
    pub email: String,             // unique
    #[serde(skip_serializing)]
    pub hashed_password: String,   // placeholder transform, not exposed in JSON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_is_never_serialized() {
        let user = User {
            id: 1,
            username: "alice".into(),
            email: "a@x.com".into(),
            hashed_password: "pwnotreallyhashed".into(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("notreallyhashed"));
    }
}

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// Access level of a user. Stored as lowercase TEXT in the `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User row in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, never exposed
    pub role: Role,
}

impl User {
    /// Exact, case-sensitive lookup (SQLite's default TEXT comparison).
    pub async fn find_by_username(db: &SqlitePool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user. The UNIQUE constraint on `username` is the
    /// backstop for duplicates; callers map that violation to
    /// `AppError::DuplicateUsername`.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(db)
        .await
    }

    /// Total number of registered users. Registration grants admin to the
    /// first row ever inserted.
    pub async fn count(db: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await
    }

    pub async fn list_all(db: &SqlitePool) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn create_and_find_roundtrip() {
        let db = test_pool().await;

        let created = User::create(&db, "alice", "hash-a", Role::Admin)
            .await
            .unwrap();
        assert_eq!(created.username, "alice");
        assert_eq!(created.role, Role::Admin);

        let found = User::find_by_username(&db, "alice")
            .await
            .unwrap()
            .expect("alice should exist");
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "hash-a");
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let db = test_pool().await;
        User::create(&db, "Bob", "hash-b", Role::User).await.unwrap();

        assert!(User::find_by_username(&db, "bob").await.unwrap().is_none());
        assert!(User::find_by_username(&db, "Bob").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_username_hits_unique_constraint() {
        let db = test_pool().await;
        User::create(&db, "carol", "h1", Role::User).await.unwrap();

        let err = User::create(&db, "carol", "h2", Role::User)
            .await
            .expect_err("second insert should fail");
        match err {
            sqlx::Error::Database(e) => assert!(e.is_unique_violation()),
            other => panic!("expected a database error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn count_and_list_follow_insertion() {
        let db = test_pool().await;
        assert_eq!(User::count(&db).await.unwrap(), 0);

        User::create(&db, "first", "h", Role::Admin).await.unwrap();
        User::create(&db, "second", "h", Role::User).await.unwrap();
        assert_eq!(User::count(&db).await.unwrap(), 2);

        let all = User::list_all(&db).await.unwrap();
        let names: Vec<_> = all.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(all[0].id < all[1].id);
    }
}

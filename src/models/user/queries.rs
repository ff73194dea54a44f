use sqlx::SqlitePool;

use super::types::{NewUser, User, UserDisplay};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    display_name: String,
    role: String,
    created_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.parse().map_err(|e: String| sqlx::Error::Decode(e.into()))?;
        Ok(User {
            id: row.id,
            username: row.username,
            password: row.password_hash,
            display_name: row.display_name,
            role,
            created_at: row.created_at,
        })
    }
}

/// Find a user by login name, including the password hash.
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash, display_name, role, created_at \
         FROM users WHERE username = ?1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    row.map(User::try_from).transpose()
}

pub async fn create(pool: &SqlitePool, user: &NewUser) -> Result<i64, sqlx::Error> {
    let display_name = if user.display_name.trim().is_empty() {
        user.username.as_str()
    } else {
        user.display_name.as_str()
    };
    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, display_name, role) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&user.username)
    .bind(&user.password)
    .bind(display_name)
    .bind(user.role.as_str())
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

/// All accounts for the admin page, admins first.
pub async fn find_all_display(pool: &SqlitePool) -> Result<Vec<UserDisplay>, sqlx::Error> {
    sqlx::query_as::<_, UserDisplay>(
        "SELECT id, username, display_name, role, created_at FROM users \
         ORDER BY CASE role WHEN 'admin' THEN 0 ELSE 1 END, username",
    )
    .fetch_all(pool)
    .await
}

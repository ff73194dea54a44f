//! Shared test infrastructure.
//!
//! - `setup_test_db()` - in-memory SQLite with migrations applied
//! - `seed_user()` / `seed_log()` - fixture rows
//! - `test_config()` - defaults with no environment lookups

#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use leakwatch::auth::password;
use leakwatch::config::AppConfig;
use leakwatch::db;
use leakwatch::models::leak_log::{self, NewLeakLog};
use leakwatch::models::user::{self, NewUser, Role};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "admin123";
pub const VIEWER_USER: &str = "viewer";
pub const VIEWER_PASS: &str = "viewerpass";

// ============================================================================
// DATABASE SETUP
// ============================================================================

/// Fresh in-memory database. A single pinned connection keeps the schema alive
/// for the lifetime of the pool.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory DB");
    db::MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    pool
}

/// Config built from defaults only.
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|_| None).expect("Default config must be valid")
}

// ============================================================================
// FIXTURES
// ============================================================================

pub async fn seed_user(pool: &SqlitePool, username: &str, pass: &str, display_name: &str, role: Role) -> i64 {
    let hash = password::hash_password(pass).expect("Failed to hash password");
    user::create(
        pool,
        &NewUser {
            username: username.to_string(),
            password: hash,
            display_name: display_name.to_string(),
            role,
        },
    )
    .await
    .expect("Failed to create user")
}

pub async fn seed_admin(pool: &SqlitePool) -> i64 {
    seed_user(pool, ADMIN_USER, ADMIN_PASS, "Administrator", Role::Admin).await
}

pub async fn seed_viewer(pool: &SqlitePool) -> i64 {
    seed_user(pool, VIEWER_USER, VIEWER_PASS, "Vera Viewer", Role::Viewer).await
}

/// Insert one leak log; `None` leaves the column NULL.
pub async fn seed_log(
    pool: &SqlitePool,
    channel: Option<&str>,
    source: Option<&str>,
    log_type: Option<&str>,
    content: Option<&str>,
) -> i64 {
    leak_log::create(
        pool,
        &NewLeakLog {
            channel: channel.map(String::from),
            source: source.map(String::from),
            content: content.map(String::from),
            author: Some("tester".to_string()),
            detection_date: Some("2025-01-01".to_string()),
            log_type: log_type.map(String::from),
        },
    )
    .await
    .expect("Failed to create leak log")
}

/// Five logs across two sources, two types and three channels, plus one
/// without a channel.
pub async fn seed_sample_logs(pool: &SqlitePool) {
    seed_log(pool, Some("@alpha"), Some("example.com"), Some("credentials"), Some("admin:hunter2 for example.com")).await;
    seed_log(pool, Some("@alpha"), Some("example.com"), Some("credentials"), Some("second dump")).await;
    seed_log(pool, Some("@beta"), Some("shop.example.net"), Some("stealer"), Some("cookie export")).await;
    seed_log(pool, Some("@gamma"), Some("shop.example.net"), Some("stealer"), Some("autofill 50% off_codes")).await;
    seed_log(pool, Some("@beta"), Some("example.com"), Some("credentials"), Some("third dump")).await;
    seed_log(pool, None, Some("example.com"), Some("stealer"), Some("no channel on this one")).await;
}

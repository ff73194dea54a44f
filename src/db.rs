use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::auth::password;
use crate::config::{AppConfig, DEFAULT_ADMIN_PASSWORD};
use crate::errors::AppError;
use crate::models::leak_log::{self, NewLeakLog};
use crate::models::user::{self, NewUser, Role};

pub type DbPool = SqlitePool;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn init_pool(database_url: &str) -> Result<DbPool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Run `SELECT 1` against the pool.
pub async fn ping(pool: &DbPool) -> bool {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await
        .is_ok()
}

/// Create the configured admin account if no users exist yet.
pub async fn seed_admin(pool: &DbPool, config: &AppConfig) -> Result<(), AppError> {
    let existing = user::count(pool).await?;
    if existing > 0 {
        log::info!("Database already has {existing} users, skipping admin seed");
        return Ok(());
    }

    if config.admin_password == DEFAULT_ADMIN_PASSWORD {
        log::warn!("Seeding admin with the default password; set ADMIN_PASSWORD in production");
    }
    let hash = password::hash_password(&config.admin_password).map_err(AppError::Hash)?;
    user::create(
        pool,
        &NewUser {
            username: config.admin_username.clone(),
            password: hash,
            display_name: "Administrator".to_string(),
            role: Role::Admin,
        },
    )
    .await?;
    log::info!("Seeded admin user '{}'", config.admin_username);
    Ok(())
}

/// Insert a small set of sample leak logs when the table is empty.
pub async fn seed_demo(pool: &DbPool) -> Result<(), AppError> {
    if leak_log::count(pool).await? > 0 {
        log::info!("Leak logs already present, skipping demo seed");
        return Ok(());
    }

    let samples = [
        ("@combolists", "example.com", "credentials", "user list for example.com portal", "anon42", "2025-01-03"),
        ("@combolists", "mail.example.org", "credentials", "mail dump, 1200 lines", "anon42", "2025-01-04"),
        ("@stealerlogs", "bank.example.net", "stealer", "browser autofill export", "redline_feed", "2025-01-05"),
        ("@dbleaks", "shop.example.com", "database", "orders table sample", "dumper", "2025-01-06"),
        ("@stealerlogs", "example.com", "stealer", "cookies and saved logins", "redline_feed", "2025-01-07"),
    ];
    for (channel, source, kind, content, author, date) in samples {
        leak_log::create(
            pool,
            &NewLeakLog {
                channel: Some(channel.to_string()),
                source: Some(source.to_string()),
                content: Some(content.to_string()),
                author: Some(author.to_string()),
                detection_date: Some(date.to_string()),
                log_type: Some(kind.to_string()),
            },
        )
        .await?;
    }
    // One record without a channel so the dashboard fallback is visible.
    leak_log::create(
        pool,
        &NewLeakLog {
            channel: None,
            source: Some("portal.example.edu".to_string()),
            content: Some("forum post mentioning staff credentials".to_string()),
            author: None,
            detection_date: None,
            log_type: Some("mention".to_string()),
        },
    )
    .await?;
    log::info!("Demo leak logs seeded");
    Ok(())
}

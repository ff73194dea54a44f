use actix_session::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::AppError;
use crate::models::user::{Role, User};

const FLASH_KEY: &str = "flashes";

/// Severity of a flash message; doubles as the CSS modifier in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Error,
    Success,
    Info,
}

impl FlashCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashCategory::Error => "error",
            FlashCategory::Success => "success",
            FlashCategory::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self { category, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Info, message)
    }
}

/// Queue a flash message to be shown on the next rendered page.
pub fn push_flash(session: &Session, flash: Flash) {
    let mut queued = session
        .get::<Vec<Flash>>(FLASH_KEY)
        .unwrap_or(None)
        .unwrap_or_default();
    queued.push(flash);
    if let Err(e) = session.insert(FLASH_KEY, &queued) {
        log::warn!("Failed to store flash message: {e}");
    }
}

/// Drain all queued flash messages.
pub fn take_flashes(session: &Session) -> Vec<Flash> {
    let flashes = session
        .get::<Vec<Flash>>(FLASH_KEY)
        .unwrap_or(None)
        .unwrap_or_default();
    if !flashes.is_empty() {
        session.remove(FLASH_KEY);
    }
    flashes
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn get_username(session: &Session) -> Result<String, String> {
    match session.get::<String>("username") {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err("No username in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

pub fn get_display_name(session: &Session) -> String {
    session
        .get::<String>("display_name")
        .unwrap_or(None)
        .unwrap_or_else(|| "Guest".to_string())
}

pub fn get_role(session: &Session) -> Option<Role> {
    session
        .get::<String>("role")
        .unwrap_or(None)
        .and_then(|r| r.parse().ok())
}

/// RFC 3339 timestamp of the login, if any.
pub fn get_login_at(session: &Session) -> Option<String> {
    session.get::<String>("login_at").unwrap_or(None)
}

/// How long a login lasts, depending on the remember-me choice.
pub fn login_ttl(remember: bool, lifetime: Duration, short: Duration) -> Duration {
    if remember { lifetime } else { short }
}

/// Store the authenticated user in the session.
pub fn establish(session: &Session, user: &User, ttl: Duration, now: DateTime<Utc>) -> Result<(), AppError> {
    let expires_at = now.timestamp() + ttl.as_secs() as i64;
    session.renew();
    let store = |key: &str, res: Result<(), actix_session::SessionInsertError>| {
        res.map_err(|e| AppError::Session(format!("Failed to store {key}: {e}")))
    };
    store("user_id", session.insert("user_id", user.id))?;
    store("username", session.insert("username", &user.username))?;
    store("display_name", session.insert("display_name", &user.display_name))?;
    store("role", session.insert("role", user.role.as_str()))?;
    store("login_at", session.insert("login_at", now.to_rfc3339()))?;
    store("expires_at", session.insert("expires_at", expires_at))?;
    Ok(())
}

/// Drop everything but keep the session usable for a follow-up flash.
pub fn clear(session: &Session) {
    session.clear();
    session.renew();
}

/// A session without `expires_at` is treated as expired.
pub fn is_expired(expires_at: Option<i64>, now: DateTime<Utc>) -> bool {
    match expires_at {
        Some(ts) => now.timestamp() >= ts,
        None => true,
    }
}

pub fn session_expired(session: &Session, now: DateTime<Utc>) -> bool {
    is_expired(session.get::<i64>("expires_at").unwrap_or(None), now)
}

/// Check the admin role; returns Err(AppError) if denied.
pub fn require_admin(session: &Session) -> Result<(), AppError> {
    match get_role(session) {
        Some(Role::Admin) => Ok(()),
        _ => Err(AppError::PermissionDenied("admin".to_string())),
    }
}

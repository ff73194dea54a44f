//! Authentication tests: password hashing, account creation and lookup,
//! login validation and the attempt limiter.

mod common;

use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

use leakwatch::auth::rate_limit::RateLimiter;
use leakwatch::auth::{password, validate};
use leakwatch::models::user::{self, NewUser, Role};
use common::*;

const TEST_PASSWORD: &str = "password123";

#[test]
fn test_hash_password_success() {
    let hash = password::hash_password(TEST_PASSWORD).expect("Failed to hash password");

    assert!(!hash.is_empty());
    assert!(hash.starts_with("$argon2"));
}

#[test]
fn test_verify_password_correct_and_incorrect() {
    let hash = password::hash_password(TEST_PASSWORD).expect("Failed to hash password");

    assert!(password::verify_password(TEST_PASSWORD, &hash).expect("Verification failed"));
    assert!(!password::verify_password("wrongpassword", &hash).expect("Verification failed"));
}

#[test]
fn test_verify_or_dummy() {
    let hash = password::hash_password(TEST_PASSWORD).unwrap();

    assert!(password::verify_or_dummy(TEST_PASSWORD, Some(&hash)).unwrap());
    assert!(!password::verify_or_dummy("wrongpassword", Some(&hash)).unwrap());
    // A missing account is a plain mismatch, never an error.
    assert!(!password::verify_or_dummy(TEST_PASSWORD, None).unwrap());
    assert!(!password::verify_or_dummy("", None).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let a = password::hash_password(TEST_PASSWORD).unwrap();
    let b = password::hash_password(TEST_PASSWORD).unwrap();
    assert_ne!(a, b);
}

#[actix_rt::test]
async fn test_create_and_find_user() {
    let pool = setup_test_db().await;
    let id = seed_viewer(&pool).await;

    let found = user::find_by_username(&pool, VIEWER_USER)
        .await
        .expect("Query failed")
        .expect("User should exist");

    assert_eq!(found.id, id);
    assert_eq!(found.display_name, "Vera Viewer");
    assert_eq!(found.role, Role::Viewer);
    assert!(password::verify_password(VIEWER_PASS, &found.password).unwrap());
}

#[actix_rt::test]
async fn test_unknown_user_is_none() {
    let pool = setup_test_db().await;
    let found = user::find_by_username(&pool, "nobody").await.expect("Query failed");
    assert!(found.is_none());
}

#[actix_rt::test]
async fn test_display_name_defaults_to_username() {
    let pool = setup_test_db().await;
    user::create(
        &pool,
        &NewUser {
            username: "plain".to_string(),
            password: password::hash_password("x").unwrap(),
            display_name: "  ".to_string(),
            role: Role::Viewer,
        },
    )
    .await
    .expect("Failed to create user");

    let found = user::find_by_username(&pool, "plain").await.unwrap().unwrap();
    assert_eq!(found.display_name, "plain");
}

#[actix_rt::test]
async fn test_duplicate_username_rejected() {
    let pool = setup_test_db().await;
    seed_admin(&pool).await;
    let dup = user::create(
        &pool,
        &NewUser {
            username: ADMIN_USER.to_string(),
            password: "x".to_string(),
            display_name: String::new(),
            role: Role::Viewer,
        },
    )
    .await;
    assert!(dup.is_err());
    assert_eq!(user::count(&pool).await.unwrap(), 1);
}

#[actix_rt::test]
async fn test_seed_admin_only_on_empty_table() {
    let pool = setup_test_db().await;
    let config = test_config();

    leakwatch::db::seed_admin(&pool, &config).await.expect("Seed failed");
    leakwatch::db::seed_admin(&pool, &config).await.expect("Second seed failed");

    assert_eq!(user::count(&pool).await.unwrap(), 1);
    let admin = user::find_by_username(&pool, "admin").await.unwrap().unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert!(password::verify_password("admin123", &admin.password).unwrap());
}

#[test]
fn test_login_validation_messages() {
    assert_eq!(
        validate::validate_login("", "pw").as_deref(),
        Some("Username and password are required.")
    );
    assert_eq!(
        validate::validate_login("alice", "").as_deref(),
        Some("Username and password are required.")
    );
    assert!(validate::validate_login("alice", "pw").is_none());
}

#[test]
fn test_limiter_locks_after_max_failures() {
    let limiter = RateLimiter::new(5, Duration::from_secs(900));
    let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    let other = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
    let start = Instant::now();

    for i in 1..5 {
        let status = limiter.record_failure_at(ip, start);
        assert_eq!(status.attempts, i);
        assert!(!status.locked);
    }
    let status = limiter.record_failure_at(ip, start + Duration::from_secs(60));
    assert!(status.locked);
    assert_eq!(status.retry_after_secs, 840);

    // Other clients are unaffected.
    assert!(!limiter.status_at(other, start).locked);
    // The window is fixed from the first failure.
    assert!(!limiter.status_at(ip, start + Duration::from_secs(900)).locked);
}

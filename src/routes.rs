use actix_session::{SessionMiddleware, config::PersistentSession, storage::CookieSessionStore};
use actix_web::cookie::{Key, time};
use actix_web::{HttpResponse, web};

use crate::auth;
use crate::config::AppConfig;
use crate::handlers;

/// Cookie session layer. The cookie lives as long as the longest login; shorter
/// logins are cut off by the `expires_at` check in `require_auth`.
pub fn session_middleware(key: Key, config: &AppConfig) -> SessionMiddleware<CookieSessionStore> {
    let ttl = time::Duration::seconds(config.session_lifetime.as_secs() as i64);
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("leakwatch_session".to_string())
        .cookie_secure(config.cookie_secure)
        .cookie_http_only(true)
        .session_lifecycle(PersistentSession::default().session_ttl(ttl))
        .build()
}

/// Register every route. Static files and the session layer are added by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::get().to(handlers::auth_handlers::login_page))
        .route("/login", web::post().to(handlers::auth_handlers::login_submit))
        .route("/health", web::get().to(handlers::system_handlers::health))
        // Root redirect
        .route("/", web::get().to(|| async {
            HttpResponse::SeeOther()
                .insert_header(("Location", "/dashboard"))
                .finish()
        }))
        // Protected routes
        .service(
            web::scope("/leak-logs")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("", web::get().to(handlers::leak_log_handlers::index))
                .route("/", web::get().to(handlers::leak_log_handlers::index))
                .service(
                    web::scope("/api")
                        .configure(handlers::api::configure)
                        .default_service(web::to(handlers::system_handlers::not_found)),
                )
                // Nested scopes fall back to the App default, not this one
                .default_service(web::to(handlers::system_handlers::not_found)),
        )
        .service(
            web::scope("")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("/dashboard", web::get().to(handlers::dashboard::index))
                .route("/logout", web::post().to(handlers::auth_handlers::logout))
                .route("/admin", web::get().to(handlers::admin_handlers::index))
                // Unknown routes fall through here (must be registered last)
                .default_service(web::to(handlers::system_handlers::not_found)),
        );
}

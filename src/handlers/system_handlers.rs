use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::auth::session;
use crate::db::{self, DbPool};
use crate::errors::AppError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

/// GET /health: public liveness probe with a database ping.
pub async fn health(pool: web::Data<DbPool>) -> HttpResponse {
    let database = db::ping(&pool).await;
    let body = HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
    };
    if database {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Fallback for unknown routes: 404 page when logged in, otherwise the login form.
pub async fn not_found(session: Session) -> Result<HttpResponse, AppError> {
    if session::get_user_id(&session).is_some() {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish())
}

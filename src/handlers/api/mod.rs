pub mod account;
pub mod leak_logs;

use actix_web::{HttpResponse, http::StatusCode, web};

use crate::templates_structs::ApiErrorResponse;

/// JSON error body with `success: false`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ApiErrorResponse::new(message))
}

/// Map a query failure to a logged 500 JSON response.
pub fn db_error(context: &str, e: sqlx::Error) -> HttpResponse {
    log::error!("{context}: {e}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, format!("{context}: database error"))
}

/// Configure leak log JSON routes, mounted under /leak-logs/api.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/list", web::get().to(leak_logs::list))
        .route("/search", web::get().to(leak_logs::search))
        .route("/stats", web::get().to(leak_logs::stats))
        .route("/detail/{id}", web::get().to(leak_logs::detail))
        .route("/export", web::get().to(leak_logs::export))
        .route("/user", web::get().to(account::user_info))
        .route("/config", web::get().to(account::client_config));
}

use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session::{self, Flash};
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::user;
use crate::templates_structs::{AdminTemplate, PageContext};

/// GET /admin: account overview, admins only.
pub async fn index(
    pool: web::Data<DbPool>,
    session: Session,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    if let Err(e) = session::require_admin(&session) {
        log::warn!("{e} for {}", session::get_display_name(&session));
        session::push_flash(&session, Flash::error("You do not have permission to access this page."));
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/dashboard"))
            .finish());
    }

    let ctx = PageContext::build(&session, &config.app_name, "/admin")?;
    let users = user::find_all_display(&pool).await?;
    render(AdminTemplate { ctx, users })
}

use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::dashboard;
use crate::templates_structs::{DashboardTemplate, PageContext};

pub async fn index(
    pool: web::Data<DbPool>,
    session: Session,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config.app_name, "/dashboard")?;
    let stats = dashboard::load(&pool).await?;
    log::info!(
        "Dashboard loaded: {} records, {} log types, {} channels",
        stats.total_assets,
        stats.categories_count,
        stats.regions_count
    );
    render(DashboardTemplate::new(ctx, stats))
}

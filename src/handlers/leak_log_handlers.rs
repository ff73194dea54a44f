use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::leak_log::{self, LeakLogStats, format::LeakLogView};
use crate::templates_structs::{LeakLogsTemplate, PageContext};

const RECENT_LOGS: i64 = 10;

/// GET /leak-logs: stats plus the newest entries. Query failures still render the page.
pub async fn index(
    pool: web::Data<DbPool>,
    session: Session,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config.app_name, "/leak-logs")?;

    let loaded = async {
        let stats = leak_log::stats(&pool).await?;
        let recent = leak_log::find_recent(&pool, RECENT_LOGS).await?;
        Ok::<_, sqlx::Error>((stats, recent))
    }
    .await;

    let tmpl = match loaded {
        Ok((stats, recent)) => {
            log::info!("Leak logs page loaded: {} total logs", stats.total_logs);
            LeakLogsTemplate {
                ctx,
                stats,
                recent_logs: recent.iter().map(LeakLogView::from).collect(),
                error: None,
            }
        }
        Err(e) => {
            log::error!("Leak logs page query failed: {e}");
            LeakLogsTemplate {
                ctx,
                stats: LeakLogStats::default(),
                recent_logs: Vec::new(),
                error: Some("Could not load leak logs. Please try again later.".to_string()),
            }
        }
    };
    render(tmpl)
}

use askama::Template;

use crate::models::leak_log::LeakLogStats;
use crate::models::leak_log::format::LeakLogView;
use super::PageContext;

#[derive(Template)]
#[template(path = "leak_logs.html")]
pub struct LeakLogsTemplate {
    pub ctx: PageContext,
    pub stats: LeakLogStats,
    pub recent_logs: Vec<LeakLogView>,
    pub error: Option<String>,
}

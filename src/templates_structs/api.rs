use serde::Serialize;

use crate::models::leak_log::format::{self, LeakLogView};
use crate::models::leak_log::{CountBucket, LeakLog, LeakLogFilter, LeakLogStats, Pagination};

/// Leak log as returned by the list and search endpoints.
#[derive(Serialize, Debug, Clone)]
pub struct ApiLeakLog {
    #[serde(flatten)]
    pub view: LeakLogView,
    pub full_content: String,
}

impl ApiLeakLog {
    /// Content shortened for list views.
    pub fn preview(log: &LeakLog) -> Self {
        let mut view = LeakLogView::from(log);
        let full_content = std::mem::take(&mut view.content);
        view.content = format::truncate_chars(&full_content, format::LIST_PREVIEW_CHARS);
        Self { view, full_content }
    }

    /// Content shortened, escaped and with `query` wrapped in `<mark>`.
    pub fn highlighted(log: &LeakLog, query: &str) -> Self {
        let mut view = LeakLogView::from(log);
        let full_content = std::mem::take(&mut view.content);
        let shortened = format::truncate_chars(&full_content, format::SEARCH_PREVIEW_CHARS);
        view.content = format::highlight(&shortened, query);
        Self { view, full_content }
    }
}

#[derive(Serialize, Debug)]
pub struct ListResponse {
    pub success: bool,
    pub results: Vec<ApiLeakLog>,
    pub pagination: Pagination,
    pub filters: LeakLogFilter,
}

#[derive(Serialize, Debug)]
pub struct SearchSummary {
    pub search_term: String,
    pub results_count: usize,
    pub total_matches: i64,
}

#[derive(Serialize, Debug)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<ApiLeakLog>,
    pub pagination: Pagination,
    pub query: String,
    pub summary: SearchSummary,
}

#[derive(Serialize, Debug)]
pub struct StatsSummary {
    pub unique_sources: usize,
    pub unique_types: usize,
    pub unique_channels: usize,
}

#[derive(Serialize, Debug)]
pub struct StatsPayload {
    pub total_logs: i64,
    pub sources: Vec<CountBucket>,
    pub types: Vec<CountBucket>,
    pub channels: Vec<CountBucket>,
    pub summary: StatsSummary,
}

impl From<LeakLogStats> for StatsPayload {
    fn from(stats: LeakLogStats) -> Self {
        let summary = StatsSummary {
            unique_sources: stats.sources.len(),
            unique_types: stats.types.len(),
            unique_channels: stats.channels.len(),
        };
        Self {
            total_logs: stats.total_logs,
            sources: stats.sources,
            types: stats.types,
            channels: stats.channels,
            summary,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StatsPayload,
    pub user: String,
}

/// Single log with derived flags for the detail modal.
#[derive(Serialize, Debug)]
pub struct LogDetail {
    #[serde(flatten)]
    pub view: LeakLogView,
    pub content_length: usize,
    pub has_author: bool,
    pub has_detection_date: bool,
}

impl From<&LeakLog> for LogDetail {
    fn from(log: &LeakLog) -> Self {
        let mut view = LeakLogView::from(log);
        let content_length = view.content.chars().count();
        if view.content.is_empty() {
            view.content = format::NO_CONTENT.to_string();
        }
        Self {
            view,
            content_length,
            has_author: log.author.as_deref().is_some_and(|a| !a.trim().is_empty()),
            has_detection_date: log.detection_date.as_deref().is_some_and(|d| !d.trim().is_empty()),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct DetailMeta {
    pub requested_id: i64,
    pub found: bool,
    pub user: String,
}

#[derive(Serialize, Debug)]
pub struct DetailResponse {
    pub success: bool,
    pub log: LogDetail,
    pub meta: DetailMeta,
}

/// Raw values, no display fallbacks.
#[derive(Serialize, Debug)]
pub struct ExportedLog {
    pub id: i64,
    pub channel: Option<String>,
    pub source: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub detection_date: Option<String>,
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    pub created_at: String,
}

impl From<LeakLog> for ExportedLog {
    fn from(log: LeakLog) -> Self {
        Self {
            id: log.id,
            channel: log.channel,
            source: log.source,
            content: log.content,
            author: log.author,
            detection_date: log.detection_date,
            log_type: log.log_type,
            created_at: log.created_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ExportInfo {
    pub format: &'static str,
    pub timestamp: String,
    pub total_records: usize,
    pub filters: LeakLogFilter,
    pub exported_by: String,
}

#[derive(Serialize, Debug)]
pub struct ExportResponse {
    pub export_info: ExportInfo,
    pub logs: Vec<ExportedLog>,
}

/// The signed-in account, as seen by the browser scripts.
#[derive(Serialize, Debug)]
pub struct UserInfoResponse {
    pub success: bool,
    pub user_id: Option<i64>,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub login_at: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ApiEndpoints {
    pub list: &'static str,
    pub search: &'static str,
    pub stats: &'static str,
    pub detail: &'static str,
    pub export: &'static str,
    pub health: &'static str,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            list: "/leak-logs/api/list",
            search: "/leak-logs/api/search",
            stats: "/leak-logs/api/stats",
            detail: "/leak-logs/api/detail/{id}",
            export: "/leak-logs/api/export",
            health: "/health",
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ClientConfigResponse {
    pub success: bool,
    pub app_name: String,
    pub endpoints: ApiEndpoints,
    pub user: String,
}

/// API error response.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ApiErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into() }
    }
}

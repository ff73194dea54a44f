// Template context structures for Askama templates, organized by domain.
// All types are re-exported: `use leakwatch::templates_structs::*`

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{self, Flash, get_username, take_flashes};
use crate::errors::AppError;
use crate::models::user::Role;

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.display_name`, `ctx.flashes`, etc.
pub struct PageContext {
    pub username: String,
    pub display_name: String,
    pub avatar_initial: String,
    pub role: String,
    pub is_admin: bool,
    pub flashes: Vec<Flash>,
    pub app_name: String,
    pub csrf_token: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &Session, app_name: &str, current_path: &str) -> Result<Self, AppError> {
        let username = get_username(session)
            .map_err(|e| AppError::Session(format!("Failed to get username: {}", e)))?;
        let role = session::get_role(session);
        Ok(Self::new(
            &username,
            &session::get_display_name(session),
            role.unwrap_or(Role::Viewer),
            take_flashes(session),
            app_name,
            &csrf::get_or_create_token(session),
            current_path,
        ))
    }

    pub fn new(
        username: &str,
        display_name: &str,
        role: Role,
        flashes: Vec<Flash>,
        app_name: &str,
        csrf_token: &str,
        current_path: &str,
    ) -> Self {
        let avatar_initial = display_name
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string();
        Self {
            username: username.to_string(),
            display_name: display_name.to_string(),
            avatar_initial,
            role: role.as_str().to_string(),
            is_admin: role == Role::Admin,
            flashes,
            app_name: app_name.to_string(),
            csrf_token: csrf_token.to_string(),
            current_path: current_path.to_string(),
        }
    }

    /// Whether `path` is the active navigation entry.
    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path || self.current_path.starts_with(&format!("{path}/"))
    }
}

/// Serialize `value` for embedding inside a `<script>` element.
pub fn script_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

mod admin;
mod api;
mod common;
mod dashboard;
mod leak_log;

pub use self::admin::AdminTemplate;
pub use self::api::{
    ApiEndpoints, ApiErrorResponse, ApiLeakLog, ClientConfigResponse, DetailMeta, DetailResponse,
    ExportInfo, ExportResponse, ExportedLog, ListResponse, LogDetail, SearchResponse, SearchSummary,
    StatsPayload, StatsResponse, StatsSummary, UserInfoResponse,
};
pub use self::common::LoginTemplate;
pub use self::dashboard::{ChartConfig, ChartData, ChartDataset, DashboardTemplate, PALETTE};
pub use self::leak_log::LeakLogsTemplate;

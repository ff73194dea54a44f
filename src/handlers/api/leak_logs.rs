use std::collections::HashMap;

use actix_session::Session;
use actix_web::{HttpResponse, http::StatusCode, web};
use chrono::Utc;

use super::{db_error, json_error};
use crate::auth::session;
use crate::db::DbPool;
use crate::models::leak_log::{self, LeakLog, LeakLogFilter, PageRequest, format};
use crate::templates_structs::{
    ApiLeakLog, DetailMeta, DetailResponse, ExportInfo, ExportResponse, ExportedLog, ListResponse,
    LogDetail, SearchResponse, SearchSummary, StatsResponse,
};

pub const MIN_QUERY_CHARS: usize = 2;
pub const EXPORT_DEFAULT_LIMIT: i64 = 1000;
pub const EXPORT_MAX_LIMIT: i64 = 5000;
pub const CSV_HEADER: [&str; 8] = [
    "ID", "Channel", "Source", "Content", "Author", "Type", "Detection Date", "Created At",
];

type Params = web::Query<HashMap<String, String>>;

/// Integer query parameter; unparseable values count as absent.
fn int_param(query: &Params, key: &str) -> Option<i64> {
    query.get(key).and_then(|v| v.trim().parse::<i64>().ok())
}

fn str_param<'a>(query: &'a Params, key: &str) -> Option<&'a str> {
    query.get(key).map(|v| v.as_str())
}

/// GET /leak-logs/api/list: filtered, paginated listing.
/// Query params: page, limit (max 100), source, type, channel.
pub async fn list(pool: web::Data<DbPool>, query: Params) -> HttpResponse {
    let request = PageRequest::new(int_param(&query, "page"), int_param(&query, "limit"));
    let filter = LeakLogFilter::new(
        str_param(&query, "source"),
        str_param(&query, "type"),
        str_param(&query, "channel"),
    );
    log::info!(
        "Leak log list: page={} limit={} source='{}' type='{}' channel='{}'",
        request.page, request.limit, filter.source, filter.log_type, filter.channel
    );

    let page = match leak_log::find_page(&pool, &filter, request).await {
        Ok(page) => page,
        Err(e) => return db_error("Leak log list failed", e),
    };

    let results: Vec<ApiLeakLog> = page.logs.iter().map(ApiLeakLog::preview).collect();
    log::info!("Leak log list returned {} results", results.len());
    HttpResponse::Ok().json(ListResponse {
        success: true,
        results,
        pagination: page.pagination,
        filters: filter,
    })
}

/// Check a search term; returns the trimmed term or the rejection message.
pub fn validate_query(raw: Option<&str>) -> Result<String, &'static str> {
    let q = raw.map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err("Search query must not be empty");
    }
    if q.chars().count() < MIN_QUERY_CHARS {
        return Err("Search query must be at least 2 characters");
    }
    Ok(q.to_string())
}

/// GET /leak-logs/api/search: substring search with highlighted previews.
pub async fn search(pool: web::Data<DbPool>, query: Params) -> HttpResponse {
    let q = match validate_query(str_param(&query, "q")) {
        Ok(q) => q,
        Err(msg) => return json_error(StatusCode::BAD_REQUEST, msg),
    };
    let request = PageRequest::new(int_param(&query, "page"), int_param(&query, "limit"));
    log::info!("Leak log search: q='{q}' page={} limit={}", request.page, request.limit);

    let page = match leak_log::search(&pool, &q, request).await {
        Ok(page) => page,
        Err(e) => return db_error("Leak log search failed", e),
    };

    let results: Vec<ApiLeakLog> = page.logs.iter().map(|l| ApiLeakLog::highlighted(l, &q)).collect();
    let summary = SearchSummary {
        search_term: q.clone(),
        results_count: results.len(),
        total_matches: page.pagination.total,
    };
    HttpResponse::Ok().json(SearchResponse {
        success: true,
        results,
        pagination: page.pagination,
        query: q,
        summary,
    })
}

/// GET /leak-logs/api/stats
pub async fn stats(pool: web::Data<DbPool>, session: Session) -> HttpResponse {
    match leak_log::stats(&pool).await {
        Ok(stats) => {
            log::info!("Leak log stats: {} total logs", stats.total_logs);
            HttpResponse::Ok().json(StatsResponse {
                success: true,
                stats: stats.into(),
                user: session::get_display_name(&session),
            })
        }
        Err(e) => db_error("Leak log stats failed", e),
    }
}

/// GET /leak-logs/api/detail/{id}
pub async fn detail(pool: web::Data<DbPool>, session: Session, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    if id <= 0 {
        return json_error(StatusCode::BAD_REQUEST, "Invalid log id");
    }

    match leak_log::find_by_id(&pool, id).await {
        Ok(Some(log)) => {
            let detail = LogDetail::from(&log);
            log::info!("Leak log detail: id={id} content_length={}", detail.content_length);
            HttpResponse::Ok().json(DetailResponse {
                success: true,
                log: detail,
                meta: DetailMeta {
                    requested_id: id,
                    found: true,
                    user: session::get_display_name(&session),
                },
            })
        }
        Ok(None) => {
            log::warn!("Leak log not found: id={id}");
            json_error(StatusCode::NOT_FOUND, format!("Log {id} not found"))
        }
        Err(e) => db_error("Leak log detail failed", e),
    }
}

/// GET /leak-logs/api/export: `format=json|csv`, limit (max 5000), source, type.
pub async fn export(pool: web::Data<DbPool>, session: Session, query: Params) -> HttpResponse {
    let format_name = str_param(&query, "format").unwrap_or("json").trim().to_ascii_lowercase();
    if format_name != "json" && format_name != "csv" {
        return json_error(StatusCode::BAD_REQUEST, "Supported formats: json, csv");
    }
    let limit = int_param(&query, "limit")
        .unwrap_or(EXPORT_DEFAULT_LIMIT)
        .clamp(1, EXPORT_MAX_LIMIT);
    let filter = LeakLogFilter::new(str_param(&query, "source"), str_param(&query, "type"), None);
    log::info!("Leak log export: format={format_name} limit={limit}");

    let logs = match leak_log::find_for_export(&pool, &filter, limit).await {
        Ok(logs) => logs,
        Err(e) => return db_error("Leak log export failed", e),
    };

    if format_name == "csv" {
        return match to_csv(&logs) {
            Ok(body) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header(("Content-Disposition", "attachment; filename=leak_logs_export.csv"))
                .body(body),
            Err(e) => {
                log::error!("CSV export failed: {e}");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "CSV export failed")
            }
        };
    }

    HttpResponse::Ok().json(ExportResponse {
        export_info: ExportInfo {
            format: "json",
            timestamp: Utc::now().to_rfc3339(),
            total_records: logs.len(),
            filters: filter,
            exported_by: session::get_display_name(&session),
        },
        logs: logs.into_iter().map(ExportedLog::from).collect(),
    })
}

/// Serialize logs as CSV with one record per line.
pub fn to_csv(logs: &[LeakLog]) -> Result<Vec<u8>, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).map_err(|e| e.to_string())?;
    for log in logs {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        writer
            .write_record([
                log.id.to_string(),
                opt(&log.channel),
                opt(&log.source),
                format::single_line(log.content.as_deref().unwrap_or_default()),
                opt(&log.author),
                opt(&log.log_type),
                opt(&log.detection_date),
                log.created_at.clone(),
            ])
            .map_err(|e| e.to_string())?;
    }
    writer.into_inner().map_err(|e| e.to_string())
}

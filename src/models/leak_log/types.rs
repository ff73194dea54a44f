use serde::Serialize;

/// A row of the `leak_logs` table. Every descriptive column is nullable.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeakLog {
    pub id: i64,
    pub channel: Option<String>,
    pub source: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub detection_date: Option<String>,
    #[sqlx(rename = "type")]
    pub log_type: Option<String>,
    pub created_at: String,
}

/// New leak log data for insertion.
#[derive(Debug, Clone, Default)]
pub struct NewLeakLog {
    pub channel: Option<String>,
    pub source: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub detection_date: Option<String>,
    pub log_type: Option<String>,
}

/// Optional list filters; empty strings mean "no filter".
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeakLogFilter {
    pub source: String,
    #[serde(rename = "type")]
    pub log_type: String,
    pub channel: String,
}

impl LeakLogFilter {
    pub fn new(source: Option<&str>, log_type: Option<&str>, channel: Option<&str>) -> Self {
        let clean = |v: Option<&str>| v.map(str::trim).unwrap_or_default().to_string();
        Self {
            source: clean(source),
            log_type: clean(log_type),
            channel: clean(channel),
        }
    }
}

/// A clamped page/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self::with_bounds(page, limit, DEFAULT_LIMIT, MAX_LIMIT)
    }

    pub fn with_bounds(page: Option<i64>, limit: Option<i64>, default_limit: i64, max_limit: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).clamp(1, max_limit),
        }
    }

    /// Rows to skip. Saturates, so an absurd page yields an empty result.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub pages: i64,
    pub total: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let pages = (total + request.limit - 1) / request.limit;
        Self {
            page: request.page,
            pages,
            total,
            has_next: request.page < pages,
            has_prev: request.page > 1,
        }
    }
}

pub struct LeakLogPage {
    pub logs: Vec<LeakLog>,
    pub pagination: Pagination,
}

/// A labelled count, as produced by `GROUP BY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CountBucket {
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeakLogStats {
    pub total_logs: i64,
    pub sources: Vec<CountBucket>,
    pub types: Vec<CountBucket>,
    pub channels: Vec<CountBucket>,
}

use sqlx::SqlitePool;

use crate::models::leak_log::{self, CountBucket, LeakLog, format};

pub const RECENT_LIMIT: i64 = 10;
pub const REGION_LIMIT: i64 = 10;
pub const MISSING_REGION: &str = "N/A";

// ---------- Types ----------

/// One row of the dashboard's recent-activity table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentEntry {
    pub domain: String,
    pub category: String,
    pub region: Option<String>,
    pub fetch_date: String,
}

impl RecentEntry {
    /// The region, or `N/A` when absent or blank.
    pub fn region_display(&self) -> &str {
        match self.region.as_deref() {
            Some(r) if !r.trim().is_empty() => r,
            _ => MISSING_REGION,
        }
    }
}

impl From<&LeakLog> for RecentEntry {
    fn from(log: &LeakLog) -> Self {
        let non_blank = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        Self {
            domain: non_blank(&log.source).unwrap_or_else(|| format::UNKNOWN.to_string()),
            category: non_blank(&log.log_type).unwrap_or_else(|| format::GENERAL.to_string()),
            region: non_blank(&log.channel),
            fetch_date: non_blank(&log.detection_date).unwrap_or_else(|| log.created_at.clone()),
        }
    }
}

/// Everything the dashboard view displays. Aggregation happens here, not in the view.
#[derive(Debug, Clone, Default)]
pub struct DashboardStats {
    pub total_assets: i64,
    pub unique_domains: i64,
    pub categories_count: i64,
    pub regions_count: i64,
    pub category_stats: Vec<CountBucket>,
    pub regional_data: Vec<CountBucket>,
    pub recent_data: Vec<RecentEntry>,
}

// ---------- Queries ----------

pub async fn load(pool: &SqlitePool) -> Result<DashboardStats, sqlx::Error> {
    let (total_assets, unique_domains, categories_count, regions_count) =
        sqlx::query_as::<_, (i64, i64, i64, i64)>(
            "SELECT COUNT(*), \
                    COUNT(DISTINCT NULLIF(TRIM(source), '')), \
                    COUNT(DISTINCT NULLIF(TRIM(type), '')), \
                    COUNT(DISTINCT NULLIF(TRIM(channel), '')) \
             FROM leak_logs",
        )
        .fetch_one(pool)
        .await?;

    let category_stats = leak_log::queries::count_by(pool, "type", None).await?;
    let regional_data = leak_log::queries::count_by(pool, "channel", Some(REGION_LIMIT)).await?;
    let recent_data = leak_log::find_recent(pool, RECENT_LIMIT)
        .await?
        .iter()
        .map(RecentEntry::from)
        .collect();

    Ok(DashboardStats {
        total_assets,
        unique_domains,
        categories_count,
        regions_count,
        category_stats,
        regional_data,
        recent_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(region: Option<&str>) -> RecentEntry {
        RecentEntry {
            domain: "example.com".to_string(),
            category: "credentials".to_string(),
            region: region.map(String::from),
            fetch_date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn missing_region_displays_na() {
        assert_eq!(entry(None).region_display(), "N/A");
        assert_eq!(entry(Some(" ")).region_display(), "N/A");
        assert_eq!(entry(Some("@dumps")).region_display(), "@dumps");
    }

    #[test]
    fn recent_entry_falls_back_to_created_at() {
        let log = LeakLog {
            id: 1,
            channel: Some(String::new()),
            source: Some("example.com".to_string()),
            content: None,
            author: None,
            detection_date: None,
            log_type: None,
            created_at: "2025-02-02 10:00:00".to_string(),
        };
        let e = RecentEntry::from(&log);
        assert_eq!(e.domain, "example.com");
        assert_eq!(e.category, "General");
        assert_eq!(e.region, None);
        assert_eq!(e.fetch_date, "2025-02-02 10:00:00");
    }
}

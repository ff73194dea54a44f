use askama::Template;
use serde::Serialize;

use super::{PageContext, script_json};
use crate::models::dashboard::DashboardStats;
use crate::models::leak_log::CountBucket;

/// Bar/pie colours, cycled when there are more buckets than entries.
pub const PALETTE: [&str; 8] = [
    "#1e90ff", "#87ceeb", "#00bfff", "#4682b4", "#5f9ea0", "#ff6b6b", "#4ecdc4", "#45b7d1",
];

/// Chart.js configuration, serialized as-is into the page.
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: &'static str,
    pub data: Vec<i64>,
    pub background_color: Vec<&'static str>,
}

impl ChartConfig {
    /// Labels come from the bucket names and values from the counts.
    pub fn from_buckets(kind: &'static str, label: &'static str, buckets: &[CountBucket]) -> Self {
        Self {
            kind,
            data: ChartData {
                labels: buckets.iter().map(|b| b.label.clone()).collect(),
                datasets: vec![ChartDataset {
                    label,
                    data: buckets.iter().map(|b| b.count).collect(),
                    background_color: PALETTE.iter().cycle().take(buckets.len()).copied().collect(),
                }],
            },
        }
    }

    pub fn series_len(&self) -> usize {
        self.data.datasets.first().map_or(0, |d| d.data.len())
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub stats: DashboardStats,
    pub bar_chart: ChartConfig,
    pub pie_chart: ChartConfig,
    pub bar_chart_json: String,
    pub pie_chart_json: String,
}

impl DashboardTemplate {
    pub fn new(ctx: PageContext, stats: DashboardStats) -> Self {
        let bar_chart = ChartConfig::from_buckets("bar", "Records per log type", &stats.category_stats);
        let pie_chart = ChartConfig::from_buckets("pie", "Records per channel", &stats.regional_data);
        let bar_chart_json = script_json(&bar_chart);
        let pie_chart_json = script_json(&pie_chart);
        Self { ctx, stats, bar_chart, pie_chart, bar_chart_json, pie_chart_json }
    }
}

use crate::{AppState, error::AppError};
use analytics::{Insights, MetricsResult};
use axum::{Json, extract::State};
use configuration::ReportSettings;
use core_types::DailyRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which city and period a document describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLabel {
    pub city: String,
    pub period: String,
}

/// Everything the KPI cards and insight boxes of a dashboard need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDocument {
    pub report: ReportLabel,
    pub metrics: MetricsResult,
    pub insights: Insights,
}

impl DashboardDocument {
    pub fn new(report: &ReportSettings, metrics: MetricsResult) -> Self {
        let insights = Insights::from_metrics(&metrics);
        Self {
            report: ReportLabel {
                city: report.city.clone(),
                period: report.period_label.clone(),
            },
            metrics,
            insights,
        }
    }
}

/// # GET /api/metrics
/// Loads the window from the source and computes the metrics on every request.
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardDocument>, AppError> {
    let records = state.source.load_daily_records().await?;
    let metrics = state.engine.compute(&records)?;
    Ok(Json(DashboardDocument::new(&state.report, metrics)))
}

/// # GET /api/records
/// The daily series in date order, for charts and the raw data view.
pub async fn get_daily_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DailyRecord>>, AppError> {
    let mut records = state.source.load_daily_records().await?;
    records.sort_by_key(|r| r.date);
    Ok(Json(records))
}

use chrono::NaiveDate;
use core_types::DailyRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete set of metrics for one reporting window.
///
/// This struct is the final output of the `MetricsEngine` and the data transfer
/// object handed to every presentation surface (CLI tables, JSON, HTTP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    // I. Window
    pub record_count: usize,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,

    // II. Sales
    pub total_sales: f64,
    pub avg_sales: f64,
    pub max_sales: f64,
    pub max_sales_date: NaiveDate,

    // III. Weather
    pub avg_temperature_c: f64,
    pub max_wind_speed_mph: f64,
    pub max_wind_date: NaiveDate,
    pub avg_precipitation_mm: f64,

    // IV. Weather vs. sales
    pub corr_temp_sales: Option<f64>, // None only under the lenient policy
    pub corr_wind_sales: Option<f64>,
    pub corr_precip_sales: Option<f64>,

    // V. Temperature cohorts
    pub avg_sales_cold_days: Option<f64>, // None only under the lenient policy
    pub avg_sales_warm_days: Option<f64>,
}

/// A weather variable paired with daily sales for a Pearson correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationPair {
    TemperatureSales,
    WindSales,
    PrecipitationSales,
}

impl CorrelationPair {
    pub const ALL: [CorrelationPair; 3] = [
        CorrelationPair::TemperatureSales,
        CorrelationPair::WindSales,
        CorrelationPair::PrecipitationSales,
    ];

    /// The weather side of the pair for one day. The other side is always `daily_sales`.
    pub fn weather_value(&self, record: &DailyRecord) -> f64 {
        match self {
            CorrelationPair::TemperatureSales => record.avg_temperature_c,
            CorrelationPair::WindSales => record.max_wind_speed_mph,
            CorrelationPair::PrecipitationSales => record.avg_precipitation_mm,
        }
    }
}

impl fmt::Display for CorrelationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CorrelationPair::TemperatureSales => "temperature/sales",
            CorrelationPair::WindSales => "wind speed/sales",
            CorrelationPair::PrecipitationSales => "precipitation/sales",
        };
        f.write_str(name)
    }
}

/// A partition of days by average temperature around `COLD_DAY_THRESHOLD_C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    Cold,
    Warm,
}

impl Cohort {
    pub fn of(record: &DailyRecord) -> Self {
        if record.avg_temperature_c < crate::engine::COLD_DAY_THRESHOLD_C {
            Cohort::Cold
        } else {
            Cohort::Warm
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cohort::Cold => f.write_str("cold"),
            Cohort::Warm => f.write_str("warm"),
        }
    }
}

use crate::report::MetricsResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The sign of a correlation as read off by a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Positive,
    /// Includes r == 0.
    Negative,
    Undetermined,
}

impl Direction {
    pub fn of(correlation: Option<f64>) -> Self {
        match correlation {
            Some(r) if r > 0.0 => Direction::Positive,
            Some(_) => Direction::Negative,
            None => Direction::Undetermined,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Positive => f.write_str("positive"),
            Direction::Negative => f.write_str("negative"),
            Direction::Undetermined => f.write_str("undetermined"),
        }
    }
}

/// Whether warm days sold more than cold days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Undetermined,
}

/// A qualitative reading of a `MetricsResult`, used to phrase the dashboard's
/// insight lines and to colour the cohort comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub temperature_direction: Direction,
    pub wind_direction: Direction,
    pub precipitation_direction: Direction,
    pub warm_vs_cold: Trend,
}

impl Insights {
    pub fn from_metrics(metrics: &MetricsResult) -> Self {
        let warm_vs_cold = match (metrics.avg_sales_warm_days, metrics.avg_sales_cold_days) {
            (Some(warm), Some(cold)) if warm > cold => Trend::Up,
            (Some(_), Some(_)) => Trend::Down,
            _ => Trend::Undetermined,
        };

        Self {
            temperature_direction: Direction::of(metrics.corr_temp_sales),
            wind_direction: Direction::of(metrics.corr_wind_sales),
            precipitation_direction: Direction::of(metrics.corr_precip_sales),
            warm_vs_cold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn metrics(corr: Option<f64>, cold: Option<f64>, warm: Option<f64>) -> MetricsResult {
        let date = NaiveDate::from_ymd_opt(2022, 2, 10).unwrap();
        MetricsResult {
            record_count: 2,
            period_start: date,
            period_end: date,
            total_sales: 0.0,
            avg_sales: 0.0,
            max_sales: 0.0,
            max_sales_date: date,
            avg_temperature_c: 0.0,
            max_wind_speed_mph: 0.0,
            max_wind_date: date,
            avg_precipitation_mm: 0.0,
            corr_temp_sales: corr,
            corr_wind_sales: corr.map(|r| -r),
            corr_precip_sales: Some(0.0),
            avg_sales_cold_days: cold,
            avg_sales_warm_days: warm,
        }
    }

    #[test]
    fn reads_correlation_signs() {
        let insights = Insights::from_metrics(&metrics(Some(0.42), Some(1.0), Some(2.0)));
        assert_eq!(insights.temperature_direction, Direction::Positive);
        assert_eq!(insights.wind_direction, Direction::Negative);
        assert_eq!(insights.precipitation_direction, Direction::Negative);
        assert_eq!(insights.warm_vs_cold, Trend::Up);
    }

    #[test]
    fn equal_cohorts_read_as_down() {
        let insights = Insights::from_metrics(&metrics(Some(0.1), Some(5.0), Some(5.0)));
        assert_eq!(insights.warm_vs_cold, Trend::Down);
    }

    #[test]
    fn missing_values_are_undetermined() {
        let insights = Insights::from_metrics(&metrics(None, None, Some(5.0)));
        assert_eq!(insights.temperature_direction, Direction::Undetermined);
        assert_eq!(insights.wind_direction, Direction::Undetermined);
        assert_eq!(insights.warm_vs_cold, Trend::Undetermined);
        assert_eq!(Direction::Undetermined.to_string(), "undetermined");
    }
}

use crate::error::AnalyticsError;
use crate::report::{Cohort, CorrelationPair, MetricsResult};
use crate::stats::{first_max_by, mean, pearson};
use core_types::{DailyRecord, DegeneratePolicy};

/// Days with an average temperature strictly below this value (°C) are "cold".
pub const COLD_DAY_THRESHOLD_C: f64 = 5.0;

/// A stateless calculator for deriving sales and weather metrics from daily records.
///
/// The engine is `Copy` and holds nothing but its `DegeneratePolicy`, so a single
/// instance can be shared freely between callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsEngine {
    policy: DegeneratePolicy,
}

impl MetricsEngine {
    /// Creates an engine with the strict policy: undefined metrics are errors.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// The main entry point for calculating metrics over one reporting window.
    ///
    /// # Arguments
    ///
    /// * `records` - The daily records of the window, in any order. Dates must be unique.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `MetricsResult` or an `AnalyticsError`. Empty input and
    /// duplicate dates always fail. Zero-variance correlations and empty cohorts fail
    /// under `DegeneratePolicy::Strict` and become `None` under `DegeneratePolicy::Lenient`.
    pub fn compute(&self, records: &[DailyRecord]) -> Result<MetricsResult, AnalyticsError> {
        let days = sorted_by_date(records)?;

        let sales: Vec<f64> = days.iter().map(|d| d.daily_sales).collect();
        let temperatures: Vec<f64> = days.iter().map(|d| d.avg_temperature_c).collect();
        let precipitation: Vec<f64> = days.iter().map(|d| d.avg_precipitation_mm).collect();

        let (peak_sales_day, max_sales) =
            first_max_by(&days, |d| d.daily_sales).ok_or(AnalyticsError::EmptyInput)?;
        let (peak_wind_day, max_wind_speed_mph) =
            first_max_by(&days, |d| d.max_wind_speed_mph).ok_or(AnalyticsError::EmptyInput)?;

        // Correlations are evaluated before cohorts, so under the strict policy a
        // degenerate series is the error reported when both problems are present.
        let corr_temp_sales =
            self.tolerate(self.correlation(&days, CorrelationPair::TemperatureSales))?;
        let corr_wind_sales = self.tolerate(self.correlation(&days, CorrelationPair::WindSales))?;
        let corr_precip_sales =
            self.tolerate(self.correlation(&days, CorrelationPair::PrecipitationSales))?;

        let avg_sales_cold_days = self.tolerate(self.cohort_mean(&days, Cohort::Cold))?;
        let avg_sales_warm_days = self.tolerate(self.cohort_mean(&days, Cohort::Warm))?;

        let result = MetricsResult {
            record_count: days.len(),
            period_start: days[0].date,
            period_end: days[days.len() - 1].date,
            total_sales: sales.iter().sum(),
            avg_sales: mean(&sales).ok_or(AnalyticsError::EmptyInput)?,
            max_sales,
            max_sales_date: peak_sales_day.date,
            avg_temperature_c: mean(&temperatures).ok_or(AnalyticsError::EmptyInput)?,
            max_wind_speed_mph,
            max_wind_date: peak_wind_day.date,
            avg_precipitation_mm: mean(&precipitation).ok_or(AnalyticsError::EmptyInput)?,
            corr_temp_sales,
            corr_wind_sales,
            corr_precip_sales,
            avg_sales_cold_days,
            avg_sales_warm_days,
        };

        tracing::debug!(
            records = result.record_count,
            total_sales = result.total_sales,
            policy = ?self.policy,
            "Computed metrics."
        );

        Ok(result)
    }

    /// Pearson correlation between one weather variable and daily sales.
    ///
    /// Fails with `DegenerateSeries` when either series has zero variance (which
    /// includes a window of a single day). Input order does not matter.
    pub fn correlation(
        &self,
        records: &[DailyRecord],
        pair: CorrelationPair,
    ) -> Result<f64, AnalyticsError> {
        if records.is_empty() {
            return Err(AnalyticsError::EmptyInput);
        }

        let weather: Vec<f64> = records.iter().map(|r| pair.weather_value(r)).collect();
        let sales: Vec<f64> = records.iter().map(|r| r.daily_sales).collect();

        pearson(&weather, &sales).ok_or(AnalyticsError::DegenerateSeries(pair))
    }

    /// Mean daily sales over the days of one temperature cohort.
    pub fn cohort_mean(
        &self,
        records: &[DailyRecord],
        cohort: Cohort,
    ) -> Result<f64, AnalyticsError> {
        if records.is_empty() {
            return Err(AnalyticsError::EmptyInput);
        }

        let sales: Vec<f64> = records
            .iter()
            .filter(|r| Cohort::of(r) == cohort)
            .map(|r| r.daily_sales)
            .collect();

        mean(&sales).ok_or(AnalyticsError::EmptyCohort(cohort))
    }

    /// Applies the degenerate policy to the outcome of a single metric.
    fn tolerate(&self, outcome: Result<f64, AnalyticsError>) -> Result<Option<f64>, AnalyticsError> {
        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(
                err @ (AnalyticsError::EmptyCohort(_) | AnalyticsError::DegenerateSeries(_)),
            ) if self.policy.is_lenient() => {
                tracing::warn!(reason = %err, "Metric is undefined for this window; reporting it as absent.");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

/// Copies the records into date order and rejects empty input and repeated dates.
fn sorted_by_date(records: &[DailyRecord]) -> Result<Vec<DailyRecord>, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }

    let mut days = records.to_vec();
    days.sort_by_key(|d| d.date);

    if let Some(pair) = days.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(AnalyticsError::DuplicateDate(pair[0].date));
    }

    Ok(days)
}

use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the reporting window: the day's revenue next to the weather
/// that was observed on it.
///
/// Construct it with [`DailyRecord::new`] (or deserialize it, which goes through
/// the same checks) so that every record reaching the analytics engine holds
/// finite numbers and non-negative sales, precipitation and wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDailyRecord")]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Revenue for the day, in USD.
    pub daily_sales: f64,
    pub avg_temperature_c: f64,
    pub avg_precipitation_mm: f64,
    pub max_wind_speed_mph: f64,
}

impl DailyRecord {
    pub fn new(
        date: NaiveDate,
        daily_sales: f64,
        avg_temperature_c: f64,
        avg_precipitation_mm: f64,
        max_wind_speed_mph: f64,
    ) -> Result<Self, CoreError> {
        ensure_non_negative("daily_sales", daily_sales)?;
        ensure_finite("avg_temperature_c", avg_temperature_c)?;
        ensure_non_negative("avg_precipitation_mm", avg_precipitation_mm)?;
        ensure_non_negative("max_wind_speed_mph", max_wind_speed_mph)?;

        Ok(Self {
            date,
            daily_sales,
            avg_temperature_c,
            avg_precipitation_mm,
            max_wind_speed_mph,
        })
    }
}

/// The unchecked shape of a record as it arrives from a file or an API.
///
/// Field aliases accept the upper-case column names used by the warehouse
/// table, so an export of that table can be read back without renaming.
#[derive(Debug, Deserialize)]
struct RawDailyRecord {
    #[serde(alias = "DATE")]
    date: NaiveDate,
    #[serde(alias = "DAILY_SALES")]
    daily_sales: f64,
    #[serde(alias = "AVG_TEMPERATURE_CELSIUS")]
    avg_temperature_c: f64,
    #[serde(alias = "AVG_PRECIPITATION_MILLIMETERS")]
    avg_precipitation_mm: f64,
    #[serde(alias = "MAX_WIND_SPEED_100M_MPH")]
    max_wind_speed_mph: f64,
}

impl TryFrom<RawDailyRecord> for DailyRecord {
    type Error = CoreError;

    fn try_from(raw: RawDailyRecord) -> Result<Self, Self::Error> {
        DailyRecord::new(
            raw.date,
            raw.daily_sales,
            raw.avg_temperature_c,
            raw.avg_precipitation_mm,
            raw.max_wind_speed_mph,
        )
    }
}

fn ensure_finite(field: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(
            field.to_string(),
            format!("expected a finite number, got {value}"),
        ))
    }
}

fn ensure_non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CoreError::InvalidInput(
            field.to_string(),
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feb(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 2, day).unwrap()
    }

    #[test]
    fn accepts_freezing_temperatures() {
        let record = DailyRecord::new(feb(1), 1200.0, -3.5, 0.0, 12.0).unwrap();
        assert_eq!(record.avg_temperature_c, -3.5);
    }

    #[test]
    fn rejects_negative_sales() {
        let err = DailyRecord::new(feb(1), -1.0, 4.0, 0.0, 12.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "daily_sales"));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(DailyRecord::new(feb(1), 10.0, f64::NAN, 0.0, 12.0).is_err());
        assert!(DailyRecord::new(feb(1), 10.0, 4.0, f64::INFINITY, 12.0).is_err());
        assert!(DailyRecord::new(feb(1), 10.0, 4.0, 0.0, -0.5).is_err());
    }

    #[test]
    fn deserializes_warehouse_column_names() {
        let json = r#"{
            "DATE": "2022-02-03",
            "DAILY_SALES": 5321.5,
            "AVG_TEMPERATURE_CELSIUS": 6.2,
            "AVG_PRECIPITATION_MILLIMETERS": 1.4,
            "MAX_WIND_SPEED_100M_MPH": 31.0
        }"#;
        let record: DailyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, feb(3));
        assert_eq!(record.daily_sales, 5321.5);
        assert_eq!(record.max_wind_speed_mph, 31.0);
    }

    #[test]
    fn deserialization_runs_validation() {
        let json = r#"{
            "date": "2022-02-03",
            "daily_sales": 100.0,
            "avg_temperature_c": 6.2,
            "avg_precipitation_mm": -1.0,
            "max_wind_speed_mph": 31.0
        }"#;
        let err = serde_json::from_str::<DailyRecord>(json).unwrap_err();
        assert!(err.to_string().contains("avg_precipitation_mm"));
    }
}

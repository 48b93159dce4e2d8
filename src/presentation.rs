//! Terminal rendering of a report: KPI table, insight lines and the raw data table.

use analytics::{Direction, Trend};
use chrono::NaiveDate;
use comfy_table::{Table, presets::UTF8_FULL};
use core_types::DailyRecord;
use web_server::DashboardDocument;

/// Formats a dollar amount with thousands separators, e.g. `$12,345.67`.
pub fn format_usd(amount: f64, decimals: usize) -> String {
    let digits = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    // Amounts that round to zero print without a sign.
    let rounds_to_zero = digits.chars().all(|c| c == '0' || c == '.');

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if amount < 0.0 && !rounds_to_zero {
        out.push('-');
    }
    out.push('$');
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `Feb 07`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// `Feb 07, 2022`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

fn format_r(r: Option<f64>) -> String {
    r.map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}"))
}

fn format_optional_usd(amount: Option<f64>) -> String {
    amount.map_or_else(|| "n/a".to_string(), |a| format_usd(a, 0))
}

pub fn kpi_table(doc: &DashboardDocument) -> Table {
    let m = &doc.metrics;
    let trend = match doc.insights.warm_vs_cold {
        Trend::Up => "warm days sold more",
        Trend::Down => "cold days sold as much or more",
        Trend::Undetermined => "no comparison possible",
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Value", "Detail"])
        .add_row(vec![
            "Total Revenue".to_string(),
            format_usd(m.total_sales, 0),
            doc.report.period.clone(),
        ])
        .add_row(vec![
            "Peak Day".to_string(),
            format_usd(m.max_sales, 0),
            short_date(m.max_sales_date),
        ])
        .add_row(vec![
            "Avg Daily Revenue".to_string(),
            format_usd(m.avg_sales, 0),
            format!("{} days", m.record_count),
        ])
        .add_row(vec![
            "Avg Temperature".to_string(),
            format!("{:.1}°C", m.avg_temperature_c),
            "Monthly average".to_string(),
        ])
        .add_row(vec![
            "Peak Wind".to_string(),
            format!("{:.0} mph", m.max_wind_speed_mph),
            short_date(m.max_wind_date),
        ])
        .add_row(vec![
            "Avg Precipitation".to_string(),
            format!("{:.1} mm/day", m.avg_precipitation_mm),
            String::new(),
        ])
        .add_row(vec![
            "Cold Days (<5°C)".to_string(),
            format_optional_usd(m.avg_sales_cold_days),
            "Average daily revenue".to_string(),
        ])
        .add_row(vec![
            "Warm Days (≥5°C)".to_string(),
            format_optional_usd(m.avg_sales_warm_days),
            trend.to_string(),
        ])
        .add_row(vec![
            "Temp ↔ Sales r".to_string(),
            format_r(m.corr_temp_sales),
            doc.insights.temperature_direction.to_string(),
        ])
        .add_row(vec![
            "Wind ↔ Sales r".to_string(),
            format_r(m.corr_wind_sales),
            doc.insights.wind_direction.to_string(),
        ])
        .add_row(vec![
            "Precip ↔ Sales r".to_string(),
            format_r(m.corr_precip_sales),
            doc.insights.precipitation_direction.to_string(),
        ]);
    table
}

/// The three plain-language observations shown under the KPIs.
pub fn insight_lines(doc: &DashboardDocument) -> Vec<String> {
    let m = &doc.metrics;
    let i = &doc.insights;

    let temperature = match i.temperature_direction {
        Direction::Undetermined => format!(
            "Temperature correlation: r = {}. Temperature did not vary enough to relate it to sales.",
            format_r(m.corr_temp_sales)
        ),
        direction => format!(
            "Temperature correlation: r = {}. A {} relationship between temperature and daily sales. \
             Cold days (<5°C) averaged {} vs warm days at {}.",
            format_r(m.corr_temp_sales),
            direction,
            format_optional_usd(m.avg_sales_cold_days),
            format_optional_usd(m.avg_sales_warm_days)
        ),
    };

    let wind = format!(
        "Wind speed correlation: r = {}. Wind speed shows a {} correlation with revenue. \
         Peak wind of {:.0} mph occurred on {}.",
        format_r(m.corr_wind_sales),
        i.wind_direction,
        m.max_wind_speed_mph,
        short_date(m.max_wind_date)
    );

    let precipitation = format!(
        "Precipitation correlation: r = {}. Average precipitation was {:.1} mm/day throughout {}.",
        format_r(m.corr_precip_sales),
        m.avg_precipitation_mm,
        doc.report.period
    );

    vec![temperature, wind, precipitation]
}

/// The raw data view, oldest day first.
pub fn records_table(records: &[DailyRecord]) -> Table {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.date);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Date",
        "Daily Sales",
        "Avg Temperature (°C)",
        "Avg Precipitation (mm)",
        "Max Wind Speed (mph)",
    ]);
    for r in &sorted {
        table.add_row(vec![
            long_date(r.date),
            format_usd(r.daily_sales, 2),
            format!("{:.1}", r.avg_temperature_c),
            format!("{:.2}", r.avg_precipitation_mm),
            format!("{:.1}", r.max_wind_speed_mph),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::MetricsEngine;
    use configuration::ReportSettings;

    fn feb(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 2, day).unwrap()
    }

    fn sample() -> Vec<DailyRecord> {
        vec![
            DailyRecord::new(feb(3), 14250.6, 7.0, 2.25, 41.0).unwrap(),
            DailyRecord::new(feb(1), 9100.0, 1.5, 0.0, 18.0).unwrap(),
            DailyRecord::new(feb(2), 11020.75, 4.0, 5.5, 27.0).unwrap(),
        ]
    }

    #[test]
    fn formats_dollars() {
        assert_eq!(format_usd(600.0, 0), "$600");
        assert_eq!(format_usd(1234567.891, 2), "$1,234,567.89");
        assert_eq!(format_usd(100000.0, 0), "$100,000");
        assert_eq!(format_usd(0.0, 2), "$0.00");
        assert_eq!(format_usd(-2500.0, 0), "-$2,500");
        assert_eq!(format_usd(-0.4, 0), "$0");
        assert_eq!(format_usd(-0.004, 2), "$0.00");
        assert_eq!(format_usd(-0.6, 0), "-$1");
    }

    #[test]
    fn formats_dates() {
        assert_eq!(short_date(feb(7)), "Feb 07");
        assert_eq!(long_date(feb(28)), "Feb 28, 2022");
    }

    #[test]
    fn kpi_table_shows_peaks_with_dates() {
        let metrics = MetricsEngine::new().compute(&sample()).unwrap();
        let doc = DashboardDocument::new(&ReportSettings::default(), metrics);

        let rendered = kpi_table(&doc).to_string();
        assert!(rendered.contains("$34,371"));
        assert!(rendered.contains("$14,251"));
        assert!(rendered.contains("Feb 03"));
        assert!(rendered.contains("41 mph"));
        assert!(rendered.contains("February 2022"));
        assert!(rendered.contains("warm days sold more"));
        assert!(rendered.contains("Temp ↔ Sales r"));
    }

    #[test]
    fn insight_lines_follow_the_correlations() {
        let metrics = MetricsEngine::new().compute(&sample()).unwrap();
        let doc = DashboardDocument::new(&ReportSettings::default(), metrics);

        let lines = insight_lines(&doc);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("A positive relationship"));
        assert!(lines[0].contains("Cold days (<5°C) averaged $10,060"));
        assert!(lines[1].contains("Peak wind of 41 mph occurred on Feb 03"));
        assert!(lines[2].contains("2.6 mm/day throughout February 2022"));
    }

    #[test]
    fn records_table_is_sorted_and_formatted() {
        let rendered = records_table(&sample()).to_string();
        let first = rendered.find("Feb 01, 2022").unwrap();
        let last = rendered.find("Feb 03, 2022").unwrap();
        assert!(first < last);
        assert!(rendered.contains("$14,250.60"));
        assert!(rendered.contains("5.50"));
    }
}

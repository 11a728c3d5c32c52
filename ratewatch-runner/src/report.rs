//! Console report: series listing followed by the summary block.

use chrono::NaiveDate;
use ratewatch_core::{DateKey, RateSeries, RateStatistics};

const NO_DATA: &str = "No data";

/// Format the text report for a series over `start..=end`.
///
/// Best and worst are paired with the earliest date that reached them.
pub fn format_report(
    series: &RateSeries,
    start: NaiveDate,
    end: NaiveDate,
    stats: &RateStatistics,
) -> String {
    let mut report = series_listing(series);

    report.push_str("Report:\n");
    report.push_str("-------\n");
    report.push_str(&format!(
        "Date Range: {} - {}\n",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    ));
    report.push_str(&format!("Number of days: {}\n", series.len()));
    report.push_str(&format!(
        "Best exchange rate: {}\n",
        rate_with_date(series, stats.best())
    ));
    report.push_str(&format!(
        "Worst exchange rate: {}\n",
        rate_with_date(series, stats.worst())
    ));
    let average = stats
        .average()
        .map(|a| format!("{a:.5}"))
        .unwrap_or_else(|| NO_DATA.to_string());
    report.push_str(&format!("Average exchange rate: {average}\n"));
    report
}

fn series_listing(series: &RateSeries) -> String {
    if series.is_empty() {
        return "(no rates in range)\n\n".to_string();
    }
    let mut listing = format!("{:<12} {:>10}\n", "Date", "Rate");
    for point in series {
        listing.push_str(&listing_row(point.date, point.rate));
    }
    listing.push('\n');
    listing
}

/// One `date  rate` line of the series listing.
fn listing_row(date: DateKey, rate: f64) -> String {
    format!("{:<12} {:>10.5}\n", date.to_string(), rate)
}

fn rate_with_date(series: &RateSeries, rate: Option<f64>) -> String {
    match rate {
        Some(r) => match series.first_date_with_rate(r) {
            Some(date) => format!("{r:.5} (on {date})"),
            None => format!("{r:.5}"),
        },
        None => NO_DATA.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratewatch_core::RatePoint;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn series(rates: &[(u32, f64)]) -> RateSeries {
        RateSeries::from_points(rates.iter().map(|&(day, rate)| RatePoint {
            date: DateKey::new(d(day)),
            rate,
        }))
        .unwrap()
    }

    #[test]
    fn empty_series_reports_no_data() {
        let s = RateSeries::new();
        let stats = RateStatistics::compute(&s);
        let text = format_report(&s, d(1), d(30), &stats);

        assert!(text.contains("Report:"));
        assert!(text.contains("Date Range: 2024-05-01 - 2024-05-30"));
        assert!(text.contains("Number of days: 0"));
        assert!(text.contains("Best exchange rate: No data"));
        assert!(text.contains("Worst exchange rate: No data"));
        assert!(text.contains("Average exchange rate: No data"));
    }

    #[test]
    fn statistics_are_paired_with_dates() {
        let s = series(&[(1, 1.10), (3, 1.20)]);
        let stats = RateStatistics::compute(&s);
        let text = format_report(&s, d(1), d(3), &stats);

        assert!(text.contains("Number of days: 2"));
        assert!(text.contains("Best exchange rate: 1.20000 (on 2024/05/03)"));
        assert!(text.contains("Worst exchange rate: 1.10000 (on 2024/05/01)"));
        assert!(text.contains("Average exchange rate: 1.15000"));
        assert!(text.contains(&listing_row(DateKey::new(d(3)), 1.20)));
        assert!(text.contains("2024/05/03      1.20000\n"));
    }

    #[test]
    fn ties_report_earliest_date() {
        let s = series(&[(2, 1.3), (4, 1.1), (6, 1.3), (8, 1.1)]);
        let stats = RateStatistics::compute(&s);
        let text = format_report(&s, d(2), d(8), &stats);

        assert!(text.contains("Best exchange rate: 1.30000 (on 2024/05/02)"));
        assert!(text.contains("Worst exchange rate: 1.10000 (on 2024/05/04)"));
    }
}

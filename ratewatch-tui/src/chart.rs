//! Rate chart widget - line chart of a rate series
//!
//! Displays:
//! - The rate line, one point per date with data (gaps stay gaps)
//! - Best and worst rates marked at their earliest date
//! - First/middle/last date labels on the x axis
//! - Padded rate bounds on the y axis

use chrono::Days;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};
use ratewatch_core::{DateKey, RateSeries};

use crate::theme::Theme;

pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Exchange Rate";
pub const NO_DATA: &str = "No data";

/// Line chart of a rate series.
pub struct RateChart<'a> {
    series: &'a RateSeries,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> RateChart<'a> {
    pub fn new(series: &'a RateSeries, title: &'a str, theme: &'a Theme) -> Self {
        Self {
            series,
            title,
            theme,
        }
    }

    fn block(&self) -> Block<'a> {
        Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background))
    }

    fn render_empty(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }
        let row = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        Paragraph::new(NO_DATA)
            .alignment(Alignment::Center)
            .style(Style::default().fg(self.theme.warning))
            .render(row, buf);
    }
}

/// Days since `origin`, as a chart x coordinate.
fn day_offset(origin: DateKey, date: DateKey) -> f64 {
    (date.date() - origin.date()).num_days() as f64
}

/// Rate bounds padded by 5% of the range, or by 1% of the rate when flat.
pub fn padded_bounds(min: f64, max: f64) -> [f64; 2] {
    let range = max - min;
    let pad = if range > 0.0 {
        range * 0.05
    } else {
        (max.abs() * 0.01).max(1e-4)
    };
    [min - pad, max + pad]
}

impl<'a> Widget for RateChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (Some(first), Some(last)) = (self.series.first(), self.series.last()) else {
            self.render_empty(area, buf);
            return;
        };

        let origin = first.date;
        let data: Vec<(f64, f64)> = self
            .series
            .iter()
            .map(|p| (day_offset(origin, p.date), p.rate))
            .collect();

        let (y_min, y_max) = self
            .series
            .rates()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r), hi.max(r))
            });
        let [y_lower, y_upper] = padded_bounds(y_min, y_max);
        let y_mid = (y_lower + y_upper) / 2.0;

        let mark = |rate: f64| -> Vec<(f64, f64)> {
            self.series
                .first_date_with_rate(rate)
                .map(|d| vec![(day_offset(origin, d), rate)])
                .unwrap_or_default()
        };
        let best = mark(y_max);
        let worst = mark(y_min);

        let span_days = day_offset(origin, last.date);
        // A single point still needs a non-degenerate x range
        let x_upper = span_days.max(1.0);
        let mid_date = origin
            .date()
            .checked_add_days(Days::new((span_days / 2.0) as u64))
            .map(DateKey::new)
            .unwrap_or(origin);

        let line_color = self.theme.trend_color(first.rate, last.rate);
        let datasets = vec![
            Dataset::default()
                .name("Rate")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(line_color))
                .data(&data),
            Dataset::default()
                .name(format!("Best {y_max:.5}"))
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(self.theme.positive))
                .data(&best),
            Dataset::default()
                .name(format!("Worst {y_min:.5}"))
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(self.theme.negative))
                .data(&worst),
        ];

        let x_labels = vec![
            Span::raw(origin.to_string()),
            Span::raw(mid_date.to_string()),
            Span::raw(last.date.to_string()),
        ];
        let y_labels = vec![
            Span::raw(format!("{y_lower:.4}")),
            Span::raw(format!("{y_mid:.4}")),
            Span::raw(format!("{y_upper:.4}")),
        ];

        Chart::new(datasets)
            .block(self.block())
            .x_axis(
                Axis::default()
                    .title(Span::styled(
                        X_AXIS_TITLE,
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([0.0, x_upper])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        Y_AXIS_TITLE,
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratewatch_core::RatePoint;

    fn make_series(rates: &[(u32, f64)]) -> RateSeries {
        RateSeries::from_points(rates.iter().map(|&(day, rate)| RatePoint {
            date: DateKey::new(NaiveDate::from_ymd_opt(2024, 5, day).unwrap()),
            rate,
        }))
        .unwrap()
    }

    fn buffer_text(buf: &Buffer, area: Rect) -> String {
        let mut content = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            content.push('\n');
        }
        content
    }

    #[test]
    fn test_chart_renders_title_and_axes() {
        let theme = Theme::default();
        let series = make_series(&[(1, 1.0812), (2, 1.0850), (5, 1.0790)]);
        let chart = RateChart::new(&series, "AUD to NZD Exchange Rate", &theme);

        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);

        let content = buffer_text(&buf, area);
        assert!(content.contains("AUD to NZD Exchange Rate"));
        assert!(content.contains(X_AXIS_TITLE));
        assert!(content.contains(Y_AXIS_TITLE));
        assert!(content.contains("2024/05/01"));
        assert!(content.contains("2024/05/05"));
    }

    #[test]
    fn test_chart_empty_series() {
        let theme = Theme::default();
        let series = RateSeries::new();
        let chart = RateChart::new(&series, "AUD to NZD Exchange Rate", &theme);

        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);

        let content = buffer_text(&buf, area);
        assert!(content.contains(NO_DATA));
        assert!(content.contains("AUD to NZD Exchange Rate"));
    }

    #[test]
    fn test_chart_single_point_renders_without_panic() {
        let theme = Theme::default();
        let series = make_series(&[(3, 1.1)]);
        let chart = RateChart::new(&series, "USD to EUR Exchange Rate", &theme);

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);

        assert!(buffer_text(&buf, area).contains("2024/05/03"));
    }

    #[test]
    fn test_chart_tiny_area_does_not_panic() {
        let theme = Theme::default();
        let series = make_series(&[(1, 1.0), (2, 1.1)]);
        let area = Rect::new(0, 0, 20, 6);
        let mut buf = Buffer::empty(area);
        RateChart::new(&series, "x", &theme).render(area, &mut buf);

        let empty = RateSeries::new();
        let mut buf = Buffer::empty(area);
        RateChart::new(&empty, "x", &theme).render(area, &mut buf);
    }

    #[test]
    fn test_padded_bounds() {
        let [lo, hi] = padded_bounds(1.0, 2.0);
        assert!((lo - 0.95).abs() < 1e-12);
        assert!((hi - 2.05).abs() < 1e-12);

        let [lo, hi] = padded_bounds(1.5, 1.5);
        assert!(lo < 1.5 && hi > 1.5);
    }
}

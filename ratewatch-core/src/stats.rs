//! Summary statistics over a rate series.
//!
//! Best is the highest rate, worst the lowest, average the arithmetic mean.
//! An empty series has no statistics at all rather than zeros.

use crate::domain::RateSeries;
use serde::{Deserialize, Serialize};

/// Statistics of a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub best: f64,
    pub worst: f64,
    pub average: f64,
    pub count: usize,
}

/// Statistics for a series, or the explicit no-data state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RateStatistics {
    NoData,
    Computed(SummaryStats),
}

impl RateStatistics {
    pub fn compute(series: &RateSeries) -> Self {
        let mut rates = series.rates();
        let Some(first) = rates.next() else {
            return Self::NoData;
        };

        let (best, worst, sum, count) = rates.fold(
            (first, first, first, 1usize),
            |(best, worst, sum, count), r| (best.max(r), worst.min(r), sum + r, count + 1),
        );

        Self::Computed(SummaryStats {
            best,
            worst,
            average: sum / count as f64,
            count,
        })
    }

    pub fn best(&self) -> Option<f64> {
        self.summary().map(|s| s.best)
    }

    pub fn worst(&self) -> Option<f64> {
        self.summary().map(|s| s.worst)
    }

    pub fn average(&self) -> Option<f64> {
        self.summary().map(|s| s.average)
    }

    pub fn summary(&self) -> Option<&SummaryStats> {
        match self {
            Self::NoData => None,
            Self::Computed(s) => Some(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

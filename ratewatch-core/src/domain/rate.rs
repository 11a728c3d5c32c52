//! Rate points and the ordered rate series.

use super::date_key::DateKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One observed exchange rate for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub date: DateKey,
    pub rate: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("point for {date} is not after the last point ({last})")]
    OutOfOrder { date: DateKey, last: DateKey },

    #[error("rate {rate} for {date} is not a positive finite number")]
    InvalidRate { date: DateKey, rate: f64 },
}

/// Rate points ordered by date ascending, at most one per date.
///
/// Dates that could not be fetched are simply absent; there are no
/// placeholder points. Points are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RatePoint>", into = "Vec<RatePoint>")]
pub struct RateSeries {
    points: Vec<RatePoint>,
}

impl RateSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from points, rejecting unordered, duplicate, or non-positive entries.
    pub fn from_points(points: impl IntoIterator<Item = RatePoint>) -> Result<Self, SeriesError> {
        let mut series = Self::new();
        for p in points {
            series.push(p)?;
        }
        Ok(series)
    }

    /// Append a point. Its date must be strictly after the current last date.
    pub fn push(&mut self, point: RatePoint) -> Result<(), SeriesError> {
        if !point.rate.is_finite() || point.rate <= 0.0 {
            return Err(SeriesError::InvalidRate {
                date: point.date,
                rate: point.rate,
            });
        }
        if let Some(last) = self.points.last() {
            if point.date <= last.date {
                return Err(SeriesError::OutOfOrder {
                    date: point.date,
                    last: last.date,
                });
            }
        }
        self.points.push(point);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[RatePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RatePoint> {
        self.points.iter()
    }

    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.rate)
    }

    pub fn first(&self) -> Option<&RatePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&RatePoint> {
        self.points.last()
    }

    /// Earliest date whose rate equals `rate` exactly.
    ///
    /// Used to pair an extreme statistic with a representative date; ties
    /// resolve to the first chronological occurrence.
    pub fn first_date_with_rate(&self, rate: f64) -> Option<DateKey> {
        self.points.iter().find(|p| p.rate == rate).map(|p| p.date)
    }
}

impl TryFrom<Vec<RatePoint>> for RateSeries {
    type Error = SeriesError;

    fn try_from(points: Vec<RatePoint>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<RateSeries> for Vec<RatePoint> {
    fn from(series: RateSeries) -> Self {
        series.points
    }
}

impl<'a> IntoIterator for &'a RateSeries {
    type Item = &'a RatePoint;
    type IntoIter = std::slice::Iter<'a, RatePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

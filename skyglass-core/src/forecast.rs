//! Collapses a 3-hourly forecast feed into daily summaries.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::model::{Condition, DailyForecast, DailyTemperature, ForecastCollection};

/// One 3-hourly forecast sample. Temperatures are in Kelvin.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReading {
    pub timestamp: i64,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub condition: Condition,
}

#[derive(Debug)]
struct DayBucket<'a> {
    date: NaiveDate,
    first: &'a ForecastReading,
    samples: Vec<f64>,
}

impl DayBucket<'_> {
    fn summarize(&self, offset: FixedOffset) -> DailyForecast {
        let min = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = self.samples.iter().sum::<f64>() / self.samples.len() as f64;

        DailyForecast {
            date: self.date,
            timestamp: local_midnight(self.date, offset),
            temperature: DailyTemperature { day: mean, night: min, min, max },
            humidity_pct: self.first.humidity_pct,
            wind_speed: self.first.wind_speed,
            condition: self.first.condition.clone(),
        }
    }
}

/// Group readings by calendar date (as seen at `utc_offset_secs`) and
/// summarise each date.
///
/// Every reading contributes its instantaneous, min and max temperature to its
/// date's samples: `max`/`min` are the extremes, `day` is the mean and `night`
/// equals `min`. Condition, humidity and wind come from the first reading of
/// the date. Dates keep first-encountered order and at most
/// [`MAX_FORECAST_DAYS`](crate::model::MAX_FORECAST_DAYS) are produced; the
/// first reading of an extra date ends aggregation.
pub fn aggregate(readings: &[ForecastReading], utc_offset_secs: i32) -> ForecastCollection {
    let offset = offset_or_utc(utc_offset_secs);
    let mut buckets: Vec<DayBucket<'_>> = Vec::new();

    for reading in readings {
        let Some(date) = local_date(reading.timestamp, offset) else {
            tracing::debug!(timestamp = reading.timestamp, "skipping reading with invalid timestamp");
            continue;
        };

        let bucket = match buckets.iter().position(|b| b.date == date) {
            Some(idx) => &mut buckets[idx],
            None => {
                if buckets.len() >= crate::model::MAX_FORECAST_DAYS {
                    break;
                }
                buckets.push(DayBucket { date, first: reading, samples: Vec::new() });
                let last = buckets.len() - 1;
                &mut buckets[last]
            }
        };

        bucket.samples.extend([reading.temperature, reading.temp_min, reading.temp_max]);
    }

    buckets.iter().map(|b| b.summarize(offset)).collect()
}

pub(crate) fn offset_or_utc(secs: i32) -> FixedOffset {
    FixedOffset::east_opt(secs).unwrap_or_else(|| {
        tracing::warn!(offset = secs, "ignoring out-of-range UTC offset");
        Utc.fix()
    })
}

pub(crate) fn local_date(timestamp: i64, offset: FixedOffset) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.with_timezone(&offset).date_naive())
}

pub(crate) fn local_midnight(date: NaiveDate, offset: FixedOffset) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().timestamp() - i64::from(offset.local_minus_utc()))
        .unwrap_or_default()
}

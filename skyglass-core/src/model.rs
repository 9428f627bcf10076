use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    condition::{self, BackgroundKey, ConditionIcon},
    daynight::LocationSignal,
    error::WeatherError,
};

/// Upper bound on the number of days kept in a [`ForecastCollection`].
pub const MAX_FORECAST_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates(Coordinates),
}

impl Query {
    /// Trimmed city query; blank names are rejected.
    pub fn city(name: &str) -> Result<Self, WeatherError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WeatherError::InvalidInput("blank city name".to_string()));
        }
        Ok(Query::City(name.to_string()))
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Result<Self, WeatherError> {
        let coords = Coordinates::new(latitude, longitude);
        if !coords.is_valid() {
            return Err(WeatherError::InvalidInput(format!(
                "coordinates {latitude}, {longitude}"
            )));
        }
        Ok(Query::Coordinates(coords))
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::City(name) => f.write_str(name),
            Query::Coordinates(c) => write!(f, "{:.4}, {:.4}", c.latitude, c.longitude),
        }
    }
}

/// Weather category, free-text description and upstream icon code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub category: String,
    pub description: String,
    pub icon: String,
}

impl Condition {
    pub fn new(category: &str, description: &str, icon: &str) -> Self {
        Self {
            category: category.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }

    pub fn icon_token(&self) -> ConditionIcon {
        condition::classify(&self.category, &self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Metres per second.
    pub speed: f64,
    /// Meteorological bearing in degrees.
    pub direction_deg: Option<f64>,
}

/// Observed weather at a location. Temperatures are in Kelvin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: String,
    pub coordinates: Option<Coordinates>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind: Wind,
    pub cloudiness_pct: Option<u8>,
    pub visibility_m: Option<u32>,
    pub condition: Condition,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub timezone_offset: Option<i32>,
}

impl CurrentConditions {
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.location_name.clone()
        } else {
            format!("{}, {}", self.location_name, self.country)
        }
    }

    pub fn location_signal(&self) -> LocationSignal {
        LocationSignal::from_parts(self.sunrise, self.sunset, self.timezone_offset)
    }

    pub fn background(&self, is_night: bool) -> BackgroundKey {
        condition::background_for(&self.condition.category, is_night)
    }
}

/// Temperatures (Kelvin) summarising one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub day: f64,
    pub night: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Unix seconds of local midnight of `date`.
    pub timestamp: i64,
    pub temperature: DailyTemperature,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub condition: Condition,
}

/// Up to [`MAX_FORECAST_DAYS`] daily summaries, one per calendar date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastCollection {
    days: Vec<DailyForecast>,
}

impl ForecastCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a day. Returns `false` without storing it when the collection is
    /// full or already holds that date.
    pub fn push(&mut self, day: DailyForecast) -> bool {
        if self.is_full() || self.contains_date(day.date) {
            return false;
        }
        self.days.push(day);
        true
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.days.iter().any(|d| d.date == date)
    }

    pub fn is_full(&self) -> bool {
        self.days.len() >= MAX_FORECAST_DAYS
    }

    pub fn days(&self) -> &[DailyForecast] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyForecast> {
        self.days.iter()
    }
}

impl FromIterator<DailyForecast> for ForecastCollection {
    fn from_iter<I: IntoIterator<Item = DailyForecast>>(iter: I) -> Self {
        let mut collection = Self::new();
        for day in iter {
            if collection.is_full() {
                break;
            }
            collection.push(day);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a ForecastCollection {
    type Item = &'a DailyForecast;
    type IntoIter = std::slice::Iter<'a, DailyForecast>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: NaiveDate) -> DailyForecast {
        DailyForecast {
            date,
            timestamp: 0,
            temperature: DailyTemperature { day: 280.0, night: 275.0, min: 275.0, max: 285.0 },
            humidity_pct: 50,
            wind_speed: 1.0,
            condition: Condition::new("Clear", "clear sky", "01d"),
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn collection_rejects_duplicate_dates() {
        let mut c = ForecastCollection::new();
        assert!(c.push(day(date(1))));
        assert!(!c.push(day(date(1))));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn collection_is_capped() {
        let c: ForecastCollection = (1..=10).map(|d| day(date(d))).collect();
        assert_eq!(c.len(), MAX_FORECAST_DAYS);
        assert_eq!(c.days().last().map(|d| d.date), Some(date(7)));
    }

    #[test]
    fn coordinates_validation() {
        assert!(Coordinates::new(51.5, -0.12).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn query_constructors_validate() {
        assert_eq!(Query::city("  Oslo ").ok(), Some(Query::City("Oslo".into())));
        assert!(Query::city(" \t ").is_err_and(|e| e.is_silent()));
        assert!(Query::coordinates(10.0, 20.0).is_ok());
        assert!(Query::coordinates(-91.0, 0.0).is_err_and(|e| e.is_silent()));
    }

    #[test]
    fn query_display() {
        assert_eq!(Query::City("Paris".into()).to_string(), "Paris");
        let coords = Query::Coordinates(Coordinates::new(48.85661, 2.35222));
        assert_eq!(coords.to_string(), "48.8566, 2.3522");
    }
}

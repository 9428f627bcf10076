//! Built-in demo locations, usable without an API key.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use std::time::Duration;

use crate::{
    error::WeatherError,
    forecast,
    model::{
        Condition, Coordinates, CurrentConditions, DailyForecast, DailyTemperature,
        ForecastCollection, Query, Wind,
    },
    resolver::{Resolution, WeatherResolver},
};

/// Simulated network latency before a fixture answers.
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(1000);

struct DemoCity {
    name: &'static str,
    country: &'static str,
    latitude: f64,
    longitude: f64,
    temperature: f64,
    feels_like: f64,
    humidity_pct: u8,
    pressure_hpa: u32,
    wind_speed: f64,
    category: &'static str,
    description: &'static str,
    icon: &'static str,
    timezone_offset: i32,
}

const DEMO_CITIES: [DemoCity; 4] = [
    DemoCity {
        name: "London",
        country: "GB",
        latitude: 51.5074,
        longitude: -0.1278,
        temperature: 288.15,
        feels_like: 287.15,
        humidity_pct: 65,
        pressure_hpa: 1013,
        wind_speed: 3.5,
        category: "Clouds",
        description: "overcast clouds",
        icon: "04d",
        timezone_offset: 0,
    },
    DemoCity {
        name: "New York",
        country: "US",
        latitude: 40.7128,
        longitude: -74.0060,
        temperature: 295.15,
        feels_like: 294.15,
        humidity_pct: 55,
        pressure_hpa: 1015,
        wind_speed: 2.1,
        category: "Clear",
        description: "clear sky",
        icon: "01d",
        timezone_offset: -5 * 3600,
    },
    DemoCity {
        name: "Tokyo",
        country: "JP",
        latitude: 35.6762,
        longitude: 139.6503,
        temperature: 278.15,
        feels_like: 276.15,
        humidity_pct: 80,
        pressure_hpa: 1008,
        wind_speed: 4.2,
        category: "Rain",
        description: "light rain",
        icon: "10d",
        timezone_offset: 9 * 3600,
    },
    DemoCity {
        name: "Moscow",
        country: "RU",
        latitude: 55.7558,
        longitude: 37.6176,
        temperature: 268.15,
        feels_like: 265.15,
        humidity_pct: 90,
        pressure_hpa: 1020,
        wind_speed: 1.8,
        category: "Snow",
        description: "light snow",
        icon: "13d",
        timezone_offset: 3 * 3600,
    },
];

// (day, night, min, max, humidity, wind, category, description, icon)
type DemoDay = (f64, f64, f64, f64, u8, f64, &'static str, &'static str, &'static str);

const DEMO_WEEK: [DemoDay; 7] = [
    (288.15, 283.15, 283.15, 291.15, 65, 3.5, "Clouds", "overcast clouds", "04d"),
    (290.15, 285.15, 285.15, 293.15, 55, 2.8, "Clear", "clear sky", "01d"),
    (286.15, 281.15, 281.15, 289.15, 75, 4.2, "Rain", "light rain", "10d"),
    (292.15, 287.15, 287.15, 295.15, 50, 2.1, "Clear", "clear sky", "01d"),
    (289.15, 284.15, 284.15, 292.15, 60, 3.0, "Clouds", "partly cloudy", "02d"),
    (285.15, 280.15, 280.15, 288.15, 80, 4.5, "Rain", "moderate rain", "10d"),
    (291.15, 286.15, 286.15, 294.15, 45, 2.5, "Clear", "clear sky", "01d"),
];

pub fn demo_city_names() -> Vec<&'static str> {
    DEMO_CITIES.iter().map(|c| c.name).collect()
}

/// Look up a demo city by name, ignoring case and surrounding whitespace.
pub fn demo_conditions(city: &str) -> Option<CurrentConditions> {
    let wanted = city.trim();
    DEMO_CITIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(wanted))
        .map(|c| CurrentConditions {
            location_name: c.name.to_string(),
            country: c.country.to_string(),
            coordinates: Some(Coordinates::new(c.latitude, c.longitude)),
            temperature: c.temperature,
            feels_like: c.feels_like,
            humidity_pct: c.humidity_pct,
            pressure_hpa: c.pressure_hpa,
            wind: Wind { speed: c.wind_speed, direction_deg: None },
            cloudiness_pct: None,
            visibility_m: None,
            condition: Condition::new(c.category, c.description, c.icon),
            sunrise: None,
            sunset: None,
            timezone_offset: Some(c.timezone_offset),
        })
}

/// The demo week, starting at `today`.
pub fn demo_forecast(today: NaiveDate) -> ForecastCollection {
    let utc = forecast::offset_or_utc(0);

    DEMO_WEEK
        .iter()
        .enumerate()
        .filter_map(|(i, &(day, night, min, max, humidity, wind, category, description, icon))| {
            let date = today.checked_add_days(Days::new(i as u64))?;
            Some(DailyForecast {
                date,
                timestamp: forecast::local_midnight(date, utc),
                temperature: DailyTemperature { day, night, min, max },
                humidity_pct: humidity,
                wind_speed: wind,
                condition: Condition::new(category, description, icon),
            })
        })
        .collect()
}

/// Answers city-name queries for the demo cities after a simulated delay.
#[derive(Debug, Clone)]
pub struct FixtureResolver {
    delay: Duration,
}

impl FixtureResolver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixtureResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DEMO_DELAY)
    }
}

#[async_trait]
impl WeatherResolver for FixtureResolver {
    fn name(&self) -> &'static str {
        "fixtures"
    }

    async fn resolve(&self, query: &Query) -> Result<Option<Resolution>, WeatherError> {
        let Query::City(name) = query else {
            return Ok(None);
        };
        let Some(current) = demo_conditions(name) else {
            return Ok(None);
        };

        tracing::debug!(city = %current.location_name, delay_ms = self.delay.as_millis() as u64, "serving demo fixture");
        tokio::time::sleep(self.delay).await;

        Ok(Some(Resolution {
            current,
            forecast: Some(demo_forecast(Utc::now().date_naive())),
        }))
    }
}

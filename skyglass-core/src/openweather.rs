use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::WeatherError,
    forecast::{self, ForecastReading},
    model::{
        Condition, Coordinates, CurrentConditions, DailyForecast, DailyTemperature,
        ForecastCollection, Query, Wind,
    },
    resolver::{Resolution, WeatherResolver},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Client for the OpenWeatherMap current-weather and forecast endpoints.
///
/// Temperatures are requested in the API's default unit (Kelvin).
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    pub async fn fetch_current(&self, query: &Query) -> Result<CurrentConditions, WeatherError> {
        let parsed: OwCurrentResponse = self.get_json(CURRENT_PATH, query, "current").await?;
        parsed.try_into()
    }

    pub async fn fetch_forecast(&self, query: &Query) -> Result<ForecastCollection, WeatherError> {
        let parsed: OwForecastResponse = self.get_json(FORECAST_PATH, query, "forecast").await?;
        parsed.into_collection()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
        what: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let mut params: Vec<(&str, String)> = match query {
            Query::City(name) => vec![("q", name.trim().to_string())],
            Query::Coordinates(c) => {
                vec![("lat", c.latitude.to_string()), ("lon", c.longitude.to_string())]
            }
        };
        params.push(("appid", self.api_key.clone()));

        tracing::debug!(%query, endpoint = what, "requesting OpenWeather");

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, endpoint = what, "OpenWeather returned an error status");
            return Err(match status {
                StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
                    WeatherError::NotFound(query.to_string())
                }
                StatusCode::UNAUTHORIZED => WeatherError::InvalidCredential,
                _ => WeatherError::Upstream {
                    status: status.as_u16(),
                    body: truncate_body(&body),
                },
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::Malformed(format!("OpenWeather {what} JSON: {e}")))
    }
}

#[async_trait]
impl WeatherResolver for OpenWeatherClient {
    fn name(&self) -> &'static str {
        "openweather"
    }

    async fn resolve(&self, query: &Query) -> Result<Option<Resolution>, WeatherError> {
        let current = self.fetch_current(query).await?;

        let forecast_query = current
            .coordinates
            .map(Query::Coordinates)
            .unwrap_or_else(|| query.clone());

        let forecast = match self.fetch_forecast(&forecast_query).await {
            Ok(collection) => Some(collection),
            Err(err) => {
                tracing::warn!(error = %err, %query, "forecast unavailable, keeping current conditions");
                None
            }
        };

        Ok(Some(Resolution { current, forecast }))
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

impl From<OwWeather> for Condition {
    fn from(w: OwWeather) -> Self {
        Condition {
            category: w.main,
            description: w.description,
            icon: w.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: Option<OwCoord>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    clouds: Option<OwClouds>,
    visibility: Option<u32>,
    #[serde(default)]
    sys: OwSys,
    timezone: Option<i32>,
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let condition = first_condition(parsed.weather, "current")?;

        Ok(CurrentConditions {
            location_name: parsed.name,
            country: parsed.sys.country.unwrap_or_default(),
            coordinates: parsed.coord.map(|c| Coordinates::new(c.lat, c.lon)),
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind: Wind {
                speed: parsed.wind.speed,
                direction_deg: parsed.wind.deg,
            },
            cloudiness_pct: parsed.clouds.map(|c| c.all),
            visibility_m: parsed.visibility,
            condition,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
            timezone_offset: parsed.timezone,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwCity {
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

/// Entry of the 3-hourly `list` feed.
#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwDailyTemp {
    day: f64,
    night: f64,
    min: f64,
    max: f64,
}

/// Entry of a pre-aggregated `daily` feed.
#[derive(Debug, Deserialize)]
struct OwDailyEntry {
    dt: i64,
    temp: OwDailyTemp,
    humidity: u8,
    wind_speed: f64,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: Option<OwCity>,
    list: Option<Vec<OwForecastEntry>>,
    daily: Option<Vec<OwDailyEntry>>,
    timezone_offset: Option<i32>,
}

impl OwForecastResponse {
    fn utc_offset(&self) -> i32 {
        self.city
            .as_ref()
            .and_then(|c| c.timezone)
            .or(self.timezone_offset)
            .unwrap_or(0)
    }

    fn into_collection(self) -> Result<ForecastCollection, WeatherError> {
        let offset_secs = self.utc_offset();

        if let Some(list) = self.list {
            let readings = list
                .into_iter()
                .map(|entry| -> Result<ForecastReading, WeatherError> {
                    Ok(ForecastReading {
                        timestamp: entry.dt,
                        temperature: entry.main.temp,
                        temp_min: entry.main.temp_min,
                        temp_max: entry.main.temp_max,
                        humidity_pct: entry.main.humidity,
                        wind_speed: entry.wind.speed,
                        condition: first_condition(entry.weather, "forecast")?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            return Ok(forecast::aggregate(&readings, offset_secs));
        }

        if let Some(daily) = self.daily {
            let offset = forecast::offset_or_utc(offset_secs);
            let mut collection = ForecastCollection::new();

            for entry in daily {
                if collection.is_full() {
                    break;
                }
                let date = forecast::local_date(entry.dt, offset).ok_or_else(|| {
                    WeatherError::Malformed(format!("invalid daily timestamp {}", entry.dt))
                })?;
                collection.push(DailyForecast {
                    date,
                    timestamp: forecast::local_midnight(date, offset),
                    temperature: DailyTemperature {
                        day: entry.temp.day,
                        night: entry.temp.night,
                        min: entry.temp.min,
                        max: entry.temp.max,
                    },
                    humidity_pct: entry.humidity,
                    wind_speed: entry.wind_speed,
                    condition: first_condition(entry.weather, "daily forecast")?,
                });
            }

            return Ok(collection);
        }

        Err(WeatherError::Malformed(
            "forecast payload has neither `list` nor `daily`".to_string(),
        ))
    }
}

fn first_condition(weather: Vec<OwWeather>, what: &str) -> Result<Condition, WeatherError> {
    weather
        .into_iter()
        .next()
        .map(Condition::from)
        .ok_or_else(|| WeatherError::Malformed(format!("{what} payload has no weather condition")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn current_payload_maps_to_conditions() {
        let raw = json!({
            "name": "Paris",
            "coord": { "lat": 48.85, "lon": 2.35 },
            "main": { "temp": 290.0, "feels_like": 289.5, "humidity": 40, "pressure": 1012 },
            "weather": [
                { "main": "Clouds", "description": "few clouds", "icon": "02d" },
                { "main": "Mist", "description": "mist", "icon": "50d" }
            ],
            "wind": { "speed": 4.1, "deg": 250 },
            "clouds": { "all": 20 },
            "visibility": 10000,
            "sys": { "country": "FR", "sunrise": 1700000000, "sunset": 1700030000 },
            "timezone": 3600
        });

        let parsed: OwCurrentResponse = serde_json::from_value(raw).unwrap();
        let current = CurrentConditions::try_from(parsed).unwrap();

        assert_eq!(current.display_name(), "Paris, FR");
        assert_eq!(current.condition.category, "Clouds");
        assert_eq!(current.wind.direction_deg, Some(250.0));
        assert_eq!(current.cloudiness_pct, Some(20));
        assert_eq!(current.timezone_offset, Some(3600));
        assert_eq!(current.coordinates, Some(Coordinates::new(48.85, 2.35)));
    }

    #[test]
    fn current_payload_without_condition_is_malformed() {
        let raw = json!({
            "name": "Nowhere",
            "main": { "temp": 290.0, "feels_like": 289.5, "humidity": 40, "pressure": 1012 },
            "weather": [],
            "wind": { "speed": 1.0 }
        });

        let parsed: OwCurrentResponse = serde_json::from_value(raw).unwrap();
        let err = CurrentConditions::try_from(parsed).unwrap_err();
        assert!(matches!(err, WeatherError::Malformed(_)));
    }

    #[test]
    fn daily_payload_is_consumed_directly_and_capped() {
        let start = 1_709_294_400; // 2024-03-01T12:00:00Z
        let daily: Vec<_> = (0..9)
            .map(|i| {
                json!({
                    "dt": start + i * 86_400,
                    "temp": { "day": 290.0, "night": 280.0, "min": 278.0, "max": 292.0 },
                    "humidity": 50,
                    "wind_speed": 2.0,
                    "weather": [{ "main": "Clear", "description": "clear sky", "icon": "01d" }]
                })
            })
            .collect();
        let raw = json!({ "timezone_offset": 0, "daily": daily });

        let parsed: OwForecastResponse = serde_json::from_value(raw).unwrap();
        let collection = parsed.into_collection().unwrap();

        assert_eq!(collection.len(), 7);
        assert_eq!(collection.days()[0].temperature.night, 280.0);
        assert_eq!(collection.days()[0].timestamp, start - 12 * 3600);
    }

    #[test]
    fn forecast_payload_without_lists_is_malformed() {
        let parsed: OwForecastResponse = serde_json::from_value(json!({ "cod": "200" })).unwrap();
        assert!(matches!(parsed.into_collection(), Err(WeatherError::Malformed(_))));
    }

    #[test]
    fn truncate_long_bodies_on_char_boundary() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}

//! Core library for the `skyglass` weather lookup client.
//!
//! This crate defines:
//! - The OpenWeatherMap client and payload normalization
//! - Forecast aggregation (3-hourly feed to daily summaries)
//! - Condition, background and day/night presentation mapping
//! - The query service with its demo fixtures and session state
//! - Configuration & credentials handling
//!
//! It is used by `skyglass-cli`, but has no terminal dependencies of its own.

pub mod condition;
pub mod config;
pub mod daynight;
pub mod error;
pub mod fixtures;
pub mod forecast;
pub mod location;
pub mod model;
pub mod openweather;
pub mod resolver;
pub mod service;
pub mod units;

pub use condition::{BackgroundKey, ConditionIcon, background_for, classify};
pub use config::Config;
pub use daynight::{LocationSignal, is_night};
pub use error::WeatherError;
pub use forecast::{ForecastReading, aggregate};
pub use location::{ConfiguredLocation, Geolocator, LocationError};
pub use model::{
    Condition, Coordinates, CurrentConditions, DailyForecast, DailyTemperature,
    ForecastCollection, Query,
};
pub use openweather::OpenWeatherClient;
pub use resolver::{Resolution, WeatherResolver};
pub use service::{QueryStatus, WeatherQueryService, WeatherSession};
pub use units::{TemperatureUnit, convert};

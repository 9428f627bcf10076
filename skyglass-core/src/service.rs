//! Orchestrates lookups and owns the query lifecycle.

use tracing::instrument;

use crate::{
    config::Config,
    error::WeatherError,
    fixtures::FixtureResolver,
    location::{ConfiguredLocation, Geolocator},
    model::{CurrentConditions, ForecastCollection, Query},
    openweather::OpenWeatherClient,
    resolver::{Resolution, WeatherResolver},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// The single result slot a front end renders from.
#[derive(Debug, Default)]
pub struct WeatherSession {
    status: QueryStatus,
    current: Option<CurrentConditions>,
    forecast: Option<ForecastCollection>,
}

impl WeatherSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    pub fn current(&self) -> Option<&CurrentConditions> {
        self.current.as_ref()
    }

    pub fn forecast(&self) -> Option<&ForecastCollection> {
        self.forecast.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            QueryStatus::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    fn begin(&mut self) {
        self.status = QueryStatus::Loading;
    }

    fn succeed(&mut self, resolution: Resolution) {
        self.current = Some(resolution.current);
        self.forecast = resolution.forecast;
        self.status = QueryStatus::Ready;
    }

    fn fail(&mut self, message: String) {
        self.current = None;
        self.forecast = None;
        self.status = QueryStatus::Error(message);
    }
}

/// Runs queries against an ordered list of resolvers; the first resolver that
/// answers wins.
#[derive(Debug)]
pub struct WeatherQueryService {
    resolvers: Vec<Box<dyn WeatherResolver>>,
    geolocator: Box<dyn Geolocator>,
}

impl WeatherQueryService {
    pub fn new(resolvers: Vec<Box<dyn WeatherResolver>>, geolocator: Box<dyn Geolocator>) -> Self {
        Self { resolvers, geolocator }
    }

    /// Demo fixtures first, then OpenWeather when an API key is available.
    pub fn from_config(config: &Config) -> Self {
        Self::from_config_with_key(config, config.api_key())
    }

    /// Like [`from_config`](Self::from_config) with the API key already
    /// resolved by the caller.
    pub fn from_config_with_key(config: &Config, api_key: Option<String>) -> Self {
        let mut resolvers: Vec<Box<dyn WeatherResolver>> =
            vec![Box::new(FixtureResolver::new(config.demo_delay()))];

        match api_key {
            Some(key) => resolvers.push(Box::new(OpenWeatherClient::with_base_url(
                key,
                config.base_url.clone(),
            ))),
            None => tracing::info!("no API key configured, running with demo fixtures only"),
        }

        let geolocator =
            ConfiguredLocation::new(config.location.enabled, config.location.position());

        Self::new(resolvers, Box::new(geolocator))
    }

    pub fn resolver_names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// Blank names are ignored and leave the session untouched.
    #[instrument(skip(self, session))]
    pub async fn query_by_name(&self, session: &mut WeatherSession, city: &str) {
        self.submit(session, Query::city(city)).await;
    }

    /// Out-of-range coordinates are ignored and leave the session untouched.
    #[instrument(skip(self, session))]
    pub async fn query_by_coordinates(&self, session: &mut WeatherSession, lat: f64, lon: f64) {
        self.submit(session, Query::coordinates(lat, lon)).await;
    }

    #[instrument(skip(self, session))]
    pub async fn query_current_location(&self, session: &mut WeatherSession) {
        session.begin();

        match self.geolocator.current_position().await {
            Ok(coords) => self.run(session, Query::Coordinates(coords)).await,
            Err(err) => {
                let err = WeatherError::from(err);
                tracing::info!(error = %err, "geolocation failed");
                session.fail(err.user_message());
            }
        }
    }

    async fn submit(&self, session: &mut WeatherSession, query: Result<Query, WeatherError>) {
        match query {
            Ok(query) => self.run(session, query).await,
            Err(err) if err.is_silent() => tracing::debug!(error = %err, "ignoring query"),
            Err(err) => session.fail(err.user_message()),
        }
    }

    async fn run(&self, session: &mut WeatherSession, query: Query) {
        session.begin();

        match self.resolve(&query).await {
            Ok(resolution) => {
                tracing::info!(
                    %query,
                    location = %resolution.current.display_name(),
                    forecast_days = resolution.forecast.as_ref().map_or(0, |f| f.len()),
                    "query resolved"
                );
                session.succeed(resolution);
            }
            Err(err) => {
                tracing::info!(%query, error = %err, "query failed");
                session.fail(err.user_message());
            }
        }
    }

    async fn resolve(&self, query: &Query) -> Result<Resolution, WeatherError> {
        for resolver in &self.resolvers {
            if let Some(resolution) = resolver.resolve(query).await? {
                tracing::debug!(resolver = resolver.name(), "resolver answered");
                return Ok(resolution);
            }
        }

        Err(WeatherError::MissingCredential)
    }
}

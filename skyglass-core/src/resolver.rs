use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastCollection, Query},
};

/// Result of a successful lookup. The forecast is optional: it may fail on
/// its own without invalidating the current conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub current: CurrentConditions,
    pub forecast: Option<ForecastCollection>,
}

/// One way of answering a [`Query`].
///
/// `Ok(None)` means the resolver does not handle this query and the next one
/// in line should be asked. An `Err` ends the lookup.
#[async_trait]
pub trait WeatherResolver: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    async fn resolve(&self, query: &Query) -> Result<Option<Resolution>, WeatherError>;
}

//! Mapping from upstream weather categories to presentation tokens.

/// Icon chosen for a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionIcon {
    Clear,
    FewClouds,
    ScatteredClouds,
    Overcast,
    Cloudy,
    LightRain,
    Rain,
    HeavyRain,
    Drizzle,
    Thunderstorm,
    LightSnow,
    Snow,
    Fog,
    Dust,
    Tornado,
    #[default]
    PartlyCloudy,
}

impl ConditionIcon {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::FewClouds => "🌤️",
            Self::ScatteredClouds | Self::PartlyCloudy => "⛅",
            Self::Overcast | Self::Cloudy => "☁️",
            Self::LightRain => "🌦️",
            Self::Rain => "🌧️",
            Self::HeavyRain => "⛆",
            Self::Drizzle => "💧",
            Self::Thunderstorm => "⛈️",
            Self::LightSnow => "🌨️",
            Self::Snow => "❄️",
            Self::Fog => "🌫️",
            Self::Dust => "💨",
            Self::Tornado => "🌪️",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::FewClouds => "Few clouds",
            Self::ScatteredClouds => "Scattered clouds",
            Self::Overcast => "Overcast",
            Self::Cloudy => "Cloudy",
            Self::LightRain => "Light rain",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy rain",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::LightSnow => "Light snow",
            Self::Snow => "Snow",
            Self::Fog => "Fog",
            Self::Dust => "Dust",
            Self::Tornado => "Tornado",
            Self::PartlyCloudy => "Partly cloudy",
        }
    }
}

/// Classify an upstream category (e.g. "Clouds") refined by its free-text
/// description (e.g. "broken clouds"). Unknown categories fall back to
/// [`ConditionIcon::PartlyCloudy`].
pub fn classify(category: &str, description: &str) -> ConditionIcon {
    let description = description.to_lowercase();

    match category.to_lowercase().as_str() {
        "clear" => ConditionIcon::Clear,
        "clouds" => {
            if description.contains("few") {
                ConditionIcon::FewClouds
            } else if description.contains("scattered") {
                ConditionIcon::ScatteredClouds
            } else if description.contains("broken") || description.contains("overcast") {
                ConditionIcon::Overcast
            } else {
                ConditionIcon::Cloudy
            }
        }
        "rain" => {
            if description.contains("light") {
                ConditionIcon::LightRain
            } else if description.contains("heavy") || description.contains("extreme") {
                ConditionIcon::HeavyRain
            } else {
                ConditionIcon::Rain
            }
        }
        "drizzle" => ConditionIcon::Drizzle,
        "thunderstorm" => ConditionIcon::Thunderstorm,
        "snow" => {
            if description.contains("light") {
                ConditionIcon::LightSnow
            } else {
                ConditionIcon::Snow
            }
        }
        "mist" | "fog" | "haze" => ConditionIcon::Fog,
        "dust" | "sand" => ConditionIcon::Dust,
        "tornado" => ConditionIcon::Tornado,
        _ => ConditionIcon::default(),
    }
}

/// Background image picked for the current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundKey {
    ClearDay,
    ClearNight,
    RainDay,
    RainNight,
    SnowDay,
    SnowNight,
    CloudsDay,
    CloudsNight,
    DefaultDay,
    DefaultNight,
}

impl BackgroundKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClearDay => "clear-day",
            Self::ClearNight => "clear-night",
            Self::RainDay => "rain-day",
            Self::RainNight => "rain-night",
            Self::SnowDay => "snow-day",
            Self::SnowNight => "snow-night",
            Self::CloudsDay => "clouds-day",
            Self::CloudsNight => "clouds-night",
            Self::DefaultDay => "default-day",
            Self::DefaultNight => "default-night",
        }
    }

    pub fn image_file(&self) -> &'static str {
        match self {
            Self::ClearDay | Self::DefaultDay => "sunny.jpg",
            Self::ClearNight => "clear-night.jpg",
            Self::RainDay => "rain.jpg",
            Self::RainNight => "rain-night.jpg",
            Self::SnowDay => "snow.jpg",
            Self::SnowNight => "snow-night.jpg",
            Self::CloudsDay => "cloudy.jpg",
            Self::CloudsNight => "cloudy-night.jpg",
            Self::DefaultNight => "night.jpg",
        }
    }
}

impl std::fmt::Display for BackgroundKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn background_for(category: &str, is_night: bool) -> BackgroundKey {
    let (day, night) = match category.to_lowercase().as_str() {
        "clear" => (BackgroundKey::ClearDay, BackgroundKey::ClearNight),
        "rain" | "drizzle" => (BackgroundKey::RainDay, BackgroundKey::RainNight),
        "snow" => (BackgroundKey::SnowDay, BackgroundKey::SnowNight),
        "clouds" => (BackgroundKey::CloudsDay, BackgroundKey::CloudsNight),
        _ => (BackgroundKey::DefaultDay, BackgroundKey::DefaultNight),
    };

    if is_night { night } else { day }
}

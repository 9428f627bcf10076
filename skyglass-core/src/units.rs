use serde::{Deserialize, Serialize};

const KELVIN_OFFSET: f64 = 273.15;

/// Convert an absolute Kelvin temperature to Celsius or Fahrenheit.
///
/// No rounding is applied; see [`round_for_display`].
pub fn convert(temp_kelvin: f64, to_celsius: bool) -> f64 {
    let celsius = temp_kelvin - KELVIN_OFFSET;
    if to_celsius { celsius } else { celsius * 9.0 / 5.0 + 32.0 }
}

/// Nearest-integer rounding used when a temperature is shown to the user.
pub fn round_for_display(value: f64) -> i64 {
    value.round() as i64
}

/// Display unit for temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn from_kelvin(self, temp_kelvin: f64) -> f64 {
        convert(temp_kelvin, self == TemperatureUnit::Celsius)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Map a wind bearing in degrees to a 16-point compass label.
pub fn degree_to_compass(deg: f64) -> &'static str {
    let deg = deg.rem_euclid(360.0);
    let idx = (deg / 22.5 + 0.5) as usize % COMPASS.len();
    COMPASS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn absolute_zero_in_celsius() {
        assert!(approx(convert(0.0, true), -273.15));
    }

    #[test]
    fn freezing_point() {
        assert!(approx(convert(273.15, true), 0.0));
        assert!(approx(convert(273.15, false), 32.0));
    }

    #[test]
    fn fahrenheit_follows_celsius() {
        for k in [0.0, 100.0, 250.5, 273.15, 300.0, 373.15, 1000.0] {
            let c = convert(k, true);
            let f = convert(k, false);
            assert!(approx(f, c * 9.0 / 5.0 + 32.0), "k={k}");
        }
    }

    #[test]
    fn unit_dispatches_to_convert() {
        assert!(approx(TemperatureUnit::Celsius.from_kelvin(373.15), 100.0));
        assert!(approx(TemperatureUnit::Fahrenheit.from_kelvin(373.15), 212.0));
        assert_eq!(TemperatureUnit::Celsius.toggled(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn display_rounding() {
        assert_eq!(round_for_display(14.85), 15);
        assert_eq!(round_for_display(-5.2), -5);
    }

    #[test]
    fn compass_points() {
        assert_eq!(degree_to_compass(0.0), "N");
        assert_eq!(degree_to_compass(90.0), "E");
        assert_eq!(degree_to_compass(200.0), "SSW");
        assert_eq!(degree_to_compass(360.0), "N");
        assert_eq!(degree_to_compass(-90.0), "W");
    }
}

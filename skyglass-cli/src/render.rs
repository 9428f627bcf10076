use skyglass_core::{
    BackgroundKey, CurrentConditions, ForecastCollection, TemperatureUnit, units,
};

fn temp(kelvin: f64, unit: TemperatureUnit) -> i64 {
    units::round_for_display(unit.from_kelvin(kelvin))
}

pub fn render_current(
    current: &CurrentConditions,
    unit: TemperatureUnit,
    background: BackgroundKey,
) -> String {
    let icon = current.condition.icon_token();
    let symbol = unit.symbol();
    let mut out = String::new();

    out.push_str(&format!(
        "{}  [theme: {} / {}]\n",
        current.display_name(),
        background,
        background.image_file()
    ));
    out.push_str(&format!(
        "{} {}{}  {}\n",
        icon.emoji(),
        temp(current.temperature, unit),
        symbol,
        current.condition.description
    ));
    out.push_str(&"-".repeat(32));
    out.push('\n');
    out.push_str(&format!("Feels like   {}{}\n", temp(current.feels_like, unit), symbol));
    out.push_str(&format!("Humidity     {}%\n", current.humidity_pct));

    let wind = match current.wind.direction_deg {
        Some(deg) => format!("{} m/s {}", current.wind.speed, units::degree_to_compass(deg)),
        None => format!("{} m/s", current.wind.speed),
    };
    out.push_str(&format!("Wind Speed   {wind}\n"));
    out.push_str(&format!("Pressure     {} hPa\n", current.pressure_hpa));

    if let Some(clouds) = current.cloudiness_pct {
        out.push_str(&format!("Cloudiness   {clouds}%\n"));
    }
    if let Some(visibility) = current.visibility_m {
        out.push_str(&format!("Visibility   {:.1} km\n", f64::from(visibility) / 1000.0));
    }

    out
}

/// The first row is always labelled "Today".
pub fn render_forecast(forecast: &ForecastCollection, unit: TemperatureUnit) -> String {
    let mut out = String::from("7-Day Forecast\n");

    for (index, day) in forecast.iter().enumerate() {
        let label = if index == 0 {
            "Today".to_string()
        } else {
            day.date.format("%a").to_string()
        };

        out.push_str(&format!(
            "{:<6} {:<3} {:>4}° {:>4}°  {}\n",
            label,
            day.condition.icon_token().emoji(),
            temp(day.temperature.max, unit),
            temp(day.temperature.min, unit),
            day.condition.description
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use skyglass_core::fixtures;

    #[test]
    fn current_card_shows_rounded_temperatures() {
        let london = fixtures::demo_conditions("London").unwrap();
        let text = render_current(&london, TemperatureUnit::Celsius, london.background(false));

        assert!(text.starts_with("London, GB  [theme: clouds-day / cloudy.jpg]"));
        assert!(text.contains("15°C  overcast clouds"));
        assert!(text.contains("Feels like   14°C"));
        assert!(text.contains("Pressure     1013 hPa"));
    }

    #[test]
    fn current_card_in_fahrenheit() {
        let ny = fixtures::demo_conditions("New York").unwrap();
        let text = render_current(&ny, TemperatureUnit::Fahrenheit, ny.background(true));

        assert!(text.contains("72°F"), "{text}");
        assert!(text.contains("[theme: clear-night / clear-night.jpg]"));
    }

    #[test]
    fn forecast_labels_today_then_weekdays() {
        // 2024-03-04 is a Monday.
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let week = fixtures::demo_forecast(today);
        let text = render_forecast(&week, TemperatureUnit::Celsius);

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "7-Day Forecast");
        assert!(lines[1].starts_with("Today"));
        assert!(lines[2].starts_with("Tue"));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn forecast_temperatures_follow_unit() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let week = fixtures::demo_forecast(today);
        let text = render_forecast(&week, TemperatureUnit::Fahrenheit);

        // First demo day: max 291.15 K, min 283.15 K.
        let first = text.lines().nth(1).unwrap();
        assert!(first.contains("64°") && first.contains("50°"), "{first}");
    }
}

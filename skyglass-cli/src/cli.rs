use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::InquireError;
use skyglass_core::{
    Config, QueryStatus, TemperatureUnit, WeatherQueryService, WeatherSession, daynight,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyglass", version, about = "Current weather and a 7-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show temperatures in Fahrenheit.
    #[arg(long, global = true, conflicts_with = "celsius")]
    pub fahrenheit: bool,

    /// Show temperatures in Celsius.
    #[arg(long, global = true)]
    pub celsius: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key, preferred unit and home location.
    Configure,

    /// Show weather for a city.
    City {
        /// City name, e.g. "New York".
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Show weather for a latitude/longitude pair.
    Coords {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },

    /// Show weather for the configured home location.
    Here,

    /// Search repeatedly from a prompt.
    Interactive,
}

impl Cli {
    fn unit_override(&self) -> Option<TemperatureUnit> {
        if self.fahrenheit {
            Some(TemperatureUnit::Fahrenheit)
        } else if self.celsius {
            Some(TemperatureUnit::Celsius)
        } else {
            None
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        let unit = self.unit_override().unwrap_or(config.unit);

        match self.command {
            Command::Configure => configure(&mut config),
            Command::City { name } => {
                let (service, mut session) = start(&config);
                service.query_by_name(&mut session, &name.join(" ")).await;
                show(&session, unit)
            }
            Command::Coords { lat, lon } => {
                let (service, mut session) = start(&config);
                service.query_by_coordinates(&mut session, lat, lon).await;
                if *session.status() == QueryStatus::Idle {
                    bail!("Coordinates out of range: {lat}, {lon}");
                }
                show(&session, unit)
            }
            Command::Here => {
                let (service, mut session) = start(&config);
                service.query_current_location(&mut session).await;
                show(&session, unit)
            }
            Command::Interactive => {
                let (service, session) = start(&config);
                interactive(&service, session, unit).await
            }
        }
    }
}

fn start(config: &Config) -> (WeatherQueryService, WeatherSession) {
    let service = WeatherQueryService::from_config(config);
    tracing::debug!(resolvers = ?service.resolver_names(), "query service ready");
    (service, WeatherSession::new())
}

/// Print the session's results, or turn its error state into a CLI error.
fn show(session: &WeatherSession, unit: TemperatureUnit) -> anyhow::Result<()> {
    match session.status() {
        QueryStatus::Ready => {
            if let Some(current) = session.current() {
                let night = daynight::is_night(&current.location_signal());
                println!("{}", render::render_current(current, unit, current.background(night)));
            }
            if let Some(forecast) = session.forecast() {
                println!("{}", render::render_forecast(forecast, unit));
            }
            Ok(())
        }
        QueryStatus::Error(msg) => bail!("{msg}"),
        QueryStatus::Idle | QueryStatus::Loading => Ok(()),
    }
}

async fn interactive(
    service: &WeatherQueryService,
    mut session: WeatherSession,
    mut unit: TemperatureUnit,
) -> anyhow::Result<()> {
    println!("Type a city name, `:here` for your location, `:unit` to switch units, `:quit` to exit.");

    loop {
        let input = match inquire::Text::new("City:").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        };

        match input.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":unit" => {
                unit = unit.toggled();
                println!("Switched to {}", unit.symbol());
                if *session.status() != QueryStatus::Ready {
                    continue;
                }
            }
            ":here" => service.query_current_location(&mut session).await,
            city => {
                eprintln!("Searching...");
                service.query_by_name(&mut session, city).await;
            }
        }

        if let Err(err) = show(&session, unit) {
            eprintln!("{err}");
        }
    }

    Ok(())
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let key = inquire::Password::new("OpenWeather API key (blank for demo cities only):")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(key);

    let units = vec!["Celsius (°C)", "Fahrenheit (°F)"];
    let cursor = usize::from(config.unit == TemperatureUnit::Fahrenheit);
    let choice = inquire::Select::new("Temperature unit:", units)
        .with_starting_cursor(cursor)
        .raw_prompt()
        .context("Failed to read temperature unit")?;
    config.unit = if choice.index == 0 {
        TemperatureUnit::Celsius
    } else {
        TemperatureUnit::Fahrenheit
    };

    config.location.enabled = inquire::Confirm::new("Allow `skyglass here` to use a home location?")
        .with_default(config.location.enabled)
        .prompt()
        .context("Failed to read location preference")?;

    if config.location.enabled {
        let latitude = inquire::CustomType::<f64>::new("Home latitude:")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = inquire::CustomType::<f64>::new("Home longitude:")
            .prompt()
            .context("Failed to read longitude")?;
        config.location.latitude = Some(latitude);
        config.location.longitude = Some(longitude);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

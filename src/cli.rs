use std::time::Duration;

use clap::builder::{styling::AnsiColor, Styles};
use clap::{Parser, Subcommand};

use crate::openmeteo::{ForecastRequest, Metric, BASE_URL};

const ABOUT: &str = "Open-Meteo daily weather charts";

const LONG_ABOUT: &str = "
Terminal charts of daily weather history sourced from Open-Meteo.

Each subcommand fetches the daily forecast (including the requested number of past days) for a
fixed location and draws it as line charts. Press `q` or `Esc` to close the chart window. The wind
and beaufort views print the data table once the window is closed.

Set RUST_LOG=debug to see the request and filtering details.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(name = "wxchart", version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(long, global = true, default_value_t = 5.54829, allow_negative_numbers = true)]
    pub latitude: f64,

    #[arg(long, global = true, default_value_t = 95.323753, allow_negative_numbers = true)]
    pub longitude: f64,

    #[arg(long, global = true, default_value = "Asia/Bangkok", help = "IANA timezone for daily aggregation")]
    pub timezone: String,

    #[arg(long, global = true, default_value = "Banda Aceh", help = "Place name shown in chart titles")]
    pub place: String,

    #[arg(long, global = true, default_value = BASE_URL, help = "Open-Meteo forecast endpoint")]
    pub api_url: String,

    #[arg(long, global = true, default_value_t = 30, help = "HTTP request timeout in seconds")]
    pub timeout_secs: u64,

    #[arg(long, global = true, help = "Skip the chart window and only print text output")]
    pub no_chart: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Daily max/min temperature history with highest, lowest and latest readings
    Temperature {
        #[arg(long, default_value_t = 31)]
        past_days: u32,
    },

    /// Daily maximum wind speed and gusts
    Wind {
        #[arg(long, default_value_t = 14)]
        past_days: u32,
    },

    /// Daily wind maxima on the Beaufort scale
    Beaufort {
        #[arg(long, default_value_t = 14)]
        past_days: u32,
    },
}

impl Command {
    pub fn past_days(&self) -> u32 {
        match self {
            Command::Temperature { past_days }
            | Command::Wind { past_days }
            | Command::Beaufort { past_days } => *past_days,
        }
    }

    fn metrics(&self) -> Vec<Metric> {
        match self {
            Command::Temperature { .. } => Metric::TEMPERATURE.to_vec(),
            Command::Wind { .. } | Command::Beaufort { .. } => Metric::WIND.to_vec(),
        }
    }
}

impl Args {
    pub fn forecast_request(&self) -> ForecastRequest {
        ForecastRequest {
            base_url: self.api_url.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
            past_days: self.command.past_days(),
            metrics: self.command.metrics(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["wxchart", "temperature"]).unwrap();
        assert_eq!(args.command, Command::Temperature { past_days: 31 });
        assert_eq!(args.timezone, "Asia/Bangkok");
        assert!(!args.no_chart);

        let request = args.forecast_request();
        assert_eq!(request.latitude, 5.54829);
        assert_eq!(request.longitude, 95.323753);
        assert_eq!(request.past_days, 31);
        assert_eq!(request.metrics, Metric::TEMPERATURE.to_vec());
        assert_eq!(request.timeout, Duration::from_secs(30));
        assert_eq!(request.base_url, "https://api.open-meteo.com/v1/forecast");
    }

    #[test]
    fn test_wind_window() {
        let args = Args::try_parse_from(["wxchart", "wind"]).unwrap();
        assert_eq!(args.command.past_days(), 14);
        assert_eq!(args.forecast_request().metrics, Metric::WIND.to_vec());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "wxchart",
            "beaufort",
            "--past-days",
            "7",
            "--latitude",
            "-33.87",
            "--longitude",
            "151.21",
            "--place",
            "Sydney",
            "--no-chart",
            "--api-url",
            "http://127.0.0.1:8080/v1/forecast",
        ])
        .unwrap();
        assert_eq!(args.command, Command::Beaufort { past_days: 7 });
        assert_eq!(args.latitude, -33.87);
        assert_eq!(args.place, "Sydney");
        assert!(args.no_chart);
        assert_eq!(
            args.forecast_request().base_url,
            "http://127.0.0.1:8080/v1/forecast"
        );
    }

    #[test]
    fn test_requires_subcommand() {
        assert!(Args::try_parse_from(["wxchart"]).is_err());
    }
}

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, info};
use reqwest::blocking::{Client, Request};
use serde::Deserialize;

use crate::error::{DataError, FetchError};
use crate::series::{DailyRecord, DailySeries};
use crate::weather::{TemperatureDay, WindDay};

pub const BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

const USER_AGENT: &str = "wxchart";

/// Daily variables understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TemperatureMax,
    TemperatureMin,
    TemperatureMean,
    WindSpeedMax,
    WindGustsMax,
    WindDirectionDominant,
}

impl Metric {
    pub const TEMPERATURE: [Metric; 3] = [
        Metric::TemperatureMax,
        Metric::TemperatureMin,
        Metric::TemperatureMean,
    ];

    pub const WIND: [Metric; 3] = [
        Metric::WindSpeedMax,
        Metric::WindGustsMax,
        Metric::WindDirectionDominant,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Metric::TemperatureMax => "temperature_2m_max",
            Metric::TemperatureMin => "temperature_2m_min",
            Metric::TemperatureMean => "temperature_2m_mean",
            Metric::WindSpeedMax => "wind_speed_10m_max",
            Metric::WindGustsMax => "wind_gusts_10m_max",
            Metric::WindDirectionDominant => "wind_direction_10m_dominant",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub past_days: u32,
    pub metrics: Vec<Metric>,
    pub timeout: Duration,
}

impl ForecastRequest {
    fn query(&self) -> Vec<(&'static str, String)> {
        let daily = self
            .metrics
            .iter()
            .map(|m| m.key())
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("daily", daily),
            ("timezone", self.timezone.clone()),
            ("past_days", self.past_days.to_string()),
        ]
    }

    pub fn build(&self, client: &Client) -> Result<Request, FetchError> {
        Ok(client.get(&self.base_url).query(&self.query()).build()?)
    }

    pub fn send(&self) -> Result<ForecastResponse, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?;
        self.send_with(&client)
    }

    /// Performs the GET and decodes the body. Any non-2xx status is an error.
    pub fn send_with(&self, client: &Client) -> Result<ForecastResponse, FetchError> {
        let request = self.build(client)?;
        let url = request.url().to_string();
        debug!("GET {url}");

        let response = client
            .execute(request)
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }
        let body = response.text().map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;
        info!("received {} bytes from open-meteo", body.len());

        ForecastResponse::from_json(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

#[derive(Deserialize, Debug)]
pub struct ForecastResponse {
    #[serde(default)]
    pub daily_units: HashMap<String, String>,

    pub daily: Daily,
}

/// The `daily` block: a `time` array plus one array per requested metric.
#[derive(Deserialize, Debug)]
pub struct Daily {
    pub time: Vec<NaiveDate>,

    #[serde(flatten)]
    columns: HashMap<String, Vec<Option<f64>>>,
}

/// One day of raw values. Gaps (`null`) are kept until a record is built.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow {
    pub date: NaiveDate,
    values: HashMap<Metric, Option<f64>>,
}

impl DailyRow {
    fn value(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied().flatten()
    }

    fn require(&self, metric: Metric) -> Result<f64, DataError> {
        self.value(metric).ok_or(DataError::MissingValue {
            metric,
            date: self.date,
        })
    }

    pub fn temperature_day(&self) -> Result<TemperatureDay, DataError> {
        Ok(TemperatureDay {
            date: self.date,
            max: self.require(Metric::TemperatureMax)?,
            min: self.require(Metric::TemperatureMin)?,
            mean: self.require(Metric::TemperatureMean)?,
        })
    }

    /// Direction is informational only, so a gap there is not an error.
    pub fn wind_day(&self) -> Result<WindDay, DataError> {
        Ok(WindDay {
            date: self.date,
            speed_max: self.require(Metric::WindSpeedMax)?,
            gust_max: self.require(Metric::WindGustsMax)?,
            direction_dominant: self.value(Metric::WindDirectionDominant),
        })
    }
}

impl DailyRecord for DailyRow {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl ForecastResponse {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn unit(&self, metric: Metric) -> Option<&str> {
        self.daily_units.get(metric.key()).map(String::as_str)
    }

    pub fn days(&self) -> usize {
        self.daily.time.len()
    }

    /// Rows holding `metrics`, each checked to be present and to line up with `time`.
    pub fn rows(&self, metrics: &[Metric]) -> Result<DailySeries<DailyRow>, DataError> {
        let mut columns = Vec::with_capacity(metrics.len());
        for &metric in metrics {
            columns.push((metric, self.daily.column(metric)?));
        }
        Ok(self
            .daily
            .time
            .iter()
            .enumerate()
            .map(|(i, date)| DailyRow {
                date: *date,
                values: columns.iter().map(|(m, col)| (*m, col[i])).collect(),
            })
            .collect())
    }

    /// Temperatures on or before `cutoff`. Gaps on later days are ignored.
    pub fn temperature_history(
        &self,
        cutoff: NaiveDate,
    ) -> Result<DailySeries<TemperatureDay>, DataError> {
        self.rows(&Metric::TEMPERATURE)?
            .historical(cutoff)
            .try_map(DailyRow::temperature_day)
    }

    pub fn wind_series(&self) -> Result<DailySeries<WindDay>, DataError> {
        self.rows(&Metric::WIND)?.try_map(DailyRow::wind_day)
    }

    /// Wind maxima on or before `cutoff`. Gaps on later days are ignored.
    pub fn wind_history(&self, cutoff: NaiveDate) -> Result<DailySeries<WindDay>, DataError> {
        self.rows(&Metric::WIND)?
            .historical(cutoff)
            .try_map(DailyRow::wind_day)
    }
}

impl Daily {
    fn column(&self, metric: Metric) -> Result<&[Option<f64>], DataError> {
        let raw = self
            .columns
            .get(metric.key())
            .ok_or(DataError::MissingMetric(metric))?;
        if raw.len() != self.time.len() {
            return Err(DataError::LengthMismatch {
                metric,
                expected: self.time.len(),
                found: raw.len(),
            });
        }
        Ok(raw)
    }
}

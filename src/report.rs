//! Plain-text dumps printed after the chart window closes.

use crate::extremum::Reading;
use crate::series::DailySeries;
use crate::units::direction::degree_to_compass;
use crate::weather::{BeaufortDay, WindDay};

const MISSING: &str = "--";

pub fn wind_table(series: &DailySeries<WindDay>) -> String {
    let mut out = format!(
        "{:<10}  {:>14}  {:>13}  {:>9}\n",
        "date", "max_wind_speed", "max_wind_gust", "direction"
    );
    for day in series {
        let direction = match day.direction_dominant {
            Some(deg) => format!("{deg:>5.0} {:<3}", degree_to_compass(deg)),
            None => format!("{MISSING:>9}"),
        };
        out.push_str(&format!(
            "{:<10}  {:>14.1}  {:>13.1}  {direction}\n",
            day.date.format("%Y-%m-%d"),
            day.speed_max,
            day.gust_max,
        ));
    }
    out
}

/// Wind maxima side by side with their Beaufort forces. Rows are paired by
/// position.
pub fn beaufort_table(wind: &DailySeries<WindDay>, forces: &DailySeries<BeaufortDay>) -> String {
    let mut out = format!(
        "{:<10}  {:>10}  {:>5}  {:<16}  {:>9}  {:>5}  {:<16}\n",
        "date", "speed_kmh", "force", "", "gust_kmh", "force", ""
    );
    for (day, bf) in wind.iter().zip(forces) {
        out.push_str(&format!(
            "{:<10}  {:>10.1}  {:>5}  {:<16}  {:>9.1}  {:>5}  {:<16}\n",
            day.date.format("%Y-%m-%d"),
            day.speed_max,
            bf.speed.force(),
            bf.speed.description(),
            day.gust_max,
            bf.gust.force(),
            bf.gust.description(),
        ));
    }
    out
}

pub fn reading(label: &str, reading: &Reading, unit: &str) -> String {
    format!(
        "{label}: {:.1}{unit} on {}",
        reading.value,
        reading.date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wind_series() -> DailySeries<WindDay> {
        DailySeries::new(vec![
            WindDay {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                speed_max: 9.4,
                gust_max: 23.0,
                direction_dominant: Some(45.0),
            },
            WindDay {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                speed_max: 14.8,
                gust_max: 31.3,
                direction_dominant: None,
            },
        ])
    }

    #[test]
    fn test_wind_table() {
        let table = wind_table(&wind_series());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date"));
        assert!(lines[0].contains("max_wind_speed"));
        assert!(lines[1].starts_with("2024-01-01"));
        assert!(lines[1].contains("9.4"));
        assert!(lines[1].contains("23.0"));
        assert!(lines[1].contains("NE"));
        assert!(lines[2].trim_end().ends_with("--"));
        assert!(lines[2].contains("31.3"));
    }

    #[test]
    fn test_beaufort_table() {
        let wind = wind_series();
        let forces = wind.try_map(WindDay::beaufort).unwrap();
        let table = beaufort_table(&wind, &forces);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Light breeze"));
        assert!(lines[1].contains("Moderate breeze"));
        assert!(lines[2].contains("Gentle breeze"));
        assert!(lines[2].contains("Fresh breeze"));
    }

    #[test]
    fn test_reading() {
        let r = Reading {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            value: 15.0,
        };
        assert_eq!(reading("Highest", &r, "°C"), "Highest: 15.0°C on 2024-01-02");
    }
}

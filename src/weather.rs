use chrono::NaiveDate;

use crate::beaufort::Beaufort;
use crate::error::BeaufortError;
use crate::series::DailyRecord;

/// Daily temperatures in °C.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureDay {
    pub date: NaiveDate,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
}

/// Daily wind maxima in km/h. The dominant direction, in degrees, may be
/// missing without affecting the maxima.
#[derive(Debug, Clone, PartialEq)]
pub struct WindDay {
    pub date: NaiveDate,
    pub speed_max: f64,
    pub gust_max: f64,
    pub direction_dominant: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeaufortDay {
    pub date: NaiveDate,
    pub speed: Beaufort,
    pub gust: Beaufort,
}

impl WindDay {
    pub fn beaufort(&self) -> Result<BeaufortDay, BeaufortError> {
        Ok(BeaufortDay {
            date: self.date,
            speed: Beaufort::classify(self.speed_max)?,
            gust: Beaufort::classify(self.gust_max)?,
        })
    }
}

impl DailyRecord for TemperatureDay {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl DailyRecord for WindDay {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl DailyRecord for BeaufortDay {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wind(speed_max: f64, gust_max: f64) -> WindDay {
        WindDay {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            speed_max,
            gust_max,
            direction_dominant: Some(200.0),
        }
    }

    #[test]
    fn test_beaufort_day() {
        let day = wind(14.2, 33.5).beaufort().unwrap();
        assert_eq!(day.speed.force(), 3);
        assert_eq!(day.gust.force(), 5);
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_beaufort_day_rejects_negative_gust() {
        assert_eq!(
            wind(4.0, -1.0).beaufort(),
            Err(BeaufortError::InvalidSpeed(-1.0))
        );
    }
}

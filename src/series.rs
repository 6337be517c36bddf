//! Day-keyed record sequences and the historical-window filter.

use chrono::{DateTime, NaiveDate, TimeZone};

/// A record that belongs to one calendar day.
pub trait DailyRecord {
    fn date(&self) -> NaiveDate;
}

/// Records in the order the API supplied them. Dates are expected to be
/// unique and increasing but this is not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries<R> {
    records: Vec<R>,
}

/// The last day that counts as history, i.e. `now` truncated to its date.
pub fn cutoff_date<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    now.date_naive()
}

impl<R> DailySeries<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Last record by position, which is not necessarily the latest date.
    pub fn last(&self) -> Option<&R> {
        self.records.last()
    }

    /// Applies a fallible per-record transform, stopping at the first error.
    pub fn try_map<T, E, F>(&self, f: F) -> Result<DailySeries<T>, E>
    where
        F: FnMut(&R) -> Result<T, E>,
    {
        let records = self.records.iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(DailySeries { records })
    }
}

impl<R: DailyRecord + Clone> DailySeries<R> {
    /// Keeps every record dated on or before `cutoff`, in original order.
    ///
    /// Each record is tested on its own, so a series that is not sorted by
    /// date is filtered rather than truncated.
    pub fn historical(&self, cutoff: NaiveDate) -> DailySeries<R> {
        let records = self
            .records
            .iter()
            .filter(|r| r.date() <= cutoff)
            .cloned()
            .collect();
        DailySeries { records }
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(DailyRecord::date).min()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(DailyRecord::date).max()
    }
}

impl<R> FromIterator<R> for DailySeries<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, R> IntoIterator for &'a DailySeries<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Sample {
        pub date: NaiveDate,
        pub value: f64,
    }

    impl DailyRecord for Sample {
        fn date(&self) -> NaiveDate {
            self.date
        }
    }

    pub(crate) fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub(crate) fn sample_series(points: &[(&str, f64)]) -> DailySeries<Sample> {
        points
            .iter()
            .map(|(d, v)| Sample {
                date: day(d),
                value: *v,
            })
            .collect()
    }

    #[test]
    fn test_cutoff_date_truncates_time() {
        let tz = FixedOffset::east_opt(7 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 1, 2, 23, 59, 59).unwrap();
        assert_eq!(cutoff_date(&now), day("2024-01-02"));
    }

    #[test]
    fn test_historical_keeps_cutoff_day() {
        let series = sample_series(&[("2024-01-01", 10.0), ("2024-01-02", 15.0), ("2024-01-03", 12.0)]);
        let filtered = series.historical(day("2024-01-02"));
        assert_eq!(
            filtered,
            sample_series(&[("2024-01-01", 10.0), ("2024-01-02", 15.0)])
        );
    }

    #[test]
    fn test_historical_is_idempotent() {
        let series = sample_series(&[("2024-03-01", 1.0), ("2024-03-05", 2.0), ("2024-03-09", 3.0)]);
        let cutoff = day("2024-03-05");
        let once = series.historical(cutoff);
        assert_eq!(once.historical(cutoff), once);
    }

    #[test]
    fn test_historical_bounds() {
        let series = sample_series(&[("2024-03-01", 1.0), ("2024-03-02", 2.0)]);
        assert!(series.historical(day("2024-02-28")).is_empty());
        assert_eq!(series.historical(day("2024-12-31")), series);
    }

    #[test]
    fn test_historical_unsorted_is_filtered_not_truncated() {
        let series = sample_series(&[("2024-03-01", 1.0), ("2024-03-09", 9.0), ("2024-03-02", 2.0)]);
        let filtered = series.historical(day("2024-03-05"));
        assert_eq!(
            filtered,
            sample_series(&[("2024-03-01", 1.0), ("2024-03-02", 2.0)])
        );
    }

    #[test]
    fn test_try_map_stops_on_error() {
        let series = sample_series(&[("2024-03-01", 1.0), ("2024-03-02", -2.0)]);
        let res: Result<DailySeries<f64>, String> = series.try_map(|s| {
            if s.value < 0.0 {
                Err(format!("negative on {}", s.date))
            } else {
                Ok(s.value)
            }
        });
        assert_eq!(res, Err("negative on 2024-03-02".to_string()));
    }

    #[test]
    fn test_date_range() {
        let series = sample_series(&[("2024-03-04", 1.0), ("2024-03-01", 2.0)]);
        assert_eq!(series.first_date(), Some(day("2024-03-01")));
        assert_eq!(series.last_date(), Some(day("2024-03-04")));
        assert_eq!(series.last().map(|s| s.date), Some(day("2024-03-01")));
    }
}

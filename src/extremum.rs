//! Locating the points worth annotating on a chart.

use chrono::NaiveDate;

use crate::series::{DailyRecord, DailySeries};

/// One annotated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary<R> {
    pub max: Reading,
    pub min: Reading,
    /// Last record in sequence order.
    pub latest: R,
}

/// Largest value of `field`. Ties go to the earliest record.
pub fn peak<R, F>(series: &DailySeries<R>, field: F) -> Option<Reading>
where
    R: DailyRecord,
    F: Fn(&R) -> f64,
{
    first_by(series, field, |candidate, best| candidate > best)
}

/// Smallest value of `field`. Ties go to the earliest record.
pub fn trough<R, F>(series: &DailySeries<R>, field: F) -> Option<Reading>
where
    R: DailyRecord,
    F: Fn(&R) -> f64,
{
    first_by(series, field, |candidate, best| candidate < best)
}

/// Peak, trough and latest record of a series, or `None` when it is empty.
pub fn summarize<R, F>(series: &DailySeries<R>, field: F) -> Option<Summary<R>>
where
    R: DailyRecord + Clone,
    F: Fn(&R) -> f64,
{
    Some(Summary {
        max: peak(series, &field)?,
        min: trough(series, &field)?,
        latest: series.last()?.clone(),
    })
}

fn first_by<R, F, B>(series: &DailySeries<R>, field: F, better: B) -> Option<Reading>
where
    R: DailyRecord,
    F: Fn(&R) -> f64,
    B: Fn(f64, f64) -> bool,
{
    let mut best: Option<Reading> = None;
    for record in series {
        let value = field(record);
        match best {
            Some(b) if !better(value, b.value) => {}
            _ => {
                best = Some(Reading {
                    date: record.date(),
                    value,
                })
            }
        }
    }
    best
}

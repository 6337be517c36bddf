use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io;

use chrono::{Datelike, NaiveDate};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame, Terminal,
};

use crate::extremum::{peak, summarize, trough, Reading};
use crate::report;
use crate::series::{DailyRecord, DailySeries};
use crate::weather::{BeaufortDay, TemperatureDay, WindDay};

const MISSING: &str = "--";

/// Something that can fill the chart window.
pub trait ChartView {
    fn draw(&self, f: &mut Frame, area: Rect);
}

/// Draws `view` until the user presses `q` or `Esc`.
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, view: &dyn ChartView) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            view.draw(f, area)
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let KeyCode::Char('q') | KeyCode::Esc = key.code {
                return Ok(());
            }
        }
    }
}

/// Temperatures up to and including the cutoff day.
pub struct TemperatureView {
    pub cutoff: NaiveDate,
    pub series: DailySeries<TemperatureDay>,
    pub unit: String,
    pub highest: Option<Reading>,
    pub lowest: Option<Reading>,
}

impl TemperatureView {
    pub fn new(series: DailySeries<TemperatureDay>, cutoff: NaiveDate, unit: &str) -> Self {
        let highest = peak(&series, |d| d.max);
        let lowest = trough(&series, |d| d.min);
        Self {
            cutoff,
            series,
            unit: unit.to_string(),
            highest,
            lowest,
        }
    }

    pub fn title(&self) -> String {
        format!(
            "30 Days Historical Weather Temperature (Up to {})",
            self.cutoff.format("%Y-%m-%d")
        )
    }

    pub fn latest(&self) -> Option<&TemperatureDay> {
        self.series.last()
    }

    /// Text equivalent of the chart annotations.
    pub fn summary(&self) -> Vec<String> {
        let (Some(highest), Some(lowest), Some(latest)) =
            (self.highest, self.lowest, self.latest())
        else {
            return vec!["No data available to plot labels.".to_string()];
        };
        vec![
            report::reading("Highest", &highest, &self.unit),
            report::reading("Lowest", &lowest, &self.unit),
            format!(
                "Latest ({}): max {:.1}{unit}, min {:.1}{unit}, mean {:.1}{unit}",
                latest.date.format("%Y-%m-%d"),
                latest.max,
                latest.min,
                latest.mean,
                unit = self.unit
            ),
        ]
    }
}

impl ChartView for TemperatureView {
    fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(5),
            ])
            .split(area);

        f.render_widget(headline(&self.title()), chunks[0]);

        let max = points(&self.series, |d| d.max);
        let min = points(&self.series, |d| d.min);
        let highest = self.highest.map(point).into_iter().collect::<Vec<_>>();
        let lowest = self.lowest.map(point).into_iter().collect::<Vec<_>>();
        let latest_max = self.latest().map(|d| vec![(day_x(d.date), d.max)]).unwrap_or_default();
        let latest_min = self.latest().map(|d| vec![(day_x(d.date), d.min)]).unwrap_or_default();

        let mut datasets = vec![
            line(format!("Max Temperature ({})", self.unit), &max, Color::Red),
            line(format!("Min Temperature ({})", self.unit), &min, Color::Blue),
        ];
        if let Some(r) = self.highest {
            datasets.push(marker(format!("Highest: {:.1}{}", r.value, self.unit), &highest, Color::Red));
        }
        if let Some(r) = self.lowest {
            datasets.push(marker(format!("Lowest: {:.1}{}", r.value, self.unit), &lowest, Color::Blue));
        }
        if let Some(d) = self.latest() {
            datasets.push(marker(format!("{:.1}{}", d.max, self.unit), &latest_max, Color::LightRed));
            datasets.push(marker(format!("{:.1}{}", d.min, self.unit), &latest_min, Color::LightBlue));
        }

        let values: Vec<f64> = self.series.iter().flat_map(|d| [d.max, d.min]).collect();
        let chart = Chart::new(datasets)
            .block(panel(" Daily Temperatures "))
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)))
            .x_axis(date_axis(&self.series))
            .y_axis(value_axis(&format!("Temperature ({})", self.unit), &values));
        f.render_widget(chart, chunks[1]);

        let lines: Vec<Line> = self.summary().into_iter().map(|s| Line::from(format!(" {s}"))).collect();
        f.render_widget(Paragraph::new(lines).block(panel(" Readings ")), chunks[2]);
    }
}

/// The full fetched window, history and forecast alike.
pub struct WindView {
    pub place: String,
    pub past_days: u32,
    pub series: DailySeries<WindDay>,
    pub unit: String,
}

impl WindView {
    pub fn title(&self) -> String {
        format!("Daily Wind Conditions in {}", self.place)
    }
}

impl ChartView for WindView {
    fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Percentage(50),
                Constraint::Percentage(50),
            ])
            .split(area);

        f.render_widget(headline(&self.title()), chunks[0]);

        let panels: [(&str, fn(&WindDay) -> f64, Color); 2] = [
            ("Speed", |d| d.speed_max, Color::Blue),
            ("Gusts", |d| d.gust_max, Color::Red),
        ];
        for ((name, field, color), chunk) in panels.into_iter().zip(&chunks[1..]) {
            let data = points(&self.series, field);
            let summary = summarize(&self.series, field);
            let top = summary.iter().map(|s| point(s.max)).collect::<Vec<_>>();
            let low = summary.iter().map(|s| point(s.min)).collect::<Vec<_>>();

            let mut datasets = vec![line(format!("Max Wind {name}"), &data, color)];
            if let Some(s) = &summary {
                datasets.push(marker(
                    format!("Peak: {:.1} {} ({})", s.max.value, self.unit, s.max.date.format("%m-%d")),
                    &top,
                    Color::Yellow,
                ));
                datasets.push(marker(
                    format!("Low: {:.1} {} ({})", s.min.value, self.unit, s.min.date.format("%m-%d")),
                    &low,
                    Color::Green,
                ));
            }

            let values: Vec<f64> = self.series.iter().map(field).collect();
            let title = format!(" Daily Maximum Wind {name} (Last {} Days) ", self.past_days);
            let chart = Chart::new(datasets)
                .block(panel(&title))
                .legend_position(Some(LegendPosition::TopLeft))
                .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)))
                .x_axis(date_axis(&self.series))
                .y_axis(value_axis(&format!("Speed ({})", self.unit), &values));
            f.render_widget(chart, *chunk);
        }
    }
}

/// Historical wind maxima as Beaufort forces.
pub struct BeaufortView {
    pub place: String,
    pub cutoff: NaiveDate,
    pub series: DailySeries<BeaufortDay>,
    pub strongest: Option<Reading>,
}

impl BeaufortView {
    pub fn new(series: DailySeries<BeaufortDay>, cutoff: NaiveDate, place: &str) -> Self {
        let strongest = peak(&series, |d| d.gust.into());
        Self {
            place: place.to_string(),
            cutoff,
            series,
            strongest,
        }
    }

    pub fn title(&self) -> String {
        format!(
            "Beaufort Wind Force in {} (Up to {})",
            self.place,
            self.cutoff.format("%Y-%m-%d")
        )
    }

    pub fn summary(&self) -> Vec<String> {
        let (Some(strongest), Some(latest)) = (self.strongest, self.series.last()) else {
            return vec!["No data available to plot labels.".to_string()];
        };
        vec![
            format!(
                "Strongest gusts: force {} on {}",
                strongest.value,
                strongest.date.format("%Y-%m-%d")
            ),
            format!(
                "Latest ({}): wind force {} ({}), gusts force {} ({})",
                latest.date.format("%Y-%m-%d"),
                latest.speed,
                latest.speed.description(),
                latest.gust,
                latest.gust.description()
            ),
        ]
    }
}

impl ChartView for BeaufortView {
    fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(area);

        f.render_widget(headline(&self.title()), chunks[0]);

        let speed = points(&self.series, |d| d.speed.into());
        let gust = points(&self.series, |d| d.gust.into());
        let strongest = self.strongest.map(point).into_iter().collect::<Vec<_>>();
        let mut datasets = vec![
            line("Wind".to_string(), &speed, Color::Blue),
            line("Gusts".to_string(), &gust, Color::Red),
        ];
        if let Some(r) = self.strongest {
            datasets.push(marker(format!("Strongest: force {}", r.value), &strongest, Color::Yellow));
        }

        let y_axis = Axis::default()
            .title("Beaufort force")
            .style(Style::default().fg(Color::Gray))
            .bounds([0.0, 12.0])
            .labels(["0", "3", "6", "9", "12"]);
        let chart = Chart::new(datasets)
            .block(panel(" Daily Maximum Beaufort Force "))
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)))
            .x_axis(date_axis(&self.series))
            .y_axis(y_axis);
        f.render_widget(chart, chunks[1]);

        let lines: Vec<Line> = self.summary().into_iter().map(|s| Line::from(format!(" {s}"))).collect();
        f.render_widget(Paragraph::new(lines).block(panel(" Readings ")), chunks[2]);
    }
}

/// Chart x coordinate of a day.
fn day_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn point(reading: Reading) -> (f64, f64) {
    (day_x(reading.date), reading.value)
}

fn points<R, F>(series: &DailySeries<R>, field: F) -> Vec<(f64, f64)>
where
    R: DailyRecord,
    F: Fn(&R) -> f64,
{
    series.iter().map(|r| (day_x(r.date()), field(r))).collect()
}

/// First, middle and last dates of the series, padded by half a day either side.
fn date_bounds<R: DailyRecord + Clone>(series: &DailySeries<R>) -> ([f64; 2], Vec<String>) {
    let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
        return ([0.0, 1.0], vec![MISSING.to_string(), MISSING.to_string()]);
    };
    let (lo, hi) = (day_x(first), day_x(last));
    let mid = first + chrono::Days::new(((hi - lo) / 2.0) as u64);
    let ticks = if first == last { vec![first, last] } else { vec![first, mid, last] };
    let labels = ticks
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    ([lo - 0.5, hi + 0.5], labels)
}

/// Min and max of `values` with a unit of headroom for the markers.
fn value_bounds(values: &[f64]) -> [f64; 2] {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() {
        [(lo - 1.0).floor(), (hi + 1.0).ceil()]
    } else {
        [0.0, 1.0]
    }
}

fn date_axis<'a, R: DailyRecord + Clone>(series: &DailySeries<R>) -> Axis<'a> {
    let (bounds, labels) = date_bounds(series);
    Axis::default()
        .title("Date")
        .style(Style::default().fg(Color::Gray))
        .bounds(bounds)
        .labels(labels)
}

fn value_axis<'a>(title: &str, values: &[f64]) -> Axis<'a> {
    let bounds = value_bounds(values);
    Axis::default()
        .title(title.to_string())
        .style(Style::default().fg(Color::Gray))
        .bounds(bounds)
        .labels([
            format!("{:.0}", bounds[0]),
            format!("{:.0}", (bounds[0] + bounds[1]) / 2.0),
            format!("{:.0}", bounds[1]),
        ])
}

fn line(name: String, data: &[(f64, f64)], color: Color) -> Dataset<'_> {
    Dataset::default()
        .name(name)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

fn marker(name: String, data: &[(f64, f64)], color: Color) -> Dataset<'_> {
    Dataset::default()
        .name(name)
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .data(data)
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(Color::Yellow)))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
}

fn headline(title: &str) -> Paragraph<'_> {
    Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            title,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded),
    )
}

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{io, process::ExitCode};

use chrono::{DateTime, Local};
use clap::Parser;
use log::{debug, info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};

mod app;
mod beaufort;
mod cli;
mod error;
mod extremum;
mod openmeteo;
mod report;
mod series;
mod units;
mod weather;

use crate::app::{run_app, BeaufortView, ChartView, TemperatureView, WindView};
use crate::cli::{Args, Command};
use crate::error::{DataError, Error};
use crate::openmeteo::Metric;
use crate::series::cutoff_date;
use crate::weather::WindDay;

/// Runs `body`, then `restore` whether or not `body` failed. An error from
/// `body` takes precedence over one from `restore`.
fn restoring<T>(
    body: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    let res = body();
    let restored = restore();
    let value = res?;
    restored?;
    Ok(value)
}

fn show_chart(view: &dyn ChartView) -> io::Result<()> {
    enable_raw_mode()?;
    restoring(|| draw_chart(view), restore_terminal)
}

fn draw_chart(view: &dyn ChartView) -> io::Result<()> {
    // setup terminal
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, view)
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
    raw
}

fn run(args: &Args, now: DateTime<Local>) -> Result<(), Error> {
    let response = args.forecast_request().send()?;
    let cutoff = cutoff_date(&now);
    debug!("historical cutoff is {cutoff}");

    match args.command {
        Command::Temperature { .. } => {
            let history = response.temperature_history(cutoff)?;
            info!("{} of {} days are historical", history.len(), response.days());
            if history.is_empty() {
                warn!("no temperature data on or before {cutoff}");
            }

            let unit = response.unit(Metric::TemperatureMax).unwrap_or("°C");
            let view = TemperatureView::new(history, cutoff, unit);
            if !args.no_chart {
                show_chart(&view)?;
            }
            for line in view.summary() {
                println!("{line}");
            }
        }
        Command::Wind { past_days } => {
            let series = response.wind_series()?;
            info!("{} days of wind data", series.len());

            let table = report::wind_table(&series);
            let view = WindView {
                place: args.place.clone(),
                past_days,
                series,
                unit: response.unit(Metric::WindSpeedMax).unwrap_or("km/h").to_string(),
            };
            if !args.no_chart {
                show_chart(&view)?;
            }
            println!("Data used for plotting:");
            print!("{table}");
        }
        Command::Beaufort { .. } => {
            let history = response.wind_history(cutoff)?;
            let forces = history
                .try_map(WindDay::beaufort)
                .map_err(DataError::from)?;
            info!("classified {} historical days", forces.len());
            if forces.is_empty() {
                warn!("no wind data on or before {cutoff}");
            }

            let table = report::beaufort_table(&history, &forces);
            let view = BeaufortView::new(forces, cutoff, &args.place);
            if !args.no_chart {
                show_chart(&view)?;
            }
            for line in view.summary() {
                println!("{line}");
            }
            println!("Data used for plotting:");
            print!("{table}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    debug!("{args:?}");

    match run(&args, Local::now()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn failure_message(err: &Error) -> String {
    match err {
        Error::Fetch(err) => format!("Error fetching data: {err}"),
        err => format!("Error: {err}"),
    }
}

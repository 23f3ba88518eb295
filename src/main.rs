use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};
use tracing::{error, info};

use orderwindow::availability::{earliest_delivery_instant, is_today_orderable, time_until_open};
use orderwindow::calendar::MonthGrid;
use orderwindow::cli::{parse_args, print_help};
use orderwindow::config::SchedulingConfig;
use orderwindow::timefmt;
use orderwindow::validator::{confirm_selection, validate, ValidationState};

fn main() -> Result<()> {
    let args = parse_args();

    if args.help {
        print_help();
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("orderwindow=info".parse()?),
        )
        .init();

    info!("Orderwindow scheduling engine v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (degrades to permissive defaults on bad settings)
    let config = SchedulingConfig::from_env();
    info!("Configuration loaded");
    info!(
        "  Working hours: {:02}:00 - {:02}:00",
        config.working_hours.start_hour, config.working_hours.end_hour
    );
    info!("  Minimum delay: {} min", config.min_delay_minutes);
    info!("  Look-ahead: {} days", config.max_delivery_days);
    info!("  Store timezone: {}", config.timezone);

    if args.validate {
        info!("Validating configuration...");
        match config.validate() {
            Ok(()) => {
                info!("Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
    }

    if let Some(month) = &args.calendar {
        return print_calendar(&config, month);
    }

    if let Some((date_text, time_text)) = &args.check {
        return check_slot(&config, date_text, time_text);
    }

    // Default mode: report whether same-day ordering is open right now
    print_status(&config);
    Ok(())
}

fn print_status(config: &SchedulingConfig) {
    let now = config.local_now();
    let earliest = earliest_delivery_instant(now, config.min_delay_minutes);

    println!("Store clock: {}", now.format("%Y-%m-%d %H:%M"));
    if is_today_orderable(now, config.working_hours, config.min_delay_minutes) {
        println!(
            "Same-day ordering is OPEN; earliest delivery at {}",
            timefmt::format_instant_hhmm(earliest)
        );
    } else {
        println!("Same-day ordering is CLOSED");
    }
    match time_until_open(now, config.working_hours) {
        None => println!("The ordering window is currently open"),
        Some(wait) => println!("The store opens in {}", timefmt::format_wait(wait)),
    }
}

fn print_calendar(config: &SchedulingConfig, month_text: &str) -> Result<()> {
    let now = config.local_now();
    let grid = if month_text.is_empty() {
        MonthGrid::containing(now.date())
    } else {
        parse_month(month_text)
            .ok_or_else(|| anyhow!("invalid month '{}', expected YYYY-MM", month_text))?
    };

    println!("{:04}-{:02}  (* = selectable)", grid.year, grid.month);
    println!("Mo Tu We Th Fr Sa Su");
    let mut column = 0;
    for cell in grid.days(now, config, None) {
        match cell.date {
            None => print!("   "),
            Some(date) => {
                let marker = if cell.is_available { '*' } else { ' ' };
                print!("{:2}{}", date.day(), marker);
            }
        }
        column += 1;
        if column % 7 == 0 {
            println!();
        }
    }
    if column % 7 != 0 {
        println!();
    }
    Ok(())
}

fn check_slot(config: &SchedulingConfig, date_text: &str, time_text: &str) -> Result<()> {
    let now = config.local_now();
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
        .map_err(|e| anyhow!("invalid date '{}': {}", date_text, e))?;
    let (hours_text, minutes_text) = time_text
        .split_once(':')
        .ok_or_else(|| anyhow!("invalid time '{}', expected HH:MM", time_text))?;

    let state = validate(Some(date), hours_text, minutes_text, now, config);
    match state {
        ValidationState::Valid => {
            let selection = confirm_selection(Some(date), hours_text, minutes_text, now, config)
                .map_err(|e| anyhow!(e))?;
            println!("{}", serde_json::to_string_pretty(&selection)?);
        }
        ValidationState::Empty => println!("Nothing to validate"),
        ValidationState::Malformed => {
            println!("Rejected: not a valid 24-hour time");
            std::process::exit(1);
        }
        ValidationState::OutsideWorkingHours => {
            println!(
                "Rejected: outside working hours ({:02}:00 - {:02}:00)",
                config.working_hours.start_hour, config.working_hours.end_hour
            );
            std::process::exit(1);
        }
        ValidationState::TooEarly { earliest } => {
            println!(
                "Rejected: earliest delivery today is {}",
                timefmt::format_instant_hhmm(earliest)
            );
            std::process::exit(1);
        }
    }
    Ok(())
}

fn parse_month(text: &str) -> Option<MonthGrid> {
    let (year_text, month_text) = text.split_once('-')?;
    let year: i32 = year_text.parse().ok()?;
    let month: u32 = month_text.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(MonthGrid::new(year, month))
}

use anyhow::Context;
use chrono::Weekday;
use clap::{Parser, Subcommand};
use omrs_core::config::{
    first_day_of_week_from_env_value, parse_weekday, terminal_self_transition_from_env_value,
};
use omrs_core::constants::{FIRST_DAY_OF_WEEK_ENV, TERMINAL_SELF_TRANSITION_ENV};
use omrs_core::{shift_month, CalendarCell, CoreConfig, SchedulingService};
use omrs_types::{AppointmentStatus, CalendarDate};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "omrs")]
#[command(about = "Appointment status rules and calendar month grids")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether an appointment may move between two statuses
    CanTransition {
        /// Current status (Scheduled, CheckedIn, Completed, Cancelled, Missed)
        from: AppointmentStatus,
        /// Proposed status
        to: AppointmentStatus,
    },
    /// List the statuses reachable from a status
    Transitions {
        /// Current status
        from: AppointmentStatus,
    },
    /// Print the month grid containing a date
    Month {
        /// Any date in the month (YYYY-MM-DD)
        date: CalendarDate,
        /// Months to move from DATE before building the grid (negative for earlier months)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
        /// First day of the week (name, or 0-6 with Sunday = 0)
        #[arg(long, value_parser = parse_first_day)]
        first_day: Option<Weekday>,
        /// Emit the cells as JSON instead of a text grid
        #[arg(long)]
        json: bool,
    },
    /// Print the weekday column order
    Weekdays {
        /// First day of the week (name, or 0-6 with Sunday = 0)
        #[arg(long, value_parser = parse_first_day)]
        first_day: Option<Weekday>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("omrs=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;
    tracing::debug!(?config, "resolved configuration");
    let service = SchedulingService::new(config);

    match cli.command {
        Some(Commands::CanTransition { from, to }) => {
            let allowed = service.can_transition(from, to);
            tracing::info!(%from, %to, allowed, "checked status transition");
            println!("{}", if allowed { "allowed" } else { "blocked" });
        }
        Some(Commands::Transitions { from }) => {
            for status in service.allowed_targets(from) {
                println!("{status}");
            }
        }
        Some(Commands::Month {
            date,
            offset,
            first_day,
            json,
        }) => {
            let service = with_first_day(service, first_day);
            let date = shift_month(date, offset)?;
            if json {
                let cells = service.month_days(date)?;
                println!("{}", serde_json::to_string_pretty(&cells)?);
            } else {
                let weeks = service.month_weeks(date)?;
                print!("{}", render_month(date, &service.weekday_headers(), &weeks));
            }
        }
        Some(Commands::Weekdays { first_day }) => {
            let service = with_first_day(service, first_day);
            let headers: Vec<String> = service
                .weekday_headers()
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("{}", headers.join(" "));
        }
        None => {
            println!("Use 'omrs --help' for commands");
        }
    }

    Ok(())
}

/// Resolve configuration once at startup: config file, then environment, then defaults.
///
/// Command-line flags are applied on top of the result by the individual subcommands.
fn resolve_config(path: Option<&Path>) -> anyhow::Result<CoreConfig> {
    let mut config = match path {
        Some(path) => CoreConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => CoreConfig::default(),
    };

    if let Some(value) = env_value(FIRST_DAY_OF_WEEK_ENV) {
        let first_day = first_day_of_week_from_env_value(Some(value))
            .with_context(|| format!("reading {FIRST_DAY_OF_WEEK_ENV}"))?;
        config = config.with_first_day_of_week(first_day);
    }

    if let Some(value) = env_value(TERMINAL_SELF_TRANSITION_ENV) {
        let policy = terminal_self_transition_from_env_value(Some(value))
            .with_context(|| format!("reading {TERMINAL_SELF_TRANSITION_ENV}"))?;
        config = config.with_terminal_self_transition(policy);
    }

    Ok(config)
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn with_first_day(service: SchedulingService, first_day: Option<Weekday>) -> SchedulingService {
    match first_day {
        Some(day) => SchedulingService::new(service.config().with_first_day_of_week(day)),
        None => service,
    }
}

fn parse_first_day(value: &str) -> Result<Weekday, String> {
    parse_weekday(value).map_err(|e| e.to_string())
}

/// Render a month grid as text, one row per week. Filler days are shown in brackets.
fn render_month(reference: CalendarDate, headers: &[Weekday; 7], weeks: &[Vec<CalendarCell>]) -> String {
    let mut out = format!("{}\n", reference.as_naive().format("%B %Y"));

    let header: Vec<String> = headers.iter().map(|day| format!("{:<4}", day.to_string())).collect();
    out.push_str(header.join(" ").trim_end());
    out.push('\n');

    for week in weeks {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                if cell.in_month {
                    format!(" {:>2} ", cell.date.day())
                } else {
                    format!("[{:>2}]", cell.date.day())
                }
            })
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }

    out
}

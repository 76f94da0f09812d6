//! Constants used throughout the scheduling core crate.

use chrono::Weekday;

/// First day of week used when nothing else is configured.
pub const DEFAULT_FIRST_DAY_OF_WEEK: Weekday = Weekday::Sun;

/// Number of columns in a month grid.
pub const DAYS_PER_WEEK: usize = 7;

/// Cell count of a five-row month grid.
pub const FIVE_ROW_GRID_CELLS: usize = 35;

/// Cell count of a six-row month grid.
pub const SIX_ROW_GRID_CELLS: usize = 42;

/// Leading plus in-month days above this count switch the grid to six rows.
pub const FIVE_ROW_DAY_LIMIT: usize = 30;

/// Environment variable naming the first day of week.
pub const FIRST_DAY_OF_WEEK_ENV: &str = "OMRS_FIRST_DAY_OF_WEEK";

/// Environment variable selecting the terminal self-transition policy.
pub const TERMINAL_SELF_TRANSITION_ENV: &str = "OMRS_TERMINAL_SELF_TRANSITION";

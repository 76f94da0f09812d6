//! Month-grid generation for calendar views.
//!
//! Responsibilities:
//! - Produce the ordered day cells of a rectangular month grid (rows of seven)
//! - Pad partial first and last weeks with filler days from the adjacent months
//! - Provide the small date helpers the grid relies on (month bounds, weekday offsets,
//!   month navigation)
//!
//! Notes:
//! - The first day of the week is always passed in explicitly; nothing here consults the
//!   process locale
//! - All functions are pure and allocate only their return values

use crate::constants::{DAYS_PER_WEEK, FIVE_ROW_DAY_LIMIT, FIVE_ROW_GRID_CELLS, SIX_ROW_GRID_CELLS};
use crate::{CoreError, CoreResult};
use chrono::{Days, Months, NaiveDate, Weekday};
use omrs_types::CalendarDate;

/// One day box of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalendarCell {
    pub date: CalendarDate,
    /// `false` for filler days borrowed from the previous or next month.
    pub in_month: bool,
}

impl CalendarCell {
    pub fn in_month(date: CalendarDate) -> Self {
        Self {
            date,
            in_month: true,
        }
    }

    pub fn out_of_month(date: CalendarDate) -> Self {
        Self {
            date,
            in_month: false,
        }
    }

    /// Filler cells are rendered disabled.
    pub fn is_disabled(&self) -> bool {
        !self.in_month
    }
}

/// Number of columns `weekday` sits after `first_day_of_week` in a grid row, in `0..7`.
pub fn weekday_offset(weekday: Weekday, first_day_of_week: Weekday) -> u32 {
    (weekday.num_days_from_sunday() + 7 - first_day_of_week.num_days_from_sunday()) % 7
}

/// Column header order for a week starting on `first_day_of_week`.
pub fn weekday_headers(first_day_of_week: Weekday) -> [Weekday; 7] {
    let mut headers = [first_day_of_week; 7];
    for column in 1..headers.len() {
        headers[column] = headers[column - 1].succ();
    }
    headers
}

/// Returns the 1st of the month containing `date`.
pub fn first_of_month(date: CalendarDate) -> CoreResult<CalendarDate> {
    Ok(CalendarDate::new(date.year(), date.month(), 1)?)
}

/// Returns the number of days in the month containing `date`.
///
/// # Errors
///
/// Returns [`CoreError::DateOutOfRange`] for the final month chrono can represent.
pub fn days_in_month(date: CalendarDate) -> CoreResult<u32> {
    let first = first_of_month(date)?.as_naive();
    let next = first_of_next_month(first)?;
    Ok((next - first).num_days() as u32)
}

/// Moves `date` by `months` calendar months, clamping the day to the target month's length.
///
/// `shift_month(2024-01-31, 1)` is `2024-02-29`.
pub fn shift_month(date: CalendarDate, months: i32) -> CoreResult<CalendarDate> {
    let naive = date.as_naive();
    let step = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        naive.checked_add_months(step)
    } else {
        naive.checked_sub_months(step)
    };

    shifted
        .map(CalendarDate::from)
        .ok_or_else(|| CoreError::DateOutOfRange(format!("{date} shifted by {months} months")))
}

/// Builds the cells of the month grid containing `reference`.
///
/// The grid opens with the days of the previous month that share the first week of the
/// month, `weekday_offset(1st, first_day_of_week)` of them, followed by every day of the month
/// in order. If that already exceeds 30 cells the grid is padded to 42 (six rows), otherwise
/// to 35 (five rows), using the first days of the next month.
///
/// # Errors
///
/// Returns [`CoreError::DateOutOfRange`] if a filler day falls outside the range chrono can
/// represent.
pub fn month_days(
    reference: CalendarDate,
    first_day_of_week: Weekday,
) -> CoreResult<Vec<CalendarCell>> {
    let first = first_of_month(reference)?;
    let first_naive = first.as_naive();
    let next_first = first_of_next_month(first_naive)?;

    let leading = weekday_offset(first.weekday(), first_day_of_week) as u64;
    let mut cells = Vec::with_capacity(SIX_ROW_GRID_CELLS);

    for back in (1..=leading).rev() {
        let day = first_naive
            .checked_sub_days(Days::new(back))
            .ok_or_else(|| out_of_range(first, "leading"))?;
        cells.push(CalendarCell::out_of_month(day.into()));
    }

    let mut day = first_naive;
    while day < next_first {
        cells.push(CalendarCell::in_month(day.into()));
        day = day
            .succ_opt()
            .ok_or_else(|| out_of_range(first, "in-month"))?;
    }

    let target = if cells.len() > FIVE_ROW_DAY_LIMIT {
        SIX_ROW_GRID_CELLS
    } else {
        FIVE_ROW_GRID_CELLS
    };

    let trailing = (target - cells.len()) as u64;
    for forward in 0..trailing {
        let day = next_first
            .checked_add_days(Days::new(forward))
            .ok_or_else(|| out_of_range(first, "trailing"))?;
        cells.push(CalendarCell::out_of_month(day.into()));
    }

    tracing::trace!(
        month = %first,
        leading,
        trailing,
        cells = cells.len(),
        "built month grid"
    );
    Ok(cells)
}

/// Same cells as [`month_days`], split into rows of seven.
pub fn month_weeks(
    reference: CalendarDate,
    first_day_of_week: Weekday,
) -> CoreResult<Vec<Vec<CalendarCell>>> {
    Ok(month_days(reference, first_day_of_week)?
        .chunks(DAYS_PER_WEEK)
        .map(<[CalendarCell]>::to_vec)
        .collect())
}

fn first_of_next_month(first: NaiveDate) -> CoreResult<NaiveDate> {
    first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| out_of_range(first.into(), "next month"))
}

fn out_of_range(month: CalendarDate, what: &str) -> CoreError {
    CoreError::DateOutOfRange(format!("{what} days of the month starting {month}"))
}

//! Funding period calculator
//!
//! Computes how many funding periods have elapsed for a budget schedule.
//! Monthly budgets have two separately named counting strategies:
//!
//! - [`rollover_elapsed_months`] counts actual rollover dates (the day of the
//!   month the credit applies) that have passed since the schedule start.
//! - [`whole_month_elapsed`] is the legacy whole-calendar-month count, which
//!   ignores the day of month and so over-counts relative to the
//!   rollover-aware mode.
//!
//! A budget with a rollover day uses the rollover-aware strategy; one without
//! falls back to the legacy count. All functions are pure; "now" is captured
//! exactly once per call.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::models::BudgetPeriod;

/// Number of funding periods elapsed as of today.
///
/// A missing start date counts as a single current period. A start date in
/// the future yields zero.
pub fn elapsed_periods(
    start_date: Option<NaiveDate>,
    period: BudgetPeriod,
    rollover_day: Option<u32>,
) -> u32 {
    elapsed_periods_on(start_date, period, rollover_day, Local::now().date_naive())
}

/// Deterministic variant of [`elapsed_periods`] with an explicit "today".
pub fn elapsed_periods_on(
    start_date: Option<NaiveDate>,
    period: BudgetPeriod,
    rollover_day: Option<u32>,
    today: NaiveDate,
) -> u32 {
    let Some(start) = start_date else {
        // No schedule anchor: treat as a single current period
        return 1;
    };

    if start > today {
        return 0;
    }

    match period {
        BudgetPeriod::Monthly => match rollover_day {
            Some(day) => rollover_elapsed_months(start, day, today),
            None => whole_month_elapsed(start, today),
        },
        BudgetPeriod::Weekly => ((today - start).num_days() / 7) as u32 + 1,
        BudgetPeriod::Yearly => (today.year() - start.year()) as u32 + 1,
    }
}

/// Rollover-aware monthly count: how many rollover dates have passed.
///
/// The sequence starts at the first occurrence of `rollover_day` on or after
/// `start` and steps one calendar month at a time. Requires `start <= today`.
pub fn rollover_elapsed_months(start: NaiveDate, rollover_day: u32, today: NaiveDate) -> u32 {
    rollover_dates(start, rollover_day, today).len() as u32
}

/// Legacy monthly count: whole calendar months between start and today,
/// inclusive of the starting month. Day of month is ignored.
pub fn whole_month_elapsed(start: NaiveDate, today: NaiveDate) -> u32 {
    let months = (today.year() - start.year()) * 12 + today.month() as i32 - start.month() as i32;
    (months + 1).max(0) as u32
}

/// The sequence of rollover dates from `start` up to and including `today`.
///
/// The first entry is the rollover day of the start month, or of the next
/// month when `start` falls after it. A rollover day past the end of a month
/// clamps to that month's last day (day 31 in February lands on the 28th or
/// 29th), chrono's normalization for calendar arithmetic.
pub fn rollover_dates(start: NaiveDate, rollover_day: u32, today: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();

    let (mut year, mut month) = (start.year(), start.month());
    let mut rollover = clamped_day_of_month(year, month, rollover_day);

    // Start date past this month's rollover: the first credit is next month
    if start > rollover {
        (year, month) = next_month(year, month);
        rollover = clamped_day_of_month(year, month, rollover_day);
    }

    while rollover <= today {
        dates.push(rollover);
        (year, month) = next_month(year, month);
        rollover = clamped_day_of_month(year, month, rollover_day);
    }

    dates
}

/// Day `day` of the given month, clamped to the month's last day.
fn clamped_day_of_month(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| {
        let (next_year, next_month) = next_month(year, month);
        NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap() - Duration::days(1)
    })
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

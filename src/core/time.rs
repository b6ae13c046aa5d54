use chrono::{Days, Local, Months, NaiveDate};

use crate::core::error::DueDateError;
use crate::core::types::{Offset, OffsetUnit};

pub const FIXED_DATE_ENV: &str = "REMEDIATION_DUE_FIXED_DATE";

pub fn today() -> NaiveDate {
    if let Ok(value) = std::env::var(FIXED_DATE_ENV) {
        if let Ok(date) = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
            return date;
        }
        tracing::warn!("ignoring unparseable {}={}", FIXED_DATE_ENV, value);
    }
    Local::now().date_naive()
}

/// Advance `date` by `offset`.
///
/// Month offsets clamp to the last day of the target month, so Jan 31 plus
/// one month is Feb 29 in a leap year and Feb 28 otherwise. Day offsets are
/// exact calendar days.
pub fn add_offset(date: NaiveDate, offset: Offset) -> Result<NaiveDate, DueDateError> {
    let shifted = match offset.unit {
        OffsetUnit::Days => date.checked_add_days(Days::new(u64::from(offset.amount))),
        OffsetUnit::Months => date.checked_add_months(Months::new(offset.amount)),
    };
    shifted.ok_or_else(|| {
        DueDateError::invalid(
            "reference date",
            &date.to_string(),
            format!("adding {} leaves the supported calendar range", offset),
        )
    })
}

/// Parse `"<n>d"` or `"<n>m"`, e.g. `2d` or `1m`.
pub fn parse_offset(value: &str) -> Result<Offset, DueDateError> {
    let trimmed = value.trim().to_lowercase();
    let (digits, unit) = if let Some(days) = trimmed.strip_suffix('d') {
        (days, OffsetUnit::Days)
    } else if let Some(months) = trimmed.strip_suffix('m') {
        (months, OffsetUnit::Months)
    } else {
        return Err(DueDateError::Config(format!(
            "invalid offset (use <n>d|<n>m): {}",
            value
        )));
    };
    let amount: u32 = digits
        .trim()
        .parse()
        .map_err(|_| DueDateError::Config(format!("invalid offset amount: {}", value)))?;
    if amount == 0 {
        return Err(DueDateError::Config(format!(
            "offset must be positive: {}",
            value
        )));
    }
    Ok(Offset { unit, amount })
}

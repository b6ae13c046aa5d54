//! Parsing of the date strings found on finding records.
//!
//! Reference-date fields hold `D/M/Y` text. The create date is looser: the
//! host stores whatever format the record was imported with, so it goes
//! through [`DateParser::parse_date_like`].

use chrono::NaiveDate;
use regex::Regex;

use crate::core::error::DueDateError;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parse a `D/M/Y` string.
///
/// Returns `Ok(None)` when the value does not split into exactly three parts
/// on `/`; such a value does not count as a date for reference selection.
/// Three parts that do not form a calendar date are an error.
pub fn parse_dmy(field: &str, value: &str) -> Result<Option<NaiveDate>, DueDateError> {
    let parts: Vec<&str> = value.split('/').map(str::trim).collect();
    if parts.len() != 3 {
        return Ok(None);
    }
    let day = numeric_part(field, value, "day", parts[0])?;
    let month = numeric_part(field, value, "month", parts[1])?;
    let year = parse_year(field, value, parts[2])?;
    build_date(field, value, year, month, day).map(Some)
}

#[derive(Debug, Clone)]
pub struct DateParser {
    iso: Regex,
    day_month_name: Regex,
    month_name_dash: Regex,
    month_name_space: Regex,
}

impl DateParser {
    pub fn new() -> Result<Self, DueDateError> {
        let compile =
            |pat: &str| Regex::new(pat).map_err(|e| DueDateError::Config(e.to_string()));
        Ok(Self {
            iso: compile(
                r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?)?(?:Z|[+-]\d{2}:?\d{2})?$",
            )?,
            day_month_name: compile(r"^(\d{1,2})-([A-Za-z]{3,})-(\d{2}|\d{4})$")?,
            month_name_dash: compile(r"^([A-Za-z]{3,})-(\d{2}|\d{4})$")?,
            month_name_space: compile(r"^([A-Za-z]{3,})\s+(\d{2}|\d{4})$")?,
        })
    }

    /// Parse any of the formats seen in imported create dates:
    ///
    /// * `D/M/YYYY`, `D/M/YY`
    /// * `YYYY-MM-DD`, optionally followed by a time and offset
    /// * `01-Jan-23`, `01-January-2023`
    /// * `Jan-23`, `Jan-2023` (first of the month)
    /// * `January 2023`, `Jan 23` (first of the month)
    pub fn parse_date_like(&self, field: &str, value: &str) -> Result<NaiveDate, DueDateError> {
        let trimmed = value.trim();

        if let Some(date) = parse_dmy(field, trimmed)? {
            return Ok(date);
        }

        if let Some(caps) = self.iso.captures(trimmed) {
            let year: i32 = caps[1]
                .parse()
                .map_err(|_| DueDateError::invalid(field, value, "year is not numeric"))?;
            let month = numeric_part(field, value, "month", &caps[2])?;
            let day = numeric_part(field, value, "day", &caps[3])?;
            return build_date(field, value, year, month, day);
        }

        if let Some(caps) = self.day_month_name.captures(trimmed) {
            let day = numeric_part(field, value, "day", &caps[1])?;
            let month = month_from_name(field, value, &caps[2])?;
            let year = parse_year(field, value, &caps[3])?;
            return build_date(field, value, year, month, day);
        }

        let month_year = self
            .month_name_dash
            .captures(trimmed)
            .or_else(|| self.month_name_space.captures(trimmed));
        if let Some(caps) = month_year {
            let month = month_from_name(field, value, &caps[1])?;
            let year = parse_year(field, value, &caps[2])?;
            return build_date(field, value, year, month, 1);
        }

        Err(DueDateError::invalid(
            field,
            value,
            "unrecognized date format",
        ))
    }
}

fn numeric_part(field: &str, value: &str, name: &str, part: &str) -> Result<u32, DueDateError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DueDateError::invalid(
            field,
            value,
            format!("{} is not numeric", name),
        ));
    }
    part.parse()
        .map_err(|_| DueDateError::invalid(field, value, format!("{} is out of range", name)))
}

fn parse_year(field: &str, value: &str, part: &str) -> Result<i32, DueDateError> {
    let raw = numeric_part(field, value, "year", part)?;
    match part.len() {
        2 => Ok(2000 + raw as i32),
        4 => Ok(raw as i32),
        _ => Err(DueDateError::invalid(
            field,
            value,
            "year must have 2 or 4 digits",
        )),
    }
}

fn month_from_name(field: &str, value: &str, name: &str) -> Result<u32, DueDateError> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|idx| idx as u32 + 1)
        .ok_or_else(|| DueDateError::invalid(field, value, format!("unknown month {:?}", name)))
}

fn build_date(
    field: &str,
    value: &str,
    year: i32,
    month: u32,
    day: u32,
) -> Result<NaiveDate, DueDateError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DueDateError::invalid(field, value, "not a calendar date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dmy_reads_day_first() {
        assert_eq!(
            parse_dmy("f", "15/03/2024").unwrap(),
            Some(ymd(2024, 3, 15))
        );
        assert_eq!(parse_dmy("f", "1/2/24").unwrap(), Some(ymd(2024, 2, 1)));
    }

    #[test]
    fn dmy_without_three_parts_is_not_a_date() {
        assert_eq!(parse_dmy("f", "2024-03-15").unwrap(), None);
        assert_eq!(parse_dmy("f", "15/03").unwrap(), None);
        assert_eq!(parse_dmy("f", "1/1/1/2024").unwrap(), None);
    }

    #[test]
    fn dmy_rejects_malformed_parts() {
        for bad in ["aa/03/2024", "15//2024", "31/02/2024", "15/13/2024", "15/03/202"] {
            let err = parse_dmy("DateFirstFound", bad).unwrap_err();
            assert!(
                matches!(err, DueDateError::InvalidInput { ref field, .. } if field == "DateFirstFound"),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn date_like_formats() {
        let parser = DateParser::new().unwrap();
        let cases = [
            ("01/01/2023", ymd(2023, 1, 1)),
            ("2024-03-15", ymd(2024, 3, 15)),
            ("2023-07-04 09:15:00.123", ymd(2023, 7, 4)),
            ("2023-07-04T09:15:00Z", ymd(2023, 7, 4)),
            ("2023-07-04T09:15:00+10:00", ymd(2023, 7, 4)),
            ("01-Jan-23", ymd(2023, 1, 1)),
            ("5-September-2022", ymd(2022, 9, 5)),
            ("Jan-23", ymd(2023, 1, 1)),
            ("mar-2021", ymd(2021, 3, 1)),
            ("January 2023", ymd(2023, 1, 1)),
            ("Dec 24", ymd(2024, 12, 1)),
        ];
        for (raw, expected) in cases {
            assert_eq!(
                parser.parse_date_like("CreateDate", raw).unwrap(),
                expected,
                "{raw}"
            );
        }
    }

    #[test]
    fn date_like_rejects_unknown_text() {
        let parser = DateParser::new().unwrap();
        assert!(parser.parse_date_like("CreateDate", "n/a").is_err());
        assert!(parser.parse_date_like("CreateDate", "Foo-23").is_err());
        assert!(parser.parse_date_like("CreateDate", "yesterday").is_err());
    }
}

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum RiskRating {
    Low,
    Moderate,
    High,
    Critical,
    Other(String),
}

impl RiskRating {
    /// Host ratings are matched exactly; anything else is kept verbatim.
    pub fn parse(value: &str) -> Self {
        match value {
            "Low" => RiskRating::Low,
            "Moderate" => RiskRating::Moderate,
            "High" => RiskRating::High,
            "Critical" => RiskRating::Critical,
            other => RiskRating::Other(other.to_string()),
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskRating::High | RiskRating::Critical)
    }
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskRating::Low => f.write_str("Low"),
            RiskRating::Moderate => f.write_str("Moderate"),
            RiskRating::High => f.write_str("High"),
            RiskRating::Critical => f.write_str("Critical"),
            RiskRating::Other(raw) => f.write_str(raw),
        }
    }
}

impl From<RiskRating> for String {
    fn from(value: RiskRating) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    Days,
    Months,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Offset {
    pub unit: OffsetUnit,
    pub amount: u32,
}

impl Offset {
    pub const fn days(amount: u32) -> Self {
        Self {
            unit: OffsetUnit::Days,
            amount,
        }
    }

    pub const fn months(amount: u32) -> Self {
        Self {
            unit: OffsetUnit::Months,
            amount,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            OffsetUnit::Days => 'd',
            OffsetUnit::Months => 'm',
        };
        write!(f, "{}{}", self.amount, suffix)
    }
}

impl From<Offset> for String {
    fn from(value: Offset) -> Self {
        value.to_string()
    }
}

/// Which record field supplied the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSource {
    RemediationDueDate,
    DateFirstFound,
    CreateDate,
    None,
}

/// Host context the rule is evaluated for. The two differ only in the
/// unrecognized-rating fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Surface {
    #[default]
    FieldCalculation,
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueDate {
    /// `None` only when no reference date field was present at all.
    pub date: Option<NaiveDate>,
    pub source: ReferenceSource,
    pub reference: Option<NaiveDate>,
    pub offset: Option<Offset>,
    pub risk_rating: Option<RiskRating>,
    pub internet_facing: bool,
}

impl DueDate {
    pub fn missing(risk_rating: Option<RiskRating>, internet_facing: bool) -> Self {
        Self {
            date: None,
            source: ReferenceSource::None,
            reference: None,
            offset: None,
            risk_rating,
            internet_facing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_rating_is_case_sensitive() {
        assert_eq!(RiskRating::parse("High"), RiskRating::High);
        assert_eq!(
            RiskRating::parse("high"),
            RiskRating::Other("high".to_string())
        );
        assert!(RiskRating::Critical.is_elevated());
        assert!(!RiskRating::Moderate.is_elevated());
    }

    #[test]
    fn offset_serializes_in_short_form() {
        let json = serde_json::to_string(&Offset::months(2)).unwrap();
        assert_eq!(json, "\"2m\"");
        assert_eq!(Offset::days(2).to_string(), "2d");
    }
}

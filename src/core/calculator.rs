//! The remediation due-date rule.
//!
//! A reference date is taken from the first usable source in priority
//! order (remediation due date, date first found, create date) and the
//! [`OffsetPolicy`] window for the finding's risk is added to it. In a
//! field calculation an existing remediation due date is returned as-is and
//! only D/M/Y text counts for the first two sources; the template surface
//! parses every source leniently and offsets whichever one it picked.

use chrono::NaiveDate;

use crate::core::dates::{parse_dmy, DateParser};
use crate::core::error::DueDateError;
use crate::core::policy::OffsetPolicy;
use crate::core::record::FindingRecord;
use crate::core::time::{add_offset, today};
use crate::core::types::{DueDate, ReferenceSource, RiskRating, Surface};

pub const REMEDIATION_DUE_DATE: &str = "RemediationDueDate";
pub const DATE_FIRST_FOUND: &str = "DateFirstFound";
pub const CREATE_DATE: &str = "CreateDate";

#[derive(Debug, Clone)]
pub struct DueDateCalculator {
    policy: OffsetPolicy,
    surface: Surface,
    parser: DateParser,
}

impl DueDateCalculator {
    pub fn new(policy: OffsetPolicy, surface: Surface) -> Result<Self, DueDateError> {
        Ok(Self {
            policy,
            surface,
            parser: DateParser::new()?,
        })
    }

    pub fn policy(&self) -> &OffsetPolicy {
        &self.policy
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn compute(&self, record: &FindingRecord) -> Result<DueDate, DueDateError> {
        let risk_rating = record.risk_rating.as_deref().map(RiskRating::parse);
        let internet_facing = record.is_internet_facing();

        let reference = match self.surface {
            Surface::FieldCalculation => {
                if let Some(date) =
                    dmy_field(REMEDIATION_DUE_DATE, &record.remediation_due_date)?
                {
                    tracing::debug!(%date, "remediation due date already set");
                    return Ok(DueDate {
                        date: Some(date),
                        source: ReferenceSource::RemediationDueDate,
                        reference: Some(date),
                        offset: None,
                        risk_rating,
                        internet_facing,
                    });
                }
                match dmy_field(DATE_FIRST_FOUND, &record.date_first_found)? {
                    Some(date) => Some((date, ReferenceSource::DateFirstFound)),
                    None => self.date_like(
                        CREATE_DATE,
                        &record.create_date,
                        ReferenceSource::CreateDate,
                    )?,
                }
            }
            Surface::Template => self.template_reference(record)?,
        };

        let Some((reference, source)) = reference else {
            tracing::debug!("no reference date on record");
            return Ok(DueDate::missing(risk_rating, internet_facing));
        };

        self.apply_offset_rule(reference, source, risk_rating, internet_facing)
    }

    /// The template takes the first present date field, parsed leniently,
    /// and offsets it like any other source.
    fn template_reference(
        &self,
        record: &FindingRecord,
    ) -> Result<Option<(NaiveDate, ReferenceSource)>, DueDateError> {
        let candidates = [
            (
                REMEDIATION_DUE_DATE,
                &record.remediation_due_date,
                ReferenceSource::RemediationDueDate,
            ),
            (
                DATE_FIRST_FOUND,
                &record.date_first_found,
                ReferenceSource::DateFirstFound,
            ),
            (CREATE_DATE, &record.create_date, ReferenceSource::CreateDate),
        ];
        for (field, value, source) in candidates {
            if value.is_some() {
                return self.date_like(field, value, source);
            }
        }
        Ok(None)
    }

    fn date_like(
        &self,
        field: &str,
        value: &Option<String>,
        source: ReferenceSource,
    ) -> Result<Option<(NaiveDate, ReferenceSource)>, DueDateError> {
        match value.as_deref() {
            Some(raw) => Ok(Some((self.parser.parse_date_like(field, raw)?, source))),
            None => Ok(None),
        }
    }

    /// Add the risk window to `reference`. Unrecognized or absent ratings
    /// leave the reference date unchanged on the field-calculation surface
    /// and fall back to today on the template surface.
    pub fn apply_offset_rule(
        &self,
        reference: NaiveDate,
        source: ReferenceSource,
        risk_rating: Option<RiskRating>,
        internet_facing: bool,
    ) -> Result<DueDate, DueDateError> {
        let offset = risk_rating
            .as_ref()
            .and_then(|r| self.policy.offset_for(r, internet_facing));

        let date = match offset {
            Some(offset) => add_offset(reference, offset)?,
            None => {
                tracing::debug!(
                    rating = ?risk_rating,
                    surface = ?self.surface,
                    "unrecognized risk rating; no offset"
                );
                match self.surface {
                    Surface::FieldCalculation => reference,
                    Surface::Template => today(),
                }
            }
        };
        tracing::debug!(%reference, %date, ?source, ?offset, "due date computed");

        Ok(DueDate {
            date: Some(date),
            source,
            reference: Some(reference),
            offset,
            risk_rating,
            internet_facing,
        })
    }
}

fn dmy_field(field: &str, value: &Option<String>) -> Result<Option<NaiveDate>, DueDateError> {
    let Some(raw) = value.as_deref() else {
        return Ok(None);
    };
    let parsed = parse_dmy(field, raw)?;
    if parsed.is_none() {
        tracing::warn!(field, value = raw, "date is not D/M/Y; skipping field");
    }
    Ok(parsed)
}

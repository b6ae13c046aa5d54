use serde::{Deserialize, Serialize};

use crate::core::error::DueDateError;
use crate::core::time::parse_offset;
use crate::core::types::{Offset, RiskRating};

/// Remediation windows keyed by risk rating and internet exposure.
/// High and Critical share the "elevated" rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OffsetPolicy {
    pub low: Offset,
    pub moderate: Offset,
    pub elevated_internet_facing: Offset,
    pub elevated_internal: Offset,
}

impl Default for OffsetPolicy {
    fn default() -> Self {
        Self {
            low: Offset::months(2),
            moderate: Offset::months(1),
            elevated_internet_facing: Offset::days(2),
            elevated_internal: Offset::months(1),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OffsetPolicyRaw {
    #[serde(default)]
    pub(crate) low: Option<String>,
    #[serde(default)]
    pub(crate) moderate: Option<String>,
    #[serde(default)]
    pub(crate) elevated_internet_facing: Option<String>,
    #[serde(default)]
    pub(crate) elevated_internal: Option<String>,
}

impl OffsetPolicy {
    pub(crate) fn from_raw(raw: OffsetPolicyRaw) -> Result<Self, DueDateError> {
        let defaults = Self::default();
        let pick = |value: Option<String>, fallback: Offset| match value {
            Some(v) => parse_offset(&v),
            None => Ok(fallback),
        };
        Ok(Self {
            low: pick(raw.low, defaults.low)?,
            moderate: pick(raw.moderate, defaults.moderate)?,
            elevated_internet_facing: pick(
                raw.elevated_internet_facing,
                defaults.elevated_internet_facing,
            )?,
            elevated_internal: pick(raw.elevated_internal, defaults.elevated_internal)?,
        })
    }

    /// The offset for a rating, or `None` when the rating is unrecognized
    /// and no offset applies.
    pub fn offset_for(&self, rating: &RiskRating, internet_facing: bool) -> Option<Offset> {
        match rating {
            RiskRating::Low => Some(self.low),
            RiskRating::Moderate => Some(self.moderate),
            r if r.is_elevated() && internet_facing => Some(self.elevated_internet_facing),
            r if r.is_elevated() => Some(self.elevated_internal),
            _ => None,
        }
    }

    /// Rows of the decision table in display order.
    pub fn rows(&self) -> Vec<PolicyRow> {
        vec![
            PolicyRow::new("Low", "any", self.low),
            PolicyRow::new("Moderate", "any", self.moderate),
            PolicyRow::new("High or Critical", "Yes", self.elevated_internet_facing),
            PolicyRow::new("High or Critical", "not Yes", self.elevated_internal),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyRow {
    pub risk_rating: &'static str,
    pub internet_facing: &'static str,
    pub offset: Offset,
}

impl PolicyRow {
    fn new(risk_rating: &'static str, internet_facing: &'static str, offset: Offset) -> Self {
        Self {
            risk_rating,
            internet_facing,
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let policy = OffsetPolicy::default();
        assert_eq!(
            policy.offset_for(&RiskRating::Low, true),
            Some(Offset::months(2))
        );
        assert_eq!(
            policy.offset_for(&RiskRating::Moderate, true),
            Some(Offset::months(1))
        );
        assert_eq!(
            policy.offset_for(&RiskRating::High, true),
            Some(Offset::days(2))
        );
        assert_eq!(
            policy.offset_for(&RiskRating::Critical, false),
            Some(Offset::months(1))
        );
        assert_eq!(
            policy.offset_for(&RiskRating::Other("Info".into()), true),
            None
        );
    }

    #[test]
    fn raw_overrides_only_named_entries() {
        let raw: OffsetPolicyRaw = toml::from_str("elevated_internet_facing = \"7d\"").unwrap();
        let policy = OffsetPolicy::from_raw(raw).unwrap();
        assert_eq!(policy.elevated_internet_facing, Offset::days(7));
        assert_eq!(policy.low, Offset::months(2));
    }

    #[test]
    fn raw_rejects_bad_offset() {
        let raw: OffsetPolicyRaw = toml::from_str("low = \"soon\"").unwrap();
        assert!(matches!(
            OffsetPolicy::from_raw(raw),
            Err(DueDateError::Config(_))
        ));
    }
}

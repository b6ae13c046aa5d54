use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::DueDateError;

/// The due-date inputs of one finding, lifted out of the host's field map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingRecord {
    #[serde(default)]
    pub remediation_due_date: Option<String>,
    #[serde(default)]
    pub date_first_found: Option<String>,
    #[serde(default)]
    pub create_date: Option<String>,
    #[serde(default)]
    pub risk_rating: Option<String>,
    #[serde(default)]
    pub internet_facing: Option<String>,
}

/// Host field identifiers for each input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub remediation_due_date: String,
    pub date_first_found: String,
    pub create_date: String,
    pub risk_rating: String,
    pub internet_facing: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            remediation_due_date: "Mirror of finding register.Remediation Due Date".to_string(),
            date_first_found: "Mirror of finding register.Date First Found".to_string(),
            create_date: "Mirror of finding register.Create Date".to_string(),
            risk_rating: "Mirror of finding register.Risk Rating - UNSW".to_string(),
            internet_facing: "Assets1.Internet Facing".to_string(),
        }
    }
}

impl FieldNames {
    fn all(&self) -> [(&'static str, &str); 5] {
        [
            ("remediation_due_date", &self.remediation_due_date),
            ("date_first_found", &self.date_first_found),
            ("create_date", &self.create_date),
            ("risk_rating", &self.risk_rating),
            ("internet_facing", &self.internet_facing),
        ]
    }

    pub fn validate(&self) -> Result<(), DueDateError> {
        let all = self.all();
        for (key, name) in all.iter() {
            if name.trim().is_empty() {
                return Err(DueDateError::Config(format!(
                    "fields.{} must not be empty",
                    key
                )));
            }
        }
        for (i, (key, name)) in all.iter().enumerate() {
            if let Some((other, _)) = all[i + 1..].iter().find(|(_, n)| n == name) {
                return Err(DueDateError::Config(format!(
                    "fields.{} and fields.{} both map to {:?}",
                    key, other, name
                )));
            }
        }
        Ok(())
    }
}

impl FindingRecord {
    /// Build the typed record from a host field map. Blank values count as
    /// absent, the same as the host treats empty strings.
    pub fn from_fields(fields: &HashMap<String, String>, names: &FieldNames) -> Self {
        let take = |name: &str| {
            fields
                .get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            remediation_due_date: take(&names.remediation_due_date),
            date_first_found: take(&names.date_first_found),
            create_date: take(&names.create_date),
            risk_rating: take(&names.risk_rating),
            internet_facing: take(&names.internet_facing),
        }
    }

    pub fn is_internet_facing(&self) -> bool {
        self.internet_facing.as_deref() == Some("Yes")
    }
}

/// Read one host record: a JSON object of field name to value. Nulls are
/// dropped; numbers and booleans keep their JSON text.
pub fn load_host_record(path: &Path) -> Result<HashMap<String, String>, DueDateError> {
    let data = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&data)?;
    host_fields_from_json(value)
}

pub fn host_fields_from_json(value: Value) -> Result<HashMap<String, String>, DueDateError> {
    let Value::Object(map) = value else {
        return Err(DueDateError::Record(
            "host record must be a JSON object of field names".to_string(),
        ));
    };
    let mut fields = HashMap::new();
    for (name, value) in map {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(_) | Value::Number(_) => value.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(DueDateError::Record(format!(
                    "field {:?} must be a scalar value",
                    name
                )))
            }
        };
        fields.insert(name, text);
    }
    Ok(fields)
}

/// Split a `NAME=VALUE` pair. Only the first `=` separates, so values may
/// contain `=`.
pub fn parse_field_pair(pair: &str) -> Result<(String, String), DueDateError> {
    match pair.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(DueDateError::Record(format!(
            "expected NAME=VALUE, got {:?}",
            pair
        ))),
    }
}

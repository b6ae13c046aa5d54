use std::{fs, path::Path};

use serde::Deserialize;

use crate::core::error::DueDateError;
use crate::core::policy::{OffsetPolicy, OffsetPolicyRaw};
use crate::core::record::FieldNames;
use crate::core::types::Surface;

pub const DEFAULT_CONFIG_PATH: &str = "config/remediation-due.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub surface: Surface,
    pub fields: FieldNames,
    pub policy: OffsetPolicy,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AppConfigRaw {
    #[serde(default)]
    surface: Surface,
    #[serde(default)]
    fields: FieldNames,
    #[serde(default)]
    policy: OffsetPolicyRaw,
}

/// Load the config file, falling back to defaults when the default path
/// does not exist. An explicitly named file must exist.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, DueDateError> {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

    if !path.exists() {
        if explicit {
            return Err(DueDateError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        tracing::debug!("no config at {}; using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| DueDateError::Config(e.to_string()))?;
    let cfg = parse_config(&content)?;
    tracing::debug!("config loaded from {}", path.display());
    Ok(cfg)
}

pub fn parse_config(content: &str) -> Result<AppConfig, DueDateError> {
    let raw: AppConfigRaw = toml::from_str(content)?;
    AppConfig::from_raw(raw)
}

impl AppConfig {
    fn from_raw(raw: AppConfigRaw) -> Result<Self, DueDateError> {
        raw.fields.validate()?;
        Ok(Self {
            surface: raw.surface,
            fields: raw.fields,
            policy: OffsetPolicy::from_raw(raw.policy)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Offset;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let cfg = parse_config(
            r#"
surface = "template"

[fields]
risk_rating = "Risk"

[policy]
low = "3m"
"#,
        )
        .unwrap();
        assert_eq!(cfg.surface, Surface::Template);
        assert_eq!(cfg.fields.risk_rating, "Risk");
        assert_eq!(
            cfg.fields.internet_facing,
            FieldNames::default().internet_facing
        );
        assert_eq!(cfg.policy.low, Offset::months(3));
        assert_eq!(cfg.policy.moderate, Offset::months(1));
    }

    #[test]
    fn unknown_keys_and_bad_values_fail() {
        assert!(matches!(
            parse_config("surfce = \"template\""),
            Err(DueDateError::Config(_))
        ));
        assert!(parse_config("surface = \"email\"").is_err());
        assert!(parse_config("[policy]\nmoderate = \"0d\"").is_err());
        assert!(parse_config("[fields]\nrisk_rating = \"\"").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("remediation_due_no_such_config.toml");
        assert!(load_config(Some(&path)).is_err());
    }
}

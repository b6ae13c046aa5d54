use std::io;

#[derive(thiserror::Error, Debug)]
pub enum DueDateError {
    #[error("invalid input in {field}: {value:?} ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
    #[error("record error: {0}")]
    Record(String),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DueDateError {
    pub fn invalid(field: &str, value: &str, reason: impl Into<String>) -> Self {
        DueDateError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for DueDateError {
    fn from(err: serde_json::Error) -> Self {
        DueDateError::Record(err.to_string())
    }
}

impl From<toml::de::Error> for DueDateError {
    fn from(err: toml::de::Error) -> Self {
        DueDateError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_names_field_and_value() {
        let err = DueDateError::invalid("DateFirstFound", "aa/03/2024", "day is not numeric");
        assert_eq!(
            err.to_string(),
            "invalid input in DateFirstFound: \"aa/03/2024\" (day is not numeric)"
        );
    }
}

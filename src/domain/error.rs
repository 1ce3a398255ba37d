//! Domain errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    /// The reading source returned nothing (absent or empty) for the meter.
    #[error("No usage data found for smart meter {meter_id}.")]
    NoReadings { meter_id: String },
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_readings_message_names_meter() {
        let err = DomainError::NoReadings {
            meter_id: "smart-meter-9".into(),
        };
        assert_eq!(
            err.to_string(),
            "No usage data found for smart meter smart-meter-9."
        );
    }
}

// radiomast-config/src/validation.rs
//! Custom validation functions for configuration.

use validator::ValidationError;

/// Validate that a technology token names one of the supported generations.
/// Casing is forgiven to match the parser.
pub fn validate_technology(token: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^(?i)(2G|3G|4G|5G)$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(token) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_technology"))
    }
}

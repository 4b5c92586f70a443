//! Error types for configuration loading and validation

use std::fmt::Write;
use std::path::PathBuf;

use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Unified configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File not found error.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Configuration validation error.
    #[error("Invalid configuration:\n{}", render_violations(.0))]
    Validation(#[source] ValidationErrors),

    /// Figment parsing error.
    #[error("Configuration parsing error: {0}")]
    Parsing(#[from] figment::Error),
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}

/// Flattens validator's error tree into `section.field` lines.
///
/// Every validated field sits behind `#[validate(nested)]`, so the flat
/// `field_errors()` view would come back empty here.
fn render_violations(errors: &ValidationErrors) -> String {
    let mut lines = String::new();
    walk(errors, "", &mut lines);
    lines
}

fn walk(errors: &ValidationErrors, prefix: &str, lines: &mut String) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(violations) => {
                for violation in violations {
                    let detail = violation
                        .message
                        .as_ref()
                        .map_or_else(|| violation.code.to_string(), ToString::to_string);
                    let _ = writeln!(lines, "  - {path}: {detail}");
                }
            }
            ValidationErrorsKind::Struct(section) => walk(section, &path, lines),
            ValidationErrorsKind::List(entries) => {
                for (index, entry) in entries {
                    walk(entry, &format!("{path}[{index}]"), lines);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RadiomastConfig;
    use validator::Validate;

    #[test]
    fn renders_section_qualified_paths() {
        let mut config = RadiomastConfig::default();
        config.station.technology = "6G".into();
        config.sizing.core_capacity_msgs = 0;

        let error = ConfigError::from(config.validate().unwrap_err());
        let rendered = error.to_string();
        assert!(
            rendered.contains("station.technology: unknown_technology"),
            "{rendered}"
        );
        assert!(rendered.contains("sizing.core_capacity_msgs"), "{rendered}");
    }
}

use crate::utils::error::{CpStarsError, Result};
use serde::Serialize;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Constraint on a single field of a record, keyed by its wire (JSON) name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConstraint {
    pub name: &'static str,
    pub required: bool,
    pub max_length: Option<usize>,
}

impl FieldConstraint {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            max_length: None,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            max_length: None,
        }
    }

    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

/// A record type checked against a table of field constraints.
///
/// The table is declared once per type; [`validate_record`] does the work for
/// every implementor.
pub trait ValidatedRecord: Serialize {
    const FIELDS: &'static [FieldConstraint];

    fn validate_fields(&self) -> Result<()> {
        validate_record(self)
    }
}

pub fn validate_record<T: ValidatedRecord + ?Sized>(record: &T) -> Result<()> {
    let value = serde_json::to_value(record)?;
    let object = value.as_object().ok_or_else(|| {
        CpStarsError::invalid_record(format!(
            "expected a JSON object for {}",
            std::any::type_name::<T>()
        ))
    })?;

    for constraint in T::FIELDS {
        match object.get(constraint.name) {
            None | Some(serde_json::Value::Null) => {
                if constraint.required {
                    return Err(CpStarsError::invalid_record(format!(
                        "Invalid value for `{}`, must not be null",
                        constraint.name
                    )));
                }
            }
            Some(serde_json::Value::String(s)) => {
                if let Some(max) = constraint.max_length {
                    let len = s.chars().count();
                    if len > max {
                        return Err(CpStarsError::invalid_record(format!(
                            "Invalid value for `{}`, length {} must be less than or equal to {}",
                            constraint.name, len, max
                        )));
                    }
                }
            }
            Some(_) => {}
        }
    }

    Ok(())
}

pub fn validate_records<T: ValidatedRecord>(records: &[T]) -> Result<()> {
    records.iter().try_for_each(T::validate_fields)
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CpStarsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CpStarsError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CpStarsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CpStarsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CpStarsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

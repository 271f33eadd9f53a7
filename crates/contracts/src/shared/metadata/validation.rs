//! Validation rules for form fields

use serde::{Deserialize, Serialize};

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Create validation rules for a required field
    pub const fn required() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} is required", field_label));
        }

        if let Some(min) = self.min_length {
            if value.len() < min {
                return Err(format!("{} must be at least {} characters", field_label, min));
            }
        }

        if let Some(max) = self.max_length {
            if value.len() > max {
                return Err(format!("{} must be at most {} characters", field_label, max));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} must be at least {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} must be at most {}", field_label, max));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        let rules = ValidationRules::required();
        assert!(rules.validate_string("", "nombre").is_err());
        assert!(rules.validate_string("   ", "nombre").is_err());
        assert!(rules.validate_string("Banco Uno", "nombre").is_ok());
    }

    #[test]
    fn length_bounds() {
        let rules = ValidationRules {
            min_length: Some(2),
            max_length: Some(5),
            ..ValidationRules::none()
        };
        assert!(rules.validate_string("a", "codigo").is_err());
        assert!(rules.validate_string("abc", "codigo").is_ok());
        assert!(rules.validate_string("abcdef", "codigo").is_err());
    }

    #[test]
    fn numeric_bounds() {
        let rules = ValidationRules {
            min: Some(0.0),
            max: Some(100.0),
            ..ValidationRules::none()
        };
        assert!(rules.validate_number(-1.0, "descuento").is_err());
        assert!(rules.validate_number(50.0, "descuento").is_ok());
        assert!(rules.validate_number(100.5, "descuento").is_err());
    }
}

//! Field kind enumeration for the form metadata system

use serde::{Deserialize, Serialize};

/// Widget category of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Switch,
    Select,
    Date,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Switch => "switch",
            Self::Select => "select",
            Self::Date => "date",
        }
    }
}

/// Input sanitizer applied to raw text before it is stored in a draft.
/// Every formatter is idempotent: re-applying to formatted text is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Base-10 integer; non-numeric input coerces to "0"
    Integer,
    /// Decimal accepting both `.` and `,`, normalized to `.`
    Decimal,
    /// Decimal clamped to the range [0, 100]
    Percentage,
    /// Digits and `-` shaped towards `YYYY-MM-DD`, max 10 chars
    Date,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Percentage => "percentage",
            Self::Date => "date",
        }
    }
}

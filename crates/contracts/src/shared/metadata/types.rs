//! Field specification types for wizard forms
//!
//! A `FieldSpec` is built once per category from the static catalog, then
//! select options are merged in post-hoc as collaborator queries resolve.
//! Once handed to a render pass the spec is treated as immutable.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::field_type::{FieldKind, InputFormat};
use super::validation::ValidationRules;

/// One entry of a select field's option list, backed by the raw JSON record
/// returned by the option collaborator (currencies, warehouses, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectOption(pub Value);

impl SelectOption {
    /// Attribute to display, resolved through the field's `option_label_key`
    pub fn label(&self, label_key: &str) -> String {
        match self.0.get(label_key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Attribute to store, resolved through the field's `option_value_key`
    pub fn value(&self, value_key: &str) -> Value {
        self.0.get(value_key).cloned().unwrap_or(Value::Null)
    }
}

/// Specification of one form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Unique key within the category, also the wire field name
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Populated asynchronously; empty until the option collaborator resolves
    #[serde(default)]
    pub options: Vec<SelectOption>,
    pub option_label_key: Option<String>,
    pub option_value_key: Option<String>,
    /// Input sanitizer for text entry, when the field needs one
    pub format: Option<InputFormat>,
    #[serde(default)]
    pub validation: ValidationRules,
}

impl FieldSpec {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            options: Vec::new(),
            option_label_key: None,
            option_value_key: None,
            format: None,
            validation: ValidationRules::none(),
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &str, label: &str, format: InputFormat) -> Self {
        let mut spec = Self::new(name, label, FieldKind::Number);
        spec.format = Some(format);
        spec
    }

    pub fn switch(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Switch)
    }

    /// Select field storing `value_key` and displaying `label_key` of each option
    pub fn select(name: &str, label: &str, label_key: &str, value_key: &str) -> Self {
        let mut spec = Self::new(name, label, FieldKind::Select);
        spec.option_label_key = Some(label_key.to_string());
        spec.option_value_key = Some(value_key.to_string());
        spec
    }

    pub fn date(name: &str, label: &str) -> Self {
        let mut spec = Self::new(name, label, FieldKind::Date);
        spec.format = Some(InputFormat::Date);
        spec
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.validation.required = true;
        self
    }

    pub fn with_validation(mut self, validation: ValidationRules) -> Self {
        self.required = validation.required;
        self.validation = validation;
        self
    }

    /// Merge a resolved option collection into the spec
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_option_resolves_keys() {
        let opt = SelectOption(json!({"id": 2, "nombre": "Dólar"}));
        assert_eq!(opt.label("nombre"), "Dólar");
        assert_eq!(opt.value("id"), json!(2));
        assert_eq!(opt.value("missing"), Value::Null);
    }

    #[test]
    fn builders_set_kind_and_required() {
        let spec = FieldSpec::select("idMoneda", "Moneda", "nombre", "id").required();
        assert_eq!(spec.kind, FieldKind::Select);
        assert!(spec.required);
        assert!(spec.validation.is_required());
        assert_eq!(spec.option_value_key.as_deref(), Some("id"));
        assert!(spec.options.is_empty());
    }
}

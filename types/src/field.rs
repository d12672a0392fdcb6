//! Form field declarations and validation outcomes.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Declared kind of a form field, as given by its HTML `type` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Select,
    Textarea,
    Checkbox,
    /// Any other input type. Carries no rule beyond the required check.
    Other(String),
}

impl FieldKind {
    /// Parse an HTML input type. Matching is case-insensitive.
    #[must_use]
    pub fn from_input_type(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Self::Text,
            "email" => Self::Email,
            "tel" => Self::Tel,
            "select" | "select-one" => Self::Select,
            "textarea" => Self::Textarea,
            "checkbox" => Self::Checkbox,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        Self::from_input_type(&value)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation rule implied by a field's kind and required marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRule {
    Required,
    Email,
    Phone,
}

impl FieldRule {
    /// Rules that apply to a field, in evaluation order.
    #[must_use]
    pub fn derive(kind: &FieldKind, required: bool) -> Vec<FieldRule> {
        let mut rules = Vec::with_capacity(2);
        if required {
            rules.push(FieldRule::Required);
        }
        match kind {
            FieldKind::Email => rules.push(FieldRule::Email),
            FieldKind::Tel => rules.push(FieldRule::Phone),
            _ => {}
        }
        rules
    }
}

/// One field of a form: its name, declared kind and required marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSpec {
    name: String,
    #[serde(rename = "type", default = "default_kind")]
    kind: FieldKind,
    #[serde(default)]
    required: bool,
}

fn default_kind() -> FieldKind {
    FieldKind::Text
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn rules(&self) -> Vec<FieldRule> {
        FieldRule::derive(&self.kind, self.required)
    }

    /// Whether the submit workflow must validate this field.
    #[must_use]
    pub fn has_rule(&self) -> bool {
        !self.rules().is_empty()
    }
}

/// Ordered list of fields making up a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    #[must_use]
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The contact form on the company website.
    #[must_use]
    pub fn contact() -> Self {
        Self::new(vec![
            FieldSpec::new("navn", FieldKind::Text).required(),
            FieldSpec::new("epost", FieldKind::Email).required(),
            FieldSpec::new("telefon", FieldKind::Tel).required(),
            FieldSpec::new("bydel", FieldKind::Select),
            FieldSpec::new("prosjekt_type", FieldKind::Select).required(),
            FieldSpec::new("befaring", FieldKind::Checkbox),
            FieldSpec::new("beskrivelse", FieldKind::Textarea),
        ])
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    #[error("required")]
    Required,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid phone")]
    InvalidPhone,
}

impl ValidationError {
    /// Inline copy shown under the field.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::Required => "Dette feltet er påkrevd",
            Self::InvalidEmail => "Ugyldig e-postadresse",
            Self::InvalidPhone => "Ugyldig telefonnummer",
        }
    }
}

/// Result of validating one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationError),
}

impl ValidationOutcome {
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub const fn error(self) -> Option<ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(err) => Some(err),
        }
    }
}

// crates/domain/src/contact.rs

use crate::validate::{
    sanitize_text_field, validate_asset_ref, validate_email, validate_web_url, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// ─────────────────────────────────────────────────────────────────────────────
// Fields
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Logo,
    CompanyName,
    Website,
    Email,
    Phone,
}

impl ContactField {
    /// Settings-form order.
    pub const ALL: [ContactField; 5] = [
        ContactField::Logo,
        ContactField::CompanyName,
        ContactField::Website,
        ContactField::Email,
        ContactField::Phone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Logo => "logo",
            ContactField::CompanyName => "company_name",
            ContactField::Website => "website",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Logo => "Logo",
            ContactField::CompanyName => "Company Name",
            ContactField::Website => "Website",
            ContactField::Email => "Email Address",
            ContactField::Phone => "Phone Number",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactField::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| format!("unknown contact field: {s}"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stored record
// ─────────────────────────────────────────────────────────────────────────────

/// The persisted support-contact record. Every field is independently
/// optional; `None` is never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ContactConfig {
    pub fn is_empty(&self) -> bool {
        ContactField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        let slot = match field {
            ContactField::Logo => &self.logo,
            ContactField::CompanyName => &self.company_name,
            ContactField::Website => &self.website,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
        };
        slot.as_deref().filter(|v| !v.is_empty())
    }

    fn slot_mut(&mut self, field: ContactField) -> &mut Option<String> {
        match field {
            ContactField::Logo => &mut self.logo,
            ContactField::CompanyName => &mut self.company_name,
            ContactField::Website => &mut self.website,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
        }
    }

    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    /// Keep only the fields a deployment exposes.
    pub fn restricted_to(&self, fields: &[ContactField]) -> ContactConfig {
        let mut out = ContactConfig::default();
        for field in fields {
            *out.slot_mut(*field) = self.get(*field).map(str::to_owned);
        }
        out
    }

    /// Field-wise overlay: values present in `self` win, `defaults` fill gaps.
    pub fn overlay(&self, defaults: &ContactConfig) -> ContactConfig {
        let mut out = ContactConfig::default();
        for field in ContactField::ALL {
            *out.slot_mut(field) = self
                .get(field)
                .or_else(|| defaults.get(field))
                .map(str::to_owned);
        }
        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Write-side input
// ─────────────────────────────────────────────────────────────────────────────

/// A submission from the settings form (or any other writer).
///
/// `None` means "not submitted" and keeps the previous value; `Some("")`
/// clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl ContactInput {
    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Logo => self.logo.as_deref(),
            ContactField::CompanyName => self.company_name.as_deref(),
            ContactField::Website => self.website.as_deref(),
            ContactField::Email => self.email.as_deref(),
            ContactField::Phone => self.phone.as_deref(),
        }
    }

    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            ContactField::Logo => self.logo = value,
            ContactField::CompanyName => self.company_name = value,
            ContactField::Website => self.website = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
        }
        self
    }

    /// Drop submitted values for fields this deployment does not expose.
    pub fn restricted_to(&self, fields: &[ContactField]) -> ContactInput {
        let mut out = ContactInput::default();
        for field in fields {
            if let Some(v) = self.get(*field) {
                out = out.with(*field, v);
            }
        }
        out
    }
}

impl From<&ContactConfig> for ContactInput {
    /// Every field is submitted; absent values become explicit clears.
    fn from(config: &ContactConfig) -> Self {
        ContactField::ALL
            .into_iter()
            .fold(ContactInput::default(), |input, field| {
                input.with(field, config.get(field).unwrap_or_default())
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sanitization
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub field: ContactField,
    pub submitted: String,
    pub reason: ValidationError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub config: ContactConfig,
    pub rejected: Vec<Rejection>,
}

/// Sanitize one submitted value. `Ok(None)` clears the field.
pub fn sanitize_field(field: ContactField, raw: &str) -> Result<Option<String>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let clean = match field {
        ContactField::Email => validate_email(raw)?,
        ContactField::Website => validate_web_url(raw)?.to_string(),
        ContactField::Logo => validate_asset_ref(raw)?,
        ContactField::CompanyName | ContactField::Phone => sanitize_text_field(raw),
    };

    Ok(Some(clean).filter(|v| !v.is_empty()))
}

/// Apply a submission on top of the previously stored record.
///
/// Rejected fields keep their previous (already valid) value, so a bad
/// submission never erases good data.
#[tracing::instrument(skip_all)]
pub fn sanitize(input: &ContactInput, previous: &ContactConfig) -> SaveOutcome {
    let mut config = previous.clone();
    let mut rejected = Vec::new();

    for field in ContactField::ALL {
        let Some(raw) = input.get(field) else {
            continue;
        };

        match sanitize_field(field, raw) {
            Ok(value) => *config.slot_mut(field) = value,
            Err(reason) => {
                tracing::debug!(%field, %reason, "rejected contact field");
                rejected.push(Rejection {
                    field,
                    submitted: raw.to_string(),
                    reason,
                });
            }
        }
    }

    SaveOutcome { config, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> ContactConfig {
        ContactConfig::default()
            .with(ContactField::CompanyName, "Acme")
            .with(ContactField::Email, "support@acme.test")
            .with(ContactField::Website, "https://acme.test/")
    }

    #[test]
    fn empty_config_reports_empty() {
        assert!(ContactConfig::default().is_empty());
        assert!(ContactConfig::default()
            .with(ContactField::Phone, "")
            .is_empty());
        assert!(!acme().is_empty());
    }

    #[test]
    fn invalid_email_keeps_previous_value() {
        let input = ContactInput::default().with(ContactField::Email, "not-an-email");
        let out = sanitize(&input, &acme());

        assert_eq!(out.config.email.as_deref(), Some("support@acme.test"));
        assert_eq!(out.rejected.len(), 1);
        assert_eq!(out.rejected[0].field, ContactField::Email);
        assert_eq!(out.rejected[0].reason, ValidationError::InvalidEmail);
    }

    #[test]
    fn invalid_email_on_empty_record_stays_empty() {
        let input = ContactInput::default().with(ContactField::Email, "nope@");
        let out = sanitize(&input, &ContactConfig::default());
        assert_eq!(out.config.email, None);
    }

    #[test]
    fn website_without_scheme_is_rejected() {
        let input = ContactInput::default().with(ContactField::Website, "acme.test");
        let out = sanitize(&input, &ContactConfig::default());
        assert_eq!(out.config.website, None);
        assert_eq!(out.rejected[0].field, ContactField::Website);
    }

    #[test]
    fn empty_submission_clears_and_missing_keeps() {
        let input = ContactInput::default().with(ContactField::CompanyName, "   ");
        let out = sanitize(&input, &acme());
        assert_eq!(out.config.company_name, None);
        // not submitted → untouched
        assert_eq!(out.config.email.as_deref(), Some("support@acme.test"));
        assert!(out.rejected.is_empty());
    }

    #[test]
    fn free_text_is_stripped() {
        let input = ContactInput::default()
            .with(ContactField::CompanyName, "<b>Acme</b>  Ltd")
            .with(ContactField::Phone, " +1 (555)\n0100 ");
        let out = sanitize(&input, &ContactConfig::default());
        assert_eq!(out.config.company_name.as_deref(), Some("Acme Ltd"));
        assert_eq!(out.config.phone.as_deref(), Some("+1 (555) 0100"));
    }

    #[test]
    fn sanitizer_is_idempotent() {
        let input = ContactInput::default()
            .with(ContactField::CompanyName, " Acme <i>Corp</i> ")
            .with(ContactField::Website, "HTTPS://ACME.test")
            .with(ContactField::Logo, "/images/logo.png")
            .with(ContactField::Email, " help@acme.test ")
            .with(ContactField::Phone, "0100");
        let once = sanitize(&input, &ContactConfig::default()).config;
        let twice = sanitize(&ContactInput::from(&once), &once);

        assert!(twice.rejected.is_empty());
        assert_eq!(twice.config, once);
    }

    #[test]
    fn resaving_keeps_text_with_nested_octets() {
        let input = ContactInput::default()
            .with(ContactField::CompanyName, "Acme%4%41Corp")
            .with(ContactField::Phone, "+1%2%35 0100");
        let once = sanitize(&input, &ContactConfig::default()).config;
        let twice = sanitize(&ContactInput::from(&once), &once);

        assert_eq!(twice.config, once);
        assert_eq!(once.company_name.as_deref(), Some("Acmeorp"));
    }

    #[test]
    fn restricted_to_drops_unexposed_fields() {
        let only = acme().restricted_to(&[ContactField::Email, ContactField::Phone]);
        assert_eq!(only.email.as_deref(), Some("support@acme.test"));
        assert_eq!(only.company_name, None);
        assert_eq!(only.website, None);
    }

    #[test]
    fn overlay_prefers_own_values() {
        let defaults = ContactConfig::default()
            .with(ContactField::Phone, "0100")
            .with(ContactField::Email, "env@acme.test");
        let merged = acme().overlay(&defaults);
        assert_eq!(merged.email.as_deref(), Some("support@acme.test"));
        assert_eq!(merged.phone.as_deref(), Some("0100"));
    }

    #[test]
    fn field_names_round_trip() {
        for f in ContactField::ALL {
            assert_eq!(f.as_str().parse::<ContactField>(), Ok(f));
        }
        assert!("fax".parse::<ContactField>().is_err());
    }
}

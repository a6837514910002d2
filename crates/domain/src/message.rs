use crate::validate::{sanitize_text_field, sanitize_textarea_field, validate_email, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub error: ValidationError,
}

/// Raw contact form values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(self, now: DateTime<Utc>) -> Result<ContactMessage, Vec<FieldError>> {
        let mut errs = Vec::new();

        let name = sanitize_text_field(&self.name);
        if name.is_empty() {
            errs.push(FieldError {
                field: "name",
                error: ValidationError::Required,
            });
        }

        let email = match validate_email(&self.email) {
            Ok(e) => e,
            Err(error) => {
                errs.push(FieldError {
                    field: "email",
                    error,
                });
                String::new()
            }
        };

        let message = sanitize_textarea_field(&self.message);
        if message.is_empty() {
            errs.push(FieldError {
                field: "message",
                error: ValidationError::Required,
            });
        }

        if !errs.is_empty() {
            return Err(errs);
        }

        Ok(ContactMessage {
            id: Uuid::new_v4(),
            name,
            email,
            message,
            received_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_submission_is_cleaned() {
        let msg = ContactSubmission {
            name: " Jo <b>Bloggs</b> ".into(),
            email: "jo@example.com".into(),
            message: "Hi,\r\nmy site is down.<script>x</script>".into(),
        }
        .validate(Utc::now())
        .unwrap();

        assert_eq!(msg.name, "Jo Bloggs");
        assert_eq!(msg.message, "Hi,\nmy site is down.");
    }

    #[test]
    fn every_invalid_field_is_reported() {
        let errs = ContactSubmission {
            name: " ".into(),
            email: "jo@".into(),
            message: "".into(),
        }
        .validate(Utc::now())
        .unwrap_err();

        let fields: Vec<&str> = errs.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "email", "message"]);
    }
}

//! Client contact and event details entered in the final wizard step.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;

/// Contact and event fields collected before submission.
///
/// First name, last name, email, phone, wedding date and venue are all
/// mandatory; partner name and language preference are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub partner_name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub venue: String,
    pub language_preference: Option<String>,
}

impl ClientDraft {
    /// Field-scoped validation messages for every unmet requirement.
    pub fn field_errors(&self) -> Vec<(&'static str, String)> {
        let mut errors = Vec::new();

        if self.first_name.trim().is_empty() {
            errors.push(("first_name", "First name is required".to_string()));
        }
        if self.last_name.trim().is_empty() {
            errors.push(("last_name", "Last name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            errors.push(("email", "Email is required".to_string()));
        } else if !self.email.validate_email() {
            errors.push(("email", format!("Invalid email address '{}'", self.email)));
        }
        if self.phone.trim().is_empty() {
            errors.push(("phone", "Phone is required".to_string()));
        }
        if self.wedding_date.is_none() {
            errors.push(("wedding_date", "Wedding date is required".to_string()));
        }
        if self.venue.trim().is_empty() {
            errors.push(("venue", "Venue is required".to_string()));
        }

        errors
    }

    /// Validate all mandatory fields and the email format.
    pub fn validate(&self) -> Result<(), CoreError> {
        let errors = self.field_errors();
        if errors.is_empty() {
            return Ok(());
        }
        let joined = errors
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(CoreError::Validation(joined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ClientDraft {
        ClientDraft {
            first_name: "Marta".into(),
            last_name: "García".into(),
            email: "marta@example.com".into(),
            phone: "+34 600 000 000".into(),
            partner_name: Some("Jon".into()),
            wedding_date: NaiveDate::from_ymd_opt(2027, 6, 12),
            venue: "Finca La Arboleda".into(),
            language_preference: Some("castellano".into()),
        }
    }

    #[test]
    fn complete_draft_validates() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn each_mandatory_field_is_checked() {
        for strip in ["first_name", "last_name", "email", "phone", "venue"] {
            let mut draft = complete_draft();
            match strip {
                "first_name" => draft.first_name.clear(),
                "last_name" => draft.last_name.clear(),
                "email" => draft.email.clear(),
                "phone" => draft.phone.clear(),
                "venue" => draft.venue.clear(),
                _ => unreachable!(),
            }
            let errors = draft.field_errors();
            assert_eq!(errors.len(), 1, "stripping {strip}");
            assert_eq!(errors[0].0, strip);
        }
    }

    #[test]
    fn missing_wedding_date_is_an_error() {
        let mut draft = complete_draft();
        draft.wedding_date = None;
        assert!(draft.field_errors().iter().any(|(f, _)| *f == "wedding_date"));
    }

    #[test]
    fn malformed_email_rejected() {
        let mut draft = complete_draft();
        draft.email = "not-an-email".into();
        let errors = draft.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "email");
    }

    #[test]
    fn partner_name_is_optional() {
        let mut draft = complete_draft();
        draft.partner_name = None;
        draft.language_preference = None;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn validate_joins_field_messages() {
        let draft = ClientDraft::default();
        let err = draft.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("first_name"));
        assert!(msg.contains("venue"));
    }
}

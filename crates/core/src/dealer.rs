//! Dealer applications.
//!
//! Businesses apply to become dealers through a form. A submitted
//! [`DealerApplicationForm`] is validated into a [`DealerApplication`] that
//! starts out [`ApplicationStatus::Pending`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ApplicationStatus, DealerApplicationId, Email, EmailError};

/// Errors from validating or deciding a dealer application.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DealerApplicationError {
    /// A required field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address is not valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The phone number is not a plausible phone number.
    #[error("invalid phone number")]
    InvalidPhone,
}

/// Business postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Raw dealer application as submitted by the form.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DealerApplicationForm {
    pub business_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub business_type: String,
    pub tax_id: String,
}

/// A validated dealer application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerApplication {
    pub id: DealerApplicationId,
    pub business_name: String,
    pub contact_name: String,
    pub email: Email,
    pub phone: String,
    pub address: Address,
    pub business_type: String,
    pub tax_id: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DealerApplicationForm {
    /// Validate the form into a pending application.
    ///
    /// All text fields are trimmed. Every field is required.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a blank field, an invalid email or
    /// a phone number without 10 to 15 digits.
    pub fn validate(self) -> Result<DealerApplication, DealerApplicationError> {
        let business_name = required("businessName", &self.business_name)?;
        let contact_name = required("contactName", &self.contact_name)?;
        let email = Email::parse(&self.email)?;
        let phone = required("phone", &self.phone)?;
        let street = required("address.street", &self.address.street)?;
        let city = required("address.city", &self.address.city)?;
        let state = required("address.state", &self.address.state)?;
        let postal_code = required("address.postalCode", &self.address.postal_code)?;
        let country = required("address.country", &self.address.country)?;
        let business_type = required("businessType", &self.business_type)?;
        let tax_id = required("taxId", &self.tax_id)?;

        let digits = phone.chars().filter(char::is_ascii_digit).count();
        let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')');
        if !(10..=15).contains(&digits) || !phone.chars().all(allowed) {
            return Err(DealerApplicationError::InvalidPhone);
        }

        let now = Utc::now();
        Ok(DealerApplication {
            id: DealerApplicationId::generate(),
            business_name,
            contact_name,
            email,
            phone,
            address: Address {
                street,
                city,
                state,
                postal_code,
                country,
            },
            business_type,
            tax_id,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, DealerApplicationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DealerApplicationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> DealerApplicationForm {
        DealerApplicationForm {
            business_name: " Green Valley Agro ".to_string(),
            contact_name: "Sunita Patil".to_string(),
            email: "Sunita@GreenValley.in".to_string(),
            phone: "+91 98765 43210".to_string(),
            address: Address {
                street: "12 Market Yard".to_string(),
                city: "Nashik".to_string(),
                state: "Maharashtra".to_string(),
                postal_code: "422001".to_string(),
                country: "India".to_string(),
            },
            business_type: "retail".to_string(),
            tax_id: "27ABCDE1234F1Z5".to_string(),
        }
    }

    #[test]
    fn test_valid_form_becomes_pending_application() {
        let app = form().validate().unwrap();
        assert_eq!(app.business_name, "Green Valley Agro");
        assert_eq!(app.email.as_str(), "sunita@greenvalley.in");
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(app.created_at, app.updated_at);
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let mut f = form();
        f.tax_id = "   ".to_string();
        assert_eq!(
            f.validate(),
            Err(DealerApplicationError::MissingField("taxId"))
        );

        let mut f = form();
        f.address.postal_code = String::new();
        assert_eq!(
            f.validate(),
            Err(DealerApplicationError::MissingField("address.postalCode"))
        );
    }

    #[test]
    fn test_bad_email_is_rejected() {
        let mut f = form();
        f.email = "sunita".to_string();
        assert!(matches!(
            f.validate(),
            Err(DealerApplicationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_bad_phone_is_rejected() {
        for phone in ["12345", "98765abc43210", "+91 98765 43210 99999"] {
            let mut f = form();
            f.phone = phone.to_string();
            assert_eq!(
                f.validate(),
                Err(DealerApplicationError::InvalidPhone),
                "{phone}"
            );
        }
    }

    #[test]
    fn test_form_deserializes_camel_case() {
        let json = r#"{
            "businessName": "Kisan Kendra",
            "contactName": "Arjun",
            "email": "arjun@kisan.in",
            "phone": "9876543210",
            "address": {"street": "1 Main Rd", "city": "Pune", "state": "MH",
                        "postalCode": "411001", "country": "India"},
            "businessType": "wholesale",
            "taxId": "TAX-1"
        }"#;
        let f: DealerApplicationForm = serde_json::from_str(json).unwrap();
        assert_eq!(f.address.postal_code, "411001");
        assert!(f.validate().is_ok());
    }
}

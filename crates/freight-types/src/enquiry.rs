use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{is_valid_email, required, FieldErrors};

pub const MIN_MESSAGE_LEN: usize = 10;

string_enum! {
    /// How the visitor wants to be contacted back.
    pub enum ContactChannel("contact channel") {
        Email => "email",
        Phone => "phone",
    }
}

impl Default for ContactChannel {
    fn default() -> Self {
        ContactChannel::Email
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
    #[serde(default)]
    pub channel: ContactChannel,
}

impl NewEnquiry {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        ContactForm::from(self).parse().map(|_| ())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Enquiry {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
    pub channel: ContactChannel,
    pub received_at: DateTime<Utc>,
}

/// Raw inputs of the landing page contact form.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
    pub channel: String,
}

impl From<&NewEnquiry> for ContactForm {
    fn from(e: &NewEnquiry) -> Self {
        Self {
            name: e.name.clone(),
            email: e.email.clone(),
            company: e.company.clone(),
            message: e.message.clone(),
            channel: e.channel.as_str().to_string(),
        }
    }
}

impl ContactForm {
    pub fn parse(&self) -> Result<NewEnquiry, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name, "Name is required");
        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            errors.add("email", "Invalid email address");
        }
        let company = required(&mut errors, "company", &self.company, "Company is required");
        let message = self.message.trim().to_string();
        if message.chars().count() < MIN_MESSAGE_LEN {
            errors.add(
                "message",
                format!("Message must be at least {MIN_MESSAGE_LEN} characters"),
            );
        }
        let channel = if self.channel.trim().is_empty() {
            ContactChannel::default()
        } else {
            self.channel.parse().unwrap_or_else(|_| {
                errors.add("channel", "Choose email or phone");
                ContactChannel::default()
            })
        };

        errors.finish(NewEnquiry {
            name,
            email,
            company,
            message,
            channel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Anita Roy".into(),
            email: "anita@haldia-steel.in".into(),
            company: "Haldia Steel".into(),
            message: "Need 40 trucks for a Durgapur run next month.".into(),
            channel: String::new(),
        }
    }

    #[test]
    fn valid_contact_defaults_to_email_channel() {
        let enquiry = form().parse().expect("valid");
        assert_eq!(enquiry.channel, ContactChannel::Email);
        assert_eq!(enquiry.company, "Haldia Steel");
    }

    #[test]
    fn rejects_blank_name_bad_email_and_short_message() {
        let errors = ContactForm {
            name: "".into(),
            email: "anita@".into(),
            message: "Call me".into(),
            ..form()
        }
        .parse()
        .unwrap_err();

        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert_eq!(errors.get("message"), Some("Message must be at least 10 characters"));
        assert!(!errors.has("company"));
    }

    #[test]
    fn phone_channel_and_unknown_channel() {
        let phone = ContactForm {
            channel: "phone".into(),
            ..form()
        };
        assert_eq!(phone.parse().unwrap().channel, ContactChannel::Phone);

        let fax = ContactForm {
            channel: "fax".into(),
            ..form()
        };
        assert!(fax.parse().unwrap_err().has("channel"));
    }
}

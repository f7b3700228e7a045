use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::display::BadgeVariant;
use crate::validation::{is_valid_email, is_valid_phone, non_blank, required, FieldErrors};

pub const MIN_PASSWORD_LEN: usize = 8;

string_enum! {
    pub enum UserRole("role") {
        Admin => "admin",
        Manager => "manager",
        Driver => "driver",
        User => "user",
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl UserRole {
    pub fn badge(&self) -> BadgeVariant {
        match self {
            UserRole::Admin => BadgeVariant::Primary,
            UserRole::Manager => BadgeVariant::Success,
            _ => BadgeVariant::Neutral,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub active: bool,
    pub password_change_required: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Upper-cased first letter for avatar bubbles.
    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }

    pub fn status_label(&self) -> &'static str {
        if self.active {
            "ACTIVE"
        } else {
            "DEACTIVATED"
        }
    }
}

/// Validated registration request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: UserRole,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = self.username.trim();
        if username.is_empty() {
            errors.add("username", "Username is required");
        } else if username.len() < 3 {
            errors.add("username", "Username must be at least 3 characters");
        } else if username.contains(char::is_whitespace) {
            errors.add("username", "Username cannot contain spaces");
        }
        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.add("email", "Invalid email");
        }
        if let Some(phone) = &self.phone_number {
            if !is_valid_phone(phone) {
                errors.add("phone_number", "Phone number must be 10 digits");
            }
        }
        errors.finish(())
    }
}

/// Raw inputs of the staff registration form.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub role: String,
}

impl UserForm {
    pub fn parse(&self) -> Result<NewUser, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = required(&mut errors, "username", &self.username, "Username is required");
        let email = required(&mut errors, "email", &self.email, "Email is required");
        let role = if self.role.trim().is_empty() {
            UserRole::default()
        } else {
            match self.role.parse::<UserRole>() {
                Ok(role) => role,
                Err(_) => {
                    errors.add("role", "Select a valid role");
                    UserRole::default()
                }
            }
        };

        let user = NewUser {
            username,
            email,
            full_name: non_blank(&self.full_name),
            phone_number: non_blank(&self.phone_number),
            role,
        };
        if let Err(more) = user.validate() {
            for (field, message) in more.iter() {
                errors.add(field, message);
            }
        }
        errors.finish(user)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChangePasswordRequest {
    pub username: String,
    pub old_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "username", &self.username, "Username is required");
        required(&mut errors, "old_password", &self.old_password, "Current password is required");
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "new_password",
                format!("New password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        } else if self.new_password == self.old_password {
            errors.add("new_password", "New password must differ from the current one");
        }
        errors.finish(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> UserForm {
        UserForm {
            username: "ravi".into(),
            email: "ravi@example.com".into(),
            full_name: "Ravi Das".into(),
            phone_number: "".into(),
            role: "manager".into(),
        }
    }

    #[test]
    fn valid_form_parses() {
        let user = form().parse().expect("valid");
        assert_eq!(user.role, UserRole::Manager);
        assert_eq!(user.full_name.as_deref(), Some("Ravi Das"));
        assert_eq!(user.phone_number, None);
    }

    #[test]
    fn rejects_empty_username_and_bad_email() {
        let errors = UserForm {
            username: " ".into(),
            email: "not-an-email".into(),
            ..form()
        }
        .parse()
        .unwrap_err();

        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("email"), Some("Invalid email"));
    }

    #[test]
    fn rejects_short_phone_and_unknown_role() {
        let errors = UserForm {
            phone_number: "12345".into(),
            role: "superuser".into(),
            ..form()
        }
        .parse()
        .unwrap_err();

        assert!(errors.has("phone_number"));
        assert!(errors.has("role"));
    }

    #[test]
    fn change_password_rules() {
        let mut request = ChangePasswordRequest {
            username: "ravi".into(),
            old_password: "ChangeMe@123".into(),
            new_password: "short".into(),
        };
        assert!(request.validate().unwrap_err().has("new_password"));

        request.new_password = "ChangeMe@123".into();
        assert!(request.validate().is_err());

        request.new_password = "Depot-Gate-42".into();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert!("owner".parse::<UserRole>().is_err());
        assert_eq!(UserRole::Manager.to_string(), "manager");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{check_non_negative, is_valid_email, is_valid_gstin, is_valid_phone, FieldErrors};

string_enum! {
    pub enum PartyType("party type") {
        Customer => "customer",
        Supplier => "supplier",
        Both => "both",
    }
}

impl PartyType {
    /// Parties that can be billed: customers and dual-role parties.
    pub fn is_customer(&self) -> bool {
        matches!(self, PartyType::Customer | PartyType::Both)
    }

    pub fn is_supplier(&self) -> bool {
        matches!(self, PartyType::Supplier | PartyType::Both)
    }

    /// Whether a party of this type shows up when filtering by `wanted`.
    pub fn matches(&self, wanted: PartyType) -> bool {
        match wanted {
            PartyType::Customer => self.is_customer(),
            PartyType::Supplier => self.is_supplier(),
            PartyType::Both => *self == PartyType::Both,
        }
    }
}

string_enum! {
    pub enum PartyStatus("party status") {
        Active => "active",
        Inactive => "inactive",
        Blocked => "blocked",
    }
}

impl Default for PartyStatus {
    fn default() -> Self {
        PartyStatus::Active
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Party {
    pub id: u64,
    pub code: String,
    pub name: String,
    pub party_type: PartyType,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub gstin: Option<String>,
    pub credit_limit: f64,
    pub payment_terms_days: u32,
    pub current_balance: f64,
    pub status: PartyStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewParty {
    pub name: String,
    pub code: Option<String>,
    pub party_type: PartyType,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub gstin: Option<String>,
    #[serde(default)]
    pub credit_limit: f64,
    #[serde(default)]
    pub payment_terms_days: u32,
    #[serde(default)]
    pub status: PartyStatus,
    pub notes: Option<String>,
}

impl NewParty {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let nameLen = self.name.trim().chars().count();
        if !(2..=150).contains(&nameLen) {
            errors.add("name", "Name must be 2 to 150 characters");
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !is_valid_email(email) {
                errors.add("email", "Invalid email");
            }
        }
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            if !is_valid_phone(phone) {
                errors.add("phone", "Phone must be 10 digits");
            }
        }
        if let Some(gstin) = self.gstin.as_deref().filter(|g| !g.trim().is_empty()) {
            if !is_valid_gstin(gstin) {
                errors.add("gstin", "GSTIN must be 15 upper-case letters or digits");
            }
        }
        check_non_negative(&mut errors, "credit_limit", self.credit_limit, "Credit limit cannot be negative");
        errors.finish(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NewParty {
        NewParty {
            name: "Medinipur Cement Depot".into(),
            code: None,
            party_type: PartyType::Customer,
            contact_person: None,
            email: Some("accounts@depot.in".into()),
            phone: Some("9800011122".into()),
            city: Some("Kharagpur".into()),
            state: None,
            gstin: Some("19ABCDE1234F1Z5".into()),
            credit_limit: 50000.0,
            payment_terms_days: 30,
            status: PartyStatus::Active,
            notes: None,
        }
    }

    #[test]
    fn customer_filter_includes_dual_role_parties() {
        assert!(PartyType::Both.matches(PartyType::Customer));
        assert!(PartyType::Customer.matches(PartyType::Customer));
        assert!(!PartyType::Supplier.matches(PartyType::Customer));
        assert!(PartyType::Both.matches(PartyType::Supplier));
        assert!(!PartyType::Customer.matches(PartyType::Both));
    }

    #[test]
    fn valid_party_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn credit_limit_must_be_a_finite_amount() {
        let mut party = request();
        party.credit_limit = f64::NAN;
        assert!(party.validate().unwrap_err().has("credit_limit"));
        party.credit_limit = f64::INFINITY;
        assert!(party.validate().unwrap_err().has("credit_limit"));
    }

    #[test]
    fn invalid_contact_fields_are_reported() {
        let errors = NewParty {
            name: "X".into(),
            email: Some("accounts.depot.in".into()),
            gstin: Some("19abcde1234f1z5".into()),
            ..request()
        }
        .validate()
        .unwrap_err();

        assert!(errors.has("name"));
        assert!(errors.has("email"));
        assert!(errors.has("gstin"));
        assert!(!errors.has("phone"));
    }
}

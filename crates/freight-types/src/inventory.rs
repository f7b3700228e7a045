use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::display::BadgeVariant;
use crate::validation::{check_non_negative, non_blank, required_parse, FieldErrors, NOT_A_NUMBER};

pub const DEFAULT_LOCATION: &str = "default";

string_enum! {
    pub enum ItemType("item type") {
        Goods => "goods",
        Service => "service",
    }
}

impl Default for ItemType {
    fn default() -> Self {
        ItemType::Goods
    }
}

impl ItemType {
    pub fn badge(&self) -> BadgeVariant {
        match self {
            ItemType::Goods => BadgeVariant::Primary,
            ItemType::Service => BadgeVariant::Secondary,
        }
    }
}

string_enum! {
    pub enum ItemCategory("item category") {
        Cement => "cement",
        Diesel => "diesel",
        Transport => "transport",
        Other => "other",
    }
}

impl Default for ItemCategory {
    fn default() -> Self {
        ItemCategory::Other
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub code: String,
    pub item_type: ItemType,
    pub category: ItemCategory,
    pub unit: String,
    pub hsn_code: Option<String>,
    pub tax_rate: f64,
    pub base_price: f64,
    pub current_stock: f64,
    pub min_stock_level: f64,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// At or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock_level
    }

    pub fn select_label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub code: Option<String>,
    #[serde(default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub category: ItemCategory,
    pub unit: String,
    pub hsn_code: Option<String>,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub current_stock: f64,
    #[serde(default)]
    pub min_stock_level: f64,
    pub description: Option<String>,
}

impl NewItem {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let nameLen = self.name.trim().chars().count();
        if !(2..=150).contains(&nameLen) {
            errors.add("name", "Name must be 2 to 150 characters");
        }
        if let Some(code) = &self.code {
            if code.trim().chars().count() > 50 {
                errors.add("code", "Code must be at most 50 characters");
            }
        }
        let unitLen = self.unit.trim().chars().count();
        if !(1..=20).contains(&unitLen) {
            errors.add("unit", "Unit is required");
        }
        check_non_negative(&mut errors, "tax_rate", self.tax_rate, "Tax rate cannot be negative");
        check_non_negative(&mut errors, "base_price", self.base_price, "Base price cannot be negative");
        if !self.current_stock.is_finite() {
            errors.add("current_stock", NOT_A_NUMBER);
        }
        check_non_negative(
            &mut errors,
            "min_stock_level",
            self.min_stock_level,
            "Reorder level cannot be negative",
        );
        errors.finish(())
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub item_type: Option<ItemType>,
    pub category: Option<ItemCategory>,
    pub unit: Option<String>,
    pub hsn_code: Option<String>,
    pub tax_rate: Option<f64>,
    pub base_price: Option<f64>,
    pub current_stock: Option<f64>,
    pub min_stock_level: Option<f64>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl ItemUpdate {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            if name.trim().chars().count() < 2 {
                errors.add("name", "Name must be 2 to 150 characters");
            }
        }
        if let Some(rate) = self.tax_rate {
            check_non_negative(&mut errors, "tax_rate", rate, "Tax rate cannot be negative");
        }
        if let Some(price) = self.base_price {
            check_non_negative(&mut errors, "base_price", price, "Base price cannot be negative");
        }
        if self.current_stock.is_some_and(|s| !s.is_finite()) {
            errors.add("current_stock", NOT_A_NUMBER);
        }
        if let Some(level) = self.min_stock_level {
            check_non_negative(&mut errors, "min_stock_level", level, "Reorder level cannot be negative");
        }
        errors.finish(())
    }

    pub fn apply(&self, item: &mut Item) {
        if let Some(v) = &self.name {
            item.name = v.trim().to_string();
        }
        if let Some(v) = self.item_type {
            item.item_type = v;
        }
        if let Some(v) = self.category {
            item.category = v;
        }
        if let Some(v) = &self.unit {
            item.unit = v.trim().to_string();
        }
        if let Some(v) = &self.hsn_code {
            item.hsn_code = non_blank(v);
        }
        if let Some(v) = self.tax_rate {
            item.tax_rate = v;
        }
        if let Some(v) = self.base_price {
            item.base_price = v;
        }
        if let Some(v) = self.current_stock {
            item.current_stock = v;
        }
        if let Some(v) = self.min_stock_level {
            item.min_stock_level = v;
        }
        if let Some(v) = &self.description {
            item.description = non_blank(v);
        }
        if let Some(v) = self.active {
            item.active = v;
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PriceOverride {
    pub id: u64,
    pub item_id: u64,
    pub party_id: u64,
    pub rate: f64,
    pub location: String,
    pub updated_at: DateTime<Utc>,
}

/// Validated pricing rule ready to be upserted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewPriceOverride {
    pub item_id: u64,
    pub party_id: u64,
    pub rate: f64,
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

/// Blank or missing location scopes a rule to every location.
pub fn normalize_location(location: &str) -> String {
    non_blank(location).unwrap_or_else(default_location)
}

impl NewPriceOverride {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.item_id == 0 {
            errors.add("item_id", "Item is required");
        }
        if self.party_id == 0 {
            errors.add("party_id", "Customer is required");
        }
        check_non_negative(&mut errors, "rate", self.rate, "Rate must be positive");
        errors.finish(())
    }
}

/// Raw inputs of the pricing override form, as read from `<select>`/`<input>`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PriceOverrideForm {
    pub item_id: String,
    pub party_id: String,
    pub rate: String,
    pub location: String,
}

impl Default for PriceOverrideForm {
    fn default() -> Self {
        Self {
            item_id: String::new(),
            party_id: String::new(),
            rate: String::new(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl PriceOverrideForm {
    pub fn for_item(itemId: u64) -> Self {
        Self {
            item_id: itemId.to_string(),
            ..Self::default()
        }
    }

    pub fn parse(&self) -> Result<NewPriceOverride, FieldErrors> {
        let mut errors = FieldErrors::new();
        let itemId: Option<u64> =
            required_parse(&mut errors, "item_id", &self.item_id, "Item is required", "Item is required");
        let partyId: Option<u64> = required_parse(
            &mut errors,
            "party_id",
            &self.party_id,
            "Customer is required",
            "Customer is required",
        );
        let rate: Option<f64> =
            required_parse(&mut errors, "rate", &self.rate, "Rate is required", "Rate must be a number");

        let request = NewPriceOverride {
            item_id: itemId.unwrap_or(0),
            party_id: partyId.unwrap_or(0),
            rate: rate.unwrap_or(0.0),
            location: normalize_location(&self.location),
        };
        if let Err(more) = request.validate() {
            for (field, message) in more.iter() {
                errors.add(field, message);
            }
        }
        errors.finish(request)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Override for the exact location.
    LocationOverride,
    /// Override scoped to every location.
    DefaultOverride,
    BasePrice,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EffectivePrice {
    pub item_id: u64,
    pub party_id: u64,
    pub location: String,
    pub effective_price: f64,
    pub source: PriceSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(current: f64, minimum: f64) -> Item {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Item {
            id: 1,
            name: "OPC Cement 53".into(),
            code: "I-0001".into(),
            item_type: ItemType::Goods,
            category: ItemCategory::Cement,
            unit: "BAG".into(),
            hsn_code: Some("2523".into()),
            tax_rate: 28.0,
            base_price: 390.0,
            current_stock: current,
            min_stock_level: minimum,
            description: None,
            active: true,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        assert!(item(10.0, 20.0).is_low_stock());
        assert!(item(20.0, 20.0).is_low_stock());
        assert!(!item(20.5, 20.0).is_low_stock());
        assert!(item(0.0, 0.0).is_low_stock());
    }

    #[test]
    fn override_form_accepts_valid_input() {
        let form = PriceOverrideForm {
            item_id: "3".into(),
            party_id: "12".into(),
            rate: "410.50".into(),
            location: "  ".into(),
        };
        let request = form.parse().expect("valid");
        assert_eq!(request.item_id, 3);
        assert_eq!(request.party_id, 12);
        assert_eq!(request.rate, 410.5);
        assert_eq!(request.location, DEFAULT_LOCATION);
    }

    #[test]
    fn override_form_rejects_negative_rate() {
        let form = PriceOverrideForm {
            rate: "-5".into(),
            party_id: "2".into(),
            ..PriceOverrideForm::for_item(3)
        };
        let errors = form.parse().unwrap_err();
        assert_eq!(errors.get("rate"), Some("Rate must be positive"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn override_form_requires_selections() {
        let errors = PriceOverrideForm::default().parse().unwrap_err();
        assert_eq!(errors.get("item_id"), Some("Item is required"));
        assert_eq!(errors.get("party_id"), Some("Customer is required"));
        assert_eq!(errors.get("rate"), Some("Rate is required"));
    }

    #[test]
    fn zero_rate_is_allowed() {
        let form = PriceOverrideForm {
            rate: "0".into(),
            party_id: "2".into(),
            ..PriceOverrideForm::for_item(3)
        };
        assert!(form.parse().is_ok());
    }

    #[test]
    fn item_update_applies_present_fields_only() {
        let mut target = item(5.0, 2.0);
        ItemUpdate {
            base_price: Some(400.0),
            current_stock: Some(50.0),
            ..ItemUpdate::default()
        }
        .apply(&mut target);

        assert_eq!(target.base_price, 400.0);
        assert_eq!(target.current_stock, 50.0);
        assert_eq!(target.name, "OPC Cement 53");
        assert_eq!(target.tax_rate, 28.0);
    }

    #[test]
    fn new_item_rejects_negative_price() {
        let request = NewItem {
            name: "Diesel".into(),
            code: None,
            item_type: ItemType::Goods,
            category: ItemCategory::Diesel,
            unit: "LTR".into(),
            hsn_code: None,
            tax_rate: 0.0,
            base_price: -1.0,
            current_stock: 0.0,
            min_stock_level: 0.0,
            description: None,
        };
        assert!(request.validate().unwrap_err().has("base_price"));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let request = NewItem {
            name: "Diesel".into(),
            code: None,
            item_type: ItemType::Goods,
            category: ItemCategory::Diesel,
            unit: "LTR".into(),
            hsn_code: None,
            tax_rate: f64::NAN,
            base_price: f64::INFINITY,
            current_stock: f64::NEG_INFINITY,
            min_stock_level: 0.0,
            description: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.has("tax_rate"));
        assert!(errors.has("base_price"));
        assert!(errors.has("current_stock"));

        let update = ItemUpdate {
            base_price: Some(f64::NAN),
            ..ItemUpdate::default()
        };
        assert!(update.validate().unwrap_err().has("base_price"));

        let rule = NewPriceOverride {
            item_id: 1,
            party_id: 1,
            rate: f64::INFINITY,
            location: String::new(),
        };
        assert!(rule.validate().unwrap_err().has("rate"));
    }
}

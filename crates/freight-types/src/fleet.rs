use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::display::{is_expiring_soon, BadgeVariant};
use crate::validation::{check_non_negative, is_valid_phone, FieldErrors};

string_enum! {
    /// Driver duty status. `leave` and `inactive` are older spellings still
    /// accepted on input.
    pub enum DriverStatus("driver status") {
        Active => "active",
        OnTrip => "on_trip",
        OnLeave => "on_leave" | "leave",
        Resigned => "resigned" | "inactive",
    }
}

impl Default for DriverStatus {
    fn default() -> Self {
        DriverStatus::Active
    }
}

impl DriverStatus {
    pub fn badge(&self) -> BadgeVariant {
        match self {
            DriverStatus::Active => BadgeVariant::Success,
            DriverStatus::OnTrip => BadgeVariant::Primary,
            DriverStatus::OnLeave => BadgeVariant::Warning,
            DriverStatus::Resigned => BadgeVariant::Error,
        }
    }
}

string_enum! {
    pub enum VehicleType("vehicle type") {
        Truck => "truck",
        Tanker => "tanker",
        Trailer => "trailer",
        Other => "other",
    }
}

impl Default for VehicleType {
    fn default() -> Self {
        VehicleType::Truck
    }
}

string_enum! {
    pub enum VehicleStatus("vehicle status") {
        Available => "available",
        OnTrip => "on_trip",
        Maintenance => "maintenance",
        Inactive => "inactive",
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        VehicleStatus::Available
    }
}

impl VehicleStatus {
    pub fn badge(&self) -> BadgeVariant {
        match self {
            VehicleStatus::Available => BadgeVariant::Success,
            VehicleStatus::OnTrip => BadgeVariant::Primary,
            VehicleStatus::Maintenance => BadgeVariant::Warning,
            VehicleStatus::Inactive => BadgeVariant::Neutral,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub status: DriverStatus,
    pub notes: Option<String>,
    pub joining_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    pub fn registry_code(&self) -> String {
        format!("FLE-D-{}", self.id)
    }

    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }

    pub fn license_expiring_soon(&self, today: NaiveDate) -> bool {
        is_expiring_soon(self.license_expiry, today)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: u64,
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    pub capacity_ton: f64,
    pub owner_name: Option<String>,
    pub is_owned: bool,
    pub rc_expiry: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
    pub fitness_expiry: Option<NaiveDate>,
    pub permit_expiry: Option<NaiveDate>,
    pub current_status: VehicleStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn registry_code(&self) -> String {
        format!("FLE-V-{}", self.id)
    }

    /// Insurance and fitness certificates halt operations when they lapse,
    /// so only those two raise the compliance banner.
    pub fn compliance_warning(&self, today: NaiveDate) -> bool {
        is_expiring_soon(self.insurance_expiry, today) || is_expiring_soon(self.fitness_expiry, today)
    }

    pub fn ownership_label(&self, brand: &str) -> String {
        if self.is_owned {
            format!("{} OWNED", brand.to_uppercase())
        } else {
            "HIRED / VENDOR".to_string()
        }
    }

    pub fn owner_display(&self, company: &str) -> String {
        if self.is_owned {
            company.to_string()
        } else {
            self.owner_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Generic Vendor".to_string())
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewDriver {
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub status: DriverStatus,
    pub notes: Option<String>,
    pub joining_date: Option<NaiveDate>,
}

impl NewDriver {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().chars().count() < 2 {
            errors.add("name", "Name must be at least 2 characters");
        }
        if !is_valid_phone(&self.phone) {
            errors.add("phone", "Phone must be 10 digits");
        }
        errors.finish(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewVehicle {
    pub vehicle_number: String,
    #[serde(default)]
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub capacity_ton: f64,
    pub owner_name: Option<String>,
    #[serde(default = "default_owned")]
    pub is_owned: bool,
    pub rc_expiry: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
    pub fitness_expiry: Option<NaiveDate>,
    pub permit_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub current_status: VehicleStatus,
    pub notes: Option<String>,
}

fn default_owned() -> bool {
    true
}

impl NewVehicle {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let numberLen = self.vehicle_number.trim().chars().count();
        if !(4..=20).contains(&numberLen) {
            errors.add("vehicle_number", "Vehicle number must be 4 to 20 characters");
        }
        check_non_negative(&mut errors, "capacity_ton", self.capacity_ton, "Capacity cannot be negative");
        if !self.is_owned && self.owner_name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            errors.add("owner_name", "Owner name is required for hired vehicles");
        }
        errors.finish(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn vehicle() -> Vehicle {
        Vehicle {
            id: 7,
            vehicle_number: "WB34AB1234".into(),
            vehicle_type: VehicleType::Truck,
            capacity_ton: 16.0,
            owner_name: None,
            is_owned: true,
            rc_expiry: Some(day(2027, 1, 1)),
            insurance_expiry: Some(day(2026, 12, 1)),
            fitness_expiry: Some(day(2026, 12, 1)),
            permit_expiry: Some(day(2026, 3, 10)),
            current_status: VehicleStatus::Available,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn legacy_driver_statuses_deserialize() {
        let leave: DriverStatus = serde_json::from_str("\"leave\"").unwrap();
        let inactive: DriverStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(leave, DriverStatus::OnLeave);
        assert_eq!(inactive, DriverStatus::Resigned);
        assert_eq!(serde_json::to_string(&DriverStatus::OnLeave).unwrap(), "\"on_leave\"");
    }

    #[test]
    fn compliance_warning_tracks_insurance_and_fitness_only() {
        let today = day(2026, 3, 1);
        let mut v = vehicle();
        // permit expires in 9 days but does not raise the banner
        assert!(!v.compliance_warning(today));

        v.insurance_expiry = Some(day(2026, 3, 20));
        assert!(v.compliance_warning(today));

        v.insurance_expiry = Some(day(2026, 2, 1));
        v.fitness_expiry = Some(day(2026, 3, 29));
        assert!(v.compliance_warning(today));
    }

    #[test]
    fn owner_display_for_hired_vehicle() {
        let mut v = vehicle();
        assert_eq!(v.owner_display("Blue Star Trading"), "Blue Star Trading");
        v.is_owned = false;
        assert_eq!(v.owner_display("Blue Star Trading"), "Generic Vendor");
        v.owner_name = Some("Mondal Carriers".into());
        assert_eq!(v.owner_display("Blue Star Trading"), "Mondal Carriers");
        assert_eq!(v.ownership_label("Blue Star"), "HIRED / VENDOR");
    }

    #[test]
    fn new_driver_validation() {
        let mut driver = NewDriver {
            name: "S".into(),
            phone: "98300".into(),
            address: None,
            license_number: None,
            license_expiry: None,
            status: DriverStatus::Active,
            notes: None,
            joining_date: None,
        };
        let errors = driver.validate().unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("phone"));

        driver.name = "Sanjay Mahato".into();
        driver.phone = "9830012345".into();
        assert!(driver.validate().is_ok());
    }

    #[test]
    fn hired_vehicle_needs_owner() {
        let mut request = NewVehicle {
            vehicle_number: "WB34".into(),
            vehicle_type: VehicleType::Tanker,
            capacity_ton: 20.0,
            owner_name: None,
            is_owned: false,
            rc_expiry: None,
            insurance_expiry: None,
            fitness_expiry: None,
            permit_expiry: None,
            current_status: VehicleStatus::Available,
            notes: None,
        };
        assert!(request.validate().unwrap_err().has("owner_name"));
        request.owner_name = Some("Mondal Carriers".into());
        assert!(request.validate().is_ok());

        request.capacity_ton = f64::NAN;
        assert!(request.validate().unwrap_err().has("capacity_ton"));
    }
}

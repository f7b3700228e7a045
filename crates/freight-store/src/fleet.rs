use chrono::Utc;
use freight_types::{validation::non_blank, Driver, NewDriver, NewVehicle, Vehicle};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::store::{next_id, Store};

impl Store {
    pub async fn create_driver(&self, request: NewDriver) -> StoreResult<Driver> {
        request.validate()?;
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let driver = Driver {
            id: next_id(&mut tables.ids.driver),
            name: request.name.trim().to_string(),
            phone: request.phone.trim().to_string(),
            address: request.address.as_deref().and_then(non_blank),
            license_number: request
                .license_number
                .as_deref()
                .and_then(non_blank)
                .map(|l| l.to_uppercase()),
            license_expiry: request.license_expiry,
            status: request.status,
            notes: request.notes.as_deref().and_then(non_blank),
            joining_date: request.joining_date.unwrap_or_else(|| now.date_naive()),
            created_at: now,
        };
        tables.drivers.insert(driver.id, driver.clone());
        info!("registered driver {} ({})", driver.name, driver.registry_code());
        Ok(driver)
    }

    pub async fn list_drivers(&self) -> Vec<Driver> {
        self.tables.read().await.drivers.values().cloned().collect()
    }

    pub async fn get_driver(&self, id: u64) -> StoreResult<Driver> {
        let tables = self.tables.read().await;
        tables
            .drivers
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("driver", id))
    }

    pub async fn create_vehicle(&self, request: NewVehicle) -> StoreResult<Vehicle> {
        request.validate()?;
        let number = request
            .vehicle_number
            .split_whitespace()
            .collect::<String>()
            .to_uppercase();
        let mut tables = self.tables.write().await;
        if tables.vehicles.values().any(|v| v.vehicle_number == number) {
            return Err(StoreError::Conflict(format!("Vehicle {number} is already registered")));
        }
        let vehicle = Vehicle {
            id: next_id(&mut tables.ids.vehicle),
            vehicle_number: number,
            vehicle_type: request.vehicle_type,
            capacity_ton: request.capacity_ton,
            owner_name: request.owner_name.as_deref().and_then(non_blank),
            is_owned: request.is_owned,
            rc_expiry: request.rc_expiry,
            insurance_expiry: request.insurance_expiry,
            fitness_expiry: request.fitness_expiry,
            permit_expiry: request.permit_expiry,
            current_status: request.current_status,
            notes: request.notes.as_deref().and_then(non_blank),
            created_at: Utc::now(),
        };
        tables.vehicles.insert(vehicle.id, vehicle.clone());
        info!("registered vehicle {}", vehicle.vehicle_number);
        Ok(vehicle)
    }

    pub async fn list_vehicles(&self) -> Vec<Vehicle> {
        self.tables.read().await.vehicles.values().cloned().collect()
    }

    pub async fn get_vehicle(&self, id: u64) -> StoreResult<Vehicle> {
        let tables = self.tables.read().await;
        tables
            .vehicles
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("vehicle", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_types::{DriverStatus, VehicleStatus, VehicleType};

    fn truck(number: &str) -> NewVehicle {
        NewVehicle {
            vehicle_number: number.into(),
            vehicle_type: VehicleType::Truck,
            capacity_ton: 16.0,
            owner_name: None,
            is_owned: true,
            rc_expiry: None,
            insurance_expiry: None,
            fitness_expiry: None,
            permit_expiry: None,
            current_status: VehicleStatus::Available,
            notes: None,
        }
    }

    #[tokio::test]
    async fn vehicle_numbers_are_normalised_and_unique() {
        let store = Store::default();
        let v = store.create_vehicle(truck("wb 34 ab 1234")).await.unwrap();
        assert_eq!(v.vehicle_number, "WB34AB1234");
        assert_eq!(v.registry_code(), "FLE-V-1");
        assert!(matches!(
            store.create_vehicle(truck("WB34AB1234")).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn driver_defaults_joining_date_to_today() {
        let store = Store::default();
        let driver = store
            .create_driver(NewDriver {
                name: "Sanjay Mahato".into(),
                phone: "9830012345".into(),
                address: None,
                license_number: Some("wb-1020230045".into()),
                license_expiry: None,
                status: DriverStatus::Active,
                notes: None,
                joining_date: None,
            })
            .await
            .unwrap();
        assert_eq!(driver.joining_date, Utc::now().date_naive());
        assert_eq!(driver.license_number.as_deref(), Some("WB-1020230045"));
        assert_eq!(store.get_driver(driver.id).await.unwrap(), driver);
        assert!(matches!(store.get_driver(42).await, Err(StoreError::NotFound(_))));
    }
}

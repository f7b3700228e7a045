use chrono::{Duration, NaiveDate, Utc};
use freight_types::{
    DriverStatus, ItemCategory, ItemType, NewDriver, NewItem, NewParty, NewPriceOverride, NewUser,
    NewVehicle, NewVoucher, NewVoucherLine, PartyStatus, PartyType, UserRole, VehicleStatus,
    VehicleType, VoucherStatus, VoucherType,
};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::store::Store;

fn party(name: &str, partyType: PartyType, city: &str, phone: &str, gstin: Option<&str>) -> NewParty {
    NewParty {
        name: name.into(),
        code: None,
        party_type: partyType,
        contact_person: None,
        email: None,
        phone: Some(phone.into()),
        city: Some(city.into()),
        state: Some("West Bengal".into()),
        gstin: gstin.map(str::to_string),
        credit_limit: 200_000.0,
        payment_terms_days: 30,
        status: PartyStatus::Active,
        notes: None,
    }
}

fn item(
    name: &str,
    itemType: ItemType,
    category: ItemCategory,
    unit: &str,
    price: f64,
    tax: f64,
    stock: f64,
    minimum: f64,
) -> NewItem {
    NewItem {
        name: name.into(),
        code: None,
        item_type: itemType,
        category,
        unit: unit.into(),
        hsn_code: None,
        tax_rate: tax,
        base_price: price,
        current_stock: stock,
        min_stock_level: minimum,
        description: None,
    }
}

fn vehicle(number: &str, vehicleType: VehicleType, capacity: f64, owner: Option<&str>, today: NaiveDate, insuranceDays: i64) -> NewVehicle {
    NewVehicle {
        vehicle_number: number.into(),
        vehicle_type: vehicleType,
        capacity_ton: capacity,
        owner_name: owner.map(str::to_string),
        is_owned: owner.is_none(),
        rc_expiry: Some(today + Duration::days(900)),
        insurance_expiry: Some(today + Duration::days(insuranceDays)),
        fitness_expiry: Some(today + Duration::days(200)),
        permit_expiry: Some(today + Duration::days(20)),
        current_status: VehicleStatus::Available,
        notes: None,
    }
}

fn line(itemId: u64, quantity: f64, rate: f64, tax: f64) -> NewVoucherLine {
    NewVoucherLine {
        item_id: itemId,
        quantity,
        rate,
        tax_rate: tax,
        description: None,
    }
}

impl Store {
    /// Fills an empty store with a small working data set. Does nothing
    /// once any party exists.
    pub async fn seed_demo(&self) -> StoreResult<()> {
        if !self.tables.read().await.parties.is_empty() {
            debug!("store already populated, skipping demo seed");
            return Ok(());
        }
        let today = Utc::now().date_naive();

        self.create_user(NewUser {
            username: "dispatch".into(),
            email: "dispatch@bluestar-trading.in".into(),
            full_name: Some("Rina Dispatch".into()),
            phone_number: Some("9830011111".into()),
            role: UserRole::Manager,
        })
        .await?;

        let haldia = self
            .create_party(party("Haldia Steel Works", PartyType::Customer, "Haldia", "9830022222", Some("19AAACH1234K1Z2")))
            .await?;
        let apex = self
            .create_party(party("Apex Infra Projects", PartyType::Both, "Kolkata", "9830033333", None))
            .await?;
        let fuels = self
            .create_party(party("Bengal Fuels", PartyType::Supplier, "Kharagpur", "9830044444", None))
            .await?;

        let cement = self
            .create_item(item("OPC Cement 53 Grade", ItemType::Goods, ItemCategory::Cement, "BAG", 390.0, 28.0, 1200.0, 200.0))
            .await?;
        let diesel = self
            .create_item(item("High Speed Diesel", ItemType::Goods, ItemCategory::Diesel, "LTR", 92.5, 0.0, 180.0, 250.0))
            .await?;
        let haul = self
            .create_item(item("Road Haulage per Trip", ItemType::Service, ItemCategory::Transport, "TRIP", 18500.0, 12.0, 0.0, 0.0))
            .await?;

        self.upsert_price_override(NewPriceOverride {
            item_id: cement.id,
            party_id: haldia.id,
            rate: 372.0,
            location: "default".into(),
        })
        .await?;
        self.upsert_price_override(NewPriceOverride {
            item_id: cement.id,
            party_id: haldia.id,
            rate: 365.0,
            location: "Haldia".into(),
        })
        .await?;

        self.create_driver(NewDriver {
            name: "Sanjay Mahato".into(),
            phone: "9830055555".into(),
            address: Some("Panskura, Purba Medinipur".into()),
            license_number: Some("WB-3320190045".into()),
            license_expiry: Some(today + Duration::days(18)),
            status: DriverStatus::Active,
            notes: None,
            joining_date: Some(today - Duration::days(700)),
        })
        .await?;
        self.create_driver(NewDriver {
            name: "Abdul Karim".into(),
            phone: "9830066666".into(),
            address: None,
            license_number: Some("WB-1120170112".into()),
            license_expiry: Some(today + Duration::days(400)),
            status: DriverStatus::OnTrip,
            notes: None,
            joining_date: Some(today - Duration::days(1500)),
        })
        .await?;

        self.create_vehicle(vehicle("WB34AB1234", VehicleType::Truck, 16.0, None, today, 12)).await?;
        self.create_vehicle(vehicle("WB29C7788", VehicleType::Tanker, 20.0, Some("Mondal Carriers"), today, 300))
            .await?;

        self.create_voucher(NewVoucher {
            voucher_number: None,
            voucher_type: VoucherType::Invoice,
            voucher_date: today,
            party_id: haldia.id,
            vehicle_number: Some("WB34AB1234".into()),
            driver_name: Some("Sanjay Mahato".into()),
            place_of_supply: Some("West Bengal".into()),
            status: VoucherStatus::Issued,
            notes: None,
            items: vec![line(cement.id, 100.0, 372.0, 28.0), line(haul.id, 1.0, 18500.0, 12.0)],
        })
        .await?;
        self.create_voucher(NewVoucher {
            voucher_number: None,
            voucher_type: VoucherType::Quotation,
            voucher_date: today,
            party_id: apex.id,
            vehicle_number: None,
            driver_name: None,
            place_of_supply: Some("West Bengal".into()),
            status: VoucherStatus::Draft,
            notes: Some("Valid for 15 days".into()),
            items: vec![line(cement.id, 500.0, 385.0, 28.0)],
        })
        .await?;
        self.create_voucher(NewVoucher {
            voucher_number: None,
            voucher_type: VoucherType::Bill,
            voucher_date: today,
            party_id: fuels.id,
            vehicle_number: None,
            driver_name: None,
            place_of_supply: None,
            status: VoucherStatus::Issued,
            notes: None,
            items: vec![line(diesel.id, 400.0, 89.0, 0.0)],
        })
        .await?;

        info!("seeded demo data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_populates_once() {
        let store = Store::default();
        store.seed_demo().await.unwrap();
        let vouchers = store.list_vouchers(None).await.len();
        assert_eq!(vouchers, 3);
        assert_eq!(store.list_drivers().await.len(), 2);

        store.seed_demo().await.unwrap();
        assert_eq!(store.list_vouchers(None).await.len(), vouchers);

        let diesel = store.list_items(None, Some("diesel")).await;
        // 180 on hand plus the issued 400 LTR bill
        assert_eq!(diesel[0].current_stock, 580.0);
    }
}

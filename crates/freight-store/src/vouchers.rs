use chrono::{DateTime, Utc};
use freight_types::{
    validation::non_blank, NewVoucher, Voucher, VoucherLine, VoucherStatus, VoucherTotals, VoucherType,
    VoucherUpdate,
};
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::{next_id, Store, Tables};

/// `PREFIX-YYYYMMDD-NNN`, where NNN follows the number of vouchers of any
/// type created that day. Numbers already taken are skipped.
fn next_voucher_number(tables: &Tables, voucherType: VoucherType, now: DateTime<Utc>) -> String {
    let today = now.date_naive();
    let createdToday = tables
        .vouchers
        .values()
        .filter(|v| v.created_at.date_naive() == today)
        .count();
    let prefix = format!("{}-{}", voucherType.number_prefix(), today.format("%Y%m%d"));
    let mut sequence = createdToday + 1;
    loop {
        let candidate = format!("{prefix}-{sequence:03}");
        if !tables.vouchers.values().any(|v| v.voucher_number == candidate) {
            return candidate;
        }
        sequence += 1;
    }
}

/// Books the stock and balance movement of an issued voucher.
/// A voucher is only ever booked once.
fn apply_impact(tables: &mut Tables, voucherId: u64) {
    if !tables.stock_applied.insert(voucherId) {
        return;
    }
    let Some(voucher) = tables.vouchers.get(&voucherId).cloned() else {
        return;
    };

    if let Some(direction) = voucher.voucher_type.stock_direction() {
        for line in &voucher.items {
            match tables.items.get_mut(&line.item_id) {
                Some(item) => {
                    item.current_stock += direction * line.quantity;
                    item.updated_at = Utc::now();
                }
                None => warn!(
                    "voucher {} references missing item {}",
                    voucher.voucher_number, line.item_id
                ),
            }
        }
    }

    let balanceDelta = match voucher.voucher_type {
        VoucherType::Invoice => voucher.grand_total,
        VoucherType::Bill => -voucher.grand_total,
        _ => 0.0,
    };
    if balanceDelta != 0.0 {
        if let Some(party) = tables.parties.get_mut(&voucher.party_id) {
            party.current_balance += balanceDelta;
            party.updated_at = Utc::now();
        }
    }
    info!(
        "applied impact for voucher {} ({})",
        voucher.voucher_number, voucher.status
    );
}

impl Store {
    pub async fn create_voucher(&self, request: NewVoucher) -> StoreResult<Voucher> {
        request.validate()?;
        let totals = VoucherTotals::compute(&request.items);
        let mut tables = self.tables.write().await;

        if !tables.parties.contains_key(&request.party_id) {
            return Err(StoreError::not_found("party", request.party_id));
        }
        if let Some(missing) = request
            .items
            .iter()
            .find(|l| !tables.items.contains_key(&l.item_id))
        {
            return Err(StoreError::not_found("item", missing.item_id));
        }

        let now = Utc::now();
        let number = match request.voucher_number.as_deref().and_then(non_blank) {
            Some(n) => {
                if tables.vouchers.values().any(|v| v.voucher_number == n) {
                    return Err(StoreError::Conflict(format!("Voucher number {n} already exists")));
                }
                n
            }
            None => next_voucher_number(&tables, request.voucher_type, now),
        };

        let mut lines = Vec::with_capacity(request.items.len());
        for line in &request.items {
            lines.push(VoucherLine {
                id: next_id(&mut tables.ids.line),
                item_id: line.item_id,
                quantity: line.quantity,
                rate: line.rate,
                tax_rate: line.tax_rate,
                amount: line.amount(),
                description: line.description.as_deref().and_then(non_blank),
            });
        }

        let voucher = Voucher {
            id: next_id(&mut tables.ids.voucher),
            voucher_number: number,
            voucher_type: request.voucher_type,
            voucher_date: request.voucher_date,
            party_id: request.party_id,
            vehicle_number: request.vehicle_number.as_deref().and_then(non_blank),
            driver_name: request.driver_name.as_deref().and_then(non_blank),
            place_of_supply: request.place_of_supply.as_deref().and_then(non_blank),
            total_amount: totals.total_amount,
            tax_amount: totals.tax_amount,
            grand_total: totals.grand_total,
            status: request.status,
            notes: request.notes.as_deref().and_then(non_blank),
            items: lines,
            created_at: now,
            updated_at: now,
        };
        let voucherId = voucher.id;
        tables.vouchers.insert(voucherId, voucher);
        if request.status == VoucherStatus::Issued {
            apply_impact(&mut tables, voucherId);
        }
        let created = tables
            .vouchers
            .get(&voucherId)
            .cloned()
            .ok_or_else(|| StoreError::not_found("voucher", voucherId))?;
        info!("created {} {}", created.voucher_type, created.voucher_number);
        Ok(created)
    }

    /// Newest first, optionally narrowed to one type.
    pub async fn list_vouchers(&self, voucherType: Option<VoucherType>) -> Vec<Voucher> {
        let tables = self.tables.read().await;
        let mut vouchers: Vec<Voucher> = tables
            .vouchers
            .values()
            .filter(|v| voucherType.map_or(true, |t| v.voucher_type == t))
            .cloned()
            .collect();
        vouchers.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        vouchers
    }

    pub async fn get_voucher(&self, id: u64) -> StoreResult<Voucher> {
        let tables = self.tables.read().await;
        tables
            .vouchers
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("voucher", id))
    }

    pub async fn update_voucher(&self, id: u64, update: VoucherUpdate) -> StoreResult<Voucher> {
        let mut tables = self.tables.write().await;
        let Some(voucher) = tables.vouchers.get_mut(&id) else {
            return Err(StoreError::not_found("voucher", id));
        };
        let previous = voucher.status;
        if let Some(status) = update.status {
            if previous == VoucherStatus::Cancelled && status != VoucherStatus::Cancelled {
                return Err(StoreError::Conflict(format!(
                    "Voucher {} is cancelled",
                    voucher.voucher_number
                )));
            }
            voucher.status = status;
        }
        if let Some(notes) = &update.notes {
            voucher.notes = non_blank(notes);
        }
        voucher.updated_at = Utc::now();
        let issued = previous == VoucherStatus::Draft && voucher.status == VoucherStatus::Issued;
        if issued {
            apply_impact(&mut tables, id);
        }
        tables
            .vouchers
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("voucher", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use freight_types::{ItemCategory, ItemType, NewItem, NewParty, NewVoucherLine, PartyStatus, PartyType};

    async fn seeded() -> (Store, u64, u64) {
        let store = Store::default();
        let item = store
            .create_item(NewItem {
                name: "OPC Cement 53".into(),
                code: None,
                item_type: ItemType::Goods,
                category: ItemCategory::Cement,
                unit: "BAG".into(),
                hsn_code: None,
                tax_rate: 28.0,
                base_price: 390.0,
                current_stock: 100.0,
                min_stock_level: 20.0,
                description: None,
            })
            .await
            .unwrap();
        let party = store
            .create_party(NewParty {
                name: "Haldia Steel".into(),
                code: None,
                party_type: PartyType::Both,
                contact_person: None,
                email: None,
                phone: None,
                city: None,
                state: None,
                gstin: None,
                credit_limit: 0.0,
                payment_terms_days: 30,
                status: PartyStatus::Active,
                notes: None,
            })
            .await
            .unwrap();
        (store, item.id, party.id)
    }

    fn voucher(voucherType: VoucherType, status: VoucherStatus, itemId: u64, partyId: u64, qty: f64) -> NewVoucher {
        NewVoucher {
            voucher_number: None,
            voucher_type: voucherType,
            voucher_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            party_id: partyId,
            vehicle_number: None,
            driver_name: None,
            place_of_supply: None,
            status,
            notes: None,
            items: vec![NewVoucherLine {
                item_id: itemId,
                quantity: qty,
                rate: 395.0,
                tax_rate: 28.0,
                description: None,
            }],
        }
    }

    #[tokio::test]
    async fn numbers_follow_prefix_date_sequence() {
        let (store, itemId, partyId) = seeded().await;
        let first = store
            .create_voucher(voucher(VoucherType::Invoice, VoucherStatus::Draft, itemId, partyId, 1.0))
            .await
            .unwrap();
        let second = store
            .create_voucher(voucher(VoucherType::Invoice, VoucherStatus::Draft, itemId, partyId, 1.0))
            .await
            .unwrap();
        let challan = store
            .create_voucher(voucher(VoucherType::Challan, VoucherStatus::Draft, itemId, partyId, 1.0))
            .await
            .unwrap();

        let day = Utc::now().format("%Y%m%d").to_string();
        assert_eq!(first.voucher_number, format!("INV-{day}-001"));
        assert_eq!(second.voucher_number, format!("INV-{day}-002"));
        assert_eq!(challan.voucher_number, format!("CHL-{day}-003"));
        assert_eq!(first.total_amount, 395.0);
        assert_eq!(first.tax_amount, 110.6);
        assert_eq!(first.grand_total, 505.6);
    }

    #[tokio::test]
    async fn generated_number_skips_one_entered_by_hand() {
        let (store, itemId, partyId) = seeded().await;
        let day = Utc::now().format("%Y%m%d").to_string();
        let mut manual = voucher(VoucherType::Invoice, VoucherStatus::Draft, itemId, partyId, 1.0);
        manual.voucher_number = Some(format!("INV-{day}-002"));
        let manual = store.create_voucher(manual).await.unwrap();

        let generated = store
            .create_voucher(voucher(VoucherType::Invoice, VoucherStatus::Draft, itemId, partyId, 1.0))
            .await
            .unwrap();
        assert_eq!(manual.voucher_number, format!("INV-{day}-002"));
        assert_eq!(generated.voucher_number, format!("INV-{day}-003"));
    }

    #[tokio::test]
    async fn issuing_moves_stock_exactly_once() {
        let (store, itemId, partyId) = seeded().await;
        let draft = store
            .create_voucher(voucher(VoucherType::Invoice, VoucherStatus::Draft, itemId, partyId, 10.0))
            .await
            .unwrap();
        assert_eq!(store.get_item(itemId).await.unwrap().current_stock, 100.0);

        store
            .update_voucher(
                draft.id,
                VoucherUpdate {
                    status: Some(VoucherStatus::Issued),
                    notes: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(store.get_item(itemId).await.unwrap().current_stock, 90.0);

        store
            .update_voucher(
                draft.id,
                VoucherUpdate {
                    status: Some(VoucherStatus::Issued),
                    notes: Some("gate pass 114".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(store.get_item(itemId).await.unwrap().current_stock, 90.0);
        assert_eq!(store.get_party(partyId).await.unwrap().current_balance, draft.grand_total);
    }

    #[tokio::test]
    async fn bills_add_stock_and_quotations_do_not_move_it() {
        let (store, itemId, partyId) = seeded().await;
        store
            .create_voucher(voucher(VoucherType::Bill, VoucherStatus::Issued, itemId, partyId, 25.0))
            .await
            .unwrap();
        store
            .create_voucher(voucher(VoucherType::Quotation, VoucherStatus::Issued, itemId, partyId, 40.0))
            .await
            .unwrap();
        assert_eq!(store.get_item(itemId).await.unwrap().current_stock, 125.0);
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_filtered() {
        let (store, itemId, partyId) = seeded().await;
        for voucherType in [VoucherType::Challan, VoucherType::Invoice, VoucherType::Invoice] {
            store
                .create_voucher(voucher(voucherType, VoucherStatus::Draft, itemId, partyId, 1.0))
                .await
                .unwrap();
        }
        let all = store.list_vouchers(None).await;
        assert_eq!(all.iter().map(|v| v.id).collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(store.list_vouchers(Some(VoucherType::Invoice)).await.len(), 2);
        assert!(store.list_vouchers(Some(VoucherType::Bill)).await.is_empty());
    }

    #[tokio::test]
    async fn cancelled_voucher_cannot_be_reissued() {
        let (store, itemId, partyId) = seeded().await;
        let v = store
            .create_voucher(voucher(VoucherType::Challan, VoucherStatus::Draft, itemId, partyId, 1.0))
            .await
            .unwrap();
        let cancel = VoucherUpdate {
            status: Some(VoucherStatus::Cancelled),
            notes: None,
        };
        store.update_voucher(v.id, cancel).await.unwrap();
        let reissue = VoucherUpdate {
            status: Some(VoucherStatus::Issued),
            notes: None,
        };
        assert!(matches!(store.update_voucher(v.id, reissue).await, Err(StoreError::Conflict(_))));
    }
}

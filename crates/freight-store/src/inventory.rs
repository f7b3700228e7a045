use chrono::Utc;
use freight_types::{
    inventory::{normalize_location, DEFAULT_LOCATION},
    validation::non_blank,
    EffectivePrice, Item, ItemType, ItemUpdate, NewItem, NewPriceOverride, PriceOverride, PriceSource,
};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::{free_code, next_id, Store};

impl Store {
    pub async fn create_item(&self, request: NewItem) -> StoreResult<Item> {
        request.validate()?;
        let mut tables = self.tables.write().await;
        let id = tables.ids.item + 1;
        let code = request
            .code
            .as_deref()
            .and_then(non_blank)
            .map(|c| c.to_uppercase())
            .unwrap_or_else(|| {
                free_code("I", id, |code| tables.items.values().any(|i| i.code == code))
            });
        if tables.items.values().any(|i| i.code == code) {
            return Err(StoreError::Conflict(format!("Item code {code} already exists")));
        }

        let now = Utc::now();
        let item = Item {
            id: next_id(&mut tables.ids.item),
            name: request.name.trim().to_string(),
            code,
            item_type: request.item_type,
            category: request.category,
            unit: request.unit.trim().to_uppercase(),
            hsn_code: request.hsn_code.as_deref().and_then(non_blank),
            tax_rate: request.tax_rate,
            base_price: request.base_price,
            current_stock: request.current_stock,
            min_stock_level: request.min_stock_level,
            description: request.description.as_deref().and_then(non_blank),
            active: true,
            created_at: now,
            updated_at: now,
        };
        tables.items.insert(item.id, item.clone());
        info!("created item {} ({})", item.name, item.code);
        Ok(item)
    }

    /// Items sorted by name, optionally narrowed by type and a
    /// case-insensitive match on name or code.
    pub async fn list_items(&self, itemType: Option<ItemType>, search: Option<&str>) -> Vec<Item> {
        let needle = search.and_then(non_blank).map(|s| s.to_lowercase());
        let tables = self.tables.read().await;
        let mut items: Vec<Item> = tables
            .items
            .values()
            .filter(|i| itemType.map_or(true, |t| i.item_type == t))
            .filter(|i| {
                needle.as_deref().map_or(true, |n| {
                    i.name.to_lowercase().contains(n) || i.code.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    pub async fn get_item(&self, id: u64) -> StoreResult<Item> {
        let tables = self.tables.read().await;
        tables
            .items
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("item", id))
    }

    pub async fn update_item(&self, id: u64, update: ItemUpdate) -> StoreResult<Item> {
        update.validate()?;
        let mut tables = self.tables.write().await;
        let Some(item) = tables.items.get_mut(&id) else {
            return Err(StoreError::not_found("item", id));
        };
        update.apply(item);
        item.updated_at = Utc::now();
        info!("updated item {}", item.code);
        Ok(item.clone())
    }

    /// Inserts or replaces the rule for (item, party, location).
    pub async fn upsert_price_override(&self, request: NewPriceOverride) -> StoreResult<PriceOverride> {
        request.validate()?;
        let location = normalize_location(&request.location);
        let mut tables = self.tables.write().await;
        if !tables.items.contains_key(&request.item_id) {
            return Err(StoreError::not_found("item", request.item_id));
        }
        if !tables.parties.contains_key(&request.party_id) {
            return Err(StoreError::not_found("party", request.party_id));
        }

        let now = Utc::now();
        if let Some(existing) = tables.overrides.iter_mut().find(|o| {
            o.item_id == request.item_id && o.party_id == request.party_id && o.location == location
        }) {
            existing.rate = request.rate;
            existing.updated_at = now;
            info!(
                "updated price override item={} party={} location={}",
                existing.item_id, existing.party_id, existing.location
            );
            return Ok(existing.clone());
        }

        let rule = PriceOverride {
            id: next_id(&mut tables.ids.price),
            item_id: request.item_id,
            party_id: request.party_id,
            rate: request.rate,
            location,
            updated_at: now,
        };
        tables.overrides.push(rule.clone());
        info!(
            "created price override item={} party={} location={}",
            rule.item_id, rule.party_id, rule.location
        );
        Ok(rule)
    }

    pub async fn list_price_overrides(&self, itemId: Option<u64>) -> Vec<PriceOverride> {
        let tables = self.tables.read().await;
        tables
            .overrides
            .iter()
            .filter(|o| itemId.map_or(true, |id| o.item_id == id))
            .cloned()
            .collect()
    }

    /// Exact-location override, then the `default` location, then base price.
    pub async fn effective_price(&self, itemId: u64, partyId: u64, location: Option<&str>) -> StoreResult<EffectivePrice> {
        let location = normalize_location(location.unwrap_or(DEFAULT_LOCATION));
        let tables = self.tables.read().await;
        let item = tables
            .items
            .get(&itemId)
            .ok_or_else(|| StoreError::not_found("item", itemId))?;

        let lookup = |loc: &str| {
            tables
                .overrides
                .iter()
                .find(|o| o.item_id == itemId && o.party_id == partyId && o.location == loc)
                .map(|o| o.rate)
        };

        let (price, source) = if let Some(rate) = lookup(location.as_str()).filter(|_| location != DEFAULT_LOCATION) {
            (rate, PriceSource::LocationOverride)
        } else if let Some(rate) = lookup(DEFAULT_LOCATION) {
            (rate, PriceSource::DefaultOverride)
        } else {
            (item.base_price, PriceSource::BasePrice)
        };
        debug!("effective price item={itemId} party={partyId} location={location}: {price} ({source:?})");

        Ok(EffectivePrice {
            item_id: itemId,
            party_id: partyId,
            location,
            effective_price: price,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_types::{ItemCategory, NewParty, PartyStatus, PartyType};

    fn cement() -> NewItem {
        NewItem {
            name: "OPC Cement 53".into(),
            code: None,
            item_type: ItemType::Goods,
            category: ItemCategory::Cement,
            unit: "bag".into(),
            hsn_code: Some("2523".into()),
            tax_rate: 28.0,
            base_price: 390.0,
            current_stock: 500.0,
            min_stock_level: 100.0,
            description: None,
        }
    }

    async fn seeded() -> (Store, u64, u64) {
        let store = Store::default();
        let item = store.create_item(cement()).await.unwrap();
        let party = store
            .create_party(NewParty {
                name: "Haldia Steel".into(),
                code: None,
                party_type: PartyType::Customer,
                contact_person: None,
                email: None,
                phone: None,
                city: None,
                state: None,
                gstin: None,
                credit_limit: 0.0,
                payment_terms_days: 0,
                status: PartyStatus::Active,
                notes: None,
            })
            .await
            .unwrap();
        (store, item.id, party.id)
    }

    fn rule(itemId: u64, partyId: u64, rate: f64, location: &str) -> NewPriceOverride {
        NewPriceOverride {
            item_id: itemId,
            party_id: partyId,
            rate,
            location: location.into(),
        }
    }

    #[tokio::test]
    async fn effective_price_falls_back_in_order() {
        let (store, itemId, partyId) = seeded().await;

        let price = store.effective_price(itemId, partyId, Some("Haldia")).await.unwrap();
        assert_eq!(price.source, PriceSource::BasePrice);
        assert_eq!(price.effective_price, 390.0);

        store.upsert_price_override(rule(itemId, partyId, 375.0, "")).await.unwrap();
        let price = store.effective_price(itemId, partyId, Some("Haldia")).await.unwrap();
        assert_eq!(price.source, PriceSource::DefaultOverride);
        assert_eq!(price.effective_price, 375.0);

        store.upsert_price_override(rule(itemId, partyId, 368.0, "Haldia")).await.unwrap();
        let price = store.effective_price(itemId, partyId, Some("Haldia")).await.unwrap();
        assert_eq!(price.source, PriceSource::LocationOverride);
        assert_eq!(price.effective_price, 368.0);
    }

    #[tokio::test]
    async fn upsert_replaces_existing_rule() {
        let (store, itemId, partyId) = seeded().await;
        let first = store.upsert_price_override(rule(itemId, partyId, 380.0, "default")).await.unwrap();
        let second = store.upsert_price_override(rule(itemId, partyId, 372.5, " ")).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.list_price_overrides(Some(itemId)).await.len(), 1);
        assert_eq!(store.list_price_overrides(Some(itemId)).await[0].rate, 372.5);
    }

    #[tokio::test]
    async fn override_requires_known_item_and_party() {
        let (store, itemId, _) = seeded().await;
        assert!(matches!(
            store.upsert_price_override(rule(itemId, 99, 10.0, "default")).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.upsert_price_override(rule(itemId, 0, 10.0, "default")).await,
            Err(StoreError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn generated_code_skips_one_entered_by_hand() {
        let store = Store::default();
        let mut manual = cement();
        manual.code = Some("i-0002".into());
        assert_eq!(store.create_item(manual).await.unwrap().code, "I-0002");

        let first = store.create_item(cement()).await.unwrap();
        let second = store.create_item(cement()).await.unwrap();
        assert_eq!(first.code, "I-0003");
        assert_eq!(second.code, "I-0004");
    }

    #[tokio::test]
    async fn item_search_and_update() {
        let (store, itemId, _) = seeded().await;
        assert_eq!(store.list_items(None, Some("opc")).await.len(), 1);
        assert_eq!(store.list_items(None, Some("i-0001")).await.len(), 1);
        assert!(store.list_items(Some(ItemType::Service), None).await.is_empty());

        let updated = store
            .update_item(
                itemId,
                ItemUpdate {
                    current_stock: Some(80.0),
                    ..ItemUpdate::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_low_stock());
        assert_eq!(updated.unit, "BAG");
    }
}

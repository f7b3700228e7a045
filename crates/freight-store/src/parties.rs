use chrono::Utc;
use freight_types::{validation::non_blank, NewParty, Party, PartyType};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::store::{free_code, next_id, Store};

impl Store {
    pub async fn create_party(&self, request: NewParty) -> StoreResult<Party> {
        request.validate()?;
        let mut tables = self.tables.write().await;
        let id = tables.ids.party + 1;
        let code = request
            .code
            .as_deref()
            .and_then(non_blank)
            .map(|c| c.to_uppercase())
            .unwrap_or_else(|| {
                free_code("P", id, |code| tables.parties.values().any(|p| p.code == code))
            });
        if tables.parties.values().any(|p| p.code == code) {
            return Err(StoreError::Conflict(format!("Party code {code} already exists")));
        }

        let now = Utc::now();
        let party = Party {
            id: next_id(&mut tables.ids.party),
            code,
            name: request.name.trim().to_string(),
            party_type: request.party_type,
            contact_person: request.contact_person.as_deref().and_then(non_blank),
            email: request.email.as_deref().and_then(non_blank),
            phone: request.phone.as_deref().and_then(non_blank),
            city: request.city.as_deref().and_then(non_blank),
            state: request.state.as_deref().and_then(non_blank),
            gstin: request.gstin.as_deref().and_then(non_blank),
            credit_limit: request.credit_limit,
            payment_terms_days: request.payment_terms_days,
            current_balance: 0.0,
            status: request.status,
            notes: request.notes.as_deref().and_then(non_blank),
            created_at: now,
            updated_at: now,
        };
        tables.parties.insert(party.id, party.clone());
        info!("created party {} ({})", party.name, party.code);
        Ok(party)
    }

    /// Parties sorted by name; `Customer` also returns dual-role parties.
    pub async fn list_parties(&self, partyType: Option<PartyType>) -> Vec<Party> {
        let tables = self.tables.read().await;
        let mut parties: Vec<Party> = tables
            .parties
            .values()
            .filter(|p| partyType.map_or(true, |wanted| p.party_type.matches(wanted)))
            .cloned()
            .collect();
        parties.sort_by(|a, b| a.name.cmp(&b.name));
        parties
    }

    pub async fn get_party(&self, id: u64) -> StoreResult<Party> {
        let tables = self.tables.read().await;
        tables
            .parties
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("party", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_types::PartyStatus;

    fn party(name: &str, partyType: PartyType) -> NewParty {
        NewParty {
            name: name.into(),
            code: None,
            party_type: partyType,
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
        }
    }

    #[tokio::test]
    async fn codes_are_generated_and_unique() {
        let store = Store::default();
        let first = store.create_party(party("Haldia Steel", PartyType::Customer)).await.unwrap();
        assert_eq!(first.code, "P-0001");

        let mut clash = party("Another Depot", PartyType::Supplier);
        clash.code = Some("p-0001".into());
        assert!(matches!(store.create_party(clash).await, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn generated_code_skips_one_entered_by_hand() {
        let store = Store::default();
        let mut manual = party("Haldia Steel", PartyType::Customer);
        manual.code = Some("P-0002".into());
        store.create_party(manual).await.unwrap();

        let next = store.create_party(party("Zenith Cement", PartyType::Customer)).await.unwrap();
        assert_eq!(next.code, "P-0003");
        let after = store.create_party(party("Apex Logistics", PartyType::Both)).await.unwrap();
        assert_eq!(after.code, "P-0004");
    }

    #[tokio::test]
    async fn customer_listing_includes_dual_role() {
        let store = Store::default();
        store.create_party(party("Zenith Cement", PartyType::Customer)).await.unwrap();
        store.create_party(party("Bengal Fuels", PartyType::Supplier)).await.unwrap();
        store.create_party(party("Apex Logistics", PartyType::Both)).await.unwrap();

        let names: Vec<String> = store
            .list_parties(Some(PartyType::Customer))
            .await
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Apex Logistics", "Zenith Cement"]);
        assert_eq!(store.list_parties(None).await.len(), 3);
    }
}

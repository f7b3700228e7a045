use chrono::Utc;
use freight_types::{Enquiry, NewEnquiry};
use tracing::info;

use crate::error::StoreResult;
use crate::store::{next_id, Store};

impl Store {
    pub async fn submit_enquiry(&self, request: NewEnquiry) -> StoreResult<Enquiry> {
        request.validate()?;
        let mut tables = self.tables.write().await;
        let enquiry = Enquiry {
            id: next_id(&mut tables.ids.enquiry),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            company: request.company.trim().to_string(),
            message: request.message.trim().to_string(),
            channel: request.channel,
            received_at: Utc::now(),
        };
        tables.enquiries.push(enquiry.clone());
        info!("enquiry from {} at {} via {}", enquiry.name, enquiry.company, enquiry.channel);
        Ok(enquiry)
    }

    /// Newest first.
    pub async fn list_enquiries(&self) -> Vec<Enquiry> {
        let tables = self.tables.read().await;
        tables.enquiries.iter().rev().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;
    use freight_types::ContactChannel;

    #[tokio::test]
    async fn valid_enquiry_is_recorded() {
        let store = Store::default();
        let enquiry = store
            .submit_enquiry(NewEnquiry {
                name: " Anita Roy ".into(),
                email: "anita@haldia-steel.in".into(),
                company: "Haldia Steel".into(),
                message: "Need 40 trucks for a Durgapur run.".into(),
                channel: ContactChannel::Phone,
            })
            .await
            .unwrap();
        assert_eq!(enquiry.name, "Anita Roy");
        assert_eq!(store.list_enquiries().await, vec![enquiry]);
    }

    #[tokio::test]
    async fn short_message_is_rejected() {
        let store = Store::default();
        let result = store
            .submit_enquiry(NewEnquiry {
                name: "Anita".into(),
                email: "anita@haldia-steel.in".into(),
                company: "Haldia Steel".into(),
                message: "hi".into(),
                channel: ContactChannel::Email,
            })
            .await;
        assert!(matches!(result, Err(StoreError::Invalid(e)) if e.has("message")));
        assert!(store.list_enquiries().await.is_empty());
    }
}

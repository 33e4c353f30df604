//! Bill repository for the backend's `/bills` endpoints

use std::sync::Arc;

use common::{error::RequestResult, gateway::Gateway};
use reqwest::Method;
use tracing::info;

use crate::models::{Bill, BillList, BillUpdate, MessageResponse, NewBill};

/// Bill repository
#[derive(Clone)]
pub struct BillRepository {
    gateway: Arc<Gateway>,
}

impl BillRepository {
    /// Create a new bill repository
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Create a bill; the backend answers with the stored bill
    pub async fn add(&self, bill: &NewBill) -> RequestResult<Option<Bill>> {
        info!("Adding bill: {}", bill.description);

        self.gateway
            .send(Method::POST, &["bills", "add-bill"], Some(bill))
            .await
    }

    /// List every bill
    pub async fn list(&self) -> RequestResult<Vec<Bill>> {
        let bills = self
            .gateway
            .send::<(), BillList>(Method::GET, &["bills", "show-all-bills"], None)
            .await?;

        Ok(bills.map(BillList::into_bills).unwrap_or_default())
    }

    /// Get a bill by ID
    pub async fn get(&self, bill_id: i64) -> RequestResult<Option<Bill>> {
        let id = bill_id.to_string();

        self.gateway
            .send::<(), Bill>(Method::GET, &["bills", &id], None)
            .await
    }

    /// Update the given fields of a bill
    pub async fn update(&self, bill_id: i64, update: &BillUpdate) -> RequestResult<Option<Bill>> {
        info!("Updating bill {}", bill_id);
        let id = bill_id.to_string();

        self.gateway
            .send(
                Method::PATCH,
                &["bills", "update-bill-details", &id],
                Some(update),
            )
            .await
    }

    /// Delete a bill
    pub async fn delete(&self, bill_id: i64) -> RequestResult<Option<MessageResponse>> {
        info!("Deleting bill {}", bill_id);
        let id = bill_id.to_string();

        self.gateway
            .send::<(), MessageResponse>(Method::DELETE, &["bills", "delete-billid", &id], None)
            .await
    }
}

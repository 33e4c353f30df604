//! Student bill repository for the backend's `/student-bills` endpoints

use std::sync::Arc;

use common::{error::RequestResult, gateway::Gateway};
use reqwest::Method;
use tracing::info;

use crate::models::{MessageResponse, StudentBill};

/// Student bill repository
#[derive(Clone)]
pub struct StudentBillRepository {
    gateway: Arc<Gateway>,
}

impl StudentBillRepository {
    /// Create a new student bill repository
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Assign a bill to one student
    pub async fn assign_to_roll(
        &self,
        roll_number: &str,
        bill_id: i64,
    ) -> RequestResult<Option<StudentBill>> {
        info!("Assigning bill {} to roll {}", bill_id, roll_number);
        let id = bill_id.to_string();

        self.gateway
            .send::<(), StudentBill>(
                Method::POST,
                &["student-bills", "assign-to-roll", roll_number, &id],
                None,
            )
            .await
    }

    /// Assign a bill to every student of a domain
    pub async fn assign_to_domain(
        &self,
        domain: &str,
        bill_id: i64,
    ) -> RequestResult<Vec<StudentBill>> {
        info!("Assigning bill {} to domain {}", bill_id, domain);
        let id = bill_id.to_string();

        let assigned = self
            .gateway
            .send::<(), Vec<StudentBill>>(
                Method::POST,
                &["student-bills", "assign-to-domain", domain, &id],
                None,
            )
            .await?;

        Ok(assigned.unwrap_or_default())
    }

    /// Every bill assigned to a student
    pub async fn list_for_roll(&self, roll_number: &str) -> RequestResult<Vec<StudentBill>> {
        let bills = self
            .gateway
            .send::<(), Vec<StudentBill>>(
                Method::GET,
                &["student-bills", "all-bills-of-roll", roll_number],
                None,
            )
            .await?;

        Ok(bills.unwrap_or_default())
    }

    /// Remove every bill assigned to a student
    pub async fn delete_all_for_roll(
        &self,
        roll_number: &str,
    ) -> RequestResult<Option<MessageResponse>> {
        info!("Deleting all bills of roll {}", roll_number);

        self.gateway
            .send::<(), MessageResponse>(
                Method::DELETE,
                &["student-bills", "delete-student-bill", roll_number],
                None,
            )
            .await
    }

    /// Remove one bill from a student
    pub async fn delete_for_roll(
        &self,
        roll_number: &str,
        bill_id: i64,
    ) -> RequestResult<Option<MessageResponse>> {
        info!("Deleting bill {} of roll {}", bill_id, roll_number);
        let id = bill_id.to_string();

        self.gateway
            .send::<(), MessageResponse>(
                Method::DELETE,
                &["student-bills", "delete-bill-of-roll", roll_number, "bill", &id],
                None,
            )
            .await
    }
}

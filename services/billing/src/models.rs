//! Billing models for request and response payloads

use serde::{Deserialize, Serialize};

pub mod bill;
pub mod student_bill;

pub use bill::{Bill, BillList, BillUpdate, NewBill};
pub use student_bill::StudentBill;

/// Acknowledgement returned by the delete endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

//! Bill models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A billable charge as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub bill_id: i64,
    pub description: String,
    pub amount: f64,
    pub bill_date: NaiveDate,
    pub deadline: NaiveDate,
}

/// New bill creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub description: String,
    pub amount: f64,
    pub bill_date: NaiveDate,
    pub deadline: NaiveDate,
}

/// Bill update payload; absent fields are left unchanged by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl From<NewBill> for BillUpdate {
    fn from(bill: NewBill) -> Self {
        Self {
            description: Some(bill.description),
            amount: Some(bill.amount),
            bill_date: Some(bill.bill_date),
            deadline: Some(bill.deadline),
        }
    }
}

/// Answer of the bill listing, either a bare array or wrapped
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BillList {
    Bare(Vec<Bill>),
    Wrapped {
        #[serde(default)]
        bills: Vec<Bill>,
    },
}

impl BillList {
    pub fn into_bills(self) -> Vec<Bill> {
        match self {
            BillList::Bare(bills) | BillList::Wrapped { bills } => bills,
        }
    }
}

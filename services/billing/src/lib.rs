//! Bill management for the academic ERP console
//!
//! Models and repositories for the backend's bill and student bill
//! endpoints, the form checks run before submitting, and the controllers
//! driving each billing view.

pub mod controllers;
pub mod error;
pub mod models;
pub mod repositories;
pub mod validation;

pub use error::{SubmitError, SubmitResult};
pub use models::{Bill, BillUpdate, MessageResponse, NewBill, StudentBill};
pub use repositories::{BillRepository, StudentBillRepository};

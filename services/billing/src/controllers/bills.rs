//! Controllers for the bill views: add, list, update and delete

use std::time::Duration;

use tracing::info;

use super::status::{Activation, Status};
use crate::{
    error::{SubmitError, SubmitResult},
    models::{Bill, BillUpdate, MessageResponse},
    repositories::BillRepository,
    validation::{BillField, BillForm, validate_bill_id},
};

const BILL_NOT_FOUND: &str = "Bill not found";
const BILL_ALREADY_DELETED: &str = "Bill already deleted";

/// Add-bill form
pub struct AddBill {
    bills: BillRepository,
    form: BillForm,
    status: Status,
}

impl AddBill {
    pub fn new(bills: BillRepository, display: Duration) -> Self {
        Self {
            bills,
            form: BillForm::default(),
            status: Status::new(display),
        }
    }

    pub fn form(&self) -> &BillForm {
        &self.form
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn set(&mut self, field: BillField, value: impl Into<String>) {
        self.form.set(field, value);
        self.status.edited();
    }

    /// Validate and create the bill; the form is emptied on success
    pub async fn submit(&mut self) -> SubmitResult<Option<Bill>> {
        let bill = self.form.validate().map_err(|m| self.status.reject(m))?;

        self.status.begin();
        match self.bills.add(&bill).await {
            Ok(created) => {
                info!("Bill added successfully");
                self.form = BillForm::default();
                self.status.succeed();
                Ok(created)
            }
            Err(e) => Err(self.status.report(e.into())),
        }
    }

    pub fn poll(&mut self) {
        self.status.poll();
    }
}

/// Bill list
pub struct ViewBills {
    bills: BillRepository,
    loaded: Vec<Bill>,
    status: Status,
}

impl ViewBills {
    pub fn new(bills: BillRepository) -> Self {
        Self {
            bills,
            loaded: Vec::new(),
            status: Status::new(Duration::ZERO),
        }
    }

    pub fn bills(&self) -> &[Bill] {
        &self.loaded
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Fetch every bill
    pub async fn load(&mut self) -> SubmitResult<&[Bill]> {
        self.status.begin();
        match self.bills.list().await {
            Ok(bills) => {
                self.loaded = bills;
                self.status.done();
                Ok(self.loaded.as_slice())
            }
            Err(e) => {
                self.loaded.clear();
                Err(self.status.report(e.into()))
            }
        }
    }
}

/// Update-bill view: look a bill up, edit it, save it
pub struct UpdateBill {
    bills: BillRepository,
    bill_id: String,
    loaded: Option<Bill>,
    form: BillForm,
    status: Status,
}

impl UpdateBill {
    pub fn new(bills: BillRepository, display: Duration) -> Self {
        Self {
            bills,
            bill_id: String::new(),
            loaded: None,
            form: BillForm::default(),
            status: Status::new(display),
        }
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    pub fn loaded(&self) -> Option<&Bill> {
        self.loaded.as_ref()
    }

    pub fn form(&self) -> &BillForm {
        &self.form
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Change the ID to look up; a bill loaded for another ID is dropped
    pub fn set_bill_id(&mut self, bill_id: impl Into<String>) {
        self.bill_id = bill_id.into();
        if self.loaded.take().is_some() {
            self.form = BillForm::default();
        }
        self.status.edited();
    }

    pub fn set(&mut self, field: BillField, value: impl Into<String>) {
        self.form.set(field, value);
        self.status.edited();
    }

    /// Load the bill to edit; the form starts from its current values
    pub async fn search(&mut self) -> SubmitResult<&Bill> {
        let bill_id = validate_bill_id(&self.bill_id).map_err(|m| self.status.reject(m))?;

        self.loaded = None;
        self.status.begin();
        match self.bills.get(bill_id).await {
            Ok(Some(bill)) => {
                self.form = BillForm::from(&bill);
                self.status.done();
                Ok(&*self.loaded.insert(bill))
            }
            Ok(None) => Err(self.status.reject(BILL_NOT_FOUND.to_string())),
            Err(e) => Err(self.status.report(e.into())),
        }
    }

    /// Validate the edited form and save it
    pub async fn submit(&mut self) -> SubmitResult<Option<Bill>> {
        let Some(bill_id) = self.loaded.as_ref().map(|bill| bill.bill_id) else {
            return Err(self.status.reject("Bill ID is required".to_string()));
        };
        let update = self.form.validate().map_err(|m| self.status.reject(m))?;

        self.status.begin();
        match self.bills.update(bill_id, &BillUpdate::from(update)).await {
            Ok(updated) => {
                info!("Bill {} updated successfully", bill_id);
                self.status.succeed();
                Ok(updated)
            }
            Err(e) => Err(self.status.report(e.into())),
        }
    }

    /// Drop the loaded bill and go back to the lookup
    pub fn cancel(&mut self) {
        self.loaded = None;
        self.form = BillForm::default();
        self.status.done();
    }

    /// After the success window the view goes back to the lookup
    pub fn poll(&mut self) {
        if self.status.poll() {
            self.loaded = None;
            self.bill_id.clear();
            self.form = BillForm::default();
        }
    }
}

/// Delete-bill view: look a bill up, then delete it with two activations
pub struct DeleteBill {
    bills: BillRepository,
    bill_id: String,
    loaded: Option<Bill>,
    status: Status,
}

impl DeleteBill {
    pub fn new(bills: BillRepository, display: Duration) -> Self {
        Self {
            bills,
            bill_id: String::new(),
            loaded: None,
            status: Status::new(display),
        }
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    pub fn loaded(&self) -> Option<&Bill> {
        self.loaded.as_ref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Change the ID to look up; a bill loaded for another ID is dropped
    pub fn set_bill_id(&mut self, bill_id: impl Into<String>) {
        self.bill_id = bill_id.into();
        self.loaded = None;
        self.status.edited();
    }

    /// Load the bill to delete
    pub async fn search(&mut self) -> SubmitResult<&Bill> {
        self.status.disarm();
        let bill_id = validate_bill_id(&self.bill_id).map_err(|m| self.status.reject(m))?;

        self.loaded = None;
        self.status.begin();
        match self.bills.get(bill_id).await {
            Ok(Some(bill)) => {
                self.status.done();
                Ok(&*self.loaded.insert(bill))
            }
            Ok(None) => Err(self.status.reject(BILL_NOT_FOUND.to_string())),
            Err(e) => Err(self.status.report(e.into())),
        }
    }

    /// First activation arms, the second deletes the loaded bill
    ///
    /// While a deletion is still shown as successful the shown bill is gone,
    /// so nothing is armed.
    pub async fn delete(&mut self) -> SubmitResult<Activation<Option<MessageResponse>>> {
        if self.status.is_success() {
            return Err(SubmitError::Validation(BILL_ALREADY_DELETED.to_string()));
        }

        let Some(bill_id) = self.loaded.as_ref().map(|bill| bill.bill_id) else {
            return Err(self.status.reject("Bill ID is required".to_string()));
        };

        if !self.status.is_armed() {
            self.status.arm();
            return Ok(Activation::Armed);
        }

        self.status.begin();
        match self.bills.delete(bill_id).await {
            Ok(response) => {
                info!("Bill {} deleted", bill_id);
                self.status.succeed();
                Ok(Activation::Done(response))
            }
            Err(e) => Err(self.status.report(e.into())),
        }
    }

    /// After the success window the view goes back to the lookup
    pub fn poll(&mut self) {
        if self.status.poll() {
            self.loaded = None;
            self.bill_id.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support::offline_gateway;

    fn repository() -> BillRepository {
        BillRepository::new(offline_gateway())
    }

    #[tokio::test]
    async fn test_add_bill_rejects_deadline_before_bill_date() {
        let mut add = AddBill::new(repository(), Duration::from_secs(3));
        add.set(BillField::Description, "Hostel fee");
        add.set(BillField::Amount, "45000");
        add.set(BillField::BillDate, "2024-01-10");
        add.set(BillField::Deadline, "2024-01-05");

        let result = add.submit().await;

        // The gateway points at a closed port, so anything but a validation error means a call went out
        assert!(matches!(result, Err(SubmitError::Validation(_))));
        assert_eq!(add.status().error(), Some("Deadline must be after bill date"));
        assert_eq!(add.form().description, "Hostel fee");
    }

    #[tokio::test]
    async fn test_add_bill_edit_clears_error() {
        let mut add = AddBill::new(repository(), Duration::from_secs(3));

        assert!(add.submit().await.is_err());
        assert_eq!(add.status().error(), Some("Description is required"));

        add.set(BillField::Description, "Mess fee");
        assert_eq!(add.status().error(), None);
    }

    #[tokio::test]
    async fn test_transport_failure_is_shown_inline() {
        let mut add = AddBill::new(repository(), Duration::from_secs(3));
        add.set(BillField::Description, "Mess fee");
        add.set(BillField::Amount, "1200");
        add.set(BillField::BillDate, "2024-02-01");
        add.set(BillField::Deadline, "2024-02-15");

        let result = add.submit().await;

        assert!(matches!(result, Err(SubmitError::Request(_))));
        assert!(add.status().error().is_some());
        assert_eq!(add.form().amount, "1200");
    }

    #[tokio::test]
    async fn test_update_requires_bill_id() {
        let mut update = UpdateBill::new(repository(), Duration::from_secs(2));

        assert!(update.search().await.is_err());
        assert_eq!(update.status().error(), Some("Bill ID is required"));

        update.set_bill_id("abc");
        assert!(update.search().await.is_err());
        assert_eq!(update.status().error(), Some("Bill ID must be a number"));
    }

    #[tokio::test]
    async fn test_delete_needs_a_loaded_bill_before_arming() {
        let mut delete = DeleteBill::new(repository(), Duration::from_secs(2));

        assert!(delete.delete().await.is_err());
        assert!(!delete.status().is_armed());
        assert_eq!(delete.status().error(), Some("Bill ID is required"));
    }
}

//! Controllers for the student bill views

use std::time::Duration;

use tracing::info;

use super::status::{Activation, Status};
use crate::{
    error::SubmitResult,
    models::{MessageResponse, StudentBill},
    repositories::StudentBillRepository,
    validation::{validate_bill_id, validate_domain, validate_roll_and_bill, validate_roll_number},
};

/// Who a bill is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignTarget {
    /// One student, by roll number
    Roll,
    /// Every student of a domain
    Domain,
}

/// Assign-bill form
pub struct AssignBill {
    student_bills: StudentBillRepository,
    target: AssignTarget,
    target_value: String,
    bill_id: String,
    status: Status,
}

impl AssignBill {
    pub fn new(student_bills: StudentBillRepository, target: AssignTarget, display: Duration) -> Self {
        Self {
            student_bills,
            target,
            target_value: String::new(),
            bill_id: String::new(),
            status: Status::new(display),
        }
    }

    pub fn target(&self) -> AssignTarget {
        self.target
    }

    /// The roll number or domain typed so far
    pub fn target_value(&self) -> &str {
        &self.target_value
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn set_target_value(&mut self, value: impl Into<String>) {
        self.target_value = value.into();
        self.status.edited();
    }

    pub fn set_bill_id(&mut self, bill_id: impl Into<String>) {
        self.bill_id = bill_id.into();
        self.status.edited();
    }

    /// Validate and assign; the form is emptied on success
    pub async fn submit(&mut self) -> SubmitResult<Vec<StudentBill>> {
        let target = match self.target {
            AssignTarget::Roll => validate_roll_number(&self.target_value),
            AssignTarget::Domain => validate_domain(&self.target_value),
        }
        .map_err(|m| self.status.reject(m))?;
        let bill_id = validate_bill_id(&self.bill_id).map_err(|m| self.status.reject(m))?;

        self.status.begin();
        let result = match self.target {
            AssignTarget::Roll => self
                .student_bills
                .assign_to_roll(&target, bill_id)
                .await
                .map(|assigned| assigned.into_iter().collect::<Vec<_>>()),
            AssignTarget::Domain => self.student_bills.assign_to_domain(&target, bill_id).await,
        };

        match result {
            Ok(assigned) => {
                info!("Bill {} assigned to {}", bill_id, target);
                self.target_value.clear();
                self.bill_id.clear();
                self.status.succeed();
                Ok(assigned)
            }
            Err(e) => Err(self.status.report(e.into())),
        }
    }

    pub fn poll(&mut self) {
        self.status.poll();
    }
}

/// Bills of one student
pub struct StudentBills {
    student_bills: StudentBillRepository,
    roll_number: String,
    loaded: Vec<StudentBill>,
    searched: bool,
    status: Status,
}

impl StudentBills {
    pub fn new(student_bills: StudentBillRepository) -> Self {
        Self {
            student_bills,
            roll_number: String::new(),
            loaded: Vec::new(),
            searched: false,
            status: Status::new(Duration::ZERO),
        }
    }

    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    pub fn bills(&self) -> &[StudentBill] {
        &self.loaded
    }

    /// Whether a search went out, so an empty list means "no bills"
    pub fn searched(&self) -> bool {
        self.searched
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn set_roll_number(&mut self, roll_number: impl Into<String>) {
        self.roll_number = roll_number.into();
        self.status.edited();
    }

    pub async fn search(&mut self) -> SubmitResult<&[StudentBill]> {
        let roll_number =
            validate_roll_number(&self.roll_number).map_err(|m| self.status.reject(m))?;

        self.loaded.clear();
        self.searched = true;
        self.status.begin();
        match self.student_bills.list_for_roll(&roll_number).await {
            Ok(bills) => {
                self.loaded = bills;
                self.status.done();
                Ok(self.loaded.as_slice())
            }
            Err(e) => Err(self.status.report(e.into())),
        }
    }
}

/// Delete every bill of one student
pub struct DeleteStudentBills {
    student_bills: StudentBillRepository,
    roll_number: String,
    status: Status,
}

impl DeleteStudentBills {
    pub fn new(student_bills: StudentBillRepository, display: Duration) -> Self {
        Self {
            student_bills,
            roll_number: String::new(),
            status: Status::new(display),
        }
    }

    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn set_roll_number(&mut self, roll_number: impl Into<String>) {
        self.roll_number = roll_number.into();
        self.status.edited();
    }

    /// First activation arms, the second deletes
    pub async fn delete(&mut self) -> SubmitResult<Activation<Option<MessageResponse>>> {
        let roll_number =
            validate_roll_number(&self.roll_number).map_err(|m| self.status.reject(m))?;

        if !self.status.is_armed() {
            self.status.arm();
            return Ok(Activation::Armed);
        }

        self.status.begin();
        match self.student_bills.delete_all_for_roll(&roll_number).await {
            Ok(response) => {
                info!("Deleted all bills of {}", roll_number);
                self.roll_number.clear();
                self.status.succeed();
                Ok(Activation::Done(response))
            }
            Err(e) => Err(self.status.report(e.into())),
        }
    }

    pub fn poll(&mut self) {
        self.status.poll();
    }
}

/// Delete one bill of one student
pub struct DeleteStudentBill {
    student_bills: StudentBillRepository,
    roll_number: String,
    bill_id: String,
    status: Status,
}

impl DeleteStudentBill {
    pub fn new(student_bills: StudentBillRepository, display: Duration) -> Self {
        Self {
            student_bills,
            roll_number: String::new(),
            bill_id: String::new(),
            status: Status::new(display),
        }
    }

    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn set_roll_number(&mut self, roll_number: impl Into<String>) {
        self.roll_number = roll_number.into();
        self.status.edited();
    }

    pub fn set_bill_id(&mut self, bill_id: impl Into<String>) {
        self.bill_id = bill_id.into();
        self.status.edited();
    }

    /// First activation arms, the second deletes
    pub async fn delete(&mut self) -> SubmitResult<Activation<Option<MessageResponse>>> {
        let (roll_number, bill_id) = validate_roll_and_bill(&self.roll_number, &self.bill_id)
            .map_err(|m| self.status.reject(m))?;

        if !self.status.is_armed() {
            self.status.arm();
            return Ok(Activation::Armed);
        }

        self.status.begin();
        match self.student_bills.delete_for_roll(&roll_number, bill_id).await {
            Ok(response) => {
                info!("Deleted bill {} of {}", bill_id, roll_number);
                self.roll_number.clear();
                self.bill_id.clear();
                self.status.succeed();
                Ok(Activation::Done(response))
            }
            Err(e) => Err(self.status.report(e.into())),
        }
    }

    pub fn poll(&mut self) {
        self.status.poll();
    }
}

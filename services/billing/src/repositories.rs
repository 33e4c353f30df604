pub mod bills;
pub mod student_bills;

pub use bills::BillRepository;
pub use student_bills::StudentBillRepository;

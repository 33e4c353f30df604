pub mod account;
pub mod bills;
pub mod student_bills;

//! Student bill assignment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bill assigned to one student, flattened with the bill's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentBill {
    pub id: i64,
    pub roll_number: String,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student_email: Option<String>,
    pub bill_id: i64,
    #[serde(default)]
    pub bill_description: String,
    #[serde(default)]
    pub bill_amount: f64,
    #[serde(default)]
    pub bill_date: Option<NaiveDate>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_bill_wire_format() {
        let bill: StudentBill = serde_json::from_str(
            r#"{
                "id": 3,
                "rollNumber": "IMT2021001",
                "studentName": "Asha",
                "studentEmail": null,
                "billId": 9,
                "billDescription": "Library fine",
                "billAmount": 150.0,
                "billDate": "2024-03-01",
                "deadline": "2024-03-10"
            }"#,
        )
        .expect("valid student bill");

        assert_eq!(bill.roll_number, "IMT2021001");
        assert_eq!(bill.student_email, None);
        assert_eq!(bill.deadline, NaiveDate::from_ymd_opt(2024, 3, 10));
    }
}

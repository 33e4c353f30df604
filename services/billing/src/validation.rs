//! Input validation for the billing forms
//!
//! These checks only spare the backend obviously bad requests. The backend
//! validates again and its answer wins.

use chrono::NaiveDate;

use crate::models::{Bill, NewBill};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw bill form input, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillForm {
    pub description: String,
    pub amount: String,
    pub bill_date: String,
    pub deadline: String,
}

/// Editable fields of a [`BillForm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillField {
    Description,
    Amount,
    BillDate,
    Deadline,
}

impl BillForm {
    /// Replace one field's input
    pub fn set(&mut self, field: BillField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BillField::Description => self.description = value,
            BillField::Amount => self.amount = value,
            BillField::BillDate => self.bill_date = value,
            BillField::Deadline => self.deadline = value,
        }
    }

    /// Check the form and build the payload; the first failing check wins
    pub fn validate(&self) -> Result<NewBill, String> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err("Description is required".to_string());
        }

        let amount = validate_amount(&self.amount)?;

        if self.bill_date.trim().is_empty() {
            return Err("Bill date is required".to_string());
        }

        if self.deadline.trim().is_empty() {
            return Err("Deadline is required".to_string());
        }

        let bill_date = parse_date(&self.bill_date)
            .ok_or_else(|| "Bill date must be a valid date (YYYY-MM-DD)".to_string())?;
        let deadline = parse_date(&self.deadline)
            .ok_or_else(|| "Deadline must be a valid date (YYYY-MM-DD)".to_string())?;

        if deadline < bill_date {
            return Err("Deadline must be after bill date".to_string());
        }

        Ok(NewBill {
            description: description.to_string(),
            amount: round_amount(amount),
            bill_date,
            deadline,
        })
    }
}

impl From<&Bill> for BillForm {
    fn from(bill: &Bill) -> Self {
        Self {
            description: bill.description.clone(),
            amount: bill.amount.to_string(),
            bill_date: bill.bill_date.format(DATE_FORMAT).to_string(),
            deadline: bill.deadline.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Validate an amount: present, numeric, finite and positive
pub fn validate_amount(amount: &str) -> Result<f64, String> {
    match amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err("Amount must be greater than 0".to_string()),
    }
}

/// Round to whole cents
pub fn round_amount(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Validate a bill ID
pub fn validate_bill_id(bill_id: &str) -> Result<i64, String> {
    let bill_id = bill_id.trim();
    if bill_id.is_empty() {
        return Err("Bill ID is required".to_string());
    }

    bill_id
        .parse()
        .map_err(|_| "Bill ID must be a number".to_string())
}

/// Validate a roll number
pub fn validate_roll_number(roll_number: &str) -> Result<String, String> {
    required(roll_number, "Roll number is required")
}

/// Validate a domain name
pub fn validate_domain(domain: &str) -> Result<String, String> {
    required(domain, "Domain is required")
}

/// Validate the pair addressing one bill of one student
pub fn validate_roll_and_bill(roll_number: &str, bill_id: &str) -> Result<(String, i64), String> {
    if roll_number.trim().is_empty() || bill_id.trim().is_empty() {
        return Err("Both roll number and bill ID are required".to_string());
    }

    Ok((roll_number.trim().to_string(), validate_bill_id(bill_id)?))
}

/// Parse an ISO calendar date
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

fn required(value: &str, message: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(message.to_string());
    }

    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(description: &str, amount: &str, bill_date: &str, deadline: &str) -> BillForm {
        BillForm {
            description: description.to_string(),
            amount: amount.to_string(),
            bill_date: bill_date.to_string(),
            deadline: deadline.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let bill = form(" Tuition ", "1250.456", "2024-01-05", "2024-01-31")
            .validate()
            .expect("form is valid");

        assert_eq!(bill.description, "Tuition");
        assert_eq!(bill.amount, 1250.46);
        assert_eq!(bill.bill_date, NaiveDate::from_ymd_opt(2024, 1, 5).expect("date"));
    }

    #[test]
    fn test_checks_run_in_order() {
        assert_eq!(
            form("", "", "", "").validate(),
            Err("Description is required".to_string())
        );
        assert_eq!(
            form("Fee", "", "", "").validate(),
            Err("Amount must be greater than 0".to_string())
        );
        assert_eq!(
            form("Fee", "10", "", "").validate(),
            Err("Bill date is required".to_string())
        );
        assert_eq!(
            form("Fee", "10", "2024-01-01", " ").validate(),
            Err("Deadline is required".to_string())
        );
    }

    #[test]
    fn test_amount_must_be_positive() {
        for amount in ["0", "-5", "abc", "NaN", "inf"] {
            assert_eq!(
                validate_amount(amount),
                Err("Amount must be greater than 0".to_string()),
                "amount {:?}",
                amount
            );
        }
        assert_eq!(validate_amount(" 0.01 "), Ok(0.01));
    }

    #[test]
    fn test_dates_must_parse() {
        assert_eq!(
            form("Fee", "10", "05/01/2024", "2024-01-31").validate(),
            Err("Bill date must be a valid date (YYYY-MM-DD)".to_string())
        );
        assert_eq!(
            form("Fee", "10", "2024-01-05", "2024-02-30").validate(),
            Err("Deadline must be a valid date (YYYY-MM-DD)".to_string())
        );
    }

    #[test]
    fn test_deadline_before_bill_date_is_rejected() {
        assert_eq!(
            form("Fee", "10", "2024-01-10", "2024-01-05").validate(),
            Err("Deadline must be after bill date".to_string())
        );
        assert!(form("Fee", "10", "2024-01-10", "2024-01-10").validate().is_ok());
    }

    #[test]
    fn test_form_from_bill() {
        let bill = Bill {
            bill_id: 4,
            description: "Mess fee".to_string(),
            amount: 1200.5,
            bill_date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"),
            deadline: NaiveDate::from_ymd_opt(2024, 2, 15).expect("date"),
        };

        let mut form = BillForm::from(&bill);
        assert_eq!(form.amount, "1200.5");
        assert_eq!(form.bill_date, "2024-02-01");

        form.set(BillField::Amount, "99");
        assert_eq!(form.validate().expect("valid").amount, 99.0);
    }

    #[test]
    fn test_ids() {
        assert_eq!(validate_bill_id(" 42 "), Ok(42));
        assert_eq!(validate_bill_id(""), Err("Bill ID is required".to_string()));
        assert_eq!(
            validate_bill_id("4a"),
            Err("Bill ID must be a number".to_string())
        );
        assert_eq!(
            validate_roll_number("  "),
            Err("Roll number is required".to_string())
        );
        assert_eq!(validate_domain("CSE "), Ok("CSE".to_string()));
        assert_eq!(validate_domain(""), Err("Domain is required".to_string()));
        assert_eq!(
            validate_roll_and_bill("IMT2021001", ""),
            Err("Both roll number and bill ID are required".to_string())
        );
        assert_eq!(
            validate_roll_and_bill(" IMT2021001 ", "7"),
            Ok(("IMT2021001".to_string(), 7))
        );
    }
}

//! Student bill commands

use anyhow::Result;
use billing::{
    StudentBill,
    controllers::{
        Activation, AssignBill, AssignTarget, DeleteStudentBill, DeleteStudentBills, StudentBills,
    },
};
use clap::Subcommand;
use common::navigation::{EmployeeView, Route};

use crate::app::{App, confirm};

#[derive(Subcommand)]
pub enum StudentBillsCommand {
    /// Assign a bill to one student
    AssignRoll {
        roll_number: String,
        bill_id: String,
    },

    /// Assign a bill to every student of a domain
    AssignDomain {
        domain: String,
        bill_id: String,
    },

    /// List the bills of a student
    List {
        roll_number: String,
    },

    /// Remove every bill of a student
    DeleteAll {
        roll_number: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove one bill from a student
    Delete {
        roll_number: String,
        bill_id: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_student_bills_command(cmd: StudentBillsCommand, app: &App) -> Result<()> {
    match cmd {
        StudentBillsCommand::AssignRoll {
            roll_number,
            bill_id,
        } => assign(app, AssignTarget::Roll, roll_number, bill_id).await,
        StudentBillsCommand::AssignDomain { domain, bill_id } => {
            assign(app, AssignTarget::Domain, domain, bill_id).await
        }
        StudentBillsCommand::List { roll_number } => list(app, roll_number).await,
        StudentBillsCommand::DeleteAll { roll_number, yes } => {
            delete_all(app, roll_number, yes).await
        }
        StudentBillsCommand::Delete {
            roll_number,
            bill_id,
            yes,
        } => delete_one(app, roll_number, bill_id, yes).await,
    }
}

async fn assign(app: &App, target: AssignTarget, value: String, bill_id: String) -> Result<()> {
    let view = match target {
        AssignTarget::Roll => EmployeeView::AssignToRoll,
        AssignTarget::Domain => EmployeeView::AssignToDomain,
    };
    app.enter(Route::Employee(view)).await?;

    let mut form = AssignBill::new(app.student_bills.clone(), target, app.config.success_display());
    form.set_target_value(value);
    form.set_bill_id(bill_id);

    let assigned = app.finish(form.submit().await)?;
    match target {
        AssignTarget::Roll => println!("Bill assigned successfully!"),
        AssignTarget::Domain => println!("Bill assigned to {} students.", assigned.len()),
    }
    print_student_bills(&assigned);
    Ok(())
}

async fn list(app: &App, roll_number: String) -> Result<()> {
    app.enter(Route::Employee(EmployeeView::StudentBills)).await?;

    let mut view = StudentBills::new(app.student_bills.clone());
    view.set_roll_number(roll_number);
    let bills = app.finish(view.search().await)?;

    if bills.is_empty() {
        println!("No bills found for this student.");
        return Ok(());
    }

    print_student_bills(bills);
    let total: f64 = bills.iter().map(|bill| bill.bill_amount).sum();
    println!("Total due: {:.2}", total);
    Ok(())
}

async fn delete_all(app: &App, roll_number: String, yes: bool) -> Result<()> {
    app.enter(Route::Employee(EmployeeView::DeleteStudentBills)).await?;

    let mut form = DeleteStudentBills::new(app.student_bills.clone(), app.config.success_display());
    form.set_roll_number(roll_number);

    app.finish(form.delete().await)?;
    let prompt = format!("Delete every bill of {}?", form.roll_number().trim());
    if !confirm(&prompt, yes)? {
        println!("Nothing deleted.");
        return Ok(());
    }

    if let Activation::Done(response) = app.finish(form.delete().await)? {
        match response {
            Some(response) => println!("{}", response.message),
            None => println!("Student bills deleted successfully!"),
        }
    }
    Ok(())
}

async fn delete_one(app: &App, roll_number: String, bill_id: String, yes: bool) -> Result<()> {
    app.enter(Route::Employee(EmployeeView::DeleteSpecificBill)).await?;

    let mut form = DeleteStudentBill::new(app.student_bills.clone(), app.config.success_display());
    form.set_roll_number(roll_number);
    form.set_bill_id(bill_id);

    app.finish(form.delete().await)?;
    let prompt = format!(
        "Delete bill {} of {}?",
        form.bill_id().trim(),
        form.roll_number().trim()
    );
    if !confirm(&prompt, yes)? {
        println!("Nothing deleted.");
        return Ok(());
    }

    if let Activation::Done(response) = app.finish(form.delete().await)? {
        match response {
            Some(response) => println!("{}", response.message),
            None => println!("Bill deleted successfully!"),
        }
    }
    Ok(())
}

fn print_student_bills(bills: &[StudentBill]) {
    for bill in bills {
        let student = bill.student_name.as_deref().unwrap_or("-");
        let deadline = bill
            .deadline
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<12} {:<24} #{:<5} {:<28} {:>10.2}  due {}",
            bill.roll_number, student, bill.bill_id, bill.bill_description, bill.bill_amount, deadline
        );
    }
}

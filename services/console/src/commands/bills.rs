//! Bill commands

use anyhow::Result;
use billing::{
    Bill,
    controllers::{Activation, AddBill, DeleteBill, UpdateBill, ViewBills},
    validation::BillField,
};
use clap::Subcommand;
use common::navigation::{EmployeeView, Route};

use crate::app::{App, confirm};

#[derive(Subcommand)]
pub enum BillsCommand {
    /// List every bill
    List,

    /// Show one bill
    Show {
        /// Bill ID
        id: String,
    },

    /// Create a bill
    Add {
        #[arg(long)]
        description: String,

        #[arg(long)]
        amount: String,

        /// Issue date (YYYY-MM-DD)
        #[arg(long)]
        bill_date: String,

        /// Payment deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: String,
    },

    /// Change some fields of a bill
    Update {
        /// Bill ID
        id: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        amount: Option<String>,

        #[arg(long)]
        bill_date: Option<String>,

        #[arg(long)]
        deadline: Option<String>,
    },

    /// Delete a bill, including every student assignment of it
    Delete {
        /// Bill ID
        id: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_bills_command(cmd: BillsCommand, app: &App) -> Result<()> {
    match cmd {
        BillsCommand::List => list(app).await,
        BillsCommand::Show { id } => show(app, id).await,
        BillsCommand::Add {
            description,
            amount,
            bill_date,
            deadline,
        } => {
            add(
                app,
                [
                    (BillField::Description, description),
                    (BillField::Amount, amount),
                    (BillField::BillDate, bill_date),
                    (BillField::Deadline, deadline),
                ],
            )
            .await
        }
        BillsCommand::Update {
            id,
            description,
            amount,
            bill_date,
            deadline,
        } => {
            let changes = [
                (BillField::Description, description),
                (BillField::Amount, amount),
                (BillField::BillDate, bill_date),
                (BillField::Deadline, deadline),
            ]
            .into_iter()
            .filter_map(|(field, value)| value.map(|value| (field, value)));

            update(app, id, changes).await
        }
        BillsCommand::Delete { id, yes } => delete(app, id, yes).await,
    }
}

async fn list(app: &App) -> Result<()> {
    app.enter(Route::Employee(EmployeeView::AllBills)).await?;

    let mut view = ViewBills::new(app.bills.clone());
    let bills = app.finish(view.load().await)?;

    if bills.is_empty() {
        println!("No bills found.");
        return Ok(());
    }

    println!(
        "{:>6}  {:<32} {:>12}  {:<10}  {:<10}",
        "ID", "Description", "Amount", "Bill date", "Deadline"
    );
    for bill in bills {
        println!(
            "{:>6}  {:<32} {:>12.2}  {:<10}  {:<10}",
            bill.bill_id, bill.description, bill.amount, bill.bill_date, bill.deadline
        );
    }
    Ok(())
}

async fn show(app: &App, id: String) -> Result<()> {
    app.enter(Route::Employee(EmployeeView::AllBills)).await?;

    let mut view = UpdateBill::new(app.bills.clone(), app.config.edit_display());
    view.set_bill_id(id);
    let bill = app.finish(view.search().await)?;

    print_bill(bill);
    Ok(())
}

async fn add(app: &App, fields: impl IntoIterator<Item = (BillField, String)>) -> Result<()> {
    app.enter(Route::Employee(EmployeeView::AddBill)).await?;

    let mut form = AddBill::new(app.bills.clone(), app.config.success_display());
    for (field, value) in fields {
        form.set(field, value);
    }

    match app.finish(form.submit().await)? {
        Some(bill) => {
            println!("Bill added successfully!");
            print_bill(&bill);
        }
        None => println!("Bill added successfully!"),
    }
    Ok(())
}

async fn update(
    app: &App,
    id: String,
    changes: impl IntoIterator<Item = (BillField, String)>,
) -> Result<()> {
    app.enter(Route::Employee(EmployeeView::UpdateBill)).await?;

    let mut form = UpdateBill::new(app.bills.clone(), app.config.edit_display());
    form.set_bill_id(id);
    app.finish(form.search().await)?;

    for (field, value) in changes {
        form.set(field, value);
    }

    let updated = app.finish(form.submit().await)?;
    println!("Bill updated successfully!");
    if let Some(bill) = updated {
        print_bill(&bill);
    }
    Ok(())
}

async fn delete(app: &App, id: String, yes: bool) -> Result<()> {
    app.enter(Route::Employee(EmployeeView::DeleteBill)).await?;

    let mut form = DeleteBill::new(app.bills.clone(), app.config.edit_display());
    form.set_bill_id(id);
    let bill = app.finish(form.search().await)?.clone();
    print_bill(&bill);

    app.finish(form.delete().await)?;
    let prompt = format!(
        "Delete bill {} ({}) everywhere, including student assignments?",
        bill.bill_id, bill.description
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

fn print_bill(bill: &Bill) {
    println!("Bill #{}", bill.bill_id);
    println!("  Description: {}", bill.description);
    println!("  Amount:      {:.2}", bill.amount);
    println!("  Bill date:   {}", bill.bill_date);
    println!("  Deadline:    {}", bill.deadline);
}

//! Basic export example

use std::io;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use ledger_convert::{
    export, Account, Book, ExportOptions, OutputFormat, ReconcileState, Split, TransactionBuilder,
};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::from_default_env().add_directive("ledger_convert=info".parse()?);
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    // Format from the first argument: a Quicken year or "iif"
    let format: OutputFormat = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "2004".to_string())
        .parse()?;

    let mut book = Book::new();
    let accounts = [
        ("assets", "Assets", "asset", None),
        ("checking", "Checking", "bank", Some("assets")),
        ("liabilities", "Liabilities", "liability", None),
        ("visa", "Visa", "credit", Some("liabilities")),
        ("income", "Income", "income", None),
        ("salary", "Salary", "income", Some("income")),
        ("expenses", "Expenses", "expense", None),
        ("food", "Food", "expense", Some("expenses")),
        ("fuel", "Fuel", "expense", Some("expenses")),
    ];
    for (id, name, tag, parent) in accounts {
        book.add_account(Account::new(id, name, tag, parent.map(str::to_string)))?;
    }

    let date = |day| NaiveDate::from_ymd_opt(2024, 1, day).ok_or("invalid date");

    book.add_transaction(
        TransactionBuilder::new("t1", date(2)?, "Paycheck")
            .split(Split::new("checking", BigDecimal::from(2500)).with_reconcile(ReconcileState::Cleared))
            .transfer("salary", BigDecimal::from(-2500))
            .build()?,
    )?;
    book.add_transaction(
        TransactionBuilder::new("t2", date(5)?, "Coffee at joe's")
            .transfer("checking", BigDecimal::from(-4))
            .transfer("food", BigDecimal::from(4))
            .build()?,
    )?;
    book.add_transaction(
        TransactionBuilder::new("t3", date(9)?, "Road trip")
            .reference("1001")
            .transfer("visa", BigDecimal::from(-100))
            .split(Split::new("food", BigDecimal::from(40)).with_memo("snacks"))
            .transfer("fuel", BigDecimal::from(60))
            .build()?,
    )?;
    book.add_transaction(
        TransactionBuilder::new("t4", date(20)?, "Card payment")
            .transfer("visa", BigDecimal::from(100))
            .transfer("checking", BigDecimal::from(-100))
            .build()?,
    )?;

    let stdout = io::stdout();
    let report = export(&book, format, &ExportOptions::default(), stdout.lock())?;

    eprintln!(
        "\nWrote {} accounts and {} transactions as {} (.{})",
        report.accounts_written,
        report.transactions_written,
        format,
        format.file_extension()
    );
    for warning in &report.warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}

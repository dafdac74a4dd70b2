//! # Ledger Convert
//!
//! Projects a double-entry bookkeeping graph onto single-entry ledger files:
//! Quicken QIF (2003 and 2004 layouts) and QuickBooks IIF.
//!
//! ## Features
//!
//! - **Primary-account projection**: every transaction is detailed under exactly
//!   one real account and only referenced from the others
//! - **Hierarchical names**: colon-delimited full names truncated per format
//! - **Split consolidation**: same-account legs are merged with a warning
//! - **Payee and memo extraction** from descriptions such as `"Coffee at Joe's"`
//! - **Invoice backlinks**: IIF bill payments carry the bill's document number
//! - **Warnings channel**: sorted, deduplicated data-quality warnings per export
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//! use ledger_convert::{export_to_string, Account, Book, ExportOptions, OutputFormat, TransactionBuilder};
//!
//! let mut book = Book::new();
//! book.add_account(Account::new("chk", "Checking", "bank", None)).unwrap();
//! book.add_account(Account::new("food", "Food", "expense", None)).unwrap();
//!
//! let txn = TransactionBuilder::new("t1", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), "Lunch")
//!     .transfer("chk", BigDecimal::from(-12))
//!     .transfer("food", BigDecimal::from(12))
//!     .build()
//!     .unwrap();
//! book.add_transaction(txn).unwrap();
//!
//! let (qif, report) = export_to_string(&book, OutputFormat::Qif2004, &ExportOptions::default()).unwrap();
//! assert!(qif.contains("LFood"));
//! assert!(report.warnings.is_empty());
//! ```

pub mod classify;
pub mod export;
pub mod ledger;
pub mod projection;
pub mod types;
pub mod utils;
pub mod warnings;

// Re-export commonly used types
pub use export::{export, export_to_string, ExportOptions, ExportReport, OutputFormat};
pub use ledger::*;
pub use types::*;
pub use warnings::Warnings;

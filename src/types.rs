//! Core types and data structures for the bookkeeping graph

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account in the source chart of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: String,
    /// Parent account identifier; `None` for top-level accounts
    pub parent_id: Option<String>,
    /// Human-readable account name (one path segment)
    pub name: String,
    /// Raw source account-type tag such as `bank` or `expense`
    pub type_tag: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional free-form notes
    pub notes: Option<String>,
    /// Optional account code/number
    pub code: Option<String>,
    /// Identifiers of the transactions touching this account, in source order
    #[serde(default)]
    pub transactions: Vec<String>,
}

impl Account {
    /// Create a new account with no transactions
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        type_tag: impl Into<String>,
        parent_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id,
            name: name.into(),
            type_tag: type_tag.into(),
            description: None,
            notes: None,
            code: None,
            transactions: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the account code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Returns the description, falling back to the notes and then to `default`
    pub fn description_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.description
            .as_deref()
            .or(self.notes.as_deref())
            .unwrap_or(default)
    }

    /// Whether any transaction touches this account
    pub fn is_used(&self) -> bool {
        !self.transactions.is_empty()
    }
}

/// Reconciliation state of a split, keyed by the source's single-letter code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReconcileState {
    /// `n`
    #[default]
    New,
    /// `c`
    Cleared,
    /// `y`
    Reconciled,
    /// `f`
    Frozen,
    /// `v`
    Void,
}

impl ReconcileState {
    /// Parse the single-letter source code; unknown letters map to `New`
    pub fn from_code(code: char) -> Self {
        match code.to_ascii_lowercase() {
            'c' => ReconcileState::Cleared,
            'y' => ReconcileState::Reconciled,
            'f' => ReconcileState::Frozen,
            'v' => ReconcileState::Void,
            _ => ReconcileState::New,
        }
    }

    /// Cleared or reconciled splits are marked cleared in the target formats
    pub fn is_cleared(&self) -> bool {
        matches!(self, ReconcileState::Cleared | ReconcileState::Reconciled)
    }
}

/// One leg of a transaction: a signed amount against one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Account the amount is posted to
    pub account_id: String,
    /// Signed amount; positive flows into the account
    pub amount: BigDecimal,
    /// Reconciliation state
    #[serde(default)]
    pub reconcile: ReconcileState,
    /// Optional memo for this leg
    pub memo: Option<String>,
    /// Optional lot identifier linking the split to an invoice
    pub lot_id: Option<String>,
    /// Optional action tag such as `Payment` or `Bill`
    pub action: Option<String>,
}

impl Split {
    /// Create a split against an account
    pub fn new(account_id: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
            reconcile: ReconcileState::New,
            memo: None,
            lot_id: None,
            action: None,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_lot(mut self, lot_id: impl Into<String>) -> Self {
        self.lot_id = Some(lot_id.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_reconcile(mut self, reconcile: ReconcileState) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// The memo, if present and non-empty
    pub fn memo_text(&self) -> Option<&str> {
        self.memo.as_deref().filter(|memo| !memo.is_empty())
    }
}

/// Complete transaction with its splits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: String,
    /// Date the transaction was posted
    pub posted: NaiveDate,
    /// Optional due date
    pub due: Option<NaiveDate>,
    /// Free-text description
    pub description: String,
    /// Optional reference number (check number, invoice number, etc.)
    pub reference: Option<String>,
    /// Splits in source order
    pub splits: Vec<Split>,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" on {}", self.description, self.posted)?;
        if let Some(reference) = &self.reference {
            write!(f, " with ref \"{}\"", reference)?;
        }
        Ok(())
    }
}

/// Lot grouping splits that settle one invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: String,
    /// Account that owns the lot
    pub account_id: String,
    /// Invoice the lot belongs to
    pub invoice_id: Option<String>,
}

/// Business invoice or bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: String,
    /// Human-facing invoice number
    pub number: Option<String>,
    pub opened: Option<NaiveDate>,
    /// Posting date; a posted invoice counts as paid in full
    pub posted: Option<NaiveDate>,
    pub active: bool,
    /// Account the invoice was posted to
    pub account_id: Option<String>,
    /// Transaction the invoice generated
    pub transaction_id: Option<String>,
}

/// Vendor record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub name: String,
    pub id: Option<String>,
    pub address_name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub active: bool,
}

/// Errors that can occur while building or exporting a book
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Account '{account}' has type '{type_tag}', which has no IIF account type")]
    UnsupportedAccountType { account: String, type_tag: String },
    #[error("I/O error while writing export: {0}")]
    Io(#[from] std::io::Error),
    #[error("Duplicate identifier: {0}")]
    DuplicateId(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_falls_back_to_notes() {
        let account = Account::new("a", "Checking", "bank", None).with_notes("joint account");
        assert_eq!(account.description_or(""), "joint account");

        let account = account.with_description("Main checking");
        assert_eq!(account.description_or(""), "Main checking");

        let bare = Account::new("b", "Savings", "bank", None);
        assert_eq!(bare.description_or("none"), "none");
    }

    #[test]
    fn test_reconcile_codes() {
        assert!(ReconcileState::from_code('c').is_cleared());
        assert!(ReconcileState::from_code('Y').is_cleared());
        assert!(!ReconcileState::from_code('n').is_cleared());
        assert_eq!(ReconcileState::from_code('v'), ReconcileState::Void);
        assert_eq!(ReconcileState::from_code('?'), ReconcileState::New);
    }

    #[test]
    fn test_transaction_display() {
        let txn = Transaction {
            id: "t1".to_string(),
            posted: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            due: None,
            description: "Rent".to_string(),
            reference: Some("1042".to_string()),
            splits: Vec::new(),
        };
        assert_eq!(txn.to_string(), "\"Rent\" on 2024-03-09 with ref \"1042\"");
    }
}

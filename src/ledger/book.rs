//! Arena container holding the parsed bookkeeping graph

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::*;

/// The whole bookkeeping graph, keyed by stable identifiers
///
/// Accounts refer to their transactions and splits refer to their accounts by
/// identifier only, so the graph has no ownership cycles. The exporter reads a
/// `Book` without mutating it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    accounts: HashMap<String, Account>,
    transactions: HashMap<String, Transaction>,
    lots: HashMap<String, Lot>,
    invoices: HashMap<String, Invoice>,
    vendors: Vec<Vendor>,
}

impl Book {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account
    pub fn add_account(&mut self, account: Account) -> ExportResult<()> {
        if account.id.trim().is_empty() {
            return Err(ExportError::InvalidInput(
                "Account ID cannot be empty".to_string(),
            ));
        }
        if self.accounts.contains_key(&account.id) {
            return Err(ExportError::DuplicateId(format!("account '{}'", account.id)));
        }
        self.accounts.insert(account.id.clone(), account);
        Ok(())
    }

    /// Add a transaction and register it with every account its splits touch
    ///
    /// Accounts must be added first; splits against unknown accounts are kept
    /// and later rendered as "Unknown".
    pub fn add_transaction(&mut self, transaction: Transaction) -> ExportResult<()> {
        if self.transactions.contains_key(&transaction.id) {
            return Err(ExportError::DuplicateId(format!(
                "transaction '{}'",
                transaction.id
            )));
        }

        for split in &transaction.splits {
            if let Some(account) = self.accounts.get_mut(&split.account_id) {
                if !account.transactions.contains(&transaction.id) {
                    account.transactions.push(transaction.id.clone());
                }
            }
        }

        self.transactions
            .insert(transaction.id.clone(), transaction);
        Ok(())
    }

    pub fn add_lot(&mut self, lot: Lot) -> ExportResult<()> {
        if self.lots.contains_key(&lot.id) {
            return Err(ExportError::DuplicateId(format!("lot '{}'", lot.id)));
        }
        self.lots.insert(lot.id.clone(), lot);
        Ok(())
    }

    pub fn add_invoice(&mut self, invoice: Invoice) -> ExportResult<()> {
        if self.invoices.contains_key(&invoice.id) {
            return Err(ExportError::DuplicateId(format!("invoice '{}'", invoice.id)));
        }
        self.invoices.insert(invoice.id.clone(), invoice);
        Ok(())
    }

    /// Vendors keep insertion order
    pub fn add_vendor(&mut self, vendor: Vendor) {
        self.vendors.push(vendor);
    }

    /// Get an account by ID
    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.get(account_id)
    }

    /// Get a transaction by ID
    pub fn transaction(&self, transaction_id: &str) -> Option<&Transaction> {
        self.transactions.get(transaction_id)
    }

    pub fn lot(&self, lot_id: &str) -> Option<&Lot> {
        self.lots.get(lot_id)
    }

    pub fn invoice(&self, invoice_id: &str) -> Option<&Invoice> {
        self.invoices.get(invoice_id)
    }

    /// Iterate accounts in arbitrary order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Iterate transactions in arbitrary order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

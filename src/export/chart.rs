//! Derived, read-only view of a book for one target format

use std::collections::HashMap;

use tracing::debug;

use crate::classify::{
    classify, is_iif_category, qif_approximation_warning, AccountBucket, AccountClassification,
    IifAccountType,
};
use crate::ledger::Book;
use crate::projection::{consolidate_splits, AccountLookup, HierarchyResolver};
use crate::types::*;
use crate::warnings::Warnings;

use super::OutputFormat;

/// Full names, classifications, consolidated splits and account order,
/// computed once before any output is written
pub struct Chart<'a> {
    book: &'a Book,
    format: OutputFormat,
    full_names: HashMap<String, String>,
    categories: HashMap<String, bool>,
    classes: HashMap<String, AccountClassification>,
    splits: HashMap<String, Vec<Split>>,
    order: Vec<&'a Account>,
}

impl<'a> Chart<'a> {
    /// Build the chart, failing if an account has no mapping in `format`
    pub fn build(book: &'a Book, format: OutputFormat, warnings: &mut Warnings) -> ExportResult<Self> {
        let full_names = HierarchyResolver::new(book, format.naming_policy()).resolve_all();

        let mut order: Vec<&Account> = book.accounts().collect();
        order.sort_by(|a, b| {
            let a_name = full_names.get(&a.id).unwrap_or(&a.name);
            let b_name = full_names.get(&b.id).unwrap_or(&b.name);
            a_name.cmp(b_name).then_with(|| a.id.cmp(&b.id))
        });

        let mut categories = HashMap::with_capacity(order.len());
        let mut classes = HashMap::with_capacity(order.len());
        for account in &order {
            let class = classify(&account.type_tag);
            let is_category = match format {
                OutputFormat::Iif => {
                    if class.iif_type.is_none() {
                        return Err(ExportError::UnsupportedAccountType {
                            account: full_names
                                .get(&account.id)
                                .cloned()
                                .unwrap_or_else(|| account.name.clone()),
                            type_tag: account.type_tag.clone(),
                        });
                    }
                    is_iif_category(&account.type_tag)
                }
                OutputFormat::Qif2003 | OutputFormat::Qif2004 => {
                    if let Some(warning) = qif_approximation_warning(&account.type_tag) {
                        warnings.push(warning);
                    }
                    class.bucket.is_double_entry()
                }
            };
            categories.insert(account.id.clone(), is_category);
            classes.insert(account.id.clone(), class);
        }

        let splits = book
            .transactions()
            .map(|txn| (txn.id.clone(), consolidate_splits(txn, book, warnings)))
            .collect::<HashMap<_, _>>();

        debug!(
            %format,
            accounts = order.len(),
            transactions = splits.len(),
            "chart built"
        );

        Ok(Self {
            book,
            format,
            full_names,
            categories,
            classes,
            splits,
            order,
        })
    }

    pub fn book(&self) -> &'a Book {
        self.book
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Accounts sorted by full name, then identifier
    pub fn accounts(&self) -> &[&'a Account] {
        &self.order
    }

    /// QIF bucket; `None` for IIF charts or unknown accounts
    pub fn bucket(&self, account_id: &str) -> Option<AccountBucket> {
        if !self.format.is_qif() {
            return None;
        }
        self.classes.get(account_id).map(|class| class.bucket)
    }

    /// IIF account type; always present for accounts of an IIF chart
    pub fn iif_type(&self, account_id: &str) -> Option<IifAccountType> {
        self.classes.get(account_id).and_then(|class| class.iif_type)
    }

    /// Consolidated splits of a transaction
    pub fn splits(&self, transaction_id: &str) -> &[Split] {
        self.splits
            .get(transaction_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Transactions touching an account, in the account's reference order
    pub fn transactions_of(&self, account: &'a Account) -> impl Iterator<Item = &'a Transaction> + 'a {
        let book = self.book;
        account
            .transactions
            .iter()
            .filter_map(move |txn_id| book.transaction(txn_id))
    }
}

impl AccountLookup for Chart<'_> {
    fn is_category(&self, account_id: &str) -> Option<bool> {
        self.categories.get(account_id).copied()
    }

    fn name(&self, account_id: &str) -> Option<&str> {
        self.book
            .account(account_id)
            .map(|account| account.name.as_str())
    }

    fn full_name(&self, account_id: &str) -> Option<&str> {
        self.full_names.get(account_id).map(String::as_str)
    }
}

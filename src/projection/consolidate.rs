//! Merging of same-account splits within one transaction

use crate::ledger::Book;
use crate::types::{Split, Transaction};
use crate::warnings::Warnings;

use super::UNKNOWN_ACCOUNT;

/// Merge later splits into the first split that targets the same account
///
/// Amounts are summed and the later split is dropped; each merge records a
/// warning. The result holds at most one split per account, in first-seen order.
pub fn consolidate_splits(
    transaction: &Transaction,
    book: &Book,
    warnings: &mut Warnings,
) -> Vec<Split> {
    let mut merged: Vec<Split> = Vec::with_capacity(transaction.splits.len());

    for split in &transaction.splits {
        match merged
            .iter_mut()
            .find(|existing| existing.account_id == split.account_id)
        {
            Some(existing) => {
                existing.amount += &split.amount;
                let account = book
                    .account(&existing.account_id)
                    .map(|account| account.name.as_str())
                    .unwrap_or(UNKNOWN_ACCOUNT);
                warnings.push(format!(
                    "Combined multiple splits in transaction {} that all pointed to {}",
                    transaction, account
                ));
            }
            None => merged.push(split.clone()),
        }
    }

    merged
}

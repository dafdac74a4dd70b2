//! Category and split detail for a transaction seen from one account

use bigdecimal::BigDecimal;

use crate::types::{Split, Transaction};
use crate::warnings::Warnings;

use super::{AccountLookup, UNKNOWN_ACCOUNT};

/// What a non-owned leg points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryTarget {
    /// The split's account does not exist
    Unknown,
    /// Category account, by full name
    Category(String),
    /// Transfer to a real account, by plain name
    Transfer(String),
}

impl CategoryTarget {
    fn resolve(split: &Split, lookup: &impl AccountLookup) -> Self {
        match lookup.is_category(&split.account_id) {
            Some(true) => lookup
                .full_name(&split.account_id)
                .map(|name| CategoryTarget::Category(name.to_string()))
                .unwrap_or(CategoryTarget::Unknown),
            Some(false) => lookup
                .name(&split.account_id)
                .map(|name| CategoryTarget::Transfer(name.to_string()))
                .unwrap_or(CategoryTarget::Unknown),
            None => CategoryTarget::Unknown,
        }
    }

    /// QIF label: full name, `[name]` for transfers, or `Unknown`
    pub fn label(&self) -> String {
        match self {
            CategoryTarget::Unknown => UNKNOWN_ACCOUNT.to_string(),
            CategoryTarget::Category(name) => name.clone(),
            CategoryTarget::Transfer(name) => format!("[{}]", name),
        }
    }
}

/// One non-owned leg of a projected transaction
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLine {
    /// Position in the consolidated split list
    pub split_index: usize,
    pub target: CategoryTarget,
    /// Amount as stored on the split
    pub amount: BigDecimal,
    pub memo: Option<String>,
}

impl CategoryLine {
    /// Amount seen from the owning account
    pub fn perspective_amount(&self) -> BigDecimal {
        -self.amount.clone()
    }
}

/// Full detail of a transaction under its primary account
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedTransaction {
    /// Index of the viewing account's own split
    pub own_split: usize,
    pub lines: Vec<CategoryLine>,
    /// More than two splits: each leg is written on its own line
    pub itemized: bool,
    own_memo: Option<String>,
    alternative_memo: Option<String>,
}

impl ProjectedTransaction {
    /// The own split's memo, else the counterpart's memo in a two-split transaction
    pub fn memo(&self) -> Option<&str> {
        self.own_memo
            .as_deref()
            .or(self.alternative_memo.as_deref())
    }
}

/// Build the detail lines for a transaction whose primary account is `viewing_account_id`
///
/// Returns `None` when nothing but the viewing account's own split remains,
/// which happens when a transfer collapses onto one account, or when the
/// viewing account has no split at all. Either way a warning naming the
/// transaction and account is recorded.
pub fn project_primary(
    transaction: &Transaction,
    splits: &[Split],
    viewing_account_id: &str,
    lookup: &impl AccountLookup,
    warnings: &mut Warnings,
) -> Option<ProjectedTransaction> {
    let account = lookup
        .full_name(viewing_account_id)
        .unwrap_or(UNKNOWN_ACCOUNT);
    let Some(own_split) = splits
        .iter()
        .rposition(|split| split.account_id.eq_ignore_ascii_case(viewing_account_id))
    else {
        warnings.push(format!(
            "Ignoring transaction {} with no split in account {}",
            transaction, account
        ));
        return None;
    };
    let itemized = splits.len() > 2;

    let mut lines = Vec::with_capacity(splits.len().saturating_sub(1));
    let mut alternative_memo = None;
    for (index, split) in splits.iter().enumerate() {
        if index == own_split {
            continue;
        }
        let memo = split.memo_text().map(str::to_string);
        if !itemized && memo.is_some() {
            alternative_memo = memo.clone();
        }
        lines.push(CategoryLine {
            split_index: index,
            target: CategoryTarget::resolve(split, lookup),
            amount: split.amount.clone(),
            memo,
        });
    }

    if lines.is_empty() {
        warnings.push(format!(
            "Ignoring transaction to/from same account {}: {}",
            account, transaction
        ));
        return None;
    }

    Some(ProjectedTransaction {
        own_split,
        lines,
        itemized,
        own_memo: splits[own_split].memo_text().map(str::to_string),
        alternative_memo,
    })
}

/// A non-primary account's reference to the anchor account
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedTransaction {
    pub own_split: usize,
    pub anchor_split: usize,
    pub memo: Option<String>,
}

/// Link-only view of a transaction owned by the account at `anchor`
pub fn project_linked(
    splits: &[Split],
    viewing_account_id: &str,
    anchor: usize,
) -> Option<LinkedTransaction> {
    let own_split = splits
        .iter()
        .rposition(|split| split.account_id.eq_ignore_ascii_case(viewing_account_id))?;
    if own_split == anchor || anchor >= splits.len() {
        return None;
    }
    Some(LinkedTransaction {
        own_split,
        anchor_split: anchor,
        memo: splits[own_split].memo_text().map(str::to_string),
    })
}

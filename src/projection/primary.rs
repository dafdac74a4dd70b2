//! Selection of the account that carries a transaction's full detail

use crate::types::Split;

use super::AccountLookup;

/// How a viewing account relates to one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    /// Full detail belongs here; `anchor` is `None` when every split targets a
    /// category account
    Primary { anchor: Option<usize> },
    /// Another account owns the transaction; at most a link is rendered here
    Linked { anchor: usize },
}

impl Perspective {
    pub fn is_primary(&self) -> bool {
        matches!(self, Perspective::Primary { .. })
    }
}

/// Index of the last split whose account exists and is not a category
pub fn find_anchor(splits: &[Split], lookup: &impl AccountLookup) -> Option<usize> {
    splits
        .iter()
        .rposition(|split| lookup.is_category(&split.account_id) == Some(false))
}

/// Decide whether `viewing_account_id` is the transaction's primary perspective
pub fn select_perspective(
    splits: &[Split],
    viewing_account_id: &str,
    lookup: &impl AccountLookup,
) -> Perspective {
    match find_anchor(splits, lookup) {
        Some(anchor) if !splits[anchor].account_id.eq_ignore_ascii_case(viewing_account_id) => {
            Perspective::Linked { anchor }
        }
        anchor => Perspective::Primary { anchor },
    }
}

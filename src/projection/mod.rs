//! Projection of double-entry transactions onto a single account's perspective
//!
//! The pieces here are format-neutral: they decide which account owns a
//! transaction, which legs become category lines, and where the memo and payee
//! come from. The exporters only turn the results into text.

pub mod category;
pub mod consolidate;
pub mod hierarchy;
pub mod memo;
pub mod primary;

pub use category::*;
pub use consolidate::*;
pub use hierarchy::*;
pub use memo::*;
pub use primary::*;

/// Label used for splits whose account cannot be resolved
pub const UNKNOWN_ACCOUNT: &str = "Unknown";

/// Read access to resolved account facts for one target format
pub trait AccountLookup {
    /// Whether the account renders as a category; `None` if it does not exist
    fn is_category(&self, account_id: &str) -> Option<bool>;

    /// Plain (single segment) account name
    fn name(&self, account_id: &str) -> Option<&str>;

    /// Hierarchical name under the format's naming policy
    fn full_name(&self, account_id: &str) -> Option<&str>;
}

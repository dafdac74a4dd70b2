//! Ledger module containing the bookkeeping graph and its builders

pub mod book;
pub mod transaction;

pub use book::*;
pub use transaction::*;

//! Transaction construction helpers

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::types::*;

/// Transaction builder used by parsers and tests to assemble transactions
#[derive(Debug)]
pub struct TransactionBuilder {
    transaction: Transaction,
}

impl TransactionBuilder {
    /// Create a new transaction builder
    pub fn new(id: impl Into<String>, posted: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            transaction: Transaction {
                id: id.into(),
                posted,
                due: None,
                description: description.into(),
                reference: None,
                splits: Vec::new(),
            },
        }
    }

    /// Set the reference for the transaction
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.transaction.reference = Some(reference.into());
        self
    }

    /// Set the due date
    pub fn due(mut self, due: NaiveDate) -> Self {
        self.transaction.due = Some(due);
        self
    }

    /// Add a fully specified split
    pub fn split(mut self, split: Split) -> Self {
        self.transaction.splits.push(split);
        self
    }

    /// Add a plain split moving `amount` into `account_id`
    pub fn transfer(self, account_id: impl Into<String>, amount: BigDecimal) -> Self {
        self.split(Split::new(account_id, amount))
    }

    /// Build the transaction
    pub fn build(self) -> ExportResult<Transaction> {
        if self.transaction.id.trim().is_empty() {
            return Err(ExportError::InvalidInput(
                "Transaction ID cannot be empty".to_string(),
            ));
        }
        if self.transaction.splits.is_empty() {
            return Err(ExportError::InvalidInput(format!(
                "Transaction {} has no splits",
                self.transaction
            )));
        }
        Ok(self.transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_builder_keeps_split_order() {
        let txn = TransactionBuilder::new("t1", date(), "Paycheck")
            .reference("991")
            .due(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap())
            .transfer("checking", BigDecimal::from(1500))
            .split(Split::new("salary", BigDecimal::from(-1500)).with_memo("May"))
            .build()
            .unwrap();

        assert_eq!(txn.reference.as_deref(), Some("991"));
        assert_eq!(txn.splits[0].account_id, "checking");
        assert_eq!(txn.splits[1].memo_text(), Some("May"));
    }

    #[test]
    fn test_builder_rejects_empty_transactions() {
        let result = TransactionBuilder::new("t1", date(), "Nothing").build();
        assert!(matches!(result, Err(ExportError::InvalidInput(_))));

        let result = TransactionBuilder::new("", date(), "No id")
            .transfer("checking", BigDecimal::from(1))
            .build();
        assert!(matches!(result, Err(ExportError::InvalidInput(_))));
    }
}

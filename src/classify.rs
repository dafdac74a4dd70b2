//! Mapping of raw source account-type tags onto target-format vocabularies

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::projection::memo::capitalize_first;
use crate::types::Split;

/// Internal account bucket used by the QIF exporters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountBucket {
    Bank,
    Credit,
    Cash,
    Asset,
    /// Rendered as a category rather than an account
    DoubleEntry,
    DoubleEntryIncome,
    DoubleEntryExpense,
}

impl AccountBucket {
    /// Double-entry buckets become categories in QIF
    pub fn is_double_entry(&self) -> bool {
        matches!(
            self,
            AccountBucket::DoubleEntry
                | AccountBucket::DoubleEntryIncome
                | AccountBucket::DoubleEntryExpense
        )
    }

    /// QIF account type shown for this bucket
    pub fn qif_type(&self) -> QifAccountType {
        match self {
            AccountBucket::Credit => QifAccountType::CreditCard,
            AccountBucket::Cash => QifAccountType::Cash,
            AccountBucket::Asset => QifAccountType::OtherAsset,
            _ => QifAccountType::Bank,
        }
    }
}

/// QIF `!Type:` / `T` account codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QifAccountType {
    Bank,
    CreditCard,
    Investment,
    Cash,
    OtherAsset,
}

impl QifAccountType {
    pub fn code(&self) -> &'static str {
        match self {
            QifAccountType::Bank => "Bank",
            QifAccountType::CreditCard => "CCard",
            QifAccountType::Investment => "Invst",
            QifAccountType::Cash => "Cash",
            QifAccountType::OtherAsset => "Oth A",
        }
    }
}

/// QuickBooks IIF `ACCNTTYPE` codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IifAccountType {
    Bank,
    AccountsReceivable,
    FixedAsset,
    OtherCurrentAsset,
    OtherAsset,
    AccountsPayable,
    CreditCard,
    LongTermLiability,
    OtherCurrentLiability,
    Equity,
    Income,
    Expense,
}

impl IifAccountType {
    pub fn code(&self) -> &'static str {
        match self {
            IifAccountType::Bank => "BANK",
            IifAccountType::AccountsReceivable => "AR",
            IifAccountType::FixedAsset => "FIXASSET",
            IifAccountType::OtherCurrentAsset => "OCASSET",
            IifAccountType::OtherAsset => "OASSET",
            IifAccountType::AccountsPayable => "AP",
            IifAccountType::CreditCard => "CCARD",
            IifAccountType::LongTermLiability => "LTLIAB",
            IifAccountType::OtherCurrentLiability => "OCLIAB",
            IifAccountType::Equity => "EQUITY",
            IifAccountType::Income => "INC",
            IifAccountType::Expense => "EXP",
        }
    }
}

/// Everything the exporters need to know about one raw type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountClassification {
    pub bucket: AccountBucket,
    pub qif_type: QifAccountType,
    /// `None` when the tag has no IIF mapping, which is fatal for IIF exports
    pub iif_type: Option<IifAccountType>,
}

/// Classify a raw type tag, case-insensitively
pub fn classify(type_tag: &str) -> AccountClassification {
    let bucket = qif_bucket(type_tag);
    AccountClassification {
        bucket,
        qif_type: bucket.qif_type(),
        iif_type: iif_account_type(type_tag),
    }
}

/// QIF bucket for a tag; unknown tags are double-entry categories
pub fn qif_bucket(type_tag: &str) -> AccountBucket {
    match type_tag.to_ascii_lowercase().as_str() {
        "bank" | "mutual" | "stock" | "liability" | "receivable" => AccountBucket::Bank,
        "credit" | "payable" => AccountBucket::Credit,
        "cash" | "currency" => AccountBucket::Cash,
        "asset" => AccountBucket::Asset,
        "income" => AccountBucket::DoubleEntryIncome,
        "expense" => AccountBucket::DoubleEntryExpense,
        _ => AccountBucket::DoubleEntry,
    }
}

/// Warning raised when a tag is only approximated by its QIF bucket
pub fn qif_approximation_warning(type_tag: &str) -> Option<String> {
    let tag = type_tag.to_ascii_lowercase();
    let target = match tag.as_str() {
        "liability" | "receivable" | "stock" | "mutual" => "regular bank",
        "payable" => "credit card",
        _ => return None,
    };
    Some(format!(
        "{} accounts are currently imported as {} accounts",
        capitalize_first(&tag),
        target
    ))
}

/// IIF account type for a tag, if the fixed table has one
pub fn iif_account_type(type_tag: &str) -> Option<IifAccountType> {
    let iif_type = match type_tag.to_ascii_lowercase().as_str() {
        "bank" | "savings" => IifAccountType::Bank,
        "receivable" => IifAccountType::AccountsReceivable,
        "asset" => IifAccountType::FixedAsset,
        "cash" | "currency" => IifAccountType::OtherCurrentAsset,
        "stock" | "mutual" | "moneymrkt" => IifAccountType::OtherAsset,
        "payable" => IifAccountType::AccountsPayable,
        "credit" => IifAccountType::CreditCard,
        "liability" => IifAccountType::LongTermLiability,
        "creditline" => IifAccountType::OtherCurrentLiability,
        "equity" => IifAccountType::Equity,
        "income" => IifAccountType::Income,
        "expense" => IifAccountType::Expense,
        _ => return None,
    };
    Some(iif_type)
}

/// In IIF only income and expense accounts act as categories
pub fn is_iif_category(type_tag: &str) -> bool {
    matches!(
        type_tag.to_ascii_lowercase().as_str(),
        "income" | "expense"
    )
}

/// QuickBooks IIF `TRNSTYPE` codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IifTransactionType {
    Check,
    Deposit,
    CreditCardCharge,
    CreditCardCredit,
    Bill,
    BillRefund,
    GeneralJournal,
}

impl IifTransactionType {
    pub fn code(&self) -> &'static str {
        match self {
            IifTransactionType::Check => "CHECK",
            IifTransactionType::Deposit => "DEP",
            IifTransactionType::CreditCardCharge => "CC",
            IifTransactionType::CreditCardCredit => "CC CRED",
            IifTransactionType::Bill => "BILL",
            IifTransactionType::BillRefund => "BILL REFUND",
            IifTransactionType::GeneralJournal => "GENJRNL",
        }
    }
}

/// Transaction type from the primary split and its account's type tag
///
/// Bill payments must be `CC` or `CHECK`; QuickBooks rejects other types for them.
pub fn iif_transaction_type(primary: &Split, account_type_tag: &str) -> IifTransactionType {
    let tag = account_type_tag.to_ascii_lowercase();
    let inflow = primary.amount > BigDecimal::from(0);

    if let Some(action) = &primary.action {
        return if action.eq_ignore_ascii_case("payment") {
            if tag == "credit" {
                IifTransactionType::CreditCardCharge
            } else {
                IifTransactionType::Check
            }
        } else if action.eq_ignore_ascii_case("bill") {
            if inflow {
                IifTransactionType::BillRefund
            } else {
                IifTransactionType::Bill
            }
        } else {
            IifTransactionType::GeneralJournal
        };
    }

    match tag.as_str() {
        "bank" | "savings" if inflow => IifTransactionType::Deposit,
        "bank" | "savings" => IifTransactionType::Check,
        "credit" if inflow => IifTransactionType::CreditCardCharge,
        "credit" => IifTransactionType::CreditCardCredit,
        _ => IifTransactionType::GeneralJournal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qif_buckets() {
        assert_eq!(qif_bucket("bank"), AccountBucket::Bank);
        assert_eq!(qif_bucket("CREDIT"), AccountBucket::Credit);
        assert_eq!(qif_bucket("currency"), AccountBucket::Cash);
        assert_eq!(qif_bucket("Asset"), AccountBucket::Asset);
        assert_eq!(qif_bucket("payable"), AccountBucket::Credit);
        assert_eq!(qif_bucket("stock"), AccountBucket::Bank);
        assert_eq!(qif_bucket("income"), AccountBucket::DoubleEntryIncome);
        assert_eq!(qif_bucket("expense"), AccountBucket::DoubleEntryExpense);
        assert_eq!(qif_bucket("equity"), AccountBucket::DoubleEntry);
        assert_eq!(qif_bucket("something-new"), AccountBucket::DoubleEntry);
    }

    #[test]
    fn test_qif_codes() {
        assert_eq!(classify("bank").qif_type.code(), "Bank");
        assert_eq!(classify("credit").qif_type.code(), "CCard");
        assert_eq!(classify("cash").qif_type.code(), "Cash");
        assert_eq!(classify("asset").qif_type.code(), "Oth A");
        assert_eq!(classify("mystery").qif_type.code(), "Bank");
    }

    #[test]
    fn test_approximation_warnings() {
        for tag in ["liability", "receivable", "stock", "mutual"] {
            let warning = qif_approximation_warning(tag).unwrap();
            assert!(warning.ends_with("imported as regular bank accounts"));
        }
        assert_eq!(
            qif_approximation_warning("PAYABLE").unwrap(),
            "Payable accounts are currently imported as credit card accounts"
        );
        assert!(qif_approximation_warning("bank").is_none());
        assert!(qif_approximation_warning("expense").is_none());
    }

    #[test]
    fn test_iif_table() {
        let expected = [
            ("bank", "BANK"),
            ("savings", "BANK"),
            ("receivable", "AR"),
            ("asset", "FIXASSET"),
            ("cash", "OCASSET"),
            ("currency", "OCASSET"),
            ("stock", "OASSET"),
            ("mutual", "OASSET"),
            ("moneymrkt", "OASSET"),
            ("payable", "AP"),
            ("credit", "CCARD"),
            ("liability", "LTLIAB"),
            ("creditline", "OCLIAB"),
            ("equity", "EQUITY"),
            ("income", "INC"),
            ("expense", "EXP"),
        ];
        for (tag, code) in expected {
            assert_eq!(iif_account_type(tag).map(|t| t.code()), Some(code), "{tag}");
            assert_eq!(
                iif_account_type(&tag.to_uppercase()).map(|t| t.code()),
                Some(code)
            );
        }
        assert!(iif_account_type("root").is_none());
        assert!(classify("trading").iif_type.is_none());
        assert_eq!(classify("trading").bucket, AccountBucket::DoubleEntry);
    }

    #[test]
    fn test_iif_transaction_types() {
        let out = Split::new("a", BigDecimal::from(-20));
        let inflow = Split::new("a", BigDecimal::from(20));

        assert_eq!(iif_transaction_type(&out, "bank"), IifTransactionType::Check);
        assert_eq!(iif_transaction_type(&inflow, "savings"), IifTransactionType::Deposit);
        assert_eq!(
            iif_transaction_type(&inflow, "credit"),
            IifTransactionType::CreditCardCharge
        );
        assert_eq!(
            iif_transaction_type(&out, "credit"),
            IifTransactionType::CreditCardCredit
        );
        assert_eq!(
            iif_transaction_type(&out, "asset"),
            IifTransactionType::GeneralJournal
        );

        let payment = out.clone().with_action("Payment");
        assert_eq!(iif_transaction_type(&payment, "bank"), IifTransactionType::Check);
        assert_eq!(
            iif_transaction_type(&payment, "credit"),
            IifTransactionType::CreditCardCharge
        );

        let bill = out.clone().with_action("Bill");
        assert_eq!(iif_transaction_type(&bill, "payable"), IifTransactionType::Bill);
        let refund = inflow.clone().with_action("bill");
        assert_eq!(
            iif_transaction_type(&refund, "payable"),
            IifTransactionType::BillRefund
        );

        let other = inflow.with_action("Deposit");
        assert_eq!(
            iif_transaction_type(&other, "bank"),
            IifTransactionType::GeneralJournal
        );
        assert_eq!(IifTransactionType::CreditCardCredit.code(), "CC CRED");
    }
}

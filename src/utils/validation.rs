//! Field validation utilities

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::types::*;
use crate::warnings::Warnings;

/// Longest name Quicken imports without truncating
pub const QIF_NAME_LIMIT: usize = 33;

/// Longest description Quicken imports safely
pub const QIF_DESCRIPTION_LIMIT: usize = 64;

/// Kind of QIF list entry a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QifEntryKind {
    Account,
    Category,
}

impl fmt::Display for QifEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QifEntryKind::Account => write!(f, "Account"),
            QifEntryKind::Category => write!(f, "Category"),
        }
    }
}

/// Warn when a name is longer than Quicken keeps
pub fn check_qif_name(kind: QifEntryKind, name: &str, warnings: &mut Warnings) {
    if name.chars().count() > QIF_NAME_LIMIT {
        let truncated: String = name.chars().take(QIF_NAME_LIMIT).collect();
        warnings.push(format!(
            "{} \"{}\" might import as \"{}\" in Quicken",
            kind, name, truncated
        ));
    }
}

/// Warn when a description is long enough to upset the importer
pub fn check_qif_description(
    kind: QifEntryKind,
    name: &str,
    description: &str,
    warnings: &mut Warnings,
) {
    let length = description.chars().count();
    if length > QIF_DESCRIPTION_LIMIT {
        warnings.push(format!(
            "Description of {} \"{}\" is {} characters, which might crash Quicken while importing. Shrink to at most {} characters",
            kind.to_string().to_lowercase(),
            name,
            length,
            QIF_DESCRIPTION_LIMIT
        ));
    }
}

/// Warn about account names Quicken may read as hierarchy or class separators
pub fn check_qif_account_characters(name: &str, warnings: &mut Warnings) {
    if name.contains([':', '/']) {
        warnings.push(format!(
            "Account \"{}\" might not import properly due to : or / in its name",
            name
        ));
    }
}

/// Parse a quantity written as `numerator/denominator` or as a plain decimal
pub fn parse_quantity(text: &str) -> ExportResult<BigDecimal> {
    let text = text.trim();
    let invalid = || ExportError::InvalidAmount(text.to_string());

    match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = BigDecimal::from_str(numerator.trim()).map_err(|_| invalid())?;
            let denominator = BigDecimal::from_str(denominator.trim()).map_err(|_| invalid())?;
            if denominator == BigDecimal::from(0) {
                return Err(invalid());
            }
            Ok(numerator / denominator)
        }
        None => BigDecimal::from_str(text).map_err(|_| invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_names_and_descriptions() {
        let mut warnings = Warnings::new();
        let name = "A very long checking account name here";
        check_qif_name(QifEntryKind::Account, name, &mut warnings);
        check_qif_name(QifEntryKind::Category, "Food", &mut warnings);
        check_qif_description(QifEntryKind::Category, "Food", &"x".repeat(65), &mut warnings);
        check_qif_description(QifEntryKind::Account, "Food", &"x".repeat(64), &mut warnings);

        assert_eq!(
            warnings.into_vec(),
            vec![
                "Account \"A very long checking account name here\" might import as \"A very long checking account name\" in Quicken".to_string(),
                "Description of category \"Food\" is 65 characters, which might crash Quicken while importing. Shrink to at most 64 characters".to_string(),
            ]
        );
    }

    #[test]
    fn test_separator_characters() {
        let mut warnings = Warnings::new();
        check_qif_account_characters("Visa/MC", &mut warnings);
        check_qif_account_characters("Checking", &mut warnings);
        assert_eq!(warnings.len(), 1);
        assert!(warnings.contains("Account \"Visa/MC\" might not import properly due to : or / in its name"));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(
            parse_quantity("12345/100").unwrap(),
            BigDecimal::from_str("123.45").unwrap()
        );
        assert_eq!(parse_quantity("-500/1").unwrap(), BigDecimal::from(-500));
        assert_eq!(parse_quantity(" 7.25 ").unwrap(), BigDecimal::from_str("7.25").unwrap());
        assert!(matches!(parse_quantity("1/0"), Err(ExportError::InvalidAmount(_))));
        assert!(matches!(parse_quantity("abc"), Err(ExportError::InvalidAmount(_))));
    }
}

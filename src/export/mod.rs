//! Target formats and export entry points

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ledger::Book;
use crate::projection::NamingPolicy;
use crate::types::*;
use crate::warnings::Warnings;

pub mod chart;
pub mod format;
pub mod iif;
pub mod qif;

pub use chart::Chart;

/// Target file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Quicken 2003 and earlier: accounts before categories
    #[serde(rename = "qif-2003")]
    Qif2003,
    /// Quicken 2004 and later: categories first, AutoSwitch around transactions
    #[serde(rename = "qif-2004")]
    Qif2004,
    /// QuickBooks Intuit Interchange Format
    #[serde(rename = "iif")]
    Iif,
}

impl OutputFormat {
    pub fn is_qif(&self) -> bool {
        !matches!(self, OutputFormat::Iif)
    }

    /// How far account full names reach up the hierarchy
    pub fn naming_policy(&self) -> NamingPolicy {
        match self {
            OutputFormat::Iif => NamingPolicy::SameTypeOnly,
            _ => NamingPolicy::SkipRootBucket,
        }
    }

    /// Whether non-primary accounts get a link-only copy of a transaction
    pub fn duplicates_transactions(&self) -> bool {
        matches!(self, OutputFormat::Iif)
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Iif => "iif",
            _ => "qif",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Qif2003 => write!(f, "qif-2003"),
            OutputFormat::Qif2004 => write!(f, "qif-2004"),
            OutputFormat::Iif => write!(f, "iif"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    /// Accepts `iif`, a display name such as `qif-2004`, or a Quicken year
    /// (`03`, `99`, `2005`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "iif" => return Ok(OutputFormat::Iif),
            "qif-2003" => return Ok(OutputFormat::Qif2003),
            "qif-2004" => return Ok(OutputFormat::Qif2004),
            _ => {}
        }

        let year: u32 = s
            .parse()
            .map_err(|_| ExportError::InvalidInput(format!("Unknown output format '{}'", s)))?;
        let year = match year {
            0..=69 => year + 2000,
            70..=99 => year + 1900,
            _ => year,
        };
        if year < 1970 {
            return Err(ExportError::InvalidInput(format!(
                "Quicken year {} is out of range",
                year
            )));
        }

        Ok(if year <= 2003 {
            OutputFormat::Qif2003
        } else {
            OutputFormat::Qif2004
        })
    }
}

/// Run configuration supplied alongside the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Leave accounts without transactions out of the QIF account and category lists
    pub prune_unused_accounts: bool,
    /// Derive payee and memo from descriptions such as `"Coffee at Joe's"`
    pub split_memo_from_description: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            prune_unused_accounts: true,
            split_memo_from_description: true,
        }
    }
}

/// Outcome of a successful export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    /// Sorted, deduplicated data-quality warnings
    pub warnings: Vec<String>,
    /// Account and category list entries written
    pub accounts_written: usize,
    /// Transaction records written, link-only copies included
    pub transactions_written: usize,
    /// Transactions dropped because they moved money onto the same account
    pub transactions_skipped: usize,
}

/// Export `book` in `format` to `writer`
///
/// Nothing is written when the book cannot be represented in the format. After
/// an I/O error the partial output is invalid and should be discarded.
pub fn export<W: Write>(
    book: &Book,
    format: OutputFormat,
    options: &ExportOptions,
    mut writer: W,
) -> ExportResult<ExportReport> {
    info!(%format, accounts = book.account_count(), "starting export");

    let mut warnings = Warnings::new();
    let chart = Chart::build(book, format, &mut warnings)?;
    let mut report = ExportReport::default();

    if format.is_qif() {
        qif::write_qif(&chart, options, &mut writer, &mut warnings, &mut report)?;
    } else {
        iif::write_iif(&chart, &mut writer, &mut warnings, &mut report)?;
    }
    writer.flush()?;

    report.warnings = warnings.into_vec();
    info!(
        %format,
        accounts = report.accounts_written,
        transactions = report.transactions_written,
        skipped = report.transactions_skipped,
        warnings = report.warnings.len(),
        "export finished"
    );
    Ok(report)
}

/// Export into an in-memory string
pub fn export_to_string(
    book: &Book,
    format: OutputFormat,
    options: &ExportOptions,
) -> ExportResult<(String, ExportReport)> {
    let mut buffer = Vec::new();
    let report = export(book, format, options, &mut buffer)?;
    let text = String::from_utf8(buffer)
        .map_err(|err| ExportError::InvalidInput(err.to_string()))?;
    Ok((text, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_year() {
        assert_eq!("iif".parse::<OutputFormat>().unwrap(), OutputFormat::Iif);
        assert_eq!("IIF".parse::<OutputFormat>().unwrap(), OutputFormat::Iif);
        assert_eq!("2003".parse::<OutputFormat>().unwrap(), OutputFormat::Qif2003);
        assert_eq!("2004".parse::<OutputFormat>().unwrap(), OutputFormat::Qif2004);
        assert_eq!("03".parse::<OutputFormat>().unwrap(), OutputFormat::Qif2003);
        assert_eq!("5".parse::<OutputFormat>().unwrap(), OutputFormat::Qif2004);
        assert_eq!("99".parse::<OutputFormat>().unwrap(), OutputFormat::Qif2003);
        assert_eq!("70".parse::<OutputFormat>().unwrap(), OutputFormat::Qif2003);
        assert!(matches!(
            "1969".parse::<OutputFormat>(),
            Err(ExportError::InvalidInput(_))
        ));
        assert!("quicken".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_display_round_trips() {
        for format in [OutputFormat::Qif2003, OutputFormat::Qif2004, OutputFormat::Iif] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
        assert_eq!(OutputFormat::Qif2004.file_extension(), "qif");
        assert_eq!(OutputFormat::Iif.file_extension(), "iif");
        assert!(OutputFormat::Iif.duplicates_transactions());
        assert!(!OutputFormat::Qif2004.duplicates_transactions());
    }

    #[test]
    fn test_options_default_on() {
        let options = ExportOptions::default();
        assert!(options.prune_unused_accounts);
        assert!(options.split_memo_from_description);
    }
}

//! Quicken Interchange Format writers (2003 and 2004 layouts)

use std::io::Write;

use tracing::debug;

use crate::classify::AccountBucket;
use crate::projection::{
    extract_payee_memo, project_primary, select_perspective, AccountLookup, Perspective,
    ProjectedTransaction,
};
use crate::types::*;
use crate::utils::{check_qif_account_characters, check_qif_description, check_qif_name, QifEntryKind};
use crate::warnings::Warnings;

use super::format::{format_amount, format_date};
use super::{Chart, ExportOptions, ExportReport, OutputFormat};

/// Write a complete QIF file for the chart's format
pub fn write_qif<W: Write>(
    chart: &Chart<'_>,
    options: &ExportOptions,
    out: &mut W,
    warnings: &mut Warnings,
    report: &mut ExportReport,
) -> ExportResult<()> {
    let modern = chart.format() == OutputFormat::Qif2004;

    if modern {
        write_category_list(chart, options, out, warnings, report)?;
        write_account_list(chart, options, out, warnings, report)?;
        writeln!(out, "!Option:AutoSwitch")?;
    } else {
        writeln!(out)?;
        write_account_list(chart, options, out, warnings, report)?;
        write_category_list(chart, options, out, warnings, report)?;
    }

    for account in chart.accounts() {
        if is_category(chart, &account.id) || !account.is_used() {
            continue;
        }
        write_account_header(chart, account, out)?;
        write_account_transactions(chart, options, account, out, warnings, report)?;
    }
    Ok(())
}

fn is_category(chart: &Chart<'_>, account_id: &str) -> bool {
    chart
        .bucket(account_id)
        .map(|bucket| bucket.is_double_entry())
        .unwrap_or(true)
}

fn type_code(chart: &Chart<'_>, account_id: &str) -> &'static str {
    chart
        .bucket(account_id)
        .unwrap_or(AccountBucket::Bank)
        .qif_type()
        .code()
}

fn listed(account: &Account, options: &ExportOptions) -> bool {
    account.is_used() || !options.prune_unused_accounts
}

fn write_account_list<W: Write>(
    chart: &Chart<'_>,
    options: &ExportOptions,
    out: &mut W,
    warnings: &mut Warnings,
    report: &mut ExportReport,
) -> ExportResult<()> {
    let modern = chart.format() == OutputFormat::Qif2004;
    writeln!(out, "!Option:AutoSwitch")?;
    writeln!(out, "!Account")?;

    for account in chart.accounts() {
        if is_category(chart, &account.id) || !listed(account, options) {
            continue;
        }
        let description = account.description_or("");
        check_qif_name(QifEntryKind::Account, &account.name, warnings);
        check_qif_description(QifEntryKind::Account, &account.name, description, warnings);
        check_qif_account_characters(&account.name, warnings);

        let code = type_code(chart, &account.id);
        writeln!(out, "N{}", account.name)?;
        if modern {
            writeln!(out, "T{}", code)?;
            writeln!(out, "D{}", description)?;
            // Quicken expects a limit on credit cards
            if chart.bucket(&account.id) == Some(AccountBucket::Credit) {
                writeln!(out, "L0.00")?;
            }
        } else {
            writeln!(out, "D{}", description)?;
            writeln!(out, "X")?;
            writeln!(out, "T{}", code)?;
        }
        writeln!(out, "^")?;
        report.accounts_written += 1;
    }

    writeln!(out, "!Clear:AutoSwitch")?;
    Ok(())
}

fn write_category_list<W: Write>(
    chart: &Chart<'_>,
    options: &ExportOptions,
    out: &mut W,
    warnings: &mut Warnings,
    report: &mut ExportReport,
) -> ExportResult<()> {
    writeln!(out, "!Type:Cat")?;

    for account in chart.accounts() {
        if !is_category(chart, &account.id) || !listed(account, options) {
            continue;
        }
        let name = chart.full_name(&account.id).unwrap_or(&account.name);
        let description = account.description_or("");
        check_qif_name(QifEntryKind::Category, name, warnings);
        check_qif_description(QifEntryKind::Category, name, description, warnings);

        writeln!(out, "N{}", name)?;
        writeln!(out, "D{}", description)?;
        match chart.bucket(&account.id) {
            Some(AccountBucket::DoubleEntryIncome) => writeln!(out, "I")?,
            Some(AccountBucket::DoubleEntryExpense) => writeln!(out, "E")?,
            _ => {}
        }
        writeln!(out, "^")?;
        report.accounts_written += 1;
    }
    Ok(())
}

fn write_account_header<W: Write>(chart: &Chart<'_>, account: &Account, out: &mut W) -> ExportResult<()> {
    let code = type_code(chart, &account.id);
    writeln!(out, "!Account")?;
    writeln!(out, "N{}", account.name)?;
    if chart.format() == OutputFormat::Qif2003 {
        writeln!(out, "D")?;
        writeln!(out, "X")?;
    }
    writeln!(out, "T{}", code)?;
    writeln!(out, "^")?;
    writeln!(out, "!Type:{}", code)?;
    Ok(())
}

fn write_account_transactions<W: Write>(
    chart: &Chart<'_>,
    options: &ExportOptions,
    account: &Account,
    out: &mut W,
    warnings: &mut Warnings,
    report: &mut ExportReport,
) -> ExportResult<()> {
    for txn in chart.transactions_of(account) {
        let splits = chart.splits(&txn.id);
        if let Perspective::Linked { anchor } = select_perspective(splits, &account.id, chart) {
            debug!(transaction = %txn.id, account = %account.id, anchor, "not the primary account");
            continue;
        }

        match project_primary(txn, splits, &account.id, chart, warnings) {
            Some(projected) => {
                write_transaction(txn, splits, &projected, options, out)?;
                report.transactions_written += 1;
            }
            None => {
                debug!(transaction = %txn.id, account = %account.id, "skipping same-account transaction");
                report.transactions_skipped += 1;
            }
        }
    }
    Ok(())
}

fn write_transaction<W: Write>(
    txn: &Transaction,
    splits: &[Split],
    projected: &ProjectedTransaction,
    options: &ExportOptions,
    out: &mut W,
) -> ExportResult<()> {
    let own = &splits[projected.own_split];
    let text = extract_payee_memo(
        &txn.description,
        projected.memo(),
        options.split_memo_from_description,
    );
    let amount = format_amount(&own.amount);

    writeln!(out, "D{}", format_date(&txn.posted))?;
    if let Some(reference) = &txn.reference {
        writeln!(out, "N{}", reference)?;
    }
    writeln!(out, "U{}", amount)?;
    writeln!(out, "T{}", amount)?;
    writeln!(out, "P{}", text.payee)?;
    if !text.memo.is_empty() {
        writeln!(out, "M{}", text.memo)?;
    }
    if own.reconcile.is_cleared() {
        writeln!(out, "C*")?;
    }

    if projected.itemized {
        if let Some(first) = projected.lines.first() {
            writeln!(out, "L{}", first.target.label())?;
        }
        for line in &projected.lines {
            writeln!(out, "S{}", line.target.label())?;
            if let Some(memo) = &line.memo {
                writeln!(out, "E{}", memo)?;
            }
            writeln!(out, "${}", format_amount(&line.perspective_amount()))?;
        }
    } else {
        for line in &projected.lines {
            writeln!(out, "L{}", line.target.label())?;
        }
    }

    writeln!(out, "^")?;
    Ok(())
}

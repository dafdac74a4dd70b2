//! QuickBooks Intuit Interchange Format writer

use std::collections::HashMap;
use std::io::{self, Write};

use bigdecimal::BigDecimal;
use tracing::debug;

use crate::classify::{iif_transaction_type, IifTransactionType};
use crate::projection::{
    project_linked, project_primary, select_perspective, AccountLookup, LinkedTransaction,
    Perspective, ProjectedTransaction, UNKNOWN_ACCOUNT,
};
use crate::types::*;
use crate::warnings::Warnings;

use super::format::{format_amount, format_date, sanitize_field};
use super::{Chart, ExportReport};

const ACCOUNT_HEADER: [&str; 6] = ["!ACCNT", "ACCNTTYPE", "ACCNUM", "NAME", "DESC", "BANKNUM"];
const VENDOR_HEADER: [&str; 8] = [
    "!VEND", "NAME", "REFNUM", "COMPANYNAME", "PRINTAS", "ADDR1", "ADDR2", "HIDDEN",
];
const TRANSACTION_HEADER: [&str; 13] = [
    "!TRNS", "TRNSID", "TRNSTYPE", "DATE", "ACCNT", "NAME", "AMOUNT", "DOCNUM", "MEMO", "CLEAR",
    "DUEDATE", "TOPRINT", "PAID",
];
const SPLIT_HEADER: [&str; 10] = [
    "!SPL", "SPLID", "TRNSTYPE", "DATE", "ACCNT", "NAME", "AMOUNT", "DOCNUM", "MEMO", "CLEAR",
];

/// Write one tab-delimited, CRLF-terminated row
fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> io::Result<()> {
    let row: Vec<String> = fields.iter().map(|field| sanitize_field(field)).collect();
    write!(out, "{}\r\n", row.join("\t"))
}

fn flag(set: bool, yes: &'static str, no: &'static str) -> &'static str {
    if set {
        yes
    } else {
        no
    }
}

/// Write accounts, vendors and transactions
pub fn write_iif<W: Write>(
    chart: &Chart<'_>,
    out: &mut W,
    warnings: &mut Warnings,
    report: &mut ExportReport,
) -> ExportResult<()> {
    write_account_list(chart, out, report)?;
    write_vendor_list(chart, out)?;

    write_row(out, &TRANSACTION_HEADER)?;
    write_row(out, &SPLIT_HEADER)?;
    write_row(out, &["!ENDTRNS"])?;

    let mut writer = TransactionWriter {
        chart,
        types: HashMap::new(),
    };
    for account in chart.accounts() {
        writer.write_account(account, out, warnings, report)?;
    }
    Ok(())
}

fn write_account_list<W: Write>(
    chart: &Chart<'_>,
    out: &mut W,
    report: &mut ExportReport,
) -> ExportResult<()> {
    write_row(out, &ACCOUNT_HEADER)?;
    for account in chart.accounts() {
        let full_name = chart.full_name(&account.id).unwrap_or(&account.name);
        // the chart rejects IIF books with unmapped tags
        let Some(iif_type) = chart.iif_type(&account.id) else {
            continue;
        };
        write_row(
            out,
            &[
                "ACCNT",
                iif_type.code(),
                account.code.as_deref().unwrap_or_default(),
                full_name,
                account.description.as_deref().unwrap_or_default(),
                account.notes.as_deref().unwrap_or_default(),
            ],
        )?;
        report.accounts_written += 1;
    }
    Ok(())
}

fn write_vendor_list<W: Write>(chart: &Chart<'_>, out: &mut W) -> ExportResult<()> {
    write_row(out, &VENDOR_HEADER)?;
    for vendor in chart.book().vendors() {
        let company = vendor.address_name.as_deref().unwrap_or_default();
        write_row(
            out,
            &[
                "VEND",
                &vendor.name,
                vendor.id.as_deref().unwrap_or_default(),
                company,
                company,
                vendor.address_line1.as_deref().unwrap_or_default(),
                vendor.address_line2.as_deref().unwrap_or_default(),
                flag(vendor.active, "N", "Y"),
            ],
        )?;
    }
    Ok(())
}

/// Transaction table writer; remembers each transaction's type once chosen
struct TransactionWriter<'c, 'a> {
    chart: &'c Chart<'a>,
    types: HashMap<String, IifTransactionType>,
}

impl<'c, 'a> TransactionWriter<'c, 'a> {
    fn write_account<W: Write>(
        &mut self,
        account: &Account,
        out: &mut W,
        warnings: &mut Warnings,
        report: &mut ExportReport,
    ) -> ExportResult<()> {
        let chart = self.chart;
        for txn in chart.transactions_of(account) {
            let splits = chart.splits(&txn.id);
            match select_perspective(splits, &account.id, chart) {
                Perspective::Primary { anchor } => {
                    match project_primary(txn, splits, &account.id, chart, warnings) {
                        Some(projected) => {
                            let primary = anchor.unwrap_or(projected.own_split);
                            let kind = self.transaction_type(txn, splits, primary);
                            write_primary(chart, account, txn, splits, &projected, kind, out, warnings)?;
                            report.transactions_written += 1;
                        }
                        None => {
                            debug!(transaction = %txn.id, account = %account.id, "skipping same-account transaction");
                            report.transactions_skipped += 1;
                        }
                    }
                }
                Perspective::Linked { anchor } if chart.format().duplicates_transactions() => {
                    if let Some(link) = project_linked(splits, &account.id, anchor) {
                        let kind = self.transaction_type(txn, splits, anchor);
                        write_linked(chart, txn, splits, &link, kind, out)?;
                        report.transactions_written += 1;
                    }
                }
                Perspective::Linked { anchor } => {
                    debug!(transaction = %txn.id, account = %account.id, anchor, "not the primary account");
                }
            }
        }
        Ok(())
    }

    fn transaction_type(
        &mut self,
        txn: &Transaction,
        splits: &[Split],
        primary: usize,
    ) -> IifTransactionType {
        let book = self.chart.book();
        *self.types.entry(txn.id.clone()).or_insert_with(|| {
            let split = &splits[primary];
            let type_tag = book
                .account(&split.account_id)
                .map(|account| account.type_tag.as_str())
                .unwrap_or_default();
            iif_transaction_type(split, type_tag)
        })
    }
}

fn invoice_for<'a>(chart: &Chart<'a>, lot_id: &str) -> Option<&'a Invoice> {
    let book = chart.book();
    book.lot(lot_id)
        .and_then(|lot| lot.invoice_id.as_deref())
        .and_then(|invoice_id| book.invoice(invoice_id))
}

#[allow(clippy::too_many_arguments)]
fn write_primary<W: Write>(
    chart: &Chart<'_>,
    account: &Account,
    txn: &Transaction,
    splits: &[Split],
    projected: &ProjectedTransaction,
    kind: IifTransactionType,
    out: &mut W,
    warnings: &mut Warnings,
) -> ExportResult<()> {
    let book = chart.book();
    let own = &splits[projected.own_split];
    let date = format_date(&txn.posted);
    let due = txn.due.as_ref().map(format_date).unwrap_or_default();
    let paid = own
        .lot_id
        .as_deref()
        .and_then(|lot_id| invoice_for(chart, lot_id))
        .is_some_and(|invoice| invoice.posted.is_some());

    write_row(
        out,
        &[
            "TRNS",
            &txn.id,
            kind.code(),
            &date,
            chart.full_name(&own.account_id).unwrap_or(UNKNOWN_ACCOUNT),
            &txn.description,
            &format_amount(&own.amount),
            txn.reference.as_deref().unwrap_or_default(),
            projected.memo().unwrap_or_default(),
            flag(own.reconcile.is_cleared(), "T", ""),
            &due,
            "N",
            flag(paid, "Y", "N"),
        ],
    )?;

    for line in &projected.lines {
        let split = &splits[line.split_index];
        let mut document = None;
        let mut memo = line.memo.as_deref();

        if let Some(lot_id) = &split.lot_id {
            match invoice_for(chart, lot_id) {
                Some(invoice) => {
                    document = invoice
                        .transaction_id
                        .as_deref()
                        .and_then(|txn_id| book.transaction(txn_id))
                        .and_then(|invoice_txn| invoice_txn.reference.as_deref());
                    memo = memo.or(document);
                }
                None => warnings.push(format!(
                    "Invoice not found in transaction {} in account {}",
                    txn, account.name
                )),
            }
        }

        write_row(
            out,
            &[
                "SPL",
                &(line.split_index + 1).to_string(),
                kind.code(),
                &date,
                chart.full_name(&split.account_id).unwrap_or(UNKNOWN_ACCOUNT),
                "",
                &format_amount(&line.amount),
                document.unwrap_or_default(),
                memo.unwrap_or_default(),
                flag(split.reconcile.is_cleared(), "T", ""),
            ],
        )?;
    }

    write_row(out, &["ENDTRNS"])?;
    Ok(())
}

fn write_linked<W: Write>(
    chart: &Chart<'_>,
    txn: &Transaction,
    splits: &[Split],
    link: &LinkedTransaction,
    kind: IifTransactionType,
    out: &mut W,
) -> ExportResult<()> {
    let own = &splits[link.own_split];
    let anchor = &splits[link.anchor_split];
    let date = format_date(&txn.posted);
    let due = txn.due.as_ref().map(format_date).unwrap_or_default();
    let counter_amount: BigDecimal = -own.amount.clone();

    write_row(
        out,
        &[
            "TRNS",
            &txn.id,
            kind.code(),
            &date,
            chart.full_name(&own.account_id).unwrap_or(UNKNOWN_ACCOUNT),
            &txn.description,
            &format_amount(&own.amount),
            txn.reference.as_deref().unwrap_or_default(),
            link.memo.as_deref().unwrap_or_default(),
            flag(own.reconcile.is_cleared(), "T", ""),
            &due,
            "N",
            "N",
        ],
    )?;
    write_row(
        out,
        &[
            "SPL",
            &(link.anchor_split + 1).to_string(),
            kind.code(),
            &date,
            chart.full_name(&anchor.account_id).unwrap_or(UNKNOWN_ACCOUNT),
            "",
            &format_amount(&counter_amount),
            "",
            "",
            flag(anchor.reconcile.is_cleared(), "T", ""),
        ],
    )?;
    write_row(out, &["ENDTRNS"])?;
    Ok(())
}

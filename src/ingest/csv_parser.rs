//! CSV payroll parser.
//!
//! Turns an uploaded payroll table into an ordered list of
//! [`PayrollRecord`]s. Parsing is all-or-nothing: the first structural
//! problem or unparseable amount aborts the whole batch.

use std::io::Read;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollRecord;

/// The columns a payroll table must carry, in canonical order.
///
/// Discriminants follow [`Column::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// `full_name`
    FullName,
    /// `email`
    Email,
    /// `position`
    Position,
    /// `health_discount_amount`
    HealthDiscount,
    /// `social_discount_amount`
    SocialDiscount,
    /// `taxes_discount_amount`
    TaxesDiscount,
    /// `other_discount_amount`
    OtherDiscount,
    /// `gross_salary`
    GrossSalary,
    /// `gross_payment`
    GrossPayment,
    /// `net_payment`
    NetPayment,
    /// `period`
    Period,
}

impl Column {
    /// Every required column, in canonical order.
    pub const ALL: [Column; 11] = [
        Column::FullName,
        Column::Email,
        Column::Position,
        Column::HealthDiscount,
        Column::SocialDiscount,
        Column::TaxesDiscount,
        Column::OtherDiscount,
        Column::GrossSalary,
        Column::GrossPayment,
        Column::NetPayment,
        Column::Period,
    ];

    /// The header name, lower-case.
    pub fn name(self) -> &'static str {
        match self {
            Column::FullName => "full_name",
            Column::Email => "email",
            Column::Position => "position",
            Column::HealthDiscount => "health_discount_amount",
            Column::SocialDiscount => "social_discount_amount",
            Column::TaxesDiscount => "taxes_discount_amount",
            Column::OtherDiscount => "other_discount_amount",
            Column::GrossSalary => "gross_salary",
            Column::GrossPayment => "gross_payment",
            Column::NetPayment => "net_payment",
            Column::Period => "period",
        }
    }

    fn is_discount(self) -> bool {
        matches!(
            self,
            Column::HealthDiscount
                | Column::SocialDiscount
                | Column::TaxesDiscount
                | Column::OtherDiscount
        )
    }
}

/// Position of each required column within the uploaded header.
#[derive(Debug, Clone)]
struct HeaderIndex {
    positions: [usize; Column::ALL.len()],
}

impl HeaderIndex {
    /// Matches required columns against `headers`, ignoring case.
    fn from_headers(headers: &StringRecord) -> EngineResult<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut positions = [0usize; Column::ALL.len()];
        let mut missing = Vec::new();

        for column in Column::ALL {
            match normalized.iter().position(|h| h == column.name()) {
                Some(idx) => positions[column as usize] = idx,
                None => missing.push(column.name().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(EngineError::MissingColumns { columns: missing });
        }

        Ok(Self { positions })
    }

    fn cell<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        record.get(self.positions[column as usize]).unwrap_or("").trim()
    }
}

/// Parses a payroll table with a header row into records.
///
/// # Rules
///
/// - header names are matched case-insensitively; extra columns are ignored
/// - every cell is trimmed
/// - blank monetary cells become zero; anything else must be a decimal
/// - discount amounts must not be negative
/// - output order equals input row order; duplicates are kept
///
/// # Errors
///
/// - [`EngineError::MissingColumns`] if the header lacks a required column
/// - [`EngineError::InvalidRecord`] for the first unusable amount
/// - [`EngineError::MalformedInput`] for ragged rows or invalid UTF-8
///
/// # Example
///
/// ```
/// use paystub_engine::ingest::parse_records;
///
/// let csv = "full_name,email,position,health_discount_amount,social_discount_amount,\
/// taxes_discount_amount,other_discount_amount,gross_salary,gross_payment,net_payment,period\n\
/// John Doe,john@x.com,Engineer,,,,,5000,5000,5000,2024-01\n";
///
/// let records = parse_records(csv.as_bytes()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert!(records[0].health_discount_amount.is_zero());
/// ```
pub fn parse_records<R: Read>(reader: R) -> EngineResult<Vec<PayrollRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(malformed)?.clone();
    let index = HeaderIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(malformed)?;
        records.push(parse_row(&index, &raw, row)?);
    }

    debug!(rows = records.len(), "Parsed payroll table");
    Ok(records)
}

fn parse_row(index: &HeaderIndex, raw: &StringRecord, row: usize) -> EngineResult<PayrollRecord> {
    let text = |column: Column| index.cell(raw, column).to_string();
    let amount = |column: Column| parse_amount(index.cell(raw, column), column, row);

    let record = PayrollRecord {
        full_name: text(Column::FullName),
        email: text(Column::Email),
        position: text(Column::Position),
        health_discount_amount: amount(Column::HealthDiscount)?,
        social_discount_amount: amount(Column::SocialDiscount)?,
        taxes_discount_amount: amount(Column::TaxesDiscount)?,
        other_discount_amount: amount(Column::OtherDiscount)?,
        gross_salary: amount(Column::GrossSalary)?,
        gross_payment: amount(Column::GrossPayment)?,
        net_payment: amount(Column::NetPayment)?,
        period: text(Column::Period),
    };

    if record.checked_total_discounts().is_none() {
        return Err(EngineError::InvalidRecord {
            row,
            field: Column::OtherDiscount.name().to_string(),
            message: "sum of discount amounts is out of range".to_string(),
        });
    }

    Ok(record)
}

/// Parses one monetary cell. Blank means zero.
fn parse_amount(cell: &str, column: Column, row: usize) -> EngineResult<Decimal> {
    if cell.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let value = Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .map_err(|_| EngineError::InvalidRecord {
            row,
            field: column.name().to_string(),
            message: format!("'{}' is not a decimal number", cell),
        })?;

    if column.is_discount() && value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidRecord {
            row,
            field: column.name().to_string(),
            message: format!("discount amount {} must not be negative", value),
        });
    }

    Ok(value)
}

fn malformed(err: csv::Error) -> EngineError {
    EngineError::MalformedInput {
        message: err.to_string(),
    }
}

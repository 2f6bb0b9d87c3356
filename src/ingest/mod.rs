//! Payroll table ingestion.
//!
//! This module turns an uploaded CSV byte stream into validated
//! [`PayrollRecord`](crate::models::PayrollRecord)s.

mod csv_parser;

pub use csv_parser::{Column, parse_records};

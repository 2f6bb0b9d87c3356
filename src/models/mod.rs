//! Core data models for the paystub engine.
//!
//! This module contains the domain models that flow through the batch
//! pipeline.

mod dispatch_result;
mod locale;
mod payroll_record;

pub use dispatch_result::DispatchResult;
pub use locale::{Country, LocaleSelection};
pub use payroll_record::PayrollRecord;

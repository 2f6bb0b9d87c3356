//! Payroll batch pipeline.
//!
//! `parse → resolve asset → (render → dispatch) per record → manifest`.
//! Records are processed strictly in input order and the first failure
//! ends the batch.

mod batch;

pub use batch::{BatchProcessor, BatchRequest, dispatch_record};

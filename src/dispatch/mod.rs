//! Paystub delivery.
//!
//! The pipeline hands every rendered document to a [`DispatchSink`] exactly
//! once. Sinks own any transport concerns such as retries or timeouts.

mod email;
mod outbox;

use crate::error::EngineResult;
use crate::models::{LocaleSelection, PayrollRecord};

pub use email::{PaystubEmail, attachment_name};
pub use outbox::{OutboxEnvelope, OutboxSink};

/// Delivers one rendered paystub to one recipient.
pub trait DispatchSink {
    /// Sends `document` to `record.email` on behalf of `entity`.
    ///
    /// # Errors
    ///
    /// Any failure aborts the rest of the batch.
    fn send(
        &self,
        record: &PayrollRecord,
        entity: &str,
        document: &[u8],
        locale: LocaleSelection,
    ) -> EngineResult<()>;
}

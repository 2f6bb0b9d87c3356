//! Outbox dispatch sink.
//!
//! Writes each composed email to a directory instead of a mail server: the
//! PDF attachment as `<stem>.pdf` and the envelope as `<stem>.json`. A
//! separate relay process can pick the pairs up and deliver them.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{LocaleSelection, PayrollRecord};

use super::DispatchSink;
use super::email::PaystubEmail;

/// Envelope stored next to each outbox attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEnvelope {
    /// The composed email.
    #[serde(flatten)]
    pub email: PaystubEmail,
    /// File name of the PDF next to this envelope.
    pub attachment_file: String,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
}

/// A [`DispatchSink`] that drops emails into a directory.
#[derive(Debug, Clone)]
pub struct OutboxSink {
    dir: PathBuf,
    from: String,
}

impl OutboxSink {
    /// Creates a sink writing into `dir`, sending as `from`.
    ///
    /// The directory is created on first use.
    pub fn new<P: AsRef<Path>>(dir: P, from: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            from: from.into(),
        }
    }

    /// The outbox directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, path: &Path, contents: &[u8], recipient: &str) -> EngineResult<()> {
        fs::write(path, contents).map_err(|e| EngineError::DispatchFailed {
            recipient: recipient.to_string(),
            message: format!("cannot write {}: {}", path.display(), e),
        })
    }
}

/// Makes `name` safe as a single file-name component inside the outbox.
///
/// Path separators, NUL and other control characters become `_`. The
/// result is always prefixed by the timestamp and id, so `.` and `..`
/// cannot stand alone.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

impl DispatchSink for OutboxSink {
    fn send(
        &self,
        record: &PayrollRecord,
        entity: &str,
        document: &[u8],
        locale: LocaleSelection,
    ) -> EngineResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| EngineError::DispatchFailed {
            recipient: record.email.clone(),
            message: format!("cannot create outbox {}: {}", self.dir.display(), e),
        })?;

        let email = PaystubEmail::compose(&self.from, record, entity, locale);
        let created_at = Utc::now();
        let stem = format!(
            "{}-{}-{}",
            created_at.format("%Y%m%dT%H%M%S%.3fZ"),
            Uuid::new_v4().simple(),
            file_stem(email.attachment_name.trim_end_matches(".pdf"))
        );

        let pdf_path = self.dir.join(format!("{}.pdf", stem));
        self.write(&pdf_path, document, &record.email)?;

        let envelope = OutboxEnvelope {
            email,
            attachment_file: format!("{}.pdf", stem),
            created_at,
        };
        let json = serde_json::to_vec_pretty(&envelope).map_err(|e| EngineError::DispatchFailed {
            recipient: record.email.clone(),
            message: e.to_string(),
        })?;
        self.write(&self.dir.join(format!("{}.json", stem)), &json, &record.email)?;

        info!(
            recipient = %record.email,
            attachment = %envelope.email.attachment_name,
            "Paystub queued in outbox"
        );
        Ok(())
    }
}

//! Batch orchestration: parse, resolve the asset once, then render and
//! dispatch every record in input order.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assets::{AssetSource, BrandingAsset};
use crate::dispatch::DispatchSink;
use crate::error::EngineResult;
use crate::ingest::parse_records;
use crate::models::{DispatchResult, LocaleSelection, PayrollRecord};
use crate::render::{DocumentRenderer, LabelSet, labels};

/// One batch of paystubs to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    /// Locale for every document and email in the batch.
    pub locale: LocaleSelection,
    /// Issuing company; also the logo lookup key.
    pub entity: String,
    /// Raw CSV input, header row first.
    pub csv: Vec<u8>,
}

impl BatchRequest {
    /// Creates a batch request.
    pub fn new(locale: LocaleSelection, entity: impl Into<String>, csv: impl Into<Vec<u8>>) -> Self {
        Self {
            locale,
            entity: entity.into(),
            csv: csv.into(),
        }
    }
}

/// Renders and dispatches a single record.
///
/// Returns the manifest entry once the sink has accepted the document.
///
/// # Errors
///
/// Propagates the renderer's or the sink's error unchanged.
pub fn dispatch_record<R, D>(
    renderer: &R,
    sink: &D,
    record: &PayrollRecord,
    entity: &str,
    asset: Option<&BrandingAsset>,
    labels: &LabelSet,
) -> EngineResult<DispatchResult>
where
    R: DocumentRenderer + ?Sized,
    D: DispatchSink + ?Sized,
{
    let document = renderer.render(record, entity, asset, labels)?;
    debug!(
        recipient = %record.email,
        bytes = document.len(),
        "Paystub rendered"
    );

    sink.send(record, entity, &document, labels.locale())?;
    Ok(DispatchResult::for_record(record, Utc::now()))
}

/// Runs paystub batches against an asset source, a renderer and a sink.
///
/// # Example
///
/// ```no_run
/// use paystub_engine::assets::AssetResolver;
/// use paystub_engine::dispatch::OutboxSink;
/// use paystub_engine::models::LocaleSelection;
/// use paystub_engine::pipeline::{BatchProcessor, BatchRequest};
/// use paystub_engine::render::PdfRenderer;
///
/// let processor = BatchProcessor::new(
///     AssetResolver::new("./logos"),
///     PdfRenderer::new(),
///     OutboxSink::new("./outbox", "payroll@example.com"),
/// );
/// let csv = std::fs::read("payroll.csv")?;
/// let manifest = processor.process(BatchRequest::new(LocaleSelection::English, "Acme", csv))?;
/// println!("sent {} paystubs", manifest.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct BatchProcessor<A, R, D> {
    assets: A,
    renderer: R,
    sink: D,
}

impl<A, R, D> BatchProcessor<A, R, D>
where
    A: AssetSource,
    R: DocumentRenderer,
    D: DispatchSink,
{
    /// Creates a processor from its three collaborators.
    pub fn new(assets: A, renderer: R, sink: D) -> Self {
        Self {
            assets,
            renderer,
            sink,
        }
    }

    /// The asset source.
    pub fn assets(&self) -> &A {
        &self.assets
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The dispatch sink.
    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Processes one batch and returns the delivery manifest.
    ///
    /// Manifest entry `i` corresponds to data row `i`. The first failure
    /// stops the batch; documents already dispatched stay dispatched.
    ///
    /// # Errors
    ///
    /// Returns the parse, asset, render or dispatch error that stopped
    /// the batch.
    pub fn process(&self, request: BatchRequest) -> EngineResult<Vec<DispatchResult>> {
        let batch_id = Uuid::new_v4();
        let start_time = Instant::now();
        info!(
            batch_id = %batch_id,
            entity = %request.entity,
            locale = %request.locale,
            "Processing payroll batch"
        );

        let records = parse_records(request.csv.as_slice()).inspect_err(|err| {
            warn!(batch_id = %batch_id, error = %err, "Payroll input rejected");
        })?;
        debug!(batch_id = %batch_id, records = records.len(), "Payroll input parsed");

        let asset = self.assets.resolve(&request.entity).inspect_err(|err| {
            warn!(batch_id = %batch_id, error = %err, "Branding asset unavailable");
        })?;
        debug!(
            batch_id = %batch_id,
            tier = ?asset.as_ref().map(BrandingAsset::tier),
            "Branding asset resolved"
        );

        let labels = labels(request.locale);
        let mut manifest = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let row = index + 1;
            let entry = dispatch_record(
                &self.renderer,
                &self.sink,
                record,
                &request.entity,
                asset.as_ref(),
                &labels,
            )
            .inspect_err(|err| {
                warn!(
                    batch_id = %batch_id,
                    row,
                    recipient = %record.email,
                    sent = manifest.len(),
                    error = %err,
                    "Batch aborted"
                );
            })?;
            info!(batch_id = %batch_id, row, recipient = %entry.email, "Paystub dispatched");
            manifest.push(entry);
        }

        info!(
            batch_id = %batch_id,
            sent = manifest.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Payroll batch completed"
        );
        Ok(manifest)
    }
}

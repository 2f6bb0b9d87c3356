//! Application state for the paystub API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::assets::AssetResolver;
use crate::config::ConfigLoader;
use crate::dispatch::OutboxSink;
use crate::pipeline::BatchProcessor;
use crate::render::PdfRenderer;

/// The batch processor the service runs.
pub type PaystubProcessor = BatchProcessor<AssetResolver, PdfRenderer, OutboxSink>;

/// Shared application state.
///
/// Holds the loaded configuration and the batch processor built from it.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    processor: Arc<PaystubProcessor>,
}

impl AppState {
    /// Creates the state, wiring the processor from the configuration.
    pub fn new(config: ConfigLoader) -> Self {
        let mail = &config.config().mail;
        let processor = BatchProcessor::new(
            config.asset_resolver(),
            PdfRenderer::new(),
            OutboxSink::new(&mail.outbox_dir, mail.from.clone()),
        );
        Self::with_processor(config, processor)
    }

    /// Creates the state around an explicitly built processor.
    pub fn with_processor(config: ConfigLoader, processor: PaystubProcessor) -> Self {
        Self {
            config: Arc::new(config),
            processor: Arc::new(processor),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a shared handle to the processor, for use off the async
    /// runtime.
    pub fn processor(&self) -> Arc<PaystubProcessor> {
        Arc::clone(&self.processor)
    }
}

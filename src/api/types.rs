//! Shared state for the HTTP layer.

use std::sync::Arc;

use crate::diagnosis::TextGenerate;
use crate::export::PdfEngine;
use crate::store::RecordStore;

/// Shared context for all routes. Generic over the text generator so
/// router tests can substitute a scripted one.
pub struct ApiContext<G: TextGenerate> {
    /// The dataset, immutable after load.
    pub store: Arc<RecordStore>,
    /// External HTML → PDF renderer.
    pub pdf: PdfEngine,
    /// Present only when the AI-assisted variant is configured.
    pub generator: Option<Arc<G>>,
}

impl<G: TextGenerate> ApiContext<G> {
    pub fn new(store: Arc<RecordStore>, pdf: PdfEngine, generator: Option<Arc<G>>) -> Self {
        Self {
            store,
            pdf,
            generator,
        }
    }
}

// Manual impl: `G` itself need not be `Clone`, it is always behind `Arc`.
impl<G: TextGenerate> Clone for ApiContext<G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            pdf: self.pdf.clone(),
            generator: self.generator.clone(),
        }
    }
}

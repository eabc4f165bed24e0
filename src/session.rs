//! Per-run viewer state.
//!
//! Holds what the page keeps between events: the loaded document, the
//! viewport, the shared canvas, the page navigator and the extraction
//! request counter. Async results come back through [`Session`] with the
//! ticket they were issued under and are applied only if still current.

use tracing::{debug, error};

use crate::error::Result;
use crate::navigator::{PageNavigator, RenderTicket};
use crate::preview::{Canvas, Document, RenderedFrame, Viewport};

/// Identifies one extraction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionTicket(pub u64);

pub struct Session {
    pub viewport: Viewport,
    pub canvas: Canvas,
    navigator: PageNavigator,
    document: Option<Document>,
    extraction_seq: u64,
}

impl Session {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            canvas: Canvas::new(),
            navigator: PageNavigator::new(),
            document: None,
            extraction_seq: 0,
        }
    }

    /// Replace the document and request its first page.
    pub fn load_document(&mut self, document: Document) -> RenderTicket {
        let ticket = self.navigator.load(document.page_count());
        self.document = Some(document);
        ticket
    }

    /// Drop the document and blank the canvas. Outstanding renders go stale.
    pub fn clear_document(&mut self) {
        self.document = None;
        self.navigator.clear();
        self.canvas = Canvas::new();
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut PageNavigator {
        &mut self.navigator
    }

    /// Apply a finished render. Returns `true` when it reached the canvas.
    ///
    /// Stale tickets are dropped. A failed render is logged and blanks the
    /// canvas, so no other page's pixels stay on show.
    pub fn complete_render(&mut self, ticket: RenderTicket, result: Result<RenderedFrame>) -> bool {
        if !self.navigator.is_current(ticket) {
            debug!(page = ticket.page, generation = ticket.generation, "discarding stale render");
            return false;
        }
        match result {
            Ok(frame) => {
                self.viewport.fit_canvas(frame.image.height());
                self.canvas.draw(frame);
                true
            }
            Err(e) => {
                error!(page = ticket.page, "Error rendering page: {e}");
                self.canvas = Canvas::new();
                false
            }
        }
    }

    /// Issue a ticket for a new extraction, superseding any in flight.
    pub fn begin_extraction(&mut self) -> ExtractionTicket {
        self.extraction_seq += 1;
        ExtractionTicket(self.extraction_seq)
    }

    pub fn is_latest_extraction(&self, ticket: ExtractionTicket) -> bool {
        ticket.0 == self.extraction_seq
    }
}

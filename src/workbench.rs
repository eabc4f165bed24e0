//! The client, wired together.
//!
//! [`Workbench`] owns the session state and routes user actions to the
//! components: intake fans files out to upload and preview, navigation
//! re-renders through tickets, pointer input feeds the selection
//! coordinator, and extraction hands its result to the table presenter.
//!
//! Failures stop here. Upload and render errors are logged; extraction
//! failures are logged and alerted through the [`Notifier`].

use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::backend::TableBackend;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::{ExtractResponse, ExtractionRequest, FALLBACK_MESSAGE};
use crate::intake::{DragEvent, FileIntake, IntakeFile, IntakePlan};
use crate::navigator::RenderTicket;
use crate::notify::Notifier;
use crate::preview::{PreviewRenderer, Viewport};
use crate::selection::{Point, Selection, SelectionCoordinator, SelectionMode, ViewportBounds};
use crate::session::{ExtractionTicket, Session};
use crate::table::{SpreadsheetWriter, TablePresenter};

/// Alert shown when extraction is requested before anything is selected.
pub const NO_SELECTION_MESSAGE: &str = "Select an area of the document first";

/// What happened to a batch of files handed to the intake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenReport {
    pub uploaded: usize,
    pub failed_uploads: usize,
    /// Whether the first file reached the canvas.
    pub previewed: bool,
}

/// Result of one extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// A table is now on display.
    Presented { rows: usize, columns: usize },
    /// The backend answered but reported failure.
    Declined(String),
    /// The request could not be made or its answer not used.
    Failed(String),
    /// A newer extraction superseded this one.
    Stale,
}

pub struct Workbench {
    config: Config,
    backend: Arc<dyn TableBackend>,
    notifier: Arc<dyn Notifier>,
    intake: FileIntake,
    session: Session,
    selection: SelectionCoordinator,
    tables: TablePresenter,
}

impl Workbench {
    pub fn new(config: Config, backend: Arc<dyn TableBackend>, notifier: Arc<dyn Notifier>) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        Self {
            config,
            backend,
            notifier,
            intake: FileIntake::new(),
            session: Session::new(viewport),
            selection: SelectionCoordinator::new(),
            tables: TablePresenter::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn intake(&self) -> &FileIntake {
        &self.intake
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selection(&self) -> &SelectionCoordinator {
        &self.selection
    }

    pub fn tables(&self) -> &TablePresenter {
        &self.tables
    }

    // ─── Intake ──────────────────────────────────────────────────────────────

    /// Feed a drag event to the drop zone.
    pub async fn drag(&mut self, event: DragEvent) -> Option<OpenReport> {
        let plan = self.intake.drag(event)?;
        Some(self.run_plan(plan).await)
    }

    /// Files chosen through the picker.
    pub async fn open(&mut self, files: Vec<IntakeFile>) -> Option<OpenReport> {
        let plan = self.intake.accept(files)?;
        Some(self.run_plan(plan).await)
    }

    /// Upload every file while the first one previews.
    async fn run_plan(&mut self, plan: IntakePlan) -> OpenReport {
        let uploads = upload_all(Arc::clone(&self.backend), plan.uploads);
        let ((uploaded, failed_uploads), previewed) = tokio::join!(uploads, self.preview(&plan.preview));
        OpenReport {
            uploaded,
            failed_uploads,
            previewed,
        }
    }

    /// Show `file` on the canvas from its first page.
    ///
    /// Unsupported media leaves the canvas untouched; a file that fails to
    /// decode unloads the previous document. Returns `true` when a page
    /// was drawn.
    pub async fn preview(&mut self, file: &IntakeFile) -> bool {
        match PreviewRenderer::open(file).await {
            Ok(Some(document)) => {
                self.session.viewport.active = true;
                let ticket = self.session.load_document(document);
                self.render(ticket).await
            }
            Ok(None) => false,
            Err(e) => {
                error!(name = %file.name, "Error displaying document: {e}");
                self.session.clear_document();
                false
            }
        }
    }

    // ─── Navigation ──────────────────────────────────────────────────────────

    pub async fn next_page(&mut self) -> bool {
        match self.session.navigator_mut().next() {
            Some(ticket) => self.render(ticket).await,
            None => false,
        }
    }

    pub async fn previous_page(&mut self) -> bool {
        match self.session.navigator_mut().previous() {
            Some(ticket) => self.render(ticket).await,
            None => false,
        }
    }

    pub async fn go_to_page(&mut self, page: usize) -> bool {
        match self.session.navigator_mut().go_to(page) {
            Some(ticket) => self.render(ticket).await,
            None => false,
        }
    }

    async fn render(&mut self, ticket: RenderTicket) -> bool {
        let Some(document) = self.session.document().cloned() else {
            return false;
        };
        let container_width = self.session.viewport.container_width();
        let result = PreviewRenderer::render(document, ticket.page, container_width).await;
        self.session.complete_render(ticket, result)
    }

    // ─── Selection ───────────────────────────────────────────────────────────

    pub fn toggle_selection(&mut self) -> SelectionMode {
        self.selection.toggle()
    }

    pub fn pointer_down(&mut self, pointer: Point, viewport: ViewportBounds) {
        self.selection.pointer_down(pointer, viewport);
    }

    pub fn pointer_move(&mut self, pointer: Point, viewport: ViewportBounds) {
        self.selection.pointer_move(pointer, viewport);
    }

    /// Commit the drag against the page currently shown.
    pub fn pointer_up(&mut self) -> Option<Selection> {
        let page = self.session.navigator().current_page();
        self.selection.pointer_up(page)
    }

    // ─── Extraction ──────────────────────────────────────────────────────────

    /// Send the committed selection and the canvas to the backend.
    pub async fn extract(&mut self) -> ExtractOutcome {
        let selection = self.selection.current_rectangle();
        if let Some(selection) = selection {
            let page = self.session.navigator().current_page();
            if selection.page != page {
                warn!(selection_page = selection.page, page, "selection was drawn on another page");
            }
        }

        let offset = (self.config.canvas_offset_x, self.config.canvas_offset_y);
        let request = match ExtractionRequest::prepare(
            &self.session.canvas,
            selection,
            offset,
            self.config.jpeg_quality,
        ) {
            Ok(request) => request,
            Err(Error::NoSelection) => return self.fail(NO_SELECTION_MESSAGE),
            Err(e) => {
                error!("Error preparing extraction: {e}");
                return self.fail(FALLBACK_MESSAGE);
            }
        };

        let ticket = self.session.begin_extraction();
        let result = self.backend.extract_table(request).await;
        self.finish_extraction(ticket, result)
    }

    /// Apply an extraction response issued under `ticket`.
    pub fn finish_extraction(
        &mut self,
        ticket: ExtractionTicket,
        result: Result<ExtractResponse>,
    ) -> ExtractOutcome {
        if !self.session.is_latest_extraction(ticket) {
            debug!(ticket = ticket.0, "discarding stale extraction response");
            return ExtractOutcome::Stale;
        }

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!("Error: {e}");
                return self.fail(FALLBACK_MESSAGE);
            }
        };

        match response.into_markup() {
            Ok(markup) => match self.tables.present(&markup) {
                Ok(table) => {
                    let (rows, columns) = (table.row_count(), table.column_count());
                    info!(rows, columns, "table extracted");
                    ExtractOutcome::Presented { rows, columns }
                }
                Err(e) => {
                    error!("Error presenting table: {e}");
                    self.fail(FALLBACK_MESSAGE)
                }
            },
            Err(message) => {
                self.notifier.alert(&message);
                ExtractOutcome::Declined(message)
            }
        }
    }

    fn fail(&self, message: &str) -> ExtractOutcome {
        self.notifier.alert(message);
        ExtractOutcome::Failed(message.to_string())
    }

    // ─── Export ──────────────────────────────────────────────────────────────

    /// Export the table on display.
    pub fn export(&self, writer: &dyn SpreadsheetWriter, path: &Path) -> Result<()> {
        self.tables.export(writer, path)
    }
}

/// Upload files concurrently. Failures are logged, never surfaced.
async fn upload_all(backend: Arc<dyn TableBackend>, files: Vec<IntakeFile>) -> (usize, usize) {
    let results = join_all(files.iter().map(|file| backend.upload(file))).await;

    let mut uploaded = 0;
    let mut failed = 0;
    for (file, result) in files.iter().zip(results) {
        match result {
            Ok(receipt) => {
                debug!(name = %file.name, ?receipt, "Success");
                uploaded += 1;
            }
            Err(e) => {
                error!(name = %file.name, "Error: {e}");
                failed += 1;
            }
        }
    }
    (uploaded, failed)
}

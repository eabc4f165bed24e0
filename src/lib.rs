//! `tablesnap` - Region-based table extraction client
//!
//! # Features
//!
//! - **Preview**: PDF pages (pdfium, `pdf` feature) and images rendered fit-to-width
//! - **Selection**: pointer-driven rectangle selection with an explicit state machine
//! - **Extraction**: canvas snapshot + region posted to a table-extraction service
//! - **Export**: the returned table as Markdown or a one-sheet `.xlsx` workbook
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tablesnap::{
//!     Config, HttpBackend, IntakeFile, Point, TerminalNotifier, ViewportBounds, Workbench,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let backend = Arc::new(HttpBackend::new(&config)?);
//!     let mut bench = Workbench::new(config, backend, Arc::new(TerminalNotifier));
//!
//!     let file = IntakeFile::from_path("invoice.png".as_ref(), None).await?;
//!     bench.open(vec![file]).await;
//!
//!     let viewport = ViewportBounds::new(0.0, 0.0, 1000.0, 1000.0);
//!     bench.toggle_selection();
//!     bench.pointer_down(Point::new(10.0, 10.0), viewport);
//!     bench.pointer_move(Point::new(400.0, 300.0), viewport);
//!     bench.pointer_up();
//!
//!     bench.extract().await;
//!     if let Some(table) = bench.tables().current() {
//!         println!("{}", table.to_markdown());
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod extract;
pub mod intake;
pub mod navigator;
pub mod notify;
pub mod preview;
pub mod selection;
pub mod session;
pub mod table;
pub mod workbench;

pub use backend::{HttpBackend, TableBackend, UploadReceipt};
pub use config::Config;
pub use error::{Error, Result};
pub use extract::{ExtractResponse, ExtractionRequest, SelectionPayload, FALLBACK_MESSAGE};
pub use intake::{DragEvent, FileIntake, IntakeFile, IntakePlan};
pub use navigator::{PageNavigator, RenderTicket};
pub use notify::{Notifier, TerminalNotifier};
pub use preview::{Canvas, Document, PreviewRenderer, Rasterizer, RenderedFrame, Viewport};
pub use selection::{
    Point, Rect, Selection, SelectionCoordinator, SelectionMode, SelectionState, ViewportBounds,
};
pub use session::{ExtractionTicket, Session};
pub use table::{ExtractedTable, SpreadsheetWriter, TablePresenter, XlsxWriter};
pub use workbench::{ExtractOutcome, OpenReport, Workbench};

/// Version of tablesnap
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

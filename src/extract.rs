//! Extraction request and response shapes.
//!
//! The backend takes a JPEG of the canvas plus the selected region in
//! canvas pixels, and answers with `{success, tables?, error?}`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::preview::Canvas;
use crate::selection::Selection;

/// Shown when the backend gives no reason, or could not be reached.
pub const FALLBACK_MESSAGE: &str = "Failed to extract table";

/// File name the canvas snapshot is uploaded under.
pub const SNAPSHOT_FILE_NAME: &str = "preview.jpg";

/// The `selection` form field, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPayload {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SelectionPayload {
    /// Map a viewport-local selection onto the canvas.
    ///
    /// `canvas_offset` is where the canvas's top-left sits in the viewport.
    /// The result is clipped to the canvas.
    pub fn from_selection(selection: Selection, canvas_offset: (u32, u32), canvas_size: (u32, u32)) -> Self {
        let (offset_x, offset_y) = canvas_offset;
        let (canvas_width, canvas_height) = canvas_size;

        let left = selection.x.saturating_sub(offset_x).min(canvas_width);
        let top = selection.y.saturating_sub(offset_y).min(canvas_height);
        let right = selection
            .x
            .saturating_add(selection.width)
            .saturating_sub(offset_x)
            .min(canvas_width);
        let bottom = selection
            .y
            .saturating_add(selection.height)
            .saturating_sub(offset_y)
            .min(canvas_height);

        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Everything sent to `/extract-table`.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// JPEG-encoded canvas snapshot.
    pub snapshot: Vec<u8>,
    pub selection: SelectionPayload,
}

impl ExtractionRequest {
    /// Snapshot the canvas and map the selection onto it.
    pub fn prepare(
        canvas: &Canvas,
        selection: Option<Selection>,
        canvas_offset: (u32, u32),
        jpeg_quality: u8,
    ) -> Result<Self> {
        let selection = selection.ok_or(Error::NoSelection)?;
        let snapshot = canvas.to_jpeg(jpeg_quality)?;
        Ok(Self {
            snapshot,
            selection: SelectionPayload::from_selection(
                selection,
                canvas_offset,
                (canvas.width(), canvas.height()),
            ),
        })
    }
}

/// Body of an `/extract-table` response.
///
/// The backend omits `success` on failures, so it defaults to `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractResponse {
    /// The table markup on success, else the message to show the user.
    pub fn into_markup(self) -> std::result::Result<String, String> {
        match (self.success, self.tables) {
            (true, Some(markup)) => Ok(markup),
            _ => Err(self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())),
        }
    }
}

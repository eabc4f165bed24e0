//! File intake: drop zone and file picker.
//!
//! Both input paths end in [`FileIntake::accept`], which picks the current
//! file and produces an [`IntakePlan`]: every file is uploaded, only the
//! first one is previewed.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;

pub const PDF_MIME: &str = "application/pdf";

/// A file handed to the client, with its media type resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl IntakeFile {
    /// Build from raw bytes. A declared media type wins over sniffing.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>, declared: Option<&str>) -> Self {
        let name = name.into();
        let media_type = match declared {
            Some(mime) if !mime.trim().is_empty() => mime.trim().to_lowercase(),
            _ => detect_media_type(&name, &bytes),
        };
        Self {
            name,
            media_type,
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: &Path, declared: Option<&str>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::from_bytes(name, bytes, declared))
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MIME
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Work the intake hands to the rest of the client.
#[derive(Debug, Clone)]
pub struct IntakePlan {
    /// Files to upload, in the order they were provided.
    pub uploads: Vec<IntakeFile>,
    /// The file to preview; also the new current file.
    pub preview: IntakeFile,
}

/// Drag events delivered to the drop zone.
#[derive(Debug, Clone)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop(Vec<IntakeFile>),
}

/// Drop zone and file picker state.
#[derive(Debug, Default)]
pub struct FileIntake {
    highlighted: bool,
    current: Option<IntakeFile>,
}

impl FileIntake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a drag event. A drop yields a plan when it carried files.
    pub fn drag(&mut self, event: DragEvent) -> Option<IntakePlan> {
        match event {
            DragEvent::Enter | DragEvent::Over => {
                self.highlighted = true;
                None
            }
            DragEvent::Leave => {
                self.highlighted = false;
                None
            }
            DragEvent::Drop(files) => {
                self.highlighted = false;
                self.accept(files)
            }
        }
    }

    /// Accept files from the picker or a drop.
    pub fn accept(&mut self, files: Vec<IntakeFile>) -> Option<IntakePlan> {
        let first = files.first()?.clone();
        debug!(
            count = files.len(),
            current = %first.name,
            media_type = %first.media_type,
            "files accepted"
        );
        self.current = Some(first.clone());
        Some(IntakePlan {
            uploads: files,
            preview: first,
        })
    }

    /// Whether the drop zone shows its drag-over highlight.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn current(&self) -> Option<&IntakeFile> {
        self.current.as_ref()
    }
}

/// Resolve a media type from content, falling back to the file extension.
///
/// Returns `application/octet-stream` when neither identifies the file.
pub fn detect_media_type(name: &str, bytes: &[u8]) -> String {
    if bytes.starts_with(b"%PDF-") {
        return PDF_MIME.to_string();
    }
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }

    let extension = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if extension == "pdf" {
        return PDF_MIME.to_string();
    }
    if let Some(format) = image::ImageFormat::from_extension(&extension) {
        return format.to_mime_type().to_string();
    }
    "application/octet-stream".to_string()
}

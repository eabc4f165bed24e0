//! Page navigation for the loaded document.
//!
//! Every accepted navigation bumps a generation counter and hands out a
//! [`RenderTicket`]. A render that completes after a newer navigation
//! was requested carries a stale ticket and must be dropped, whatever
//! order the renders finish in.

use tracing::debug;

/// Identifies one requested render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket {
    pub generation: u64,
    /// 1-based page to render.
    pub page: usize,
}

/// Tracks the current page against the document's page count.
#[derive(Debug, Default)]
pub struct PageNavigator {
    current: usize,
    page_count: usize,
    generation: u64,
}

impl PageNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over on a new document of `page_count` pages at page 1.
    pub fn load(&mut self, page_count: usize) -> RenderTicket {
        self.page_count = page_count;
        self.current = 0;
        self.request(1)
    }

    /// Forget the document. Outstanding tickets become stale.
    pub fn clear(&mut self) {
        self.page_count = 0;
        self.current = 0;
        self.generation += 1;
    }

    pub fn has_document(&self) -> bool {
        self.page_count > 0
    }

    /// 1-based current page, or 0 when nothing is loaded.
    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Move forward one page. No-op on the last page.
    pub fn next(&mut self) -> Option<RenderTicket> {
        if !self.has_document() || self.current >= self.page_count {
            return None;
        }
        Some(self.request(self.current + 1))
    }

    /// Move back one page. No-op on page 1.
    pub fn previous(&mut self) -> Option<RenderTicket> {
        if !self.has_document() || self.current <= 1 {
            return None;
        }
        Some(self.request(self.current - 1))
    }

    /// Jump to `page`. No-op when out of range or already there.
    pub fn go_to(&mut self, page: usize) -> Option<RenderTicket> {
        if !self.has_document() || page == 0 || page > self.page_count || page == self.current {
            return None;
        }
        Some(self.request(page))
    }

    /// Whether a render for `ticket` still reflects the latest intent.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        ticket.generation == self.generation
    }

    /// "Page N of M", as shown under the viewer.
    pub fn status_label(&self) -> String {
        format!("Page {} of {}", self.current, self.page_count)
    }

    fn request(&mut self, page: usize) -> RenderTicket {
        self.generation += 1;
        self.current = page;
        debug!(page, generation = self.generation, "page requested");
        RenderTicket {
            generation: self.generation,
            page,
        }
    }
}

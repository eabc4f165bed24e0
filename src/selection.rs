//! Region selection over the preview viewport.
//!
//! [`SelectionCoordinator`] turns raw pointer input into a page-scoped,
//! axis-aligned rectangle. It is a three-state machine:
//!
//! ```text
//!            arm                 pointer_down
//!   Idle ─────────────▶ Armed ─────────────────▶ Dragging ◀─┐ pointer_move
//!    ▲                   │  ▲                       │   └────┘
//!    │      disarm       │  └──── pointer_up ───────┤
//!    └───────────────────┴───────── disarm ─────────┘
//! ```
//!
//! Positions arrive in screen space together with the viewport's bounding
//! box as it is at that event; geometry is kept in viewport-local pixels.
//! Scrolling mid-drag is not compensated.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A pointer position in screen (client) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the viewport in screen pixels, queried per event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a screen position to viewport-local pixels, clamped to the
    /// viewport.
    pub fn to_local(&self, pointer: Point) -> Point {
        Point {
            x: (pointer.x - self.left).clamp(0.0, self.width.max(0.0)),
            y: (pointer.y - self.top).clamp(0.0, self.height.max(0.0)),
        }
    }
}

/// Live rectangle geometry in viewport-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Rectangle spanned by an anchor and the current pointer, whatever
    /// the drag direction.
    pub fn spanning(anchor: Point, current: Point) -> Self {
        Self {
            left: anchor.x.min(current.x),
            top: anchor.y.min(current.y),
            width: (current.x - anchor.x).abs(),
            height: (current.y - anchor.y).abs(),
        }
    }
}

/// A committed selection, in whole viewport-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// 1-based page the selection was drawn on.
    pub page: usize,
}

impl Selection {
    fn commit(rect: Rect, page: usize) -> Self {
        // Fractional pixels are truncated.
        Self {
            x: rect.left as u32,
            y: rect.top as u32,
            width: rect.width as u32,
            height: rect.height as u32,
            page,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Whether pointer input currently produces a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Off,
    On,
}

/// State of the selection machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionState {
    /// Selection mode off. Pointer input is ignored.
    Idle,
    /// Selection mode on, no button held.
    Armed,
    /// Button held; `anchor` is where it went down.
    Dragging { anchor: Point, rect: Rect },
}

/// Owns selection mode and the single selection rectangle slot.
#[derive(Debug)]
pub struct SelectionCoordinator {
    state: SelectionState,
    committed: Option<Selection>,
    visible: bool,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
            committed: None,
            visible: false,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn mode(&self) -> SelectionMode {
        match self.state {
            SelectionState::Idle => SelectionMode::Off,
            _ => SelectionMode::On,
        }
    }

    /// `true` while the viewport should show the "selecting" affordance.
    pub fn is_selecting(&self) -> bool {
        self.mode() == SelectionMode::On
    }

    /// Turn selection mode on. Hides any existing rectangle.
    pub fn arm(&mut self) {
        if self.state == SelectionState::Idle {
            debug!("selection armed");
            self.state = SelectionState::Armed;
            self.visible = false;
        }
    }

    /// Turn selection mode off, discarding an in-progress drag.
    pub fn disarm(&mut self) {
        if matches!(self.state, SelectionState::Dragging { .. }) {
            debug!("selection disarmed mid-drag, discarding rectangle");
        }
        self.state = SelectionState::Idle;
        self.visible = false;
    }

    /// Flip selection mode. Returns the new mode.
    pub fn toggle(&mut self) -> SelectionMode {
        if self.is_selecting() {
            self.disarm();
        } else {
            self.arm();
        }
        self.mode()
    }

    /// Start a drag. Ignored unless armed.
    pub fn pointer_down(&mut self, pointer: Point, viewport: ViewportBounds) {
        if self.state != SelectionState::Armed {
            return;
        }
        let anchor = viewport.to_local(pointer);
        self.committed = None;
        self.visible = true;
        self.state = SelectionState::Dragging {
            anchor,
            rect: Rect::spanning(anchor, anchor),
        };
    }

    /// Follow the pointer. Ignored unless dragging.
    pub fn pointer_move(&mut self, pointer: Point, viewport: ViewportBounds) {
        if let SelectionState::Dragging { anchor, rect } = &mut self.state {
            *rect = Rect::spanning(*anchor, viewport.to_local(pointer));
        }
    }

    /// Finish a drag and commit it against `page`. Ignored unless dragging.
    pub fn pointer_up(&mut self, page: usize) -> Option<Selection> {
        let SelectionState::Dragging { rect, .. } = self.state else {
            return None;
        };
        let selection = Selection::commit(rect, page);
        debug!(?selection, "selection committed");
        self.committed = Some(selection);
        self.state = SelectionState::Armed;
        Some(selection)
    }

    /// The last committed selection, if any.
    pub fn current_rectangle(&self) -> Option<Selection> {
        self.committed
    }

    /// Geometry to draw: the in-progress drag, else the committed rectangle.
    pub fn live_rectangle(&self) -> Option<Rect> {
        match self.state {
            SelectionState::Dragging { rect, .. } => Some(rect),
            _ => self.committed.map(|s| Rect {
                left: f64::from(s.x),
                top: f64::from(s.y),
                width: f64::from(s.width),
                height: f64::from(s.height),
            }),
        }
    }

    pub fn is_rectangle_visible(&self) -> bool {
        self.visible
    }
}

impl Default for SelectionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportBounds = ViewportBounds {
        left: 0.0,
        top: 0.0,
        width: 800.0,
        height: 600.0,
    };

    fn drag(from: (f64, f64), to: (f64, f64)) -> Option<Selection> {
        let mut coordinator = SelectionCoordinator::new();
        coordinator.arm();
        coordinator.pointer_down(Point::new(from.0, from.1), VIEWPORT);
        coordinator.pointer_move(Point::new(to.0, to.1), VIEWPORT);
        coordinator.pointer_up(1)
    }

    #[test]
    fn starts_idle() {
        let coordinator = SelectionCoordinator::new();
        assert_eq!(coordinator.state(), SelectionState::Idle);
        assert_eq!(coordinator.mode(), SelectionMode::Off);
        assert!(coordinator.current_rectangle().is_none());
    }

    #[test]
    fn reverse_drags_commit_identical_rectangles() {
        let pairs = [
            ((50.0, 50.0), (10.0, 10.0)),
            ((0.0, 300.0), (400.0, 20.0)),
            ((123.5, 7.0), (7.0, 123.5)),
            ((5.0, 5.0), (5.0, 90.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(drag(a, b), drag(b, a), "{a:?} <-> {b:?}");
        }
    }

    #[test]
    fn normalizes_up_left_drag() {
        let selection = drag((50.0, 50.0), (10.0, 10.0)).unwrap();
        assert_eq!((selection.x, selection.y), (10, 10));
        assert_eq!((selection.width, selection.height), (40, 40));
    }

    #[test]
    fn drag_from_bottom_right_to_top_left() {
        let selection = drag((100.0, 80.0), (40.0, 20.0)).unwrap();
        assert_eq!(
            selection,
            Selection { x: 40, y: 20, width: 60, height: 60, page: 1 }
        );
    }

    #[test]
    fn click_without_movement_commits_zero_size() {
        let selection = drag((20.0, 30.0), (20.0, 30.0)).unwrap();
        assert_eq!(
            selection,
            Selection { x: 20, y: 30, width: 0, height: 0, page: 1 }
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn dimensions_never_negative_for_any_sequence() {
        let mut coordinator = SelectionCoordinator::new();
        coordinator.arm();
        coordinator.pointer_down(Point::new(400.0, 300.0), VIEWPORT);
        for (x, y) in [(-50.0, 900.0), (10.0, 10.0), (790.0, -3.0), (400.0, 300.0)] {
            coordinator.pointer_move(Point::new(x, y), VIEWPORT);
            let rect = coordinator.live_rectangle().unwrap();
            assert!(rect.width >= 0.0 && rect.height >= 0.0);
            assert!(rect.left >= 0.0 && rect.top >= 0.0);
        }
    }

    #[test]
    fn pointer_positions_clamped_to_viewport() {
        let selection = drag((700.0, 500.0), (2000.0, 2000.0)).unwrap();
        assert_eq!((selection.width, selection.height), (100, 100));
    }

    #[test]
    fn coordinates_are_viewport_local() {
        let viewport = ViewportBounds::new(100.0, 50.0, 800.0, 600.0);
        let mut coordinator = SelectionCoordinator::new();
        coordinator.arm();
        coordinator.pointer_down(Point::new(120.0, 80.0), viewport);
        coordinator.pointer_move(Point::new(220.0, 130.0), viewport);
        let selection = coordinator.pointer_up(2).unwrap();
        assert_eq!(
            selection,
            Selection { x: 20, y: 30, width: 100, height: 50, page: 2 }
        );
    }

    #[test]
    fn disarm_while_dragging_discards_rectangle() {
        let mut coordinator = SelectionCoordinator::new();
        coordinator.arm();
        coordinator.pointer_down(Point::new(10.0, 10.0), VIEWPORT);
        coordinator.pointer_move(Point::new(60.0, 60.0), VIEWPORT);
        coordinator.disarm();
        assert!(coordinator.pointer_up(1).is_none());
        assert!(coordinator.current_rectangle().is_none());
        assert!(!coordinator.is_rectangle_visible());
    }

    #[test]
    fn move_without_press_produces_nothing() {
        let mut coordinator = SelectionCoordinator::new();
        coordinator.arm();
        coordinator.pointer_move(Point::new(60.0, 60.0), VIEWPORT);
        assert!(coordinator.live_rectangle().is_none());
        assert!(coordinator.pointer_up(1).is_none());
        assert!(coordinator.current_rectangle().is_none());
    }

    #[test]
    fn idle_ignores_pointer_input() {
        let mut coordinator = SelectionCoordinator::new();
        coordinator.pointer_down(Point::new(10.0, 10.0), VIEWPORT);
        coordinator.pointer_move(Point::new(60.0, 60.0), VIEWPORT);
        assert!(coordinator.pointer_up(1).is_none());
        assert_eq!(coordinator.state(), SelectionState::Idle);
    }

    #[test]
    fn next_press_supersedes_committed_rectangle() {
        let mut coordinator = SelectionCoordinator::new();
        coordinator.arm();
        coordinator.pointer_down(Point::new(10.0, 10.0), VIEWPORT);
        coordinator.pointer_up(1);
        assert!(coordinator.current_rectangle().is_some());

        coordinator.pointer_down(Point::new(200.0, 200.0), VIEWPORT);
        assert!(coordinator.current_rectangle().is_none());
        coordinator.pointer_move(Point::new(250.0, 220.0), VIEWPORT);
        let selection = coordinator.pointer_up(3).unwrap();
        assert_eq!(coordinator.current_rectangle(), Some(selection));
        assert_eq!(selection.page, 3);
    }

    #[test]
    fn toggling_hides_but_keeps_committed_rectangle() {
        let mut coordinator = SelectionCoordinator::new();
        assert_eq!(coordinator.toggle(), SelectionMode::On);
        coordinator.pointer_down(Point::new(10.0, 10.0), VIEWPORT);
        coordinator.pointer_move(Point::new(30.0, 40.0), VIEWPORT);
        coordinator.pointer_up(1);
        assert!(coordinator.is_rectangle_visible());

        assert_eq!(coordinator.toggle(), SelectionMode::Off);
        assert!(!coordinator.is_rectangle_visible());
        assert!(coordinator.current_rectangle().is_some());

        coordinator.toggle();
        assert!(!coordinator.is_rectangle_visible());
        assert_eq!(coordinator.state(), SelectionState::Armed);
    }

    #[test]
    fn fractional_pixels_truncate_on_commit() {
        let selection = drag((10.7, 20.2), (30.9, 45.99)).unwrap();
        assert_eq!((selection.x, selection.y), (10, 20));
        assert_eq!((selection.width, selection.height), (20, 25));
    }
}

//! Pointer-driven drawer resizing.
//!
//! A drag is a `begin_drag` / `on_drag_move`* / `end_drag` sequence for a
//! single pointer. Moves update the live width through transient
//! transitions; only `end_drag` commits (and therefore persists) the final
//! width. `cancel_drag` restores the width the drag started from.

use thiserror::Error;

use crate::drawer::{SideDocument, Transition};
use crate::model::DrawerPosition;
use crate::storage::StateStore;

/// Horizontal pointer sample forwarded by the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: u32,
    /// Client x coordinate in CSS pixels.
    pub x: f32,
}

impl PointerEvent {
    pub fn new(pointer_id: u32, x: f32) -> Self {
        Self { pointer_id, x }
    }
}

/// Reasons a drag could not start.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ResizeError {
    #[error("drawer resizing is disabled")]
    Disabled,
    #[error("pointer {0} is already dragging the resize handle")]
    AlreadyDragging(u32),
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    pointer_id: u32,
    origin_x: f32,
    origin_width: f32,
    last_x: f32,
}

/// Resize handle controller. Holds drag bookkeeping only; the width itself
/// lives in the [`SideDocument`].
#[derive(Debug, Default)]
pub struct ResizeController {
    drag: Option<DragSession>,
}

impl ResizeController {
    /// Controller for `document`, or `None` when resizing is disabled and
    /// no handle should be offered.
    pub fn attach<S: StateStore>(document: &SideDocument<S>) -> Option<Self> {
        document.config().resizable().then(Self::default)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Width the current drag started from.
    pub fn origin_width(&self) -> Option<f32> {
        self.drag.map(|drag| drag.origin_width)
    }

    pub fn begin_drag<S: StateStore>(
        &mut self,
        document: &SideDocument<S>,
        event: PointerEvent,
    ) -> Result<(), ResizeError> {
        if !document.config().resizable() {
            return Err(ResizeError::Disabled);
        }
        if let Some(drag) = self.drag {
            return Err(ResizeError::AlreadyDragging(drag.pointer_id));
        }

        self.drag = Some(DragSession {
            pointer_id: event.pointer_id,
            origin_x: event.x,
            origin_width: document.state().width_px(),
            last_x: event.x,
        });
        Ok(())
    }

    /// Recompute the width from the latest pointer position.
    ///
    /// Events from other pointers, repeated positions and moves outside a
    /// drag are dropped. Returns `None` when nothing was applied.
    pub fn on_drag_move<S: StateStore>(
        &mut self,
        document: &mut SideDocument<S>,
        event: PointerEvent,
    ) -> Option<Transition> {
        if self.drag.is_some() && !document.config().resizable() {
            self.cancel_drag(document);
            return None;
        }
        let drag = self.drag.as_mut()?;
        if drag.pointer_id != event.pointer_id {
            log::debug!(
                "ignoring move from pointer {} during drag of pointer {}",
                event.pointer_id,
                drag.pointer_id
            );
            return None;
        }
        if drag.last_x == event.x {
            return None;
        }

        drag.last_x = event.x;
        let candidate = candidate_width(
            document.state().position(),
            drag.origin_width,
            drag.origin_x,
            event.x,
        );
        Some(document.preview_width(candidate))
    }

    /// Finish the drag and commit the final width.
    pub fn end_drag<S: StateStore>(
        &mut self,
        document: &mut SideDocument<S>,
    ) -> Option<Transition> {
        self.drag.take()?;
        Some(document.commit_width())
    }

    /// Abort the drag (pointer capture lost, pointer cancelled) and restore
    /// the last committed width. Without a committed width change during
    /// the drag that is the width the drag started from.
    pub fn cancel_drag<S: StateStore>(
        &mut self,
        document: &mut SideDocument<S>,
    ) -> Option<Transition> {
        self.drag.take()?;
        let committed = document.committed_width_px();
        let transition = document.preview_width(committed);
        document.commit_width();
        Some(transition)
    }
}

/// Width implied by dragging the handle from `origin_x` to `x`.
///
/// Moving toward the page interior grows the drawer: leftward for a drawer
/// anchored right, rightward for one anchored left.
pub fn candidate_width(
    position: DrawerPosition,
    origin_width: f32,
    origin_x: f32,
    x: f32,
) -> f32 {
    match position {
        DrawerPosition::Right => origin_width + (origin_x - x),
        DrawerPosition::Left => origin_width + (x - origin_x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SideDocumentOptions;

    fn document(options: SideDocumentOptions) -> SideDocument {
        SideDocument::builder(options)
            .initialize()
            .expect("options should resolve")
    }

    #[test]
    fn given_right_anchored_drawer_when_dragged_left_then_width_grows() {
        assert_eq!(
            candidate_width(DrawerPosition::Right, 320.0, 1000.0, 900.0),
            420.0
        );
        assert_eq!(
            candidate_width(DrawerPosition::Left, 320.0, 320.0, 220.0),
            220.0
        );
    }

    #[test]
    fn given_resizing_disabled_when_attached_then_no_controller() {
        let doc = document(SideDocumentOptions {
            resizable: Some(false),
            ..SideDocumentOptions::default()
        });

        assert!(ResizeController::attach(&doc).is_none());
        let mut controller = ResizeController::default();
        assert_eq!(
            controller.begin_drag(&doc, PointerEvent::new(1, 10.0)),
            Err(ResizeError::Disabled)
        );
    }

    #[test]
    fn given_drag_in_progress_when_moved_then_live_width_changes_only() {
        let mut doc = document(SideDocumentOptions::default());
        let mut controller =
            ResizeController::attach(&doc).expect("resizing is enabled");
        controller
            .begin_drag(&doc, PointerEvent::new(1, 1000.0))
            .expect("drag should start");

        controller.on_drag_move(&mut doc, PointerEvent::new(1, 900.0));

        assert_eq!(doc.state().width_px(), 420.0);
        assert_eq!(doc.committed_width_px(), 320.0);
        assert!(doc.store().is_empty());
    }

    #[test]
    fn given_second_pointer_when_moved_then_ignored() {
        let mut doc = document(SideDocumentOptions::default());
        let mut controller = ResizeController::default();
        controller
            .begin_drag(&doc, PointerEvent::new(1, 1000.0))
            .expect("drag should start");

        let applied =
            controller.on_drag_move(&mut doc, PointerEvent::new(2, 0.0));

        assert!(applied.is_none());
        assert_eq!(doc.state().width_px(), 320.0);
        assert_eq!(
            controller.begin_drag(&doc, PointerEvent::new(2, 0.0)),
            Err(ResizeError::AlreadyDragging(1))
        );
    }

    #[test]
    fn given_aborted_drag_when_cancelled_then_width_reverts() {
        let mut doc = document(SideDocumentOptions::default());
        let mut controller = ResizeController::default();
        controller
            .begin_drag(&doc, PointerEvent::new(1, 1000.0))
            .expect("drag should start");
        controller.on_drag_move(&mut doc, PointerEvent::new(1, 700.0));

        controller.cancel_drag(&mut doc);

        assert!(!controller.is_dragging());
        assert_eq!(doc.state().width_px(), 320.0);
        assert_eq!(doc.committed_width_px(), 320.0);
        assert!(doc.store().is_empty());
    }

    #[test]
    fn given_resizing_disabled_mid_drag_when_moved_then_drag_is_cancelled() {
        let mut doc = document(SideDocumentOptions::default());
        let mut controller = ResizeController::default();
        controller
            .begin_drag(&doc, PointerEvent::new(1, 1000.0))
            .expect("drag should start");
        controller.on_drag_move(&mut doc, PointerEvent::new(1, 800.0));
        doc.update_config(&SideDocumentOptions {
            resizable: Some(false),
            ..SideDocumentOptions::default()
        })
        .expect("update should resolve");

        let applied =
            controller.on_drag_move(&mut doc, PointerEvent::new(1, 600.0));

        assert!(applied.is_none());
        assert!(!controller.is_dragging());
        assert_eq!(doc.state().width_px(), 320.0);
    }

    #[test]
    fn given_no_drag_when_ended_then_nothing_happens() {
        let mut doc = document(SideDocumentOptions::default());
        let mut controller = ResizeController::default();

        assert!(controller.end_drag(&mut doc).is_none());
        assert!(controller.cancel_drag(&mut doc).is_none());
    }

    #[test]
    fn given_preview_width_when_host_sets_same_width_then_it_is_committed() {
        let mut doc = document(SideDocumentOptions::default());
        let mut controller = ResizeController::default();
        controller
            .begin_drag(&doc, PointerEvent::new(1, 1000.0))
            .expect("drag should start");
        controller.on_drag_move(&mut doc, PointerEvent::new(1, 900.0));

        let explicit = doc.set_width(420.0);
        controller.cancel_drag(&mut doc);

        assert!(!explicit.is_noop());
        assert!(explicit.persisted());
        assert_eq!(doc.committed_width_px(), 420.0);
        assert_eq!(doc.state().width_px(), 420.0);
    }
}

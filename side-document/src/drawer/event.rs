use super::state::DrawerState;
use crate::model::DrawerFields;
use crate::storage::StorageError;

/// How a notified change came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// First notification carrying the fully resolved state.
    Initial,
    /// Durable change, already handed to storage when enabled.
    Committed,
    /// Visual-only change (resize drag in progress); not persisted.
    Transient,
    /// Options were re-resolved; chrome may need to re-render.
    Reconfigured,
}

/// Snapshot handed to observers after every effective transition.
#[derive(Debug, Clone, Copy)]
pub struct DrawerChange<'a> {
    pub state: &'a DrawerState,
    pub changed: DrawerFields,
    pub kind: ChangeKind,
    /// Content must be reloaded even if `frame_src` is unchanged.
    pub reload_frame: bool,
}

/// View collaborator notified of drawer changes.
pub trait DrawerObserver {
    fn state_changed(&mut self, change: &DrawerChange<'_>);

    /// A storage write failed. In-memory state is kept as is.
    fn storage_failed(&mut self, _error: &StorageError) {}
}

impl<F> DrawerObserver for F
where
    F: FnMut(&DrawerChange<'_>),
{
    fn state_changed(&mut self, change: &DrawerChange<'_>) {
        self(change);
    }
}

/// Width request that fell outside the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfRange {
    pub requested: f32,
    pub applied: f32,
}

/// Outcome of one command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    changed: DrawerFields,
    persisted: bool,
    out_of_range: Option<OutOfRange>,
}

impl Transition {
    pub(crate) fn new(
        changed: DrawerFields,
        persisted: bool,
        out_of_range: Option<OutOfRange>,
    ) -> Self {
        Self {
            changed,
            persisted,
            out_of_range,
        }
    }

    pub(crate) fn noop(out_of_range: Option<OutOfRange>) -> Self {
        Self::new(DrawerFields::empty(), false, out_of_range)
    }

    /// Fields whose values changed.
    pub fn changed(&self) -> DrawerFields {
        self.changed
    }

    /// Whether a storage write succeeded for this transition.
    pub fn persisted(&self) -> bool {
        self.persisted
    }

    /// Set when a width request had to be clamped.
    pub fn out_of_range(&self) -> Option<OutOfRange> {
        self.out_of_range
    }

    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

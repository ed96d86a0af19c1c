use std::rc::Rc;

use shape_types::{ParamUpdate, ShapeSelection};
use tracing::debug;

/// Holds the current shape selection as a shared immutable snapshot.
///
/// Updates never mutate a published snapshot; they swap in a new one.
#[derive(Debug, Clone, Default)]
pub struct ShapeParameterStore {
    current: Rc<ShapeSelection>,
    revision: u64,
}

impl ShapeParameterStore {
    pub fn new(initial: ShapeSelection) -> Self {
        Self {
            current: Rc::new(initial),
            revision: 0,
        }
    }

    pub fn snapshot(&self) -> Rc<ShapeSelection> {
        Rc::clone(&self.current)
    }

    /// Number of updates that changed the selection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply one form edit. Returns true if the selection changed.
    /// Values are stored as given, out-of-range ones included.
    pub fn apply(&mut self, update: ParamUpdate) -> bool {
        let next = self.current.apply(update);
        if next == *self.current {
            return false;
        }
        for advisory in next.advisories() {
            debug!(%advisory, "parameter accepted as-is");
        }
        self.current = Rc::new(next);
        self.revision += 1;
        true
    }
}

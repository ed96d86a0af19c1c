//! The shape sample component and its lifecycle.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use shape_kernel::{ShapeKernel, StrokeOptions};
use shape_types::{ParamUpdate, ShapeSelection};
use shape_viewer::{GeometryDecorator, SharedDecorator, Viewer, ViewerError};
use tracing::{debug, info, instrument};

use crate::redraw::{redraw, RedrawOutcome};
use crate::store::ShapeParameterStore;

/// Where the component is in its single construct/destroy cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Defaults set, draw target not registered.
    Constructed,
    /// Draw target registered, first redraw done.
    ViewerReady,
    /// Draw target unregistered. Terminal.
    Unmounted,
}

/// Errors from the component layer.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("cannot handle {event} while {state:?}")]
    InvalidTransition {
        state: LifecycleState,
        event: &'static str,
    },

    #[error("viewer error: {0}")]
    Viewer(#[from] ViewerError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

/// Adapter between the shape form and the viewer: keeps the selection,
/// owns the draw target and redraws it when either changes.
pub struct GeometryUi<K: ShapeKernel, V: Viewer> {
    kernel: K,
    viewer: V,
    store: ShapeParameterStore,
    target: SharedDecorator,
    state: LifecycleState,
    stroke_options: StrokeOptions,
    last_outcome: Option<RedrawOutcome>,
}

impl<K: ShapeKernel, V: Viewer> GeometryUi<K, V> {
    pub fn new(kernel: K, viewer: V) -> Self {
        Self::with_selection(kernel, viewer, ShapeSelection::default())
    }

    pub fn with_selection(kernel: K, viewer: V, selection: ShapeSelection) -> Self {
        Self {
            kernel,
            viewer,
            store: ShapeParameterStore::new(selection),
            target: GeometryDecorator::new().shared(),
            state: LifecycleState::Constructed,
            stroke_options: StrokeOptions::for_curves(),
            last_outcome: None,
        }
    }

    pub fn with_stroke_options(mut self, options: StrokeOptions) -> Self {
        self.stroke_options = options;
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn selection(&self) -> Rc<ShapeSelection> {
        self.store.snapshot()
    }

    pub fn target(&self) -> &SharedDecorator {
        &self.target
    }

    pub fn last_outcome(&self) -> Option<&RedrawOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut K {
        &mut self.kernel
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    /// Bring up the viewer and, once it is ready, register and draw.
    ///
    /// The ready signal arrives through [`Viewer::on_ready`]. A viewer that
    /// becomes ready later leaves the component in `Constructed`; the host
    /// then forwards the signal with [`GeometryUi::on_viewer_ready`].
    #[instrument(skip(self))]
    pub fn mount(&mut self) -> Result<Option<RedrawOutcome>, UiError> {
        self.expect_state(LifecycleState::Constructed, "mount")?;
        let signalled = Rc::new(Cell::new(false));
        let flag = Rc::clone(&signalled);
        self.viewer.on_ready(Box::new(move || flag.set(true)));
        self.viewer.initialize()?;
        if !signalled.get() {
            debug!("viewer not ready yet");
            return Ok(None);
        }
        self.on_viewer_ready().map(Some)
    }

    /// Ready signal from the viewer: register the target and draw once.
    #[instrument(skip(self))]
    pub fn on_viewer_ready(&mut self) -> Result<RedrawOutcome, UiError> {
        self.expect_state(LifecycleState::Constructed, "viewer ready")?;
        self.viewer.add_decorator(Rc::clone(&self.target));
        self.state = LifecycleState::ViewerReady;
        info!("draw target registered");
        Ok(self.refresh())
    }

    /// Store a form edit. Once the viewer is ready a change triggers a
    /// redraw; before that only the selection is updated.
    pub fn on_params_changed(
        &mut self,
        update: ParamUpdate,
    ) -> Result<Option<RedrawOutcome>, UiError> {
        if self.state == LifecycleState::Unmounted {
            return Err(UiError::InvalidTransition {
                state: self.state,
                event: "params changed",
            });
        }
        if !self.store.apply(update) {
            debug!(?update, "update left selection unchanged");
            return Ok(None);
        }
        if self.state != LifecycleState::ViewerReady {
            return Ok(None);
        }
        Ok(Some(self.refresh()))
    }

    /// Unregister the draw target. Safe before any redraw.
    #[instrument(skip(self))]
    pub fn on_unmount(&mut self) -> Result<(), UiError> {
        if self.state == LifecycleState::Unmounted {
            return Err(UiError::InvalidTransition {
                state: self.state,
                event: "unmount",
            });
        }
        let id = self.target.borrow().id();
        let was_registered = self.viewer.drop_decorator(id);
        self.state = LifecycleState::Unmounted;
        info!(was_registered, "draw target unregistered");
        Ok(())
    }

    fn refresh(&mut self) -> RedrawOutcome {
        let selection = self.store.snapshot();
        let outcome = {
            let mut target = self.target.borrow_mut();
            redraw(&mut self.kernel, &selection, &mut target, &self.stroke_options)
        };
        self.viewer.invalidate_decorations();
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    fn expect_state(&self, expected: LifecycleState, event: &'static str) -> Result<(), UiError> {
        if self.state != expected {
            return Err(UiError::InvalidTransition {
                state: self.state,
                event,
            });
        }
        Ok(())
    }
}

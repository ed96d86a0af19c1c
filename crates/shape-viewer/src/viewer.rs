//! Viewer collaborator: decoration registry, ready signal and frame loop.

use tracing::{debug, info, instrument, warn};

use crate::config::{Theme, ViewerConfig};
use crate::decorator::{DecorationGraphic, DecoratorId, SharedDecorator};

/// Errors from the viewer layer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("viewer is not initialized")]
    NotReady,

    #[error("invalid viewer config: {reason}")]
    Config { reason: String },

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a component needs from the viewer that hosts it.
pub trait Viewer {
    /// Presentation settings; fixed for the viewer's lifetime.
    fn config(&self) -> &ViewerConfig;

    /// Bring the viewer up. Returns `Ok(true)` from the call that completes
    /// initialization (the ready signal) and `Ok(false)` afterwards.
    fn initialize(&mut self) -> Result<bool, ViewerError>;

    fn is_ready(&self) -> bool;

    /// Run `callback` once the viewer becomes ready. Callbacks registered
    /// after that point run immediately.
    fn on_ready(&mut self, callback: ReadyCallback);

    /// Add a decorator to the decoration list. Adding one that is already
    /// registered has no effect.
    fn add_decorator(&mut self, decorator: SharedDecorator);

    /// Remove a decorator. Returns false if it was not registered.
    fn drop_decorator(&mut self, id: DecoratorId) -> bool;

    /// Ask for decorations to be re-collected on the next frame.
    fn invalidate_decorations(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewerState {
    Starting,
    Ready,
}

/// One presented frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub number: u64,
    pub grid: bool,
    pub theme: Theme,
    pub graphics: Vec<DecorationGraphic>,
}

impl Frame {
    pub fn triangle_count(&self) -> usize {
        self.graphics.iter().map(DecorationGraphic::triangle_count).sum()
    }
}

pub type ReadyCallback = Box<dyn FnOnce()>;

/// Headless viewer that keeps the decoration list and presents frames on
/// request.
pub struct ViewManager {
    config: ViewerConfig,
    state: ViewerState,
    decorators: Vec<SharedDecorator>,
    ready_callbacks: Vec<ReadyCallback>,
    decorations_dirty: bool,
    frames_presented: u64,
}

impl ViewManager {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            state: ViewerState::Starting,
            decorators: Vec::new(),
            ready_callbacks: Vec::new(),
            decorations_dirty: false,
            frames_presented: 0,
        }
    }

    pub fn decorator_count(&self) -> usize {
        self.decorators.len()
    }

    pub fn has_decorator(&self, id: DecoratorId) -> bool {
        self.decorators.iter().any(|d| d.borrow().id() == id)
    }

    /// Whether decorations changed since the last presented frame.
    pub fn needs_redraw(&self) -> bool {
        self.decorations_dirty
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Collect every registered decorator's graphic into a frame.
    #[instrument(skip(self))]
    pub fn render_frame(&mut self) -> Result<Frame, ViewerError> {
        if self.state != ViewerState::Ready {
            return Err(ViewerError::NotReady);
        }

        let graphics: Vec<DecorationGraphic> = self
            .decorators
            .iter()
            .filter_map(|d| d.borrow().decorate().cloned())
            .collect();

        let extents = self.config.blank_connection.extents;
        let outside = graphics
            .iter()
            .flat_map(|g| g.polyfaces.iter())
            .filter_map(|p| p.bounds())
            .any(|(lo, hi)| {
                !extents.contains_point(lo.map(f64::from))
                    || !extents.contains_point(hi.map(f64::from))
            });
        if outside {
            warn!("decoration extends past the connection extents");
        }

        self.frames_presented += 1;
        self.decorations_dirty = false;
        let frame = Frame {
            number: self.frames_presented,
            grid: self.config.view_state.grid,
            theme: self.config.theme,
            graphics,
        };
        debug!(
            frame = frame.number,
            graphics = frame.graphics.len(),
            triangles = frame.triangle_count(),
            "presented frame"
        );
        Ok(frame)
    }
}

impl Default for ViewManager {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl Viewer for ViewManager {
    fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[instrument(skip(self), fields(connection = %self.config.blank_connection.name))]
    fn initialize(&mut self) -> Result<bool, ViewerError> {
        if self.state == ViewerState::Ready {
            return Ok(false);
        }
        self.config.validate()?;
        self.state = ViewerState::Ready;
        info!("viewer ready");
        for callback in std::mem::take(&mut self.ready_callbacks) {
            callback();
        }
        Ok(true)
    }

    fn is_ready(&self) -> bool {
        self.state == ViewerState::Ready
    }

    fn on_ready(&mut self, callback: ReadyCallback) {
        match self.state {
            ViewerState::Starting => self.ready_callbacks.push(callback),
            ViewerState::Ready => callback(),
        }
    }

    fn add_decorator(&mut self, decorator: SharedDecorator) {
        let id = decorator.borrow().id();
        if self.has_decorator(id) {
            debug!(%id, "decorator already registered");
            return;
        }
        self.decorators.push(decorator);
        self.decorations_dirty = true;
        debug!(%id, count = self.decorators.len(), "added decorator");
    }

    fn drop_decorator(&mut self, id: DecoratorId) -> bool {
        let before = self.decorators.len();
        self.decorators.retain(|d| d.borrow().id() != id);
        let removed = self.decorators.len() != before;
        if removed {
            self.decorations_dirty = true;
            debug!(%id, "dropped decorator");
        }
        removed
    }

    fn invalidate_decorations(&mut self) {
        self.decorations_dirty = true;
    }
}

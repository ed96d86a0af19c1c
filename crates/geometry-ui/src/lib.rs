pub mod component;
pub mod dispatch;
pub mod messages;
pub mod redraw;
pub mod store;

pub use component::{GeometryUi, LifecycleState, UiError};
pub use dispatch::{dispatch, dispatch_json};
pub use redraw::{build_solid, redraw, RedrawOutcome};
pub use store::ShapeParameterStore;

//! Platform-agnostic core - shared between the browser effect and the CLI

pub mod activation;
pub mod config;
pub mod engine;
pub mod error;
pub mod lattice;
pub mod lifecycle;
pub mod palette;
pub mod surface;

pub use activation::{activate_brush, ActivatedSet, PointerState};
pub use config::GridConfig;
pub use engine::{FrameStats, GridEngine};
pub use error::GridError;
pub use lattice::{Point, PointField, PointId, Viewport};
pub use lifecycle::{CancelToken, EffectSlot, Rollback, Teardown};
pub use palette::{advance, ColorCycle, ResetTimer};
pub use surface::{Dot, RecordingSurface, Surface};

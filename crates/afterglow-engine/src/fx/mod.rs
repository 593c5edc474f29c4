//! Post-processing compositor core.
//!
//! The pieces, leaf to root:
//! - `types` / `registry`: the effect catalog and its data-driven descriptors
//! - `ring`: ping-pong state for the double-buffered target pairs
//! - `list`: the two ordered effect lists and their merge policy
//! - `constants` / `params`: the flat per-frame uniform record and the
//!   oscillator state that refreshes it every frame
//! - `scope` / `apply`: scope math and the three draw entry points
//! - `scheduler`: the per-frame state machine walking the chain
//! - `backend`: the narrow draw interface the scheduler talks to
//!
//! Everything here is CPU-side orchestration; the wgpu side lives in
//! `crate::render`.

mod apply;
mod backend;
mod constants;
mod list;
mod params;
mod registry;
mod ring;
mod scheduler;
mod scope;
mod types;

pub use apply::{AuxReads, EffectApplicator};
pub use backend::{FxBackend, FxPass, PassShape, ScenePhase};
pub use constants::FxConstants;
pub use list::EffectLists;
pub use params::{FxControls, ParamEnv, ParamState};
pub use registry::{descriptor, AuxInput, EffectDescriptor};
pub use ring::{pairs, ImageRef, PairId, Side, TargetRing};
pub use scheduler::{Compositor, FrameInputs};
pub use scope::{area_bounds, polygon_clip_points, AreaBounds};
pub use types::{BlendMode, Effect, EffectKind, EffectScope, PolygonData};

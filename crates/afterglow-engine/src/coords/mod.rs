//! Screen-space coordinate types shared by the compositor and its backend.
//!
//! Canonical space for effect scopes:
//! - normalized screen coordinates in [0, 1]
//! - origin top-left, +X right, +Y down
//!
//! World/clip-space math uses `glam` types and lives in `camera` / `fx`.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;

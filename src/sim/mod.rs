//! Collision simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - No I/O, no rendering
//! - Stable iteration order (insertion order of the world's bodies)
//! - Structural changes are deferred to the end of a tick

pub mod body;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use body::{Appearance, Body, BodyError, BodyId, Collider, Image, Mass, Motion, Shape};
pub use collision::{Contact, collision_vector, elastic_collision, probe};
pub use rect::{Edge, SquareFrame};
pub use state::{Command, World};
pub use tick::{TickReport, tick};

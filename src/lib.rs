//! Butterfly Effect - a tiny 2D elastic collision sandbox
//!
//! Core modules:
//! - `sim`: Bodies, collision detection/response and the per-frame tick
//! - `scene`: Scene presets and the director that switches between them
//! - `settings`: Runner configuration loaded from JSON

pub mod scene;
pub mod settings;
pub mod sim;

pub use scene::{Director, Scene, SceneId, Transition};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the runner will feed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Momentum magnitude at which a splitter fissions
    pub const SPLIT_MOMENTUM: f32 = 1.0;
    /// Default angle (degrees) between a splitter's children and its heading
    pub const DEFAULT_SPLIT_ANGLE: f32 = 10.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 0.5;
    pub const BALL_MASS: f32 = 1.0;

    /// Wall side length
    pub const WALL_SIZE: f32 = 1.0;

    /// How long the splash screen stays up (seconds)
    pub const SPLASH_SECONDS: f32 = 4.0;
}

/// Rotate a vector counter-clockwise by `degrees`
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

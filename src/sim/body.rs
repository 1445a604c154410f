//! Body records and their optional components
//!
//! A body is a position and a velocity plus any of three orthogonal
//! components: a collider (shape and mass), a motion rule, and an
//! appearance. Systems only look at the components they need.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised when constructing a body with invalid parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    #[error("size must be positive and finite, got {0}")]
    InvalidSize(f32),
    #[error("a splitter cannot have infinite mass")]
    ImmovableSplitter,
}

/// Stable identifier of a body within a [`World`](super::World)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Inertial mass; infinite mass marks an immovable body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mass {
    Finite(f32),
    Infinite,
}

impl Mass {
    /// Checked constructor for a finite mass
    pub fn finite(m: f32) -> Result<Self, BodyError> {
        if m.is_finite() && m > 0.0 {
            Ok(Mass::Finite(m))
        } else {
            Err(BodyError::InvalidMass(m))
        }
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Mass::Infinite)
    }

    /// Half of this mass (infinity halves to infinity)
    pub fn halved(&self) -> Self {
        match *self {
            Mass::Finite(m) => Mass::Finite(m / 2.0),
            Mass::Infinite => Mass::Infinite,
        }
    }

    /// Finite value, if any
    pub fn value(&self) -> Option<f32> {
        match *self {
            Mass::Finite(m) => Some(m),
            Mass::Infinite => None,
        }
    }
}

impl Default for Mass {
    fn default() -> Self {
        Mass::Finite(BALL_MASS)
    }
}

/// Collision geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Circle of the given diameter
    Circle { size: f32 },
    /// Square of side `size`, rotated counter-clockwise by `rotation` degrees
    Rect { size: f32, rotation: f32 },
}

impl Shape {
    pub fn size(&self) -> f32 {
        match *self {
            Shape::Circle { size } | Shape::Rect { size, .. } => size,
        }
    }
}

/// Collidable component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub shape: Shape,
    pub mass: Mass,
}

/// Motion component: how a body advances during the integration pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Straight-line motion at constant velocity
    Linear,
    /// Straight-line motion, then fission once momentum reaches the threshold
    Splitting {
        /// Degrees between each child's heading and the parent's
        split_angle: f32,
    },
}

/// What a renderer should draw for a body. Never read by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Image {
    Circle([u8; 3]),
    Square([u8; 3]),
    File(String),
}

/// Presentation component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub image: Image,
    /// Overrides the collider size when drawing (or sizes a collider-less body)
    #[serde(default)]
    pub display_size: Option<f32>,
}

impl Appearance {
    pub fn new(image: Image) -> Self {
        Self {
            image,
            display_size: None,
        }
    }

    pub fn ball() -> Self {
        Self::new(Image::Circle([230, 20, 20]))
    }

    pub fn splitter() -> Self {
        Self::new(Image::Circle([20, 230, 20]))
    }

    pub fn wall() -> Self {
        Self::new(Image::Square([170, 53, 232]))
    }
}

/// A simulated body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Assigned by the world on spawn
    pub id: BodyId,
    pub position: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
    #[serde(default)]
    pub collider: Option<Collider>,
    #[serde(default)]
    pub motion: Option<Motion>,
    #[serde(default)]
    pub appearance: Option<Appearance>,
}

fn check_size(size: f32) -> Result<f32, BodyError> {
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(BodyError::InvalidSize(size))
    }
}

impl Body {
    /// A body with no components at the given position
    pub fn at(position: Vec2) -> Self {
        Self {
            id: BodyId(0),
            position,
            velocity: Vec2::ZERO,
            collider: None,
            motion: None,
            appearance: None,
        }
    }

    /// A default ball (size 0.5, mass 1) at `position`
    pub fn ball(position: Vec2) -> Self {
        Self {
            collider: Some(Collider {
                shape: Shape::Circle { size: BALL_SIZE },
                mass: Mass::default(),
            }),
            motion: Some(Motion::Linear),
            appearance: Some(Appearance::ball()),
            ..Self::at(position)
        }
    }

    /// A default splitter (a ball that fissions) at `position`
    pub fn splitter(position: Vec2) -> Self {
        Self {
            motion: Some(Motion::Splitting {
                split_angle: DEFAULT_SPLIT_ANGLE,
            }),
            appearance: Some(Appearance::splitter()),
            ..Self::ball(position)
        }
    }

    /// A unit wall at `position`, rotated by `rotation` degrees
    pub fn wall(position: Vec2, rotation: f32) -> Self {
        Self {
            collider: Some(Collider {
                shape: Shape::Rect {
                    size: WALL_SIZE,
                    rotation,
                },
                mass: Mass::Infinite,
            }),
            appearance: Some(Appearance::wall()),
            ..Self::at(position)
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the collider size (diameter for circles, side for rects)
    pub fn with_size(mut self, size: f32) -> Result<Self, BodyError> {
        let size = check_size(size)?;
        if let Some(collider) = self.collider.as_mut() {
            collider.shape = match collider.shape {
                Shape::Circle { .. } => Shape::Circle { size },
                Shape::Rect { rotation, .. } => Shape::Rect { size, rotation },
            };
        } else if let Some(appearance) = self.appearance.as_mut() {
            appearance.display_size = Some(size);
        }
        Ok(self)
    }

    /// Set a finite mass. Immovable bodies are built with [`Body::wall`].
    pub fn with_mass(mut self, mass: f32) -> Result<Self, BodyError> {
        let mass = Mass::finite(mass)?;
        if let Some(collider) = self.collider.as_mut() {
            collider.mass = mass;
        }
        Ok(self)
    }

    pub fn with_split_angle(mut self, split_angle: f32) -> Self {
        if let Some(Motion::Splitting { split_angle: angle }) = self.motion.as_mut() {
            *angle = split_angle;
        }
        self
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    /// Check invariants that builders alone cannot enforce
    pub fn validate(&self) -> Result<(), BodyError> {
        if let Some(collider) = &self.collider {
            check_size(collider.shape.size())?;
            if let Mass::Finite(m) = collider.mass {
                Mass::finite(m)?;
            }
            if collider.mass.is_infinite() && matches!(self.motion, Some(Motion::Splitting { .. }))
            {
                return Err(BodyError::ImmovableSplitter);
            }
        }
        Ok(())
    }

    pub fn mass(&self) -> Option<Mass> {
        self.collider.map(|c| c.mass)
    }

    pub fn shape(&self) -> Option<Shape> {
        self.collider.map(|c| c.shape)
    }

    pub fn is_splitter(&self) -> bool {
        matches!(self.motion, Some(Motion::Splitting { .. }))
    }

    /// Momentum magnitude, `None` for immovable or collider-less bodies
    pub fn momentum(&self) -> Option<f32> {
        self.mass()
            .and_then(|m| m.value())
            .map(|m| m * self.velocity.length())
    }
}

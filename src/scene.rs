//! Scene presets and the director that runs them
//!
//! A scene is a background colour, a world, and an optional countdown
//! that hands control to another scene when it runs out.

use glam::Vec2;

use crate::consts::SPLASH_SECONDS;
use crate::sim::{Appearance, Body, BodyError, Image, TickReport, World, tick};

/// Scene presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneId {
    #[default]
    Splash,
    Title,
    Kinematic,
}

impl SceneId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneId::Splash => "splash",
            SceneId::Title => "title",
            SceneId::Kinematic => "kinematic",
        }
    }

    /// Look up a scene by the name given on the command line
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "splash" => Some(SceneId::Splash),
            "title" => Some(SceneId::Title),
            "kinematic" => Some(SceneId::Kinematic),
            _ => None,
        }
    }

    /// Starting scene for an optional name; unknown names start at the splash
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            Some(n) => Self::from_name(n).unwrap_or_else(|| {
                log::warn!("Unknown scene `{}`, starting with the splash", n);
                SceneId::default()
            }),
            None => SceneId::default(),
        }
    }

    pub fn background_color(&self) -> [u8; 3] {
        match self {
            SceneId::Splash => [112, 31, 153],
            SceneId::Title => [31, 175, 204],
            SceneId::Kinematic => [56, 143, 61],
        }
    }
}

/// What the director should do after a scene update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Replace(SceneId),
}

/// A running scene
#[derive(Debug, Clone)]
pub struct Scene {
    pub id: SceneId,
    pub world: World,
    /// Seconds left before handing over to the next scene
    count_down: Option<(f32, SceneId)>,
}

impl Scene {
    pub fn new(id: SceneId) -> Result<Self, BodyError> {
        let mut world = World::new();
        let mut count_down = None;

        match id {
            SceneId::Splash => count_down = Some((SPLASH_SECONDS, SceneId::Title)),
            SceneId::Title => {
                let title = Body::at(Vec2::ZERO)
                    .with_appearance(Appearance::new(Image::File(
                        "butterfly_effect/resources/title.png".into(),
                    )))
                    .with_size(2.5)?;
                world.spawn(title)?;
            }
            SceneId::Kinematic => {
                for body in kinematic_bodies()? {
                    world.spawn(body)?;
                }
            }
        }

        Ok(Self {
            id,
            world,
            count_down,
        })
    }

    pub fn background_color(&self) -> [u8; 3] {
        self.id.background_color()
    }

    /// Advance the scene by one step
    pub fn update(&mut self, dt: f32) -> (TickReport, Transition) {
        let report = tick(&mut self.world, dt);

        if let Some((remaining, next)) = self.count_down.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                return (report, Transition::Replace(*next));
            }
        }
        (report, Transition::Stay)
    }
}

/// The collision playground
fn kinematic_bodies() -> Result<Vec<Body>, BodyError> {
    let ball = |x: f32, y: f32, vx: f32| Body::ball(Vec2::new(x, y)).with_velocity(Vec2::new(vx, 0.0));

    Ok(vec![
        ball(-2.0, 0.0, 8.0),
        Body::ball(Vec2::ZERO).with_size(1.0)?.with_mass(4.0)?,
        ball(4.0, -0.5, 0.0),
        ball(5.0, -1.0, 0.0),
        ball(-5.0, -3.0, 1.0),
        ball(-2.0, -2.6, 1.0),
        ball(-1.0, -2.7, 1.0),
        ball(0.0, -2.8, 1.0),
        ball(1.0, -2.95, 2.0),
        ball(2.0, -2.94, 3.0),
        Body::wall(Vec2::new(-3.0, 0.0), 20.0),
        Body::wall(Vec2::new(0.0, 2.85), 45.0),
        Body::wall(Vec2::new(6.0, -3.0), 45.0).with_size(2.0)?,
        Body::splitter(Vec2::new(3.0, 0.1)),
    ])
}

/// Owns the current scene and swaps it out on request
#[derive(Debug)]
pub struct Director {
    scene: Scene,
}

impl Director {
    pub fn new(start: SceneId) -> Result<Self, BodyError> {
        log::info!("Starting scene: {}", start.as_str());
        Ok(Self {
            scene: Scene::new(start)?,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Step the current scene, replacing it if it asks to be
    pub fn advance(&mut self, dt: f32) -> Result<TickReport, BodyError> {
        let (report, transition) = self.scene.update(dt);
        if let Transition::Replace(next) = transition {
            log::info!(
                "Replacing scene {} with {}",
                self.scene.id.as_str(),
                next.as_str()
            );
            self.scene = Scene::new(next)?;
        }
        Ok(report)
    }
}

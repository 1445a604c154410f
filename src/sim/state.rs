//! World state
//!
//! Holds the live bodies in a stable order, allocates ids, and buffers
//! structural changes requested during a tick until the tick is over.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyError, BodyId};

/// A structural change to apply between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Spawn(Body),
    Despawn(BodyId),
}

/// All simulated bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Live bodies, in spawn order
    bodies: Vec<Body>,
    /// Commands queued during the current tick
    #[serde(skip)]
    pending: Vec<Command>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next body id
    next_id: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            pending: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a body right away. Use between ticks only.
    pub fn spawn(&mut self, mut body: Body) -> Result<BodyId, BodyError> {
        body.validate()?;
        let id = self.next_body_id();
        body.id = id;
        self.bodies.push(body);
        Ok(id)
    }

    /// Request a body be added once the current tick completes
    pub fn queue_spawn(&mut self, body: Body) {
        self.pending.push(Command::Spawn(body));
    }

    /// Request a body be removed once the current tick completes
    pub fn queue_despawn(&mut self, id: BodyId) {
        self.pending.push(Command::Despawn(id));
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Apply queued commands in the order they were issued.
    /// Returns how many commands took effect.
    pub fn apply_pending(&mut self) -> usize {
        let commands = std::mem::take(&mut self.pending);
        let mut applied = 0;
        for command in commands {
            match command {
                Command::Spawn(body) => match self.spawn(body) {
                    Ok(_) => applied += 1,
                    Err(e) => log::warn!("Dropping invalid spawn: {}", e),
                },
                Command::Despawn(id) => {
                    let before = self.bodies.len();
                    self.bodies.retain(|b| b.id != id);
                    if self.bodies.len() < before {
                        applied += 1;
                    } else {
                        log::warn!("Despawn of unknown body {:?}", id);
                    }
                }
            }
        }
        if applied > 0 {
            log::debug!("Applied {} world commands, {} bodies live", applied, self.bodies.len());
        }
        applied
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Total linear momentum of all finite-mass bodies
    pub fn total_momentum(&self) -> Vec2 {
        self.bodies
            .iter()
            .filter_map(|b| b.mass().and_then(|m| m.value()).map(|m| m * b.velocity))
            .sum()
    }

    /// Total kinetic energy of all finite-mass bodies
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies
            .iter()
            .filter_map(|b| {
                b.mass()
                    .and_then(|m| m.value())
                    .map(|m| 0.5 * m * b.velocity.length_squared())
            })
            .sum()
    }
}

//! Per-frame simulation tick
//!
//! One tick is two strictly ordered passes: every unordered pair of
//! collidable bodies is resolved once, then every moving body integrates.
//! Velocity changes from a pair are visible to the pairs after it.
//! Bodies spawned or removed during the tick show up on the next one.

use std::f32::consts::SQRT_2;

use glam::Vec2;

use super::body::{Body, BodyId, Collider, Mass, Motion, Shape};
use super::collision::{collision_vector, elastic_collision};
use super::state::World;
use crate::consts::SPLIT_MOMENTUM;
use crate::rotate_degrees;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Pairs found touching
    pub contacts: u32,
    /// Touching pairs that actually exchanged velocity
    pub impulses: u32,
    /// Splitters that fissioned
    pub splits: u32,
}

/// Advance the world by `dt` seconds
pub fn tick(world: &mut World, dt: f32) -> TickReport {
    let dt = if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid time delta {}", dt);
        0.0
    };

    world.time_ticks += 1;
    let mut report = TickReport::default();

    resolve_collisions(world.bodies_mut(), &mut report);

    let mut fissions: Vec<(BodyId, [Body; 2])> = Vec::new();
    for body in world.bodies_mut().iter_mut() {
        if let Some(children) = integrate(body, dt) {
            fissions.push((body.id, children));
        }
    }

    for (parent, children) in fissions {
        log::debug!("Body {:?} split at tick {}", parent, world.time_ticks);
        for child in children {
            world.queue_spawn(child);
        }
        world.queue_despawn(parent);
        report.splits += 1;
    }

    world.apply_pending();
    report
}

/// Pair pass: detect and respond to every touching pair, in order
fn resolve_collisions(bodies: &mut [Body], report: &mut TickReport) {
    for j in 1..bodies.len() {
        let (head, tail) = bodies.split_at_mut(j);
        let o2 = &mut tail[0];
        let Some(m2) = o2.mass() else { continue };

        for o1 in head.iter_mut() {
            let Some(m1) = o1.mass() else { continue };

            let x_hat = collision_vector(o1, o2);
            if x_hat == Vec2::ZERO {
                continue;
            }
            report.contacts += 1;

            let (dv1, dv2) = elastic_collision(x_hat, o2.velocity - o1.velocity, m1, m2, false);
            if dv1 != Vec2::ZERO || dv2 != Vec2::ZERO {
                log::trace!("Impulse between {:?} and {:?} along {}", o1.id, o2.id, x_hat);
                report.impulses += 1;
            }
            o1.velocity += dv1;
            o2.velocity += dv2;
        }
    }
}

/// Integration pass for one body; returns children if it split
fn integrate(body: &mut Body, dt: f32) -> Option<[Body; 2]> {
    let motion = body.motion?;
    body.position += body.velocity * dt;

    match motion {
        Motion::Linear => None,
        Motion::Splitting { split_angle } => fission(body, split_angle),
    }
}

/// Two lighter copies diverging by `±split_angle`, once momentum reaches the threshold
fn fission(parent: &Body, split_angle: f32) -> Option<[Body; 2]> {
    let Collider {
        shape: Shape::Circle { size },
        mass: mass @ Mass::Finite(m),
    } = parent.collider?
    else {
        return None;
    };

    if m * parent.velocity.length() < SPLIT_MOMENTUM {
        return None;
    }

    let child = |angle: f32| Body {
        id: BodyId(0),
        position: parent.position,
        velocity: rotate_degrees(parent.velocity, angle),
        collider: Some(Collider {
            shape: Shape::Circle {
                size: size / SQRT_2,
            },
            mass: mass.halved(),
        }),
        motion: Some(Motion::Splitting { split_angle }),
        appearance: parent.appearance.clone(),
    };

    Some([child(split_angle), child(-split_angle)])
}

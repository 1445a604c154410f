//! Collision detection and elastic response
//!
//! Detection is a double dispatch over shape kinds: each probe either
//! answers for a pair of shapes or declines, and the resolver falls back
//! to the swapped pair (negating the normal) when the first probe declines.

use glam::Vec2;

use super::body::{Body, Mass, Shape};
use super::rect::SquareFrame;

/// Outcome of a single collision probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// This probe does not know the shape combination; ask the other side
    NotApplicable,
    /// Known combination, not touching
    Clear,
    /// Touching; unit normal pointing from the probing body toward the other
    Normal(Vec2),
}

impl Contact {
    /// Collapse to a vector (zero when there is no contact)
    pub fn vector(self) -> Option<Vec2> {
        match self {
            Contact::NotApplicable => None,
            Contact::Clear => Some(Vec2::ZERO),
            Contact::Normal(n) => Some(n),
        }
    }

    /// Wrap a possibly-zero direction, treating zero as no contact
    fn from_direction(n: Vec2) -> Self {
        let n = n.normalize_or_zero();
        if n == Vec2::ZERO {
            Contact::Clear
        } else {
            Contact::Normal(n)
        }
    }
}

/// Circle vs circle, from `a` toward `b`
pub fn circle_circle(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> Contact {
    let x = b_pos - a_pos;
    if x.length() > (a_size + b_size) / 2.0 {
        return Contact::Clear;
    }
    // Coincident centres have no meaningful normal
    Contact::from_direction(x)
}

/// Square wall vs circle, from the wall toward the ball
///
/// Edges are tested before corners, so a ball within an edge's
/// perpendicular reach never takes the corner branch.
pub fn rect_circle(wall: &SquareFrame, ball_pos: Vec2, ball_size: f32) -> Contact {
    let reach = ball_size / 2.0;
    let p = wall.to_local(ball_pos);

    for edge in wall.edges() {
        let c = edge.vector();
        let c_hat = c.normalize_or_zero();
        let x = p - edge.start;
        let e = x.dot(c_hat);
        let n = x - e * c_hat;
        if (0.0..=c.length()).contains(&e) && n.length() <= reach {
            return Contact::from_direction(wall.direction_to_world(n));
        }
    }

    for corner in wall.corners() {
        let n = p - corner;
        if n.length() <= reach {
            return Contact::from_direction(wall.direction_to_world(n));
        }
    }

    Contact::Clear
}

/// Ask `a` about its contact with `b`
pub fn probe(a: &Body, b: &Body) -> Contact {
    let (Some(sa), Some(sb)) = (a.shape(), b.shape()) else {
        return Contact::NotApplicable;
    };
    match (sa, sb) {
        (Shape::Circle { size: s1 }, Shape::Circle { size: s2 }) => {
            circle_circle(a.position, s1, b.position, s2)
        }
        (Shape::Rect { size, rotation }, Shape::Circle { size: ball_size }) => {
            let frame = SquareFrame::new(a.position, size, rotation);
            rect_circle(&frame, b.position, ball_size)
        }
        _ => Contact::NotApplicable,
    }
}

/// Collision normal between two bodies, pointing from `o1` toward `o2`
///
/// Returns the zero vector when they do not touch or when neither
/// body knows how to collide with the other.
pub fn collision_vector(o1: &Body, o2: &Body) -> Vec2 {
    if let Some(n) = probe(o1, o2).vector() {
        return n;
    }
    if let Some(n) = probe(o2, o1).vector() {
        return -n;
    }
    Vec2::ZERO
}

/// Velocity changes for an elastic collision along `x_hat`
///
/// `x_hat` is the unit normal from body 1 toward body 2 and `v` is the
/// relative velocity `v2 - v1`. Pairs already separating along the normal
/// are left alone unless `internal` is set. Returns `(dv1, dv2)`.
pub fn elastic_collision(x_hat: Vec2, v: Vec2, m1: Mass, m2: Mass, internal: bool) -> (Vec2, Vec2) {
    let (m1, m2) = match (m1, m2) {
        (Mass::Infinite, Mass::Infinite) => return (Vec2::ZERO, Vec2::ZERO),
        other => other,
    };

    let v_normal = x_hat.dot(v);
    if v_normal >= 0.0 && !internal {
        return (Vec2::ZERO, Vec2::ZERO);
    }

    match (m1, m2) {
        // Body 1 is a wall
        (Mass::Infinite, _) => (Vec2::ZERO, -2.0 * v_normal * x_hat),
        // Body 2 is a wall
        (_, Mass::Infinite) => (2.0 * v_normal * x_hat, Vec2::ZERO),
        (Mass::Finite(m1), Mass::Finite(m2)) => {
            let total = m1 + m2;
            let dv1_normal = 2.0 * m2 / total * v_normal;
            let dv2_normal = (m2 - m1) / total * v_normal;
            (dv1_normal * x_hat, (dv2_normal - v_normal) * x_hat)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball(x: f32, y: f32, size: f32) -> Body {
        Body::ball(Vec2::new(x, y)).with_size(size).unwrap()
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_circles_touching() {
        let a = ball(0.0, 0.0, 1.0);
        let b = ball(1.0, 0.0, 1.0);
        assert!(approx(collision_vector(&a, &b), Vec2::X));
        assert!(approx(collision_vector(&b, &a), -Vec2::X));
    }

    #[test]
    fn test_circles_apart() {
        let a = ball(0.0, 0.0, 1.0);
        let b = ball(1.01, 0.0, 1.0);
        assert_eq!(collision_vector(&a, &b), Vec2::ZERO);
        assert_eq!(probe(&a, &b), Contact::Clear);
    }

    #[test]
    fn test_circles_coincident() {
        let a = ball(2.0, 2.0, 1.0);
        let b = ball(2.0, 2.0, 1.0);
        assert_eq!(collision_vector(&a, &b), Vec2::ZERO);
    }

    #[test]
    fn test_circle_declines_rect() {
        let b = ball(0.0, 0.0, 1.0);
        let w = Body::wall(Vec2::ZERO, 0.0);
        assert_eq!(probe(&b, &w), Contact::NotApplicable);
    }

    #[test]
    fn test_walls_never_collide() {
        let w1 = Body::wall(Vec2::ZERO, 0.0);
        let w2 = Body::wall(Vec2::new(0.2, 0.0), 30.0);
        assert_eq!(probe(&w1, &w2), Contact::NotApplicable);
        assert_eq!(collision_vector(&w1, &w2), Vec2::ZERO);
    }

    #[test]
    fn test_collider_less_body_is_ignored() {
        let title = Body::at(Vec2::ZERO);
        let b = ball(0.0, 0.0, 1.0);
        assert_eq!(collision_vector(&title, &b), Vec2::ZERO);
    }

    #[test]
    fn test_wall_left_edge_just_inside() {
        let wall = Body::wall(Vec2::ZERO, 0.0);
        // Centre just inside the left face, at its midpoint
        let b = ball(-0.49, 0.0, 1.0);
        let n = collision_vector(&wall, &b);
        assert!(approx(n, Vec2::X), "got {n:?}");
    }

    #[test]
    fn test_wall_left_edge_outside() {
        let wall = Body::wall(Vec2::ZERO, 0.0);
        let b = ball(-0.6, 0.1, 0.5);
        assert!(approx(collision_vector(&wall, &b), -Vec2::X));
        // Swapped order flips the normal
        assert!(approx(collision_vector(&b, &wall), Vec2::X));
    }

    #[test]
    fn test_wall_corner_branch() {
        let frame = SquareFrame::new(Vec2::ZERO, 1.0, 0.0);
        // Beyond every edge's segment range, within reach of the top-right corner
        let contact = rect_circle(&frame, Vec2::new(0.6, 0.6), 0.5);
        let diagonal = Vec2::new(1.0, 1.0).normalize();
        match contact {
            Contact::Normal(n) => assert!(approx(n, diagonal), "got {n:?}"),
            other => panic!("expected corner contact, got {other:?}"),
        }
    }

    #[test]
    fn test_wall_edge_has_priority_over_corner() {
        let frame = SquareFrame::new(Vec2::ZERO, 1.0, 0.0);
        // Within reach of the top-right corner, but still over the right edge
        let contact = rect_circle(&frame, Vec2::new(0.7, 0.45), 0.5);
        assert_eq!(contact.vector().map(|n| approx(n, Vec2::X)), Some(true));
    }

    #[test]
    fn test_wall_miss() {
        let frame = SquareFrame::new(Vec2::ZERO, 1.0, 0.0);
        assert_eq!(rect_circle(&frame, Vec2::new(2.0, 0.0), 0.5), Contact::Clear);
        assert_eq!(rect_circle(&frame, Vec2::new(0.7, 0.7), 0.5), Contact::Clear);
    }

    #[test]
    fn test_rotated_wall_normal_is_rotated() {
        let wall = Body::wall(Vec2::new(1.0, 1.0), 45.0);
        let dir = crate::rotate_degrees(Vec2::X, 45.0);
        let b = Body::ball(Vec2::new(1.0, 1.0) + dir * 0.7);
        let n = collision_vector(&wall, &b);
        assert!(approx(n, dir), "got {n:?}");
    }

    #[test]
    fn test_elastic_both_infinite() {
        let (dv1, dv2) = elastic_collision(
            Vec2::X,
            Vec2::new(-5.0, 1.0),
            Mass::Infinite,
            Mass::Infinite,
            true,
        );
        assert_eq!((dv1, dv2), (Vec2::ZERO, Vec2::ZERO));
    }

    #[test]
    fn test_elastic_separating() {
        let (dv1, dv2) = elastic_collision(
            Vec2::X,
            Vec2::new(2.0, 0.0),
            Mass::Finite(1.0),
            Mass::Finite(1.0),
            false,
        );
        assert_eq!((dv1, dv2), (Vec2::ZERO, Vec2::ZERO));
    }

    #[test]
    fn test_elastic_internal_still_exchanges() {
        let (dv1, dv2) = elastic_collision(
            Vec2::X,
            Vec2::new(2.0, 0.0),
            Mass::Finite(1.0),
            Mass::Finite(1.0),
            true,
        );
        assert!(approx(dv1, Vec2::new(2.0, 0.0)));
        assert!(approx(dv2, Vec2::new(-2.0, 0.0)));
    }

    #[test]
    fn test_elastic_wall_bounce() {
        // Ball approaching a wall (body 1) from the right
        let (dv1, dv2) = elastic_collision(
            Vec2::X,
            Vec2::new(-3.0, 1.0),
            Mass::Infinite,
            Mass::Finite(1.0),
            false,
        );
        assert_eq!(dv1, Vec2::ZERO);
        assert!(approx(dv2, Vec2::new(6.0, 0.0)));

        let (dv1, dv2) = elastic_collision(
            Vec2::X,
            Vec2::new(-3.0, 1.0),
            Mass::Finite(1.0),
            Mass::Infinite,
            false,
        );
        assert!(approx(dv1, Vec2::new(-6.0, 0.0)));
        assert_eq!(dv2, Vec2::ZERO);
    }

    #[test]
    fn test_elastic_light_into_heavy() {
        // 1 kg at 8 m/s hits a resting 4 kg body head on
        let (dv1, dv2) = elastic_collision(
            Vec2::X,
            Vec2::new(-8.0, 0.0),
            Mass::Finite(1.0),
            Mass::Finite(4.0),
            false,
        );
        assert!(approx(dv1, Vec2::new(-12.8, 0.0)));
        assert!(approx(dv2, Vec2::new(3.2, 0.0)));
    }

    proptest! {
        #[test]
        fn prop_elastic_conserves_normal_momentum_and_energy(
            angle in 0.0f32..360.0,
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
            m1 in 0.1f32..10.0,
            m2 in 0.1f32..10.0,
        ) {
            let x_hat = crate::rotate_degrees(Vec2::X, angle);
            let v = Vec2::new(vx, vy);
            let v_normal = x_hat.dot(v);
            prop_assume!(v_normal < -1e-3);

            let (dv1, dv2) = elastic_collision(x_hat, v, Mass::Finite(m1), Mass::Finite(m2), false);

            // Frame where body 1 starts at rest
            let u1 = dv1.dot(x_hat);
            let u2 = (v + dv2).dot(x_hat);
            let scale = m2 * v_normal * v_normal + 1.0;
            prop_assert!((m2 * v_normal - (m1 * u1 + m2 * u2)).abs() < 1e-3 * scale);
            prop_assert!(
                (m2 * v_normal * v_normal - (m1 * u1 * u1 + m2 * u2 * u2)).abs() < 1e-3 * scale
            );

            // Tangential components are untouched
            let tangent = x_hat.perp();
            prop_assert!(dv1.dot(tangent).abs() < 1e-3);
            prop_assert!(dv2.dot(tangent).abs() < 1e-3);
        }

        #[test]
        fn prop_elastic_separating_is_inert(
            angle in 0.0f32..360.0,
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
            m1 in 0.1f32..10.0,
        ) {
            let x_hat = crate::rotate_degrees(Vec2::X, angle);
            let v = Vec2::new(vx, vy);
            prop_assume!(x_hat.dot(v) >= 0.0);
            let (dv1, dv2) = elastic_collision(x_hat, v, Mass::Finite(m1), Mass::Infinite, false);
            prop_assert_eq!(dv1, Vec2::ZERO);
            prop_assert_eq!(dv2, Vec2::ZERO);
        }

        #[test]
        fn prop_circle_dispatch_is_antisymmetric(
            ax in -2.0f32..2.0, ay in -2.0f32..2.0,
            bx in -2.0f32..2.0, by in -2.0f32..2.0,
            sa in 0.1f32..2.0, sb in 0.1f32..2.0,
        ) {
            let a = ball(ax, ay, sa);
            let b = ball(bx, by, sb);
            let n1 = collision_vector(&a, &b);
            let n2 = collision_vector(&b, &a);
            prop_assert!((n1 + n2).length() < 1e-5);
        }

        #[test]
        fn prop_wall_normals_are_unit_or_zero(
            px in -2.0f32..2.0, py in -2.0f32..2.0,
            rotation in 0.0f32..360.0,
            size in 0.1f32..1.5,
        ) {
            let wall = Body::wall(Vec2::ZERO, rotation);
            let b = ball(px, py, size);
            let n = collision_vector(&b, &wall);
            prop_assert!(n == Vec2::ZERO || (n.length() - 1.0).abs() < 1e-4);
            prop_assert_eq!(n, -collision_vector(&wall, &b));
        }
    }
}

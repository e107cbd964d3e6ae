//! Avatar kinematics and the border collision primitive. Avatars are
//! processed in array order and the rails in declaration order; the
//! ordering is part of the determinism contract.

use crate::arena::BORDERS;
use crate::constants::*;
use crate::geom::{self, Circle, Vector2};
use crate::types::Game;

/// What a border pass observed: the largest `|v . normal|` across all
/// contacts, and how many rails were hit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BorderContact {
    pub max_impact: f32,
    pub collision_count: u8,
}

/// Resolve a moving circle against the six rails. The circle is tested
/// with its radius inflated by `safe_distance`; each contact reflects
/// the velocity about the rail normal, scales it by `dampening`, and
/// pushes the center out past the penetration depth.
pub fn collide_with_borders(
    circle: &mut Circle,
    velocity: &mut Vector2,
    safe_distance: f32,
    dampening: f32,
) -> BorderContact {
    let mut contact = BorderContact::default();
    for border in &BORDERS {
        let probe = Circle {
            center: circle.center,
            radius: circle.radius + safe_distance,
        };
        let hit = geom::oriented_segment_circle_contact(&border.segment, border.inward, &probe);
        if hit.depth > 0.0 {
            let impact = velocity.dot(hit.normal).abs();
            *velocity = velocity.reflect(hit.normal) * dampening;
            circle.center = circle
                .center
                .add_scale(hit.normal, hit.depth + PENETRATION_EPSILON);
            if impact > contact.max_impact {
                contact.max_impact = impact;
            }
            contact.collision_count += 1;
        }
    }
    contact
}

/// Push a circle out of any rail it penetrates without touching its
/// velocity.
pub fn depenetrate_from_borders(circle: &mut Circle) {
    for border in &BORDERS {
        let hit = geom::oriented_segment_circle_contact(&border.segment, border.inward, circle);
        if hit.depth > 0.0 {
            circle.center = circle
                .center
                .add_scale(hit.normal, hit.depth + PENETRATION_EPSILON);
        }
    }
}

/// One locomotion step for every avatar: slide-tackle burst or lockout,
/// otherwise steering toward the requested velocity, then cap, damp,
/// integrate, blend the visual heading, and stay inside the rails.
pub fn tick_avatars(game: &mut Game) {
    for i in 0..game.avatar_count as usize {
        let avatar = &mut game.avatars[i];

        if avatar.slide_tackle_remaining > 0 {
            let heading = Vector2::from_angle(avatar.slide_tackle_rotation);
            let progress =
                f32::from(avatar.slide_tackle_remaining) / f32::from(SLIDE_TACKLE_DURATION_TICKS);
            avatar.velocity = avatar
                .velocity
                .add_scale(heading, progress * progress * SLIDE_TACKLE_FORCE);
        } else if avatar.slide_tackle_cooldown > 0 {
            // Getting back up; no locomotion until the lockout ends.
            avatar.velocity = geom::ZERO;
        } else {
            let acceleration = if avatar.kick_power > 0 {
                AVATAR_ACCELERATION_CHARGING
            } else {
                AVATAR_ACCELERATION
            };
            avatar.velocity = avatar
                .velocity
                .add_scale(avatar.requested_velocity, acceleration);
        }

        if avatar.velocity.length_sq() > MAX_AVATAR_SPEED * MAX_AVATAR_SPEED {
            avatar.velocity = avatar.velocity.unit() * MAX_AVATAR_SPEED;
        }
        avatar.velocity *= AVATAR_DAMPING;
        avatar.circle.center += avatar.velocity;

        if avatar.requested_velocity.length_sq() > ROTATION_REQUEST_EPSILON {
            let target = avatar.requested_velocity.angle();
            avatar.visual_rotation +=
                geom::wrap_angle(target - avatar.visual_rotation) * ROTATION_BLEND;
        }

        collide_with_borders(
            &mut avatar.circle,
            &mut avatar.velocity,
            AVATAR_BORDER_SAFE_DISTANCE,
            AVATAR_BORDER_DAMPENING,
        );
    }
}

/// Advance slide-tackle bookkeeping: an active tackle runs down first,
/// then the lockout, and only a fully rested avatar can arm a new one.
pub fn tick_slide_tackle_timers(game: &mut Game) {
    for i in 0..game.avatar_count as usize {
        let avatar = &mut game.avatars[i];
        if avatar.slide_tackle_remaining > 0 {
            avatar.slide_tackle_remaining -= 1;
            continue;
        }
        if avatar.slide_tackle_cooldown > 0 {
            avatar.slide_tackle_cooldown -= 1;
            continue;
        }
        if avatar.request_slide_tackle {
            avatar.slide_tackle_cooldown = SLIDE_TACKLE_COOLDOWN_TICKS;
            avatar.slide_tackle_remaining = SLIDE_TACKLE_DURATION_TICKS;
            avatar.slide_tackle_rotation = avatar.visual_rotation;
        }
    }
}
